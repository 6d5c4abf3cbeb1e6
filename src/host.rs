//! Interfaces to the parts of the game we read from and write to. Implementations live in the
//! loader, which knows how to find the real objects in memory.

/// Scope that our name assignments are made under.
pub const NAME_SCOPE: &str = "p3rpc.costumeframework";

/// Name of the asset holding the costume item table.
pub const COSTUME_ITEM_ASSET: &str = "DatItemCostumeDataAsset";

/// An entry in the game's costume item table.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct CostumeItem {
    pub costume_id: u16,

    /// Bit flag of the character that can equip the costume.
    pub equip_id: u16,
}

/// The game's costume item table.
pub trait CostumeItemTable {
    /// Number of entries the game populated itself.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the entry at `index`.
    fn item(&self, index: usize) -> Option<CostumeItem>;

    /// Writes an entry. Indices past `len()` append.
    fn write_item(&mut self, index: usize, item: CostumeItem);
}

/// Finds game objects by name once they exist.
pub trait ObjectLookup {
    /// Calls `callback` with the costume item table the first time the object named `name` is
    /// created.
    fn on_object_available(
        &mut self,
        name: &'static str,
        callback: Box<dyn FnOnce(&mut dyn CostumeItemTable)>,
    );
}

/// The game's global name table.
pub trait NameTable {
    /// Makes every later lookup of `original` resolve to `replacement`.
    fn assign_name(&mut self, scope: &str, original: &str, replacement: &str);
}

/// Text shown for costume items in the equip menu.
pub trait CostumeDescriptions {
    fn set_description(&mut self, item_index: usize, text: &str);

    /// Called once all descriptions for a table have been set.
    fn commit(&mut self);
}
