//! Types for describing the game code we hook and the capability that does the hooking.
//!
//! Finding functions and patching them is the loader's job. We describe what to look for with a
//! `ScanTarget` and hand over the code to run; the loader gives back a `HookHandle`.

use eyre::Result;

/// A location in game code, found by scanning for a byte pattern.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScanTarget {
    /// Name used in log messages.
    pub name: &'static str,

    /// IDA-style byte pattern, with `??` for wildcards.
    pub pattern: &'static str,

    /// Offset from the start of the match to the instruction we patch.
    pub offset: usize,
}

/// The point in `UAppCharacterComp::Update` just before the costume ID is applied.
pub const SET_COSTUME_ID: ScanTarget = ScanTarget {
    name: "UAppCharacterComp_Update",
    pattern: "48 8B C4 48 89 48 ?? 55 41 54 48 8D 68 ?? 48 81 EC 48 01 00 00",
    offset: 0x255,
};

/// The fields of the game's `UAppCharacterComp` that we touch.
#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct AppCharacterComp {
    /// Raw character ID.
    pub character: i32,

    /// The costume the component is about to switch to.
    pub set_costume_id: i32,
}

/// Code that runs in place of the patched instruction. After it returns, the game carries on
/// with its original code.
pub type SetCostumeHook = Box<dyn FnMut(&mut AppCharacterComp)>;

/// An installed hook.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HookHandle {
    pub name: &'static str,

    /// Absolute address of the patched instruction.
    pub address: usize,
}

/// Something that can find and patch game code.
pub trait Interceptor {
    /// Finds the start of the function matching `target`'s pattern.
    fn locate(&mut self, target: &ScanTarget) -> Result<usize>;

    /// Patches the code at `address` so that it calls `replacement` first.
    fn install(&mut self, address: usize, replacement: SetCostumeHook) -> Result<HookHandle>;
}

/// Locates `target` and installs `replacement` at its patch offset.
pub fn hook_target(
    interceptor: &mut dyn Interceptor,
    target: &ScanTarget,
    replacement: SetCostumeHook,
) -> Result<HookHandle> {
    let function = interceptor.locate(target)?;
    let address = function + target.offset;

    log::info!("Found {} at {function:#x}, patching {address:#x}", target.name);

    interceptor.install(address, replacement)
}
