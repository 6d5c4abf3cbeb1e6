use std::collections::HashMap;

use eyre::{Result, WrapErr};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use super::{assets::AssetType, policy};
use crate::character::Character;

/// Where a costume came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CostumeSource {
    /// Shipped with the game and selectable normally.
    Game,

    /// Built from game files that were never meant to be worn. Only present when extra costumes
    /// are enabled.
    Extra,

    /// Added by a mod. These always have IDs of at least `BASE_MOD_COSTUME_ID`.
    Mod,
}

/// Per-asset files a costume replaces. Types without an entry use the character's default.
#[derive(Clone, Default, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostumeConfig {
    files: HashMap<AssetType, String>,
}

impl CostumeConfig {
    pub fn new() -> CostumeConfig {
        CostumeConfig::default()
    }

    /// Builder-style setter for a single asset.
    pub fn with_asset(mut self, asset_type: AssetType, file: impl Into<String>) -> CostumeConfig {
        self.files.insert(asset_type, file.into());
        self
    }

    /// Returns the file this costume provides for `asset_type`, if it has one.
    pub fn asset_file(&self, asset_type: AssetType) -> Option<&str> {
        self.files.get(&asset_type).map(String::as_str)
    }
}

/// A costume as a mod describes it on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CostumeDefinition {
    pub character: Character,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub assets: CostumeConfig,

    /// Costume IDs that should be replaced by this costume whenever the game asks for them.
    #[serde(default)]
    pub overrides: Vec<i32>,
}

impl CostumeDefinition {
    /// Parses a definition from JSON.
    pub fn parse_json(json: &str) -> Result<CostumeDefinition> {
        serde_json::from_str(json).wrap_err("invalid costume definition")
    }
}

/// A wearable costume.
#[derive(Debug)]
pub struct Costume {
    id: i32,
    character: Character,
    name: String,
    description: String,
    source: CostumeSource,
    config: CostumeConfig,

    /// Index of this costume's entry in the game's costume item table. Set once, when the table
    /// is built.
    item_index: OnceCell<usize>,
}

impl Costume {
    pub fn new(
        character: Character,
        id: i32,
        name: impl Into<String>,
        description: impl Into<String>,
        source: CostumeSource,
        config: CostumeConfig,
    ) -> Costume {
        Costume {
            id,
            character,
            name: name.into(),
            description: description.into(),
            source,
            config,
            item_index: OnceCell::new(),
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> CostumeSource {
        self.source
    }

    pub fn config(&self) -> &CostumeConfig {
        &self.config
    }

    /// Returns `true` if this costume's ID was allocated by us rather than the game, meaning the
    /// game has no files for it and its assets need redirecting.
    pub fn is_mod_id(&self) -> bool {
        self.id >= policy::BASE_MOD_COSTUME_ID
    }

    /// The costume's item table index, if it has been registered.
    pub fn item_index(&self) -> Option<usize> {
        self.item_index.get().copied()
    }

    /// Records the costume's item table index. Returns `false` (and changes nothing) if an index
    /// was already recorded.
    pub fn set_item_index(&self, index: usize) -> bool {
        match self.item_index.set(index) {
            Ok(()) => true,

            Err(_) => {
                log::warn!(
                    "Costume already has an item index: {} || Kept: {:?} || Rejected: {index}",
                    self.name,
                    self.item_index()
                );

                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_index_is_only_set_once() {
        let costume = Costume::new(
            Character::Yukari,
            3,
            "Swimsuit",
            "",
            CostumeSource::Game,
            CostumeConfig::new(),
        );

        assert_eq!(costume.item_index(), None);
        assert!(costume.set_item_index(12));
        assert!(!costume.set_item_index(400));
        assert_eq!(costume.item_index(), Some(12));
    }

    #[test]
    fn definition_parses_with_defaults() {
        let definition = CostumeDefinition::parse_json(
            r#"{
                "character": "Akihiko",
                "name": "Boxing Gear",
                "assets": { "CostumeMesh": "/Game/Mods/Boxing/SK_PC0004_C900.uasset" }
            }"#,
        )
        .unwrap();

        assert_eq!(definition.character, Character::Akihiko);
        assert_eq!(definition.description, "");
        assert!(definition.overrides.is_empty());
        assert_eq!(
            definition.assets.asset_file(AssetType::CostumeMesh),
            Some("/Game/Mods/Boxing/SK_PC0004_C900.uasset")
        );
        assert_eq!(definition.assets.asset_file(AssetType::HairMesh), None);
    }

    #[test]
    fn definition_rejects_unknown_character() {
        let result = CostumeDefinition::parse_json(r#"{ "character": "Nyx", "name": "?" }"#);

        assert!(result.is_err());
    }
}
