//! Fallback assets for costumes that don't provide every file.

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::{
    assets::{self, AssetFile, AssetType},
    costume::CostumeConfig,
};
use crate::character::Character;

/// The costume whose files are used as each character's defaults.
const DEFAULT_COSTUME_ID: i32 = 1;

/// Builds the default asset set for a party member from their first costume.
fn default_config(character: Character) -> CostumeConfig {
    AssetType::iter().fold(CostumeConfig::new(), |config, asset_type| {
        match assets::native_asset_file(character, DEFAULT_COSTUME_ID, asset_type) {
            Some(file) => config.with_asset(asset_type, file),
            None => config,
        }
    })
}

/// The protagonist's defaults moved over to the female protagonist's files.
fn alternate_player_config() -> CostumeConfig {
    AssetType::iter().fold(CostumeConfig::new(), |config, asset_type| {
        let file =
            assets::native_asset_file(Character::Player, DEFAULT_COSTUME_ID, asset_type)
                .map(|file| AssetFile::new(file).for_character(Character::Femc));

        match file {
            Some(file) => config.with_asset(asset_type, file.file()),
            None => config,
        }
    })
}

/// Per-character default assets, plus the alternate protagonist set.
#[derive(Debug)]
pub struct DefaultCostumes {
    defaults: HashMap<Character, CostumeConfig>,
    alternate_player: CostumeConfig,
}

impl DefaultCostumes {
    pub fn new() -> DefaultCostumes {
        let defaults = (Character::FIRST_PLAYABLE.raw()..=Character::LAST_PLAYABLE.raw())
            .filter_map(Character::from_raw)
            .map(|character| (character, default_config(character)))
            .collect();

        DefaultCostumes {
            defaults,
            alternate_player: alternate_player_config(),
        }
    }

    /// Returns the default file for `asset_type`. When `use_alternate` is set, the protagonist
    /// gets the alternate set instead of their own.
    pub fn asset_file(
        &self,
        character: Character,
        asset_type: AssetType,
        use_alternate: bool,
    ) -> Option<&str> {
        let config = if character == Character::Player && use_alternate {
            &self.alternate_player
        } else {
            self.defaults.get(&character)?
        };

        config.asset_file(asset_type)
    }
}

impl Default for DefaultCostumes {
    fn default() -> Self {
        DefaultCostumes::new()
    }
}
