//! Character identities as the game numbers them.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// A character known to the game's costume system.
///
/// The discriminants are the game's own character IDs. Only `Player` through `Shinjiro` are party
/// members; everything after that is cosmetic and is never resolved or randomised.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize, EnumIter,
    IntoStaticStr,
)]
#[repr(i32)]
pub enum Character {
    Player = 1,
    Yukari = 2,
    Stupei = 3,
    Akihiko = 4,
    Mitsuru = 5,
    Fuuka = 6,
    Aigis = 7,
    Ken = 8,
    Koromaru = 9,
    Shinjiro = 10,
    Metis = 11,

    /// The female protagonist. Only used as a source of default assets for `Player`.
    Femc = 12,
}

impl Character {
    /// The first party member.
    pub const FIRST_PLAYABLE: Character = Character::Player;

    /// The last party member.
    pub const LAST_PLAYABLE: Character = Character::Shinjiro;

    /// Converts a raw game character ID. Returns `None` for IDs the game uses for NPCs.
    pub fn from_raw(raw: i32) -> Option<Character> {
        Some(match raw {
            1 => Character::Player,
            2 => Character::Yukari,
            3 => Character::Stupei,
            4 => Character::Akihiko,
            5 => Character::Mitsuru,
            6 => Character::Fuuka,
            7 => Character::Aigis,
            8 => Character::Ken,
            9 => Character::Koromaru,
            10 => Character::Shinjiro,
            11 => Character::Metis,
            12 => Character::Femc,
            _ => return None,
        })
    }

    /// Returns the game's ID for this character.
    pub fn raw(self) -> i32 {
        self as i32
    }

    /// Returns `true` if this character is a party member whose costume we control.
    pub fn is_playable(self) -> bool {
        (Character::FIRST_PLAYABLE..=Character::LAST_PLAYABLE).contains(&self)
    }

    /// Returns the equip flag that the costume item table uses for this character.
    pub fn equip_flag(self) -> u16 {
        1 << self.raw()
    }

    /// Finds the character that an equip flag belongs to. Flags with more or less than one bit
    /// set don't belong to anyone.
    pub fn from_equip(equip: u16) -> Option<Character> {
        if equip.count_ones() != 1 {
            return None;
        }

        Character::from_raw(equip.trailing_zeros() as i32)
    }

    /// The four-digit index used in the character's asset file names.
    pub fn asset_index(self) -> String {
        format!("{:04}", self.raw())
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = (*self).into();
        f.write_str(name)
    }
}
