//! The link between costumes and costume-specific battle music.

use crate::character::Character;

/// Options passed through to whatever picks the music.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MusicOptions {
    pub battle_themes: bool,

    /// Only members of the current party contribute costume music. The player and Fuuka always do.
    pub current_party_only: bool,
}

impl Default for MusicOptions {
    fn default() -> Self {
        MusicOptions {
            battle_themes: true,
            current_party_only: true,
        }
    }
}

/// Chooses music tracks based on the costumes characters are wearing.
pub trait MusicSelector {
    /// Called once at startup with the user's music settings.
    fn configure(&mut self, _options: MusicOptions) {}

    /// Called with every costume ID we settle on, before the game sees it.
    fn refresh(&mut self, character: Character, costume_id: i32);
}

/// Selector used when music integration is switched off.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoMusic;

impl MusicSelector for NoMusic {
    fn refresh(&mut self, character: Character, costume_id: i32) {
        log::trace!("Music integration disabled || {character} || Costume ID: {costume_id}");
    }
}
