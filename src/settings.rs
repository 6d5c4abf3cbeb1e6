//! User settings, stored as JSON next to the mod.

use std::{fs::File, io::Read, path::Path};

use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::{
    character::Character,
    costumes::{
        music::MusicOptions,
        registry::{CostumeFilter, RegistryFilter},
        resolve::ResolutionState,
    },
};

/// How much gets logged.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub enum LogLevel {
    Verbose,
    Debug,

    /// The default.
    #[default]
    Information,

    Warning,
    Error,
}

impl LogLevel {
    /// Converts to the `log` crate's filter. The `debug` feature always enables debug logging.
    pub fn filter(self) -> log::LevelFilter {
        let filter = match self {
            LogLevel::Verbose => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Information => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        };

        if cfg!(feature = "debug") {
            filter.max(log::LevelFilter::Debug)
        } else {
            filter
        }
    }
}

/// Which costumes are allowed in the game and in randomisation.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub enum FilterMode {
    /// All costumes are allowed. This is the default.
    #[default]
    None,

    /// Only the game's own costumes.
    GameOnly,

    /// Only costumes from mods.
    ModsOnly,

    /// Only costumes listed in `costume_list`.
    ExplicitList,
}

/// Entry in the explicit costume list.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CostumeRef {
    pub character: Character,
    pub costume_id: i32,
}

/// The user's settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Options {
    pub log_level: LogLevel,

    /// Adds existing game files as new costumes. These may cause visual bugs.
    pub extra_costumes: bool,

    /// Whether costume music is selected at all.
    pub integration_bgme: bool,

    pub integration_battle_themes: bool,

    /// Limit costume music to members of the current party. The player and Fuuka always count.
    pub current_party_bgm_only: bool,

    /// Randomise costumes everywhere, including the overworld.
    pub randomize_costumes: bool,

    /// Use the female protagonist's defaults for the player's costumes.
    pub use_femc: bool,

    pub costume_filter: FilterMode,

    /// Costumes allowed when `costume_filter` is `ExplicitList`.
    pub costume_list: Vec<CostumeRef>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            log_level: LogLevel::default(),
            extra_costumes: true,
            integration_bgme: true,
            integration_battle_themes: true,
            current_party_bgm_only: true,
            randomize_costumes: false,
            use_femc: false,
            costume_filter: FilterMode::default(),
            costume_list: vec![],
        }
    }
}

impl Options {
    /// Attempts to parse the contents of `reader` to get an `Options` value.
    pub fn parse_json(reader: impl Read) -> Result<Options> {
        // Coerce with `?`.
        Ok(serde_json::from_reader(reader)?)
    }

    /// Looks for a settings file and loads it.
    fn load_from_file(path: &Path) -> Result<Option<Options>> {
        if !path.exists() {
            // This isn't an error, but we didn't find any settings.
            return Ok(None);
        }

        let file = File::open(path).wrap_err_with(|| format!("opening {}", path.display()))?;

        Ok(Some(Options::parse_json(file)?))
    }

    /// Either loads the settings from `path` or generates default values for them.
    pub fn load(path: impl AsRef<Path>) -> Options {
        match Options::load_from_file(path.as_ref()) {
            Ok(Some(options)) => return options,

            Ok(None) => log::info!("No settings file found. Defaults will be used."),

            Err(err) => {
                log::error!("Error loading settings file: {err:?}. Defaults will be used.")
            }
        };

        Options::default()
    }

    /// Saves the settings to `path`, returning any errors encountered.
    pub fn try_save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;

        Ok(())
    }

    /// Saves the settings to `path`. Errors will be logged.
    pub fn save(&self, path: impl AsRef<Path>) {
        if let Err(err) = self.try_save(path) {
            log::error!("Error saving options to file: {err:?}.");
        } else {
            log::info!("Settings saved.");
        }
    }

    /// The runtime switches these settings start with.
    pub fn resolution_state(&self) -> ResolutionState {
        ResolutionState::new(self.randomize_costumes, self.use_femc)
    }

    /// The filter used to build the active costume registry.
    pub fn registry_filter(&self) -> RegistryFilter {
        let filter = match self.costume_filter {
            FilterMode::None => CostumeFilter::None,
            FilterMode::GameOnly => CostumeFilter::GameOnly,
            FilterMode::ModsOnly => CostumeFilter::ModsOnly,

            FilterMode::ExplicitList => CostumeFilter::Only(
                self.costume_list
                    .iter()
                    .map(|entry| (entry.character, entry.costume_id))
                    .collect(),
            ),
        };

        RegistryFilter {
            filter,
            extra_costumes: self.extra_costumes,
        }
    }

    pub fn music_options(&self) -> MusicOptions {
        MusicOptions {
            battle_themes: self.integration_battle_themes,
            current_party_only: self.current_party_bgm_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let options = Options::parse_json(r#"{ "randomize_costumes": true }"#.as_bytes()).unwrap();

        assert!(options.randomize_costumes);
        assert!(options.extra_costumes);
        assert_eq!(options.log_level, LogLevel::Information);
        assert_eq!(options.costume_filter, FilterMode::None);
    }

    #[test]
    fn explicit_list_becomes_a_filter() {
        let options = Options::parse_json(
            r#"{
                "extra_costumes": false,
                "costume_filter": "ExplicitList",
                "costume_list": [{ "character": "Aigis", "costume_id": 51 }]
            }"#
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(
            options.registry_filter(),
            RegistryFilter {
                filter: CostumeFilter::Only(vec![(Character::Aigis, 51)]),
                extra_costumes: false,
            }
        );
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(Options::load(dir.path().join("missing.json")), Options::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();

        assert_eq!(Options::load(&broken), Options::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let options = Options {
            use_femc: true,
            costume_filter: FilterMode::ModsOnly,
            log_level: LogLevel::Debug,
            ..Options::default()
        };

        options.try_save(&path).unwrap();

        assert_eq!(Options::load(&path), options);
    }

    #[test]
    fn state_starts_from_settings() {
        let options = Options {
            randomize_costumes: true,
            ..Options::default()
        };

        let state = options.resolution_state();

        assert!(state.randomize());
        assert!(!state.use_alternate());
    }
}
