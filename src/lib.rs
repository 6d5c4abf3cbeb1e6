//! Overrides the costumes party members wear and points mod costumes at their own files.
//!
//! Everything that touches game memory is behind the traits in `hook` and `host`; the loader
//! that injects us provides the implementations and calls `load` once the game is up.

use std::path::Path;

use eyre::Result;

pub mod character;
pub mod costumes;
pub mod hook;
pub mod host;
pub mod logging;
pub mod settings;

use costumes::{catalog::Catalog, overrides::OverrideRule, CostumeService, Host};
use settings::{LogLevel, Options};

/// Sets up logging, reads the settings in `mod_dir` and starts the costume system.
pub fn load(host: Host, mod_dir: impl AsRef<Path>, catalog: Catalog) -> Result<CostumeService> {
    let mod_dir = mod_dir.as_ref();

    // Start logging first so we can log while loading settings. The level is narrowed once we
    // know what the user asked for.
    if let Err(err) = logging::init(mod_dir.join("costumes.log"), LogLevel::Verbose.filter()) {
        // Another mod in the same process may own the logger. We can live without ours.
        eprintln!("costume logging unavailable: {err:?}");
    }

    log::info!("Cargo package version is {}", env!("CARGO_PKG_VERSION"));

    let options = Options::load(mod_dir.join("settings.costumes.json"));
    log::set_max_level(options.log_level.filter());

    log::info!("Options: {:#?}", options);

    CostumeService::new(host, &options, catalog, Vec::<OverrideRule>::new())
}
