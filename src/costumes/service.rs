use std::rc::Rc;

use eyre::Result;

use super::{
    catalog::Catalog,
    defaults::DefaultCostumes,
    hooks::{CostumeHooks, TableSetup},
    music::{MusicSelector, NoMusic},
    overrides::{OverrideRule, OverrideTable},
    registry::ActiveRegistry,
    resolve::{ResolutionState, Resolver},
    Costume,
};
use crate::{
    hook::Interceptor,
    host::{CostumeDescriptions, NameTable, ObjectLookup},
    settings::Options,
};

/// The game-side collaborators the costume system needs.
pub struct Host {
    pub interceptor: Box<dyn Interceptor>,
    pub objects: Box<dyn ObjectLookup>,
    pub names: Box<dyn NameTable>,
    pub descriptions: Box<dyn CostumeDescriptions>,
    pub music: Box<dyn MusicSelector>,
}

/// Owns the costume system for the lifetime of the game session.
pub struct CostumeService {
    hooks: CostumeHooks,
    registry: Rc<ActiveRegistry>,
    state: Rc<ResolutionState>,
}

impl CostumeService {
    /// Builds the registry and override table from `catalog`, then hooks the game.
    pub fn new(
        mut host: Host,
        options: &Options,
        catalog: Catalog,
        extra_overrides: Vec<OverrideRule>,
    ) -> Result<CostumeService> {
        log::info!("Costumes per character: {}", catalog.summary());

        let state = Rc::new(options.resolution_state());
        let registry = Rc::new(ActiveRegistry::build(&catalog, &options.registry_filter()));
        let overrides = Rc::new(OverrideTable::build(&catalog, &registry, extra_overrides));

        log::info!("Loaded {} costume overrides.", overrides.len());

        let music: Box<dyn MusicSelector> = if options.integration_bgme {
            host.music.configure(options.music_options());
            host.music
        } else {
            Box::new(NoMusic)
        };

        let resolver = Resolver::new(overrides, Rc::clone(&registry), Rc::clone(&state), music);

        let table_setup = TableSetup {
            registry: Rc::clone(&registry),
            defaults: Rc::new(DefaultCostumes::new()),
            state: Rc::clone(&state),
            descriptions: host.descriptions,
            names: host.names,
        };

        let hooks = CostumeHooks::install(
            host.interceptor.as_mut(),
            host.objects.as_mut(),
            resolver,
            table_setup,
        )?;

        log::info!("Costume hook installed at {:#x}.", hooks.set_costume_handle().address);

        Ok(CostumeService {
            hooks,
            registry,
            state,
        })
    }

    /// Turns global costume randomisation on or off.
    pub fn set_randomize_costumes(&self, randomize: bool) {
        log::info!("Randomize costumes: {randomize}");
        self.state.set_randomize(randomize);
    }

    /// Switches the protagonist's default assets to the alternate set.
    pub fn set_use_alternate_appearance(&self, use_alternate: bool) {
        log::info!("Use alternate appearance: {use_alternate}");
        self.state.set_use_alternate(use_alternate);
    }

    /// Every enabled costume, in catalog order.
    pub fn active_costumes(&self) -> &[Rc<Costume>] {
        self.registry.active_costumes()
    }

    pub fn hooks(&self) -> &CostumeHooks {
        &self.hooks
    }
}
