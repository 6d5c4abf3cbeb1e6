//! Connects the resolver and the registration pass to the game.

use std::rc::Rc;

use eyre::{Result, WrapErr};

use super::{
    defaults::DefaultCostumes,
    redirect::RedirectMapper,
    registration,
    registry::ActiveRegistry,
    resolve::{ResolutionState, Resolver},
};
use crate::{
    hook::{self, AppCharacterComp, HookHandle, Interceptor},
    host::{CostumeDescriptions, CostumeItemTable, NameTable, ObjectLookup, COSTUME_ITEM_ASSET},
};

/// Hooks that are installed for the rest of the session.
#[derive(Debug)]
pub struct CostumeHooks {
    set_costume: HookHandle,
}

impl CostumeHooks {
    /// Installs the set-costume hook and schedules the registration pass for when the costume
    /// item table is loaded.
    pub fn install(
        interceptor: &mut dyn Interceptor,
        objects: &mut dyn ObjectLookup,
        mut resolver: Resolver,
        table_setup: TableSetup,
    ) -> Result<CostumeHooks> {
        let replacement = Box::new(move |comp: &mut AppCharacterComp| {
            set_costume_id(&mut resolver, comp);
        });

        let set_costume = hook::hook_target(interceptor, &hook::SET_COSTUME_ID, replacement)
            .wrap_err("failed to hook costume selection")?;

        objects.on_object_available(
            COSTUME_ITEM_ASSET,
            Box::new(move |table: &mut dyn CostumeItemTable| table_setup.run(table)),
        );

        Ok(CostumeHooks { set_costume })
    }

    pub fn set_costume_handle(&self) -> &HookHandle {
        &self.set_costume
    }
}

/// Runs in place of the game's costume ID assignment.
fn set_costume_id(resolver: &mut Resolver, comp: &mut AppCharacterComp) {
    // Characters outside the party come back unchanged.
    comp.set_costume_id = resolver.resolve(comp.character, comp.set_costume_id);
}

/// Everything the registration pass needs, held until the table appears.
pub struct TableSetup {
    pub registry: Rc<ActiveRegistry>,
    pub defaults: Rc<DefaultCostumes>,
    pub state: Rc<ResolutionState>,
    pub descriptions: Box<dyn CostumeDescriptions>,
    pub names: Box<dyn NameTable>,
}

impl TableSetup {
    fn run(mut self, table: &mut dyn CostumeItemTable) {
        log::debug!("Setting costume item data.");

        let mapper = RedirectMapper::new(&self.defaults);
        let pending = registration::match_existing(table, self.registry.active_costumes());

        let report = pending.append_new(
            table,
            self.descriptions.as_mut(),
            self.names.as_mut(),
            &mapper,
            self.state.use_alternate(),
        );

        log::info!(
            "Costume items ready || Existing: {} || Added: {} || Name rewrites: {}",
            report.matched,
            report.appended.len(),
            report.rewrites
        );
    }
}
