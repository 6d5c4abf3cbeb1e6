//! Redirects requests for one costume ID to another costume.

use std::{collections::HashMap, rc::Rc};

use super::{catalog::Catalog, costume::Costume, registry::ActiveRegistry};
use crate::character::Character;

/// A single override before it has been checked against the catalog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OverrideRule {
    pub character: Character,
    pub requested_id: i32,
    pub target_id: i32,
}

/// Read-only lookup from `(character, requested ID)` to the costume that should be used instead.
#[derive(Debug, Default)]
pub struct OverrideTable {
    overrides: HashMap<(Character, i32), Rc<Costume>>,
}

impl OverrideTable {
    /// Builds the table from the overrides declared by mod costumes plus any extra rules. Rules
    /// pointing at costumes that aren't enabled in `registry` are dropped. When two rules share a
    /// key, the later one wins.
    pub fn build(
        catalog: &Catalog,
        registry: &ActiveRegistry,
        extra_rules: impl IntoIterator<Item = OverrideRule>,
    ) -> OverrideTable {
        let declared = catalog
            .mod_overrides()
            .iter()
            .map(|&(character, requested_id, target_id)| OverrideRule {
                character,
                requested_id,
                target_id,
            });

        let mut overrides = HashMap::new();

        for rule in declared.chain(extra_rules) {
            let Some(target) = registry.find(rule.character, rule.target_id) else {
                let reason = if catalog.find(rule.character, rule.target_id).is_some() {
                    "Override target not enabled"
                } else {
                    "Override target not found"
                };

                log::warn!(
                    "{reason}: {} || {} -> {}",
                    rule.character,
                    rule.requested_id,
                    rule.target_id
                );

                continue;
            };

            if let Some(previous) =
                overrides.insert((rule.character, rule.requested_id), Rc::clone(target))
            {
                log::info!(
                    "Override replaced: {} || Costume ID: {} || {} -> {}",
                    rule.character,
                    rule.requested_id,
                    previous.name(),
                    target.name()
                );
            }
        }

        OverrideTable { overrides }
    }

    /// Returns the costume that replaces `costume_id` for `character`, if there is one.
    pub fn get(&self, character: Character, costume_id: i32) -> Option<&Rc<Costume>> {
        self.overrides.get(&(character, costume_id))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
