//! Puts our costumes into the game's costume item table.
//!
//! This happens in two phases. `match_existing` finds the costumes the game already has entries
//! for and records their indices. Only once that is finished does `PendingAppend::append_new` add
//! entries for everything else, starting after the last existing entry.

use std::rc::Rc;

use super::{costume::Costume, redirect::RedirectMapper};
use crate::{
    character::Character,
    host::{CostumeDescriptions, CostumeItem, CostumeItemTable, NameTable, NAME_SCOPE},
};

/// Costumes still waiting for a table entry after matching.
#[derive(Debug)]
pub struct PendingAppend {
    unmatched: Vec<Rc<Costume>>,
    next_index: usize,
    matched: usize,
}

/// What a registration pass did.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct RegistrationReport {
    /// Costumes that already had an entry in the game's table.
    pub matched: usize,

    /// `(item index, character, costume ID)` for every entry we added, in order.
    pub appended: Vec<(usize, Character, i32)>,

    /// Number of name rewrites made for mod costumes.
    pub rewrites: usize,
}

/// Records the item index of every costume the game already has an entry for.
pub fn match_existing(table: &dyn CostumeItemTable, costumes: &[Rc<Costume>]) -> PendingAppend {
    let mut matched = 0;

    for index in 0..table.len() {
        let Some(item) = table.item(index) else {
            continue;
        };

        let Some(character) = Character::from_equip(item.equip_id) else {
            continue;
        };

        let existing = costumes.iter().find(|costume| {
            costume.id() == i32::from(item.costume_id) && costume.character() == character
        });

        if let Some(costume) = existing {
            if costume.item_index().is_none() && costume.set_item_index(index) {
                matched += 1;
            }
        }
    }

    let unmatched: Vec<_> = costumes
        .iter()
        .filter(|costume| costume.item_index().is_none())
        .cloned()
        .collect();

    log::debug!(
        "Matched {matched} existing costume items || {} left to add",
        unmatched.len()
    );

    PendingAppend {
        unmatched,
        next_index: table.len(),
        matched,
    }
}

impl PendingAppend {
    /// The index the next added costume will get.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Adds an entry for every unmatched costume and sets up their descriptions. Mod costumes
    /// also get their assets redirected.
    pub fn append_new(
        self,
        table: &mut dyn CostumeItemTable,
        descriptions: &mut dyn CostumeDescriptions,
        names: &mut dyn NameTable,
        mapper: &RedirectMapper<'_>,
        use_alternate: bool,
    ) -> RegistrationReport {
        let mut report = RegistrationReport {
            matched: self.matched,
            ..RegistrationReport::default()
        };

        let mut index = self.next_index;

        for costume in self.unmatched {
            let Ok(costume_id) = u16::try_from(costume.id()) else {
                log::warn!(
                    "Costume ID doesn't fit in the item table: {} || {}",
                    costume.name(),
                    costume.id()
                );

                continue;
            };

            table.write_item(
                index,
                CostumeItem {
                    costume_id,
                    equip_id: costume.character().equip_flag(),
                },
            );

            costume.set_item_index(index);
            descriptions.set_description(index, costume.description());

            if costume.is_mod_id() {
                for redirect in mapper.compute_redirects(&costume, use_alternate) {
                    for rewrite in redirect.rewrites() {
                        names.assign_name(NAME_SCOPE, &rewrite.original, &rewrite.replacement);
                        report.rewrites += 1;
                    }
                }
            }

            log::debug!(
                "Added costume item: {} || Costume Item ID: {index} || Costume ID: {}",
                costume.name(),
                costume.id()
            );

            report.appended.push((index, costume.character(), costume.id()));
            index += 1;
        }

        descriptions.commit();

        report
    }
}
