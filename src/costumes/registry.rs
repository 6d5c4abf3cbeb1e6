//! The costumes that are actually enabled this session.

use std::{collections::HashMap, rc::Rc};

use rand::{seq::SliceRandom, Rng};

use super::{
    catalog::Catalog,
    costume::{Costume, CostumeSource},
};
use crate::character::Character;

/// Decides which catalog costumes are enabled.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CostumeFilter {
    /// Everything is enabled.
    None,

    /// Only costumes that come with the game (including extras, if those are enabled).
    GameOnly,

    /// Only mod costumes.
    ModsOnly,

    /// Only the listed `(character, ID)` pairs.
    Only(Vec<(Character, i32)>),
}

impl CostumeFilter {
    fn allows(&self, costume: &Costume) -> bool {
        match self {
            CostumeFilter::None => true,
            CostumeFilter::GameOnly => costume.source() != CostumeSource::Mod,
            CostumeFilter::ModsOnly => costume.source() == CostumeSource::Mod,
            CostumeFilter::Only(list) => list.contains(&(costume.character(), costume.id())),
        }
    }
}

/// How to choose the enabled subset of the catalog.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RegistryFilter {
    pub filter: CostumeFilter,

    /// Whether costumes built from incidental game content are allowed at all.
    pub extra_costumes: bool,
}

impl Default for RegistryFilter {
    fn default() -> Self {
        RegistryFilter {
            filter: CostumeFilter::None,
            extra_costumes: true,
        }
    }
}

impl RegistryFilter {
    fn allows(&self, costume: &Costume) -> bool {
        if costume.source() == CostumeSource::Extra && !self.extra_costumes {
            return false;
        }

        self.filter.allows(costume)
    }
}

/// The enabled costumes. Frozen once built.
#[derive(Debug, Default)]
pub struct ActiveRegistry {
    /// Enabled costumes in catalog order.
    active: Vec<Rc<Costume>>,

    /// The same costumes grouped for random picks.
    by_character: HashMap<Character, Vec<Rc<Costume>>>,
}

impl ActiveRegistry {
    pub fn build(catalog: &Catalog, filter: &RegistryFilter) -> ActiveRegistry {
        let active: Vec<_> = catalog
            .iter()
            .filter(|costume| filter.allows(costume))
            .cloned()
            .collect();

        let mut by_character: HashMap<Character, Vec<Rc<Costume>>> = HashMap::new();

        for costume in &active {
            by_character
                .entry(costume.character())
                .or_default()
                .push(Rc::clone(costume));
        }

        log::info!(
            "Enabled {} of {} costumes || Filter: {:?}",
            active.len(),
            catalog.len(),
            filter
        );

        ActiveRegistry {
            active,
            by_character,
        }
    }

    /// Picks an enabled costume for `character` uniformly at random. Returns `None` if the
    /// character has no enabled costumes.
    pub fn random_costume(&self, character: Character, rng: &mut impl Rng) -> Option<&Rc<Costume>> {
        self.by_character.get(&character)?.choose(rng)
    }

    /// Every enabled costume, in catalog order.
    pub fn active_costumes(&self) -> &[Rc<Costume>] {
        &self.active
    }

    /// Looks up an enabled costume.
    pub fn find(&self, character: Character, id: i32) -> Option<&Rc<Costume>> {
        self.by_character
            .get(&character)?
            .iter()
            .find(|costume| costume.id() == id)
    }

    /// Number of enabled costumes for `character`.
    pub fn count_for(&self, character: Character) -> usize {
        self.by_character.get(&character).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn catalog_with_mod() -> Catalog {
        let mut catalog = Catalog::with_game_costumes();

        catalog
            .add_mod_costume_json(r#"{ "character": "Player", "name": "Tracksuit" }"#)
            .unwrap();

        catalog
    }

    #[test]
    fn no_filter_enables_everything() {
        let catalog = catalog_with_mod();
        let registry = ActiveRegistry::build(&catalog, &RegistryFilter::default());

        assert_eq!(registry.active_costumes().len(), catalog.len());
    }

    #[test]
    fn extra_costumes_can_be_disabled() {
        let catalog = catalog_with_mod();

        let registry = ActiveRegistry::build(
            &catalog,
            &RegistryFilter {
                filter: CostumeFilter::None,
                extra_costumes: false,
            },
        );

        assert!(registry
            .active_costumes()
            .iter()
            .all(|costume| costume.source() != CostumeSource::Extra));
    }

    #[test]
    fn mods_only_leaves_other_characters_empty() {
        let catalog = catalog_with_mod();

        let registry = ActiveRegistry::build(
            &catalog,
            &RegistryFilter {
                filter: CostumeFilter::ModsOnly,
                extra_costumes: true,
            },
        );

        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(registry.count_for(Character::Player), 1);
        assert_eq!(registry.count_for(Character::Yukari), 0);
        assert!(registry.random_costume(Character::Yukari, &mut rng).is_none());
        assert_eq!(
            registry.random_costume(Character::Player, &mut rng).map(|c| c.name()),
            Some("Tracksuit")
        );
    }

    #[test]
    fn explicit_list_keeps_catalog_order() {
        let catalog = Catalog::with_game_costumes();

        let registry = ActiveRegistry::build(
            &catalog,
            &RegistryFilter {
                filter: CostumeFilter::Only(vec![(Character::Ken, 4), (Character::Player, 2)]),
                extra_costumes: true,
            },
        );

        let ids: Vec<_> = registry
            .active_costumes()
            .iter()
            .map(|costume| (costume.character(), costume.id()))
            .collect();

        assert_eq!(ids, vec![(Character::Player, 2), (Character::Ken, 4)]);
        assert!(registry.find(Character::Ken, 4).is_some());
        assert!(registry.find(Character::Ken, 2).is_none());
    }

    #[test]
    fn random_picks_are_roughly_uniform() {
        let catalog = Catalog::with_game_costumes();
        let registry = ActiveRegistry::build(&catalog, &RegistryFilter::default());
        let mut rng = StdRng::seed_from_u64(42);

        let choices = registry.count_for(Character::Mitsuru);
        let draws = 9000;
        let mut counts: HashMap<i32, usize> = HashMap::new();

        for _ in 0..draws {
            let costume = registry.random_costume(Character::Mitsuru, &mut rng).unwrap();
            *counts.entry(costume.id()).or_default() += 1;
        }

        assert_eq!(counts.len(), choices);

        let expected = draws / choices;

        for count in counts.values() {
            assert!(count.abs_diff(expected) < expected / 4, "{counts:?}");
        }
    }
}
