//! Every costume we know about, whether it is enabled or not.

use std::{collections::HashMap, rc::Rc};

use eyre::{eyre, Result};
use itertools::Itertools;

use super::{
    costume::{Costume, CostumeConfig, CostumeDefinition, CostumeSource},
    policy,
};
use crate::character::Character;

/// Costumes every party member has in the base game.
const SHARED_GAME_COSTUMES: &[(i32, &str, &str)] = &[
    (1, "School Uniform (Winter)", "Gekkoukan High's standard winter uniform."),
    (2, "School Uniform (Summer)", "Gekkoukan High's standard summer uniform."),
    (3, "Casual (Winter)", "Everyday clothes for the colder months."),
    (4, "Casual (Summer)", "Everyday clothes for the warmer months."),
    (5, "Swimsuit", "Worn at the beach in Yakushima."),
    (
        policy::FALLBACK_TARGET_ID,
        "S.E.E.S. Uniform",
        "Uniform with the S.E.E.S. armband, worn on operations.",
    ),
];

/// Costumes assembled from files the game uses elsewhere (cutscenes, events). They can look
/// wrong, which is why they are opt-in.
const EXTRA_GAME_COSTUMES: &[(i32, &str, &str)] = &[
    (101, "Pajamas", "Borrowed from the dorm's late-night scenes."),
    (102, "Gym Clothes", "Borrowed from the school's PE scenes."),
    (103, "Festival Yukata", "Borrowed from the summer festival."),
];

/// Costume sets that don't follow the shared pattern.
fn unique_game_costumes(character: Character) -> Option<&'static [(i32, &'static str, &'static str)]> {
    match character {
        Character::Aigis => Some(&[
            (1, "Standard Frame", "Aigis's default chassis."),
            (2, "Gekkoukan Uniform", "Aigis's school disguise."),
            (policy::FALLBACK_TARGET_ID, "Combat Frame", "Armed for operations."),
        ]),

        Character::Koromaru => Some(&[
            (1, "Collar", "Koromaru's everyday collar."),
            (policy::FALLBACK_TARGET_ID, "Combat Vest", "Koromaru's operation gear."),
        ]),

        _ => None,
    }
}

/// Immutable list of known costumes, built once at startup.
#[derive(Debug, Default)]
pub struct Catalog {
    costumes: Vec<Rc<Costume>>,

    /// Next ID to give a mod costume, per character.
    next_mod_id: HashMap<Character, i32>,

    /// `(character, requested ID, target costume ID)` triples declared by mod costumes.
    mod_overrides: Vec<(Character, i32, i32)>,
}

impl Catalog {
    /// Creates a catalog with no costumes in it.
    pub fn empty() -> Catalog {
        Catalog::default()
    }

    /// Creates a catalog containing the base game's costumes for every party member, plus the
    /// extra costumes.
    pub fn with_game_costumes() -> Catalog {
        let mut catalog = Catalog::empty();

        let party = (Character::FIRST_PLAYABLE.raw()..=Character::LAST_PLAYABLE.raw())
            .filter_map(Character::from_raw);

        for character in party {
            let normal = unique_game_costumes(character).unwrap_or(SHARED_GAME_COSTUMES);

            for &(id, name, description) in normal {
                catalog.add(Costume::new(
                    character,
                    id,
                    name,
                    description,
                    CostumeSource::Game,
                    CostumeConfig::new(),
                ));
            }

            if character == Character::Koromaru {
                continue;
            }

            for &(id, name, description) in EXTRA_GAME_COSTUMES {
                catalog.add(Costume::new(
                    character,
                    id,
                    name,
                    description,
                    CostumeSource::Extra,
                    CostumeConfig::new(),
                ));
            }
        }

        log::info!("Catalog has {} game costumes.", catalog.costumes.len());

        catalog
    }

    /// Adds a costume, replacing nothing. Duplicate `(character, ID)` pairs are ignored.
    pub fn add(&mut self, costume: Costume) -> Option<Rc<Costume>> {
        if let Some(existing) = self.find(costume.character(), costume.id()) {
            log::warn!(
                "Duplicate costume ID: {} || {} || Kept: {} || Ignored: {}",
                costume.character(),
                costume.id(),
                existing.name(),
                costume.name()
            );

            return None;
        }

        let costume = Rc::new(costume);
        self.costumes.push(Rc::clone(&costume));

        Some(costume)
    }

    /// Adds a mod costume, giving it the next free mod ID for its character.
    pub fn add_mod_costume(&mut self, definition: CostumeDefinition) -> Result<Rc<Costume>> {
        let character = definition.character;

        if !character.is_playable() {
            return Err(eyre!(
                "costume '{}' is for {character}, who can't wear costumes",
                definition.name
            ));
        }

        let next_id = self
            .next_mod_id
            .entry(character)
            .or_insert(policy::BASE_MOD_COSTUME_ID);

        let id = *next_id;
        *next_id += 1;

        let costume = Costume::new(
            character,
            id,
            definition.name,
            definition.description,
            CostumeSource::Mod,
            definition.assets,
        );

        let costume = self
            .add(costume)
            .ok_or_else(|| eyre!("mod costume ID {id} for {character} is already taken"))?;

        // Only costumes that made it in may claim overrides.
        for &requested in &definition.overrides {
            self.mod_overrides.push((character, requested, id));
        }

        log::debug!("Added mod costume: {} || {character} || Costume ID: {id}", costume.name());

        Ok(costume)
    }

    /// Parses a JSON costume definition and adds it as a mod costume.
    pub fn add_mod_costume_json(&mut self, json: &str) -> Result<Rc<Costume>> {
        self.add_mod_costume(CostumeDefinition::parse_json(json)?)
    }

    /// Looks up a costume by character and ID.
    pub fn find(&self, character: Character, id: i32) -> Option<&Rc<Costume>> {
        self.costumes
            .iter()
            .find(|costume| costume.character() == character && costume.id() == id)
    }

    /// All costumes, in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<Costume>> {
        self.costumes.iter()
    }

    /// All costumes for a single character.
    pub fn for_character(&self, character: Character) -> impl Iterator<Item = &Rc<Costume>> {
        self.costumes
            .iter()
            .filter(move |costume| costume.character() == character)
    }

    /// Overrides declared by mod costumes, as `(character, requested ID, target ID)`.
    pub fn mod_overrides(&self) -> &[(Character, i32, i32)] {
        &self.mod_overrides
    }

    pub fn len(&self) -> usize {
        self.costumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costumes.is_empty()
    }

    /// Number of costumes per character, for logging.
    pub fn summary(&self) -> String {
        self.costumes
            .iter()
            .map(|costume| costume.character())
            .counts()
            .into_iter()
            .sorted()
            .map(|(character, count)| format!("{character}: {count}"))
            .join(", ")
    }
}
