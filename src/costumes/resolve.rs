//! Decides which costume a character really wears each time the game sets one.

use std::{cell::Cell, rc::Rc};

use rand::{rngs::StdRng, SeedableRng};

use super::{music::MusicSelector, overrides::OverrideTable, policy, registry::ActiveRegistry};
use crate::character::Character;

/// Switches that change resolution at runtime. Shared between the resolver and whatever owns the
/// settings; both live on the game thread, so plain `Cell`s are enough.
#[derive(Debug, Default)]
pub struct ResolutionState {
    randomize: Cell<bool>,
    use_alternate: Cell<bool>,
}

impl ResolutionState {
    pub fn new(randomize: bool, use_alternate: bool) -> ResolutionState {
        ResolutionState {
            randomize: Cell::new(randomize),
            use_alternate: Cell::new(use_alternate),
        }
    }

    pub fn randomize(&self) -> bool {
        self.randomize.get()
    }

    pub fn set_randomize(&self, randomize: bool) {
        self.randomize.set(randomize);
    }

    /// Whether the protagonist uses the alternate (female) default assets.
    pub fn use_alternate(&self) -> bool {
        self.use_alternate.get()
    }

    pub fn set_use_alternate(&self, use_alternate: bool) {
        self.use_alternate.set(use_alternate);
    }
}

pub struct Resolver {
    overrides: Rc<OverrideTable>,
    registry: Rc<ActiveRegistry>,
    state: Rc<ResolutionState>,
    music: Box<dyn MusicSelector>,
    rng: StdRng,
}

impl Resolver {
    pub fn new(
        overrides: Rc<OverrideTable>,
        registry: Rc<ActiveRegistry>,
        state: Rc<ResolutionState>,
        music: Box<dyn MusicSelector>,
    ) -> Resolver {
        Resolver {
            overrides,
            registry,
            state,
            music,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the random number generator with a seeded one, so that picks are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Resolver {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Works out which costume `character` should wear when the game asks for `requested_id`.
    ///
    /// IDs for characters outside the party are returned unchanged. Nothing here can fail: any
    /// lookup that misses leaves the ID as it was.
    pub fn resolve(&mut self, character: i32, requested_id: i32) -> i32 {
        let mut costume_id = policy::normalize(requested_id);

        if costume_id != requested_id {
            log::debug!(
                "set_costume_id || {character} || Set fallback costume ID {requested_id} to {costume_id}."
            );
        }

        let character = match Character::from_raw(character) {
            Some(character) if character.is_playable() => character,
            _ => return requested_id,
        };

        if let Some(costume) = self.overrides.get(character, costume_id) {
            costume_id = costume.id();

            log::debug!(
                "set_costume_id || {character} || Costume ID: {costume_id} || Override: {}",
                costume.name()
            );
        }

        let wants_random =
            self.state.randomize() || costume_id == policy::RANDOMIZED_COSTUME_ID;

        if wants_random {
            if let Some(costume) = self.registry.random_costume(character, &mut self.rng) {
                costume_id = costume.id();

                log::debug!(
                    "set_costume_id || {character} || Costume ID: {costume_id} || Randomized: {}",
                    costume.name()
                );
            }
        }

        // Music has to be updated before the game gets the new ID.
        self.music.refresh(character, costume_id);

        log::debug!("set_costume_id || {character} || Costume ID: {costume_id}");

        costume_id
    }
}
