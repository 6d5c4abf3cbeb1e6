//! Magic costume IDs that the game and mods rely on.

/// ID the game sets during some scripted sections (notably the night of the first battle).
/// It isn't a real costume, so it gets rewritten to `FALLBACK_TARGET_ID`.
pub const FALLBACK_COSTUME_ID: i32 = 911;

/// What `FALLBACK_COSTUME_ID` is rewritten to.
pub const FALLBACK_TARGET_ID: i32 = 51;

/// Asking for this ID picks a random enabled costume, even when randomisation is off.
pub const RANDOMIZED_COSTUME_ID: i32 = 999;

/// The first ID handed out to mod costumes. The game has no files for IDs at or above this.
pub const BASE_MOD_COSTUME_ID: i32 = 1000;

/// Rewrites legacy IDs to the ID the game actually expects. Other IDs pass through.
pub fn normalize(costume_id: i32) -> i32 {
    match costume_id {
        FALLBACK_COSTUME_ID => FALLBACK_TARGET_ID,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_idempotent() {
        assert_eq!(normalize(FALLBACK_COSTUME_ID), FALLBACK_TARGET_ID);
        assert_eq!(normalize(normalize(FALLBACK_COSTUME_ID)), FALLBACK_TARGET_ID);
        assert_eq!(normalize(7), 7);
    }

    #[test]
    fn special_ids_are_outside_mod_range() {
        assert!(FALLBACK_COSTUME_ID < BASE_MOD_COSTUME_ID);
        assert!(RANDOMIZED_COSTUME_ID < BASE_MOD_COSTUME_ID);
    }
}
