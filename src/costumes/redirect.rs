//! Works out which of the game's asset names need pointing at different files so that a mod
//! costume renders with the right assets.

use strum::IntoEnumIterator;

use super::{
    assets::{self, AssetFile, AssetType},
    costume::Costume,
    defaults::DefaultCostumes,
};

/// A single name reassignment in the game's name table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NameRewrite {
    pub original: String,
    pub replacement: String,
}

/// One asset of a costume that has to be loaded from a different file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AssetRedirect {
    pub asset_type: AssetType,
    pub original: AssetFile,
    pub substitute: AssetFile,
}

impl AssetRedirect {
    /// The two rewrites that make the redirect take effect: package path first, then object
    /// name. Both come from the same pair of files.
    pub fn rewrites(&self) -> [NameRewrite; 2] {
        [
            NameRewrite {
                original: self.original.path().to_string(),
                replacement: self.substitute.path().to_string(),
            },
            NameRewrite {
                original: self.original.name().to_string(),
                replacement: self.substitute.name().to_string(),
            },
        ]
    }
}

/// Computes asset redirects for costumes.
pub struct RedirectMapper<'a> {
    defaults: &'a DefaultCostumes,
}

impl<'a> RedirectMapper<'a> {
    pub fn new(defaults: &'a DefaultCostumes) -> RedirectMapper<'a> {
        RedirectMapper { defaults }
    }

    /// Returns the redirects needed for `costume`. `use_alternate` selects the alternate
    /// protagonist defaults and is read per call.
    pub fn compute_redirects(&self, costume: &Costume, use_alternate: bool) -> Vec<AssetRedirect> {
        AssetType::iter()
            .filter_map(|asset_type| self.redirect_for(costume, asset_type, use_alternate))
            .collect()
    }

    fn redirect_for(
        &self,
        costume: &Costume,
        asset_type: AssetType,
        use_alternate: bool,
    ) -> Option<AssetRedirect> {
        let Some(original) =
            assets::native_asset_file(costume.character(), costume.id(), asset_type)
        else {
            log::debug!(
                "Asset has no original: {:?} || Costume: {}",
                asset_type,
                costume.name()
            );

            return None;
        };

        let substitute = costume.config().asset_file(asset_type).or_else(|| {
            self.defaults
                .asset_file(costume.character(), asset_type, use_alternate)
        });

        let Some(substitute) = substitute else {
            log::debug!(
                "Asset has no default or new: {:?} || Costume: {}",
                asset_type,
                costume.name()
            );

            return None;
        };

        if original == substitute {
            return None;
        }

        Some(AssetRedirect {
            asset_type,
            original: AssetFile::new(original),
            substitute: AssetFile::new(substitute),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        character::Character,
        costumes::costume::{CostumeConfig, CostumeSource},
    };

    fn mod_costume(character: Character, config: CostumeConfig) -> Costume {
        Costume::new(character, 1000, "Modded", "", CostumeSource::Mod, config)
    }

    #[test]
    fn missing_assets_fall_back_to_defaults() {
        let defaults = DefaultCostumes::new();
        let mapper = RedirectMapper::new(&defaults);
        let costume = mod_costume(Character::Player, CostumeConfig::new());

        let redirects = mapper.compute_redirects(&costume, false);
        let mesh = redirects
            .iter()
            .find(|redirect| redirect.asset_type == AssetType::CostumeMesh)
            .unwrap();

        assert_eq!(mesh.original.name(), "SK_PC0001_C1000");
        assert_eq!(
            Some(mesh.substitute.file()),
            defaults.asset_file(Character::Player, AssetType::CostumeMesh, false)
        );
    }

    #[test]
    fn explicit_assets_win_over_defaults() {
        let defaults = DefaultCostumes::new();
        let mapper = RedirectMapper::new(&defaults);

        let config = CostumeConfig::new()
            .with_asset(AssetType::HairMesh, "/Game/Mods/Hat/SK_PC0001_H900.uasset");

        let redirects = mapper.compute_redirects(&mod_costume(Character::Player, config), true);
        let hair = redirects
            .iter()
            .find(|redirect| redirect.asset_type == AssetType::HairMesh)
            .unwrap();

        assert_eq!(hair.substitute.path(), "/Game/Mods/Hat/SK_PC0001_H900");
    }

    #[test]
    fn alternate_defaults_are_read_per_call() {
        let defaults = DefaultCostumes::new();
        let mapper = RedirectMapper::new(&defaults);
        let costume = mod_costume(Character::Player, CostumeConfig::new());

        let face = |use_alternate| {
            mapper
                .compute_redirects(&costume, use_alternate)
                .into_iter()
                .find(|redirect| redirect.asset_type == AssetType::FaceMesh)
                .unwrap()
                .substitute
        };

        assert_eq!(face(false).name(), "SK_PC0001_F001");
        assert_eq!(face(true).name(), "SK_PC0012_F001");
    }

    #[test]
    fn identity_and_missing_originals_are_skipped() {
        let defaults = DefaultCostumes::new();
        let mapper = RedirectMapper::new(&defaults);

        let redirects =
            mapper.compute_redirects(&mod_costume(Character::Koromaru, CostumeConfig::new()), false);

        for redirect in &redirects {
            assert_ne!(redirect.original, redirect.substitute);
        }

        let types: Vec<_> = redirects.iter().map(|redirect| redirect.asset_type).collect();

        // The skeleton is shared, so its default is the original. Koromaru has no hair or face.
        assert_eq!(types, vec![AssetType::CostumeMesh, AssetType::CostumeAnim]);
    }

    #[test]
    fn rewrites_pair_path_with_name() {
        let redirect = AssetRedirect {
            asset_type: AssetType::CostumeMesh,
            original: AssetFile::new("/Game/A/SK_PC0002_C1000.uasset"),
            substitute: AssetFile::new("/Game/B/SK_Custom.uasset"),
        };

        let [path, name] = redirect.rewrites();

        assert_eq!(path.original, "/Game/A/SK_PC0002_C1000");
        assert_eq!(path.replacement, "/Game/B/SK_Custom");
        assert_eq!(name.original, "SK_PC0002_C1000");
        assert_eq!(name.replacement, "SK_Custom");
    }
}
