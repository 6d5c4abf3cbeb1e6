//! Knowledge of where the game keeps costume assets.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::character::Character;

/// Root of every character asset in the game's virtual file system.
const CHARACTER_ROOT: &str = "/Game/Xrd777/Characters/Player";

/// The kinds of file that make up a costume.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, EnumIter)]
pub enum AssetType {
    CostumeMesh,
    HairMesh,
    FaceMesh,
    BaseSkeleton,
    CostumeAnim,
    FaceAnim,
}

impl AssetType {
    /// Returns `true` if the character has this kind of asset at all. Koromaru has no separate
    /// hair or face.
    fn exists_for(self, character: Character) -> bool {
        !matches!(
            (self, character),
            (
                AssetType::HairMesh | AssetType::FaceMesh | AssetType::FaceAnim,
                Character::Koromaru
            )
        )
    }
}

/// Returns the file that the game would load for `asset_type` of the given costume, or `None` if
/// the character has no such asset.
pub fn native_asset_file(
    character: Character,
    costume_id: i32,
    asset_type: AssetType,
) -> Option<String> {
    if !asset_type.exists_for(character) {
        return None;
    }

    let index = character.asset_index();
    let dir = format!("{CHARACTER_ROOT}/PC{index}");

    Some(match asset_type {
        AssetType::CostumeMesh => format!("{dir}/Models/SK_PC{index}_C{costume_id:03}.uasset"),
        AssetType::HairMesh => format!("{dir}/Models/SK_PC{index}_H{costume_id:03}.uasset"),
        AssetType::FaceMesh => format!("{dir}/Models/SK_PC{index}_F{costume_id:03}.uasset"),

        // Every costume shares one skeleton.
        AssetType::BaseSkeleton => format!("{dir}/Models/SK_PC{index}_BaseSkeleton.uasset"),

        AssetType::CostumeAnim => format!("{dir}/Animation/ABP_PC{index}_C{costume_id:03}.uasset"),
        AssetType::FaceAnim => format!("{dir}/Animation/ABP_PC{index}_F{costume_id:03}.uasset"),
    })
}

/// An asset file along with the two names the engine knows it by.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AssetFile {
    /// The full file, including extension.
    file: String,

    /// The object name (file stem).
    name: String,

    /// The package path (file without its extension).
    path: String,
}

impl AssetFile {
    pub fn new(file: impl Into<String>) -> AssetFile {
        let file = file.into();

        let path = match file.rfind('.') {
            // Only strip dots that belong to the last component.
            Some(dot) if !file[dot..].contains('/') => file[..dot].to_string(),
            _ => file.clone(),
        };

        let name = path.rsplit('/').next().unwrap_or(&path).to_string();

        AssetFile { file, name, path }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Finds the four-digit character index embedded in the file name (the `0001` in
    /// `SK_PC0001_C051`).
    pub fn character_index(&self) -> Option<&str> {
        let start = self.name.find("PC")? + 2;
        let digits = self.name.get(start..start + 4)?;

        digits
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then_some(digits)
    }

    /// Returns the equivalent file belonging to `character`.
    ///
    /// The character index is swapped in the full file before the name and path are derived
    /// again, so both always come from the same replacement. Files without an index are
    /// returned unchanged.
    pub fn for_character(&self, character: Character) -> AssetFile {
        let Some(index) = self.character_index() else {
            log::debug!("No character index in asset: {}", self.file);
            return self.clone();
        };

        let from = format!("PC{index}");
        let to = format!("PC{}", character.asset_index());

        AssetFile::new(self.file.replace(&from, &to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn native_files_follow_game_layout() {
        assert_eq!(
            native_asset_file(Character::Player, 51, AssetType::CostumeMesh).as_deref(),
            Some("/Game/Xrd777/Characters/Player/PC0001/Models/SK_PC0001_C051.uasset")
        );

        assert_eq!(
            native_asset_file(Character::Mitsuru, 1002, AssetType::FaceAnim).as_deref(),
            Some("/Game/Xrd777/Characters/Player/PC0005/Animation/ABP_PC0005_F1002.uasset")
        );
    }

    #[test]
    fn skeleton_does_not_depend_on_costume() {
        assert_eq!(
            native_asset_file(Character::Yukari, 1, AssetType::BaseSkeleton),
            native_asset_file(Character::Yukari, 1000, AssetType::BaseSkeleton)
        );
    }

    #[test]
    fn koromaru_only_has_body_assets() {
        let present: Vec<_> = AssetType::iter()
            .filter(|ty| native_asset_file(Character::Koromaru, 1, *ty).is_some())
            .collect();

        assert_eq!(
            present,
            vec![
                AssetType::CostumeMesh,
                AssetType::BaseSkeleton,
                AssetType::CostumeAnim
            ]
        );
    }

    #[test]
    fn name_and_path_come_from_one_file() {
        let asset = AssetFile::new("/Game/Xrd777/Characters/Player/PC0001/Models/SK_PC0001_C051.uasset");

        assert_eq!(asset.name(), "SK_PC0001_C051");
        assert_eq!(
            asset.path(),
            "/Game/Xrd777/Characters/Player/PC0001/Models/SK_PC0001_C051"
        );
        assert_eq!(asset.character_index(), Some("0001"));
    }

    #[test]
    fn character_swap_keeps_name_and_path_paired() {
        let asset = AssetFile::new("/Game/Xrd777/Characters/Player/PC0001/Models/SK_PC0001_C001.uasset");
        let swapped = asset.for_character(Character::Femc);

        assert_eq!(swapped.name(), "SK_PC0012_C001");
        assert_eq!(
            swapped.path(),
            "/Game/Xrd777/Characters/Player/PC0012/Models/SK_PC0012_C001"
        );
        assert!(swapped.path().ends_with(swapped.name()));
    }

    #[test]
    fn files_without_index_are_untouched() {
        let asset = AssetFile::new("/Game/Mods/Outfit/SK_Custom.uasset");

        assert_eq!(asset.character_index(), None);
        assert_eq!(asset.for_character(Character::Ken), asset);
    }
}
