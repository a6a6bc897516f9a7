use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use macroquad::texture::Texture2D;
use maze_wander_rendering::SpriteKind;

/// Cache of tile and avatar textures loaded from the asset directory.
#[derive(Debug, Default)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKind, Texture2D>,
}

impl SpriteAtlas {
    /// Default asset directory relative to the repository root.
    #[must_use]
    pub(crate) fn default_asset_dir() -> PathBuf {
        PathBuf::from("assets")
    }

    /// Atlas with no textures; every lookup misses.
    #[must_use]
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    /// Loads every known sprite from `dir`.
    ///
    /// Sprites that fail to load are logged and skipped so a missing or
    /// corrupt asset degrades that sprite instead of aborting the frame loop.
    #[must_use]
    pub(crate) fn load_from_dir(dir: &Path) -> Self {
        Self::load_with(dir, &mut load_texture_file)
    }

    fn load_with(
        dir: &Path,
        loader: &mut impl FnMut(&Path) -> Result<Texture2D>,
    ) -> Self {
        let mut textures = HashMap::with_capacity(SpriteKind::ALL.len());
        for kind in SpriteKind::ALL {
            let path = dir.join(kind.asset_file());
            match loader(&path) {
                Ok(texture) => {
                    let _ = textures.insert(kind, texture);
                }
                Err(error) => {
                    log::warn!(
                        "skipping sprite {kind:?}: {error:#}",
                    );
                }
            }
        }
        Self { textures }
    }

    /// Returns whether the atlas holds a texture for the provided kind.
    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn contains(&self, kind: SpriteKind) -> bool {
        self.textures.contains_key(&kind)
    }

    /// Retrieves the texture associated with the provided kind.
    #[must_use]
    pub(crate) fn texture(&self, kind: SpriteKind) -> Option<Texture2D> {
        self.textures.get(&kind).copied()
    }

    /// Number of textures held by the atlas.
    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.textures.len()
    }

    /// Returns whether the atlas holds no textures at all.
    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn load_texture_file(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    Ok(Texture2D::from_file_with_format(&bytes, None))
}
