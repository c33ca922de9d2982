//! Typed asset registry.
//!
//! Game code never touches textures directly: it refers to images through
//! [`ImageId`] handles and to animations through [`AnimKey`]s. The registry
//! is built once at start-up, either from the image directory
//! ([`load_assets`]) or with placeholder handles ([`Assets::placeholder`])
//! for headless runs.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use macroquad::prelude::*;

use crate::animation::AnimationTemplate;
use crate::effects::ParticleKind;
use crate::entity::{Action, EntityKind};
use crate::tile::TileKind;

/// Handle to a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

/// Lookup key for an animation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimKey {
    /// An entity's animation for one action.
    Entity(EntityKind, Action),
    /// A particle's only animation.
    Particle(ParticleKind),
}

impl fmt::Display for AnimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimKey::Entity(kind, action) => write!(f, "{}/{}", kind.name(), action.name()),
            AnimKey::Particle(kind) => write!(f, "particle/{}", kind.name()),
        }
    }
}

/// Single-image assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    /// Full-screen backdrop, drawn first every frame.
    Background,
    /// Staff held by the player when not attacking.
    PlayerWeapon,
    /// Goblin bow.
    Bow,
    /// Goblin arrow in flight.
    Arrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorKey {
    Black,
    White,
}

struct AnimEntry {
    key: AnimKey,
    dir: &'static str,
    frame_duration: u32,
    looping: bool,
    color_key: ColorKey,
}

const ANIMATIONS: &[AnimEntry] = &[
    AnimEntry {
        key: AnimKey::Entity(EntityKind::Enemy, Action::Idle),
        dir: "entities/goblin/idle",
        frame_duration: 6,
        looping: true,
        color_key: ColorKey::White,
    },
    AnimEntry {
        key: AnimKey::Entity(EntityKind::Enemy, Action::Run),
        dir: "entities/goblin/walk",
        frame_duration: 6,
        looping: true,
        color_key: ColorKey::White,
    },
    AnimEntry {
        key: AnimKey::Entity(EntityKind::Player, Action::Idle),
        dir: "entities/player3/idle",
        frame_duration: 6,
        looping: true,
        color_key: ColorKey::Black,
    },
    AnimEntry {
        key: AnimKey::Entity(EntityKind::Player, Action::Run),
        dir: "entities/player3/run",
        frame_duration: 6,
        looping: true,
        color_key: ColorKey::Black,
    },
    AnimEntry {
        key: AnimKey::Entity(EntityKind::Player, Action::Jump),
        dir: "entities/player3/jump",
        frame_duration: 6,
        looping: true,
        color_key: ColorKey::Black,
    },
    AnimEntry {
        key: AnimKey::Entity(EntityKind::Player, Action::Attack),
        dir: "entities/player3/attack/StaffMighty",
        frame_duration: 4,
        looping: false,
        color_key: ColorKey::Black,
    },
    AnimEntry {
        key: AnimKey::Particle(ParticleKind::Leaf),
        dir: "particles/leaf",
        frame_duration: 20,
        looping: false,
        color_key: ColorKey::Black,
    },
    AnimEntry {
        key: AnimKey::Particle(ParticleKind::Dust),
        dir: "particles/particle",
        frame_duration: 20,
        looping: false,
        color_key: ColorKey::Black,
    },
    AnimEntry {
        key: AnimKey::Particle(ParticleKind::Fireball),
        dir: "particles/fireball",
        frame_duration: 4,
        looping: true,
        color_key: ColorKey::White,
    },
];

const IMAGES: &[(ImageKey, &str, ColorKey)] = &[
    (ImageKey::Background, "background.png", ColorKey::Black),
    (
        ImageKey::PlayerWeapon,
        "entities/player3/weapon/staff_mighty.png",
        ColorKey::Black,
    ),
    (ImageKey::Bow, "Bow.png", ColorKey::White),
    (ImageKey::Arrow, "Arrow.png", ColorKey::White),
];

/// Tile kinds drawn in game. Spawner markers are consumed at level load.
const RENDERED_TILES: [TileKind; 4] = [
    TileKind::Decor,
    TileKind::Grass,
    TileKind::LargeDecor,
    TileKind::Stone,
];

/// Read-only registry of image handles and animation templates.
#[derive(Debug)]
pub struct Assets {
    animations: HashMap<AnimKey, AnimationTemplate>,
    images: HashMap<ImageKey, ImageId>,
    tiles: HashMap<TileKind, Vec<ImageId>>,
    clouds: Vec<ImageId>,
}

impl Assets {
    /// Registry whose handles point at nothing; frame counts are fixed so
    /// animation timing is still meaningful.
    pub fn placeholder() -> Self {
        let mut b = AssetsBuilder::default();
        for entry in ANIMATIONS {
            let frames = (0..4).map(|_| b.alloc()).collect();
            if let Ok(template) = AnimationTemplate::new(frames, entry.frame_duration, entry.looping) {
                b.animation(entry.key, template);
            }
        }
        for (key, _, _) in IMAGES {
            let id = b.alloc();
            b.image(*key, id);
        }
        for kind in RENDERED_TILES {
            let ids = (0..9).map(|_| b.alloc()).collect();
            b.tiles(kind, ids);
        }
        let clouds = (0..2).map(|_| b.alloc()).collect();
        b.clouds(clouds);
        Assets {
            animations: b.animations,
            images: b.images,
            tiles: b.tiles,
            clouds: b.clouds,
        }
    }

    /// Template for `key`. Every key is present once the registry is built.
    pub fn animation(&self, key: AnimKey) -> &AnimationTemplate {
        &self.animations[&key]
    }

    /// Handle for a single-image asset.
    pub fn image(&self, key: ImageKey) -> ImageId {
        self.images[&key]
    }

    /// Image for a tile variant; `None` for kinds or variants without art.
    pub fn tile_image(&self, kind: TileKind, variant: u32) -> Option<ImageId> {
        self.tiles.get(&kind)?.get(variant as usize).copied()
    }

    /// Cloud sprites to pick from.
    pub fn clouds(&self) -> &[ImageId] {
        &self.clouds
    }
}

/// Collects handles, then checks every required key is present.
#[derive(Default)]
pub struct AssetsBuilder {
    next: u32,
    animations: HashMap<AnimKey, AnimationTemplate>,
    images: HashMap<ImageKey, ImageId>,
    tiles: HashMap<TileKind, Vec<ImageId>>,
    clouds: Vec<ImageId>,
}

impl AssetsBuilder {
    fn alloc(&mut self) -> ImageId {
        let id = ImageId(self.next);
        self.next += 1;
        id
    }

    /// Register an animation.
    pub fn animation(&mut self, key: AnimKey, template: AnimationTemplate) -> &mut Self {
        self.animations.insert(key, template);
        self
    }

    /// Register a single image.
    pub fn image(&mut self, key: ImageKey, id: ImageId) -> &mut Self {
        self.images.insert(key, id);
        self
    }

    /// Register the variants of a tile kind, indexed by variant.
    pub fn tiles(&mut self, kind: TileKind, ids: Vec<ImageId>) -> &mut Self {
        self.tiles.insert(kind, ids);
        self
    }

    /// Register the cloud sprites.
    pub fn clouds(&mut self, ids: Vec<ImageId>) -> &mut Self {
        self.clouds = ids;
        self
    }

    /// Fails on the first missing animation or image, or when there are no clouds.
    pub fn finish(self) -> anyhow::Result<Assets> {
        for entry in ANIMATIONS {
            if !self.animations.contains_key(&entry.key) {
                anyhow::bail!("missing animation {}", entry.key);
            }
        }
        for (key, path, _) in IMAGES {
            if !self.images.contains_key(key) {
                anyhow::bail!("missing image {:?} ({})", key, path);
            }
        }
        if self.clouds.is_empty() {
            anyhow::bail!("no cloud images registered");
        }
        Ok(Assets {
            animations: self.animations,
            images: self.images,
            tiles: self.tiles,
            clouds: self.clouds,
        })
    }
}

/// Textures indexed by [`ImageId`].
#[derive(Default)]
pub struct TextureAtlas {
    textures: Vec<Texture2D>,
}

impl TextureAtlas {
    /// Texture behind a handle.
    pub fn get(&self, id: ImageId) -> Option<&Texture2D> {
        self.textures.get(id.0 as usize)
    }

    /// Number of loaded textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True when nothing has been loaded.
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    async fn load_file(&mut self, path: &Path, key: ColorKey) -> anyhow::Result<ImageId> {
        let path_str = path
            .to_str()
            .with_context(|| format!("Non UTF-8 image path {}", path.display()))?;
        let mut img = load_image(path_str)
            .await
            .with_context(|| format!("Loading image {}", path.display()))?;
        apply_color_key(&mut img, key);

        let tex = Texture2D::from_image(&img);
        tex.set_filter(FilterMode::Nearest);

        let id = ImageId(self.textures.len() as u32);
        self.textures.push(tex);
        Ok(id)
    }

    async fn load_dir(&mut self, dir: &Path, key: ColorKey) -> anyhow::Result<Vec<ImageId>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Listing image directory {}", dir.display()))?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("png"))
            .collect();
        files.sort();

        if files.is_empty() {
            anyhow::bail!("Image directory {} contains no png files", dir.display());
        }

        let mut ids = Vec::with_capacity(files.len());
        for f in &files {
            ids.push(self.load_file(f, key).await?);
        }
        Ok(ids)
    }
}

fn apply_color_key(img: &mut Image, key: ColorKey) {
    let rgb = match key {
        ColorKey::Black => [0u8, 0, 0],
        ColorKey::White => [255u8, 255, 255],
    };
    for px in img.bytes.chunks_exact_mut(4) {
        if px[..3] == rgb {
            px[3] = 0;
        }
    }
}

/// Load every image the game uses from `images_dir`.
pub async fn load_assets(images_dir: &Path) -> anyhow::Result<(Assets, TextureAtlas)> {
    let mut atlas = TextureAtlas::default();
    let mut b = AssetsBuilder::default();

    for kind in RENDERED_TILES {
        let dir = images_dir.join("tiles").join(kind.name());
        let ids = atlas.load_dir(&dir, ColorKey::Black).await?;
        b.tiles(kind, ids);
    }

    for entry in ANIMATIONS {
        let ids = atlas
            .load_dir(&images_dir.join(entry.dir), entry.color_key)
            .await
            .with_context(|| format!("Loading animation {}", entry.key))?;
        let template = AnimationTemplate::new(ids, entry.frame_duration, entry.looping)
            .with_context(|| format!("Building animation {}", entry.key))?;
        b.animation(entry.key, template);
    }

    for (key, file, color_key) in IMAGES {
        let id = atlas.load_file(&images_dir.join(file), *color_key).await?;
        b.image(*key, id);
    }

    let clouds = atlas
        .load_dir(&images_dir.join("clouds"), ColorKey::Black)
        .await?;
    b.clouds(clouds);

    tracing::info!(textures = atlas.len(), "loaded assets from {}", images_dir.display());
    let assets = b.finish()?;
    Ok((assets, atlas))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_registry_resolves_every_key() {
        let assets = Assets::placeholder();
        for entry in ANIMATIONS {
            assert_eq!(assets.animation(entry.key).frame_count(), 4);
        }
        assert!(assets.tile_image(TileKind::Grass, 8).is_some());
        assert!(assets.tile_image(TileKind::Grass, 9).is_none());
        assert!(assets.tile_image(TileKind::Spawners, 0).is_none());
        assert_eq!(assets.clouds().len(), 2);
    }

    #[test]
    fn keys_format_like_asset_paths() {
        assert_eq!(
            AnimKey::Entity(EntityKind::Player, Action::Attack).to_string(),
            "player/attack"
        );
        assert_eq!(AnimKey::Particle(ParticleKind::Dust).to_string(), "particle/particle");
    }

    #[test]
    fn builder_reports_missing_animation() {
        let mut b = AssetsBuilder::default();
        let cloud = b.alloc();
        b.clouds(vec![cloud]);
        let err = b.finish().err().expect("expected missing key");
        assert!(err.to_string().contains("missing animation"));
    }

    #[test]
    fn color_key_clears_alpha_of_matching_pixels() {
        let mut img = Image {
            bytes: vec![0, 0, 0, 255, 10, 0, 0, 255, 255, 255, 255, 255],
            width: 3,
            height: 1,
        };
        apply_color_key(&mut img, ColorKey::Black);
        assert_eq!(img.bytes[3], 0);
        assert_eq!(img.bytes[7], 255);
        assert_eq!(img.bytes[11], 255);
    }
}
