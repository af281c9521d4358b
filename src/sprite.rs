/*
 * Sprite Module
 *
 * This module lists the sprite images used by the point clouds and decodes
 * them from disk. Decoding happens once at startup; every rebuild only
 * re-tints the decoded pixels, so the GPU textures always match the
 * current material.
 *
 * A sprite that fails to load is not fatal. It is logged and the batch
 * using it is not drawn.
 */

use nannou::image::{self, ImageError, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::particle::Material;

#[derive(Error, Debug)]
pub enum SpriteError {
    #[error("sprite not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to decode sprite {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

// One slot in the fixed sprite list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId {
    pub slot: usize,
    pub file: &'static str,
}

// The first sprite appears twice
pub const SPRITES: [SpriteId; 4] = [
    SpriteId { slot: 0, file: "o.png" },
    SpriteId { slot: 1, file: "y.png" },
    SpriteId { slot: 2, file: "gg.png" },
    SpriteId { slot: 3, file: "o.png" },
];

// Decoded sprite pixels indexed by slot
pub struct SpriteSheet {
    images: Vec<Option<RgbaImage>>,
}

impl SpriteSheet {
    // Decode every sprite under `dir`, keeping a blank slot for failures
    pub fn load(dir: &Path, sprites: &[SpriteId]) -> Self {
        let mut images = vec![None; sprites.iter().map(|s| s.slot + 1).max().unwrap_or(0)];

        for sprite in sprites {
            let path = dir.join(sprite.file);
            match load_sprite(&path) {
                Ok(image) => {
                    tracing::debug!(
                        target: "snowfall",
                        slot = sprite.slot,
                        width = image.width(),
                        height = image.height(),
                        "loaded sprite {}",
                        path.display()
                    );
                    images[sprite.slot] = Some(image);
                }
                Err(err) => {
                    tracing::warn!(target: "snowfall", slot = sprite.slot, "{err}; batch will not be drawn");
                }
            }
        }

        Self { images }
    }

    pub fn image(&self, sprite: SpriteId) -> Option<&RgbaImage> {
        self.images.get(sprite.slot).and_then(Option::as_ref)
    }

    pub fn loaded_count(&self) -> usize {
        self.images.iter().filter(|image| image.is_some()).count()
    }
}

pub fn load_sprite(path: &Path) -> Result<RgbaImage, SpriteError> {
    if !path.is_file() {
        return Err(SpriteError::Missing(path.to_path_buf()));
    }
    let image = image::open(path).map_err(|source| SpriteError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

// Multiply sprite pixels by the material color and alpha.
// Output is premultiplied since batches are drawn with additive blending.
pub fn tint(image: &RgbaImage, material: &Material) -> RgbaImage {
    let [r, g, b, a] = material.premultiplied_rgba();
    let mut tinted = image.clone();

    for pixel in tinted.pixels_mut() {
        let coverage = pixel[3] as f32 / 255.0;
        pixel[0] = scale(pixel[0], r * coverage);
        pixel[1] = scale(pixel[1], g * coverage);
        pixel[2] = scale(pixel[2], b * coverage);
        pixel[3] = scale(pixel[3], a);
    }

    tinted
}

fn scale(channel: u8, factor: f32) -> u8 {
    (channel as f32 * factor).round().clamp(0.0, 255.0) as u8
}
