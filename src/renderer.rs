/*
 * Renderer Module
 *
 * This module draws the point clouds, the stats overlay and the panel.
 * Sprites are drawn with additive blending and no depth sorting, so draw
 * order inside a frame does not matter. A batch whose sprite failed to
 * load contributes nothing, the same as adding a black texture.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::particle::ParticleBatch;
use crate::ui;

// Sprite textures are premultiplied, so plain addition: src + dst.
// nannou's BLEND_ADD multiplies each side by itself instead.
pub const PREMULTIPLIED_ADD: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::One,
    dst_factor: wgpu::BlendFactor::One,
    operation: wgpu::BlendOperation::Add,
};

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    // Begin drawing
    let draw = app.draw();

    // Clear the background
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let additive = draw.color_blend(PREMULTIPLIED_ADD);

    for (batch, texture) in textured_batches(model.scene.batches(), &model.textures) {
        draw_batch(&additive, &model.camera, window_rect, batch, texture);
    }

    ui::draw_stats(&draw, &model.debug_info, window_rect);

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::warn!(target: "snowfall", "failed to draw frame: {err:?}");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::warn!(target: "snowfall", "failed to draw panel: {err:?}");
    }
}

// Pair each batch with its texture, dropping batches that have none
pub fn textured_batches<'a, T>(
    batches: &'a [ParticleBatch],
    textures: &'a [Option<T>],
) -> impl Iterator<Item = (&'a ParticleBatch, &'a T)> + 'a {
    batches
        .iter()
        .zip(textures.iter())
        .filter_map(|(batch, texture)| texture.as_ref().map(|texture| (batch, texture)))
}

// Draw one batch as camera-facing squares
fn draw_batch(
    draw: &Draw,
    camera: &Camera,
    window_rect: Rect,
    batch: &ParticleBatch,
    texture: &wgpu::Texture,
) {
    let material = &batch.material;

    for &position in batch.positions() {
        let projected = match camera.world_to_screen(position, window_rect) {
            Some(projected) => projected,
            None => continue,
        };
        let size = camera.point_size(
            material.size,
            projected.depth,
            window_rect.h(),
            material.size_attenuation,
        );

        draw.texture(texture)
            .xy(projected.screen)
            .w_h(size, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RenderParams;
    use crate::scene::Scene;
    use crate::sprite::SPRITES;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn blend_adds_source_and_destination_unscaled() {
        assert_eq!(PREMULTIPLIED_ADD.src_factor, wgpu::BlendFactor::One);
        assert_eq!(PREMULTIPLIED_ADD.dst_factor, wgpu::BlendFactor::One);
        assert_eq!(PREMULTIPLIED_ADD.operation, wgpu::BlendOperation::Add);
    }

    #[test]
    fn batches_without_texture_are_skipped() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut scene = Scene::new();
        scene.rebuild(&RenderParams::default(), &SPRITES, &mut rng);

        // Only the two slots naming o.png loaded
        let textures = vec![Some(0u32), None, None, Some(3u32)];
        let drawn: Vec<_> = textured_batches(scene.batches(), &textures)
            .map(|(batch, &texture)| (batch.material.sprite.slot, texture))
            .collect();

        assert_eq!(drawn, vec![(0, 0), (3, 3)]);
    }

    #[test]
    fn nothing_drawn_when_no_sprite_loaded() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut scene = Scene::new();
        scene.rebuild(&RenderParams::default(), &SPRITES, &mut rng);

        let textures: Vec<Option<u32>> = vec![None; SPRITES.len()];
        assert_eq!(textured_batches(scene.batches(), &textures).count(), 0);
    }
}
