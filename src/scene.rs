/*
 * Scene Module
 *
 * The scene owns the point clouds currently on screen. A rebuild always
 * clears every batch before creating new ones, one per sprite, and stamps
 * them with a fresh generation so nothing from an older material can
 * survive a rebuild.
 */

use rand::Rng;

use crate::params::RenderParams;
use crate::particle::{Material, ParticleBatch};
use crate::sprite::SpriteId;

#[derive(Debug, Default)]
pub struct Scene {
    batches: Vec<ParticleBatch>,
    generation: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[ParticleBatch] {
        &self.batches
    }

    // Generation of the most recent rebuild (0 before the first)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn particle_count(&self) -> usize {
        self.batches.iter().map(ParticleBatch::len).sum()
    }

    // Remove every point cloud from the scene
    pub fn clear_point_clouds(&mut self) {
        self.batches.clear();
    }

    // Add one freshly spawned point cloud per sprite
    pub fn create_point_clouds<R: Rng + ?Sized>(
        &mut self,
        params: &RenderParams,
        sprites: &[SpriteId],
        rng: &mut R,
    ) {
        for &sprite in sprites {
            let material = Material::new(sprite, params);
            self.batches
                .push(ParticleBatch::spawn(material, self.generation, rng));
        }
    }

    // Tear down and recreate all point clouds for the given parameters
    pub fn rebuild<R: Rng + ?Sized>(
        &mut self,
        params: &RenderParams,
        sprites: &[SpriteId],
        rng: &mut R,
    ) {
        self.clear_point_clouds();
        self.generation += 1;
        self.create_point_clouds(params, sprites, rng);

        tracing::debug!(
            target: "snowfall",
            generation = self.generation,
            batches = self.batches.len(),
            particles = self.particle_count(),
            "rebuilt point clouds"
        );
    }

    // Advance every batch by one frame
    pub fn tick(&mut self) {
        for batch in &mut self.batches {
            batch.step();
        }
    }
}
