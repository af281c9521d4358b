/*
 * Particle Module
 *
 * This module defines a ParticleBatch: a fixed group of sprites that share
 * one texture and one material. Positions and velocities live in parallel
 * arrays and are always advanced together.
 *
 * Each tick a particle moves by its velocity, with y falling instead of
 * rising. Particles that drop below the floor jump back up to a fixed
 * height, and the x/z velocities flip sign once a particle is outside the
 * reflect bounds. Positions are never clamped, so a particle may sit past
 * a bound for a tick before it turns back.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::RenderParams;
use crate::sprite::SpriteId;
use crate::{PARTICLES_PER_BATCH, RECYCLE_HEIGHT, REFLECT_BOUND, SPAWN_RANGE};

// Material settings captured when a batch is built
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub sprite: SpriteId,
    pub size: f32,
    pub transparent: bool,
    pub opacity: f32,
    pub color: [u8; 3],
    pub size_attenuation: bool,
}

impl Material {
    pub fn new(sprite: SpriteId, params: &RenderParams) -> Self {
        Self {
            sprite,
            size: params.size,
            transparent: params.transparent,
            opacity: params.opacity,
            color: params.color,
            size_attenuation: params.size_attenuation,
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.transparent {
            self.opacity
        } else {
            1.0
        }
    }

    // Color premultiplied by alpha, ready for additive blending
    pub fn premultiplied_rgba(&self) -> [f32; 4] {
        let alpha = self.alpha();
        let [r, g, b] = self.color;
        [
            r as f32 / 255.0 * alpha,
            g as f32 / 255.0 * alpha,
            b as f32 / 255.0 * alpha,
            alpha,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ParticleBatch {
    pub material: Material,
    // Rebuild counter of the scene that created this batch
    pub generation: u64,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
}

impl ParticleBatch {
    // Build a batch with PARTICLES_PER_BATCH randomly placed particles
    pub fn spawn<R: Rng + ?Sized>(material: Material, generation: u64, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(PARTICLES_PER_BATCH);
        let mut velocities = Vec::with_capacity(PARTICLES_PER_BATCH);

        let half = SPAWN_RANGE / 2.0;
        for _ in 0..PARTICLES_PER_BATCH {
            positions.push(vec3(
                rng.gen_range(-half..half),
                rng.gen_range(0.0..SPAWN_RANGE * 1.5),
                rng.gen_range(-half..half),
            ));
            velocities.push(vec3(
                (rng.gen::<f32>() - 0.5) / 3.0,
                0.1 + rng.gen::<f32>() / 5.0,
                (rng.gen::<f32>() - 0.5) / 3.0,
            ));
        }

        Self::from_parts(material, generation, positions, velocities)
    }

    // Build a batch from explicit arrays, truncating to the shorter one
    pub fn from_parts(
        material: Material,
        generation: u64,
        mut positions: Vec<Vec3>,
        mut velocities: Vec<Vec3>,
    ) -> Self {
        let len = positions.len().min(velocities.len());
        positions.truncate(len);
        velocities.truncate(len);
        Self {
            material,
            generation,
            positions,
            velocities,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    // Advance every particle in the batch by one tick
    pub fn step(&mut self) {
        step_particles(&mut self.positions, &mut self.velocities);
    }
}

// Move each particle and apply the floor recycle and side reflections
pub fn step_particles(positions: &mut [Vec3], velocities: &mut [Vec3]) {
    for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
        position.x += velocity.x;
        position.y -= velocity.y;
        position.z += velocity.z;

        if position.y < 0.0 {
            position.y = RECYCLE_HEIGHT;
        }
        if position.x < -REFLECT_BOUND || position.x > REFLECT_BOUND {
            velocity.x = -velocity.x;
        }
        if position.z < -REFLECT_BOUND || position.z > REFLECT_BOUND {
            velocity.z = -velocity.z;
        }
    }
}
