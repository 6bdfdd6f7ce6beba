use std::fmt::{Debug, Formatter};

use bevy::color::Color;
use bevy::log::{debug, warn};
use bevy::math::Vec2;
use bevy::prelude::{Component, Resource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::input::{InputSource, Sizing};
use crate::particle::Particle;
use crate::surface::Surface;

/// Distance between neighbouring dots.
pub const SPACING: f32 = 40.0;
pub const DOT_SIZE: f32 = 2.0;
pub const DOT_COLOR: Color = Color::srgb(0xbd as f32 / 255.0, 0xc1 as f32 / 255.0, 0xc6 as f32 / 255.0);
pub const MAX_DENSITY: f32 = 30.0;

/// Blue, red, yellow, green. Kept for per-dot coloring; dots are drawn in `DOT_COLOR`.
pub const PALETTE: [Color; 4] = [
    Color::srgb(0x42 as f32 / 255.0, 0x85 as f32 / 255.0, 0xf4 as f32 / 255.0),
    Color::srgb(0xea as f32 / 255.0, 0x43 as f32 / 255.0, 0x35 as f32 / 255.0),
    Color::srgb(0xfb as f32 / 255.0, 0xbc as f32 / 255.0, 0x05 as f32 / 255.0),
    Color::srgb(0x34 as f32 / 255.0, 0xa8 as f32 / 255.0, 0x53 as f32 / 255.0),
];

/// What to do with the grid when the viewport changes size.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResizePolicy {
    /// Lay the grid out again for the new viewport.
    #[default]
    Rebuild,
    /// Leave the dots where they are; only the drawable area changes.
    KeepGrid,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldStats {
    pub num_particles: usize,
    pub mean_displacement: f32,
    pub max_displacement: f32,
}

/// A grid of dots held to their origins by springs and pushed around by the pointer.
#[derive(Component)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    spacing: f32,
    palette: Vec<Color>,
    rng: StdRng,
}

impl Debug for ParticleField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ParticleField:")?;
        writeln!(f, "    viewport: {}x{}", self.width, self.height)?;
        writeln!(f, "    spacing: {}", self.spacing)?;
        writeln!(f, "    num_particles: {}", self.particles.len())
    }
}

impl ParticleField {
    pub fn new(width: f32, height: f32, spacing: f32, palette: &[Color]) -> ParticleField {
        Self::with_rng(width, height, spacing, palette, StdRng::from_os_rng())
    }

    /// Same as `new`, but with reproducible densities.
    pub fn with_seed(width: f32, height: f32, spacing: f32, palette: &[Color], seed: u64) -> ParticleField {
        Self::with_rng(width, height, spacing, palette, StdRng::seed_from_u64(seed))
    }

    pub fn from_sizing(sizing: &impl Sizing, spacing: f32, palette: &[Color]) -> ParticleField {
        Self::new(sizing.current_width(), sizing.current_height(), spacing, palette)
    }

    fn with_rng(width: f32, height: f32, spacing: f32, palette: &[Color], rng: StdRng) -> ParticleField {
        let mut field = ParticleField {
            particles: Vec::new(),
            width,
            height,
            spacing,
            palette: palette.to_vec(),
            rng,
        };
        field.place_particles();
        field
    }

    fn place_particles(&mut self) {
        self.particles.clear();
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            warn!("Dot spacing {} is not positive, the field stays empty", self.spacing);
            return;
        }
        let (cols, rows) = grid_dimensions(self.width, self.height, self.spacing);
        let half = self.spacing / 2.0;

        self.particles.reserve(cols * rows);
        for c in 0..cols {
            for r in 0..rows {
                let origin = Vec2::new(c as f32 * self.spacing + half, r as f32 * self.spacing + half);
                // Uniform in (0, MAX_DENSITY].
                let density = MAX_DENSITY - self.rng.random_range(0.0..MAX_DENSITY);
                self.particles.push(Particle::new(origin, DOT_SIZE, DOT_COLOR, density));
            }
        }
        debug!("Placed {} dots ({cols} cols x {rows} rows)", self.particles.len());
    }

    /// Throws away every dot and lays out a fresh grid for the given viewport.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.place_particles();
    }

    /// Applies `policy` to a viewport size change. Returns true if the grid was rebuilt.
    pub fn resize(&mut self, width: f32, height: f32, policy: ResizePolicy) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        match policy {
            ResizePolicy::Rebuild => {
                self.rebuild(width, height);
                true
            }
            ResizePolicy::KeepGrid => {
                self.width = width;
                self.height = height;
                false
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Advances every dot by one step, then repaints `surface`.
    pub fn tick(&mut self, pointer: Option<Vec2>, surface: &mut impl Surface) {
        self.step(pointer);
        self.draw(surface);
    }

    /// Like `tick`, reading the pointer from `input` once up front.
    pub fn tick_from(&mut self, input: &impl InputSource, surface: &mut impl Surface) {
        let pointer = input.current_pointer();
        self.tick(pointer, surface);
    }

    /// Physics only. Dots don't interact, so the order they're stepped in doesn't matter.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        self.particles.par_iter_mut().for_each(|p| p.step(pointer));
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear();
        for p in &self.particles {
            surface.draw_circle(p.position, p.size(), p.color());
        }
    }

    pub fn stats(&self) -> FieldStats {
        let (total, max) = self
            .particles
            .iter()
            .map(Particle::distance_from_origin)
            .fold((0.0f32, 0.0f32), |(total, max), d| (total + d, max.max(d)));
        let num_particles = self.particles.len();
        FieldStats {
            num_particles,
            mean_displacement: if num_particles == 0 { 0.0 } else { total / num_particles as f32 },
            max_displacement: max,
        }
    }
}

/// Columns and rows needed to cover a `width` x `height` area.
pub fn grid_dimensions(width: f32, height: f32, spacing: f32) -> (usize, usize) {
    // Negative and NaN sizes saturate to 0.
    ((width / spacing).ceil() as usize, (height / spacing).ceil() as usize)
}
