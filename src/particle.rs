use bevy::color::Color;
use bevy::math::Vec2;

/// Spring stiffness pulling a dot back to its origin.
pub const STIFFNESS: f32 = 0.05;
/// Pointer distance below which a dot is pushed away.
pub const REPULSION_RADIUS: f32 = 150.0;
pub const REPULSION_STRENGTH: f32 = 15.0;
/// Velocity multiplier applied once per tick.
pub const DAMPING: f32 = 0.85;

/// A single dot of the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    origin: Vec2,
    size: f32,
    color: Color,
    // Per-dot variation, sampled at creation. Not used by the force model.
    density: f32,
}

impl Particle {
    pub fn new(origin: Vec2, size: f32, color: Color, density: f32) -> Particle {
        Particle {
            position: origin,
            velocity: Vec2::ZERO,
            origin,
            size,
            color,
            density,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn distance_from_origin(&self) -> f32 {
        (self.origin - self.position).length()
    }

    /// Advances the dot by one unit time step: spring, repulsion, damping, then
    /// explicit Euler integration.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        self.velocity += spring_force(self.position, self.origin);
        if let Some(pointer) = pointer {
            self.velocity += repulsion_force(self.position, pointer);
        }
        self.velocity *= DAMPING;
        self.position += self.velocity;
    }
}

/// Hookean pull from `position` toward `origin`.
pub fn spring_force(position: Vec2, origin: Vec2) -> Vec2 {
    let offset = origin - position;
    let force = offset.length() * STIFFNESS;
    // atan2(0, 0) == 0, so a dot at rest gets an exact zero force.
    let angle = offset.y.atan2(offset.x);
    Vec2::new(angle.cos(), angle.sin()) * force
}

/// Push away from `pointer`, falling off linearly to zero at `REPULSION_RADIUS`.
pub fn repulsion_force(position: Vec2, pointer: Vec2) -> Vec2 {
    let offset = position - pointer;
    let distance = offset.length();
    if distance >= REPULSION_RADIUS {
        return Vec2::ZERO;
    }
    let strength = (REPULSION_RADIUS - distance) / REPULSION_RADIUS * REPULSION_STRENGTH;
    // A pointer exactly on the dot pushes it along +x.
    let angle = offset.y.atan2(offset.x);
    Vec2::new(angle.cos(), angle.sin()) * strength
}
