use bevy::math::Vec2;
use bevy::window::Window;

/// Supplies the pointer position for a tick, in viewport coordinates
/// (top-left origin, y down). `None` when there is no pointer.
pub trait InputSource {
    fn current_pointer(&self) -> Option<Vec2>;
}

/// Supplies the viewport size used to lay out the grid.
pub trait Sizing {
    fn current_width(&self) -> f32;
    fn current_height(&self) -> f32;
}

impl InputSource for Option<Vec2> {
    fn current_pointer(&self) -> Option<Vec2> {
        *self
    }
}

impl InputSource for Window {
    // None once the cursor leaves the window.
    fn current_pointer(&self) -> Option<Vec2> {
        self.cursor_position()
    }
}

impl Sizing for Window {
    fn current_width(&self) -> f32 {
        self.width()
    }

    fn current_height(&self) -> f32 {
        self.height()
    }
}

impl Sizing for Vec2 {
    fn current_width(&self) -> f32 {
        self.x
    }

    fn current_height(&self) -> f32 {
        self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ParticleField, PALETTE, SPACING};

    #[test]
    fn test_optional_pointer() {
        assert_eq!(None::<Vec2>.current_pointer(), None);
        assert_eq!(Some(Vec2::new(3.0, 4.0)).current_pointer(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_field_from_sizing() {
        let field = ParticleField::from_sizing(&Vec2::new(120.0, 90.0), SPACING, &PALETTE);
        assert_eq!(field.viewport(), Vec2::new(120.0, 90.0));
        assert_eq!(field.num_particles(), 3 * 3);
    }
}
