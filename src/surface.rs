use bevy::color::Color;
use bevy::math::Vec2;
use bevy::prelude::Component;

/// Something the field can paint dots onto.
pub trait Surface {
    /// Wipes the whole output area.
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotDraw {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// A retained surface: records the circles drawn since the last clear.
///
/// The render system maps `circles` onto dot entities each frame, and tests
/// inspect it directly.
#[derive(Component, Clone, Debug, Default)]
pub struct DrawList {
    pub circles: Vec<DotDraw>,
    pub clears: u64,
}

impl Surface for DrawList {
    fn clear(&mut self) {
        self.circles.clear();
        self.clears += 1;
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circles.push(DotDraw { center, radius, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_drops_previous_frame() {
        let mut list = DrawList::default();
        list.clear();
        list.draw_circle(Vec2::new(1.0, 2.0), 2.0, Color::BLACK);
        list.draw_circle(Vec2::new(3.0, 4.0), 2.0, Color::BLACK);
        assert_eq!(list.circles.len(), 2);

        list.clear();
        assert!(list.circles.is_empty());
        assert_eq!(list.clears, 2);
    }
}
