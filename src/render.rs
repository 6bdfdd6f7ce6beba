use std::collections::HashMap;

use bevy::color::ColorToPacked;
use bevy::prelude::*;

use crate::surface::DrawList;

/// One pooled circle. The index is its slot in the `DrawList`.
#[derive(Component, Clone, Copy, Debug)]
pub struct Dot(pub usize);

/// Shared mesh plus one material per distinct dot color.
#[derive(Resource)]
pub struct DotAssets {
    pub mesh: Handle<Mesh>,
    pub materials: HashMap<[u8; 4], Handle<ColorMaterial>>,
    pub pool_size: usize,
}

impl DotAssets {
    pub fn new(meshes: &mut Assets<Mesh>) -> Self {
        DotAssets {
            // Unit radius; each dot is scaled to its own radius.
            mesh: meshes.add(Circle::new(1.0)),
            materials: HashMap::new(),
            pool_size: 0,
        }
    }

    fn material(&mut self, color: Color, materials: &mut Assets<ColorMaterial>) -> Handle<ColorMaterial> {
        self.materials
            .entry(color.to_srgba().to_u8_array())
            .or_insert_with(|| materials.add(color))
            .clone()
    }
}

/// Converts viewport coordinates (top-left origin, y down) to world coordinates
/// for a camera centered on the window.
pub fn viewport_to_world(point: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(point.x - window_size.x / 2.0, window_size.y / 2.0 - point.y)
}

/// Mirrors the latest `DrawList` onto the dot entities, spawning more when the
/// list outgrows the pool and hiding the ones it doesn't use.
pub fn render_dots(
    mut commands: Commands,
    draw_list: Single<&DrawList>,
    window: Single<&Window>,
    mut assets: ResMut<DotAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut dots: Query<(&Dot, &mut Transform, &mut Visibility, &mut MeshMaterial2d<ColorMaterial>)>,
) {
    let window_size = window.size();

    for (dot, mut transform, mut visibility, mut material) in &mut dots {
        match draw_list.circles.get(dot.0) {
            Some(circle) => {
                *transform = dot_transform(circle.center, circle.radius, window_size);
                *visibility = Visibility::Visible;
                let handle = assets.material(circle.color, &mut materials);
                if material.0 != handle {
                    material.0 = handle;
                }
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if draw_list.circles.len() > assets.pool_size {
        debug!("Growing dot pool from {} to {}", assets.pool_size, draw_list.circles.len());
        for (i, circle) in draw_list.circles.iter().enumerate().skip(assets.pool_size) {
            let material = assets.material(circle.color, &mut materials);
            commands.spawn((
                Dot(i),
                Mesh2d(assets.mesh.clone()),
                MeshMaterial2d(material),
                dot_transform(circle.center, circle.radius, window_size),
            ));
        }
        assets.pool_size = draw_list.circles.len();
    }
}

fn dot_transform(center: Vec2, radius: f32, window_size: Vec2) -> Transform {
    Transform::from_translation(viewport_to_world(center, window_size).extend(0.0))
        .with_scale(Vec3::new(radius, radius, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_to_world() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(viewport_to_world(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(viewport_to_world(Vec2::ZERO, size), Vec2::new(-400.0, 300.0));
        assert_eq!(viewport_to_world(Vec2::new(800.0, 600.0), size), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn test_dot_transform_scales_to_radius() {
        let t = dot_transform(Vec2::new(20.0, 20.0), 2.0, Vec2::new(40.0, 40.0));
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::new(2.0, 2.0, 1.0));
    }
}
