use bevy::prelude::*;

use crate::args::ARGS;
use crate::field::{ParticleField, ResizePolicy, PALETTE, SPACING};
use crate::keyboard::{handle_keypress, KeyboardCommands, Playback};
use crate::render::{render_dots, DotAssets};
use crate::surface::DrawList;

mod args;
mod field;
mod input;
mod keyboard;
mod particle;
mod render;
mod surface;

fn main() {
    // Parse the command line before bevy starts, so --help and bad args exit early.
    let (width, height) = ARGS.win;
    let resize_policy = if ARGS.keep_grid_on_resize {
        ResizePolicy::KeepGrid
    } else {
        ResizePolicy::Rebuild
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Dot Field".into(),
                resolution: (width, height).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::WHITE))
        .insert_resource(resize_policy)
        .add_systems(Startup, setup)
        .add_systems(Update, (handle_keypress, track_resize, tick_field, render_dots).chain())
        .run();
}

fn setup(mut commands: Commands, window: Single<&Window>, mut meshes: ResMut<Assets<Mesh>>) {
    commands.spawn(Camera2d);
    commands.insert_resource(DotAssets::new(&mut meshes));

    let field = match ARGS.seed {
        Some(seed) => ParticleField::with_seed(window.width(), window.height(), SPACING, &PALETTE, seed),
        None => ParticleField::from_sizing(*window, SPACING, &PALETTE),
    };
    info!(
        "Spawning {} dots, {} apart, over {}x{}",
        field.num_particles(),
        field.spacing(),
        window.width(),
        window.height()
    );

    commands.spawn((field, DrawList::default(), Playback::default(), KeyboardCommands::create()));
}

fn track_resize(field: Single<&mut ParticleField>, window: Single<&Window>, policy: Res<ResizePolicy>) {
    let mut field = field.into_inner();
    let old = field.viewport();
    if field.resize(window.width(), window.height(), *policy) {
        info!(
            "Window resized from {}x{}, rebuilt grid with {} dots",
            old.x,
            old.y,
            field.num_particles()
        );
    }
}

/// One simulation step per frame, reading the cursor once at the start.
fn tick_field(field_query: Single<(&mut ParticleField, &mut DrawList, &mut Playback)>, window: Single<&Window>) {
    let (mut field, mut draw_list, mut playback) = field_query.into_inner();
    if !playback.take_frame() {
        return;
    }
    field.tick_from(*window, &mut *draw_list);
}
