use std::collections::HashMap;
use std::time::{Duration, Instant};

use bevy::app::AppExit;
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::field::ParticleField;
use crate::input::Sizing;

/// Gates how many more ticks the field may run.
#[derive(Component, Debug)]
pub struct Playback {
    pub frames_to_advance: u32,
}

impl Default for Playback {
    fn default() -> Self {
        Playback { frames_to_advance: u32::MAX }
    }
}

impl Playback {
    pub fn is_paused(&self) -> bool {
        self.frames_to_advance == 0
    }

    pub fn toggle_pause(&mut self) {
        self.frames_to_advance = if self.is_paused() { u32::MAX } else { 0 };
    }

    pub fn advance(&mut self, frames: u32) {
        self.frames_to_advance = frames;
    }

    /// Consumes one frame. Returns false if the field should stay frozen.
    pub fn take_frame(&mut self) -> bool {
        match self.frames_to_advance {
            0 => false,
            u32::MAX => true,
            _ => {
                self.frames_to_advance -= 1;
                true
            }
        }
    }
}

/// Defines a keyboard command to associate with a keypress.
/// Each command can have a different repeat rate.
pub struct KeyboardCommand {
    pub description: String,
    pub last_action_time: Instant,
    pub interval: Duration,
    pub action: KeyboardAction,
}

/// The function that invokes the keyboard action.
type KeyboardAction = fn(
    field: &mut ParticleField,
    playback: &mut Playback,
    // current window size
    window_size: Vec2,
);

/// Contains the collection of keyboard commands.
#[derive(Component)]
pub struct KeyboardCommands {
    pub commands: HashMap<KeyCode, KeyboardCommand>,
}

impl KeyboardCommands {
    pub fn create() -> Self {
        let mut kb_cmds = KeyboardCommands {
            commands: HashMap::new(),
        };

        // Space: freeze / unfreeze the dots.
        kb_cmds.add_command(KeyCode::Space, "Pause", 250, |_, playback, _| playback.toggle_pause());
        // 1: advance 1 frame.
        kb_cmds.add_command(KeyCode::Digit1, "Advance 1 frame", 500, |_, playback, _| playback.advance(1));
        // L: log field stats
        kb_cmds.add_command(KeyCode::KeyL, "Log field stats", 250, log_stats);
        // R: lay the grid out again for the current window
        kb_cmds.add_command(KeyCode::KeyR, "Reset dots", 250, |field, _, size| {
            field.rebuild(size.current_width(), size.current_height());
            info!("Reset to {} dots", field.num_particles());
        });

        kb_cmds
    }

    pub fn add_command(&mut self, key: KeyCode, description: &str, interval_millis: u64, action: KeyboardAction) {
        self.commands.insert(
            key,
            KeyboardCommand {
                description: description.into(),
                last_action_time: Instant::now(),
                interval: Duration::from_millis(interval_millis),
                action,
            },
        );
    }

    pub fn help(&self) -> String {
        let mut kb_help: String = "Keyboard commands:".into();
        let mut keys: Vec<_> = self.commands.iter().collect();
        keys.sort_by(|a, b| a.1.description.cmp(&b.1.description));
        for (key, cmd) in keys {
            kb_help.push('\n');
            kb_help.push_str(&format!("{key:?} - {}", cmd.description));
        }
        kb_help
    }
}

fn log_stats(field: &mut ParticleField, playback: &mut Playback, _window_size: Vec2) {
    let stats = field.stats();
    info!(
        "{} dots, mean displacement {:.2}, max displacement {:.2}{}",
        stats.num_particles,
        stats.mean_displacement,
        stats.max_displacement,
        if playback.is_paused() { " (paused)" } else { "" }
    );
    debug!("{field:?}");
}

pub fn handle_keypress(
    kb: Res<ButtonInput<KeyCode>>,
    mut app_exit: MessageWriter<AppExit>,
    field_query: Single<(&mut ParticleField, &mut Playback, &mut KeyboardCommands)>,
    window: Single<&Window>,
) {
    // Esc / Q: quit the app
    if kb.pressed(KeyCode::Escape) || kb.pressed(KeyCode::KeyQ) {
        app_exit.write(AppExit::Success);
    }

    let (mut field, mut playback, mut kb_cmds) = field_query.into_inner();

    // ?: display help
    if kb.just_pressed(KeyCode::Slash) && (kb.pressed(KeyCode::ShiftLeft) || kb.pressed(KeyCode::ShiftRight)) {
        info!("{}", kb_cmds.help());
    }

    let now = Instant::now();
    let window_size = Vec2::new(window.current_width(), window.current_height());

    for key in kb.get_pressed() {
        if let Some(command) = kb_cmds.commands.get_mut(key) {
            if now.duration_since(command.last_action_time) >= command.interval {
                command.last_action_time = now;
                (command.action)(&mut field, &mut playback, window_size);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{PALETTE, SPACING};

    #[test]
    fn test_playback_gating() {
        let mut playback = Playback::default();
        assert!(playback.take_frame());
        assert!(playback.take_frame());

        playback.toggle_pause();
        assert!(playback.is_paused());
        assert!(!playback.take_frame());

        playback.advance(1);
        assert!(playback.take_frame());
        assert!(!playback.take_frame());

        playback.toggle_pause();
        assert!(!playback.is_paused());
        assert!(playback.take_frame());
    }

    #[test]
    fn test_commands() {
        let kb_cmds = KeyboardCommands::create();
        let mut field = ParticleField::new(80.0, 80.0, SPACING, &PALETTE);
        let mut playback = Playback::default();

        (kb_cmds.commands[&KeyCode::Space].action)(&mut field, &mut playback, Vec2::new(80.0, 80.0));
        assert!(playback.is_paused());

        (kb_cmds.commands[&KeyCode::Digit1].action)(&mut field, &mut playback, Vec2::new(80.0, 80.0));
        assert_eq!(playback.frames_to_advance, 1);

        (kb_cmds.commands[&KeyCode::KeyR].action)(&mut field, &mut playback, Vec2::new(160.0, 80.0));
        assert_eq!(field.num_particles(), 8);

        assert!(kb_cmds.help().contains("Advance 1 frame"));
    }
}
