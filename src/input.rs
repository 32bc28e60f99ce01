//! Player commands and key bindings
//!
//! The simulation only sees `Command`s. Which keys produce them is a
//! preference stored in `Settings`.

use serde::{Deserialize, Serialize};

/// A discrete input delivered to the simulation between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Maps `KeyboardEvent.code` values to commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub jump: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["ArrowLeft".into(), "KeyA".into()],
            move_right: vec!["ArrowRight".into(), "KeyD".into()],
            jump: vec!["Space".into(), "ArrowUp".into(), "KeyW".into()],
        }
    }
}

impl KeyBindings {
    /// Command bound to a key code, if any. Earlier lists win on duplicates.
    pub fn command_for(&self, code: &str) -> Option<Command> {
        let bound = |keys: &[String]| keys.iter().any(|k| k == code);
        if bound(&self.move_left) {
            Some(Command::MoveLeft)
        } else if bound(&self.move_right) {
            Some(Command::MoveRight)
        } else if bound(&self.jump) {
            Some(Command::Jump)
        } else {
            None
        }
    }

    /// Replace every binding for `command` with a single key
    pub fn rebind(&mut self, command: Command, code: &str) {
        for keys in [&mut self.move_left, &mut self.move_right, &mut self.jump] {
            keys.retain(|k| k != code);
        }
        let keys = match command {
            Command::MoveLeft => &mut self.move_left,
            Command::MoveRight => &mut self.move_right,
            Command::Jump => &mut self.jump,
        };
        keys.clear();
        keys.push(code.to_string());
    }
}
