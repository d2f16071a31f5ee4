//! Player input binding
//!
//! Maps discrete key presses and a continuous pointer position onto paddle
//! two. Every write goes through the paddle-two container (`modify` for
//! relative moves, `update` for absolute ones), so input and ticks never
//! overwrite each other with stale reads.

use crate::sim::Scheduler;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Space,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.code` string
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "Space" => Some(Key::Space),
            _ => None,
        }
    }
}

/// Raw events delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Pointer position over paddle two, in canvas coordinates
    PointerMove { y: f32 },
}

/// Which keys do what
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBinding {
    /// Moves paddle two toward the top of the canvas
    pub up: Key,
    /// Moves paddle two toward the bottom of the canvas
    pub down: Key,
    /// Start trigger
    pub start: Key,
}

impl Default for InputBinding {
    fn default() -> Self {
        Self {
            up: Key::ArrowUp,
            down: Key::ArrowDown,
            start: Key::Space,
        }
    }
}

impl InputBinding {
    /// Apply one event; returns true if it changed anything
    pub fn handle(&self, scheduler: &mut Scheduler, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyDown(key) if key == self.start => scheduler.start(),
            InputEvent::KeyDown(key) if key == self.up => self.nudge(scheduler, -1.0),
            InputEvent::KeyDown(key) if key == self.down => self.nudge(scheduler, 1.0),
            InputEvent::KeyDown(_) => false,
            InputEvent::PointerMove { y } => self.follow_pointer(scheduler, y),
        }
    }

    /// One paddle step; `sign` is -1 for up, +1 for down
    fn nudge(&self, scheduler: &Scheduler, sign: f32) -> bool {
        let state = scheduler.state();
        if !state.is_running() {
            return false;
        }
        let step = state.paddle_speed.current_value() * sign;
        state.player_two.modify(|paddle| paddle.y += step);
        true
    }

    /// Centre paddle two on the pointer
    fn follow_pointer(&self, scheduler: &Scheduler, pointer_y: f32) -> bool {
        let state = scheduler.state();
        if !state.is_running() {
            return false;
        }
        state
            .player_two
            .modify(|paddle| paddle.y = pointer_y - paddle.height / 2.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, PaddlePatch};

    fn running() -> Scheduler {
        let mut scheduler = Scheduler::new(GameState::default());
        scheduler.start();
        scheduler
    }

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code("ArrowUp"), Some(Key::ArrowUp));
        assert_eq!(Key::from_code("Space"), Some(Key::Space));
        assert_eq!(Key::from_code("KeyW"), None);
    }

    #[test]
    fn test_arrows_move_player_two_by_one_step() {
        let mut scheduler = running();
        let binding = InputBinding::default();
        scheduler.state().player_two.update(PaddlePatch::y(100.0));

        assert!(binding.handle(&mut scheduler, InputEvent::KeyDown(Key::ArrowDown)));
        assert_eq!(scheduler.state().player_two.current_value().y, 102.0);

        binding.handle(&mut scheduler, InputEvent::KeyDown(Key::ArrowUp));
        binding.handle(&mut scheduler, InputEvent::KeyDown(Key::ArrowUp));
        assert_eq!(scheduler.state().player_two.current_value().y, 98.0);
    }

    #[test]
    fn test_input_ignored_while_stopped() {
        let mut scheduler = Scheduler::new(GameState::default());
        let binding = InputBinding::default();

        assert!(!binding.handle(&mut scheduler, InputEvent::KeyDown(Key::ArrowDown)));
        assert!(!binding.handle(&mut scheduler, InputEvent::PointerMove { y: 250.0 }));
        assert_eq!(scheduler.state().player_two.current_value().y, 0.0);
    }

    #[test]
    fn test_pointer_centres_paddle() {
        let mut scheduler = running();
        let binding = InputBinding::default();

        binding.handle(&mut scheduler, InputEvent::PointerMove { y: 250.0 });
        assert_eq!(scheduler.state().player_two.current_value().y, 200.0);

        scheduler.state().set_paddle_height(60.0);
        binding.handle(&mut scheduler, InputEvent::PointerMove { y: 250.0 });
        assert_eq!(scheduler.state().player_two.current_value().y, 220.0);
    }

    #[test]
    fn test_space_starts_once() {
        let mut scheduler = Scheduler::new(GameState::default());
        let binding = InputBinding::default();

        assert!(binding.handle(&mut scheduler, InputEvent::KeyDown(Key::Space)));
        assert!(scheduler.is_running());
        assert!(!binding.handle(&mut scheduler, InputEvent::KeyDown(Key::Space)));
    }

    #[test]
    fn test_paddle_two_is_not_clamped() {
        let mut scheduler = running();
        let binding = InputBinding::default();
        for _ in 0..10 {
            binding.handle(&mut scheduler, InputEvent::KeyDown(Key::ArrowUp));
        }
        assert_eq!(scheduler.state().player_two.current_value().y, -20.0);
    }
}
