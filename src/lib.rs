//! Duel Pong - a reactive two-paddle ball game engine
//!
//! Core modules:
//! - `observable`: Synchronous state containers with replay-on-subscribe
//! - `sim`: Deterministic simulation (physics, round lifecycle, frame scheduler)
//! - `input`: Key/pointer events mapped onto paddle two
//! - `audio` / `render`: Sinks the engine publishes into
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod input;
pub mod observable;
pub mod render;
pub mod settings;
pub mod sim;

pub use audio::{AudioSink, SoundEffect};
pub use input::{InputBinding, InputEvent, Key};
pub use observable::{Container, Patch, Subscription};
pub use settings::{Settings, SettingsError};
pub use sim::{GameState, RoundStatus, Scheduler, Side, TickReport};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Per-tick paddle displacement (keyboard step and pursuit step)
    pub const PADDLE_SPEED: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Per-tick ball displacement on each axis
    pub const BALL_SPEED: f32 = 2.0;

    /// First to this many points wins the round
    pub const MAX_SCORE: u32 = 7;

    /// Pause between a win and the score reset
    pub const ROUND_RESET_DELAY: Duration = Duration::from_millis(3000);

    /// Status messages
    pub const IDLE_PROMPT: &str = "Press Space to Start";
    pub const PLAYER_ONE_WINS: &str = "Player One is Winner";
    pub const PLAYER_TWO_WINS: &str = "Player Two is Winner";
}
