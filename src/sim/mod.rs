//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, no wall-clock scaling
//! - No randomness
//! - State reads and writes only through the `GameState` containers
//! - No rendering, audio or platform dependencies beyond the sink traits

pub mod physics;
pub mod round;
pub mod scheduler;
pub mod state;

pub use physics::{PhysicsOutcome, Snapshot, step};
pub use round::{RoundController, winner};
pub use scheduler::{Scheduler, TickEvents, TickReport};
pub use state::{
    BallPatch, BallState, CanvasBounds, GameState, PaddlePatch, PaddleState, RoundStatus, Side,
};
