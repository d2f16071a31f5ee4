//! Frame-driven simulation loop
//!
//! The host calls [`Scheduler::frame`] from whatever per-frame primitive it
//! has, passing a monotonic clock. A frame fires due timers, then runs one
//! tick if the previous tick asked for another frame. The loop only stops
//! when the round controller clears the run flag.

use std::time::Duration;

use super::physics::{self, Snapshot};
use super::round::RoundController;
use super::state::{BallPatch, GameState, PaddlePatch, RoundStatus, Side};
use crate::audio::{AudioSink, SoundEffect};
use crate::consts::IDLE_PROMPT;

/// Collision and scoring events from one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub wall_bounce: bool,
    pub paddle_hit: bool,
    pub scored_by: Vec<Side>,
}

/// What one call to [`Scheduler::tick`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Physics ran this tick
    pub ran: bool,
    pub events: TickEvents,
    /// Set when this tick ended the round
    pub winner: Option<Side>,
}

/// Drives ticks for one game instance
#[derive(Debug, Clone)]
pub struct Scheduler {
    state: GameState,
    round: RoundController,
    frame_requested: bool,
    ticks: u64,
}

impl Scheduler {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            round: RoundController::default(),
            frame_requested: false,
            ticks: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// A tick is queued for the next frame
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Ticks that ran physics so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Earliest time a frame has timer work to do
    pub fn next_deadline(&self) -> Option<Duration> {
        self.round.reset_deadline()
    }

    /// Start trigger; a no-op while already running
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state.running.set(true);
        self.state.round.set(RoundStatus::Running);
        self.state.status_message.set(String::new());
        self.frame_requested = true;
        log::info!("Round started");
        true
    }

    /// Host frame callback
    ///
    /// Fires the pending reset if due, then runs the requested tick (if any)
    /// and requests the next one while the run flag stays set.
    pub fn frame(&mut self, now: Duration, audio: &mut dyn AudioSink) -> Option<TickReport> {
        self.round.poll(&self.state, now);

        if !self.frame_requested {
            return None;
        }
        self.frame_requested = false;

        let report = self.tick(now, audio);
        if self.state.is_running() {
            self.frame_requested = true;
        }
        Some(report)
    }

    /// One simulation step
    pub fn tick(&mut self, now: Duration, audio: &mut dyn AudioSink) -> TickReport {
        if !self.state.is_running() {
            self.state.status_message.set(IDLE_PROMPT.to_string());
            return TickReport::default();
        }

        // Threshold may have been lowered by configuration since last tick
        if let Some(side) = self.round.check(&self.state, now) {
            return TickReport {
                winner: Some(side),
                ..Default::default()
            };
        }

        let snapshot = Snapshot::capture(&self.state);
        let outcome = physics::step(&snapshot);
        self.ticks += 1;

        if outcome.wall_bounce {
            audio.play(SoundEffect::WallHit);
        }
        for &side in &outcome.scored_by {
            let total = self.state.award_point(side);
            log::debug!("{:?} scores ({})", side, total);
        }
        if outcome.scored() {
            audio.play(SoundEffect::Score);
        }
        if outcome.paddle_hit {
            audio.play(SoundEffect::PaddleHit);
        }

        if outcome.bounce_y(&snapshot) {
            self.state.y_dir.set(outcome.y_dir);
        }
        if outcome.bounce_x(&snapshot) {
            self.state.x_dir.set(outcome.x_dir);
        }
        if outcome.player_one_y != snapshot.player_one.y {
            self.state
                .player_one
                .update(PaddlePatch::y(outcome.player_one_y));
        }
        self.state
            .ball
            .update(BallPatch::center(outcome.next_ball.center()));

        let winner = self.round.check(&self.state, now);

        TickReport {
            ran: true,
            events: TickEvents {
                wall_bounce: outcome.wall_bounce,
                paddle_hit: outcome.paddle_hit,
                scored_by: outcome.scored_by,
            },
            winner,
        }
    }
}
