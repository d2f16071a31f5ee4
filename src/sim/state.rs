//! Game state and core simulation types
//!
//! Plain records for paddles, ball and canvas, plus `GameState`: the engine
//! context that owns one observable container per piece of game state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::observable::{Container, Patch};
use crate::settings::Settings;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by the pursuit rule
    One,
    /// Right paddle, driven by keyboard/pointer input
    Two,
}

impl Side {
    /// Status line shown when this side takes the round
    pub fn winner_message(self) -> &'static str {
        match self {
            Side::One => PLAYER_ONE_WINS,
            Side::Two => PLAYER_TWO_WINS,
        }
    }
}

/// Where the current round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Before the first start, and again once a finished round has reset
    #[default]
    Idle,
    /// Scheduler is ticking
    Running,
    /// A winner was declared; waiting for the timed reset
    Finished,
}

/// A paddle: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleState {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PaddleState {
    /// Left paddle, flush with the canvas's left edge
    pub fn player_one(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Right paddle, its inner edge flush with the canvas's right edge
    pub fn player_two(canvas: &CanvasBounds, width: f32, height: f32) -> Self {
        Self {
            x: canvas.width - width,
            y: 0.0,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// True if the span `[top, bottom]` lies strictly inside the paddle's
    /// vertical extent
    #[inline]
    pub fn spans_strictly(&self, top: f32, bottom: f32) -> bool {
        top > self.y && bottom < self.bottom()
    }
}

/// Partial paddle update; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddlePatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

impl PaddlePatch {
    pub fn y(y: f32) -> Self {
        Self {
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn width(width: f32) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }

    pub fn height(height: f32) -> Self {
        Self {
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn with_x(mut self, x: f32) -> Self {
        self.x = Some(x);
        self
    }
}

impl Patch<PaddlePatch> for PaddleState {
    fn patch(&mut self, partial: PaddlePatch) {
        if let Some(x) = partial.x {
            self.x = x;
        }
        if let Some(y) = partial.y {
            self.y = y;
        }
        if let Some(width) = partial.width {
            self.width = width;
        }
        if let Some(height) = partial.height {
            self.height = height;
        }
    }
}

/// The ball: centre and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl Default for BallState {
    fn default() -> Self {
        Self {
            cx: CANVAS_WIDTH / 2.0,
            cy: CANVAS_HEIGHT / 2.0,
            r: BALL_RADIUS,
        }
    }
}

impl BallState {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.cx, self.cy)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.cx - self.r
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.cx + self.r
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.cy - self.r
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.cy + self.r
    }
}

/// Partial ball update; `None` fields are left untouched
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallPatch {
    pub cx: Option<f32>,
    pub cy: Option<f32>,
    pub r: Option<f32>,
}

impl BallPatch {
    pub fn center(center: Vec2) -> Self {
        Self {
            cx: Some(center.x),
            cy: Some(center.y),
            r: None,
        }
    }
}

impl Patch<BallPatch> for BallState {
    fn patch(&mut self, partial: BallPatch) {
        if let Some(cx) = partial.cx {
            self.cx = cx;
        }
        if let Some(cy) = partial.cy {
            self.cy = cy;
        }
        if let Some(r) = partial.r {
            self.r = r;
        }
    }
}

/// Playing field size; fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

impl CanvasBounds {
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Engine context: every piece of game state, each in its own container
///
/// Writers per tick: the scheduler owns ball, directions, scores, status and
/// round; input owns paddle two; the pursuit rule owns paddle one.
/// Configuration values are injected through the `set_*` methods and read
/// once per tick.
#[derive(Debug, Clone)]
pub struct GameState {
    pub canvas: Container<CanvasBounds>,
    pub player_one: Container<PaddleState>,
    pub player_two: Container<PaddleState>,
    pub ball: Container<BallState>,
    /// Incoming horizontal velocity; displacement is its negation
    pub x_dir: Container<f32>,
    /// Incoming vertical velocity; displacement is its negation
    pub y_dir: Container<f32>,
    pub player_one_score: Container<u32>,
    pub player_two_score: Container<u32>,
    pub max_score: Container<u32>,
    pub paddle_speed: Container<f32>,
    pub status_message: Container<String>,
    /// Scheduler run flag
    pub running: Container<bool>,
    pub round: Container<RoundStatus>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(CanvasBounds::default(), &Settings::default())
    }
}

impl GameState {
    /// Build a fresh context for one game instance
    pub fn new(canvas: CanvasBounds, settings: &Settings) -> Self {
        let ball = BallState {
            cx: canvas.center().x,
            cy: canvas.center().y,
            r: BALL_RADIUS,
        };
        Self {
            player_one: Container::new(PaddleState::player_one(
                settings.paddle_width,
                settings.paddle_height,
            )),
            player_two: Container::new(PaddleState::player_two(
                &canvas,
                settings.paddle_width,
                settings.paddle_height,
            )),
            canvas: Container::new(canvas),
            ball: Container::new(ball),
            x_dir: Container::new(settings.ball_speed),
            y_dir: Container::new(settings.ball_speed),
            player_one_score: Container::new(0),
            player_two_score: Container::new(0),
            max_score: Container::new(settings.max_score),
            paddle_speed: Container::new(settings.paddle_speed),
            status_message: Container::new(IDLE_PROMPT.to_string()),
            running: Container::new(false),
            round: Container::new(RoundStatus::Idle),
        }
    }

    pub fn paddle(&self, side: Side) -> &Container<PaddleState> {
        match side {
            Side::One => &self.player_one,
            Side::Two => &self.player_two,
        }
    }

    pub fn score(&self, side: Side) -> &Container<u32> {
        match side {
            Side::One => &self.player_one_score,
            Side::Two => &self.player_two_score,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.current_value()
    }

    /// Both scores as `(player one, player two)`
    pub fn scores(&self) -> (u32, u32) {
        (
            self.player_one_score.current_value(),
            self.player_two_score.current_value(),
        )
    }

    /// Credit one point and return the new total
    pub fn award_point(&self, side: Side) -> u32 {
        self.score(side).modify(|score| *score += 1)
    }

    /// Zero both scores
    ///
    /// Both containers hold zero before either one notifies, so a subscriber
    /// reading the pair never sees one old score.
    pub fn reset_scores(&self) {
        self.player_one_score.stage(0);
        self.player_two_score.stage(0);
        self.player_one_score.publish();
        self.player_two_score.publish();
    }

    // === Configuration inputs ===

    pub fn set_paddle_speed(&self, speed: f32) {
        self.paddle_speed.set(speed);
    }

    /// Set the ball's per-tick magnitude on both axes, keeping each sign
    pub fn set_ball_speed(&self, speed: f32) {
        let magnitude = speed.abs();
        self.x_dir.modify(|dir| *dir = magnitude.copysign(*dir));
        self.y_dir.modify(|dir| *dir = magnitude.copysign(*dir));
    }

    pub fn set_max_score(&self, max_score: u32) {
        self.max_score.set(max_score);
    }

    /// Resize both paddles; paddle two moves so its inner edge stays flush
    /// with the canvas's far edge
    pub fn set_paddle_width(&self, width: f32) {
        let canvas_width = self.canvas.with(|canvas| canvas.width);
        self.player_one.update(PaddlePatch::width(width));
        self.player_two
            .update(PaddlePatch::width(width).with_x(canvas_width - width));
    }

    pub fn set_paddle_height(&self, height: f32) {
        self.player_one.update(PaddlePatch::height(height));
        self.player_two.update(PaddlePatch::height(height));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::consts::*;

    #[test]
    fn test_default_layout_matches_canvas() {
        let state = GameState::default();
        let p1 = state.player_one.current_value();
        let p2 = state.player_two.current_value();
        let ball = state.ball.current_value();

        assert_eq!(p1.x, 0.0);
        assert_eq!(p2.x, CANVAS_WIDTH - PADDLE_WIDTH);
        assert_eq!(p2.right(), CANVAS_WIDTH);
        assert_eq!((ball.cx, ball.cy, ball.r), (300.0, 300.0, 15.0));
        assert_eq!(state.status_message.current_value(), IDLE_PROMPT);
        assert_eq!(state.round.current_value(), RoundStatus::Idle);
        assert!(!state.is_running());
    }

    #[test]
    fn test_paddle_patch_merges_only_given_fields() {
        let mut paddle = PaddleState::player_one(25.0, 100.0);
        paddle.patch(PaddlePatch::y(40.0));
        assert_eq!(
            paddle,
            PaddleState {
                x: 0.0,
                y: 40.0,
                width: 25.0,
                height: 100.0,
            }
        );
    }

    #[test]
    fn test_award_and_reset_scores() {
        let state = GameState::default();
        assert_eq!(state.award_point(Side::Two), 1);
        assert_eq!(state.award_point(Side::Two), 2);
        assert_eq!(state.award_point(Side::One), 1);
        assert_eq!(state.scores(), (1, 2));

        state.reset_scores();
        assert_eq!(state.scores(), (0, 0));
    }

    #[test]
    fn test_reset_scores_publishes_both_zeroed() {
        let state = GameState::default();
        state.award_point(Side::One);
        state.award_point(Side::Two);
        state.award_point(Side::Two);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let reader = state.clone();
        let _sub = state
            .player_one_score
            .subscribe(move |_| sink.borrow_mut().push(reader.scores()));

        state.reset_scores();
        assert_eq!(*seen.borrow(), vec![(1, 2), (0, 0)]);
    }

    #[test]
    fn test_set_ball_speed_keeps_signs() {
        let state = GameState::default();
        state.x_dir.set(-2.0);
        state.y_dir.set(2.0);

        state.set_ball_speed(5.0);

        assert_eq!(state.x_dir.current_value(), -5.0);
        assert_eq!(state.y_dir.current_value(), 5.0);
    }

    #[test]
    fn test_set_paddle_width_keeps_player_two_flush() {
        let state = GameState::default();
        state.set_paddle_width(40.0);

        let p1 = state.player_one.current_value();
        let p2 = state.player_two.current_value();
        assert_eq!(p1.width, 40.0);
        assert_eq!(p1.x, 0.0);
        assert_eq!(p2.width, 40.0);
        assert_eq!(p2.x, 560.0);
        assert_eq!(p2.right(), CANVAS_WIDTH);
    }

    #[test]
    fn test_set_paddle_height_updates_both() {
        let state = GameState::default();
        state.set_paddle_height(60.0);
        assert_eq!(state.player_one.current_value().height, 60.0);
        assert_eq!(state.player_two.current_value().height, 60.0);
    }

    #[test]
    fn test_winner_messages() {
        assert_eq!(Side::One.winner_message(), PLAYER_ONE_WINS);
        assert_eq!(Side::Two.winner_message(), PLAYER_TWO_WINS);
    }
}
