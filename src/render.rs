//! Render sink
//!
//! The engine publishes state; a renderer applies it to whatever surface it
//! owns. `attach_renderer` wires one `RenderSink` to every renderable
//! container. Each callback receives the full current value (structured
//! records are applied field by field by the sink, scalars replace whole).

use std::cell::RefCell;
use std::rc::Rc;

use crate::observable::Subscription;
use crate::sim::{BallState, CanvasBounds, GameState, PaddleState, Side};

/// Consumer of published game state
pub trait RenderSink {
    fn canvas(&mut self, canvas: &CanvasBounds);
    fn paddle(&mut self, side: Side, paddle: &PaddleState);
    fn ball(&mut self, ball: &BallState);
    fn score(&mut self, side: Side, score: u32);
    fn status(&mut self, message: &str);
}

/// Subscribe `renderer` to every renderable container
///
/// Each subscription replays immediately, so the renderer is fully painted
/// by the time this returns. Dropping the returned guards detaches it.
pub fn attach_renderer<R>(state: &GameState, renderer: Rc<RefCell<R>>) -> Vec<Subscription>
where
    R: RenderSink + 'static,
{
    let mut subscriptions = Vec::with_capacity(7);

    let sink = Rc::clone(&renderer);
    subscriptions.push(state.canvas.subscribe(move |c| sink.borrow_mut().canvas(c)));

    for side in [Side::One, Side::Two] {
        let sink = Rc::clone(&renderer);
        subscriptions.push(
            state
                .paddle(side)
                .subscribe(move |p| sink.borrow_mut().paddle(side, p)),
        );
    }

    let sink = Rc::clone(&renderer);
    subscriptions.push(state.ball.subscribe(move |b| sink.borrow_mut().ball(b)));

    for side in [Side::One, Side::Two] {
        let sink = Rc::clone(&renderer);
        subscriptions.push(
            state
                .score(side)
                .subscribe(move |s| sink.borrow_mut().score(side, *s)),
        );
    }

    let sink = renderer;
    subscriptions.push(
        state
            .status_message
            .subscribe(move |m| sink.borrow_mut().status(m)),
    );

    subscriptions
}

/// Keeps the last value seen for each render point, plus an update count
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub canvas: Option<CanvasBounds>,
    pub player_one: Option<PaddleState>,
    pub player_two: Option<PaddleState>,
    pub ball: Option<BallState>,
    pub scores: (u32, u32),
    pub status: String,
    pub updates: u64,
}

impl RenderSink for Frame {
    fn canvas(&mut self, canvas: &CanvasBounds) {
        self.canvas = Some(*canvas);
        self.updates += 1;
    }

    fn paddle(&mut self, side: Side, paddle: &PaddleState) {
        match side {
            Side::One => self.player_one = Some(*paddle),
            Side::Two => self.player_two = Some(*paddle),
        }
        self.updates += 1;
    }

    fn ball(&mut self, ball: &BallState) {
        self.ball = Some(*ball);
        self.updates += 1;
    }

    fn score(&mut self, side: Side, score: u32) {
        match side {
            Side::One => self.scores.0 = score,
            Side::Two => self.scores.1 = score,
        }
        self.updates += 1;
    }

    fn status(&mut self, message: &str) {
        self.status = message.to_string();
        self.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::IDLE_PROMPT;

    #[test]
    fn test_attach_paints_everything_immediately() {
        let state = GameState::default();
        let frame = Rc::new(RefCell::new(Frame::default()));
        let subs = attach_renderer(&state, Rc::clone(&frame));

        assert_eq!(subs.len(), 7);
        let frame = frame.borrow();
        assert_eq!(frame.updates, 7);
        assert_eq!(frame.canvas, Some(CanvasBounds::default()));
        assert_eq!(frame.ball, Some(state.ball.current_value()));
        assert_eq!(frame.status, IDLE_PROMPT);
    }

    #[test]
    fn test_updates_follow_state_until_detached() {
        let state = GameState::default();
        let frame = Rc::new(RefCell::new(Frame::default()));
        let subs = attach_renderer(&state, Rc::clone(&frame));

        state.award_point(Side::Two);
        assert_eq!(frame.borrow().scores, (0, 1));

        drop(subs);
        state.award_point(Side::Two);
        assert_eq!(frame.borrow().scores, (0, 1));
    }
}
