//! Collision detection and ball/paddle response
//!
//! `step` is a pure function from a snapshot of the board to the outcome of
//! one tick. Rules are applied in a fixed order and every geometry test
//! reads the snapshot's ball, not the recentred one, so a miss and a paddle
//! overlap can both fire in the same tick.

use glam::Vec2;

use super::state::{BallState, CanvasBounds, GameState, PaddleState, Side};

/// Everything one tick of physics reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub ball: BallState,
    pub player_one: PaddleState,
    pub player_two: PaddleState,
    pub canvas: CanvasBounds,
    pub x_dir: f32,
    pub y_dir: f32,
    /// Pursuit step for paddle one
    pub paddle_speed: f32,
}

impl Snapshot {
    /// Read every container once
    pub fn capture(state: &GameState) -> Self {
        Self {
            ball: state.ball.current_value(),
            player_one: state.player_one.current_value(),
            player_two: state.player_two.current_value(),
            canvas: state.canvas.current_value(),
            x_dir: state.x_dir.current_value(),
            y_dir: state.y_dir.current_value(),
            paddle_speed: state.paddle_speed.current_value(),
        }
    }
}

/// Result of one physics step
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsOutcome {
    /// Ball after recentring (if any) and one step of travel
    pub next_ball: BallState,
    pub x_dir: f32,
    pub y_dir: f32,
    /// Paddle one's top edge after the pursuit nudge
    pub player_one_y: f32,
    pub wall_bounce: bool,
    pub paddle_hit: bool,
    /// Points credited this tick, in rule order
    pub scored_by: Vec<Side>,
}

impl PhysicsOutcome {
    /// Horizontal direction differs from the snapshot's
    pub fn bounce_x(&self, snapshot: &Snapshot) -> bool {
        self.x_dir != snapshot.x_dir
    }

    /// Vertical direction differs from the snapshot's
    pub fn bounce_y(&self, snapshot: &Snapshot) -> bool {
        self.y_dir != snapshot.y_dir
    }

    pub fn scored(&self) -> bool {
        !self.scored_by.is_empty()
    }
}

/// Top or bottom wall contact
#[inline]
pub fn touches_wall(ball: &BallState, canvas: &CanvasBounds) -> bool {
    ball.top() <= 0.0 || ball.bottom() >= canvas.height
}

/// Ball reached the left edge; point to player two
#[inline]
pub fn missed_left(ball: &BallState) -> bool {
    ball.left() <= 0.0
}

/// Ball reached the right edge; point to player one
#[inline]
pub fn missed_right(ball: &BallState, canvas: &CanvasBounds) -> bool {
    ball.right() >= canvas.width
}

/// Ball's leading edge is over a paddle's front edge and the ball's
/// vertical extent sits strictly inside the paddle's
pub fn hits_paddle(ball: &BallState, paddle: &PaddleState, side: Side) -> bool {
    let overlaps_front = match side {
        Side::One => ball.left() <= paddle.right(),
        Side::Two => ball.right() >= paddle.x,
    };
    overlaps_front && paddle.spans_strictly(ball.top(), ball.bottom())
}

/// Nudge paddle one's top edge one step toward `target_y`
#[inline]
pub fn pursue(paddle_y: f32, target_y: f32, speed: f32) -> f32 {
    if paddle_y < target_y {
        paddle_y + speed
    } else if paddle_y > target_y {
        paddle_y - speed
    } else {
        paddle_y
    }
}

/// Advance the board by one tick
pub fn step(snapshot: &Snapshot) -> PhysicsOutcome {
    let ball = snapshot.ball;
    let canvas = snapshot.canvas;
    let mut center = ball.center();
    let mut x_dir = snapshot.x_dir;
    let mut y_dir = snapshot.y_dir;
    let mut scored_by = Vec::new();

    // 1. Top/bottom walls
    let wall_bounce = touches_wall(&ball, &canvas);
    if wall_bounce {
        y_dir = -y_dir;
    }

    // 2. Left miss
    if missed_left(&ball) {
        center = canvas.center();
        scored_by.push(Side::Two);
        x_dir = -x_dir;
    }

    // 3. Right miss
    if missed_right(&ball, &canvas) {
        center = canvas.center();
        scored_by.push(Side::One);
        x_dir = -x_dir;
    }

    // 4. Paddles, tested against the pre-recentre ball
    let paddle_hit = hits_paddle(&ball, &snapshot.player_one, Side::One)
        || hits_paddle(&ball, &snapshot.player_two, Side::Two);
    if paddle_hit {
        x_dir = -x_dir;
    }

    // 5. Paddle one follows the ball
    let player_one_y = pursue(snapshot.player_one.y, center.y, snapshot.paddle_speed);

    // 6. Stored direction is the incoming velocity; travel is its negation
    center += -Vec2::new(x_dir, y_dir);

    PhysicsOutcome {
        next_ball: BallState {
            cx: center.x,
            cy: center.y,
            r: ball.r,
        },
        x_dir,
        y_dir,
        player_one_y,
        wall_bounce,
        paddle_hit,
        scored_by,
    }
}
