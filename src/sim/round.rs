//! Round lifecycle: win detection and the timed score reset

use std::time::Duration;

use super::state::{GameState, RoundStatus, Side};
use crate::consts::{IDLE_PROMPT, ROUND_RESET_DELAY};

/// Decide the winner once a threshold is reached
///
/// Player two only wins with a strictly higher score, so a tie at the
/// threshold goes to player one.
pub fn winner(player_one: u32, player_two: u32) -> Side {
    if player_one < player_two {
        Side::Two
    } else {
        Side::One
    }
}

/// Owns the win check and the pending reset timer
#[derive(Debug, Clone)]
pub struct RoundController {
    reset_delay: Duration,
    /// Host time at which the pending reset fires
    reset_at: Option<Duration>,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new(ROUND_RESET_DELAY)
    }
}

impl RoundController {
    pub fn new(reset_delay: Duration) -> Self {
        Self {
            reset_delay,
            reset_at: None,
        }
    }

    /// When the pending reset will fire, if one is armed
    pub fn reset_deadline(&self) -> Option<Duration> {
        self.reset_at
    }

    /// Compare both scores with the maximum
    ///
    /// On a win: stop the scheduler, mark the round finished, publish the
    /// winner message and arm the reset timer relative to `now`.
    pub fn check(&mut self, state: &GameState, now: Duration) -> Option<Side> {
        let (one, two) = state.scores();
        let max = state.max_score.current_value();
        if one < max && two < max {
            return None;
        }

        let side = winner(one, two);
        state.running.set(false);
        state.round.set(RoundStatus::Finished);
        state.status_message.set(side.winner_message().to_string());
        // An already armed reset keeps its original deadline
        if self.reset_at.is_none() {
            self.reset_at = Some(now + self.reset_delay);
        }

        log::info!("{:?} wins the round {}-{}", side, one, two);
        Some(side)
    }

    /// Fire the reset if its deadline has passed; returns true when it fired
    ///
    /// A restart during the pause does not cancel the reset: scores and the
    /// prompt are still cleared, but the round status only drops back to
    /// `Idle` if nobody restarted in the meantime.
    pub fn poll(&mut self, state: &GameState, now: Duration) -> bool {
        match self.reset_at {
            Some(deadline) if now >= deadline => {
                self.reset_at = None;
                state.status_message.set(IDLE_PROMPT.to_string());
                state.reset_scores();
                if state.round.current_value() == RoundStatus::Finished {
                    state.round.set(RoundStatus::Idle);
                }
                log::info!("Round reset");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_winner_tie_goes_to_player_one() {
        assert_eq!(winner(7, 3), Side::One);
        assert_eq!(winner(3, 7), Side::Two);
        assert_eq!(winner(7, 7), Side::One);
    }

    #[test]
    fn test_no_win_below_threshold() {
        let state = GameState::default();
        state.running.set(true);
        state.player_one_score.set(6);
        let mut round = RoundController::default();

        assert_eq!(round.check(&state, ms(0)), None);
        assert!(state.is_running());
        assert_eq!(round.reset_deadline(), None);
    }

    #[test]
    fn test_win_stops_and_schedules_reset() {
        let state = GameState::default();
        state.running.set(true);
        state.round.set(RoundStatus::Running);
        state.player_two_score.set(MAX_SCORE);
        let mut round = RoundController::default();

        assert_eq!(round.check(&state, ms(1000)), Some(Side::Two));
        assert!(!state.is_running());
        assert_eq!(state.round.current_value(), RoundStatus::Finished);
        assert_eq!(state.status_message.current_value(), PLAYER_TWO_WINS);
        assert_eq!(round.reset_deadline(), Some(ms(4000)));
    }

    #[test]
    fn test_reset_fires_exactly_at_deadline() {
        let state = GameState::default();
        state.player_one_score.set(MAX_SCORE);
        state.player_two_score.set(2);
        let mut round = RoundController::default();
        round.check(&state, ms(0));

        assert!(!round.poll(&state, ms(2999)));
        assert_eq!(state.scores(), (MAX_SCORE, 2));
        assert_eq!(state.status_message.current_value(), PLAYER_ONE_WINS);

        assert!(round.poll(&state, ms(3000)));
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.status_message.current_value(), IDLE_PROMPT);
        assert_eq!(state.round.current_value(), RoundStatus::Idle);

        // one-shot
        assert!(!round.poll(&state, ms(9000)));
    }

    #[test]
    fn test_reset_after_restart_keeps_running_status() {
        let state = GameState::default();
        state.player_one_score.set(MAX_SCORE);
        let mut round = RoundController::default();
        round.check(&state, ms(0));

        // restarted during the pause
        state.running.set(true);
        state.round.set(RoundStatus::Running);

        assert!(round.poll(&state, ms(3000)));
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.round.current_value(), RoundStatus::Running);
    }

    #[test]
    fn test_repeated_win_keeps_first_deadline() {
        let state = GameState::default();
        state.player_one_score.set(MAX_SCORE);
        let mut round = RoundController::default();
        round.check(&state, ms(0));
        round.check(&state, ms(500));
        assert_eq!(round.reset_deadline(), Some(ms(3000)));
    }
}
