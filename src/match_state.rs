use crate::{
    ai::update_ai_paddle,
    clock::{MatchClock, MatchSummary},
    config::MatchConfig,
    error::InvalidConfiguration,
    geometry::{Rect, Vec2},
    input::{apply_move, Direction},
    physics::{self, Ball, Field},
};

/// Which paddle a score or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Computer,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub player: u32,
    pub ai: u32,
}

impl Score {
    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Computer => self.ai += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Running,
    Ended,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub ball: Rect,
    pub player_paddle: Rect,
    pub ai_paddle: Rect,
    pub player_score: u32,
    pub ai_score: u32,
    pub seconds_remaining: u32,
    pub phase: MatchPhase,
}

/// One match: ball, both paddles, score, clock and phase.
///
/// Nothing mutates once the phase is [`MatchPhase::Ended`] until [`restart`] is
/// called; ticks and moves on an ended match are no-ops.
///
/// [`restart`]: MatchState::restart
#[derive(Debug, Clone)]
pub struct MatchState {
    config: MatchConfig,
    field: Field,
    ball: Ball,
    player_paddle: Rect,
    ai_paddle: Rect,
    score: Score,
    clock: MatchClock,
    phase: MatchPhase,
}

impl MatchState {
    pub fn new_match(config: MatchConfig) -> Result<MatchState, InvalidConfiguration> {
        config.validate()?;

        let home = config.ball_home();
        let ball = Ball::new(
            Rect::new(home.x, home.y, config.ball_size, config.ball_size),
            Vec2::new(config.ball_speed_x, config.ball_speed_y),
        );
        let state = MatchState {
            field: Field::new(config.field_width, config.field_height),
            ball,
            player_paddle: config.player_paddle_home(),
            ai_paddle: config.ai_paddle_home(),
            score: Score::default(),
            clock: MatchClock::new(config.duration_secs),
            phase: MatchPhase::Running,
            config,
        };
        log::info!(
            "Match started on a {}x{} field for {} seconds.",
            state.field.width,
            state.field.height,
            state.clock.duration_secs()
        );
        Ok(state)
    }

    /// Start over with a fresh score and clock. The ball is served again, the
    /// paddles stay where they are.
    pub fn restart(&mut self) {
        self.score = Score::default();
        self.clock.reset();
        self.phase = MatchPhase::Running;
        physics::reset_ball(&mut self.ball, self.config.ball_home());
        log::info!("Match restarted.");
    }

    /// Advance the simulation by one physics tick. Returns who scored, if anyone.
    pub fn tick_physics(&mut self) -> Option<Side> {
        if self.phase == MatchPhase::Ended {
            return None;
        }

        let scorer = physics::step_ball(
            &mut self.ball,
            &[self.player_paddle, self.ai_paddle],
            &self.field,
            self.config.ball_home(),
        );
        if let Some(side) = scorer {
            self.score.increment(side);
            log::debug!(
                "{side:?} scored, score is now {} - {}.",
                self.score.player,
                self.score.ai
            );
        }

        self.ai_paddle = update_ai_paddle(
            &self.ball.rect,
            &self.ai_paddle,
            self.config.ai_speed,
            &self.field,
        );
        scorer
    }

    /// One real second elapsed. Returns the summary on the tick that ends the match.
    pub fn tick_clock(&mut self) -> Option<MatchSummary> {
        if self.phase == MatchPhase::Ended {
            return None;
        }
        if !self.clock.tick() {
            return None;
        }

        self.phase = MatchPhase::Ended;
        let summary = MatchSummary::new(self.score.player, self.score.ai);
        log::info!(
            "Time's up. Player {} - {} Computer, winner: {}.",
            summary.player_score,
            summary.ai_score,
            summary.winner
        );
        Some(summary)
    }

    /// Move the player paddle in response to one input command.
    pub fn apply_move(&mut self, direction: Direction) {
        if self.phase == MatchPhase::Ended {
            return;
        }
        self.player_paddle = apply_move(
            &self.player_paddle,
            direction,
            self.config.paddle_speed,
            &self.field,
        );
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: self.ball.rect,
            player_paddle: self.player_paddle,
            ai_paddle: self.ai_paddle,
            player_score: self.score.player,
            ai_score: self.score.ai,
            seconds_remaining: self.clock.remaining_secs(),
            phase: self.phase,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn ball(&self) -> Rect {
        self.ball.rect
    }

    pub fn ball_velocity(&self) -> Vec2 {
        self.ball.velocity
    }

    pub fn player_paddle(&self) -> Rect {
        self.player_paddle
    }

    pub fn ai_paddle(&self) -> Rect {
        self.ai_paddle
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.clock.remaining_secs()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == MatchPhase::Running
    }

    #[cfg(test)]
    pub(crate) fn set_ball(&mut self, rect: Rect, velocity: Vec2) {
        self.ball = Ball::new(rect, velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> MatchState {
        MatchState::new_match(MatchConfig::new()).unwrap()
    }

    #[test]
    fn test_new_match_layout() {
        let state = new_state();
        assert_eq!(state.ball(), Rect::new(390, 190, 20, 20));
        assert_eq!(state.ball_velocity(), Vec2::new(5, 5));
        assert_eq!(state.player_paddle(), Rect::new(30, 150, 10, 100));
        assert_eq!(state.ai_paddle(), Rect::new(760, 150, 10, 100));
        assert_eq!(state.score(), Score::default());
        assert_eq!(state.seconds_remaining(), 60);
        assert_eq!(state.phase(), MatchPhase::Running);
    }

    #[test]
    fn test_new_match_rejects_invalid_config() {
        let config = MatchConfig {
            ai_speed: 0,
            ..MatchConfig::default()
        };
        assert_eq!(
            MatchState::new_match(config).unwrap_err(),
            InvalidConfiguration::NonPositive {
                parameter: "ai_speed",
                value: 0
            }
        );
    }

    #[test]
    fn test_first_tick() {
        let mut state = new_state();
        assert_eq!(state.tick_physics(), None);
        assert_eq!(state.ball(), Rect::new(395, 195, 20, 20));
        // ball center 205 is below the paddle center 200
        assert_eq!(state.ai_paddle(), Rect::new(760, 154, 10, 100));
    }

    #[test]
    fn test_computer_scores_on_left_line() {
        let mut state = new_state();
        state.set_ball(Rect::new(4, 20, 20, 20), Vec2::new(-5, 5));

        assert_eq!(state.tick_physics(), Some(Side::Computer));
        assert_eq!(state.score(), Score { player: 0, ai: 1 });
        assert_eq!(state.ball(), Rect::new(390, 190, 20, 20));
        assert_eq!(state.ball_velocity(), Vec2::new(5, 5));
    }

    #[test]
    fn test_player_scores_on_right_line() {
        let mut state = new_state();
        state.set_ball(Rect::new(776, 20, 20, 20), Vec2::new(5, 5));

        assert_eq!(state.tick_physics(), Some(Side::Player));
        assert_eq!(state.score(), Score { player: 1, ai: 0 });
        assert_eq!(state.ball(), Rect::new(390, 190, 20, 20));
        assert_eq!(state.ball_velocity(), Vec2::new(-5, 5));
    }

    #[test]
    fn test_clock_ends_match_with_summary() {
        let mut state = MatchState::new_match(MatchConfig {
            duration_secs: 2,
            ..MatchConfig::default()
        })
        .unwrap();
        state.set_ball(Rect::new(776, 20, 20, 20), Vec2::new(5, 5));
        state.tick_physics();

        assert_eq!(state.tick_clock(), None);
        assert_eq!(state.seconds_remaining(), 1);
        assert!(state.is_running());

        let summary = state.tick_clock().unwrap();
        assert_eq!(summary, MatchSummary::new(1, 0));
        assert_eq!(summary.winner.to_string(), "Player");
        assert_eq!(state.phase(), MatchPhase::Ended);
        assert_eq!(state.seconds_remaining(), 0);
    }

    #[test]
    fn test_ended_match_is_frozen() {
        let mut state = MatchState::new_match(MatchConfig {
            duration_secs: 1,
            ..MatchConfig::default()
        })
        .unwrap();
        assert!(state.tick_clock().is_some());
        let frozen = state.snapshot();

        assert_eq!(state.tick_physics(), None);
        assert_eq!(state.tick_clock(), None);
        state.apply_move(Direction::Up);
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_restart_keeps_paddles() {
        let mut state = MatchState::new_match(MatchConfig {
            duration_secs: 1,
            ..MatchConfig::default()
        })
        .unwrap();
        state.apply_move(Direction::Down);
        for _ in 0..10 {
            state.tick_physics();
        }
        state.tick_clock();
        let player_paddle = state.player_paddle();
        let ai_paddle = state.ai_paddle();
        let velocity = state.ball_velocity();

        state.restart();
        assert_eq!(state.phase(), MatchPhase::Running);
        assert_eq!(state.score(), Score::default());
        assert_eq!(state.seconds_remaining(), 1);
        assert_eq!(state.ball(), Rect::new(390, 190, 20, 20));
        assert_eq!(state.ball_velocity(), Vec2::new(-velocity.x, velocity.y));
        assert_eq!(state.player_paddle(), player_paddle);
        assert_eq!(state.ai_paddle(), ai_paddle);
    }

    #[test]
    fn test_apply_move_uses_paddle_speed() {
        let mut state = new_state();
        state.apply_move(Direction::Up);
        assert_eq!(state.player_paddle(), Rect::new(30, 130, 10, 100));
        state.apply_move(Direction::Down);
        state.apply_move(Direction::Down);
        assert_eq!(state.player_paddle(), Rect::new(30, 170, 10, 100));
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = new_state();
        state.tick_physics();
        state.tick_clock();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.ball, state.ball());
        assert_eq!(snapshot.player_paddle, state.player_paddle());
        assert_eq!(snapshot.ai_paddle, state.ai_paddle());
        assert_eq!(snapshot.seconds_remaining, 59);
        assert_eq!(snapshot.phase, MatchPhase::Running);
    }
}
