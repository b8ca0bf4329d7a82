use std::time::Duration;

use crate::{
    error::InvalidConfiguration,
    geometry::{Rect, Vec2},
};

/// Default match tuning, the values the game has always shipped with.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: i32 = 800;
    pub const FIELD_HEIGHT: i32 = 400;

    // Ball
    pub const BALL_SIZE: i32 = 20;
    pub const BALL_SPEED_X: i32 = 5;
    pub const BALL_SPEED_Y: i32 = 5;

    // Paddles
    pub const PADDLE_WIDTH: i32 = 10;
    pub const PADDLE_HEIGHT: i32 = 100;
    pub const PADDLE_MARGIN: i32 = 30; // gap between a paddle and its goal line
    pub const PADDLE_SPEED: i32 = 20; // per key press
    pub const AI_SPEED: i32 = 4; // per physics tick

    // Timing
    pub const MATCH_DURATION_SECS: u32 = 60;
    pub const TICK_PERIOD_MS: u64 = 30;

    // Limits
    pub const MAX_FIELD_EXTENT: i32 = 1 << 16;
    pub const MAX_TICK_PERIOD_MS: u64 = 1000;
}

/// Everything fixed for the lifetime of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub ball_size: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_margin: i32,
    pub ball_speed_x: i32,
    pub ball_speed_y: i32,
    pub paddle_speed: i32,
    pub ai_speed: i32,
    pub duration_secs: u32,
    pub tick_period: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            ball_size: Params::BALL_SIZE,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_margin: Params::PADDLE_MARGIN,
            ball_speed_x: Params::BALL_SPEED_X,
            ball_speed_y: Params::BALL_SPEED_Y,
            paddle_speed: Params::PADDLE_SPEED,
            ai_speed: Params::AI_SPEED,
            duration_secs: Params::MATCH_DURATION_SECS,
            tick_period: Duration::from_millis(Params::TICK_PERIOD_MS),
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject configurations that cannot produce a playable match.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        let tick_period_ms = i64::try_from(self.tick_period.as_millis()).unwrap_or(i64::MAX);
        let positives = [
            ("field_width", self.field_width as i64),
            ("field_height", self.field_height as i64),
            ("ball_size", self.ball_size as i64),
            ("paddle_width", self.paddle_width as i64),
            ("paddle_height", self.paddle_height as i64),
            ("paddle_margin", self.paddle_margin as i64),
            ("ball_speed_x", self.ball_speed_x as i64),
            ("ball_speed_y", self.ball_speed_y as i64),
            ("paddle_speed", self.paddle_speed as i64),
            ("ai_speed", self.ai_speed as i64),
            ("duration_secs", self.duration_secs as i64),
            ("tick_period_ms", tick_period_ms),
        ];
        if let Some(&(parameter, value)) = positives.iter().find(|(_, value)| *value <= 0) {
            return Err(InvalidConfiguration::NonPositive { parameter, value });
        }

        // every step must stay well inside i32 and inside the field
        let width = self.field_width as i64;
        let height = self.field_height as i64;
        let extent = Params::MAX_FIELD_EXTENT as i64;
        let limits = [
            ("field_width", width, extent),
            ("field_height", height, extent),
            ("ball_speed_x", self.ball_speed_x as i64, width - 1),
            ("ball_speed_y", self.ball_speed_y as i64, height - 1),
            ("paddle_speed", self.paddle_speed as i64, height),
            ("ai_speed", self.ai_speed as i64, height),
            ("tick_period_ms", tick_period_ms, Params::MAX_TICK_PERIOD_MS as i64),
        ];
        if let Some(&(parameter, value, max)) = limits.iter().find(|(_, value, max)| value > max) {
            return Err(InvalidConfiguration::TooLarge {
                parameter,
                value,
                max,
            });
        }

        if self.ball_size >= self.field_width || self.ball_size >= self.field_height {
            return Err(InvalidConfiguration::DoesNotFit { what: "ball" });
        }
        if self.paddle_height > self.field_height {
            return Err(InvalidConfiguration::DoesNotFit { what: "paddle" });
        }
        // both paddles plus a ball-wide gap between them
        let layout =
            2 * (self.paddle_margin as i64 + self.paddle_width as i64) + self.ball_size as i64;
        if layout >= width {
            return Err(InvalidConfiguration::DoesNotFit {
                what: "paddle layout",
            });
        }
        Ok(())
    }

    /// Top-left corner that puts the ball in the middle of the field.
    pub fn ball_home(&self) -> Vec2 {
        Vec2::new(
            (self.field_width - self.ball_size) / 2,
            (self.field_height - self.ball_size) / 2,
        )
    }

    pub fn player_paddle_home(&self) -> Rect {
        Rect::new(
            self.paddle_margin,
            self.paddle_home_top(),
            self.paddle_width,
            self.paddle_height,
        )
    }

    pub fn ai_paddle_home(&self) -> Rect {
        Rect::new(
            self.field_width - self.paddle_margin - self.paddle_width,
            self.paddle_home_top(),
            self.paddle_width,
            self.paddle_height,
        )
    }

    fn paddle_home_top(&self) -> i32 {
        (self.field_height - self.paddle_height) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = MatchConfig::new();
        assert_eq!(config.ball_home(), Vec2::new(390, 190));
        assert_eq!(config.player_paddle_home(), Rect::new(30, 150, 10, 100));
        assert_eq!(config.ai_paddle_home(), Rect::new(760, 150, 10, 100));
        assert_eq!(config.tick_period, Duration::from_millis(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let config = MatchConfig {
            ball_speed_x: -5,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::NonPositive {
                parameter: "ball_speed_x",
                value: -5
            })
        );

        let config = MatchConfig {
            duration_secs: 0,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::NonPositive {
                parameter: "duration_secs",
                ..
            })
        ));

        let config = MatchConfig {
            tick_period: Duration::ZERO,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::NonPositive {
                parameter: "tick_period_ms",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_layouts_that_do_not_fit() {
        let config = MatchConfig {
            paddle_height: 500,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::DoesNotFit { what: "paddle" })
        );

        let config = MatchConfig {
            field_width: 100,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::DoesNotFit {
                what: "paddle layout"
            })
        );

        let config = MatchConfig {
            ball_size: 400,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::DoesNotFit { what: "ball" })
        );

        let config = MatchConfig {
            paddle_margin: i32::MAX,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::DoesNotFit {
                what: "paddle layout"
            })
        );
    }

    #[test]
    fn test_rejects_speeds_that_cross_the_field() {
        let config = MatchConfig {
            ball_speed_y: i32::MAX - 100,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::TooLarge {
                parameter: "ball_speed_y",
                value: i32::MAX as i64 - 100,
                max: 399
            })
        );

        let config = MatchConfig {
            paddle_speed: i32::MAX,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::TooLarge {
                parameter: "paddle_speed",
                max: 400,
                ..
            })
        ));

        let config = MatchConfig {
            ball_speed_x: 800,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::TooLarge {
                parameter: "ball_speed_x",
                max: 799,
                ..
            })
        ));

        let config = MatchConfig {
            ai_speed: 401,
            ..MatchConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(InvalidConfiguration::TooLarge {
                parameter: "ai_speed",
                ..
            })
        ));

        // the fastest accepted speeds
        let config = MatchConfig {
            ball_speed_x: 799,
            ball_speed_y: 399,
            paddle_speed: 400,
            ai_speed: 400,
            ..MatchConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_field_and_slow_ticks() {
        let config = MatchConfig {
            field_width: i32::MAX,
            ..MatchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidConfiguration::TooLarge {
                parameter: "field_width",
                value: i32::MAX as i64,
                max: Params::MAX_FIELD_EXTENT as i64
            })
        );

        let config = MatchConfig {
            tick_period: Duration::from_secs(u64::MAX),
            ..MatchConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            InvalidConfiguration::TooLarge {
                parameter: "tick_period_ms",
                max: 1000,
                ..
            }
        ));
        assert!(err.to_string().starts_with("`tick_period_ms` must be at most `1000`"));
    }
}
