/// A [`MatchConfig`](crate::MatchConfig) that cannot describe a playable match.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidConfiguration {
    /// A dimension, speed, duration or tick period is zero or negative.
    #[error("`{parameter}` must be positive - got `{value}`")]
    NonPositive { parameter: &'static str, value: i64 },

    /// A value is above what the field or the drivers can carry, e.g. a speed
    /// that would cross the whole field in one tick.
    #[error("`{parameter}` must be at most `{max}` - got `{value}`")]
    TooLarge {
        parameter: &'static str,
        value: i64,
        max: i64,
    },

    /// Entities do not fit in the field with the configured layout.
    #[error("{what} does not fit in the field")]
    DoesNotFit { what: &'static str },
}
