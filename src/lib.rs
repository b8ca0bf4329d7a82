//! Simulation core of a timed ping pong match between a human paddle and a reactive
//! computer paddle.
//!
//! The core never sources input or time itself. A host feeds it discrete
//! [`Direction`] commands, calls [`MatchState::tick_physics`] at a fixed rate and
//! [`MatchState::tick_clock`] once per second, and renders [`Snapshot`]s.
//! [`MatchDriver`] can do the pacing for hosts that run a polling loop.

pub mod ai;
pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod input;
pub mod match_state;
pub mod physics;

pub use ai::update_ai_paddle;
pub use clock::{MatchClock, MatchSummary, Winner};
pub use config::MatchConfig;
pub use driver::{Advance, DueTicks, FixedRate, MatchDriver};
pub use error::InvalidConfiguration;
pub use geometry::{Rect, Vec2};
pub use input::{apply_move, Direction};
pub use match_state::{MatchPhase, MatchState, Score, Side, Snapshot};
pub use physics::{Ball, Field};
