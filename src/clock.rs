use std::fmt;

/// Countdown of whole seconds left in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchClock {
    duration_secs: u32,
    remaining_secs: u32,
}

impl MatchClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// One second elapsed. Returns true on the tick that reaches zero, and only that
    /// one.
    pub fn tick(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player,
    Computer,
    Draw,
}

impl Winner {
    pub fn from_scores(player_score: u32, ai_score: u32) -> Self {
        match player_score.cmp(&ai_score) {
            std::cmp::Ordering::Greater => Winner::Player,
            std::cmp::Ordering::Less => Winner::Computer,
            std::cmp::Ordering::Equal => Winner::Draw,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Winner::Player => "Player",
            Winner::Computer => "Computer",
            Winner::Draw => "Draw",
        };
        f.write_str(text)
    }
}

/// Final result, emitted once when the clock runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub player_score: u32,
    pub ai_score: u32,
    pub winner: Winner,
}

impl MatchSummary {
    pub fn new(player_score: u32, ai_score: u32) -> Self {
        Self {
            player_score,
            ai_score,
            winner: Winner::from_scores(player_score, ai_score),
        }
    }
}
