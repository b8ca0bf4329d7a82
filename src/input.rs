use crate::{geometry::Rect, physics::Field};

/// Discrete move command for the player paddle. One command moves the paddle once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Moves `paddle` one `paddle_speed` step if it is not already touching the wall in
/// that direction. The step is not shortened, so the paddle can overshoot a wall by
/// less than one step.
pub fn apply_move(paddle: &Rect, direction: Direction, paddle_speed: i32, field: &Field) -> Rect {
    let mut paddle = *paddle;
    match direction {
        Direction::Up => {
            if paddle.top() > 0 {
                paddle.move_top(paddle.top() - paddle_speed);
            }
        }
        Direction::Down => {
            if paddle.bottom() < field.height {
                paddle.move_top(paddle.top() + paddle_speed);
            }
        }
    }
    paddle
}
