use crate::{geometry::Rect, physics::Field};

/// Computer paddle policy: chase the ball's vertical center by at most `ai_speed`
/// per tick. No prediction, no randomness.
///
/// The last step toward a wall is shortened so the paddle always stays inside the
/// field.
pub fn update_ai_paddle(ball: &Rect, ai_paddle: &Rect, ai_speed: i32, field: &Field) -> Rect {
    let mut paddle = *ai_paddle;
    let ball_y = ball.center().y;
    let paddle_y = paddle.center().y;

    if ball_y > paddle_y && paddle.bottom() < field.height {
        let step = ai_speed.min(field.height - paddle.bottom());
        paddle.move_top(paddle.top() + step);
    } else if ball_y < paddle_y && paddle.top() > 0 {
        let step = ai_speed.min(paddle.top());
        paddle.move_top(paddle.top() - step);
    }

    paddle
}
