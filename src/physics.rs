//! Ball motion, collisions and goal detection for one physics tick.
//!
//! Collisions only ever reflect a velocity component, positions are not corrected.
//! A ball can therefore sit a few units inside a wall or a paddle for a tick before
//! the reflected velocity carries it back out.
//!
//! Walls and goal lines are tested against the last row or column the ball covers,
//! so a ball flush with the bottom wall (`bottom() == height`) has not touched it yet.

use crate::{
    geometry::{Rect, Vec2},
    match_state::Side,
};

/// Play area bounds. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
}

impl Field {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ball {
    pub rect: Rect,
    /// Displacement per tick. Both components stay nonzero and keep their magnitude.
    pub velocity: Vec2,
}

impl Ball {
    pub fn new(rect: Rect, velocity: Vec2) -> Self {
        Self { rect, velocity }
    }
}

pub fn move_ball(ball: &mut Ball) {
    ball.rect.translate(ball.velocity.x, ball.velocity.y);
}

/// Reflects the vertical velocity when the ball touches or crosses the top or bottom
/// wall. Returns whether a bounce happened.
pub fn bounce_off_walls(ball: &mut Ball, field: &Field) -> bool {
    if ball.rect.top() <= 0 || ball.rect.last_row() >= field.height {
        ball.velocity.y = -ball.velocity.y;
        true
    } else {
        false
    }
}

/// Reflects the horizontal velocity when the ball overlaps any paddle, whatever the
/// side of the paddle that was hit.
pub fn bounce_off_paddles(ball: &mut Ball, paddles: &[Rect]) -> bool {
    if paddles.iter().any(|paddle| ball.rect.intersects(paddle)) {
        ball.velocity.x = -ball.velocity.x;
        true
    } else {
        false
    }
}

/// Computes whether the ball reached a goal line.
/// * Left line: the computer scores.
/// * Right line: the player scores.
pub fn scorer(ball: &Ball, field: &Field) -> Option<Side> {
    if ball.rect.left() <= 0 {
        Some(Side::Computer)
    } else if ball.rect.last_column() >= field.width {
        Some(Side::Player)
    } else {
        None
    }
}

/// Puts the ball back on its serve spot and reverses its horizontal direction.
pub fn reset_ball(ball: &mut Ball, home: Vec2) {
    ball.rect.move_to(home);
    ball.velocity.x = -ball.velocity.x;
}

/// Runs the ball part of a tick: move, walls, paddles, goals. The ball is served
/// again from `home` when somebody scores.
pub fn step_ball(
    ball: &mut Ball,
    paddles: &[Rect],
    field: &Field,
    home: Vec2,
) -> Option<Side> {
    move_ball(ball);
    bounce_off_walls(ball, field);
    bounce_off_paddles(ball, paddles);

    let scorer = scorer(ball, field);
    if scorer.is_some() {
        reset_ball(ball, home);
    }
    scorer
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Field = Field::new(800, 400);
    const HOME: Vec2 = Vec2::new(390, 190);

    fn ball_at(x: i32, y: i32, vx: i32, vy: i32) -> Ball {
        Ball::new(Rect::new(x, y, 20, 20), Vec2::new(vx, vy))
    }

    #[test]
    fn test_free_flight() {
        let mut ball = ball_at(390, 190, 5, 5);
        let scorer = step_ball(&mut ball, &[], &FIELD, HOME);
        assert_eq!(scorer, None);
        assert_eq!(ball.rect.position(), Vec2::new(395, 195));
        assert_eq!(ball.velocity, Vec2::new(5, 5));
    }

    #[test]
    fn test_wall_bounce_flips_vertical_velocity_only() {
        for (y, vy) in [(3, -5), (-2, -5), (382, 5), (376, 5)] {
            let mut ball = ball_at(200, y, 5, vy);
            move_ball(&mut ball);
            assert!(bounce_off_walls(&mut ball, &FIELD), "y = {y}");
            assert_eq!(ball.velocity, Vec2::new(5, -vy), "y = {y}");
        }
    }

    #[test]
    fn test_wall_bounce_does_not_clamp() {
        let mut ball = ball_at(200, 2, 5, -5);
        step_ball(&mut ball, &[], &FIELD, HOME);
        assert_eq!(ball.rect.top(), -3, "Ball may sit past the wall for a tick");
        assert_eq!(ball.velocity.y, 5);
    }

    #[test]
    fn test_no_wall_bounce_inside_field() {
        let mut ball = ball_at(200, 100, 5, -5);
        assert!(!bounce_off_walls(&mut ball, &FIELD));
        assert_eq!(ball.velocity, Vec2::new(5, -5));
    }

    #[test]
    fn test_ball_flush_with_bottom_wall_does_not_bounce() {
        let mut ball = ball_at(200, 375, 5, 5);
        step_ball(&mut ball, &[], &FIELD, HOME);
        assert_eq!(ball.rect.position(), Vec2::new(205, 380));
        assert_eq!(ball.rect.bottom(), FIELD.height);
        assert_eq!(ball.velocity, Vec2::new(5, 5), "Last row 399 is still inside");

        step_ball(&mut ball, &[], &FIELD, HOME);
        assert_eq!(ball.rect.position(), Vec2::new(210, 385));
        assert_eq!(ball.velocity, Vec2::new(5, -5));
    }

    #[test]
    fn test_paddle_bounce_flips_horizontal_velocity_only() {
        let player = Rect::new(30, 150, 10, 100);
        let computer = Rect::new(760, 150, 10, 100);

        let mut ball = ball_at(44, 200, -5, 5);
        step_ball(&mut ball, &[player, computer], &FIELD, HOME);
        assert_eq!(ball.velocity, Vec2::new(5, 5));
        assert_eq!(ball.rect.position(), Vec2::new(39, 205), "No position correction");

        let mut ball = ball_at(737, 140, 5, -5);
        step_ball(&mut ball, &[player, computer], &FIELD, HOME);
        assert_eq!(ball.velocity, Vec2::new(-5, -5));
    }

    #[test]
    fn test_paddle_edge_hit_still_reflects_horizontally() {
        let paddle = Rect::new(30, 150, 10, 100);
        // ball grazing the top of the paddle
        let mut ball = ball_at(25, 135, 5, 5);
        move_ball(&mut ball);
        assert!(bounce_off_paddles(&mut ball, &[paddle]));
        assert_eq!(ball.velocity, Vec2::new(-5, 5));
    }

    #[test]
    fn test_left_goal_scores_for_computer() {
        let mut ball = ball_at(3, 100, -5, 5);
        let scorer = step_ball(&mut ball, &[], &FIELD, HOME);
        assert_eq!(scorer, Some(Side::Computer));
        assert_eq!(ball.rect.position(), HOME);
        assert_eq!(ball.velocity, Vec2::new(5, 5));
    }

    #[test]
    fn test_right_goal_scores_for_player() {
        let mut ball = ball_at(778, 100, 5, 5);
        let scorer = step_ball(&mut ball, &[], &FIELD, HOME);
        assert_eq!(scorer, Some(Side::Player));
        assert_eq!(ball.rect.position(), HOME);
        assert_eq!(ball.velocity, Vec2::new(-5, 5));
    }

    #[test]
    fn test_ball_flush_with_right_line_has_not_scored() {
        let mut ball = ball_at(775, 100, 5, 5);
        assert_eq!(step_ball(&mut ball, &[], &FIELD, HOME), None);
        assert_eq!(ball.rect.right(), FIELD.width);

        assert_eq!(step_ball(&mut ball, &[], &FIELD, HOME), Some(Side::Player));
        assert_eq!(ball.rect.position(), HOME);
    }

    #[test]
    fn test_reset_flips_current_direction() {
        let mut ball = ball_at(0, 0, -5, 5);
        reset_ball(&mut ball, HOME);
        assert_eq!(ball.velocity.x, 5);
        reset_ball(&mut ball, HOME);
        assert_eq!(ball.velocity.x, -5);
    }
}
