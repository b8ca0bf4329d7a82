/// Integer position in field units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

impl Vec2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Right and bottom edges are exclusive: a 20 wide rect at `x = 0` covers
/// columns `0..20`, so `right()` is 20.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Rightmost column still covered by the rect, `right() - 1`.
    pub fn last_column(&self) -> i32 {
        self.right() - 1
    }

    /// Lowest row still covered by the rect, `bottom() - 1`.
    pub fn last_row(&self) -> i32 {
        self.bottom() - 1
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Vertical-only move, the only motion paddles are allowed.
    pub fn move_top(&mut self, top: i32) {
        self.y = top;
    }

    /// True when both rects share at least one unit of area.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
