//! Axis-aligned box overlap tests.
//!
//! Edges touch inclusively: two boxes that share a border overlap on that axis.
//! [`check_collision`] combines the two axes with OR, which is what the kit's
//! games were written against; [`check_intersection`] is the usual AND form.

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CollisionBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CollisionBox {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline(always)]
    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    #[inline(always)]
    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

pub fn overlaps_horizontally(first: &CollisionBox, second: &CollisionBox) -> bool {
    first.right() >= second.x as i64 && first.x as i64 <= second.right()
}

pub fn overlaps_vertically(first: &CollisionBox, second: &CollisionBox) -> bool {
    first.bottom() >= second.y as i64 && first.y as i64 <= second.bottom()
}

/// True when the boxes overlap on either axis.
pub fn check_collision(first: &CollisionBox, second: &CollisionBox) -> bool {
    overlaps_horizontally(first, second) || overlaps_vertically(first, second)
}

/// True only when the boxes overlap on both axes.
pub fn check_intersection(first: &CollisionBox, second: &CollisionBox) -> bool {
    overlaps_horizontally(first, second) && overlaps_vertically(first, second)
}
