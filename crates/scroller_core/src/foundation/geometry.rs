//! Axis-aligned bounding boxes and axis-separated collision resolution
//!
//! Every entity in the simulation is an [`Aabb`] in world (level)
//! coordinates. Movement is integrated one axis at a time and each axis is
//! resolved against the static terrain immediately afterwards, so a mover
//! can never tunnel diagonally through a corner.

/// Axis-aligned rectangle in world coordinates, top-left origin, y-down.
///
/// Width and height must be positive; level loading validates this so the
/// simulation never has to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent (> 0)
    pub width: f32,
    /// Vertical extent (> 0)
    pub height: f32,
}

/// What a vertical resolution did to the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalHit {
    /// The mover was falling and is now flush on top of the obstacle.
    Landed,
    /// The mover was rising and is now flush under the obstacle. For
    /// triggerable blocks this is the hit-from-below event.
    BumpedCeiling,
}

impl Aabb {
    /// Create a new box from its top-left corner and extents.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge x-coordinate
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y-coordinate
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal centre
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical centre
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move the box so its bottom edge sits at `bottom`, leaving x alone.
    ///
    /// Power-state height changes go through this so the feet never move.
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Strict AABB intersection test.
    ///
    /// Boxes that merely touch along an edge do NOT overlap; resolution
    /// leaves movers flush against terrain and flush must not re-collide
    /// next tick.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Resolve a horizontal overlap against a static obstacle.
    ///
    /// Given the sign of the horizontal velocity, snaps the mover flush on
    /// the side it approached from and zeroes the velocity component.
    /// Returns `true` if a resolution happened.
    pub fn resolve_horizontal(&mut self, vx: &mut f32, obstacle: &Self) -> bool {
        if !self.overlaps(obstacle) {
            return false;
        }
        if *vx > 0.0 {
            self.x = obstacle.left() - self.width;
        } else if *vx < 0.0 {
            self.x = obstacle.right();
        } else {
            return false;
        }
        *vx = 0.0;
        true
    }

    /// Resolve a vertical overlap against a static obstacle.
    ///
    /// Falling movers land on top, rising movers bump the underside; either
    /// way the vertical velocity component is zeroed.
    pub fn resolve_vertical(&mut self, vy: &mut f32, obstacle: &Self) -> Option<VerticalHit> {
        if !self.overlaps(obstacle) {
            return None;
        }
        if *vy > 0.0 {
            self.y = obstacle.top() - self.height;
            *vy = 0.0;
            Some(VerticalHit::Landed)
        } else if *vy < 0.0 {
            self.y = obstacle.bottom();
            *vy = 0.0;
            Some(VerticalHit::BumpedCeiling)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn overlap_is_strict() {
        let a = Aabb::new(0.0, 0.0, 32.0, 32.0);
        let b = Aabb::new(16.0, 16.0, 32.0, 32.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Touching edges are flush, not colliding.
        let right_flush = Aabb::new(32.0, 0.0, 32.0, 32.0);
        let below_flush = Aabb::new(0.0, 32.0, 32.0, 32.0);
        assert!(!a.overlaps(&right_flush));
        assert!(!a.overlaps(&below_flush));

        let far = Aabb::new(100.0, 100.0, 8.0, 8.0);
        assert!(!a.overlaps(&far));
    }

    #[test]
    fn horizontal_resolution_snaps_flush_and_zeroes_velocity() {
        let wall = Aabb::new(100.0, 0.0, 32.0, 128.0);

        // Moving right into the wall.
        let mut mover = Aabb::new(75.0, 32.0, 32.0, 32.0);
        let mut vx = 6.0;
        assert!(mover.resolve_horizontal(&mut vx, &wall));
        assert_relative_eq!(mover.right(), wall.left());
        assert_relative_eq!(vx, 0.0);
        assert!(!mover.overlaps(&wall));

        // Moving left into the wall.
        let mut mover = Aabb::new(125.0, 32.0, 32.0, 32.0);
        let mut vx = -6.0;
        assert!(mover.resolve_horizontal(&mut vx, &wall));
        assert_relative_eq!(mover.left(), wall.right());
        assert_relative_eq!(vx, 0.0);
        assert!(!mover.overlaps(&wall));
    }

    #[test]
    fn vertical_resolution_distinguishes_landing_from_ceiling() {
        let floor = Aabb::new(0.0, 550.0, 800.0, 50.0);
        let mut mover = Aabb::new(10.0, 530.0, 32.0, 32.0);
        let mut vy = 10.0;
        assert_eq!(
            mover.resolve_vertical(&mut vy, &floor),
            Some(VerticalHit::Landed)
        );
        assert_relative_eq!(mover.bottom(), floor.top());
        assert_relative_eq!(vy, 0.0);

        let block = Aabb::new(0.0, 100.0, 32.0, 32.0);
        let mut mover = Aabb::new(0.0, 120.0, 32.0, 32.0);
        let mut vy = -8.0;
        assert_eq!(
            mover.resolve_vertical(&mut vy, &block),
            Some(VerticalHit::BumpedCeiling)
        );
        assert_relative_eq!(mover.top(), block.bottom());
        assert_relative_eq!(vy, 0.0);
    }

    #[test]
    fn resolution_with_zero_velocity_is_a_no_op() {
        let wall = Aabb::new(100.0, 0.0, 32.0, 128.0);
        let mut mover = Aabb::new(90.0, 32.0, 32.0, 32.0);
        let before = mover;
        let mut vx = 0.0;
        assert!(!mover.resolve_horizontal(&mut vx, &wall));
        assert_eq!(mover, before);
    }

    #[test]
    fn resolution_never_leaves_overlap_for_any_velocity() {
        let wall = Aabb::new(100.0, 0.0, 32.0, 128.0);
        for &speed in &[0.5, 1.0, 6.0, 15.0, 40.0] {
            let mut mover = Aabb::new(99.0, 32.0, 32.0, 32.0);
            let mut vx = speed;
            mover.resolve_horizontal(&mut vx, &wall);
            assert!(!mover.overlaps(&wall), "speed {speed} left an overlap");
            assert_relative_eq!(vx, 0.0);
        }
    }

    #[test]
    fn set_bottom_preserves_feet_position() {
        let mut rect = Aabb::new(100.0, 400.0, 32.0, 32.0);
        let feet = rect.bottom();
        rect.height = 48.0;
        rect.set_bottom(feet);
        assert_relative_eq!(rect.bottom(), feet);
        assert_relative_eq!(rect.y, feet - 48.0);
    }
}
