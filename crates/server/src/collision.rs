//! Collision detection.
//!
//! All checks are head-only: a snake collides with something when its
//! head vertex falls inside a per-axis tolerance box around a sample
//! point of it. Segments are tested by walking samples along them at a
//! fixed stride. The wall stride equals the wall box width, so the
//! boxes tile into a solid band with no gaps between samples.

use protocol::Vec2D;

// Stride and tolerance per obstacle kind.
pub const SEGMENT_STEP: f64 = 1.0;
pub const SNAKE_HIT_TOLERANCE: f64 = 5.0;
pub const POWERUP_PICKUP_TOLERANCE: f64 = 10.0;
pub const WALL_STEP: f64 = 50.0;
pub const WALL_HIT_TOLERANCE: f64 = 25.0;

/// Segments adjacent to a snake's own head that never count as hits.
/// Without this, the head always overlaps the segment it just extended.
pub const SELF_COLLISION_IMMUNE_SEGMENTS: usize = 2;

/// The hit metric: `point` is within `tolerance` of `center` on both
/// axes independently.
#[inline]
fn within_box(point: Vec2D, center: Vec2D, tolerance: f64) -> bool {
    (point.x - center.x).abs() <= tolerance && (point.y - center.y).abs() <= tolerance
}

/// Walk an axis-aligned segment from `a` to `b` at `step` intervals and
/// report whether `point` falls in the tolerance box of any sample.
/// Segments with equal endpoints on both axes are treated as vertical.
#[inline]
pub fn point_near_segment(point: Vec2D, a: Vec2D, b: Vec2D, step: f64, tolerance: f64) -> bool {
    if a.x == b.x {
        let (lo, hi) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        let mut y = lo;
        while y <= hi {
            if within_box(point, Vec2D::new(a.x, y), tolerance) {
                return true;
            }
            y += step;
        }
    } else {
        let (lo, hi) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let mut x = lo;
        while x <= hi {
            if within_box(point, Vec2D::new(x, a.y), tolerance) {
                return true;
            }
            x += step;
        }
    }
    false
}

/// Test a head against a snake body polyline (tail-first vertex order).
/// `skip_near_head` exempts that many segments closest to the body's own
/// head, which are the last segments of the polyline.
#[inline]
pub fn head_hits_body(head: Vec2D, body: &[Vec2D], skip_near_head: usize) -> bool {
    if body.len() < 2 {
        return false;
    }
    let segments = body.len() - 1;
    for i in 0..segments.saturating_sub(skip_near_head) {
        if point_near_segment(head, body[i], body[i + 1], SEGMENT_STEP, SNAKE_HIT_TOLERANCE) {
            return true;
        }
    }
    false
}

#[inline]
pub fn head_hits_powerup(head: Vec2D, loc: Vec2D) -> bool {
    within_box(head, loc, POWERUP_PICKUP_TOLERANCE)
}

#[inline]
pub fn head_hits_wall(head: Vec2D, p1: Vec2D, p2: Vec2D) -> bool {
    point_near_segment(head, p1, p2, WALL_STEP, WALL_HIT_TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_near_vertical_segment() {
        let a = Vec2D::new(10.0, -50.0);
        let b = Vec2D::new(10.0, 50.0);
        assert!(point_near_segment(Vec2D::new(14.0, 0.0), a, b, 1.0, 5.0));
        assert!(point_near_segment(Vec2D::new(15.0, 0.0), a, b, 1.0, 5.0));
        assert!(!point_near_segment(Vec2D::new(16.0, 0.0), a, b, 1.0, 5.0));
        // Endpoint order must not matter.
        assert!(point_near_segment(Vec2D::new(14.0, 0.0), b, a, 1.0, 5.0));
    }

    #[test]
    fn test_point_near_horizontal_segment() {
        let a = Vec2D::new(-50.0, 20.0);
        let b = Vec2D::new(50.0, 20.0);
        assert!(point_near_segment(Vec2D::new(0.0, 24.0), a, b, 1.0, 5.0));
        assert!(!point_near_segment(Vec2D::new(0.0, 26.0), a, b, 1.0, 5.0));
        // Beyond the endpoints the tolerance box extends the reach.
        assert!(point_near_segment(Vec2D::new(54.0, 20.0), a, b, 1.0, 5.0));
        assert!(!point_near_segment(Vec2D::new(56.0, 20.0), a, b, 1.0, 5.0));
    }

    #[test]
    fn test_wall_band_covers_between_samples() {
        // Samples land at y = 0 and y = 50. Their boxes tile the full
        // 50-unit-wide band, so points between samples still hit.
        let p1 = Vec2D::new(0.0, 0.0);
        let p2 = Vec2D::new(0.0, 50.0);
        assert!(head_hits_wall(Vec2D::new(20.0, 20.0), p1, p2));
        assert!(head_hits_wall(Vec2D::new(1.0, 25.0), p1, p2));
        assert!(head_hits_wall(Vec2D::new(25.0, 25.0), p1, p2));
        assert!(!head_hits_wall(Vec2D::new(26.0, 25.0), p1, p2));
    }

    #[test]
    fn test_head_hits_enemy_body() {
        // Horizontal two-vertex body from (-60, 0) to (60, 0).
        let body = vec![Vec2D::new(-60.0, 0.0), Vec2D::new(60.0, 0.0)];
        assert!(head_hits_body(Vec2D::new(0.0, 4.0), &body, 0));
        assert!(!head_hits_body(Vec2D::new(0.0, 6.0), &body, 0));
        // Box corners reach diagonally past the endpoint sample.
        assert!(head_hits_body(Vec2D::new(64.0, 4.0), &body, 0));
        assert!(!head_hits_body(Vec2D::new(66.0, 4.0), &body, 0));
    }

    #[test]
    fn test_self_immunity_skips_segments_near_head() {
        // L-shaped body, head at (30, -30). The two segments nearest the
        // head are immune, so only vertices before them can kill.
        let body = vec![
            Vec2D::new(-90.0, 0.0),
            Vec2D::new(-30.0, 0.0),
            Vec2D::new(30.0, 0.0),
            Vec2D::new(30.0, -30.0),
        ];
        let head = body[3];
        assert!(!head_hits_body(head, &body, SELF_COLLISION_IMMUNE_SEGMENTS));
        // The same head kills when tested as an enemy.
        assert!(head_hits_body(head, &body, 0));
        // A head doubling back over the oldest segment still dies.
        assert!(head_hits_body(Vec2D::new(-60.0, 3.0), &body, SELF_COLLISION_IMMUNE_SEGMENTS));
    }

    #[test]
    fn test_powerup_pickup_box() {
        let loc = Vec2D::new(100.0, 100.0);
        assert!(head_hits_powerup(Vec2D::new(100.0, 110.0), loc));
        assert!(!head_hits_powerup(Vec2D::new(100.0, 110.5), loc));
        // The box corner collects where a plain distance check would not.
        assert!(head_hits_powerup(Vec2D::new(108.0, 108.0), loc));
        assert!(!head_hits_powerup(Vec2D::new(111.0, 108.0), loc));
    }
}
