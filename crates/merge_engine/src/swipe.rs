use crate::direction::Direction;

/// Minimum drag, in logical pixels, before a swipe counts as a move.
pub const SWIPE_THRESHOLD: f32 = 30.0;

/// Reduces a drag from press to release into a slide direction.
///
/// `dx`/`dy` are in screen space, `y` growing downward. The dominant axis
/// wins and ties go vertical; drags no longer than `threshold` on either
/// axis are ignored.
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    let (abs_dx, abs_dy) = (dx.abs(), dy.abs());
    if abs_dx.is_nan() || abs_dy.is_nan() || abs_dx.max(abs_dy) <= threshold {
        return None;
    }

    let direction = if abs_dx > abs_dy {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    };
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_drags_are_ignored() {
        assert_eq!(classify_swipe(10.0, -12.0, SWIPE_THRESHOLD), None, "tap");
        assert_eq!(classify_swipe(30.0, 0.0, SWIPE_THRESHOLD), None, "exactly the threshold");
        assert_eq!(classify_swipe(f32::NAN, 100.0, SWIPE_THRESHOLD), None, "garbage input");
    }

    #[test]
    fn dominant_axis_picks_the_direction() {
        assert_eq!(classify_swipe(80.0, 20.0, SWIPE_THRESHOLD), Some(Direction::Right), "right");
        assert_eq!(classify_swipe(-80.0, 20.0, SWIPE_THRESHOLD), Some(Direction::Left), "left");
        assert_eq!(classify_swipe(5.0, 40.0, SWIPE_THRESHOLD), Some(Direction::Down), "down");
        assert_eq!(classify_swipe(5.0, -40.0, SWIPE_THRESHOLD), Some(Direction::Up), "up");
    }

    #[test]
    fn ties_go_vertical() {
        assert_eq!(classify_swipe(50.0, 50.0, SWIPE_THRESHOLD), Some(Direction::Down), "tie");
        assert_eq!(classify_swipe(-50.0, -50.0, SWIPE_THRESHOLD), Some(Direction::Up), "tie");
    }
}
