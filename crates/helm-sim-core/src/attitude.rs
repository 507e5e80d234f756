//! Pointer and key mapping for the rotational axes.
//!
//! Pitch and yaw are normalized by a quarter of the screen dimension so full
//! deflection is reached halfway between the center and the screen edge.

/// Pitch command from the vertical pointer position. Pointer coordinates use a
/// bottom-left origin, so a pointer above center yields positive pitch.
///
/// `quarter_height` must be positive.
pub fn map_pitch(pointer_y: f32, center_y: f32, quarter_height: f32) -> f32 {
    normalized_offset(pointer_y, center_y, quarter_height)
}

/// Yaw command from the horizontal pointer position. Right of center is positive.
///
/// `quarter_width` must be positive.
pub fn map_yaw(pointer_x: f32, center_x: f32, quarter_width: f32) -> f32 {
    normalized_offset(pointer_x, center_x, quarter_width)
}

/// Digital roll. The roll-negative key is checked first and wins when both are held.
pub fn map_roll(roll_negative_down: bool, roll_positive_down: bool) -> f32 {
    if roll_negative_down {
        return 1.0;
    }
    if roll_positive_down {
        return -1.0;
    }
    0.0
}

fn normalized_offset(pointer: f32, center: f32, quarter: f32) -> f32 {
    debug_assert!(quarter > 0.0, "quarter dimension must be positive");
    let offset = -(center - pointer);
    offset.clamp(-quarter, quarter) / quarter
}
