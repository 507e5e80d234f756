use glam::Vec3;

/// Builds the thrust vector. X (strafe) and Z (forward/back) pass through from
/// the analog axes; Y is digital with the up key checked first.
pub fn map_thrust(axis_x: f32, axis_z: f32, up_down: bool, down_down: bool) -> Vec3 {
    Vec3::new(axis_x, vertical(up_down, down_down), axis_z)
}

fn vertical(up_down: bool, down_down: bool) -> f32 {
    if up_down {
        return 1.0;
    }
    if down_down {
        return -1.0;
    }
    0.0
}
