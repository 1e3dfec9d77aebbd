use petri_core::constants::{BORDER_CLAMP, BORDER_WALL};

/// Hard wall: clamps each coordinate independently. Velocity is untouched;
/// a particle pressed into the wall simply stops there.
pub fn border_stop(pos: [f64; 2]) -> [f64; 2] {
    [
        pos[0].clamp(-BORDER_CLAMP, BORDER_CLAMP),
        pos[1].clamp(-BORDER_CLAMP, BORDER_CLAMP),
    ]
}

/// Soft wall: adds a repulsive pseudo-force to the velocity when the
/// particle is heading into one of the four walls of the outer square.
///
/// The wall is picked from the dominant velocity component (ties go to the
/// y walls). The push falls off with the squared distance to where the
/// motion segment crosses the wall line, mirrored along the reflected
/// axis. Degenerate geometry (parallel lines, zero velocity) leaves the
/// velocity unchanged. `border_force` of zero disables the push entirely.
pub fn border_reflect(pos: [f64; 2], vel: [f64; 2], border_force: f64) -> [f64; 2] {
    let b = BORDER_WALL;

    // Corners of the wall the particle is moving towards
    let (b1, b2) = if vel[0].abs() > vel[1].abs() {
        if vel[0] > 0.0 {
            ([b, b], [b, -b])
        } else {
            ([-b, b], [-b, -b])
        }
    } else if vel[1] < 0.0 {
        ([-b, -b], [b, -b])
    } else {
        ([-b, b], [b, b])
    };

    let next = [pos[0] + vel[0], pos[1] + vel[1]];
    let Some(hit) = intersection(line(pos, next), line(b1, b2)) else {
        return vel;
    };

    // Vector from the particle to the wall crossing, reflected along the
    // axis facing the wall
    let mut vec = [hit[0] - pos[0], hit[1] - pos[1]];
    let dist_sq = vec[0] * vec[0] + vec[1] * vec[1];
    if vec[0].abs() > vec[1].abs() {
        vec[1] = -vec[1];
    } else {
        vec[0] = -vec[0];
    }

    let magnitude = -(border_force / dist_sq);
    [vel[0] + magnitude * vec[0], vel[1] + magnitude * vec[1]]
}

/// Homogeneous coefficients of the line through two points.
fn line(p1: [f64; 2], p2: [f64; 2]) -> [f64; 3] {
    [
        p1[1] - p2[1],
        p2[0] - p1[0],
        -(p1[0] * p2[1] - p2[0] * p1[1]),
    ]
}

fn intersection(l1: [f64; 3], l2: [f64; 3]) -> Option<[f64; 2]> {
    let d = l1[0] * l2[1] - l1[1] * l2[0];
    if d == 0.0 {
        return None;
    }
    let dx = l1[2] * l2[1] - l1[1] * l2[2];
    let dy = l1[0] * l2[2] - l1[2] * l2[0];
    Some([dx / d, dy / d])
}
