use petri_core::constants::{DIST_EPSILON, REPEL_FACTOR, REPEL_RANGE};

/// Squared distance below which two bodies repel regardless of their
/// species coupling.
pub fn repel_threshold(size_a: f64, size_b: f64) -> f64 {
    let min_dist = (size_a + size_b) * REPEL_RANGE;
    min_dist * min_dist
}

/// Close-range repulsion pushing the receiver away from the source.
/// `vec` points from the receiver to the source, `threshold` is the value
/// from [`repel_threshold`] that `dist_sq` fell under.
pub fn close_repulsion(
    vec: [f64; 2],
    dist_sq: f64,
    threshold: f64,
    source_mass: f64,
    source_scale: f64,
) -> [f64; 2] {
    let magnitude =
        -(source_mass * source_scale * REPEL_FACTOR) * (threshold / (dist_sq + DIST_EPSILON));
    [magnitude * vec[0], magnitude * vec[1]]
}

/// Inverse-square coupling force with a signed species mod. Positive mods
/// attract, negative mods repel. Magnitudes under `min_force` collapse to
/// exactly zero so distant pairings cannot accumulate drift.
pub fn coupling(
    vec: [f64; 2],
    dist_sq: f64,
    type_mod: f64,
    source_mass: f64,
    source_scale: f64,
    min_force: f64,
) -> [f64; 2] {
    let magnitude = type_mod * (source_mass * source_scale) / dist_sq;
    if magnitude.abs() < min_force {
        return [0.0, 0.0];
    }
    [magnitude * vec[0], magnitude * vec[1]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupling_is_inverse_square() {
        let near = coupling([1.0, 0.0], 1.0, 1.0, 1.0, 1.0, 0.0);
        let far = coupling([2.0, 0.0], 4.0, 1.0, 1.0, 1.0, 0.0);

        // At 2x distance the magnitude drops 4x; the vector also doubles,
        // so the components differ by 2x.
        let ratio = near[0] / far[0];
        assert!((ratio - 2.0).abs() < 1e-12, "ratio = {}", ratio);
    }

    #[test]
    fn coupling_sign_follows_mod() {
        let attract = coupling([1.0, 0.0], 1.0, 1.5, 1.0, 1.0, 0.0);
        let repel = coupling([1.0, 0.0], 1.0, -1.5, 1.0, 1.0, 0.0);
        assert!(attract[0] > 0.0);
        assert!(repel[0] < 0.0);
    }

    #[test]
    fn sub_threshold_force_is_exactly_zero() {
        // magnitude = 1e-8, under the floor
        let force = coupling([1.0, 1.0], 1.0, 1e-8, 1.0, 1.0, 5e-6);
        assert_eq!(force, [0.0, 0.0]);
    }

    #[test]
    fn close_repulsion_points_away_from_source() {
        let threshold = repel_threshold(0.01, 0.01);
        let vec = [0.01, 0.0];
        let dist_sq = 1e-4;
        assert!(dist_sq <= threshold);
        let force = close_repulsion(vec, dist_sq, threshold, 0.1, 0.01);
        assert!(force[0] < 0.0);
        assert_eq!(force[1], 0.0);
    }

    #[test]
    fn repel_threshold_scales_with_sizes() {
        let small = repel_threshold(0.005, 0.005);
        let large = repel_threshold(0.01, 0.01);
        assert!((large / small - 4.0).abs() < 1e-12);
    }
}
