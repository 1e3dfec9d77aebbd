use std::f64::consts::FRAC_PI_2;

use petri_physics::border;

use crate::entity::{EntityCore, Finalizable, Peers};

/// A self-propelled particle from the primordial particle system: instead
/// of forces it turns each tick by `alpha + sign * beta * n`, where `n` is
/// the number of neighbors in its vision radius and `sign` reflects which
/// side of its heading the majority sits on.
#[derive(Debug, Clone)]
pub struct PrimordialParticle {
    pub core: EntityCore,
    pub velocity: [f64; 2],
    /// Heading in radians
    pub orientation: f64,
    /// Fixed turn per tick, radians
    pub alpha: f64,
    /// Neighbor-scaled turn per tick, radians
    pub beta: f64,
    pub vision_radius: f64,
    pub size: f64,
    pub can_move: bool,
    /// Neighborhood size from the last tick, drives the display color
    pub neighbor_count: u32,
}

impl PrimordialParticle {
    pub fn new(
        x: f64,
        y: f64,
        speed: f64,
        alpha_deg: f64,
        beta_deg: f64,
        vision_radius: f64,
    ) -> Self {
        Self {
            core: EntityCore::at(x, y),
            velocity: [speed, speed],
            orientation: FRAC_PI_2,
            alpha: alpha_deg.to_radians(),
            beta: beta_deg.to_radians(),
            vision_radius,
            size: 0.01,
            can_move: true,
            neighbor_count: 0,
        }
    }

    /// Current heading as a displacement per tick.
    pub fn heading(&self) -> [f64; 2] {
        [
            self.orientation.cos() * self.velocity[0],
            self.orientation.sin() * self.velocity[1],
        ]
    }

    pub fn tick(&mut self, peers: &mut Peers<'_>) {
        if self.core.paused || self.core.marked_for_deletion {
            return;
        }

        let mut n_left = 0u32;
        let mut n_right = 0u32;
        let mut n_total = 0u32;
        let pos = self.core.position;

        for peer in peers.iter_mut() {
            if peer.is_paused() {
                continue;
            }
            let other = peer.position();
            let vec = [other[0] - pos[0], other[1] - pos[1]];
            let dist_sq = vec[0] * vec[0] + vec[1] * vec[1];
            if dist_sq > self.vision_radius * self.vision_radius {
                continue;
            }

            let angle = vector_angle(self.heading(), vec);
            if angle > 0.0 && angle < FRAC_PI_2 {
                n_left += 1;
            } else {
                n_right += 1;
            }
            // Counted separately: orthogonal neighbors still count
            n_total += 1;
        }

        let mut sign = 1.0;
        if n_left > n_right {
            sign = -1.0;
        } else if n_left == n_right {
            sign = 0.0;
        }

        self.orientation += self.alpha + sign * self.beta * f64::from(n_total);
        self.neighbor_count = n_total;
    }

    /// Display color keyed on region density.
    pub fn color(&self) -> [u8; 3] {
        if self.neighbor_count > 9 {
            [240, 230, 10]
        } else if self.neighbor_count >= 7 {
            [20, 250, 100]
        } else if self.neighbor_count >= 5 {
            [10, 140, 180]
        } else if self.neighbor_count > 3 {
            [20, 25, 120]
        } else {
            [10, 10, 190]
        }
    }
}

impl Finalizable for PrimordialParticle {
    fn finish_tick(&mut self) {
        if self.core.paused || self.core.marked_for_deletion || !self.can_move {
            return;
        }
        let step = self.heading();
        self.core.position = border::border_stop([
            self.core.position[0] + step[0],
            self.core.position[1] + step[1],
        ]);
    }
}

/// Angle between two vectors. Degenerate input (zero length, rounding
/// outside the acos domain) counts as aligned.
fn vector_angle(v1: [f64; 2], v2: [f64; 2]) -> f64 {
    let len_prod = (v1[0] * v1[0] + v1[1] * v1[1]).sqrt() * (v2[0] * v2[0] + v2[1] * v2[1]).sqrt();
    if len_prod == 0.0 {
        return 0.0;
    }
    let cos = (v1[0] * v2[0] + v1[1] * v2[1]) / len_prod;
    if !(-1.0..=1.0).contains(&cos) {
        return 0.0;
    }
    cos.acos()
}
