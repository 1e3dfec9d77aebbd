use petri_core::constants::SIZE_SCALE;
use petri_core::Species;
use petri_physics::{border, Oscillator};

use crate::entity::{EntityCore, Finalizable, ForceSource, Peers};
use crate::interaction::InteractionMatrix;

/// A body that pushes every species with a single scalar without ever being
/// pushed back. The output can be driven by an oscillator of its lifetime.
#[derive(Debug, Clone)]
pub struct Generator {
    pub core: EntityCore,
    pub velocity: [f64; 2],
    pub size: f64,
    pub mass: f64,
    pub size_scale: f64,
    pub can_move: bool,
    /// The single coupling scalar exerted toward everything
    pub output: f64,
    pub oscillator: Option<Oscillator>,
    pub lifetime: u64,
}

impl Generator {
    pub fn new(x: f64, y: f64, size: f64, output: f64) -> Self {
        Self {
            core: EntityCore::at(x, y),
            velocity: [0.0, 0.0],
            size,
            mass: 0.005,
            size_scale: SIZE_SCALE,
            can_move: true,
            output,
            oscillator: None,
            lifetime: 0,
        }
    }

    // All a generator does is get older and fluctuate its output. It never
    // accumulates forces itself; a paused generator still ages but is
    // skipped as a force source by its peers.
    pub fn tick(&mut self) {
        self.lifetime += 1;
        if let Some(osc) = self.oscillator {
            self.output = osc.eval(self.lifetime);
        }
    }

    pub fn color(&self) -> [u8; 3] {
        let c = (self.output.abs() * 200.0).min(255.0) as u8;
        [c, c, c]
    }
}

impl Finalizable for Generator {
    fn finish_tick(&mut self) {
        if self.core.paused {
            return;
        }
        if self.can_move {
            self.core.position = border::border_stop([
                self.core.position[0] + self.velocity[0],
                self.core.position[1] + self.velocity[1],
            ]);
        }
    }
}

impl ForceSource for Generator {
    fn source_position(&self) -> [f64; 2] {
        self.core.position
    }

    fn source_size(&self) -> f64 {
        self.size
    }

    fn source_mass(&self) -> f64 {
        self.mass
    }

    fn source_scale(&self) -> f64 {
        self.size_scale
    }

    fn reflect_mod(&mut self, _seeker: Species, _seeker_mods: &InteractionMatrix) -> f64 {
        self.output
    }
}

/// A homogeneous, uni-directional field over a circular area. Not a force
/// participant: it writes the field vector straight into the velocity of
/// everything in range, bypassing the pairwise math.
#[derive(Debug, Clone)]
pub struct FieldGenerator {
    pub core: EntityCore,
    pub force: [f64; 2],
    pub range: f64,
    pub size: f64,
}

impl FieldGenerator {
    pub fn new(x: f64, y: f64, force: [f64; 2], range: f64) -> Self {
        Self {
            core: EntityCore::at(x, y),
            force,
            range,
            size: 0.02,
        }
    }

    pub fn tick(&mut self, peers: &mut Peers<'_>) {
        if self.core.paused || self.core.marked_for_deletion {
            return;
        }
        let pos = self.core.position;
        for peer in peers.iter_mut() {
            let p = peer.position();
            let dx = p[0] - pos[0];
            let dy = p[1] - pos[1];
            if (dx * dx + dy * dy).sqrt() > self.range {
                continue;
            }
            let Some(velocity) = peer.velocity_mut() else {
                continue;
            };
            velocity[0] += self.force[0];
            velocity[1] += self.force[1];
        }
    }
}
