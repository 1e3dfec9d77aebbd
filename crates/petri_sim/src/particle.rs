use petri_core::constants::{FRICTION, MIN_FORCE, SIZE_SCALE, TRAIL_INTERVAL};
use petri_core::{BoundedHistory, Species};
use petri_physics::{border, forces};

use crate::entity::{EntityCore, Finalizable, ForceSource, Peers};
use crate::interaction::InteractionMatrix;

/// A force line recorded for the debug overlay: peer position and the
/// force felt from that peer.
pub type ForceLine = ([f64; 2], [f64; 2]);

/// A particle driven by the pairwise species-coupling force system.
#[derive(Debug, Clone)]
pub struct ForceParticle {
    pub core: EntityCore,
    pub species: Species,
    pub velocity: [f64; 2],
    pub size: f64,
    pub mass: f64,
    pub lifetime: u64,
    /// Ticks after which the particle marks itself for deletion
    pub lifespan: Option<u64>,
    pub can_move: bool,
    /// Velocity carry-over per tick, 1.0 = frictionless
    pub friction: f64,
    /// Deadband under which a received force collapses to zero
    pub min_force: f64,
    /// Mass scale this particle contributes as a force source
    pub size_scale: f64,
    pub mods: InteractionMatrix,
    pub trail: BoundedHistory<[f64; 2]>,
    pub trail_interval: u32,
    pub trail_enabled: bool,
    /// Debug overlay record, rebuilt every tick while debug view is on
    pub force_lines: Vec<ForceLine>,
}

impl ForceParticle {
    pub fn new(species: Species, x: f64, y: f64) -> Self {
        Self {
            core: EntityCore::at(x, y),
            species,
            velocity: [0.0, 0.0],
            size: species.default_size(),
            mass: species.default_mass(),
            lifetime: 0,
            lifespan: None,
            can_move: true,
            friction: FRICTION,
            min_force: MIN_FORCE,
            size_scale: SIZE_SCALE,
            mods: InteractionMatrix::seeded(species),
            trail: BoundedHistory::default(),
            trail_interval: TRAIL_INTERVAL,
            trail_enabled: false,
            force_lines: Vec::new(),
        }
    }

    /// Compute phase: accumulate forces from every live peer and commit the
    /// new velocity. The velocity write is visible to peers ticked later in
    /// the same pass; positions only move in [`finish_tick`].
    ///
    /// [`finish_tick`]: Finalizable::finish_tick
    pub fn tick(&mut self, peers: &mut Peers<'_>, border_force: f64) {
        if self.core.paused {
            return;
        }

        self.lifetime += 1;
        if let Some(lifespan) = self.lifespan {
            if self.lifetime > lifespan {
                self.core.marked_for_deletion = true;
                return;
            }
        }

        self.force_lines.clear();
        let mut accum = [
            self.velocity[0] * self.friction,
            self.velocity[1] * self.friction,
        ];

        for peer in peers.iter_mut() {
            if peer.is_marked() || peer.is_paused() {
                continue;
            }
            let peer_pos = peer.position();
            let Some(source) = peer.force_source_mut() else {
                continue;
            };

            let force = self.felt_force(source);
            if self.core.debug_view {
                self.force_lines.push((peer_pos, force));
            }
            if self.can_move {
                accum[0] += force[0];
                accum[1] += force[1];
            }
        }

        self.velocity = border::border_reflect(self.core.position, accum, border_force);
    }

    /// The force this particle receives from `source`.
    fn felt_force(&self, source: &mut dyn ForceSource) -> [f64; 2] {
        let pos = self.core.position;
        let src = source.source_position();
        let vec = [src[0] - pos[0], src[1] - pos[1]];
        let dist_sq = vec[0] * vec[0] + vec[1] * vec[1];

        let threshold = forces::repel_threshold(source.source_size(), self.size);
        if dist_sq <= threshold {
            return forces::close_repulsion(
                vec,
                dist_sq,
                threshold,
                source.source_mass(),
                source.source_scale(),
            );
        }

        let type_mod = source.reflect_mod(self.species, &self.mods);
        forces::coupling(
            vec,
            dist_sq,
            type_mod,
            source.source_mass(),
            source.source_scale(),
            self.min_force,
        )
    }
}

impl Finalizable for ForceParticle {
    fn finish_tick(&mut self) {
        if self.core.paused {
            return;
        }

        if self.trail_enabled {
            if self.lifetime % u64::from(self.trail_interval) == 0 {
                self.trail.push(self.core.position);
            }
        } else if !self.trail.is_empty() {
            // Trailing was switched off: fade the old samples one per tick
            // instead of clearing them outright.
            let _ = self.trail.pop_oldest();
        }

        if self.can_move {
            let next = [
                self.core.position[0] + self.velocity[0],
                self.core.position[1] + self.velocity[1],
            ];
            self.core.position = border::border_stop(next);
        }
    }
}

impl ForceSource for ForceParticle {
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

    fn reflect_mod(&mut self, seeker: Species, seeker_mods: &InteractionMatrix) -> f64 {
        self.mods.resolve_reflect(self.species, seeker, seeker_mods)
    }
}
