use petri_core::constants::SIZE_SCALE;
use petri_core::Species;
use petri_physics::{border, Oscillator};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::entity::{Entity, EntityCore, Finalizable, ForceSource};
use crate::interaction::InteractionMatrix;
use crate::particle::ForceParticle;

/// A stationary body that spawns particles of one species on a ring around
/// itself. An oscillator of its own lifetime gates emission: one spawn per
/// excursion into the peak zone, re-armed only after the oscillator returns
/// to the neutral band. Without a configured limit it never emits.
#[derive(Debug, Clone)]
pub struct Emitter {
    pub core: EntityCore,
    pub velocity: [f64; 2],
    pub size: f64,
    pub mass: f64,
    pub size_scale: f64,
    pub can_move: bool,
    /// Species of the spawned particles
    pub species: Species,
    pub oscillator: Oscillator,
    pub spawn_size: f64,
    pub spawn_lifespan: Option<u64>,
    /// Ring radius new particles appear on
    pub range: f64,
    /// Repulsion applied to its own offspring so they leave the ring
    pub push: f64,
    /// Hard cap on emissions; `None` disables emission entirely
    pub limit: Option<u32>,
    pub emitted: u32,
    pub lifetime: u64,
    has_emitted: bool,
}

/// Oscillator magnitude at or above which the emitter fires.
const PEAK_ZONE: f64 = 0.9;
/// Oscillator magnitude at or below which the emitter re-arms.
const NEUTRAL_ZONE: f64 = 0.6;

impl Emitter {
    pub fn new(x: f64, y: f64, species: Species, frequency: f64) -> Self {
        let size = 0.005;
        Self {
            core: EntityCore::at(x, y),
            velocity: [0.0, 0.0],
            size,
            mass: 0.005,
            size_scale: SIZE_SCALE,
            can_move: true,
            species,
            oscillator: Oscillator::unit(frequency),
            spawn_size: 0.005,
            spawn_lifespan: None,
            range: size * 2.1,
            push: 0.0005,
            limit: None,
            emitted: 0,
            lifetime: 0,
            has_emitted: false,
        }
    }

    pub fn tick(&mut self, rng: &mut ChaCha8Rng, spawned: &mut Vec<Entity>) {
        self.lifetime += 1;

        let Some(limit) = self.limit else {
            return;
        };
        if self.emitted >= limit {
            return;
        }

        let timer = self.oscillator.eval(self.lifetime);
        if !self.has_emitted && timer.abs() >= PEAK_ZONE {
            spawned.push(Entity::Force(self.spawn(rng)));
            self.emitted += 1;
            self.has_emitted = true;
        } else if self.has_emitted && timer.abs() <= NEUTRAL_ZONE {
            self.has_emitted = false;
        }
    }

    fn spawn(&self, rng: &mut ChaCha8Rng) -> ForceParticle {
        let angle = f64::from(rng.gen_range(0..=360)).to_radians();
        let x = self.range * angle.cos() + self.core.position[0];
        let y = self.range * angle.sin() + self.core.position[1];
        let mut particle = ForceParticle::new(self.species, x, y);
        particle.size = self.spawn_size;
        particle.lifespan = self.spawn_lifespan;
        particle
    }
}

impl Finalizable for Emitter {
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

impl ForceSource for Emitter {
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

    fn reflect_mod(&mut self, seeker: Species, _seeker_mods: &InteractionMatrix) -> f64 {
        if seeker == self.species {
            -self.push
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn no_limit_means_no_emission() {
        let mut emitter = Emitter::new(0.0, 0.0, Species::Magenta, 0.5);
        let mut rng = rng();
        let mut spawned = Vec::new();

        for _ in 0..50 {
            emitter.tick(&mut rng, &mut spawned);
        }
        assert!(spawned.is_empty());
        assert_eq!(emitter.lifetime, 50);
    }

    #[test]
    fn one_emission_per_peak_excursion() {
        // sin(0.5 t) stays in the peak zone for ticks 3 and 4, drops into
        // the neutral band at tick 5 and peaks again at tick 9.
        let mut emitter = Emitter::new(0.0, 0.0, Species::Magenta, 0.5);
        emitter.limit = Some(10);
        let mut rng = rng();
        let mut spawned = Vec::new();

        for _ in 0..4 {
            emitter.tick(&mut rng, &mut spawned);
        }
        assert_eq!(spawned.len(), 1);

        for _ in 4..9 {
            emitter.tick(&mut rng, &mut spawned);
        }
        assert_eq!(spawned.len(), 2);
    }

    #[test]
    fn emission_stops_at_the_limit() {
        let mut emitter = Emitter::new(0.0, 0.0, Species::Magenta, 0.5);
        emitter.limit = Some(2);
        let mut rng = rng();
        let mut spawned = Vec::new();

        for _ in 0..200 {
            emitter.tick(&mut rng, &mut spawned);
        }
        assert_eq!(spawned.len(), 2);
        assert_eq!(emitter.emitted, 2);
    }

    #[test]
    fn spawn_lands_on_the_ring() {
        let mut emitter = Emitter::new(0.25, -0.25, Species::Amber, 0.5);
        emitter.limit = Some(1);
        emitter.spawn_size = 0.003;
        emitter.spawn_lifespan = Some(500);
        let mut rng = rng();
        let mut spawned = Vec::new();

        while spawned.is_empty() {
            emitter.tick(&mut rng, &mut spawned);
        }

        let Entity::Force(p) = &spawned[0] else {
            panic!("emitter spawned a non-particle");
        };
        assert_eq!(p.species, Species::Amber);
        assert_eq!(p.size, 0.003);
        assert_eq!(p.lifespan, Some(500));
        let dx = p.core.position[0] - 0.25;
        let dy = p.core.position[1] + 0.25;
        let dist = (dx * dx + dy * dy).sqrt();
        assert!((dist - emitter.range).abs() < 1e-12);
    }

    #[test]
    fn own_offspring_are_pushed_away() {
        let mut emitter = Emitter::new(0.0, 0.0, Species::Magenta, 0.5);
        let own = InteractionMatrix::seeded(Species::Magenta);
        assert_eq!(emitter.reflect_mod(Species::Magenta, &own), -0.0005);
        assert_eq!(emitter.reflect_mod(Species::Crimson, &own), 0.0);
    }
}
