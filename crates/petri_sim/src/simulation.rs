use petri_core::constants::BORDER_FORCE;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::entity::{Entity, Peers, TickContext};

/// Owns every entity and drives the two-phase tick: compute new velocities
/// against current positions, purge marked entities, then commit positions.
#[derive(Debug)]
pub struct Simulation {
    /// Insertion order defines update and draw order
    pub entities: Vec<Entity>,
    pub lifetime: u64,
    pub paused: bool,
    /// Soft border push strength, zero disables
    pub border_force: f64,
    rng: ChaCha8Rng,
    spawn_queue: Vec<Entity>,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self {
            entities: Vec::new(),
            lifetime: 0,
            paused: false,
            border_force: BORDER_FORCE,
            rng: ChaCha8Rng::seed_from_u64(seed),
            spawn_queue: Vec::new(),
        }
    }

    /// Advance the simulation by one tick. `dt` exists for external clock
    /// compatibility only; the physics runs on a fixed logical step.
    pub fn advance(&mut self, _dt: f64) {
        if self.paused {
            return;
        }
        self.lifetime += 1;

        let mut spawned = std::mem::take(&mut self.spawn_queue);

        // Snapshot the count: entities appended mid-tick are first scanned
        // next tick.
        let count = self.entities.len();
        for index in 0..count {
            let (before, rest) = self.entities.split_at_mut(index);
            let Some((entity, after)) = rest.split_first_mut() else {
                break;
            };
            let mut ctx = TickContext {
                border_force: self.border_force,
                rng: &mut self.rng,
                spawned: &mut spawned,
            };
            entity.tick(Peers { before, after }, &mut ctx);
        }

        self.entities.retain(|e| !e.is_marked());
        self.entities.append(&mut spawned);
        self.spawn_queue = spawned;

        for entity in &mut self.entities {
            if let Some(finalizable) = entity.as_finalizable_mut() {
                finalizable.finish_tick();
            }
        }
    }

    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Marks the entity for deletion; it is purged at the end of the next
    /// completed tick. Returns false when no entity has that id.
    pub fn remove_entity(&mut self, id: Uuid) -> bool {
        for entity in &mut self.entities {
            if entity.id() == id {
                entity.mark_for_deletion();
                return true;
            }
        }
        false
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Drops every entity. Lifetime and pause state are untouched.
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Nearest entity within `radius` of a point, if any.
    pub fn find_closest(&self, pos: [f64; 2], radius: f64) -> Option<Uuid> {
        let mut best = None;
        let mut best_dist = radius * radius;
        for entity in &self.entities {
            let p = entity.position();
            let dx = p[0] - pos[0];
            let dy = p[1] - pos[1];
            let dist_sq = dx * dx + dy * dy;
            if dist_sq <= best_dist {
                best_dist = dist_sq;
                best = Some(entity.id());
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Emitter;
    use crate::factory::{create_particle, SpawnRequest};
    use crate::particle::ForceParticle;
    use petri_core::constants::BORDER_CLAMP;
    use petri_core::Species;

    fn force_entity(species: Species, x: f64, y: f64) -> Entity {
        Entity::Force(create_particle(&SpawnRequest::new(species, [x, y])))
    }

    #[test]
    fn paused_simulation_does_not_advance() {
        let mut sim = Simulation::new(1);
        sim.add_entity(force_entity(Species::Crimson, 0.0, 0.0));
        sim.paused = true;

        sim.advance(1.0);
        assert_eq!(sim.lifetime, 0);
        let Entity::Force(p) = &sim.entities[0] else {
            unreachable!()
        };
        assert_eq!(p.lifetime, 0);
    }

    #[test]
    fn marked_entities_are_gone_by_the_end_of_the_tick() {
        let mut sim = Simulation::new(1);
        let mut doomed = ForceParticle::new(Species::Amber, 0.1, 0.1);
        doomed.lifespan = Some(0);
        sim.add_entity(Entity::Force(doomed));
        sim.add_entity(force_entity(Species::Crimson, -0.1, -0.1));

        sim.advance(1.0);
        assert_eq!(sim.entity_count(), 1);
    }

    #[test]
    fn removal_marks_and_the_next_tick_purges() {
        let mut sim = Simulation::new(1);
        sim.add_entity(force_entity(Species::Azure, 0.0, 0.0));
        let id = sim.entities[0].id();

        assert!(sim.remove_entity(id));
        assert_eq!(sim.entity_count(), 1);
        sim.advance(1.0);
        assert_eq!(sim.entity_count(), 0);

        assert!(!sim.remove_entity(id));
    }

    #[test]
    fn emitter_spawns_are_deferred_to_the_next_tick() {
        let mut sim = Simulation::new(1);
        let mut emitter = Emitter::new(0.0, 0.0, Species::Magenta, 2.0);
        emitter.limit = Some(1);
        sim.add_entity(Entity::Emitter(emitter));

        // sin(2.0) > 0.9: the first tick emits
        sim.advance(1.0);
        assert_eq!(sim.entity_count(), 2);

        // The spawn sits at the end of the list and only starts aging on
        // the following tick.
        let Entity::Force(p) = &sim.entities[1] else {
            panic!("expected the spawned particle");
        };
        assert_eq!(p.lifetime, 0);

        sim.advance(1.0);
        let Entity::Force(p) = &sim.entities[1] else {
            unreachable!()
        };
        assert_eq!(p.lifetime, 1);
    }

    #[test]
    fn per_entity_pause_short_circuits_only_that_entity() {
        let mut sim = Simulation::new(1);
        sim.add_entity(force_entity(Species::Crimson, 0.2, 0.0));
        sim.add_entity(force_entity(Species::Emerald, -0.2, 0.0));
        sim.entities[0].set_paused(true);

        sim.advance(1.0);

        let Entity::Force(paused) = &sim.entities[0] else {
            unreachable!()
        };
        let Entity::Force(running) = &sim.entities[1] else {
            unreachable!()
        };
        assert_eq!(paused.lifetime, 0);
        assert_eq!(running.lifetime, 1);
        // The running particle felt nothing from the paused peer.
        assert_eq!(running.velocity, [0.0, 0.0]);
    }

    #[test]
    fn positions_stay_inside_the_border() {
        let mut sim = Simulation::new(1);
        for (x, y) in [(0.9, 0.9), (-0.9, 0.9), (0.0, -0.9)] {
            let mut request = SpawnRequest::new(Species::Crimson, [x, y]);
            request.velocity = Some([0.4, 0.4]);
            sim.add_entity(Entity::Force(create_particle(&request)));
        }

        for _ in 0..50 {
            sim.advance(1.0);
            for entity in &sim.entities {
                let [x, y] = entity.position();
                assert!(x.abs() <= BORDER_CLAMP, "x escaped: {}", x);
                assert!(y.abs() <= BORDER_CLAMP, "y escaped: {}", y);
            }
        }
    }

    #[test]
    fn find_closest_respects_the_radius() {
        let mut sim = Simulation::new(1);
        sim.add_entity(force_entity(Species::Azure, 0.5, 0.5));
        sim.add_entity(force_entity(Species::Azure, -0.5, -0.5));
        let near = sim.entities[0].id();

        assert_eq!(sim.find_closest([0.45, 0.45], 0.2), Some(near));
        assert_eq!(sim.find_closest([0.0, 0.0], 0.1), None);
    }

    #[test]
    fn velocity_writes_are_visible_within_the_same_pass() {
        // The second particle's force computation sees the first one's
        // already-updated velocity only through positions, which have not
        // moved yet; both integrate in the commit phase afterwards.
        let mut sim = Simulation::new(1);
        sim.add_entity(force_entity(Species::Crimson, 0.0, 0.0));
        sim.add_entity(force_entity(Species::Azure, 0.5, 0.0));
        let before_0 = sim.entities[0].position();

        sim.advance(1.0);

        let after_0 = sim.entities[0].position();
        assert!(after_0[0] != before_0[0]);
    }
}
