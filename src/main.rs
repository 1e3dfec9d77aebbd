//! Headless driver: builds a scene from `SimConfig`, runs it for a fixed
//! number of ticks and saves the final state. A windowed frontend would
//! drive the same three entry points (`advance`, `draw_data`, save/load).

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use petri_core::{SimConfig, Species};
use petri_physics::Oscillator;
use petri_sim::{
    create_particle, Emitter, Entity, Generator, PrimordialParticle, Simulation, SpawnRequest,
};

const TICKS: u64 = 2_000;
const PROGRESS_INTERVAL: u64 = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SimConfig::default();
    let mut sim = build_scene(&config);

    info!(
        entities = sim.entity_count(),
        ticks = TICKS,
        seed = config.seed,
        "starting simulation"
    );

    for _ in 0..TICKS {
        sim.advance(1.0);
        if sim.lifetime % PROGRESS_INTERVAL == 0 {
            info!(
                tick = sim.lifetime,
                entities = sim.entity_count(),
                "progress"
            );
        }
    }

    match petri_storage::save(&sim, "last_run") {
        Ok(path) => info!(path = %path.display(), "saved final state"),
        Err(err) => error!(%err, "failed to save final state"),
    }
}

fn build_scene(config: &SimConfig) -> Simulation {
    let mut sim = Simulation::new(config.seed);
    sim.border_force = config.border_force;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    for species in Species::ALL {
        for _ in 0..config.particles_per_species {
            let x = rng.gen_range(-0.85..0.85);
            let y = rng.gen_range(-0.85..0.85);
            sim.add_entity(Entity::Force(create_particle(&SpawnRequest::new(
                species,
                [x, y],
            ))));
        }
    }

    for _ in 0..config.primordial_count {
        let x = rng.gen_range(-0.85..0.85);
        let y = rng.gen_range(-0.85..0.85);
        let mut particle = PrimordialParticle::new(
            x,
            y,
            config.primordial_speed,
            config.primordial_alpha_deg,
            config.primordial_beta_deg,
            config.primordial_vision,
        );
        particle.size = config.primordial_size;
        sim.add_entity(Entity::Primordial(particle));
    }

    // A slow pulsing generator at the origin keeps the mix stirred.
    let mut generator = Generator::new(0.0, 0.0, 0.02, 0.0);
    generator.can_move = false;
    generator.oscillator = Some(Oscillator::new(0.6, 0.05, 0.0));
    sim.add_entity(Entity::Generator(generator));

    // A corner emitter feeds in a trickle of magenta particles.
    let mut emitter = Emitter::new(0.5, 0.5, Species::Magenta, 0.05);
    emitter.limit = Some(25);
    emitter.spawn_lifespan = Some(1_000);
    sim.add_entity(Entity::Emitter(emitter));

    sim
}
