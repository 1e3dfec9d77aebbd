//! JSON save/load for simulation state.
//!
//! Only plain force particles are persisted; primordial particles and the
//! auxiliary kinds (generators, fields, emitters) have no record format and
//! are dropped on save. Loading is permissive: malformed records and
//! unknown species tags are logged and skipped, missing optional fields
//! fall back to the species defaults. A missing save file fails the load as
//! a whole and leaves the current simulation untouched.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use petri_core::Species;
use petri_sim::{create_particle, Entity, Simulation, SpawnRequest};

/// Default directory save files live under.
pub const DATA_DIR: &str = "./data";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no save named '{0}'")]
    NotFound(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save file: {0}")]
    Format(#[from] serde_json::Error),
}

/// Complete simulation snapshot for save/load. Particle records are kept as
/// raw JSON values so one bad record cannot fail the whole file.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub lifetime: u64,
    pub particles: Vec<serde_json::Value>,
}

/// One persisted force particle. Everything past the species tag and the
/// position is optional on the way in.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticleRecord {
    #[serde(rename = "type")]
    pub species: String,
    pub pos: [f64; 2],
    #[serde(default)]
    pub velocity: Option<[f64; 2]>,
    #[serde(default)]
    pub mass: Option<f64>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub can_move: Option<bool>,
    #[serde(default)]
    pub paused: Option<bool>,
}

pub fn save(sim: &Simulation, name: &str) -> Result<PathBuf, StorageError> {
    save_in(sim, name, Path::new(DATA_DIR))
}

pub fn save_in(sim: &Simulation, name: &str, dir: &Path) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(dir)?;
    let snapshot = snapshot_of(sim)?;
    let path = save_path(dir, name);
    let data = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&path, data)?;
    Ok(path)
}

/// Replaces the simulation's entire entity collection with a saved state.
pub fn load(sim: &mut Simulation, name: &str) -> Result<usize, StorageError> {
    load_from(sim, name, Path::new(DATA_DIR))
}

pub fn load_from(sim: &mut Simulation, name: &str, dir: &Path) -> Result<usize, StorageError> {
    let path = save_path(dir, name);
    if !path.exists() {
        return Err(StorageError::NotFound(name.to_string()));
    }
    let data = fs::read_to_string(&path)?;
    // Parse fully before touching the simulation, so a broken file leaves
    // the current state intact.
    let snapshot: SimSnapshot = serde_json::from_str(&data)?;
    Ok(restore(sim, snapshot))
}

/// Collects the persistable entities of a simulation.
pub fn snapshot_of(sim: &Simulation) -> Result<SimSnapshot, StorageError> {
    let mut particles = Vec::new();
    for entity in &sim.entities {
        let Entity::Force(p) = entity else { continue };
        let record = ParticleRecord {
            species: p.species.tag().to_string(),
            pos: p.core.position,
            velocity: Some(p.velocity),
            mass: Some(p.mass),
            size: Some(p.size),
            can_move: Some(p.can_move),
            paused: Some(p.core.paused),
        };
        particles.push(serde_json::to_value(record)?);
    }
    Ok(SimSnapshot {
        lifetime: sim.lifetime,
        particles,
    })
}

/// Rebuilds the entity collection from a snapshot; returns how many
/// particles made it back in.
pub fn restore(sim: &mut Simulation, snapshot: SimSnapshot) -> usize {
    sim.clear();
    sim.lifetime = snapshot.lifetime;

    let mut restored = 0;
    for value in snapshot.particles {
        let record: ParticleRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping malformed particle record");
                continue;
            }
        };
        let Some(species) = Species::from_tag(&record.species) else {
            warn!(tag = record.species.as_str(), "skipping unknown species tag");
            continue;
        };

        for (field, missing) in [
            ("velocity", record.velocity.is_none()),
            ("mass", record.mass.is_none()),
            ("size", record.size.is_none()),
            ("can_move", record.can_move.is_none()),
            ("paused", record.paused.is_none()),
        ] {
            if missing {
                warn!(tag = species.tag(), field, "record missing field; using default");
            }
        }

        let mut request = SpawnRequest::new(species, record.pos);
        request.velocity = record.velocity;
        request.mass = record.mass;
        request.size = record.size;
        request.can_move = record.can_move;
        request.paused = record.paused;

        sim.add_entity(Entity::Force(create_particle(&request)));
        restored += 1;
    }
    restored
}

fn save_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use petri_sim::{FieldGenerator, PrimordialParticle};
    use serde_json::json;

    fn temp_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "petri_storage_{}_{}",
            label,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn sample_sim() -> Simulation {
        let mut sim = Simulation::new(3);
        sim.lifetime = 1234;

        let mut request = SpawnRequest::new(Species::Crimson, [0.25, -0.5]);
        request.velocity = Some([0.01, 0.02]);
        request.mass = Some(0.4);
        request.size = Some(0.009);
        request.can_move = Some(false);
        request.paused = Some(true);
        sim.add_entity(Entity::Force(create_particle(&request)));

        sim.add_entity(Entity::Force(create_particle(&SpawnRequest::new(
            Species::Magenta,
            [0.1, 0.1],
        ))));
        sim
    }

    #[test]
    fn round_trip_is_float_exact() {
        let dir = temp_dir("round_trip");
        let sim = sample_sim();
        save_in(&sim, "state", &dir).unwrap();

        let mut fresh = Simulation::new(99);
        let restored = load_from(&mut fresh, "state", &dir).unwrap();
        assert_eq!(restored, 2);
        assert_eq!(fresh.lifetime, 1234);
        assert_eq!(fresh.entity_count(), 2);

        let Entity::Force(a) = &fresh.entities[0] else {
            unreachable!()
        };
        assert_eq!(a.species, Species::Crimson);
        assert_eq!(a.core.position, [0.25, -0.5]);
        assert_eq!(a.velocity, [0.01, 0.02]);
        assert_eq!(a.mass, 0.4);
        assert_eq!(a.size, 0.009);
        assert!(!a.can_move);
        assert!(a.core.paused);

        let Entity::Force(b) = &fresh.entities[1] else {
            unreachable!()
        };
        assert_eq!(b.species, Species::Magenta);
        assert_eq!(b.mass, Species::Magenta.default_mass());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn only_force_particles_are_saved() {
        let mut sim = sample_sim();
        sim.add_entity(Entity::Primordial(PrimordialParticle::new(
            0.0, 0.0, 0.01, 180.0, 17.0, 0.25,
        )));
        sim.add_entity(Entity::Field(FieldGenerator::new(
            0.0,
            0.0,
            [0.01, 0.0],
            0.5,
        )));

        let snapshot = snapshot_of(&sim).unwrap();
        assert_eq!(snapshot.particles.len(), 2);
    }

    #[test]
    fn missing_save_leaves_state_untouched() {
        let dir = temp_dir("missing");
        let mut sim = sample_sim();

        let err = load_from(&mut sim, "nope", &dir).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
        assert_eq!(sim.entity_count(), 2);
        assert_eq!(sim.lifetime, 1234);
    }

    #[test]
    fn bad_records_are_skipped_but_good_ones_load() {
        let snapshot = SimSnapshot {
            lifetime: 7,
            particles: vec![
                json!({ "type": "azure", "pos": [0.1, 0.2] }),
                json!({ "type": "plutonium", "pos": [0.0, 0.0] }),
                json!({ "pos": [0.0, 0.0] }),
                json!("not even an object"),
            ],
        };

        let mut sim = Simulation::new(5);
        let restored = restore(&mut sim, snapshot);
        assert_eq!(restored, 1);
        assert_eq!(sim.lifetime, 7);

        // Missing fields fell back to species defaults.
        let Entity::Force(p) = &sim.entities[0] else {
            unreachable!()
        };
        assert_eq!(p.species, Species::Azure);
        assert_eq!(p.velocity, [0.0, 0.0]);
        assert_eq!(p.mass, Species::Azure.default_mass());
        assert!(p.can_move);
        assert!(!p.core.paused);
    }

    #[test]
    fn saved_file_matches_the_record_format() {
        let dir = temp_dir("format");
        let sim = sample_sim();
        let path = save_in(&sim, "fmt", &dir).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(raw["lifetime"], 1234);
        let first = &raw["particles"][0];
        assert_eq!(first["type"], "crimson");
        assert_eq!(first["pos"][0], 0.25);
        assert_eq!(first["velocity"][1], 0.02);
        assert_eq!(first["mass"], 0.4);
        assert_eq!(first["size"], 0.009);
        assert_eq!(first["can_move"], false);
        assert_eq!(first["paused"], true);

        let _ = fs::remove_dir_all(&dir);
    }
}
