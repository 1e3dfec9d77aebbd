use petri_core::Species;

use crate::particle::ForceParticle;

/// Spawn parameters for a force particle. Unset fields fall back to the
/// species defaults.
#[derive(Debug, Clone)]
pub struct SpawnRequest {
    pub species: Species,
    pub position: [f64; 2],
    pub mass: Option<f64>,
    pub size: Option<f64>,
    pub velocity: Option<[f64; 2]>,
    pub can_move: Option<bool>,
    pub paused: Option<bool>,
}

impl SpawnRequest {
    pub fn new(species: Species, position: [f64; 2]) -> Self {
        Self {
            species,
            position,
            mass: None,
            size: None,
            velocity: None,
            can_move: None,
            paused: None,
        }
    }
}

/// Builds a force particle from a request.
pub fn create_particle(request: &SpawnRequest) -> ForceParticle {
    let mut particle =
        ForceParticle::new(request.species, request.position[0], request.position[1]);
    if let Some(mass) = request.mass {
        particle.mass = mass;
    }
    if let Some(size) = request.size {
        particle.size = size;
    }
    if let Some(velocity) = request.velocity {
        particle.velocity = velocity;
    }
    if let Some(can_move) = request.can_move {
        particle.can_move = can_move;
    }
    if let Some(paused) = request.paused {
        particle.core.paused = paused;
    }
    particle
}
