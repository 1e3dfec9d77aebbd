use serde::{Deserialize, Serialize};

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Random seed for deterministic scene setup
    pub seed: u64,
    /// Force particles spawned per species
    pub particles_per_species: u32,
    /// Primordial particles spawned
    pub primordial_count: u32,
    /// Primordial neighborhood radius
    pub primordial_vision: f64,
    /// Primordial speed, applied on both axes
    pub primordial_speed: f64,
    /// Primordial fixed turn per tick, degrees
    pub primordial_alpha_deg: f64,
    /// Primordial neighbor-scaled turn per tick, degrees
    pub primordial_beta_deg: f64,
    /// Primordial body size
    pub primordial_size: f64,
    /// Soft border push strength (0.0 disables)
    pub border_force: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            particles_per_species: 12,
            primordial_count: 50,
            primordial_vision: 0.25,
            primordial_speed: 0.0175,
            primordial_alpha_deg: 180.0,
            primordial_beta_deg: 17.0,
            primordial_size: 0.012,
            border_force: 0.0,
        }
    }
}
