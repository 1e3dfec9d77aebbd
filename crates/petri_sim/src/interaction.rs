use std::collections::BTreeMap;

use petri_core::Species;
use tracing::info;

/// Per-particle mapping from species tag to the signed coupling scalar the
/// owner exerts toward that species. Seeded from the owner's species table;
/// pairings absent from the seed are resolved on first encounter and cached
/// for good.
#[derive(Debug, Clone, Default)]
pub struct InteractionMatrix {
    mods: BTreeMap<Species, f64>,
}

impl InteractionMatrix {
    pub fn seeded(species: Species) -> Self {
        Self {
            mods: species.seed_mods().iter().copied().collect(),
        }
    }

    pub fn get(&self, toward: Species) -> Option<f64> {
        self.mods.get(&toward).copied()
    }

    pub fn insert(&mut self, toward: Species, value: f64) {
        self.mods.insert(toward, value);
    }

    /// Coupling the owner of this matrix exerts toward `seeker`.
    ///
    /// An unknown pairing borrows the seeker's recorded mod for `owner`
    /// when it has one (zero otherwise) and caches the result, so a pairing
    /// keeps whatever value it was first resolved to.
    pub fn resolve_reflect(
        &mut self,
        owner: Species,
        seeker: Species,
        seeker_mods: &InteractionMatrix,
    ) -> f64 {
        if let Some(value) = self.get(seeker) {
            return value;
        }
        let value = seeker_mods.get(owner).unwrap_or(0.0);
        self.mods.insert(seeker, value);
        info!(
            owner = owner.tag(),
            seeker = seeker.tag(),
            value,
            "discovered interaction pairing"
        );
        value
    }
}
