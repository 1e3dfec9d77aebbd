use petri_core::Species;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::emitter::Emitter;
use crate::generator::{FieldGenerator, Generator};
use crate::interaction::InteractionMatrix;
use crate::particle::ForceParticle;
use crate::primordial::PrimordialParticle;

/// State shared by every entity kind.
#[derive(Debug, Clone)]
pub struct EntityCore {
    pub id: Uuid,
    pub position: [f64; 2],
    pub paused: bool,
    pub marked_for_deletion: bool,
    pub debug_view: bool,
}

impl EntityCore {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: [x, y],
            paused: false,
            marked_for_deletion: false,
            debug_view: false,
        }
    }
}

/// Commit phase of the two-phase tick. Kinds without this capability are
/// skipped by the simulation, not an error.
pub trait Finalizable {
    fn finish_tick(&mut self);
}

/// A body other force particles feel during the pairwise pass.
pub trait ForceSource {
    fn source_position(&self) -> [f64; 2];
    fn source_size(&self) -> f64;
    fn source_mass(&self) -> f64;
    fn source_scale(&self) -> f64;
    /// Signed coupling mod this source exerts toward `seeker`. May resolve
    /// and cache a previously unknown pairing.
    fn reflect_mod(&mut self, seeker: Species, seeker_mods: &InteractionMatrix) -> f64;
}

/// The rest of the entity list, split around the entity being ticked, so an
/// entity never sees itself and peers stay mutable for cache discovery and
/// field pushes.
pub struct Peers<'a> {
    pub before: &'a mut [Entity],
    pub after: &'a mut [Entity],
}

impl Peers<'_> {
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.before.iter_mut().chain(self.after.iter_mut())
    }
}

/// Shared per-tick state handed to each entity's compute phase.
pub struct TickContext<'a> {
    /// Soft border push strength, zero disables
    pub border_force: f64,
    /// Simulation-owned RNG (emitter spawn angles)
    pub rng: &'a mut ChaCha8Rng,
    /// Entities spawned mid-tick; appended after the pass so they are first
    /// scanned next tick
    pub spawned: &'a mut Vec<Entity>,
}

/// Everything the simulation owns and ticks. Capability accessors replace
/// inheritance: the tick loop asks whether an entity participates in a
/// concern, never which kind it is.
#[derive(Debug, Clone)]
pub enum Entity {
    Force(ForceParticle),
    Primordial(PrimordialParticle),
    Generator(Generator),
    Field(FieldGenerator),
    Emitter(Emitter),
}

impl Entity {
    fn core(&self) -> &EntityCore {
        match self {
            Self::Force(p) => &p.core,
            Self::Primordial(p) => &p.core,
            Self::Generator(g) => &g.core,
            Self::Field(f) => &f.core,
            Self::Emitter(e) => &e.core,
        }
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            Self::Force(p) => &mut p.core,
            Self::Primordial(p) => &mut p.core,
            Self::Generator(g) => &mut g.core,
            Self::Field(f) => &mut f.core,
            Self::Emitter(e) => &mut e.core,
        }
    }

    pub fn id(&self) -> Uuid {
        self.core().id
    }

    pub fn position(&self) -> [f64; 2] {
        self.core().position
    }

    pub fn is_paused(&self) -> bool {
        self.core().paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.core_mut().paused = paused;
    }

    pub fn toggle_paused(&mut self) {
        let core = self.core_mut();
        core.paused = !core.paused;
    }

    pub fn is_marked(&self) -> bool {
        self.core().marked_for_deletion
    }

    pub fn mark_for_deletion(&mut self) {
        self.core_mut().marked_for_deletion = true;
    }

    pub fn debug_view(&self) -> bool {
        self.core().debug_view
    }

    pub fn set_debug_view(&mut self, on: bool) {
        self.core_mut().debug_view = on;
    }

    /// Compute phase of the tick. Each kind consumes only what it needs
    /// from the context.
    pub fn tick(&mut self, mut peers: Peers<'_>, ctx: &mut TickContext<'_>) {
        match self {
            Self::Force(p) => p.tick(&mut peers, ctx.border_force),
            Self::Primordial(p) => p.tick(&mut peers),
            Self::Generator(g) => g.tick(),
            Self::Field(f) => f.tick(&mut peers),
            Self::Emitter(e) => e.tick(ctx.rng, ctx.spawned),
        }
    }

    /// The pairwise-force view of this entity, if it participates.
    pub fn force_source_mut(&mut self) -> Option<&mut dyn ForceSource> {
        match self {
            Self::Force(p) => Some(p),
            Self::Generator(g) => Some(g),
            Self::Emitter(e) => Some(e),
            Self::Primordial(_) | Self::Field(_) => None,
        }
    }

    /// Mutable velocity, for kinds a field generator can push.
    pub fn velocity_mut(&mut self) -> Option<&mut [f64; 2]> {
        match self {
            Self::Force(p) => Some(&mut p.velocity),
            Self::Primordial(p) => Some(&mut p.velocity),
            Self::Generator(g) => Some(&mut g.velocity),
            Self::Emitter(e) => Some(&mut e.velocity),
            Self::Field(_) => None,
        }
    }

    /// Commit-phase view, if the kind has one.
    pub fn as_finalizable_mut(&mut self) -> Option<&mut dyn Finalizable> {
        match self {
            Self::Force(p) => Some(p),
            Self::Primordial(p) => Some(p),
            Self::Generator(g) => Some(g),
            Self::Emitter(e) => Some(e),
            Self::Field(_) => None,
        }
    }
}
