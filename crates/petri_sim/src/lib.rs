pub mod draw;
pub mod emitter;
pub mod entity;
pub mod factory;
pub mod generator;
pub mod interaction;
pub mod particle;
pub mod primordial;
pub mod simulation;

pub use draw::{DebugOverlay, DrawData};
pub use emitter::Emitter;
pub use entity::{Entity, EntityCore, Finalizable, ForceSource, Peers, TickContext};
pub use factory::{create_particle, SpawnRequest};
pub use generator::{FieldGenerator, Generator};
pub use interaction::InteractionMatrix;
pub use particle::ForceParticle;
pub use primordial::PrimordialParticle;
pub use simulation::Simulation;
