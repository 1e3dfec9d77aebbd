use uuid::Uuid;

use crate::entity::Entity;
use crate::particle::ForceLine;

/// Per-entity snapshot consumed by an external renderer. A pure function
/// of current entity state; querying it has no side effects.
#[derive(Debug, Clone)]
pub struct DrawData {
    pub id: Uuid,
    pub position: [f64; 2],
    pub size: f64,
    pub color: [u8; 3],
    /// Field generators are invisible outside debug view
    pub visible: bool,
    pub debug: Option<DebugOverlay>,
    /// Past positions, oldest first; present while trailing is enabled
    pub trail: Option<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone)]
pub enum DebugOverlay {
    /// Lines to each peer the entity felt a force from
    ForceLines(Vec<ForceLine>),
    /// Neighborhood summary of a primordial particle
    Neighborhood { count: u32, vision_radius: f64 },
    /// Field extent circle
    FieldRange { range: f64 },
}

impl Entity {
    pub fn draw_data(&self) -> DrawData {
        match self {
            Self::Force(p) => DrawData {
                id: p.core.id,
                position: p.core.position,
                size: p.size,
                color: p.species.color(),
                visible: true,
                debug: p
                    .core
                    .debug_view
                    .then(|| DebugOverlay::ForceLines(p.force_lines.clone())),
                trail: p
                    .trail_enabled
                    .then(|| p.trail.iter().copied().collect()),
            },
            Self::Primordial(p) => DrawData {
                id: p.core.id,
                position: p.core.position,
                size: p.size,
                color: p.color(),
                visible: true,
                debug: p.core.debug_view.then(|| DebugOverlay::Neighborhood {
                    count: p.neighbor_count,
                    vision_radius: p.vision_radius,
                }),
                trail: None,
            },
            Self::Generator(g) => DrawData {
                id: g.core.id,
                position: g.core.position,
                size: g.size,
                color: g.color(),
                visible: true,
                debug: None,
                trail: None,
            },
            Self::Field(f) => DrawData {
                id: f.core.id,
                position: f.core.position,
                size: f.size,
                color: [0, 0, 0],
                visible: false,
                debug: f
                    .core
                    .debug_view
                    .then(|| DebugOverlay::FieldRange { range: f.range }),
                trail: None,
            },
            Self::Emitter(e) => DrawData {
                id: e.core.id,
                position: e.core.position,
                size: e.size,
                color: [200, 200, 240],
                visible: true,
                debug: None,
                trail: None,
            },
        }
    }
}
