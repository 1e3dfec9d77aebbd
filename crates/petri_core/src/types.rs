use serde::{Deserialize, Serialize};

/// Particle species. Species decide default body parameters, draw color and
/// the seed interaction mods a particle starts out knowing; everything else
/// about a pairing is discovered at runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Crimson,
    Emerald,
    Azure,
    Amber,
    Magenta,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Self::Crimson,
        Self::Emerald,
        Self::Azure,
        Self::Amber,
        Self::Magenta,
    ];

    /// Stable tag used as the species key in save files.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Crimson => "crimson",
            Self::Emerald => "emerald",
            Self::Azure => "azure",
            Self::Amber => "amber",
            Self::Magenta => "magenta",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    /// Draw color for this species [r, g, b]
    pub fn color(&self) -> [u8; 3] {
        match self {
            Self::Crimson => [255, 0, 0],
            Self::Emerald => [0, 255, 0],
            Self::Azure => [0, 0, 255],
            Self::Amber => [220, 160, 10],
            Self::Magenta => [200, 20, 120],
        }
    }

    pub fn default_size(&self) -> f64 {
        match self {
            Self::Crimson => 0.008,
            Self::Emerald => 0.007,
            Self::Azure => 0.0055,
            Self::Amber => 0.0035,
            Self::Magenta => 0.004,
        }
    }

    pub fn default_mass(&self) -> f64 {
        match self {
            Self::Crimson => 0.1,
            Self::Emerald => 0.085,
            Self::Azure => 0.06,
            Self::Amber => 0.03,
            Self::Magenta => 0.005,
        }
    }

    /// Interaction mods this species starts out knowing. Pairings absent
    /// here are resolved lazily on first encounter.
    pub fn seed_mods(&self) -> &'static [(Species, f64)] {
        match self {
            Self::Crimson => &[
                (Self::Crimson, -0.8),
                (Self::Emerald, 1.5),
                (Self::Azure, -1.5),
            ],
            Self::Emerald => &[
                (Self::Crimson, -1.2),
                (Self::Emerald, 1.5),
                (Self::Azure, 1.25),
            ],
            Self::Azure => &[
                (Self::Crimson, -0.75),
                (Self::Emerald, -0.8),
                (Self::Azure, 1.2),
            ],
            Self::Amber => &[
                (Self::Crimson, 0.125),
                (Self::Emerald, -0.3),
                (Self::Azure, -0.05),
                (Self::Amber, 0.15),
            ],
            Self::Magenta => &[(Self::Amber, 1.0), (Self::Magenta, -0.25)],
        }
    }
}
