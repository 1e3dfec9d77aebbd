// Simulation-scaled units: world coordinates span roughly [-1, 1] on both
// axes and one tick is one logical time step. Masses and sizes are chosen
// so that the default interaction mods produce visible motion within a few
// hundred ticks.

/// Hard wall applied to positions after integration.
pub const BORDER_CLAMP: f64 = 0.975;

/// Half-extent of the square whose walls exert the soft border push.
pub const BORDER_WALL: f64 = 1.1;

/// Default strength of the soft border push. Zero disables the push; the
/// hard clamp still holds.
pub const BORDER_FORCE: f64 = 0.0;

/// Multiplier applied to close-range repulsion.
pub const REPEL_FACTOR: f64 = 50.0;

/// Sum-of-sizes multiplier below which the repulsion regime applies.
pub const REPEL_RANGE: f64 = 1.9;

/// Mass scale folded into every pairwise force.
pub const SIZE_SCALE: f64 = 0.01;

/// Forces with a magnitude below this are treated as exactly zero.
pub const MIN_FORCE: f64 = 5e-6;

/// Guard against blow-up when two bodies overlap exactly.
pub const DIST_EPSILON: f64 = 1e-6;

/// Velocity carry-over per tick; 1.0 means frictionless.
pub const FRICTION: f64 = 1.0;

/// Positions retained in a trail by default.
pub const TRAIL_CAPACITY: usize = 150;

/// Ticks between trail samples.
pub const TRAIL_INTERVAL: u32 = 2;
