pub mod border;
pub mod forces;
pub mod oscillator;

pub use oscillator::Oscillator;
