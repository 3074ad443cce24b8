mod keys;
mod mesh;
mod outline;
mod random;

pub use keys::{KeyTrack, KeyTrackSettings, MAX_WALK_SLOPES, MAX_WINDOW_SAMPLES};
pub use mesh::{MesherSettings, SlopeCurve, SlopeMesher};
pub use outline::extract_outline;
pub use random::PositionalRng;

#[cfg(test)]
mod tests;
