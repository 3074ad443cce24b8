mod plugin;
mod systems;
mod types;
mod ui;

pub use plugin::TerrainPlugin;
pub use types::TerrainState;
