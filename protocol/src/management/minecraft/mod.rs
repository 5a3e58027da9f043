mod ban;
mod player;
mod plugin;
mod world;

pub use ban::*;
pub use player::*;
pub use plugin::*;
pub use world::*;
