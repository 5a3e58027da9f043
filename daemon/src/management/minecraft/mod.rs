mod lines;
mod tps;

pub use lines::*;
pub use tps::*;
