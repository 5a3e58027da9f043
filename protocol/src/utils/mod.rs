mod size;

pub use size::*;
