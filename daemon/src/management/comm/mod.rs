mod process;
mod process_helper;

pub use process::*;
pub use process_helper::ProcessHelper;
