mod report;
mod system_info;

pub use report::*;
pub use system_info::*;
