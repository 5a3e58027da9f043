mod server_report;
mod system_info;

pub use server_report::*;
pub use system_info::*;
