pub mod minecraft;
pub mod server;
