//! HTTP request bodies and response envelopes.

mod requests;
mod response;
mod results;

pub use requests::*;
pub use response::*;
pub use results::*;
