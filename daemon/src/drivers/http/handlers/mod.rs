pub mod players;
pub mod server;
pub mod system;
pub mod worlds;

use paperdash_protocol::api::CommandArg;

use super::ApiError;

/// A present, non-blank argument or a 400 with `message`.
fn required(arg: Option<CommandArg>, message: &str) -> Result<CommandArg, ApiError> {
    match arg {
        Some(arg) if !arg.is_blank() => single_line(arg),
        _ => Err(ApiError::bad_request(message)),
    }
}

/// Console input is line based, so an embedded line break would smuggle in
/// a second command.
fn single_line<T: AsRef<str>>(value: T) -> Result<T, ApiError> {
    if value.as_ref().contains(['\n', '\r']) {
        return Err(ApiError::bad_request("Line breaks are not allowed"));
    }
    Ok(value)
}
