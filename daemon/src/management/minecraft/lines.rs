use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref DONE_PATTERN: Regex =
        Regex::new(r#"Done \(\d+(?:\.\d+)?s\)! For help, type ["']help["']"#)
            .expect("Failed to compile DONE_PATTERN regex");
    // §-codes and ANSI escapes, as emitted by Paper's console
    static ref FORMATTING_PATTERN: Regex = Regex::new(r"§[0-9a-fk-orA-FK-OR]|\x1b\[[0-9;]*[A-Za-z]")
        .expect("Failed to compile FORMATTING_PATTERN regex");
    // only the server's own log line, never chat or `say` output
    static ref STOPPING_PATTERN: Regex = Regex::new(r"^\[[\d:]+ INFO\]: Stopping the server$")
        .expect("Failed to compile STOPPING_PATTERN regex");
}

/// The ready banner, e.g. `Done (12.345s)! For help, type "help"`.
pub fn is_done_line(line: &str) -> bool {
    DONE_PATTERN.is_match(&strip_formatting(line))
}

pub fn is_stopping_line(line: &str) -> bool {
    STOPPING_PATTERN.is_match(strip_formatting(line).trim_end())
}

pub fn strip_formatting(line: &str) -> Cow<'_, str> {
    FORMATTING_PATTERN.replace_all(line, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_variants() {
        assert!(is_done_line(
            r#"[12:00:01 INFO]: Done (5.321s)! For help, type "help""#
        ));
        assert!(is_done_line("Done (12s)! For help, type 'help'"));
        assert!(is_done_line(
            "\x1b[0m[12:00:01 INFO]: Done (0.9s)! For help, type \"help\"\x1b[m"
        ));
        assert!(!is_done_line("[12:00:00 INFO]: Preparing spawn area: 84%"));
    }

    #[test]
    fn only_the_server_announces_stopping() {
        assert!(is_stopping_line("[12:00:09 INFO]: Stopping the server"));
        assert!(is_stopping_line("\x1b[0m[12:00:09 INFO]: Stopping the server\x1b[m\r"));
        assert!(!is_stopping_line("[12:00:03 INFO]: <Steve> Stopping the server lol"));
        assert!(!is_stopping_line("[12:00:03 INFO]: <Steve> Stopping the server"));
        assert!(!is_stopping_line("[12:00:03 INFO]: [Server] Stopping the server"));
    }

    #[test]
    fn formatting_is_removed() {
        assert_eq!(
            strip_formatting("§6TPS from last 1m: §a20.0\x1b[0m"),
            "TPS from last 1m: 20.0"
        );
    }
}
