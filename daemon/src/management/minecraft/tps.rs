use super::strip_formatting;
use lazy_static::lazy_static;
use paperdash_protocol::management::server::TpsSample;
use regex::Regex;

lazy_static! {
    // `*20.0` marks a value capped by the server
    pub static ref TPS_PATTERN: Regex = Regex::new(
        r"TPS from last 1m, 5m, 15m:\s*\*?([\d.]+),\s*\*?([\d.]+),\s*\*?([\d.]+)"
    )
    .expect("Failed to compile TPS_PATTERN regex");
}

/// Parses the answer to Paper's `tps` command.
pub fn parse_tps(output: &str) -> Option<TpsSample> {
    let clean = strip_formatting(output);
    let caps = TPS_PATTERN.captures(&clean)?;
    let value = |i: usize| caps.get(i)?.as_str().parse::<f64>().ok();

    Some(TpsSample {
        tps1m: value(1)?,
        tps5m: value(2)?,
        tps15m: value(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_colored_paper_output() {
        let line = "[12:00:00 INFO]: §6TPS from last 1m, 5m, 15m: §a*20.0, §a19.97, §e17.5";
        assert_eq!(
            parse_tps(line),
            Some(TpsSample {
                tps1m: 20.0,
                tps5m: 19.97,
                tps15m: 17.5
            })
        );
    }

    #[test]
    fn finds_the_answer_among_other_lines() {
        let output = "[COMMAND] tps\nPlayer joined\nTPS from last 1m, 5m, 15m: 20.0, 20.0, 20.0";
        assert_eq!(parse_tps(output).map(|t| t.tps15m), Some(20.0));
        assert_eq!(parse_tps("Unknown command"), None);
    }
}
