use std::str::FromStr;
use std::time::Duration;

/// Wrapper type to parse durations with optional unit suffixes (e.g. 500ms, 0.2s, 1m).
///
/// A bare number is taken as milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationArg(pub Duration);

impl FromStr for DurationArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace('_', "");
        let lower = s.to_ascii_lowercase();
        let (num_str, millis_per_unit) = parse_with_suffix(&lower);
        let num: f64 = num_str
            .parse()
            .map_err(|_| format!("Invalid duration: {s}"))?;
        let nanos = (num * millis_per_unit * 1_000_000.0).round();
        if !nanos.is_finite() || nanos < 0.0 || nanos > u64::MAX as f64 {
            return Err(format!("Duration out of range: {s}"));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let nanos = nanos as u64;
        Ok(Self(Duration::from_nanos(nanos)))
    }
}

impl From<DurationArg> for Duration {
    fn from(arg: DurationArg) -> Self {
        arg.0
    }
}

fn parse_with_suffix(s: &str) -> (&str, f64) {
    // Longest suffixes first so "ms" is not read as "s".
    const SUFFIXES: &[(&[&str], f64)] = &[
        (&["ms", "msec"], 1.0),
        (&["min", "m"], 60_000.0),
        (&["sec", "s"], 1000.0),
    ];
    for (suffixes, multiplier) in SUFFIXES {
        for suffix in *suffixes {
            if let Some(stripped) = s.strip_suffix(suffix) {
                return (stripped.trim(), *multiplier);
            }
        }
    }
    (s, 1.0)
}
