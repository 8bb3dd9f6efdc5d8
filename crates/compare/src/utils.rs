use std::time::Duration;

/// Environment variable controlling log level
pub const GPCOMPARE_LOG: &str = "GPCOMPARE_LOG";

/// Formats a duration as `MMm  SSs` from one minute on, as fractional seconds below
pub fn format_elapsed(elapsed: Duration) -> String {
    let t = elapsed.as_secs_f64();
    let minutes = (t / 60.).floor();
    if minutes >= 1. {
        let seconds = (t - minutes * 60.).ceil();
        format!("{:>2}m  {:>2}s", minutes as u64, seconds as u64)
    } else {
        format!("{t}s")
    }
}
