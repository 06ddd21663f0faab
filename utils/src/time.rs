//! Duration formatting for log lines and CLI output.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render `secs` using its two most significant non-zero units
/// (`4s`, `1m 30s`, `1h`, `2d 3h`).
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let mut rest = secs;
    let mut parts = Vec::with_capacity(2);
    for (size, suffix) in UNITS {
        let count = rest / size;
        rest %= size;
        if count > 0 {
            parts.push(format!("{count}{suffix}"));
        }
    }
    parts.truncate(2);
    parts.join(" ")
}
