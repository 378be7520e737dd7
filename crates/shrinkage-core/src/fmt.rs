//! Human-readable formatting helpers for the final report lines.

/// Format byte count as human-readable IEC size.
///
/// `"1.5 GiB"`, `"100.3 MiB"`, `"50.0 KiB"`, `"512 B"`
pub fn format_bytes(bytes: u64) -> String {
    let f = bytes as f64;
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1} GiB", f / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", f / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", f / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
