//! Result rendering for the two output formats.

use shrinkage_core::fmt::format_bytes;
use shrinkage_core::EstimationResult;

/// Final report lines: uncompressed total, then mean compressed size
/// with standard deviation, each as human units plus the exact count.
pub fn render_human(result: &EstimationResult) {
    println!(
        "uncompressed: {} ({} bytes)",
        format_bytes(result.uncompressed_size),
        result.uncompressed_size
    );

    // display rounds to whole bytes; the stored values stay unrounded
    let mean = result.mean.round() as u64;
    let stddev = result.stddev.round() as u64;
    println!(
        "compressed: {} ({} bytes) ± {} ({} bytes), {} samples",
        format_bytes(mean),
        mean,
        format_bytes(stddev),
        stddev,
        result.samples.len()
    );
}

pub fn render_json(result: &EstimationResult) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
