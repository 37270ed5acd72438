//! Stopwatch display formatting.

use rand::Rng;

use chronoguard_core::constants::{GLITCH_CHARSET, GLITCH_LENGTH, GLITCH_PROBABILITY};

/// Format seconds as the zero-padded `SS.hh` readout (`"03.00"`).
pub fn format_seconds(seconds: f64) -> String {
    format!("{:05.2}", seconds)
}

/// Format seconds, corrupting the readout with a fixed probability when
/// `glitched` is set. Only presentation is affected.
pub fn format_display<R: Rng + ?Sized>(seconds: f64, glitched: bool, rng: &mut R) -> String {
    if glitched && rng.gen_bool(GLITCH_PROBABILITY) {
        return glitch_string(rng);
    }
    format_seconds(seconds)
}

fn glitch_string<R: Rng + ?Sized>(rng: &mut R) -> String {
    let charset = GLITCH_CHARSET.as_bytes();
    (0..GLITCH_LENGTH)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}
