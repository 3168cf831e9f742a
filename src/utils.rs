//! Small parsing and timing helpers shared by the binary and the app loop.

use crate::{Error, Result};
use std::time::Duration;

/// Parse a `WIDTHxHEIGHT` size such as `1920x1080`
///
/// # Errors
///
/// Returns `InvalidInput` if the string is malformed or either side is zero
pub fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| Error::InvalidInput(format!("Expected WIDTHxHEIGHT, got '{value}'")))?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|e| Error::InvalidInput(format!("Invalid width '{width}': {e}")))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|e| Error::InvalidInput(format!("Invalid height '{height}': {e}")))?;

    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!("Size must be non-zero, got {width}x{height}")));
    }
    Ok((width, height))
}

/// Time budget of one frame at `fps` (0 is treated as 1)
pub fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}
