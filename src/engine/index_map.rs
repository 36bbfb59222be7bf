//! Conversion between continuous track positions and discrete timestep
//! indices. Positions are normalized to `[0, 1]` over the trajectory's
//! drawable extent; all inputs are clamped rather than rejected, since
//! pointer coordinates routinely land outside the extent mid-drag.

// Absorbs float drift when a position produced by `to_position` is mapped
// back to an index; without it `i / L * L` can floor to `i - 1`.
const INDEX_EPS: f64 = 1e-9;

/// Maps a normalized position to a timestep index usable as an inclusive
/// lower bound, clamped to `[0, length - 1]`.
pub fn to_index(position: f64, length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    let raw = (position * length as f64 + INDEX_EPS).floor();
    raw.clamp(0.0, (length - 1) as f64) as usize
}

/// Maps a normalized position to a timestep index usable as an exclusive
/// upper bound, clamped to `[0, length]`. A position at or beyond 1.0 maps
/// to `length` so the final segment can cover the last timestep.
pub fn to_index_end(position: f64, length: usize) -> usize {
    let raw = (position * length as f64 + INDEX_EPS).floor();
    raw.clamp(0.0, length as f64) as usize
}

/// Inverse mapping used when reconstructing marker positions from saved
/// indices.
pub fn to_position(index: usize, length: usize) -> f64 {
    if length == 0 {
        return 0.0;
    }
    index as f64 / length as f64
}
