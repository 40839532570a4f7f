/// Absolute tolerance absorbed by [`tolerant_less`].
pub const PRECISION: f32 = 0.001;

/// `a < b` only when `b` exceeds `a` by more than [`PRECISION`].
///
/// Docking scores are printed with limited precision, so differences below the tolerance are
/// treated as round-off rather than as an ordering.
#[inline]
pub fn tolerant_less(a: f32, b: f32) -> bool {
    b - a > PRECISION
}
