//! Milliunit amounts and display conversion.

/// Signed currency amount in thousandths of a unit.
pub type Milliunits = i64;

/// Milliunits in one currency unit.
pub const MILLIUNITS_PER_UNIT: i64 = 1000;

/// Convert milliunits to a display float.
///
/// Sign is preserved: `-45670` becomes `-45.67`.
pub fn milliunits_to_float(milliunits: Milliunits) -> f64 {
    milliunits as f64 / MILLIUNITS_PER_UNIT as f64
}

/// Convert a display float to milliunits.
///
/// Rounds half away from zero, so inputs whose binary representation sits a
/// hair below the intended value (`10.1 * 1000 = 10099.999…`) still land on
/// the intended milliunit. Values outside the `i64` range saturate.
pub fn float_to_milliunits(amount: f64) -> Milliunits {
    (amount * MILLIUNITS_PER_UNIT as f64).round() as Milliunits
}
