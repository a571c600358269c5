use crate::defaults::ZERO_MAGNITUDE_THRESHOLD;
use crate::scalar::Field;
use std::cmp::Ordering;

/// Total order over (global index, diagonal value) candidates.
///
/// Near-zero diagonal entries correspond to Pauli-forbidden or null-space
/// index combinations and must never seed a guess vector, so their key is
/// +inf and they collect at the end of every ranked list. Candidates whose
/// keys agree within a relative tolerance are ordered by global index,
/// which keeps the order total and identical on every rank.
pub fn compare<F: Field>(a: &(usize, F), b: &(usize, F)) -> Ordering {
    let difference: f64 = effective_key(b.1) - effective_key(a.1);
    let magnitude: f64 = a.1.abs() + b.1.abs();
    if difference > ZERO_MAGNITUDE_THRESHOLD * magnitude {
        Ordering::Less
    } else if difference < -(ZERO_MAGNITUDE_THRESHOLD * magnitude) {
        Ordering::Greater
    } else {
        // also reached when both keys are infinite and their difference
        // is NaN
        a.0.cmp(&b.0)
    }
}

fn effective_key<F: Field>(value: F) -> f64 {
    if value.abs() < ZERO_MAGNITUDE_THRESHOLD {
        f64::INFINITY
    } else {
        value.ranking_key()
    }
}
