use ndarray::{LinalgScalar, ScalarOperand};
use num_complex::Complex64;
use num_traits::{One, Zero};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::fmt::{Debug, Display};
use std::ops::{AddAssign, MulAssign, Neg, SubAssign};

/// Scalar field of the excitation-amplitude tensors. The preconditioner is
/// generic over this trait so that real and complex similarity-transformed
/// Hamiltonians share one implementation.
pub trait Field:
    LinalgScalar
    + ScalarOperand
    + Zero
    + One
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + PartialEq
    + Debug
    + Display
    + Send
    + Sync
    + 'static
{
    /// Complex conjugate; the identity for real scalars.
    fn conj(self) -> Self;

    /// Magnitude of the scalar.
    fn abs(self) -> f64;

    /// Real part of the scalar.
    fn re(self) -> f64;

    /// The real key under which diagonal candidates are ordered. Real
    /// scalars are compared by value, complex ones by the sum of real and
    /// imaginary part.
    fn ranking_key(self) -> f64;

    /// Embeds a real number into the field.
    fn from_re(x: f64) -> Self;

    /// Draws one Gaussian sample; complex scalars sample both parts
    /// independently.
    fn gaussian<R: Rng + ?Sized>(rng: &mut R, normal: &Normal<f64>) -> Self;
}

impl Field for f64 {
    fn conj(self) -> Self {
        self
    }

    fn abs(self) -> f64 {
        f64::abs(self)
    }

    fn re(self) -> f64 {
        self
    }

    fn ranking_key(self) -> f64 {
        self
    }

    fn from_re(x: f64) -> Self {
        x
    }

    fn gaussian<R: Rng + ?Sized>(rng: &mut R, normal: &Normal<f64>) -> Self {
        normal.sample(rng)
    }
}

impl Field for Complex64 {
    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    fn abs(self) -> f64 {
        self.norm()
    }

    fn re(self) -> f64 {
        self.re
    }

    fn ranking_key(self) -> f64 {
        self.re + self.im
    }

    fn from_re(x: f64) -> Self {
        Complex64::new(x, 0.0)
    }

    fn gaussian<R: Rng + ?Sized>(rng: &mut R, normal: &Normal<f64>) -> Self {
        Complex64::new(normal.sample(rng), normal.sample(rng))
    }
}
