use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::CoreError;

/// An immutable complex number with two `f64` components.
///
/// Every operation returns a new value. Equality is exact structural
/// equality of the two fields; nothing is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Euclidean magnitude, `√(re² + im²)`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// `1 / self`, or `None` for zero.
    pub fn recip(self) -> Option<Self> {
        let d = self.norm_sq();
        if d == 0.0 {
            return None;
        }
        Some(Self::new(self.re / d, -self.im / d))
    }

    /// Raise to a positive integer power by repeated multiplication.
    ///
    /// `pow(1)` returns `self` unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `exp == 0`. Use [`try_pow`](Self::try_pow) when the
    /// exponent comes from untrusted input.
    #[inline]
    pub fn pow(self, exp: u32) -> Self {
        assert!(exp >= 1, "Complex::pow requires exp >= 1, got {exp}");
        let mut product = self;
        for _ in 1..exp {
            product = product * self;
        }
        product
    }

    /// Checked variant of [`pow`](Self::pow).
    pub fn try_pow(self, exp: u32) -> crate::Result<Self> {
        if exp == 0 {
            return Err(CoreError::InvalidExponent(exp));
        }
        Ok(self.pow(exp))
    }

    /// Display adapter that prints negative imaginary parts as `a-bi`.
    ///
    /// The plain [`Display`](fmt::Display) impl keeps the legacy `a+-bi` form.
    pub fn signed(&self) -> Signed<'_> {
        Signed(self)
    }
}

// -- Arithmetic operators --

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

/// Adds a real scalar; the imaginary part is unchanged.
impl Add<f64> for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self {
            re: self.re + rhs,
            im: self.im,
        }
    }
}

impl Add<Complex> for f64 {
    type Output = Complex;

    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        rhs + self
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

/// Scalar multiplication: both components are scaled.
impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self {
            re: self.re * rhs,
            im: self.im * rhs,
        }
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

// -- Formatting --

// `{:?}` on f64 always keeps a fractional digit ("2.0", not "2").

/// The legacy `a+bi` form: `0.0` for zero, a bare real or imaginary part when
/// the other is zero, and a literal `+` joiner even before a negative
/// imaginary part (`1.0+-2.0i`).
///
/// Only that layout is fixed. Each part is printed with Rust's `{:?}`, which
/// switches to exponent notation below `1e-4` and from `1e16` up, written
/// as `1e-5` or `1e20` with no `.0` mantissa or uppercase `E`.
impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.re == 0.0, self.im == 0.0) {
            (true, true) => f.write_str("0.0"),
            (true, false) => write!(f, "{:?}i", self.im),
            (false, true) => write!(f, "{:?}", self.re),
            (false, false) => write!(f, "{:?}+{:?}i", self.re, self.im),
        }
    }
}

/// See [`Complex::signed`].
pub struct Signed<'a>(&'a Complex);

impl fmt::Display for Signed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let z = self.0;
        if z.re == 0.0 || z.im == 0.0 || z.im > 0.0 {
            return fmt::Display::fmt(z, f);
        }
        write!(f, "{:?}-{:?}i", z.re, -z.im)
    }
}
