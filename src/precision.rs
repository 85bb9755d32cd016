// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Numerical constants and the double-double accumulator.

Several of the recurrences in this crate (exponential partial sums, the
incomplete-gamma series, the Pochhammer polynomials) suffer from
cancellation when accumulated in plain `f64`. They instead accumulate in
[`Dd`], an unevaluated sum of two `f64`s giving roughly 106 bits of
significand, and round back to `f64` at the end.

*/

use std::f64;
use std::ops::{Add, Div, Mul, Neg, Sub};


/// Magnitude above which continued-fraction convergents are rescaled.
pub const LARGE: f64 = 4294967296.; // 2^32

/// The power of two applied when rescaling; multiplying by `2^SCALE_EXP` is
/// exact.
pub const SCALE_EXP: i32 = -32;

/// The finite value returned in place of an overflow.
pub const OVERFLOW_SENTINEL: f64 = 0.9 * f64::MAX;

/// The working epsilon for convergence tests.
pub const EPSILON: f64 = f64::EPSILON;

/// Multiply by `2^exp` exactly (barring under/overflow).
#[inline]
pub fn ldexp(x: f64, exp: i32) -> f64 {
    x * 2f64.powi(exp)
}

/// Is `x` zero, in the sense that it cannot be distinguished from zero at
/// unit scale?
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < f64::MIN_POSITIVE
}

/// Are `a` and `b` equal within a few units in the last place?
pub fn approx_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }

    let scale = a.abs().max(b.abs());
    (a - b).abs() <= 4. * EPSILON * scale
}

/// Clamp a value into `[-OVERFLOW_SENTINEL, OVERFLOW_SENTINEL]`, leaving NaN
/// alone.
#[inline]
pub fn clamp_sentinel(x: f64) -> f64 {
    if x > OVERFLOW_SENTINEL {
        OVERFLOW_SENTINEL
    } else if x < -OVERFLOW_SENTINEL {
        -OVERFLOW_SENTINEL
    } else {
        x
    }
}


/// A double-double number: the unevaluated sum `hi + lo` with
/// `|lo| <= ulp(hi)/2`.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct Dd {
    hi: f64,
    lo: f64,
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    (s, (a - (s - bb)) + (b - bb))
}

#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    (s, b - (s - a))
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

impl Dd {
    /// Zero.
    pub const ZERO: Dd = Dd { hi: 0., lo: 0. };

    /// One.
    pub const ONE: Dd = Dd { hi: 1., lo: 0. };

    /// Create a value from a single `f64`.
    #[inline]
    pub fn new(x: f64) -> Dd {
        Dd { hi: x, lo: 0. }
    }

    // Once the high word is no longer finite the error term is meaningless
    // (and the error-free transformations would turn it into NaN).
    #[inline]
    fn renorm(hi: f64, lo: f64) -> Dd {
        if hi.is_finite() {
            let (hi, lo) = quick_two_sum(hi, lo);
            Dd { hi: hi, lo: lo }
        } else {
            Dd { hi: hi, lo: 0. }
        }
    }

    /// Round to the nearest `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    /// The high-order word.
    #[inline]
    pub fn hi(self) -> f64 {
        self.hi
    }

    /// Absolute value.
    pub fn abs(self) -> Dd {
        if self.hi < 0. { -self } else { self }
    }

    /// Multiply by `2^exp`; exact.
    pub fn ldexp(self, exp: i32) -> Dd {
        Dd { hi: ldexp(self.hi, exp), lo: ldexp(self.lo, exp) }
    }

    /// Is the value finite?
    pub fn is_finite(self) -> bool {
        self.hi.is_finite()
    }
}

impl From<f64> for Dd {
    fn from(x: f64) -> Dd {
        Dd::new(x)
    }
}

impl Neg for Dd {
    type Output = Dd;

    fn neg(self) -> Dd {
        Dd { hi: -self.hi, lo: -self.lo }
    }
}

impl Add for Dd {
    type Output = Dd;

    fn add(self, other: Dd) -> Dd {
        let (s, e) = two_sum(self.hi, other.hi);

        if !s.is_finite() {
            return Dd::new(s);
        }

        let (t, f) = two_sum(self.lo, other.lo);
        let (s, e) = quick_two_sum(s, e + t);
        Dd::renorm(s, e + f)
    }
}

impl Add<f64> for Dd {
    type Output = Dd;

    fn add(self, other: f64) -> Dd {
        let (s, e) = two_sum(self.hi, other);

        if !s.is_finite() {
            return Dd::new(s);
        }

        Dd::renorm(s, e + self.lo)
    }
}

impl Sub for Dd {
    type Output = Dd;

    fn sub(self, other: Dd) -> Dd {
        self + (-other)
    }
}

impl Sub<f64> for Dd {
    type Output = Dd;

    fn sub(self, other: f64) -> Dd {
        self + (-other)
    }
}

impl Mul for Dd {
    type Output = Dd;

    fn mul(self, other: Dd) -> Dd {
        let (p, e) = two_prod(self.hi, other.hi);

        if !p.is_finite() {
            return Dd::new(p);
        }

        Dd::renorm(p, e + (self.hi * other.lo + self.lo * other.hi))
    }
}

impl Mul<f64> for Dd {
    type Output = Dd;

    fn mul(self, other: f64) -> Dd {
        let (p, e) = two_prod(self.hi, other);

        if !p.is_finite() {
            return Dd::new(p);
        }

        Dd::renorm(p, e + self.lo * other)
    }
}

impl Div for Dd {
    type Output = Dd;

    fn div(self, other: Dd) -> Dd {
        let q1 = self.hi / other.hi;

        if !q1.is_finite() {
            return Dd::new(q1);
        }

        let r = self - other * q1;
        let q2 = r.hi / other.hi;
        let r = r - other * q2;
        let q3 = r.hi / other.hi;
        Dd::renorm(q1, q2) + q3
    }
}

impl Div<f64> for Dd {
    type Output = Dd;

    fn div(self, other: f64) -> Dd {
        self / Dd::new(other)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_lost_bits() {
        // 1 + 2^-60 - 1 is lost entirely in plain f64.
        let tiny = ldexp(1., -60);
        let x = Dd::ONE + tiny - 1.;
        assert_eq!(x.to_f64(), tiny);
        assert_eq!(1. + tiny - 1., 0.);
    }

    #[test]
    fn one_third() {
        let third = Dd::ONE / 3.;
        let back = third * 3.;
        assert_eq!((back - 1.).to_f64().abs() < 1e-30, true);
    }

    #[test]
    fn overflow_propagates() {
        let big = Dd::new(f64::MAX);
        let x = big * 4.;
        assert_eq!(x.to_f64(), f64::INFINITY);
        assert_eq!((x + 1.).to_f64(), f64::INFINITY);
    }

    #[test]
    fn predicates() {
        assert!(is_zero(0.));
        assert!(is_zero(-1e-310));
        assert!(!is_zero(1e-300));
        assert!(approx_equal(0.1 + 0.2, 0.3));
        assert!(!approx_equal(1., 1. + 1e-12));
        assert_eq!(clamp_sentinel(f64::INFINITY), OVERFLOW_SENTINEL);
        assert_eq!(clamp_sentinel(-f64::INFINITY), -OVERFLOW_SENTINEL);
        assert!(clamp_sentinel(f64::NAN).is_nan());
        assert_eq!(ldexp(3., SCALE_EXP) * LARGE, 3.);
    }
}
