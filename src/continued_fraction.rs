// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Evaluation of finite continued fractions.

All three shapes are evaluated forward with the fundamental recurrence for
the convergents `h_n/k_n`,

```text
h_n = b_n h_{n-1} + a_n h_{n-2}
k_n = b_n k_{n-1} + a_n k_{n-2}
```

rescaling all of the running values by `2^-32` whenever one of them grows
past `2^32`. The rescaling is exact, so it changes nothing but the range.

*/

use crate::error::{settle, MathError, Result};
use crate::precision::{Dd, LARGE, SCALE_EXP};


/// The running state of the forward recurrence, carried in double-double
/// so that only the final division rounds to `f64`.
#[derive(Copy,Clone,Debug,PartialEq)]
pub(crate) struct Convergents {
    hm1: Dd,
    km1: Dd,
    h0: Dd,
    k0: Dd,
}

impl Convergents {
    /// Start from `h_{-1}, k_{-1}, h_0, k_0`.
    pub fn new(hm1: f64, km1: f64, h0: f64, k0: f64) -> Self {
        Convergents { hm1: Dd::new(hm1), km1: Dd::new(km1), h0: Dd::new(h0), k0: Dd::new(k0) }
    }

    /// The state appropriate for `a_1/(b_1 + a_2/(b_2 + ...))`.
    pub fn fraction() -> Self {
        Convergents::new(1., 0., 0., 1.)
    }

    /// Advance by one term with partial numerator `a` and partial
    /// denominator `b`.
    #[inline]
    pub fn step(&mut self, a: f64, b: f64) {
        let hp1 = self.h0 * b + self.hm1 * a;
        let kp1 = self.k0 * b + self.km1 * a;

        self.hm1 = self.h0;
        self.km1 = self.k0;
        self.h0 = hp1;
        self.k0 = kp1;

        if hp1.hi().abs() > LARGE || kp1.hi().abs() > LARGE {
            self.h0 = self.h0.ldexp(SCALE_EXP);
            self.k0 = self.k0.ldexp(SCALE_EXP);
            self.hm1 = self.hm1.ldexp(SCALE_EXP);
            self.km1 = self.km1.ldexp(SCALE_EXP);
        }
    }

    /// The current convergent, unrounded.
    #[inline]
    pub fn value_dd(&self) -> Dd {
        self.h0 / self.k0
    }

    /// The current convergent.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value_dd().to_f64()
    }

    /// The previous convergent.
    #[inline]
    pub fn previous(&self) -> f64 {
        (self.hm1 / self.km1).to_f64()
    }
}


/// The simple continued fraction `a0 + 1/(a1 + 1/(a2 + ...))`.
///
/// An empty sequence gives zero.
pub fn continued_fraction_simple(a: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.;
    }

    let mut c = Convergents::new(0., 1., 1., 0.);

    for &ai in a {
        c.step(1., ai);
    }

    c.value()
}


/// The continued fraction `b0/(1 + b1/(1 + b2/(1 + ...)))`.
///
/// An empty sequence, or one starting with zero, gives zero.
pub fn continued_fraction_b(b: &[f64]) -> f64 {
    if b.is_empty() || b[0] == 0. {
        return 0.;
    }

    let mut c = Convergents::fraction();

    for &bi in b {
        c.step(bi, 1.);
    }

    c.value()
}


/// The general continued fraction.
///
/// If the sequences have equal lengths, this is `a1/(b1 + a2/(b2 + ...))`,
/// pairing the elements up in order. If `b` is one element longer than `a`,
/// its first element is an additive constant: `b0 + a1/(b1 + ...)`. Any other
/// shape gives NaN; see [`try_continued_fraction`].
pub fn continued_fraction(a: &[f64], b: &[f64]) -> f64 {
    settle(try_continued_fraction(a, b), None)
}


/// Like [`continued_fraction`], but reporting mismatched sequence lengths
/// as an error.
pub fn try_continued_fraction(a: &[f64], b: &[f64]) -> Result<f64> {
    if b.len() == a.len() + 1 {
        return Ok(b[0] + evaluate(a, &b[1..]));
    }

    if a.len() != b.len() {
        return Err(MathError::ShapeMismatch { a: a.len(), b: b.len() });
    }

    Ok(evaluate(a, b))
}


fn evaluate(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() {
        return 0.;
    }

    let mut c = Convergents::fraction();

    for (&ai, &bi) in a.iter().zip(b) {
        c.step(ai, bi);
    }

    c.value()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64;

    #[test]
    fn simple_shapes() {
        assert_eq!(continued_fraction_simple(&[]), 0.);
        assert_eq!(continued_fraction_simple(&[3.5]), 3.5);
        assert_approx_eq!(continued_fraction_simple(&[2., 4.]), 2.25);
        assert_approx_eq!(continued_fraction_simple(&[1., 2., 3.]), 1. + 1. / (2. + 1. / 3.));
    }

    #[test]
    fn golden_ratio() {
        let ones = vec![1.; 60];
        let phi = 0.5 * (1. + 5f64.sqrt());
        assert_approx_eq!(continued_fraction_simple(&ones), phi, 1e-15);
    }

    #[test]
    fn sqrt_two() {
        // [1; 2, 2, 2, ...]; this also runs the convergents through many
        // rescalings.
        let mut a = vec![2.; 2000];
        a[0] = 1.;
        assert_approx_eq!(continued_fraction_simple(&a), f64::consts::SQRT_2, 1e-15);
    }

    #[test]
    fn long_fractions_keep_full_precision() {
        // tan(1) = 1/(1 - 1/(3 - 1/(5 - ...))), Lambert. Thousands of
        // terms and rescalings must not cost more than an ulp or two.
        let n = 3000;
        let a: Vec<f64> = (0..n).map(|i| if i == 0 { 1. } else { -1. }).collect();
        let b: Vec<f64> = (0..n).map(|i| (2 * i + 1) as f64).collect();
        let v = continued_fraction(&a, &b);
        assert!((v / 1f64.tan() - 1.).abs() < 4. * f64::EPSILON,
                "tan(1): got {:.17e}", v);

        let mut a = vec![2.; 5000];
        a[0] = 1.;
        let v = continued_fraction_simple(&a);
        assert!((v / f64::consts::SQRT_2 - 1.).abs() < 2. * f64::EPSILON,
                "sqrt(2): got {:.17e}", v);
    }

    #[test]
    fn b_shapes() {
        assert_eq!(continued_fraction_b(&[]), 0.);
        assert_eq!(continued_fraction_b(&[0., 5.]), 0.);
        assert_eq!(continued_fraction_b(&[3.]), 3.);
        assert_approx_eq!(continued_fraction_b(&[3., 2.]), 1.);
        assert_approx_eq!(continued_fraction_b(&[1., 1., 1.]), 1. / (1. + 1. / 2.));
    }

    #[test]
    fn general_shapes() {
        assert_eq!(continued_fraction(&[], &[]), 0.);
        assert_approx_eq!(continued_fraction(&[1.], &[2.]), 0.5);
        assert_approx_eq!(continued_fraction(&[1.], &[3., 2.]), 3.5);
        assert_approx_eq!(continued_fraction(&[2., 3.], &[1., 4.]), 2. / (1. + 3. / 4.));
        assert!(continued_fraction(&[1., 2., 3.], &[1.]).is_nan());
        assert_eq!(try_continued_fraction(&[1., 2., 3.], &[1.]),
                   Err(MathError::ShapeMismatch { a: 3, b: 1 }));
    }

    #[test]
    fn four_over_pi() {
        // Brouncker: 4/pi = 1 + 1/(2 + 9/(2 + 25/(2 + ...)))
        let n = 200000;
        let a: Vec<f64> = (0..n).map(|i| ((2 * i + 1) * (2 * i + 1)) as f64).collect();
        let mut b = vec![2.; n + 1];
        b[0] = 1.;
        let v = continued_fraction(&a, &b);
        assert_approx_eq!(v, 4. / f64::consts::PI, 1e-4);
    }
}
