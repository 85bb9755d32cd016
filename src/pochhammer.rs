// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The Pochhammer symbol (rising factorial) and friends.

```text
P(x, N) = x (x + 1) ... (x + N - 1)
```

For `N <= 16` the product is expanded as a polynomial whose coefficients
are the unsigned Stirling numbers of the first kind, evaluated in
double-double arithmetic. Larger orders are reduced with the duplication
("dimidation") identity

```text
P(x, N) = 2^N P(x/2, ceil(N/2)) P((x+1)/2, floor(N/2))
```

or, for very large orders, through the log-Gamma function.

*/

use special::Gamma;

use crate::gamma::psi;
use crate::precision::{is_zero, ldexp, Dd};


const MAX_POLY_ORDER: usize = 16;
const MAX_HALVING_ORDER: u16 = 96;
const INTEGER_PROXIMITY: f64 = 1e-8;


const fn stirling_table() -> [[u64; MAX_POLY_ORDER + 1]; MAX_POLY_ORDER + 1] {
    let mut c = [[0u64; MAX_POLY_ORDER + 1]; MAX_POLY_ORDER + 1];
    c[0][0] = 1;

    let mut n = 0;

    while n < MAX_POLY_ORDER {
        let mut k = 1;

        while k <= n + 1 {
            c[n + 1][k] = n as u64 * c[n][k] + c[n][k - 1];
            k += 1;
        }

        n += 1;
    }

    c
}

/// `STIRLING[n][k]` is the coefficient of `x^k` in `P(x, n)`.
static STIRLING: [[u64; MAX_POLY_ORDER + 1]; MAX_POLY_ORDER + 1] = stirling_table();


/// Horner evaluation of the expanded product, with its derivative.
fn polynomial(x: f64, n: usize) -> (Dd, Dd) {
    let c = &STIRLING[n];
    let mut p = Dd::new(c[n] as f64);
    let mut d = Dd::ZERO;

    for k in (0..n).rev() {
        d = d * x + p;
        p = p * x + c[k] as f64;
    }

    (p, d)
}


#[inline]
fn reflection_sign(n: u16) -> f64 {
    if n % 2 == 1 { -1. } else { 1. }
}


/// `P(x, n)` paired with its derivative with respect to `x`.
fn value_with_derivative(x: f64, n: u16) -> (f64, f64) {
    if (n as usize) <= MAX_POLY_ORDER {
        let (p, d) = polynomial(x, n as usize);
        return (p.to_f64(), d.to_f64());
    }

    if x < 0.5 - n as f64 {
        let (v, d) = value_with_derivative(x.abs() - n as f64 + 1., n);
        let s = reflection_sign(n);
        return (s * v, -s * d);
    }

    if n <= MAX_HALVING_ORDER || near_nonpositive_integer(x, n) {
        let k2 = n / 2;
        let k1 = n - k2;
        let (v1, d1) = value_with_derivative(ldexp(x, -1), k1);
        let (v2, d2) = value_with_derivative(ldexp(x + 1., -1), k2);
        let n = n as i32;
        return (ldexp(v1 * v2, n), ldexp(v1 * d2, n - 1) + ldexp(d1 * v2, n - 1));
    }

    let p = via_ln_gamma(x, n);
    (p, p * (psi(x + n as f64) - psi(x)))
}


fn value(x: f64, n: u16) -> f64 {
    if (n as usize) <= MAX_POLY_ORDER {
        return polynomial(x, n as usize).0.to_f64();
    }

    if is_zero(x) {
        return 0.;
    }

    if x < 0.5 - n as f64 {
        return reflection_sign(n) * value(x.abs() - n as f64 + 1., n);
    }

    if n <= MAX_HALVING_ORDER || near_nonpositive_integer(x, n) {
        let k2 = n / 2;
        let k1 = n - k2;
        return ldexp(value(ldexp(x, -1), k1), k1 as i32) * ldexp(value(ldexp(x + 1., -1), k2), k2 as i32);
    }

    via_ln_gamma(x, n)
}


// Near the integers in (1 - N, 0] the product passes through zero and the
// log-Gamma form is useless.
fn near_nonpositive_integer(x: f64, n: u16) -> bool {
    1. - n as f64 - INTEGER_PROXIMITY < x && x < INTEGER_PROXIMITY
        && (x - x.round()).abs() < INTEGER_PROXIMITY
}


fn via_ln_gamma(x: f64, n: u16) -> f64 {
    let (lg1, s1) = Gamma::ln_gamma(x + n as f64);
    let (lg0, s0) = Gamma::ln_gamma(x);
    (s1 * s0) as f64 * (lg1 - lg0).exp()
}


/// The Pochhammer symbol `x (x + 1) ... (x + n - 1)`, also known as the
/// rising factorial.
///
/// `P(x, 0) = 1` for all `x`, including zero.
pub fn pochhammer(x: f64, n: u16) -> f64 {
    if n == 0 {
        1.
    } else if n == 1 {
        x
    } else if is_zero(x) {
        0.
    } else if x > 0.5 - n as f64 {
        value(x, n)
    } else {
        reflection_sign(n) * value(x.abs() - n as f64 + 1., n)
    }
}


/// The Pochhammer symbol and its derivative with respect to `x`, computed
/// with a single recursion.
pub fn pochhammer_with_derivative(x: f64, n: u16) -> (f64, f64) {
    match n {
        0 => (1., 0.),
        1 => (x, 1.),
        _ => value_with_derivative(x, n),
    }
}


/// The rising factorial; the same as [`pochhammer`].
pub fn rising_factorial(x: f64, n: u16) -> f64 {
    pochhammer(x, n)
}


/// The falling factorial `x (x - 1) ... (x - n + 1) = (-1)^n P(-x, n)`.
pub fn falling_factorial(x: f64, n: u16) -> f64 {
    reflection_sign(n) * pochhammer(-x, n)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn direct(x: f64, n: u16) -> f64 {
        (0..n).fold(1., |acc, k| acc * (x + k as f64))
    }

    #[test]
    fn stirling_numbers() {
        // x(x+1)(x+2)(x+3) = x^4 + 6x^3 + 11x^2 + 6x
        assert_eq!(&STIRLING[4][..5], &[0, 6, 11, 6, 1]);
        assert_eq!(STIRLING[16][1], 1307674368000); // 15!
        assert_eq!(STIRLING[16][16], 1);
    }

    #[test]
    fn trivial_orders() {
        assert_eq!(pochhammer(0., 0), 1.);
        assert_eq!(pochhammer(3.7, 0), 1.);
        assert_eq!(pochhammer(3.7, 1), 3.7);
        assert_eq!(pochhammer(0., 5), 0.);
        assert_eq!(pochhammer_with_derivative(2.5, 0), (1., 0.));
        assert_eq!(pochhammer_with_derivative(2.5, 1), (2.5, 1.));
    }

    #[test]
    fn against_products() {
        for &n in &[2u16, 3, 5, 8, 16, 17, 25, 40, 96] {
            for &x in &[0.3, 1., 2.5, 7.25, -0.6, -3.5, -20.25, -150.5] {
                let expected = direct(x, n);
                let ours = pochhammer(x, n);

                if !(((ours - expected) / expected).abs() < 1e-11) {
                    panic!("pochhammer({:.16e}, {}) = {:.16e}, expected {:.16e}", x, n, ours, expected);
                }
            }
        }
    }

    #[test]
    fn zeros_at_negative_integers() {
        assert_eq!(pochhammer(-3., 5), 0.);
        assert_eq!(pochhammer(-19., 30), 0.);
        assert_eq!(pochhammer(-3., 3), -6.);
    }

    #[test]
    fn large_order() {
        // P(1, n) = n!
        let expected: f64 = (1..=120).fold(1., |acc, k| acc * k as f64);
        assert!(((pochhammer(1., 120) - expected) / expected).abs() < 1e-10);

        let x = 0.37;
        let expected = direct(x, 150);
        assert!(((pochhammer(x, 150) - expected) / expected).abs() < 1e-10);
    }

    #[test]
    fn factorials() {
        assert_eq!(rising_factorial(4., 3), 120.);
        assert_eq!(falling_factorial(5., 3), 60.);
        assert_eq!(falling_factorial(2.5, 2), 2.5 * 1.5);
        assert_eq!(falling_factorial(7., 0), 1.);
    }

    #[test]
    fn derivatives() {
        use moremath_test_support::deriv_central;

        for &n in &[2u16, 5, 10, 20, 50] {
            for &x in &[0.7, 1.9, 3.3, -2.4] {
                let (v, d) = pochhammer_with_derivative(x, n);
                assert!(((v - pochhammer(x, n)) / v).abs() < 1e-12);

                let h = 1e-4 * (1. + x.abs());
                let numeric = deriv_central(|y| pochhammer(y, n), x, h).value;

                if !(((d - numeric) / numeric).abs() < 1e-6) {
                    panic!("derivative of P(x, {}) at x={:.16e}: analytic={:.16e} numeric={:.16e}",
                           n, x, d, numeric);
                }
            }
        }
    }
}
