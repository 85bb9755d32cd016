// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Truncated and reduced exponentials, and the functions built on them.

The "reduced" exponential

```text
exp_rel_n(x, N) = N! (e^x - sum_{k<N} x^k/k!) / x^N
```

is the confluent hypergeometric function `1F1(1; N+1; x)`. For `x <= N` it
is evaluated with a continued fraction; beyond that the tail sum is
well-conditioned and is computed directly.

*/

use slog::Logger;
use special::Gamma;
use std::f64;

use crate::continued_fraction::Convergents;
use crate::error::{domain, settle, MathError, Result};
use crate::gamma::gamma_star;
use crate::precision::{clamp_sentinel, is_zero, ldexp, Dd, EPSILON, OVERFLOW_SENTINEL};


const MAX_CF_TERMS: usize = 100000;
const MAX_SERIES_TERMS: usize = 100000;


/// The sum of the first `N + 1` terms of the exponential series,
/// `sum_{k=0}^{N} x^k/k!`.
///
/// If the partial sum overflows, the result is clamped to plus or minus
/// [`OVERFLOW_SENTINEL`].
pub fn exp_n(x: f64, n: u16) -> f64 {
    match n {
        0 => 1.,
        1 => 1. + x,
        2 => 1. + x * (1. + x * 0.5),
        3 => 1. + x * (1. + x * (0.5 + x / 6.)),
        _ if is_zero(x) => 1.,
        _ => {
            let mut t = Dd::ONE;
            let mut r = Dd::ONE;

            for k in 1..=n {
                t = t * x / k as f64;
                r = r + t;

                if r.hi() > OVERFLOW_SENTINEL {
                    return OVERFLOW_SENTINEL;
                } else if r.hi() < -OVERFLOW_SENTINEL {
                    return -OVERFLOW_SENTINEL;
                }
            }

            r.to_f64()
        }
    }
}


/// The relative exponential `(e^x - 1)/x`, accurate near zero.
pub fn exprel(x: f64) -> f64 {
    if x < f64::MIN_POSITIVE.ln() {
        -1. / x
    } else if x > f64::MAX.ln() {
        OVERFLOW_SENTINEL
    } else if x == 0. {
        1.
    } else if x.abs() < 1. {
        x.exp_m1() / x
    } else {
        (x.exp() - 1.) / x
    }
}


/// The reduced exponential `N! (e^x - sum_{k<N} x^k/k!) / x^N`.
///
/// `exp_rel_n(x, 0)` is `e^x` and `exp_rel_n(x, 1)` is [`exprel`].
pub fn exp_rel_n(x: f64, n: u16) -> f64 {
    exp_rel_n_impl(x, n, None)
}


pub(crate) fn exp_rel_n_impl(x: f64, n: u16, log: Option<&Logger>) -> f64 {
    match n {
        0 => x.exp(),
        1 => exprel(x),
        _ if is_zero(x) => 1.,
        _ if x <= n as f64 => settle(exp_rel_n_cf(x, n), log),
        _ => exp_rel_n_tail(x, n),
    }
}


fn exp_rel_n_cf(x: f64, n: u16) -> Result<f64> {
    let big_n = n as u64;
    let mut c = Convergents::fraction();
    let mut converged = false;

    for k in 2..(MAX_CF_TERMS as u64 + 1) {
        let a = if k % 2 == 0 {
            x * k as f64 / 2.
        } else {
            -x * (big_n + (k - 1) / 2) as f64
        };

        c.step(a, (k + big_n) as f64);

        if k % 5 == 0 && (c.previous() / c.value() - 1.).abs() <= 2. * EPSILON {
            converged = true;
            break;
        }
    }

    let denom = c.value_dd() + (n as f64 + 1.);
    let estimate = (Dd::ONE / (Dd::ONE - Dd::new(x) / denom)).to_f64();

    if converged {
        Ok(estimate)
    } else {
        Err(MathError::NoConvergence {
            routine: "exp_rel_n",
            iterations: MAX_CF_TERMS,
            estimate: estimate,
        })
    }
}


// For x > N at least about half of e^x lives in the tail, so the
// subtraction costs no more than a bit.
fn exp_rel_n_tail(x: f64, n: u16) -> f64 {
    let nf = n as f64;

    if x < 700. && nf * x.ln() < 700. {
        let mut t = Dd::ONE;
        let mut s = Dd::ONE;

        for k in 1..n {
            t = t * x / k as f64;
            s = s + t;
        }

        let mut r = Dd::new(x.exp()) - s;

        for k in 1..=n {
            r = r * (k as f64 / x);
        }

        return r.to_f64();
    }

    // Everything in logarithms: e^x N!/x^N (1 - e^-x S_{N-1}(x)).
    let lnx = x.ln();
    let mut deficit = 0.;

    for k in 0..n {
        let kf = k as f64;
        deficit += (-x + kf * lnx - Gamma::ln_gamma(kf + 1.).0).exp();
    }

    let lnr = x + Gamma::ln_gamma(nf + 1.).0 - nf * lnx;

    if lnr > OVERFLOW_SENTINEL.ln() {
        return OVERFLOW_SENTINEL;
    }

    clamp_sentinel(lnr.exp() * (1. - deficit))
}


/// `alpha_n(x) = int_1^inf t^n e^{-tx} dt`, for `x > 0`.
pub fn alpha_n(n: u16, x: f64) -> f64 {
    let mut f = Dd::ONE;

    for k in 1..=n {
        f = f * k as f64;
    }

    (f / x.powi(n as i32 + 1)).to_f64() * (-x).exp() * exp_n(x, n)
}


/// `alpha'_n(x) = int_0^1 t^n e^{-tx} dt`.
pub fn alpha_prime_n(n: u16, x: f64) -> f64 {
    let np1 = n as f64 + 1.;

    if is_zero(x) {
        1. / np1
    } else {
        (-x).exp() * exp_rel_n(x, n.saturating_add(1)) / np1
    }
}


/// `beta_n(x) = int_{-1}^{1} t^n e^{-tx} dt`.
pub fn beta_n(n: u16, x: f64) -> f64 {
    if n % 2 == 0 {
        alpha_prime_n(n, x) + alpha_prime_n(n, -x)
    } else {
        alpha_prime_n(n, x) - alpha_prime_n(n, -x)
    }
}


/// Kummer's confluent hypergeometric function `1F1(a; b; x)` for integer
/// parameters.
///
/// The special cases reducible to exponentials, reduced exponentials, or the
/// incomplete gamma function are dispatched to those; otherwise the
/// hypergeometric series is summed in extended precision. `b = 0` (with
/// `a > 0`) is outside the domain and gives NaN.
pub fn kummer(a: u16, b: u16, x: f64) -> f64 {
    kummer_impl(a, b, x, None)
}


pub(crate) fn kummer_impl(a: u16, b: u16, x: f64, log: Option<&Logger>) -> f64 {
    if a == 0 || is_zero(x) {
        return 1.;
    }

    if a == b {
        return if x.abs() < 0.3 { x.exp_m1() + 1. } else { x.exp() };
    }

    if b == 0 {
        return settle(domain("kummer", "b = 0"), log);
    }

    if a == 1 {
        return exp_rel_n_impl(x, b - 1, log);
    }

    if a as u32 + 1 == b as u32 {
        let mut f = Dd::ONE;

        for k in 2..=a {
            f = f * k as f64;
        }

        return clamp_sentinel(f.to_f64() * gamma_star(a as f64, -x));
    }

    settle(kummer_series(a as f64, b as f64, x), log)
}


// With x < 0 we use 1F1(a; b; x) = e^x 1F1(b - a; b; -x), so that the terms
// don't alternate. The partial sums are kept in range with a running power of
// two.
fn kummer_series(a: f64, b: f64, x: f64) -> Result<f64> {
    let (a, z, lnpre) = if x < 0. { (b - a, -x, x) } else { (a, x, 0.) };

    const SCALE: i32 = 600;
    let mut scale = 0i32;
    let mut t = Dd::ONE;
    let mut s = Dd::ONE;
    let mut converged = false;

    for k in 0..MAX_SERIES_TERMS {
        let kf = k as f64;

        if a + kf == 0. {
            converged = true;
            break;
        }

        let ratio = (a + kf) / (b + kf) * z / (kf + 1.);
        t = t * ratio;
        s = s + t;

        if s.hi().abs() > ldexp(1., SCALE) {
            s = s.ldexp(-SCALE);
            t = t.ldexp(-SCALE);
            scale += SCALE;
        }

        if t.hi().abs() <= EPSILON * s.hi().abs() && ratio.abs() < 0.5 {
            converged = true;
            break;
        }
    }

    let lnf = lnpre + scale as f64 * f64::consts::LN_2;
    let value = if lnf > OVERFLOW_SENTINEL.ln() {
        OVERFLOW_SENTINEL.copysign(s.hi())
    } else {
        clamp_sentinel(s.to_f64() * lnf.exp())
    };

    if converged {
        Ok(value)
    } else {
        Err(MathError::NoConvergence {
            routine: "kummer",
            iterations: MAX_SERIES_TERMS,
            estimate: value,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn exp_n_basics() {
        assert_eq!(exp_n(3.7, 0), 1.);
        assert_eq!(exp_n(0., 12), 1.);
        assert_approx_eq!(exp_n(2., 1), 3.);
        assert_approx_eq!(exp_n(2., 4), 1. + 2. + 2. + 4. / 3. + 2. / 3.);

        for &x in &[-20., -3., -0.5, 0.1, 1., 7., 30.] {
            let v: f64 = x;
            assert!(rel(exp_n(v, 150), v.exp()) < 1e-13, "x = {}", v);
        }
    }

    #[test]
    fn exp_n_overflow() {
        assert_eq!(exp_n(1e200, 10), OVERFLOW_SENTINEL);
    }

    #[test]
    fn exprel_values() {
        assert_eq!(exprel(0.), 1.);
        // Reference values computed with 50-digit arithmetic.
        let cases = [
            (-50., 0.019999999999999999999961425),
            (-1., 0.63212055882855767840447622),
            (-1e-8, 0.99999999500000001666666663),
            (1e-8, 1.0000000050000000166666667),
            (1., 1.7182818284590452353602875),
            (50., 1.0369411057174145e20),
        ];

        for &(x, v) in &cases {
            assert!(rel(exprel(x), v) < 1e-12, "x = {}", x);
        }

        assert_eq!(exprel(1000.), OVERFLOW_SENTINEL);
        assert_approx_eq!(exprel(-1000.), 1e-3);
    }

    #[test]
    fn exp_rel_n_low_orders() {
        assert_approx_eq!(exp_rel_n(1.3, 0), 1.3f64.exp());
        assert_eq!(exp_rel_n(0.4, 1), exprel(0.4));
        assert_eq!(exp_rel_n(0., 7), 1.);
    }

    #[test]
    fn exp_rel_n_against_definition() {
        // N!(e^x - S_{N-1}(x))/x^N is fine to evaluate directly when x is
        // moderate and positive, with the tail computed by its series.
        for &n in &[2u16, 3, 5, 10] {
            for &x in &[0.25f64, 1.5, 4., 9., 12., 25.] {
                let mut tail = 0.;
                let mut term = 1.;

                for k in 1..400 {
                    term *= x / k as f64;
                    if k >= n {
                        tail += term;
                    }
                }

                let mut f = 1.;
                for k in 1..=n {
                    f *= k as f64;
                }

                let expected = tail * f / x.powi(n as i32);
                assert!(rel(exp_rel_n(x, n), expected) < 1e-13, "x = {} n = {}", x, n);
            }
        }
    }

    #[test]
    fn exp_rel_n_large_argument() {
        // 1F1(1; 3; 50) = 2(e^50 - 1 - 50)/2500
        let expected = 2. * (50f64.exp() - 51.) / 2500.;
        assert!(rel(exp_rel_n(50., 2), expected) < 1e-14);
        assert!(exp_rel_n(800., 4).is_finite());
        assert_eq!(exp_rel_n(1e6, 3), OVERFLOW_SENTINEL);
    }

    #[test]
    fn exp_rel_n_negative() {
        // 1F1(1; 3; -2) = 2(e^-2 - 1 + 2)/4
        let expected = 2. * ((-2f64).exp() + 1.) / 4.;
        assert!(rel(exp_rel_n(-2., 2), expected) < 1e-14);
    }

    #[test]
    fn alpha_family() {
        // alpha_0(x) = e^-x/x; alpha'_0(x) = (1 - e^-x)/x; beta_0(x) = 2 sinh(x)/x
        let x: f64 = 1.7;
        assert_approx_eq!(alpha_n(0, x), (-x).exp() / x);
        assert_approx_eq!(alpha_n(1, x), (-x).exp() * (1. + x) / (x * x));
        assert_approx_eq!(alpha_prime_n(0, x), (1. - (-x).exp()) / x);
        assert_approx_eq!(alpha_prime_n(3, 0.), 0.25);
        assert_approx_eq!(beta_n(0, x), 2. * x.sinh() / x);
        assert_approx_eq!(beta_n(2, 0.), 2. / 3.);
        assert_approx_eq!(beta_n(1, 0.), 0.);
    }

    #[test]
    fn kummer_special_cases() {
        assert_eq!(kummer(0, 3, 2.), 1.);
        assert_eq!(kummer(2, 5, 0.), 1.);
        assert_approx_eq!(kummer(4, 4, 0.1), 0.1f64.exp());
        assert_approx_eq!(kummer(4, 4, 2.), 2f64.exp());
        assert_eq!(kummer(1, 5, 1.3), exp_rel_n(1.3, 4));
        assert!(kummer(2, 0, 1.).is_nan());

        // 1F1(2; 3; x) = 2(1 + (x - 1)e^x)/x^2
        let x: f64 = 1.5;
        let expected = 2. * (1. + (x - 1.) * x.exp()) / (x * x);
        assert!(rel(kummer(2, 3, x), expected) < 1e-13);
    }

    #[test]
    fn kummer_series_values() {
        // 1F1(2; 1; x) = (1 + x) e^x
        for &x in &[-30., -2., 0.5, 3., 40.] {
            let v: f64 = x;
            let expected = (1. + v) * v.exp();
            assert!(rel(kummer(2, 1, v), expected) < 1e-12, "x = {}", v);
        }

        // 1F1(3; 1; x) = e^x 1F1(-2; 1; -x), a terminating series
        let x: f64 = -4.;
        let expected = x.exp() * (1. + 2. * x + 0.5 * x * x);
        assert!(rel(kummer(3, 1, x), expected) < 1e-12);
    }
}
