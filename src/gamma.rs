// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Functions related to the Gamma function.

The centerpiece is Tricomi's regularized incomplete gamma function

```text
gamma*(a, x) = x^-a gamma(a, x) / Gamma(a)
             = x^-a P(a, x)
```

which is an entire function of both arguments; unlike `P(a, x)` it is
defined for negative `a` and for negative `x`.

*/

use num_complex::Complex64;
use slog::Logger;
use special::Gamma;
use std::f64;

use crate::error::{settle, MathError, Result};
use crate::precision::{clamp_sentinel, ldexp, Dd, EPSILON, OVERFLOW_SENTINEL};


const MAX_TERMS: usize = 1000000;

/// Beyond this (and twice `|a|`) the asymptotic expansion of the upper
/// incomplete function takes over from the series.
const ASYMPTOTIC_X: f64 = 40.;

/// How close `a` must be to a non-positive integer before the closed form
/// is used.
const INTEGER_PROXIMITY: f64 = 1e-4;


/// Tricomi's regularized incomplete gamma function `x^-a gamma(a, x)/Gamma(a)`.
///
/// When `a` lies within `1e-4` of a non-positive integer `-n` the function
/// reduces to `x^n`.
pub fn gamma_star(a: f64, x: f64) -> f64 {
    settle(gamma_star_kernel(a, x), None)
}


/// [`gamma_star`] for integer `a`.
pub fn gamma_star_int(n: i32, x: f64) -> f64 {
    if n <= 0 {
        x.powi(-n)
    } else {
        gamma_star(n as f64, x)
    }
}


pub(crate) fn gamma_star_logged(a: f64, x: f64, log: &Logger) -> f64 {
    trace!(log, "gamma_star"; "a" => a, "x" => x);
    settle(gamma_star_kernel(a, x), Some(log))
}


fn gamma_star_kernel(a: f64, x: f64) -> Result<f64> {
    let n = a.round();

    if n <= 0. && (a - n).abs() < INTEGER_PROXIMITY {
        return Ok(x.powi(-n as i32));
    }

    if x > ASYMPTOTIC_X && x > 2. * a.abs() {
        Ok(gamma_star_asymptotic(a, x))
    } else if x > 1.1 {
        gamma_star_large_x(a, x)
    } else {
        gamma_star_small_x(a, x)
    }
}


// sum_n (-x)^n / (n! (a + n)) / Gamma(a)
fn gamma_star_small_x(a: f64, x: f64) -> Result<f64> {
    let mut t = Dd::ONE;
    let mut r = Dd::ONE / a;
    let mut converged = false;

    for n in 1..MAX_TERMS {
        let nf = n as f64;
        t = t * -x / nf;

        if a + nf == 0. {
            converged = true;
            break;
        }

        r = r + t / (a + nf);

        if !r.is_finite() || t.hi().abs() <= 2. * EPSILON * r.hi().abs().max(f64::MIN_POSITIVE) {
            converged = true;
            break;
        }
    }

    let value = clamp_sentinel(r.to_f64() / Gamma::gamma(a));

    if converged {
        Ok(value)
    } else {
        Err(MathError::NoConvergence { routine: "gamma_star", iterations: MAX_TERMS, estimate: value })
    }
}


// e^-x sum_n x^n / (a (a+1) ... (a+n)) / Gamma(a), with the partial sums
// held in range by a running power of two.
fn gamma_star_large_x(a: f64, x: f64) -> Result<f64> {
    const SCALE: i32 = 600;
    let mut scale = 0i32;
    let mut t = Dd::ONE / a;
    let mut r = t;
    let mut converged = false;

    for n in 1..MAX_TERMS {
        let apn = a + n as f64;

        if apn == 0. {
            converged = true;
            break;
        }

        t = t * x / apn;
        r = r + t;

        if r.hi().abs() > ldexp(1., SCALE) {
            r = r.ldexp(-SCALE);
            t = t.ldexp(-SCALE);
            scale += SCALE;
        }

        if t.hi().abs() <= 2. * EPSILON * r.hi().abs() {
            converged = true;
            break;
        }
    }

    let lnf = scale as f64 * f64::consts::LN_2 - x;

    let value = if scale == 0 && a < 170. && x < 700. {
        r.to_f64() * (-x).exp() / Gamma::gamma(a)
    } else {
        let (lg, sign) = Gamma::ln_gamma(a);
        let lnv = lnf - lg;

        if lnv > OVERFLOW_SENTINEL.ln() {
            OVERFLOW_SENTINEL.copysign(r.hi() * sign as f64)
        } else {
            r.to_f64() * sign as f64 * lnv.exp()
        }
    };

    let value = clamp_sentinel(value);

    if converged {
        Ok(value)
    } else {
        Err(MathError::NoConvergence { routine: "gamma_star", iterations: MAX_TERMS, estimate: value })
    }
}


// x^-a (1 - Gamma(a, x)/Gamma(a)) with
// Gamma(a, x) ~ x^(a-1) e^-x sum_k (a-1)(a-2)...(a-k)/x^k.
// With x > 2|a| the terms shrink at least geometrically at first; the sum
// stops at the smallest term, far below what 1 - Q can resolve.
fn gamma_star_asymptotic(a: f64, x: f64) -> f64 {
    let lnx = x.ln();
    let mut t: f64 = 1.;
    let mut s: f64 = 1.;

    for k in 1..200 {
        let next = t * (a - k as f64) / x;

        if next.abs() >= t.abs() || next.abs() <= EPSILON * s.abs() {
            break;
        }

        t = next;
        s += t;
    }

    let (lg, sign) = Gamma::ln_gamma(a);
    let lnq = (a - 1.) * lnx - x - lg + s.abs().ln();
    let q = (sign as f64) * s.signum() * lnq.exp();

    let lnpow = -a * lnx;

    if lnpow > OVERFLOW_SENTINEL.ln() {
        return OVERFLOW_SENTINEL;
    }

    clamp_sentinel(lnpow.exp() * (1. - q))
}


/// The reciprocal Gamma function `1/Gamma(x)`, which is zero at the
/// non-positive integers.
pub fn igamma(x: f64) -> f64 {
    if x <= 0. && x == x.round() {
        0.
    } else if x > 170. {
        (-Gamma::ln_gamma(x).0).exp()
    } else {
        1. / Gamma::gamma(x)
    }
}


/// The digamma function `d/dx ln Gamma(x)`. NaN at the poles.
pub fn psi(x: f64) -> f64 {
    if x <= 0. && x == x.round() {
        f64::NAN
    } else {
        Gamma::digamma(x)
    }
}


/// The hyperbolic secant `1/cosh(x)`.
pub fn sech(x: f64) -> f64 {
    if x.abs() > 700. {
        0.
    } else {
        2. / (x.exp() + (-x).exp())
    }
}


/// The hyperbolic secant of a complex argument.
pub fn sech_complex(z: Complex64) -> Complex64 {
    if z.re.abs() > 700. {
        Complex64::new(0., 0.)
    } else {
        2. / (z.exp() + (-z).exp())
    }
}
