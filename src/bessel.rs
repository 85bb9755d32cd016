// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Modified Bessel functions of the second kind, `K_nu(x)`.

The order is reduced to `u = nu - round(nu)`, `|u| <= 1/2`, where the pair
`(K_u, K_{u+1})` is obtained from Temme's series (N. M. Temme, J. Comput.
Phys. 19 (1975) 324) for `x <= 2` or from Steed's evaluation of the
continued fraction CF2 (Thompson & Barnett, Comput. Phys. Commun. 47 (1987)
245) for `x > 2`. Forward recurrence in the order is stable for `K`, so it
carries the pair up to `nu`.

*/

use slog::Logger;
use special::Gamma;
use std::f64;
use std::f64::consts::PI;

use crate::error::{domain, settle, MathError, Result};
use crate::precision::EPSILON;


const MAX_ITER: usize = 500;

const EULER_MASCHERONI: f64 = 0.5772156649015329;


/// `K_n(x)` for integer order.
pub fn bessel_kn(n: i32, x: f64) -> f64 {
    bessel_knu(n as f64, x)
}

/// `e^x K_n(x)` for integer order.
pub fn bessel_kn_scaled(n: i32, x: f64) -> f64 {
    bessel_knu_scaled(n as f64, x)
}

/// `K_nu(x)`; NaN unless `x > 0`.
pub fn bessel_knu(nu: f64, x: f64) -> f64 {
    settle(try_bessel_knu(nu, x), None)
}

/// `e^x K_nu(x)`, which does not underflow for large `x`.
pub fn bessel_knu_scaled(nu: f64, x: f64) -> f64 {
    settle(k_nu(nu, x, true), None)
}

/// `K_nu(x)`, reporting errors.
pub fn try_bessel_knu(nu: f64, x: f64) -> Result<f64> {
    k_nu(nu, x, false)
}


pub(crate) fn bessel_knu_logged(nu: f64, x: f64, log: &Logger) -> f64 {
    trace!(log, "bessel_knu"; "nu" => nu, "x" => x);
    settle(k_nu(nu, x, false), Some(log))
}


fn k_nu(nu: f64, x: f64, scaled: bool) -> Result<f64> {
    if !(x > 0.) {
        return domain("bessel_knu", "x <= 0");
    }

    if !nu.is_finite() {
        return domain("bessel_knu", "non-finite order");
    }

    let nu = nu.abs();
    let n = nu.round();
    let u = nu - n;

    let (ku, ku1) = if x <= 2. {
        let (k0, k1) = temme_series(u, x)?;

        if scaled {
            let e = x.exp();
            (k0 * e, k1 * e)
        } else {
            (k0, k1)
        }
    } else {
        steed_cf2(u, x, scaled)?
    };

    let mut prev = ku;
    let mut current = ku1;

    for k in 1..=(n as u64) {
        let next = 2. * (u + k as f64) * current / x + prev;
        prev = current;
        current = next;
    }

    Ok(prev)
}


/// `(K_u(x), K_{u+1}(x))` for `|u| <= 1/2`, `x <= 2`.
fn temme_series(u: f64, x: f64) -> Result<(f64, f64)> {
    let gp = Gamma::gamma(1. + u) - 1.;
    let gm = Gamma::gamma(1. - u) - 1.;

    let a = (0.5 * x).ln();
    let b = (u * a).exp();
    let sigma = -a * u;

    let c = if u.abs() < 2. * EPSILON {
        1.
    } else {
        (PI * u).sin() / (PI * u)
    };

    let d = if sigma.abs() < EPSILON {
        1.
    } else {
        sigma.sinh() / sigma
    };

    let gamma1 = if u.abs() < EPSILON {
        -EULER_MASCHERONI
    } else {
        (0.5 / u) * (gp - gm) * c
    };
    let gamma2 = (2. + gp + gm) * c / 2.;

    let mut p = (gp + 1.) / (2. * b);
    let mut q = (gm + 1.) * b / 2.;
    let mut f = (sigma.cosh() * gamma1 + d * -a * gamma2) / c;
    let mut coef = 1.;
    let mut sum = f;
    let mut sum1 = p;

    for k in 1..MAX_ITER {
        let kf = k as f64;
        f = (kf * f + p + q) / (kf * kf - u * u);
        p /= kf - u;
        q /= kf + u;
        let h = p - kf * f;
        coef *= x * x / (4. * kf);
        sum += coef * f;
        sum1 += coef * h;

        if (coef * f).abs() < sum.abs() * EPSILON {
            return Ok((sum, 2. * sum1 / x));
        }
    }

    Err(MathError::NoConvergence { routine: "bessel_knu", iterations: MAX_ITER, estimate: sum })
}


/// `(K_u(x), K_{u+1}(x))` for `|u| <= 1/2`, `x > 2`, optionally without the
/// `e^-x` factor.
fn steed_cf2(u: f64, x: f64, scaled: bool) -> Result<(f64, f64)> {
    let mut a = u * u - 0.25;
    let mut b = 2. * (x + 1.);
    let mut d = 1. / b;

    let mut delta = d;
    let mut f = d;
    let mut prev = 0.;
    let mut cur = 1.;
    let mut q = -a;
    let mut c = -a;
    let mut s = 1. + q * delta;

    let finish = |s: f64, f: f64| {
        let mut kv = (PI / (2. * x)).sqrt() / s;

        if !scaled {
            kv *= (-x).exp();
        }

        let kv1 = kv * (0.5 + u + x + (u * u - 0.25) * f) / x;
        (kv, kv1)
    };

    for k in 2..MAX_ITER {
        let kf = k as f64;
        a -= 2. * (kf - 1.);
        b += 2.;
        d = 1. / (b + a * d);
        delta *= b * d - 1.;
        f += delta;

        let t = (prev - (b - 2.) * cur) / a;
        prev = cur;
        cur = t;
        c *= -a / kf;
        q += c * t;
        s += q * delta;

        if (q * delta).abs() < s.abs() * EPSILON / 2. {
            return Ok(finish(s, f));
        }
    }

    Err(MathError::NoConvergence { routine: "bessel_knu", iterations: MAX_ITER, estimate: finish(s, f).0 })
}
