// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The Gaussian distribution and its relatives.

Besides the density and distribution functions, this module provides
Owen's T function, the Student t distribution function, the probit, and
closed forms for integrals of `exp(-alpha^2 x^2 + beta x)` over finite and
half-infinite ranges. The latter are arranged so that the huge factor
`exp(beta^2 / 4 alpha^2)` never has to be formed when it would cancel
against an equally tiny `erfc`.

*/

use special::{Beta, Error};
use std::f64;
use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};
use std::sync::OnceLock;

use crate::exponential::exprel;
use crate::faddeeva::{erf, erfc, erfcx};
use crate::precision::{clamp_sentinel, OVERFLOW_SENTINEL};


/// The Gaussian density with mean `mu` and width `sigma`.
pub fn gauss_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let s = sigma.abs();
    let dx = (x - mu) / s;
    (-0.5 * dx * dx).exp() / ((2. * PI).sqrt() * s)
}


/// The Gaussian cumulative distribution function.
pub fn gauss_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let y = (x - mu) / (SQRT_2 * sigma.abs());

    if y < 0. {
        0.5 * erfc(-y)
    } else {
        0.5 * (1. + erf(y))
    }
}


/// The probability content of `[a, b]` for a Gaussian with mean `mu` and
/// width `sigma`. Negative if `b < a`.
pub fn gauss_int(a: f64, b: f64, mu: f64, sigma: f64) -> f64 {
    if b < a {
        return -gauss_int(b, a, mu, sigma);
    }

    let scale = SQRT_2 * sigma.abs();
    let ya = (a - mu) / scale;
    let yb = (b - mu) / scale;

    if ya >= 0. {
        0.5 * (erfc(ya) - erfc(yb))
    } else if yb <= 0. {
        0.5 * (erfc(-yb) - erfc(-ya))
    } else {
        0.5 * (erf(yb) - erf(ya))
    }
}


/// The distribution function of Student's t with `nu` degrees of freedom
/// (the sign of `nu` is ignored).
pub fn student_cdf(t: f64, nu: f64) -> f64 {
    let anu = nu.abs();
    let p = 0.5 * anu;
    let xt = anu / (t * t + anu);
    let value = 0.5 * Beta::inc_beta(xt, p, 0.5, Beta::ln_beta(p, 0.5));

    if t >= 0. {
        1. - value
    } else {
        value
    }
}


/// The probit, or quantile function of the unit Gaussian. NaN unless
/// `0 < alpha < 1`.
pub fn probit(alpha: f64) -> f64 {
    if !(alpha > 0. && alpha < 1.) {
        return f64::NAN;
    }

    SQRT_2 * Error::inv_error(2. * alpha - 1.)
}


const OWEN_NODES: usize = 16;

/// Positive nodes and weights of the 32-point Gauss-Legendre rule.
fn legendre_rule() -> &'static [(f64, f64); OWEN_NODES] {
    static RULE: OnceLock<[(f64, f64); OWEN_NODES]> = OnceLock::new();

    RULE.get_or_init(|| {
        let n = 2 * OWEN_NODES;
        let nf = n as f64;
        let mut rule = [(0., 0.); OWEN_NODES];

        // Legendre P_n and its derivative at x.
        let legendre = |x: f64| {
            let mut p0 = 1.;
            let mut p1 = x;

            for k in 2..=n {
                let kf = k as f64;
                let p2 = ((2. * kf - 1.) * x * p1 - (kf - 1.) * p0) / kf;
                p0 = p1;
                p1 = p2;
            }

            (p1, nf * (x * p1 - p0) / (x * x - 1.))
        };

        for (i, slot) in rule.iter_mut().enumerate() {
            let mut x = (PI * (i as f64 + 0.75) / (nf + 0.5)).cos();

            for _ in 0..100 {
                let (p, dp) = legendre(x);
                let dx = p / dp;
                x -= dx;

                if dx.abs() < 1e-16 {
                    break;
                }
            }

            let (_, dp) = legendre(x);
            *slot = (x, 2. / ((1. - x * x) * dp * dp));
        }

        rule
    })
}


/// `1/2pi int_0^a exp(-h^2 (1 + x^2)/2)/(1 + x^2) dx`, for `0 < a <= 1`.
fn owen_quadrature(h: f64, a: f64) -> f64 {
    let hh = -0.5 * h * h;
    let half = 0.5 * a;
    let mut sum = 0.;

    for &(x, w) in legendre_rule().iter() {
        for &t in &[half * (1. + x), half * (1. - x)] {
            let u = 1. + t * t;
            sum += w * (hh * u).exp() / u;
        }
    }

    sum * half / (2. * PI)
}


/// Owen's T function,
///
/// ```text
/// T(h, a) = 1/2pi int_0^a exp(-h^2 (1 + x^2)/2) / (1 + x^2) dx
/// ```
pub fn owen(h: f64, a: f64) -> f64 {
    if h.is_nan() || a.is_nan() {
        return f64::NAN;
    }

    let h = h.abs();

    if a < 0. {
        return -owen(h, -a);
    }

    if a == 0. {
        return 0.;
    }

    if a <= 1. {
        return owen_quadrature(h, a);
    }

    if a.is_infinite() {
        return 0.25 * erfc(h * FRAC_1_SQRT_2);
    }

    // Upper-tail probabilities of h and a h.
    let ah = a * h;
    let q1 = 0.5 * erfc(h * FRAC_1_SQRT_2);
    let q2 = 0.5 * erfc(ah * FRAC_1_SQRT_2);
    0.5 * (q1 + q2) - q1 * q2 - owen_quadrature(ah, 1. / a)
}


/// `int_low^high exp(-alpha^2 x^2 + beta x) dx`.
pub fn gaussian_integral(alpha: f64, beta: f64, low: f64, high: f64) -> f64 {
    if low == high {
        return 0.;
    }

    if high < low {
        return -gaussian_integral(alpha, beta, high, low);
    }

    let a2 = alpha * alpha;

    if a2 == 0. {
        if beta == 0. {
            return high - low;
        }

        let width = high - low;
        return clamp_sentinel((beta * low).exp() * width * exprel(beta * width));
    }

    let s = a2.sqrt();
    let center = beta / (2. * a2);

    if low >= center {
        clamp_sentinel(right_tail(a2, beta, low) - right_tail(a2, beta, high))
    } else if high <= center {
        clamp_sentinel(right_tail(a2, -beta, -high) - right_tail(a2, -beta, -low))
    } else {
        let peak = (a2 * center * center).exp();
        let zl = s * (low - center);
        let zh = s * (high - center);
        clamp_sentinel(0.5 * (PI / a2).sqrt() * peak * (erf(zh) - erf(zl)))
    }
}


/// `int_low^inf exp(-alpha^2 x^2 + beta x) dx`; the sentinel if divergent.
pub fn gaussian_integral_right(alpha: f64, beta: f64, low: f64) -> f64 {
    let a2 = alpha * alpha;

    if a2 == 0. {
        if beta < 0. {
            return clamp_sentinel(-(beta * low).exp() / beta);
        }

        return OVERFLOW_SENTINEL;
    }

    clamp_sentinel(right_tail(a2, beta, low))
}


/// `int_-inf^high exp(-alpha^2 x^2 + beta x) dx`; the sentinel if divergent.
pub fn gaussian_integral_left(alpha: f64, beta: f64, high: f64) -> f64 {
    gaussian_integral_right(alpha, -beta, -high)
}


/// The right-tail integral for `a2 > 0`. To the right of the peak the
/// exponent at `low` is factored out and the remainder is `erfcx`.
fn right_tail(a2: f64, beta: f64, low: f64) -> f64 {
    if low == f64::INFINITY {
        return 0.;
    }

    let s = a2.sqrt();
    let center = beta / (2. * a2);
    let prefactor = 0.5 * (PI / a2).sqrt();

    if low == f64::NEG_INFINITY {
        return prefactor * (a2 * center * center).exp();
    }

    let z = s * (low - center);
    let edge = (beta * low - a2 * low * low).exp();

    if z >= 0. {
        prefactor * erfcx(z) * edge
    } else {
        prefactor * (2. * (a2 * center * center).exp() - erfcx(-z) * edge)
    }
}
