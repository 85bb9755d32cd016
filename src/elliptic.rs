// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Legendre's elliptic integrals, expressed through Carlson's symmetric
forms.

The modulus `k` is used throughout (not the parameter `m = k^2`). The
incomplete integrals are extended beyond `|phi| <= pi/2` quasi-periodically:
with `phi = n pi + phi'`, `F(phi, k) = 2n K(k) + F(phi', k)` and likewise for
`E`.

*/

use std::f64;
use std::f64::consts::PI;

use crate::carlson::{carlson_rd, carlson_rf, carlson_rj};


/// The complete elliptic integral of the first kind,
/// `K(k) = int_0^{pi/2} dphi / sqrt(1 - k^2 sin^2 phi)`. Infinite at `|k| = 1`.
pub fn elliptic_k(k: f64) -> f64 {
    let kp2 = 1. - k * k;

    if kp2 == 0. {
        f64::INFINITY
    } else {
        carlson_rf(0., kp2, 1.)
    }
}


/// The complete elliptic integral of the second kind,
/// `E(k) = int_0^{pi/2} sqrt(1 - k^2 sin^2 phi) dphi`.
pub fn elliptic_e(k: f64) -> f64 {
    let k2 = k * k;
    let kp2 = 1. - k2;

    if kp2 == 0. {
        1.
    } else {
        carlson_rf(0., kp2, 1.) - k2 / 3. * carlson_rd(0., kp2, 1.)
    }
}


/// `K(k) - E(k) = k^2/3 R_D(0, 1 - k^2, 1)`, without the cancellation.
pub fn elliptic_kme(k: f64) -> f64 {
    let k2 = k * k;
    k2 * carlson_rd(0., 1. - k2, 1.) / 3.
}


fn reduce(phi: f64) -> (f64, f64) {
    let n = (phi / PI).round();
    (n, phi - n * PI)
}


/// The incomplete elliptic integral of the first kind,
/// `F(phi, k) = int_0^phi dt / sqrt(1 - k^2 sin^2 t)`.
pub fn elliptic_f_phi(phi: f64, k: f64) -> f64 {
    let (n, phi) = reduce(phi);
    let (s, c) = phi.sin_cos();
    let k2 = k * k;
    let v = s * carlson_rf(c * c, 1. - k2 * s * s, 1.);

    if n == 0. { v } else { 2. * n * elliptic_k(k) + v }
}


/// The incomplete elliptic integral of the second kind,
/// `E(phi, k) = int_0^phi sqrt(1 - k^2 sin^2 t) dt`.
pub fn elliptic_e_phi(phi: f64, k: f64) -> f64 {
    let (n, phi) = reduce(phi);
    let (s, c) = phi.sin_cos();
    let k2 = k * k;
    let c2 = c * c;
    let delta = 1. - k2 * s * s;
    let v = if s == 0. {
        0.
    } else {
        s * carlson_rf(c2, delta, 1.) - k2 / 3. * s * s * s * carlson_rd(c2, delta, 1.)
    };

    if n == 0. { v } else { 2. * n * elliptic_e(k) + v }
}


/// Jacobi's zeta function `Z(beta, k) = E(beta, k) - E(k) F(beta, k)/K(k)`.
pub fn elliptic_z(beta: f64, k: f64) -> f64 {
    elliptic_e_phi(beta, k) - elliptic_e(k) * elliptic_f_phi(beta, k) / elliptic_k(k)
}


/// The product `K(k) Z(beta, k)`, computed directly as
/// `k^2/3 sin(beta) cos(beta) sqrt(D) R_J(0, 1 - k^2, 1, D)` with
/// `D = 1 - k^2 sin^2 beta`.
pub fn elliptic_kz(beta: f64, k: f64) -> f64 {
    let (s, c) = beta.sin_cos();
    let k2 = k * k;
    let delta = 1. - k2 * s * s;
    k2 * s * c * delta.sqrt() * carlson_rj(0., 1. - k2, 1., delta) / 3.
}


/// The complete elliptic integral of the third kind,
/// `PI(n, k) = int_0^{pi/2} dphi / ((1 - n sin^2 phi) sqrt(1 - k^2 sin^2 phi))`.
pub fn elliptic_pi(n: f64, k: f64) -> f64 {
    elliptic_k(k) + elliptic_pimk(n, k)
}


/// `PI(n, k) - K(k) = n/3 R_J(0, 1 - k^2, 1, 1 - n)`.
pub fn elliptic_pimk(n: f64, k: f64) -> f64 {
    n * carlson_rj(0., 1. - k * k, 1., 1. - n) / 3.
}
