/*! Special functions and kinematics for physics analysis.

This crate collects the numerical building blocks that keep turning up when
fitting mass spectra and angular distributions: reduced exponentials and
Tricomi's incomplete gamma function, continued fractions, Pochhammer
symbols, Clenshaw summation of orthogonal-polynomial and Fourier series,
Carlson's symmetric elliptic integrals and the Legendre forms built on them,
the Faddeeva function and its relatives (with the relativistic Voigt
helper built on it), modified Bessel functions of the
second kind, Gaussian integrals, Blatt-Weisskopf barrier factors, and
relativistic phase-space and Gram-determinant formulae.

Everything works in `f64` (with `num_complex::Complex64` where complex
arguments are natural). The public functions follow the conventional
numerical-library contract: arguments outside the domain give NaN, results
that would overflow give the large finite [`OVERFLOW_SENTINEL`], and series
that run out of iterations give their best estimate. The `try_*` variants
report these conditions as [`MathError`] values instead, and the
[`Monitored`] handle logs them through `slog`.

Several of the recurrences accumulate in a double-double type, [`Dd`], to
survive the cancellation inherent in them.

*/

#![deny(missing_docs)]

extern crate errorfunctions;
extern crate num_complex;
#[macro_use] extern crate slog;
extern crate special;
extern crate thiserror;

#[cfg(test)] #[macro_use] extern crate assert_approx_eq;
#[cfg(test)] extern crate rand;

pub mod barrier;
pub mod bessel;
pub mod carlson;
pub mod clenshaw;
pub mod continued_fraction;
pub mod elliptic;
pub mod error;
pub mod exponential;
pub mod faddeeva;
pub mod gamma;
pub mod gauss;
pub mod kinematics;
pub mod monitored;
pub mod pochhammer;
pub mod precision;

pub use barrier::{barrier_absg, barrier_factor, barrier_g};
pub use bessel::{bessel_kn, bessel_kn_scaled, bessel_knu, bessel_knu_scaled, try_bessel_knu};
pub use carlson::{
    carlson_rc, carlson_rd, carlson_rf, carlson_rf2, carlson_rg, carlson_rg2, carlson_rj,
    try_carlson_rc, try_carlson_rd, try_carlson_rf, try_carlson_rg, try_carlson_rj,
};
pub use clenshaw::{
    clenshaw, clenshaw_chebyshev, clenshaw_cosine, clenshaw_fourier, clenshaw_hermite,
    clenshaw_legendre, clenshaw_polynom, clenshaw_sine, horner_a0, horner_an,
};
pub use continued_fraction::{
    continued_fraction, continued_fraction_b, continued_fraction_simple, try_continued_fraction,
};
pub use elliptic::{
    elliptic_e, elliptic_e_phi, elliptic_f_phi, elliptic_k, elliptic_kme, elliptic_kz,
    elliptic_pi, elliptic_pimk, elliptic_z,
};
pub use error::{MathError, Result};
pub use exponential::{alpha_n, alpha_prime_n, beta_n, exp_n, exp_rel_n, exprel, kummer};
pub use faddeeva::{
    dawson, dawson_complex, erf, erf_complex, erfc, erfc_complex, erfcx, erfcx_complex, erfi,
    erfi_complex, faddeeva_w, relativistic_voigt_h2,
};
pub use gamma::{gamma_star, gamma_star_int, igamma, psi, sech, sech_complex};
pub use gauss::{
    gauss_cdf, gauss_int, gauss_pdf, gaussian_integral, gaussian_integral_left,
    gaussian_integral_right, owen, probit, student_cdf,
};
pub use kinematics::{
    armenteros_podolanski_x, cos_decay_angle_chi, cos_theta, cos_theta_rest, decay_angle,
    decay_angle_chi, decay_angle_lab, euclidean_norm2, g_function, gram, parallel, phasespace2,
    phasespace2_bk, phasespace3, q, q_s, rest_energy, rest_momentum, sin2_theta,
    sin_decay_angle_chi, transverse, transverse_momentum_dir, triangle, LorentzVector,
    ThreeVector,
};
pub use monitored::Monitored;
pub use pochhammer::{falling_factorial, pochhammer, pochhammer_with_derivative, rising_factorial};
pub use precision::{Dd, OVERFLOW_SENTINEL};
