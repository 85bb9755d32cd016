// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! The Faddeeva function and the error-function family derived from it.

```text
w(z) = exp(-z^2) erfc(-iz)
```

The evaluation is delegated to the `errorfunctions` crate, which implements
Steven G. Johnson's Faddeeva package (Algorithm 916 with the Poppe-Wijers
continued fraction far from the origin and Chebyshev fits along the axes).
The functions here fix the names and the `num_complex` types used by the rest
of the crate.

*/

use errorfunctions::{ComplexErrorFunctions, RealErrorFunctions};
use num_complex::Complex64;


/// The Faddeeva function `w(z) = exp(-z^2) erfc(-iz)`.
pub fn faddeeva_w(z: Complex64) -> Complex64 {
    ComplexErrorFunctions::w(z)
}


/// The error function of a complex argument.
pub fn erf_complex(z: Complex64) -> Complex64 {
    ComplexErrorFunctions::erf(z)
}


/// The complementary error function of a complex argument.
pub fn erfc_complex(z: Complex64) -> Complex64 {
    ComplexErrorFunctions::erfc(z)
}


/// The scaled complementary error function `erfcx(z) = exp(z^2) erfc(z) = w(iz)`.
pub fn erfcx_complex(z: Complex64) -> Complex64 {
    ComplexErrorFunctions::erfcx(z)
}


/// The imaginary error function `erfi(z) = -i erf(iz)`.
pub fn erfi_complex(z: Complex64) -> Complex64 {
    ComplexErrorFunctions::erfi(z)
}


/// Dawson's integral `F(z) = sqrt(pi)/2 exp(-z^2) erfi(z)`.
pub fn dawson_complex(z: Complex64) -> Complex64 {
    ComplexErrorFunctions::dawson(z)
}


/// The helper `H_2(a, u_1, u_2)` of the relativistic Voigt profile
/// (Kycia and Jadach, arXiv:1711.09304):
///
/// ```text
/// H_2(a, u1, u2) = a/pi int exp(-t^2) dt / ((u1 - t)^2 (u2 - t)^2 + a^2)
/// ```
///
/// The profile itself is `V_2(m; mu, Gamma, sigma) = H_2(a, u1, u2) / (2 sqrt(pi) sigma^2)`
/// with `u1 = (m - mu)/(sqrt(2) sigma)`, `u2 = (m + mu)/(sqrt(2) sigma)` and
/// `a = mu Gamma/(2 sigma^2)`. Only `|a|` matters. At `a = 0` the
/// Lorentzian factor becomes a delta function on the two roots, which
/// diverges when they coincide.
pub fn relativistic_voigt_h2(a: f64, u1: f64, u2: f64) -> f64 {
    let a = a.abs();

    if a == 0. {
        return ((-u1 * u1).exp() + (-u2 * u2).exp()) / (u1 - u2).abs();
    }

    // (t - u1)(t - u2) - ia = (t - r1)(t - r2) with Im r1 > 0 > Im r2, so
    // that the integral splits into w(r1) and w(-r2). The smaller root is
    // taken from the product to avoid cancellation.
    let d = u1 - u2;
    let sd = Complex64::new(d * d, 4. * a).sqrt();
    let sum = u1 + u2;
    let prod = Complex64::new(u1 * u2, -a);

    let (r1, r2) = if sum >= 0. {
        let r1 = 0.5 * (sum + sd);
        (r1, prod / r1)
    } else {
        let r2 = 0.5 * (sum - sd);
        (prod / r2, r2)
    };

    ((faddeeva_w(r1) + faddeeva_w(-r2)) / sd).re
}


/// The error function.
pub fn erf(x: f64) -> f64 {
    RealErrorFunctions::erf(x)
}


/// The complementary error function.
pub fn erfc(x: f64) -> f64 {
    RealErrorFunctions::erfc(x)
}


/// The scaled complementary error function `exp(x^2) erfc(x)`. Overflows for
/// `x < -26.6`.
pub fn erfcx(x: f64) -> f64 {
    RealErrorFunctions::erfcx(x)
}


/// The imaginary error function `-i erf(ix)`.
pub fn erfi(x: f64) -> f64 {
    RealErrorFunctions::erfi(x)
}


/// Dawson's integral `F(x) = exp(-x^2) int_0^x exp(t^2) dt`.
pub fn dawson(x: f64) -> f64 {
    RealErrorFunctions::dawson(x)
}
