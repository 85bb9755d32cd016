// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Carlson's symmetric forms of the elliptic integrals.

```text
R_F(x,y,z)   = 1/2 int_0^inf dt / sqrt((t+x)(t+y)(t+z))
R_J(x,y,z,p) = 3/2 int_0^inf dt / ((t+p) sqrt((t+x)(t+y)(t+z)))
R_D(x,y,z)   = R_J(x,y,z,z)
R_C(x,y)     = R_F(x,y,y)
R_G(x,y,z)   = 1/4 int_0^inf t dt / sqrt((t+x)(t+y)(t+z)) (x/(t+x) + y/(t+y) + z/(t+z))
```

All are evaluated with Carlson's duplication algorithm (B. C. Carlson,
"Numerical computation of real or complex elliptic integrals", Numer.
Algorithms 10 (1995) 13), iterating until the arguments agree to within the
tolerance demanded by the seventh-order Taylor correction, which makes the
result accurate to double precision. The iteration count is capped; in
practice it never exceeds about a dozen steps.

*/

use std::f64;

use crate::error::{domain, settle, MathError, Result};
use crate::precision::EPSILON;


const MAX_STEPS: usize = 100;


fn no_convergence(routine: &'static str, estimate: f64) -> MathError {
    MathError::NoConvergence { routine: routine, iterations: MAX_STEPS, estimate: estimate }
}


/// Carlson's `R_F(x, y, z)`; NaN outside the domain (negative arguments,
/// or more than one of them zero).
pub fn carlson_rf(x: f64, y: f64, z: f64) -> f64 {
    settle(try_carlson_rf(x, y, z), None)
}

/// `R_F(x, y, 0)`.
pub fn carlson_rf2(x: f64, y: f64) -> f64 {
    carlson_rf(x, y, 0.)
}

/// Carlson's `R_F(x, y, z)`, reporting errors.
pub fn try_carlson_rf(x: f64, y: f64, z: f64) -> Result<f64> {
    if !(x >= 0. && y >= 0. && z >= 0.) {
        return domain("carlson_rf", "negative argument");
    }

    if zeros(&[x, y, z]) > 1 {
        return domain("carlson_rf", "more than one zero argument");
    }

    let (x0, y0) = (x, y);
    let (mut x, mut y, mut z) = (x, y, z);
    let a0 = (x + y + z) / 3.;
    let q = (3. * EPSILON).powf(-1. / 6.) * (a0 - x).abs().max((a0 - y).abs()).max((a0 - z).abs());
    let mut a = a0;
    let mut fac = 1.;
    let mut converged = false;

    for _ in 0..MAX_STEPS {
        if fac * q < a.abs() {
            converged = true;
            break;
        }

        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * sy + sx * sz + sy * sz;
        a = 0.25 * (a + lambda);
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        fac *= 0.25;
    }

    let xx = (a0 - x0) * fac / a;
    let yy = (a0 - y0) * fac / a;
    let zz = -xx - yy;
    let e2 = xx * yy - zz * zz;
    let e3 = xx * yy * zz;

    let v = (1. - e2 / 10. + e3 / 14. + e2 * e2 / 24. - 3. * e2 * e3 / 44.) / a.sqrt();

    if converged { Ok(v) } else { Err(no_convergence("carlson_rf", v)) }
}


/// Carlson's degenerate form `R_C(x, y) = R_F(x, y, y)`. For `y < 0` this is
/// the Cauchy principal value.
pub fn carlson_rc(x: f64, y: f64) -> f64 {
    settle(try_carlson_rc(x, y), None)
}

/// Carlson's `R_C(x, y)`, reporting errors.
pub fn try_carlson_rc(x: f64, y: f64) -> Result<f64> {
    if !(x >= 0.) || y == 0. || y.is_nan() {
        return domain("carlson_rc", "x < 0 or y = 0");
    }

    if y < 0. {
        return Ok((x / (x - y)).sqrt() * try_carlson_rc(x - y, -y)?);
    }

    let y0 = y;
    let (mut x, mut y) = (x, y);
    let a0 = (x + 2. * y) / 3.;
    let q = (3. * EPSILON).powf(-1. / 8.) * (a0 - x).abs();
    let mut a = a0;
    let mut fac = 1.;
    let mut converged = false;

    for _ in 0..MAX_STEPS {
        if fac * q < a.abs() {
            converged = true;
            break;
        }

        let lambda = 2. * x.sqrt() * y.sqrt() + y;
        a = 0.25 * (a + lambda);
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        fac *= 0.25;
    }

    let s = (y0 - a0) * fac / a;
    let v = (1. + s * s * (3. / 10. + s * (1. / 7. + s * (3. / 8. + s * (9. / 22.
        + s * (159. / 208. + s * 9. / 8.)))))) / a.sqrt();

    if converged { Ok(v) } else { Err(no_convergence("carlson_rc", v)) }
}


// The seventh-order correction shared by R_J and R_D.
fn rj_series(e2: f64, e3: f64, e4: f64, e5: f64) -> f64 {
    1. - 3. * e2 / 14. + e3 / 6. + 9. * e2 * e2 / 88. - 3. * e4 / 22. - 9. * e2 * e3 / 52.
        + 3. * e5 / 26.
}


/// Carlson's `R_J(x, y, z, p)` for `p > 0`; NaN outside the domain.
pub fn carlson_rj(x: f64, y: f64, z: f64, p: f64) -> f64 {
    settle(try_carlson_rj(x, y, z, p), None)
}

/// Carlson's `R_J(x, y, z, p)`, reporting errors. The Cauchy principal value
/// for `p < 0` is not supported.
pub fn try_carlson_rj(x: f64, y: f64, z: f64, p: f64) -> Result<f64> {
    if !(x >= 0. && y >= 0. && z >= 0.) {
        return domain("carlson_rj", "negative argument");
    }

    if !(p > 0.) {
        return domain("carlson_rj", "p <= 0");
    }

    if zeros(&[x, y, z]) > 1 {
        return domain("carlson_rj", "more than one zero argument");
    }

    let (x0, y0, z0) = (x, y, z);
    let (mut x, mut y, mut z, mut p) = (x, y, z, p);
    let a0 = (x + y + z + 2. * p) / 5.;
    let delta = (p - x) * (p - y) * (p - z);
    let q = (0.25 * EPSILON).powf(-1. / 6.)
        * (a0 - x).abs().max((a0 - y).abs()).max((a0 - z).abs()).max((a0 - p).abs());
    let mut a = a0;
    let mut fac = 1.;
    let mut sum = 0.;
    let mut converged = false;

    for _ in 0..MAX_STEPS {
        if fac * q < a.abs() {
            converged = true;
            break;
        }

        let (sx, sy, sz, sp) = (x.sqrt(), y.sqrt(), z.sqrt(), p.sqrt());
        let lambda = sx * sy + sx * sz + sy * sz;
        let d = (sp + sx) * (sp + sy) * (sp + sz);
        let e = fac * fac * fac * delta / (d * d);
        sum += fac / d * try_carlson_rc(1., 1. + e)?;

        a = 0.25 * (a + lambda);
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        p = 0.25 * (p + lambda);
        fac *= 0.25;
    }

    let xx = (a0 - x0) * fac / a;
    let yy = (a0 - y0) * fac / a;
    let zz = (a0 - z0) * fac / a;
    let pp = -0.5 * (xx + yy + zz);
    let e2 = xx * yy + xx * zz + yy * zz - 3. * pp * pp;
    let e3 = xx * yy * zz + 2. * e2 * pp + 4. * pp * pp * pp;
    let e4 = (2. * xx * yy * zz + e2 * pp + 3. * pp * pp * pp) * pp;
    let e5 = xx * yy * zz * pp * pp;

    let v = fac * a.powf(-1.5) * rj_series(e2, e3, e4, e5) + 6. * sum;

    if converged { Ok(v) } else { Err(no_convergence("carlson_rj", v)) }
}


/// Carlson's `R_D(x, y, z) = R_J(x, y, z, z)`; NaN outside the domain.
pub fn carlson_rd(x: f64, y: f64, z: f64) -> f64 {
    settle(try_carlson_rd(x, y, z), None)
}

/// Carlson's `R_D(x, y, z)`, reporting errors.
pub fn try_carlson_rd(x: f64, y: f64, z: f64) -> Result<f64> {
    if !(x >= 0. && y >= 0.) {
        return domain("carlson_rd", "negative argument");
    }

    if !(z > 0.) {
        return domain("carlson_rd", "z <= 0");
    }

    if zeros(&[x, y]) > 1 {
        return domain("carlson_rd", "both x and y zero");
    }

    let (x0, y0) = (x, y);
    let (mut x, mut y, mut z) = (x, y, z);
    let a0 = (x + y + 3. * z) / 5.;
    let q = (0.25 * EPSILON).powf(-1. / 6.) * (a0 - x).abs().max((a0 - y).abs()).max((a0 - z).abs());
    let mut a = a0;
    let mut fac = 1.;
    let mut sum = 0.;
    let mut converged = false;

    for _ in 0..MAX_STEPS {
        if fac * q < a.abs() {
            converged = true;
            break;
        }

        let (sx, sy, sz) = (x.sqrt(), y.sqrt(), z.sqrt());
        let lambda = sx * sy + sx * sz + sy * sz;
        sum += fac / (sz * (z + lambda));

        a = 0.25 * (a + lambda);
        x = 0.25 * (x + lambda);
        y = 0.25 * (y + lambda);
        z = 0.25 * (z + lambda);
        fac *= 0.25;
    }

    let xx = (a0 - x0) * fac / a;
    let yy = (a0 - y0) * fac / a;
    let zz = -(xx + yy) / 3.;
    let xy = xx * yy;
    let z2 = zz * zz;
    let e2 = xy - 6. * z2;
    let e3 = (3. * xy - 8. * z2) * zz;
    let e4 = 3. * (xy - z2) * z2;
    let e5 = xy * z2 * zz;

    let v = fac * a.powf(-1.5) * rj_series(e2, e3, e4, e5) + 3. * sum;

    if converged { Ok(v) } else { Err(no_convergence("carlson_rd", v)) }
}


/// Carlson's `R_G(x, y, z)`; NaN if any argument is negative.
pub fn carlson_rg(x: f64, y: f64, z: f64) -> f64 {
    settle(try_carlson_rg(x, y, z), None)
}

/// `R_G(x, y, 0)`.
pub fn carlson_rg2(x: f64, y: f64) -> f64 {
    carlson_rg(x, y, 0.)
}

/// Carlson's `R_G(x, y, z)`, reporting errors.
///
/// Evaluated as
/// `2 R_G = z R_F - (x-z)(y-z) R_D/3 + sqrt(xy/z)`
/// with the median argument in the `z` slot, which keeps every term finite
/// and free of cancellation.
pub fn try_carlson_rg(x: f64, y: f64, z: f64) -> Result<f64> {
    if !(x >= 0. && y >= 0. && z >= 0.) {
        return domain("carlson_rg", "negative argument");
    }

    let mut v = [x, y, z];
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(::std::cmp::Ordering::Equal));
    let (lo, mid, hi) = (v[0], v[1], v[2]);

    if mid == 0. {
        return Ok(0.5 * hi.sqrt());
    }

    let rf = try_carlson_rf(lo, hi, mid)?;
    let rd = try_carlson_rd(lo, hi, mid)?;
    Ok(0.5 * (mid * rf - (lo - mid) * (hi - mid) * rd / 3. + (lo * hi / mid).sqrt()))
}


fn zeros(args: &[f64]) -> usize {
    args.iter().filter(|&&v| v == 0.).count()
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn equal_arguments() {
        for &x in &[1e-6, 0.3, 1., 17., 4e5] {
            let expected = 1. / (x as f64).sqrt();
            assert_approx_eq!(carlson_rf(x, x, x), expected, 4e-15 * expected);
            assert_approx_eq!(carlson_rc(x, x), expected, 4e-15 * expected);
            let rj = expected.powi(3);
            assert_approx_eq!(carlson_rj(x, x, x, x), rj, 1e-14 * rj);
            assert_approx_eq!(carlson_rd(x, x, x), rj, 1e-14 * rj);
            assert_approx_eq!(carlson_rg(x, x, x), 1. / expected, 4e-15 / expected);
        }
    }

    #[test]
    fn reference_values() {
        assert_approx_eq!(carlson_rf(1., 2., 0.), 1.3110287771460599, 1e-14);
        assert_approx_eq!(carlson_rf(2., 3., 4.), 0.5840828416771517, 1e-14);
        assert_approx_eq!(carlson_rf(1., 2., 3.), 0.7269459354689082, 1e-14);
        assert_approx_eq!(carlson_rc(0., 0.25), PI, 4e-14);
        assert_approx_eq!(carlson_rc(2.25, 2.), 2f64.ln(), 1e-14);
        assert_approx_eq!(carlson_rc(0.25, -2.), 2f64.ln() / 3., 1e-14);
        assert_approx_eq!(carlson_rj(0., 1., 2., 3.), 0.7768862377858233, 1e-14);
        assert_approx_eq!(carlson_rj(2., 3., 4., 5.), 0.14297579667156754, 1e-14);
        assert_approx_eq!(carlson_rd(0., 2., 1.), 1.7972103521033883, 1e-14);
        assert_approx_eq!(carlson_rd(2., 3., 4.), 0.16510527294261053, 1e-14);
        assert_approx_eq!(carlson_rg(0., 16., 16.), PI, 4e-14);
        assert_approx_eq!(carlson_rg(2., 3., 4.), 1.7255030280692278, 1e-14);
        assert_approx_eq!(carlson_rg(0., 0., 4.), 1., 1e-14);
        assert_eq!(carlson_rg(0., 0., 0.), 0.);
    }

    #[test]
    fn two_argument_forms() {
        assert_eq!(carlson_rf2(1., 2.), carlson_rf(1., 2., 0.));
        assert_eq!(carlson_rg2(0.5, 2.), carlson_rg(0.5, 2., 0.));
        assert_approx_eq!(carlson_rc(0., 1.), 0.5 * PI, 1e-15);
    }

    #[test]
    fn domain_errors() {
        assert!(carlson_rf(-1., 2., 3.).is_nan());
        assert!(carlson_rf(0., 0., 3.).is_nan());
        assert!(carlson_rc(1., 0.).is_nan());
        assert!(carlson_rc(-1., 2.).is_nan());
        assert!(carlson_rj(1., 2., 3., 0.).is_nan());
        assert!(carlson_rj(1., 2., 3., -1.).is_nan());
        assert!(carlson_rd(1., 2., 0.).is_nan());
        assert!(carlson_rd(0., 0., 2.).is_nan());
        assert!(carlson_rg(-1., 2., 3.).is_nan());

        match try_carlson_rj(1., 2., 3., -1.) {
            Err(MathError::Domain { routine, .. }) => assert_eq!(routine, "carlson_rj"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn symmetry() {
        for _ in 0..100 {
            let x = 10f64.powf(4. * rand::random::<f64>() - 2.);
            let y = 10f64.powf(4. * rand::random::<f64>() - 2.);
            let z = 10f64.powf(4. * rand::random::<f64>() - 2.);
            let p = 10f64.powf(4. * rand::random::<f64>() - 2.);

            let f = carlson_rf(x, y, z);
            assert_approx_eq!(carlson_rf(z, x, y), f, 1e-14 * f);
            let j = carlson_rj(x, y, z, p);
            assert_approx_eq!(carlson_rj(y, z, x, p), j, 1e-13 * j);
            let g = carlson_rg(x, y, z);
            assert_approx_eq!(carlson_rg(y, z, x), g, 1e-14 * g);

            // R_D(x,y,z) + R_D(y,z,x) + R_D(z,x,y) = 3/sqrt(xyz)
            let sum = carlson_rd(x, y, z) + carlson_rd(y, z, x) + carlson_rd(z, x, y);
            let expected = 3. / (x * y * z).sqrt();
            assert_approx_eq!(sum, expected, 1e-13 * expected);
        }
    }
}
