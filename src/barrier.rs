// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Angular-momentum barrier factors.

The factors are built on the polynomials

```text
g_0(x) = 1
g_1(x) = 1 - ix
g_{l+1}(x) = (2l + 1) g_l(x) - x^2 g_{l-1}(x)
```

(`|g_l(x)|^2` is the familiar Blatt-Weisskopf denominator), so that the
barrier factor `x^l/|g_l(x)|` tends to one for large `x` and behaves as
`x^l/(2l-1)!!` near zero.

*/

use num_complex::Complex64;

use crate::clenshaw::term;


/// The complex polynomial `g_l(x)`.
pub fn barrier_g(x: f64, l: u16) -> Complex64 {
    match l {
        0 => Complex64::new(1., 0.),
        1 => Complex64::new(1., -x),
        _ => {
            let l = l as usize;
            let x2 = x * x;
            let alpha = |k: usize| (2 * k + 1) as f64;
            let beta = |_| -x2;
            Complex64::new(term(l, alpha, beta, 1., 1.), term(l, alpha, beta, 0., -x))
        }
    }
}


/// The barrier factor `x^l/|g_l(x)|`.
pub fn barrier_factor(x: f64, l: u16) -> f64 {
    if l == 0 {
        return 1.;
    }

    x.powi(l as i32) / barrier_g(x, l).norm()
}


/// The modulus `|g_l(x)|`.
pub fn barrier_absg(x: f64, l: u16) -> f64 {
    barrier_g(x, l).norm()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_orders() {
        let x: f64 = 0.8;
        assert_eq!(barrier_factor(x, 0), 1.);
        assert_approx_eq!(barrier_factor(x, 1), x / (1. + x * x).sqrt());

        let g2 = barrier_g(x, 2);
        assert_approx_eq!(g2.re, 3. - x * x);
        assert_approx_eq!(g2.im, -3. * x);
        assert_approx_eq!(barrier_absg(x, 2), (x.powi(4) + 3. * x * x + 9.).sqrt());
    }

    #[test]
    fn third_order() {
        // |g_3|^2 = x^6 + 6x^4 + 45x^2 + 225
        let x: f64 = 2.3;
        let expected = (x.powi(6) + 6. * x.powi(4) + 45. * x * x + 225.).sqrt();
        assert_approx_eq!(barrier_absg(x, 3), expected, 1e-10);
    }

    #[test]
    fn limits() {
        for l in 0..=8 {
            for &x in &[150., 300., 1e3, 1e4] {
                assert!((barrier_factor(x, l) - 1.).abs() < 1e-3, "l = {} x = {}", l, x);
            }
        }

        // Near zero the factor goes as x^l/(2l-1)!!
        let x: f64 = 1e-3;
        assert_approx_eq!(barrier_factor(x, 2) / (x * x / 3.), 1., 1e-5);
        assert_approx_eq!(barrier_factor(x, 3) / (x.powi(3) / 15.), 1., 1e-5);
    }
}
