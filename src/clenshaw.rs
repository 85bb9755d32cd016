// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Clenshaw summation of series in functions obeying three-term
recurrences.

Given basis functions with

```text
phi_{k+1}(x) = alpha_k(x) phi_k(x) + beta_k(x) phi_{k-1}(x)
```

the sum `S = sum_k c_k phi_k(x)` is obtained from the backward recurrence

```text
b_k = c_k + alpha_k b_{k+1} + beta_{k+1} b_{k+2}
S   = c_0 phi_0 + b_1 phi_1 + beta_1 b_2 phi_0
```

without ever evaluating the `phi_k` themselves. Empty coefficient sequences
sum to zero.

*/


/// The core backward recurrence over `n` coefficients supplied by index.
fn backward<C, A, B>(n: usize, coeff: C, alpha: A, beta: B, phi0: f64, phi1: f64) -> f64
    where C: Fn(usize) -> f64, A: Fn(usize) -> f64, B: Fn(usize) -> f64
{
    if n == 0 {
        return 0.;
    }

    let mut b1 = 0.; // b_{k+1}
    let mut b2 = 0.; // b_{k+2}

    for k in (1..n).rev() {
        let b0 = coeff(k) + alpha(k) * b1 + beta(k + 1) * b2;
        b2 = b1;
        b1 = b0;
    }

    coeff(0) * phi0 + b1 * phi1 + beta(1) * b2 * phi0
}


/// Sum `sum_k c_k phi_k` for a user-supplied recurrence.
///
/// The closures give `alpha_k` and `beta_k` for the argument of interest;
/// `phi0` and `phi1` are the first two basis functions at that argument.
pub fn clenshaw<A, B>(coeffs: &[f64], alpha: A, beta: B, phi0: f64, phi1: f64) -> f64
    where A: Fn(usize) -> f64, B: Fn(usize) -> f64
{
    backward(coeffs.len(), |k| coeffs[k], alpha, beta, phi0, phi1)
}


/// A single basis function `phi_n` of a user-supplied recurrence, computed
/// as the Clenshaw sum of a unit coefficient vector.
pub fn term<A, B>(n: usize, alpha: A, beta: B, phi0: f64, phi1: f64) -> f64
    where A: Fn(usize) -> f64, B: Fn(usize) -> f64
{
    match n {
        0 => phi0,
        1 => phi1,
        _ => backward(n + 1, |k| if k == n { 1. } else { 0. }, alpha, beta, phi0, phi1),
    }
}


/// `sum_k a_k T_k(x)` over Chebyshev polynomials of the first kind.
pub fn clenshaw_chebyshev(a: &[f64], x: f64) -> f64 {
    clenshaw(a, |_| 2. * x, |_| -1., 1., x)
}


/// `sum_k a_k P_k(x)` over Legendre polynomials.
pub fn clenshaw_legendre(a: &[f64], x: f64) -> f64 {
    clenshaw(a,
             |k| (2 * k + 1) as f64 * x / (k + 1) as f64,
             |k| -(k as f64) / (k + 1) as f64,
             1., x)
}


/// `sum_k a_k He_k(x)` over the probabilists' Hermite polynomials.
pub fn clenshaw_hermite(a: &[f64], x: f64) -> f64 {
    clenshaw(a, |_| x, |k| -(k as f64), 1., x)
}


/// `sum_k a_k x^k`.
pub fn clenshaw_polynom(a: &[f64], x: f64) -> f64 {
    horner_a0(a, x)
}


/// `sum_k a_k x^k`, by Horner's rule.
pub fn horner_a0(a: &[f64], x: f64) -> f64 {
    a.iter().rev().fold(0., |acc, &c| acc * x + c)
}


/// `sum_k a_k x^(n-k)` where `n + 1` is the number of coefficients; that is,
/// the highest power comes first.
pub fn horner_an(a: &[f64], x: f64) -> f64 {
    a.iter().fold(0., |acc, &c| acc * x + c)
}


/// The cosine series `a_0/2 + sum_{k>=1} a_k cos(kx)`.
pub fn clenshaw_cosine(a: &[f64], x: f64) -> f64 {
    cosine_strided(a, 0, 1, x)
}


/// The sine series `sum_{k>=1} a_k sin(kx)`, where the first element of the
/// slice multiplies `sin(x)`.
pub fn clenshaw_sine(a: &[f64], x: f64) -> f64 {
    sine_strided(a, 0, 1, x)
}


/// The Fourier series `a_0/2 + sum_{k>=1} (a_{2k-1} sin(kx) + a_{2k} cos(kx))`.
pub fn clenshaw_fourier(a: &[f64], x: f64) -> f64 {
    cosine_strided(a, 0, 2, x) + sine_strided(a, 1, 2, x)
}


fn strided_len(len: usize, start: usize, step: usize) -> usize {
    if len <= start { 0 } else { (len - start + step - 1) / step }
}


fn cosine_strided(a: &[f64], start: usize, step: usize, x: f64) -> f64 {
    let n = strided_len(a.len(), start, step);
    let c = x.cos();
    let coeff = |k: usize| if k == 0 { 0.5 * a[start] } else { a[start + k * step] };
    backward(n, coeff, |_| 2. * c, |_| -1., 1., c)
}


fn sine_strided(a: &[f64], start: usize, step: usize, x: f64) -> f64 {
    let n = strided_len(a.len(), start, step);
    let c = x.cos();
    let s = x.sin();
    backward(n, |k| a[start + k * step], |_| 2. * c, |_| -1., s, 2. * s * c)
}
