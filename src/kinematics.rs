// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Relativistic kinematics.

Invariant-mass helpers, the Källén triangle function and the four-particle
`G` function, two- and three-body phase space, Gram determinants of
four-vectors, and rest-frame momenta, energies and decay angles. The metric
is `(+, -, -, -)` throughout.

Functions that need a time-like reference frame, or that take the square
root of a quantity that must be positive, return `None` when the inputs do
not satisfy those conditions.

*/

use std::f64;
use std::f64::consts::PI;
use std::ops::{Add, Mul, Neg, Sub};

use crate::elliptic::{elliptic_kme, elliptic_kz};
use crate::precision::is_zero;


/// A four-momentum `(px, py, pz, e)`.
#[derive(Copy,Clone,Debug,Default,PartialEq)]
pub struct LorentzVector {
    /// The x component of the momentum.
    pub px: f64,

    /// The y component of the momentum.
    pub py: f64,

    /// The z component of the momentum.
    pub pz: f64,

    /// The energy.
    pub e: f64,
}

impl LorentzVector {
    /// Create a four-vector from its components.
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        LorentzVector { px: px, py: py, pz: pz, e: e }
    }

    /// A particle of mass `m` at rest.
    pub fn at_rest(m: f64) -> Self {
        LorentzVector::new(0., 0., 0., m)
    }

    /// A particle of mass `m` with three-momentum `(px, py, pz)`.
    pub fn with_mass(px: f64, py: f64, pz: f64, m: f64) -> Self {
        let e = (px * px + py * py + pz * pz + m * m).sqrt();
        LorentzVector::new(px, py, pz, e)
    }

    /// The Minkowski product.
    pub fn dot(&self, other: &LorentzVector) -> f64 {
        self.e * other.e - self.px * other.px - self.py * other.py - self.pz * other.pz
    }

    /// The squared invariant mass.
    pub fn m2(&self) -> f64 {
        self.dot(self)
    }

    /// The invariant mass; negative for space-like vectors, following the
    /// usual convention `-sqrt(-m2)`.
    pub fn m(&self) -> f64 {
        let m2 = self.m2();

        if m2 >= 0. {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }

    /// The squared magnitude of the three-momentum.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// The three-momentum.
    pub fn p3(&self) -> ThreeVector {
        ThreeVector::new(self.px, self.py, self.pz)
    }

    fn components(&self) -> [f64; 4] {
        [self.e, self.px, self.py, self.pz]
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector::new(self.px + rhs.px, self.py + rhs.py, self.pz + rhs.pz, self.e + rhs.e)
    }
}

impl Sub for LorentzVector {
    type Output = LorentzVector;

    fn sub(self, rhs: LorentzVector) -> LorentzVector {
        LorentzVector::new(self.px - rhs.px, self.py - rhs.py, self.pz - rhs.pz, self.e - rhs.e)
    }
}

impl Neg for LorentzVector {
    type Output = LorentzVector;

    fn neg(self) -> LorentzVector {
        LorentzVector::new(-self.px, -self.py, -self.pz, -self.e)
    }
}

impl Mul<f64> for LorentzVector {
    type Output = LorentzVector;

    fn mul(self, rhs: f64) -> LorentzVector {
        LorentzVector::new(self.px * rhs, self.py * rhs, self.pz * rhs, self.e * rhs)
    }
}

impl Mul<LorentzVector> for f64 {
    type Output = LorentzVector;

    fn mul(self, rhs: LorentzVector) -> LorentzVector {
        rhs * self
    }
}


/// A three-vector, for the momentum-space helpers.
#[derive(Copy,Clone,Debug,Default,PartialEq)]
pub struct ThreeVector {
    /// The x component.
    pub x: f64,

    /// The y component.
    pub y: f64,

    /// The z component.
    pub z: f64,
}

impl ThreeVector {
    /// Create a vector from its components.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        ThreeVector { x: x, y: y, z: z }
    }

    /// The scalar product.
    pub fn dot(&self, other: &ThreeVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// The vector product.
    pub fn cross(&self, other: &ThreeVector) -> ThreeVector {
        ThreeVector::new(self.y * other.z - self.z * other.y,
                         self.z * other.x - self.x * other.z,
                         self.x * other.y - self.y * other.x)
    }

    /// The squared length.
    pub fn mag2(&self) -> f64 {
        self.dot(self)
    }

    /// The length.
    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }
}

impl Add for ThreeVector {
    type Output = ThreeVector;

    fn add(self, rhs: ThreeVector) -> ThreeVector {
        ThreeVector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for ThreeVector {
    type Output = ThreeVector;

    fn sub(self, rhs: ThreeVector) -> ThreeVector {
        ThreeVector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for ThreeVector {
    type Output = ThreeVector;

    fn mul(self, rhs: f64) -> ThreeVector {
        ThreeVector::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}


/// The Källén triangle function `a^2 + b^2 + c^2 - 2ab - 2bc - 2ca`.
pub fn triangle(a: f64, b: f64, c: f64) -> f64 {
    a * a + b * b + c * c - 2. * a * b - 2. * b * c - 2. * a * c
}


/// The universal four-particle kinematic function `G(x, y, z, u, v, w)` of
/// Byckling & Kajantie, eq. (V.5.23), in the corrected form of Nyborg et al.
/// (Phys. Rev. 140 (1965) B914). For example the Dalitz-plot boundary is
/// `G(s2, s1, m3^2, m1^2, s, m2^2) = 0`.
pub fn g_function(x: f64, y: f64, z: f64, u: f64, v: f64, w: f64) -> f64 {
    x * x * y + x * y * y
        + z * z * u + z * u * u
        + v * v * w + v * w * w
        + x * z * w + x * u * v
        + y * z * v + y * u * w
        - x * y * (z + u + v + w)
        - z * u * (x + y + v + w)
        - v * w * (x + y + z + u)
}


/// The momentum of either daughter in the decay `m -> m1 m2`, in the rest
/// frame of `m`. Zero below threshold or for negative masses.
pub fn q(m: f64, m1: f64, m2: f64) -> f64 {
    if m <= m1 + m2 || m1 < 0. || m2 < 0. {
        return 0.;
    }

    let l = triangle(m * m, m1 * m1, m2 * m2);

    if l > 0. {
        0.5 * l.sqrt() / m
    } else {
        0.
    }
}


/// [`q`] in terms of squared masses: `sqrt(lambda(s, m1sq, m2sq) / 4s)`.
pub fn q_s(s: f64, m1sq: f64, m2sq: f64) -> f64 {
    if s <= 0. || m1sq < 0. || m2sq < 0. {
        return 0.;
    }

    let l = triangle(s, m1sq, m2sq);

    if l > 0. {
        0.5 * (l / s).sqrt()
    } else {
        0.
    }
}


fn two_body(x: f64, m1: f64, m2: f64, norm: f64) -> f64 {
    let m1 = m1.max(0.);
    let m2 = m2.max(0.);

    if x <= m1 + m2 {
        return 0.;
    }

    let s = x * x;
    let lambda = triangle(s, m1 * m1, m2 * m2);

    if lambda > 0. {
        norm * lambda.sqrt() / s
    } else {
        0.
    }
}


/// Two-body phase space `sqrt(lambda(x^2, m1^2, m2^2)) / (8 pi x^2)`.
pub fn phasespace2(x: f64, m1: f64, m2: f64) -> f64 {
    two_body(x, m1, m2, 1. / (8. * PI))
}


/// Two-body phase space in the normalization of Byckling & Kajantie,
/// eq. (V.1.9): `pi/2 sqrt(lambda) / x^2`.
pub fn phasespace2_bk(x: f64, m1: f64, m2: f64) -> f64 {
    two_body(x, m1, m2, 0.5 * PI)
}


/// Three-body phase space for a parent of mass `x`, in the normalization
/// of [`phasespace2_bk`].
///
/// With massive daughters this is Byckling & Kajantie's closed form in terms
/// of complete and incomplete elliptic integrals; one or two massless
/// daughters, and the all-massless case, have elementary closed forms.
pub fn phasespace3(x: f64, m1: f64, m2: f64, m3: f64) -> f64 {
    let norm = 0.125 * PI * PI;

    let mut m = [m1.max(0.), m2.max(0.), m3.max(0.)];

    for mi in m.iter_mut() {
        if is_zero(*mi) {
            *mi = 0.;
        }
    }

    if x <= m[0] + m[1] + m[2] {
        return 0.;
    }

    m.sort_by(|a, b| b.partial_cmp(a).unwrap_or(::std::cmp::Ordering::Equal));
    let [m1, m2, m3] = m;
    let s = x * x;

    if m1 == 0. {
        return norm * s;
    }

    if m2 == 0. {
        let m1sq = m1 * m1;
        let sqlam = triangle(s, m1sq, 0.).sqrt();
        let res = sqlam * (s + m1sq) / (s * s) + 2. * m1sq * (m1sq / s).ln() / s;
        return norm * s * res;
    }

    if m3 == 0. {
        let m1sq = m1 * m1;
        let m2sq = m2 * m2;
        let sum = m1sq + m2sq;
        let diff = (m1sq - m2sq).abs();
        let sqlam = triangle(s, m1sq, m2sq).sqrt();

        let mut res = sqlam * (s + sum) / (s * s);
        res += 2. * diff * ((s * sum - diff * diff + diff * sqlam) / (2. * m1 * m2 * s)).ln() / s;
        res -= 2. * (s * sum - 2. * m1sq * m2sq) * ((s - sum + sqlam) / (2. * m1 * m2)).ln() / (s * s);
        return norm * s * res;
    }

    let qp = (x + m1 + m2 + m3) * (x + m1 - m2 - m3) * (x - m1 + m2 - m3) * (x - m1 - m2 + m3);
    let qm = (x - m1 - m2 - m3) * (x - m1 + m2 + m3) * (x + m1 - m2 + m3) * (x + m1 + m2 - m3);
    let k = (qm / qp).sqrt();
    let sqrt_qp = qp.sqrt();

    let (m1sq, m2sq, m3sq) = (m1 * m1, m2 * m2, m3 * m3);

    // sin(phi_i) = sqrt(Q+)/(s + m_i^2 - m_j^2 - m_k^2) and
    // cos(phi_i) = 2(x m_i - m_j m_k)/(same). The angle of the lightest
    // daughter passes pi/2 when x m3 < m1 m2, so asin alone won't do.
    let angles = [
        (s + m1sq - m2sq - m3sq, 2. * (x * m1 - m2 * m3)),
        (s - m1sq + m2sq - m3sq, 2. * (x * m2 - m1 * m3)),
        (s - m1sq - m2sq + m3sq, 2. * (x * m3 - m1 * m2)),
    ];

    let kz: f64 = angles.iter()
        .map(|&(denom, cos_num)| {
            let sin_phi = sqrt_qp / denom;
            elliptic_kz(sqrt_qp.atan2(cos_num), k) / (sin_phi * sin_phi)
        })
        .sum();

    (qp * kz - sqrt_qp * (s + m1sq + m2sq + m3sq) * elliptic_kme(k)) / s * norm
}


/// Gram determinants of four-vectors, following Byckling & Kajantie,
/// section IV.5.
pub mod gram {
    use super::{g_function, LorentzVector};
    use crate::precision::Dd;

    /// `Delta(p) = p^2`.
    pub fn delta1(p: &LorentzVector) -> f64 {
        p.m2()
    }

    /// `Delta(p1, p2) = p1^2 p2^2 - (p1.p2)^2 = -lambda((p1+p2)^2, p1^2, p2^2)/4`.
    pub fn delta2(p1: &LorentzVector, p2: &LorentzVector) -> f64 {
        let d = Dd::new(p1.dot(p2));
        (Dd::new(p1.m2()) * p2.m2() - d * d).to_f64()
    }

    /// `Delta(p1, p2, p3)`, the symmetric 3x3 Gram determinant, through the
    /// `G` function.
    pub fn delta3(p1: &LorentzVector, p2: &LorentzVector, p3: &LorentzVector) -> f64 {
        let p12 = *p1 + *p2;

        -0.25 * g_function(
            p12.m2(),
            (*p1 - *p3).m2(),
            (p12 - *p3).m2(),
            p1.m2(),
            p2.m2(),
            p3.m2(),
        )
    }

    /// `Delta(p1, p2, p3, p4)`, the symmetric 4x4 Gram determinant.
    pub fn delta4(p1: &LorentzVector, p2: &LorentzVector, p3: &LorentzVector, p4: &LorentzVector) -> f64 {
        g4(p1, p2, p3, p4, p1, p2, p3, p4)
    }

    /// The non-symmetric Gram determinant `det [pi.qj]` for two pairs.
    pub fn g2(p1: &LorentzVector, p2: &LorentzVector, q1: &LorentzVector, q2: &LorentzVector) -> f64 {
        let a11 = Dd::new(p1.dot(q1));
        let a22 = Dd::new(p2.dot(q2));
        let a12 = Dd::new(p1.dot(q2));
        let a21 = Dd::new(p2.dot(q1));
        (a11 * a22 - a12 * a21).to_f64()
    }

    /// The non-symmetric Gram determinant `det [pi.qj]` for two triples.
    pub fn g3(
        p1: &LorentzVector, p2: &LorentzVector, p3: &LorentzVector,
        q1: &LorentzVector, q2: &LorentzVector, q3: &LorentzVector,
    ) -> f64 {
        let p = [p1, p2, p3];
        let q = [q1, q2, q3];
        let mut a = [[0.; 3]; 3];

        for i in 0..3 {
            for j in 0..3 {
                a[i][j] = p[i].dot(q[j]);
            }
        }

        a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0])
    }

    /// The non-symmetric Gram determinant `det [pi.qj]` for two quadruples.
    pub fn g4(
        p1: &LorentzVector, p2: &LorentzVector, p3: &LorentzVector, p4: &LorentzVector,
        q1: &LorentzVector, q2: &LorentzVector, q3: &LorentzVector, q4: &LorentzVector,
    ) -> f64 {
        let p = [p1, p2, p3, p4];
        let q = [q1, q2, q3, q4];
        let mut a = [[0.; 4]; 4];

        for i in 0..4 {
            for j in 0..4 {
                a[i][j] = p[i].dot(q[j]);
            }
        }

        determinant4(a)
    }

    /// Gaussian elimination with partial pivoting.
    pub(super) fn determinant4(mut a: [[f64; 4]; 4]) -> f64 {
        let mut det = 1.;

        for col in 0..4 {
            let mut pivot = col;

            for row in (col + 1)..4 {
                if a[row][col].abs() > a[pivot][col].abs() {
                    pivot = row;
                }
            }

            if a[pivot][col] == 0. {
                return 0.;
            }

            if pivot != col {
                a.swap(pivot, col);
                det = -det;
            }

            det *= a[col][col];

            for row in (col + 1)..4 {
                let f = a[row][col] / a[col][col];

                for k in col..4 {
                    a[row][k] -= f * a[col][k];
                }
            }
        }

        det
    }
}


/// The magnitude of the three-momentum of `v` in the rest frame of `frame`,
/// `sqrt((v.M)^2/M^2 - v^2)`. `None` unless `frame` is time-like and the
/// squared momentum is non-negative.
pub fn rest_momentum(v: &LorentzVector, frame: &LorentzVector) -> Option<f64> {
    let m2 = frame.m2();

    if m2 <= 0. {
        return None;
    }

    let vm = v.dot(frame);
    let p2 = vm * vm / m2 - v.m2();

    if p2 < 0. {
        None
    } else {
        Some(p2.sqrt())
    }
}


/// The energy of `v` in the rest frame of `frame`, `v.M / sqrt(M^2)`.
pub fn rest_energy(v: &LorentzVector, frame: &LorentzVector) -> Option<f64> {
    let m2 = frame.m2();

    if m2 <= 0. {
        None
    } else {
        Some(v.dot(frame) / m2.sqrt())
    }
}


/// The cosine of the decay angle of `d` in the rest frame of its parent `q`,
/// measured from the flight direction of `q` in the rest frame of `p`:
///
/// ```text
/// cos theta = ((P.D) Q^2 - (P.Q)(D.Q)) / sqrt([(P.Q)^2 - Q^2 P^2] [(D.Q)^2 - Q^2 D^2])
/// ```
///
/// The expression is symmetric under `P <-> D`.
pub fn decay_angle(p: &LorentzVector, q: &LorentzVector, d: &LorentzVector) -> Option<f64> {
    let pd = p.dot(d);
    let pq = p.dot(q);
    let qd = q.dot(d);
    let mq2 = q.m2();
    let mp2 = p.m2();
    let md2 = d.m2();

    let value = (pq * pq - mq2 * mp2) * (qd * qd - mq2 * md2);

    if value <= 0. {
        None
    } else {
        Some((pd * mq2 - pq * qd) / value.sqrt())
    }
}


/// [`decay_angle`] with the laboratory as the reference frame: the angle of
/// `d` in the rest frame of `m` relative to the boost direction of `m`.
pub fn decay_angle_lab(d: &LorentzVector, m: &LorentzVector) -> Option<f64> {
    decay_angle(&LorentzVector::at_rest(10. * m.e), m, d)
}


/// The cosine of the angle between `v1` and `v2` in the rest frame of
/// `frame`, written in manifestly invariant form.
pub fn cos_theta_rest(v1: &LorentzVector, v2: &LorentzVector, frame: &LorentzVector) -> Option<f64> {
    let m2 = frame.m2();

    if m2 <= 0. {
        return None;
    }

    let v1m = v1.dot(frame);
    let v2m = v2.dot(frame);
    let m1sq = v1.m2();
    let m2sq = v2.m2();

    let e1e2 = v1m * v2m / m2;
    let p1p2_sq = (v1m * v1m / m2 - m1sq) * (v2m * v2m / m2 - m2sq);

    if p1p2_sq <= 0. {
        return None;
    }

    let var = (*v1 + *v2).m2() - m1sq - m2sq;
    Some((e1e2 - 0.5 * var) / p1p2_sq.sqrt())
}


/// The cosine of the angle between `p1` and `p2` in the rest frame of
/// `frame`, through Gram determinants:
/// `-G(M, p1; M, p2) / sqrt(Delta(M, p1) Delta(M, p2))`.
pub fn cos_theta(p1: &LorentzVector, p2: &LorentzVector, frame: &LorentzVector) -> Option<f64> {
    let f1 = gram::delta2(frame, p1);
    let f2 = gram::delta2(frame, p2);

    if f1 >= 0. || f2 >= 0. {
        return None;
    }

    Some(-gram::g2(frame, p1, frame, p2) / (f1 * f2).sqrt())
}


/// The squared sine of the angle between `p1` and `p2` in the rest frame of
/// `frame`: `Delta(M) Delta(M, p1, p2) / (Delta(M, p1) Delta(M, p2))`.
pub fn sin2_theta(p1: &LorentzVector, p2: &LorentzVector, frame: &LorentzVector) -> Option<f64> {
    let f1 = gram::delta2(frame, p1);
    let f2 = gram::delta2(frame, p2);

    if f1 >= 0. || f2 >= 0. || frame.m2() <= 0. {
        return None;
    }

    Some(gram::delta1(frame) * gram::delta3(frame, p1, p2) / (f1 * f2))
}


/// The Euclidean norm squared of a four-vector, `E^2 + px^2 + py^2 + pz^2`.
pub fn euclidean_norm2(v: &LorentzVector) -> f64 {
    v.e * v.e + v.p2()
}


/// The component of `a` along `b`. A null `b` gives `a` back.
pub fn parallel(a: &ThreeVector, b: &ThreeVector) -> ThreeVector {
    let b2 = b.mag2();

    if b2 <= 0. {
        return *a;
    }

    *b * (a.dot(b) / b2)
}


/// The component of `a` transverse to `b`.
pub fn transverse(a: &ThreeVector, b: &ThreeVector) -> ThreeVector {
    *a - parallel(a, b)
}


/// The momentum of `mom` transverse to the direction `dir`; the full
/// magnitude if `dir` is null.
pub fn transverse_momentum_dir(mom: &ThreeVector, dir: &ThreeVector) -> f64 {
    if dir.mag2() == 0. {
        mom.mag()
    } else {
        transverse(mom, dir).mag()
    }
}


/// The Armenteros-Podolanski variable
/// `alpha = (pL1 - pL2)/(pL1 + pL2) = (p1^2 - p2^2)/(p1 + p2)^2`, with the
/// longitudinal components taken along the total momentum. `None` if the
/// total momentum vanishes.
pub fn armenteros_podolanski_x(d1: &ThreeVector, d2: &ThreeVector) -> Option<f64> {
    let total = (*d1 + *d2).mag2();

    if total == 0. {
        None
    } else {
        Some((d1.mag2() - d2.mag2()) / total)
    }
}


// epsilon_{mu nu lambda kappa} a^mu b^nu c^lambda d^kappa with
// epsilon_{0123} = +1 and index 0 the time component.
fn levi_civita(a: &LorentzVector, b: &LorentzVector, c: &LorentzVector, d: &LorentzVector) -> f64 {
    gram::determinant4([a.components(), b.components(), c.components(), d.components()])
}


// The contravariant normal L^mu = g^{mu rho} epsilon_{rho nu lambda kappa} a^nu b^lambda c^kappa,
// orthogonal to all three arguments.
fn normal(a: &LorentzVector, b: &LorentzVector, c: &LorentzVector) -> LorentzVector {
    let lower = |mu: usize| {
        let mut row = [0.; 4];
        row[mu] = 1.;
        gram::determinant4([row, a.components(), b.components(), c.components()])
    };

    LorentzVector::new(-lower(1), -lower(2), -lower(3), lower(0))
}


/// The cosine of the angle `chi` between the decay planes `(d1, d2)` and
/// `(h1, h2)` in the rest frame of `d1 + d2 + h1 + h2`:
///
/// ```text
/// cos chi = -L_D.L_H / sqrt(L_D^2 L_H^2),
/// L_D^mu = epsilon^mu_{nu lambda kappa} d1^nu d2^lambda H^kappa,
/// L_H^mu = epsilon^mu_{nu lambda kappa} h1^nu h2^lambda D^kappa
/// ```
///
/// with `D = d1 + d2` and `H = h1 + h2`. `None` if either plane is
/// degenerate.
pub fn cos_decay_angle_chi(
    d1: &LorentzVector, d2: &LorentzVector, h1: &LorentzVector, h2: &LorentzVector
) -> Option<f64> {
    let ld = normal(d1, d2, &(*h1 + *h2));
    let lh = normal(h1, h2, &(*d1 + *d2));
    let l1 = ld.m2();
    let l2 = lh.m2();

    if l1 >= 0. || l2 >= 0. {
        return None;
    }

    Some(-ld.dot(&lh) / (l1 * l2).sqrt())
}


/// The sine of the angle `chi` between the decay planes, signed so that in
/// the rest frame of the mother `sin chi = (n_D x n_H) . H/|H|`, where
/// `n_D` and `n_H` are the unit normals `d1 x d2` and `h1 x h2`:
///
/// ```text
/// sin chi = epsilon(d1, d2, h1, h2) ((D.H)^2 - D^2 H^2)
///           / sqrt(L_D^2 L_H^2 ((H.M)^2 - H^2 M^2))
/// ```
pub fn sin_decay_angle_chi(
    d1: &LorentzVector, d2: &LorentzVector, h1: &LorentzVector, h2: &LorentzVector
) -> Option<f64> {
    let d = *d1 + *d2;
    let h = *h1 + *h2;
    let m = d + h;
    let m2 = m.m2();

    if m2 <= 0. {
        return None;
    }

    let l1 = normal(d1, d2, &h).m2();
    let l2 = normal(h1, h2, &d).m2();

    if l1 >= 0. || l2 >= 0. {
        return None;
    }

    let dh = d.dot(&h);
    let hm = h.dot(&m);
    let p_h = hm * hm - h.m2() * m2;

    if p_h <= 0. {
        return None;
    }

    Some(levi_civita(d1, d2, h1, h2) * (dh * dh - d.m2() * h.m2()) / (l1 * l2 * p_h).sqrt())
}


/// The angle `chi` in `(-pi, pi]` between the decay planes `(d1, d2)` and
/// `(h1, h2)`; see [`cos_decay_angle_chi`] and [`sin_decay_angle_chi`].
pub fn decay_angle_chi(
    d1: &LorentzVector, d2: &LorentzVector, h1: &LorentzVector, h2: &LorentzVector
) -> Option<f64> {
    let cos_chi = cos_decay_angle_chi(d1, d2, h1, h2)?;
    let sin_chi = sin_decay_angle_chi(d1, d2, h1, h2)?;

    if cos_chi.abs() > 1. || sin_chi.abs() > 1. {
        return None;
    }

    Some(sin_chi.atan2(cos_chi))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn check(what: &str, ours: f64, theirs: f64, tol: f64) {
        let err = ((ours - theirs) / theirs).abs();

        if !(err < tol) {
            panic!("{}: {:.16e} vs {:.16e} (rel err {:.3e})", what, ours, theirs, err);
        }
    }

    /// Boost along z with velocity `beta`.
    fn boost_z(v: LorentzVector, beta: f64) -> LorentzVector {
        let gamma = 1. / (1. - beta * beta).sqrt();
        LorentzVector::new(v.px, v.py, gamma * (v.pz + beta * v.e), gamma * (v.e + beta * v.pz))
    }

    fn random_vector(m: f64) -> LorentzVector {
        let r = || 6. * rand::random::<f64>() - 3.;
        LorentzVector::with_mass(r(), r(), r(), m)
    }

    #[test]
    fn lorentz_vector_algebra() {
        let a = LorentzVector::new(1., 2., 3., 10.);
        let b = LorentzVector::new(-1., 0.5, 2., 4.);
        assert_eq!(a + b, LorentzVector::new(0., 2.5, 5., 14.));
        assert_eq!(a - b, LorentzVector::new(2., 1.5, 1., 6.));
        assert_eq!(2. * a, a * 2.);
        assert_eq!(-a, a * -1.);
        assert_eq!(a.dot(&b), 40. + 1. - 1. - 6.);
        assert_eq!(a.m2(), 86.);
        assert_eq!(a.p2(), 14.);
        assert_approx_eq!(a.m(), 86f64.sqrt());
        assert_approx_eq!(LorentzVector::new(0., 0., 2., 1.).m(), -3f64.sqrt());
        assert_approx_eq!(LorentzVector::with_mass(1., -2., 0.5, 0.3).m(), 0.3);
    }

    #[test]
    fn triangle_and_momentum() {
        assert_eq!(triangle(1., 1., 1.), -3.);
        assert_eq!(triangle(9., 1., 1.), 45.);
        assert_approx_eq!(q(3., 1., 1.), 0.5 * 45f64.sqrt() / 3.);
        assert_approx_eq!(q_s(9., 1., 1.), q(3., 1., 1.));
        assert_eq!(q(1.5, 1., 1.), 0.);
        assert_eq!(q(3., -1., 1.), 0.);
        assert_eq!(q_s(-1., 0., 0.), 0.);
    }

    #[test]
    fn two_body_phase_space() {
        assert!(phasespace2(3., 1., 1.) > 0.);
        assert_eq!(phasespace2(1.5, 1., 1.), 0.);
        assert_eq!(phasespace2(2., 1., 1.), 0.);
        assert_approx_eq!(phasespace2(3., 0., 0.), 1. / (8. * PI));
        assert_approx_eq!(phasespace2(3., -1., 0.), phasespace2(3., 0., 0.));
        assert_approx_eq!(phasespace2_bk(3., 1., 1.), 4. * PI * PI * phasespace2(3., 1., 1.));
    }

    #[test]
    fn three_body_phase_space() {
        // Reference values from the convolution of two-body phase spaces.
        check("(10, 1, 2, 3)", phasespace3(10., 1., 2., 3.), 35.35531307877849, 1e-11);
        check("(5, 1, 1, 1)", phasespace3(5., 1., 1., 1.), 9.42505233957565, 1e-11);
        check("(3, .5, .7, 1.1)", phasespace3(3., 0.5, 0.7, 1.1), 1.2200427913526735, 1e-11);
        check("(7, 3, 2, 1)", phasespace3(7., 3., 2., 1.), 2.475611112870043, 1e-11);
        // light third daughter: its angle is obtuse
        check("(3, 1, 1, .1)", phasespace3(3., 1., 1., 0.1), 1.5718063408299223, 1e-11);
        check("(8, 4, 2, .1)", phasespace3(8., 4., 2., 0.1), 5.818666048193046, 1e-11);
        check("(5, 2, 1, 0)", phasespace3(5., 2., 1., 0.), 6.6722898024434585, 1e-12);
        check("(5, 2, 0, 0)", phasespace3(5., 2., 0., 0.), 11.966091321351996, 1e-12);
        check("(5, 0, 0, 0)", phasespace3(5., 0., 0., 0.), 30.84251375340421, 1e-14);

        assert_eq!(phasespace3(5., 0., 2., 1.), phasespace3(5., 2., 1., 0.));
        assert_eq!(phasespace3(5., 1., 3., 2.), phasespace3(5., 3., 2., 1.));
        assert_eq!(phasespace3(3., 1., 1., 1.), 0.);
        assert_eq!(phasespace3(2., 1., 1., 1.), 0.);
    }

    #[test]
    fn gram_determinants() {
        for _ in 0..20 {
            let p1 = random_vector(1.);
            let p2 = random_vector(0.5);
            let p3 = random_vector(2.);
            let p4 = random_vector(0.1);

            let d2 = gram::delta2(&p1, &p2);
            let lam = triangle((p1 + p2).m2(), p1.m2(), p2.m2());
            check("delta2", d2, -0.25 * lam, 1e-9);
            check("g2", gram::g2(&p1, &p2, &p1, &p2), d2, 1e-9);

            let d3 = gram::delta3(&p1, &p2, &p3);
            check("delta3", d3, gram::g3(&p1, &p2, &p3, &p1, &p2, &p3), 1e-8);

            let d4 = gram::delta4(&p1, &p2, &p3, &p4);
            check("g4 symmetry", gram::g4(&p2, &p1, &p3, &p4, &p1, &p2, &p3, &p4), -d4, 1e-8);
            assert_eq!(gram::delta1(&p1), p1.m2());
        }

        // Five four-vectors in four dimensions are linearly dependent.
        let p = random_vector(1.);
        let q = random_vector(2.);
        let r = random_vector(3.);
        let s = p + q * 2.;
        assert!(gram::delta4(&p, &q, &r, &s).abs() < 1e-6);
    }

    #[test]
    fn rest_frame_quantities() {
        let frame = LorentzVector::at_rest(5.);
        let v = LorentzVector::with_mass(0., 3., 4., 1.);
        assert_approx_eq!(rest_momentum(&v, &frame).unwrap(), 5.);
        assert_approx_eq!(rest_energy(&v, &frame).unwrap(), 26f64.sqrt());

        let moving = boost_z(frame, 0.6);
        let vb = boost_z(v, 0.6);
        assert_approx_eq!(rest_momentum(&vb, &moving).unwrap(), 5.);
        assert_approx_eq!(rest_energy(&vb, &moving).unwrap(), 26f64.sqrt());

        let spacelike = LorentzVector::new(0., 0., 3., 1.);
        assert_eq!(rest_momentum(&v, &spacelike), None);
        assert_eq!(rest_energy(&v, &spacelike), None);
    }

    #[test]
    fn angles() {
        let frame = LorentzVector::at_rest(10.);
        let p1 = LorentzVector::with_mass(0., 0., 2., 1.);
        let p2 = LorentzVector::with_mass(0., 1.5, 1.5, 0.5);
        let expected = 0.5f64.sqrt();

        assert_approx_eq!(cos_theta_rest(&p1, &p2, &frame).unwrap(), expected);
        assert_approx_eq!(cos_theta(&p1, &p2, &frame).unwrap(), expected);
        assert_approx_eq!(sin2_theta(&p1, &p2, &frame).unwrap(), 0.5);

        for &beta in &[0.3, -0.9, 0.99] {
            let (b1, b2, bf) = (boost_z(p1, beta), boost_z(p2, beta), boost_z(frame, beta));
            assert_approx_eq!(cos_theta_rest(&b1, &b2, &bf).unwrap(), expected, 1e-9);
            assert_approx_eq!(cos_theta(&b1, &b2, &bf).unwrap(), expected, 1e-9);
            assert_approx_eq!(sin2_theta(&b1, &b2, &bf).unwrap(), 0.5, 1e-9);
        }

        let spacelike = LorentzVector::new(0., 0., 3., 1.);
        assert_eq!(cos_theta_rest(&p1, &p2, &spacelike), None);
        assert_eq!(cos_theta(&frame, &p2, &frame), None);
    }

    #[test]
    fn decay_angles() {
        // A daughter emitted at cos theta = 0.6 relative to +z in the rest
        // frame of a parent that then moves along +z.
        let parent = LorentzVector::at_rest(3.);
        let d = LorentzVector::with_mass(0.8, 0., 0.6, 0.2);

        for &beta in &[0.1, 0.5, 0.95] {
            let cos = decay_angle_lab(&boost_z(d, beta), &boost_z(parent, beta)).unwrap();
            assert_approx_eq!(cos, 0.6, 1e-9);
        }

        let grandparent = LorentzVector::at_rest(20.);
        let q = boost_z(parent, 0.5);
        let dd = boost_z(d, 0.5);
        assert_approx_eq!(decay_angle(&grandparent, &q, &dd).unwrap(), 0.6, 1e-9);
        assert_approx_eq!(decay_angle(&dd, &q, &grandparent).unwrap(), 0.6, 1e-9);

        // The parent at rest in the reference frame has no flight direction.
        assert_eq!(decay_angle(&grandparent, &parent, &d), None);
    }

    #[test]
    fn three_vector_helpers() {
        let a = ThreeVector::new(3., -1., 2.);
        let b = ThreeVector::new(0., 2., 0.);

        assert_eq!(parallel(&a, &b), ThreeVector::new(0., -1., 0.));
        assert_eq!(transverse(&a, &b), ThreeVector::new(3., 0., 2.));
        assert_eq!(parallel(&a, &ThreeVector::default()), a);
        assert_approx_eq!(transverse_momentum_dir(&a, &b), 13f64.sqrt());
        assert_approx_eq!(transverse_momentum_dir(&a, &ThreeVector::default()), 14f64.sqrt());

        for _ in 0..20 {
            let u = random_vector(1.).p3();
            let v = random_vector(1.).p3();
            let sum = parallel(&u, &v) + transverse(&u, &v);
            assert_approx_eq!(sum.x, u.x, 1e-12);
            assert_approx_eq!(sum.y, u.y, 1e-12);
            assert_approx_eq!(sum.z, u.z, 1e-12);
            assert!(transverse(&u, &v).dot(&v).abs() < 1e-12 * u.mag() * v.mag());
        }

        let w = LorentzVector::new(1., 2., 3., 4.);
        assert_eq!(euclidean_norm2(&w), 30.);
    }

    #[test]
    fn armenteros_podolanski() {
        // Symmetric decay: equal longitudinal momenta.
        let p1 = ThreeVector::new(0.3, 0., 2.);
        let p2 = ThreeVector::new(-0.3, 0., 2.);
        assert_eq!(armenteros_podolanski_x(&p1, &p2), Some(0.));

        // Longitudinal momenta 3 and 1 along z: alpha = (3 - 1)/(3 + 1).
        let p1 = ThreeVector::new(0.5, 0.2, 3.);
        let p2 = ThreeVector::new(-0.5, -0.2, 1.);
        assert_approx_eq!(armenteros_podolanski_x(&p1, &p2).unwrap(), 0.5);
        assert_approx_eq!(armenteros_podolanski_x(&p2, &p1).unwrap(), -0.5);

        assert_eq!(armenteros_podolanski_x(&p1, &(p1 * -1.)), None);
    }

    #[test]
    fn angle_between_decay_planes() {
        // Mother at rest, D = d1 + d2 along +z in the xz plane, H = h1 + h2
        // along -z with its plane rotated by phi about z.
        let d1 = LorentzVector::with_mass(1., 0., 2., 0.1);
        let d2 = LorentzVector::with_mass(-1., 0., 1., 0.2);

        for &phi in &[0.3f64, 1.2, 2.5, -2., -0.4] {
            let (s, c) = phi.sin_cos();
            let h1 = LorentzVector::with_mass(c, s, -1.5, 0.3);
            let h2 = LorentzVector::with_mass(-c, -s, -1.5, 0.4);
            let chi = PI - phi;
            let expected = chi.sin().atan2(chi.cos());

            assert_approx_eq!(cos_decay_angle_chi(&d1, &d2, &h1, &h2).unwrap(), chi.cos(), 1e-12);
            assert_approx_eq!(sin_decay_angle_chi(&d1, &d2, &h1, &h2).unwrap(), chi.sin(), 1e-12);
            assert_approx_eq!(decay_angle_chi(&d1, &d2, &h1, &h2).unwrap(), expected, 1e-12);

            // The angle is a Lorentz invariant.
            for &beta in &[0.3, -0.9] {
                let b = |v: LorentzVector| boost_z(v, beta);
                let moved = decay_angle_chi(&b(d1), &b(d2), &b(h1), &b(h2)).unwrap();
                assert_approx_eq!(moved, expected, 1e-9);
            }
        }

        // Collinear daughters span no plane.
        let h1 = LorentzVector::with_mass(0., 0., -1., 0.3);
        let h2 = LorentzVector::with_mass(0., 0., -2., 0.4);
        assert_eq!(cos_decay_angle_chi(&d1, &d2, &h1, &h2), None);
        assert_eq!(decay_angle_chi(&d1, &d2, &h1, &h2), None);
    }

    #[test]
    fn g_function_dalitz_boundary() {
        // The Dalitz boundary point with m12 at its minimum.
        let (m, m1, m2, m3): (f64, f64, f64, f64) = (5., 1., 1.5, 0.5);
        let s1 = (m1 + m2).powi(2);
        let e2 = (s1 - m1 * m1 + m2 * m2) / (2. * s1.sqrt());
        let e3 = (m * m - s1 - m3 * m3) / (2. * s1.sqrt());
        let s2 = (e2 + e3).powi(2) - ((e2 * e2 - m2 * m2).max(0.).sqrt() + (e3 * e3 - m3 * m3).sqrt()).powi(2);
        assert!(g_function(s2, s1, m3 * m3, m1 * m1, m * m, m2 * m2).abs() < 1e-9);
    }
}
