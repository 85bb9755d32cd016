// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Adaptive numerical quadrature, used as the reference implementation that
the closed-form and iterative routines are checked against.

The interface mimics GSL's QAG and QAGIU drivers: a 15-point Gauss-Kronrod
rule applied on a list of subintervals, repeatedly bisecting the one with the
largest error estimate. The half-infinite variant maps `[a, inf)` onto
`(0, 1]` with `x = a + (1 - t)/t`.

*/

use std::f64;


// Kronrod abscissae on [0, 1], largest first; the odd-indexed ones and the
// center are the 7-point Gauss nodes.
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];


#[derive(Clone,Copy,Debug,PartialEq)]
struct Segment {
    lower: f64,
    upper: f64,
    value: f64,
    abserr: f64,
}

fn gauss_kronrod_15<F>(f: &mut F, lower: f64, upper: f64) -> Segment where F: FnMut(f64) -> f64 {
    let center = 0.5 * (lower + upper);
    let half = 0.5 * (upper - lower);

    let fc = f(center);
    let mut res_k = fc * WGK[7];
    let mut res_g = fc * WG[3];

    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        res_k += WGK[j] * pair;

        if j % 2 == 1 {
            res_g += WG[j / 2] * pair;
        }
    }

    Segment {
        lower: lower,
        upper: upper,
        value: res_k * half,
        abserr: ((res_k - res_g) * half).abs(),
    }
}


/// Scratch space for the adaptive integrators. The size is the maximum
/// number of subintervals that will be used.
#[derive(Debug)]
pub struct IntegrationWorkspace {
    limit: usize,
    segments: Vec<Segment>,
}

impl IntegrationWorkspace {
    pub fn new(n: usize) -> Self {
        IntegrationWorkspace {
            limit: n.max(1),
            segments: Vec::with_capacity(n.max(1)),
        }
    }

    pub fn qagiu<'a, F>(&'a mut self, f: F, lower_bound: f64) -> IntegrationBuilder<'a, F> where F: FnMut(f64) -> f64 {
        IntegrationBuilder::new(self, f, Integrator::QAGIU, lower_bound, f64::INFINITY)
    }

    pub fn qag<'a, F>(&'a mut self, f: F, lower_bound: f64, upper_bound: f64) -> IntegrationBuilder<'a, F> where F: FnMut(f64) -> f64 {
        IntegrationBuilder::new(self, f, Integrator::QAG, lower_bound, upper_bound)
    }
}


#[derive(Clone,Copy,Debug,PartialEq)]
pub struct IntegrationResult {
    pub value: f64,
    pub abserr: f64
}


#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum Integrator {
    QAG,
    QAGIU,
}


pub struct IntegrationBuilder<'a, F: 'a> where F: FnMut(f64) -> f64 {
    workspace: &'a mut IntegrationWorkspace,
    function: F,
    kind: Integrator,
    lower_bound: f64,
    upper_bound: f64,
    epsabs: f64,
    epsrel: f64,
}

impl<'a, F: 'a> IntegrationBuilder<'a, F> where F: FnMut(f64) -> f64 {
    pub fn new(ws: &'a mut IntegrationWorkspace, f: F, kind: Integrator,
               lower: f64, upper: f64) -> IntegrationBuilder<'a, F> {
        IntegrationBuilder {
            workspace: ws,
            function: f,
            kind: kind,
            lower_bound: lower,
            upper_bound: upper,
            epsabs: 0.,
            epsrel: 1e-10,
        }
    }

    pub fn tolerance(mut self, epsabs: f64, epsrel: f64) -> Self {
        self.epsabs = epsabs;
        self.epsrel = epsrel;
        self
    }

    pub fn compute(self) -> IntegrationResult {
        let kind = self.kind;
        let lower = self.lower_bound;
        let mut f = self.function;

        let mut g = |t: f64| -> f64 {
            match kind {
                Integrator::QAG => f(t),
                Integrator::QAGIU => {
                    let x = lower + (1. - t) / t;
                    f(x) / (t * t)
                },
            }
        };

        let (a, b) = match kind {
            Integrator::QAG => (self.lower_bound, self.upper_bound),
            Integrator::QAGIU => (0., 1.),
        };

        let ws = self.workspace;
        ws.segments.clear();
        ws.segments.push(gauss_kronrod_15(&mut g, a, b));

        loop {
            let value: f64 = ws.segments.iter().map(|s| s.value).sum();
            let abserr: f64 = ws.segments.iter().map(|s| s.abserr).sum();

            if abserr <= self.epsabs.max(self.epsrel * value.abs()) || ws.segments.len() >= ws.limit {
                return IntegrationResult { value: value, abserr: abserr };
            }

            let mut worst = 0;

            for (i, s) in ws.segments.iter().enumerate() {
                if s.abserr > ws.segments[worst].abserr {
                    worst = i;
                }
            }

            let s = ws.segments.swap_remove(worst);
            let mid = 0.5 * (s.lower + s.upper);

            if !(mid > s.lower && mid < s.upper) {
                // Can't split any further in floating point.
                ws.segments.push(s);
                let value: f64 = ws.segments.iter().map(|s| s.value).sum();
                let abserr: f64 = ws.segments.iter().map(|s| s.abserr).sum();
                return IntegrationResult { value: value, abserr: abserr };
            }

            ws.segments.push(gauss_kronrod_15(&mut g, s.lower, mid));
            ws.segments.push(gauss_kronrod_15(&mut g, mid, s.upper));
        }
    }
}


/// Five-point central difference, as in GSL's `gsl_deriv_central`. We abuse
/// the IntegrationResult type here since it is exactly what's called for.
pub fn deriv_central<F>(mut f: F, x: f64, h: f64) -> IntegrationResult where F: FnMut(f64) -> f64 {
    let fm1 = f(x - h);
    let fp1 = f(x + h);
    let fmh = f(x - 0.5 * h);
    let fph = f(x + 0.5 * h);

    let r3 = 0.5 * (fp1 - fm1);
    let r5 = (4. / 3.) * (fph - fmh) - (1. / 3.) * r3;

    IntegrationResult { value: r5 / h, abserr: ((r5 - r3) / h).abs() }
}
