// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Shared helpers for the moremath tests, benchmarks and demos: loggers,
//! random argument generation, tolerance checks and a reference quadrature.

extern crate rand;
#[macro_use] extern crate slog;
extern crate slog_async;
extern crate slog_term;

use slog::Drain;

pub mod integrate;

pub use integrate::{deriv_central, IntegrationResult, IntegrationWorkspace};


/// A terminal logger for the demo programs.
///
/// Records go through an async drain that blocks rather than drops when
/// full, so non-convergence warnings are never lost.
pub fn default_log() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let format = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(format)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build()
        .fuse();
    slog::Logger::root(drain, o!("crate" => "moremath"))
}


/// A logger that swallows everything, for tests that exercise the logging
/// code paths but don't want the noise.
pub fn null_log() -> slog::Logger {
    slog::Logger::root(slog::Discard, o!())
}


/// How a `Sampler` spreads its draws over its range.
#[derive(Copy,Clone,Debug,PartialEq)]
pub enum Scale {
    /// Uniform in the argument itself.
    Linear,

    /// Uniform in the logarithm of the magnitude. A range lying entirely
    /// below zero is sampled as the mirror image of the positive one.
    Log,
}


/// Draws function arguments from a fixed range.
#[derive(Copy,Clone,Debug,PartialEq)]
pub struct Sampler {
    scale: Scale,
    sign: f64,
    start: f64,
    width: f64,
}

impl Sampler {
    /// Sample between `low` and `high`, in either order. With `is_log` the
    /// two limits must be nonzero and share a sign.
    pub fn new(is_log: bool, low: f64, high: f64) -> Self {
        let (low, high) = if low > high { (high, low) } else { (low, high) };

        if !is_log {
            return Sampler { scale: Scale::Linear, sign: 1., start: low, width: high - low };
        }

        assert!(low * high > 0., "log sampling needs limits of one sign, got {} and {}", low, high);
        let sign = low.signum();
        let (a, b) = ((low * sign).ln(), (high * sign).ln());
        let (a, b) = if a > b { (b, a) } else { (a, b) };
        Sampler { scale: Scale::Log, sign: sign, start: a, width: b - a }
    }

    /// The spacing in use.
    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// The point a fraction `t` of the way across the range.
    fn at(&self, t: f64) -> f64 {
        let u = self.start + t * self.width;

        match self.scale {
            Scale::Linear => u,
            Scale::Log => self.sign * u.exp(),
        }
    }

    /// One random draw.
    pub fn get(&self) -> f64 {
        self.at(rand::random::<f64>())
    }

    /// `n` evenly spaced points (in the sampler's scale) including both ends.
    pub fn grid(&self, n: usize) -> Vec<f64> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.)],
            _ => (0..n).map(|i| self.at(i as f64 / (n - 1) as f64)).collect(),
        }
    }
}


/// Compare two numbers with a relative tolerance, panicking with a useful
/// message if they disagree. NaNs never compare as equal.
pub fn check_rel(what: &str, ours: f64, theirs: f64, rtol: f64) {
    let rel_err = if theirs == 0. { ours.abs() } else { ((ours - theirs) / theirs).abs() };

    if !(rel_err < rtol) {
        panic!("{} disagrees: expected {:.16e}, got {:.16e} (rel. err. {:.3e})",
               what, theirs, ours, rel_err);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let lin = Sampler::new(false, 3., -2.);
        let log = Sampler::new(true, 1e-3, 1e4);
        let neg = Sampler::new(true, -50., -0.5);

        for _ in 0..1000 {
            let x = lin.get();
            assert!(x >= -2. && x <= 3.);
            let x = log.get();
            assert!(x >= 1e-3 * (1. - 1e-12) && x <= 1e4 * (1. + 1e-12));
            let x = neg.get();
            assert!(x <= -0.5 * (1. - 1e-12) && x >= -50. * (1. + 1e-12));
        }
    }

    #[test]
    fn grid_hits_both_ends() {
        let g = Sampler::new(true, 0.01, 100.).grid(5);
        assert_eq!(g.len(), 5);
        assert!((g[0] - 0.01).abs() < 1e-15);
        assert!((g[2] - 1.).abs() < 1e-12);
        assert!((g[4] - 100.).abs() < 1e-10);
        assert_eq!(Sampler::new(false, 1., 2.).grid(1), vec![1.]);
    }

    #[test]
    #[should_panic]
    fn log_scale_rejects_sign_change() {
        Sampler::new(true, -1., 1.);
    }
}
