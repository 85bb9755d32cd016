// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Logged access to the iterative routines.

The free functions of this crate are silent: when a series runs out of
iterations they quietly return their best estimate, and domain errors turn
into NaN. A [`Monitored`] handle borrows a logger and exposes the same
iterative entry points with `trace`-level records of their inputs and
results, plus warnings when an iteration gives up.

```rust,ignore
let log = moremath_test_support::default_log();
let m = Monitored::new(&log);
let v = m.carlson_rj(1., 2., 3., 4.);
```

*/

use slog::Logger;

use crate::bessel::bessel_knu_logged;
use crate::carlson::{try_carlson_rc, try_carlson_rd, try_carlson_rf, try_carlson_rg, try_carlson_rj};
use crate::error::{settle, Result};
use crate::exponential::{exp_rel_n_impl, kummer_impl};
use crate::gamma::gamma_star_logged;


/// A logger-carrying handle for the iterative routines.
#[derive(Clone,Copy)]
pub struct Monitored<'a> {
    logger: &'a Logger,
}

impl<'a> Monitored<'a> {
    /// Wrap a logger.
    pub fn new(logger: &'a Logger) -> Self {
        Monitored { logger: logger }
    }

    /// The logger in use.
    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    fn report(&self, routine: &'static str, r: Result<f64>) -> f64 {
        let v = settle(r, Some(self.logger));
        trace!(self.logger, "result"; "routine" => routine, "value" => v);
        v
    }

    /// [`crate::exp_rel_n`].
    pub fn exp_rel_n(&self, x: f64, n: u16) -> f64 {
        trace!(self.logger, "exp_rel_n"; "x" => x, "n" => n);
        let v = exp_rel_n_impl(x, n, Some(self.logger));
        trace!(self.logger, "result"; "routine" => "exp_rel_n", "value" => v);
        v
    }

    /// [`crate::gamma_star`].
    pub fn gamma_star(&self, a: f64, x: f64) -> f64 {
        let v = gamma_star_logged(a, x, self.logger);
        trace!(self.logger, "result"; "routine" => "gamma_star", "value" => v);
        v
    }

    /// [`crate::kummer`].
    pub fn kummer(&self, a: u16, b: u16, x: f64) -> f64 {
        trace!(self.logger, "kummer"; "a" => a, "b" => b, "x" => x);
        let v = kummer_impl(a, b, x, Some(self.logger));
        trace!(self.logger, "result"; "routine" => "kummer", "value" => v);
        v
    }

    /// [`crate::carlson_rf`].
    pub fn carlson_rf(&self, x: f64, y: f64, z: f64) -> f64 {
        trace!(self.logger, "carlson_rf"; "x" => x, "y" => y, "z" => z);
        self.report("carlson_rf", try_carlson_rf(x, y, z))
    }

    /// [`crate::carlson_rc`].
    pub fn carlson_rc(&self, x: f64, y: f64) -> f64 {
        trace!(self.logger, "carlson_rc"; "x" => x, "y" => y);
        self.report("carlson_rc", try_carlson_rc(x, y))
    }

    /// [`crate::carlson_rj`].
    pub fn carlson_rj(&self, x: f64, y: f64, z: f64, p: f64) -> f64 {
        trace!(self.logger, "carlson_rj"; "x" => x, "y" => y, "z" => z, "p" => p);
        self.report("carlson_rj", try_carlson_rj(x, y, z, p))
    }

    /// [`crate::carlson_rd`].
    pub fn carlson_rd(&self, x: f64, y: f64, z: f64) -> f64 {
        trace!(self.logger, "carlson_rd"; "x" => x, "y" => y, "z" => z);
        self.report("carlson_rd", try_carlson_rd(x, y, z))
    }

    /// [`crate::carlson_rg`].
    pub fn carlson_rg(&self, x: f64, y: f64, z: f64) -> f64 {
        trace!(self.logger, "carlson_rg"; "x" => x, "y" => y, "z" => z);
        self.report("carlson_rg", try_carlson_rg(x, y, z))
    }

    /// [`crate::bessel_knu`].
    pub fn bessel_knu(&self, nu: f64, x: f64) -> f64 {
        let v = bessel_knu_logged(nu, x, self.logger);
        trace!(self.logger, "result"; "routine" => "bessel_knu", "value" => v);
        v
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use slog::Discard;

    #[test]
    fn agrees_with_silent_versions() {
        let log = Logger::root(Discard, o!());
        let m = Monitored::new(&log);

        assert_eq!(m.exp_rel_n(2.5, 3), crate::exponential::exp_rel_n(2.5, 3));
        assert_eq!(m.gamma_star(1.5, 0.7), crate::gamma::gamma_star(1.5, 0.7));
        assert_eq!(m.kummer(2, 5, -1.2), crate::exponential::kummer(2, 5, -1.2));
        assert_eq!(m.carlson_rf(1., 2., 3.), crate::carlson::carlson_rf(1., 2., 3.));
        assert_eq!(m.carlson_rc(1., -2.), crate::carlson::carlson_rc(1., -2.));
        assert_eq!(m.carlson_rj(1., 2., 3., 4.), crate::carlson::carlson_rj(1., 2., 3., 4.));
        assert_eq!(m.carlson_rd(1., 2., 3.), crate::carlson::carlson_rd(1., 2., 3.));
        assert_eq!(m.carlson_rg(1., 2., 3.), crate::carlson::carlson_rg(1., 2., 3.));
        assert_eq!(m.bessel_knu(1.3, 0.4), crate::bessel::bessel_knu(1.3, 0.4));
    }

    #[test]
    fn domain_errors_give_nan() {
        let log = Logger::root(Discard, o!());
        let m = Monitored::new(&log);

        assert!(m.carlson_rf(-1., 2., 3.).is_nan());
        assert!(m.carlson_rj(1., 2., 3., -4.).is_nan());
        assert!(m.bessel_knu(0., -1.).is_nan());
        assert!(m.kummer(1, 0, 1.).is_nan());
    }
}
