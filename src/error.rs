// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Error types.

The public functions of this crate follow the usual numerical-library
contract: arguments outside the domain give NaN, overflow gives a large
finite sentinel, and a series that fails to converge gives its best
estimate. Internally the iterative kernels return a [`Result`] so that the
`try_*` entry points and the logging wrappers in [`crate::monitored`] can
see what actually happened.

*/

use slog::Logger;
use std::f64;
use thiserror::Error;


/// An error arising in a numerical routine.
#[derive(Clone,Debug,Error,PartialEq)]
pub enum MathError {
    /// An argument was outside the domain of the function.
    #[error("{routine}: argument outside domain ({reason})")]
    Domain {
        /// The routine that rejected its arguments.
        routine: &'static str,

        /// A short description of the violated condition.
        reason: &'static str,
    },

    /// Two coefficient sequences had incompatible lengths.
    #[error("coefficient sequences of incompatible lengths {a} and {b}")]
    ShapeMismatch {
        /// The length of the first sequence.
        a: usize,

        /// The length of the second sequence.
        b: usize,
    },

    /// An iteration hit its cap before meeting its tolerance.
    #[error("{routine}: no convergence after {iterations} iterations (estimate {estimate:e})")]
    NoConvergence {
        /// The routine that gave up.
        routine: &'static str,

        /// The number of iterations performed.
        iterations: usize,

        /// The best available estimate.
        estimate: f64,
    },
}


/// A specialized `Result` type for the routines in this crate.
pub type Result<T> = ::std::result::Result<T, MathError>;


pub(crate) fn domain<T>(routine: &'static str, reason: &'static str) -> Result<T> {
    Err(MathError::Domain { routine: routine, reason: reason })
}


/// Map the outcome of an iterative kernel onto the public contract: NaN for
/// domain or shape errors, the best estimate if the iteration ran out.
pub(crate) fn settle(r: Result<f64>, log: Option<&Logger>) -> f64 {
    match r {
        Ok(v) => v,

        Err(MathError::NoConvergence { routine, iterations, estimate }) => {
            if let Some(log) = log {
                warn!(log, "iteration did not converge";
                      "routine" => routine, "iterations" => iterations, "estimate" => estimate);
            }
            estimate
        },

        Err(e) => {
            if let Some(log) = log {
                debug!(log, "returning NaN"; "error" => %e);
            }
            f64::NAN
        },
    }
}
