//! Facilities for lifting intervals between assemblies.
//!
//! The harmonizer only relies on the [`IntervalMapper`] trait. A chain-file
//! backed implementation is provided by [`Machine`].

use std::convert::Infallible;

use crate::coordinate::Interval;

pub mod chain;
pub mod machine;

pub use machine::Machine;

/// The outcome of lifting a single interval.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LiftResult {
    /// The interval was lifted. The chromosome uses the mapper form.
    Mapped(Interval),

    /// No mapping exists for the interval.
    Unmapped,
}

impl LiftResult {
    /// Consumes the result and returns the lifted interval, if any.
    pub fn into_mapped(self) -> Option<Interval> {
        match self {
            LiftResult::Mapped(interval) => Some(interval),
            LiftResult::Unmapped => None,
        }
    }
}

/// Something that can lift a closed, 1-based interval onto the target
/// assembly.
///
/// Chromosomes cross this boundary in the mapper form (`chr7`, `chrX`,
/// `chrM`). An `Err` is treated exactly like [`LiftResult::Unmapped`] by the
/// harmonizer and is never retried.
///
/// Any `Fn(&Interval) -> LiftResult` closure is an infallible mapper.
///
/// # Examples
///
/// ```
/// use omiclift::coordinate::Interval;
/// use omiclift::liftover::IntervalMapper;
/// use omiclift::liftover::LiftResult;
///
/// let shift = |interval: &Interval| {
///     LiftResult::Mapped(Interval::new(
///         interval.chromosome(),
///         interval.start() + 200,
///         interval.end() + 200,
///     ))
/// };
///
/// let lifted = shift.lift(&Interval::new("chr7", 1000, 2000))?;
/// assert_eq!(lifted, LiftResult::Mapped(Interval::new("chr7", 1200, 2200)));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait IntervalMapper {
    /// The error returned when the mapper itself fails.
    type Error: std::error::Error;

    /// Lifts an interval.
    fn lift(&self, interval: &Interval) -> Result<LiftResult, Self::Error>;
}

impl<F> IntervalMapper for F
where
    F: Fn(&Interval) -> LiftResult,
{
    type Error = Infallible;

    fn lift(&self, interval: &Interval) -> Result<LiftResult, Self::Error> {
        Ok(self(interval))
    }
}
