// crates/otio-core/src/discrete.rs

//! `DiscreteSampling`: an integer-indexed partition of a continuous span at
//! a fixed rate.

use crate::rational::Rational;
use crate::{ContinuousInterval, Error, Ordinate};

/// Maps integer sample indices to clopen ordinate intervals and back, at a
/// fixed `rate` anchored by `origin`/`start_index`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscreteSampling {
    /// Samples per ordinate unit. Must be strictly positive.
    pub rate: Rational,
    /// The integer index assigned to the sample starting at `origin`.
    pub start_index: i64,
    /// The ordinate at which `start_index` begins.
    pub origin: Ordinate,
}

impl DiscreteSampling {
    /// Construct a sampling definition.
    ///
    /// # Panics
    /// Panics if `rate <= 0`.
    #[must_use]
    pub fn new(rate: Rational, start_index: i64, origin: Ordinate) -> Self {
        assert!(rate.signum() > 0, "DiscreteSampling::new: rate must be > 0");
        Self {
            rate,
            start_index,
            origin,
        }
    }

    /// The clopen ordinate interval covered by sample `index`:
    /// `[origin + (index - start_index)/rate, origin + (index + 1 - start_index)/rate)`.
    #[must_use]
    pub fn interval_for_index(self, index: i64) -> ContinuousInterval {
        let rel = i128::from(index) - i128::from(self.start_index);
        let step = Ordinate::Finite(Rational::from_int(1).checked_div(self.rate).expect("rate > 0"));
        let start = self
            .origin
            .add(Ordinate::from_ratio(rel, 1).mul(step));
        let end = self
            .origin
            .add(Ordinate::from_ratio(rel + 1, 1).mul(step));
        ContinuousInterval::new(start, end)
    }

    /// The sample index whose interval's start is `<= o`, i.e.
    /// `floor(rate * (o - origin)) + start_index`.
    ///
    /// # Errors
    /// Propagates [`Error::Overflow`] from the underlying `floor`.
    pub fn index_for_ordinate(self, o: Ordinate) -> Result<i64, Error> {
        let delta = o.sub(self.origin);
        let scaled = delta.mul(Ordinate::Finite(self.rate));
        let base = scaled.floor()?;
        Ok(base.saturating_add(self.start_index))
    }

    /// Count of samples whose *start* lies within `interval`, i.e.
    /// `floor(rate * duration)`, following the clopen start-inclusive rule.
    ///
    /// # Errors
    /// Propagates [`Error::Overflow`] if the duration does not convert.
    pub fn count(self, interval: ContinuousInterval) -> Result<u64, Error> {
        if interval.is_empty() {
            return Ok(0);
        }
        let duration = interval.duration();
        let scaled = duration.mul(Ordinate::Finite(self.rate));
        let floored = scaled.floor()?;
        Ok(u64::try_from(floored).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampling_24fps() -> DiscreteSampling {
        DiscreteSampling::new(Rational::from_int(24), 0, Ordinate::ZERO)
    }

    #[test]
    fn index_for_ordinate_quarter_second_24fps() {
        let s = sampling_24fps();
        let o = Ordinate::from_ratio(1, 4);
        assert_eq!(s.index_for_ordinate(o).unwrap(), 6);
    }

    #[test]
    fn interval_for_index_matches_spec_scenario() {
        let s = sampling_24fps();
        let iv = s.interval_for_index(6);
        assert_eq!(iv.start, Ordinate::from_ratio(6, 24));
        assert_eq!(iv.end, Ordinate::from_ratio(7, 24));
    }

    #[test]
    fn count_over_two_seconds() {
        let s = sampling_24fps();
        let iv = ContinuousInterval::new(Ordinate::ZERO, Ordinate::from_int(2));
        assert_eq!(s.count(iv).unwrap(), 48);
    }
}
