// Defines the fixed time grid a simulation steps along
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::Float;

use crate::error::ConfigError;
use crate::{index_to_float, lit};

/// The sample times `0, dt, 2 dt, ...` strictly below `t_end`.
///
/// The number of samples is `ceil(t_end / dt)`, computed once from the quotient. Sample times
/// are `i * dt`, never a running sum of `dt`, so no rounding error accumulates along the grid.
///
/// Because the quotient itself is rounded, a duration that is an exact multiple of the step size
/// in decimal may still gain a sample: `0.9 / 0.03` evaluates to `30.000000000000004`, giving 31
/// samples, the last of which is `30 * 0.03 = 0.8999999999999999 < 0.9`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeGrid<F: Float> {
    dt: F,
    t_end: F,
    len: usize,
}

impl<F: Float> TimeGrid<F> {
    /// Creates the grid covering `[0, t_end)` with step `dt`.
    ///
    /// # Errors
    /// - `InvalidStepSize` if `dt` is not positive and finite.
    /// - `InvalidDuration` if `t_end` is not positive and finite.
    /// - `InvalidStepCount` if the quotient rounds to zero or does not fit in a `usize`.
    pub fn new(t_end: F, dt: F) -> Result<Self, ConfigError> {
        if dt <= F::zero() || !dt.is_finite() {
            return Err(ConfigError::InvalidStepSize);
        }
        if t_end <= F::zero() || !t_end.is_finite() {
            return Err(ConfigError::InvalidDuration);
        }

        let len = (t_end / dt)
            .ceil()
            .to_usize()
            .filter(|&len| len > 0)
            .ok_or(ConfigError::InvalidStepCount)?;

        Ok(Self { dt, t_end, len })
    }

    /// The reference grid: 5 s in 5000 steps of 1 ms.
    pub(crate) fn reference() -> Self {
        Self {
            dt: lit(0.001),
            t_end: lit(5.0),
            len: 5000,
        }
    }

    /// Returns the step size.
    pub fn dt(&self) -> F {
        self.dt
    }

    /// Returns the exclusive end of the grid.
    pub fn t_end(&self) -> F {
        self.t_end
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a validated grid; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the `index`-th sample time, or `None` past the end of the grid.
    pub fn get(&self, index: usize) -> Option<F> {
        (index < self.len).then(|| self.time_at(index))
    }

    /// Returns `index * dt` without checking the index against the grid length.
    pub fn time_at(&self, index: usize) -> F {
        index_to_float::<F>(index) * self.dt
    }

    /// Iterates over the sample times in increasing order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = F> + '_ {
        (0..self.len).map(move |i| self.time_at(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_count_matches_half_open_interval() {
        for (t_end, dt, expected) in [
            (5.0, 0.001, 5000),
            (1.0, 0.1, 10),
            (0.3, 0.1, 3),
            (1.0, 0.3, 4),
            (0.9, 0.03, 31),
        ] {
            let grid = TimeGrid::<f64>::new(t_end, dt).unwrap();
            assert_eq!(grid.len(), expected, "t_end = {t_end}, dt = {dt}");

            let last = grid.iter().last().unwrap();
            assert!(last < t_end, "last sample {last} must lie before {t_end}");
        }
    }

    #[test]
    fn test_sample_times_are_multiples_of_dt() {
        let grid = TimeGrid::<f64>::new(5.0, 0.001).unwrap();
        assert_eq!(grid.get(0), Some(0.0));
        assert_eq!(grid.get(4999), Some(4999.0 * 0.001));
        assert_eq!(grid.get(5000), None);
        assert_eq!(grid.iter().len(), 5000);
    }

    #[test]
    fn test_invalid_grids_are_rejected() {
        assert_eq!(
            TimeGrid::<f64>::new(1.0, 0.0),
            Err(ConfigError::InvalidStepSize)
        );
        assert_eq!(
            TimeGrid::<f64>::new(1.0, f64::NAN),
            Err(ConfigError::InvalidStepSize)
        );
        assert_eq!(
            TimeGrid::<f64>::new(-1.0, 0.1),
            Err(ConfigError::InvalidDuration)
        );
        assert_eq!(
            TimeGrid::<f64>::new(f64::INFINITY, 0.1),
            Err(ConfigError::InvalidDuration)
        );
        assert_eq!(
            TimeGrid::<f64>::new(1e300, 1e-300),
            Err(ConfigError::InvalidStepCount)
        );
    }
}
