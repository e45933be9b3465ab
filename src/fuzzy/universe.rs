//! Discretised universe of discourse.
//!
//! A universe covers the half-open range `[min, max)` with evenly spaced
//! points `min + i * step`, the same sampling `numpy.arange` produces.
//! Aggregation and defuzzification run over these points.

use crate::error::ConfigError;

/// Largest number of sample points a universe may hold.
pub const MAX_POINTS: usize = 1 << 20;

/// Evenly spaced sample points over `[min, max)`. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
}

impl Universe {
    /// Rejects non-finite bounds, `max <= min`, `step <= 0` and ranges
    /// that would need more than [`MAX_POINTS`] samples.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        let valid = min.is_finite() && max.is_finite() && step.is_finite() && step > 0.0 && max > min;
        if !valid || point_count(min, max, step) > MAX_POINTS as f64 {
            return Err(ConfigError::InvalidUniverse { min, max, step });
        }

        let points: Vec<f64> = Arange::new(min, max, step).collect();

        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Clamp a crisp value into the sampled range `[first, last]`.
    ///
    /// `max` itself is never sampled, so the last point sits one step below it.
    pub fn clamp(&self, x: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if x.is_nan() {
            return first;
        }
        x.clamp(first, last)
    }
}

/// Iterator over `start + i * step` for `i` in `0..ceil((stop - start) / step)`.
struct Arange {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

/// ceil matches numpy's length rule; max(1) keeps tiny ranges sampled
fn point_count(start: f64, stop: f64, step: f64) -> f64 {
    ((stop - start) / step).ceil().max(1.0)
}

impl Arange {
    fn new(start: f64, stop: f64, step: f64) -> Self {
        let len = point_count(start, stop, step) as usize;
        Arange {
            start,
            step,
            index: 0,
            len,
        }
    }
}

impl Iterator for Arange {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_open_range_excludes_max() {
        let u = Universe::new(0.0, 35.0, 0.5).unwrap();
        assert_eq!(u.len(), 70);
        assert_eq!(u.points()[0], 0.0);
        assert_eq!(u.points()[69], 34.5);
    }

    #[test]
    fn controller_universe_sizes() {
        assert_eq!(Universe::new(500.0, 1500.0, 1.0).unwrap().len(), 1000);
        assert_eq!(Universe::new(0.0, 100.0, 0.5).unwrap().len(), 200);
        assert_eq!(Universe::new(0.0, 1.0, 0.01).unwrap().len(), 100);
    }

    #[test]
    fn rejects_bad_step_and_bounds() {
        assert!(Universe::new(0.0, 1.0, 0.0).is_err());
        assert!(Universe::new(0.0, 1.0, -0.1).is_err());
        assert!(Universe::new(1.0, 1.0, 0.1).is_err());
        assert!(Universe::new(0.0, f64::INFINITY, 0.1).is_err());
        assert!(Universe::new(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn rejects_oversampled_range() {
        assert_eq!(
            Universe::new(0.0, 1.0, 1e-300),
            Err(ConfigError::InvalidUniverse {
                min: 0.0,
                max: 1.0,
                step: 1e-300
            })
        );
        assert!(Universe::new(0.0, 1e12, 1.0).is_err());

        let widest = Universe::new(0.0, MAX_POINTS as f64, 1.0).unwrap();
        assert_eq!(widest.len(), MAX_POINTS);
    }

    #[test]
    fn clamp_to_sampled_edges() {
        let u = Universe::new(0.0, 100.0, 0.5).unwrap();
        assert_eq!(u.clamp(-3.0), 0.0);
        assert_eq!(u.clamp(100.0), 99.5);
        assert_eq!(u.clamp(42.25), 42.25);
        assert_eq!(u.clamp(f64::NAN), 0.0);
    }
}
