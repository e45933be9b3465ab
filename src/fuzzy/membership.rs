//! Membership function library.
//!
//! Piecewise-linear shapes evaluated analytically: 0 outside the support,
//! linear ramps between breakpoints, 1 on the peak or plateau. Vertical
//! edges (`a == b` or `c == d`) are steps, so the breakpoint itself belongs
//! to the plateau.

use crate::error::ConfigError;

/// A triangular or trapezoidal fuzzy set shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFunction {
    /// Rises `a -> b`, falls `b -> c`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises `a -> b`, plateau on `[b, c]`, falls `c -> d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        check_breakpoints(&[a, b, c])?;
        Ok(Self::Triangular { a, b, c })
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self, ConfigError> {
        check_breakpoints(&[a, b, c, d])?;
        Ok(Self::Trapezoidal { a, b, c, d })
    }

    /// Membership degree of `x`, always in `[0, 1]`. NaN maps to 0.
    pub fn degree(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        let y = match *self {
            Self::Triangular { a, b, c } => plateau(x, a, b, b, c),
            Self::Trapezoidal { a, b, c, d } => plateau(x, a, b, c, d),
        };
        y.clamp(0.0, 1.0)
    }

    /// Outermost breakpoints `(a, last)`.
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// Returns a copy with every breakpoint mapped through `scale * x + offset`.
    ///
    /// `scale` must be positive to keep the breakpoints ordered.
    pub fn affine(&self, scale: f64, offset: f64) -> Result<Self, ConfigError> {
        let f = |x: f64| scale * x + offset;
        match *self {
            Self::Triangular { a, b, c } => Self::triangular(f(a), f(b), f(c)),
            Self::Trapezoidal { a, b, c, d } => Self::trapezoidal(f(a), f(b), f(c), f(d)),
        }
    }
}

/// Shared evaluation: a triangle is a trapezoid with `b == c`.
fn plateau(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        0.0
    } else if x >= b && x <= c {
        1.0
    } else if x < b {
        // a < b here, otherwise x >= b would have matched
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

fn check_breakpoints(points: &[f64]) -> Result<(), ConfigError> {
    if points.iter().any(|p| !p.is_finite()) {
        return Err(ConfigError::NonFinite);
    }
    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(ConfigError::NonMonotonic {
            breakpoints: points.to_vec(),
        });
    }
    Ok(())
}
