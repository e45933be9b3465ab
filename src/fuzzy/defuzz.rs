//! Defuzzification of an aggregated output set over a sampled universe.

use serde::{Deserialize, Serialize};

/// Method for turning the aggregated membership into a crisp value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzMethod {
    /// Center of gravity: `sum(u * mu(u)) / sum(mu(u))`
    #[default]
    Centroid,
    /// Centroid of the piecewise-linear area under the sampled membership:
    /// each pair of neighbouring points is a trapezoid weighted by its area
    AreaCentroid,
    /// First universe point where the cumulative membership reaches half the total
    Bisector,
    /// Mean of the points at which the membership is maximal
    MeanOfMaximum,
    /// Smallest point at which the membership is maximal
    SmallestOfMaximum,
    /// Largest point at which the membership is maximal
    LargestOfMaximum,
}

impl DefuzzMethod {
    /// Returns `None` when `membership` is zero everywhere.
    ///
    /// `universe` and `membership` must have the same length.
    pub fn apply(self, universe: &[f64], membership: &[f64]) -> Option<f64> {
        debug_assert_eq!(universe.len(), membership.len());

        let total: f64 = membership.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let crisp = match self {
            Self::Centroid => {
                let moment: f64 = universe
                    .iter()
                    .zip(membership)
                    .map(|(u, m)| u * m)
                    .sum();
                moment / total
            }
            Self::AreaCentroid => area_centroid(universe, membership)
                .unwrap_or_else(|| Self::Centroid.apply(universe, membership).unwrap_or(universe[0])),
            Self::Bisector => {
                let half = total / 2.0;
                let mut cumulative = 0.0;
                let mut at = universe[universe.len() - 1];
                for (u, m) in universe.iter().zip(membership) {
                    cumulative += m;
                    if cumulative >= half {
                        at = *u;
                        break;
                    }
                }
                at
            }
            Self::MeanOfMaximum | Self::SmallestOfMaximum | Self::LargestOfMaximum => {
                let peak = membership.iter().copied().fold(0.0, f64::max);
                let at_peak = universe
                    .iter()
                    .zip(membership)
                    .filter(|(_, m)| **m == peak)
                    .map(|(u, _)| *u);
                match self {
                    Self::MeanOfMaximum => {
                        let (n, sum) = at_peak.fold((0usize, 0.0), |(n, s), u| (n + 1, s + u));
                        sum / n as f64
                    }
                    Self::SmallestOfMaximum => at_peak.fold(f64::INFINITY, f64::min),
                    _ => at_peak.fold(f64::NEG_INFINITY, f64::max),
                }
            }
        };

        Some(crisp)
    }
}

/// Sum of segment centroids weighted by segment area. `None` when the
/// curve encloses no area (a single sampled point).
fn area_centroid(universe: &[f64], membership: &[f64]) -> Option<f64> {
    let mut moment = 0.0;
    let mut area = 0.0;

    for (x, y) in universe.windows(2).zip(membership.windows(2)) {
        let (x1, x2, y1, y2) = (x[0], x[1], y[0], y[1]);
        if (y1 == 0.0 && y2 == 0.0) || x1 == x2 {
            continue;
        }
        let w = x2 - x1;
        let (centre, a) = if y1 == y2 {
            // rectangle
            (0.5 * (x1 + x2), w * y1)
        } else if y1 == 0.0 {
            // rising triangle
            (2.0 / 3.0 * w + x1, 0.5 * w * y2)
        } else if y2 == 0.0 {
            // falling triangle
            (1.0 / 3.0 * w + x1, 0.5 * w * y1)
        } else {
            (
                (2.0 / 3.0 * w * (y2 + 0.5 * y1)) / (y1 + y2) + x1,
                0.5 * w * (y1 + y2),
            )
        };
        moment += centre * a;
        area += a;
    }

    (area > 0.0).then(|| moment / area)
}
