//! Straight-line interpolation for drawing a shipment on a map.
//!
//! A [`DisplayPolyline`] is cosmetic. It has no distance and cannot become a
//! [`Route`](crate::Route); use a [`RoutePlanner`](crate::RoutePlanner) for
//! anything that feeds the cost model.

use geo::{Coord, Line};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::Location;

/// Evenly spaced points between two locations, for rendering only.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DisplayPolyline {
    points: Vec<Location>,
}

impl DisplayPolyline {
    /// Points in drawing order.
    #[must_use]
    pub fn points(&self) -> &[Location] {
        &self.points
    }
}

/// Interpolate `points` locations from `start` to `end`, endpoints included.
///
/// Interpolation is linear in latitude and longitude. Zero points gives an
/// empty polyline and one point gives `[start]`.
///
/// # Examples
/// ```
/// use agrilogix_core::{Location, interpolate_polyline};
///
/// let line = interpolate_polyline(Location::new(0.0, 0.0), Location::new(2.0, 4.0), 3);
/// assert_eq!(
///     line.points(),
///     [Location::new(0.0, 0.0), Location::new(1.0, 2.0), Location::new(2.0, 4.0)]
/// );
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "interpolation fractions are floating point"
)]
#[must_use]
pub fn interpolate_polyline(start: Location, end: Location, points: u32) -> DisplayPolyline {
    let interpolated = match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let segment = Line::new(Coord::from(start), Coord::from(end));
            let steps = f64::from(points - 1);
            (0..points)
                .map(|step| {
                    if step == points - 1 {
                        return end;
                    }
                    let fraction = f64::from(step) / steps;
                    Location::from(segment.start + segment.delta() * fraction)
                })
                .collect()
        }
    };
    DisplayPolyline {
        points: interpolated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(10, 10)]
    fn yields_requested_point_count(#[case] points: u32, #[case] expected: usize) {
        let line = interpolate_polyline(Location::new(20.2, 85.7), Location::new(20.3, 85.8), points);
        assert_eq!(line.points().len(), expected);
    }

    #[rstest]
    fn single_point_is_start() {
        let start = Location::new(20.2, 85.7);
        let line = interpolate_polyline(start, Location::new(20.3, 85.8), 1);
        assert_eq!(line.points(), [start]);
    }

    #[rstest]
    fn endpoints_are_exact() {
        let start = Location::new(20.20, 85.72);
        let end = Location::new(19.81, 85.83);
        let line = interpolate_polyline(start, end, 7);
        assert_eq!(line.points().first(), Some(&start));
        assert_eq!(line.points().last(), Some(&end));
    }

    #[rstest]
    fn spacing_is_even() {
        let line = interpolate_polyline(Location::new(0.0, 0.0), Location::new(0.0, 10.0), 11);
        for (step, point) in (0_u32..).zip(line.points()) {
            assert!((point.longitude - f64::from(step)).abs() < 1e-12);
            assert_eq!(point.latitude, 0.0);
        }
    }
}
