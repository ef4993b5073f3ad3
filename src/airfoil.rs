//! This module contains the airfoil point cloud of a wing section and the operations used to
//! blend two of them. A profile is a single traversal of the section surface from the trailing
//! edge, around the leading edge, and back to the trailing edge. At the document boundary it is
//! exchanged as a flat `[x0, y0, x1, y1, ...]` sequence.

mod blend;

use crate::errors::WingError;
use crate::{Point2, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub use blend::{blend_profiles, resample_arc};

/// An airfoil point cloud in section coordinates. Construction guarantees at least two finite
/// points with a non-zero chordwise extent, so normalization is always defined. It serializes as
/// its list of points, and deserialization goes through the same validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2>", into = "Vec<Point2>")]
pub struct Profile {
    points: Vec<Point2>,
}

/// A profile split at its leading edge. Both arcs contain the leading edge point: it is the last
/// point of `upper` and the first point of `lower`.
#[derive(Debug, Clone)]
pub struct ProfileArcs {
    pub upper: Vec<Point2>,
    pub lower: Vec<Point2>,
}

impl Profile {
    /// Create a profile from a sequence of points, validating it.
    ///
    /// # Arguments
    ///
    /// * `section`: the name of the owning section, used only for error reporting
    /// * `points`: the ordered profile points
    ///
    /// returns: Result<Profile, WingError>
    pub fn new(section: &str, points: Vec<Point2>) -> Result<Self> {
        if points.len() < 2 {
            return Err(WingError::invalid_profile(
                section,
                "at least two points are required",
            ));
        }

        if points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(WingError::invalid_profile(
                section,
                "non-finite coordinate values",
            ));
        }

        let profile = Self { points };
        let (x_min, x_max) = profile.x_extent();
        if x_max - x_min <= 0.0 {
            return Err(WingError::invalid_profile(
                section,
                "points have no chordwise extent",
            ));
        }

        Ok(profile)
    }

    /// Create a profile from a flat sequence of alternating x and y values.
    ///
    /// # Examples
    ///
    /// ```
    /// use wingloft::airfoil::Profile;
    /// let profile = Profile::from_flat("root", &[1.0, 0.0, 0.0, 0.0, 1.0, -0.01]).unwrap();
    /// assert_eq!(profile.len(), 3);
    /// assert!(Profile::from_flat("root", &[1.0, 0.0, 0.0]).is_err());
    /// ```
    pub fn from_flat(section: &str, values: &[f64]) -> Result<Self> {
        if values.len() % 2 != 0 {
            return Err(WingError::invalid_profile(
                section,
                format!("odd number of values ({})", values.len()),
            ));
        }

        let points = values
            .iter()
            .tuples::<(_, _)>()
            .map(|(x, y)| Point2::new(*x, *y))
            .collect();
        Self::new(section, points)
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The number of values in the flat representation of this profile.
    pub fn flat_len(&self) -> usize {
        self.points.len() * 2
    }

    pub fn to_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }

    /// Returns the minimum and maximum x values of the profile.
    pub fn x_extent(&self) -> (f64, f64) {
        self.points
            .iter()
            .map(|p| p.x)
            .minmax_by(f64::total_cmp)
            .into_option()
            .unwrap_or((0.0, 0.0))
    }

    /// Returns a copy of the profile with x rescaled to [0, 1] using its own x extent, and y
    /// divided by the same extent so that the thickness and camber to chord ratios are kept.
    pub fn normalized(&self) -> Profile {
        let (x_min, x_max) = self.x_extent();
        let span = x_max - x_min;
        let points = self
            .points
            .iter()
            .map(|p| Point2::new((p.x - x_min) / span, p.y / span))
            .collect();
        Profile { points }
    }

    /// The index of the first point with the minimum x value, taken to be the leading edge.
    pub fn leading_edge_index(&self) -> usize {
        self.points
            .iter()
            .position_min_by(|a, b| a.x.total_cmp(&b.x))
            .unwrap_or(0)
    }

    /// Split the profile at its leading edge into the arc running from the first point to the
    /// leading edge and the arc running from the leading edge to the last point.
    pub fn split_arcs(&self) -> ProfileArcs {
        let le = self.leading_edge_index();
        ProfileArcs {
            upper: self.points[..=le].to_vec(),
            lower: self.points[le..].to_vec(),
        }
    }

    /// Rejoin an upper and lower arc which share their leading edge point.
    pub(crate) fn from_arcs(upper: Vec<Point2>, lower: &[Point2]) -> Profile {
        let mut points = upper;
        points.extend(lower.iter().skip(1));
        Profile { points }
    }
}

impl TryFrom<Vec<Point2>> for Profile {
    type Error = WingError;

    fn try_from(points: Vec<Point2>) -> Result<Self> {
        Profile::new("deserialized", points)
    }
}

impl From<Profile> for Vec<Point2> {
    fn from(profile: Profile) -> Self {
        profile.points
    }
}

/// Reduce a flat airfoil sequence to respect a point count ceiling. Sequences with fewer than
/// `limit` values are returned unchanged, otherwise one point in four is kept, starting with the
/// first, and the point order is preserved.
///
/// # Arguments
///
/// * `values`: a flat sequence of alternating x and y values
/// * `limit`: the value count at which decimation starts
///
/// returns: Vec<f64, Global>
///
/// # Examples
///
/// ```
/// use wingloft::airfoil::decimate;
/// let values = (0..1200).map(|i| i as f64).collect::<Vec<_>>();
/// assert_eq!(decimate(&values, 600).len(), 300);
/// ```
pub fn decimate(values: &[f64], limit: usize) -> Vec<f64> {
    if values.len() < limit {
        return values.to_vec();
    }

    values
        .iter()
        .tuples::<(_, _)>()
        .step_by(4)
        .flat_map(|(x, y)| [*x, *y])
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    /// A small symmetric diamond-like profile running TE -> upper -> LE -> lower -> TE, with a
    /// chord of `chord` and its leading edge at `x0`.
    pub(crate) fn diamond(x0: f64, chord: f64, thickness: f64) -> Vec<f64> {
        let t = thickness * chord;
        #[rustfmt::skip]
        let values = vec![
            x0 + chord, 0.0,
            x0 + 0.5 * chord, 0.5 * t,
            x0, 0.0,
            x0 + 0.5 * chord, -0.5 * t,
            x0 + chord, 0.0,
        ];
        values
    }

    #[test_case(&[]; "empty")]
    #[test_case(&[0.0, 0.0]; "single point")]
    #[test_case(&[0.0, 0.0, 1.0]; "odd count")]
    #[test_case(&[0.5, 0.0, 0.5, 1.0]; "no chord")]
    #[test_case(&[0.0, 0.0, f64::NAN, 0.0]; "nan")]
    fn rejects_invalid(values: &[f64]) {
        assert!(Profile::from_flat("s", values).is_err());
    }

    #[test]
    fn flat_round_trip_keeps_order() {
        let values = diamond(0.0, 1.0, 0.1);
        let profile = Profile::from_flat("s", &values).unwrap();
        assert_eq!(profile.len(), 5);
        assert_eq!(profile.to_flat(), values);
    }

    #[test]
    fn deserialization_validates_points() {
        let profile = Profile::from_flat("s", &diamond(0.0, 1.0, 0.1)).unwrap();
        let text = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&text).unwrap();
        assert_eq!(back, profile);

        assert!(serde_json::from_str::<Profile>("[]").is_err());
        assert!(serde_json::from_str::<Profile>("[[0.5, 0.0], [0.5, 1.0]]").is_err());
    }

    #[test]
    fn normalize_rescales_by_own_extent() {
        let profile = Profile::from_flat("s", &diamond(2.0, 4.0, 0.1)).unwrap();
        let n = profile.normalized();
        assert_relative_eq!(n.points()[0], Point2::new(1.0, 0.0));
        assert_relative_eq!(n.points()[1], Point2::new(0.5, 0.05));
        assert_relative_eq!(n.points()[2], Point2::new(0.0, 0.0));
        assert_relative_eq!(n.points()[3], Point2::new(0.5, -0.05));
    }

    #[test]
    fn split_shares_leading_edge() {
        let profile = Profile::from_flat("s", &diamond(0.0, 1.0, 0.1)).unwrap();
        assert_eq!(profile.leading_edge_index(), 2);

        let arcs = profile.split_arcs();
        assert_eq!(arcs.upper.len(), 3);
        assert_eq!(arcs.lower.len(), 3);
        assert_eq!(arcs.upper.last(), arcs.lower.first());

        let joined = Profile::from_arcs(arcs.upper, &arcs.lower);
        assert_eq!(joined, profile);
    }

    #[test]
    fn decimate_keeps_one_point_in_four() {
        let values = (0..1200).map(|i| i as f64).collect::<Vec<_>>();
        let reduced = decimate(&values, 600);
        assert_eq!(reduced.len() / 2, 150);
        assert_eq!(&reduced[..4], &[0.0, 1.0, 8.0, 9.0]);
    }

    #[test]
    fn decimate_below_limit_is_unchanged() {
        let values = (0..598).map(|i| i as f64).collect::<Vec<_>>();
        assert_eq!(decimate(&values, 600), values);
    }
}
