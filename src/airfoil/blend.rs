//! Blending of two airfoil profiles into an intermediate one.

use crate::Point2;
use crate::airfoil::Profile;

/// Sample the y values of an arc at the given x positions using piecewise linear interpolation.
/// The arc points are ordered by x before sampling, so arcs running in either chordwise direction
/// are handled. Positions outside the x range of the arc take the value at the nearest end rather
/// than being extrapolated.
///
/// # Arguments
///
/// * `arc`: the points of the arc to sample, must not be empty
/// * `xs`: the x positions to sample at
///
/// returns: Vec<f64, Global>
///
/// # Examples
///
/// ```
/// use wingloft::Point2;
/// use wingloft::airfoil::resample_arc;
/// let arc = vec![Point2::new(1.0, 0.0), Point2::new(0.5, 0.1), Point2::new(0.0, 0.0)];
/// let ys = resample_arc(&arc, &[0.25, 0.75]);
/// assert!((ys[0] - 0.05).abs() < 1e-12);
/// assert!((ys[1] - 0.05).abs() < 1e-12);
/// ```
pub fn resample_arc(arc: &[Point2], xs: &[f64]) -> Vec<f64> {
    let mut sorted = arc.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    xs.iter()
        .map(|&x| {
            let i = sorted.partition_point(|p| p.x < x);
            if i == 0 {
                sorted[0].y
            } else if i == sorted.len() {
                sorted[i - 1].y
            } else {
                let a = &sorted[i - 1];
                let b = &sorted[i];
                let f = (x - a.x) / (b.x - a.x);
                a.y + f * (b.y - a.y)
            }
        })
        .collect()
}

/// Blend two airfoil profiles with the given weights. Both profiles are normalized to unit chord
/// and split at their leading edges. The profile with the larger weight supplies the x positions
/// of both arcs (the inner profile wins a tie) and the other profile is resampled onto them. The
/// result is normalized to unit chord and is not scaled back.
///
/// # Arguments
///
/// * `outer`: the profile of the outer bracketing section
/// * `inner`: the profile of the inner bracketing section
/// * `outer_alpha`: the weight of the outer profile
/// * `inner_alpha`: the weight of the inner profile
///
/// returns: Profile
pub fn blend_profiles(outer: &Profile, inner: &Profile, outer_alpha: f64, inner_alpha: f64) -> Profile {
    let outer_arcs = outer.normalized().split_arcs();
    let inner_arcs = inner.normalized().split_arcs();
    let outer_leads = outer_alpha > inner_alpha;

    let blend_arc = |outer_arc: &[Point2], inner_arc: &[Point2]| -> Vec<Point2> {
        let (grid, other) = if outer_leads {
            (outer_arc, inner_arc)
        } else {
            (inner_arc, outer_arc)
        };

        let xs = grid.iter().map(|p| p.x).collect::<Vec<_>>();
        let resampled = resample_arc(other, &xs);

        grid.iter()
            .zip(resampled)
            .map(|(p, other_y)| {
                let (outer_y, inner_y) = if outer_leads {
                    (p.y, other_y)
                } else {
                    (other_y, p.y)
                };
                Point2::new(p.x, outer_alpha * outer_y + inner_alpha * inner_y)
            })
            .collect()
    };

    let upper = blend_arc(&outer_arcs.upper, &inner_arcs.upper);
    let lower = blend_arc(&outer_arcs.lower, &inner_arcs.lower);
    Profile::from_arcs(upper, &lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::tests::diamond;
    use approx::assert_relative_eq;

    fn profile(values: &[f64]) -> Profile {
        Profile::from_flat("t", values).unwrap()
    }

    #[test]
    fn resample_clamps_outside_range() {
        let arc = vec![Point2::new(0.2, 1.0), Point2::new(0.8, 2.0)];
        let ys = resample_arc(&arc, &[0.0, 0.5, 1.0]);
        assert_relative_eq!(ys[0], 1.0);
        assert_relative_eq!(ys[1], 1.5);
        assert_relative_eq!(ys[2], 2.0);
    }

    #[test]
    fn identical_profiles_blend_to_normalized_copy() {
        let a = profile(&diamond(3.0, 2.0, 0.12));
        let blended = blend_profiles(&a, &a, 0.3, 0.7);
        assert_eq!(blended.len(), a.len());
        for (b, e) in blended.points().iter().zip(a.normalized().points()) {
            assert_relative_eq!(*b, *e, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn thickness_blends_linearly() {
        let outer = profile(&diamond(0.0, 1.0, 0.10));
        let inner = profile(&diamond(0.0, 1.0, 0.20));
        let blended = blend_profiles(&outer, &inner, 0.25, 0.75);
        // Max half-thickness of 0.05 (outer) and 0.10 (inner) at mid-chord
        assert_relative_eq!(blended.points()[1], Point2::new(0.5, 0.0875), epsilon = 1.0e-12);
        assert_relative_eq!(blended.points()[3], Point2::new(0.5, -0.0875), epsilon = 1.0e-12);
    }

    #[test]
    fn dominant_profile_supplies_grid() {
        // The inner profile has an extra point on each arc
        let outer = profile(&diamond(0.0, 1.0, 0.1));
        let inner = profile(&[
            1.0, 0.0, 0.75, 0.05, 0.5, 0.1, 0.0, 0.0, 0.5, -0.1, 0.75, -0.05, 1.0, 0.0,
        ]);

        let inner_led = blend_profiles(&outer, &inner, 0.4, 0.6);
        assert_eq!(inner_led.len(), 7);
        assert_relative_eq!(inner_led.points()[1].x, 0.75);

        let outer_led = blend_profiles(&outer, &inner, 0.6, 0.4);
        assert_eq!(outer_led.len(), 5);
        // Outer y = 0.05 at x = 0.5, inner y = 0.1
        assert_relative_eq!(outer_led.points()[1].y, 0.6 * 0.05 + 0.4 * 0.1, epsilon = 1.0e-12);
    }
}
