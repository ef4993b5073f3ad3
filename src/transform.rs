//! Rigid-body operations on 3D points. Wing panels are placed in the aircraft reference frame by
//! rotating about the fixed world axes and then translating by the panel origin.

use crate::{Point3, Vector3};
use parry3d_f64::na::Rotation3;

/// Rotation vectors with a norm below this value are treated as exactly zero.
pub const ROTATION_TOL: f64 = 1.0e-3;

/// Number of decimal places kept in the output of a non-trivial rotation.
pub const ROTATION_DECIMALS: i32 = 3;

/// Build the composite rotation for a vector of angles (in radians) about the fixed world X, Y
/// and Z axes, applied in that order. The resulting matrix is `Rz * Ry * Rx`.
///
/// # Arguments
///
/// * `angles`: the rotation angles about the X, Y and Z axes
///
/// returns: Rotation<f64, 3>
pub fn fixed_axis_rotation(angles: &Vector3) -> Rotation3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z);
    rz * ry * rx
}

/// Rotate a point about the fixed world X, Y and Z axes, in that order. If the norm of `angles`
/// is below `ROTATION_TOL` the point is returned unchanged. Otherwise every coordinate of the
/// result is rounded to `ROTATION_DECIMALS` decimal places.
///
/// # Arguments
///
/// * `angles`: the rotation angles about the X, Y and Z axes, in radians
/// * `point`: the point to rotate
///
/// returns: OPoint<f64, Const<3>>
///
/// # Examples
///
/// ```
/// use wingloft::{Point3, Vector3};
/// use wingloft::transform::rotate;
/// let p = Point3::new(1.0, 2.0, 3.0);
/// assert_eq!(rotate(&Vector3::zeros(), &p), p);
/// ```
pub fn rotate(angles: &Vector3, point: &Point3) -> Point3 {
    if angles.norm() < ROTATION_TOL {
        return *point;
    }

    let rotated = fixed_axis_rotation(angles) * point;
    rotated.map(|v| round_to(v, ROTATION_DECIMALS))
}

/// Component-wise addition of an offset to a point.
pub fn translate(offset: &Vector3, point: &Point3) -> Point3 {
    point + offset
}

/// Round a value to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
