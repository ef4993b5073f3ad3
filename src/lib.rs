//! Resolution of parametric wing descriptions into lattice-method ready wing models. Wing panels
//! are lofted through ordered airfoil sections, and control surfaces are hinged at span positions
//! which generally fall between the authored sections. Resolving an assembly synthesizes the
//! missing sections, binds every hinge to the section at its span position, and derives the
//! control sign conventions the solver expects.

pub mod airfoil;
pub mod assembly;
pub mod config;
pub mod control;
pub mod errors;
pub mod locator;
pub mod records;
pub mod section;
pub mod transform;
pub mod wing;

pub use assembly::{Assembly, Finding, HingeLine, ParsedModel};
pub use config::ResolveParams;
pub use errors::WingError;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Point3 = parry3d_f64::na::Point3<f64>;
pub type Vector3 = parry3d_f64::na::Vector3<f64>;

pub type Result<T> = std::result::Result<T, WingError>;
