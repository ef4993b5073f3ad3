//! Parameters which control the resolution pass and the export view.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Default absolute tolerance for treating a span coordinate as coincident with an existing
/// section.
pub const SPAN_TOL: f64 = 1.0e-3;

/// Default ceiling on the number of flat airfoil values the downstream solver accepts.
pub const POINT_LIMIT: usize = 600;

/// This structure contains the tunable values used while resolving an assembly and while
/// producing the export view of a resolved one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveParams {
    /// The absolute tolerance used by the span-position locator to decide that a requested
    /// position already has a section.
    pub span_tol: f64,

    /// Flat airfoil sequences with at least this many values are decimated on export, and
    /// sections at or above it are flagged by the diagnostics pass.
    pub point_limit: usize,

    /// The gain written into every exported control entry.
    pub gain: f64,
}

impl ResolveParams {
    pub fn new(span_tol: f64, point_limit: usize, gain: f64) -> Self {
        Self {
            span_tol,
            point_limit,
            gain,
        }
    }

    /// Load parameters from a JSON object. Keys which are not present keep their default
    /// values, so `{}` is a valid document.
    ///
    /// # Examples
    ///
    /// ```
    /// use wingloft::ResolveParams;
    /// let params = ResolveParams::from_json_str(r#"{"point_limit": 400}"#).unwrap();
    /// assert_eq!(params.point_limit, 400);
    /// assert_eq!(params.gain, 1.0);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Default for ResolveParams {
    fn default() -> Self {
        Self::new(SPAN_TOL, POINT_LIMIT, 1.0)
    }
}
