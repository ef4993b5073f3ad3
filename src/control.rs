//! The control system of an assembly: hinge points, control patterns, and the per-section
//! control entries handed to the solver.

use crate::records::{ControlKind, SegmentRef};
use crate::wing::WingId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One hinge point of a control surface. Its position is a chordwise fraction and a span fraction
/// on its wing. `section` is the name of the governing wing section once the assembly has been
/// resolved, and stays `None` for hinges that lie on the mirrored half of a wing or that no
/// control pattern uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HingePoint {
    pub surface: String,
    pub wing: WingId,
    pub kind: ControlKind,
    pub chord_pos: f64,
    pub span_pos: f64,
    pub section: Option<String>,
}

impl HingePoint {
    /// The signed chordwise hinge-moment reference. Trailing edge devices use the chordwise
    /// fraction, other devices use its negation.
    pub fn x_hinge(&self) -> f64 {
        match self.kind {
            ControlKind::TrailingEdge => self.chord_pos,
            ControlKind::LeadingEdge | ControlKind::Other => -self.chord_pos,
        }
    }
}

/// One participation of a control surface segment in a control pattern, with the indices of the
/// hinge points bounding the segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub factor: f64,
    pub surface: String,
    pub segment: usize,

    /// Index of the inner hinge point in the assembly's hinge list
    pub inner: usize,

    /// Index of the outer hinge point in the assembly's hinge list
    pub outer: usize,
}

impl Participation {
    pub fn new(factor: f64, segment: SegmentRef, inner: usize, outer: usize) -> Self {
        Self {
            factor,
            surface: segment.surface,
            segment: segment.segment,
            inner,
            outer,
        }
    }
}

/// A named control input, such as an aileron or a flap, made up of participating control surface
/// segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPattern {
    pub name: String,
    pub participations: Vec<Participation>,
}

impl ControlPattern {
    pub fn factors(&self) -> impl Iterator<Item = f64> + '_ {
        self.participations.iter().map(|p| p.factor)
    }

    /// The duplication sign of the pattern on the mirrored half of the aircraft.
    pub fn dup_sign(&self) -> DupSign {
        DupSign::from_factors(self.factors())
    }
}

/// Whether a control deflects identically or oppositely on the mirrored half of the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DupSign {
    Symmetric,
    Antisymmetric,
}

impl DupSign {
    /// A pattern is symmetric if the product of its largest and smallest participation factors is
    /// positive, meaning all factors share a strict sign. Any zero or mixed sign factor makes it
    /// antisymmetric.
    ///
    /// # Examples
    ///
    /// ```
    /// use wingloft::control::DupSign;
    /// assert_eq!(DupSign::from_factors([1.0, 1.0]), DupSign::Symmetric);
    /// assert_eq!(DupSign::from_factors([1.0, -1.0]), DupSign::Antisymmetric);
    /// ```
    pub fn from_factors(factors: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = factors
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
                (lo.min(f), hi.max(f))
            });

        if min.is_finite() && max.is_finite() && max * min > 0.0 {
            DupSign::Symmetric
        } else {
            DupSign::Antisymmetric
        }
    }

    pub fn value(self) -> i32 {
        match self {
            DupSign::Symmetric => 1,
            DupSign::Antisymmetric => -1,
        }
    }
}

impl Display for DupSign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The key of the control table: a wing name and the name of one of its sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionKey {
    pub wing: String,
    pub section: String,
}

impl SectionKey {
    pub fn new(wing: &str, section: &str) -> Self {
        Self {
            wing: wing.to_string(),
            section: section.to_string(),
        }
    }
}

/// A control entry attached to a wing section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlInfo {
    /// The name of the control pattern
    pub name: String,
    pub x_hinge: f64,
    pub sgn_dup: DupSign,
}
