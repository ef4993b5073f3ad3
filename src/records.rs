//! Plain records describing a wing assembly as it comes out of the document parser. These carry
//! no behavior; `ParsedModel::resolve` validates them and builds the resolved assembly.

use crate::errors::WingError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The flag which marks a wing as one half of a symmetric aircraft.
pub const MIRROR_FLAG: &str = "autosym";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingRecord {
    pub name: String,
    #[serde(default)]
    pub flags: Vec<String>,
    pub origin: [f64; 3],
    pub rotation: [f64; 3],
    pub sections: Vec<SectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub airfoil: String,
    pub name: String,
    pub chord: f64,
    pub dihedral: f64,
    pub twist: f64,
    pub yaw: f64,
    pub center: [f64; 3],

    /// Flat sequence of alternating x and y values
    pub points: Vec<f64>,
}

/// The kind of device a control surface is. Trailing edge devices use the hinge chordwise
/// fraction directly as their hinge-moment reference, everything else uses its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    #[serde(rename = "TEF")]
    TrailingEdge,
    #[serde(rename = "LEF")]
    LeadingEdge,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HingeRecord {
    pub chord_pos: f64,
    pub span_pos: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSurfaceRecord {
    pub name: String,
    pub wing: String,
    pub kind: ControlKind,
    pub hinges: Vec<HingeRecord>,
}

/// One `(factor, surface, segment)` entry of a control pattern. A missing segment index means
/// segment 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationRecord {
    pub factor: f64,
    pub surface: String,
    #[serde(default)]
    pub segment: usize,
}

impl ParticipationRecord {
    /// Build a participation from a document segment identifier of the form
    /// `<Surface>Segment<N>`, or just `<Surface>` for segment 0.
    pub fn from_id(factor: f64, id: &str) -> Result<Self, WingError> {
        let segment = id.parse::<SegmentRef>()?;
        Ok(Self {
            factor,
            surface: segment.surface,
            segment: segment.segment,
        })
    }

    pub fn segment_ref(&self) -> SegmentRef {
        SegmentRef {
            surface: self.surface.clone(),
            segment: self.segment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPatternRecord {
    pub name: String,
    pub participations: Vec<ParticipationRecord>,
}

/// A reference to one segment of a control surface. Segment `n` spans the `n`-th and `n+1`-th
/// hinge points declared on the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRef {
    pub surface: String,
    pub segment: usize,
}

impl FromStr for SegmentRef {
    type Err = WingError;

    /// Parse a participation id.
    ///
    /// # Examples
    ///
    /// ```
    /// use wingloft::records::SegmentRef;
    /// let r: SegmentRef = "AileronSegment1".parse().unwrap();
    /// assert_eq!(r.surface, "Aileron");
    /// assert_eq!(r.segment, 1);
    /// let r: SegmentRef = "Flap".parse().unwrap();
    /// assert_eq!(r.segment, 0);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split("Segment");
        let surface = parts.next().unwrap_or_default();
        let segment = match parts.next() {
            Some(n) => n
                .trim()
                .parse::<usize>()
                .map_err(|_| WingError::InvalidSegmentId(s.to_string()))?,
            None => 0,
        };

        if surface.is_empty() || parts.next().is_some() {
            return Err(WingError::InvalidSegmentId(s.to_string()));
        }

        Ok(Self {
            surface: surface.to_string(),
            segment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ElevatorSegment0", "Elevator", 0)]
    #[test_case("ElevatorSegment12", "Elevator", 12)]
    #[test_case("Rudder", "Rudder", 0)]
    fn parses_segment_ids(id: &str, surface: &str, segment: usize) {
        let r: SegmentRef = id.parse().unwrap();
        assert_eq!(r.surface, surface);
        assert_eq!(r.segment, segment);
    }

    #[test_case("FlapSegment"; "missing index")]
    #[test_case("FlapSegmentX"; "not a number")]
    #[test_case("Segment2"; "missing surface")]
    #[test_case("FlapSegment1Segment2"; "repeated marker")]
    fn rejects_bad_ids(id: &str) {
        assert!(id.parse::<SegmentRef>().is_err());
    }

    #[test]
    fn participation_from_document_id() {
        let p = ParticipationRecord::from_id(-1.0, "AileronSegment2").unwrap();
        assert_eq!(p.surface, "Aileron");
        assert_eq!(p.segment, 2);
        assert_eq!(p.segment_ref(), "AileronSegment2".parse::<SegmentRef>().unwrap());
        assert!(ParticipationRecord::from_id(1.0, "Segment2").is_err());
    }

    #[test]
    fn participation_segment_defaults_to_zero() {
        let p: ParticipationRecord =
            serde_json::from_str(r#"{"factor": 1.0, "surface": "Flap"}"#).unwrap();
        assert_eq!(p.segment, 0);
    }

    #[test]
    fn unknown_kind_deserializes_as_other() {
        let k: ControlKind = serde_json::from_str("\"SPOILER\"").unwrap();
        assert_eq!(k, ControlKind::Other);
        let k: ControlKind = serde_json::from_str("\"TEF\"").unwrap();
        assert_eq!(k, ControlKind::TrailingEdge);
    }
}
