//! Wing panels and the ordered containers holding their sections.

use crate::errors::WingError;
use crate::locator::{Bracket, SpanOrder, locate};
use crate::records::{MIRROR_FLAG, WingRecord};
use crate::section::Section;
use crate::transform::{rotate, translate};
use crate::{Point3, Result, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stable index of a wing panel within an assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WingId(pub usize);

/// The outcome of requesting a section at a span coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splice {
    /// A new section was synthesized and inserted at this index.
    Inserted(usize),

    /// A section already exists at the coordinate.
    Existing(usize),

    /// The coordinate is outside the span range of the wing.
    Outside,

    /// The bracketing sections share a span coordinate, nothing was inserted.
    Degenerate,
}

/// The sections of a wing kept in monotonic span order, together with their span coordinates.
/// Neighboring sections may share a span coordinate, as at a winglet kink. The order is detected
/// from the authored sections and every insertion keeps it. There is no way to build one other
/// than `SpanStations::new`, so the container is never empty.
#[derive(Debug, Clone, Serialize)]
pub struct SpanStations {
    order: SpanOrder,
    spans: Vec<f64>,
    sections: Vec<Section>,
}

impl SpanStations {
    /// Create the container from a wing's authored sections, which must be non-empty and
    /// monotonic in span coordinate.
    ///
    /// # Arguments
    ///
    /// * `wing`: the name of the owning wing, used only for error reporting
    /// * `sections`: the authored sections in document order
    ///
    /// returns: Result<SpanStations, WingError>
    pub fn new(wing: &str, sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(WingError::EmptyWing {
                wing: wing.to_string(),
            });
        }

        let spans = sections.iter().map(|s| s.span()).collect::<Vec<_>>();
        let order = SpanOrder::detect(&spans).ok_or_else(|| WingError::UnsortedSections {
            wing: wing.to_string(),
        })?;

        Ok(Self {
            order,
            spans,
            sections,
        })
    }

    pub fn order(&self) -> SpanOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn spans(&self) -> &[f64] {
        &self.spans
    }

    /// Returns the minimum and maximum span coordinates.
    pub fn range(&self) -> (f64, f64) {
        let first = self.spans[0];
        let last = self.spans[self.spans.len() - 1];
        match self.order {
            SpanOrder::Descending => (last, first),
            SpanOrder::Ascending => (first, last),
        }
    }

    pub fn locate(&self, target: f64, tol: f64) -> Bracket {
        locate(&self.spans, self.order, target, tol)
    }

    /// Make sure a section exists at the span coordinate `target`. If the coordinate falls
    /// strictly between two sections a new one is interpolated from them and inserted between
    /// them, so that later requests see it.
    ///
    /// # Arguments
    ///
    /// * `target`: the span coordinate at which a section is required
    /// * `tol`: the tolerance at which an existing section satisfies the request
    ///
    /// returns: Splice
    pub fn splice(&mut self, target: f64, tol: f64) -> Splice {
        match self.locate(target, tol) {
            Bracket::Outside => Splice::Outside,
            Bracket::Exact(i) => Splice::Existing(i),
            Bracket::Between { lower, upper } => self.insert_between(lower, upper, target),
        }
    }

    /// Interpolate a section at `target` from the sections at `upper` and `lower` and insert it at
    /// `lower`. Nothing is inserted if the two sections share a span coordinate.
    fn insert_between(&mut self, lower: usize, upper: usize, target: f64) -> Splice {
        let outer = &self.sections[upper];
        let inner = &self.sections[lower];
        match Section::interpolate(outer, inner, target) {
            Some(section) => {
                self.spans.insert(lower, target);
                self.sections.insert(lower, section);
                Splice::Inserted(lower)
            }
            None => Splice::Degenerate,
        }
    }
}

/// A named, lofted wing surface. The section centers are in panel coordinates, and the panel is
/// placed in the aircraft frame by rotating about the fixed world axes and then translating by
/// `origin`.
#[derive(Debug, Clone, Serialize)]
pub struct WingPanel {
    pub name: String,
    pub flags: Vec<String>,
    pub origin: Vector3,

    /// Rotation angles about the fixed X, Y and Z axes, applied in that order
    pub rotation: Vector3,

    stations: SpanStations,
}

impl WingPanel {
    pub fn new(
        name: &str,
        flags: Vec<String>,
        origin: Vector3,
        rotation: Vector3,
        sections: Vec<Section>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            flags,
            origin,
            rotation,
            stations: SpanStations::new(name, sections)?,
        })
    }

    pub fn from_record(record: &WingRecord) -> Result<Self> {
        let sections = record
            .sections
            .iter()
            .map(Section::from_record)
            .collect::<Result<Vec<_>>>()?;

        Self::new(
            &record.name,
            record.flags.clone(),
            Vector3::from(record.origin),
            Vector3::from(record.rotation),
            sections,
        )
    }

    /// True if the panel is one half of a symmetric aircraft, in which case span fractions are
    /// relative to the full span including the mirrored half.
    pub fn is_mirrored(&self) -> bool {
        self.flags.iter().any(|f| f == MIRROR_FLAG)
    }

    pub fn sections(&self) -> &[Section] {
        self.stations.sections()
    }

    pub fn stations(&self) -> &SpanStations {
        &self.stations
    }

    /// Convert a span fraction into a span coordinate, measured from the maximum span coordinate
    /// of the panel. For a mirrored panel the fraction is folded by a factor of two and only
    /// fractions up to 0.5 are valid, otherwise fractions up to 1.0 are valid. Returns `None` for
    /// fractions above the valid range.
    ///
    /// # Arguments
    ///
    /// * `fraction`: the span fraction to convert
    ///
    /// returns: Option<f64>
    pub fn span_coordinate(&self, fraction: f64) -> Option<f64> {
        let fold = if self.is_mirrored() { 2.0 } else { 1.0 };
        if fraction > 1.0 / fold {
            return None;
        }

        let (min, max) = self.stations.range();
        Some(max - fold * fraction * (max - min))
    }

    /// Find the index of the section governing a span fraction. An exact hit returns that
    /// section, a fraction between two sections returns the lower bracketing index, and a
    /// fraction outside the panel returns `None`.
    pub fn section_index_at(&self, fraction: f64, tol: f64) -> Option<usize> {
        let target = self.span_coordinate(fraction)?;
        match self.stations.locate(target, tol) {
            Bracket::Outside => None,
            Bracket::Exact(i) => Some(i),
            Bracket::Between { lower, .. } => Some(lower),
        }
    }

    pub fn section_at(&self, fraction: f64, tol: f64) -> Option<&Section> {
        self.section_index_at(fraction, tol)
            .map(|i| &self.stations.sections()[i])
    }

    /// Make sure a section exists at each of the requested span fractions, interpolating new
    /// sections where needed. The requests are handled in order against the evolving section
    /// list. Returns the number of sections inserted.
    ///
    /// # Arguments
    ///
    /// * `fractions`: the span fractions of the hinge points on this panel
    /// * `tol`: the tolerance at which an existing section satisfies a request
    ///
    /// returns: usize
    pub fn insert_control_sections(&mut self, fractions: &[f64], tol: f64) -> usize {
        let mut inserted = 0;
        for &fraction in fractions {
            let Some(target) = self.span_coordinate(fraction) else {
                debug!(wing = %self.name, fraction, "span fraction beyond half span, skipped");
                continue;
            };

            match self.stations.splice(target, tol) {
                Splice::Inserted(i) => {
                    inserted += 1;
                    debug!(
                        wing = %self.name,
                        fraction,
                        target,
                        index = i,
                        section = %self.stations.sections()[i].name,
                        "inserted interpolated section"
                    );
                }
                Splice::Existing(i) => {
                    debug!(wing = %self.name, fraction, index = i, "section already at span position");
                }
                Splice::Outside => {
                    debug!(wing = %self.name, fraction, target, "span position outside wing, skipped");
                }
                Splice::Degenerate => {
                    debug!(wing = %self.name, fraction, target, "bracketing sections coincide, skipped");
                }
            }
        }
        inserted
    }

    /// Place a point given in panel coordinates into the aircraft frame.
    pub fn place(&self, point: &Point3) -> Point3 {
        translate(&self.origin, &rotate(&self.rotation, point))
    }

    /// The leading edge points of every section, placed in the aircraft frame.
    pub fn leading_edges(&self) -> Vec<Point3> {
        self.sections().iter().map(|s| self.place(&s.center)).collect()
    }

    /// The trailing edge points of every section, placed in the aircraft frame.
    pub fn trailing_edges(&self) -> Vec<Point3> {
        self.sections()
            .iter()
            .map(|s| self.place(&translate(&Vector3::new(s.chord, 0.0, 0.0), &s.center)))
            .collect()
    }
}
