//! The aircraft-level model. A `ParsedModel` holds the records produced by the document parser,
//! and `ParsedModel::resolve` consumes it to build an `Assembly` in which every control hinge is
//! bound to a wing section that exists at its span position.

mod diagnostics;
mod export;
mod resolve;

use crate::config::ResolveParams;
use crate::control::{ControlInfo, ControlPattern, HingePoint, SectionKey};
use crate::records::{ControlPatternRecord, ControlSurfaceRecord, WingRecord};
use crate::transform::translate;
use crate::wing::{WingId, WingPanel};
use crate::{Point3, Result, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use diagnostics::Finding;
pub use export::{ExportControl, ExportSection, ExportSurface};

/// The unresolved model, exactly as described by the input document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedModel {
    pub wings: Vec<WingRecord>,
    #[serde(default)]
    pub surfaces: Vec<ControlSurfaceRecord>,
    #[serde(default)]
    pub patterns: Vec<ControlPatternRecord>,
}

impl ParsedModel {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Resolve the model into an assembly. Sections are interpolated and inserted at every hinge
    /// span position, each control pattern's hinges are bound to their governing sections, and
    /// the control table is filled. Consuming the parsed model means the pass runs exactly once.
    ///
    /// # Arguments
    ///
    /// * `params`: the resolution parameters
    ///
    /// returns: Result<Assembly, WingError>
    pub fn resolve(self, params: &ResolveParams) -> Result<Assembly> {
        resolve::resolve(self, params)
    }
}

/// A resolved wing assembly. It is only produced by `ParsedModel::resolve` and is read-only
/// afterward.
#[derive(Debug, Clone)]
pub struct Assembly {
    wings: Vec<WingPanel>,
    wing_ids: HashMap<String, WingId>,
    hinges: Vec<HingePoint>,
    patterns: Vec<ControlPattern>,
    controls: HashMap<SectionKey, Vec<ControlInfo>>,
}

/// A control surface segment hinge line placed in the aircraft frame.
#[derive(Debug, Clone, PartialEq)]
pub struct HingeLine {
    pub control: String,
    pub surface: String,
    pub segment: usize,
    pub inner: Point3,
    pub outer: Point3,
}

impl Assembly {
    pub fn wings(&self) -> &[WingPanel] {
        &self.wings
    }

    pub fn wing(&self, id: WingId) -> &WingPanel {
        &self.wings[id.0]
    }

    pub fn wing_id(&self, name: &str) -> Option<WingId> {
        self.wing_ids.get(name).copied()
    }

    pub fn wing_by_name(&self, name: &str) -> Option<&WingPanel> {
        self.wing_id(name).map(|id| self.wing(id))
    }

    pub fn hinges(&self) -> &[HingePoint] {
        &self.hinges
    }

    pub fn patterns(&self) -> &[ControlPattern] {
        &self.patterns
    }

    /// The control entries attached to a section, in the order they were accumulated.
    pub fn control_info(&self, wing: &str, section: &str) -> Option<&[ControlInfo]> {
        self.controls
            .get(&SectionKey::new(wing, section))
            .map(|v| v.as_slice())
    }

    /// The whole control table, ordered by wing and then by section as they appear in the
    /// assembly.
    pub fn control_table(&self) -> Vec<(SectionKey, &[ControlInfo])> {
        self.wings
            .iter()
            .flat_map(|w| {
                w.sections().iter().filter_map(move |s| {
                    self.control_info(&w.name, &s.name)
                        .map(|infos| (SectionKey::new(&w.name, &s.name), infos))
                })
            })
            .collect()
    }

    /// The location of a hinge point in the aircraft frame, found on its governing section at the
    /// hinge chordwise fraction. Returns `None` if the hinge is not bound to a section.
    ///
    /// # Arguments
    ///
    /// * `index`: the index of the hinge in `hinges()`
    ///
    /// returns: Option<OPoint<f64, Const<3>>>
    pub fn hinge_location(&self, index: usize) -> Option<Point3> {
        let hinge = self.hinges.get(index)?;
        let name = hinge.section.as_deref()?;
        let wing = self.wing(hinge.wing);
        let section = wing.sections().iter().find(|s| s.name == name)?;

        let local = translate(
            &Vector3::new(hinge.chord_pos * section.chord, 0.0, 0.0),
            &section.center,
        );
        Some(wing.place(&local))
    }

    /// The placed hinge lines of every control pattern segment whose hinges are both bound.
    pub fn hinge_lines(&self) -> Vec<HingeLine> {
        self.patterns
            .iter()
            .flat_map(|pattern| {
                pattern.participations.iter().filter_map(move |p| {
                    Some(HingeLine {
                        control: pattern.name.clone(),
                        surface: p.surface.clone(),
                        segment: p.segment,
                        inner: self.hinge_location(p.inner)?,
                        outer: self.hinge_location(p.outer)?,
                    })
                })
            })
            .collect()
    }
}
