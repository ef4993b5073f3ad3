//! The view of a resolved assembly consumed by the solver file writer. Everything the writer
//! needs is computed here, so writing reduces to formatting these values.

use super::Assembly;
use crate::airfoil::decimate;
use crate::config::ResolveParams;
use crate::control::DupSign;
use crate::locator::SpanOrder;
use crate::transform::rotate;
use crate::{Point3, Vector3};
use serde::Serialize;

/// One wing panel as a solver surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSurface {
    pub name: String,

    /// True if the solver should duplicate the surface about the symmetry plane
    pub duplicate: bool,

    /// Incidence angle of the whole surface, the panel rotation about Y
    pub angle: f64,
    pub translate: Vector3,

    /// Sections in ascending span coordinate
    pub sections: Vec<ExportSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSection {
    pub name: String,

    /// Leading edge point, rotated by the panel rotation but not translated
    pub leading_edge: Point3,
    pub chord: f64,
    pub twist: f64,

    /// Flat airfoil sequence, decimated to respect the point limit
    pub airfoil: Vec<f64>,
    pub controls: Vec<ExportControl>,
}

/// A control entry in solver field order: name, gain, hinge reference, hinge vector, and
/// duplication sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportControl {
    pub name: String,
    pub gain: f64,
    pub x_hinge: f64,
    pub hinge_vector: Vector3,
    pub sgn_dup: DupSign,
}

impl Assembly {
    /// Build the export view of every wing panel, in assembly order.
    pub fn export_surfaces(&self, params: &ResolveParams) -> Vec<ExportSurface> {
        self.wings
            .iter()
            .map(|wing| {
                let mut sections = wing
                    .sections()
                    .iter()
                    .map(|section| ExportSection {
                        name: section.name.clone(),
                        leading_edge: rotate(&wing.rotation, &section.center),
                        chord: section.chord,
                        twist: section.twist,
                        airfoil: decimate(&section.profile.to_flat(), params.point_limit),
                        controls: self
                            .control_info(&wing.name, &section.name)
                            .unwrap_or_default()
                            .iter()
                            .map(|info| ExportControl {
                                name: info.name.clone(),
                                gain: params.gain,
                                x_hinge: info.x_hinge,
                                hinge_vector: Vector3::zeros(),
                                sgn_dup: info.sgn_dup,
                            })
                            .collect(),
                    })
                    .collect::<Vec<_>>();

                if wing.stations().order() == SpanOrder::Descending {
                    sections.reverse();
                }

                ExportSurface {
                    name: wing.name.clone(),
                    duplicate: wing.is_mirrored(),
                    angle: wing.rotation.y,
                    translate: wing.origin,
                    sections,
                }
            })
            .collect()
    }
}
