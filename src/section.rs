//! A single airfoil cross-section of a wing panel, and the synthesis of new sections between two
//! existing ones.

use crate::airfoil::{Profile, blend_profiles};
use crate::records::SectionRecord;
use crate::{Point3, Result};
use serde::{Deserialize, Serialize};

/// One cross-section of a lofted wing panel. The center is the leading edge position in panel
/// coordinates, and its y component is the span coordinate used to order sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub airfoil: String,
    pub name: String,
    pub chord: f64,
    pub dihedral: f64,
    pub twist: f64,
    pub yaw: f64,
    pub center: Point3,
    pub profile: Profile,

    /// True for sections synthesized by `Section::interpolate`
    pub interpolated: bool,
}

impl Section {
    /// Build an authored section from its parsed record, validating the airfoil points.
    pub fn from_record(record: &SectionRecord) -> Result<Self> {
        let [x, y, z] = record.center;
        Ok(Self {
            airfoil: record.airfoil.clone(),
            name: record.name.clone(),
            chord: record.chord,
            dihedral: record.dihedral,
            twist: record.twist,
            yaw: record.yaw,
            center: Point3::new(x, y, z),
            profile: Profile::from_flat(&record.name, &record.points)?,
            interpolated: false,
        })
    }

    /// The span coordinate of the section.
    pub fn span(&self) -> f64 {
        self.center.y
    }

    /// Synthesize a section at the span coordinate `target` by blending the `outer` and `inner`
    /// sections. The weights are
    ///
    /// * inner: `(outer_span - target) / (outer_span - inner_span)`
    /// * outer: `(target - inner_span) / (outer_span - inner_span)`
    ///
    /// and chord, dihedral, twist, yaw, and center are blended linearly with them. The airfoil is
    /// blended with `blend_profiles`, and the airfoil identity is taken from whichever section has
    /// the larger weight. Returns `None` if the two sections share a span coordinate.
    ///
    /// # Arguments
    ///
    /// * `outer`: the bracketing section on one side of `target`
    /// * `inner`: the bracketing section on the other side of `target`
    /// * `target`: the span coordinate of the new section, expected to lie between the two
    ///
    /// returns: Option<Section>
    pub fn interpolate(outer: &Section, inner: &Section, target: f64) -> Option<Section> {
        let outer_span = outer.span();
        let inner_span = inner.span();
        if outer_span == inner_span {
            return None;
        }

        let inner_alpha = (outer_span - target) / (outer_span - inner_span);
        let outer_alpha = (target - inner_span) / (outer_span - inner_span);
        let lerp = |o: f64, i: f64| outer_alpha * o + inner_alpha * i;

        let airfoil = if outer_alpha > inner_alpha {
            outer.airfoil.clone()
        } else {
            inner.airfoil.clone()
        };

        Some(Section {
            airfoil,
            name: format!("interpolated-{target:.3}"),
            chord: lerp(outer.chord, inner.chord),
            dihedral: lerp(outer.dihedral, inner.dihedral),
            twist: lerp(outer.twist, inner.twist),
            yaw: lerp(outer.yaw, inner.yaw),
            center: Point3::from(outer.center.coords * outer_alpha + inner.center.coords * inner_alpha),
            profile: blend_profiles(&outer.profile, &inner.profile, outer_alpha, inner_alpha),
            interpolated: true,
        })
    }
}
