//! An observational pass over a resolved assembly which reports geometry the solver export may
//! not represent well, along with hinges that were left without a governing section.

use super::Assembly;
use crate::config::ResolveParams;
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    /// The wing panel has a non-zero rotation about Z.
    WingYaw { wing: String },

    /// The wing panel rotates about both X and Y.
    WingRollAndPitch { wing: String },

    /// The section has a non-zero yaw angle.
    SectionYaw { wing: String, section: String },

    /// The flat airfoil sequence of the section has at least the configured number of values.
    PointCount {
        wing: String,
        section: String,
        count: usize,
    },

    /// A control pattern uses the hinge point, but no section governs its span position.
    UnboundHinge { hinge: usize, surface: String },

    /// No control pattern uses the hinge point, so it was never bound.
    UnreferencedHinge { hinge: usize, surface: String },
}

impl Display for Finding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::WingYaw { wing } => write!(f, "wing '{wing}' has non-zero yaw"),
            Finding::WingRollAndPitch { wing } => {
                write!(f, "wing '{wing}' has non-zero roll and pitch")
            }
            Finding::SectionYaw { wing, section } => {
                write!(f, "section '{section}' of wing '{wing}' has non-zero yaw")
            }
            Finding::PointCount {
                wing,
                section,
                count,
            } => write!(
                f,
                "section '{section}' of wing '{wing}' has {count} airfoil values"
            ),
            Finding::UnboundHinge { hinge, surface } => {
                write!(f, "hinge {hinge} of surface '{surface}' is not bound to a section")
            }
            Finding::UnreferencedHinge { hinge, surface } => {
                write!(f, "hinge {hinge} of surface '{surface}' is not used by any control")
            }
        }
    }
}

impl Assembly {
    /// Walk the assembly and collect findings, wing by wing and then hinge by hinge.
    pub fn diagnostics(&self, params: &ResolveParams) -> Vec<Finding> {
        let mut findings = Vec::new();

        for wing in &self.wings {
            if wing.rotation.z != 0.0 {
                findings.push(Finding::WingYaw {
                    wing: wing.name.clone(),
                });
            }
            if wing.rotation.x != 0.0 && wing.rotation.y != 0.0 {
                findings.push(Finding::WingRollAndPitch {
                    wing: wing.name.clone(),
                });
            }

            for section in wing.sections() {
                if section.yaw != 0.0 {
                    findings.push(Finding::SectionYaw {
                        wing: wing.name.clone(),
                        section: section.name.clone(),
                    });
                }
                let count = section.profile.flat_len();
                if count >= params.point_limit {
                    findings.push(Finding::PointCount {
                        wing: wing.name.clone(),
                        section: section.name.clone(),
                        count,
                    });
                }
            }
        }

        let referenced = self
            .patterns
            .iter()
            .flat_map(|p| p.participations.iter().flat_map(|x| [x.inner, x.outer]))
            .collect::<HashSet<_>>();

        for (i, hinge) in self.hinges.iter().enumerate() {
            let surface = hinge.surface.clone();
            if !referenced.contains(&i) {
                findings.push(Finding::UnreferencedHinge { hinge: i, surface });
            } else if hinge.section.is_none() {
                findings.push(Finding::UnboundHinge { hinge: i, surface });
            }
        }

        findings
    }

    /// Log every diagnostics finding as a warning, followed by the control table, and return how
    /// many findings there were.
    pub fn log_diagnostics(&self, params: &ResolveParams) -> usize {
        let findings = self.diagnostics(params);
        for finding in &findings {
            warn!("{finding}");
        }
        self.log_control_table();
        findings.len()
    }

    /// Dump the control patterns with their hinge indices and the hinge bindings at debug level,
    /// then every control table entry at info level. Returns the number of table entries.
    pub fn log_control_table(&self) -> usize {
        for pattern in &self.patterns {
            for p in &pattern.participations {
                debug!(
                    control = %pattern.name,
                    factor = p.factor,
                    surface = %p.surface,
                    segment = p.segment,
                    inner = p.inner,
                    outer = p.outer,
                    "control participation"
                );
            }
        }

        for (i, hinge) in self.hinges.iter().enumerate() {
            debug!(
                hinge = i,
                surface = %hinge.surface,
                wing = %self.wing(hinge.wing).name,
                section = hinge.section.as_deref().unwrap_or("-"),
                "hinge binding"
            );
        }

        let mut entries = 0;
        for (key, infos) in self.control_table() {
            for control in infos {
                info!(
                    wing = %key.wing,
                    section = %key.section,
                    control = %control.name,
                    x_hinge = control.x_hinge,
                    sgn_dup = %control.sgn_dup,
                    "control entry"
                );
                entries += 1;
            }
        }
        entries
    }
}
