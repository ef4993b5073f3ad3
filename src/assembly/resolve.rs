//! The resolution pass which turns a parsed model into an assembly.

use super::{Assembly, ParsedModel};
use crate::config::ResolveParams;
use crate::control::{ControlInfo, ControlPattern, HingePoint, Participation, SectionKey};
use crate::errors::WingError;
use crate::records::{ControlPatternRecord, ControlSurfaceRecord};
use crate::wing::{WingId, WingPanel};
use crate::Result;
use std::collections::HashMap;
use tracing::{debug, info};

pub(super) fn resolve(model: ParsedModel, params: &ResolveParams) -> Result<Assembly> {
    let mut wings = model
        .wings
        .iter()
        .map(WingPanel::from_record)
        .collect::<Result<Vec<_>>>()?;
    let wing_ids = index_wings(&wings)?;

    let mut hinges = build_hinges(&model.surfaces, &wing_ids)?;
    let patterns = model
        .patterns
        .iter()
        .map(|p| build_pattern(p, &hinges))
        .collect::<Result<Vec<_>>>()?;

    let inserted = splice_wings(&mut wings, &hinges, params.span_tol);
    let controls = bind_hinges(&wings, &mut hinges, &patterns, params.span_tol);

    info!(
        wings = wings.len(),
        inserted,
        hinges = hinges.len(),
        bound = hinges.iter().filter(|h| h.section.is_some()).count(),
        "resolved wing assembly"
    );

    Ok(Assembly {
        wings,
        wing_ids,
        hinges,
        patterns,
        controls,
    })
}

/// Build the name to index table of the wings, rejecting repeated names.
fn index_wings(wings: &[WingPanel]) -> Result<HashMap<String, WingId>> {
    let mut ids = HashMap::with_capacity(wings.len());
    for (i, wing) in wings.iter().enumerate() {
        if ids.insert(wing.name.clone(), WingId(i)).is_some() {
            return Err(WingError::DuplicateWing(wing.name.clone()));
        }
    }
    Ok(ids)
}

/// Flatten the hinge points of every control surface into one list, in declaration order.
fn build_hinges(
    surfaces: &[ControlSurfaceRecord],
    wing_ids: &HashMap<String, WingId>,
) -> Result<Vec<HingePoint>> {
    let mut hinges = Vec::new();
    for surface in surfaces {
        let wing = *wing_ids
            .get(&surface.wing)
            .ok_or_else(|| WingError::UnknownWing {
                surface: surface.name.clone(),
                wing: surface.wing.clone(),
            })?;

        hinges.extend(surface.hinges.iter().map(|h| HingePoint {
            surface: surface.name.clone(),
            wing,
            kind: surface.kind,
            chord_pos: h.chord_pos,
            span_pos: h.span_pos,
            section: None,
        }));
    }
    Ok(hinges)
}

/// Resolve each participation of a control pattern to the pair of hinge indices bounding its
/// segment. Segment `n` of a surface spans the `n`-th and `n+1`-th hinge points of that surface.
fn build_pattern(record: &ControlPatternRecord, hinges: &[HingePoint]) -> Result<ControlPattern> {
    let participations = record
        .participations
        .iter()
        .map(|p| {
            let segment = p.segment_ref();
            let on_surface = hinges
                .iter()
                .enumerate()
                .filter(|(_, h)| h.surface == segment.surface)
                .map(|(i, _)| i)
                .collect::<Vec<_>>();

            match (
                on_surface.get(segment.segment),
                on_surface.get(segment.segment + 1),
            ) {
                (Some(&inner), Some(&outer)) => Ok(Participation::new(p.factor, segment, inner, outer)),
                _ => Err(WingError::MalformedReference {
                    pattern: record.name.clone(),
                    surface: segment.surface,
                    segment: segment.segment,
                    available: on_surface.len(),
                }),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ControlPattern {
        name: record.name.clone(),
        participations,
    })
}

/// Insert sections at the span fractions of every hinge point, wing by wing. Returns the total
/// number of sections inserted.
fn splice_wings(wings: &mut [WingPanel], hinges: &[HingePoint], tol: f64) -> usize {
    wings
        .iter_mut()
        .enumerate()
        .map(|(i, wing)| {
            let fractions = hinges
                .iter()
                .filter(|h| h.wing == WingId(i))
                .map(|h| h.span_pos)
                .collect::<Vec<_>>();
            wing.insert_control_sections(&fractions, tol)
        })
        .sum()
}

/// Bind the inner and outer hinge of every participation to the section at its span position and
/// collect the control table. Hinges without a governing section are left unbound and contribute
/// nothing to the table.
fn bind_hinges(
    wings: &[WingPanel],
    hinges: &mut [HingePoint],
    patterns: &[ControlPattern],
    tol: f64,
) -> HashMap<SectionKey, Vec<ControlInfo>> {
    let mut controls: HashMap<SectionKey, Vec<ControlInfo>> = HashMap::new();

    for pattern in patterns {
        let sgn_dup = pattern.dup_sign();
        for participation in &pattern.participations {
            for index in [participation.inner, participation.outer] {
                let hinge = &mut hinges[index];
                let wing = &wings[hinge.wing.0];
                let section = wing
                    .section_at(hinge.span_pos, tol)
                    .map(|s| s.name.clone());
                hinge.section = section.clone();

                let Some(section) = section else {
                    debug!(
                        control = %pattern.name,
                        surface = %hinge.surface,
                        wing = %wing.name,
                        span_pos = hinge.span_pos,
                        "hinge has no governing section"
                    );
                    continue;
                };

                debug!(
                    control = %pattern.name,
                    surface = %hinge.surface,
                    wing = %wing.name,
                    section = %section,
                    "bound hinge"
                );

                controls
                    .entry(SectionKey::new(&wing.name, &section))
                    .or_default()
                    .push(ControlInfo {
                        name: pattern.name.clone(),
                        x_hinge: hinge.x_hinge(),
                        sgn_dup,
                    });
            }
        }
    }

    controls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airfoil::tests::diamond;
    use crate::control::DupSign;
    use crate::records::{
        ControlKind, HingeRecord, ParticipationRecord, SectionRecord, WingRecord,
    };
    use approx::assert_relative_eq;

    fn section_record(name: &str, span: f64, chord: f64) -> SectionRecord {
        SectionRecord {
            airfoil: "naca0010".to_string(),
            name: name.to_string(),
            chord,
            dihedral: 0.0,
            twist: 0.0,
            yaw: 0.0,
            center: [0.0, span, 0.0],
            points: diamond(0.0, 1.0, 0.1),
        }
    }

    fn wing_record(name: &str, flags: &[&str]) -> WingRecord {
        WingRecord {
            name: name.to_string(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
            origin: [0.0; 3],
            rotation: [0.0; 3],
            sections: vec![
                section_record("tip", 10.0, 1.0),
                section_record("root", 0.0, 2.0),
            ],
        }
    }

    fn surface(name: &str, wing: &str, kind: ControlKind, spans: &[f64]) -> ControlSurfaceRecord {
        ControlSurfaceRecord {
            name: name.to_string(),
            wing: wing.to_string(),
            kind,
            hinges: spans
                .iter()
                .map(|s| HingeRecord {
                    chord_pos: 0.75,
                    span_pos: *s,
                })
                .collect(),
        }
    }

    fn pattern(name: &str, parts: &[(f64, &str)]) -> ControlPatternRecord {
        ControlPatternRecord {
            name: name.to_string(),
            participations: parts
                .iter()
                .map(|(factor, id)| ParticipationRecord::from_id(*factor, id).unwrap())
                .collect(),
        }
    }

    fn model() -> ParsedModel {
        ParsedModel {
            wings: vec![wing_record("Main", &[])],
            surfaces: vec![surface("Flap", "Main", ControlKind::TrailingEdge, &[0.5, 0.8])],
            patterns: vec![pattern("flap", &[(1.0, "FlapSegment0")])],
        }
    }

    #[test]
    fn single_hinge_creates_midspan_section() {
        let mut m = model();
        m.surfaces = vec![surface("Flap", "Main", ControlKind::TrailingEdge, &[0.5, 1.0])];
        let a = m.resolve(&ResolveParams::default()).unwrap();

        let wing = a.wing_by_name("Main").unwrap();
        assert_eq!(wing.sections().len(), 3);
        let mid = &wing.sections()[1];
        assert_relative_eq!(mid.chord, 1.5);
        assert_relative_eq!(mid.span(), 5.0);
        assert_eq!(a.hinges()[0].section.as_deref(), Some(mid.name.as_str()));
        assert_eq!(a.hinges()[1].section.as_deref(), Some("root"));
    }

    #[test]
    fn pattern_entries_reference_surface_hinges() {
        let mut m = model();
        m.surfaces.insert(0, surface("Aileron", "Main", ControlKind::TrailingEdge, &[0.1, 0.2, 0.3]));
        m.patterns.push(pattern("roll", &[(1.0, "AileronSegment1")]));
        let a = m.resolve(&ResolveParams::default()).unwrap();

        let roll = &a.patterns()[1].participations[0];
        assert_eq!((roll.inner, roll.outer), (1, 2));
        let flap = &a.patterns()[0].participations[0];
        assert_eq!((flap.inner, flap.outer), (3, 4));
    }

    #[test]
    fn segment_beyond_hinges_is_malformed() {
        let mut m = model();
        m.patterns = vec![pattern("flap", &[(1.0, "FlapSegment1")])];
        let r = m.resolve(&ResolveParams::default());
        assert!(matches!(
            r,
            Err(WingError::MalformedReference { segment: 1, available: 2, .. })
        ));
    }

    #[test]
    fn unknown_wing_is_rejected() {
        let mut m = model();
        m.surfaces[0].wing = "Tail".to_string();
        assert!(matches!(
            m.resolve(&ResolveParams::default()),
            Err(WingError::UnknownWing { .. })
        ));
    }

    #[test]
    fn duplicate_wing_is_rejected() {
        let mut m = model();
        m.wings.push(wing_record("Main", &[]));
        assert!(matches!(
            m.resolve(&ResolveParams::default()),
            Err(WingError::DuplicateWing(_))
        ));
    }

    #[test]
    fn control_entries_carry_sign_conventions() {
        let mut m = model();
        m.surfaces.push(surface("Slat", "Main", ControlKind::LeadingEdge, &[0.1, 0.5]));
        m.patterns = vec![
            pattern("flap", &[(1.0, "FlapSegment0")]),
            pattern("roll", &[(1.0, "FlapSegment0"), (-1.0, "SlatSegment0")]),
        ];
        let a = m.resolve(&ResolveParams::default()).unwrap();

        let mid = a.wings()[0].section_at(0.5, 1.0e-3).unwrap().name.clone();
        let infos = a.control_info("Main", &mid).unwrap();
        // flap inner, roll via flap inner, roll via slat outer
        assert_eq!(infos.len(), 3);
        assert_eq!(infos[0].name, "flap");
        assert_eq!(infos[0].sgn_dup, DupSign::Symmetric);
        assert_relative_eq!(infos[0].x_hinge, 0.75);
        assert_eq!(infos[1].name, "roll");
        assert_eq!(infos[1].sgn_dup, DupSign::Antisymmetric);
        assert_relative_eq!(infos[2].x_hinge, -0.75);
    }

    #[test]
    fn mirrored_far_half_hinges_stay_unbound() {
        let mut m = model();
        m.wings = vec![wing_record("Main", &["autosym"])];
        m.surfaces = vec![surface("Flap", "Main", ControlKind::TrailingEdge, &[0.25, 0.75])];
        let a = m.resolve(&ResolveParams::default()).unwrap();

        assert!(a.hinges()[0].section.is_some());
        assert!(a.hinges()[1].section.is_none());
        assert_eq!(a.wings()[0].sections().len(), 3);
        assert_eq!(a.control_table().len(), 1);
    }
}
