//! Per-residue reference-frame calculation.
//!
//! Matches a residue's experimental ring atoms against its idealized
//! template by name, superposes the template onto the experiment, and
//! accepts the frame only when the fit residual clears the threshold. All
//! failure modes are data ("this residue has no frame"), not errors.

use crate::model::frame::ReferenceFrame;
use crate::model::residue::{Residue, THIO_VARIANTS};

use super::fit;
use super::params::ValidationParameters;
use super::templates;

/// Outcome of fitting one residue.
#[derive(Debug, Clone)]
pub struct FrameResult {
    /// The fitted frame; `None` when the residue has no valid frame.
    pub frame: Option<ReferenceFrame>,
    /// RMS fit residual. Present whenever a fit was attempted, including
    /// fits rejected for exceeding the threshold.
    pub rms: Option<f64>,
    /// Ring atom names that matched between experiment and template.
    pub matched_atoms: Vec<String>,
}

impl FrameResult {
    pub fn is_valid(&self) -> bool {
        self.frame.is_some()
    }

    pub fn num_matched(&self) -> usize {
        self.matched_atoms.len()
    }

    fn skipped() -> Self {
        Self {
            frame: None,
            rms: None,
            matched_atoms: Vec::new(),
        }
    }
}

/// Computes the reference frame of one residue.
///
/// The frame origin is the template origin carried into experimental space;
/// the rotation columns are the fitted template basis vectors. The RMS
/// acceptance check is inclusive: a fit exactly at the threshold passes.
pub fn calculate_frame(residue: &Residue, params: &ValidationParameters) -> FrameResult {
    let Some(code) = residue.base_code() else {
        return FrameResult::skipped();
    };
    let template = templates::template_for(code);

    let mut template_pts = Vec::new();
    let mut experimental_pts = Vec::new();
    let mut matched = Vec::new();
    for &(name, tpl_pos) in template.ring_atoms() {
        if let Some(atom) = residue.atom(name) {
            template_pts.push(tpl_pos);
            experimental_pts.push(atom.position);
            matched.push(name.to_string());
        }
    }

    if matched.len() < params.min_ring_atoms {
        return FrameResult {
            frame: None,
            rms: None,
            matched_atoms: matched,
        };
    }

    let Some(fitted) = fit::superpose(&template_pts, &experimental_pts) else {
        // collinear or otherwise degenerate ring coordinates
        return FrameResult {
            frame: None,
            rms: None,
            matched_atoms: matched,
        };
    };

    let threshold = if THIO_VARIANTS.contains(&residue.name.as_str()) {
        params.relaxed_fit_rms
    } else {
        params.max_fit_rms
    };

    let frame = if fitted.rms <= threshold {
        Some(ReferenceFrame::new(
            fitted.rotation.data,
            fitted.transform([0.0, 0.0, 0.0]),
        ))
    } else {
        None
    };

    FrameResult {
        frame,
        rms: Some(fitted.rms),
        matched_atoms: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::residue::ResidueId;
    use crate::model::types::{BaseCode, Element};

    fn residue_from_template(name: &str, code: BaseCode, index: usize) -> Residue {
        residue_from_coords(
            name,
            templates::template_for(code)
                .atoms
                .iter()
                .map(|(n, p)| (*n, *p))
                .collect::<Vec<_>>()
                .as_slice(),
            index,
        )
    }

    fn residue_from_coords(name: &str, coords: &[(&str, [f64; 3])], index: usize) -> Residue {
        let atoms = coords
            .iter()
            .enumerate()
            .map(|(i, (n, p))| {
                let element = match n.chars().next().unwrap() {
                    'N' => Element::N,
                    'O' => Element::O,
                    _ => Element::C,
                };
                Atom::new(*n, element, *p, i)
            })
            .collect();
        Residue::new(name, ResidueId::new('A', index as i32 + 1, None), atoms, index)
    }

    #[test]
    fn template_coordinates_fit_themselves() {
        let params = ValidationParameters::default();
        let res = residue_from_template("G", BaseCode::G, 0);
        let result = calculate_frame(&res, &params);
        assert!(result.is_valid());
        assert_eq!(result.num_matched(), 9);
        let rms = result.rms.unwrap();
        assert!(rms < 1e-9, "rms = {}", rms);

        let frame = result.frame.unwrap();
        assert!(frame.is_orthonormal(1e-9));
        // untransformed template: identity rotation, origin at zero
        for k in 0..3 {
            assert!(frame.origin[k].abs() < 1e-9);
            assert!((frame.rotation[k][k] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn translated_rotated_residue_fits_round_trip() {
        let params = ValidationParameters::default();
        let (s, c) = 0.9f64.sin_cos();
        let tpl = templates::template_for(BaseCode::C);
        let coords: Vec<_> = tpl
            .atoms
            .iter()
            .map(|(n, p)| {
                // rotate about z, tilt nothing, then translate
                (*n, [c * p[0] - s * p[1] + 4.0, s * p[0] + c * p[1] - 2.0, 7.5])
            })
            .collect();
        let res = residue_from_coords("C", &coords, 0);
        let result = calculate_frame(&res, &params);
        assert!(result.is_valid());
        let frame = result.frame.unwrap();
        assert!(frame.is_orthonormal(1e-9));

        // fit round-trip: the transform reproduces each experimental ring
        // atom from its template coordinates within the reported rms
        let rms = result.rms.unwrap();
        for &(name, tpl_pos) in tpl.ring_atoms() {
            let expected = res.atom(name).unwrap().position;
            let mut mapped = frame.origin;
            for r in 0..3 {
                mapped[r] = frame.origin[r]
                    + frame.rotation[r][0] * tpl_pos[0]
                    + frame.rotation[r][1] * tpl_pos[1]
                    + frame.rotation[r][2] * tpl_pos[2];
            }
            for k in 0..3 {
                assert!((mapped[k] - expected[k]).abs() <= rms + 1e-6);
            }
        }
    }

    #[test]
    fn too_few_ring_atoms_is_invalid_not_fatal() {
        let params = ValidationParameters::default();
        let res = residue_from_coords(
            "G",
            &[
                ("N9", [-1.290, 4.446, 0.0]),
                ("C8", [-0.099, 5.143, 0.0]),
                ("N7", [0.932, 4.225, 0.0]),
            ],
            0,
        );
        let result = calculate_frame(&res, &params);
        assert!(!result.is_valid());
        assert_eq!(result.num_matched(), 3);
        assert!(result.rms.is_none());
    }

    #[test]
    fn unclassifiable_residue_is_skipped() {
        let params = ValidationParameters::default();
        let res = residue_from_coords("HOH", &[("O", [0.0, 0.0, 0.0])], 0);
        let result = calculate_frame(&res, &params);
        assert!(!result.is_valid());
        assert_eq!(result.num_matched(), 0);
    }

    #[test]
    fn rms_threshold_is_inclusive_on_the_accept_side() {
        // perturb one ring atom, measure the true fitted rms, then pin the
        // threshold exactly there: the boundary fit must be accepted, and a
        // threshold one ulp-scale step below must reject it
        let mut coords: Vec<_> = templates::template_for(BaseCode::U)
            .atoms
            .iter()
            .map(|(n, p)| (*n, *p))
            .collect();
        coords[2].1[0] += 0.35; // N3 in-plane shift
        let res = residue_from_coords("U", &coords, 0);

        let probe = calculate_frame(&res, &ValidationParameters::default());
        let rms = probe.rms.expect("fit attempted");
        assert!(rms > 0.01);

        let at_boundary = ValidationParameters {
            max_fit_rms: rms,
            ..Default::default()
        };
        assert!(calculate_frame(&res, &at_boundary).is_valid());

        let below_boundary = ValidationParameters {
            max_fit_rms: rms - 1e-9,
            ..Default::default()
        };
        assert!(!calculate_frame(&res, &below_boundary).is_valid());
    }

    #[test]
    fn thio_variant_uses_relaxed_threshold() {
        // a distortion past the uniform cutoff but inside the relaxed one
        let mut coords: Vec<_> = templates::template_for(BaseCode::U)
            .atoms
            .iter()
            .map(|(n, p)| (*n, *p))
            .collect();
        for c in coords.iter_mut() {
            if c.0 == "C2" {
                c.1[0] -= 0.8;
            }
        }
        let params = ValidationParameters::default();

        let strict = residue_from_coords("U", &coords, 0);
        let strict_result = calculate_frame(&strict, &params);
        let rms = strict_result.rms.expect("fit attempted");
        assert!(
            rms > params.max_fit_rms && rms <= params.relaxed_fit_rms,
            "distortion rms {} must sit between the thresholds",
            rms
        );
        assert!(!strict_result.is_valid());

        let relaxed = residue_from_coords("4SU", &coords, 0);
        assert!(calculate_frame(&relaxed, &params).is_valid());
    }

    #[test]
    fn degenerate_collinear_ring_is_invalid() {
        let coords: Vec<(&str, [f64; 3])> = PYR_RING
            .iter()
            .enumerate()
            .map(|(i, n)| (*n, [i as f64, 0.0, 0.0]))
            .collect();
        let res = residue_from_coords("U", &coords, 0);
        let result = calculate_frame(&res, &ValidationParameters::default());
        assert!(!result.is_valid());
        assert!(result.rms.is_none());
    }

    const PYR_RING: &[&str] = &["N1", "C2", "N3", "C4", "C5", "C6"];
}
