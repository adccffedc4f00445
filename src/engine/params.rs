//! Validation thresholds for frame fitting, pair geometry and hydrogen-bond
//! detection.

use super::error::Error;

/// Numeric thresholds controlling every pair-validation decision.
///
/// Constructed once per run and passed by reference through the engine;
/// never process-global, so different threshold sets can coexist in one
/// process. Serde support is for embedding in reports, not for file-based
/// loading, which is a caller concern.
///
/// # Examples
///
/// ```
/// use basepair_forge::ValidationParameters;
///
/// let default = ValidationParameters::default();
///
/// let strict = ValidationParameters {
///     max_dv: 1.5,
///     max_plane_angle: 30.0,
///     ..Default::default()
/// };
/// assert!(strict.validate().is_ok());
/// assert!(default.max_dv > strict.max_dv);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ValidationParameters {
    /// Frame-origin distance window (Å).
    pub min_dorg: f64,
    pub max_dorg: f64,

    /// Out-of-plane separation window (Å).
    pub min_dv: f64,
    pub max_dv: f64,

    /// Inter-plane angle window (degrees, 0-90).
    pub min_plane_angle: f64,
    pub max_plane_angle: f64,

    /// Glycosidic-proxy distance window (Å).
    pub min_dnn: f64,
    pub max_dnn: f64,

    /// Maximum projected ring-overlap area (Å²). Overlapping rings mean
    /// stacked, not paired, bases.
    pub max_overlap_area: f64,

    /// Donor-acceptor heavy-atom distance window (Å).
    pub min_hbond_dist: f64,
    pub max_hbond_dist: f64,

    /// Minimum angular separation between two donors sharing one acceptor
    /// (degrees).
    pub min_bifurcation_angle: f64,

    /// Extra distance a secondary shared-acceptor contact may add over the
    /// primary one (Å).
    pub max_bifurcation_slack: f64,

    /// Frame-fit RMS acceptance threshold, inclusive (Å). Applied uniformly
    /// to all base types, standard bases included.
    pub max_fit_rms: f64,

    /// Relaxed RMS threshold for the thio-substituted variant allow-list (Å).
    pub relaxed_fit_rms: f64,

    /// Matched ring atoms required to attempt a fit.
    pub min_ring_atoms: usize,

    /// Coarse origin-distance cutoff for candidate partner enumeration (Å).
    pub candidate_cutoff: f64,

    /// Scores closer than this are a tie, resolved toward the lower residue
    /// index.
    pub tie_epsilon: f64,
}

impl Default for ValidationParameters {
    fn default() -> Self {
        Self {
            min_dorg: 0.0,
            max_dorg: 15.0,
            min_dv: 0.0,
            max_dv: 2.5,
            min_plane_angle: 0.0,
            max_plane_angle: 65.0,
            min_dnn: 4.5,
            max_dnn: 12.0,
            max_overlap_area: 0.01,
            min_hbond_dist: 2.5,
            max_hbond_dist: 3.5,
            min_bifurcation_angle: 60.0,
            max_bifurcation_slack: 0.8,
            max_fit_rms: 0.2618,
            relaxed_fit_rms: 0.35,
            min_ring_atoms: 4,
            candidate_cutoff: 15.0,
            tie_epsilon: 1e-10,
        }
    }
}

impl ValidationParameters {
    /// Fail-fast consistency check.
    ///
    /// An inverted window cannot be recovered per-residue and would silently
    /// reject everything, so it surfaces immediately as an error.
    pub fn validate(&self) -> Result<(), Error> {
        let windows: [(&'static str, f64, f64); 5] = [
            ("dorg", self.min_dorg, self.max_dorg),
            ("dv", self.min_dv, self.max_dv),
            ("plane_angle", self.min_plane_angle, self.max_plane_angle),
            ("dnn", self.min_dnn, self.max_dnn),
            ("hbond_dist", self.min_hbond_dist, self.max_hbond_dist),
        ];
        for (name, min, max) in windows {
            if min > max {
                return Err(Error::inverted_window(name, min, max));
            }
            if min < 0.0 {
                return Err(Error::non_positive(name, min));
            }
        }

        for (name, value) in [
            ("max_overlap_area", self.max_overlap_area),
            ("max_fit_rms", self.max_fit_rms),
            ("relaxed_fit_rms", self.relaxed_fit_rms),
            ("candidate_cutoff", self.candidate_cutoff),
            ("tie_epsilon", self.tie_epsilon),
            ("max_bifurcation_slack", self.max_bifurcation_slack),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::non_positive(name, value));
            }
        }

        if !(0.0..=180.0).contains(&self.min_bifurcation_angle) {
            return Err(Error::non_positive(
                "min_bifurcation_angle",
                self.min_bifurcation_angle,
            ));
        }
        if self.min_ring_atoms < 3 {
            return Err(Error::inverted_window(
                "min_ring_atoms",
                self.min_ring_atoms as f64,
                3.0,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_consistent() {
        assert!(ValidationParameters::default().validate().is_ok());
    }

    #[test]
    fn documented_defaults() {
        let p = ValidationParameters::default();
        assert_eq!(p.max_fit_rms, 0.2618);
        assert_eq!(p.max_dorg, 15.0);
        assert_eq!(p.max_dv, 2.5);
        assert_eq!(p.max_plane_angle, 65.0);
        assert_eq!(p.min_hbond_dist, 2.5);
        assert_eq!(p.max_hbond_dist, 3.5);
        assert_eq!(p.tie_epsilon, 1e-10);
    }

    #[test]
    fn inverted_window_fails_fast() {
        let p = ValidationParameters {
            min_dorg: 10.0,
            max_dorg: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(Error::InvertedWindow { parameter: "dorg", .. })
        ));
    }

    #[test]
    fn non_finite_threshold_fails_fast() {
        let p = ValidationParameters {
            max_fit_rms: f64::NAN,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn too_few_ring_atoms_fails_fast() {
        let p = ValidationParameters {
            min_ring_atoms: 2,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn roundtrips_through_serde_defaults() {
        let p: ValidationParameters = serde_json::from_str("{}").unwrap();
        assert_eq!(p, ValidationParameters::default());
        let overridden: ValidationParameters =
            serde_json::from_str(r#"{"max_dv": 1.0}"#).unwrap();
        assert_eq!(overridden.max_dv, 1.0);
        assert_eq!(overridden.max_dorg, 15.0);
    }
}
