//! Geometric validation of candidate base pairs.
//!
//! Pure functions of two residues' frames/atoms and the threshold set:
//! identical inputs always produce identical descriptors.

use crate::model::frame::ReferenceFrame;
use crate::model::residue::Residue;

use super::geom::{self, Vec3};
use super::params::ValidationParameters;

/// Weight of the out-of-plane separation in the quality contribution.
const DV_WEIGHT: f64 = 2.0;
/// Degrees of plane angle costing as much as one Ångström of separation.
const ANGLE_PER_ANGSTROM: f64 = 20.0;

/// Scalar descriptors of one candidate pair plus the window verdict.
#[derive(Debug, Clone, Copy)]
pub struct PairGeometry {
    /// Distance between the two frame origins (Å).
    pub dorg: f64,
    /// Out-of-plane separation: origin-to-origin vector projected onto the
    /// mean base normal (Å).
    pub dv: f64,
    /// Angle between the base normals, folded to 0-90 degrees.
    pub plane_angle: f64,
    /// Distance between the glycosidic proxy atoms, when both exist (Å).
    pub dnn: Option<f64>,
    /// Ring-overlap area projected onto the mean base plane (Å²).
    pub overlap_area: f64,
    /// Axis sign pattern of an antiparallel pair: x·x > 0, y·y < 0, z·z < 0.
    /// Gates Watson-Crick/wobble classification, not validity.
    pub axis_pattern_ok: bool,
    /// True when every descriptor window passed.
    pub is_valid: bool,
}

impl PairGeometry {
    /// Geometric share of the pair quality score, a distance-like cost
    /// dominated by the origin separation and plane angle. The scorer adds
    /// hydrogen-bond terms on top.
    pub fn quality_contribution(&self) -> f64 {
        self.dorg + DV_WEIGHT * self.dv + self.plane_angle / ANGLE_PER_ANGSTROM
    }
}

/// Computes the pair descriptors and checks them against the configured
/// windows. All window bounds are inclusive.
pub fn validate_pair(
    res_i: &Residue,
    frame_i: &ReferenceFrame,
    res_j: &Residue,
    frame_j: &ReferenceFrame,
    params: &ValidationParameters,
) -> PairGeometry {
    let separation = geom::sub(frame_j.origin, frame_i.origin);
    let dorg = geom::norm(separation);

    let z_i = frame_i.z_axis();
    let mut z_j = frame_j.z_axis();
    // antiparallel faces: flip one normal before averaging so the mean
    // normal and dv stay well-defined
    if geom::dot(z_i, z_j) < 0.0 {
        z_j = geom::scale(z_j, -1.0);
    }
    let mean_normal = geom::normalize(geom::add(z_i, z_j)).unwrap_or(z_i);
    let dv = geom::dot(separation, mean_normal).abs();

    let raw_angle = geom::angle_deg(frame_i.z_axis(), frame_j.z_axis());
    let plane_angle = if raw_angle > 90.0 {
        180.0 - raw_angle
    } else {
        raw_angle
    };

    let dnn = glycosidic_distance(res_i, res_j);
    let overlap_area = ring_overlap_area(res_i, res_j, frame_i, frame_j, mean_normal);

    let axis_pattern_ok = geom::dot(frame_i.x_axis(), frame_j.x_axis()) > 0.0
        && geom::dot(frame_i.y_axis(), frame_j.y_axis()) < 0.0
        && geom::dot(frame_i.z_axis(), frame_j.z_axis()) < 0.0;

    let in_window = |value: f64, min: f64, max: f64| value >= min && value <= max;
    let is_valid = in_window(dorg, params.min_dorg, params.max_dorg)
        && in_window(dv, params.min_dv, params.max_dv)
        && in_window(plane_angle, params.min_plane_angle, params.max_plane_angle)
        && dnn.is_some_and(|d| in_window(d, params.min_dnn, params.max_dnn))
        && overlap_area <= params.max_overlap_area;

    PairGeometry {
        dorg,
        dv,
        plane_angle,
        dnn,
        overlap_area,
        axis_pattern_ok,
        is_valid,
    }
}

fn glycosidic_distance(res_i: &Residue, res_j: &Residue) -> Option<f64> {
    let atom_i = res_i.atom(res_i.base_code()?.glycosidic_atom())?;
    let atom_j = res_j.atom(res_j.base_code()?.glycosidic_atom())?;
    Some(geom::distance(atom_i.position, atom_j.position))
}

/// Projects both residues' ring atoms onto the mean base plane and measures
/// the intersection area of their convex outlines. Paired bases sit
/// edge-to-edge (zero overlap); stacked bases project on top of each other.
fn ring_overlap_area(
    res_i: &Residue,
    res_j: &Residue,
    frame_i: &ReferenceFrame,
    frame_j: &ReferenceFrame,
    normal: Vec3,
) -> f64 {
    let mid = geom::scale(geom::add(frame_i.origin, frame_j.origin), 0.5);

    // deterministic in-plane basis
    let seed = if normal[0].abs() < 0.9 {
        [1.0, 0.0, 0.0]
    } else {
        [0.0, 1.0, 0.0]
    };
    let Some(u) = geom::normalize(geom::cross(normal, seed)) else {
        return 0.0;
    };
    let v = geom::cross(normal, u);

    let project = |res: &Residue| -> Vec<[f64; 2]> {
        ring_positions(res)
            .map(|p| {
                let d = geom::sub(p, mid);
                [geom::dot(d, u), geom::dot(d, v)]
            })
            .collect()
    };

    let hull_i = convex_hull(&project(res_i));
    let hull_j = convex_hull(&project(res_j));
    if hull_i.len() < 3 || hull_j.len() < 3 {
        return 0.0;
    }

    polygon_area(&clip_polygon(&hull_i, &hull_j))
}

fn ring_positions(res: &Residue) -> impl Iterator<Item = Vec3> + '_ {
    let names: &[&str] = match res.base_class() {
        crate::model::types::BaseClass::Purine => super::templates::PURINE_RING_ATOMS,
        _ => super::templates::PYRIMIDINE_RING_ATOMS,
    };
    names.iter().filter_map(|n| res.atom(n).map(|a| a.position))
}

/// Andrew monotone chain; returns the hull counter-clockwise.
fn convex_hull(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let turns_right = |o: [f64; 2], a: [f64; 2], b: [f64; 2]| {
        (a[0] - o[0]) * (b[1] - o[1]) - (a[1] - o[1]) * (b[0] - o[0]) <= 0.0
    };

    let mut lower: Vec<[f64; 2]> = Vec::new();
    for &p in &pts {
        while lower.len() >= 2 && turns_right(lower[lower.len() - 2], lower[lower.len() - 1], p) {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<[f64; 2]> = Vec::new();
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && turns_right(upper[upper.len() - 2], upper[upper.len() - 1], p) {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Sutherland-Hodgman clipping of `subject` by the convex, counter-clockwise
/// polygon `clip`.
fn clip_polygon(subject: &[[f64; 2]], clip: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut output = subject.to_vec();
    for k in 0..clip.len() {
        if output.is_empty() {
            break;
        }
        let a = clip[k];
        let b = clip[(k + 1) % clip.len()];
        let inside =
            |p: [f64; 2]| (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]) >= 0.0;
        let intersect = |p: [f64; 2], q: [f64; 2]| -> [f64; 2] {
            let dpx = q[0] - p[0];
            let dpy = q[1] - p[1];
            let dcx = b[0] - a[0];
            let dcy = b[1] - a[1];
            let denom = dcx * dpy - dcy * dpx;
            if denom.abs() < 1e-12 {
                return q;
            }
            let t = (dcx * (p[1] - a[1]) - dcy * (p[0] - a[0])) / denom;
            [p[0] + t * dpx, p[1] + t * dpy]
        };

        let input = std::mem::take(&mut output);
        for i in 0..input.len() {
            let current = input[i];
            let previous = input[(i + input.len() - 1) % input.len()];
            match (inside(previous), inside(current)) {
                (true, true) => output.push(current),
                (true, false) => output.push(intersect(previous, current)),
                (false, true) => {
                    output.push(intersect(previous, current));
                    output.push(current);
                }
                (false, false) => {}
            }
        }
    }
    output
}

/// Shoelace area of a simple polygon.
fn polygon_area(polygon: &[[f64; 2]]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        twice_area += a[0] * b[1] - a[1] * b[0];
    }
    twice_area.abs() * 0.5
}
