use std::f64::consts::FRAC_PI_2;

use stair_kernel::{Plane, Point3d, Tolerance, Vec3};
use tracing::debug;

use super::FlightEnd;
use crate::error::StairError;

/// Which way the stair turns between the two flights, seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Right,
}

impl Turn {
    fn between(top: &FlightEnd, foot: &FlightEnd, tolerance: &Tolerance) -> Result<Self, StairError> {
        let cross = top.direction.cross(&foot.direction).z;
        if cross.abs() > tolerance.angular {
            return Ok(if cross > 0.0 { Turn::Left } else { Turn::Right });
        }
        // Antiparallel: the upper flight sits beside the lower one.
        let offset = (foot.point - top.point).dot(&top.left);
        if offset.abs() > tolerance.coincidence {
            Ok(if offset > 0.0 { Turn::Left } else { Turn::Right })
        } else {
            Err(StairError::DegenerateLanding {
                reason: "upper flight starts on the lower flight's axis",
            })
        }
    }
}

/// Corners between a top corner of the lower flight and the matching foot
/// corner of the upper flight, ordered from the top corner outward.
type Mids = Vec<Point3d>;

/// Landing outline from projecting the lower flight's top corners onto the
/// side planes of the upper flight.
///
/// Up to a right angle the corners are pushed along the lower flight's
/// direction. Beyond it they are dropped orthogonally, and the side whose
/// corner travels farther is squared off one flight width behind the foot
/// of the upper flight instead.
pub(crate) fn landing_outline(
    top: &FlightEnd,
    foot: &FlightEnd,
    angle: f64,
    tolerance: &Tolerance,
) -> Result<Vec<Point3d>, StairError> {
    let turn = Turn::between(top, foot, tolerance)?;
    let top_left = top.left_corner();
    let top_right = top.right_corner();
    let foot_left = foot.left_corner();
    let foot_right = foot.right_corner();

    let obtuse = angle > FRAC_PI_2 + tolerance.angular;
    let (mids_left, mids_right): (Mids, Mids) = if !obtuse {
        (
            vec![along(&top_left, &top.direction, &foot.left_side)?],
            vec![along(&top_right, &top.direction, &foot.right_side)?],
        )
    } else {
        let left = foot.left_side.project_point(&top_left);
        let right = foot.right_side.project_point(&top_right);
        let left_gap = top_left.distance_to(&left);
        let right_gap = top_right.distance_to(&right);

        let extend_left = if (left_gap - right_gap).abs() < tolerance.coincidence {
            turn == Turn::Right
        } else {
            left_gap > right_gap
        };
        let behind = foot.direction * -foot.width;
        if extend_left {
            let extended = foot_left + behind;
            (vec![top.left_side.project_point(&extended), extended], vec![right])
        } else {
            let extended = foot_right + behind;
            (vec![left], vec![top.right_side.project_point(&extended), extended])
        }
    };
    debug!(?turn, obtuse, "landing corners projected");

    let base = foot.direction * foot.base_thickness;
    let mut outline = Vec::with_capacity(mids_left.len() + mids_right.len() + 6);
    match turn {
        Turn::Left => {
            outline.push(top_right);
            outline.extend(mids_right);
            outline.extend([foot_right, foot_right + base, foot_left + base, foot_left]);
            outline.extend(mids_left.into_iter().rev());
            outline.push(top_left);
        }
        Turn::Right => {
            outline.push(top_left);
            outline.extend(mids_left);
            outline.extend([foot_left, foot_left + base, foot_right + base, foot_right]);
            outline.extend(mids_right.into_iter().rev());
            outline.push(top_right);
        }
    }
    Ok(outline)
}

fn along(corner: &Point3d, direction: &Vec3, side: &Plane) -> Result<Point3d, StairError> {
    side.intersect_ray(corner, direction)
        .ok_or(StairError::DegenerateLanding {
            reason: "flight edge runs parallel to the adjoining flight",
        })
}
