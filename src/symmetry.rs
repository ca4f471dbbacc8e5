//! Which logical copy each stroke of a group is, and where a sample lands on it.

use egui::Pos2;

use crate::geometry::{mirror, rotate_deg};

/// The logical identity of one stroke inside a stroke group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeRole {
    /// The stroke that follows the pointer.
    Primary,
    /// The primary reflected across the horizontal axis.
    PrimaryMirror,
    /// The primary rotated by `i * 360 / rotations` degrees.
    Rotated(u32),
    /// The reflection of `Rotated(i)`.
    RotatedMirror(u32),
}

/// Ordered list of roles for one gesture.
///
/// Built once when the gesture starts; index `j` names the same logical stroke
/// for every sample of that gesture, whatever happens to the settings
/// meanwhile.
#[derive(Clone, Debug, PartialEq)]
pub struct SymmetryPlan {
    rotations: u32,
    roles: Vec<StrokeRole>,
}

impl SymmetryPlan {
    pub fn new(rotations: u32, mirror: bool) -> Self {
        let mut roles = Vec::with_capacity(group_size(rotations, mirror));
        roles.push(StrokeRole::Primary);
        if mirror {
            roles.push(StrokeRole::PrimaryMirror);
        }
        for i in 1..=rotations {
            roles.push(StrokeRole::Rotated(i));
            if mirror {
                roles.push(StrokeRole::RotatedMirror(i));
            }
        }
        Self { rotations, roles }
    }

    pub fn roles(&self) -> &[StrokeRole] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Angle in degrees of rotated copy `i`.
    pub fn angle(&self, i: u32) -> f64 {
        if self.rotations == 0 {
            return 0.0;
        }
        360.0 / f64::from(self.rotations) * f64::from(i)
    }

    /// Where the recorded `point` lands on the stroke playing `role`.
    ///
    /// Always computed from the recorded point itself, never from the
    /// previous sample of the copy.
    pub fn place(&self, role: StrokeRole, point: Pos2) -> Pos2 {
        match role {
            StrokeRole::Primary => point,
            StrokeRole::PrimaryMirror => mirror(point),
            StrokeRole::Rotated(i) => rotate_deg(point, self.angle(i)),
            StrokeRole::RotatedMirror(i) => mirror(rotate_deg(point, self.angle(i))),
        }
    }

    /// All placements of `point`, in role order.
    pub fn place_all(&self, point: Pos2) -> impl Iterator<Item = Pos2> + '_ {
        self.roles.iter().map(move |role| self.place(*role, point))
    }
}

/// Number of strokes in a group: `(1 + mirror) * (1 + rotations)`.
pub fn group_size(rotations: u32, mirror: bool) -> usize {
    (1 + usize::from(mirror)) * (1 + rotations as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_order_with_mirror() {
        let plan = SymmetryPlan::new(2, true);
        assert_eq!(
            plan.roles(),
            &[
                StrokeRole::Primary,
                StrokeRole::PrimaryMirror,
                StrokeRole::Rotated(1),
                StrokeRole::RotatedMirror(1),
                StrokeRole::Rotated(2),
                StrokeRole::RotatedMirror(2),
            ]
        );
    }

    #[test]
    fn role_order_without_mirror() {
        let plan = SymmetryPlan::new(3, false);
        assert_eq!(
            plan.roles(),
            &[
                StrokeRole::Primary,
                StrokeRole::Rotated(1),
                StrokeRole::Rotated(2),
                StrokeRole::Rotated(3),
            ]
        );
    }

    #[test]
    fn plan_length_matches_group_size() {
        for rotations in 0..=32 {
            for mirror in [false, true] {
                let plan = SymmetryPlan::new(rotations, mirror);
                assert_eq!(plan.len(), group_size(rotations, mirror));
            }
        }
    }

    #[test]
    fn no_rotations_means_no_angle() {
        let plan = SymmetryPlan::new(0, true);
        assert_eq!(plan.roles(), &[StrokeRole::Primary, StrokeRole::PrimaryMirror]);
        assert_eq!(plan.angle(1), 0.0);
    }

    #[test]
    fn rotated_mirror_is_mirror_of_rotated() {
        let plan = SymmetryPlan::new(6, true);
        let p = Pos2::new(4.0, 9.0);
        let rotated = plan.place(StrokeRole::Rotated(2), p);
        let reflected = plan.place(StrokeRole::RotatedMirror(2), p);
        assert_eq!(reflected, mirror(rotated));
    }
}
