//! Three-circle footprint collision checks against an obstacle field.

use crate::core::WorldPoint;
use crate::field::ObstacleField;
use crate::vehicle::VehicleGeometry;

/// Collision checker for the three-circle vehicle footprint.
///
/// The template is anchored at the vehicle center; rear-axle poses are
/// shifted forward by the axle-to-center distance before checking. A
/// placement is free when every circle center lies inside the field and
/// clears its radius: `min(rear, front) > end_radius` and
/// `middle > middle_radius`.
pub struct FootprintChecker<'a, F: ObstacleField> {
    field: &'a F,
    rear_offset: f64,
    front_offset: f64,
    end_radius: f64,
    middle_radius: f64,
    axle_to_center: f64,
}

impl<'a, F: ObstacleField> FootprintChecker<'a, F> {
    pub fn new(field: &'a F, geometry: &VehicleGeometry, axle_to_center: f64) -> Self {
        Self {
            field,
            rear_offset: geometry.rear_circle_offset(),
            front_offset: geometry.front_circle_offset(),
            end_radius: geometry.end_circle_radius(),
            middle_radius: geometry.middle_circle_radius(),
            axle_to_center,
        }
    }

    /// Vehicle center for a rear-axle pose.
    #[inline]
    pub fn center_for_pose(&self, position: WorldPoint, heading: f64) -> WorldPoint {
        position.point_at(heading, self.axle_to_center)
    }

    /// Circle centers (rear, middle, front) for a template at `center`.
    #[inline]
    fn circles(&self, center: WorldPoint, heading: f64) -> [WorldPoint; 3] {
        [
            center.point_at(heading, -self.rear_offset),
            center,
            center.point_at(heading, self.front_offset),
        ]
    }

    /// True when the template centered at `center` is collision free and
    /// fully inside the field.
    pub fn center_is_free(&self, center: WorldPoint, heading: f64) -> bool {
        let [rear, middle, front] = self.circles(center, heading);
        if !self.field.contains(rear)
            || !self.field.contains(middle)
            || !self.field.contains(front)
        {
            return false;
        }
        let rear_clearance = self.field.distance_to_obstacle(rear);
        let front_clearance = self.field.distance_to_obstacle(front);
        let middle_clearance = self.field.distance_to_obstacle(middle);
        rear_clearance.min(front_clearance) > self.end_radius
            && middle_clearance > self.middle_radius
    }

    /// True when a rear-axle pose is collision free.
    #[inline]
    pub fn pose_is_free(&self, position: WorldPoint, heading: f64) -> bool {
        self.center_is_free(self.center_for_pose(position, heading), heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::GridField;

    fn open_field() -> GridField {
        GridField::centered(400, 400, 0.1)
    }

    #[test]
    fn test_free_in_open_field() {
        let field = open_field();
        let checker = FootprintChecker::new(&field, &VehicleGeometry::default(), 1.3);
        assert!(checker.pose_is_free(WorldPoint::ZERO, 0.0));
        assert!(checker.pose_is_free(WorldPoint::new(5.0, -3.0), 1.2));
    }

    #[test]
    fn test_blocked_near_obstacle() {
        let mut field = open_field();
        field.fill_circle(WorldPoint::new(4.0, 0.0), 0.5);
        field.recompute();
        let checker = FootprintChecker::new(&field, &VehicleGeometry::default(), 1.3);

        // Front circle sits at x = 2.6 for a pose at the origin; the
        // obstacle edge at x = 3.5 is within the 1.7m end radius.
        assert!(!checker.pose_is_free(WorldPoint::ZERO, 0.0));
        // Far behind the obstacle the pose is free.
        assert!(checker.pose_is_free(WorldPoint::new(-4.0, 0.0), 0.0));
    }

    #[test]
    fn test_blocked_outside_map() {
        let field = GridField::new(100, 100, 0.1, WorldPoint::ZERO);
        let checker = FootprintChecker::new(&field, &VehicleGeometry::default(), 1.3);
        // Front circle pokes past the map edge.
        assert!(!checker.pose_is_free(WorldPoint::new(8.0, 5.0), 0.0));
        assert!(checker.pose_is_free(WorldPoint::new(4.0, 5.0), 0.0));
    }

    #[test]
    fn test_center_for_pose() {
        let field = open_field();
        let checker = FootprintChecker::new(&field, &VehicleGeometry::default(), 1.3);
        let center = checker.center_for_pose(WorldPoint::ZERO, 0.0);
        assert!((center.x - 1.3).abs() < 1e-12);
        assert!(center.y.abs() < 1e-12);
    }
}
