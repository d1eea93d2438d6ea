//! Per-foot contact extraction.

use quadsense_core::joints::{FootLinkMap, Leg};
use quadsense_core::oracle::ContactPoint;
use quadsense_core::types::ContactState;

// ---------------------------------------------------------------------------
// ContactSensor
// ---------------------------------------------------------------------------

/// Extracts one foot's [`ContactState`] from the oracle's raw contact
/// records.
///
/// The state is rebuilt from scratch on every [`update`](Self::update): a
/// foot with no matching record this tick reads as the inactive default, and
/// when several manifold points match the same link, the last one wins (a
/// deliberate simplification, not multi-contact averaging).
#[derive(Debug, Clone)]
pub struct ContactSensor {
    leg: Leg,
    link_id: i32,
    state: ContactState,
}

impl ContactSensor {
    /// Create a sensor for `leg` watching oracle link `link_id`.
    #[must_use]
    pub fn new(leg: Leg, link_id: i32) -> Self {
        Self {
            leg,
            link_id,
            state: ContactState::inactive(),
        }
    }

    /// Create a sensor for `leg` using the link table.
    #[must_use]
    pub fn from_map(leg: Leg, map: &FootLinkMap) -> Self {
        Self::new(leg, map.link(leg))
    }

    /// The leg this sensor belongs to.
    #[must_use]
    pub const fn leg(&self) -> Leg {
        self.leg
    }

    /// The oracle link id this sensor filters on.
    #[must_use]
    pub const fn link_id(&self) -> i32 {
        self.link_id
    }

    /// The state produced by the most recent [`update`](Self::update).
    #[must_use]
    pub const fn state(&self) -> ContactState {
        self.state
    }

    /// Rebuild the contact state from this tick's raw records.
    pub fn update(&mut self, contacts: &[ContactPoint]) {
        self.state = ContactState::inactive();
        for record in contacts {
            if record.link_id == self.link_id {
                self.state = ContactState {
                    active: true,
                    normal: record.normal,
                    distance: record.distance,
                    normal_force: record.normal_force,
                };
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn record(link_id: i32, normal_force: f64) -> ContactPoint {
        ContactPoint {
            link_id,
            normal: Vector3::z(),
            distance: -0.001,
            normal_force,
        }
    }

    #[test]
    fn starts_inactive() {
        let sensor = ContactSensor::new(Leg::FrontLeft, 11);
        assert!(!sensor.state().active);
        assert_relative_eq!(sensor.state().normal, Vector3::z());
    }

    #[test]
    fn from_map_uses_leg_link() {
        let sensor = ContactSensor::from_map(Leg::FrontRight, &FootLinkMap::A1);
        assert_eq!(sensor.link_id(), 6);
        assert_eq!(sensor.leg(), Leg::FrontRight);
    }

    #[test]
    fn matching_record_activates() {
        let mut sensor = ContactSensor::new(Leg::FrontLeft, 11);
        sensor.update(&[record(11, 20.0)]);
        let state = sensor.state();
        assert!(state.active);
        assert_relative_eq!(state.normal_force, 20.0);
        assert_relative_eq!(state.force(), Vector3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn non_matching_record_ignored() {
        let mut sensor = ContactSensor::new(Leg::FrontLeft, 11);
        sensor.update(&[record(6, 20.0), record(16, 5.0)]);
        assert!(!sensor.state().active);
    }

    #[test]
    fn last_matching_record_wins() {
        let mut sensor = ContactSensor::new(Leg::RearLeft, 21);
        let first = ContactPoint {
            link_id: 21,
            normal: Vector3::z(),
            distance: -0.002,
            normal_force: 10.0,
        };
        let second = ContactPoint {
            link_id: 21,
            normal: Vector3::new(0.0, 1.0, 0.0),
            distance: -0.001,
            normal_force: 30.0,
        };
        sensor.update(&[first, record(6, 99.0), second]);
        let state = sensor.state();
        assert!(state.active);
        assert_relative_eq!(state.normal, Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(state.normal_force, 30.0);
        assert_relative_eq!(state.distance, -0.001);
    }

    #[test]
    fn stale_state_never_carries_over() {
        let mut sensor = ContactSensor::new(Leg::RearRight, 16);
        sensor.update(&[record(16, 25.0)]);
        assert!(sensor.state().active);

        // Next tick the foot lifts off; the state must fully reset.
        sensor.update(&[]);
        assert_eq!(sensor.state(), ContactState::inactive());
    }

    #[test]
    fn force_is_normal_times_magnitude() {
        let mut sensor = ContactSensor::new(Leg::FrontLeft, 11);
        let tilted = Vector3::new(0.0, 0.6, 0.8);
        sensor.update(&[ContactPoint {
            link_id: 11,
            normal: tilted,
            distance: 0.0,
            normal_force: 10.0,
        }]);
        assert_relative_eq!(sensor.state().force(), tilted * 10.0);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn contact_sensor_is_send_sync() {
        assert_send_sync::<ContactSensor>();
    }
}
