//! End-to-end scenario tests across the full stack: oracle → harness →
//! sensor frames → actuation.

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use quadsense_actuator::dispatcher::ControlMode;
    use quadsense_core::config::{HarnessConfig, ImuNoiseConfig, JointNoiseConfig};
    use quadsense_core::error::HarnessError;
    use quadsense_core::joints::Leg;
    use quadsense_core::oracle::{ContactPoint, JointReading};
    use quadsense_core::types::{BaseVelocity, InitialState, SensorFrame, GRAVITY_MPS2};
    use quadsense_test_utils::ScriptedOracle;

    use crate::builder::HarnessBuilder;
    use crate::harness::SimulationHarness;

    fn noiseless_config() -> HarnessConfig {
        HarnessConfig {
            imu: ImuNoiseConfig {
                gyro_std: 0.0,
                accel_std: 0.0,
                gyro_bias_std: 0.0,
                accel_bias_std: 0.0,
            },
            joints: JointNoiseConfig {
                position_std: 0.0,
                velocity_std: 0.0,
                torque_std: 0.0,
                enabled: true,
            },
            ..HarnessConfig::default()
        }
    }

    fn noiseless_harness(oracle: ScriptedOracle) -> SimulationHarness<ScriptedOracle> {
        let mut harness = HarnessBuilder::new(oracle)
            .with_config(noiseless_config())
            .build()
            .unwrap();
        harness.init(&InitialState::standing()).unwrap();
        harness
    }

    // -------------------------------------------------------------------
    // Full pipeline
    // -------------------------------------------------------------------

    #[test]
    fn full_pipeline_delivers_ticked_frames() {
        let mut harness = HarnessBuilder::new(ScriptedOracle::new())
            .with_seed(42)
            .build()
            .unwrap();
        harness.init(&InitialState::standing()).unwrap();

        for expected_tick in 1_u64..=10 {
            harness.step().unwrap();
            let frame = harness.read_sensors().unwrap();
            assert_eq!(frame.tick, expected_tick);
        }
        assert_eq!(harness.ticks(), 10);
        harness.disconnect().unwrap();
    }

    // -------------------------------------------------------------------
    // Gravity compensation sign convention
    // -------------------------------------------------------------------

    #[test]
    fn static_robot_reads_specific_force_after_200_steps() {
        // Supported and motionless for 200 ticks: the accelerometer must
        // read the upward reaction, [0, 0, +9.81].
        let mut harness = noiseless_harness(ScriptedOracle::new());
        for _ in 0..200 {
            harness.step().unwrap();
        }
        let frame = harness.read_sensors().unwrap();
        assert_relative_eq!(
            frame.accel,
            Vector3::new(0.0, 0.0, GRAVITY_MPS2),
            epsilon = 1e-9
        );
        assert_relative_eq!(frame.gyro, Vector3::zeros(), epsilon = 1e-12);
    }

    #[test]
    fn free_fall_cancels_gravity_compensation() {
        // An inverted compensation sign would read ±2g here instead of 0.
        let dt = HarnessConfig::default().timestep_secs;
        let oracle = ScriptedOracle::new().with_velocity_script(move |tick, _dt| {
            #[allow(clippy::cast_precision_loss)]
            let vz = -GRAVITY_MPS2 * dt * tick as f64;
            BaseVelocity::new(Vector3::new(0.0, 0.0, vz), Vector3::zeros())
        });
        let mut harness = noiseless_harness(oracle);

        for _ in 0..50 {
            harness.step().unwrap();
            let frame = harness.read_sensors().unwrap();
            assert_relative_eq!(frame.accel, Vector3::zeros(), epsilon = 1e-9);
        }
    }

    // -------------------------------------------------------------------
    // Mode switching
    // -------------------------------------------------------------------

    #[test]
    fn torque_mode_reports_commanded_torque_until_position_overrides() {
        // The oracle's organic torque sensor reads 5.0 on every joint.
        let mut oracle = ScriptedOracle::new();
        for index in [7, 9, 10, 2, 4, 5, 17, 19, 20, 12, 14, 15] {
            oracle.set_joint_reading(
                index,
                JointReading {
                    position: 0.0,
                    velocity: 0.0,
                    torque: 5.0,
                },
            );
        }
        let mut harness = noiseless_harness(oracle);

        // Under explicit torque control the command is authoritative.
        harness.apply_torque(&[2.0; 12]).unwrap();
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();
        assert_eq!(harness.control_mode(), ControlMode::Torque);
        assert!(frame
            .joint_torques
            .as_slice()
            .iter()
            .all(|&tau| (tau - 2.0).abs() < 1e-12));

        // Switching to position control must fully discard the stale
        // command: torques come from the oracle again.
        harness.apply_position(&[0.5; 12]).unwrap();
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();
        assert_eq!(harness.control_mode(), ControlMode::Position);
        assert!(frame
            .joint_torques
            .as_slice()
            .iter()
            .all(|&tau| (tau - 5.0).abs() < 1e-12));
    }

    #[test]
    fn rejected_command_reaches_no_motor() {
        let mut harness = noiseless_harness(ScriptedOracle::new());
        assert!(matches!(
            harness.apply_torque(&[1.0; 11]).unwrap_err(),
            HarnessError::Argument(_)
        ));
        assert!(harness.oracle().commands.is_empty());
        assert_eq!(harness.control_mode(), ControlMode::Position);
    }

    // -------------------------------------------------------------------
    // Contacts
    // -------------------------------------------------------------------

    #[test]
    fn contact_records_flow_into_frames_per_leg() {
        let mut harness = noiseless_harness(ScriptedOracle::new());
        harness.oracle_mut().set_contacts(vec![ContactPoint {
            link_id: 11, // front-left foot
            normal: Vector3::z(),
            distance: -0.001,
            normal_force: 22.0,
        }]);
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();

        assert!(frame.contacts[Leg::FrontLeft.index()].active);
        assert_relative_eq!(
            frame.contacts[Leg::FrontLeft.index()].normal_force,
            22.0
        );
        for leg in [Leg::FrontRight, Leg::RearLeft, Leg::RearRight] {
            assert!(!frame.contacts[leg.index()].active);
        }

        // Foot lifts off: the next tick fully clears the state.
        harness.oracle_mut().set_contacts(Vec::new());
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();
        assert!(!frame.contacts[Leg::FrontLeft.index()].active);
    }

    // -------------------------------------------------------------------
    // Determinism
    // -------------------------------------------------------------------

    fn frames_with_seed(seed: u64) -> Vec<SensorFrame> {
        let mut harness = HarnessBuilder::new(ScriptedOracle::new())
            .with_seed(seed)
            .build()
            .unwrap();
        harness.init(&InitialState::standing()).unwrap();
        (0..20)
            .map(|_| {
                harness.step().unwrap();
                harness.read_sensors().unwrap()
            })
            .collect()
    }

    #[test]
    fn identical_seeds_give_identical_sensor_streams() {
        assert_eq!(frames_with_seed(7), frames_with_seed(7));
    }

    #[test]
    fn different_seeds_give_different_sensor_streams() {
        assert_ne!(frames_with_seed(7), frames_with_seed(8));
    }

    // -------------------------------------------------------------------
    // Re-initialization
    // -------------------------------------------------------------------

    #[test]
    fn reinit_clears_finite_difference_baseline() {
        let dt = HarnessConfig::default().timestep_secs;
        let mut harness = noiseless_harness(
            ScriptedOracle::new()
                .with_velocity(BaseVelocity::new(Vector3::new(1.0, 0.0, 0.0), Vector3::zeros())),
        );

        // First read after init sees the full velocity as one step of
        // acceleration.
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();
        assert_relative_eq!(frame.accel.x, 1.0 / dt, epsilon = 1e-9);

        // Second read: velocity unchanged, so the x term vanishes.
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();
        assert_relative_eq!(frame.accel.x, 0.0, epsilon = 1e-9);

        // Re-init zeroes the stored previous velocity again.
        harness.init(&InitialState::standing()).unwrap();
        harness.step().unwrap();
        let frame = harness.read_sensors().unwrap();
        assert_relative_eq!(frame.accel.x, 1.0 / dt, epsilon = 1e-9);
    }

    #[test]
    fn reinit_resets_control_mode() {
        let mut harness = noiseless_harness(ScriptedOracle::new());
        harness.apply_torque(&[1.0; 12]).unwrap();
        assert_eq!(harness.control_mode(), ControlMode::Torque);
        harness.init(&InitialState::standing()).unwrap();
        assert_eq!(harness.control_mode(), ControlMode::Position);
    }

    // -------------------------------------------------------------------
    // Oracle failure propagation
    // -------------------------------------------------------------------

    #[test]
    fn contact_query_failure_fails_the_step() {
        let mut harness = noiseless_harness(ScriptedOracle::new());
        harness.oracle_mut().fail_next_query();
        let err = harness.step().unwrap_err();
        assert!(matches!(err, HarnessError::Oracle(_)));
        // The failed tick never counted.
        assert_eq!(harness.ticks(), 0);

        // The failure is not retried; the next explicit step succeeds.
        harness.step().unwrap();
        assert_eq!(harness.ticks(), 1);
    }

    #[test]
    fn double_disconnect_scenario() {
        let mut harness = noiseless_harness(ScriptedOracle::new());
        harness.step().unwrap();
        harness.disconnect().unwrap();
        let err = harness.disconnect().unwrap_err();
        assert!(
            matches!(err, HarnessError::State(_)),
            "second disconnect must be a state error, got {err}"
        );
    }
}
