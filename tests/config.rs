use fixtures::test_sim;

use msd_pid::config::{SimulationConfig, SimulationConfigBuilder};
use msd_pid::ConfigError;

mod test_simulation_config {

    use super::test_sim::make_reference_config;
    use super::*;

    #[test]
    fn test_reference_defaults() {
        let config = make_reference_config();

        assert_eq!(config.mass(), 1.0);
        assert_eq!(config.spring(), 20.0);
        assert_eq!(config.damping(), 2.0);
        assert_eq!(config.gains(), (80.0, 10.0, 15.0));
        assert_eq!(config.dt(), 0.001);
        assert_eq!(config.t_end(), 5.0);
        assert_eq!(config.x_target(), 1.0);
        assert_eq!(config.steps(), 5000);
        assert!(!config.pid().is_integral_limited());
    }

    #[test]
    fn test_default_builder_builds_reference_config() {
        let built = SimulationConfigBuilder::default().build();
        assert_eq!(built, Ok(make_reference_config()));
    }

    #[test]
    fn test_builder_round_trip() {
        let config = SimulationConfigBuilder::default()
            .mass(2.0)
            .spring(5.0)
            .damping(0.5)
            .kp(1.0)
            .ki(0.5)
            .kd(0.1)
            .integral_limit(3.0)
            .dt(0.01)
            .t_end(2.0)
            .x_target(-0.5)
            .build()
            .unwrap();

        assert_eq!(config.steps(), 200);
        assert_eq!(config.pid().integral_limit(), 3.0);
        assert_eq!(config.to_builder().build(), Ok(config));
    }

    #[test]
    fn test_invalid_mass() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                SimulationConfigBuilder::default().mass(mass).build(),
                Err(ConfigError::InvalidMass)
            );
        }
    }

    #[test]
    fn test_invalid_step_size() {
        for dt in [0.0, -0.001, f64::NAN, f64::INFINITY] {
            assert_eq!(
                SimulationConfigBuilder::default().dt(dt).build(),
                Err(ConfigError::InvalidStepSize)
            );
        }
    }

    #[test]
    fn test_invalid_duration() {
        for t_end in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                SimulationConfigBuilder::default().t_end(t_end).build(),
                Err(ConfigError::InvalidDuration)
            );
        }
    }

    #[test]
    fn test_invalid_step_count() {
        assert_eq!(
            SimulationConfigBuilder::default()
                .t_end(1e300)
                .dt(1e-300)
                .build(),
            Err(ConfigError::InvalidStepCount)
        );
    }

    #[test]
    fn test_nan_parameters() {
        assert_eq!(
            SimulationConfigBuilder::default().x_target(f64::NAN).build(),
            Err(ConfigError::InvalidParameter("x_target"))
        );
        assert_eq!(
            SimulationConfigBuilder::default().kd(f64::NAN).build(),
            Err(ConfigError::InvalidParameter("kd"))
        );
        assert_eq!(
            SimulationConfigBuilder::default().spring(f64::NAN).build(),
            Err(ConfigError::InvalidParameter("spring"))
        );
    }

    #[test]
    fn test_invalid_integral_limit() {
        for limit in [0.0, -1.0, f64::NAN] {
            assert_eq!(
                SimulationConfigBuilder::default()
                    .integral_limit(limit)
                    .build(),
                Err(ConfigError::InvalidIntegralLimit)
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::InvalidMass.to_string(),
            "mass must be positive and finite"
        );
        assert_eq!(
            ConfigError::InvalidParameter("x_target").to_string(),
            "x_target must not be NaN"
        );
    }

    #[test]
    fn test_single_precision() {
        let config = SimulationConfig::<f32>::default();
        assert_eq!(config.steps(), 5000);
        assert_eq!(config.gains(), (80.0, 10.0, 15.0));
    }
}

#[cfg(feature = "serde")]
mod test_serde {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: SimulationConfig<f64> = serde_json::from_str(r#"{ "kp": 50.0 }"#).unwrap();
        let expected = SimulationConfigBuilder::default().kp(50.0).build().unwrap();
        assert_eq!(config, expected);
    }

    #[test]
    fn test_invalid_values_fail_to_deserialize() {
        let result = serde_json::from_str::<SimulationConfig<f64>>(r#"{ "mass": 0.0 }"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("mass must be positive"));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<SimulationConfig<f64>>(r#"{ "gain": 1.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = SimulationConfigBuilder::default()
            .integral_limit(2.0)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        // No clamp means no field
        let json = serde_json::to_string(&SimulationConfig::<f64>::default()).unwrap();
        assert!(!json.contains("integral_limit"));
    }
}
