use servery_core::{Config, ConfigError, Simulation};

#[test]
fn jitter_equal_to_mean_is_rejected_before_any_event() {
    let mut config = Config::default();
    config.stages[0].jitter_minutes = config.stages[0].mean_minutes;

    let err = Simulation::run(&config).unwrap_err();
    assert_eq!(
        err,
        ConfigError::JitterSwallowsMean {
            stage: "plating",
            jitter: 0.8,
            mean: 0.8,
        }
    );
}

#[test]
fn zero_tables_are_rejected() {
    let mut config = Config::default();
    config.tables = 0;
    assert_eq!(Simulation::run(&config).unwrap_err(), ConfigError::NoTables(0));
}

#[test]
fn an_unstaffed_stage_is_rejected() {
    let mut config = Config::default();
    config.stages[1].servers = 0;
    assert_eq!(
        Simulation::run(&config).unwrap_err(),
        ConfigError::NoServers {
            stage: "carrying",
            servers: 0,
        }
    );
}

#[test]
fn negative_and_non_finite_durations_are_rejected() {
    let mut config = Config::default();
    config.stages[2].mean_minutes = -0.5;
    assert!(matches!(
        Simulation::run(&config).unwrap_err(),
        ConfigError::BadMean { stage: "rice", .. }
    ));

    let mut config = Config::default();
    config.stages[0].mean_minutes = f64::NAN;
    assert!(matches!(
        Simulation::run(&config).unwrap_err(),
        ConfigError::BadMean { stage: "plating", .. }
    ));

    let mut config = Config::default();
    config.stages[1].jitter_minutes = -0.1;
    assert!(matches!(
        Simulation::run(&config).unwrap_err(),
        ConfigError::BadJitter { stage: "carrying", .. }
    ));
}

#[test]
fn malformed_start_clocks_are_rejected() {
    for clock in ["quarter past", "24:00", "07:60", "07:00:00", ""] {
        let mut config = Config::default();
        config.start_clock = clock.to_string();
        assert_eq!(
            Simulation::run(&config).unwrap_err(),
            ConfigError::BadStartClock(clock.to_string()),
            "clock {:?} should not parse",
            clock
        );
    }
}

#[test]
fn config_decodes_from_rendering_layer_json() {
    let config = Config::from_json(serde_json::json!({
        "tables": 12,
        "stages": [
            { "servers": 2, "mean_minutes": 0.8, "jitter_minutes": 0.2 },
            { "servers": 3, "mean_minutes": 0.5, "jitter_minutes": 0.1 },
            { "servers": 2, "mean_minutes": 0.8, "jitter_minutes": 0.2 }
        ],
        "start_clock": "06:30",
        "seed": 7
    }))
    .unwrap();

    assert_eq!(config.tables, 12);
    assert_eq!(config.stages[1].servers, 3);
    assert_eq!(config.start_clock, "06:30");
}

#[test]
fn malformed_json_is_rejected() {
    let err = Config::from_json(serde_json::json!({ "tables": "sixty" })).unwrap_err();
    assert!(matches!(err, ConfigError::Malformed(_)));
}

#[test]
fn decoded_json_still_hits_bound_checks() {
    let mut value = serde_json::to_value(Config::default()).unwrap();
    value["tables"] = serde_json::json!(0);
    assert_eq!(Config::from_json(value).unwrap_err(), ConfigError::NoTables(0));
}
