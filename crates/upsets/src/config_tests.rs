use super::*;
use std::path::Path;
use std::time::Duration;
use upset_core::{SearchLimits, StrengthRange};

#[test]
fn test_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.trials, 100);
    assert_eq!(config.output, Path::new("chess_moves.json"));
    assert_eq!(config.strength, StrengthRange::new(200, 2500));
    assert_eq!(config.engine.path, "stockfish");
    assert!(!config.engine.is_random());
    assert_eq!(config.engine.search_limits(), SearchLimits::depth(15));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let config = AppConfig::from_toml_str(
        r#"
        trials = 20
        seed = 7

        [strength]
        min = 1400

        [engine]
        path = "random"
        "#,
    )
    .unwrap();

    assert_eq!(config.trials, 20);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.strength, StrengthRange::new(1400, 2500));
    assert!(config.engine.is_random());
    assert_eq!(config.workers, 1);

    let sim = config.simulation_config();
    assert_eq!(sim.trials, 20);
    assert_eq!(sim.seed, Some(7));
    assert_eq!(sim.strength.min, 1400);
}

#[test]
fn test_engine_options_and_time_limit() {
    let config = AppConfig::from_toml_str(
        r#"
        [engine]
        path = "/usr/games/stockfish"
        depth = 8
        movetime_ms = 250

        [engine.options]
        Threads = "2"
        Hash = "64"
        "#,
    )
    .unwrap();

    assert_eq!(
        config.engine.search_limits(),
        SearchLimits::depth_and_time(8, Duration::from_millis(250))
    );
    let names: Vec<&str> = config.engine.options.keys().map(String::as_str).collect();
    assert_eq!(names, ["Hash", "Threads"]);
}

#[test]
fn test_unknown_field_rejected() {
    let err = AppConfig::from_toml_str("trails = 10").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_invalid_values_rejected() {
    for text in [
        "trials = 0",
        "workers = 0",
        "[strength]\nmin = 2000\nmax = 1000",
        "[engine]\npath = \"  \"",
        "[engine]\ndepth = 0",
    ] {
        let err = AppConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "{text}: {err}");
    }
}

#[test]
fn test_missing_file() {
    let path = Path::new("definitely/not/here/upsets.toml");
    assert!(matches!(
        AppConfig::load(path),
        Err(ConfigError::Read { .. })
    ));
    assert_eq!(AppConfig::load_or_default(path).unwrap(), AppConfig::default());
}
