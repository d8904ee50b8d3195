use blockdrop::core::{ConfigError, GameConfig, GameState, RandomizerKind};
use blockdrop::headless::{load_config, HeadlessArgs};
use blockdrop::types::GameStatus;

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("blockdrop.toml");

    let config = GameConfig {
        columns: 8,
        lookahead: 3,
        randomizer: RandomizerKind::Bag,
        seed: Some(42),
        ..GameConfig::default()
    };
    config.save_to_file(&path).unwrap();

    let loaded = GameConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn invalid_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "columns = 200\n").unwrap();

    let err = GameConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("columns"));
}

#[test]
fn config_shapes_the_game() {
    let config = GameConfig::from_toml_str(
        "columns = 6\nvisible_rows = 12\nhidden_rows = 1\nlookahead = 4\nseed = 9\nrandomizer = \"bag\"\n",
    )
    .unwrap();
    let mut state = GameState::from_config(&config).unwrap();
    state.start();

    assert_eq!(state.board().width(), 6);
    assert_eq!(state.board().height(), 13);
    assert_eq!(state.queue().len(), 5);
    assert_eq!(state.status(), GameStatus::Running);
}

#[test]
fn invalid_config_refuses_to_build() {
    let config = GameConfig {
        soft_drop_interval_ms: 0,
        ..GameConfig::default()
    };
    assert!(GameState::from_config(&config).is_err());
}

#[test]
fn bag_randomizer_deals_all_kinds() {
    let mut state = GameState::from_config(&GameConfig {
        randomizer: RandomizerKind::Bag,
        lookahead: 6,
        seed: Some(3),
        ..GameConfig::default()
    })
    .unwrap();
    state.start();

    let mut kinds: Vec<_> = state.queue().iter().copied().collect();
    kinds.push(state.active().unwrap().kind);
    kinds.sort_by_key(|k| k.as_str());
    kinds.dedup();
    assert_eq!(kinds.len(), 7);
}

#[test]
fn explicit_path_wins_over_environment() {
    let dir = tempfile::tempdir().unwrap();
    let cli = dir.path().join("cli.toml");
    let env = dir.path().join("env.toml");
    GameConfig::with_seed(1).save_to_file(&cli).unwrap();
    GameConfig::with_seed(2).save_to_file(&env).unwrap();

    let args = HeadlessArgs {
        config: Some(cli),
        ..HeadlessArgs::default()
    };
    assert_eq!(load_config(&args, Some(env.clone())).unwrap().seed, Some(1));

    let from_env = load_config(&HeadlessArgs::default(), Some(env)).unwrap();
    assert_eq!(from_env.seed, Some(2));
}
