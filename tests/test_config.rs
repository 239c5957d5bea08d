use std::path::Path;

use asteroid_shooter::config::{GameConfig, Span, DEFAULT_CONFIG_FILE, MAX_SPRITE_SIZE};
use asteroid_shooter::ConfigError;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn defaults_match_the_classic_tuning() {
    let c = GameConfig::default();
    assert_eq!(c.seed, None);
    assert_eq!(c.player.acceleration, 600.0);
    assert_eq!(c.player.friction, 0.999);
    assert_eq!(c.player.rotation_speed, 120.0);
    assert_eq!(c.player.fire_cooldown, 0.5);
    assert_eq!(c.projectile.time_to_live, 3.0);
    assert_eq!(c.spawner.interval, 5.0);
    assert_eq!(c.spawner.spawn_y, -100.0);
    assert_eq!(c.asteroids.fragment_count, 3);
    assert_eq!(c.asteroids.big.score, 100);
    assert_eq!(c.asteroids.medium.score, 50);
    assert_eq!(c.asteroids.small.score, 50);
    assert_eq!((c.display.width, c.display.height), (800, 600));
    assert!(c.validate().is_ok());
}

#[test]
fn empty_document_gives_defaults() {
    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn partial_document_overrides_only_named_keys() {
    let c = GameConfig::from_toml(
        r#"
        seed = 7

        [spawner]
        interval = 3.0

        [asteroids]
        fragment_count = 4
        "#,
    )
    .unwrap();
    assert_eq!(c.seed, Some(7));
    assert_eq!(c.spawner.interval, 3.0);
    assert_eq!(c.spawner.spawn_y, -100.0);
    assert_eq!(c.asteroids.fragment_count, 4);
    assert_eq!(c.asteroids.big, GameConfig::default().asteroids.big);
}

#[test]
fn full_tier_override() {
    let c = GameConfig::from_toml(
        r#"
        [asteroids.big]
        velocity = { min = -10.0, max = 10.0 }
        rotation = { min = 0.0, max = 0.0 }
        score = 500
        size = 100
        "#,
    )
    .unwrap();
    assert_eq!(c.asteroids.big.score, 500);
    assert_eq!(c.asteroids.big.velocity, Span::new(-10.0, 10.0));
}

#[test]
fn incomplete_tier_is_a_parse_error() {
    let err = GameConfig::from_toml("[asteroids.big]\nscore = 5\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml("[player\nacceleration = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn inverted_range_is_rejected() {
    let err = GameConfig::from_toml(
        r#"
        [asteroids.small]
        velocity = { min = 5.0, max = -5.0 }
        rotation = { min = 0.0, max = 1.0 }
        score = 50
        size = 32
        "#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidRange {
            name: "asteroids.small",
            ..
        }
    ));
}

#[test]
fn non_positive_interval_is_rejected() {
    let err = GameConfig::from_toml("[spawner]\ninterval = 0.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "spawner.interval",
            ..
        }
    ));
}

#[test]
fn negative_friction_is_rejected() {
    let err = GameConfig::from_toml("[player]\nfriction = -1.0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "player.friction",
            ..
        }
    ));
}

#[test]
fn oversized_sprite_is_rejected() {
    let err = GameConfig::from_toml("[player]\nsize = 100000\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "player.size",
            ..
        }
    ));

    let err = GameConfig::from_toml("[projectile]\nlength = 0\n").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            name: "projectile.length",
            ..
        }
    ));
}

#[test]
fn largest_allowed_sprite_is_accepted() {
    let c = GameConfig::from_toml(&format!("[player]\nsize = {MAX_SPRITE_SIZE}\n")).unwrap();
    assert_eq!(c.player.size, MAX_SPRITE_SIZE);
}

#[test]
fn no_path_and_no_default_file_gives_defaults() {
    assert!(!Path::new(DEFAULT_CONFIG_FILE).exists());
    assert_eq!(
        GameConfig::load_or_default(None).unwrap(),
        GameConfig::default()
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = GameConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("here.toml"));
}

#[test]
fn load_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!(
        "asteroid_shooter_config_{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, "[display]\nfullscreen = true\n").unwrap();
    let c = GameConfig::load_or_default(Some(&path)).unwrap();
    let _ = std::fs::remove_file(&path);
    assert!(c.display.fullscreen);
    assert_eq!(c.display.width, 800);
}

#[test]
fn collapsed_span_samples_its_value() {
    let mut rng = Pcg32::seed_from_u64(42);
    assert_eq!(Span::new(3.0, 3.0).sample(&mut rng), 3.0);
}

proptest! {
    #[test]
    fn span_samples_stay_in_range(
        seed in any::<u64>(),
        min in -500.0f32..500.0,
        width in 0.0f32..500.0,
    ) {
        let span = Span::new(min, min + width);
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..16 {
            prop_assert!(span.contains(span.sample(&mut rng)));
        }
    }
}
