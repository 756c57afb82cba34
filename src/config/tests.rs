use std::io::Write;

use serial_test::serial;

use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.public_port = Some(4000);
    raw.logging.level = Some("info".to_string());

    let overrides = ServeOverrides {
        public_port: Some(4321),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.public_addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn defaults_resolve_without_any_source() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.public_addr.port(), DEFAULT_PUBLIC_PORT);
    assert_eq!(settings.server.admin_addr.port(), DEFAULT_ADMIN_PORT);
    assert_eq!(
        settings.server.graceful_shutdown,
        Duration::from_secs(DEFAULT_GRACEFUL_SHUTDOWN_SECS)
    );
    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.database.url, None);
    assert_eq!(
        settings.database.max_connections.get(),
        DEFAULT_DB_MAX_CONNECTIONS
    );
}

#[test]
fn zero_ports_are_rejected() {
    let mut raw = RawSettings::default();
    raw.server.public_port = Some(0);
    let err = Settings::from_raw(raw).expect_err("zero port");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "server.public_port",
            ..
        }
    ));

    let mut raw = RawSettings::default();
    raw.server.admin_port = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn shared_listener_address_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.public_port = Some(3100);
    raw.server.admin_port = Some(3100);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn zero_pool_size_is_rejected() {
    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn blank_database_url_counts_as_unset() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.database.url, None);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["trailpost"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_seed_arguments() {
    let args = CliArgs::parse_from([
        "trailpost",
        "seed",
        "--database-url",
        "postgres://example",
        "--fixtures",
        "/srv/fixtures",
    ]);

    match args.command.expect("seed command") {
        Command::Seed(seed) => {
            assert_eq!(
                seed.database.database_url.as_deref(),
                Some("postgres://example")
            );
            assert_eq!(
                seed.fixtures.as_deref(),
                Some(std::path::Path::new("/srv/fixtures"))
            );
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "trailpost",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--database-url",
        "memory://",
        "--database-max-connections",
        "2",
    ]);

    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(serve.overrides.database_url.as_deref(), Some("memory://"));
            assert_eq!(serve.overrides.database_max_connections, Some(2));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
#[serial]
fn environment_beats_file_and_cli_beats_environment() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    writeln!(
        file,
        "[server]\npublic_port = 4200\nadmin_port = 4201\n\n[logging]\nlevel = \"error\""
    )
    .expect("write config");

    // SAFETY: serialized with every other test that touches the environment.
    unsafe {
        std::env::set_var("TRAILPOST__SERVER__PUBLIC_PORT", "4100");
        std::env::set_var("TRAILPOST__LOGGING__LEVEL", "warn");
    }

    let args = CliArgs::parse_from([
        "trailpost",
        "--config-file",
        file.path().to_str().expect("utf-8 path"),
        "serve",
        "--log-level",
        "trace",
    ]);
    let result = load(&args);

    unsafe {
        std::env::remove_var("TRAILPOST__SERVER__PUBLIC_PORT");
        std::env::remove_var("TRAILPOST__LOGGING__LEVEL");
    }

    let settings = result.expect("settings load");
    assert_eq!(settings.server.public_addr.port(), 4100);
    assert_eq!(settings.server.admin_addr.port(), 4201);
    assert_eq!(settings.logging.level, LevelFilter::TRACE);
}

#[test]
#[serial]
fn missing_config_file_is_an_error() {
    let args = CliArgs::parse_from([
        "trailpost",
        "--config-file",
        "/nonexistent/trailpost.toml",
    ]);
    assert!(matches!(load(&args), Err(LoadError::Build(_))));
}
