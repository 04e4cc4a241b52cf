//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use tally_config::{AuditConfig, HistoryConfig, TallyConfig};

#[test]
fn loads_history_and_audit_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[history]
max_depth = 25
coalesce_window_ms = 250

[audit]
max_events = 40
"#,
        )?;

        let config: TallyConfig = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.history, HistoryConfig::new(25, 250));
        assert_eq!(config.audit, AuditConfig::with_max_events(40));
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[history]\nmax_depth = 7\n")?;

        let config: TallyConfig = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.history.max_depth, 7);
        assert_eq!(config.history.coalesce_window_ms, 500);
        assert_eq!(config.audit.max_events, 1000);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tally")?;
        jail.create_file(
            ".tally/config.toml",
            "[general]\ndefault_document = \"books.json\"\n",
        )?;

        let config = TallyConfig::load().expect("config loads");
        assert_eq!(config.general.default_document, "books.json");
        assert!(config.general.has_default_document());
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".tally")?;
        jail.create_file(".tally/config.toml", "[audit]\nmax_events = 10\n")?;
        jail.set_env("TALLY_AUDIT__MAX_EVENTS", "15");

        let config = TallyConfig::load().expect("config loads");
        assert_eq!(config.audit.max_events, 15);
        Ok(())
    });
}

#[test]
fn env_only_figment() {
    Jail::expect_with(|jail| {
        jail.set_env("TALLY_HISTORY__COALESCE_WINDOW_MS", "900");

        let config: TallyConfig = Figment::from(Serialized::defaults(TallyConfig::default()))
            .merge(Env::prefixed("TALLY_").split("__"))
            .extract()?;

        assert_eq!(config.history.coalesce_window_ms, 900);
        Ok(())
    });
}

#[test]
fn load_rejects_zero_depth() {
    Jail::expect_with(|jail| {
        jail.set_env("TALLY_HISTORY__MAX_DEPTH", "0");
        let err = TallyConfig::load().expect_err("zero depth must be rejected");
        assert!(err.to_string().contains("history.max_depth"));
        Ok(())
    });
}
