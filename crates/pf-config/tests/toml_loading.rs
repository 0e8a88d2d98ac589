//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pf_config::{ForgeConfig, ProviderKind};

#[test]
fn loads_provider_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[provider]
kind = "gemini"
api_key = "gm-key"
model = "gemini-1.5-pro"
timeout_secs = 15
"#,
        )?;

        let config: ForgeConfig = Figment::from(Serialized::defaults(ForgeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.provider.kind, ProviderKind::Gemini);
        assert_eq!(config.provider.api_key, "gm-key");
        assert_eq!(config.provider.effective_model(), "gemini-1.5-pro");
        assert_eq!(config.provider.timeout_secs, 15);
        assert!(config.provider.is_configured());
        Ok(())
    });
}

#[test]
fn project_config_is_read_from_promptforge_dir() {
    Jail::expect_with(|jail| {
        jail.create_dir(".promptforge")?;
        jail.create_file(
            ".promptforge/config.toml",
            r#"
[generation]
auto_repair = false
max_repair_attempts = 5
history_limit = 4
strict = true

[storage]
data_dir = "/tmp/forge-data"
"#,
        )?;

        let config = ForgeConfig::load().expect("config loads");
        assert!(!config.generation.auto_repair);
        assert_eq!(config.generation.max_repair_attempts, 5);
        assert_eq!(config.generation.history_limit, 4);
        assert!(config.generation.strict);
        assert_eq!(config.storage.data_dir, "/tmp/forge-data");
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[generation]
strict = true
"#,
        )?;

        let config: ForgeConfig = Figment::from(Serialized::defaults(ForgeConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.generation.strict);
        assert!(config.generation.auto_repair);
        assert_eq!(config.generation.history_limit, 10);
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        Ok(())
    });
}

#[test]
fn out_of_range_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_dir(".promptforge")?;
        jail.create_file(
            ".promptforge/config.toml",
            r#"
[generation]
max_repair_attempts = 99
"#,
        )?;

        assert!(ForgeConfig::load().is_err());
        Ok(())
    });
}
