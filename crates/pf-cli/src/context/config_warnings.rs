use pf_config::ForgeConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &ForgeConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ForgeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.provider.is_configured() && has_env_prefix(&env_keys, "PROMPTFORGE_PROVIDER") {
        warnings.push(
            "Provider config appears default while PROMPTFORGE_PROVIDER* env vars exist. Use double underscores (example: PROMPTFORGE_PROVIDER__API_KEY)."
                .to_string(),
        );
    }

    if has_env_prefix(&env_keys, "PROMPTFORGE_GENERATION")
        || has_env_prefix(&env_keys, "PROMPTFORGE_STORAGE")
    {
        warnings.push(
            "Single-underscore PROMPTFORGE_GENERATION_*/PROMPTFORGE_STORAGE_* env vars are ignored. Use double underscores (example: PROMPTFORGE_GENERATION__STRICT)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
