use hub_config::HubConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &HubConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &HubConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.supabase.is_configured() {
        if env_keys
            .iter()
            .any(|key| key.starts_with("LINKHUB_SUPABASE") && !key.starts_with("LINKHUB_SUPABASE__"))
        {
            warnings.push(
                "Supabase config appears default while LINKHUB_SUPABASE* env vars exist. Use double underscores (example: LINKHUB_SUPABASE__URL)."
                    .to_string(),
            );
        }
        if env_keys.iter().any(|key| key.starts_with("SUPABASE_")) {
            warnings.push(
                "SUPABASE_* env vars are not read. Use LINKHUB_SUPABASE__URL and LINKHUB_SUPABASE__ANON_KEY."
                    .to_string(),
            );
        }
    }

    warnings
}
