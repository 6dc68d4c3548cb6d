use figment::Jail;
use hub_config::HubConfig;
use pretty_assertions::assert_eq;

#[test]
fn prefixed_env_fills_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("LINKHUB_SUPABASE__URL", "https://env.supabase.co");
        jail.set_env("LINKHUB_SUPABASE__ANON_KEY", "env-key");
        jail.set_env("LINKHUB_STORE__TIMEOUT_SECS", "3");

        let config = HubConfig::load().expect("config loads");
        assert_eq!(config.supabase.url, "https://env.supabase.co");
        assert_eq!(config.supabase.anon_key, "env-key");
        assert_eq!(config.store.timeout_secs, 3);
        Ok(())
    });
}

#[test]
fn web_deployment_names_are_accepted() {
    Jail::expect_with(|jail| {
        jail.set_env("NEXT_PUBLIC_SUPABASE_URL", "https://public.supabase.co");
        jail.set_env("NEXT_PUBLIC_SUPABASE_ANON_KEY", "public-key");

        let config = HubConfig::load().expect("config loads");
        assert_eq!(config.supabase.url, "https://public.supabase.co");
        assert_eq!(config.supabase.anon_key, "public-key");
        Ok(())
    });
}

#[test]
fn prefixed_env_beats_web_deployment_names() {
    Jail::expect_with(|jail| {
        jail.set_env("NEXT_PUBLIC_SUPABASE_URL", "https://public.supabase.co");
        jail.set_env("LINKHUB_SUPABASE__URL", "https://prefixed.supabase.co");

        let config = HubConfig::load().expect("config loads");
        assert_eq!(config.supabase.url, "https://prefixed.supabase.co");
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".linkhub")?;
        jail.create_file(
            ".linkhub/config.toml",
            r#"
[supabase]
url = "https://file.supabase.co"
anon_key = "file-key"
"#,
        )?;
        jail.set_env("NEXT_PUBLIC_SUPABASE_ANON_KEY", "public-key");

        let config = HubConfig::load().expect("config loads");
        assert_eq!(config.supabase.url, "https://file.supabase.co");
        assert_eq!(config.supabase.anon_key, "public-key");
        Ok(())
    });
}
