use figment::Jail;
use perk_config::PerkConfig;
use pretty_assertions::assert_eq;

#[test]
fn project_local_toml_is_merged() {
    Jail::expect_with(|jail| {
        jail.create_dir(".perk")?;
        jail.create_file(
            ".perk/config.toml",
            r#"
                [api]
                base_url = "https://staging.example.com/api"
                page_size = 50
            "#,
        )?;

        let config: PerkConfig = PerkConfig::figment().extract()?;
        assert_eq!(config.api.base_url, "https://staging.example.com/api");
        assert_eq!(config.api.page_size, 50);
        // Untouched section keeps defaults
        assert_eq!(config.auth.poll_interval_secs, 30);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".perk")?;
        jail.create_file(
            ".perk/config.toml",
            r#"
                [api]
                base_url = "https://from-toml.example.com/api"
            "#,
        )?;
        jail.set_env("PERK_API__BASE_URL", "https://from-env.example.com/api");

        let config: PerkConfig = PerkConfig::figment().extract()?;
        assert_eq!(config.api.base_url, "https://from-env.example.com/api");
        Ok(())
    });
}
