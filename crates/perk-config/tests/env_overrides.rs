use figment::Jail;
use perk_config::PerkConfig;
use pretty_assertions::assert_eq;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("PERK_API__BASE_URL", "https://offers.example.com/api");
        jail.set_env("PERK_AUTH__POLL_INTERVAL_SECS", "5");

        let config: PerkConfig = PerkConfig::figment().extract()?;
        assert_eq!(config.api.base_url, "https://offers.example.com/api");
        assert_eq!(config.auth.poll_interval_secs, 5);
        Ok(())
    });
}

#[test]
fn unrelated_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("PERK_API__TIMEOUT_SECS", "90");

        let config: PerkConfig = PerkConfig::figment().extract()?;
        assert_eq!(config.api.timeout_secs, 90);
        assert_eq!(config.auth.keyring_service, "perk-cli");
        Ok(())
    });
}
