use break_shuffle::config::{Config, RosterPolicy};

// Env vars are process-global, so every case runs inside one test.
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("BREAKS_DB_PATH");
        std::env::remove_var("BREAKS_STORAGE_KEY");
        std::env::remove_var("BREAKS_ROSTER_FILE");
        std::env::remove_var("BREAKS_ROSTER_POLICY");
    }

    // Defaults
    let config = Config::from_env().unwrap();
    assert_eq!(config.db_path.to_str(), Some("breaks.db"));
    assert_eq!(config.storage_key, "workers");
    assert!(config.roster_file.is_none());
    assert_eq!(config.roster_policy, RosterPolicy::Splice);
    assert!(!config.log_level.is_empty());

    // Overrides
    unsafe {
        std::env::set_var("BREAKS_DB_PATH", "/tmp/other.db");
        std::env::set_var("BREAKS_STORAGE_KEY", "roster-v2");
        std::env::set_var("BREAKS_ROSTER_FILE", "roster.toml");
        std::env::set_var("BREAKS_ROSTER_POLICY", "Reset");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.db_path.to_str(), Some("/tmp/other.db"));
    assert_eq!(config.storage_key, "roster-v2");
    assert_eq!(
        config.roster_file.as_deref().and_then(|p| p.to_str()),
        Some("roster.toml")
    );
    assert_eq!(config.roster_policy, RosterPolicy::Reset);

    // Malformed values
    unsafe {
        std::env::set_var("BREAKS_ROSTER_POLICY", "shuffle-everything");
    }
    assert!(Config::from_env().is_err());

    unsafe {
        std::env::set_var("BREAKS_ROSTER_POLICY", "splice");
        std::env::set_var("BREAKS_STORAGE_KEY", "  ");
    }
    assert!(Config::from_env().is_err());

    // Clean up
    unsafe {
        std::env::remove_var("BREAKS_DB_PATH");
        std::env::remove_var("BREAKS_STORAGE_KEY");
        std::env::remove_var("BREAKS_ROSTER_FILE");
        std::env::remove_var("BREAKS_ROSTER_POLICY");
    }
}
