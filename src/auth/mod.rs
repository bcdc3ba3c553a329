//
//  jira-cli
//  auth/mod.rs
//

//! # Credential Resolution
//!
//! Two pieces of state are needed for every API call: the deployment base
//! URL and a bearer token. Each resolves through a fixed precedence chain:
//!
//! - Base URL: `--base-url` flag, then `JIRA_BASE_URL`, then the saved
//!   config file.
//! - Token: `--token` flag, then the keychain entry for the resolved base
//!   URL, then `JIRA_BEARER_TOKEN`.
//!
//! The chains are deliberately different. A flag or environment variable
//! pointing at a different deployment must win over the saved default, but
//! a token saved for that deployment should win over a stale environment
//! variable.
//!
//! Resolution stops at the first source that yields a value; later sources
//! are never consulted, so a keychain failure cannot shadow an explicit
//! `--token`.

pub mod keyring;

use console::style;

use crate::api::error::ApiError;
use crate::config::Config;
use self::keyring::SecretStore;

/// Environment variable naming the deployment base URL.
pub const BASE_URL_ENV: &str = "JIRA_BASE_URL";

/// Environment variable carrying the bearer token.
pub const TOKEN_ENV: &str = "JIRA_BEARER_TOKEN";

/// Applies base URL precedence: flag, environment, saved config.
///
/// Pure so the precedence grid can be tested without process-global env
/// mutation.
pub fn pick_base_url(
    flag: Option<&str>,
    env: Option<&str>,
    saved: Option<&str>,
) -> Option<String> {
    flag.or(env)
        .or(saved)
        .map(|url| url.trim_end_matches('/').to_string())
}

/// Applies token precedence: flag, keychain, environment.
pub fn pick_token(flag: Option<&str>, stored: Option<&str>, env: Option<&str>) -> Option<String> {
    flag.or(stored).or(env).map(str::to_string)
}

/// Resolves the base URL for this invocation.
///
/// Fails with [`ApiError::Configuration`] when no source yields one.
pub fn resolve_base_url(flag: Option<&str>) -> Result<String, ApiError> {
    let env = std::env::var(BASE_URL_ENV).ok();
    let config = Config::load();

    pick_base_url(flag, env.as_deref(), config.base_url.as_deref())
        .ok_or_else(|| ApiError::Configuration("No Jira base URL configured".to_string()))
}

/// Resolves the bearer token for a deployment.
///
/// The keychain is only consulted when no flag was given, so an explicit
/// `--token` works even where no keychain exists. A keychain read failure
/// (no secret service on a headless box, locked keychain) degrades to "no
/// stored token" with a warning; the environment variable still applies.
pub fn resolve_token(
    base_url: &str,
    flag: Option<&str>,
    store: &dyn SecretStore,
) -> Result<String, ApiError> {
    if let Some(token) = flag {
        return Ok(token.to_string());
    }

    let stored = match store.get(base_url) {
        Ok(stored) => stored,
        Err(e) => {
            eprintln!(
                "{} {e}",
                style("Warning: could not read the keychain.").yellow()
            );
            None
        }
    };
    let env = std::env::var(TOKEN_ENV).ok();

    pick_token(None, stored.as_deref(), env.as_deref())
        .ok_or_else(|| ApiError::Configuration(format!("No token stored for {base_url}")))
}

/// Saves the base URL as the default for future invocations.
pub fn persist_base_url(base_url: &str) -> Result<(), ApiError> {
    let mut config = Config::load();
    config.base_url = Some(base_url.trim_end_matches('/').to_string());
    config
        .save()
        .map_err(|e| ApiError::Configuration(format!("Could not save config: {e}")))
}

/// Stores the token in the keychain for a deployment.
///
/// A keychain write failure is reported as a warning rather than failing
/// login; the session still works through the token environment variable.
pub fn persist_token(store: &dyn SecretStore, base_url: &str, token: &str) {
    if let Err(e) = store.set(base_url, token) {
        eprintln!(
            "{} {e}",
            style("Warning: token was not saved to the keychain.").yellow()
        );
        eprintln!("Set {TOKEN_ENV} to authenticate without the keychain.");
    }
}

/// Removes the stored token for a deployment, best effort.
pub fn clear_token(store: &dyn SecretStore, base_url: &str) {
    if let Err(e) = store.delete(base_url) {
        eprintln!("{} {e}", style("Warning: could not clear stored token.").yellow());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::keyring::NullStore;
    use serial_test::serial;

    /// Store whose backend is present but broken, unlike [`NullStore`].
    struct BrokenStore;

    impl SecretStore for BrokenStore {
        fn get(&self, _base_url: &str) -> Result<Option<String>, ApiError> {
            Err(ApiError::Configuration(
                "no secret service available".to_string(),
            ))
        }

        fn set(&self, _base_url: &str, _token: &str) -> Result<(), ApiError> {
            Err(ApiError::Configuration(
                "no secret service available".to_string(),
            ))
        }

        fn delete(&self, _base_url: &str) -> Result<(), ApiError> {
            Err(ApiError::Configuration(
                "no secret service available".to_string(),
            ))
        }
    }

    #[test]
    fn base_url_flag_beats_env_beats_saved() {
        let flag = Some("https://flag.example.com");
        let env = Some("https://env.example.com");
        let saved = Some("https://saved.example.com");

        assert_eq!(pick_base_url(flag, env, saved).unwrap(), "https://flag.example.com");
        assert_eq!(pick_base_url(None, env, saved).unwrap(), "https://env.example.com");
        assert_eq!(pick_base_url(None, None, saved).unwrap(), "https://saved.example.com");
        assert!(pick_base_url(None, None, None).is_none());
    }

    #[test]
    fn base_url_is_trimmed_whatever_the_source() {
        assert_eq!(
            pick_base_url(Some("https://jira.example.com/"), None, None).unwrap(),
            "https://jira.example.com"
        );
        assert_eq!(
            pick_base_url(None, None, Some("https://jira.example.com//")).unwrap(),
            "https://jira.example.com"
        );
    }

    #[test]
    fn token_flag_beats_stored_beats_env() {
        assert_eq!(pick_token(Some("flag"), Some("stored"), Some("env")).unwrap(), "flag");
        assert_eq!(pick_token(None, Some("stored"), Some("env")).unwrap(), "stored");
        assert_eq!(pick_token(None, None, Some("env")).unwrap(), "env");
        assert!(pick_token(None, None, None).is_none());
    }

    #[test]
    fn explicit_token_skips_the_store() {
        // NullStore returns nothing; the flag must still resolve.
        let token = resolve_token("https://jira.example.com", Some("explicit"), &NullStore).unwrap();
        assert_eq!(token, "explicit");
    }

    #[test]
    #[serial]
    fn missing_token_names_the_deployment() {
        std::env::remove_var(TOKEN_ENV);
        let err = resolve_token("https://jira.example.com", None, &NullStore).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("https://jira.example.com"));
        assert!(message.contains("jira auth login"));
    }

    #[test]
    #[serial]
    fn broken_store_falls_through_to_env_token() {
        std::env::set_var(TOKEN_ENV, "env-token");
        let token = resolve_token("https://jira.example.com", None, &BrokenStore).unwrap();
        assert_eq!(token, "env-token");
        std::env::remove_var(TOKEN_ENV);
    }

    #[test]
    #[serial]
    fn broken_store_without_env_token_is_still_a_missing_token() {
        std::env::remove_var(TOKEN_ENV);
        let err = resolve_token("https://jira.example.com", None, &BrokenStore).unwrap_err();
        assert!(err.to_string().contains("jira auth login"));
    }
}
