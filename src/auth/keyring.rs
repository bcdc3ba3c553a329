//
//  jira-cli
//  auth/keyring.rs
//

//! # Secret Storage
//!
//! Bearer tokens live in the operating system keychain (macOS Keychain,
//! Windows Credential Manager, Secret Service on Linux), keyed by the
//! deployment's base URL so multiple deployments can hold tokens side by
//! side.
//!
//! The [`SecretStore`] trait exists so credential resolution can be tested
//! without touching a real keychain, and so headless environments (CI,
//! containers without a secret service) can opt out via `JIRA_NO_KEYRING`
//! and rely on the token environment variable instead.

use keyring::Entry;

use crate::api::error::ApiError;

/// Keychain service name under which all tokens are stored.
const SERVICE_NAME: &str = "jira-cli";

/// Environment variable that disables the system keychain entirely.
pub const NO_KEYRING_ENV: &str = "JIRA_NO_KEYRING";

/// Abstraction over token storage.
///
/// Secrets are keyed by base URL. `get` returns `None` for a missing
/// entry; only genuine storage failures are errors.
pub trait SecretStore {
    /// Looks up the token stored for a base URL.
    fn get(&self, base_url: &str) -> Result<Option<String>, ApiError>;

    /// Stores a token for a base URL, replacing any existing one.
    fn set(&self, base_url: &str, token: &str) -> Result<(), ApiError>;

    /// Deletes the token for a base URL. Deleting a missing entry is fine.
    fn delete(&self, base_url: &str) -> Result<(), ApiError>;
}

/// [`SecretStore`] backed by the operating system keychain.
pub struct KeyringStore;

impl KeyringStore {
    fn entry(base_url: &str) -> Result<Entry, ApiError> {
        Entry::new(SERVICE_NAME, base_url)
            .map_err(|e| ApiError::Configuration(format!("Keychain unavailable: {e}")))
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, base_url: &str) -> Result<Option<String>, ApiError> {
        match Self::entry(base_url)?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ApiError::Configuration(format!(
                "Could not read token from keychain: {e}"
            ))),
        }
    }

    fn set(&self, base_url: &str, token: &str) -> Result<(), ApiError> {
        Self::entry(base_url)?
            .set_password(token)
            .map_err(|e| ApiError::Configuration(format!("Could not store token in keychain: {e}")))
    }

    fn delete(&self, base_url: &str) -> Result<(), ApiError> {
        match Self::entry(base_url)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ApiError::Configuration(format!(
                "Could not delete token from keychain: {e}"
            ))),
        }
    }
}

/// [`SecretStore`] that stores nothing and never fails.
///
/// Used when `JIRA_NO_KEYRING` is set; token resolution then falls
/// through to the environment variable.
pub struct NullStore;

impl SecretStore for NullStore {
    fn get(&self, _base_url: &str) -> Result<Option<String>, ApiError> {
        Ok(None)
    }

    fn set(&self, _base_url: &str, _token: &str) -> Result<(), ApiError> {
        Ok(())
    }

    fn delete(&self, _base_url: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Picks the secret store for this invocation.
pub fn default_store() -> Box<dyn SecretStore> {
    if std::env::var_os(NO_KEYRING_ENV).is_some() {
        Box::new(NullStore)
    } else {
        Box::new(KeyringStore)
    }
}
