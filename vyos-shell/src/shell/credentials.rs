//! Decryption of secret resource attributes.

use std::future::Future;

use secrecy::SecretString;

use crate::error::Result;

/// Turns an encrypted attribute value into its clear text.
///
/// `attribute` is the attribute's name and is only used for error reporting.
pub trait CredentialStore: Send + Sync {
    fn decrypt(&self, attribute: &str, encrypted: &str) -> impl Future<Output = Result<SecretString>> + Send;
}

/// Store for contexts whose secret attributes are already in clear text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextCredentials;

impl CredentialStore for PlaintextCredentials {
    async fn decrypt(&self, _attribute: &str, encrypted: &str) -> Result<SecretString> {
        Ok(SecretString::from(encrypted.to_string()))
    }
}
