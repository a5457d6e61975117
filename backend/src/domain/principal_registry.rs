//! Static principal registry backing HTTP Basic authentication.
//!
//! Passwords are reduced to SHA-256 digests on registration; the plaintext
//! is zeroized as soon as it is hashed. Digest comparison does not
//! short-circuit on the first differing byte.

use std::collections::BTreeSet;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::ports::CredentialVerifier;
use super::{BasicCredentials, Error, Principal, Role};

type PasswordDigest = [u8; 32];

#[derive(Debug, Clone)]
struct RegisteredPrincipal {
    username: String,
    digest: PasswordDigest,
    roles: BTreeSet<Role>,
}

/// In-memory set of principals configured at startup.
///
/// # Examples
/// ```
/// use document_service::domain::{PrincipalRegistry, Role};
/// use zeroize::Zeroizing;
///
/// let registry = PrincipalRegistry::default().with_principal(
///     "krieger-document",
///     Zeroizing::new("krieger-document".to_owned()),
///     [Role::Document],
/// );
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrincipalRegistry {
    principals: Vec<RegisteredPrincipal>,
}

impl PrincipalRegistry {
    /// Register a principal, replacing any earlier entry with that username.
    #[must_use]
    pub fn with_principal(
        mut self,
        username: impl Into<String>,
        password: Zeroizing<String>,
        roles: impl IntoIterator<Item = Role>,
    ) -> Self {
        let username = username.into();
        let digest = password_digest(password.as_str());
        drop(password);
        self.principals.retain(|entry| entry.username != username);
        self.principals.push(RegisteredPrincipal {
            username,
            digest,
            roles: roles.into_iter().collect(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }

    /// Username and digest fingerprint pairs, safe to log.
    pub fn fingerprints(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.principals
            .iter()
            .map(|entry| (entry.username.as_str(), fingerprint(&entry.digest)))
    }
}

#[async_trait]
impl CredentialVerifier for PrincipalRegistry {
    async fn verify(&self, credentials: &BasicCredentials) -> Result<Principal, Error> {
        let presented = password_digest(credentials.password());
        self.principals
            .iter()
            .find(|entry| entry.username == credentials.username())
            .filter(|entry| digests_match(&entry.digest, &presented))
            .map(|entry| Principal::new(entry.username.clone(), entry.roles.iter().copied()))
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

fn password_digest(password: &str) -> PasswordDigest {
    Sha256::digest(password.as_bytes()).into()
}

fn digests_match(left: &PasswordDigest, right: &PasswordDigest) -> bool {
    left.iter()
        .zip(right.iter())
        .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
        == 0
}

/// First eight digest bytes as lowercase hex.
fn fingerprint(digest: &PasswordDigest) -> String {
    hex::encode(&digest[..8])
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn registry() -> PrincipalRegistry {
        PrincipalRegistry::default()
            .with_principal(
                "krieger-document",
                Zeroizing::new("krieger-document".to_owned()),
                [Role::Document],
            )
            .with_principal(
                "krieger-author",
                Zeroizing::new("krieger-author".to_owned()),
                [Role::Author],
            )
    }

    #[rstest]
    #[tokio::test]
    async fn verifies_matching_credentials(registry: PrincipalRegistry) {
        let creds = BasicCredentials::try_from_parts("krieger-document", "krieger-document")
            .expect("credentials shape");

        let principal = registry.verify(&creds).await.expect("known principal");

        assert_eq!(principal.username(), "krieger-document");
        assert!(principal.has_role(Role::Document));
        assert!(!principal.has_role(Role::Author));
    }

    #[rstest]
    #[case("krieger-document", "wrong")]
    #[case("nobody", "krieger-document")]
    #[case("krieger-author", "krieger-document")]
    #[tokio::test]
    async fn rejects_unknown_or_mismatched_credentials(
        registry: PrincipalRegistry,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let creds = BasicCredentials::try_from_parts(username, password).expect("shape");

        let err = registry.verify(&creds).await.expect_err("must fail");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn re_registering_replaces_the_entry(registry: PrincipalRegistry) {
        let registry = registry.with_principal(
            "krieger-author",
            Zeroizing::new("rotated".to_owned()),
            [Role::Author],
        );
        assert_eq!(registry.len(), 2);
    }

    #[rstest]
    fn fingerprints_are_sixteen_hex_characters(registry: PrincipalRegistry) {
        let fingerprints: Vec<_> = registry.fingerprints().collect();

        assert_eq!(fingerprints.len(), 2);
        for (_, fingerprint) in fingerprints {
            assert_eq!(fingerprint.len(), 16);
            assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
