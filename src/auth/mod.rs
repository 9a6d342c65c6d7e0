//! Access token resolution.
//!
//! The identity SDK itself (popup/redirect flows, its token cache) lives behind
//! [`IdentityClient`]. This module only decides *which* acquisition path to take:
//! silent first, interactive once if silent fails, never more.

mod pre_authorized;

pub use pre_authorized::PreAuthorizedIdentity;

use crate::error::AuthError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// A signed-in account as reported by the identity SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub home_account_id: String,
    pub username: String,
}

impl Account {
    pub fn new(home_account_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            home_account_id: home_account_id.into(),
            username: username.into(),
        }
    }
}

/// The token-acquisition surface of an identity SDK.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Accounts currently signed in, most relevant first.
    fn accounts(&self) -> Vec<Account>;

    /// Obtains a token from the SDK cache or a silent refresh.
    async fn acquire_token_silent(&self, scopes: &[String], account: &Account) -> Result<String, String>;

    /// Obtains a token by prompting the user.
    async fn acquire_token_interactive(&self, scopes: &[String]) -> Result<String, String>;
}

/// Anything that can hand out a bearer token for the next request.
///
/// [`ApiClient`](crate::http::ApiClient) calls this once per request and does
/// not cache the result.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// Token provider that tries silent acquisition for the first signed-in
/// account and falls back to a single interactive prompt.
pub struct InteractiveFallbackTokenProvider {
    identity: Arc<dyn IdentityClient>,
    scopes: Vec<String>,
}

impl InteractiveFallbackTokenProvider {
    pub fn new(identity: Arc<dyn IdentityClient>, scopes: Vec<String>) -> Self {
        Self { identity, scopes }
    }
}

#[async_trait]
impl AccessTokenProvider for InteractiveFallbackTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        let account = self
            .identity
            .accounts()
            .into_iter()
            .next()
            .ok_or(AuthError::NoAccount)?;

        match self.identity.acquire_token_silent(&self.scopes, &account).await {
            Ok(token) => {
                debug!(account = %account.username, "Silent token acquisition succeeded");
                Ok(token)
            }
            Err(silent) => {
                warn!(account = %account.username, error = %silent, "Silent token acquisition failed, prompting");
                self.identity
                    .acquire_token_interactive(&self.scopes)
                    .await
                    .map_err(|interactive| AuthError::Interaction { silent, interactive })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeIdentity {
        accounts: Vec<Account>,
        silent: Option<Result<String, String>>,
        interactive: Option<Result<String, String>>,
        silent_calls: AtomicUsize,
        interactive_calls: AtomicUsize,
        seen: Mutex<Vec<(Vec<String>, Option<Account>)>>,
    }

    #[async_trait]
    impl IdentityClient for FakeIdentity {
        fn accounts(&self) -> Vec<Account> {
            self.accounts.clone()
        }

        async fn acquire_token_silent(&self, scopes: &[String], account: &Account) -> Result<String, String> {
            self.silent_calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((scopes.to_vec(), Some(account.clone())));
            self.silent.clone().unwrap_or_else(|| Err("no silent result".into()))
        }

        async fn acquire_token_interactive(&self, scopes: &[String]) -> Result<String, String> {
            self.interactive_calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((scopes.to_vec(), None));
            self.interactive.clone().unwrap_or_else(|| Err("no interactive result".into()))
        }
    }

    fn provider(identity: Arc<FakeIdentity>) -> InteractiveFallbackTokenProvider {
        InteractiveFallbackTokenProvider::new(identity, vec!["User.Read".to_string()])
    }

    #[tokio::test]
    async fn test_no_account_is_a_precondition_failure() {
        let identity = Arc::new(FakeIdentity::default());
        let err = provider(identity.clone()).access_token().await.unwrap_err();

        assert_eq!(err, AuthError::NoAccount);
        assert_eq!(identity.silent_calls.load(Ordering::SeqCst), 0);
        assert_eq!(identity.interactive_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_silent_success_skips_prompt() {
        let identity = Arc::new(FakeIdentity {
            accounts: vec![Account::new("a1", "alice@example.com"), Account::new("b2", "bob@example.com")],
            silent: Some(Ok("silent-token".into())),
            ..Default::default()
        });

        let token = provider(identity.clone()).access_token().await.unwrap();

        assert_eq!(token, "silent-token");
        assert_eq!(identity.interactive_calls.load(Ordering::SeqCst), 0);
        let seen = identity.seen.lock().unwrap();
        assert_eq!(seen[0].0, vec!["User.Read".to_string()]);
        assert_eq!(seen[0].1.as_ref().unwrap().home_account_id, "a1");
    }

    #[tokio::test]
    async fn test_silent_failure_falls_back_once() {
        let identity = Arc::new(FakeIdentity {
            accounts: vec![Account::new("a1", "alice@example.com")],
            silent: Some(Err("consent required".into())),
            interactive: Some(Ok("popup-token".into())),
            ..Default::default()
        });

        let token = provider(identity.clone()).access_token().await.unwrap();

        assert_eq!(token, "popup-token");
        assert_eq!(identity.silent_calls.load(Ordering::SeqCst), 1);
        assert_eq!(identity.interactive_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_paths_failing_reports_interaction_error() {
        let identity = Arc::new(FakeIdentity {
            accounts: vec![Account::new("a1", "alice@example.com")],
            silent: Some(Err("session expired".into())),
            interactive: Some(Err("popup blocked".into())),
            ..Default::default()
        });

        let err = provider(identity.clone()).access_token().await.unwrap_err();

        assert_eq!(
            err,
            AuthError::Interaction {
                silent: "session expired".into(),
                interactive: "popup blocked".into(),
            }
        );
        assert_eq!(identity.silent_calls.load(Ordering::SeqCst), 1);
        assert_eq!(identity.interactive_calls.load(Ordering::SeqCst), 1);
    }
}
