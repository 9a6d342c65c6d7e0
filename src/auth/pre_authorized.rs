use super::{Account, IdentityClient};
use async_trait::async_trait;

/// Identity source for headless use: one account and a token acquired elsewhere.
///
/// Silent acquisition always returns the stored token. There is no one to
/// prompt, so interactive acquisition always fails.
pub struct PreAuthorizedIdentity {
    account: Option<Account>,
    token: String,
}

impl PreAuthorizedIdentity {
    pub fn new(account: Account, token: impl Into<String>) -> Self {
        Self {
            account: Some(account),
            token: token.into(),
        }
    }

    /// An identity with nobody signed in.
    pub fn signed_out() -> Self {
        Self {
            account: None,
            token: String::new(),
        }
    }
}

#[async_trait]
impl IdentityClient for PreAuthorizedIdentity {
    fn accounts(&self) -> Vec<Account> {
        self.account.iter().cloned().collect()
    }

    async fn acquire_token_silent(&self, _scopes: &[String], _account: &Account) -> Result<String, String> {
        if self.token.is_empty() {
            Err("no cached token".to_string())
        } else {
            Ok(self.token.clone())
        }
    }

    async fn acquire_token_interactive(&self, _scopes: &[String]) -> Result<String, String> {
        Err("interactive sign-in is not available".to_string())
    }
}
