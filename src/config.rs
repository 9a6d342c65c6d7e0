//! Runtime configuration.
//!
//! Defaults point at the production backends. Every value can be overridden
//! through environment variables:
//!
//! | Variable               | Meaning                                   |
//! |------------------------|-------------------------------------------|
//! | `CRM_IDENTITY_API_URL` | Base URL of the identity service          |
//! | `CRM_LEADS_API_URL`    | Base URL of the leads service             |
//! | `CRM_API_SCOPES`       | Comma-separated token scopes              |
//! | `CRM_STORE_BUFFER`     | Mailbox size of each store actor          |
//! | `CRM_STALE_POLICY`     | `last-settled` or `latest-issued`         |
//! | `CRM_TENANT_ID`        | Tenant the stores are scoped to           |

use crate::error::ConfigError;
use crate::framework::StalePolicy;
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_IDENTITY_API_URL: &str = "https://as-identity-api-prod-eastus2.azurewebsites.net";
pub const DEFAULT_LEADS_API_URL: &str = "https://as-leads-api-prod-eastus2.azurewebsites.net";
pub const DEFAULT_SCOPE: &str = "User.Read";

const ENV_PREFIX: &str = "CRM_";

/// Configuration for [`CrmSystem`](crate::lifecycle::CrmSystem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    /// Base URL of the identity backend (users, tenants, roles).
    pub identity_api_url: String,
    /// Base URL of the leads backend (leads, lead activities).
    pub leads_api_url: String,
    /// Scopes requested for every access token. A comma-separated string is accepted.
    #[serde(deserialize_with = "scope_list")]
    pub scopes: Vec<String>,
    /// How many requests a store actor can queue.
    pub store_buffer: usize,
    /// How list responses that settle out of order are applied.
    pub stale_policy: StalePolicy,
    /// Tenant passed to tenant-scoped lead calls. `None` lets the backend use the token's tenant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            identity_api_url: DEFAULT_IDENTITY_API_URL.to_string(),
            leads_api_url: DEFAULT_LEADS_API_URL.to_string(),
            scopes: vec![DEFAULT_SCOPE.to_string()],
            store_buffer: 32,
            stale_policy: StalePolicy::default(),
            tenant_id: None,
        }
    }
}

impl CrmConfig {
    /// Defaults overlaid with `CRM_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(CrmConfig::default())).merge(Env::prefixed(ENV_PREFIX).map(
            |key| {
                if key.as_str() == "api_scopes" {
                    "scopes".into()
                } else {
                    key.as_str().into()
                }
            },
        ))
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Extracts and checks the configuration from any figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let mut config: CrmConfig = figment.extract().map_err(Box::new)?;

        config.identity_api_url = normalize_base_url(&config.identity_api_url);
        config.leads_api_url = normalize_base_url(&config.leads_api_url);

        config.scopes = config
            .scopes
            .iter()
            .map(|scope| scope.trim())
            .filter(|scope| !scope.is_empty())
            .map(String::from)
            .collect();
        if config.scopes.is_empty() {
            return Err(invalid("CRM_API_SCOPES", "at least one scope is required"));
        }
        if config.store_buffer == 0 {
            return Err(invalid("CRM_STORE_BUFFER", "must be greater than zero"));
        }

        config.tenant_id = config
            .tenant_id
            .map(|raw| raw.trim().to_string())
            .filter(|id| !id.is_empty());

        Ok(config)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScopeList {
    List(Vec<String>),
    Joined(String),
}

fn scope_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ScopeList::deserialize(deserializer)? {
        ScopeList::List(scopes) => scopes,
        ScopeList::Joined(raw) => raw.split(',').map(String::from).collect(),
    })
}

// Paths always start with '/', so a trailing slash would double up.
fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_when_environment_is_empty() {
        Jail::expect_with(|_jail| {
            let config = CrmConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config, CrmConfig::default());
            assert_eq!(config.scopes, vec!["User.Read".to_string()]);
            assert_eq!(config.stale_policy, StalePolicy::LastSettledWins);
            assert_eq!(config.tenant_id, None);
            Ok(())
        });
    }

    #[test]
    fn test_overrides() {
        Jail::expect_with(|jail| {
            jail.set_env("CRM_IDENTITY_API_URL", "http://localhost:5001/");
            jail.set_env("CRM_LEADS_API_URL", "http://localhost:5002");
            jail.set_env("CRM_API_SCOPES", "api://crm/.default, User.Read,");
            jail.set_env("CRM_STORE_BUFFER", "8");
            jail.set_env("CRM_STALE_POLICY", "latest-issued");
            jail.set_env("CRM_TENANT_ID", "t1");

            let config = CrmConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.identity_api_url, "http://localhost:5001");
            assert_eq!(config.leads_api_url, "http://localhost:5002");
            assert_eq!(config.scopes, vec!["api://crm/.default", "User.Read"]);
            assert_eq!(config.store_buffer, 8);
            assert_eq!(config.stale_policy, StalePolicy::LatestIssuedWins);
            assert_eq!(config.tenant_id.as_deref(), Some("t1"));
            Ok(())
        });
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("CRM_ACCOUNT", "ada@contoso.com");
            jail.set_env("CRM_STORE_BUFFER", "4");

            let config = CrmConfig::from_env().map_err(|e| e.to_string())?;
            assert_eq!(config.store_buffer, 4);
            Ok(())
        });
    }

    #[test]
    fn test_zero_buffer_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CRM_STORE_BUFFER", "0");

            let err = CrmConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CRM_STORE_BUFFER"));
            Ok(())
        });
    }

    #[test]
    fn test_unknown_stale_policy_is_a_load_error() {
        Jail::expect_with(|jail| {
            jail.set_env("CRM_STALE_POLICY", "newest");

            let err = CrmConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::Load(_)), "got {err:?}");
            assert!(err.to_string().contains("newest"), "got {err}");
            Ok(())
        });
    }

    #[test]
    fn test_blank_scopes_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CRM_API_SCOPES", " , ");

            let err = CrmConfig::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CRM_API_SCOPES"));
            Ok(())
        });
    }

    #[test]
    fn test_scopes_accept_a_list_from_other_providers() {
        let figment = Figment::from(Serialized::defaults(CrmConfig::default()))
            .merge(Serialized::default("scopes", vec!["a", " b "]));

        let config = CrmConfig::from_figment(figment).unwrap();
        assert_eq!(config.scopes, vec!["a", "b"]);
    }
}
