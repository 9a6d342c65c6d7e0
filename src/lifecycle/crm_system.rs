use crate::activity_actor::ActivityBackend;
use crate::auth::AccessTokenProvider;
use crate::clients::{ActivityClient, LeadClient};
use crate::config::CrmConfig;
use crate::lead_actor::LeadBackend;
use crate::services::ApiServices;
use std::sync::Arc;
use tracing::{error, info};

/// The application-level handle: typed services plus the running stores.
///
/// Created once at start-up and passed to whatever needs it. There is no
/// global instance.
///
/// # Example
///
/// ```ignore
/// let system = CrmSystem::new(&CrmConfig::default(), tokens);
///
/// let me = system.services.users.get_current_user().await?;
/// system.lead_client.fetch_leads(GetLeadsQuery::default()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CrmSystem {
    /// Direct access to every REST operation, bypassing the stores.
    pub services: ApiServices,

    /// Client for the lead store
    pub lead_client: LeadClient,

    /// Client for the lead-activity store
    pub activity_client: ActivityClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CrmSystem {
    /// Builds the services and spawns one store actor per cached collection.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &CrmConfig, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        let services = ApiServices::new(config, tokens);

        // 1. Create actors (no backend yet)
        let (lead_actor, lead_client) = crate::lead_actor::new(config.store_buffer, config.stale_policy);
        let (activity_actor, activity_client) =
            crate::activity_actor::new(config.store_buffer, config.stale_policy);

        // 2. Start actors with their backends injected
        let lead_backend = LeadBackend::new(services.leads.clone(), config.tenant_id.clone());
        let activity_backend = ActivityBackend::new(services.lead_activities.clone(), config.tenant_id.clone());

        let lead_handle = tokio::spawn(lead_actor.run(Arc::new(lead_backend)));
        let activity_handle = tokio::spawn(activity_actor.run(Arc::new(activity_backend)));

        info!(
            identity_api = %config.identity_api_url,
            leads_api = %config.leads_api_url,
            "CRM system started"
        );

        Self {
            services,
            lead_client,
            activity_client,
            handles: vec![lead_handle, activity_handle],
        }
    }

    /// Gracefully shuts down the stores.
    ///
    /// Drops the clients, then waits for every actor to drain its in-flight
    /// calls and exit. Returns an error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.lead_client);
        drop(self.activity_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
