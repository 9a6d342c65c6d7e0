use crm_client::auth::{Account, InteractiveFallbackTokenProvider, PreAuthorizedIdentity};
use crm_client::clients::ActorClient;
use crm_client::config::CrmConfig;
use crm_client::lifecycle::{setup_tracing, CrmSystem};
use crm_client::model::GetLeadsQuery;
use std::sync::Arc;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = CrmConfig::from_env().map_err(|e| e.to_string())?;

    // The interactive sign-in lives outside this binary; it only uses a token obtained elsewhere.
    let identity = match (std::env::var("CRM_ACCOUNT"), std::env::var("CRM_ACCESS_TOKEN")) {
        (Ok(username), Ok(token)) => PreAuthorizedIdentity::new(Account::new(username.clone(), username), token),
        _ => {
            warn!("CRM_ACCOUNT / CRM_ACCESS_TOKEN not set, running signed out");
            PreAuthorizedIdentity::signed_out()
        }
    };
    let tokens = Arc::new(InteractiveFallbackTokenProvider::new(
        Arc::new(identity),
        config.scopes.clone(),
    ));

    info!("Starting CRM client");
    let system = CrmSystem::new(&config, tokens);

    let span = tracing::info_span!("current_user");
    match system.services.users.get_current_user().instrument(span).await {
        Ok(user) => info!(
            user = user.username.as_deref().unwrap_or("-"),
            tenant_id = %user.tenant_id,
            "Signed in"
        ),
        Err(e) if e.is_precondition() => warn!(error = %e, "Not signed in"),
        Err(e) => error!(error = %e, "Could not load current user"),
    }

    let span = tracing::info_span!("lead_fetch");
    let query = GetLeadsQuery {
        page_size: Some(20),
        ..Default::default()
    };
    if let Err(e) = system.lead_client.fetch_leads(query).instrument(span).await {
        error!(error = %e, "Lead fetch failed");
    }

    // Failures are recorded in the store, not only returned.
    let state = system.lead_client.state().await.map_err(|e| e.to_string())?;
    info!(
        leads = state.items.len(),
        loading = state.loading,
        error = state.error.as_deref().unwrap_or("-"),
        "Lead store state"
    );
    for lead in &state.items {
        info!(id = %lead.id, name = %lead.name, status = lead.status.as_deref().unwrap_or("-"), "Lead");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
