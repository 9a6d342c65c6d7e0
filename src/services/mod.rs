//! Typed facades over the two REST backends.
//!
//! Each service is a straight pass-through to [`ApiClient`]: path
//! interpolation, optional query parameters, no validation and no reshaping
//! of the response. Errors propagate unchanged.

mod lead_activities;
mod leads;
mod query;
mod roles;
mod tenants;
mod users;

pub use lead_activities::LeadActivitiesService;
pub use leads::LeadsService;
pub use roles::{RolesService, UserRolesService};
pub use tenants::TenantsService;
pub use users::UsersService;

use crate::auth::AccessTokenProvider;
use crate::config::CrmConfig;
use crate::http::ApiClient;
use std::sync::Arc;

/// Every service of both backends, sharing one connection pool and one token provider.
#[derive(Clone)]
pub struct ApiServices {
    // Identity backend
    pub roles: RolesService,
    pub tenants: TenantsService,
    pub users: UsersService,
    pub user_roles: UserRolesService,

    // Leads backend
    pub leads: LeadsService,
    pub lead_activities: LeadActivitiesService,
}

impl ApiServices {
    pub fn new(config: &CrmConfig, tokens: Arc<dyn AccessTokenProvider>) -> Self {
        let http = reqwest::Client::new();

        let identity = ApiClient::with_http_client(http.clone(), &config.identity_api_url, tokens.clone());
        let leads = ApiClient::with_http_client(http, &config.leads_api_url, tokens);

        Self {
            roles: RolesService::new(identity.clone()),
            tenants: TenantsService::new(identity.clone()),
            users: UsersService::new(identity.clone()),
            user_roles: UserRolesService::new(identity),
            leads: LeadsService::new(leads.clone()),
            lead_activities: LeadActivitiesService::new(leads),
        }
    }
}
