use serde::{Deserialize, Serialize};

/// A call, meeting or note logged against a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadActivityDto {
    pub id: String,
    pub lead_id: String,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub activity_date: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    pub created_date: String,
}

/// Body of `POST /api/LeadActivities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadActivityCommand {
    pub activity: LeadActivityDto,
    /// Also refresh the parent lead's last-activity summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_lead_summary: Option<bool>,
}

/// Body of `PUT /api/LeadActivities/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadActivityCommand {
    pub activity: LeadActivityDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_lead_summary: Option<bool>,
}

/// Filters for `GET /api/LeadActivities`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GetLeadActivitiesQuery {
    #[serde(rename = "TenantId", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(rename = "LeadId", skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(rename = "ActivityType", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<String>,
    #[serde(rename = "PageNumber", skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(rename = "PageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}
