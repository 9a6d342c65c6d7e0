use crate::error::Result;
use serde::Serialize;
use std::borrow::Cow;

/// Percent-encodes one path segment, so an id can't add segments or start a query.
pub(crate) fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

/// Appends `query` to `path` as a form-urlencoded string.
///
/// Fields that serialize to nothing (`None` with `skip_serializing_if`) are
/// left out, and an empty query leaves the path bare with no `?`.
pub(crate) fn with_query<Q: Serialize + ?Sized>(path: &str, query: &Q) -> Result<String> {
    let encoded = serde_urlencoded::to_string(query)?;
    if encoded.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{path}?{encoded}"))
    }
}

#[derive(Serialize)]
struct TenantScope<'a> {
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    tenant_id: Option<&'a str>,
}

/// `path` with an optional `?tenantId=` suffix, as used by the by-id endpoints.
pub(crate) fn tenant_scoped(path: &str, tenant_id: Option<&str>) -> Result<String> {
    with_query(path, &TenantScope { tenant_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GetLeadsQuery;

    #[test]
    fn test_only_supplied_parameters_are_sent() {
        let query = GetLeadsQuery {
            tenant_id: Some("t1".into()),
            page_size: Some(20),
            ..Default::default()
        };
        assert_eq!(
            with_query("/api/Leads", &query).unwrap(),
            "/api/Leads?TenantId=t1&PageSize=20"
        );
    }

    #[test]
    fn test_empty_query_leaves_bare_path() {
        assert_eq!(
            with_query("/api/Leads", &GetLeadsQuery::default()).unwrap(),
            "/api/Leads"
        );
    }

    #[test]
    fn test_all_parameters_in_wire_order() {
        let query = GetLeadsQuery {
            tenant_id: Some("t1".into()),
            name: Some("Acme Corp".into()),
            status: Some("new".into()),
            page_number: Some(2),
            page_size: Some(50),
            include_deleted: Some(false),
        };
        assert_eq!(
            with_query("/api/Leads", &query).unwrap(),
            "/api/Leads?TenantId=t1&Name=Acme+Corp&Status=new&PageNumber=2&PageSize=50&IncludeDeleted=false"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        assert_eq!(segment("43"), "43");
        assert_eq!(segment("a/b?c#d"), "a%2Fb%3Fc%23d");
        assert_eq!(segment("Ada Lovelace"), "Ada%20Lovelace");
    }

    #[test]
    fn test_tenant_scope() {
        assert_eq!(tenant_scoped("/api/Leads/1", None).unwrap(), "/api/Leads/1");
        assert_eq!(
            tenant_scoped("/api/Leads/1", Some("t9")).unwrap(),
            "/api/Leads/1?tenantId=t9"
        );
    }
}
