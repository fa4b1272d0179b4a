//! Admin back-office user list with filter + page slicing.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use corium_commerce::AdminUser;

use crate::middleware::RequestId;

use super::super::{map_commerce_error, ApiError, ApiResponse, AppState, ResponseMeta};
use super::{slice_page, text_matches, Page};

#[derive(Debug, Deserialize)]
pub(in crate::api) struct AdminUserQuery {
    /// Substring match against user name and email.
    pub q: Option<String>,
    /// Exact role, e.g. `admin` or `editor`.
    pub role: Option<String>,
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub(in crate::api) async fn list_users(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AdminUserQuery>,
) -> Result<Json<ApiResponse<Page<AdminUser>>>, ApiError> {
    let users = state
        .client
        .list_users()
        .await
        .map_err(|e| map_commerce_error(req_id.0.clone(), &e))?;

    let filtered: Vec<AdminUser> = users
        .into_iter()
        .filter(|u| matches_filters(u, &query))
        .collect();

    Ok(Json(ApiResponse {
        data: slice_page(filtered, query.page, query.per_page),
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn matches_filters(user: &AdminUser, query: &AdminUserQuery) -> bool {
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        if !text_matches(q, &[Some(user.name.as_str()), Some(user.email.as_str())]) {
            return false;
        }
    }

    if let Some(role) = query.role.as_deref().filter(|r| !r.is_empty()) {
        if user.role != role {
            return false;
        }
    }

    if let Some(active) = query.active {
        if user.active != active {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, role: &str, active: bool) -> AdminUser {
        AdminUser {
            id: name.to_lowercase(),
            name: name.to_string(),
            email: format!("{}@corium.example.com", name.to_lowercase()),
            role: role.to_string(),
            active,
            created_at: None,
        }
    }

    fn default_query() -> AdminUserQuery {
        AdminUserQuery {
            q: None,
            role: None,
            active: None,
            page: None,
            per_page: None,
        }
    }

    #[test]
    fn q_matches_name_and_email() {
        let u = user("Marta", "editor", true);
        let mut query = default_query();
        query.q = Some("marta".to_string());
        assert!(matches_filters(&u, &query));
        query.q = Some("corium.example".to_string());
        assert!(matches_filters(&u, &query));
        query.q = Some("pedro".to_string());
        assert!(!matches_filters(&u, &query));
    }

    #[test]
    fn role_and_active_filters_compose() {
        let u = user("Marta", "editor", false);
        let mut query = default_query();
        query.role = Some("editor".to_string());
        query.active = Some(false);
        assert!(matches_filters(&u, &query));
        query.active = Some(true);
        assert!(!matches_filters(&u, &query));
        query.active = Some(false);
        query.role = Some("admin".to_string());
        assert!(!matches_filters(&u, &query));
    }
}
