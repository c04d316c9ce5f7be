use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::api::auth::BearerAuth;
use crate::coordinators::{AdminCoordinator, AuthCoordinator};
use crate::errors::AdminError;
use crate::types::dto::admin::{AssignRoleRequest, AssignRoleResponse, OverviewResponse};
use crate::types::internal::auth::Role;

/// Admin dashboard and role management API endpoints
pub struct AdminApi {
    auth: Arc<AuthCoordinator>,
    admin_coordinator: Arc<AdminCoordinator>,
}

impl AdminApi {
    /// Create a new AdminApi with the given coordinators
    pub fn new(auth: Arc<AuthCoordinator>, admin_coordinator: Arc<AdminCoordinator>) -> Self {
        Self {
            auth,
            admin_coordinator,
        }
    }
}

/// API tags for admin endpoints
#[derive(Tags)]
enum AdminTags {
    /// Admin dashboard and role management
    Admin,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// Dashboard counts: users, items and items reported in the last 7 days
    #[oai(path = "/overview", method = "get", tag = "AdminTags::Admin")]
    async fn overview(&self, auth: BearerAuth) -> Result<Json<OverviewResponse>, AdminError> {
        let session = self.auth.authenticate(&auth.0.token)?;
        let overview = self.admin_coordinator.overview(&session).await?;

        Ok(Json(OverviewResponse {
            total_users: overview.total_users,
            total_items: overview.total_items,
            recent_items: overview.recent_items,
        }))
    }

    /// Change another user's role
    ///
    /// Admins cannot change their own role.
    #[oai(path = "/users/role", method = "post", tag = "AdminTags::Admin")]
    async fn assign_role(
        &self,
        auth: BearerAuth,
        body: Json<AssignRoleRequest>,
    ) -> Result<Json<AssignRoleResponse>, AdminError> {
        let role = body.role.parse::<Role>().map_err(AdminError::invalid_role)?;
        let session = self.auth.authenticate(&auth.0.token)?;

        let user = self
            .admin_coordinator
            .assign_role(&session, &body.target_user_id, role)
            .await?;

        Ok(Json(AssignRoleResponse {
            success: true,
            message: format!("{} is now {}", user.email, user.role),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_app;
    use poem_openapi::auth::Bearer;

    struct Fixture {
        api: AdminApi,
        admin: BearerAuth,
        member: BearerAuth,
        member_id: String,
    }

    async fn setup() -> Fixture {
        let app_data = setup_test_app().await;
        let auth = Arc::new(AuthCoordinator::new(app_data.clone()));
        let admin_coordinator = Arc::new(AdminCoordinator::new(app_data.clone()));

        auth.register("admin@example.com", "secret1", None).await.unwrap();
        admin_coordinator
            .grant_admin_by_email("admin@example.com")
            .await
            .unwrap();
        // Log in after the grant so the claims carry the admin role
        let admin_tokens = auth.login("admin@example.com", "secret1").await.unwrap();
        let member_tokens = auth.register("member@example.com", "secret1", None).await.unwrap();
        let member_id = auth.authenticate(&member_tokens.access_token).unwrap().user_id;

        Fixture {
            api: AdminApi::new(auth, admin_coordinator),
            admin: BearerAuth(Bearer {
                token: admin_tokens.access_token,
            }),
            member: BearerAuth(Bearer {
                token: member_tokens.access_token,
            }),
            member_id,
        }
    }

    #[tokio::test]
    async fn test_overview_for_admin() {
        let fixture = setup().await;

        let overview = fixture.api.overview(fixture.admin).await.unwrap();

        assert_eq!(overview.total_users, 2);
        assert_eq!(overview.total_items, 0);
        assert_eq!(overview.recent_items, 0);
    }

    #[tokio::test]
    async fn test_overview_forbidden_for_member() {
        let fixture = setup().await;

        let result = fixture.api.overview(fixture.member).await;

        match result {
            Err(AdminError::AdminRequired(json)) => assert_eq!(json.0.status_code, 403),
            other => panic!("Expected AdminRequired, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_assign_role_promotes_member() {
        let fixture = setup().await;

        let response = fixture
            .api
            .assign_role(
                fixture.admin,
                Json(AssignRoleRequest {
                    target_user_id: fixture.member_id.clone(),
                    role: "admin".to_string(),
                }),
            )
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message, "member@example.com is now admin");
    }

    #[tokio::test]
    async fn test_assign_role_rejects_unknown_role() {
        let fixture = setup().await;

        let result = fixture
            .api
            .assign_role(
                fixture.admin,
                Json(AssignRoleRequest {
                    target_user_id: fixture.member_id.clone(),
                    role: "owner".to_string(),
                }),
            )
            .await;

        assert!(matches!(result, Err(AdminError::InvalidRole(_))));
    }
}
