//! HTTP handler functions for the voter reach API.

use actix_web::{HttpRequest, HttpResponse, web};
use voter_reach_database::queries;
use voter_reach_database_models::MemberRow;
use voter_reach_engagement::{EngagementError, scope};
use voter_reach_engagement_models::MemberIdentity;
use voter_reach_location_models::Designation;
use voter_reach_server_models::{
    ApiDashboardResponse, ApiHealth, ApiSubordinate, ApiSubordinatesResponse,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Extracts the authenticated member id forwarded by the auth layer in
/// the `X-Member-Id` header.
fn member_id(req: &HttpRequest) -> Option<i64> {
    req.headers()
        .get("X-Member-Id")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn error_body(message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "message": message,
    })
}

/// Loads the caller's member record, or produces the error response for
/// a missing identity or unknown member.
async fn load_member(state: &web::Data<AppState>, req: &HttpRequest) -> Result<MemberRow, HttpResponse> {
    let Some(id) = member_id(req) else {
        return Err(HttpResponse::Unauthorized().json(error_body("Missing member identity")));
    };

    match queries::find_member_by_id(state.db.as_ref(), id).await {
        Ok(Some(row)) => Ok(row),
        Ok(None) => Err(HttpResponse::NotFound().json(error_body("Member not found"))),
        Err(e) => {
            log::error!("Failed to load member {id}: {e}");
            Err(HttpResponse::InternalServerError().json(error_body("Failed to load member record")))
        }
    }
}

fn engagement_error_response(e: &EngagementError) -> HttpResponse {
    match e {
        EngagementError::MissingAssignment { .. } => {
            HttpResponse::BadRequest().json(error_body(&e.to_string()))
        }
        EngagementError::Forbidden => HttpResponse::Forbidden().json(error_body(&e.to_string())),
        EngagementError::Database(err) => {
            log::error!("Dashboard query failed: {err}");
            HttpResponse::InternalServerError().json(error_body("Failed to load dashboard data"))
        }
    }
}

/// `GET /api/dashboard/data`
///
/// Assembles the role-scoped engagement rollup for the caller.
pub async fn dashboard_data(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let row = match load_member(&state, &req).await {
        Ok(row) => row,
        Err(response) => return response,
    };
    let identity = MemberIdentity::from(&row);

    match state.assembler.assemble(state.db.as_ref(), &identity).await {
        Ok(view) => HttpResponse::Ok().json(ApiDashboardResponse::from_view(&identity, view)),
        Err(e) => engagement_error_response(&e),
    }
}

/// `GET /api/dashboard/subordinates`
///
/// Lists accounts one designation tier below the caller, confined to
/// the caller's assigned subtree.
pub async fn subordinates(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let row = match load_member(&state, &req).await {
        Ok(row) => row,
        Err(response) => return response,
    };
    let identity = MemberIdentity::from(&row);

    // The scope gate also governs who may list subordinates: the tier
    // below the caller is the coordinator tier for their child level.
    let scope = match scope::resolve(&identity) {
        Ok(scope) => scope,
        Err(e) => return engagement_error_response(&e),
    };
    let designation = Designation::coordinator_for(scope.child_level);

    match queries::find_subordinates(state.db.as_ref(), designation, &scope.root).await {
        Ok(rows) => HttpResponse::Ok().json(ApiSubordinatesResponse {
            success: true,
            subordinates: rows.into_iter().map(ApiSubordinate::from).collect(),
        }),
        Err(e) => {
            log::error!("Failed to list subordinates: {e}");
            HttpResponse::InternalServerError().json(error_body("Failed to list subordinates"))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[test]
    fn parses_member_id_header() {
        let req = TestRequest::default()
            .insert_header(("X-Member-Id", "42"))
            .to_http_request();
        assert_eq!(member_id(&req), Some(42));
    }

    #[test]
    fn trims_member_id_header() {
        let req = TestRequest::default()
            .insert_header(("X-Member-Id", " 7 "))
            .to_http_request();
        assert_eq!(member_id(&req), Some(7));
    }

    #[test]
    fn missing_header_is_none() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(member_id(&req), None);
    }

    #[test]
    fn malformed_header_is_none() {
        let req = TestRequest::default()
            .insert_header(("X-Member-Id", "not-a-number"))
            .to_http_request();
        assert_eq!(member_id(&req), None);
    }
}
