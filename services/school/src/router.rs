use axum::{
    Extension, Router,
    body::Body,
    http::Request,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use campus_core::middleware::{X_REQUEST_ID, propagate_request_id_layer, request_id_layer};
use campus_domain::role::Role;

use crate::handlers::{
    account::{
        delete_account, search_accounts, search_students, search_teachers, signin, signup,
        update_details,
    },
    class::{assign_class, create_class, delete_class, search_classes, update_class},
    health::{healthz, readyz},
    report::{class_analytics, financial_data, gender_count},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest(
            &format!("/{}", Role::Admin.namespace()),
            account_routes(Role::Admin).merge(admin_routes()),
        )
        .nest(
            &format!("/{}", Role::Teacher.namespace()),
            account_routes(Role::Teacher),
        )
        .nest(
            &format!("/{}", Role::Student.namespace()),
            account_routes(Role::Student),
        );

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id
        )
    });

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace)
                .layer(propagate_request_id_layer()),
        )
        .with_state(state)
}

/// Routes every role namespace offers. Handlers read the namespace's role
/// from the request extensions.
fn account_routes(role: Role) -> Router<AppState> {
    let name = role.as_str();
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/update-details", put(update_details))
        .route(&format!("/search-{name}"), get(search_accounts))
        .route(&format!("/delete-{name}/{{user_name}}"), delete(delete_account))
        .layer(Extension(role))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        // Classes
        .route("/create-class", post(create_class))
        .route("/update-class", put(update_class))
        .route("/delete-class/{class_name}", delete(delete_class))
        .route("/search-class", get(search_classes))
        .route("/assign-class", put(assign_class))
        // Directory
        .route("/search-teacher", get(search_teachers))
        .route("/search-student", get(search_students))
        // Reports
        .route("/class-analytics", get(class_analytics))
        .route("/gender-count", get(gender_count))
        .route("/financial-data", get(financial_data))
}
