//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::json;

use crate::{
    AppState, CorsConfig,
    auth::{auth_guard, get_profile, post_log_in, register_user},
    category::{create_category_endpoint, delete_category_endpoint, list_categories_endpoint},
    endpoints, logging_middleware,
    statistics::get_statistics_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route except [endpoints::ROOT], [endpoints::REGISTER] and
/// [endpoints::LOG_IN] requires a bearer token.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_health_check))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in));

    let protected_routes = Router::new()
        .route(endpoints::PROFILE, get(get_profile))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION_STATISTICS,
            get(get_statistics_endpoint),
        )
        .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(endpoints::CATEGORY, delete(delete_category_endpoint))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors.layer())
        .with_state(state)
}

async fn get_health_check() -> &'static str {
    "API is running..."
}

async fn get_404_not_found(uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Not found - {}", uri.path()) })),
    )
        .into_response()
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        CorsConfig, endpoints,
        endpoints::format_endpoint,
        test_utils::{TEST_PASSWORD, assert_message, get_test_app_state},
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let app = build_router(get_test_app_state(), &CorsConfig::default());

        TestServer::new(app).expect("Could not create test server.")
    }

    async fn register_and_log_in(server: &TestServer, email: &str) -> String {
        server
            .post(endpoints::REGISTER)
            .json(&json!({ "name": "Alice", "email": email, "password": TEST_PASSWORD }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": email, "password": TEST_PASSWORD }))
            .await;
        response.assert_status_ok();

        response.json::<Value>()["token"]
            .as_str()
            .expect("log-in response should contain a token")
            .to_owned()
    }

    #[tokio::test]
    async fn root_reports_api_is_running() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        response.assert_text("API is running...");
    }

    #[tokio::test]
    async fn unknown_path_returns_json_404() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_message(&response, "Not found - /api/nope");
    }

    #[tokio::test]
    async fn protected_routes_require_token() {
        let server = get_test_server();

        for path in [
            endpoints::PROFILE,
            endpoints::TRANSACTIONS,
            endpoints::TRANSACTION_STATISTICS,
            endpoints::CATEGORIES,
        ] {
            let response = server.get(path).await;

            response.assert_status(StatusCode::UNAUTHORIZED);
            assert_message(&response, "Not authorized, token failed");
        }
    }

    #[tokio::test]
    async fn dashboard_flow() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "alice@example.com").await;

        for body in [
            json!({ "type": "income", "category": "Salary", "amount": 1000, "date": "2024-02-01" }),
            json!({ "type": "expense", "category": "Rent", "amount": 400, "date": "2024-02-03" }),
            json!({ "type": "expense", "category": "Food", "amount": 30, "date": "2024-03-05" }),
        ] {
            server
                .post(endpoints::TRANSACTIONS)
                .authorization_bearer(&token)
                .json(&body)
                .await
                .assert_status(StatusCode::CREATED);
        }

        let february = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .add_query_param("month", 2)
            .add_query_param("year", 2024)
            .await;
        february.assert_status_ok();
        let february = february.json::<Value>();
        let february = february.as_array().unwrap();
        assert_eq!(february.len(), 2);
        assert_eq!(february[0]["category"], "Rent");

        let stats = server
            .get(endpoints::TRANSACTION_STATISTICS)
            .authorization_bearer(&token)
            .await;
        stats.assert_status_ok();
        let stats = stats.json::<Value>();
        assert_eq!(stats["income"], 1000.0);
        assert_eq!(stats["expense"], 430.0);
        assert_eq!(stats["balance"], 570.0);
        assert_eq!(stats["categoryStats"][0]["_id"]["category"], "Salary");

        let profile = server
            .get(endpoints::PROFILE)
            .authorization_bearer(&token)
            .await;
        profile.assert_status_ok();
        assert_eq!(profile.json::<Value>()["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn users_cannot_delete_each_others_transactions() {
        let server = get_test_server();
        let alice = register_and_log_in(&server, "alice@example.com").await;
        let bob = register_and_log_in(&server, "bob@example.com").await;
        let transaction = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&alice)
            .json(&json!({ "type": "expense", "category": "Rent", "amount": 400 }))
            .await
            .json::<Value>();
        let path = format_endpoint(
            endpoints::TRANSACTION,
            transaction["_id"].as_i64().unwrap(),
        );

        let response = server.delete(&path).authorization_bearer(&bob).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_message(&response, "User not authorized");

        let remaining = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&alice)
            .await
            .json::<Value>();
        assert_eq!(remaining.as_array().unwrap().len(), 1);

        server
            .delete(&path)
            .authorization_bearer(&alice)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn category_lifecycle() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "alice@example.com").await;

        let category = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .json(&json!({ "name": "Pets", "type": "expense" }))
            .await;
        category.assert_status(StatusCode::CREATED);
        let id = category.json::<Value>()["_id"].as_i64().unwrap();

        let categories = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .await
            .json::<Value>();
        assert!(
            categories
                .as_array()
                .unwrap()
                .iter()
                .any(|category| category["name"] == "Pets")
        );

        let response = server
            .delete(&format_endpoint(endpoints::CATEGORY, id))
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_message(&response, "Category removed");
    }
}
