use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use users_api::api;
use users_api::config::ServiceConfig;
use users_api::lifecycle::UserSystem;

fn app(system: &UserSystem) -> Router {
    api::router(system.user_client.clone(), &ServiceConfig::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn ids(users: &Value) -> Vec<u64> {
    users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn list_returns_seed_users() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), [1, 2, 3, 4]);
    assert_eq!(
        body[0],
        json!({"id": 1, "name": "Jan Kowalski", "age": 30, "city": "Warszawa", "deleted": false})
    );
}

#[tokio::test]
async fn get_single_user() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Anna Nowak");
    assert_eq!(body["city"], "Kraków");
}

#[tokio::test]
async fn missing_and_malformed_ids_are_404() {
    let system = UserSystem::default();
    let app = app(&system);

    for uri in ["/users/99", "/users/abc", "/users/-1"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"message": "User not found"}));
    }

    let (status, body) = send(&app, Method::DELETE, "/users/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "User not found"}));
}

#[tokio::test]
async fn create_returns_201_with_the_record() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "Ewa", "age": 41, "city": "Łódź", "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 5, "name": "Ewa", "age": 41, "city": "Łódź", "deleted": false})
    );

    let (_, body) = send(&app, Method::GET, "/users/5", None).await;
    assert_eq!(body["name"], "Ewa");
}

#[tokio::test]
async fn create_without_body_stores_an_empty_user() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(&app, Method::POST, "/users", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 5, "deleted": false}));
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let system = UserSystem::default();
    let app = app(&system);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/users/all", None).await;
    assert_eq!(ids(&body), [1, 2, 3, 4]);
}

#[tokio::test]
async fn delete_then_list_all() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(&app, Method::DELETE, "/users/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, active) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(ids(&active), [1, 3, 4]);

    let (status, all) = send(&app, Method::GET, "/users/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&all), [1, 2, 3, 4]);
    assert_eq!(all[1]["deleted"], true);

    let (status, _) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/users/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/users", Some(json!({"name": "Ewa"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 5);
}

#[tokio::test]
async fn put_and_patch_merge_fields() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(&app, Method::PUT, "/users/1", Some(json!({"city": "Poznań"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 1, "name": "Jan Kowalski", "age": 30, "city": "Poznań", "deleted": false})
    );

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/users/4",
        Some(json!({"age": null, "email": "maria@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 4,
            "name": "Maria Kowalczyk",
            "age": null,
            "city": "Gdańsk",
            "deleted": false,
            "email": "maria@example.com"
        })
    );

    let (status, body) = send(&app, Method::PATCH, "/users/42", Some(json!({"age": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "User not found"}));
}

#[tokio::test]
async fn reset_restores_seed() {
    let system = UserSystem::default();
    let app = app(&system);

    send(&app, Method::POST, "/users", Some(json!({"name": "Ewa"}))).await;
    send(&app, Method::DELETE, "/users/1", None).await;

    let (status, body) = send(&app, Method::POST, "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "REST API state reset"}));

    let (_, all) = send(&app, Method::GET, "/users/all", None).await;
    assert_eq!(ids(&all), [1, 2, 3, 4]);
    assert!(all.as_array().unwrap().iter().all(|u| u["deleted"] == false));
}

#[tokio::test]
async fn router_without_request_logging_serves_the_same_routes() {
    let system = UserSystem::default();
    let config = ServiceConfig {
        log_requests: false,
        ..ServiceConfig::default()
    };
    let app = api::router(system.user_client.clone(), &config);

    let (status, body) = send(&app, Method::GET, "/users/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Piotr Wiśniewski");
}

#[tokio::test]
async fn ids_with_trailing_garbage_use_the_leading_number() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(&app, Method::GET, "/users/3abc", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 3);

    let (status, _) = send(&app, Method::DELETE, "/users/2x", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn field_values_are_stored_as_supplied() {
    let system = UserSystem::default();
    let app = app(&system);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": "X", "age": "30", "city": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["age"], "30");

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"name": null, "age": 30.5, "city": ["Y"]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({"id": 6, "name": null, "age": 30.5, "city": ["Y"], "deleted": false})
    );

    let (status, body) = send(&app, Method::PATCH, "/users/1", Some(json!({"age": "31"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], "31");

    let (_, five) = send(&app, Method::GET, "/users/5", None).await;
    assert_eq!(five["age"], "30");
    let (_, six) = send(&app, Method::GET, "/users/6", None).await;
    assert_eq!(six["age"], 30.5);
    assert!(six.as_object().unwrap().contains_key("name"));
    let (_, one) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(one["age"], "31");
    assert_eq!(one["name"], "Jan Kowalski");
}

#[tokio::test]
async fn empty_json_body_counts_as_empty_object() {
    let system = UserSystem::default();
    let app = app(&system);

    let empty_json = |method: Method, uri: &str| {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::empty())
            .unwrap()
    };

    let response = app
        .clone()
        .oneshot(empty_json(Method::POST, "/users"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    for method in [Method::PUT, Method::PATCH] {
        let response = app
            .clone()
            .oneshot(empty_json(method, "/users/2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let (_, two) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(
        two,
        json!({"id": 2, "name": "Anna Nowak", "age": 25, "city": "Kraków", "deleted": false})
    );
}
