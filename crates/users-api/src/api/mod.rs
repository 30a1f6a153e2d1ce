//! # HTTP Transport
//!
//! Maps verbs and paths onto [`UserClient`] calls and renders the results as JSON.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | GET | `/users` | 200, active users | |
//! | GET | `/users/all` | 200, all users | |
//! | GET | `/users/{id}` | 200, user | 404 `{"message":"User not found"}` |
//! | POST | `/users` | 201, created user | |
//! | PUT | `/users/{id}` | 200, merged user | 404 |
//! | PATCH | `/users/{id}` | 200, merged user | 404 |
//! | DELETE | `/users/{id}` | 204 | 404 |
//! | POST | `/reset` | 200 `{"message":"REST API state reset"}` | |

pub mod error;
pub mod handlers;
pub mod logging;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::clients::UserClient;
use crate::config::ServiceConfig;
use logging::RequestLogging;

pub use error::{ApiError, MessageBody};

/// Builds the service router around a store client.
pub fn router(client: UserClient, config: &ServiceConfig) -> Router {
    let router = Router::new()
        .route(
            "/users",
            get(handlers::list_active).post(handlers::create_user),
        )
        .route("/users/all", get(handlers::list_all))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::replace_user)
                .patch(handlers::patch_user)
                .delete(handlers::delete_user),
        )
        .route("/reset", post(handlers::reset))
        .with_state(client);

    if config.log_requests {
        let settings = RequestLogging {
            bodies: config.log_bodies,
        };
        router.layer(from_fn_with_state(settings, logging::request_logger))
    } else {
        router
    }
}
