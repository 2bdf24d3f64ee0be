// API layer module (adapters for controllers)
// Routers for the three apps, their shared layers and fallbacks

pub mod errors;
pub mod extractors;
pub mod forms;
pub mod handlers;
pub mod middleware;

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::FromRef,
    http::{header, HeaderValue, StatusCode},
    middleware::{from_fn_with_state, map_response},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{Permission, TokenVerifier};
use crate::infrastructure::db::DbPool;
use errors::ApiError;
use handlers::{artists, drinks, home, shows, trivia, venues};
use middleware::auth::{require_permission, PermissionGate};

/// Shared state handed to every router
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(db: DbPool, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { db, verifier }
    }

    fn gate(&self, permission: Permission) -> PermissionGate {
        PermissionGate::new(self.verifier.clone(), permission)
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

const ALLOW_HEADERS: &str = "Content-Type, Authorization";
const TRIVIA_METHODS: &str = "GET, POST, DELETE, OPTIONS";
const COFFEE_METHODS: &str = "GET, POST, PATCH, DELETE";

/// Venues, artists and shows
pub fn listings_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/", get(home::index))
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route("/venues/create", post(venues::create_venue))
        .route(
            "/venues/:id",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route("/venues/:id/edit", post(venues::edit_venue))
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route("/artists/create", post(artists::create_artist))
        .route(
            "/artists/:id",
            get(artists::show_artist).delete(artists::delete_artist),
        )
        .route("/artists/:id/edit", post(artists::edit_artist))
        .route("/shows", get(shows::list_shows))
        .route("/shows/create", post(shows::create_show))
        .with_state(state);

    with_common_layers(app)
}

/// Trivia questions, categories and quizzes
pub fn trivia_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/categories", get(trivia::get_categories))
        .route(
            "/categories/:id/questions",
            get(trivia::get_category_questions),
        )
        .route(
            "/questions",
            get(trivia::get_questions).post(trivia::create_question),
        )
        .route("/questions/search", post(trivia::search_questions))
        .route("/questions/:id", delete(trivia::delete_question))
        .route("/quizzes", post(trivia::next_quiz_question))
        .with_state(state);

    with_cors(with_common_layers(app), TRIVIA_METHODS)
}

/// Coffee shop menu; everything but `GET /drinks` needs a permission
pub fn coffee_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/drinks", get(drinks::get_drinks))
        .route(
            "/drinks",
            post(drinks::create_drink).route_layer(from_fn_with_state(
                state.gate(Permission::PostDrinks),
                require_permission,
            )),
        )
        .route(
            "/drinks-detail",
            get(drinks::get_drinks_detail).route_layer(from_fn_with_state(
                state.gate(Permission::GetDrinksDetail),
                require_permission,
            )),
        )
        .route(
            "/drinks/:id",
            patch(drinks::update_drink).route_layer(from_fn_with_state(
                state.gate(Permission::PatchDrinks),
                require_permission,
            )),
        )
        .route(
            "/drinks/:id",
            delete(drinks::delete_drink).route_layer(from_fn_with_state(
                state.gate(Permission::DeleteDrinks),
                require_permission,
            )),
        )
        .with_state(state);

    with_cors(with_common_layers(app), COFFEE_METHODS)
}

/// 404 fallback, 405 rewrite, panic catcher and request tracing
fn with_common_layers(app: Router) -> Router {
    app.fallback(not_found)
        .layer(map_response(method_not_allowed))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

fn with_cors(app: Router, methods: &'static str) -> Router {
    app.layer(CorsLayer::new().allow_origin(AnyOrigin))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(methods),
        ))
}

async fn not_found() -> ApiError {
    ApiError::not_found("no route")
}

async fn method_not_allowed(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        ApiError::MethodNotAllowed.into_response()
    } else {
        response
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(detail).into_response()
}
