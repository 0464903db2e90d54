use anyhow::Result;
use std::time::Duration;

use crate::catalog::{Catalog, ContentItem, Mood};
use crate::session::{
    Phase, ProfileUpdate, TransitionError, UserProfile, VisitEvent, VisitToken,
};

use axum_extra::extract::cookie::CookieJar;
use tower_http::services::ServeDir;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{response, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::session::{Session, COOKIE_SESSION_TOKEN_KEY};
#[cfg(feature = "slowdown")]
use super::slowdown_request;
use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub session_token: Option<String>,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
struct LoginSuccessResponse {
    token: String,
}

#[derive(Serialize)]
struct SessionView {
    email: String,
    phase: Phase,
    profile: UserProfile,
}

#[derive(Serialize)]
struct RecommendationsView {
    greeting: String,
    mood: Mood,
    items: Vec<ContentItem>,
}

fn recommendations_view(catalog: &Catalog, profile: &UserProfile) -> RecommendationsView {
    RecommendationsView {
        greeting: format!("Hi {}, here's what we recommend for you", profile.name),
        mood: profile.mood,
        items: catalog.recommendations(profile.mood).to_vec(),
    }
}

fn transition_error_response(err: TransitionError) -> Response {
    match err {
        TransitionError::IncompleteProfile(problems) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "errors": problems })),
        )
            .into_response(),
        TransitionError::NotCollectingInput | TransitionError::NotShowingRecommendations => {
            (StatusCode::CONFLICT, err.to_string()).into_response()
        }
        TransitionError::NotAuthenticated => StatusCode::FORBIDDEN.into_response(),
        TransitionError::EmptyCredentials => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
    }
}

async fn home(session: Option<Session>, State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: env!("GIT_HASH").to_owned(),
        session_token: session.map(|s| s.token),
    };
    Json(stats)
}

async fn login(
    State(visit_store): State<GuardedVisitStore>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Response {
    // Checked before touching the store so a rejected login leaves no
    // empty visit behind
    if body.email.is_empty() || body.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            TransitionError::EmptyCredentials.to_string(),
        )
            .into_response();
    }

    let mut visit_store = visit_store.lock().unwrap();

    // Re-use the caller's visit when the cookie still names one, so form
    // fields entered before a sign-out survive the next login
    let token = jar
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(|cookie| VisitToken(cookie.value().to_string()))
        .filter(|token| visit_store.contains(token))
        .unwrap_or_else(|| visit_store.begin());

    let machine = visit_store
        .get_mut(&token)
        .expect("Visit was just created or checked.");

    match machine.apply(VisitEvent::LogIn {
        email: body.email,
        password: body.password,
    }) {
        Ok(_) => {
            let response_body = LoginSuccessResponse {
                token: token.0.clone(),
            };
            let response_body = serde_json::to_string(&response_body).unwrap();

            let cookie_value = HeaderValue::from_str(&format!(
                "{}={}; Path=/; HttpOnly",
                COOKIE_SESSION_TOKEN_KEY, token.0
            ))
            .unwrap();
            response::Builder::new()
                .status(StatusCode::CREATED)
                .header(axum::http::header::SET_COOKIE, cookie_value)
                .body(Body::from(response_body))
                .unwrap()
        }
        Err(err) => transition_error_response(err),
    }
}

async fn logout(State(visit_store): State<GuardedVisitStore>, session: Session) -> Response {
    let mut visit_store = visit_store.lock().unwrap();
    // The cookie is left in place, the visit keeps its form fields
    match visit_store
        .get_mut(&VisitToken(session.token))
        .map(|machine| machine.apply(VisitEvent::SignOut))
    {
        Some(Ok(_)) => StatusCode::OK.into_response(),
        _ => StatusCode::BAD_REQUEST.into_response(),
    }
}

async fn get_session(
    session: Session,
    State(visit_store): State<GuardedVisitStore>,
) -> Response {
    let mut visit_store = visit_store.lock().unwrap();
    match visit_store.get_mut(&VisitToken(session.token)) {
        Some(machine) => Json(SessionView {
            email: session.email,
            phase: machine.phase(),
            profile: machine.profile().clone(),
        })
        .into_response(),
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn update_profile(
    session: Session,
    State(visit_store): State<GuardedVisitStore>,
    Json(update): Json<ProfileUpdate>,
) -> Response {
    let mut visit_store = visit_store.lock().unwrap();
    let machine = match visit_store.get_mut(&VisitToken(session.token)) {
        Some(machine) => machine,
        None => return StatusCode::FORBIDDEN.into_response(),
    };
    match machine.apply(VisitEvent::EditProfile(update)) {
        Ok(_) => Json(machine.profile().clone()).into_response(),
        Err(err) => transition_error_response(err),
    }
}

async fn submit_profile(session: Session, State(state): State<ServerState>) -> Response {
    let mut visit_store = state.visit_store.lock().unwrap();
    let machine = match visit_store.get_mut(&VisitToken(session.token)) {
        Some(machine) => machine,
        None => return StatusCode::FORBIDDEN.into_response(),
    };
    match machine.apply(VisitEvent::SubmitProfile) {
        Ok(_) => Json(recommendations_view(&state.catalog, machine.profile())).into_response(),
        Err(err) => transition_error_response(err),
    }
}

async fn get_recommendations(session: Session, State(state): State<ServerState>) -> Response {
    let mut visit_store = state.visit_store.lock().unwrap();
    match visit_store.get_mut(&VisitToken(session.token)) {
        Some(machine) if machine.phase() == Phase::ShowingRecommendations => {
            Json(recommendations_view(&state.catalog, machine.profile())).into_response()
        }
        Some(_) => StatusCode::NOT_FOUND.into_response(),
        None => StatusCode::FORBIDDEN.into_response(),
    }
}

async fn start_over(session: Session, State(visit_store): State<GuardedVisitStore>) -> Response {
    let mut visit_store = visit_store.lock().unwrap();
    let machine = match visit_store.get_mut(&VisitToken(session.token)) {
        Some(machine) => machine,
        None => return StatusCode::FORBIDDEN.into_response(),
    };
    match machine.apply(VisitEvent::StartOver) {
        Ok(_) => Json(machine.profile().clone()).into_response(),
        Err(err) => transition_error_response(err),
    }
}

async fn get_mood_content(
    _session: Session,
    State(catalog): State<GuardedCatalog>,
    Path(mood): Path<String>,
) -> Json<Vec<ContentItem>> {
    // Unknown values resolve to the neutral entry, same as the form default
    Json(catalog.recommendations_lossy(&mood).to_vec())
}

pub fn make_app(config: ServerConfig, catalog: Catalog, visit_store: GuardedVisitStore) -> Router {
    let state = ServerState::new(config, catalog, visit_store);

    let auth_routes: Router = Router::new()
        .route("/login", post(login))
        .route("/logout", get(logout))
        .with_state(state.clone());

    let session_routes: Router = Router::new()
        .route("/", get(get_session))
        .route("/profile", put(update_profile))
        .route("/submit", post(submit_profile))
        .route("/recommendations", get(get_recommendations))
        .route("/start-over", post(start_over))
        .with_state(state.clone());

    let content_routes: Router = Router::new()
        .route("/mood/{mood}", get(get_mood_content))
        .with_state(state.clone());

    let home_router: Router = match state.config.frontend_dir_path.clone() {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new().route("/", get(home)).with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/auth", auth_routes)
        .nest("/v1/session", session_routes)
        .nest("/v1/content", content_routes);

    #[cfg(feature = "slowdown")]
    {
        app = app.layer(middleware::from_fn(slowdown_request));
    }
    app = app.layer(middleware::from_fn_with_state(state, log_requests));

    app
}

pub async fn run_server(
    catalog: Catalog,
    visit_store: GuardedVisitStore,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let app = make_app(config, catalog, visit_store);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
