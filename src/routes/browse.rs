use crate::models::{
    ErrorResponse, GestureRequest, GestureResponse, SearchRequest, SettleRequest, SettleResponse,
    StackView, StartBrowseRequest, StartBrowseResponse, ToggleFilterRequest,
};
use crate::core::MatchingSession;
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Configure browsing/swiping routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/browse")
            .route("/start", web::post().to(start_browse))
            .route("/{sessionId}/stack", web::get().to(get_stack))
            .route("/{sessionId}/filters/toggle", web::post().to(toggle_filter))
            .route("/{sessionId}/filters/clear", web::post().to(clear_filters))
            .route("/{sessionId}/search", web::post().to(set_search))
            .route("/{sessionId}/gesture", web::post().to(gesture))
            .route("/{sessionId}/settle", web::post().to(settle))
            .route("/{sessionId}", web::delete().to(end_browse)),
    );
}

/// Default card stack depth: top card plus the card beneath it.
const DEFAULT_STACK_DEPTH: usize = 2;

fn stack_view(session: &MatchingSession, depth: usize) -> StackView {
    let (index, total) = session.position();
    let mut cards = session.stack(depth).to_vec();
    let current = if cards.is_empty() { None } else { Some(cards.remove(0)) };

    StackView {
        current,
        next: cards,
        index,
        total,
        exhausted: session.is_exhausted(),
        expanded: session.is_expanded(),
    }
}

fn session_not_found(session_id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Session not found".to_string(),
        message: format!("No browsing session with id {}", session_id),
        status_code: 404,
    })
}

/// Open a browsing session
///
/// POST /api/v1/browse/start
///
/// Fetches a point-in-time candidate pool snapshot for the requested
/// role (cache-aside) and builds a session over it.
async fn start_browse(
    state: web::Data<AppState>,
    req: web::Json<StartBrowseRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for start_browse request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let pool = match state.cache.get(req.role).await {
        Some(pool) => pool,
        None => {
            let fetched = match state.backend.fetch_candidates(req.role).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    tracing::error!("Failed to fetch candidate pool: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to fetch candidates".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            };
            state.cache.insert(req.role, fetched).await
        }
    };

    // The viewer never sees their own profile.
    let snapshot: Vec<_> = pool
        .iter()
        .filter(|c| c.user_id != req.viewer_id)
        .cloned()
        .collect();

    let session = match req.filters.clone() {
        Some(filters) => MatchingSession::with_filters(
            req.viewer_id.clone(),
            req.role,
            snapshot,
            state.thresholds,
            filters,
        ),
        None => MatchingSession::new(req.viewer_id.clone(), req.role, snapshot, state.thresholds),
    };

    let session_id = Uuid::new_v4();
    let response = StartBrowseResponse {
        session_id,
        stack: stack_view(&session, DEFAULT_STACK_DEPTH),
        active_filter_count: session.filters().active_filter_count(),
    };

    tracing::info!(
        "Opened browsing session {} for {} ({} candidates)",
        session_id,
        req.viewer_id,
        response.stack.total
    );

    state.sessions.write().await.insert(session_id, session);

    HttpResponse::Ok().json(response)
}

/// Current card stack without mutating the cursor
///
/// GET /api/v1/browse/{sessionId}/stack?depth=n
async fn get_stack(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let session_id = path.into_inner();
    let depth = query
        .get("depth")
        .and_then(|d| d.parse::<usize>().ok())
        .unwrap_or(DEFAULT_STACK_DEPTH);

    let sessions = state.sessions.read().await;
    match sessions.get(&session_id) {
        Some(session) => HttpResponse::Ok().json(stack_view(session, depth)),
        None => session_not_found(session_id),
    }
}

/// Toggle a facet value; resets the cursor and discards pending work
///
/// POST /api/v1/browse/{sessionId}/filters/toggle
async fn toggle_filter(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<ToggleFilterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let session_id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(&session_id) {
        Some(session) => {
            session.toggle_filter(req.facet, &req.value);
            tracing::debug!(
                "Session {}: toggled {:?} '{}' -> {} candidates",
                session_id,
                req.facet,
                req.value,
                session.position().1
            );
            HttpResponse::Ok().json(stack_view(session, DEFAULT_STACK_DEPTH))
        }
        None => session_not_found(session_id),
    }
}

/// Clear every facet and the search query
///
/// POST /api/v1/browse/{sessionId}/filters/clear
async fn clear_filters(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(&session_id) {
        Some(session) => {
            session.clear_filters();
            HttpResponse::Ok().json(stack_view(session, DEFAULT_STACK_DEPTH))
        }
        None => session_not_found(session_id),
    }
}

/// Replace the free-text search query
///
/// POST /api/v1/browse/{sessionId}/search
async fn set_search(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    let session_id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(&session_id) {
        Some(session) => {
            session.set_search_query(&req.query);
            HttpResponse::Ok().json(stack_view(session, DEFAULT_STACK_DEPTH))
        }
        None => session_not_found(session_id),
    }
}

/// Classify one completed pointer gesture and apply its effect
///
/// POST /api/v1/browse/{sessionId}/gesture
///
/// Swipe effects carry a settle ticket; the cursor moves only when the
/// ticket is settled (in issue order) via the settle endpoint.
async fn gesture(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<GestureRequest>,
) -> impl Responder {
    let session_id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    let session = match sessions.get_mut(&session_id) {
        Some(session) => session,
        None => return session_not_found(session_id),
    };

    session.gesture_start(req.start_x, req.start_y, req.start_time_ms);
    let (classification, effect) = match session.gesture_end(req.end_x, req.end_y, req.end_time_ms) {
        Some(result) => result,
        None => {
            // Unreachable with a full sample, but never panic on it.
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Incomplete gesture".to_string(),
                message: "Gesture sample had no start".to_string(),
                status_code: 400,
            });
        }
    };

    tracing::debug!(
        "Session {}: gesture classified as {:?}",
        session_id,
        classification
    );

    HttpResponse::Ok().json(GestureResponse {
        classification,
        effect,
        stack: stack_view(session, DEFAULT_STACK_DEPTH),
    })
}

/// Apply a deferred advancement after the settle animation
///
/// POST /api/v1/browse/{sessionId}/settle
async fn settle(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SettleRequest>,
) -> impl Responder {
    let session_id = path.into_inner();
    let mut sessions = state.sessions.write().await;
    match sessions.get_mut(&session_id) {
        Some(session) => {
            let outcome = session.settle(req.seq);
            HttpResponse::Ok().json(SettleResponse {
                outcome,
                stack: stack_view(session, DEFAULT_STACK_DEPTH),
            })
        }
        None => session_not_found(session_id),
    }
}

/// Close a browsing session, discarding all of its transient state
///
/// DELETE /api/v1/browse/{sessionId}
async fn end_browse(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let session_id = path.into_inner();
    let removed = state.sessions.write().await.remove(&session_id).is_some();

    if removed {
        tracing::info!("Closed browsing session {}", session_id);
        HttpResponse::Ok().json(serde_json::json!({ "closed": true }))
    } else {
        session_not_found(session_id)
    }
}
