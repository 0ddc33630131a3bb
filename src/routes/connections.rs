use crate::core::{RequestOutcome, RespondOutcome};
use crate::models::{ConnectionRequestBody, ConnectionResponse, ErrorResponse, RespondRequestBody, RespondResponse};
use crate::routes::AppState;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure connection-request routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/connections")
            .route("/request", web::post().to(request_connection))
            .route("/respond", web::post().to(respond_connection)),
    );
}

/// Send a connection request to a candidate
///
/// POST /api/v1/connections/request
///
/// The local record moves to Pending optimistically; external delivery
/// is fire-and-forget, and a delivery failure is surfaced (not rolled
/// back) via `deliveryConfirmed: false`.
async fn request_connection(
    state: web::Data<AppState>,
    req: web::Json<ConnectionRequestBody>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let outcome = {
        let mut ledger = state.connections.write().await;
        ledger.request(&req.viewer_id, &req.candidate_id, req.message.clone())
    };

    let mut delivery_confirmed = false;

    if outcome == RequestOutcome::Requested {
        let delivery = state
            .backend
            .send_connection_request(&req.viewer_id, &req.candidate_id, req.message.as_deref())
            .await;

        let mut ledger = state.connections.write().await;
        match delivery {
            Ok(()) => {
                ledger.confirm_delivery(&req.viewer_id, &req.candidate_id);
                delivery_confirmed = true;
            }
            Err(e) => {
                tracing::warn!(
                    "Connection request {} -> {} recorded locally but delivery failed: {}",
                    req.viewer_id,
                    req.candidate_id,
                    e
                );
                ledger.fail_delivery(&req.viewer_id, &req.candidate_id);
            }
        }
    }

    let status = state
        .connections
        .read()
        .await
        .status(&req.viewer_id, &req.candidate_id);

    tracing::info!(
        "Connection request {} -> {}: {:?}",
        req.viewer_id,
        req.candidate_id,
        outcome
    );

    HttpResponse::Ok().json(ConnectionResponse {
        outcome,
        status,
        delivery_confirmed,
    })
}

/// Candidate side accepts or declines a pending request
///
/// POST /api/v1/connections/respond
async fn respond_connection(
    state: web::Data<AppState>,
    req: web::Json<RespondRequestBody>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let decision = req.decision.to_lowercase();
    if decision != "accept" && decision != "decline" {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid decision".to_string(),
            message: "Decision must be one of: accept, decline".to_string(),
            status_code: 400,
        });
    }

    let outcome = {
        let mut ledger = state.connections.write().await;
        if decision == "accept" {
            ledger.accept(&req.viewer_id, &req.candidate_id)
        } else {
            ledger.decline(&req.viewer_id, &req.candidate_id)
        }
    };

    if outcome != RespondOutcome::NoPendingRequest {
        // Best-effort mirror; notification fan-out is the backend's job.
        if let Err(e) = state
            .backend
            .respond_to_connection_request(&req.viewer_id, &req.candidate_id, &decision)
            .await
        {
            tracing::warn!(
                "Response {} for {} -> {} recorded locally but delivery failed: {}",
                decision,
                req.viewer_id,
                req.candidate_id,
                e
            );
        }
    }

    let status = state
        .connections
        .read()
        .await
        .status(&req.viewer_id, &req.candidate_id);

    HttpResponse::Ok().json(RespondResponse { outcome, status })
}
