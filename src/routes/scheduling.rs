use crate::core::BookingOutcome;
use crate::models::{
    AddSessionTypeRequest, AddSlotRequest, AttemptBookingRequest, BookingResponse,
    CapacityResponse, DeleteConfirmResponse, DeletePreviewResponse, ErrorResponse,
    RenameSessionTypeRequest, RenameSessionTypeResponse, SessionType, SlotListResponse,
};
use crate::routes::AppState;
use crate::services::PersistOutcome;
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// Configure availability and booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/mentors/{mentorId}")
            .route("/slots", web::get().to(list_slots))
            .route("/slots", web::post().to(add_slot))
            .route("/slots/{slotId}", web::delete().to(remove_slot))
            .route("/capacity", web::get().to(capacity))
            .route("/session-types", web::post().to(add_session_type))
            .route("/session-types/rename", web::post().to(rename_session_type))
            .route(
                "/session-types/{name}/delete-preview",
                web::get().to(delete_preview),
            )
            .route(
                "/session-types/{name}/delete-confirm",
                web::post().to(delete_confirm),
            ),
    )
    .route("/bookings/attempt", web::post().to(attempt_booking));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// List a mentor's slots and session types
///
/// GET /api/v1/mentors/{mentorId}/slots
async fn list_slots(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let mentor_id = path.into_inner();
    let books = state.books.read().await;

    let (slots, session_types) = match books.get(&mentor_id) {
        Some(book) => (
            book.slots().to_vec(),
            book.session_types().cloned().collect(),
        ),
        None => (vec![], vec![]),
    };

    HttpResponse::Ok().json(SlotListResponse {
        mentor_id,
        slots,
        session_types,
    })
}

/// Register a session type for a mentor
///
/// POST /api/v1/mentors/{mentorId}/session-types
async fn add_session_type(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AddSessionTypeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let mentor_id = path.into_inner();
    let mut books = state.books.write().await;
    let book = books.entry(mentor_id).or_default();

    match book.add_session_type(SessionType {
        name: req.name.clone(),
        description: req.description.clone(),
        color: req.color.clone(),
    }) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "created": true })),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid session type".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Add an availability slot
///
/// POST /api/v1/mentors/{mentorId}/slots
async fn add_slot(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<AddSlotRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let mentor_id = path.into_inner();
    let mut books = state.books.write().await;
    let book = books.entry(mentor_id.clone()).or_default();

    match book.add_slot(
        req.day_of_week,
        req.start_time,
        req.end_time,
        &req.session_type,
        req.max_bookings,
    ) {
        Ok(id) => {
            tracing::info!("Mentor {}: added slot {}", mentor_id, id);
            HttpResponse::Ok().json(book.slot(id))
        }
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid slot".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Delete a slot (confirmation happens client-side)
///
/// DELETE /api/v1/mentors/{mentorId}/slots/{slotId}
async fn remove_slot(
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> impl Responder {
    let (mentor_id, slot_id) = path.into_inner();
    let mut books = state.books.write().await;

    let removed = books
        .get_mut(&mentor_id)
        .map(|book| book.remove_slot(slot_id))
        .unwrap_or(false);

    if removed {
        HttpResponse::Ok().json(serde_json::json!({ "removed": true }))
    } else {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "Slot not found".to_string(),
            message: format!("No slot {} for mentor {}", slot_id, mentor_id),
            status_code: 404,
        })
    }
}

/// Aggregate capacity, recomputed on demand
///
/// GET /api/v1/mentors/{mentorId}/capacity
async fn capacity(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let mentor_id = path.into_inner();
    let books = state.books.read().await;

    let (total_capacity, total_booked, total_available) = match books.get(&mentor_id) {
        Some(book) => (
            book.total_capacity(),
            book.total_booked(),
            book.total_available(),
        ),
        None => (0, 0, 0),
    };

    HttpResponse::Ok().json(CapacityResponse {
        mentor_id,
        total_capacity,
        total_booked,
        total_available,
    })
}

/// Book a session against a specific slot
///
/// POST /api/v1/bookings/attempt
///
/// The connection gate is checked first: a viewer without a Connected
/// record is directed back to the connection flow rather than failing
/// silently. On success the local increment is persisted; a backend
/// conflict wins and rolls the increment back.
async fn attempt_booking(
    state: web::Data<AppState>,
    req: web::Json<AttemptBookingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let can_book = state
        .connections
        .read()
        .await
        .can_book_session(&req.viewer_id, &req.mentor_id);

    if !can_book {
        tracing::info!(
            "Booking blocked: {} is not connected to {}",
            req.viewer_id,
            req.mentor_id
        );
        return HttpResponse::Conflict().json(BookingResponse {
            outcome: None,
            confirmation_id: None,
            slot: None,
            connection_required: true,
        });
    }

    let outcome = {
        let mut books = state.books.write().await;
        match books.get_mut(&req.mentor_id) {
            Some(book) => book.attempt_booking(req.slot_id),
            None => BookingOutcome::SlotNotFound,
        }
    };

    if outcome != BookingOutcome::Booked {
        let books = state.books.read().await;
        let slot = books
            .get(&req.mentor_id)
            .and_then(|b| b.slot(req.slot_id))
            .cloned();
        return HttpResponse::Ok().json(BookingResponse {
            outcome: Some(outcome),
            confirmation_id: None,
            slot,
            connection_required: false,
        });
    }

    // Persist; the backend is the source of truth on conflicts.
    let confirmation_id = match state
        .backend
        .persist_booking(req.slot_id, &req.viewer_id, req.notes.as_deref())
        .await
    {
        Ok(PersistOutcome::Confirmed { confirmation_id }) => Some(confirmation_id),
        Ok(PersistOutcome::Conflict) => {
            let mut books = state.books.write().await;
            if let Some(book) = books.get_mut(&req.mentor_id) {
                book.cancel_booking(req.slot_id);
            }
            tracing::info!(
                "Booking rolled back after backend conflict (slot {})",
                req.slot_id
            );
            let slot = books
                .get(&req.mentor_id)
                .and_then(|b| b.slot(req.slot_id))
                .cloned();
            return HttpResponse::Ok().json(BookingResponse {
                outcome: Some(BookingOutcome::SlotFull),
                confirmation_id: None,
                slot,
                connection_required: false,
            });
        }
        Err(e) => {
            // Transport failure: keep the optimistic booking and
            // surface the missing confirmation instead of diverging
            // silently.
            tracing::warn!("Booking persisted locally but backend call failed: {}", e);
            None
        }
    };

    let books = state.books.read().await;
    let slot = books
        .get(&req.mentor_id)
        .and_then(|b| b.slot(req.slot_id))
        .cloned();

    HttpResponse::Ok().json(BookingResponse {
        outcome: Some(BookingOutcome::Booked),
        confirmation_id,
        slot,
        connection_required: false,
    })
}

/// Rename a session type and cascade into tagged slots
///
/// POST /api/v1/mentors/{mentorId}/session-types/rename
async fn rename_session_type(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RenameSessionTypeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_error(errors);
    }

    let mentor_id = path.into_inner();
    let result = {
        let mut books = state.books.write().await;
        match books.get_mut(&mentor_id) {
            Some(book) => book.rename_session_type(&req.old_name, &req.new_name),
            None => {
                return HttpResponse::NotFound().json(ErrorResponse {
                    error: "Mentor not found".to_string(),
                    message: format!("No availability for mentor {}", mentor_id),
                    status_code: 404,
                });
            }
        }
    };

    match result {
        Ok(updated_slots) => {
            // Mirror so server state preserves the same invariant.
            if let Err(e) = state
                .backend
                .mirror_session_type_rename(&mentor_id, &req.old_name, &req.new_name)
                .await
            {
                tracing::warn!("Rename applied locally but mirror failed: {}", e);
            }
            HttpResponse::Ok().json(RenameSessionTypeResponse { updated_slots })
        }
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Rename failed".to_string(),
            message: e.to_string(),
            status_code: 400,
        }),
    }
}

/// Phase one of a session-type delete: count affected slots
///
/// GET /api/v1/mentors/{mentorId}/session-types/{name}/delete-preview
async fn delete_preview(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (mentor_id, name) = path.into_inner();
    let books = state.books.read().await;

    let result = books
        .get(&mentor_id)
        .map(|book| book.preview_delete_session_type(&name));

    match result {
        Some(Ok(affected_slots)) => HttpResponse::Ok().json(DeletePreviewResponse {
            name,
            affected_slots,
        }),
        _ => HttpResponse::NotFound().json(ErrorResponse {
            error: "Session type not found".to_string(),
            message: format!("No session type '{}' for mentor {}", name, mentor_id),
            status_code: 404,
        }),
    }
}

/// Phase two: cascade-delete the session type and its slots
///
/// POST /api/v1/mentors/{mentorId}/session-types/{name}/delete-confirm
async fn delete_confirm(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> impl Responder {
    let (mentor_id, name) = path.into_inner();

    let result = {
        let mut books = state.books.write().await;
        books
            .get_mut(&mentor_id)
            .map(|book| book.confirm_delete_session_type(&name))
    };

    match result {
        Some(Ok(removed_slots)) => {
            if let Err(e) = state
                .backend
                .mirror_session_type_delete(&mentor_id, &name)
                .await
            {
                tracing::warn!("Delete applied locally but mirror failed: {}", e);
            }
            tracing::info!(
                "Mentor {}: deleted session type '{}' ({} slots cascaded)",
                mentor_id,
                name,
                removed_slots
            );
            HttpResponse::Ok().json(DeleteConfirmResponse {
                name,
                removed_slots,
            })
        }
        _ => HttpResponse::NotFound().json(ErrorResponse {
            error: "Session type not found".to_string(),
            message: format!("No session type '{}' for mentor {}", name, mentor_id),
            status_code: 404,
        }),
    }
}
