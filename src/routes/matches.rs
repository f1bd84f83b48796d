use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{normalize_intake, Ranker};
use crate::models::{CatalogResponse, ErrorResponse, HealthResponse, MatchRequest, MatchResponse};
use crate::services::MentorCatalog;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<MentorCatalog>,
    pub ranker: Ranker,
}

/// Configure all mentor-matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/mentors", web::get().to(list_mentors))
        .route("/mentors/match", web::post().to(find_mentors));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Raw catalog passthrough
///
/// GET /api/v1/mentors
async fn list_mentors(state: web::Data<AppState>) -> impl Responder {
    match state.catalog.mentors().await {
        Ok(mentors) => {
            let count = mentors.len();
            HttpResponse::Ok().json(CatalogResponse { mentors, count })
        }
        Err(e) => {
            tracing::error!("Failed to fetch mentor catalog: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch mentor catalog".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Find and rank mentors for an intake
///
/// POST /api/v1/mentors/match
///
/// Request body:
/// ```json
/// {
///   "desiredFlavor": "career",
///   "careerStage": "early_career",
///   "currentChallenge": "career pivot",
///   "supportStyle": "experience",
///   "preferredVibe": "casual",
///   "additionalContext": "free text",
///   "limit": 10,
///   "badgedOnly": false
/// }
/// ```
async fn find_mentors(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    let request_id = uuid::Uuid::new_v4();

    if let Err(errors) = req.validate() {
        tracing::info!("[{}] Invalid match request: {}", request_id, errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Validation failure aborts before any catalog access or scoring
    let intake = match normalize_intake(&req) {
        Ok(intake) => intake,
        Err(e) => {
            tracing::info!("[{}] Intake rejected: {}", request_id, e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    let mentors = match state.catalog.mentors().await {
        Ok(mentors) => mentors,
        Err(e) => {
            tracing::error!("[{}] Failed to fetch mentor catalog: {}", request_id, e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to fetch mentor catalog".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    tracing::debug!("[{}] Ranking {} mentors", request_id, mentors.len());

    let ranking = state.ranker.rank(&intake, mentors);
    let total_results = ranking.results.len();

    // Presentation policy lives here, not in the engine: optionally drop
    // unbadged mentors, then slice to the caller's limit
    let limit = req.limit.min(100) as usize;
    let matches: Vec<_> = ranking
        .results
        .into_iter()
        .filter(|m| !req.badged_only || m.badge.is_some())
        .take(limit)
        .collect();

    tracing::info!(
        "[{}] Returning {} of {} ranked mentors ({} eligible)",
        request_id,
        matches.len(),
        total_results,
        ranking.total_eligible
    );

    HttpResponse::Ok().json(MatchResponse {
        matches,
        total_eligible: ranking.total_eligible,
        total_results,
    })
}
