use actix_web::{HttpResponse, http::StatusCode, web};
use asteroids_leaderboard::{Leaderboard, LeaderboardError, clamp_limit, validate_submission};
use serde::Deserialize;
use serde_json::Value;

use crate::response::json_error;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScoresQuery {
    limit: Option<String>,
}

/// Mount the score routes at `/scores` and `/api/scores`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for path in ["/scores", "/api/scores"] {
        cfg.route(path, web::post().to(submit_score))
            .route(path, web::get().to(list_scores));
    }
}

async fn submit_score(board: web::Data<Leaderboard>, body: web::Json<Value>) -> HttpResponse {
    let entry = match validate_submission(&body) {
        Ok(entry) => entry,
        Err(e) => {
            tracing::debug!(error = %e, "rejected score submission");
            return json_error(StatusCode::BAD_REQUEST, e.to_string());
        }
    };
    match board.submit(&entry) {
        Ok(id) => HttpResponse::Ok().json(serde_json::json!({ "ok": true, "id": id })),
        Err(e) => database_error(e),
    }
}

async fn list_scores(board: web::Data<Leaderboard>, query: web::Query<ScoresQuery>) -> HttpResponse {
    let limit = clamp_limit(query.limit.as_deref());
    match board.top(limit) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => database_error(e),
    }
}

fn database_error(e: LeaderboardError) -> HttpResponse {
    tracing::error!(error = %e, "leaderboard query failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "database error")
}
