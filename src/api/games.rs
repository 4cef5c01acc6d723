//! Individual game API
//!
//! `GET /api/games`, `POST /api/games`, `DELETE /api/games/:id`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::api::input;
use crate::db::games::{self, Game};
use crate::{time, ApiError, ApiResult, AppState};

const NAME_FIELDS: [&str; 4] = [
    "player1_name",
    "player2_name",
    "player3_name",
    "player4_name",
];

const SCORE_FIELDS: [&str; 4] = [
    "player1_score",
    "player2_score",
    "player3_score",
    "player4_score",
];

/// GET /api/games
///
/// All game records, newest first.
pub async fn list_games(State(state): State<AppState>) -> ApiResult<Json<Vec<Game>>> {
    let games = games::list_games(&state.db).await?;
    Ok(Json(games))
}

/// POST /api/games
///
/// Body must contain all eight fields. Checked in order: presence of
/// every key, then non-blank names, then integer-coercible scores; the
/// reason string identifies which check failed. Success stamps the
/// current time at minute precision and returns `201 {"id": ...}`.
pub async fn create_game(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let data = payload.map(|Json(v)| v).unwrap_or_else(|| json!({}));

    let all_present = NAME_FIELDS
        .iter()
        .chain(SCORE_FIELDS.iter())
        .all(|key| data.get(key).is_some());
    if !all_present {
        return Err(ApiError::BadRequest("missing fields".to_string()));
    }

    let mut names: [String; 4] = Default::default();
    for (i, key) in NAME_FIELDS.iter().enumerate() {
        match input::coerce_name(&data[*key]) {
            Some(name) => names[i] = name,
            None => {
                return Err(ApiError::BadRequest("all player names required".to_string()));
            }
        }
    }

    let mut scores = [0i64; 4];
    for (i, key) in SCORE_FIELDS.iter().enumerate() {
        match input::coerce_score(&data[*key]) {
            Some(score) => scores[i] = score,
            None => {
                return Err(ApiError::BadRequest("scores must be integers".to_string()));
            }
        }
    }

    let created_at = time::now_minute();
    let id = games::insert_game(&state.db, &created_at, &names, &scores).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// DELETE /api/games/:id
///
/// `200 {"ok": true}`, or `404 {"error": "not found"}` when no row
/// matched. Repeating a delete yields not-found after the first.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = games::delete_game(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })))
}
