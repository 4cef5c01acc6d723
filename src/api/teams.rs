//! Team play API
//!
//! CRUD over teams, roster entries, and team game records, mirroring the
//! individual game service, plus the `/api/team_ranking` aggregation.
//! Teams are referenced by name string throughout; creating a game or a
//! roster entry for a team that was never registered is allowed.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::input;
use crate::db::teams::{self, Team, TeamGame, TeamMember};
use crate::{points, time, ApiError, ApiResult, AppState};

// ---- teams ----

/// GET /api/teams
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<Vec<Team>>> {
    let list = teams::list_teams(&state.db).await?;
    Ok(Json(list))
}

/// POST /api/teams
///
/// Body: `{"team_name": ...}`. Team names are unique; a duplicate maps
/// the storage constraint violation to a 400 rather than a 500.
pub async fn create_team(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let data = payload.map(|Json(v)| v).unwrap_or_else(|| json!({}));

    let name = input::coerce_name(&data["team_name"])
        .ok_or_else(|| ApiError::BadRequest("team name required".to_string()))?;

    match teams::insert_team(&state.db, &name).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(json!({ "id": id })))),
        Err(err) if is_unique_violation(&err) => Err(ApiError::BadRequest(
            "team name already exists".to_string(),
        )),
        Err(err) => Err(ApiError::Database(err)),
    }
}

/// DELETE /api/teams/:id
///
/// Members and games referencing the team by name are left untouched.
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = teams::delete_team(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}

// ---- team members ----

/// GET /api/team_members
pub async fn list_team_members(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TeamMember>>> {
    let list = teams::list_team_members(&state.db).await?;
    Ok(Json(list))
}

/// POST /api/team_members
///
/// Body: `{"player_name": ..., "team_name": ...}`. Stamps `joined_at`.
pub async fn create_team_member(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let data = payload.map(|Json(v)| v).unwrap_or_else(|| json!({}));

    let player_name = input::coerce_name(&data["player_name"]);
    let team_name = input::coerce_name(&data["team_name"]);
    let (Some(player_name), Some(team_name)) = (player_name, team_name) else {
        return Err(ApiError::BadRequest(
            "player and team name required".to_string(),
        ));
    };

    let joined_at = time::now_minute();
    let id = teams::insert_team_member(&state.db, &team_name, &player_name, &joined_at).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// DELETE /api/team_members/:id
pub async fn delete_team_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = teams::delete_team_member(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })))
}

// ---- team games ----

const PLAYER_FIELDS: [&str; 4] = ["g1_player", "g2_player", "g3_player", "g4_player"];
const TEAM_FIELDS: [&str; 4] = ["g1_team", "g2_team", "g3_team", "g4_team"];
const SCORE_FIELDS: [&str; 4] = ["g1_score", "g2_score", "g3_score", "g4_score"];

/// GET /api/team_games
///
/// All team game records, newest first.
pub async fn list_team_games(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamGame>>> {
    let list = teams::list_team_games(&state.db).await?;
    Ok(Json(list))
}

/// POST /api/team_games
///
/// Body carries twelve fields: `g{n}_player`, `g{n}_team`, `g{n}_score`
/// per seat. Validation order matches the individual create path.
pub async fn create_team_game(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let data = payload.map(|Json(v)| v).unwrap_or_else(|| json!({}));

    let all_present = PLAYER_FIELDS
        .iter()
        .chain(TEAM_FIELDS.iter())
        .chain(SCORE_FIELDS.iter())
        .all(|key| data.get(key).is_some());
    if !all_present {
        return Err(ApiError::BadRequest("missing fields".to_string()));
    }

    let mut seats: [(String, String, i64); 4] = Default::default();
    for i in 0..4 {
        let player = input::coerce_name(&data[PLAYER_FIELDS[i]]);
        let team = input::coerce_name(&data[TEAM_FIELDS[i]]);
        let (Some(player), Some(team)) = (player, team) else {
            return Err(ApiError::BadRequest(
                "all player and team names required".to_string(),
            ));
        };
        let Some(score) = input::coerce_score(&data[SCORE_FIELDS[i]]) else {
            return Err(ApiError::BadRequest("scores must be integers".to_string()));
        };
        seats[i] = (player, team, score);
    }

    let created_at = time::now_minute();
    let id = teams::insert_team_game(&state.db, &created_at, &seats).await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// DELETE /api/team_games/:id
pub async fn delete_team_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    let deleted = teams::delete_team_game(&state.db, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("not found".to_string()));
    }
    Ok(Json(json!({ "ok": true })))
}

// ---- team ranking ----

/// One row of the team ranking table
#[derive(Debug, Serialize)]
pub struct TeamRankingEntry {
    pub team_name: String,
    /// Seat appearances, not distinct games: a team fielding two seats in
    /// one game is counted twice
    pub games: i64,
    pub total_pt: f64,
    /// Percentage of seat appearances finishing 1st or 2nd
    pub yonde_rate: f64,
    /// Finishes per rank, 1st through 4th
    pub rank_counts: [i64; 4],
}

/// GET /api/team_ranking
///
/// Aggregates every team game: per-seat points and ranks accumulated by
/// team name, sorted by total points descending.
pub async fn team_ranking(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TeamRankingEntry>>> {
    let games = teams::list_team_games(&state.db).await?;

    let mut stats: HashMap<String, (i64, f64, [i64; 4])> = HashMap::new();
    for game in &games {
        let scores = game.scores();
        let pts = points::calc_pts(&scores);
        let ranks = points::seat_ranks(&scores);
        for (seat, team) in game.team_names().iter().enumerate() {
            let entry = stats
                .entry((*team).to_string())
                .or_insert((0, 0.0, [0i64; 4]));
            entry.0 += 1;
            entry.1 += pts[seat];
            entry.2[ranks[seat] - 1] += 1;
        }
    }

    let mut ranking: Vec<TeamRankingEntry> = stats
        .into_iter()
        .map(|(team_name, (games, total_pt, rank_counts))| {
            let yonde_rate = if games > 0 {
                (rank_counts[0] + rank_counts[1]) as f64 * 100.0 / games as f64
            } else {
                0.0
            };
            TeamRankingEntry {
                team_name,
                games,
                total_pt: round1(total_pt),
                yonde_rate: round1(yonde_rate),
                rank_counts,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.total_pt.total_cmp(&a.total_pt));

    Ok(Json(ranking))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
