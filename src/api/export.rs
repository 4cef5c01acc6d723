//! CSV export
//!
//! `GET /export` serializes every individual game plus computed points
//! into a downloadable CSV. The file targets Excel on Korean-locale
//! Windows, so the body is transcoded to the legacy CP949 family rather
//! than UTF-8; characters that cannot be represented are replaced, never
//! fatal.

use axum::{extract::State, http::header, response::IntoResponse};

use crate::db::games;
use crate::{points, ApiResult, AppState};

/// 14-column header: id, timestamp, then name/score/pt per seat
const EXPORT_HEADER: [&str; 14] = [
    "ID", "시간", "P1 이름", "P1 점수", "P1 pt", "P2 이름", "P2 점수", "P2 pt", "P3 이름",
    "P3 점수", "P3 pt", "P4 이름", "P4 점수", "P4 pt",
];

/// GET /export
///
/// All games ordered by id ascending; point fields carry exactly one
/// decimal digit. Served as an attachment with a fixed filename and a
/// content type declaring the legacy encoding.
pub async fn export_games(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let games = games::list_games_ascending(&state.db).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADER)
        .map_err(anyhow::Error::from)?;

    for game in &games {
        let scores = game.scores();
        let pts = points::calc_pts(&scores);

        writer
            .write_record([
                game.id.to_string(),
                game.created_at.clone(),
                game.player1_name.clone(),
                scores[0].to_string(),
                format!("{:.1}", pts[0]),
                game.player2_name.clone(),
                scores[1].to_string(),
                format!("{:.1}", pts[1]),
                game.player3_name.clone(),
                scores[2].to_string(),
                format!("{:.1}", pts[2]),
                game.player4_name.clone(),
                scores[3].to_string(),
                format!("{:.1}", pts[3]),
            ])
            .map_err(anyhow::Error::from)?;
    }

    let csv_text = String::from_utf8(writer.into_inner().map_err(anyhow::Error::from)?)
        .map_err(anyhow::Error::from)?;

    let (csv_bytes, _, _) = encoding_rs::EUC_KR.encode(&csv_text);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=cp949"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=madang_majhong_rating.csv",
            ),
        ],
        csv_bytes.into_owned(),
    ))
}
