//! Individual game persistence

use anyhow::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// One individual 4-player game record
///
/// Immutable after insert except for deletion by id. Serializes to the
/// JSON shape returned by `GET /api/games`.
#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub id: i64,
    pub created_at: String,
    pub player1_name: String,
    pub player2_name: String,
    pub player3_name: String,
    pub player4_name: String,
    pub player1_score: i64,
    pub player2_score: i64,
    pub player3_score: i64,
    pub player4_score: i64,
}

impl Game {
    /// Raw scores in seat order, as the point calculation expects
    pub fn scores(&self) -> [i64; 4] {
        [
            self.player1_score,
            self.player2_score,
            self.player3_score,
            self.player4_score,
        ]
    }
}

fn row_to_game(row: &sqlx::sqlite::SqliteRow) -> Game {
    Game {
        id: row.get("id"),
        created_at: row.get("created_at"),
        player1_name: row.get("player1_name"),
        player2_name: row.get("player2_name"),
        player3_name: row.get("player3_name"),
        player4_name: row.get("player4_name"),
        player1_score: row.get("player1_score"),
        player2_score: row.get("player2_score"),
        player3_score: row.get("player3_score"),
        player4_score: row.get("player4_score"),
    }
}

/// All games, newest first
pub async fn list_games(pool: &SqlitePool) -> Result<Vec<Game>> {
    let rows = sqlx::query("SELECT * FROM games ORDER BY id DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_game).collect())
}

/// All games, oldest first (CSV export order)
pub async fn list_games_ascending(pool: &SqlitePool) -> Result<Vec<Game>> {
    let rows = sqlx::query("SELECT * FROM games ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_game).collect())
}

/// Insert one game, returning the assigned id.
///
/// Both the JSON create path and the CSV import use this; validation
/// differs between them and lives with the callers.
pub async fn insert_game(
    pool: &SqlitePool,
    created_at: &str,
    names: &[String; 4],
    scores: &[i64; 4],
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO games (
            created_at,
            player1_name, player2_name, player3_name, player4_name,
            player1_score, player2_score, player3_score, player4_score
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(created_at)
    .bind(&names[0])
    .bind(&names[1])
    .bind(&names[2])
    .bind(&names[3])
    .bind(scores[0])
    .bind(scores[1])
    .bind(scores[2])
    .bind(scores[3])
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Delete by id, returning the number of rows affected (0 or 1)
pub async fn delete_game(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM games WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
