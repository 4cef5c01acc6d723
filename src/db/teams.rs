//! Team, roster, and team game persistence
//!
//! The three tables reference each other by name strings only. That is
//! deliberate: a team game may name a team that was never created, and
//! deleting a team leaves its members and games untouched.

use anyhow::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// One team
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

/// One roster entry, tied to a team by name string
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: i64,
    pub team_name: String,
    pub player_name: String,
    pub joined_at: String,
}

/// One team 4-player game record
#[derive(Debug, Clone, Serialize)]
pub struct TeamGame {
    pub id: i64,
    pub created_at: String,
    pub p1_player_name: String,
    pub p1_team_name: String,
    pub p1_score: i64,
    pub p2_player_name: String,
    pub p2_team_name: String,
    pub p2_score: i64,
    pub p3_player_name: String,
    pub p3_team_name: String,
    pub p3_score: i64,
    pub p4_player_name: String,
    pub p4_team_name: String,
    pub p4_score: i64,
}

impl TeamGame {
    /// Raw scores in seat order
    pub fn scores(&self) -> [i64; 4] {
        [self.p1_score, self.p2_score, self.p3_score, self.p4_score]
    }

    /// Team name per seat
    pub fn team_names(&self) -> [&str; 4] {
        [
            &self.p1_team_name,
            &self.p2_team_name,
            &self.p3_team_name,
            &self.p4_team_name,
        ]
    }
}

// ---- teams ----

/// All teams, oldest first
pub async fn list_teams(pool: &SqlitePool) -> Result<Vec<Team>> {
    let rows = sqlx::query("SELECT id, name FROM teams ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|row| Team {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

/// Insert a team, returning the assigned id.
///
/// Returns the raw sqlx error so the caller can distinguish the UNIQUE
/// violation on duplicate names.
pub async fn insert_team(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO teams (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Delete by id, returning the number of rows affected (0 or 1)
pub async fn delete_team(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM teams WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// ---- team members ----

/// All roster entries, oldest first
pub async fn list_team_members(pool: &SqlitePool) -> Result<Vec<TeamMember>> {
    let rows = sqlx::query(
        "SELECT id, team_name, player_name, joined_at FROM team_members ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .iter()
        .map(|row| TeamMember {
            id: row.get("id"),
            team_name: row.get("team_name"),
            player_name: row.get("player_name"),
            joined_at: row.get("joined_at"),
        })
        .collect())
}

/// Insert a roster entry, returning the assigned id
pub async fn insert_team_member(
    pool: &SqlitePool,
    team_name: &str,
    player_name: &str,
    joined_at: &str,
) -> Result<i64> {
    let result =
        sqlx::query("INSERT INTO team_members (team_name, player_name, joined_at) VALUES (?, ?, ?)")
            .bind(team_name)
            .bind(player_name)
            .bind(joined_at)
            .execute(pool)
            .await?;
    Ok(result.last_insert_rowid())
}

/// Delete by id, returning the number of rows affected (0 or 1)
pub async fn delete_team_member(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM team_members WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// ---- team games ----

fn row_to_team_game(row: &sqlx::sqlite::SqliteRow) -> TeamGame {
    TeamGame {
        id: row.get("id"),
        created_at: row.get("created_at"),
        p1_player_name: row.get("p1_player_name"),
        p1_team_name: row.get("p1_team_name"),
        p1_score: row.get("p1_score"),
        p2_player_name: row.get("p2_player_name"),
        p2_team_name: row.get("p2_team_name"),
        p2_score: row.get("p2_score"),
        p3_player_name: row.get("p3_player_name"),
        p3_team_name: row.get("p3_team_name"),
        p3_score: row.get("p3_score"),
        p4_player_name: row.get("p4_player_name"),
        p4_team_name: row.get("p4_team_name"),
        p4_score: row.get("p4_score"),
    }
}

/// All team games, newest first
pub async fn list_team_games(pool: &SqlitePool) -> Result<Vec<TeamGame>> {
    let rows = sqlx::query("SELECT * FROM team_games ORDER BY id DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(row_to_team_game).collect())
}

/// Insert one team game, returning the assigned id.
///
/// Seat tuples are (player name, team name, score).
pub async fn insert_team_game(
    pool: &SqlitePool,
    created_at: &str,
    seats: &[(String, String, i64); 4],
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO team_games (
            created_at,
            p1_player_name, p1_team_name, p1_score,
            p2_player_name, p2_team_name, p2_score,
            p3_player_name, p3_team_name, p3_score,
            p4_player_name, p4_team_name, p4_score
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(created_at)
    .bind(&seats[0].0)
    .bind(&seats[0].1)
    .bind(seats[0].2)
    .bind(&seats[1].0)
    .bind(&seats[1].1)
    .bind(seats[1].2)
    .bind(&seats[2].0)
    .bind(&seats[2].1)
    .bind(seats[2].2)
    .bind(&seats[3].0)
    .bind(&seats[3].1)
    .bind(seats[3].2)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Delete by id, returning the number of rows affected (0 or 1)
pub async fn delete_team_game(pool: &SqlitePool, id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM team_games WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
