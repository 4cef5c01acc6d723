//! Database access for madang-rating
//!
//! One SQLite file holds four flat tables: games, teams, team_members,
//! team_games. Team relations are kept by matching name strings, not
//! foreign keys, so inserts naming an unknown team succeed.

pub mod games;
pub mod teams;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Open the database pool, creating the file and schema if absent
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Idempotent schema init, safe to run on every boot
async fn init_tables(pool: &SqlitePool) -> Result<()> {
    // Individual 4-player game records
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            player1_name TEXT NOT NULL,
            player2_name TEXT NOT NULL,
            player3_name TEXT NOT NULL,
            player4_name TEXT NOT NULL,
            player1_score INTEGER NOT NULL,
            player2_score INTEGER NOT NULL,
            player3_score INTEGER NOT NULL,
            player4_score INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Team roster
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Player-to-team mapping, keyed by team name string
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            team_name TEXT NOT NULL,
            player_name TEXT NOT NULL,
            joined_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Team 4-player game records
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_games (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            p1_player_name TEXT NOT NULL,
            p1_team_name   TEXT NOT NULL,
            p1_score       INTEGER NOT NULL,
            p2_player_name TEXT NOT NULL,
            p2_team_name   TEXT NOT NULL,
            p2_score       INTEGER NOT NULL,
            p3_player_name TEXT NOT NULL,
            p3_team_name   TEXT NOT NULL,
            p3_score       INTEGER NOT NULL,
            p4_player_name TEXT NOT NULL,
            p4_team_name   TEXT NOT NULL,
            p4_score       INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database tables initialized (games, teams, team_members, team_games)");

    Ok(())
}
