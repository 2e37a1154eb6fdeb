use anyhow::{Result, anyhow};
use rusqlite::Connection;

use crate::db::repository::{MetaRepo, UserRepo};
use crate::models::user::validate_username;

const SESSION_KEY: &str = "session_user";

/// The logged-in user, passed explicitly to everything that reads or writes
/// per-user data.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
}

impl Session {
    /// Create a user and log them in.
    pub fn register(conn: &Connection, username: &str) -> Result<Session> {
        validate_username(username)?;
        let user = UserRepo::create(conn, username.trim())?;
        Self::start(conn, user.id, user.username)
    }

    pub fn login(conn: &Connection, username: &str) -> Result<Session> {
        let user = UserRepo::find_by_name(conn, username.trim())?.ok_or_else(|| {
            anyhow!(
                "No user named '{}'. Create one with `smokefree register {}`",
                username,
                username
            )
        })?;
        Self::start(conn, user.id, user.username)
    }

    fn start(conn: &Connection, user_id: i64, username: String) -> Result<Session> {
        MetaRepo::set(conn, SESSION_KEY, &user_id.to_string())?;
        log::info!("Session started for {}", username);
        Ok(Session { user_id, username })
    }

    /// Session left by the last login, if its user still exists.
    pub fn current(conn: &Connection) -> Result<Option<Session>> {
        let Some(raw) = MetaRepo::get(conn, SESSION_KEY)? else {
            return Ok(None);
        };
        let Ok(user_id) = raw.parse::<i64>() else {
            log::warn!("Discarding malformed session value '{}'", raw);
            MetaRepo::delete(conn, SESSION_KEY)?;
            return Ok(None);
        };
        Ok(UserRepo::get(conn, user_id)?.map(|user| Session {
            user_id: user.id,
            username: user.username,
        }))
    }

    pub fn require(conn: &Connection) -> Result<Session> {
        Self::current(conn)?.ok_or_else(|| {
            anyhow!("Not logged in. Run `smokefree login <name>` or `smokefree register <name>`")
        })
    }

    pub fn logout(conn: &Connection) -> Result<()> {
        MetaRepo::delete(conn, SESSION_KEY)
    }
}
