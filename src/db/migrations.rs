use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            username    TEXT NOT NULL UNIQUE COLLATE NOCASE,
            created_at  TEXT DEFAULT (datetime('now'))
        );

        -- Older databases created the column without NOCASE
        CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username_nocase
            ON users(username COLLATE NOCASE);

        CREATE TABLE IF NOT EXISTS smoking_status (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id             INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            cigarettes_per_day  INTEGER NOT NULL CHECK(cigarettes_per_day > 0),
            cost_per_pack       REAL NOT NULL CHECK(cost_per_pack > 0),
            start_date          TEXT NOT NULL,
            created_at          TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS quit_plans (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name               TEXT NOT NULL,
            start_date         TEXT NOT NULL,
            target_quit_date   TEXT NOT NULL,
            reason             TEXT NOT NULL,
            smoking_status_id  INTEGER REFERENCES smoking_status(id) ON DELETE SET NULL,
            created_at         TEXT DEFAULT (datetime('now')),
            CHECK(target_quit_date > start_date)
        );

        CREATE TABLE IF NOT EXISTS stages (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            plan_id       INTEGER NOT NULL REFERENCES quit_plans(id) ON DELETE CASCADE,
            stage_number  INTEGER NOT NULL,
            title         TEXT NOT NULL,
            description   TEXT NOT NULL DEFAULT '',
            start_date    TEXT NOT NULL,
            end_date      TEXT NOT NULL,
            UNIQUE(plan_id, stage_number)
        );

        CREATE TABLE IF NOT EXISTS progress (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id            INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            date               TEXT NOT NULL,
            cigarettes_smoked  INTEGER NOT NULL DEFAULT 0 CHECK(cigarettes_smoked >= 0),
            money_saved        REAL NOT NULL DEFAULT 0,
            health_status      TEXT NOT NULL DEFAULT '',
            stage_id           INTEGER REFERENCES stages(id) ON DELETE SET NULL,
            created_at         TEXT DEFAULT (datetime('now')),
            UNIQUE(user_id, date)
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id        INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            plan_id        INTEGER REFERENCES quit_plans(id) ON DELETE CASCADE,
            title          TEXT NOT NULL,
            description    TEXT NOT NULL DEFAULT '',
            task_type      TEXT NOT NULL DEFAULT 'custom',
            priority       TEXT NOT NULL DEFAULT 'medium',
            status         TEXT NOT NULL DEFAULT 'pending'
                           CHECK(status IN ('pending', 'completed', 'skipped')),
            due_date       TEXT,
            points_reward  INTEGER NOT NULL DEFAULT 0,
            completed_at   TEXT,
            created_at     TEXT DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_user_due ON tasks(user_id, status, due_date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    log::debug!("Migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('users','smoking_status','quit_plans','stages','progress','tasks','app_meta')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 7);
    }
}
