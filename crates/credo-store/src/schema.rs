use credo_core::CredoResult;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> CredoResult<()> {
    conn.execute_batch(SCHEMA_V1)
        .map_err(|e| credo_core::CredoError::Store(e.to_string()))?;
    Ok(())
}

const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS verifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id TEXT NOT NULL,
    platform TEXT NOT NULL,
    handle TEXT NOT NULL,
    credibility_score INTEGER NOT NULL,
    report_json TEXT NOT NULL,
    timestamp TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS account_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id TEXT NOT NULL,
    reason TEXT,
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_verifications_account ON verifications(account_id, id DESC);
CREATE INDEX IF NOT EXISTS idx_reports_account ON account_reports(account_id);
"#;
