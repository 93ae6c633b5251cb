use chrono::Utc;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};

use credo_core::{
    AccountReport, CredoError, CredoResult, Platform, VerificationRecord,
};

use crate::{NewVerification, RecordStore};

/// SQLite-backed store for deployments that want verification history to
/// survive restarts. Same contract as `MemStore`; id assignment is serialized
/// by the connection mutex.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: &str) -> CredoResult<Self> {
        let conn = Connection::open(path).map_err(|e| CredoError::Store(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL; PRAGMA busy_timeout=5000;",
        )
        .map_err(|e| CredoError::Store(e.to_string()))?;
        crate::schema::run_migrations(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> CredoResult<T>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CredoError::Store(e.to_string()))?;
        f(&conn).map_err(|e| CredoError::Store(e.to_string()))
    }
}

fn record_from_row(row: &Row<'_>) -> Result<VerificationRecord, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let platform_str: String = row.get(2)?;
    let report_str: String = row.get(5)?;
    let ts_str: String = row.get(6)?;
    Ok(VerificationRecord {
        id: id as u64,
        account_id: row.get(1)?,
        platform: Platform::parse(&platform_str).unwrap_or(Platform::Twitter),
        handle: row.get(3)?,
        credibility_score: row.get::<_, i64>(4)? as u32,
        report: serde_json::from_str(&report_str).unwrap_or_else(|_| empty_report(row)),
        timestamp: chrono::DateTime::parse_from_rfc3339(&ts_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}

// Fallback when stored report JSON is unreadable; keeps the row usable for
// history listings.
fn empty_report(row: &Row<'_>) -> credo_core::VerificationReport {
    let account_id: String = row.get(1).unwrap_or_default();
    let handle: String = row.get(3).unwrap_or_default();
    let score = row.get::<_, i64>(4).unwrap_or(0) as u32;
    credo_core::VerificationReport {
        account_id,
        account_handle: handle,
        platform_name: String::new(),
        credibility_score: score,
        score_factors: Vec::new(),
        human_likelihood: score.clamp(5, 95),
        bot_behavior_indicators: Vec::new(),
        credibility_suggestions: Vec::new(),
        display_name: String::new(),
        account_creation_date: String::new(),
        is_verified: score > 70,
        followers_count: String::new(),
        following_count: String::new(),
        account_bio: String::new(),
        profile_image_url: None,
    }
}

const RECORD_COLS: &str =
    "id, account_id, platform, handle, credibility_score, report_json, timestamp";

impl RecordStore for SqliteStore {
    fn save_verification(&self, new: NewVerification) -> CredoResult<VerificationRecord> {
        let report_json =
            serde_json::to_string(&new.report).map_err(|e| CredoError::Store(e.to_string()))?;
        let timestamp = Utc::now();
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO verifications (account_id, platform, handle, credibility_score, report_json, timestamp) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    new.account_id,
                    new.platform.wire_name(),
                    new.handle,
                    new.credibility_score as i64,
                    report_json,
                    timestamp.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(VerificationRecord {
            id: id as u64,
            account_id: new.account_id,
            platform: new.platform,
            handle: new.handle,
            credibility_score: new.credibility_score,
            report: new.report,
            timestamp,
        })
    }

    fn most_recent_for(&self, account_id: &str) -> CredoResult<Option<VerificationRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLS} FROM verifications WHERE account_id = ?1 ORDER BY id DESC LIMIT 1",
            ))?;
            let mut rows = stmt.query_map(params![account_id], record_from_row)?;
            rows.next().transpose()
        })
    }

    fn history_for(&self, account_id: &str, limit: usize) -> CredoResult<Vec<VerificationRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLS} FROM verifications WHERE account_id = ?1 ORDER BY id DESC LIMIT ?2",
            ))?;
            let rows = stmt.query_map(params![account_id, limit as i64], record_from_row)?;
            rows.collect()
        })
    }

    fn recent(&self, limit: usize) -> CredoResult<Vec<VerificationRecord>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLS} FROM verifications ORDER BY id DESC LIMIT ?1",
            ))?;
            let rows = stmt.query_map(params![limit as i64], record_from_row)?;
            rows.collect()
        })
    }

    fn save_report(&self, account_id: &str, reason: Option<String>) -> CredoResult<AccountReport> {
        let timestamp = Utc::now();
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account_reports (account_id, reason, timestamp) VALUES (?1, ?2, ?3)",
                params![account_id, reason, timestamp.to_rfc3339()],
            )?;
            Ok(conn.last_insert_rowid())
        })?;
        Ok(AccountReport {
            id: id as u64,
            account_id: account_id.to_string(),
            reason,
            timestamp,
        })
    }

    fn reports_for(&self, account_id: &str) -> CredoResult<Vec<AccountReport>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, account_id, reason, timestamp FROM account_reports WHERE account_id = ?1 ORDER BY id DESC",
            )?;
            let rows = stmt.query_map(params![account_id], |row| {
                let id: i64 = row.get(0)?;
                let ts_str: String = row.get(3)?;
                Ok(AccountReport {
                    id: id as u64,
                    account_id: row.get(1)?,
                    reason: row.get(2)?,
                    timestamp: chrono::DateTime::parse_from_rfc3339(&ts_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                })
            })?;
            rows.collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::VerificationReport;

    fn sample(account_id: &str, score: u32) -> NewVerification {
        NewVerification {
            account_id: account_id.to_string(),
            platform: Platform::Instagram,
            handle: "@sample".into(),
            credibility_score: score,
            report: VerificationReport {
                account_id: account_id.to_string(),
                account_handle: "@sample".into(),
                platform_name: "Instagram".into(),
                credibility_score: score,
                score_factors: vec![],
                human_likelihood: score.clamp(5, 95),
                bot_behavior_indicators: vec![],
                credibility_suggestions: vec![],
                display_name: "Sample".into(),
                account_creation_date: "June 2, 2024".into(),
                is_verified: score > 70,
                followers_count: "55.5K".into(),
                following_count: "123".into(),
                account_bio: "bio".into(),
                profile_image_url: None,
            },
        }
    }

    fn open_temp() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credo.db");
        let store = SqliteStore::open(path.to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn save_then_fetch_round_trips() {
        let (_dir, store) = open_temp();
        let saved = store.save_verification(sample("instagram-sample", 77)).unwrap();
        assert_eq!(saved.id, 1);

        let fetched = store.most_recent_for("instagram-sample").unwrap().unwrap();
        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.platform, Platform::Instagram);
        assert_eq!(fetched.report.followers_count, "55.5K");
        assert!(fetched.report.is_verified);
    }

    #[test]
    fn history_is_append_only_newest_first() {
        let (_dir, store) = open_temp();
        store.save_verification(sample("instagram-sample", 40)).unwrap();
        store.save_verification(sample("instagram-sample", 85)).unwrap();

        let history = store.history_for("instagram-sample", 10).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].credibility_score, 85);

        let latest = store.most_recent_for("instagram-sample").unwrap().unwrap();
        assert_eq!(latest.credibility_score, 85);
    }

    #[test]
    fn report_ids_are_monotonic() {
        let (_dir, store) = open_temp();
        let first = store.save_report("instagram-sample", None).unwrap();
        let second = store
            .save_report("instagram-sample", Some("spam".into()))
            .unwrap();
        assert!(second.id > first.id);

        let reports = store.reports_for("instagram-sample").unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].reason.as_deref(), Some("spam"));
    }
}
