pub mod mem;
pub mod sqlite;

mod schema;

use credo_core::{AccountReport, CredoResult, Platform, VerificationRecord, VerificationReport};

pub use mem::MemStore;
pub use sqlite::SqliteStore;

/// A verification result ready to be persisted. The store assigns the id and
/// timestamp on save.
#[derive(Debug, Clone)]
pub struct NewVerification {
    pub account_id: String,
    pub platform: Platform,
    pub handle: String,
    pub credibility_score: u32,
    pub report: VerificationReport,
}

/// Append-only keyed store of verification results and account reports.
///
/// There are no update or delete operations and no capacity bound; records
/// accumulate for the process (or database) lifetime. Id assignment is
/// serialized so concurrent saves never produce duplicate ids.
pub trait RecordStore: Send + Sync {
    fn save_verification(&self, new: NewVerification) -> CredoResult<VerificationRecord>;

    /// The latest record for an account id, if any.
    fn most_recent_for(&self, account_id: &str) -> CredoResult<Option<VerificationRecord>>;

    /// Up to `limit` records for an account id, newest first.
    fn history_for(&self, account_id: &str, limit: usize) -> CredoResult<Vec<VerificationRecord>>;

    /// Up to `limit` records across all accounts, newest first.
    fn recent(&self, limit: usize) -> CredoResult<Vec<VerificationRecord>>;

    fn save_report(&self, account_id: &str, reason: Option<String>) -> CredoResult<AccountReport>;

    /// Reports filed against an account id, newest first.
    fn reports_for(&self, account_id: &str) -> CredoResult<Vec<AccountReport>>;
}
