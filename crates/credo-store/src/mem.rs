use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use credo_core::{AccountReport, CredoResult, VerificationRecord};

use crate::{NewVerification, RecordStore};

/// In-memory store. The default backend: everything lives in process memory
/// for the process lifetime, which is the accepted limitation of the mock
/// design.
pub struct MemStore {
    records: DashMap<u64, VerificationRecord>,
    by_account: DashMap<String, Vec<u64>>,
    reports: DashMap<u64, AccountReport>,
    next_record_id: AtomicU64,
    next_report_id: AtomicU64,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            by_account: DashMap::new(),
            reports: DashMap::new(),
            next_record_id: AtomicU64::new(1),
            next_report_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemStore {
    fn save_verification(&self, new: NewVerification) -> CredoResult<VerificationRecord> {
        let id = self.next_record_id.fetch_add(1, Ordering::Relaxed);
        let record = VerificationRecord {
            id,
            account_id: new.account_id.clone(),
            platform: new.platform,
            handle: new.handle,
            credibility_score: new.credibility_score,
            report: new.report,
            timestamp: Utc::now(),
        };
        // The record must land before its id is published in the index, or a
        // concurrent reader can see the id and miss the record. Ids within an
        // account's index are appended in save order, so the last element is
        // always the most recent record.
        self.records.insert(id, record.clone());
        self.by_account.entry(new.account_id).or_default().push(id);
        Ok(record)
    }

    fn most_recent_for(&self, account_id: &str) -> CredoResult<Option<VerificationRecord>> {
        let id = match self.by_account.get(account_id) {
            Some(ids) => match ids.last() {
                Some(id) => *id,
                None => return Ok(None),
            },
            None => return Ok(None),
        };
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    fn history_for(&self, account_id: &str, limit: usize) -> CredoResult<Vec<VerificationRecord>> {
        let ids: Vec<u64> = match self.by_account.get(account_id) {
            Some(ids) => ids.iter().rev().take(limit).copied().collect(),
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .into_iter()
            .filter_map(|id| self.records.get(&id).map(|r| r.value().clone()))
            .collect())
    }

    fn recent(&self, limit: usize) -> CredoResult<Vec<VerificationRecord>> {
        let mut all: Vec<VerificationRecord> =
            self.records.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        all.truncate(limit);
        Ok(all)
    }

    fn save_report(&self, account_id: &str, reason: Option<String>) -> CredoResult<AccountReport> {
        let id = self.next_report_id.fetch_add(1, Ordering::Relaxed);
        let report = AccountReport {
            id,
            account_id: account_id.to_string(),
            reason,
            timestamp: Utc::now(),
        };
        self.reports.insert(id, report.clone());
        Ok(report)
    }

    fn reports_for(&self, account_id: &str) -> CredoResult<Vec<AccountReport>> {
        let mut matching: Vec<AccountReport> = self
            .reports
            .iter()
            .filter(|e| e.value().account_id == account_id)
            .map(|e| e.value().clone())
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::{Platform, VerificationReport};

    fn new_verification(account_id: &str, score: u32) -> NewVerification {
        NewVerification {
            account_id: account_id.to_string(),
            platform: Platform::Twitter,
            handle: format!("@{}", account_id.trim_start_matches("twitter-")),
            credibility_score: score,
            report: VerificationReport {
                account_id: account_id.to_string(),
                account_handle: "@x".into(),
                platform_name: "Twitter".into(),
                credibility_score: score,
                score_factors: vec![],
                human_likelihood: score.clamp(5, 95),
                bot_behavior_indicators: vec![],
                credibility_suggestions: vec![],
                display_name: "X".into(),
                account_creation_date: "May 1, 2023".into(),
                is_verified: score > 70,
                followers_count: "10.0K".into(),
                following_count: "200".into(),
                account_bio: "bio".into(),
                profile_image_url: None,
            },
        }
    }

    #[test]
    fn save_then_most_recent_round_trips() {
        let store = MemStore::new();
        let saved = store
            .save_verification(new_verification("twitter-foo", 80))
            .unwrap();
        let fetched = store.most_recent_for("twitter-foo").unwrap().unwrap();
        assert_eq!(fetched.id, saved.id);
        assert_eq!(fetched.account_id, "twitter-foo");
        assert_eq!(fetched.credibility_score, 80);
        assert_eq!(fetched.report.followers_count, "10.0K");
        assert_eq!(fetched.timestamp, saved.timestamp);
    }

    #[test]
    fn reverification_appends_and_most_recent_wins() {
        let store = MemStore::new();
        store
            .save_verification(new_verification("twitter-foo", 40))
            .unwrap();
        store
            .save_verification(new_verification("twitter-foo", 90))
            .unwrap();

        let latest = store.most_recent_for("twitter-foo").unwrap().unwrap();
        assert_eq!(latest.credibility_score, 90);

        let history = store.history_for("twitter-foo", 10).unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].id > history[1].id);
    }

    #[test]
    fn history_respects_the_limit() {
        let store = MemStore::new();
        for i in 0..5 {
            store
                .save_verification(new_verification("twitter-foo", 50 + i))
                .unwrap();
        }
        let history = store.history_for("twitter-foo", 2).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].credibility_score, 54);
    }

    #[test]
    fn unknown_account_has_no_record() {
        let store = MemStore::new();
        assert!(store.most_recent_for("twitter-ghost").unwrap().is_none());
        assert!(store.history_for("twitter-ghost", 10).unwrap().is_empty());
    }

    #[test]
    fn recent_spans_all_accounts_newest_first() {
        let store = MemStore::new();
        store
            .save_verification(new_verification("twitter-a", 50))
            .unwrap();
        store
            .save_verification(new_verification("twitter-b", 60))
            .unwrap();
        let recent = store.recent(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].account_id, "twitter-b");
    }

    #[test]
    fn ids_are_unique_under_concurrent_saves() {
        let store = std::sync::Arc::new(MemStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                let mut ids = Vec::new();
                for _ in 0..50 {
                    ids.push(
                        store
                            .save_verification(new_verification("twitter-foo", 70))
                            .unwrap()
                            .id,
                    );
                }
                ids
            }));
        }
        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }

    #[test]
    fn committed_history_stays_visible_while_a_writer_appends() {
        let store = std::sync::Arc::new(MemStore::new());
        store
            .save_verification(new_verification("twitter-foo", 70))
            .unwrap();

        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for _ in 0..2_000 {
                    store
                        .save_verification(new_verification("twitter-foo", 70))
                        .unwrap();
                }
            })
        };

        // One save has committed, so the account must never read back empty.
        while !writer.is_finished() {
            assert!(store.most_recent_for("twitter-foo").unwrap().is_some());
            assert!(!store.history_for("twitter-foo", 5).unwrap().is_empty());
        }
        writer.join().unwrap();
    }

    #[test]
    fn reports_are_filtered_and_newest_first() {
        let store = MemStore::new();
        store.save_report("twitter-foo", None).unwrap();
        store
            .save_report("twitter-foo", Some("impersonation".into()))
            .unwrap();
        store.save_report("twitter-bar", None).unwrap();

        let reports = store.reports_for("twitter-foo").unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].reason.as_deref(), Some("impersonation"));
    }
}
