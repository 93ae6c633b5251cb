use credo_core::{
    AccountComparison, ComparisonResult, CredoError, CredoResult, VerificationRecord,
};
use credo_store::RecordStore;
use tracing::info;

use crate::similarity::{creation_proximity, estimate_common_followers, pair_similarity};

/// Overall similarity above this marks the set as possibly coordinated.
const CONNECTION_THRESHOLD: u32 = 70;

/// Compare the most recent verification records of two or more accounts.
///
/// Each requested account is scored against every other one and reports the
/// mean of its pairwise metrics; accounts with no stored record fall back to
/// the neutral midpoint in every pair they appear in.
pub fn compare(store: &dyn RecordStore, account_ids: &[String]) -> CredoResult<ComparisonResult> {
    if account_ids.len() < 2 {
        return Err(CredoError::Validation(
            "at least 2 account ids are required for comparison".to_string(),
        ));
    }

    let records: Vec<Option<VerificationRecord>> = account_ids
        .iter()
        .map(|id| store.most_recent_for(id))
        .collect::<CredoResult<_>>()?;

    let n = account_ids.len();
    let others = (n - 1) as f64;
    let mut accounts = Vec::with_capacity(n);

    for i in 0..n {
        let mut content_sum = 0.0f64;
        let mut behavior_sum = 0.0f64;
        let mut proximity_sum = 0.0f64;

        for j in 0..n {
            if i == j {
                continue;
            }
            let pair = pair_similarity(records[i].as_ref(), records[j].as_ref());
            content_sum += pair.content as f64;
            behavior_sum += pair.behavior as f64;
            proximity_sum += creation_proximity(records[i].as_ref(), records[j].as_ref()) as f64;
        }

        let content_similarity = (content_sum / others).round() as u32;
        let behavior_similarity = (behavior_sum / others).round() as u32;
        let similarity_score =
            ((content_similarity + behavior_similarity) as f64 / 2.0).round() as u32;

        let common_followers = records[i]
            .as_ref()
            .map(|r| estimate_common_followers(&r.report.followers_count, similarity_score))
            .unwrap_or(0);

        accounts.push(AccountComparison {
            account_id: account_ids[i].clone(),
            similarity_score,
            common_followers,
            creation_date_proximity: (proximity_sum / others).round() as u32,
            content_similarity,
            behavior_pattern_similarity: behavior_similarity,
        });
    }

    let overall_similarity = (accounts
        .iter()
        .map(|a| a.similarity_score as f64)
        .sum::<f64>()
        / n as f64)
        .round() as u32;
    let possible_connection = overall_similarity > CONNECTION_THRESHOLD;

    info!(
        accounts = n,
        overall = overall_similarity,
        connected = possible_connection,
        "accounts compared"
    );

    Ok(ComparisonResult {
        accounts,
        overall_similarity,
        possible_connection,
    })
}
