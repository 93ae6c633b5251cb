use credo_core::{CredoResult, Platform, VerificationRecord, VerificationReport};
use credo_store::{NewVerification, RecordStore};
use tracing::info;

use crate::enrich::Enrich;
use crate::factors::generate_score_factors;
use crate::indicators::{credibility_suggestions, generate_bot_indicators};
use crate::rng::Rng;

/// Canonical display form of a submitted handle or profile URL: leading "@"
/// input is kept as-is, URLs contribute their last path segment, bare names
/// get an "@" prefix.
pub fn normalize_handle(input: &str) -> String {
    if input.starts_with('@') {
        return input.to_string();
    }
    if input.contains('/') {
        let last = input.rsplit('/').next().unwrap_or(input);
        let stripped = last.split(['?', '#']).next().unwrap_or(last);
        return format!("@{stripped}");
    }
    format!("@{input}")
}

/// Deterministic primary key: `platform + "-" + lowercased handle without "@"`.
pub fn account_id(handle: &str, platform: Platform) -> String {
    let bare = handle.trim_start_matches('@').to_lowercase();
    format!("{}-{}", platform.wire_name(), bare)
}

/// Compute a full scoring report for a handle. Pure apart from the injected
/// randomness; persistence is the caller's (or `verify`'s) concern.
pub fn score(
    input: &str,
    platform: Platform,
    enricher: &dyn Enrich,
    rng: &mut Rng,
) -> VerificationReport {
    let handle = normalize_handle(input);
    let factors = generate_score_factors(&handle, rng);

    let total: u32 = factors.iter().map(|f| f.score).sum();
    let mean = (total as f64 / factors.len() as f64).round() as u32;
    let credibility_score = mean;
    let human_likelihood = mean.clamp(5, 95);

    VerificationReport {
        account_id: account_id(&handle, platform),
        account_handle: handle.clone(),
        platform_name: platform.display_name().to_string(),
        credibility_score,
        score_factors: factors,
        human_likelihood,
        bot_behavior_indicators: generate_bot_indicators(human_likelihood),
        credibility_suggestions: credibility_suggestions(credibility_score),
        display_name: enricher.display_name(&handle),
        account_creation_date: enricher.creation_date(rng),
        is_verified: credibility_score > 70,
        followers_count: enricher.followers_count(credibility_score, rng),
        following_count: enricher.following_count(rng),
        account_bio: enricher.account_bio(credibility_score),
        profile_image_url: enricher.profile_image_url(),
    }
}

/// Score a handle and persist the result before returning it. Each call
/// appends a new historical record; nothing is persisted if the save fails.
pub fn verify(
    store: &dyn RecordStore,
    input: &str,
    platform: Platform,
    enricher: &dyn Enrich,
    rng: &mut Rng,
) -> CredoResult<VerificationRecord> {
    let report = score(input, platform, enricher, rng);
    let record = store.save_verification(NewVerification {
        account_id: report.account_id.clone(),
        platform,
        handle: report.account_handle.clone(),
        credibility_score: report.credibility_score,
        report,
    })?;
    info!(
        account = %record.account_id,
        score = record.credibility_score,
        human = record.report.human_likelihood,
        "account verified"
    );
    Ok(record)
}
