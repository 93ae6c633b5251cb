use credo_core::{VerificationRecord, VerificationReport};

pub struct PairSimilarity {
    pub content: u32,
    pub behavior: u32,
}

/// Similarity between the most recent records of two accounts. When either
/// account has no verification history both components default to the neutral
/// midpoint of 50, so missing history is never penalized.
pub fn pair_similarity(
    a: Option<&VerificationRecord>,
    b: Option<&VerificationRecord>,
) -> PairSimilarity {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return PairSimilarity {
                content: 50,
                behavior: 50,
            }
        }
    };
    PairSimilarity {
        content: content_similarity(&a.report, &b.report),
        behavior: behavior_similarity(a, b),
    }
}

/// 0-100: 10 points for matching verified flags, up to 20 each for close
/// credibility and human-likelihood scores, up to 50 for factor-by-factor
/// agreement.
fn content_similarity(r1: &VerificationReport, r2: &VerificationReport) -> u32 {
    let mut score = 0.0f64;

    if r1.is_verified == r2.is_verified {
        score += 10.0;
    }

    let cred_diff = (r1.credibility_score as f64 - r2.credibility_score as f64).abs();
    score += (20.0 - cred_diff / 5.0).max(0.0);

    let human_diff = (r1.human_likelihood as f64 - r2.human_likelihood as f64).abs();
    score += (20.0 - human_diff / 5.0).max(0.0);

    let factor_sim = if !r1.score_factors.is_empty() && !r2.score_factors.is_empty() {
        let mut sum = 0.0f64;
        for f1 in &r1.score_factors {
            if let Some(f2) = r2.score_factors.iter().find(|f| f.name == f1.name) {
                let diff = (f1.score as f64 - f2.score as f64).abs();
                sum += (25.0 - diff / 4.0).max(0.0);
            }
        }
        sum / (r1.score_factors.len() as f64 * 25.0) * 50.0
    } else {
        25.0
    };
    score += factor_sim;

    (score.round() as u32).min(100)
}

/// 0-100: up to 60 for indicator overlap, 20/10 for platform match, up to 20
/// when the two verifications happened within an hour of each other (a hint
/// of coordinated verification attempts).
fn behavior_similarity(rec1: &VerificationRecord, rec2: &VerificationRecord) -> u32 {
    let r1 = &rec1.report;
    let r2 = &rec2.report;
    let mut score = 0.0f64;

    if r1.bot_behavior_indicators.is_empty() {
        score += 30.0;
    } else {
        let matches = r1
            .bot_behavior_indicators
            .iter()
            .filter(|i1| {
                let prefix: String = i1.text.to_lowercase().chars().take(10).collect();
                r2.bot_behavior_indicators
                    .iter()
                    .any(|i2| i2.is_positive == i1.is_positive && i2.text.to_lowercase().contains(&prefix))
            })
            .count();
        score += matches as f64 / r1.bot_behavior_indicators.len() as f64 * 60.0;
    }

    score += if rec1.platform == rec2.platform { 20.0 } else { 10.0 };

    let minutes_apart = (rec1.timestamp - rec2.timestamp).num_seconds().abs() as f64 / 60.0;
    if minutes_apart < 60.0 {
        score += (20.0 - minutes_apart / 3.0).max(0.0);
    }

    (score.round() as u32).min(100)
}

/// 0-100 proximity of the two verification timestamps, one point lost per
/// minute apart. Defaults to the neutral midpoint when either side is
/// missing.
pub fn creation_proximity(
    a: Option<&VerificationRecord>,
    b: Option<&VerificationRecord>,
) -> u32 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let minutes = (a.timestamp - b.timestamp).num_seconds().abs() as f64 / 60.0;
            (100.0 - minutes).max(0.0).round() as u32
        }
        _ => 50,
    }
}

/// Parse a display-formatted follower count ("12.5K", "1.2M", or a literal
/// integer). Unparseable input counts as zero.
pub fn parse_follower_count(formatted: &str) -> u64 {
    if let Some(k) = formatted.strip_suffix('K') {
        (k.parse::<f64>().unwrap_or(0.0) * 1_000.0).round() as u64
    } else if let Some(m) = formatted.strip_suffix('M') {
        (m.parse::<f64>().unwrap_or(0.0) * 1_000_000.0).round() as u64
    } else {
        formatted.parse().unwrap_or(0)
    }
}

pub fn estimate_common_followers(formatted: &str, similarity_percentage: u32) -> u64 {
    let count = parse_follower_count(formatted);
    ((count as f64 * similarity_percentage as f64) / 100.0).round() as u64
}
