use credo_core::ScoreFactor;

use crate::rng::Rng;

/// Generate the fixed four-factor set for a normalized handle. Each factor is
/// drawn from its own sub-range and described by its quality tier
/// (>80 / >50 / else).
pub fn generate_score_factors(handle: &str, rng: &mut Rng) -> Vec<ScoreFactor> {
    let bare_len = handle.trim_start_matches('@').chars().count();

    let account_age = 50 + rng.below(50);
    let verified_status = if bare_len > 5 {
        80 + rng.below(20)
    } else {
        30 + rng.below(40)
    };
    let posting_patterns = 40 + rng.below(60);
    let engagement_ratio = 30 + rng.below(70);

    vec![
        ScoreFactor {
            name: "Account Age".to_string(),
            score: account_age,
            description: tier(
                account_age,
                "Account exists for several years (Excellent)",
                "Account created within last year (Good)",
                "Recently created account (Concerning)",
            ),
        },
        ScoreFactor {
            name: "Verified Status".to_string(),
            score: verified_status,
            description: tier(
                verified_status,
                "Officially verified account",
                "Verification status unclear",
                "Not verified",
            ),
        },
        ScoreFactor {
            name: "Posting Patterns".to_string(),
            score: posting_patterns,
            description: tier(
                posting_patterns,
                "Natural posting frequency",
                "Somewhat irregular posting",
                "Unusual posting frequency",
            ),
        },
        ScoreFactor {
            name: "Engagement Ratio".to_string(),
            score: engagement_ratio,
            description: tier(
                engagement_ratio,
                "High follower interaction",
                "Moderate follower interaction",
                "Low follower engagement",
            ),
        },
    ]
}

fn tier(score: u32, high: &str, mid: &str, low: &str) -> String {
    if score > 80 {
        high.to_string()
    } else if score > 50 {
        mid.to_string()
    } else {
        low.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_scores_stay_in_their_sub_ranges() {
        let mut rng = Rng::seeded(1);
        for _ in 0..200 {
            let factors = generate_score_factors("@somebody", &mut rng);
            assert_eq!(factors.len(), 4);
            let by_name: Vec<(&str, u32)> = factors
                .iter()
                .map(|f| (f.name.as_str(), f.score))
                .collect();
            for (name, score) in by_name {
                match name {
                    "Account Age" => assert!((50..=99).contains(&score)),
                    "Verified Status" => assert!((80..=99).contains(&score)),
                    "Posting Patterns" => assert!((40..=99).contains(&score)),
                    "Engagement Ratio" => assert!((30..=99).contains(&score)),
                    other => panic!("unexpected factor {other}"),
                }
            }
        }
    }

    #[test]
    fn short_handles_get_the_low_verified_range() {
        let mut rng = Rng::seeded(2);
        for _ in 0..200 {
            let factors = generate_score_factors("@bob", &mut rng);
            let verified = factors.iter().find(|f| f.name == "Verified Status").unwrap();
            assert!((30..=69).contains(&verified.score));
        }
    }

    #[test]
    fn descriptions_follow_the_score_tier() {
        assert_eq!(tier(85, "h", "m", "l"), "h");
        assert_eq!(tier(80, "h", "m", "l"), "m");
        assert_eq!(tier(51, "h", "m", "l"), "m");
        assert_eq!(tier(50, "h", "m", "l"), "l");
    }
}
