use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Twitter,
    Instagram,
    Facebook,
    Tiktok,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::Tiktok => "TikTok",
        }
    }

    /// Lowercase form used on the wire and in account ids.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
        }
    }

    pub fn parse(s: &str) -> Option<Platform> {
        match s.to_lowercase().as_str() {
            "twitter" => Some(Platform::Twitter),
            "instagram" => Some(Platform::Instagram),
            "facebook" => Some(Platform::Facebook),
            "tiktok" => Some(Platform::Tiktok),
            _ => None,
        }
    }
}

/// One named sub-metric contributing to the credibility score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub name: String,
    pub score: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotIndicator {
    pub is_positive: bool,
    pub text: String,
}

/// The full scoring report returned to the client. Field names follow the
/// public JSON contract (camelCase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub account_id: String,
    pub account_handle: String,
    pub platform_name: String,
    pub credibility_score: u32,
    pub score_factors: Vec<ScoreFactor>,
    pub human_likelihood: u32,
    pub bot_behavior_indicators: Vec<BotIndicator>,
    pub credibility_suggestions: Vec<String>,
    pub display_name: String,
    pub account_creation_date: String,
    pub is_verified: bool,
    pub followers_count: String,
    pub following_count: String,
    pub account_bio: String,
    pub profile_image_url: Option<String>,
}

/// A persisted scoring result. Records are append-only: re-verifying the same
/// handle creates a new record, and comparisons read the most recent one per
/// account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    pub id: u64,
    pub account_id: String,
    pub platform: Platform,
    pub handle: String,
    pub credibility_score: u32,
    pub report: VerificationReport,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub id: u64,
    pub account_id: String,
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountComparison {
    pub account_id: String,
    pub similarity_score: u32,
    pub common_followers: u64,
    pub creation_date_proximity: u32,
    pub content_similarity: u32,
    pub behavior_pattern_similarity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub accounts: Vec<AccountComparison>,
    pub overall_similarity: u32,
    pub possible_connection: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_wire_form_is_lowercase() {
        let json = serde_json::to_string(&Platform::Tiktok).unwrap();
        assert_eq!(json, "\"tiktok\"");
        let back: Platform = serde_json::from_str("\"twitter\"").unwrap();
        assert_eq!(back, Platform::Twitter);
    }

    #[test]
    fn platform_display_names() {
        assert_eq!(Platform::Tiktok.display_name(), "TikTok");
        assert_eq!(Platform::Twitter.display_name(), "Twitter");
        assert_eq!(Platform::parse("TikTok"), Some(Platform::Tiktok));
        assert_eq!(Platform::parse("myspace"), None);
    }

    #[test]
    fn report_serializes_with_camel_case_fields() {
        let report = VerificationReport {
            account_id: "twitter-foo".into(),
            account_handle: "@foo".into(),
            platform_name: "Twitter".into(),
            credibility_score: 72,
            score_factors: vec![],
            human_likelihood: 72,
            bot_behavior_indicators: vec![BotIndicator {
                is_positive: true,
                text: "Natural language patterns in posts".into(),
            }],
            credibility_suggestions: vec![],
            display_name: "Foo".into(),
            account_creation_date: "March 4, 2024".into(),
            is_verified: true,
            followers_count: "12.5K".into(),
            following_count: "350".into(),
            account_bio: "bio".into(),
            profile_image_url: None,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["accountHandle"], "@foo");
        assert_eq!(value["credibilityScore"], 72);
        assert_eq!(value["botBehaviorIndicators"][0]["isPositive"], true);
        assert!(value["profileImageUrl"].is_null());
    }
}
