use credo_core::BotIndicator;

/// Indicator texts are fixed per likelihood bracket; they are narrative
/// dressing for the report, not computed from real signal.
pub fn generate_bot_indicators(human_likelihood: u32) -> Vec<BotIndicator> {
    let mut indicators = Vec::new();

    if human_likelihood > 70 {
        indicators.push(positive("Natural language patterns in posts"));
        indicators.push(positive("Irregular posting schedule (human-like)"));
        if human_likelihood < 90 {
            indicators.push(negative("High volume of posts in short time periods"));
        }
    } else {
        indicators.push(negative("Repetitive content patterns detected"));
        indicators.push(negative("Unusual posting times (possible automation)"));
        indicators.push(negative("Limited engagement with followers"));
        if human_likelihood > 40 {
            indicators.push(positive("Some personalized responses to comments"));
        }
    }

    indicators
}

pub fn credibility_suggestions(credibility_score: u32) -> Vec<String> {
    let texts: &[&str] = if credibility_score > 80 {
        &[
            "This account shows strong indicators of being authentic",
            "The account has established history and engagement patterns",
            "Always verify important information from any account through official channels",
        ]
    } else if credibility_score > 50 {
        &[
            "This account shows mixed credibility signals",
            "Exercise caution when interacting with this account",
            "Look for additional verification such as linked official websites",
            "Check if the account is followed by other verified accounts you trust",
        ]
    } else {
        &[
            "This account shows multiple suspicious patterns",
            "Avoid sharing personal information with this account",
            "Consider reporting this account if it's impersonating someone",
            "Be very cautious about any links or requests from this account",
        ]
    };
    texts.iter().map(|s| s.to_string()).collect()
}

fn positive(text: &str) -> BotIndicator {
    BotIndicator {
        is_positive: true,
        text: text.to_string(),
    }
}

fn negative(text: &str) -> BotIndicator {
    BotIndicator {
        is_positive: false,
        text: text.to_string(),
    }
}
