use chrono::{Datelike, Utc};

use crate::rng::Rng;

/// Cosmetic profile fields (name, bio, counts, creation date). These carry no
/// analytical weight; the trait exists so a real data source can replace the
/// mock generation without touching the scoring contract.
pub trait Enrich: Send + Sync {
    fn display_name(&self, handle: &str) -> String;
    fn creation_date(&self, rng: &mut Rng) -> String;
    fn followers_count(&self, credibility_score: u32, rng: &mut Rng) -> String;
    fn following_count(&self, rng: &mut Rng) -> String;
    fn account_bio(&self, credibility_score: u32) -> String;

    fn profile_image_url(&self) -> Option<String> {
        None
    }
}

pub struct MockEnricher;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Enrich for MockEnricher {
    fn display_name(&self, handle: &str) -> String {
        let bare = handle.trim_start_matches('@');
        let mut chars = bare.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    }

    fn creation_date(&self, rng: &mut Rng) -> String {
        // A synthetic creation date up to three years back.
        let now = Utc::now();
        let months_back = rng.below(36) as i32;
        let day = 1 + rng.below(28);
        let total_months = now.year() * 12 + now.month0() as i32 - months_back;
        let year = total_months.div_euclid(12);
        let month = total_months.rem_euclid(12) as usize;
        format!("{} {}, {}", MONTHS[month], day, year)
    }

    fn followers_count(&self, credibility_score: u32, rng: &mut Rng) -> String {
        if credibility_score > 80 {
            format_count(100_000 + rng.below(900_000) as u64)
        } else if credibility_score > 50 {
            format_count(10_000 + rng.below(90_000) as u64)
        } else {
            (1_000 + rng.below(9_000) as u64).to_string()
        }
    }

    fn following_count(&self, rng: &mut Rng) -> String {
        (100 + rng.below(900)).to_string()
    }

    fn account_bio(&self, credibility_score: u32) -> String {
        if credibility_score > 80 {
            "Official account. For inquiries, please contact through official channels."
        } else if credibility_score > 50 {
            "Digital enthusiast sharing thoughts and experiences. Views are my own."
        } else {
            "Just here for the content! Follow for follow back!"
        }
        .to_string()
    }
}

/// Display-format a follower count with a K or M suffix.
pub fn format_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else {
        format!("{:.1}K", count as f64 / 1_000.0)
    }
}
