//! Review aggregation, star rows and public review submission input.

use serde::{Deserialize, Serialize};
use studio_core::parse_rfc3339;
use studio_store::Query;

use crate::error::AdminError;
use crate::model::Review;

pub const MAX_REVIEW_CHARS: usize = 300;
pub const MARQUEE_LIMIT: usize = 10;
pub const STAR_COUNT: u8 = 5;

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Mean rating rounded to one decimal; 0 when there are no reviews.
    pub average: f64,
    pub total: usize,
}

impl ReviewStats {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                average: 0.0,
                total: 0,
            };
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        Self {
            average: round1(f64::from(sum) / reviews.len() as f64),
            total: reviews.len(),
        }
    }

    /// "4.7", or "0" for an empty set.
    pub fn label(&self) -> String {
        if self.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.average)
        }
    }

    pub fn stars(&self) -> StarRow {
        StarRow::for_average(self.average)
    }
}

/// Five-star breakdown. `filled + half + empty` is always 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRow {
    pub filled: u8,
    pub half: bool,
    pub empty: u8,
}

impl StarRow {
    pub fn for_average(average: f64) -> Self {
        let clamped = average.clamp(0.0, f64::from(STAR_COUNT));
        let filled = clamped.floor() as u8;
        let half = filled < STAR_COUNT && clamped.fract() >= 0.5;
        Self {
            filled,
            half,
            empty: STAR_COUNT - filled - u8::from(half),
        }
    }
}

/// "★★★☆☆" for a single review card.
pub fn rating_stars(rating: u8) -> String {
    let filled = rating.min(STAR_COUNT) as usize;
    format!(
        "{}{}",
        "★".repeat(filled),
        "☆".repeat(STAR_COUNT as usize - filled)
    )
}

/// Newest first, at most [`MARQUEE_LIMIT`].
pub fn marquee_query() -> Query<Review> {
    Query::all()
        .order_by(|a: &Review, b: &Review| {
            let ta = a.created_at.as_deref().and_then(parse_rfc3339);
            let tb = b.created_at.as_deref().and_then(parse_rfc3339);
            tb.cmp(&ta)
        })
        .limit(MARQUEE_LIMIT)
}

/// Shown whenever the live set is empty or could not be read.
pub fn static_reviews() -> Vec<Review> {
    [
        ("Priya S.", 5, "They caught every little moment of our wedding. The album still makes us cry."),
        ("Rahul M.", 5, "Patient with the kids and the photos came out beautifully. Highly recommended."),
        ("Ananya K.", 4, "Lovely maternity shoot, great locations and a very relaxed team."),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, rating, text))| Review {
        id: format!("static-{}", i + 1),
        name: name.to_string(),
        rating,
        text: text.to_string(),
        created_at: None,
    })
    .collect()
}

/// Non-whitespace characters, the unit of the review length limit.
pub fn char_count(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Public review form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub name: String,
    pub rating: u8,
    pub text: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            rating: STAR_COUNT,
            text: String::new(),
        }
    }
}

impl ReviewDraft {
    /// Input-time limit: an edit that would exceed the limit is refused and
    /// the previous text kept. Returns whether the edit was taken.
    pub fn set_text(&mut self, proposed: &str) -> bool {
        if char_count(proposed) > MAX_REVIEW_CHARS {
            return false;
        }
        self.text = proposed.to_string();
        true
    }

    pub fn remaining_chars(&self) -> usize {
        MAX_REVIEW_CHARS.saturating_sub(char_count(&self.text))
    }

    pub fn validate(&self) -> Result<Review, AdminError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AdminError::Validation("name is required".into()));
        }
        if !(1..=STAR_COUNT).contains(&self.rating) {
            return Err(AdminError::Validation("rating must be between 1 and 5".into()));
        }
        let text = self.text.trim();
        if text.is_empty() {
            return Err(AdminError::Validation("review text is required".into()));
        }
        if char_count(text) > MAX_REVIEW_CHARS {
            return Err(AdminError::Validation(format!(
                "review text is limited to {} characters",
                MAX_REVIEW_CHARS
            )));
        }
        Ok(Review {
            id: String::new(),
            name: name.to_string(),
            rating: self.rating,
            text: text.to_string(),
            created_at: None,
        })
    }
}
