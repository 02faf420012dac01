use std::fmt;

use serde::{Deserialize, Serialize};

/// Max distance between a photo's ratio and a bucket for the bucket to apply.
pub const TOLERANCE: f64 = 0.15;

/// Standard layout buckets, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Landscape4x3,
    #[serde(rename = "3:4")]
    Portrait3x4,
    #[serde(rename = "16:9")]
    Wide16x9,
    #[serde(rename = "9:16")]
    Tall9x16,
    #[serde(rename = "3:2")]
    Landscape3x2,
    #[serde(rename = "2:3")]
    Portrait2x3,
    #[serde(rename = "21:9")]
    Ultrawide21x9,
    #[serde(rename = "9:21")]
    Ultratall9x21,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 9] = [
        AspectRatio::Square,
        AspectRatio::Landscape4x3,
        AspectRatio::Portrait3x4,
        AspectRatio::Wide16x9,
        AspectRatio::Tall9x16,
        AspectRatio::Landscape3x2,
        AspectRatio::Portrait2x3,
        AspectRatio::Ultrawide21x9,
        AspectRatio::Ultratall9x21,
    ];

    fn parts(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1, 1),
            AspectRatio::Landscape4x3 => (4, 3),
            AspectRatio::Portrait3x4 => (3, 4),
            AspectRatio::Wide16x9 => (16, 9),
            AspectRatio::Tall9x16 => (9, 16),
            AspectRatio::Landscape3x2 => (3, 2),
            AspectRatio::Portrait2x3 => (2, 3),
            AspectRatio::Ultrawide21x9 => (21, 9),
            AspectRatio::Ultratall9x21 => (9, 21),
        }
    }

    pub fn value(self) -> f64 {
        let (w, h) = self.parts();
        f64::from(w) / f64::from(h)
    }

    pub fn label(self) -> String {
        let (w, h) = self.parts();
        format!("{}:{}", w, h)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Nearest standard bucket for `width x height`, if one is within
/// [`TOLERANCE`]. Ties go to the earlier bucket in [`AspectRatio::ALL`].
/// Zero-sized images have no bucket.
pub fn classify_aspect_ratio(width: u32, height: u32) -> Option<AspectRatio> {
    if width == 0 || height == 0 {
        return None;
    }
    let ratio = f64::from(width) / f64::from(height);

    let mut best: Option<(AspectRatio, f64)> = None;
    for candidate in AspectRatio::ALL {
        let diff = (ratio - candidate.value()).abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((candidate, diff)),
        }
    }

    best.filter(|(_, diff)| *diff <= TOLERANCE).map(|(r, _)| r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_sizes() {
        assert_eq!(classify_aspect_ratio(1920, 1080), Some(AspectRatio::Wide16x9));
        assert_eq!(classify_aspect_ratio(1000, 1000), Some(AspectRatio::Square));
        assert_eq!(classify_aspect_ratio(3000, 4000), Some(AspectRatio::Portrait3x4));
        assert_eq!(classify_aspect_ratio(6000, 4000), Some(AspectRatio::Landscape3x2));
        assert_eq!(classify_aspect_ratio(1080, 1920), Some(AspectRatio::Tall9x16));
    }

    #[test]
    fn outside_tolerance_has_no_bucket() {
        // 2.5 is 0.167 away from 21:9.
        assert_eq!(classify_aspect_ratio(1000, 400), None);
        assert_eq!(classify_aspect_ratio(4000, 1000), None);
    }

    #[test]
    fn nearest_wins_inside_tolerance() {
        // 1.40 is closer to 4:3 (0.067) than to 3:2 (0.10).
        assert_eq!(classify_aspect_ratio(1400, 1000), Some(AspectRatio::Landscape4x3));
        // 1.45 is closer to 3:2.
        assert_eq!(classify_aspect_ratio(1450, 1000), Some(AspectRatio::Landscape3x2));
    }

    #[test]
    fn zero_dimension_has_no_bucket() {
        assert_eq!(classify_aspect_ratio(0, 100), None);
        assert_eq!(classify_aspect_ratio(100, 0), None);
    }

    #[test]
    fn labels_and_serde_agree() {
        for r in AspectRatio::ALL {
            let json = serde_json::to_string(&r).unwrap();
            assert_eq!(json, format!("\"{}\"", r.label()));
        }
    }
}
