//! Image CDN URL tiers.
//!
//! Delivery URLs look like `https://res.cloudinary.com/<cloud>/image/upload/<path>`.
//! Transformations are a comma list inserted right after `/upload/`.

use serde::{Deserialize, Serialize};

pub const CDN_HOST: &str = "cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageTier {
    /// Grid cards.
    Thumbnail,
    /// Tiny blurred image shown while the real one loads.
    Placeholder,
    /// Lightbox.
    Full,
}

impl ImageTier {
    pub fn directives(self) -> &'static str {
        match self {
            ImageTier::Thumbnail => "f_auto,q_auto:eco,w_600,c_limit",
            ImageTier::Placeholder => "f_auto,q_1,w_40,e_blur:1000",
            ImageTier::Full => "f_auto,q_auto:good,w_2000,c_limit",
        }
    }
}

fn host(url: &str) -> Option<&str> {
    let rest = url.split_once("://")?.1;
    let authority = rest.split(['/', '?', '#']).next()?;
    let without_user = authority.rsplit('@').next()?;
    without_user.split(':').next()
}

pub fn is_cdn_url(url: &str) -> bool {
    host(url).is_some_and(|h| h == CDN_HOST || h.ends_with(".cloudinary.com"))
        && url.contains(UPLOAD_SEGMENT)
}

/// Rewrite `url` for `tier`. URLs not served by the CDN come back unchanged.
pub fn transform_url(url: &str, tier: ImageTier) -> String {
    if !is_cdn_url(url) {
        return url.to_string();
    }
    match url.split_once(UPLOAD_SEGMENT) {
        Some((head, tail)) => format!("{}{}{}/{}", head, UPLOAD_SEGMENT, tier.directives(), tail),
        None => url.to_string(),
    }
}

/// All three variants of one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredUrls {
    pub thumbnail: String,
    pub placeholder: String,
    pub full: String,
}

impl TieredUrls {
    pub fn for_url(url: &str) -> Self {
        Self {
            thumbnail: transform_url(url, ImageTier::Thumbnail),
            placeholder: transform_url(url, ImageTier::Placeholder),
            full: transform_url(url, ImageTier::Full),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://res.cloudinary.com/demo/image/upload/v1700000000/sanjivani_studios/a.jpg";

    #[test]
    fn inserts_after_upload() {
        assert_eq!(
            transform_url(URL, ImageTier::Thumbnail),
            "https://res.cloudinary.com/demo/image/upload/f_auto,q_auto:eco,w_600,c_limit/v1700000000/sanjivani_studios/a.jpg"
        );
        assert!(transform_url(URL, ImageTier::Placeholder).contains("/upload/f_auto,q_1,w_40,e_blur:1000/v1700000000/"));
    }

    #[test]
    fn other_hosts_untouched() {
        let local = "https://example.com/image/upload/a.jpg";
        assert_eq!(transform_url(local, ImageTier::Full), local);
        let spoof = "https://cloudinary.com.evil.net/image/upload/a.jpg";
        assert_eq!(transform_url(spoof, ImageTier::Full), spoof);
        assert_eq!(transform_url("not a url", ImageTier::Full), "not a url");
    }

    #[test]
    fn tiers_differ() {
        let t = TieredUrls::for_url(URL);
        assert_ne!(t.thumbnail, t.full);
        assert_ne!(t.placeholder, t.full);
    }
}
