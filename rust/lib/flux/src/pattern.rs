use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Exact(String),
    /// `+`
    One,
    /// `#`, only meaningful as the last segment.
    Rest,
}

/// Topic pattern with MQTT-style wildcards.
///
/// `gallery/+` matches `gallery/state` but not `gallery/a/b`.
/// `admin/#` matches `admin`, `admin/dashboard` and anything deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split('/')
            .map(|s| match s {
                "+" => Segment::One,
                "#" => Segment::Rest,
                other => Segment::Exact(other.to_string()),
            })
            .collect();
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, topic: &str) -> bool {
        let mut levels = topic.split('/');
        for segment in &self.segments {
            match segment {
                Segment::Rest => return true,
                Segment::One => {
                    if levels.next().is_none() {
                        return false;
                    }
                }
                Segment::Exact(s) => {
                    if levels.next() != Some(s.as_str()) {
                        return false;
                    }
                }
            }
        }
        levels.next().is_none()
    }
}

/// Values keyed by pattern, looked up by concrete topic.
/// Match results keep registration order.
pub(crate) struct Registry<T> {
    entries: RwLock<Vec<(Pattern, T)>>,
}

impl<T: Clone> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    pub(crate) fn insert(&self, pattern: &str, value: T) {
        let mut entries = self.entries.write().unwrap();
        entries.push((Pattern::parse(pattern), value));
    }

    /// Remove values registered under exactly `pattern` for which `pred` holds.
    pub(crate) fn remove<F: Fn(&T) -> bool>(&self, pattern: &str, pred: F) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|(p, v)| !(p.as_str() == pattern && pred(v)));
    }

    pub(crate) fn matching(&self, topic: &str) -> Vec<T> {
        let entries = self.entries.read().unwrap();
        entries
            .iter()
            .filter(|(p, _)| p.matches(topic))
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub(crate) fn has_pattern(&self, pattern: &str) -> bool {
        let entries = self.entries.read().unwrap();
        entries.iter().any(|(p, _)| p.as_str() == pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact() {
        let p = Pattern::parse("gallery/state");
        assert!(p.matches("gallery/state"));
        assert!(!p.matches("gallery/lightbox"));
        assert!(!p.matches("gallery"));
        assert!(!p.matches("gallery/state/extra"));
    }

    #[test]
    fn single_level() {
        let p = Pattern::parse("data/+");
        assert!(p.matches("data/photos"));
        assert!(p.matches("data/categories"));
        assert!(!p.matches("data"));
        assert!(!p.matches("data/photos/1"));

        let mid = Pattern::parse("+/state");
        assert!(mid.matches("gallery/state"));
        assert!(!mid.matches("gallery/view"));
    }

    #[test]
    fn multi_level() {
        let p = Pattern::parse("admin/#");
        assert!(p.matches("admin"));
        assert!(p.matches("admin/dashboard"));
        assert!(p.matches("admin/category/create"));
        assert!(!p.matches("auth/session"));

        assert!(Pattern::parse("#").matches("anything/at/all"));
    }

    #[test]
    fn registry_keeps_order_and_removes() {
        let reg = Registry::new();
        reg.insert("gallery/#", 1);
        reg.insert("gallery/state", 2);
        reg.insert("auth/+", 3);

        assert_eq!(reg.matching("gallery/state"), vec![1, 2]);
        assert_eq!(reg.matching("auth/session"), vec![3]);
        assert!(reg.has_pattern("auth/+"));

        reg.remove("gallery/#", |v| *v == 1);
        assert_eq!(reg.matching("gallery/state"), vec![2]);
        assert!(!reg.has_pattern("gallery/#"));
    }
}
