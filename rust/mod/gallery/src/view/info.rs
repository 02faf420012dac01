use serde::{Deserialize, Serialize};

use crate::copy::{CategoryCopy, CopyTable, FALLBACK_DESCRIPTION, FALLBACK_TAGLINE};
use crate::model::Category;

/// Display copy for a category header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub tagline: String,
    pub description: String,
}

impl CategoryInfo {
    pub fn fallback() -> Self {
        Self {
            tagline: FALLBACK_TAGLINE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
        }
    }
}

impl From<&CategoryCopy> for CategoryInfo {
    fn from(c: &CategoryCopy) -> Self {
        Self {
            tagline: c.tagline.to_string(),
            description: c.description.to_string(),
        }
    }
}

/// Everything a resolver may consult.
pub struct InfoSources<'a> {
    pub live: &'a [Category],
    pub table: &'a CopyTable,
    pub fallback: &'a CategoryInfo,
}

/// One step of the lookup chain. `None` passes to the next step.
pub type Resolver = fn(&str, &InfoSources<'_>) -> Option<CategoryInfo>;

/// Live record with both fields set, matched by trimmed case-insensitive name.
pub fn from_live_record(name: &str, src: &InfoSources<'_>) -> Option<CategoryInfo> {
    src.live
        .iter()
        .find(|c| c.same_name(name) && c.has_copy())
        .map(|c| CategoryInfo {
            tagline: c.tagline.clone(),
            description: c.description.clone(),
        })
}

pub fn from_table_exact(name: &str, src: &InfoSources<'_>) -> Option<CategoryInfo> {
    src.table.exact(name).map(CategoryInfo::from)
}

pub fn from_table_case_insensitive(name: &str, src: &InfoSources<'_>) -> Option<CategoryInfo> {
    src.table.case_insensitive(name).map(CategoryInfo::from)
}

pub fn from_fallback(_name: &str, src: &InfoSources<'_>) -> Option<CategoryInfo> {
    Some(src.fallback.clone())
}

/// Tried in order; the first hit wins.
pub const RESOLVERS: [Resolver; 4] = [
    from_live_record,
    from_table_exact,
    from_table_case_insensitive,
    from_fallback,
];

pub fn resolve_category_info(
    name: &str,
    live: &[Category],
    table: &CopyTable,
    fallback: &CategoryInfo,
) -> CategoryInfo {
    let src = InfoSources {
        live,
        table,
        fallback,
    };
    RESOLVERS
        .iter()
        .find_map(|resolve| resolve(name, &src))
        .unwrap_or_else(|| fallback.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live(name: &str, tagline: &str, description: &str) -> Category {
        Category::new(name, tagline, description)
    }

    fn resolve(name: &str, records: &[Category]) -> CategoryInfo {
        resolve_category_info(
            name,
            records,
            &CopyTable::gallery(),
            &CategoryInfo::fallback(),
        )
    }

    #[test]
    fn live_record_wins_regardless_of_casing() {
        let records = vec![live("wedding", "Ours", "Our own words")];
        for query in ["Wedding", "WEDDING", " wedding "] {
            let info = resolve(query, &records);
            assert_eq!(info.tagline, "Ours");
            assert_eq!(info.description, "Our own words");
        }
    }

    #[test]
    fn half_filled_record_is_skipped() {
        let records = vec![live("Wedding", "Only a tagline", "  ")];
        assert_eq!(resolve("Wedding", &records).tagline, "Where Love Meets Lens");
    }

    #[test]
    fn table_exact_then_case_insensitive() {
        assert_eq!(resolve(" Baby ", &[]).tagline, "Tiny Moments, Big Memories");
        assert_eq!(resolve("corporate", &[]).tagline, "Professional Excellence Captured");
    }

    #[test]
    fn unknown_name_gets_fallback() {
        assert_eq!(resolve("Drone Shoots", &[]), CategoryInfo::fallback());
    }

    #[test]
    fn resolvers_are_independent() {
        let records = vec![live("Event", "Live", "Copy")];
        let table = CopyTable::gallery();
        let fallback = CategoryInfo::fallback();
        let src = InfoSources {
            live: &records,
            table: &table,
            fallback: &fallback,
        };
        assert!(from_live_record("event", &src).is_some());
        assert!(from_live_record("Baby", &src).is_none());
        assert!(from_table_exact("event", &src).is_none());
        assert!(from_table_case_insensitive("event", &src).is_some());
        assert_eq!(from_fallback("anything", &src), Some(fallback.clone()));
    }

    #[test]
    fn custom_fallback_is_respected() {
        let fallback = CategoryInfo {
            tagline: "T".into(),
            description: "D".into(),
        };
        let info = resolve_category_info("Unknown", &[], &CopyTable::gallery(), &fallback);
        assert_eq!(info, fallback);
    }
}
