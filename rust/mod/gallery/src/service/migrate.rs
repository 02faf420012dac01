use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::copy::CopyTable;
use crate::error::AdminError;
use crate::service::AdminService;
use crate::view::CategoryInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Names of the categories that received copy.
    pub updated: Vec<String>,
    /// Of those, the ones with no table entry that got the fallback.
    pub defaulted: Vec<String>,
    /// Categories that already had both fields.
    pub skipped: usize,
}

impl AdminService {
    /// Fill in tagline and description for every category missing either.
    /// Categories that already have both are left alone, so a second run
    /// updates nothing.
    pub fn migrate_category_copy(
        &self,
        table: &CopyTable,
        fallback: &CategoryInfo,
    ) -> Result<MigrationReport, AdminError> {
        let mut report = MigrationReport::default();
        let mut planned: HashMap<String, CategoryInfo> = HashMap::new();
        let mut defaulted: HashSet<String> = HashSet::new();
        let mut ids = Vec::new();

        for category in self.store().categories.list()? {
            if category.has_copy() {
                report.skipped += 1;
                continue;
            }
            let info = match table.exact(&category.name) {
                Some(entry) => CategoryInfo::from(entry),
                None => {
                    defaulted.insert(category.id.clone());
                    fallback.clone()
                }
            };
            ids.push(category.id.clone());
            planned.insert(category.id, info);
        }

        // Only the two copy fields are written, onto the current record.
        let written = self.store().categories.patch_many(&ids, |c| {
            if let Some(info) = planned.get(&c.id) {
                c.tagline = info.tagline.clone();
                c.description = info.description.clone();
            }
        })?;
        for c in written {
            if defaulted.contains(&c.id) {
                report.defaulted.push(c.name.clone());
            }
            report.updated.push(c.name);
        }
        info!(
            updated = report.updated.len(),
            defaulted = report.defaulted.len(),
            skipped = report.skipped,
            "category copy migrated"
        );
        Ok(report)
    }
}
