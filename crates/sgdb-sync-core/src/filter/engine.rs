//! Filter engine for matching shortcuts against criteria

use super::FilterCriteria;
use crate::shortcuts::ShortcutRecord;

/// Engine for filtering shortcut records against criteria
pub struct FilterEngine;

impl FilterEngine {
    /// Filter shortcuts, returning references to matching records in order
    pub fn filter<'a>(
        records: &'a [ShortcutRecord],
        criteria: &FilterCriteria,
    ) -> Vec<&'a ShortcutRecord> {
        if criteria.is_empty() {
            return records.iter().collect();
        }
        records
            .iter()
            .filter(|record| Self::matches(record, criteria))
            .collect()
    }

    /// Check if a shortcut matches the filter criteria
    pub fn matches(record: &ShortcutRecord, criteria: &FilterCriteria) -> bool {
        match criteria.name_query.as_deref() {
            Some(query) if !query.is_empty() => record.name_matches(query),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch() -> Vec<ShortcutRecord> {
        vec![
            ShortcutRecord::new("Hollow Knight", "/usr/bin/hollow-knight", 305620),
            ShortcutRecord::new("Celeste", "/usr/bin/celeste", 504230),
            ShortcutRecord::new("Knights of the Old Republic", "/opt/kotor/swkotor", 32370),
        ]
    }

    #[test]
    fn test_filter_by_substring() {
        let records = batch();
        let criteria = FilterCriteria::new().with_name("knight");

        let names: Vec<_> = FilterEngine::filter(&records, &criteria)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Hollow Knight", "Knights of the Old Republic"]);
    }

    #[test]
    fn test_filter_selects_only_matching_game() {
        let records = &batch()[..2];
        let criteria = FilterCriteria::new().with_name("knight");

        let matched = FilterEngine::filter(records, &criteria);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Hollow Knight");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let records = batch();
        let criteria = FilterCriteria::new().with_name("CELESTE");
        assert_eq!(FilterEngine::filter(&records, &criteria).len(), 1);
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let records = batch();
        assert_eq!(FilterEngine::filter(&records, &FilterCriteria::new()).len(), 3);
    }

    #[test]
    fn test_no_match() {
        let records = batch();
        let criteria = FilterCriteria::new().with_name("portal");
        assert!(FilterEngine::filter(&records, &criteria).is_empty());
    }
}
