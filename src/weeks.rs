// src/weeks.rs

use anyhow::{Context, Result};
use tracing::warn;

use crate::dates::{self, parse_date};

/// Paths grouped by the Monday of their embedded date's week.
///
/// Week keys keep first-encounter order, which follows the crawl order of
/// the underlying paths; a `BTreeMap` would resort them lexicographically.
#[derive(Debug, Default)]
pub struct WeekBuckets {
    buckets: Vec<(String, Vec<String>)>,
}

impl WeekBuckets {
    fn push(&mut self, week: String, path: String) {
        match self.buckets.iter_mut().find(|(w, _)| *w == week) {
            Some((_, paths)) => paths.push(path),
            None => self.buckets.push((week, vec![path])),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets.iter().map(|(w, p)| (w.as_str(), p.as_slice()))
    }
}

/// Group `paths` into week buckets, keeping only dates inside the inclusive
/// `start_date..=end_date` range.
///
/// Range membership is decided on parsed dates. The predecessor of this tool
/// compared `DD-MM-YYYY` strings lexicographically, which orders by day
/// before year; that only worked for ranges inside a single month.
pub fn bucket(paths: &[String], start_date: &str, end_date: &str) -> Result<WeekBuckets> {
    let start = parse_date(start_date).context("bad start date")?;
    let end = parse_date(end_date).context("bad end date")?;

    let mut weeks = WeekBuckets::default();
    for path in paths {
        let date = match dates::path_date(path) {
            Ok(date) => date,
            Err(err) => {
                warn!(%path, error = %err, "skipping path without a parseable date");
                continue;
            }
        };
        // path_date only returns strings parse_date accepts
        let parsed = parse_date(&date)?;
        if start <= parsed && parsed <= end {
            let week = dates::week_start(&date)?;
            weeks.push(week, path.clone());
        }
    }
    Ok(weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn buckets_by_week_within_range() {
        // 10 paths over 3 distinct weeks; the range covers only the last 2
        let paths = paths(&[
            "a/mananera_01_03_2023.csv", // week 27-02-2023, out of range
            "a/mananera_02_03_2023.csv", // week 27-02-2023, out of range
            "a/mananera_03_03_2023.csv", // week 27-02-2023, out of range
            "a/mananera_06_03_2023.csv", // week 06-03-2023
            "a/mananera_07_03_2023.csv",
            "a/mananera_08_03_2023.csv",
            "a/mananera_10_03_2023.csv",
            "a/mananera_13_03_2023.csv", // week 13-03-2023
            "a/mananera_14_03_2023.csv",
            "a/mananera_17_03_2023.csv",
        ]);
        let weeks = bucket(&paths, "06-03-2023", "17-03-2023").unwrap();
        assert_eq!(weeks.len(), 2);

        let collected: Vec<_> = weeks.iter().collect();
        assert_eq!(collected[0].0, "06-03-2023");
        assert_eq!(collected[0].1.len(), 4);
        assert_eq!(collected[1].0, "13-03-2023");
        assert_eq!(collected[1].1.len(), 3);
    }

    #[test]
    fn range_boundaries_are_inclusive() {
        let paths = paths(&[
            "a/mananera_06_03_2023.csv",
            "a/mananera_08_03_2023.csv",
            "a/mananera_10_03_2023.csv",
        ]);
        let weeks = bucket(&paths, "06-03-2023", "10-03-2023").unwrap();
        let collected: Vec<_> = weeks.iter().collect();
        assert_eq!(collected[0].1.len(), 3);
    }

    #[test]
    fn range_comparison_is_chronological_not_lexicographic() {
        // "02-01-2023" < "28-12-2022" lexicographically; chronologically the
        // opposite holds and both dates sit inside the range
        let paths = paths(&[
            "a/mananera_28_12_2022.csv",
            "a/mananera_02_01_2023.csv",
            "a/mananera_15_06_2023.csv", // well outside
        ]);
        let weeks = bucket(&paths, "26-12-2022", "08-01-2023").unwrap();
        let total: usize = weeks.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn week_keys_follow_first_encounter_order() {
        // crawl order presents the later week first
        let paths = paths(&[
            "a/mananera_14_03_2023.csv",
            "a/mananera_07_03_2023.csv",
            "a/mananera_15_03_2023.csv",
        ]);
        let weeks = bucket(&paths, "01-03-2023", "31-03-2023").unwrap();
        let keys: Vec<_> = weeks.iter().map(|(w, _)| w.to_string()).collect();
        assert_eq!(keys, vec!["13-03-2023", "06-03-2023"]);
    }

    #[test]
    fn malformed_filenames_are_skipped() {
        let paths = paths(&["a/notes.csv", "a/mananera_08_03_2023.csv"]);
        let weeks = bucket(&paths, "01-03-2023", "31-03-2023").unwrap();
        assert_eq!(weeks.len(), 1);
        let collected: Vec<_> = weeks.iter().collect();
        assert_eq!(collected[0].1.to_vec(), vec!["a/mananera_08_03_2023.csv"]);
    }
}
