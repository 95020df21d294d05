// src/dates.rs

use anyhow::{bail, Context, Result};
use chrono::{Datelike, Duration, NaiveDate};

pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Extract the `DD-MM-YYYY` date embedded in a transcript filename.
///
/// Filenames follow the `prefix_DD_MM_YYYY.ext` convention; the last three
/// underscore-delimited tokens are day, month and year, the year still
/// carrying the extension.
pub fn filename_to_date(filename: &str) -> Result<String> {
    let tokens: Vec<&str> = filename.split('_').collect();
    if tokens.len() < 4 {
        bail!("filename {:?} does not follow prefix_DD_MM_YYYY.ext", filename);
    }
    let n = tokens.len();
    let (day, month, year_ext) = (tokens[n - 3], tokens[n - 2], tokens[n - 1]);
    let year = year_ext.split('.').next().unwrap_or(year_ext);
    let date = format!("{}-{}-{}", day, month, year);
    // reject garbage like `mananera_v2_08_03.csv` early
    parse_date(&date)?;
    Ok(date)
}

/// Date of the filename segment of a repository-relative path.
pub fn path_date(path: &str) -> Result<String> {
    let filename = path.rsplit('/').next().unwrap_or(path);
    filename_to_date(filename)
}

pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .with_context(|| format!("parsing date {:?} as DD-MM-YYYY", date))
}

/// Monday of the week containing `date`, formatted `DD-MM-YYYY`.
pub fn week_start(date: &str) -> Result<String> {
    let parsed = parse_date(date)?;
    let monday = parsed - Duration::days(parsed.weekday().num_days_from_monday() as i64);
    Ok(monday.format(DATE_FORMAT).to_string())
}
