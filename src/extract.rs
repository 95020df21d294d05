// src/extract.rs

use std::io::Cursor;

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecordsIntoIter};

/// Header of the column holding the transcript text.
const TEXT_COLUMN: &str = "Texto";

/// Lazy sequence of transcript fragments from one CSV body.
///
/// Each item is the designated text column of one data row with a trailing
/// space appended, so fragments can be appended to a week file back to back.
/// A malformed row surfaces as an `Err` item.
pub struct TextRows {
    records: StringRecordsIntoIter<Cursor<String>>,
    column: usize,
}

impl Iterator for TextRows {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err).context("malformed CSV row")),
        };
        match record.get(self.column) {
            Some(text) => Some(Ok(format!("{} ", text))),
            None => Some(Err(anyhow::anyhow!(
                "row {:?} has no field {}",
                record.position().map(|p| p.line()),
                self.column
            ))),
        }
    }
}

/// Parse `raw` as headered CSV and yield the `Texto` column row by row.
pub fn text_column(raw: String) -> Result<TextRows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(raw));
    let headers = reader.headers().context("reading CSV header row")?;
    let Some(column) = headers.iter().position(|h| h == TEXT_COLUMN) else {
        bail!(
            "no {:?} column in CSV header {:?}",
            TEXT_COLUMN,
            headers.iter().collect::<Vec<_>>()
        );
    };
    Ok(TextRows {
        records: reader.into_records(),
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_text_column_with_trailing_space() {
        let raw = "Fecha,Texto\n\
                   08-03-2023,\"Muy buenos días.\"\n\
                   08-03-2023,\"Vamos a informar, como todos los días.\"\n";
        let rows: Vec<String> = text_column(raw.to_string())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            rows,
            vec![
                "Muy buenos días. ",
                "Vamos a informar, como todos los días. ",
            ]
        );
    }

    #[test]
    fn locates_the_column_by_header_not_position() {
        let raw = "Texto,Fecha\nhola,08-03-2023\n";
        let rows: Vec<String> = text_column(raw.to_string())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows, vec!["hola "]);
    }

    #[test]
    fn missing_text_column_is_an_error() {
        let raw = "Fecha,Contenido\n08-03-2023,hola\n";
        assert!(text_column(raw.to_string()).is_err());
    }

    #[test]
    fn quoted_fields_keep_embedded_delimiters() {
        let raw = "Fecha,Texto\n08-03-2023,\"uno, dos, tres\"\n";
        let rows: Vec<String> = text_column(raw.to_string())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(rows, vec!["uno, dos, tres "]);
    }
}
