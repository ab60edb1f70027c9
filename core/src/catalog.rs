use crate::error::LoadError;
use crate::schema::{resolve_columns, ColumnMapping};
use crate::tokenizer::clean_text;
use crate::DocId;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogRecord {
    pub id: DocId,
    pub title: String,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

/// Records in load order, with the cleaned text of each at the same position.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub headers: Vec<String>,
    pub mapping: ColumnMapping,
    pub records: Vec<CatalogRecord>,
    pub texts: Vec<String>,
}

impl Catalog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
            _ => LoadError::Io(e),
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers: Vec<String> = rdr
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).into_owned())
            .collect();
        if headers.is_empty() {
            return Err(LoadError::NoColumns);
        }

        let mapping = resolve_columns(&headers);
        let title_idx = mapping.title.as_ref().map_or(0, |c| c.index);
        let url_idx = mapping.url.as_ref().map(|c| c.index);
        let rating_idx = mapping.rating.as_ref().map(|c| c.index);
        let desc_idx = mapping.description.as_ref().map(|c| c.index);

        let mut records = Vec::new();
        let mut texts = Vec::new();
        for row in rdr.byte_records() {
            let row = row?;
            let cell = |idx: usize| row.get(idx).map(String::from_utf8_lossy);

            let title = cell(title_idx).map(|c| c.into_owned()).unwrap_or_default();
            let text = match desc_idx {
                Some(idx) => {
                    let desc = cell(idx).unwrap_or_default();
                    clean_text(&format!("{title} {desc}"))
                }
                None => clean_text(&title),
            };
            let rating = rating_idx.and_then(cell).and_then(|c| parse_rating(&c));
            let url = url_idx
                .and_then(cell)
                .map(|c| c.trim().to_string())
                .filter(|u| !u.is_empty());

            records.push(CatalogRecord { id: records.len() as DocId, title, rating, url });
            texts.push(text);
        }

        tracing::debug!(rows = records.len(), ?mapping, "catalog loaded");
        Ok(Self { headers, mapping, records, texts })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_rating(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|r| !r.is_nan())
}
