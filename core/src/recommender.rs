use crate::catalog::{Catalog, CatalogRecord};
use crate::error::LoadError;
use crate::index::SimilarityIndex;
use crate::schema::ColumnMapping;
use serde::Serialize;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_TOP_N: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
    pub rating: Option<f64>,
    pub url: Option<String>,
}

/// The loaded catalog together with the index built over it. Both are fixed at
/// construction; build once and share behind an `Arc`.
#[derive(Debug)]
pub struct Recommender {
    catalog: Catalog,
    index: SimilarityIndex,
}

impl Recommender {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        Self::from_catalog(Catalog::from_path(path)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        Self::from_catalog(Catalog::from_reader(reader)?)
    }

    pub fn from_catalog(catalog: Catalog) -> Result<Self, LoadError> {
        let index = SimilarityIndex::build(&catalog.texts);
        if index.vocabulary_len() == 0 {
            return Err(LoadError::EmptyVocabulary);
        }
        debug_assert_eq!(index.num_docs(), catalog.len());
        Ok(Self { catalog, index })
    }

    pub fn recommend(&self, query: &str, top_n: usize) -> Vec<Recommendation> {
        self.index
            .query(query, top_n)
            .into_iter()
            .map(|(doc_id, score)| {
                let CatalogRecord { title, rating, url, .. } = &self.catalog.records[doc_id as usize];
                Recommendation { title: title.clone(), score, rating: *rating, url: url.clone() }
            })
            .collect()
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.catalog.records
    }

    pub fn headers(&self) -> &[String] {
        &self.catalog.headers
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.catalog.mapping
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }
}
