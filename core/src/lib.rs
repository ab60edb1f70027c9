pub mod catalog;
pub mod error;
pub mod index;
pub mod recommender;
pub mod schema;
pub mod tokenizer;

pub type TermId = u32;
pub type DocId = u32;

pub use catalog::{Catalog, CatalogRecord};
pub use error::LoadError;
pub use index::{DocumentMatrix, SimilarityIndex, VectorSpace, MAX_FEATURES};
pub use recommender::{Recommendation, Recommender, DEFAULT_TOP_N};
pub use schema::{resolve_columns, Column, ColumnMapping};
