use serde::Serialize;

pub const TITLE_CANDIDATES: &[&str] = &["title", "course_title", "course name", "name"];
pub const URL_CANDIDATES: &[&str] = &["url", "course_url", "link", "course link"];
pub const RATING_CANDIDATES: &[&str] = &["rating", "avg_rating", "avg rating", "reviews"];
/// Substrings that mark a column as descriptive text.
pub const DESCRIPTION_MARKERS: &[&str] = &["desc", "headline", "subtitle"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// Which source columns hold the fields a catalog record is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    pub title: Option<Column>,
    pub url: Option<Column>,
    pub rating: Option<Column>,
    pub description: Option<Column>,
}

/// Detect title, url, rating and description columns from a header row.
///
/// Title, url and rating try their candidates in order against the
/// lower-cased header names and take the first candidate present. When two
/// headers lower-case to the same name the later one is used. The description
/// is the first header containing any of [`DESCRIPTION_MARKERS`].
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> ColumnMapping {
    let lowered: Vec<String> = headers.iter().map(|h| h.as_ref().to_lowercase()).collect();
    let column = |index: usize| Column { index, name: headers[index].as_ref().to_string() };

    let by_candidates = |candidates: &[&str]| {
        candidates
            .iter()
            .find_map(|cand| lowered.iter().rposition(|h| h == cand))
            .map(column)
    };

    let description = lowered
        .iter()
        .position(|h| DESCRIPTION_MARKERS.iter().any(|m| h.contains(m)))
        .map(column);

    ColumnMapping {
        title: by_candidates(TITLE_CANDIDATES),
        url: by_candidates(URL_CANDIDATES),
        rating: by_candidates(RATING_CANDIDATES),
        description,
    }
}
