use coursematch_core::{LoadError, Recommender};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const COURSES: &str = "\
course_title,avg_rating,course_url
Intro to Python Programming,4.5,https://example.com/intro-python
Advanced Python Data Science,4.1,https://example.com/advanced-python
Cooking Italian Food,,https://example.com/cooking
";

fn courses() -> Recommender {
    Recommender::from_reader(COURSES.as_bytes()).unwrap()
}

#[test]
fn python_query_ranks_python_courses_first() {
    let reco = courses();
    let hits = reco.recommend("python programming", 2);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Intro to Python Programming");
    assert_eq!(hits[1].title, "Advanced Python Data Science");
    assert!(hits[0].score > hits[1].score);
    assert!(hits[1].score > 0.0);
    assert!(hits.iter().all(|h| h.title != "Cooking Italian Food"));
}

#[test]
fn hits_align_with_loaded_records() {
    let reco = courses();
    for hit in reco.recommend("course", 3).iter().chain(reco.recommend("python food", 3).iter()) {
        let rec = reco.records().iter().find(|r| r.title == hit.title).unwrap();
        assert_eq!(hit.rating, rec.rating);
        assert_eq!(hit.url, rec.url);
    }
    let cooking = &reco.recommend("italian", 1)[0];
    assert_eq!(cooking.title, "Cooking Italian Food");
    assert_eq!(cooking.rating, None);
    assert_eq!(cooking.url.as_deref(), Some("https://example.com/cooking"));
}

#[test]
fn cardinality_and_bounds() {
    let reco = courses();
    for (query, top_n, expected) in [
        ("python", 1, 1),
        ("python", 2, 2),
        ("python", 100, 3),
        ("python", 0, 1),
        ("zzz unknown", 2, 2),
        ("", 4, 0),
        ("!!!???", 4, 0),
    ] {
        let hits = reco.recommend(query, top_n);
        assert_eq!(hits.len(), expected, "{query:?} top_n={top_n}");
        assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.score)));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn repeated_queries_are_deterministic() {
    let reco = courses();
    let first = reco.recommend("advanced python", 3);
    for _ in 0..10 {
        assert_eq!(reco.recommend("advanced python", 3), first);
    }
}

#[test]
fn concurrent_readers_agree() {
    let reco = Arc::new(courses());
    let expected = reco.recommend("python data", 3);
    std::thread::scope(|s| {
        for _ in 0..4 {
            let reco = Arc::clone(&reco);
            let expected = &expected;
            s.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(&reco.recommend("python data", 3), expected);
                }
            });
        }
    });
}

#[test]
fn loads_from_csv_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{COURSES}").expect("write csv");
    let reco = Recommender::from_path(file.path()).unwrap();
    assert_eq!(reco.records().len(), 3);
    assert_eq!(reco.mapping().rating.as_ref().unwrap().name, "avg_rating");
    assert_eq!(reco.records()[0].id, 0);
}

#[test]
fn missing_source_is_distinguished() {
    let dir = tempfile::tempdir().unwrap();
    let err = Recommender::from_path(dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(err.to_string().contains("not found"));

    let err = Recommender::from_path(dir.path()).unwrap_err();
    assert!(!err.is_not_found(), "{err}");
}
