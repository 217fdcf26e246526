use webloc_core::{
    apply_rules, canonicalize_url, compose_final_name, sanitize_name, Decision, DedupStore,
    RecordStatus, ShortcutRecord, PLATFORM_PATH_LIMIT,
};

fn init_logging() {
    engine_logging::initialize_for_tests();
}

fn offer_all(urls: &[(&str, &str)]) -> Vec<ShortcutRecord> {
    let mut store = DedupStore::new();
    urls.iter()
        .map(|(path, url)| {
            let mut record = ShortcutRecord::new(*path, canonicalize_url(url));
            match store.offer(&record) {
                Decision::First => record.mark_named("placeholder").unwrap(),
                Decision::Duplicate { .. } => record.mark_duplicate().unwrap(),
            }
            record
        })
        .collect()
}

#[test]
fn youtube_pp_variants_collapse_to_one_survivor() {
    init_logging();
    let records = offer_all(&[
        ("/links/a.webloc", "https://www.youtube.com/watch?v=abc&pp=xyz"),
        ("/links/b.webloc", "https://www.youtube.com/watch?v=abc&pp=other"),
    ]);
    assert_eq!(records[0].canonical_url(), "https://www.youtube.com/watch?v=abc");
    assert_eq!(records[0].status(), RecordStatus::Named);
    assert_eq!(records[1].status(), RecordStatus::Duplicate);
}

#[test]
fn exactly_one_survivor_per_canonical_url() {
    init_logging();
    let records = offer_all(&[
        ("/l/1.webloc", "https://example.com/a"),
        ("/l/2.webloc", "https://example.com/b"),
        ("/l/3.webloc", "https://example.com/a"),
        ("/l/4.webloc", " https://example.com/a "),
        ("/l/5.webloc", "https://example.com/b"),
    ]);
    let survivors: Vec<_> = records
        .iter()
        .filter(|r| r.status() == RecordStatus::Named)
        .map(|r| r.path().to_string_lossy().into_owned())
        .collect();
    assert_eq!(survivors, vec!["/l/1.webloc", "/l/2.webloc"]);
}

#[test]
fn youtube_title_becomes_prefixed_candidate() {
    init_logging();
    let candidate = apply_rules(
        "https://www.youtube.com/watch?v=abc",
        "Some Video • • 收看次數 123 - YouTube",
    );
    assert_eq!(candidate, "       YouTube - Some Video");
}

#[test]
fn final_names_respect_length_invariant() {
    init_logging();
    let long_title = "Very long title ".repeat(40);
    for dir_len in [0, 10, 120, 248, 300] {
        let name = compose_final_name("https://example.com", &long_title, 7, dir_len)
            .unwrap_or_default();
        assert!(name.chars().count() + 7 + dir_len <= PLATFORM_PATH_LIMIT.max(7 + dir_len));
        assert_eq!(sanitize_name(&name, 7, dir_len), name);
    }
}

#[test]
fn renaming_twice_is_stable() {
    init_logging();
    let url = "https://en.wikipedia.org/wiki/Rust";
    let first = compose_final_name(url, "Rust (programming language) - Wikipedia", 7, 20).unwrap();
    assert_eq!(first, "       Wikipedia - Rust (programming language)");
    let second = compose_final_name(url, &first, 7, 20).unwrap();
    assert_eq!(first, second);
}
