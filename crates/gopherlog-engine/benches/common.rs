// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use chrono::{Duration, NaiveDate};
use gopherlog_engine::Entry;

#[allow(dead_code)]
pub fn generate_body(paragraphs: usize) -> String {
    let base = "We met in the kitchen and fixed the [[:kitchen:door|door]]. \
                Parts came from [[https://example.org/shop|the shop]], \
                notes are on [[plenum:notes]].\n";
    base.repeat(paragraphs)
}

#[allow(dead_code)]
pub fn generate_entry_file(paragraphs: usize) -> String {
    format!(
        "# generated\nBEGIN: 2023-12-01\nEND: 2023-12-02\nTOPIC: Benchmark\nAPPENDIX: none\nMEDIA: a.jpg\nMEDIA: b.jpg, c.jpg\n\n{}",
        generate_body(paragraphs)
    )
}

/// One entry per day, starting at the first of January 2020.
#[allow(dead_code)]
pub fn generate_entries(days: usize) -> Vec<Entry> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..days)
        .map(|day| Entry {
            body: generate_body(2),
            media: vec![format!("{day}.jpg")],
            ..Entry::new(start + Duration::days(day as i64))
        })
        .collect()
}
