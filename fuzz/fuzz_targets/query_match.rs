#![no_main]

//! Search query parsing and matching against arbitrary documents.

use libfuzzer_sys::fuzz_target;
use scribe_core::query::Query;
use scribe_types::Document;

#[derive(Debug, arbitrary::Arbitrary)]
struct QueryInput {
    query: String,
    document_json: String,
}

fuzz_target!(|input: QueryInput| {
    let Ok(query) = Query::parse(&input.query) else {
        return;
    };
    if let Ok(doc) = serde_json::from_str::<Document>(&input.document_json) {
        let _ = query.matches(&doc);
    }
});
