#![no_main]
use libfuzzer_sys::fuzz_target;
use recipe_intel::{Catalog, RankingEngine};
use std::sync::Arc;

/// Fuzz catalog parsing, then rank whatever parsed.
///
/// Any recipe that survives parsing must be rankable without panicking,
/// including odd names, numeric ingredients and extreme prep times.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(catalog) = Catalog::from_json_str(s) {
            let held: Vec<String> = catalog
                .iter()
                .flat_map(|r| r.ingredients.iter().take(1).cloned())
                .collect();
            let engine = RankingEngine::new(Arc::new(catalog));
            let _ = engine.rank(&held, 5);
        }
    }
});
