#![no_main]
use libfuzzer_sys::fuzz_target;
use recipe_intel::matching::RuleTable;

/// Fuzz rule-table JSON loading.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut table = RuleTable::new();
        if table.load_json(s).is_ok() {
            let _ = table.to_json();
        }
    }
});
