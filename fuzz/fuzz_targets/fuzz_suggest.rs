#![no_main]
use libfuzzer_sys::fuzz_target;
use recipe_intel::RecipeService;

/// Fuzz the rank/suggest/recommend entry points with arbitrary ingredient lists.
///
/// Input is split on newlines; items after a `--` line are treated as missing.
fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut lines = text.split('\n');
    let held: Vec<&str> = lines.by_ref().take_while(|l| *l != "--").collect();
    let missing: Vec<&str> = lines.collect();

    let service = RecipeService::builtin();
    let _ = service.rank(&held, 10);
    let suggestions = service.suggest(&held, &missing);
    assert!(suggestions.extra_suggestions.len() <= 10);
    let _ = service.recommend(&held, 3);
});
