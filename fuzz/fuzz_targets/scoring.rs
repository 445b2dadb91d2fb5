#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use eoc_rating::scoring::score;
use eoc_rating::taxonomy::{Taxonomy, eoc_taxonomy};

static TAXONOMY: OnceLock<Taxonomy> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).to_lowercase();
    let taxonomy = TAXONOMY.get_or_init(|| eoc_taxonomy().unwrap());

    let result = score(&text, taxonomy, 5.0);
    assert!((0.0..=5.0).contains(&result.rating));
    assert!(result.matched_weight_sum <= result.total_possible_weight);
});
