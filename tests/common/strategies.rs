#![allow(dead_code)]

use proptest::prelude::*;

/// Strategy for generating enricher priorities across all bands
pub fn priority_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![Just(100), Just(90), Just(80), Just(70), Just(60), Just(50), Just(40), 0i32..=120]
}

/// Strategy for generating enricher sets as (priority, fails) pairs
pub fn enricher_set_strategy() -> impl Strategy<Value = Vec<(i32, bool)>> {
    prop::collection::vec((priority_strategy(), any::<bool>()), 0..12)
}

/// Strategy for generating editorial ids, including padded ones
pub fn editorial_id_strategy() -> impl Strategy<Value = String> {
    "[ ]{0,2}[0-9]{1,8}[ ]{0,2}"
}
