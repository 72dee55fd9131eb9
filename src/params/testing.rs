use proptest::prelude::*;

use crate::params::{AiTier, ParamKey, ParameterSet};

pub fn tier_strategy() -> impl Strategy<Value = AiTier> {
    prop_oneof![Just(AiTier::Basic), Just(AiTier::Enterprise)]
}

// Every field drawn from its input control range.
pub fn parameter_set_strategy() -> impl Strategy<Value = ParameterSet> {
    (
        proptest::collection::vec(0.0f64..=1.0, ParamKey::ALL.len()),
        tier_strategy(),
    )
        .prop_map(|(fractions, tier)| {
            let mut params = ParameterSet::default();
            for (key, fraction) in ParamKey::ALL.iter().zip(fractions) {
                let range = key.range();
                params.set(*key, range.min + fraction * (range.max - range.min));
            }
            params.ai_tier = tier;
            params
        })
}
