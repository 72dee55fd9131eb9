use serde::Serialize;

use crate::engine::{compute, ResultSet};
use crate::params::{AiTier, ParameterSet};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TierOutcome {
    pub tier: AiTier,
    pub selected: bool,
    pub results: ResultSet,
}

pub fn compare_tiers(params: &ParameterSet) -> Vec<TierOutcome> {
    let mut out: Vec<TierOutcome> = AiTier::ALL
        .iter()
        .map(|tier| TierOutcome {
            tier: *tier,
            selected: *tier == params.ai_tier,
            results: compute(&ParameterSet {
                ai_tier: *tier,
                ..*params
            }),
        })
        .collect();
    out.sort_by(|a, b| {
        b.results
            .summary
            .net_monthly_benefit_y1
            .total_cmp(&a.results.summary.net_monthly_benefit_y1)
    });
    out
}
