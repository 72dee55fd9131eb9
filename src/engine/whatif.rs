use serde::Serialize;

use crate::engine::{compute, ResultSet};
use crate::params::{ParamKey, ParameterSet};

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FieldChange {
    pub key: ParamKey,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
pub struct WhatIfDelta {
    pub labor_cost_savings_monthly: f64,
    pub revenue_increase_monthly: f64,
    pub effective_monthly_cost_y1: f64,
    pub net_monthly_benefit_y1: f64,
    pub annual_net_gain_y1: f64,
    pub monthly_roi: f64,
    pub payback_period_months: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WhatIfResult {
    pub changes_applied: Vec<FieldChange>,
    pub before: ResultSet,
    pub after: ResultSet,
    pub delta: WhatIfDelta,
}

pub fn simulate_whatif(current: &ParameterSet, changes: &[(ParamKey, f64)]) -> WhatIfResult {
    let before = compute(current);

    let mut changed = *current;
    let mut changes_applied = Vec::new();
    for (key, to) in changes {
        let from = changed.get(*key);
        if from != *to {
            changed.set(*key, *to);
            changes_applied.push(FieldChange {
                key: *key,
                from,
                to: *to,
            });
        }
    }

    let after = compute(&changed);
    WhatIfResult {
        changes_applied,
        delta: delta(&before, &after),
        before,
        after,
    }
}

fn delta(before: &ResultSet, after: &ResultSet) -> WhatIfDelta {
    let (b, a) = (&before.summary, &after.summary);
    WhatIfDelta {
        labor_cost_savings_monthly: a.labor_cost_savings_monthly - b.labor_cost_savings_monthly,
        revenue_increase_monthly: a.revenue_increase_monthly - b.revenue_increase_monthly,
        effective_monthly_cost_y1: after.platform.effective_monthly_cost_y1
            - before.platform.effective_monthly_cost_y1,
        net_monthly_benefit_y1: a.net_monthly_benefit_y1 - b.net_monthly_benefit_y1,
        annual_net_gain_y1: a.annual_net_gain_y1 - b.annual_net_gain_y1,
        monthly_roi: a.monthly_roi - b.monthly_roi,
        payback_period_months: a.payback_period_months - b.payback_period_months,
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::whatif::simulate_whatif;
    use crate::params::{AiTier, IndustryId, ParamKey};

    #[test]
    fn reports_changes_and_deltas() {
        let params = IndustryId::General.preset().to_parameters(AiTier::Basic);
        let result = simulate_whatif(
            &params,
            &[
                (ParamKey::HumanHourlyCost, 40.0),
                (ParamKey::AvgRevenuePerSale, 500.0),
            ],
        );

        assert_eq!(result.changes_applied.len(), 1);
        assert_eq!(result.changes_applied[0].key, ParamKey::HumanHourlyCost);
        assert_eq!(result.changes_applied[0].from, 30.0);
        assert_eq!(result.changes_applied[0].to, 40.0);

        assert!(result.delta.labor_cost_savings_monthly > 0.0);
        assert!(
            (result.delta.net_monthly_benefit_y1
                - (result.after.summary.net_monthly_benefit_y1
                    - result.before.summary.net_monthly_benefit_y1))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn leaves_the_input_snapshot_alone() {
        let params = IndustryId::RealEstate.preset().to_parameters(AiTier::Basic);
        let copy = params;
        let result = simulate_whatif(&params, &[(ParamKey::VoiceMonthlyCalls, 900.0)]);
        assert_eq!(params, copy);
        assert_eq!(result.before.current.voice.funnel.volume, 200.0);
        assert_eq!(result.after.current.voice.funnel.volume, 900.0);
    }
}
