use anyhow::Result;

use crate::engine::tiers::TierOutcome;
use crate::engine::whatif::WhatIfResult;
use crate::params::{ParamKey, ParameterSet};
use crate::types::EstimateReport;

fn number(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.4}")
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else {
        String::new()
    }
}

pub fn estimate_to_csv(report: &EstimateReport) -> Result<String> {
    let r = &report.results;
    let rows = [
        ("current_total_human_cost", r.current.total_human_cost),
        ("current_total_revenue", r.current.total_revenue),
        ("monthly_missed_calls", r.current.monthly_missed_calls),
        ("revenue_lost_from_missed_calls", r.current.revenue_lost_from_missed_calls),
        ("ai_setup_fee", r.platform.setup_fee),
        ("ai_setup_fee_amortized", r.platform.setup_fee_amortized),
        ("ai_monthly_base_cost", r.platform.monthly_base_cost),
        ("ai_voice_usage_cost", r.platform.voice_usage_cost),
        ("ai_text_usage_cost", r.platform.text_usage_cost),
        ("ai_total_platform_cost", r.platform.total_platform_cost),
        ("ai_effective_monthly_cost_y1", r.platform.effective_monthly_cost_y1),
        ("human_cost_with_ai", r.with_ai.total_human_cost),
        ("captured_missed_calls_revenue", r.with_ai.captured_missed_calls_revenue),
        ("text_messages_processed_by_ai", r.with_ai.text_messages_processed_by_ai),
        ("labor_cost_savings_monthly", r.summary.labor_cost_savings_monthly),
        ("revenue_increase_monthly", r.summary.revenue_increase_monthly),
        ("total_monthly_gain", r.summary.total_monthly_gain),
        ("net_monthly_benefit_y1", r.summary.net_monthly_benefit_y1),
        ("annual_cost_savings", r.summary.annual_cost_savings),
        ("annual_revenue_increase", r.summary.annual_revenue_increase),
        ("annual_net_gain_y1", r.summary.annual_net_gain_y1),
        ("monthly_roi", r.summary.monthly_roi),
        ("annual_roi", r.summary.annual_roi),
        ("payback_period_months", r.summary.payback_period_months),
    ];

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["metric", "value"])?;
    writer.write_record(["source", report.source.as_slug()])?;
    writer.write_record(["tier", r.platform.tier.as_slug()])?;
    for (metric, value) in rows {
        writer.write_record([metric.to_string(), number(value)])?;
    }
    writer.write_record(["payback_period", report.payback_period.as_str()])?;
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn fields_to_csv(params: &ParameterSet) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["field", "label", "value", "min", "max", "step", "unit"])?;
    for key in ParamKey::ALL {
        let range = key.range();
        writer.write_record([
            key.as_slug().to_string(),
            key.label().to_string(),
            params.get(key).to_string(),
            range.min.to_string(),
            range.max.to_string(),
            range.step.to_string(),
            range.unit.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn tiers_to_csv(outcomes: &[TierOutcome]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "tier",
        "selected",
        "effective_monthly_cost_y1",
        "net_monthly_benefit_y1",
        "monthly_roi",
        "payback_period_months",
    ])?;
    for outcome in outcomes {
        let r = &outcome.results;
        writer.write_record([
            outcome.tier.as_slug().to_string(),
            outcome.selected.to_string(),
            number(r.platform.effective_monthly_cost_y1),
            number(r.summary.net_monthly_benefit_y1),
            number(r.summary.monthly_roi),
            number(r.summary.payback_period_months),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn whatif_to_csv(result: &WhatIfResult) -> Result<String> {
    let (b, a, d) = (&result.before.summary, &result.after.summary, &result.delta);
    let rows = [
        (
            "labor_cost_savings_monthly",
            b.labor_cost_savings_monthly,
            a.labor_cost_savings_monthly,
            d.labor_cost_savings_monthly,
        ),
        (
            "revenue_increase_monthly",
            b.revenue_increase_monthly,
            a.revenue_increase_monthly,
            d.revenue_increase_monthly,
        ),
        (
            "effective_monthly_cost_y1",
            result.before.platform.effective_monthly_cost_y1,
            result.after.platform.effective_monthly_cost_y1,
            d.effective_monthly_cost_y1,
        ),
        (
            "net_monthly_benefit_y1",
            b.net_monthly_benefit_y1,
            a.net_monthly_benefit_y1,
            d.net_monthly_benefit_y1,
        ),
        (
            "annual_net_gain_y1",
            b.annual_net_gain_y1,
            a.annual_net_gain_y1,
            d.annual_net_gain_y1,
        ),
        ("monthly_roi", b.monthly_roi, a.monthly_roi, d.monthly_roi),
        (
            "payback_period_months",
            b.payback_period_months,
            a.payback_period_months,
            d.payback_period_months,
        ),
    ];

    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["metric", "before", "after", "change"])?;
    for (metric, before, after, delta) in rows {
        writer.write_record([metric.to_string(), number(before), number(after), number(delta)])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use crate::engine::tiers::compare_tiers;
    use crate::output::csv::{estimate_to_csv, fields_to_csv, tiers_to_csv};
    use crate::params::{AiTier, IndustryId, ParamKey, ParameterStore};
    use crate::types::EstimateReport;

    #[test]
    fn estimate_csv_has_header_and_metrics() {
        let report = EstimateReport::from_store(&ParameterStore::new());
        let csv = estimate_to_csv(&report).expect("csv");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("metric,value"));
        assert!(csv.contains("source,general"));
        assert!(csv.contains("ai_voice_usage_cost,810.0000"));
    }

    #[test]
    fn infinite_roi_is_written_as_inf() {
        let mut params = IndustryId::General.preset().to_parameters(AiTier::Basic);
        params.basic = Default::default();
        let report = EstimateReport::from_store(&ParameterStore::new().replace(params));
        let csv = estimate_to_csv(&report).expect("csv");
        assert!(csv.contains("monthly_roi,inf"));
        assert!(csv.contains("source,custom"));
    }

    #[test]
    fn fields_and_tiers_csv_have_one_row_per_entry() {
        let params = IndustryId::General.preset().to_parameters(AiTier::Basic);
        let fields = fields_to_csv(&params).expect("csv");
        assert_eq!(fields.lines().count(), ParamKey::ALL.len() + 1);
        let tiers = tiers_to_csv(&compare_tiers(&params)).expect("csv");
        assert_eq!(tiers.lines().count(), 3);
    }
}
