use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::insights::{
    chart_series, payback_narrative, scenario_interpretation, ChartBar, QualitativeBenefit,
    QUALITATIVE_BENEFITS,
};
use crate::engine::payback::format_payback_period;
use crate::engine::{compute, ResultSet};
use crate::params::{ParameterSet, ParameterSource, ParameterStore};

#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub generated_at: DateTime<Utc>,
    pub source: ParameterSource,
    pub params: ParameterSet,
    pub results: ResultSet,
    pub payback_period: String,
    pub payback_narrative: Option<String>,
    pub scenario_interpretation: String,
    pub chart: Vec<ChartBar>,
    pub qualitative_benefits: &'static [QualitativeBenefit],
}

impl EstimateReport {
    pub fn from_store(store: &ParameterStore) -> Self {
        let params = *store.snapshot();
        let results = compute(&params);
        Self {
            generated_at: Utc::now(),
            source: store.source(),
            payback_period: format_payback_period(
                results.summary.payback_period_months,
                params.operating_days_per_month,
            ),
            payback_narrative: payback_narrative(&results, params.operating_days_per_month),
            scenario_interpretation: scenario_interpretation(results.ai_handling_percentage),
            chart: chart_series(&results),
            qualitative_benefits: &QUALITATIVE_BENEFITS,
            params,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::params::{IndustryId, ParameterSource, ParameterStore};
    use crate::types::EstimateReport;

    #[test]
    fn report_carries_store_snapshot() {
        let store = ParameterStore::from_preset(IndustryId::HomeServices);
        let report = EstimateReport::from_store(&store);
        assert_eq!(report.source, ParameterSource::Preset(IndustryId::HomeServices));
        assert_eq!(report.params.avg_revenue_per_sale, 450.0);
        assert!(report.scenario_interpretation.contains("75%"));
        assert!(!report.chart.is_empty());
    }

    #[test]
    fn infinite_values_serialize_as_null() {
        let store = ParameterStore::new().replace(Default::default());
        let report = EstimateReport::from_store(&store);
        let json = serde_json::to_value(&report).expect("serialize report");
        assert!(json["results"]["summary"]["payback_period_months"].is_null());
        assert_eq!(json["payback_period"], "Never");
        assert_eq!(json["source"], "custom");
        assert_eq!(json["qualitative_benefits"].as_array().map(Vec::len), Some(9));
        assert_eq!(
            json["qualitative_benefits"][1]["title"],
            "Drastically Improved Response Times"
        );
    }
}
