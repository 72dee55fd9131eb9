use serde::{Deserialize, Serialize};

use crate::engine::payback::format_payback_period;
use crate::engine::ResultSet;
use crate::format::currency_whole;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

pub const CURRENT_HUMAN_COST: &str = "Current Human Cost";
pub const AI_COST_Y1: &str = "AI Cost (Y1 Eff.)";
pub const HUMAN_LABOR_WITH_AI: &str = "Human Labor w/ AI";
pub const NET_MONTHLY_BENEFIT_Y1: &str = "Net Monthly Benefit (Y1)";

pub fn chart_series(results: &ResultSet) -> Vec<ChartBar> {
    let bar = |label: &str, value: f64| ChartBar {
        label: label.to_string(),
        value: if value.is_finite() { value } else { 0.0 },
    };
    let mut bars = vec![
        bar(CURRENT_HUMAN_COST, results.current.total_human_cost),
        bar(AI_COST_Y1, results.platform.effective_monthly_cost_y1),
        bar(HUMAN_LABOR_WITH_AI, results.with_ai.total_human_cost),
    ];
    if results.summary.net_monthly_benefit_y1 > 0.0 {
        bars.push(bar(
            NET_MONTHLY_BENEFIT_Y1,
            results.summary.net_monthly_benefit_y1,
        ));
    }
    bars
}

pub fn scenario_interpretation(handling_percentage: f64) -> String {
    if handling_percentage == 100.0 {
        return "Full Replacement Focus: AI handles 100% of defined interactions. Savings reflect \
                potential direct staff cost reduction or full reallocation."
            .to_string();
    }
    format!(
        "Enhancement Focus: AI handles {}% of interactions. Human agents manage the remaining \
         {}%, likely complex cases. Savings from increased efficiency.",
        trim_number(handling_percentage),
        trim_number(100.0 - handling_percentage)
    )
}

pub fn payback_narrative(results: &ResultSet, operating_days: f64) -> Option<String> {
    let months = results.summary.payback_period_months;
    let setup_fee = results.platform.setup_fee;

    if months == 0.0 {
        return Some(
            "With positive net benefits and no (or negligible) setup fee, the return is \
             effectively immediate."
                .to_string(),
        );
    }
    if months.is_finite() && months > 0.0 {
        return Some(format!(
            "The initial AI setup fee of {} is estimated to be paid back within {}.",
            currency_whole(setup_fee),
            format_payback_period(months, operating_days)
        ));
    }
    if results.summary.net_monthly_benefit_y1 <= 0.0 && setup_fee > 0.0 {
        return Some(
            "Based on current inputs, the initial setup fee is not projected to be paid back \
             via Year 1 net monthly benefits."
                .to_string(),
        );
    }
    None
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct QualitativeBenefit {
    pub title: &'static str,
    pub detail: &'static str,
}

const fn benefit(title: &'static str, detail: &'static str) -> QualitativeBenefit {
    QualitativeBenefit { title, detail }
}

pub const QUALITATIVE_BENEFITS: [QualitativeBenefit; 9] = [
    benefit(
        "24/7 Omnichannel Availability",
        "Capture leads and serve customers round-the-clock on their preferred channel (voice or text).",
    ),
    benefit(
        "Drastically Improved Response Times",
        "Engage every prospect instantly, significantly boosting conversion potential.",
    ),
    benefit(
        "Consistent & Accurate Service",
        "Standardized responses and processes ensure quality and reliability.",
    ),
    benefit(
        "Enhanced Customer Experience (CX)",
        "Seamless, personalized interactions lead to higher satisfaction and loyalty.",
    ),
    benefit(
        "Increased Human Agent Productivity",
        "Automating routine tasks frees up your team for complex, high-value work, reducing burnout.",
    ),
    benefit(
        "Scalability on Demand",
        "Effortlessly handle peaks in call and message volume without overwhelming staff.",
    ),
    benefit(
        "Rich Data & Actionable Insights",
        "Gather valuable data from all interactions to refine strategies and understand customer needs.",
    ),
    benefit(
        "Efficient Appointment Management",
        "Automated scheduling, confirmations, and reminders reduce no-shows and administrative load.",
    ),
    benefit(
        "Competitive Advantage",
        "Lower cost-per-acquisition and provide superior service compared to competitors relying on manual processes.",
    ),
];

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::compute;
    use crate::engine::insights::{
        chart_series, payback_narrative, scenario_interpretation, NET_MONTHLY_BENEFIT_Y1,
        QUALITATIVE_BENEFITS,
    };
    use crate::params::{AiTier, IndustryId, ParameterSet, TierPricing};

    fn general() -> ParameterSet {
        IndustryId::General.preset().to_parameters(AiTier::Basic)
    }

    #[test]
    fn chart_includes_net_benefit_only_when_positive() {
        let results = compute(&general());
        let bars = chart_series(&results);
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[3].label, NET_MONTHLY_BENEFIT_Y1);

        let mut params = general();
        params.ai_handling_percentage = 0.0;
        params.voice.booking_improvement = 0.0;
        params.voice.show_up_improvement = 0.0;
        params.text.booking_improvement = 0.0;
        params.text.show_up_improvement = 0.0;
        params.avg_missed_voice_calls_daily = 0.0;
        let bars = chart_series(&compute(&params));
        assert_eq!(bars.len(), 3);
    }

    #[test]
    fn interprets_handling_share() {
        assert!(scenario_interpretation(100.0).starts_with("Full Replacement Focus"));
        let text = scenario_interpretation(80.0);
        assert!(text.contains("AI handles 80% of interactions"));
        assert!(text.contains("remaining 20%"));
        assert!(scenario_interpretation(62.5).contains("remaining 37.5%"));
    }

    #[test]
    fn narrates_payback() {
        let results = compute(&general());
        let text = payback_narrative(&results, 22.0).expect("narrative");
        assert!(text.starts_with("The initial AI setup fee of $2,000"));

        let mut free = general();
        free.basic = TierPricing::default();
        let text = payback_narrative(&compute(&free), 22.0).expect("narrative");
        assert!(text.contains("effectively immediate"));

        let mut losing = general();
        losing.ai_handling_percentage = 0.0;
        losing.voice.booking_improvement = 0.0;
        losing.voice.show_up_improvement = 0.0;
        losing.text.booking_improvement = 0.0;
        losing.text.show_up_improvement = 0.0;
        losing.avg_missed_voice_calls_daily = 0.0;
        let text = payback_narrative(&compute(&losing), 22.0).expect("narrative");
        assert!(text.contains("not projected to be paid back"));
    }

    #[test]
    fn stays_silent_without_fee_or_benefit() {
        let results = compute(&ParameterSet::default());
        assert_eq!(payback_narrative(&results, 22.0), None);
    }

    #[test]
    fn qualitative_benefits_are_all_filled_in() {
        assert_eq!(QUALITATIVE_BENEFITS.len(), 9);
        for item in QUALITATIVE_BENEFITS {
            assert!(!item.title.is_empty());
            assert!(item.detail.ends_with('.'), "{}", item.title);
        }
        assert_eq!(QUALITATIVE_BENEFITS[0].title, "24/7 Omnichannel Availability");
    }
}
