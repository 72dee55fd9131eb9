pub mod funnel;
pub mod insights;
pub mod payback;
pub mod split;
pub mod tiers;
pub mod whatif;

use serde::{Deserialize, Serialize};

use crate::engine::funnel::{run_cascade, uplift, FunnelOutcome};
use crate::engine::split::InteractionSplit;
use crate::params::normalize::normalize_parameters;
use crate::params::{AiTier, ChannelParams, FunnelRates, ParameterSet};

pub const SETUP_AMORTIZATION_MONTHS: f64 = 12.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ChannelBaseline {
    pub human_minutes: f64,
    pub human_cost: f64,
    pub funnel: FunnelOutcome,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CurrentState {
    pub voice: ChannelBaseline,
    pub text: ChannelBaseline,
    pub total_human_cost: f64,
    pub total_revenue: f64,
    pub monthly_missed_calls: f64,
    pub revenue_lost_from_missed_calls: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AiPlatformCost {
    pub tier: AiTier,
    pub setup_fee: f64,
    pub setup_fee_amortized: f64,
    pub monthly_base_cost: f64,
    pub voice_usage_cost: f64,
    pub text_usage_cost: f64,
    pub total_platform_cost: f64,
    pub effective_monthly_cost_y1: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ChannelWithAi {
    pub split: InteractionSplit,
    pub human_cost: f64,
    pub effective_rates: FunnelRates,
    pub funnel: FunnelOutcome,
    pub revenue_increase: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct AiAssistedState {
    pub voice: ChannelWithAi,
    pub text: ChannelWithAi,
    pub total_human_cost: f64,
    pub captured_missed_calls_revenue: f64,
    pub text_messages_processed_by_ai: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct BenefitSummary {
    pub labor_cost_savings_monthly: f64,
    pub revenue_increase_monthly: f64,
    pub total_monthly_gain: f64,
    pub net_monthly_benefit_y1: f64,
    pub annual_cost_savings: f64,
    pub annual_revenue_increase: f64,
    pub annual_net_gain_y1: f64,
    pub monthly_roi: f64,
    /// Deliberately the same number as `monthly_roi`.
    pub annual_roi: f64,
    pub payback_period_months: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ResultSet {
    pub ai_handling_percentage: f64,
    pub current: CurrentState,
    pub platform: AiPlatformCost,
    pub with_ai: AiAssistedState,
    pub summary: BenefitSummary,
}

pub fn compute(params: &ParameterSet) -> ResultSet {
    let mut p = *params;
    normalize_parameters(&mut p);

    let current = current_state(&p);
    let assisted = ai_assisted_state(&p, &current);
    let platform = platform_cost(&p, &assisted);
    let summary = summarize(&current, &platform, &assisted);

    ResultSet {
        ai_handling_percentage: p.ai_handling_percentage,
        current,
        platform,
        with_ai: assisted,
        summary,
    }
}

fn human_cost(interactions: f64, minutes_each: f64, hourly_cost: f64) -> f64 {
    (interactions * minutes_each / 60.0) * hourly_cost
}

fn channel_baseline(p: &ParameterSet, channel: &ChannelParams) -> ChannelBaseline {
    let human_minutes = channel.monthly_volume * channel.avg_handling_minutes;
    ChannelBaseline {
        human_minutes,
        human_cost: (human_minutes / 60.0) * p.human_hourly_cost,
        funnel: run_cascade(
            channel.monthly_volume,
            &channel.funnel,
            p.avg_revenue_per_sale,
        ),
    }
}

fn current_state(p: &ParameterSet) -> CurrentState {
    let voice = channel_baseline(p, &p.voice);
    let text = channel_baseline(p, &p.text);
    let monthly_missed_calls = p.avg_missed_voice_calls_daily * p.operating_days_per_month;
    let missed = run_cascade(monthly_missed_calls, &p.voice.funnel, p.avg_revenue_per_sale);

    CurrentState {
        total_human_cost: voice.human_cost + text.human_cost,
        total_revenue: voice.funnel.revenue + text.funnel.revenue,
        voice,
        text,
        monthly_missed_calls,
        revenue_lost_from_missed_calls: missed.revenue,
    }
}

fn channel_with_ai(
    p: &ParameterSet,
    channel: &ChannelParams,
    baseline: &ChannelBaseline,
) -> ChannelWithAi {
    let split = InteractionSplit::new(
        channel.monthly_volume,
        p.ai_handling_percentage,
        channel.ai_autonomy,
    );
    let effective_rates = uplift(
        &channel.funnel,
        channel.booking_improvement,
        channel.show_up_improvement,
    );
    // the uplifted funnel applies to the full volume, not only the AI share
    let funnel = run_cascade(
        channel.monthly_volume,
        &effective_rates,
        p.avg_revenue_per_sale,
    );
    ChannelWithAi {
        split,
        human_cost: human_cost(split.to_human, channel.avg_handling_minutes, p.human_hourly_cost),
        effective_rates,
        revenue_increase: funnel.revenue - baseline.funnel.revenue,
        funnel,
    }
}

fn ai_assisted_state(p: &ParameterSet, current: &CurrentState) -> AiAssistedState {
    let mut voice = channel_with_ai(p, &p.voice, &current.voice);
    let text = channel_with_ai(p, &p.text, &current.text);

    let captured = run_cascade(
        current.monthly_missed_calls,
        &voice.effective_rates,
        p.avg_revenue_per_sale,
    );
    voice.revenue_increase += captured.revenue;

    AiAssistedState {
        total_human_cost: voice.human_cost + text.human_cost,
        captured_missed_calls_revenue: captured.revenue,
        text_messages_processed_by_ai: text.split.offered_to_ai
            * p.avg_messages_per_text_conversation,
        voice,
        text,
    }
}

fn platform_cost(p: &ParameterSet, assisted: &AiAssistedState) -> AiPlatformCost {
    let pricing = p.selected_pricing();
    let setup_fee_amortized = if pricing.setup_fee > 0.0 {
        pricing.setup_fee / SETUP_AMORTIZATION_MONTHS
    } else {
        0.0
    };

    // escalated calls are resolved by a human and not billed as AI minutes
    let voice_usage_cost =
        assisted.voice.split.autonomous * p.voice.avg_handling_minutes * pricing.per_minute_voice_cost;
    // text is metered platform-wide against the included quota
    let text_usage_cost = if p.text.monthly_volume > pricing.included_text_interactions {
        (p.text.monthly_volume - pricing.included_text_interactions) * pricing.overage_text_cost
    } else {
        0.0
    };

    let total_platform_cost = pricing.monthly_base_fee + voice_usage_cost + text_usage_cost;
    AiPlatformCost {
        tier: p.ai_tier,
        setup_fee: pricing.setup_fee,
        setup_fee_amortized,
        monthly_base_cost: pricing.monthly_base_fee,
        voice_usage_cost,
        text_usage_cost,
        total_platform_cost,
        effective_monthly_cost_y1: total_platform_cost + setup_fee_amortized,
    }
}

fn summarize(
    current: &CurrentState,
    platform: &AiPlatformCost,
    assisted: &AiAssistedState,
) -> BenefitSummary {
    let labor_cost_savings_monthly = current.total_human_cost - assisted.total_human_cost;
    let revenue_increase_monthly = assisted.voice.revenue_increase + assisted.text.revenue_increase;
    let total_monthly_gain = labor_cost_savings_monthly + revenue_increase_monthly;
    let net_monthly_benefit_y1 = total_monthly_gain - platform.effective_monthly_cost_y1;
    let monthly_roi = roi_percent(net_monthly_benefit_y1, platform.effective_monthly_cost_y1);

    BenefitSummary {
        labor_cost_savings_monthly,
        revenue_increase_monthly,
        total_monthly_gain,
        net_monthly_benefit_y1,
        annual_cost_savings: labor_cost_savings_monthly * MONTHS_PER_YEAR,
        annual_revenue_increase: revenue_increase_monthly * MONTHS_PER_YEAR,
        annual_net_gain_y1: net_monthly_benefit_y1 * MONTHS_PER_YEAR,
        monthly_roi,
        annual_roi: monthly_roi,
        payback_period_months: payback_months(platform.setup_fee, net_monthly_benefit_y1),
    }
}

pub fn roi_percent(net_benefit: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        net_benefit / cost * 100.0
    } else if net_benefit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}

pub fn payback_months(setup_fee: f64, net_monthly_benefit: f64) -> f64 {
    if net_monthly_benefit > 0.0 && setup_fee > 0.0 {
        setup_fee / net_monthly_benefit
    } else if net_monthly_benefit > 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}
