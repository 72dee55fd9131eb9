use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::engine::insights::QualitativeBenefit;
use crate::engine::payback::format_payback_period;
use crate::engine::tiers::TierOutcome;
use crate::engine::whatif::WhatIfResult;
use crate::engine::ResultSet;
use crate::format::{count, currency, percent, roi};
use crate::params::{IndustryPreset, ParamKey, ParameterSet};
use crate::types::EstimateReport;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn signed_cell(value: f64, text: String) -> Cell {
    if value >= 0.0 {
        Cell::new(text).fg(Color::Green)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

pub fn render_impact_table(results: &ResultSet) -> String {
    let mut table = new_table();
    table.set_header(vec!["Monthly Financial Impact", "Amount"]);

    let s = &results.summary;
    table.add_row(vec![
        "Total Human Labor Cost (Current)".to_string(),
        currency(results.current.total_human_cost),
    ]);
    table.add_row(Row::from(vec![
        Cell::new("Est. Revenue Lost from Missed Calls (Current)"),
        Cell::new(currency(results.current.revenue_lost_from_missed_calls)).fg(Color::Red),
    ]));
    table.add_row(vec![
        "Effective AI Monthly Cost (Year 1)".to_string(),
        currency(results.platform.effective_monthly_cost_y1),
    ]);
    table.add_row(vec![
        "Projected Human Labor Cost (With AI)".to_string(),
        currency(results.with_ai.total_human_cost),
    ]);
    table.add_row(Row::from(vec![
        Cell::new("Direct Labor Cost Savings"),
        signed_cell(
            s.labor_cost_savings_monthly,
            currency(s.labor_cost_savings_monthly),
        ),
    ]));
    let revenue = if s.revenue_increase_monthly >= 0.0 {
        format!("+{}", currency(s.revenue_increase_monthly))
    } else {
        currency(s.revenue_increase_monthly)
    };
    table.add_row(Row::from(vec![
        Cell::new("Potential Added Revenue (Incl. Captured Calls)"),
        signed_cell(s.revenue_increase_monthly, revenue),
    ]));
    table.add_row(Row::from(vec![
        Cell::new("Net Monthly Benefit (Year 1)"),
        signed_cell(s.net_monthly_benefit_y1, currency(s.net_monthly_benefit_y1)),
    ]));
    table.to_string()
}

pub fn render_cost_table(results: &ResultSet) -> String {
    let p = &results.platform;
    let mut table = new_table();
    table.set_header(vec![format!("AI Agent Cost ({})", p.tier), "Amount".to_string()]);
    table.add_row(vec!["One-time Setup Fee".to_string(), currency(p.setup_fee)]);
    table.add_row(vec![
        "AI Monthly Platform Base Cost".to_string(),
        currency(p.monthly_base_cost),
    ]);
    table.add_row(vec![
        "Est. AI Monthly Voice Usage Cost".to_string(),
        currency(p.voice_usage_cost),
    ]);
    table.add_row(vec![
        "Est. AI Monthly Text Usage Cost".to_string(),
        currency(p.text_usage_cost),
    ]);
    table.add_row(vec![
        "Total AI Recurring Monthly Cost".to_string(),
        currency(p.total_platform_cost),
    ]);
    table.add_row(vec![
        "Effective AI Monthly Cost (Year 1)".to_string(),
        currency(p.effective_monthly_cost_y1),
    ]);
    table.to_string()
}

pub fn render_interaction_table(results: &ResultSet) -> String {
    let voice = &results.with_ai.voice;
    let text = &results.with_ai.text;
    let mut table = new_table();
    table.set_header(vec!["Monthly Interactions", "Voice", "Text"]);
    let rows = [
        ("Total Entered", voice.split.volume, text.split.volume),
        ("Offered to AI", voice.split.offered_to_ai, text.split.offered_to_ai),
        ("Handled Autonomously by AI", voice.split.autonomous, text.split.autonomous),
        ("Escalated to Humans", voice.split.escalated, text.split.escalated),
        ("Sent Directly to Humans", voice.split.direct_to_human, text.split.direct_to_human),
        ("Sales (Current)", results.current.voice.funnel.sales, results.current.text.funnel.sales),
        ("Sales (With AI)", voice.funnel.sales, text.funnel.sales),
    ];
    for (label, v, t) in rows {
        table.add_row(vec![label.to_string(), count(v), count(t)]);
    }
    table.add_row(vec![
        "Est. Individual Text Messages Processed by AI".to_string(),
        "-".to_string(),
        count(results.with_ai.text_messages_processed_by_ai),
    ]);
    table.to_string()
}

pub fn render_summary_table(report: &EstimateReport) -> String {
    let s = &report.results.summary;
    let mut table = new_table();
    table.set_header(vec!["ROI Summary", "Value"]);
    table.add_row(Row::from(vec![
        Cell::new("Potential Annual Net Gain (Year 1)"),
        signed_cell(s.annual_net_gain_y1, currency(s.annual_net_gain_y1)),
    ]));
    table.add_row(vec![
        "Potential Annual Labor Cost Savings".to_string(),
        currency(s.annual_cost_savings),
    ]);
    table.add_row(vec![
        "Potential Annual Added Revenue".to_string(),
        currency(s.annual_revenue_increase),
    ]);
    table.add_row(vec!["Monthly ROI (Year 1)".to_string(), roi(s.monthly_roi)]);
    table.add_row(vec!["Annual ROI (Year 1)".to_string(), roi(s.annual_roi)]);
    table.add_row(vec![
        "Payback Period".to_string(),
        report.payback_period.clone(),
    ]);
    table.to_string()
}

pub fn render_benefits_table(benefits: &[QualitativeBenefit]) -> String {
    let mut table = new_table();
    table.set_header(vec!["Additional Potential Benefits", ""]);
    for benefit in benefits {
        table.add_row(vec![benefit.title, benefit.detail]);
    }
    table.to_string()
}

pub fn render_presets_table(presets: &[&IndustryPreset]) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Industry",
        "Slug",
        "Revenue / Sale",
        "Hourly Cost",
        "Voice Calls",
        "Text Convos",
        "Missed / Day",
        "AI Handling",
    ]);
    for preset in presets {
        table.add_row(vec![
            preset.id.to_string(),
            preset.id.as_slug().to_string(),
            currency(preset.avg_revenue_per_sale),
            currency(preset.human_hourly_cost),
            count(preset.voice.monthly_volume),
            count(preset.text.monthly_volume),
            count(preset.avg_missed_voice_calls_daily),
            percent(preset.ai_handling_percentage),
        ]);
    }
    table.to_string()
}

pub fn render_fields_table(params: &ParameterSet) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Label", "Value", "Min", "Max", "Step", "Unit"]);
    for key in ParamKey::ALL {
        let range = key.range();
        table.add_row(vec![
            key.as_slug().to_string(),
            key.label().to_string(),
            format!("{}", params.get(key)),
            format!("{}", range.min),
            format!("{}", range.max),
            format!("{}", range.step),
            range.unit.to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_tiers_table(outcomes: &[TierOutcome], operating_days: f64) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Tier",
        "Selected",
        "Eff. Monthly Cost (Y1)",
        "Net Monthly Benefit (Y1)",
        "ROI",
        "Payback",
    ]);
    for outcome in outcomes {
        let s = &outcome.results.summary;
        table.add_row(Row::from(vec![
            Cell::new(outcome.tier.to_string()),
            Cell::new(if outcome.selected { "*" } else { "" }),
            Cell::new(currency(outcome.results.platform.effective_monthly_cost_y1)),
            signed_cell(s.net_monthly_benefit_y1, currency(s.net_monthly_benefit_y1)),
            Cell::new(roi(s.monthly_roi)),
            Cell::new(format_payback_period(s.payback_period_months, operating_days)),
        ]));
    }
    table.to_string()
}

pub fn render_whatif_table(result: &WhatIfResult) -> String {
    let mut changes = new_table();
    changes.set_header(vec!["Field", "From", "To"]);
    for change in &result.changes_applied {
        changes.add_row(vec![
            change.key.as_slug().to_string(),
            format!("{}", change.from),
            format!("{}", change.to),
        ]);
    }

    let (b, a, d) = (&result.before.summary, &result.after.summary, &result.delta);
    let mut table = new_table();
    table.set_header(vec!["Metric", "Before", "After", "Change"]);
    let money_rows = [
        (
            "Labor Cost Savings",
            b.labor_cost_savings_monthly,
            a.labor_cost_savings_monthly,
            d.labor_cost_savings_monthly,
        ),
        (
            "Added Revenue",
            b.revenue_increase_monthly,
            a.revenue_increase_monthly,
            d.revenue_increase_monthly,
        ),
        (
            "Eff. AI Cost (Y1)",
            result.before.platform.effective_monthly_cost_y1,
            result.after.platform.effective_monthly_cost_y1,
            d.effective_monthly_cost_y1,
        ),
        (
            "Net Monthly Benefit (Y1)",
            b.net_monthly_benefit_y1,
            a.net_monthly_benefit_y1,
            d.net_monthly_benefit_y1,
        ),
        (
            "Annual Net Gain (Y1)",
            b.annual_net_gain_y1,
            a.annual_net_gain_y1,
            d.annual_net_gain_y1,
        ),
    ];
    for (label, before, after, delta) in money_rows {
        table.add_row(Row::from(vec![
            Cell::new(label),
            Cell::new(currency(before)),
            Cell::new(currency(after)),
            signed_cell(delta, currency(delta)),
        ]));
    }
    table.add_row(vec![
        "Monthly ROI".to_string(),
        roi(b.monthly_roi),
        roi(a.monthly_roi),
        roi(d.monthly_roi),
    ]);

    let mut out = String::new();
    if result.changes_applied.is_empty() {
        out.push_str("No parameter changes applied.\n");
    } else {
        out.push_str(&changes.to_string());
        out.push('\n');
    }
    out.push_str(&table.to_string());
    out
}
