use crate::format::{count, currency, currency_whole, roi};
use crate::output::chart::render_bar_chart;
use crate::types::EstimateReport;

pub fn render_print_report(report: &EstimateReport, chart_width: Option<usize>) -> String {
    let r = &report.results;
    let s = &r.summary;
    let mut lines = vec![
        "Omnichannel AI Agent ROI Estimate".to_string(),
        format!(
            "{} | {} tier | {}",
            report.source,
            r.platform.tier,
            report.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        String::new(),
        "Monthly Financial Impact".to_string(),
    ];
    let mut push = |label: &str, value: String| lines.push(format!("  {label}: {value}"));
    push("Total Human Labor Cost (Current)", currency(r.current.total_human_cost));
    push(
        "Est. Revenue Lost from Missed Calls (Current)",
        currency(r.current.revenue_lost_from_missed_calls),
    );
    push(
        "Effective AI Monthly Cost (Year 1)",
        currency(r.platform.effective_monthly_cost_y1),
    );
    push(
        "Projected Human Labor Cost (With AI)",
        currency(r.with_ai.total_human_cost),
    );
    push("Direct Labor Cost Savings", currency(s.labor_cost_savings_monthly));
    push(
        "Potential Added Revenue (Incl. Captured Calls)",
        currency(s.revenue_increase_monthly),
    );
    push("Net Monthly Benefit (Year 1)", currency(s.net_monthly_benefit_y1));
    push(
        "Est. Voice Calls Handled Autonomously by AI",
        count(r.with_ai.voice.split.autonomous),
    );
    push(
        "Est. Text Conversations Handled Autonomously by AI",
        count(r.with_ai.text.split.autonomous),
    );
    push("Potential Annual Net Gain (Year 1)", currency(s.annual_net_gain_y1));
    lines.push(format!(
        "    Driven by: {} ann. labor savings & {} ann. added revenue.",
        currency_whole(s.annual_cost_savings),
        currency_whole(s.annual_revenue_increase)
    ));
    let mut push = |label: &str, value: String| lines.push(format!("  {label}: {value}"));
    push("ROI (Year 1)", roi(s.annual_roi));
    push("Payback Period", report.payback_period.clone());

    lines.push(String::new());
    lines.push(report.scenario_interpretation.clone());
    if let Some(narrative) = &report.payback_narrative {
        lines.push(narrative.clone());
    }
    if let Some(width) = chart_width {
        lines.push(String::new());
        lines.push(render_bar_chart(&report.chart, width).trim_end().to_string());
    }
    lines.push(String::new());
    lines.push("Additional Potential Benefits".to_string());
    for benefit in report.qualitative_benefits {
        lines.push(format!("  - {}: {}", benefit.title, benefit.detail));
    }
    lines.join("\n")
}
