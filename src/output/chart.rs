use crate::engine::insights::ChartBar;
use crate::format::currency;

const FULL: char = '█';

pub fn render_bar_chart(bars: &[ChartBar], width: usize) -> String {
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);

    let mut out = String::new();
    for bar in bars {
        let filled = if max > 0.0 && bar.value > 0.0 {
            ((bar.value / max) * width as f64).round() as usize
        } else {
            0
        };
        let line = format!(
            "{:<label_width$}  {}{}  {}",
            bar.label,
            FULL.to_string().repeat(filled),
            " ".repeat(width.saturating_sub(filled)),
            currency(bar.value)
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render_bar_chart;
    use crate::engine::insights::ChartBar;

    fn bar(label: &str, value: f64) -> ChartBar {
        ChartBar {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn scales_to_largest_bar() {
        let chart = render_bar_chart(&[bar("A", 100.0), bar("Bee", 50.0)], 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), 10);
        assert_eq!(lines[1].matches('█').count(), 5);
        assert!(lines[1].starts_with("Bee"));
        assert!(lines[0].ends_with("$100.00"));
    }

    #[test]
    fn zero_values_draw_nothing() {
        let chart = render_bar_chart(&[bar("A", 0.0)], 10);
        assert_eq!(chart.matches('█').count(), 0);
    }
}
