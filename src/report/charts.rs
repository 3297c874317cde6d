//! Terminal charts for column profiles
//!
//! Charts are rendered to strings so they can be printed or embedded; the
//! `print_*` helpers indent them like the rest of the console output.

use console::style;

/// Width of a full-length bar, in cells
const BAR_WIDTH: usize = 30;

/// Cells on each side of the axis in a signed chart
const HALF_WIDTH: usize = 20;

/// Share of each label in the total, pie-chart style (`autopct` percentages).
pub fn render_share_chart(title: &str, counts: &[(String, usize)]) -> String {
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    let label_width = label_width(counts.iter().map(|(l, _)| l.as_str()));

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(title).white().bold()));

    if total == 0 {
        out.push_str(&format!("{}\n", style("(no data)").dim()));
        return out;
    }

    for (i, (label, count)) in counts.iter().enumerate() {
        let share = *count as f64 / total as f64;
        let cells = (share * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{:<width$}  {}{}  {:>5.1}% ({})\n",
            label,
            palette(i, &"█".repeat(cells)),
            " ".repeat(BAR_WIDTH - cells.min(BAR_WIDTH)),
            share * 100.0,
            count,
            width = label_width
        ));
    }

    out
}

/// Horizontal bars for counts, scaled to the largest count.
pub fn render_count_chart(title: &str, counts: &[(String, usize)]) -> String {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let label_width = label_width(counts.iter().map(|(l, _)| l.as_str()));

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(title).white().bold()));

    if max == 0 {
        out.push_str(&format!("{}\n", style("(no data)").dim()));
        return out;
    }

    for (label, count) in counts {
        let cells = ((*count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
        out.push_str(&format!(
            "{:<width$}  {} {}\n",
            label,
            style("█".repeat(cells.max(1))).cyan(),
            count,
            width = label_width
        ));
    }

    out
}

/// Signed bars around a vertical axis, e.g. skewness per column.
pub fn render_signed_chart(title: &str, values: &[(String, f64)]) -> String {
    let max_abs = values
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);
    let label_width = label_width(values.iter().map(|(l, _)| l.as_str()));

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(title).white().bold()));

    if values.is_empty() {
        out.push_str(&format!("{}\n", style("(no data)").dim()));
        return out;
    }

    for (label, value) in values {
        let cells = if max_abs > 0.0 {
            ((value.abs() / max_abs) * HALF_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = "█".repeat(cells);
        let (left, right) = if *value < 0.0 {
            (
                format!("{}{}", " ".repeat(HALF_WIDTH - cells), style(bar).magenta()),
                " ".repeat(HALF_WIDTH),
            )
        } else {
            (
                " ".repeat(HALF_WIDTH),
                format!("{}{}", style(bar).cyan(), " ".repeat(HALF_WIDTH - cells)),
            )
        };
        out.push_str(&format!(
            "{:<width$}  {}│{}  {:+.2}\n",
            label,
            left,
            right,
            value,
            width = label_width
        ));
    }

    out
}

/// Print the dtype distribution of a table
pub fn print_dtype_chart(distribution: &[(String, usize)]) {
    print_chart(&render_share_chart("Distribution of Data Types", distribution));
}

/// Print skewness per numerical column
pub fn print_skewness_chart(skewness: &[(String, f64)]) {
    print_chart(&render_signed_chart("Skewness of Numerical Columns", skewness));
}

/// Print value counts of a categorical column
pub fn print_counts_chart(column: &str, counts: &[(String, usize)]) {
    print_chart(&render_count_chart(&format!("Counts of {}", column), counts));
}

fn print_chart(chart: &str) {
    println!();
    for line in chart.lines() {
        println!("    {}", line);
    }
    println!();
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

// Cycle a small bright palette so adjacent slices differ
fn palette(index: usize, text: &str) -> String {
    let styled = match index % 6 {
        0 => style(text).blue(),
        1 => style(text).yellow(),
        2 => style(text).green(),
        3 => style(text).red(),
        4 => style(text).magenta(),
        _ => style(text).cyan(),
    };
    styled.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_chart_percentages() {
        let counts = vec![("f64".to_string(), 3), ("str".to_string(), 1)];
        let chart = render_share_chart("Types", &counts);

        assert!(chart.contains("75.0% (3)"));
        assert!(chart.contains("25.0% (1)"));
        assert_eq!(chart.lines().count(), 3);
    }

    #[test]
    fn test_share_chart_empty() {
        let chart = render_share_chart("Types", &[]);
        assert!(chart.contains("(no data)"));
    }

    #[test]
    fn test_signed_chart_shows_sign() {
        let values = vec![("price".to_string(), 2.5), ("lat".to_string(), -0.5)];
        let chart = render_signed_chart("Skew", &values);

        assert!(chart.contains("+2.50"));
        assert!(chart.contains("-0.50"));
    }

    #[test]
    fn test_count_chart_lists_every_label() {
        let counts = vec![("Entire home".to_string(), 10), ("Hotel room".to_string(), 0)];
        let chart = render_count_chart("Rooms", &counts);

        assert!(chart.contains("Entire home"));
        assert!(chart.contains("Hotel room"));
    }
}
