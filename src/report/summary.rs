//! Console summaries of association and descriptive results

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{
    AggregateReport, AssociationResults, ColumnTest, DescriptiveStats, MissingAssociation,
    PartitionMode, TestOutcome,
};

/// Outcome of an association run, ready for display and export
#[derive(Debug)]
pub struct AnalysisSummary {
    pub target: String,
    pub mode: PartitionMode,
    pub tests: Vec<ColumnTest>,
    pub report: AggregateReport,
    pub load_time: Option<Duration>,
    pub test_time: Option<Duration>,
}

impl AnalysisSummary {
    pub fn new(target: &str, mode: PartitionMode, tests: Vec<ColumnTest>, p_threshold: f64) -> Self {
        let mut results = AssociationResults::new();
        results.extend(tests.iter().cloned());
        Self {
            target: target.to_string(),
            mode,
            report: results.aggregate(p_threshold),
            tests,
            load_time: None,
            test_time: None,
        }
    }

    pub fn set_load_time(&mut self, duration: Duration) {
        self.load_time = Some(duration);
    }

    pub fn set_test_time(&mut self, duration: Duration) {
        self.test_time = Some(duration);
    }

    pub fn skipped(&self) -> Vec<&ColumnTest> {
        self.tests.iter().filter(|t| t.is_skipped()).collect()
    }

    pub fn display(&self) {
        print_section_title("📋", "ASSOCIATION SUMMARY");

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("🎯 Target"),
            Cell::new(format!("{} ({})", self.target, self.mode)),
        ]);
        table.add_row(vec![
            Cell::new("🧪 Features Tested"),
            Cell::new(self.report.sorted.len()),
        ]);

        let skipped = self.skipped().len();
        table.add_row(vec![
            Cell::new("⏭️  Skipped"),
            Cell::new(skipped).fg(if skipped == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);

        table.add_row(vec![
            Cell::new(format!("❗ Significant (p < {})", self.report.p_threshold)),
            Cell::new(self.report.significant_count())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);

        let pct = self.report.fraction_significant * 100.0;
        let color = if pct > 50.0 {
            Color::Red
        } else if pct > 10.0 {
            Color::Yellow
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new("📈 Dependent Share"),
            Cell::new(format!("{:.1}%", pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);

        if let Some(t) = self.load_time {
            table.add_row(vec![Cell::new("⏱️  Load"), Cell::new(format_duration(t))]);
        }
        if let Some(t) = self.test_time {
            table.add_row(vec![Cell::new("⏱️  Tests"), Cell::new(format_duration(t))]);
        }

        print_indented(&table);

        println!();
        println!("    {}", style(self.report.summary_line()).white().bold());

        if !self.report.sorted.is_empty() {
            print_section_title("🔎", "RESULTS BY P-VALUE");
            let mut results = results_table(&["Feature", "Test", "p-value", "Associated"]);
            for r in &self.report.sorted {
                let associated = r.p_value < self.report.p_threshold;
                results.add_row(vec![
                    Cell::new(&r.feature),
                    Cell::new(r.method),
                    p_value_cell(r.p_value, associated),
                    flag_cell(associated),
                ]);
            }
            print_indented(&results);
        }

        let skipped = self.skipped();
        if !skipped.is_empty() {
            print_section_title("📝", "SKIPPED COLUMNS");
            for t in skipped {
                if let TestOutcome::Skipped { reason } = &t.outcome {
                    println!(
                        "      {} {} {} {}",
                        style("•").dim(),
                        t.feature,
                        style(format!("[{}]", t.method)).dim(),
                        style(reason).yellow()
                    );
                }
            }
        }
    }
}

/// Table of [`association_with_missing_target`](crate::pipeline::association_with_missing_target) rows
pub fn display_missing_associations(rows: &[MissingAssociation], p_threshold: f64) {
    print_section_title("🔎", "MISSINGNESS ASSOCIATION");

    let header = format!("p_value < {}", p_threshold);
    let mut table = results_table(&["Feature", "Test", "p-value", &header]);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.feature),
            Cell::new(row.method),
            p_value_cell(row.p_value, row.associated),
            flag_cell(row.associated),
        ]);
    }
    print_indented(&table);

    let associated = rows.iter().filter(|r| r.associated).count();
    println!();
    println!(
        "    {} of {} feature(s) associated with target missingness",
        style(associated).yellow().bold(),
        rows.len()
    );
}

/// Table of descriptive statistics with the outlier flag
pub fn display_descriptive_stats(stats: &[DescriptiveStats]) {
    print_section_title("📊", "DESCRIPTIVE STATISTICS");

    let mut table = results_table(&[
        "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max", "Outlier",
    ]);
    for s in stats {
        table.add_row(vec![
            Cell::new(&s.column),
            Cell::new(s.count).set_alignment(CellAlignment::Right),
            number_cell(s.mean),
            s.std.map_or_else(|| Cell::new("-"), number_cell),
            number_cell(s.min),
            number_cell(s.q1),
            number_cell(s.median),
            number_cell(s.q3),
            number_cell(s.max),
            flag_cell(s.outlier),
        ]);
    }
    print_indented(&table);
}

fn results_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table
}

fn p_value_cell(p_value: f64, significant: bool) -> Cell {
    let text = if p_value < 1e-4 {
        format!("{:.2e}", p_value)
    } else {
        format!("{:.4}", p_value)
    };
    let cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if significant {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{:.2}", value)).set_alignment(CellAlignment::Right)
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        Cell::new("no").fg(Color::Green)
    }
}

fn print_section_title(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

// Indent the table
fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else {
        format!("{:.2} s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{SkipReason, TestMethod};

    fn tests_fixture() -> Vec<ColumnTest> {
        vec![
            ColumnTest {
                feature: "city".to_string(),
                method: TestMethod::ChiSquare,
                outcome: TestOutcome::Tested { p_value: 0.2 },
            },
            ColumnTest {
                feature: "beds".to_string(),
                method: TestMethod::WelchT,
                outcome: TestOutcome::Tested { p_value: 0.001 },
            },
            ColumnTest {
                feature: "country".to_string(),
                method: TestMethod::ChiSquare,
                outcome: TestOutcome::Skipped {
                    reason: SkipReason::ContingencyShape { rows: 1, classes: 2 },
                },
            },
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = AnalysisSummary::new("price", PartitionMode::Missing, tests_fixture(), 0.05);
        assert_eq!(summary.report.sorted.len(), 2);
        assert_eq!(summary.report.sorted[0].feature, "beds");
        assert_eq!(summary.skipped().len(), 1);
        assert_eq!(summary.report.significant_count(), 1);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250 ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50 s");
    }
}
