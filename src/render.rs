//! Console rendering for the `table` output format.

use crate::AnalysisRun;
use analytics::EntityIndicatorReport;
use analyzer::VolatilityOutcome;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};
use rust_decimal::Decimal;

pub(crate) fn render_run(run: &AnalysisRun) -> String {
    let mut out = String::new();
    for report in &run.reports {
        out.push_str(&render_report(report));
        out.push('\n');
    }
    for failure in &run.failures {
        out.push_str(&format!(
            "Country {} could not be analysed: {}\n",
            failure.entity_name, failure.error
        ));
    }
    if !run.failures.is_empty() {
        out.push('\n');
    }
    out.push_str(&render_outcome(&run.volatility));
    out
}

pub(crate) fn render_report(report: &EntityIndicatorReport) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Year", "GDP Value", "Growth Rate", "Ranking"]);

    let rows = report
        .period_values()
        .iter()
        .zip(report.growth_rates())
        .zip(report.rankings());
    for (year, ((value, rate), ranking)) in rows.enumerate() {
        table.add_row(vec![
            (year + 1).to_string(),
            format_currency(*value),
            format!("{rate:.2}%"),
            ranking.to_string(),
        ]);
    }
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Center);
    }

    format!(
        "Country {}\n{table}\n\
         Average Annual Growth Rate: {:.2}%\n\
         Compound Annual Growth Rate: {:.2}%\n\
         Standard Deviation: {:.3}\n",
        report.entity_name(),
        report.mean_growth_rate(),
        report.compound_growth_rate(),
        report.std_dev_growth_rate(),
    )
}

pub(crate) fn render_outcome(outcome: &VolatilityOutcome) -> String {
    match outcome {
        VolatilityOutcome::NoData => "No data provided.\n".to_string(),
        VolatilityOutcome::Ranked(verdicts) => verdicts
            .iter()
            .map(|v| format!("The Country {}'s economy is {}.\n", v.entity_name, v.stability))
            .collect(),
    }
}

/// Formats a value as dollars with thousands separators, e.g. `$1,234.50`.
fn format_currency(value: Decimal) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::StabilityVerdict;
    use core_types::Stability;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(999.5)), "$999.50");
        assert_eq!(format_currency(dec!(1000)), "$1,000.00");
        assert_eq!(format_currency(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_currency(dec!(-2500)), "-$2,500.00");
    }

    #[test]
    fn report_lists_every_year_and_summary_line() {
        let report = EntityIndicatorReport::build(
            dec!(100),
            vec![dec!(150), dec!(200), dec!(150)],
            Some("Aurelia"),
        )
        .unwrap();
        let rendered = render_report(&report);

        assert!(rendered.starts_with("Country Aurelia\n"));
        assert!(rendered.contains("Growth Rate"));
        assert!(rendered.contains("$150.00"));
        assert!(rendered.contains("50.00%"));
        assert!(rendered.contains("33.33%"));
        assert!(rendered.contains("-25.00%"));
        assert!(rendered.contains("Exceptional"));
        assert!(rendered.contains("Poor"));
        assert!(rendered.contains("Average Annual Growth Rate: 19.44%"));
        assert!(rendered.contains("Compound Annual Growth Rate: 14.47%"));
        assert!(rendered.contains("Standard Deviation: 39.382"));
    }

    #[test]
    fn outcome_lines() {
        assert_eq!(render_outcome(&VolatilityOutcome::NoData), "No data provided.\n");

        let outcome = VolatilityOutcome::Ranked(vec![
            StabilityVerdict {
                entity_name: "A".to_string(),
                dispersion: dec!(10),
                stability: Stability::MostStable,
            },
            StabilityVerdict {
                entity_name: "B".to_string(),
                dispersion: dec!(10),
                stability: Stability::MostStable,
            },
        ]);
        assert_eq!(
            render_outcome(&outcome),
            "The Country A's economy is most stable.\nThe Country B's economy is most stable.\n"
        );
    }
}
