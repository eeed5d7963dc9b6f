//! Text and JSON renderings of a statistics report.

use crate::core::{InferenceWarning, StatisticsReport};
use std::fmt::Write;

/// Render the report as the plain-text results summary.
pub fn render_summary(report: &StatisticsReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write_summary(&mut out, report);
    out
}

fn write_summary(out: &mut String, report: &StatisticsReport) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "Mean Observed Outcome: {:.5}", report.mean_observed)?;
    writeln!(
        out,
        "Mean Counterfactual Outcome (Treatment = 1): {:.5}",
        report.mean_cf_treatment1
    )?;
    writeln!(
        out,
        "Mean Counterfactual Outcome (Treatment = 0): {:.5}",
        report.mean_cf_treatment0
    )?;

    writeln!(out, "Coefficients:")?;
    writeln!(out, "             Estimate Std. Error t value Pr(>|t|)")?;
    for row in report.rows() {
        writeln!(
            out,
            "{:<13}{:8.4} {:10.4} {:7.4} {:8.4}",
            row.term.label(),
            row.estimate,
            row.std_error,
            row.t_value,
            row.p_value
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Residual standard error: {:.4} on {} degrees of freedom",
        report.residual_std_error,
        report.residual_df()
    )?;
    writeln!(
        out,
        "Multiple R-squared: {:.6}, Adjusted R-squared: {:.6}",
        report.r_squared, report.adj_r_squared
    )?;
    writeln!(
        out,
        "F-statistic: {:.4} on {} and {} DF,  p-value: {:.5}",
        report.f_statistic,
        report.model_df(),
        report.residual_df(),
        report.f_pvalue
    )?;

    for warning in &report.warnings {
        match warning {
            InferenceWarning::PerfectFit => writeln!(
                out,
                "Warning: essentially perfect fit; standard errors and p-values are unreliable"
            )?,
            InferenceWarning::VanishingRss => writeln!(
                out,
                "Warning: residual sum of squares vanishes under the selected formula; \
                 standard errors and p-values are unreliable"
            )?,
        }
    }

    Ok(())
}

/// Render the report as pretty-printed JSON.
///
/// Non-finite values (infinite t-values of a perfect fit) serialize as `null`.
pub fn render_json(report: &StatisticsReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
