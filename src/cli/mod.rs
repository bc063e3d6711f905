use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::core::{
    Product, ProjectionInput, ProjectionResult, SAMPLE_PRODUCTS, TermProjection, run_projection,
    run_term_sweep,
};

const PRESET_TERMS: [f64; 4] = [3.0, 5.0, 7.0, 10.0];
const BAR_WIDTH: usize = 40;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "annuity",
    about = "Fixed annuity tax advantage calculator (tax-deferred vs annually taxed growth)"
)]
struct Cli {
    #[arg(long, default_value_t = 1_000_000.0, help = "Deposit amount in dollars")]
    deposit: f64,
    #[arg(long, default_value_t = 5.0, help = "MYG rate in percent, e.g. 5")]
    rate: f64,
    #[arg(long, default_value_t = 35.0, help = "Marginal tax rate in percent")]
    tax_rate: f64,
    #[arg(long, default_value_t = 5.0, help = "Term length in years")]
    term: f64,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse<'a> {
    principal: f64,
    annual_rate: f64,
    tax_rate: f64,
    term_years: f64,
    tax_deferred_gain: f64,
    taxed_annually_gain: f64,
    tax_savings: f64,
    term_comparison: &'a [TermProjection],
    products: &'a [Product],
}

pub fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let input = build_inputs(&cli)?;
    let result = run_projection(&input);
    let comparison = run_term_sweep(&input, &PRESET_TERMS);

    match cli.format {
        OutputFormat::Table => {
            print!(
                "{}",
                render_report(&input, &result, &comparison, &SAMPLE_PRODUCTS)
            );
        }
        OutputFormat::Json => {
            let response = ProjectionResponse {
                principal: input.principal,
                annual_rate: input.annual_rate,
                tax_rate: input.tax_rate,
                term_years: input.term_years,
                tax_deferred_gain: result.tax_deferred_gain,
                taxed_annually_gain: result.taxed_annually_gain,
                tax_savings: result.tax_savings,
                term_comparison: &comparison,
                products: &SAMPLE_PRODUCTS,
            };
            let body = serde_json::to_string_pretty(&response).map_err(|e| e.to_string())?;
            println!("{body}");
        }
    }

    Ok(())
}

fn build_inputs(cli: &Cli) -> Result<ProjectionInput, String> {
    if !cli.deposit.is_finite() || cli.deposit < 0.0 {
        return Err("--deposit must be a finite amount >= 0".to_string());
    }

    if !cli.rate.is_finite() || cli.rate <= -100.0 {
        return Err("--rate must be > -100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.tax_rate) {
        return Err("--tax-rate must be between 0 and 100".to_string());
    }

    if !cli.term.is_finite() || cli.term < 0.0 {
        return Err("--term must be >= 0".to_string());
    }

    Ok(ProjectionInput {
        principal: cli.deposit,
        annual_rate: cli.rate / 100.0,
        tax_rate: cli.tax_rate / 100.0,
        term_years: cli.term,
    })
}

fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{amount}");
    }

    let rounded = format!("{:.2}", amount.abs());
    let (whole, frac) = rounded
        .split_once('.')
        .unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Sign is dropped when the amount rounds away to zero.
    let sign = if amount < 0.0 && rounded != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac}")
}

fn bar(value: f64, max: f64) -> String {
    if value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let length = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(length.min(BAR_WIDTH))
}

fn render_report(
    input: &ProjectionInput,
    result: &ProjectionResult,
    comparison: &[TermProjection],
    products: &[Product],
) -> String {
    let mut out = String::new();

    out.push_str("Fixed Annuity Tax Advantage Calculator\n");
    out.push_str(&format!(
        "Deposit ${} at {:.2}% for {} years, {:.2}% marginal tax rate\n",
        format_currency(input.principal),
        input.annual_rate * 100.0,
        input.term_years,
        input.tax_rate * 100.0,
    ));

    let lines = [
        ("Tax-Deferred Gain", result.tax_deferred_gain),
        ("Taxed Annually Gain", result.taxed_annually_gain),
        ("Tax Savings", result.tax_savings),
    ];

    out.push_str("\nYour Results\n");
    let max = result
        .tax_deferred_gain
        .max(result.taxed_annually_gain)
        .max(result.tax_savings);
    for (label, value) in lines {
        out.push_str(&format!(
            "  {:<20} {:<width$} ${}\n",
            label,
            bar(value, max),
            format_currency(value),
            width = BAR_WIDTH,
        ));
    }

    out.push_str("\nTerm Comparison\n");
    out.push_str(&format!(
        "  {:>7}  {:>20}  {:>20}  {:>16}\n",
        "Term", "Tax-Deferred Gain", "Taxed Annually Gain", "Tax Savings"
    ));
    for row in comparison {
        out.push_str(&format!(
            "  {:>4} yr  {:>20}  {:>20}  {:>16}\n",
            row.term_years,
            format!("${}", format_currency(row.tax_deferred_gain)),
            format!("${}", format_currency(row.taxed_annually_gain)),
            format!("${}", format_currency(row.tax_savings)),
        ));
    }

    out.push_str("\nFixed Annuity Product Rates\n");
    out.push_str(&format!(
        "  {:<18}  {:<14}  {:>6}  {:>6}\n",
        "Product", "Carrier", "Term", "Rate"
    ));
    for product in products {
        out.push_str(&format!(
            "  {:<18}  {:<14}  {:>2} yrs  {:>5.2}%\n",
            product.name,
            product.carrier,
            product.term_years,
            product.rate * 100.0,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cli() -> Cli {
        Cli {
            deposit: 1_000_000.0,
            rate: 5.0,
            tax_rate: 35.0,
            term: 5.0,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn build_inputs_converts_percentages_to_fractions() {
        let input = build_inputs(&sample_cli()).expect("inputs must build");
        assert_eq!(input.principal, 1_000_000.0);
        assert!((input.annual_rate - 0.05).abs() < 1e-12);
        assert!((input.tax_rate - 0.35).abs() < 1e-12);
        assert_eq!(input.term_years, 5.0);
    }

    #[test]
    fn build_inputs_rejects_out_of_range_values() {
        let mut cli = sample_cli();
        cli.deposit = -1.0;
        assert!(build_inputs(&cli).is_err());

        let mut cli = sample_cli();
        cli.deposit = f64::NAN;
        assert!(build_inputs(&cli).is_err());

        let mut cli = sample_cli();
        cli.rate = -100.0;
        assert!(build_inputs(&cli).is_err());

        let mut cli = sample_cli();
        cli.tax_rate = 120.0;
        assert!(build_inputs(&cli).is_err());

        let mut cli = sample_cli();
        cli.tax_rate = f64::NAN;
        assert!(build_inputs(&cli).is_err());

        let mut cli = sample_cli();
        cli.term = -1.0;
        assert!(build_inputs(&cli).is_err());
    }

    #[test]
    fn build_inputs_allows_depreciation_rates() {
        let mut cli = sample_cli();
        cli.rate = -5.0;
        let input = build_inputs(&cli).expect("negative rates are valid");
        assert!((input.annual_rate + 0.05).abs() < 1e-12);
    }

    #[test]
    fn currency_formatting_groups_thousands_and_keeps_two_digits() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(5.0), "5.00");
        assert_eq!(format_currency(1_234.5), "1,234.50");
        assert_eq!(format_currency(1_234_567.891), "1,234,567.89");
        assert_eq!(format_currency(-1_234.5), "-1,234.50");
    }

    #[test]
    fn currency_formatting_carries_rounding_into_the_next_group() {
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(999_999.999), "1,000,000.00");
    }

    #[test]
    fn currency_formatting_drops_the_sign_on_rounded_zero() {
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn bar_scales_against_the_largest_value() {
        assert_eq!(bar(100.0, 100.0).len(), BAR_WIDTH);
        assert_eq!(bar(50.0, 100.0).len(), BAR_WIDTH / 2);
        assert_eq!(bar(0.0, 100.0), "");
        assert_eq!(bar(-10.0, 100.0), "");
        assert_eq!(bar(10.0, 0.0), "");
    }

    #[test]
    fn report_renders_results_comparison_and_products() {
        let input = build_inputs(&sample_cli()).expect("inputs must build");
        let result = run_projection(&input);
        let comparison = run_term_sweep(&input, &PRESET_TERMS);
        let report = render_report(&input, &result, &comparison, &SAMPLE_PRODUCTS);

        assert!(report.contains("Your Results"));
        assert!(report.contains("Tax-Deferred Gain"));
        assert!(report.contains("$276,281.56"));
        assert!(report.contains("Term Comparison"));
        assert!(report.contains("10 yr"));
        assert!(report.contains("Fixed Annuity Product Rates"));
        assert!(report.contains("Pacific Life"));
        assert!(report.contains("4.70%"));
    }

    #[test]
    fn json_response_uses_camel_case_field_names() {
        let input = build_inputs(&sample_cli()).expect("inputs must build");
        let result = run_projection(&input);
        let comparison = run_term_sweep(&input, &PRESET_TERMS);
        let response = ProjectionResponse {
            principal: input.principal,
            annual_rate: input.annual_rate,
            tax_rate: input.tax_rate,
            term_years: input.term_years,
            tax_deferred_gain: result.tax_deferred_gain,
            taxed_annually_gain: result.taxed_annually_gain,
            tax_savings: result.tax_savings,
            term_comparison: &comparison,
            products: &SAMPLE_PRODUCTS,
        };

        let body = serde_json::to_string(&response).expect("response must serialize");
        assert!(body.contains("\"taxDeferredGain\""));
        assert!(body.contains("\"taxedAnnuallyGain\""));
        assert!(body.contains("\"taxSavings\""));
        assert!(body.contains("\"termComparison\""));
        assert!(body.contains("\"carrier\":\"Sentinel\""));
    }
}
