use super::types::{ProjectionInput, ProjectionResult, TermProjection};

pub fn run_projection(input: &ProjectionInput) -> ProjectionResult {
    let tax_deferred_gain =
        input.principal * (1.0 + input.annual_rate).powf(input.term_years) - input.principal;
    let after_tax_rate = input.annual_rate * (1.0 - input.tax_rate);
    let taxed_annually_gain =
        input.principal * ((1.0 + after_tax_rate).powf(input.term_years) - 1.0);

    ProjectionResult {
        tax_deferred_gain,
        taxed_annually_gain,
        tax_savings: tax_deferred_gain - taxed_annually_gain,
    }
}

pub fn run_term_sweep(input: &ProjectionInput, terms: &[f64]) -> Vec<TermProjection> {
    terms
        .iter()
        .map(|&term_years| {
            let result = run_projection(&ProjectionInput {
                term_years,
                ..*input
            });
            TermProjection {
                term_years,
                tax_deferred_gain: result.tax_deferred_gain,
                taxed_annually_gain: result.taxed_annually_gain,
                tax_savings: result.tax_savings,
            }
        })
        .collect()
}
