use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput {
    pub principal: f64,
    pub annual_rate: f64,
    pub tax_rate: f64,
    pub term_years: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectionResult {
    pub tax_deferred_gain: f64,
    pub taxed_annually_gain: f64,
    pub tax_savings: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermProjection {
    pub term_years: f64,
    pub tax_deferred_gain: f64,
    pub taxed_annually_gain: f64,
    pub tax_savings: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: &'static str,
    pub carrier: &'static str,
    pub term_years: u32,
    pub rate: f64,
}

pub const SAMPLE_PRODUCTS: [Product; 4] = [
    Product {
        name: "SecureGrowth 3",
        carrier: "Sentinel",
        term_years: 3,
        rate: 0.055,
    },
    Product {
        name: "IncomeGuard 5",
        carrier: "Protective",
        term_years: 5,
        rate: 0.052,
    },
    Product {
        name: "PremierShield 7",
        carrier: "Athene",
        term_years: 7,
        rate: 0.049,
    },
    Product {
        name: "MaxSecure 10",
        carrier: "Pacific Life",
        term_years: 10,
        rate: 0.047,
    },
];
