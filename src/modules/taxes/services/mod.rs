pub mod tax_calculator;
pub mod tax_line_provider;

pub use tax_calculator::{DefaultTaxCalculationStrategy, TaxCalculationStrategy};
pub use tax_line_provider::{StaticTaxLineProvider, TaxLineProvider, TaxLinesMap};
