pub mod models;
pub mod services;

pub use models::{TaxLine, TaxLineTarget};
pub use services::{
    DefaultTaxCalculationStrategy, StaticTaxLineProvider, TaxCalculationStrategy, TaxLineProvider,
    TaxLinesMap,
};
