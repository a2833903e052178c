pub mod tax_line;

pub use tax_line::{TaxLine, TaxLineTarget};
