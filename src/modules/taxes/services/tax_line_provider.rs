use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::Result;
use crate::modules::taxes::models::{TaxLine, TaxLineTarget};
use crate::modules::totals::models::{CalculationContext, LineItem};

/// Tax lines resolved for a batch, keyed by entity id
#[derive(Debug, Clone, Default)]
pub struct TaxLinesMap {
    pub line_items_tax_lines: HashMap<String, Vec<TaxLine>>,
    pub shipping_methods_tax_lines: HashMap<String, Vec<TaxLine>>,
}

/// Resolves applicable tax lines for line items and shipping methods.
///
/// Called once per batch. Shipping tax lines are resolved from the
/// context's shipping methods.
#[async_trait]
pub trait TaxLineProvider: Send + Sync {
    async fn get_tax_lines_map(
        &self,
        items: &[LineItem],
        context: &CalculationContext,
    ) -> Result<TaxLinesMap>;
}

/// Provider backed by tax lines resolved ahead of time
#[derive(Debug, Clone, Default)]
pub struct StaticTaxLineProvider {
    tax_lines: Vec<TaxLine>,
}

impl StaticTaxLineProvider {
    pub fn new(tax_lines: Vec<TaxLine>) -> Self {
        Self { tax_lines }
    }
}

#[async_trait]
impl TaxLineProvider for StaticTaxLineProvider {
    async fn get_tax_lines_map(
        &self,
        items: &[LineItem],
        context: &CalculationContext,
    ) -> Result<TaxLinesMap> {
        let mut map = TaxLinesMap::default();

        for line in &self.tax_lines {
            match &line.target {
                TaxLineTarget::Item(id) if items.iter().any(|item| &item.id == id) => {
                    map.line_items_tax_lines
                        .entry(id.clone())
                        .or_default()
                        .push(line.clone());
                }
                TaxLineTarget::ShippingMethod(id)
                    if context.shipping_methods.iter().any(|sm| &sm.id == id) =>
                {
                    map.shipping_methods_tax_lines
                        .entry(id.clone())
                        .or_default()
                        .push(line.clone());
                }
                _ => {}
            }
        }

        Ok(map)
    }
}
