// Tax Capability Doubles
//
// Tax line providers and calculation strategies for exercising the totals
// service without an external tax engine.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pricing_engine::core::{AppError, Result};
use pricing_engine::taxes::{
    DefaultTaxCalculationStrategy, StaticTaxLineProvider, TaxCalculationStrategy, TaxLine,
    TaxLineProvider, TaxLinesMap,
};
use pricing_engine::totals::{CalculationContext, LineItem, TotalsService};
use rust_decimal::Decimal;

/// Provider that records every call it receives
#[derive(Default)]
pub struct RecordingTaxLineProvider {
    inner: StaticTaxLineProvider,
    calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingTaxLineProvider {
    pub fn new(tax_lines: Vec<TaxLine>) -> Self {
        Self {
            inner: StaticTaxLineProvider::new(tax_lines),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Item ids sent with each call, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaxLineProvider for RecordingTaxLineProvider {
    async fn get_tax_lines_map(
        &self,
        items: &[LineItem],
        context: &CalculationContext,
    ) -> Result<TaxLinesMap> {
        self.calls
            .lock()
            .unwrap()
            .push(items.iter().map(|item| item.id.clone()).collect());
        self.inner.get_tax_lines_map(items, context).await
    }
}

/// Provider that always fails
pub struct UnavailableTaxLineProvider;

#[async_trait]
impl TaxLineProvider for UnavailableTaxLineProvider {
    async fn get_tax_lines_map(
        &self,
        _items: &[LineItem],
        _context: &CalculationContext,
    ) -> Result<TaxLinesMap> {
        Err(AppError::tax_provider("tax service unavailable"))
    }
}

/// Strategy returning a fixed amount and counting invocations
pub struct FixedTaxStrategy {
    amount: Decimal,
    calls: AtomicUsize,
}

impl FixedTaxStrategy {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaxCalculationStrategy for FixedTaxStrategy {
    async fn calculate(
        &self,
        _items: &[LineItem],
        _tax_lines: &[TaxLine],
        _context: &CalculationContext,
    ) -> Result<Decimal> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.amount)
    }
}

/// Strategy that always fails
pub struct FailingTaxStrategy;

#[async_trait]
impl TaxCalculationStrategy for FailingTaxStrategy {
    async fn calculate(
        &self,
        _items: &[LineItem],
        _tax_lines: &[TaxLine],
        _context: &CalculationContext,
    ) -> Result<Decimal> {
        Err(AppError::tax_calculation("tax engine timed out"))
    }
}

/// Totals service with the default strategy and pre-resolved tax lines
pub fn default_service(tax_lines: Vec<TaxLine>) -> TotalsService {
    TotalsService::new(
        Arc::new(DefaultTaxCalculationStrategy::new()),
        Arc::new(StaticTaxLineProvider::new(tax_lines)),
    )
}
