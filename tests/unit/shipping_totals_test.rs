// Shipping method totals through the batch entry point
//
// Free shipping, tax-inclusive shipping prices and the provider call shape
// for shipping-only batches.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use helpers::*;
use pricing_engine::core::{AppError, EntityKind};
use pricing_engine::discounts::{Discount, DiscountRuleType};
use pricing_engine::taxes::{DefaultTaxCalculationStrategy, TaxLine};
use pricing_engine::totals::{CalculationContext, ShippingMethod, TotalsOptions, TotalsService};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn context_for(methods: &[ShippingMethod]) -> CalculationContext {
    CalculationContext::default().with_shipping_methods(methods.to_vec())
}

#[tokio::test]
async fn test_provider_invoked_with_empty_item_list() {
    let provider = Arc::new(RecordingTaxLineProvider::new(vec![
        TaxLine::for_shipping_method("sm_1", dec!(10), "VAT"),
    ]));
    let service = TotalsService::new(Arc::new(DefaultTaxCalculationStrategy::new()), provider.clone());
    let methods = vec![ShippingMethod::new("sm_1", dec!(1000))];

    let totals = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &[], TotalsOptions::with_tax())
        .await
        .unwrap();

    assert_eq!(provider.calls(), vec![Vec::<String>::new()]);
    assert_eq!(totals["sm_1"].tax_total, dec!(100));
    assert_eq!(totals["sm_1"].total, dec!(1100));
    assert_shipping_totals_consistent(&totals["sm_1"], false);
}

#[tokio::test]
async fn test_free_shipping_overrides_everything() {
    let service = default_service(vec![]);
    let methods = vec![
        TestDataFactory::taxed_shipping("sm_1", dec!(1000), dec!(10)),
        TestDataFactory::taxed_shipping("sm_2", dec!(4999), dec!(20)),
    ];
    let discounts = vec![Discount::free_shipping("disc_fs")];

    let totals = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &discounts, TotalsOptions::with_tax())
        .await
        .unwrap();

    for method_totals in totals.values() {
        assert_free_shipping(method_totals);
    }
    assert_eq!(totals["sm_2"].original_tax_total, dec!(1000));
}

#[tokio::test]
async fn test_other_discounts_do_not_affect_shipping() {
    let service = default_service(vec![]);
    let methods = vec![TestDataFactory::taxed_shipping("sm_1", dec!(800), dec!(10))];
    let discounts = vec![Discount::new("disc_1", DiscountRuleType::Fixed, dec!(500))];

    let totals = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &discounts, TotalsOptions::with_tax())
        .await
        .unwrap();

    assert_eq!(totals["sm_1"].total, dec!(880));
}

#[tokio::test]
async fn test_tax_inclusive_shipping_price() {
    let service = default_service(vec![]);
    let methods = vec![TestDataFactory::taxed_shipping("sm_1", dec!(1200), dec!(20)).including_tax()];
    let context = context_for(&methods).with_tax_inclusive_pricing(true);

    let totals = service
        .get_shipping_methods_totals(&methods, &context, &[], TotalsOptions::with_tax())
        .await
        .unwrap();

    let method_totals = &totals["sm_1"];
    assert_eq!(method_totals.subtotal, dec!(1000));
    assert_eq!(method_totals.tax_total, dec!(200));
    assert_eq!(method_totals.total, dec!(1200));
    assert_eq!(method_totals.original_total, dec!(1200));
    assert_shipping_totals_consistent(method_totals, true);
}

#[tokio::test]
async fn test_missing_shipping_tax_lines() {
    let service = default_service(vec![]);
    let methods = vec![ShippingMethod::new("sm_1", dec!(1000))];

    let result = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &[], TotalsOptions::with_tax())
        .await;

    match result {
        Err(AppError::MissingTaxLines { entity, id }) => {
            assert_eq!(entity, EntityKind::ShippingMethod);
            assert_eq!(id, "sm_1");
        }
        other => panic!("expected missing tax lines error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_existing_lines_default_to_empty() {
    let service = default_service(vec![]);
    let methods = vec![ShippingMethod::new("sm_1", dec!(1000))];
    let options = TotalsOptions {
        include_tax: true,
        use_existing_tax_lines: true,
        tax_rate: None,
    };

    let totals = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &[], options)
        .await
        .unwrap();

    assert_eq!(totals["sm_1"].tax_total, Decimal::ZERO);
    assert_eq!(totals["sm_1"].total, dec!(1000));
}

#[tokio::test]
async fn test_legacy_batch() {
    let provider = Arc::new(RecordingTaxLineProvider::default());
    let service = TotalsService::new(Arc::new(FailingTaxStrategy), provider.clone());
    let methods = vec![
        ShippingMethod::new("sm_1", dec!(1005)),
        ShippingMethod::new("sm_2", dec!(0)),
    ];

    let totals = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &[], TotalsOptions::legacy(dec!(5)))
        .await
        .unwrap();

    assert!(provider.calls().is_empty());
    // 50.25 rounds to 50
    assert_eq!(totals["sm_1"].tax_total, dec!(50));
    assert_eq!(totals["sm_1"].total, dec!(1055));
    assert_eq!(totals["sm_2"].total, Decimal::ZERO);
    for method_totals in totals.values() {
        assert_shipping_totals_consistent(method_totals, false);
    }
}

#[tokio::test]
async fn test_override_lines_computed_without_include_tax() {
    let service = default_service(vec![]);
    let method = ShippingMethod::new("sm_1", dec!(1000));
    let override_lines = vec![TaxLine::for_shipping_method("sm_1", dec!(10), "VAT")];

    let totals = service
        .get_shipping_method_totals(
            &method,
            &context_for(std::slice::from_ref(&method)),
            false,
            Some(override_lines.as_slice()),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(totals.tax_lines, override_lines);
    assert_eq!(totals.tax_total, dec!(100));
    assert_eq!(totals.total, dec!(1100));
    assert_shipping_totals_consistent(&totals, false);
}

#[tokio::test]
async fn test_override_lines_win_over_method_lines() {
    let service = default_service(vec![]);
    let method = TestDataFactory::taxed_shipping("sm_1", dec!(1000), dec!(10));
    let override_lines = vec![TaxLine::for_shipping_method("sm_1", dec!(25), "Luxury")];

    let totals = service
        .get_shipping_method_totals(
            &method,
            &context_for(std::slice::from_ref(&method)),
            true,
            Some(override_lines.as_slice()),
            &[],
        )
        .await
        .unwrap();

    assert_eq!(totals.tax_lines, override_lines);
    assert_eq!(totals.tax_total, dec!(250));
}

#[tokio::test]
async fn test_out_of_range_flat_rate_rejected() {
    let service = default_service(vec![]);
    let methods = vec![ShippingMethod::new("sm_1", dec!(1000))];

    let result = service
        .get_shipping_methods_totals(&methods, &context_for(&methods), &[], TotalsOptions::legacy(dec!(-100)))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = service.get_shipping_method_totals_legacy(&methods[0], dec!(100.5), &[]);
    assert!(matches!(result, Err(AppError::Validation(_))));
}
