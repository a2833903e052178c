use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use pricing_engine::config::{Config, LogFormat};
use pricing_engine::taxes::{DefaultTaxCalculationStrategy, StaticTaxLineProvider};
use pricing_engine::totals::models::{PricingRequest, PricingResponse};
use pricing_engine::totals::{CartPricingInput, TotalsOptions, TotalsService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!(
        env = %config.app.env,
        tax_inclusive_pricing = config.pricing.tax_inclusive_pricing,
        "Starting pricing engine"
    );

    let request = match std::env::args().nth(1) {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open pricing request {}", path))?;
            PricingRequest::from_reader(file)
        }
        None => PricingRequest::from_reader(std::io::stdin().lock()),
    }
    .context("Invalid pricing request")?;

    let response = price(&request, config.pricing.tax_inclusive_pricing).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pricing_engine={}", config.app.log_level).into());

    // Logs go to stderr so stdout carries only the JSON response
    match config.app.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn price(request: &PricingRequest, tax_inclusive_pricing: bool) -> anyhow::Result<PricingResponse> {
    let service = TotalsService::new(
        Arc::new(DefaultTaxCalculationStrategy::new()),
        Arc::new(StaticTaxLineProvider::new(request.tax_lines.clone())),
    );

    let context = request.context(tax_inclusive_pricing);
    let options = TotalsOptions {
        include_tax: request.include_tax,
        use_existing_tax_lines: request.use_existing_tax_lines,
        tax_rate: request.tax_rate,
    };

    let totals = service
        .summarize(
            CartPricingInput {
                items: &request.items,
                shipping_methods: &request.shipping_methods,
                discounts: &request.discounts,
                gift_cards: request.gift_cards.as_deref(),
                gift_card_transactions: request.gift_card_transactions.as_deref(),
            },
            &context,
            options,
        )
        .await?;

    let mut refunds = BTreeMap::new();
    for item_id in &request.refund_item_ids {
        let item = request
            .items
            .iter()
            .find(|item| &item.id == item_id)
            .with_context(|| format!("Unknown refund item {}", item_id))?;
        refunds.insert(
            item_id.clone(),
            service.get_line_item_refund(item, &context, request.tax_rate)?,
        );
    }

    Ok(PricingResponse { totals, refunds })
}
