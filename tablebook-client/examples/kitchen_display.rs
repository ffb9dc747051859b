//! Kitchen display demo
//!
//! Logs in and prints the kitchen board on every refresh.
//!
//! ```bash
//! cargo run -p tablebook-mock &
//! TABLEBOOK_EMAIL=admin@restaurant.com TABLEBOOK_PASSWORD=admin123 \
//!     cargo run -p tablebook-client --example kitchen_display
//! ```

use std::time::Duration;

use chrono::Local;
use tablebook_client::views::{KITCHEN_COLUMNS, KitchenDisplay, elapsed_label};
use tablebook_client::{AppContext, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tablebook_client=info".into()),
        )
        .init();

    let config = ClientConfig::from_env();
    let ctx = AppContext::bootstrap(config)?;

    if !ctx.session().is_authenticated() {
        let email =
            std::env::var("TABLEBOOK_EMAIL").unwrap_or_else(|_| "admin@restaurant.com".into());
        let password = std::env::var("TABLEBOOK_PASSWORD").unwrap_or_else(|_| "admin123".into());
        ctx.session().login(&email, &password).await?;
    }

    let mut kitchen = KitchenDisplay::new(ctx.clone());
    kitchen.mount();

    let mut ticker = tokio::time::interval(Duration::from_secs(5));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let now = Local::now().naive_local();
                let summary = kitchen.summary();
                println!(
                    "\n== Kitchen ({} active: {} pending, {} preparing, {} ready) ==",
                    summary.total_active, summary.pending, summary.preparing, summary.ready
                );
                for status in KITCHEN_COLUMNS {
                    println!("[{}]", status);
                    for order in kitchen.column(status) {
                        let items: Vec<String> = order
                            .items
                            .iter()
                            .map(|i| format!("{}x {}", i.quantity, i.name))
                            .collect();
                        println!(
                            "  #{} {} ({}) {}",
                            order.id,
                            elapsed_label(order.created_at, now),
                            order.table_id.map(|t| format!("table {}", t)).unwrap_or_default(),
                            items.join(", ")
                        );
                    }
                }
            }
        }
    }

    kitchen.unmount().await;
    Ok(())
}
