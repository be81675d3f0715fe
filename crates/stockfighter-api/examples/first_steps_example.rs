/*
[INPUT]:  STOCKFIGHTER_API_KEY environment variable
[OUTPUT]: A started level, a quote, one order and a few seconds of ticker tape
[POS]:    Examples - end-to-end walk through the first level
[UPDATE]: When the public client API changes
*/

use stockfighter_api::*;
use tokio::time::{Duration, sleep};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("stockfighter_api=info"))
        .init();

    let client = StockfighterClient::with_config(Credentials::from_env()?, ClientConfig::from_env())?;

    let level = client.gm_start("first_steps").await?;
    let Some(instance_id) = level.instance_id() else {
        println!("level did not start: {}", level.error_message());
        return Ok(());
    };

    let account = level
        .get("account")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();
    let venue = level
        .get("venues")
        .and_then(|value| value.get(0))
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();
    let stock = level
        .get("tickers")
        .and_then(|value| value.get(0))
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();
    println!("instance {instance_id}: account={account} venue={venue} stock={stock}");

    // Frames are logged by the default handler on the stream's own task
    let mut tape = client
        .stock_ticker_stream(&venue, &stock, &account, None)
        .await?;

    let quote = client.stock_quote(&venue, &stock).await?;
    println!("quote: {}", quote.as_value());

    let order = OrderRequest {
        account: account.clone(),
        venue: venue.clone(),
        symbol: stock.clone(),
        price: 0,
        qty: 100,
        direction: Direction::Buy,
        order_type: OrderType::Market,
    };
    let placed = client.stock_order(&order).await?;
    println!("order: {}", placed.as_value());

    sleep(Duration::from_secs(3)).await;
    tape.close().await;

    client.gm_stop(instance_id).await?;
    Ok(())
}
