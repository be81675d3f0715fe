/*
[INPUT]:  Parsed CLI command and a configured StockfighterClient
[OUTPUT]: API responses printed as JSON, or a logged feed until interrupted
[POS]:    CLI layer - command dispatch
[UPDATE]: When adding commands or changing output format
*/

use anyhow::{Context, Result};
use stockfighter_api::{
    ApiResponse, JudgeRequest, OrderRequest, StockfighterClient, StreamEndpoint, StreamKind,
};
use tracing::info;

use crate::cli::{Command, FeedArgs, LevelCommand};

/// What a command produced
pub enum Outcome {
    Response(ApiResponse),
    FeedEnded,
}

pub async fn run(client: &StockfighterClient, command: Command) -> Result<Outcome> {
    let response = match command {
        Command::Heartbeat => client.heartbeat().await,
        Command::Venue { venue } => client.venue_heartbeat(&venue).await,
        Command::Stocks { venue } => client.venue_stocks(&venue).await,
        Command::Quote { venue, stock } => client.stock_quote(&venue, &stock).await,
        Command::Book { venue, stock } => client.stock_orderbook(&venue, &stock).await,
        Command::Order(args) => {
            let order = OrderRequest {
                account: args.account,
                venue: args.venue,
                symbol: args.stock,
                price: args.price,
                qty: args.qty,
                direction: args.direction,
                order_type: args.order_type,
            };
            client.stock_order(&order).await
        }
        Command::Status {
            venue,
            stock,
            order_id,
        } => client.stock_order_status(&venue, &stock, order_id).await,
        Command::Cancel {
            venue,
            stock,
            order_id,
        } => client.stock_order_cancel(&venue, &stock, order_id).await,
        Command::Orders {
            venue,
            account,
            stock: Some(stock),
        } => client.account_stock_orders(&venue, &account, &stock).await,
        Command::Orders {
            venue,
            account,
            stock: None,
        } => client.account_orders(&venue, &account).await,
        Command::Level(level) => match level {
            LevelCommand::Start { level } => client.gm_start(&level).await,
            LevelCommand::Status { instance_id } => client.gm_status(instance_id).await,
            LevelCommand::Stop { instance_id } => client.gm_stop(instance_id).await,
            LevelCommand::Restart { instance_id } => client.gm_restart(instance_id).await,
            LevelCommand::Resume { instance_id } => client.gm_resume(instance_id).await,
        },
        Command::Judge {
            instance_id,
            account,
            explanation_link,
            executive_summary,
        } => {
            let verdict = JudgeRequest {
                account,
                explanation_link,
                executive_summary,
            };
            client.gm_judge(instance_id, &verdict).await
        }
        Command::Tape(feed) => return follow_feed(client, feed, StreamKind::TickerTape).await,
        Command::Executions(feed) => {
            return follow_feed(client, feed, StreamKind::Executions).await;
        }
    };

    Ok(Outcome::Response(response.context("request failed")?))
}

async fn follow_feed(client: &StockfighterClient, feed: FeedArgs, kind: StreamKind) -> Result<Outcome> {
    let mut endpoint = StreamEndpoint::new(feed.venue, feed.account, kind);
    if let Some(stock) = feed.stock {
        endpoint = endpoint.with_stock(stock);
    }

    let mut stream = client.stream(endpoint, None).await.context("open feed")?;
    info!(url = %stream.url(), "following feed, press Ctrl-C to stop");

    tokio::select! {
        _ = stream.closed() => info!("feed closed by server"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("install Ctrl-C handler")?;
            info!("received SIGINT");
        }
    }

    stream.close().await;
    Ok(Outcome::FeedEnded)
}
