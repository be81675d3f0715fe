/*
[INPUT]:  Command-line arguments and STOCKFIGHTER_* environment variables
[OUTPUT]: Parsed Cli with one subcommand per API operation
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding commands or changing flags
*/

use clap::{Args, Parser, Subcommand};
use stockfighter_api::{Direction, OrderType};

#[derive(Parser, Debug)]
#[command(name = "stockfighter", version, about = "Stockfighter API client")]
pub struct Cli {
    /// API key sent in X-Starfighter-Authorization
    #[arg(long = "api-key", env = "STOCKFIGHTER_API_KEY", hide_env_values = true)]
    pub api_key: String,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the API is up
    Heartbeat,
    /// Check that a venue is up
    Venue { venue: String },
    /// List stocks on a venue
    Stocks { venue: String },
    /// Latest quote for a stock
    Quote { venue: String, stock: String },
    /// Order book for a stock
    Book { venue: String, stock: String },
    /// Place an order
    Order(OrderArgs),
    /// Status of an order
    Status {
        venue: String,
        stock: String,
        order_id: u64,
    },
    /// Cancel an order
    Cancel {
        venue: String,
        stock: String,
        order_id: u64,
    },
    /// Orders placed by an account, optionally for one stock
    Orders {
        venue: String,
        account: String,
        #[arg(long)]
        stock: Option<String>,
    },
    /// Level control on the game master API
    #[command(subcommand)]
    Level(LevelCommand),
    /// Submit a verdict for an instance
    Judge {
        instance_id: u64,
        account: String,
        #[arg(long = "link")]
        explanation_link: String,
        #[arg(long = "summary")]
        executive_summary: String,
    },
    /// Log the ticker tape until interrupted
    Tape(FeedArgs),
    /// Log executions until interrupted
    Executions(FeedArgs),
}

#[derive(Args, Debug)]
pub struct OrderArgs {
    pub venue: String,
    pub stock: String,
    #[arg(long)]
    pub account: String,
    /// Price in cents
    #[arg(long)]
    pub price: u64,
    #[arg(long)]
    pub qty: u64,
    #[arg(long, value_parser = parse_direction)]
    pub direction: Direction,
    #[arg(long = "type", value_parser = parse_order_type, default_value = "limit")]
    pub order_type: OrderType,
}

#[derive(Subcommand, Debug)]
pub enum LevelCommand {
    /// Start a level and print its instance
    Start { level: String },
    Status { instance_id: u64 },
    Stop { instance_id: u64 },
    Restart { instance_id: u64 },
    Resume { instance_id: u64 },
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    pub venue: String,
    pub account: String,
    #[arg(long)]
    pub stock: Option<String>,
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    value.parse()
}

fn parse_order_type(value: &str) -> Result<OrderType, String> {
    value.parse()
}
