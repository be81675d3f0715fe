/*
[INPUT]:  Venue, stock, account, order, level and instance identifiers
[OUTPUT]: Endpoint paths relative to the API prefix
[POS]:    HTTP layer - path templates shared by all endpoint helpers
[UPDATE]: When endpoints are added or their templates change
*/

//! Identifiers are interpolated verbatim. Values containing `/` or other
//! reserved characters are the caller's problem.

pub fn heartbeat() -> String {
    "/heartbeat".to_string()
}

pub fn venue_heartbeat(venue: &str) -> String {
    format!("/venues/{venue}/heartbeat")
}

pub fn venue_stocks(venue: &str) -> String {
    format!("/venues/{venue}/stocks")
}

pub fn account_orders(venue: &str, account: &str) -> String {
    format!("/venues/{venue}/accounts/{account}/orders")
}

pub fn account_stock_orders(venue: &str, account: &str, stock: &str) -> String {
    format!("/venues/{venue}/accounts/{account}/stocks/{stock}/orders")
}

pub fn stock_orderbook(venue: &str, stock: &str) -> String {
    format!("/venues/{venue}/stocks/{stock}")
}

pub fn stock_quote(venue: &str, stock: &str) -> String {
    format!("/venues/{venue}/stocks/{stock}/quote")
}

/// Place new orders on a stock
pub fn stock_orders(venue: &str, stock: &str) -> String {
    format!("/venues/{venue}/stocks/{stock}/orders")
}

/// Status and cancellation of a single order
pub fn stock_order(venue: &str, stock: &str, order_id: u64) -> String {
    format!("/venues/{venue}/stocks/{stock}/orders/{order_id}")
}

pub fn level(level: &str) -> String {
    format!("/levels/{level}")
}

pub fn instance(instance_id: u64) -> String {
    format!("/instances/{instance_id}")
}

pub fn instance_action(instance_id: u64, action: &str) -> String {
    format!("/instances/{instance_id}/{action}")
}
