/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::{Direction, OrderType};

/// Body of `POST /venues/{venue}/stocks/{stock}/orders`
///
/// Field order is the wire order. Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub account: String,
    pub venue: String,
    pub symbol: String,
    pub price: u64,
    pub qty: u64,
    pub direction: Direction,
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
}

/// Body of `POST /instances/{instance}/judge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeRequest {
    pub account: String,
    pub explanation_link: String,
    pub executive_summary: String,
}
