/*
[INPUT]:  Venue, account, optional stock and feed kind
[OUTPUT]: WebSocket feed URL
[POS]:    WebSocket layer - endpoint descriptor
[UPDATE]: When the feed URL layout changes
*/

use crate::http::Result;
use crate::types::StreamKind;
use url::Url;

/// Which feed to open; only used to build the URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEndpoint {
    pub venue: String,
    pub account: String,
    pub kind: StreamKind,
    pub stock: Option<String>,
}

impl StreamEndpoint {
    pub fn new(venue: impl Into<String>, account: impl Into<String>, kind: StreamKind) -> Self {
        Self {
            venue: venue.into(),
            account: account.into(),
            kind,
            stock: None,
        }
    }

    pub fn ticker_tape(venue: impl Into<String>, account: impl Into<String>) -> Self {
        Self::new(venue, account, StreamKind::TickerTape)
    }

    pub fn executions(venue: impl Into<String>, account: impl Into<String>) -> Self {
        Self::new(venue, account, StreamKind::Executions)
    }

    /// Narrow the feed to a single stock
    pub fn with_stock(mut self, stock: impl Into<String>) -> Self {
        self.stock = Some(stock.into());
        self
    }

    /// `<ws_base>/ws/<account>/venues/<venue>/<kind>[/stocks/<stock>]`
    pub fn url(&self, ws_base: &str) -> Result<Url> {
        let mut url = format!(
            "{}/ws/{}/venues/{}/{}",
            ws_base.trim_end_matches('/'),
            self.account,
            self.venue,
            self.kind
        );
        if let Some(stock) = &self.stock {
            url.push_str("/stocks/");
            url.push_str(stock);
        }
        Ok(Url::parse(&url)?)
    }
}
