/*
[INPUT]:  Venue, stock, account and order identifiers; order requests
[OUTPUT]: Raw ApiResponse values from the trading API
[POS]:    HTTP layer - trading endpoints under /ob/api
[UPDATE]: When adding new trading endpoints or changing path templates
*/

use crate::http::{paths, ApiResponse, Result, StockfighterClient};
use crate::types::OrderRequest;
use tracing::error;

impl StockfighterClient {
    /// Check that the API is up
    ///
    /// GET /ob/api/heartbeat
    pub async fn heartbeat(&self) -> Result<ApiResponse> {
        let response = self.api_get(&paths::heartbeat()).await?;
        if !response.is_ok() {
            error!(error = %response.error_message(), "heartbeat reports API is down");
        }
        Ok(response)
    }

    /// Check that a venue is up
    ///
    /// GET /ob/api/venues/{venue}/heartbeat
    pub async fn venue_heartbeat(&self, venue: &str) -> Result<ApiResponse> {
        let response = self.api_get(&paths::venue_heartbeat(venue)).await?;
        if !response.is_ok() {
            error!(venue, error = %response.error_message(), "heartbeat reports error with venue");
        }
        Ok(response)
    }

    /// List the stocks traded on a venue
    ///
    /// GET /ob/api/venues/{venue}/stocks
    pub async fn venue_stocks(&self, venue: &str) -> Result<ApiResponse> {
        let response = self.api_get(&paths::venue_stocks(venue)).await?;
        if !response.is_ok() {
            error!(venue, error = %response.error_message(), "could not list stocks for venue");
        }
        Ok(response)
    }

    /// All orders placed by an account on a venue
    ///
    /// GET /ob/api/venues/{venue}/accounts/{account}/orders
    pub async fn account_orders(&self, venue: &str, account: &str) -> Result<ApiResponse> {
        let response = self.api_get(&paths::account_orders(venue, account)).await?;
        if !response.is_ok() {
            error!(
                venue,
                account,
                error = %response.error_message(),
                "could not get orders for account"
            );
        }
        Ok(response)
    }

    /// Orders placed by an account on one stock
    ///
    /// GET /ob/api/venues/{venue}/accounts/{account}/stocks/{stock}/orders
    pub async fn account_stock_orders(
        &self,
        venue: &str,
        account: &str,
        stock: &str,
    ) -> Result<ApiResponse> {
        let response = self
            .api_get(&paths::account_stock_orders(venue, account, stock))
            .await?;
        if !response.is_ok() {
            error!(
                venue,
                account,
                stock,
                error = %response.error_message(),
                "could not get orders for account and stock"
            );
        }
        Ok(response)
    }

    /// Order book for a stock
    ///
    /// GET /ob/api/venues/{venue}/stocks/{stock}
    pub async fn stock_orderbook(&self, venue: &str, stock: &str) -> Result<ApiResponse> {
        let response = self.api_get(&paths::stock_orderbook(venue, stock)).await?;
        if !response.is_ok() {
            error!(venue, stock, error = %response.error_message(), "could not get orderbook");
        }
        Ok(response)
    }

    /// Latest quote for a stock
    ///
    /// GET /ob/api/venues/{venue}/stocks/{stock}/quote
    pub async fn stock_quote(&self, venue: &str, stock: &str) -> Result<ApiResponse> {
        let response = self.api_get(&paths::stock_quote(venue, stock)).await?;
        if !response.is_ok() {
            error!(venue, stock, error = %response.error_message(), "could not get quote");
        }
        Ok(response)
    }

    /// Status of a single order
    ///
    /// GET /ob/api/venues/{venue}/stocks/{stock}/orders/{order}
    pub async fn stock_order_status(
        &self,
        venue: &str,
        stock: &str,
        order_id: u64,
    ) -> Result<ApiResponse> {
        let response = self
            .api_get(&paths::stock_order(venue, stock, order_id))
            .await?;
        if !response.is_ok() {
            error!(
                venue,
                stock,
                order_id,
                error = %response.error_message(),
                "could not get order status"
            );
        }
        Ok(response)
    }

    /// Cancel an order
    ///
    /// DELETE /ob/api/venues/{venue}/stocks/{stock}/orders/{order}
    pub async fn stock_order_cancel(
        &self,
        venue: &str,
        stock: &str,
        order_id: u64,
    ) -> Result<ApiResponse> {
        let response = self
            .api_delete(&paths::stock_order(venue, stock, order_id))
            .await?;
        if !response.is_ok() {
            error!(
                venue,
                stock,
                order_id,
                error = %response.error_message(),
                "could not cancel order"
            );
        }
        Ok(response)
    }

    /// Place an order; the request is forwarded as-is
    ///
    /// POST /ob/api/venues/{venue}/stocks/{stock}/orders
    pub async fn stock_order(&self, order: &OrderRequest) -> Result<ApiResponse> {
        let path = paths::stock_orders(&order.venue, &order.symbol);
        let response = self.api_post(&path, order).await?;
        if !response.is_ok() {
            error!(
                venue = %order.venue,
                stock = %order.symbol,
                error = %response.error_message(),
                "error placing order"
            );
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, Credentials, StockfighterClient, StockfighterError};
    use crate::types::{Direction, OrderRequest, OrderType};
    use serde_json::json;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> StockfighterClient {
        let config = ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        };
        StockfighterClient::with_config(Credentials::new("test-api-key"), config)
            .expect("client init")
    }

    #[tokio::test]
    async fn test_heartbeat() {
        let server = MockServer::start().await;
        let body = json!({"ok": true, "error": ""});

        Mock::given(method("GET"))
            .and(path("/ob/api/heartbeat"))
            .and(header("X-Starfighter-Authorization", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).heartbeat().await.expect("heartbeat failed");

        assert!(response.is_ok());
        assert_eq!(response.into_value(), body);
    }

    #[tokio::test]
    async fn test_stock_quote() {
        let server = MockServer::start().await;
        let body = json!({
            "ok": true,
            "symbol": "FOOBAR",
            "venue": "TESTEX",
            "bid": 5100,
            "ask": 5125,
            "bidSize": 392,
            "askSize": 711,
            "bidDepth": 2748,
            "askDepth": 2237,
            "last": 5125,
            "lastSize": 52,
            "lastTrade": "2015-07-13T05:38:17.33640392Z",
            "quoteTime": "2015-07-13T05:38:17.33640392Z"
        });

        Mock::given(method("GET"))
            .and(path("/ob/api/venues/TESTEX/stocks/FOOBAR/quote"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .stock_quote("TESTEX", "FOOBAR")
            .await
            .expect("stock_quote failed");

        assert_eq!(response.into_value(), body);
    }

    #[tokio::test]
    async fn test_stock_order_posts_exact_body() {
        let server = MockServer::start().await;
        let expected_body = r#"{"account":"EXB123456","venue":"TESTEX","symbol":"FOOBAR","price":12300,"qty":100,"direction":"buy","orderType":"limit"}"#;

        Mock::given(method("POST"))
            .and(path("/ob/api/venues/TESTEX/stocks/FOOBAR/orders"))
            .and(header("content-type", "application/json"))
            .and(body_string(expected_body))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "symbol": "FOOBAR",
                "venue": "TESTEX",
                "direction": "buy",
                "originalQty": 100,
                "qty": 100,
                "price": 12300,
                "orderType": "limit",
                "id": 12345,
                "account": "EXB123456",
                "open": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = OrderRequest {
            account: "EXB123456".to_string(),
            venue: "TESTEX".to_string(),
            symbol: "FOOBAR".to_string(),
            price: 12300,
            qty: 100,
            direction: Direction::Buy,
            order_type: OrderType::Limit,
        };

        let response = client_for(&server)
            .stock_order(&order)
            .await
            .expect("stock_order failed");

        assert!(response.is_ok());
        assert_eq!(response.get("id"), Some(&json!(12345)));
    }

    #[tokio::test]
    async fn test_stock_order_cancel_uses_delete() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/ob/api/venues/TESTEX/stocks/FOOBAR/orders/1234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "open": false})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .stock_order_cancel("TESTEX", "FOOBAR", 1234)
            .await
            .expect("cancel failed");

        assert_eq!(response.get("open"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn test_api_failure_is_returned_not_raised() {
        let server = MockServer::start().await;
        let body = json!({"ok": false, "error": "No venue exists with the symbol NOPE"});

        Mock::given(method("GET"))
            .and(path("/ob/api/venues/NOPE/heartbeat"))
            .respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .venue_heartbeat("NOPE")
            .await
            .expect("business errors must not surface as Err");

        assert!(!response.is_ok());
        assert_eq!(response.error(), Some("No venue exists with the symbol NOPE"));
        assert_eq!(response.into_value(), body);
    }

    #[tokio::test]
    async fn test_non_json_body_keeps_raw_bytes() {
        let server = MockServer::start().await;
        let raw = b"<html><body>502 Bad Gateway</body></html>".to_vec();

        Mock::given(method("GET"))
            .and(path("/ob/api/venues/TESTEX/stocks"))
            .respond_with(ResponseTemplate::new(502).set_body_bytes(raw.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .venue_stocks("TESTEX")
            .await
            .expect_err("non-json body must be an error");

        match err {
            StockfighterError::InvalidJson { raw: got, detail } => {
                assert_eq!(got, raw);
                assert!(!detail.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_propagated() {
        // Grab a free port, then release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let config = ClientConfig {
            base_url: format!("http://127.0.0.1:{port}"),
            ..ClientConfig::default()
        };
        let client = StockfighterClient::with_config(Credentials::new("k"), config)
            .expect("client init");

        let err = client.heartbeat().await.expect_err("connection must fail");
        assert!(matches!(err, StockfighterError::Http(_)));
    }
}
