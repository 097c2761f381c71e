//! End-to-end token requests through the service with a scripted transport

use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;
use datacap_token::config::{CERTIFICATION_ENDPOINT, CERTIFICATION_SALE_ENDPOINT, PRODUCTION_ENDPOINT};
use datacap_token::TransactionStatus;
use datacap_token::prelude::*;

#[derive(Default)]
struct ScriptedTransport {
    replies: Mutex<Vec<TokenResult<TransportResponse>>>,
    requests: Mutex<Vec<Sent>>,
}

struct Sent {
    endpoint: String,
    headers: Vec<(String, String)>,
    body: serde_json::Value,
    timeout: Duration,
}

impl ScriptedTransport {
    fn replying(status: u16, body: &str) -> Self {
        let transport = Self::default();
        transport.replies.lock().unwrap().push(Ok(TransportResponse {
            status,
            body: body.to_string(),
        }));
        transport
    }

    fn failing(message: &str) -> Self {
        let transport = Self::default();
        transport
            .replies
            .lock()
            .unwrap()
            .push(Err(TokenError::Network(message.to_string())));
        transport
    }
}

impl Transport for &ScriptedTransport {
    fn post(
        &self,
        endpoint: &str,
        headers: &[(String, String)],
        body: &str,
        timeout: Duration,
    ) -> TokenResult<TransportResponse> {
        self.requests.lock().unwrap().push(Sent {
            endpoint: endpoint.to_string(),
            headers: headers.to_vec(),
            body: serde_json::from_str(body).unwrap(),
            timeout,
        });
        self.replies.lock().unwrap().remove(0)
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn cert_config() -> TokenConfig {
    TokenConfig::default()
        .with_mode(Mode::Certification)
        .with_public_key("cert_public_key")
}

fn visa() -> CardData {
    CardData::from_form("4111 1111 1111 1111", "12/28", "123").unwrap()
}

#[test]
fn certification_request_round_trip() {
    let transport = ScriptedTransport::replying(
        200,
        r#"{"token":"DC_cert_token","brand":"Visa","last4":"1111","responseCode":"00","responseMessage":"Approved"}"#,
    );
    let tokenizer = RemoteTokenizer::new(cert_config(), &transport).unwrap();
    let service = TokenService::new(tokenizer);

    let token = service.request_token_at(&visa(), today()).unwrap();
    assert_eq!(token.token, "DC_cert_token");
    assert_eq!(token.masked_card_number, "**** **** **** 1111");
    assert_eq!(token.to_saved().expiration_date, "12/28");

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.endpoint, CERTIFICATION_ENDPOINT);
    assert_eq!(sent.body["cardNumber"], "4111111111111111");
    assert_eq!(sent.body["isCertification"], true);
    assert_eq!(sent.timeout, Duration::from_secs(30));
    assert!(sent
        .headers
        .contains(&("X-Certification-Mode".to_string(), "true".to_string())));
    assert!(sent
        .headers
        .contains(&("Authorization".to_string(), "cert_public_key".to_string())));
}

#[test]
fn invalid_card_never_reaches_transport() {
    let transport = ScriptedTransport::replying(200, r#"{"token":"unused"}"#);
    let service = TokenService::new(RemoteTokenizer::new(cert_config(), &transport).unwrap());

    let card = CardData::from_form("4111 1111 1111 1112", "12/28", "123").unwrap();
    let result = service.request_token_at(&card, today());

    assert!(matches!(result, Err(TokenError::InvalidCardNumber)));
    assert!(transport.requests.lock().unwrap().is_empty());
}

#[test]
fn declined_by_endpoint() {
    let transport = ScriptedTransport::replying(402, r#"{"error":"Card declined"}"#);
    let service = TokenService::new(RemoteTokenizer::new(cert_config(), &transport).unwrap());

    let err = service.request_token_at(&visa(), today()).unwrap_err();
    assert_eq!(err.to_string(), "Tokenization failed: Card declined");
    assert!(!err.is_retryable());
}

#[test]
fn non_approved_response_code() {
    let transport = ScriptedTransport::replying(
        200,
        r#"{"token":"tok","responseCode":"51","responseMessage":"Insufficient funds"}"#,
    );
    let service = TokenService::new(RemoteTokenizer::new(cert_config(), &transport).unwrap());

    let result = service.request_token_at(&visa(), today());
    assert!(matches!(result, Err(TokenError::TokenizationFailed(m)) if m == "Insufficient funds"));
}

#[test]
fn transport_failure_is_retryable() {
    let transport = ScriptedTransport::failing("connection reset");
    let service = TokenService::new(RemoteTokenizer::new(cert_config(), &transport).unwrap());

    let err = service.request_token_at(&visa(), today()).unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.to_string(), "Network error: connection reset");
}

#[test]
fn production_omits_certification_header() {
    let transport = ScriptedTransport::replying(200, r#"{"token":"tok_live"}"#);
    let config = TokenConfig::default()
        .with_mode(Mode::Production)
        .with_public_key("live_public_key");
    let service = TokenService::new(RemoteTokenizer::new(config, &transport).unwrap());

    service.request_token_at(&visa(), today()).unwrap();

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests[0].endpoint, PRODUCTION_ENDPOINT);
    assert_eq!(requests[0].body["isCertification"], false);
    assert!(requests[0]
        .headers
        .iter()
        .all(|(name, _)| name != "X-Certification-Mode"));
}

#[test]
fn remote_mode_requires_key() {
    let transport = ScriptedTransport::default();
    let config = TokenConfig::default().with_mode(Mode::Production);
    assert!(matches!(
        RemoteTokenizer::new(config, &transport),
        Err(TokenError::MissingApiConfiguration)
    ));
}

#[test]
fn tokenize_then_sell_in_certification() {
    let transport = ScriptedTransport::replying(200, r#"{"token":"DC_cert_token"}"#);
    transport.replies.lock().unwrap().push(Ok(TransportResponse {
        status: 200,
        body: r#"{"transactionId":"TX-77","maskedCard":"****1111","cardType":"Visa","responseCode":"00","responseMessage":"Approved"}"#.to_string(),
    }));

    let tokens = TokenService::new(RemoteTokenizer::new(cert_config(), &transport).unwrap());
    let token = tokens.request_token_at(&visa(), today()).unwrap();

    let sales = SaleService::new(RemoteProcessor::new(cert_config(), &transport).unwrap());
    let transaction = sales
        .process_sale(&token.token, Amount::parse("19.99").unwrap())
        .unwrap();
    assert!(transaction.is_approved());
    assert_eq!(transaction.id, "TX-77");
    assert_eq!(transaction.token, "DC_cert_token");

    let requests = transport.requests.lock().unwrap();
    let sale = &requests[1];
    assert_eq!(sale.endpoint, CERTIFICATION_SALE_ENDPOINT);
    assert_eq!(sale.body["token"], "DC_cert_token");
    assert_eq!(sale.body["amount"], 1999);
    assert_eq!(sale.body["currency"], "USD");
    assert_eq!(sale.body["test"], true);
    // base64("cert_public_key")
    assert!(sale.headers.contains(&(
        "Authorization".to_string(),
        "Basic Y2VydF9wdWJsaWNfa2V5".to_string()
    )));
}

#[test]
fn declined_sale_is_not_an_error() {
    let transport = ScriptedTransport::replying(
        200,
        r#"{"transactionId":"TX-78","responseCode":"51","responseMessage":"Insufficient funds"}"#,
    );
    let sales = SaleService::new(RemoteProcessor::new(cert_config(), &transport).unwrap());

    let transaction = sales
        .process_sale("DC_cert_token", Amount::from_cents(500).unwrap())
        .unwrap();
    assert_eq!(transaction.status, TransactionStatus::Declined);
    assert_eq!(transaction.response_message.as_deref(), Some("Insufficient funds"));
}
