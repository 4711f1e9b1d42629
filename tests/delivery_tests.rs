use httpmock::prelude::*;
use laundry_invoice_server::delivery::{
    DeliveryChannel, DeliveryError, DeliveryMessage, PhoneNumber, TwilioConfig,
    TwilioWhatsAppChannel,
};
use serde_json::json;
use std::time::Duration;

const MESSAGES_PATH: &str = "/2010-04-01/Accounts/AC123/Messages.json";

fn channel_for(api_base: String) -> TwilioWhatsAppChannel {
    TwilioWhatsAppChannel::new(TwilioConfig {
        account_sid: "AC123".to_string(),
        auth_token: "secret".to_string(),
        from: "+14155238886".to_string(),
        api_base,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn message() -> DeliveryMessage {
    DeliveryMessage {
        body: "Laundry invoice INV-20261019-4F1C2A9E. Total: 3.60".to_string(),
        media_url: "https://laundry.example.com/invoices/invoice-20261019-abc.pdf".to_string(),
    }
}

fn recipient() -> PhoneNumber {
    PhoneNumber::normalize("12345678", "965").unwrap()
}

#[tokio::test]
async fn sends_the_expected_form_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MESSAGES_PATH)
                .header("authorization", "Basic QUMxMjM6c2VjcmV0")
                .x_www_form_urlencoded_tuple("From", "whatsapp:+14155238886")
                .x_www_form_urlencoded_tuple("To", "whatsapp:+96512345678")
                .x_www_form_urlencoded_tuple(
                    "Body",
                    "Laundry invoice INV-20261019-4F1C2A9E. Total: 3.60",
                )
                .x_www_form_urlencoded_tuple(
                    "MediaUrl",
                    "https://laundry.example.com/invoices/invoice-20261019-abc.pdf",
                );
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "sid": "SM0123456789", "status": "queued" }));
        })
        .await;

    let receipt = channel_for(server.base_url())
        .send(&recipient(), &message())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.message_id, "SM0123456789");
}

#[tokio::test]
async fn sender_keeps_an_existing_whatsapp_prefix() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(MESSAGES_PATH)
                .x_www_form_urlencoded_tuple("From", "whatsapp:+14155238886");
            then.status(201).json_body(json!({ "sid": "SM1" }));
        })
        .await;

    let channel = TwilioWhatsAppChannel::new(TwilioConfig {
        account_sid: "AC123".to_string(),
        auth_token: "secret".to_string(),
        from: "whatsapp:+14155238886".to_string(),
        api_base: format!("{}/", server.base_url()),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    channel.send(&recipient(), &message()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn provider_errors_carry_status_and_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MESSAGES_PATH);
            then.status(400).json_body(json!({
                "code": 21211,
                "message": "Invalid 'To' Phone Number",
                "status": 400
            }));
        })
        .await;

    let err = channel_for(server.base_url())
        .send(&recipient(), &message())
        .await
        .unwrap_err();

    match err {
        DeliveryError::Rejected { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid 'To' Phone Number (code 21211)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_bodies_are_passed_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(MESSAGES_PATH);
            then.status(503).body("upstream unavailable");
        })
        .await;

    let err = channel_for(server.base_url())
        .send(&recipient(), &message())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DeliveryError::Rejected { status: 503, ref message } if message == "upstream unavailable"
    ));
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_error() {
    let err = channel_for("http://127.0.0.1:1".to_string())
        .send(&recipient(), &message())
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::Transport(_)));
}
