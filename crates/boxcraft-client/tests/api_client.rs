mod common;

use boxcraft_client::error::GENERIC_ERROR;
use boxcraft_client::session::{ACCESS_TOKEN_KEY, SESSION_KEYS, USER_KEY};
use boxcraft_client::{ClientError, KeyValueStore};
use boxcraft_types::{ContactMessage, Credentials};
use common::{Backend, Harness, PASSWORD};

#[tokio::test]
async fn requests_carry_stored_bearer_token() {
    let backend = Backend::default();
    backend.seed_products(2);
    let harness = Harness::start(backend).await;

    harness.api.list_products().await.unwrap();
    harness
        .sessions
        .login(&Credentials {
            email: "admin@example.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    let products = harness.api.list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].price, Some(2.5));
    assert_eq!(
        harness.backend.with(|s| s.authorization.clone()),
        vec![None, Some("Bearer token-admin@example.com".to_string())]
    );
}

#[tokio::test]
async fn unauthorized_response_ends_session_and_goes_to_login() {
    let backend = Backend::default();
    backend.seed_products(1);
    let harness = Harness::start(backend).await;

    // A stale session restored from storage.
    harness
        .storage
        .set(USER_KEY, r#"{"id":5,"name":"Old","email":"old@example.com","role":"admin"}"#)
        .unwrap();
    harness.storage.set(ACCESS_TOKEN_KEY, "expired").unwrap();
    harness.api.session().restore();
    assert!(harness.api.session().is_authenticated());

    let error = harness.api.list_products().await.unwrap_err();

    assert!(matches!(error, ClientError::Unauthorized(ref m) if m == "Token expired"));
    assert_eq!(error.status(), Some(401));
    assert!(!harness.api.session().is_authenticated());
    for key in SESSION_KEYS {
        assert_eq!(harness.storage.get(key), None);
    }
    assert_eq!(harness.navigator.visited(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn any_endpoint_triggers_the_401_handler() {
    let backend = Backend::default();
    backend.seed_users();
    let harness = Harness::start(backend).await;
    harness.storage.set(ACCESS_TOKEN_KEY, "expired").unwrap();

    let error = harness.api.list_users().await.unwrap_err();

    // No body on this 401, so the generic text is used.
    assert!(matches!(error, ClientError::Unauthorized(ref m) if m == GENERIC_ERROR));
    assert_eq!(harness.storage.get(ACCESS_TOKEN_KEY), None);
    assert_eq!(harness.navigator.last().as_deref(), Some("/login"));
}

#[tokio::test]
async fn failures_without_body_use_generic_message() {
    let backend = Backend::default();
    backend.with(|s| s.bulletins_down = true);
    let harness = Harness::start(backend).await;

    let error = harness.api.list_bulletins().await.unwrap_err();

    assert_eq!(error.status(), Some(503));
    assert_eq!(error.to_string(), GENERIC_ERROR);
    assert!(harness.navigator.visited().is_empty());
}

#[tokio::test]
async fn categories_accept_strings_and_objects() {
    let harness = Harness::start(Backend::default()).await;

    let categories = harness.api.product_categories().await.unwrap();

    assert_eq!(categories, vec!["Corrugated".to_string(), "Rigid".to_string()]);
}

#[tokio::test]
async fn contact_form_reports_backend_error_field() {
    let harness = Harness::start(Backend::default()).await;

    let mut message = ContactMessage {
        name: "Rina".into(),
        email: "rina@example.com".into(),
        message: "Need 5,000 mailer boxes".into(),
        ..ContactMessage::default()
    };
    harness.api.send_contact(&message).await.unwrap();

    message.email = "rina".into();
    let error = harness.api.send_contact(&message).await.unwrap_err();
    assert_eq!(error.to_string(), "The email must be a valid email address.");

    message.message = "   ".into();
    assert!(matches!(
        harness.api.send_contact(&message).await,
        Err(ClientError::Invalid(_))
    ));
}
