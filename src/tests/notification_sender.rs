#[cfg(test)]
mod test {
    use std::sync::Arc;

    use httpmock::prelude::*;
    use serde_json::{json, Map};

    use crate::cache::memory::MemoryTokenStore;
    use crate::config::loader::parse_config;
    use crate::config::settings::NotificationConfig;
    use crate::error::NotifyError;
    use crate::notify::build_sender;
    use crate::notify::record::{Notification, NotificationRecord};
    use crate::notify::sender::NotificationSender;
    use crate::tests::common::{
        build_reqwest_client, memory_provider, memory_sender, CLIENT_ID, CLIENT_SECRET,
        NOTIFICATION_PATH, TOKEN_PATH,
    };

    const SEND_PATH: &str = "/notification/send";

    async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({"access_token": "T", "expires_in": 3600}));
            })
            .await
    }

    #[tokio::test]
    async fn single_notification_posts_one_element_batch_with_defaults() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server).await;
        let send_mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(SEND_PATH)
                    .header("Authorization", "Bearer T")
                    .header("Content-Type", "application/json")
                    .json_body(json!([{
                        "user_id": 1,
                        "to": "a@b.com",
                        "project": "bookbrainz",
                        "sent_from": "BookBrainz <noreply@bookbrainz.org>",
                        "send_email": true,
                        "important": true,
                        "expire_age": 7
                    }]));
                then.status(200);
            })
            .await;

        let sender = memory_sender(&server);
        sender.send_notification(Notification::new(1, "a@b.com")).await;

        token_mock.assert_async().await;
        send_mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_batch_is_posted_as_empty_array() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        let send_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH).json_body(json!([]));
                then.status(200);
            })
            .await;

        let sender = memory_sender(&server);
        sender.try_send_multiple_notifications(&[]).await.unwrap();
        send_mock.assert_async().await;
    }

    #[tokio::test]
    async fn batch_is_sent_in_a_single_request() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;

        let mut params = Map::new();
        params.insert("entity".to_owned(), json!("Dune"));
        let batch: Vec<NotificationRecord> = vec![
            Notification::new(1, "a@b.com").subject("Hi").body("First").into(),
            Notification::new(2, "c@d.com")
                .template_id("edit-approved")
                .template_params(params)
                .send_email(false)
                .important(false)
                .expire_age(30)
                .into(),
        ];

        let send_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH).json_body(json!([
                    {
                        "user_id": 1,
                        "to": "a@b.com",
                        "subject": "Hi",
                        "body": "First",
                        "project": "bookbrainz",
                        "sent_from": "BookBrainz <noreply@bookbrainz.org>",
                        "send_email": true,
                        "important": true,
                        "expire_age": 7
                    },
                    {
                        "user_id": 2,
                        "to": "c@d.com",
                        "template_id": "edit-approved",
                        "template_params": {"entity": "Dune"},
                        "project": "bookbrainz",
                        "sent_from": "BookBrainz <noreply@bookbrainz.org>",
                        "send_email": false,
                        "important": false,
                        "expire_age": 30
                    }
                ]));
                then.status(200);
            })
            .await;

        let sender = memory_sender(&server);
        sender.send_multiple_notifications(&batch).await;
        send_mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_swallowed_by_send_and_reported_by_try_send() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH);
                then.status(503).body("maintenance");
            })
            .await;

        let sender = memory_sender(&server);

        // completes without surfacing anything
        sender.send_notification(Notification::new(1, "a@b.com")).await;

        match sender.try_send_notification(Notification::new(1, "a@b.com")).await {
            Err(NotifyError::Status(status)) => assert_eq!(status.as_u16(), 503),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn token_failure_skips_the_post() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(500);
            })
            .await;

        let sender = memory_sender(&server);
        sender.send_notification(Notification::new(1, "a@b.com")).await;

        // the token error comes back as is, so no send was attempted
        let result = sender.try_send_notification(Notification::new(1, "a@b.com")).await;
        assert!(matches!(result, Err(NotifyError::TokenStatus(_))));
    }

    #[tokio::test]
    async fn token_is_shared_between_sends() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server).await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH).header("Authorization", "Bearer T");
                then.status(202);
            })
            .await;

        let sender = memory_sender(&server);
        sender.try_send_notification(Notification::new(1, "a@b.com")).await.unwrap();
        sender.try_send_notification(Notification::new(2, "c@d.com")).await.unwrap();
        token_mock.assert_async().await;
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        let send_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH);
                then.status(200);
            })
            .await;

        let cfg = NotificationConfig {
            base_url: format!("{}/", server.url(NOTIFICATION_PATH)),
            ..NotificationConfig::default()
        };
        let sender: NotificationSender<MemoryTokenStore> =
            NotificationSender::new(Arc::new(memory_provider(&server)), &cfg, build_reqwest_client());

        sender.try_send_multiple_notifications(&[]).await.unwrap();
        send_mock.assert_async().await;
    }

    #[tokio::test]
    async fn sender_built_from_config_delivers() {
        let server = MockServer::start_async().await;
        let token_mock = mock_token(&server).await;
        let send_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(SEND_PATH).header("Authorization", "Bearer T");
                then.status(200);
            })
            .await;

        let yaml = format!(
            r#"
oauth:
  client_id: {}
  client_secret: {}
  token_url: {}
notification:
  base_url: {}
  timeout_ms: 2000
"#,
            CLIENT_ID,
            CLIENT_SECRET,
            server.url(TOKEN_PATH),
            server.url(NOTIFICATION_PATH),
        );
        let cfg = parse_config(&yaml).unwrap();
        let sender = build_sender(&cfg).unwrap();

        sender.try_send_notification(Notification::new(7, "e@f.com")).await.unwrap();
        token_mock.assert_async().await;
        send_mock.assert_async().await;
    }
}
