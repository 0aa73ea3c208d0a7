use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde_json::json;

use server::entity::user;

use crate::common::{TestApp, routes};

mod signup {
    use super::*;

    #[tokio::test]
    async fn valid_signup_returns_a_working_token() {
        let app = TestApp::spawn().await;

        let token = app.create_authenticated_user("alice", "securepass").await;

        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.status, 200, "me failed: {}", me.text);
        assert_eq!(me.body["data"]["username"], "alice");
        assert_eq!(me.body["data"]["isAdmin"], false);
        assert_eq!(me.body["data"]["channels"], json!([]));
    }

    #[tokio::test]
    async fn password_is_never_stored_in_plaintext() {
        let app = TestApp::spawn().await;

        app.create_authenticated_user("alice", "securepass").await;

        let stored = user::Entity::find()
            .filter(user::Column::Username.eq("alice"))
            .one(&app.db)
            .await
            .expect("DB query failed")
            .expect("User not found after signup");

        assert_ne!(stored.password, "securepass");
        assert!(stored.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_without_token(
                routes::SIGNUP,
                &json!({
                    "firstname": "Other",
                    "lastname": "Alice",
                    "username": "alice",
                    "email": "other-alice@example.com",
                    "password": "securepass",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["success"], false);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::SIGNUP,
                &json!({
                    "firstname": "A",
                    "lastname": "B",
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": "short",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn login_works_with_email_and_with_username() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;

        let by_email = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "alice@example.com", "password": "securepass"}),
            )
            .await;
        assert_eq!(by_email.status, 200, "email login failed: {}", by_email.text);

        let by_username = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "alice", "password": "securepass"}),
            )
            .await;
        assert_eq!(by_username.status, 200);
        assert!(by_username.body["data"].is_string());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_identifier_are_indistinguishable() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;

        let wrong_password = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "alice", "password": "not-the-password"}),
            )
            .await;
        let unknown_user = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "nobody", "password": "securepass"}),
            )
            .await;

        assert_eq!(wrong_password.status, 400);
        assert_eq!(unknown_user.status, 400);
        assert_eq!(wrong_password.body, unknown_user.body);
    }
}

mod tokens {
    use super::*;

    #[tokio::test]
    async fn me_without_a_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["success"], false);
    }

    #[tokio::test]
    async fn me_with_a_garbage_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.token").await;

        assert_eq!(res.status, 401);
    }
}
