use serde_json::json;

use crate::common::{TestApp, routes};

/// The caller's own user id, via `/auth/me`.
async fn user_id(app: &TestApp, token: &str) -> String {
    let me = app.get_with_token(routes::ME, token).await;
    assert_eq!(me.status, 200, "me failed: {}", me.text);
    me.body["data"]["id"].as_str().unwrap().to_string()
}

mod subscriptions {
    use super::*;

    #[tokio::test]
    async fn toggling_twice_subscribes_and_unsubscribes() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let alice_id = user_id(&app, &alice).await;

        let res = app
            .get_with_token(&routes::toggle_subscribe(&alice_id), &bob)
            .await;
        assert_eq!(res.status, 200, "subscribe failed: {}", res.text);

        let profile = app.get_with_token(&routes::user(&alice_id), &bob).await;
        assert_eq!(profile.body["data"]["subscribersCount"], 1);
        assert_eq!(profile.body["data"]["isSubscribed"], true);

        app.get_with_token(&routes::toggle_subscribe(&alice_id), &bob)
            .await;
        let profile = app.get_with_token(&routes::user(&alice_id), &bob).await;
        assert_eq!(profile.body["data"]["subscribersCount"], 0);
        assert_eq!(profile.body["data"]["isSubscribed"], false);
    }

    #[tokio::test]
    async fn subscribing_to_your_own_channel_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let alice_id = user_id(&app, &alice).await;

        let res = app
            .get_with_token(&routes::toggle_subscribe(&alice_id), &alice)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["message"],
            "You cannot to subscribe to your own channel"
        );
    }

    #[tokio::test]
    async fn subscribing_to_an_unknown_channel_is_a_404() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .get_with_token(
                &routes::toggle_subscribe("00000000-0000-0000-0000-000000000000"),
                &alice,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod feed {
    use super::*;

    #[tokio::test]
    async fn feed_carries_subscribed_uploads_and_fresh_view_counts() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let alice_id = user_id(&app, &alice).await;

        let video_id = app.create_url_video(&alice, "Concert night", "music").await;
        app.get_with_token(&routes::toggle_subscribe(&alice_id), &bob)
            .await;

        let feed = app.get_with_token(routes::USERS_FEED, &bob).await;
        assert_eq!(feed.status, 200, "feed failed: {}", feed.text);
        let items = feed.body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], video_id);
        assert_eq!(items[0]["views"], 0);
        assert_eq!(items[0]["User"]["username"], "alice");

        let first = app.get_with_token(&routes::video_view(&video_id), &bob).await;
        assert_eq!(first.status, 200, "view failed: {}", first.text);
        let second = app.get_with_token(&routes::video_view(&video_id), &bob).await;
        assert_eq!(second.status, 400);

        let feed = app.get_with_token(routes::USERS_FEED, &bob).await;
        assert_eq!(feed.body["data"][0]["views"], 1);
    }

    #[tokio::test]
    async fn feed_is_empty_without_subscriptions() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        app.create_url_video(&alice, "Unsubscribed upload", "movies")
            .await;

        let feed = app.get_with_token(routes::USERS_FEED, &bob).await;

        assert_eq!(feed.status, 200);
        assert_eq!(feed.body["data"], json!([]));
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn matches_are_case_insensitive_substrings() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("stargazer", "securepass").await;
        app.create_authenticated_user("star_lord", "securepass").await;
        app.create_authenticated_user("moonwalker", "securepass").await;

        let res = app
            .get_with_token(&format!("{}?searchterm=STAR", routes::USERS_SEARCH), &token)
            .await;

        assert_eq!(res.status, 200, "search failed: {}", res.text);
        let items = res.body["data"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        let me = items
            .iter()
            .find(|i| i["username"] == "stargazer")
            .expect("caller should match too");
        assert_eq!(me["isMe"], true);
        let other = items.iter().find(|i| i["username"] == "star_lord").unwrap();
        assert_eq!(other["isMe"], false);
    }

    #[tokio::test]
    async fn missing_term_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app.get_with_token(routes::USERS_SEARCH, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Please enter your search term");
    }
}

mod edit {
    use super::*;

    #[tokio::test]
    async fn partial_edits_touch_only_the_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .put_with_token(
                routes::USERS,
                &json!({
                    "firstname": "Alicia",
                    "avatar": "https://example.com/alice.png",
                    "channelDescription": "Weekly uploads",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "edit failed: {}", res.text);
        assert_eq!(res.body["data"]["firstname"], "Alicia");
        assert_eq!(res.body["data"]["lastname"], "User");
        assert_eq!(res.body["data"]["username"], "alice");
        assert_eq!(res.body["data"]["avatar"], "https://example.com/alice.png");
        assert_eq!(res.body["data"]["channelDescription"], "Weekly uploads");
    }

    #[tokio::test]
    async fn explicit_null_clears_the_avatar() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.put_with_token(
            routes::USERS,
            &json!({"avatar": "https://example.com/alice.png"}),
            &token,
        )
        .await;

        // Absent key keeps the value, explicit null clears it.
        let kept = app
            .put_with_token(routes::USERS, &json!({"firstname": "Alicia"}), &token)
            .await;
        assert_eq!(kept.body["data"]["avatar"], "https://example.com/alice.png");

        let cleared = app
            .put_with_token(routes::USERS, &json!({"avatar": null}), &token)
            .await;
        assert_eq!(cleared.status, 200);
        assert_eq!(cleared.body["data"]["avatar"], json!(null));
    }

    #[tokio::test]
    async fn taken_username_is_rejected() {
        let app = TestApp::spawn().await;
        app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;

        let res = app
            .put_with_token(routes::USERS, &json!({"username": "alice"}), &bob)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Username or email is already taken");
    }
}

mod library {
    use super::*;

    #[tokio::test]
    async fn liked_videos_track_the_current_reaction() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let video_id = app.create_url_video(&alice, "Likeable", "movies").await;

        app.get_with_token(&routes::video_like(&video_id), &bob).await;
        let liked = app.get_with_token(routes::USERS_LIKED, &bob).await;
        assert_eq!(liked.status, 200, "likedVideos failed: {}", liked.text);
        assert_eq!(liked.body["data"].as_array().unwrap().len(), 1);
        assert_eq!(liked.body["data"][0]["id"], video_id);

        // Toggling the like off removes it from the library.
        app.get_with_token(&routes::video_like(&video_id), &bob).await;
        let liked = app.get_with_token(routes::USERS_LIKED, &bob).await;
        assert_eq!(liked.body["data"], json!([]));
    }

    #[tokio::test]
    async fn history_lists_viewed_videos_in_view_order() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let first = app.create_url_video(&alice, "First watch", "movies").await;
        let second = app.create_url_video(&alice, "Second watch", "movies").await;

        app.get_with_token(&routes::video_view(&second), &bob).await;
        app.get_with_token(&routes::video_view(&first), &bob).await;

        let history = app.get_with_token(routes::USERS_HISTORY, &bob).await;
        assert_eq!(history.status, 200, "history failed: {}", history.text);
        let ids: Vec<&str> = history.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, [second.as_str(), first.as_str()]);
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn profile_gathers_channels_uploads_and_audience() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let alice_id = user_id(&app, &alice).await;
        let bob_id = user_id(&app, &bob).await;

        app.create_url_video(&alice, "Channel upload", "movies").await;
        // Alice subscribes to bob; bob subscribes to alice.
        app.get_with_token(&routes::toggle_subscribe(&bob_id), &alice)
            .await;
        app.get_with_token(&routes::toggle_subscribe(&alice_id), &bob)
            .await;

        let seen_by_bob = app.get_with_token(&routes::user(&alice_id), &bob).await;
        assert_eq!(seen_by_bob.status, 200, "profile failed: {}", seen_by_bob.text);
        let data = &seen_by_bob.body["data"];
        assert_eq!(data["username"], "alice");
        assert_eq!(data["subscribersCount"], 1);
        assert_eq!(data["isMe"], false);
        assert_eq!(data["isSubscribed"], true);
        assert_eq!(data["channels"][0]["username"], "bob");
        assert_eq!(data["videos"][0]["title"], "Channel upload");
        assert_eq!(data["videos"][0]["views"], 0);

        let seen_by_alice = app.get_with_token(&routes::user(&alice_id), &alice).await;
        assert_eq!(seen_by_alice.body["data"]["isMe"], true);
        assert_eq!(seen_by_alice.body["data"]["isSubscribed"], false);
    }

    #[tokio::test]
    async fn unknown_profile_is_a_404() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .get_with_token(&routes::user("00000000-0000-0000-0000-000000000000"), &token)
            .await;
        assert_eq!(res.status, 404);

        let res = app.get_with_token(&routes::user("not-a-uuid"), &token).await;
        assert_eq!(res.status, 404);
    }
}

mod admin_toggle {
    use super::*;

    #[tokio::test]
    async fn owner_can_grant_and_revoke_admin() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let alice_id = user_id(&app, &alice).await;

        let granted = app
            .post_with_token(&routes::toggle_admin(&alice_id), &json!({}), &owner)
            .await;
        assert_eq!(granted.status, 200, "toggle failed: {}", granted.text);
        assert_eq!(granted.body["data"]["isAdmin"], true);

        let me = app.get_with_token(routes::ME, &alice).await;
        assert_eq!(me.body["data"]["isAdmin"], true);

        let revoked = app
            .post_with_token(&routes::toggle_admin(&alice_id), &json!({}), &owner)
            .await;
        assert_eq!(revoked.body["data"]["isAdmin"], false);
    }

    #[tokio::test]
    async fn only_the_owner_can_toggle() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let bob_id = user_id(&app, &bob).await;

        let res = app
            .post_with_token(&routes::toggle_admin(&bob_id), &json!({}), &alice)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn the_owners_own_flag_is_untouchable() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;
        let owner_id = user_id(&app, &owner).await;

        let res = app
            .post_with_token(&routes::toggle_admin(&owner_id), &json!({}), &owner)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["message"],
            "The owner's admin status cannot be changed"
        );
    }
}
