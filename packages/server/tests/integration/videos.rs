use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

use server::entity::{video, video_like};

use crate::common::{TestApp, routes};

mod upload {
    use super::*;

    #[tokio::test]
    async fn url_upload_without_any_thumbnail_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .upload_video(
                &token,
                &[
                    ("title", "No thumbnail"),
                    ("category", "movies"),
                    ("url", "https://example.com/video.mp4"),
                ],
                &[],
            )
            .await;

        assert_eq!(res.status, 400);

        let count = video::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(count, 0, "No row should be created on rejection");
    }

    #[tokio::test]
    async fn file_upload_without_thumbnail_gets_the_placeholder() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .upload_video(
                &token,
                &[("title", "Raw clip"), ("category", "movies")],
                &[("videoFile", "clip.mp4", "video/mp4", vec![7u8; 256])],
            )
            .await;

        assert_eq!(res.status, 200, "upload failed: {}", res.text);
        assert_eq!(res.body["data"]["uploadType"], "file");
        assert!(res.body["data"]["url"].is_null());
        assert!(
            res.body["data"]["thumbnail"]
                .as_str()
                .unwrap()
                .contains("placeholder")
        );
        assert_eq!(res.body["data"]["fileSize"], 256);
        assert!(res.body["data"]["videoFileUrl"].is_string());
    }

    #[tokio::test]
    async fn upload_without_a_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .upload_video(
                &token,
                &[
                    ("category", "movies"),
                    ("url", "https://example.com/video.mp4"),
                    ("thumbnail", "https://example.com/t.jpg"),
                ],
                &[],
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn upload_with_an_unknown_category_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .upload_video(
                &token,
                &[
                    ("title", "Bad category"),
                    ("category", "no-such-slug"),
                    ("url", "https://example.com/video.mp4"),
                    ("thumbnail", "https://example.com/t.jpg"),
                ],
                &[],
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn upload_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::VIDEOS, &json!({"title": "nope"}))
            .await;

        assert_eq!(res.status, 401);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn listing_filters_by_category_and_paginates() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        for i in 0..3 {
            app.create_url_video(&token, &format!("music {i}"), "music")
                .await;
        }
        app.create_url_video(&token, "a movie", "movies").await;

        let all = app.get_without_token(routes::VIDEOS).await;
        assert_eq!(all.status, 200);
        assert_eq!(all.body["data"].as_array().unwrap().len(), 4);

        let music = app
            .get_without_token(&format!("{}?category=music", routes::VIDEOS))
            .await;
        assert_eq!(music.body["data"].as_array().unwrap().len(), 3);

        let page = app
            .get_without_token(&format!("{}?category=music&page=2&limit=2", routes::VIDEOS))
            .await;
        assert_eq!(page.body["data"].as_array().unwrap().len(), 1);

        let everything = app
            .get_without_token(&format!("{}?category=all", routes::VIDEOS))
            .await;
        assert_eq!(everything.body["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn extreme_page_numbers_return_an_empty_page() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_url_video(&token, "Lone video", "movies").await;

        let res = app
            .get_without_token(&format!(
                "{}?page={}&limit=50",
                routes::VIDEOS,
                u64::MAX
            ))
            .await;

        assert_eq!(res.status, 200, "listing failed: {}", res.text);
        assert_eq!(res.body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn listing_cards_carry_uploader_and_view_count() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_url_video(&token, "First", "movies").await;

        let res = app.get_without_token(routes::VIDEOS).await;
        let card = &res.body["data"][0];

        assert_eq!(card["User"]["username"], "alice");
        assert_eq!(card["views"], 0);
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn search_without_a_term_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::VIDEO_SEARCH).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Please enter the searchterm");
    }

    #[tokio::test]
    async fn search_matches_title_case_insensitively() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_url_video(&token, "Epic Space Documentary", "movies")
            .await;
        app.create_url_video(&token, "Cooking 101", "movies").await;

        let res = app
            .get_without_token(&format!("{}?searchterm=SPACE", routes::VIDEO_SEARCH))
            .await;

        assert_eq!(res.status, 200);
        let items = res.body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Epic Space Documentary");
    }

    #[tokio::test]
    async fn like_wildcards_in_the_term_are_literal() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        app.create_url_video(&token, "100% legit", "movies").await;
        app.create_url_video(&token, "100 percent", "movies").await;

        let res = app
            .get_without_token(&format!("{}?searchterm=100%25", routes::VIDEO_SEARCH))
            .await;

        let items = res.body["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "100% legit");
    }
}

mod detail {
    use super::*;

    #[tokio::test]
    async fn detail_shows_counts_and_anonymous_flags() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Watch me", "movies").await;

        let res = app.get_without_token(&routes::video(&id)).await;

        assert_eq!(res.status, 200, "detail failed: {}", res.text);
        assert_eq!(res.body["data"]["title"], "Watch me");
        assert_eq!(res.body["data"]["views"], 0);
        assert_eq!(res.body["data"]["likesCount"], 0);
        assert_eq!(res.body["data"]["isLiked"], false);
        assert_eq!(res.body["data"]["isVideoMine"], false);
        assert!(res.body["data"]["videoFile"].is_null(), "blob never leaves the db");
    }

    #[tokio::test]
    async fn detail_flags_are_viewer_relative() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&alice, "Mine", "movies").await;

        let res = app.get_with_token(&routes::video(&id), &alice).await;

        assert_eq!(res.body["data"]["isVideoMine"], true);
        assert_eq!(res.body["data"]["isSubscribed"], false);
    }

    #[tokio::test]
    async fn unknown_video_is_a_404() {
        let app = TestApp::spawn().await;

        let res = app
            .get_without_token(&routes::video("00000000-0000-0000-0000-000000000000"))
            .await;
        assert_eq!(res.status, 404);

        let res = app.get_without_token(&routes::video("not-a-uuid")).await;
        assert_eq!(res.status, 404);
    }
}

mod reactions {
    use super::*;

    async fn reaction_rows(app: &TestApp) -> u64 {
        video_like::Entity::find().count(&app.db).await.unwrap()
    }

    #[tokio::test]
    async fn like_toggles_on_and_off() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Likeable", "movies").await;

        let res = app.get_with_token(&routes::video_like(&id), &token).await;
        assert_eq!(res.status, 200, "like failed: {}", res.text);

        let detail = app.get_with_token(&routes::video(&id), &token).await;
        assert_eq!(detail.body["data"]["likesCount"], 1);
        assert_eq!(detail.body["data"]["isLiked"], true);
        assert_eq!(reaction_rows(&app).await, 1);

        app.get_with_token(&routes::video_like(&id), &token).await;
        let detail = app.get_with_token(&routes::video(&id), &token).await;
        assert_eq!(detail.body["data"]["likesCount"], 0);
        assert_eq!(detail.body["data"]["isLiked"], false);
        assert_eq!(reaction_rows(&app).await, 0, "toggle-off deletes the row");
    }

    #[tokio::test]
    async fn dislike_flips_an_existing_like_in_place() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Contested", "movies").await;

        app.get_with_token(&routes::video_like(&id), &token).await;
        app.get_with_token(&routes::video_dislike(&id), &token).await;

        let detail = app.get_with_token(&routes::video(&id), &token).await;
        assert_eq!(detail.body["data"]["likesCount"], 0);
        assert_eq!(detail.body["data"]["dislikesCount"], 1);
        assert_eq!(detail.body["data"]["isDisliked"], true);
        assert_eq!(reaction_rows(&app).await, 1, "flip reuses the single row");
    }

    #[tokio::test]
    async fn any_like_dislike_sequence_keeps_at_most_one_row() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Sequencer", "movies").await;

        for path in [
            routes::video_like(&id),
            routes::video_dislike(&id),
            routes::video_like(&id),
            routes::video_like(&id),
            routes::video_dislike(&id),
        ] {
            let res = app.get_with_token(&path, &token).await;
            assert_eq!(res.status, 200, "reaction failed: {}", res.text);
            assert!(reaction_rows(&app).await <= 1);
        }
    }

    #[tokio::test]
    async fn reactions_require_authentication() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Guarded", "movies").await;

        let res = app.get_without_token(&routes::video_like(&id)).await;
        assert_eq!(res.status, 401);
    }
}

mod comments {
    use super::*;

    #[tokio::test]
    async fn comments_append_and_list_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Discussed", "movies").await;

        let first = app
            .post_with_token(&routes::video_comment(&id), &json!({"text": "first"}), &token)
            .await;
        assert_eq!(first.status, 200, "comment failed: {}", first.text);
        assert_eq!(first.body["data"]["User"]["username"], "alice");

        app.post_with_token(&routes::video_comment(&id), &json!({"text": "second"}), &token)
            .await;

        let detail = app.get_without_token(&routes::video(&id)).await;
        let comments = detail.body["data"]["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0]["text"], "second");
        assert_eq!(comments[1]["text"], "first");
        assert_eq!(detail.body["data"]["commentsCount"], 2);
    }

    #[tokio::test]
    async fn empty_comment_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Silent", "movies").await;

        let res = app
            .post_with_token(&routes::video_comment(&id), &json!({"text": "   "}), &token)
            .await;

        assert_eq!(res.status, 400);
    }
}

mod views {
    use super::*;

    #[tokio::test]
    async fn anonymous_view_is_a_no_op_success() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let id = app.create_url_video(&token, "Public", "movies").await;

        let res = app.get_without_token(&routes::video_view(&id)).await;
        assert_eq!(res.status, 200);

        let detail = app.get_without_token(&routes::video(&id)).await;
        assert_eq!(detail.body["data"]["views"], 0);
    }

    #[tokio::test]
    async fn second_view_from_the_same_user_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let id = app.create_url_video(&alice, "Popular", "movies").await;

        let first = app.get_with_token(&routes::video_view(&id), &bob).await;
        assert_eq!(first.status, 200, "first view failed: {}", first.text);

        let second = app.get_with_token(&routes::video_view(&id), &bob).await;
        assert_eq!(second.status, 400);
        assert!(second.body["message"].as_str().unwrap().contains("already viewed"));

        let detail = app.get_without_token(&routes::video(&id)).await;
        assert_eq!(detail.body["data"]["views"], 1);
    }
}
