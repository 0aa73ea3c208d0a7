use serde_json::json;

use crate::common::{TestApp, routes};

mod listing {
    use super::*;

    #[tokio::test]
    async fn defaults_are_seeded_in_rail_order() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::CATEGORIES).await;

        assert_eq!(res.status, 200);
        let slugs: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, ["movies", "music", "dramas", "cartoons"]);
        assert!(res.body["data"][0]["isDefault"].as_bool().unwrap());
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_and_the_slug_is_lowercased() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let res = app
            .post_with_token(
                routes::CATEGORIES,
                &json!({"name": "Documentaries", "slug": "DOCUMENTARIES"}),
                &owner,
            )
            .await;

        assert_eq!(res.status, 201, "create failed: {}", res.text);
        assert_eq!(res.body["data"]["slug"], "documentaries");
        // Four defaults occupy orders 1-4.
        assert_eq!(res.body["data"]["order"], 5);
        assert_eq!(res.body["data"]["isDefault"], false);
    }

    #[tokio::test]
    async fn non_admins_cannot_create() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice", "securepass").await;

        let res = app
            .post_with_token(
                routes::CATEGORIES,
                &json!({"name": "Sneaky", "slug": "sneaky"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let res = app
            .post_with_token(
                routes::CATEGORIES,
                &json!({"name": "Movies Two", "slug": "movies"}),
                &owner,
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["message"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let res = app
            .post_with_token(routes::CATEGORIES, &json!({"name": "No slug"}), &owner)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Name and slug are required");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn rename_keeps_videos_attached_by_slug() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;
        app.create_url_video(&owner, "A drama", "dramas").await;

        let list = app.get_without_token(routes::CATEGORIES).await;
        let dramas_id = list.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["slug"] == "dramas")
            .unwrap()["id"]
            .as_i64()
            .unwrap();

        let res = app
            .put_with_token(
                &routes::category(dramas_id),
                &json!({"name": "Drama & Theatre"}),
                &owner,
            )
            .await;
        assert_eq!(res.status, 200, "rename failed: {}", res.text);
        assert_eq!(res.body["data"]["name"], "Drama & Theatre");
        assert_eq!(res.body["data"]["slug"], "dramas");

        let filtered = app
            .get_without_token(&format!("{}?category=dramas", routes::VIDEOS))
            .await;
        assert_eq!(filtered.body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_category_is_a_404() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let res = app
            .put_with_token(&routes::category(99999), &json!({"name": "Ghost"}), &owner)
            .await;

        assert_eq!(res.status, 404);
    }
}

mod delete {
    use super::*;

    async fn create_category(app: &TestApp, owner: &str, name: &str, slug: &str) -> i64 {
        let res = app
            .post_with_token(
                routes::CATEGORIES,
                &json!({"name": name, "slug": slug}),
                owner,
            )
            .await;
        assert_eq!(res.status, 201, "create failed: {}", res.text);
        res.body["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn default_categories_cannot_be_deleted() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let list = app.get_without_token(routes::CATEGORIES).await;
        let movies_id = list.body["data"][0]["id"].as_i64().unwrap();

        let res = app.delete_with_token(&routes::category(movies_id), &owner).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Cannot delete default category");
    }

    #[tokio::test]
    async fn empty_non_default_category_deletes() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;
        let id = create_category(&app, &owner, "Temporary", "temporary").await;

        let res = app.delete_with_token(&routes::category(id), &owner).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Category deleted successfully");

        let list = app.get_without_token(routes::CATEGORIES).await;
        assert_eq!(list.body["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn referenced_category_delete_fails_with_the_count() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;
        let id = create_category(&app, &owner, "Gaming", "gaming").await;
        app.create_url_video(&owner, "Speedrun", "gaming").await;

        let res = app.delete_with_token(&routes::category(id), &owner).await;

        assert_eq!(res.status, 400);
        assert!(
            res.body["message"].as_str().unwrap().contains("1 video(s)"),
            "message should name the count: {}",
            res.text
        );
    }
}

mod reorder {
    use super::*;

    #[tokio::test]
    async fn reorder_applies_the_given_positions() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let list = app.get_without_token(routes::CATEGORIES).await;
        let ids: Vec<i64> = list.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();

        // Reverse the rail.
        let payload: Vec<_> = ids
            .iter()
            .rev()
            .enumerate()
            .map(|(i, id)| json!({"id": id, "order": i as i64 + 1}))
            .collect();

        let res = app
            .post_with_token(
                routes::CATEGORIES_REORDER,
                &json!({"categories": payload}),
                &owner,
            )
            .await;

        assert_eq!(res.status, 200, "reorder failed: {}", res.text);
        let slugs: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["slug"].as_str().unwrap())
            .collect();
        assert_eq!(slugs, ["cartoons", "dramas", "music", "movies"]);
    }

    #[tokio::test]
    async fn empty_reorder_list_is_rejected() {
        let app = TestApp::spawn().await;
        let owner = app.owner_token().await;

        let res = app
            .post_with_token(routes::CATEGORIES_REORDER, &json!({"categories": []}), &owner)
            .await;

        assert_eq!(res.status, 400);
    }
}
