//! Unit tests for Blog crate

#[cfg(test)]
pub(crate) mod fakes {
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    use crate::domain::entities::{Blog, NewBlog};
    use crate::domain::repository::BlogRepository;
    use crate::domain::value_objects::{BlogId, UserId};
    use crate::error::{BlogError, BlogResult};

    /// Vec-backed blog table with soft delete
    #[derive(Clone, Default)]
    pub(crate) struct MemoryBlogRepository {
        blogs: Arc<Mutex<Vec<Blog>>>,
    }

    impl MemoryBlogRepository {
        /// Raw row, soft-deleted ones included
        pub(crate) fn stored(&self, blog_id: BlogId) -> Option<Blog> {
            self.blogs
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.blog_id == blog_id)
                .cloned()
        }
    }

    impl BlogRepository for MemoryBlogRepository {
        async fn create(&self, blog: &NewBlog) -> BlogResult<Blog> {
            let mut blogs = self.blogs.lock().unwrap();
            let now = Utc::now();
            let created = Blog {
                blog_id: BlogId::new(blogs.len() as i64 + 1),
                author_id: blog.author_id,
                title: blog.title.clone(),
                content: blog.content.clone(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            };
            blogs.push(created.clone());
            Ok(created)
        }

        async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Blog> {
            self.blogs
                .lock()
                .unwrap()
                .iter()
                .find(|b| b.deleted_at.is_none() && b.blog_id == *blog_id)
                .cloned()
                .ok_or(BlogError::BlogNotFound)
        }

        async fn find_by_author(&self, author_id: &UserId) -> BlogResult<Vec<Blog>> {
            let mut found: Vec<Blog> = self
                .blogs
                .lock()
                .unwrap()
                .iter()
                .filter(|b| b.deleted_at.is_none() && b.author_id == *author_id)
                .cloned()
                .collect();
            // Insertion order stands in for created_at
            found.sort_by(|a, b| b.blog_id.cmp(&a.blog_id));
            Ok(found)
        }

        async fn update(&self, blog: &Blog) -> BlogResult<Blog> {
            let mut blogs = self.blogs.lock().unwrap();
            let stored = blogs
                .iter_mut()
                .find(|b| b.deleted_at.is_none() && b.blog_id == blog.blog_id)
                .ok_or(BlogError::BlogNotFound)?;
            stored.title = blog.title.clone();
            stored.content = blog.content.clone();
            stored.updated_at = Utc::now();
            Ok(stored.clone())
        }

        async fn delete(&self, blog_id: &BlogId) -> BlogResult<()> {
            let mut blogs = self.blogs.lock().unwrap();
            let stored = blogs
                .iter_mut()
                .find(|b| b.deleted_at.is_none() && b.blog_id == *blog_id)
                .ok_or(BlogError::BlogNotFound)?;
            stored.deleted_at = Some(Utc::now());
            Ok(())
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use super::fakes::MemoryBlogRepository;
    use crate::application::BlogUseCase;
    use crate::domain::value_objects::{BlogId, UserId};
    use crate::error::BlogError;

    const ALICE: UserId = UserId::new(1);
    const BOB: UserId = UserId::new(2);

    fn use_case() -> (MemoryBlogRepository, BlogUseCase<MemoryBlogRepository>) {
        let repo = MemoryBlogRepository::default();
        (repo.clone(), BlogUseCase::new(Arc::new(repo)))
    }

    #[tokio::test]
    async fn test_create_then_fetch_round_trip() {
        let (_, blogs) = use_case();
        let created = blogs
            .create_blog(ALICE, "T".to_string(), "C".to_string())
            .await
            .unwrap();

        let fetched = blogs.get_by_id(&ALICE, &created.blog_id).await.unwrap();
        assert_eq!(fetched.title.as_str(), "T");
        assert_eq!(fetched.content.as_str(), "C");
        assert_eq!(fetched.author_id, ALICE);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let (repo, blogs) = use_case();

        let result = blogs
            .create_blog(ALICE, "x".repeat(51), "C".to_string())
            .await;
        assert!(matches!(result, Err(BlogError::Validation(_))));

        let result = blogs.create_blog(ALICE, "T".to_string(), String::new()).await;
        assert!(matches!(result, Err(BlogError::Validation(_))));

        assert!(repo.stored(BlogId::new(1)).is_none());
    }

    #[tokio::test]
    async fn test_non_author_is_denied_and_nothing_changes() {
        let (repo, blogs) = use_case();
        let post = blogs
            .create_blog(ALICE, "mine".to_string(), "hands off".to_string())
            .await
            .unwrap();

        assert!(matches!(
            blogs.get_by_id(&BOB, &post.blog_id).await,
            Err(BlogError::BlogUnauthorized)
        ));
        assert!(matches!(
            blogs
                .update(&BOB, &post.blog_id, "hijacked".to_string(), "x".to_string())
                .await,
            Err(BlogError::BlogUnauthorized)
        ));
        assert!(matches!(
            blogs.delete(&BOB, &post.blog_id).await,
            Err(BlogError::BlogUnauthorized)
        ));

        let stored = repo.stored(post.blog_id).unwrap();
        assert_eq!(stored.title.as_str(), "mine");
        assert_eq!(stored.content.as_str(), "hands off");
        assert!(stored.deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_not_found() {
        let (_, blogs) = use_case();
        assert!(matches!(
            blogs.delete(&ALICE, &BlogId::new(99)).await,
            Err(BlogError::BlogNotFound)
        ));

        let post = blogs
            .create_blog(ALICE, "T".to_string(), "C".to_string())
            .await
            .unwrap();
        blogs.delete(&ALICE, &post.blog_id).await.unwrap();

        assert!(matches!(
            blogs.delete(&ALICE, &post.blog_id).await,
            Err(BlogError::BlogNotFound)
        ));
        assert!(matches!(
            blogs.get_by_id(&ALICE, &post.blog_id).await,
            Err(BlogError::BlogNotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_validates_before_loading() {
        let (repo, blogs) = use_case();
        let post = blogs
            .create_blog(ALICE, "T".to_string(), "C".to_string())
            .await
            .unwrap();

        let result = blogs
            .update(&ALICE, &post.blog_id, "  ".to_string(), "C2".to_string())
            .await;
        assert!(matches!(result, Err(BlogError::Validation(_))));
        assert_eq!(repo.stored(post.blog_id).unwrap().content.as_str(), "C");

        // Bad input on a missing post is still a validation error
        let result = blogs
            .update(&ALICE, &BlogId::new(42), String::new(), "C".to_string())
            .await;
        assert!(matches!(result, Err(BlogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_concurrent_updates_keep_one_complete_write() {
        let (repo, blogs) = use_case();
        let post = blogs
            .create_blog(ALICE, "T".to_string(), "C".to_string())
            .await
            .unwrap();

        let (first, second) = tokio::join!(
            blogs.update(&ALICE, &post.blog_id, "A".to_string(), "content A".to_string()),
            blogs.update(&ALICE, &post.blog_id, "B".to_string(), "content B".to_string()),
        );
        assert!(first.is_ok());
        assert!(second.is_ok());

        let stored = repo.stored(post.blog_id).unwrap();
        match stored.title.as_str() {
            "A" => assert_eq!(stored.content.as_str(), "content A"),
            "B" => assert_eq!(stored.content.as_str(), "content B"),
            other => panic!("unexpected title {other}"),
        }
    }

    #[tokio::test]
    async fn test_list_only_returns_owner_posts_newest_first() {
        let (_, blogs) = use_case();
        for title in ["one", "two", "three"] {
            blogs
                .create_blog(ALICE, title.to_string(), "C".to_string())
                .await
                .unwrap();
        }
        blogs
            .create_blog(BOB, "bob".to_string(), "C".to_string())
            .await
            .unwrap();
        blogs.delete(&ALICE, &BlogId::new(2)).await.unwrap();

        let listed = blogs.list_by_owner(&ALICE).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["three", "one"]);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::BlogError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::id::BlogId;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(BlogError, StatusCode, &str)> = vec![
            (
                BlogError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_BLOG_ENTITY",
            ),
            (
                BlogError::InvalidId("x".into()),
                StatusCode::BAD_REQUEST,
                "INVALID_BLOG_ID",
            ),
            (
                BlogError::BlogUnauthorized,
                StatusCode::FORBIDDEN,
                "BLOG_ACCESS_DENIED",
            ),
            (
                BlogError::BlogNotFound,
                StatusCode::NOT_FOUND,
                "BLOG_NOT_FOUND",
            ),
            (
                BlogError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::SERVICE_UNAVAILABLE,
                "DATABASE_ERROR",
            ),
        ];

        for (error, expected_status, expected_code) in test_cases {
            assert_eq!(error.code(), expected_code);
            assert_eq!(error.into_response().status(), expected_status);
        }
    }

    #[test]
    fn test_path_id_parse_failure_maps_to_invalid_id() {
        let err: BlogError = "abc".parse::<BlogId>().unwrap_err().into();
        assert!(matches!(err, BlogError::InvalidId(_)));

        let err: BlogError = "0".parse::<BlogId>().unwrap_err().into();
        assert_eq!(err.code(), "INVALID_BLOG_ID");
    }
}

#[cfg(test)]
mod router_tests {
    use auth::application::SessionService;
    use auth::{AuthConfig, InMemorySessionStore, SessionGate};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use kernel::id::UserId;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    use super::fakes::MemoryBlogRepository;
    use crate::presentation::{BlogAppState, blog_router};

    struct TestApp {
        router: Router,
        sessions: SessionService<InMemorySessionStore>,
        cookie_name: String,
    }

    impl TestApp {
        fn new() -> Self {
            let store = Arc::new(InMemorySessionStore::new());
            let config = AuthConfig::development();
            let cookie_name = config.session_cookie_name.clone();
            let gate = SessionGate::new(store.clone(), Arc::new(config));
            let router = blog_router(BlogAppState::new(MemoryBlogRepository::default()), gate);
            Self {
                router,
                sessions: SessionService::new(store),
                cookie_name,
            }
        }

        async fn login(&self, user_id: i64) -> String {
            let token = self.sessions.create(UserId::new(user_id)).await.unwrap();
            format!("{}={}", self.cookie_name, token.as_str())
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            cookie: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(cookie) = cookie {
                builder = builder.header(header::COOKIE, cookie);
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }
    }

    #[tokio::test]
    async fn test_every_route_requires_session() {
        let app = TestApp::new();
        for (method, uri) in [
            ("GET", "/"),
            ("POST", "/blog/post"),
            ("GET", "/blog/overview/post/1"),
            ("POST", "/blog/edit"),
            ("GET", "/blog/delete/1"),
        ] {
            let (status, body) = app.send(method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["code"], "SESSION_INVALID");
        }
    }

    #[tokio::test]
    async fn test_post_fetch_and_list() {
        let app = TestApp::new();
        let cookie = app.login(1).await;

        let (status, body) = app
            .send(
                "POST",
                "/blog/post",
                Some(&cookie),
                Some(json!({ "title": "T", "content": "C" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "BLOG_CREATED");
        let id = body["blog"]["id"].as_i64().unwrap();
        assert_eq!(body["blog"]["authorId"], 1);

        let (status, body) = app
            .send("GET", &format!("/blog/overview/post/{id}"), Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "BLOG_FETCHED");
        assert_eq!(body["blog"]["title"], "T");
        assert_eq!(body["blog"]["content"], "C");

        let (status, body) = app.send("GET", "/", Some(&cookie), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["count"], 1);
        assert_eq!(body["blogs"][0]["id"], id);
    }

    #[tokio::test]
    async fn test_other_user_gets_403() {
        let app = TestApp::new();
        let alice = app.login(1).await;
        let bob = app.login(2).await;

        app.send(
            "POST",
            "/blog/post",
            Some(&alice),
            Some(json!({ "title": "T", "content": "C" })),
        )
        .await;

        let (status, body) = app
            .send("GET", "/blog/overview/post/1", Some(&bob), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "BLOG_ACCESS_DENIED");

        let (status, _) = app
            .send(
                "POST",
                "/blog/edit",
                Some(&bob),
                Some(json!({ "id": 1, "title": "X", "content": "X" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.send("GET", "/blog/delete/1", Some(&bob), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, body) = app
            .send("GET", "/blog/overview/post/1", Some(&alice), None)
            .await;
        assert_eq!(body["blog"]["title"], "T");

        let (_, body) = app.send("GET", "/", Some(&bob), None).await;
        assert_eq!(body["meta"]["count"], 0);
    }

    #[tokio::test]
    async fn test_edit_and_delete() {
        let app = TestApp::new();
        let cookie = app.login(1).await;
        app.send(
            "POST",
            "/blog/post",
            Some(&cookie),
            Some(json!({ "title": "T", "content": "C" })),
        )
        .await;

        let (status, body) = app
            .send(
                "POST",
                "/blog/edit",
                Some(&cookie),
                Some(json!({ "id": 1, "title": "T2", "content": "C2" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "BLOG_UPDATED");
        assert_eq!(body["blog"]["title"], "T2");

        let (status, body) = app
            .send("GET", "/blog/delete/1", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], "BLOG_DELETED");

        let (status, body) = app
            .send("GET", "/blog/overview/post/1", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "BLOG_NOT_FOUND");

        let (status, _) = app
            .send("GET", "/blog/delete/1", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_input_is_400() {
        let app = TestApp::new();
        let cookie = app.login(1).await;

        let (status, body) = app
            .send("GET", "/blog/overview/post/abc", Some(&cookie), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BLOG_ID");

        let (status, body) = app
            .send(
                "POST",
                "/blog/edit",
                Some(&cookie),
                Some(json!({ "id": -3, "title": "T", "content": "C" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BLOG_ID");

        let (status, body) = app
            .send(
                "POST",
                "/blog/post",
                Some(&cookie),
                Some(json!({ "title": "x".repeat(51), "content": "C" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BLOG_ENTITY");

        let (status, body) = app
            .send(
                "POST",
                "/blog/post",
                Some(&cookie),
                Some(json!({ "title": "T" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_REQUEST_BODY");
    }
}
