use httpmock::Method::{GET, POST, PUT};
use httpmock::MockServer;
use reqwest::StatusCode;
use serde_json::{Value, json};
use trailpost_api_types::{CreateCommentRequest, UpdateBlogRequest};
use trailpost_client::cache::QueryKey;
use trailpost_client::{ApiClient, BlogApi};

const STAMP: &str = "2024-03-07T10:00:00Z";

fn blog_json(slug: &str, title: &str) -> Value {
    json!({
        "id": uuid::Uuid::new_v4(),
        "slug": slug,
        "title": title,
        "excerpt": "",
        "content": ["One"],
        "author": { "name": "Mira", "avatar": "", "bio": "" },
        "date": "7 Mar 2024",
        "readTime": "5 min",
        "heroImage": "",
        "category": "Asia",
        "quote": "",
        "createdAt": STAMP,
        "updatedAt": STAMP
    })
}

fn comment_json(blog_slug: &str) -> Value {
    json!({
        "id": uuid::Uuid::new_v4(),
        "blogSlug": blog_slug,
        "author": "Jo",
        "content": "Great read",
        "rating": 5,
        "date": "7 Mar 2024",
        "avatar": "https://ui-avatars.com/api/?name=Jo&background=random&color=fff&size=128",
        "createdAt": STAMP,
        "updatedAt": STAMP
    })
}

fn api_for(server: &MockServer) -> BlogApi {
    BlogApi::new(ApiClient::new(&server.base_url()).expect("client"))
}

#[tokio::test]
async fn concurrent_blog_reads_issue_one_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs/a");
            then.status(200).json_body(blog_json("a", "Alpha"));
        })
        .await;
    let api = api_for(&server);

    let (first, second) = tokio::join!(api.blog_by_slug("a"), api.blog_by_slug("a"));

    let first = first.expect("first read");
    let second = second.expect("second read");
    assert_eq!(first, second);
    assert_eq!(first.title, "Alpha");
    mock.assert_async().await;

    api.blog_by_slug("a").await.expect("cached read");
    mock.assert_async().await;
}

#[tokio::test]
async fn adding_a_comment_only_invalidates_that_blogs_comments() {
    let server = MockServer::start_async().await;
    let x_list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/comments")
                .query_param("blogSlug", "x");
            then.status(200).json_body(json!([]));
        })
        .await;
    let y_list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/comments")
                .query_param("blogSlug", "y");
            then.status(200).json_body(json!([comment_json("y")]));
        })
        .await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/comments");
            then.status(201).json_body(comment_json("x"));
        })
        .await;
    let api = api_for(&server);

    api.comments_by_blog("x").await.expect("x comments");
    let y = api.comments_by_blog("y").await.expect("y comments");
    assert_eq!(y.len(), 1);

    let created = api
        .add_comment(&CreateCommentRequest::new("x", "Jo", "Great read"))
        .await
        .expect("comment created");
    assert_eq!(created.rating, 5);

    assert!(api.is_stale(&QueryKey::CommentsByBlog("x".into())));
    assert!(api.is_fresh(&QueryKey::CommentsByBlog("y".into())));

    x_list.assert_async().await;
    y_list.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn failed_reads_are_not_cached() {
    let server = MockServer::start_async().await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs/late");
            then.status(404).json_body(json!({ "error": "Blog not found" }));
        })
        .await;
    let api = api_for(&server);

    let err = api.blog_by_slug("late").await.expect_err("not yet published");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.to_string().contains("Blog not found"));
    missing.assert_async().await;
    missing.delete_async().await;

    let found = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs/late");
            then.status(200).json_body(blog_json("late", "Late"));
        })
        .await;

    let blog = api.blog_by_slug("late").await.expect("published");
    assert_eq!(blog.slug, "late");
    found.assert_async().await;
}

#[tokio::test]
async fn updating_a_blog_invalidates_it_and_the_list() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs");
            then.status(200)
                .json_body(json!([blog_json("a", "Alpha"), blog_json("b", "Beta")]));
        })
        .await;
    let a = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs/a");
            then.status(200).json_body(blog_json("a", "Alpha"));
        })
        .await;
    let b = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs/b");
            then.status(200).json_body(blog_json("b", "Beta"));
        })
        .await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/blogs/a");
            then.status(200).json_body(blog_json("a", "Alpha, revised"));
        })
        .await;
    let api = api_for(&server);

    assert_eq!(api.blogs().await.expect("list").len(), 2);
    api.blog_by_slug("a").await.expect("a");
    api.blog_by_slug("b").await.expect("b");

    let request = UpdateBlogRequest {
        title: Some("Alpha, revised".into()),
        ..Default::default()
    };
    let updated = api.update_blog("a", &request).await.expect("update");
    assert_eq!(updated.title, "Alpha, revised");

    assert!(api.is_stale(&QueryKey::BlogBySlug("a".into())));
    assert!(api.is_stale(&QueryKey::Blogs));
    assert!(api.is_fresh(&QueryKey::BlogBySlug("b".into())));

    for mock in [&list, &a, &b, &update] {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn rejected_update_leaves_cache_fresh() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/blogs/a");
            then.status(200).json_body(blog_json("a", "Alpha"));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/blogs/a");
            then.status(400)
                .json_body(json!({ "error": "Title must not be empty" }));
        })
        .await;
    let api = api_for(&server);

    api.blog_by_slug("a").await.expect("a");
    let request = UpdateBlogRequest {
        title: Some(String::new()),
        ..Default::default()
    };
    let err = api.update_blog("a", &request).await.expect_err("rejected");

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert!(api.is_fresh(&QueryKey::BlogBySlug("a".into())));
}
