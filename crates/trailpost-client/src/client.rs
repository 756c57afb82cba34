use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use trailpost_api_types::{
    Blog, Comment, CreateCommentRequest, ErrorBody, TourGuide, UpdateBlogRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("site URL `{0}` cannot carry API paths")]
    InvalidBase(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server responded {status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("cached value for `{query}` has an unexpected shape")]
    CacheMismatch { query: &'static str },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Thin typed wrapper over the public `/api` routes.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(site: &str) -> Result<Self, ClientError> {
        let base = Url::parse(site)?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBase(site.to_string()));
        }
        let http = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { http, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("trailpost-cli/", env!("CARGO_PKG_VERSION"))
    }

    /// `{base}/api/{segments...}` with every segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBase(self.base.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    pub async fn list_blogs(&self) -> Result<Vec<Blog>, ClientError> {
        self.send(self.request(Method::GET, &["blogs"])?).await
    }

    pub async fn get_blog(&self, slug: &str) -> Result<Blog, ClientError> {
        self.send(self.request(Method::GET, &["blogs", slug])?).await
    }

    pub async fn update_blog(
        &self,
        slug: &str,
        request: &UpdateBlogRequest,
    ) -> Result<Blog, ClientError> {
        self.send_json(Method::PUT, &["blogs", slug], request).await
    }

    pub async fn list_tour_guides(&self) -> Result<Vec<TourGuide>, ClientError> {
        self.send(self.request(Method::GET, &["tour-guides"])?).await
    }

    pub async fn list_comments(&self, blog_slug: &str) -> Result<Vec<Comment>, ClientError> {
        let mut url = self.endpoint(&["comments"])?;
        url.query_pairs_mut().append_pair("blogSlug", blog_slug);
        self.send(self.http.get(url)).await
    }

    pub async fn create_comment(
        &self,
        request: &CreateCommentRequest,
    ) -> Result<Comment, ClientError> {
        self.send_json(Method::POST, &["comments"], request).await
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ClientError> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(method, segments)?.json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        Self::handle(response).await
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .map(|body| body.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ClientError::Server { status, message });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_encode_slugs_and_keep_base_path() {
        let client = ApiClient::new("https://blog.example.com/travel/").expect("client");
        let url = client.endpoint(&["blogs", "a b/c"]).expect("url");
        assert_eq!(
            url.as_str(),
            "https://blog.example.com/travel/api/blogs/a%20b%2Fc"
        );
    }

    #[test]
    fn bare_host_gets_api_prefix() {
        let client = ApiClient::new("http://localhost:3000").expect("client");
        let url = client.endpoint(&["tour-guides"]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:3000/api/tour-guides");
    }

    #[test]
    fn base_query_is_dropped() {
        let client = ApiClient::new("http://localhost:3000/?preview=1").expect("client");
        let url = client.endpoint(&["blogs"]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:3000/api/blogs");
    }

    #[test]
    fn non_hierarchical_urls_are_rejected() {
        let err = ApiClient::new("mailto:editor@example.com").expect_err("no base");
        assert!(matches!(err, ClientError::InvalidBase(_)));
    }
}
