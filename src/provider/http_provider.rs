use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::Result;
use crate::config::ApiConfig;
use crate::domain::{Comment, Post, PostId, User, UserId};
use crate::provider::{fail_soft, DataProvider};

/// JSONPlaceholder-compatible REST client.
pub struct HttpProvider {
    client: Client,
    base_url: Url,
}

impl HttpProvider {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn users_url(&self) -> Result<Url> {
        Ok(self.base_url.join("users")?)
    }

    fn user_url(&self, user_id: UserId) -> Result<Url> {
        Ok(self.base_url.join(&format!("users/{}", user_id))?)
    }

    fn user_posts_url(&self, user_id: UserId) -> Result<Url> {
        let mut url = self.base_url.join("posts")?;
        url.query_pairs_mut()
            .append_pair("userId", &user_id.to_string());
        Ok(url)
    }

    fn post_comments_url(&self, post_id: PostId) -> Result<Url> {
        Ok(self.base_url.join(&format!("posts/{}/comments", post_id))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Result<Url>) -> Result<T> {
        let url = url?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Parse a base URL, making sure relative joins land beneath its path.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{}/", trimmed))?)
    }
}

#[async_trait]
impl DataProvider for HttpProvider {
    async fn list_users(&self) -> Vec<User> {
        fail_soft("list_users", self.get_json(self.users_url()).await).unwrap_or_default()
    }

    async fn list_user_posts(&self, user_id: UserId) -> Vec<Post> {
        if user_id == 0 {
            return Vec::new();
        }
        fail_soft(
            "list_user_posts",
            self.get_json(self.user_posts_url(user_id)).await,
        )
        .unwrap_or_default()
    }

    async fn get_user(&self, user_id: UserId) -> Option<User> {
        if user_id == 0 {
            return None;
        }
        fail_soft("get_user", self.get_json(self.user_url(user_id)).await)
    }

    async fn list_post_comments(&self, post_id: PostId) -> Vec<Comment> {
        if post_id == 0 {
            return Vec::new();
        }
        fail_soft(
            "list_post_comments",
            self.get_json(self.post_comments_url(post_id)).await,
        )
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base: &str) -> HttpProvider {
        let config = ApiConfig {
            base_url: base.to_string(),
            ..ApiConfig::default()
        };
        HttpProvider::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("http://localhost:3000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn test_zero_timeout_builds_client() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(config.timeout().is_none());
        assert!(HttpProvider::new(&config).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_endpoint_urls() {
        let p = provider("https://jsonplaceholder.typicode.com");
        assert_eq!(
            p.users_url().unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users"
        );
        assert_eq!(
            p.user_url(4).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users/4"
        );
        assert_eq!(
            p.user_posts_url(2).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/posts?userId=2"
        );
        assert_eq!(
            p.post_comments_url(11).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/posts/11/comments"
        );
    }

    #[test]
    fn test_endpoint_urls_keep_base_path() {
        let p = provider("http://localhost:8080/v1/");
        assert_eq!(
            p.user_posts_url(1).unwrap().as_str(),
            "http://localhost:8080/v1/posts?userId=1"
        );
    }

    #[tokio::test]
    async fn test_zero_ids_skip_requests() {
        let p = provider("http://127.0.0.1:9");
        assert!(p.list_user_posts(0).await.is_empty());
        assert!(p.get_user(0).await.is_none());
        assert!(p.list_post_comments(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_degrades_to_empty() {
        let p = provider("http://127.0.0.1:9");
        assert!(p.list_users().await.is_empty());
        assert!(p.get_user(1).await.is_none());
    }
}
