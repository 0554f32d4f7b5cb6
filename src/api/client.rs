use crate::api::MealSource;
use crate::config::{self, ApiConfig};
use crate::error::MealError;
use crate::model::{MealDetail, MealSummary, MealsEnvelope, RawDetail, RawSummary};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for TheMealDB's JSON API
#[derive(Debug, Clone)]
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Creates a new builder with default settings
    ///
    /// # Example
    /// ```
    /// use mealfinder::MealDbClient;
    ///
    /// let builder = MealDbClient::builder();
    /// ```
    pub fn builder() -> MealDbClientBuilder {
        MealDbClientBuilder::default()
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, MealError> {
        Self::builder()
            .base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
    }

    /// Create a client from `config.toml` and `MEALFINDER__` environment variables
    pub fn from_env() -> Result<Self, MealError> {
        let config = config::load_config()?;
        Self::from_config(&config.api)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        key: &str,
    ) -> Result<Vec<T>, MealError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}?i={}", url, key);

        let body = self
            .client
            .get(&url)
            .query(&[("i", key)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let envelope: MealsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.into_meals())
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    fn source_name(&self) -> &str {
        "themealdb"
    }

    async fn search_by_ingredient(&self, term: &str) -> Result<Vec<MealSummary>, MealError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(MealError::Validation(
                "Ingredient cannot be empty".to_string(),
            ));
        }

        let meals: Vec<RawSummary> = self.get_meals("filter.php", term).await?;
        debug!("Search for '{}' returned {} meals", term, meals.len());
        Ok(meals.into_iter().map(MealSummary::from).collect())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealDetail>, MealError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(MealError::Validation("Meal id cannot be empty".to_string()));
        }

        let meals: Vec<RawDetail> = self.get_meals("lookup.php", id).await?;
        debug!("Lookup for '{}' returned {} records", id, meals.len());
        Ok(meals.into_iter().next().map(MealDetail::from))
    }
}

/// Builder for configuring a [`MealDbClient`]
#[derive(Debug, Default)]
pub struct MealDbClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl MealDbClientBuilder {
    /// Point the client at a different API root (a mirror, a test server)
    ///
    /// # Example
    /// ```
    /// use mealfinder::MealDbClient;
    ///
    /// let client = MealDbClient::builder()
    ///     .base_url("http://localhost:8080/api/json/v1/1/")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(client.base_url(), "http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    /// Returns [`MealError::Validation`] for a blank base URL and
    /// [`MealError::Fetch`] if the TLS backend cannot be initialised.
    pub fn build(self) -> Result<MealDbClient, MealError> {
        let base_url = self.base_url.unwrap_or_else(config::default_base_url);
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(MealError::Validation("Base URL cannot be empty".to_string()));
        }

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(config::default_timeout()));
        let user_agent = self.user_agent.unwrap_or_else(config::default_user_agent);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(MealDbClient { client, base_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> MealDbClient {
        MealDbClient::builder().base_url(server.url()).build().unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let client = MealDbClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "https://www.themealdb.com/api/json/v1/1");
        assert_eq!(client.source_name(), "themealdb");
    }

    #[test]
    fn test_builder_rejects_blank_base_url() {
        let result = MealDbClient::builder().base_url("  ").build();
        assert!(matches!(result, Err(MealError::Validation(_))));
    }

    #[tokio::test]
    async fn test_search_trims_term() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/filter.php")
            .match_query(Matcher::UrlEncoded("i".into(), "chicken".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"meals":[{"idMeal":"1","strMeal":"Chicken Soup","strMealThumb":"x"}]}"#,
            )
            .create_async()
            .await;

        let meals = client_for(&server)
            .search_by_ingredient("  chicken ")
            .await
            .unwrap();
        assert_eq!(meals, vec![MealSummary::new("1", "Chicken Soup", "x")]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = client_for(&server).search_by_ingredient("   ").await;
        assert!(matches!(result, Err(MealError::Validation(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_empty_array_is_not_found() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/lookup.php")
            .match_query(Matcher::UrlEncoded("i".into(), "1".into()))
            .with_status(200)
            .with_body(r#"{"meals":[]}"#)
            .create_async()
            .await;

        let detail = client_for(&server).lookup_by_id("1").await.unwrap();
        assert!(detail.is_none());
    }
}
