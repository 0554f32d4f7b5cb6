mod client;

pub use client::{MealDbClient, MealDbClientBuilder};

use crate::error::MealError;
use crate::model::{MealDetail, MealSummary};
use async_trait::async_trait;

/// Read-only access to a recipe catalogue
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Short name used in log lines
    fn source_name(&self) -> &str;

    /// Meals that use the given ingredient, in upstream order.
    ///
    /// Fails with [`MealError::Validation`] without touching the network when
    /// `term` is blank.
    async fn search_by_ingredient(&self, term: &str) -> Result<Vec<MealSummary>, MealError>;

    /// Full record for one meal, or `None` when the id is unknown
    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealDetail>, MealError>;
}
