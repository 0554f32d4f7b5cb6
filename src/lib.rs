pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod render;
pub mod runtime;

pub use api::{MealDbClient, MealDbClientBuilder, MealSource};
pub use cache::ResultCache;
pub use config::AppConfig;
pub use controller::{Command, Controller, Msg, Phase, Screen, UiEvent};
pub use error::MealError;
pub use filter::{FilterState, Mood, TimeBucket};
pub use model::{MealDetail, MealSummary};
pub use runtime::App;

/// Search TheMealDB for meals using an ingredient, with client settings from the environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let meals = mealfinder::search_meals("chicken").await?;
/// for meal in meals {
///     println!("{} {}", meal.id, meal.name);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_meals(ingredient: &str) -> Result<Vec<MealSummary>, MealError> {
    MealDbClient::from_env()?
        .search_by_ingredient(ingredient)
        .await
}

/// Fetch one meal's full record, `None` if the id is unknown
pub async fn lookup_meal(id: &str) -> Result<Option<MealDetail>, MealError> {
    MealDbClient::from_env()?.lookup_by_id(id).await
}
