use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Number of indexed ingredient/measure slots on a lookup record
pub const INGREDIENT_SLOTS: usize = 20;

/// A dish as it appears in a search result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealSummary {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
}

impl MealSummary {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail_url: thumbnail_url.into(),
        }
    }
}

/// Full record for one dish
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealDetail {
    pub id: String,
    pub name: String,
    pub thumbnail_url: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: String,
    pub video_url: Option<String>,
    /// Formatted as "<measure> <ingredient>", measure omitted when blank
    pub ingredients: Vec<String>,
}

/// `{ "meals": [...] | null }` wrapper shared by both endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct MealsEnvelope<T> {
    pub meals: Option<Vec<T>>,
}

impl<T> MealsEnvelope<T> {
    /// The API answers "no matches" with null rather than an empty array
    pub fn into_meals(self) -> Vec<T> {
        self.meals.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSummary {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
}

impl From<RawSummary> for MealSummary {
    fn from(raw: RawSummary) -> Self {
        MealSummary {
            id: raw.id_meal,
            name: raw.str_meal,
            thumbnail_url: raw.str_meal_thumb.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawDetail {
    pub id_meal: String,
    pub str_meal: String,
    #[serde(default)]
    pub str_meal_thumb: Option<String>,
    #[serde(default)]
    pub str_category: Option<String>,
    #[serde(default)]
    pub str_area: Option<String>,
    #[serde(default)]
    pub str_instructions: Option<String>,
    #[serde(default)]
    pub str_youtube: Option<String>,
    /// strIngredientN / strMeasureN slots and every other field we don't name
    #[serde(flatten)]
    pub slots: HashMap<String, Value>,
}

impl From<RawDetail> for MealDetail {
    fn from(raw: RawDetail) -> Self {
        let ingredients = extract_ingredients(&raw.slots);
        MealDetail {
            id: raw.id_meal,
            name: raw.str_meal,
            thumbnail_url: raw.str_meal_thumb.unwrap_or_default(),
            category: non_blank(raw.str_category),
            area: non_blank(raw.str_area),
            instructions: raw.str_instructions.unwrap_or_default(),
            video_url: non_blank(raw.str_youtube),
            ingredients,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn slot<'a>(slots: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    slots.get(key).and_then(Value::as_str).map(str::trim)
}

/// Collect the non-empty ingredient slots in index order
pub(crate) fn extract_ingredients(slots: &HashMap<String, Value>) -> Vec<String> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|i| {
            let ingredient =
                slot(slots, &format!("strIngredient{}", i)).filter(|s| !s.is_empty())?;
            match slot(slots, &format!("strMeasure{}", i)) {
                Some(measure) if !measure.is_empty() => Some(format!("{} {}", measure, ingredient)),
                _ => Some(ingredient.to_string()),
            }
        })
        .collect()
}
