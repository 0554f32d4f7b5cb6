use crate::model::MealSummary;

/// Holds the unfiltered results of the most recent completed search.
///
/// Filters are always re-derived from this list; it is only replaced when a
/// search resolves successfully.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    meals: Vec<MealSummary>,
    term: Option<String>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached list wholesale
    pub fn replace(&mut self, term: impl Into<String>, meals: Vec<MealSummary>) {
        self.term = Some(term.into());
        self.meals = meals;
    }

    pub fn meals(&self) -> &[MealSummary] {
        &self.meals
    }

    /// Ingredient the cached list was fetched for, `None` before the first search
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_overwrites() {
        let mut cache = ResultCache::new();
        assert!(cache.term().is_none());

        cache.replace("chicken", vec![MealSummary::new("1", "Chicken Soup", "x")]);
        cache.replace("beef", vec![MealSummary::new("2", "Beef Stew", "y")]);

        assert_eq!(cache.term(), Some("beef"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.meals()[0].name, "Beef Stew");
    }
}
