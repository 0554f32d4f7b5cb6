//! Keyword filters over a cached result list.
//!
//! Cooking time and mood are guessed from the dish title alone. The keyword
//! tables below are the whole classifier: a title "is quick" when it contains
//! one of [`QUICK_KEYWORDS`] as a case-insensitive substring, and so on.

use crate::error::MealError;
use crate::model::MealSummary;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const QUICK_KEYWORDS: &[&str] = &[
    "salad", "wrap", "sandwich", "stir", "taco", "omelet", "quick", "soup",
];

pub const SLOW_KEYWORDS: &[&str] = &["stew", "casserole", "braise", "roast", "bake", "slow"];

/// Upper bound (minutes) of the quick-only bucket
const QUICK_LIMIT: u32 = 15;
/// Upper bound (minutes) of the not-obviously-slow bucket
const MEDIUM_LIMIT: u32 = 30;

/// Approximate cooking-time selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBucket {
    #[default]
    Any,
    /// At most this many minutes; values above 30 do not filter
    Minutes(u32),
}

impl FromStr for TimeBucket {
    type Err = MealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(TimeBucket::Any);
        }
        s.parse::<u32>()
            .map(TimeBucket::Minutes)
            .map_err(|_| MealError::Validation(format!("Unknown time bucket: {}", s)))
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBucket::Any => write!(f, "any"),
            TimeBucket::Minutes(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mood {
    Comfort,
    Light,
    Spicy,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Comfort, Mood::Light, Mood::Spicy];

    /// Parse a mood key; unknown keys are not an error, they just match nothing
    pub fn from_key(key: &str) -> Option<Mood> {
        match key.trim().to_ascii_lowercase().as_str() {
            "comfort" => Some(Mood::Comfort),
            "light" => Some(Mood::Light),
            "spicy" => Some(Mood::Spicy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Comfort => "comfort",
            Mood::Light => "light",
            Mood::Spicy => "spicy",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Mood::Comfort => &["casserole", "stew", "pie", "pot roast", "curry"],
            Mood::Light => &[
                "salad", "grill", "grilled", "light", "sashimi", "ceviche", "steamed",
            ],
            Mood::Spicy => &["chili", "spicy", "hot", "pepper", "szechuan", "cajun"],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current time-bucket and mood selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub time_bucket: TimeBucket,
    pub moods: BTreeSet<Mood>,
}

impl FilterState {
    /// Set or clear one mood; returns whether the set changed
    pub fn set_mood(&mut self, mood: Mood, checked: bool) -> bool {
        if checked {
            self.moods.insert(mood)
        } else {
            self.moods.remove(&mood)
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.time_bucket == TimeBucket::Any && self.moods.is_empty()
    }
}

fn contains_any(title: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| title.contains(k))
}

fn matches_time(title: &str, bucket: TimeBucket) -> bool {
    match bucket {
        TimeBucket::Any => true,
        TimeBucket::Minutes(max) if max <= QUICK_LIMIT => contains_any(title, QUICK_KEYWORDS),
        TimeBucket::Minutes(max) if max <= MEDIUM_LIMIT => {
            contains_any(title, QUICK_KEYWORDS) || !contains_any(title, SLOW_KEYWORDS)
        }
        TimeBucket::Minutes(_) => true,
    }
}

fn matches_mood(title: &str, moods: &BTreeSet<Mood>) -> bool {
    moods.is_empty() || moods.iter().any(|m| contains_any(title, m.keywords()))
}

/// Whether one title passes both rules of `state`
pub fn matches(title: &str, state: &FilterState) -> bool {
    let title = title.to_lowercase();
    matches_time(&title, state.time_bucket) && matches_mood(&title, &state.moods)
}

/// Filter `meals` by `state`, keeping the input order
pub fn apply(meals: &[MealSummary], state: &FilterState) -> Vec<MealSummary> {
    if state.is_unfiltered() {
        return meals.to_vec();
    }
    meals
        .iter()
        .filter(|m| matches(&m.name, state))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meals(names: &[&str]) -> Vec<MealSummary> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| MealSummary::new(i.to_string(), *n, format!("thumb-{}", i)))
            .collect()
    }

    fn names(meals: &[MealSummary]) -> Vec<&str> {
        meals.iter().map(|m| m.name.as_str()).collect()
    }

    fn with_time(bucket: TimeBucket) -> FilterState {
        FilterState {
            time_bucket: bucket,
            ..Default::default()
        }
    }

    fn with_moods(moods: &[Mood]) -> FilterState {
        FilterState {
            moods: moods.iter().copied().collect(),
            ..Default::default()
        }
    }

    const SAMPLE: &[&str] = &[
        "Chicken Soup",
        "Beef Stew",
        "Spicy Tofu",
        "Plain Rice",
        "Baked Salmon",
        "Chicken Caesar Salad",
        "Slow Cooker Chili",
        "Grilled Pork",
        "Steak Pie",
    ];

    #[test]
    fn test_unfiltered_is_identity() {
        let cache = meals(SAMPLE);
        assert_eq!(apply(&cache, &FilterState::default()), cache);
    }

    #[test]
    fn test_quick_bucket_keeps_quick_titles_only() {
        let cache = meals(&["Chicken Soup", "Beef Stew"]);
        let filtered = apply(&cache, &with_time(TimeBucket::Minutes(15)));
        assert_eq!(names(&filtered), vec!["Chicken Soup"]);
    }

    #[test]
    fn test_thirty_minute_bucket_drops_only_slow_titles() {
        let cache = meals(SAMPLE);
        let filtered = apply(&cache, &with_time(TimeBucket::Minutes(30)));
        assert_eq!(
            names(&filtered),
            vec![
                "Chicken Soup",
                "Spicy Tofu",
                "Plain Rice",
                "Chicken Caesar Salad",
                "Grilled Pork",
                "Steak Pie",
            ]
        );
    }

    #[test]
    fn test_quick_and_slow_title_survives_thirty_minutes() {
        let cache = meals(&["Quick Roast Wrap"]);
        assert_eq!(apply(&cache, &with_time(TimeBucket::Minutes(30))).len(), 1);
        assert_eq!(apply(&cache, &with_time(TimeBucket::Minutes(15))).len(), 1);
    }

    #[test]
    fn test_long_bucket_does_not_filter() {
        let cache = meals(SAMPLE);
        assert_eq!(apply(&cache, &with_time(TimeBucket::Minutes(60))), cache);
        assert_eq!(apply(&cache, &with_time(TimeBucket::Minutes(31))), cache);
    }

    #[test]
    fn test_small_buckets_behave_like_fifteen() {
        let cache = meals(SAMPLE);
        assert_eq!(
            apply(&cache, &with_time(TimeBucket::Minutes(5))),
            apply(&cache, &with_time(TimeBucket::Minutes(15)))
        );
    }

    #[test]
    fn test_spicy_mood() {
        let cache = meals(&["Spicy Tofu", "Plain Rice"]);
        let filtered = apply(&cache, &with_moods(&[Mood::Spicy]));
        assert_eq!(names(&filtered), vec!["Spicy Tofu"]);
    }

    #[test]
    fn test_moods_are_a_union() {
        let cache = meals(SAMPLE);
        let filtered = apply(&cache, &with_moods(&[Mood::Comfort, Mood::Light]));
        assert_eq!(
            names(&filtered),
            vec!["Beef Stew", "Chicken Caesar Salad", "Grilled Pork", "Steak Pie"]
        );
    }

    #[test]
    fn test_time_and_mood_compose() {
        let cache = meals(SAMPLE);
        let state = FilterState {
            time_bucket: TimeBucket::Minutes(30),
            moods: [Mood::Spicy].into_iter().collect(),
        };
        // "Slow Cooker Chili" is spicy but slow
        assert_eq!(names(&apply(&cache, &state)), vec!["Spicy Tofu"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert!(matches("CHICKEN SOUP", &with_time(TimeBucket::Minutes(15))));
        assert!(matches("szechuan beans", &with_moods(&[Mood::Spicy])));
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let cache = meals(SAMPLE);
        let states = [
            with_time(TimeBucket::Minutes(15)),
            with_time(TimeBucket::Minutes(30)),
            with_moods(&[Mood::Spicy]),
            with_moods(&[Mood::Comfort, Mood::Light, Mood::Spicy]),
            FilterState {
                time_bucket: TimeBucket::Minutes(15),
                moods: [Mood::Light].into_iter().collect(),
            },
        ];

        for state in &states {
            let filtered = apply(&cache, state);
            let mut source = cache.iter();
            for meal in &filtered {
                assert!(source.any(|c| c == meal), "{:?} broke ordering", state);
            }
        }
    }

    #[test]
    fn test_reapplying_is_stable() {
        let cache = meals(SAMPLE);
        for bucket in [TimeBucket::Any, TimeBucket::Minutes(15), TimeBucket::Minutes(30)] {
            for moods in [&[][..], &[Mood::Spicy][..], &[Mood::Comfort, Mood::Light][..]] {
                let state = FilterState {
                    time_bucket: bucket,
                    moods: moods.iter().copied().collect(),
                };
                let once = apply(&cache, &state);
                assert_eq!(apply(&once, &state), once);
            }
        }
    }

    #[test]
    fn test_parse_time_bucket() {
        assert_eq!("any".parse::<TimeBucket>().unwrap(), TimeBucket::Any);
        assert_eq!(" 15 ".parse::<TimeBucket>().unwrap(), TimeBucket::Minutes(15));
        assert_eq!("60".parse::<TimeBucket>().unwrap(), TimeBucket::Minutes(60));
        assert!("soon".parse::<TimeBucket>().is_err());
    }

    #[test]
    fn test_unknown_mood_key() {
        assert_eq!(Mood::from_key("Spicy"), Some(Mood::Spicy));
        assert_eq!(Mood::from_key("sweet"), None);
    }

    #[test]
    fn test_set_mood_reports_change() {
        let mut state = FilterState::default();
        assert!(state.set_mood(Mood::Light, true));
        assert!(!state.set_mood(Mood::Light, true));
        assert!(state.set_mood(Mood::Light, false));
        assert!(state.is_unfiltered());
    }
}
