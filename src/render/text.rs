use super::MISSING;
use crate::controller::{DetailPane, ListPane, Screen};
use crate::filter::{FilterState, TimeBucket};
use crate::model::MealDetail;
use std::fmt::Write;

/// Plain-text rendering for terminals
pub fn render_text(screen: &Screen) -> String {
    let mut out = String::new();
    out.push_str(&filter_line(&screen.filters));
    out.push('\n');

    match &screen.list {
        ListPane::Message(message) => {
            out.push_str(message);
            out.push('\n');
        }
        ListPane::Cards(meals) => {
            for (i, meal) in meals.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. [{}] {}", i + 1, meal.id, meal.name);
            }
        }
    }

    match &screen.detail {
        DetailPane::Closed => {}
        DetailPane::Loading => out.push_str("\nLoading details...\n"),
        DetailPane::Error(message) => {
            let _ = writeln!(out, "\n{}", message);
            out.push_str("(close)\n");
        }
        DetailPane::Shown(detail) => {
            out.push('\n');
            out.push_str(&detail_text(detail));
        }
    }

    out
}

fn filter_line(filters: &FilterState) -> String {
    let time = match filters.time_bucket {
        TimeBucket::Any => "any time".to_string(),
        bucket => format!("<= {} min", bucket),
    };
    let moods = if filters.moods.is_empty() {
        "any mood".to_string()
    } else {
        filters
            .moods
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!("Filters: {} | {}", time, moods)
}

fn detail_text(detail: &MealDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", detail.name);
    let _ = writeln!(
        out,
        "Category: {}",
        detail.category.as_deref().unwrap_or(MISSING)
    );
    let _ = writeln!(out, "Area: {}", detail.area.as_deref().unwrap_or(MISSING));

    out.push_str("\nIngredients\n");
    for ingredient in &detail.ingredients {
        let _ = writeln!(out, "  - {}", ingredient);
    }

    out.push_str("\nInstructions\n");
    out.push_str(detail.instructions.trim_end());
    out.push('\n');

    if let Some(video) = &detail.video_url {
        let _ = writeln!(out, "\nWatch on YouTube: {}", video);
    }
    out.push_str("(close)\n");
    out
}
