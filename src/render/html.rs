use super::MISSING;
use crate::controller::{DetailPane, ListPane};
use crate::model::{MealDetail, MealSummary};
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Result list as card markup, or an empty-state block for messages
pub fn render_list_html(list: &ListPane) -> String {
    match list {
        ListPane::Message(message) => empty_block(message),
        ListPane::Cards(meals) => meals.iter().map(card).collect(),
    }
}

/// Detail panel markup; empty when the panel is closed
pub fn render_detail_html(detail: &DetailPane) -> String {
    match detail {
        DetailPane::Closed => String::new(),
        DetailPane::Loading => panel(&empty_block("Loading details…")),
        DetailPane::Error(message) => {
            panel(&format!("{}{}", close_button(), empty_block(message)))
        }
        DetailPane::Shown(meal) => panel(&detail_body(meal)),
    }
}

fn empty_block(message: &str) -> String {
    format!(r#"<div class="empty">{}</div>"#, encode_text(message))
}

fn panel(inner: &str) -> String {
    format!(r#"<section id="detail">{}</section>"#, inner)
}

fn close_button() -> &'static str {
    r#"<div class="close" role="button" tabindex="0">Close ✕</div>"#
}

fn card(meal: &MealSummary) -> String {
    let name_attr = encode_double_quoted_attribute(&meal.name);
    format!(
        r#"<article class="card" data-id="{id}" tabindex="0" aria-label="{name_attr}"><img src="{thumb}" alt="{name_attr}" loading="lazy" /><h3>{name}</h3></article>"#,
        id = encode_double_quoted_attribute(&meal.id),
        name_attr = name_attr,
        thumb = encode_double_quoted_attribute(&meal.thumbnail_url),
        name = encode_text(&meal.name),
    )
}

fn detail_body(meal: &MealDetail) -> String {
    let ingredients: String = meal
        .ingredients
        .iter()
        .map(|i| format!("<li>{}</li>", encode_text(i)))
        .collect();

    let video = meal
        .video_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<p><a href="{}" target="_blank" rel="noopener">Watch on YouTube</a></p>"#,
                encode_double_quoted_attribute(url)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            "{close}<h2>{name}</h2>",
            r#"<img src="{thumb}" alt="{name_attr}" />"#,
            "<strong>Category:</strong> {category}<br />",
            "<strong>Area:</strong> {area}<br />",
            "<h3>Ingredients</h3><ul>{ingredients}</ul>",
            "<h3>Instructions</h3><p>{instructions}</p>",
            "{video}"
        ),
        close = close_button(),
        name = encode_text(&meal.name),
        thumb = encode_double_quoted_attribute(&meal.thumbnail_url),
        name_attr = encode_double_quoted_attribute(&meal.name),
        category = encode_text(meal.category.as_deref().unwrap_or(MISSING)),
        area = encode_text(meal.area.as_deref().unwrap_or(MISSING)),
        ingredients = ingredients,
        instructions = encode_text(&meal.instructions),
        video = video,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_escapes_name() {
        let html = render_list_html(&ListPane::Cards(vec![MealSummary::new(
            "7",
            "Mac & \"Cheese\" <deluxe>",
            "https://example.com/a.jpg",
        )]));
        assert!(html.contains(r#"data-id="7""#));
        assert!(html.contains("<h3>Mac &amp; \"Cheese\" &lt;deluxe&gt;</h3>"));
        assert!(html.contains(r#"aria-label="Mac &amp; &quot;Cheese&quot; &lt;deluxe&gt;""#));
    }

    #[test]
    fn test_message_block() {
        let html = render_list_html(&ListPane::Message("No recipes found.".to_string()));
        assert_eq!(html, r#"<div class="empty">No recipes found.</div>"#);
    }

    #[test]
    fn test_closed_panel_is_empty() {
        assert!(render_detail_html(&DetailPane::Closed).is_empty());
    }

    #[test]
    fn test_detail_with_video() {
        let meal = MealDetail {
            id: "1".to_string(),
            name: "Chili".to_string(),
            thumbnail_url: "t.jpg".to_string(),
            category: Some("Beef".to_string()),
            area: None,
            instructions: "Cook <slowly>".to_string(),
            video_url: Some("https://youtube.com/watch?v=1&t=2".to_string()),
            ingredients: vec!["1 tsp Cumin".to_string()],
        };
        let html = render_detail_html(&DetailPane::Shown(meal));
        assert!(html.contains(r#"class="close""#));
        assert!(html.contains("<strong>Area:</strong> —"));
        assert!(html.contains("<li>1 tsp Cumin</li>"));
        assert!(html.contains("Cook &lt;slowly&gt;"));
        assert!(html.contains(r#"href="https://youtube.com/watch?v=1&amp;t=2""#));
    }
}
