// ABOUTME: Brace-depth-aware JSON extraction from free-text model replies
// ABOUTME: Locates the first balanced object span and deserializes it into the nutrition schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macrolens Nutrition

//! JSON extraction from free-text model replies
//!
//! The model is instructed to reply with only a JSON object, but replies
//! routinely arrive wrapped in prose or markdown fences anyway. The scanner
//! here walks the reply tracking brace depth and string-literal state, so
//! braces inside string values and unrelated braces in surrounding prose do
//! not confuse it — unlike a first-`{`-to-last-`}` pattern match.

use crate::errors::{AppError, AppResult};
use crate::models::NutritionAnalysis;

/// Find the first balanced `{...}` span in `text`
///
/// Tracks string-literal state (including escape sequences) while inside an
/// object so braces embedded in string values are not counted. Returns
/// `None` when no opening brace exists or the first object never closes.
#[must_use]
pub fn find_json_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if depth > 0 && in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' if depth > 0 => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(index);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    let begin = start?;
                    return Some(&text[begin..=index]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and validate the nutrition object from a model reply
///
/// # Errors
///
/// Returns an upstream-format error when the reply contains no balanced
/// JSON object, or when the object fails to deserialize into the
/// [`NutritionAnalysis`] schema (wrong types, negative protein values).
pub fn extract_nutrition(reply: &str) -> AppResult<NutritionAnalysis> {
    let span = find_json_object(reply).ok_or_else(|| {
        AppError::upstream_format("Model reply did not contain a JSON object")
    })?;

    serde_json::from_str(span).map_err(|e| {
        AppError::upstream_format(format!("Model reply JSON did not match expected shape: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FoodItem;

    #[test]
    fn test_extracts_object_wrapped_in_prose() {
        let reply = r#"Sure! {"foods":[{"name":"Egg","quantity":"50g","protein":6}],"totalProtein":6} Enjoy!"#;
        let analysis = extract_nutrition(reply).unwrap();
        assert_eq!(
            analysis,
            NutritionAnalysis {
                foods: vec![FoodItem {
                    name: "Egg".to_owned(),
                    quantity: "50g".to_owned(),
                    protein: 6,
                }],
                total_protein: 6,
            }
        );
    }

    #[test]
    fn test_no_braces_is_format_error() {
        let error = extract_nutrition("I could not identify any food.").unwrap_err();
        assert_eq!(
            error.code,
            crate::errors::ErrorCode::UpstreamFormat
        );
    }

    #[test]
    fn test_unclosed_object_is_format_error() {
        assert!(extract_nutrition(r#"{"foods": ["#).is_err());
    }

    #[test]
    fn test_braces_inside_string_values() {
        let reply = r#"{"foods":[{"name":"Bento {deluxe}","quantity":"1 box","protein":20}],"totalProtein":20}"#;
        let analysis = extract_nutrition(reply).unwrap();
        assert_eq!(analysis.foods[0].name, "Bento {deluxe}");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let reply = r#"{"foods":[{"name":"\"house\" salad","quantity":"100g","protein":3}],"totalProtein":3}"#;
        let analysis = extract_nutrition(reply).unwrap();
        assert_eq!(analysis.foods[0].name, "\"house\" salad");
    }

    #[test]
    fn test_markdown_fenced_reply() {
        let reply = "```json\n{\"foods\":[],\"totalProtein\":0}\n```";
        let analysis = extract_nutrition(reply).unwrap();
        assert!(analysis.foods.is_empty());
        assert_eq!(analysis.total_protein, 0);
    }

    #[test]
    fn test_first_object_wins() {
        let reply = r#"{"foods":[],"totalProtein":1} {"foods":[],"totalProtein":2}"#;
        let analysis = extract_nutrition(reply).unwrap();
        assert_eq!(analysis.total_protein, 1);
    }

    #[test]
    fn test_first_object_with_wrong_shape_is_format_error() {
        // The scanner takes the first balanced object; it does not hunt for
        // a later one that happens to parse.
        let reply = r#"{"note":"hi"} {"foods":[],"totalProtein":2}"#;
        assert!(extract_nutrition(reply).is_err());
    }

    #[test]
    fn test_fractional_protein_is_format_error() {
        let reply = r#"{"foods":[{"name":"Egg","quantity":"50g","protein":6.4}],"totalProtein":6}"#;
        assert!(extract_nutrition(reply).is_err());
    }

    #[test]
    fn test_find_json_object_span_bounds() {
        let text = "prefix {\"a\": {\"b\": 1}} suffix";
        assert_eq!(find_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }
}
