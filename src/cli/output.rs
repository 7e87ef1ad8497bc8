//! Plain-text rendering for CLI results.
//!
//! Everything renders to a `String` so the layouts can be checked in tests;
//! the dispatcher prints the result to stdout.

use std::fmt::Write;

use crate::api::{Comment, RecipeDetail, RecipeRef, RecipeSummary, UserProfile};

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Section header.
///
/// ```text
/// POPULAR RECIPES
/// ════════════════════════════════════════════════════════════
/// ```
pub fn header(title: &str) -> String {
    format!("{}\n{}\n", title, "═".repeat(LINE_WIDTH))
}

fn summary_line(recipe: &RecipeSummary) -> String {
    let mut line = format!("{}  {}", recipe.id, recipe.title);
    if recipe.rating > 0.0 {
        let _ = write!(line, "  ★ {:.1}", recipe.rating);
    }
    if let Some(author) = recipe.created_by.as_ref().and_then(|a| a.username()) {
        let _ = write!(line, "  by {}", author);
    }
    line
}

/// Numbered recipe list, or a placeholder when empty.
pub fn recipe_list(title: &str, recipes: &[RecipeSummary]) -> String {
    let mut out = header(title);
    if recipes.is_empty() {
        out.push_str("  (none)\n");
    }
    for (index, recipe) in recipes.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", index + 1, summary_line(recipe));
    }
    out
}

/// Favorites/bookmarks listing. Bare ids are shown as-is.
pub fn collection(title: &str, entries: &[RecipeRef]) -> String {
    let mut out = header(title);
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    for (index, entry) in entries.iter().enumerate() {
        let line = match entry.summary() {
            Some(summary) => summary_line(summary),
            None => entry.id().to_string(),
        };
        let _ = writeln!(out, "{:>3}. {}", index + 1, line);
    }
    out
}

pub fn profile(profile: &UserProfile) -> String {
    let prefs = &profile.preferences;
    let flag = |on: bool| if on { "on" } else { "off" };

    let mut out = header(&profile.username);
    let _ = writeln!(out, "  Id:        {}", profile.id);
    let _ = writeln!(out, "  Email:     {}", profile.email);
    if let Some(location) = &profile.location {
        let _ = writeln!(out, "  Location:  {}", location);
    }
    out.push('\n');
    let _ = writeln!(out, "  Email notifications:    {}", flag(prefs.email_notifications));
    let _ = writeln!(out, "  Weekly recommendations: {}", flag(prefs.weekly_recommendations));
    let _ = writeln!(out, "  Dark mode:              {}", flag(prefs.dark_mode));
    let _ = writeln!(out, "  Metric units:           {}", flag(prefs.metric_units));
    let _ = writeln!(out, "  Public profile:         {}", flag(prefs.public_profile));
    out
}

/// Full recipe with markers for the local favorite/bookmark mirrors.
pub fn recipe_detail(
    recipe: &RecipeDetail,
    comments: &[Comment],
    favorite: bool,
    bookmarked: bool,
) -> String {
    let mut out = header(&recipe.title);
    let mut marks = Vec::new();
    if favorite {
        marks.push("♥ favorite");
    }
    if bookmarked {
        marks.push("🔖 bookmarked");
    }
    if !marks.is_empty() {
        let _ = writeln!(out, "  {}", marks.join("  "));
    }
    if let Some(description) = &recipe.description {
        let _ = writeln!(out, "  {}", description);
    }

    let minutes = |label: &str, value: Option<u32>, out: &mut String| {
        if let Some(value) = value {
            let _ = writeln!(out, "  {:<10} {} min", label, value);
        }
    };
    minutes("Prep:", recipe.prep_time, &mut out);
    minutes("Cook:", recipe.cook_time, &mut out);
    if let Some(servings) = recipe.servings {
        let _ = writeln!(out, "  {:<10} {}", "Servings:", servings);
    }

    if !recipe.ingredients.is_empty() {
        out.push_str("\nINGREDIENTS\n");
        for ingredient in &recipe.ingredients {
            let amount = format!("{} {}", ingredient.amount, ingredient.unit);
            let _ = writeln!(out, "  - {} {}", amount.trim(), ingredient.name);
        }
    }

    if !recipe.steps.is_empty() {
        out.push_str("\nSTEPS\n");
        for (index, step) in recipe.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", index + 1, step.description);
        }
    }

    if !comments.is_empty() {
        let _ = writeln!(out, "\nCOMMENTS ({})", comments.len());
        for comment in comments {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                "★".repeat(comment.rating.min(5) as usize),
                comment.author_name(),
                comment.content
            );
        }
    }
    out
}
