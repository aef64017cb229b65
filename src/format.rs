//! Plain-text rendering of discovery output for tool responses and the CLI.

use crate::discovery::DiscoveryResult;
use crate::resource::Resource;
use crate::search::{ScoredItem, SearchResult};
use std::fmt::{Display, Write as _};
use std::sync::Arc;

/// Longest description excerpt shown per resource.
const DESCRIPTION_EXCERPT_CHARS: usize = 160;

/// Render a generic search result.
pub fn format_search_result(result: &SearchResult<Arc<Resource>>) -> String {
    render(
        result.mode,
        &result.summary,
        &result.items,
        &result.suggestions,
        false,
    )
}

/// Render a discovery result. With `explain`, each item lists its score
/// components.
pub fn format_discovery_result(result: &DiscoveryResult, explain: bool) -> String {
    render(
        result.mode,
        &result.summary,
        &result.items,
        &result.suggestions,
        explain,
    )
}

/// Render an unranked resource listing.
pub fn format_resource_list(resources: &[Arc<Resource>], total: usize) -> String {
    if resources.is_empty() {
        let mut output = String::from("No resources match these filters.\n\n");
        output.push_str("Filter tips:\n");
        output.push_str("• Drop the tag filter or use fewer tags\n");
        output.push_str("• Text matching is a plain substring search over title, description, tags and author\n");
        output.push_str("• Use discover for ranked, intent-aware search\n");
        return output;
    }

    let mut output = format!(
        "Showing {} of {} resource(s) in the catalog:\n\n",
        resources.len(),
        total
    );
    for resource in resources {
        let _ = writeln!(
            output,
            "• **{}** `{}` ({}, {}){}",
            resource.title,
            resource.id,
            resource.resource_type,
            resource.difficulty,
            if resource.free { "" } else { " [paid]" }
        );
        if !resource.url.is_empty() {
            let _ = writeln!(output, "  {}", resource.url);
        }
    }
    output
}

fn render(
    mode: impl Display,
    summary: &str,
    items: &[ScoredItem<Arc<Resource>>],
    suggestions: &[String],
    explain: bool,
) -> String {
    let mut output = format!("{summary} [{mode}]\n");

    if !items.is_empty() {
        output.push('\n');
    }
    for (rank, scored) in items.iter().enumerate() {
        write_item(&mut output, rank + 1, scored, explain);
    }

    if !suggestions.is_empty() {
        output.push_str("\nSuggestions:\n");
        for suggestion in suggestions {
            let _ = writeln!(output, "• {suggestion}");
        }
    }
    output
}

fn write_item(output: &mut String, rank: usize, scored: &ScoredItem<Arc<Resource>>, explain: bool) {
    let resource = &scored.item;
    let mut badges = vec![resource.resource_type.to_string(), resource.difficulty.to_string()];
    if resource.official {
        badges.push("official".to_string());
    }
    if !resource.free {
        badges.push("paid".to_string());
    }

    let _ = writeln!(
        output,
        "{}. **{}** ({}) score {}",
        rank,
        resource.title,
        badges.join(", "),
        scored.score
    );
    if !resource.url.is_empty() {
        let _ = writeln!(output, "   {}", resource.url);
    }
    if let Some(author) = &resource.author {
        let _ = writeln!(output, "   by {author}");
    }
    if !resource.description.is_empty() {
        let _ = writeln!(output, "   {}", excerpt(&resource.description));
    }
    if !resource.concepts.is_empty() {
        let concepts: Vec<&str> = resource.concepts.iter().map(|c| c.display_name()).collect();
        let _ = writeln!(output, "   concepts: {}", concepts.join(", "));
    }
    if explain && let Some(breakdown) = &scored.breakdown {
        let _ = writeln!(output, "   score: {breakdown}");
    }
    output.push('\n');
}

/// First sentence-ish slice of `text`, cut on a char boundary.
fn excerpt(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= DESCRIPTION_EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(DESCRIPTION_EXCERPT_CHARS).collect();
    match cut.rfind(' ') {
        Some(space) => format!("{}...", &cut[..space]),
        None => format!("{cut}..."),
    }
}
