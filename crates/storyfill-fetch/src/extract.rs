//! Visible text extraction from HTML.

use scraper::{Html, Node};

/// Elements whose contents never count as visible text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// Strip markup from `html` and return its visible text.
///
/// Text nodes are collected in document order, skipping `<script>` and
/// `<style>` subtrees. Each fragment is trimmed, blank fragments are dropped,
/// and the rest are joined with a single space. Malformed markup is parsed
/// leniently; input without any text yields an empty string.
#[must_use]
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut fragments: Vec<&str> = Vec::new();
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    fragments.push(trimmed);
                }
            }
            Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name()) => {}
            _ => {
                let children: Vec<_> = node.children().collect();
                stack.extend(children.into_iter().rev());
            }
        }
    }

    fragments.join(" ")
}
