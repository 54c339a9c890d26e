//! DOM operations adapter.
//!
//! Thin layer over the `dom_query` crate giving the extraction pipeline a
//! stable node-level vocabulary: tag/attribute access, element-only
//! traversal, phrasing-content classification, and the structural
//! predicates the scorer and cleaners share. Everything downstream goes
//! through this module, so the DOM backend stays swappable.

// Re-export core types for the rest of the crate
pub use dom_query::{Document, NodeId, NodeRef, Selection};
pub use tendril::StrTendril;

use crate::patterns;
use crate::text;

/// Inline-level elements that flow inside a paragraph.
pub const PHRASING_ELEMS: &[&str] = &[
    "abbr", "audio", "b", "bdo", "br", "button", "cite", "code", "data", "datalist", "dfn", "em",
    "embed", "i", "img", "input", "kbd", "label", "mark", "math", "meter", "noscript", "object",
    "output", "progress", "q", "ruby", "samp", "script", "select", "small", "span", "strong",
    "sub", "sup", "textarea", "time", "var", "wbr",
];

/// Block elements whose presence keeps a `<div>` from being treated as a
/// paragraph.
pub const DIV_TO_P_ELEMS: &[&str] = &[
    "blockquote", "dl", "div", "img", "ol", "p", "pre", "table", "ul",
];

/// Tags allowed to stay as-is during sibling assembly; everything else is
/// retagged to `<div>`.
pub const ALTER_TO_DIV_EXCEPTIONS: &[&str] = &["div", "article", "section", "p", "ol", "ul"];

// === Tag / Attribute Access ===

/// Get an element's tag name (lowercase). Empty for non-elements.
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    if !node.is_element() {
        return String::new();
    }
    node.node_name().map(|t| t.to_string()).unwrap_or_default()
}

/// Get the `class` attribute, or an empty string.
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    node.attr("class").map(|s| s.to_string()).unwrap_or_default()
}

/// Get the `id` attribute, or an empty string.
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> String {
    node.attr("id").map(|s| s.to_string()).unwrap_or_default()
}

/// The `class` and `id` values joined for pattern matching.
#[must_use]
pub fn match_string(node: &NodeRef) -> String {
    format!("{} {}", class_name(node), id(node))
}

/// Get any attribute value as an owned string.
#[inline]
#[must_use]
pub fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    node.attr(name).map(|s| s.to_string())
}

/// All attributes as name/value pairs.
#[must_use]
pub fn attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

/// Copy every attribute of `from` onto `to`, overwriting same-name values.
pub fn copy_attributes(from: &NodeRef, to: &NodeRef) {
    for (name, value) in attributes(from) {
        to.set_attr(&name, &value);
    }
}

// === Text Content ===

/// Raw text content of a node and its descendants.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> String {
    node.text().to_string()
}

/// Trimmed text content, optionally with whitespace runs collapsed.
#[must_use]
pub fn inner_text(node: &NodeRef, normalize_spaces: bool) -> String {
    let text = node.text();
    if normalize_spaces {
        text::normalize_spaces(&text)
    } else {
        text.trim().to_string()
    }
}

/// Character count of the normalized inner text.
#[inline]
#[must_use]
pub fn inner_text_len(node: &NodeRef) -> usize {
    inner_text(node, true).chars().count()
}

/// Inner HTML of a node's subtree.
#[inline]
#[must_use]
pub fn inner_html(node: &NodeRef) -> StrTendril {
    Selection::from(node.clone()).inner_html()
}

/// Outer HTML of a node, including the node itself.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> StrTendril {
    Selection::from(node.clone()).html()
}

// === Tree Navigation ===

/// Parent node, only when it is an element.
#[must_use]
pub fn parent_element<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.parent().filter(NodeRef::is_element)
}

/// Snapshot of all child nodes, including text nodes.
///
/// Mutating passes iterate this owned list; live child lists are never
/// walked while the tree is being rearranged.
#[inline]
#[must_use]
pub fn child_nodes<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children()
}

/// Snapshot of element children only.
#[must_use]
pub fn element_children<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.children().into_iter().filter(NodeRef::is_element).collect()
}

/// First element child, skipping text nodes.
#[must_use]
pub fn first_element_child<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    node.children().into_iter().find(NodeRef::is_element)
}

/// Next sibling that is an element.
#[must_use]
pub fn next_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.next_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.next_sibling();
    }
    None
}

/// Previous sibling that is an element.
#[must_use]
pub fn previous_element_sibling<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut sibling = node.prev_sibling();
    while let Some(s) = sibling {
        if s.is_element() {
            return Some(s);
        }
        sibling = s.prev_sibling();
    }
    None
}

/// Starting at `node`, skip sibling text nodes that hold only whitespace
/// (and comments) and return the first substantial node.
#[must_use]
pub fn skip_blank_siblings<'a>(node: Option<NodeRef<'a>>) -> Option<NodeRef<'a>> {
    let mut current = node;
    while let Some(n) = current {
        if n.is_element() || !n.text().trim().is_empty() {
            return Some(n);
        }
        current = n.next_sibling();
    }
    None
}

/// Depth-first successor among elements: first element child, else next
/// element sibling, else the nearest ancestor's next element sibling.
#[must_use]
pub fn next_node<'a>(node: &NodeRef<'a>, ignore_self_and_kids: bool) -> Option<NodeRef<'a>> {
    if !ignore_self_and_kids {
        if let Some(child) = first_element_child(node) {
            return Some(child);
        }
    }
    if let Some(sibling) = next_element_sibling(node) {
        return Some(sibling);
    }
    let mut current = node.parent();
    while let Some(parent) = current {
        if let Some(sibling) = next_element_sibling(&parent) {
            return Some(sibling);
        }
        current = parent.parent();
    }
    None
}

/// Remove `node` from the tree and return the depth-first successor that
/// skips the removed subtree.
#[must_use]
pub fn remove_and_get_next<'a>(node: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let next = next_node(node, true);
    node.remove_from_parent();
    next
}

/// Element ancestors of a node, nearest first, up to `max_depth`
/// (0 = unlimited).
#[must_use]
pub fn node_ancestors<'a>(node: &NodeRef<'a>, max_depth: usize) -> Vec<NodeRef<'a>> {
    let mut ancestors = Vec::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        if !parent.is_element() {
            break;
        }
        current = parent.parent();
        ancestors.push(parent);
        if max_depth > 0 && ancestors.len() >= max_depth {
            break;
        }
    }
    ancestors
}

/// Check whether a node has an ancestor with the given tag within
/// `max_depth` levels (negative = unlimited), optionally constrained by a
/// predicate on the ancestor.
#[must_use]
pub fn has_ancestor_tag(
    node: &NodeRef,
    tag: &str,
    max_depth: i32,
    filter: Option<&dyn Fn(&NodeRef) -> bool>,
) -> bool {
    let mut depth = 0;
    let mut current = node.parent();
    while let Some(parent) = current {
        if max_depth > 0 && depth > max_depth {
            return false;
        }
        if parent.is_element()
            && tag_name(&parent) == tag
            && filter.map_or(true, |f| f(&parent))
        {
            return true;
        }
        current = parent.parent();
        depth += 1;
    }
    false
}

// === Structural Predicates ===

/// A text node holding only whitespace, or a `<br>`.
#[must_use]
pub fn is_whitespace(node: &NodeRef) -> bool {
    if node.is_element() {
        return tag_name(node) == "br";
    }
    node.text().trim().is_empty()
}

/// Whether a node is phrasing content: a text node, an inline-level
/// element, or an `<a>`/`<del>`/`<ins>` whose children are all phrasing.
#[must_use]
pub fn is_phrasing_content(node: &NodeRef) -> bool {
    if node.is_text() {
        return true;
    }
    if !node.is_element() {
        return false;
    }
    let tag = tag_name(node);
    if PHRASING_ELEMS.contains(&tag.as_str()) {
        return true;
    }
    matches!(tag.as_str(), "a" | "del" | "ins")
        && node.children().iter().all(is_phrasing_content)
}

/// Whether the node boils down to exactly one `<img>`, possibly wrapped in
/// single-child containers with no surrounding text.
#[must_use]
pub fn is_single_image(node: &NodeRef) -> bool {
    let mut current = node.clone();
    loop {
        if tag_name(&current) == "img" {
            return true;
        }
        let children = element_children(&current);
        if children.len() != 1 || !current.text().trim().is_empty() {
            return false;
        }
        current = children[0].clone();
    }
}

/// Whether the node has exactly one element child with the given tag and no
/// text-node children with content.
#[must_use]
pub fn has_single_tag_inside(node: &NodeRef, tag: &str) -> bool {
    let children = element_children(node);
    if children.len() != 1 || tag_name(&children[0]) != tag {
        return false;
    }
    !node
        .children()
        .iter()
        .any(|child| child.is_text() && !child.text().trim().is_empty())
}

/// An element with no text and no children other than `<br>`/`<hr>`.
#[must_use]
pub fn is_element_without_content(node: &NodeRef) -> bool {
    if !node.is_element() || !node.text().trim().is_empty() {
        return false;
    }
    let children = element_children(node);
    if children.is_empty() {
        return true;
    }
    let break_count = descendants_by_tag(node, &["br", "hr"]).len();
    children.len() == break_count
}

/// Whether any child (recursively) is a block-level element.
#[must_use]
pub fn has_child_block_element(node: &NodeRef) -> bool {
    node.children().iter().any(|child| {
        child.is_element()
            && (DIV_TO_P_ELEMS.contains(&tag_name(child).as_str())
                || has_child_block_element(child))
    })
}

/// Visibility heuristic: inline `display:none`/`visibility:hidden`, the
/// `hidden` attribute, and `aria-hidden` all hide an element, except that
/// `fallback-image` classes override `aria-hidden`.
#[must_use]
pub fn is_probably_visible(node: &NodeRef) -> bool {
    if let Some(style) = get_attribute(node, "style") {
        if patterns::DISPLAY_NONE.is_match(&style) || patterns::VISIBILITY_HIDDEN.is_match(&style) {
            return false;
        }
    }
    if node.has_attr("hidden") {
        return false;
    }
    if let Some(aria_hidden) = get_attribute(node, "aria-hidden") {
        if aria_hidden == "true" && !class_name(node).contains("fallback-image") {
            return false;
        }
    }
    true
}

// === Querying ===

/// All descendant elements matching any of the given tags, in document order.
#[must_use]
pub fn descendants_by_tag<'a>(node: &NodeRef<'a>, tags: &[&str]) -> Vec<NodeRef<'a>> {
    let selector = tags.join(", ");
    Selection::from(node.clone())
        .select(&selector)
        .nodes()
        .to_vec()
}

/// All descendant elements of a node.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    Selection::from(node.clone()).select("*").nodes().to_vec()
}

// === Measurement ===

/// Weighted ratio of anchor text to total text within an element.
///
/// Fragment-only links (`#...`) count at 30%. Returns 0 for empty elements;
/// the result is always within `[0, 1]` for well-formed trees.
#[must_use]
pub fn link_density(node: &NodeRef) -> f64 {
    let text_length = inner_text_len(node);
    if text_length == 0 {
        return 0.0;
    }

    let mut link_length = 0.0;
    for link in descendants_by_tag(node, &["a"]) {
        let href = get_attribute(&link, "href").unwrap_or_default();
        let coefficient = if patterns::HASH_URL.is_match(&href) { 0.3 } else { 1.0 };
        link_length += inner_text_len(&link) as f64 * coefficient;
    }

    link_length / text_length as f64
}

/// Ratio of text under the given descendant tags to the element's own text.
#[must_use]
pub fn text_density(node: &NodeRef, tags: &[&str]) -> f64 {
    let text_length = inner_text_len(node);
    if text_length == 0 {
        return 0.0;
    }
    let children_length: usize = descendants_by_tag(node, tags)
        .iter()
        .map(inner_text_len)
        .sum();
    children_length as f64 / text_length as f64
}

/// Row and column counts of a table, honoring `rowspan`/`colspan`.
#[must_use]
pub fn row_and_column_count(table: &NodeRef) -> (usize, usize) {
    let mut rows = 0;
    let mut columns = 0;
    for tr in descendants_by_tag(table, &["tr"]) {
        let rowspan = get_attribute(&tr, "rowspan")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1)
            .max(1);
        rows += rowspan;

        let mut columns_in_row = 0;
        for cell in descendants_by_tag(&tr, &["td"]) {
            let colspan = get_attribute(&cell, "colspan")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(1)
                .max(1);
            columns_in_row += colspan;
        }
        columns = columns.max(columns_in_row);
    }
    (rows, columns)
}

// === Tree Manipulation ===

/// Create a detached element in the document's tree.
#[inline]
#[must_use]
pub fn create_element<'a>(doc: &'a Document, tag: &str) -> NodeRef<'a> {
    doc.tree.new_element(tag)
}

/// Move `child` (and its subtree) to the end of `parent`'s children.
/// A node has one parent; appending detaches it from its old position.
#[inline]
pub fn append_node(parent: &NodeRef, child: &NodeRef) {
    parent.append_child(child);
}

/// Replace `old` with `new` in the tree. `new` is moved; `old` is detached.
#[inline]
pub fn replace_node(old: &NodeRef, new: &NodeRef) {
    old.replace_with(new);
}

/// Change an element's tag in place, keeping attributes and children.
#[inline]
pub fn set_node_tag(node: &NodeRef, tag: &str) {
    node.rename(tag);
}

// === Document Access ===

/// The `<body>` element of a document.
#[must_use]
pub fn body(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("body").nodes().first().cloned()
}

/// The `<html>` element of a document.
#[must_use]
pub fn document_element(doc: &Document) -> Option<NodeRef<'_>> {
    doc.select("html").nodes().first().cloned()
}

/// The document's declared base URI (`<base href>`), if any.
#[must_use]
pub fn base_href(doc: &Document) -> Option<String> {
    doc.select("base[href]")
        .nodes()
        .first()
        .and_then(|n| get_attribute(n, "href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// Number of elements in the document.
#[must_use]
pub fn element_count(doc: &Document) -> usize {
    doc.select("*").length()
}
