//! Article preparation.
//!
//! Runs on the freshly assembled article container, inside the retry loop:
//! strips presentational attributes, recovers lazy images, prunes suspect
//! subtrees (forms, tables, lists, divs) via the conditional heuristics,
//! removes embeds that are not allowlisted videos, and normalizes leftover
//! structure (headers, empty paragraphs, single-cell tables).

use std::collections::HashSet;

use regex::Regex;

use crate::dom::{self, Document, NodeId, NodeRef};
use crate::extractor::scoring;
use crate::extractor::state::{Flags, ScoreMap};
use crate::options::Options;
use crate::patterns;
use crate::text;

/// Attributes stripped from every element in the output.
const PRESENTATIONAL_ATTRIBUTES: &[&str] = &[
    "align", "background", "bgcolor", "border", "cellpadding", "cellspacing", "frame", "hspace",
    "rules", "style", "valign", "vspace",
];

/// Elements that additionally lose their `width`/`height` attributes.
const DEPRECATED_SIZE_ATTRIBUTE_ELEMS: &[&str] = &["table", "th", "td", "hr", "pre"];

/// Share widgets longer than this many characters are assumed to carry real
/// content and are left alone.
const SHARE_ELEMENT_THRESHOLD: usize = 500;

/// The configured or built-in allowlist for embedded videos.
fn video_regex(opts: &Options) -> &Regex {
    opts.allowed_video_regex
        .as_ref()
        .unwrap_or(&patterns::VIDEOS)
}

/// Clean the assembled article in place.
pub fn prep_article(
    doc: &Document,
    article: &NodeRef,
    scores: &ScoreMap,
    flags: &Flags,
    opts: &Options,
) {
    clean_styles(article);

    let data_tables = mark_data_tables(article);
    fix_lazy_images(doc, article);

    clean_conditionally(article, "form", scores, flags, opts, &data_tables);
    clean_conditionally(article, "fieldset", scores, flags, opts, &data_tables);
    clean(article, "object", opts);
    clean(article, "embed", opts);
    clean(article, "footer", opts);
    clean(article, "link", opts);
    clean(article, "aside", opts);

    // Share widgets sitting inside the article's top-level blocks
    for child in dom::element_children(article) {
        clean_matched_nodes(&child, |node, match_string| {
            patterns::SHARE_ELEMENTS.is_match(match_string)
                && dom::text_content(node).chars().count() < SHARE_ELEMENT_THRESHOLD
        });
    }

    clean(article, "iframe", opts);
    clean(article, "input", opts);
    clean(article, "textarea", opts);
    clean(article, "select", opts);
    clean(article, "button", opts);
    clean_headers(article, flags);

    clean_conditionally(article, "table", scores, flags, opts, &data_tables);
    clean_conditionally(article, "ul", scores, flags, opts, &data_tables);
    clean_conditionally(article, "div", scores, flags, opts, &data_tables);
    clean_conditionally(article, "ol", scores, flags, opts, &data_tables);
    clean_conditionally(article, "dl", scores, flags, opts, &data_tables);

    for h1 in dom::descendants_by_tag(article, &["h1"]) {
        dom::set_node_tag(&h1, "h2");
    }

    remove_empty_paragraphs(article);
    remove_breaks_before_paragraphs(article);
    flatten_single_cell_tables(article);
}

/// Recursively strip presentational attributes, leaving `<svg>` subtrees
/// untouched.
fn clean_styles(node: &NodeRef) {
    if !node.is_element() || dom::tag_name(node) == "svg" {
        return;
    }

    for attr in PRESENTATIONAL_ATTRIBUTES {
        node.remove_attr(attr);
    }
    if DEPRECATED_SIZE_ATTRIBUTE_ELEMS.contains(&dom::tag_name(node).as_str()) {
        node.remove_attr("width");
        node.remove_attr("height");
    }

    for child in dom::element_children(node) {
        clean_styles(&child);
    }
}

/// Identify tables holding actual data, which the conditional cleaner must
/// not prune: explicit semantic cues, spanning cells, or sheer size.
fn mark_data_tables(article: &NodeRef) -> HashSet<NodeId> {
    let mut data_tables = HashSet::new();

    for table in dom::descendants_by_tag(article, &["table"]) {
        let role = dom::get_attribute(&table, "role").unwrap_or_default();
        if matches!(role.as_str(), "grid" | "list" | "treegrid") {
            data_tables.insert(table.id);
            continue;
        }
        if table.has_attr("summary") {
            data_tables.insert(table.id);
            continue;
        }
        if !dom::descendants_by_tag(&table, &["caption", "thead", "tfoot", "colgroup", "th"])
            .is_empty()
        {
            data_tables.insert(table.id);
            continue;
        }

        let spanning_cell = dom::descendants_by_tag(&table, &["td"]).iter().any(|cell| {
            ["colspan", "rowspan"].iter().any(|attr| {
                dom::get_attribute(cell, attr)
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .is_some_and(|span| span > 1)
            })
        });
        if spanning_cell {
            data_tables.insert(table.id);
            continue;
        }

        let (rows, _columns) = dom::row_and_column_count(&table);
        let cells = dom::descendants_by_tag(&table, &["td"]).len();
        if rows >= 4 && cells >= 10 {
            data_tables.insert(table.id);
        }
    }

    data_tables
}

/// Copy image URLs out of lazy-loading data attributes into `src`/`srcset`.
fn fix_lazy_images(doc: &Document, article: &NodeRef) {
    for elem in dom::descendants_by_tag(article, &["img", "picture", "figure"]) {
        let tag = dom::tag_name(&elem);
        let src = dom::get_attribute(&elem, "src").unwrap_or_default();

        // A tiny inline base64 placeholder can hide the real source held in
        // another attribute; drop it so the copy below can take effect.
        if let Some(caps) = patterns::B64_DATA_URL.captures(&src) {
            if &caps[1] != "image/svg+xml" {
                let has_other_image_attr = dom::attributes(&elem)
                    .iter()
                    .any(|(name, value)| name != "src" && patterns::IMG_EXT_ANY.is_match(value));
                if has_other_image_attr {
                    let b64_start = src.find("base64,").map_or(0, |i| i + "base64,".len());
                    if src.len() - b64_start < 133 {
                        elem.remove_attr("src");
                    }
                }
            }
        }

        let has_src = dom::get_attribute(&elem, "src").is_some_and(|s| !s.is_empty());
        let has_srcset = dom::get_attribute(&elem, "srcset").is_some_and(|s| s != "null");
        if (has_src || has_srcset) && !dom::class_name(&elem).to_lowercase().contains("lazy") {
            continue;
        }

        for (name, value) in dom::attributes(&elem) {
            if matches!(name.as_str(), "src" | "srcset" | "alt") {
                continue;
            }
            let copy_to = if patterns::IMG_EXT_SRCSET.is_match(&value) {
                Some("srcset")
            } else if patterns::IMG_EXT_URL.is_match(&value) {
                Some("src")
            } else {
                None
            };
            let Some(target) = copy_to else { continue };

            if tag == "img" || tag == "picture" {
                elem.set_attr(target, &value);
            } else if tag == "figure"
                && dom::descendants_by_tag(&elem, &["img", "picture"]).is_empty()
            {
                let img = dom::create_element(doc, "img");
                img.set_attr(target, &value);
                dom::append_node(&elem, &img);
            }
        }
    }
}

/// Remove all descendants with the given tag, sparing allowlisted video
/// embeds.
fn clean(article: &NodeRef, tag: &str, opts: &Options) {
    let is_embed = matches!(tag, "object" | "embed" | "iframe");
    let videos = video_regex(opts);

    for node in dom::descendants_by_tag(article, &[tag]) {
        if is_embed {
            let attr_match = dom::attributes(&node)
                .iter()
                .any(|(_, value)| videos.is_match(value));
            if attr_match || videos.is_match(&dom::inner_html(&node)) {
                continue;
            }
        }
        node.remove_from_parent();
    }
}

/// Walk a subtree and remove every node the filter flags.
fn clean_matched_nodes(root: &NodeRef, filter: impl Fn(&NodeRef, &str) -> bool) {
    let end_of_search = dom::next_node(root, true).map(|n| n.id);
    let mut next = dom::next_node(root, false);
    while let Some(node) = next {
        if Some(node.id) == end_of_search {
            break;
        }
        if filter(&node, &dom::match_string(&node)) {
            next = dom::remove_and_get_next(&node);
        } else {
            next = dom::next_node(&node, false);
        }
    }
}

/// Remove `<h1>`/`<h2>` elements whose class/id weight is negative.
fn clean_headers(article: &NodeRef, flags: &Flags) {
    for heading in dom::descendants_by_tag(article, &["h1", "h2"]) {
        if scoring::class_weight(&heading, flags) < 0.0 {
            heading.remove_from_parent();
        }
    }
}

/// Conditionally prune suspect `tag` subtrees using the composite content
/// heuristic. Inactive when the clean-conditionally gate is relaxed.
#[allow(clippy::too_many_lines)]
fn clean_conditionally(
    article: &NodeRef,
    tag: &str,
    scores: &ScoreMap,
    flags: &Flags,
    opts: &Options,
    data_tables: &HashSet<NodeId>,
) {
    if !flags.clean_conditionally {
        return;
    }

    let videos = video_regex(opts);
    let is_data_table = |n: &NodeRef| data_tables.contains(&n.id);

    'nodes: for node in dom::descendants_by_tag(article, &[tag]) {
        if node.parent().is_none() {
            continue; // removed together with an earlier subtree
        }

        if tag == "table" && data_tables.contains(&node.id) {
            continue;
        }
        if dom::has_ancestor_tag(&node, "table", -1, Some(&is_data_table)) {
            continue;
        }
        if dom::has_ancestor_tag(&node, "code", -1, None) {
            continue;
        }

        let weight = scoring::class_weight(&node, flags);
        if weight + scores.get(node.id).unwrap_or(0.0) < 0.0 {
            node.remove_from_parent();
            continue;
        }

        let inner_text = dom::inner_text(&node, true);
        if text::comma_count(&inner_text) >= 10 {
            continue;
        }

        let p_count = dom::descendants_by_tag(&node, &["p"]).len();
        let img_count = dom::descendants_by_tag(&node, &["img"]).len();
        let li_count = dom::descendants_by_tag(&node, &["li"]).len();
        let input_count = dom::descendants_by_tag(&node, &["input"]).len();
        let heading_density =
            dom::text_density(&node, &["h1", "h2", "h3", "h4", "h5", "h6"]);

        let mut embed_count = 0;
        for embed in dom::descendants_by_tag(&node, &["object", "embed", "iframe"]) {
            // an allowlisted video embed protects the whole subtree
            if dom::attributes(&embed)
                .iter()
                .any(|(_, value)| videos.is_match(value))
            {
                continue 'nodes;
            }
            if videos.is_match(&dom::inner_html(&embed)) {
                continue 'nodes;
            }
            embed_count += 1;
        }

        let is_list_tag = tag == "ul" || tag == "ol";
        let is_list = is_list_tag || {
            let total_len = inner_text.chars().count();
            if total_len == 0 {
                false
            } else {
                let list_len: usize = dom::descendants_by_tag(&node, &["ul", "ol"])
                    .iter()
                    .map(dom::inner_text_len)
                    .sum();
                list_len as f64 / total_len as f64 > 0.9
            }
        };

        let content_length = inner_text.chars().count();
        let link_density = dom::link_density(&node);
        let is_figure_child = dom::has_ancestor_tag(&node, "figure", -1, None);

        let have_to_remove = (img_count > p_count && !is_figure_child)
            || (!is_list_tag && li_count > p_count)
            || (input_count > p_count / 3)
            || (heading_density < 0.9
                && content_length < 25
                && (img_count == 0 || img_count > 2)
                && !is_figure_child)
            || (weight < 25.0 && link_density > 0.2 + opts.link_density_modifier)
            || (weight >= 25.0 && link_density > 0.5 + opts.link_density_modifier)
            || (embed_count == 1 && content_length < 75)
            || embed_count > 1;

        if !have_to_remove {
            continue;
        }

        // Plain galleries survive: a list whose items each hold one image
        if is_list {
            let children = dom::element_children(&node);
            let simple_items = children
                .iter()
                .all(|child| dom::element_children(child).len() <= 1);
            if simple_items && img_count == li_count {
                continue;
            }
        }

        node.remove_from_parent();
    }
}

/// Remove paragraphs holding neither media nor text.
fn remove_empty_paragraphs(article: &NodeRef) {
    for p in dom::descendants_by_tag(article, &["p"]) {
        let media_count = dom::descendants_by_tag(&p, &["img", "embed", "object", "iframe"]).len();
        if media_count == 0 && dom::inner_text(&p, false).is_empty() {
            p.remove_from_parent();
        }
    }
}

/// A `<br>` directly preceding a paragraph is redundant.
fn remove_breaks_before_paragraphs(article: &NodeRef) {
    for br in dom::descendants_by_tag(article, &["br"]) {
        let next = dom::skip_blank_siblings(br.next_sibling());
        if next.is_some_and(|n| dom::tag_name(&n) == "p") {
            br.remove_from_parent();
        }
    }
}

/// Unwrap layout tables that hold exactly one cell.
fn flatten_single_cell_tables(article: &NodeRef) {
    for table in dom::descendants_by_tag(article, &["table"]) {
        let tbody = if dom::has_single_tag_inside(&table, "tbody") {
            match dom::first_element_child(&table) {
                Some(tbody) => tbody,
                None => continue,
            }
        } else {
            table.clone()
        };
        if !dom::has_single_tag_inside(&tbody, "tr") {
            continue;
        }
        let Some(row) = dom::first_element_child(&tbody) else { continue };
        if !dom::has_single_tag_inside(&row, "td") {
            continue;
        }
        let Some(cell) = dom::first_element_child(&row) else { continue };

        let all_phrasing = dom::child_nodes(&cell)
            .iter()
            .all(dom::is_phrasing_content);
        dom::set_node_tag(&cell, if all_phrasing { "p" } else { "div" });
        dom::replace_node(&table, &cell);
    }
}
