//! Document pre-processing.
//!
//! Normalizes the raw document before candidate traversal: recovers
//! lazy-loaded images hidden in `<noscript>` fallbacks, strips scripts and
//! styles, converts `<br>` runs into real paragraphs, and retags obsolete
//! `<font>` elements. The noscript unwrap must run before script removal,
//! and metadata extraction happens between the two.

use crate::dom::{self, Document, Selection};
use crate::patterns;

/// Replace placeholder images with the higher-quality fallback images kept
/// inside `<noscript>` elements.
pub fn unwrap_noscript_images(doc: &Document) {
    // Placeholder imgs without any usable source are dropped outright so the
    // noscript fallback can take their place.
    for img in doc.select("img").nodes().to_vec() {
        let meaningful = dom::attributes(&img).iter().any(|(name, value)| {
            matches!(name.as_str(), "src" | "srcset" | "data-src" | "data-srcset")
                || patterns::IMG_EXT_ANY.is_match(value)
        });
        if !meaningful {
            img.remove_from_parent();
        }
    }

    for noscript in doc.select("noscript").nodes().to_vec() {
        let fragment_html = Selection::from(noscript.clone()).inner_html().to_string();
        let fragment = Document::from(fragment_html);
        let Some(container) = dom::body(&fragment) else {
            continue;
        };
        if !dom::is_single_image(&container) {
            continue;
        }

        // Only swap when the preceding sibling is itself a bare image
        let Some(prev) = dom::previous_element_sibling(&noscript) else {
            continue;
        };
        if !dom::is_single_image(&prev) {
            continue;
        }

        let prev_img = if dom::tag_name(&prev) == "img" {
            prev.clone()
        } else {
            match dom::descendants_by_tag(&prev, &["img"]).first().cloned() {
                Some(img) => img,
                None => continue,
            }
        };
        let Some(new_img) = dom::descendants_by_tag(&container, &["img"]).first().cloned() else {
            continue;
        };

        // Carry the placeholder's image-bearing attributes over, stashing
        // conflicting ones under data-old-* instead of overwriting.
        for (name, value) in dom::attributes(&prev_img) {
            if value.is_empty() {
                continue;
            }
            if name != "src" && name != "srcset" && !patterns::IMG_EXT_ANY.is_match(&value) {
                continue;
            }
            if dom::get_attribute(&new_img, &name).as_deref() == Some(value.as_str()) {
                continue;
            }
            let attr_name = if new_img.has_attr(&name) {
                format!("data-old-{name}")
            } else {
                name
            };
            new_img.set_attr(&attr_name, &value);
        }

        if let Some(replacement) = dom::first_element_child(&container) {
            let replacement_html = dom::outer_html(&replacement).to_string();
            Selection::from(prev).replace_with_html(replacement_html.as_str());
        }
    }
}

/// Remove all `<script>` and `<noscript>` elements.
pub fn remove_scripts(doc: &Document) {
    doc.select("script, noscript").remove();
}

/// Run the remaining normalization steps: style removal, `<br>`-run
/// conversion, and `<font>` retagging.
pub fn prep_document(doc: &Document) {
    doc.select("style").remove();

    replace_brs(doc);

    for font in doc.select("font").nodes().to_vec() {
        dom::set_node_tag(&font, "span");
    }
}

/// Convert runs of two or more `<br>` elements into paragraph boundaries.
///
/// The first `<br>` of each run becomes a `<p>` that absorbs the phrasing
/// content following it, up to the next block element or double-`<br>`.
fn replace_brs(doc: &Document) {
    for br in doc.select("br").nodes().to_vec() {
        if br.parent().is_none() {
            continue; // consumed by an earlier run
        }

        // Swallow the rest of the <br> chain, ignoring blank text between
        let mut next = br.next_sibling();
        let mut replaced = false;
        while let Some(candidate) = dom::skip_blank_siblings(next) {
            if dom::tag_name(&candidate) != "br" {
                break;
            }
            replaced = true;
            next = candidate.next_sibling();
            candidate.remove_from_parent();
        }

        if !replaced {
            continue;
        }

        let p = dom::create_element(doc, "p");
        dom::replace_node(&br, &p);

        // Absorb phrasing content until a block element or another <br> pair
        let mut sibling = p.next_sibling();
        while let Some(node) = sibling {
            if dom::tag_name(&node) == "br" {
                if let Some(after) = dom::skip_blank_siblings(node.next_sibling()) {
                    if dom::tag_name(&after) == "br" {
                        break;
                    }
                }
            }
            if !dom::is_phrasing_content(&node) {
                break;
            }
            let next_sibling = node.next_sibling();
            dom::append_node(&p, &node);
            sibling = next_sibling;
        }

        while let Some(last) = p.last_child() {
            if !dom::is_whitespace(&last) {
                break;
            }
            last.remove_from_parent();
        }

        if let Some(parent) = p.parent() {
            if dom::tag_name(&parent) == "p" {
                dom::set_node_tag(&parent, "div");
            }
        }
    }
}
