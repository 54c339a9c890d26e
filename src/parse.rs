//! Parse orchestration.
//!
//! Sequences the pipeline for one document: element budget check, noscript
//! image unwrap, metadata resolution (before script removal), document
//! normalization, the retry-driven content grab, post-processing, and
//! assembly of the final [`Article`].

use crate::article::Article;
use crate::dom::{self, Document};
use crate::error::{Error, Result};
use crate::extractor;
use crate::metadata::{self, json_ld, Metadata};
use crate::options::Options;
use crate::postprocess::{self, BaseUris};
use crate::preprocess;

/// Extract the article from an HTML document.
pub fn parse_document(html: &str, opts: &Options) -> Result<Article> {
    let doc = Document::from(html);

    if opts.max_elems_to_parse > 0 {
        let count = dom::element_count(&doc);
        if count > opts.max_elems_to_parse {
            return Err(Error::TooManyElements {
                count,
                max: opts.max_elems_to_parse,
            });
        }
    }

    // The base must be read off the original markup; the content fragment
    // reparsed later carries no <base> element.
    let base_uris = BaseUris::resolve(opts.url.as_deref(), dom::base_href(&doc).as_deref());

    // Order is deliberate: noscript unwrap needs script elements intact,
    // and so does JSON-LD metadata extraction.
    preprocess::unwrap_noscript_images(&doc);

    let structured = if opts.disable_json_ld {
        Metadata::default()
    } else {
        json_ld::get_json_ld(&doc)
    };
    let mut meta = metadata::get_article_metadata(&doc, structured);

    let lang = metadata::document_lang(&doc);
    let dir = metadata::document_dir(&doc);

    preprocess::remove_scripts(&doc);
    preprocess::prep_document(&doc);

    let article_title = meta.title.clone().unwrap_or_default();
    if opts.debug {
        eprintln!("DEBUG: resolved title: {article_title:?}");
    }

    let grabbed = extractor::grab_article(
        &doc.html(),
        &article_title,
        meta.byline.is_some(),
        opts,
    )
    .ok_or(Error::NoContent)?;

    if meta.byline.is_none() {
        meta.byline = grabbed.byline;
    }

    // The grab result is a serialized fragment; reparse it for the final
    // DOM passes and serialization.
    let content_doc = Document::from(grabbed.content_html);
    let container = dom::body(&content_doc)
        .ok_or_else(|| Error::DomContract("content fragment has no container".to_string()))?;

    postprocess::post_process(&container, base_uris.as_ref(), opts);

    let text_content = dom::text_content(&container);
    let length = text_content.chars().count();

    let excerpt = meta.excerpt.clone().or_else(|| {
        // fall back to the first paragraph of the extracted content
        dom::descendants_by_tag(&container, &["p"])
            .first()
            .map(|p| p.text().trim().to_string())
            .filter(|t| !t.is_empty())
    });

    let content = match opts.serializer {
        Some(serialize) => serialize(&container),
        None => dom::inner_html(&container).to_string(),
    };

    if opts.debug {
        eprintln!("DEBUG: extracted {length} chars of article text");
    }

    Ok(Article {
        title: meta.title,
        content: Some(content),
        text_content: Some(text_content),
        length,
        excerpt,
        byline: meta.byline,
        dir,
        site_name: meta.site_name,
        lang,
        published_time: meta.published_time,
    })
}
