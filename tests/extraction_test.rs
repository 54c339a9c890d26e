use rs_readerview::{parse, parse_with_options, Error, Options};

fn lorem(min_len: usize) -> String {
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor \
     incididunt ut labore et dolore magna aliqua. "
        .repeat(min_len / 120 + 1)
}

#[test]
fn extracts_long_article_with_metadata() {
    let body = lorem(600);
    let html = format!(
        "<html><head><title>Foo - Example</title></head>\
         <body><article><p>{body}</p></article></body></html>"
    );

    let article = parse(&html).expect("article");
    assert!(article.content.as_deref().unwrap().contains("<p>"));
    assert!(article.length >= 600);
    assert!(article
        .text_content
        .as_deref()
        .unwrap()
        .contains("Lorem ipsum"));
    assert!(article.title.as_deref().unwrap().contains("Foo"));
}

#[test]
fn navigation_and_chrome_stripped() {
    let body = lorem(600);
    let html = format!(
        "<html><body>\
         <nav class=\"menu\"><a href=\"/a\">Home</a><a href=\"/b\">About</a></nav>\
         <div class=\"sidebar\">SIDEBAR_TEXT</div>\
         <article><p>{body}</p></article>\
         <footer>FOOTER_TEXT</footer>\
         </body></html>"
    );

    let article = parse(&html).expect("article");
    let text = article.text_content.unwrap();
    assert!(text.contains("Lorem ipsum"));
    assert!(!text.contains("SIDEBAR_TEXT"));
    assert!(!text.contains("FOOTER_TEXT"));
}

#[test]
fn json_ld_metadata_resolved() {
    let body = lorem(600);
    let html = format!(
        r#"<html><head>
        <script type="application/ld+json">
        {{"@context":"https://schema.org","@type":"NewsArticle","headline":"H",
          "author":{{"name":"A B"}},"datePublished":"2024-01-02"}}
        </script>
        <title>H - Site</title></head>
        <body><article><p>{body}</p></article></body></html>"#
    );

    let article = parse(&html).expect("article");
    assert_eq!(article.title.as_deref(), Some("H"));
    assert_eq!(article.byline.as_deref(), Some("A B"));
    assert_eq!(article.published_time.as_deref(), Some("2024-01-02"));
}

#[test]
fn disable_json_ld_falls_back_to_meta() {
    let body = lorem(600);
    let html = format!(
        r#"<html><head>
        <script type="application/ld+json">
        {{"@context":"https://schema.org","@type":"NewsArticle","headline":"Structured"}}
        </script>
        <meta property="og:title" content="Meta Title">
        </head><body><article><p>{body}</p></article></body></html>"#
    );

    let with_json_ld = parse(&html).expect("article");
    assert_eq!(with_json_ld.title.as_deref(), Some("Structured"));

    let opts = Options {
        disable_json_ld: true,
        ..Options::default()
    };
    let without = parse_with_options(&html, &opts).expect("article");
    assert_eq!(without.title.as_deref(), Some("Meta Title"));
}

#[test]
fn javascript_links_reduced_to_text() {
    let body = lorem(600);
    let html = format!(
        r#"<html><body><article><p>{body}</p>
        <p>Closing words <a href="javascript:foo()">click</a> follow here.</p>
        </article></body></html>"#
    );

    let article = parse(&html).expect("article");
    let content = article.content.unwrap();
    assert!(!content.contains("javascript:"));
    assert!(!content.contains("<a "));
    assert!(content.contains("click"));
}

#[test]
fn lazy_image_resolved_against_base() {
    let body = lorem(600);
    let html = format!(
        r#"<html><body><article><p>{body}</p>
        <img data-src="/pic.jpg"></article></body></html>"#
    );
    let opts = Options {
        url: Some("http://x.test/a/".to_string()),
        ..Options::default()
    };

    let article = parse_with_options(&html, &opts).expect("article");
    assert!(article
        .content
        .unwrap()
        .contains(r#"src="http://x.test/pic.jpg""#));
}

#[test]
fn retry_relaxes_filters_for_short_pages() {
    // All the text lives under an unlikely-looking class; only a relaxed
    // pass finds enough of it.
    let body = lorem(520);
    let html = format!(
        "<html><body><div class=\"sidebar\"><p>{body}</p></div></body></html>"
    );

    let article = parse(&html).expect("article");
    assert!(article.length >= 500);
    assert!(article
        .text_content
        .unwrap()
        .contains("Lorem ipsum"));
}

#[test]
fn single_cell_table_flattened() {
    let body = lorem(600);
    let html = format!(
        "<html><body><article><p>{body}</p>\
         <table><tbody><tr><td><em>Hi</em> there, this lone cell carries one full sentence of content.</td></tr></tbody></table>\
         </article></body></html>"
    );

    let article = parse(&html).expect("article");
    let content = article.content.unwrap();
    assert!(!content.contains("<table"));
    assert!(content.contains("<em>Hi</em>"));
}

#[test]
fn video_iframe_survives_cleaning() {
    let body = lorem(600);
    let html = format!(
        r#"<html><body><article><p>{body}</p>
        <iframe src="https://www.youtube.com/embed/xyz"></iframe>
        </article></body></html>"#
    );

    let article = parse(&html).expect("article");
    assert!(article.content.unwrap().contains("youtube.com/embed/xyz"));
}

#[test]
fn url_byline_from_article_author_rejected() {
    let body = lorem(600);
    let html = format!(
        r#"<html><head>
        <meta property="article:author" content="https://social.example/profiles/jane">
        </head><body><article><p>{body}</p></article></body></html>"#
    );

    let article = parse(&html).expect("article");
    assert!(article.byline.is_none());
}

#[test]
fn byline_element_captured() {
    let body = lorem(600);
    let html = format!(
        r#"<html><body><article>
        <div class="byline">By Jane Doe</div>
        <p>{body}</p></article></body></html>"#
    );

    let article = parse(&html).expect("article");
    assert_eq!(article.byline.as_deref(), Some("By Jane Doe"));
    assert!(!article.text_content.unwrap().contains("Jane Doe"));
}

#[test]
fn lang_and_dir_read_from_root() {
    let body = lorem(600);
    let html = format!(
        r#"<html lang="ar" dir="rtl"><body><article><p>{body}</p></article></body></html>"#
    );

    let article = parse(&html).expect("article");
    assert_eq!(article.lang.as_deref(), Some("ar"));
    assert_eq!(article.dir.as_deref(), Some("rtl"));
}

#[test]
fn excerpt_falls_back_to_first_paragraph() {
    let body = lorem(600);
    let html = format!(
        "<html><body><article><p>{body}</p></article></body></html>"
    );

    let article = parse(&html).expect("article");
    let excerpt = article.excerpt.expect("excerpt");
    assert!(excerpt.starts_with("Lorem ipsum"));
}

#[test]
fn meta_description_beats_first_paragraph() {
    let body = lorem(600);
    let html = format!(
        r#"<html><head><meta name="description" content="The summary."></head>
        <body><article><p>{body}</p></article></body></html>"#
    );

    let article = parse(&html).expect("article");
    assert_eq!(article.excerpt.as_deref(), Some("The summary."));
}

#[test]
fn classes_stripped_by_default_but_kept_on_request() {
    let body = lorem(600);
    let html = format!(
        r#"<html><body><article><p class="lede">{body}</p></article></body></html>"#
    );

    let stripped = parse(&html).expect("article");
    assert!(!stripped.content.unwrap().contains("lede"));

    let opts = Options {
        keep_classes: true,
        ..Options::default()
    };
    let kept = parse_with_options(&html, &opts).expect("article");
    assert!(kept.content.unwrap().contains("lede"));
}

#[test]
fn classes_to_preserve_respected() {
    let body = lorem(600);
    let html = format!(
        r#"<html><body><article><p class="lede other">{body}</p></article></body></html>"#
    );
    let opts = Options {
        classes_to_preserve: vec!["lede".to_string()],
        ..Options::default()
    };

    let article = parse_with_options(&html, &opts).expect("article");
    let content = article.content.unwrap();
    assert!(content.contains(r#"class="lede""#));
    assert!(!content.contains("other"));
}

#[test]
fn max_elems_budget_enforced() {
    let html = "<html><body><article><p>text</p></article></body></html>";
    let opts = Options {
        max_elems_to_parse: 2,
        ..Options::default()
    };

    match parse_with_options(html, &opts) {
        Err(Error::TooManyElements { count, max }) => {
            assert!(count > 2);
            assert_eq!(max, 2);
        }
        other => panic!("expected TooManyElements, got {other:?}"),
    }
}

#[test]
fn empty_document_is_no_content() {
    match parse("<html><body></body></html>") {
        Err(Error::NoContent) => {}
        other => panic!("expected NoContent, got {other:?}"),
    }
}

#[test]
fn content_wrapped_in_page_container() {
    let body = lorem(600);
    let html = format!("<html><body><article><p>{body}</p></article></body></html>");

    let article = parse(&html).expect("article");
    let content = article.content.unwrap();
    assert!(content.contains(r#"id="readability-page-1""#));
    assert!(content.contains(r#"class="page""#));
}

#[test]
fn parse_is_deterministic() {
    let body = lorem(700);
    let html = format!(
        "<html><body><main><div><p>{body}</p><p>{body}</p></div></main>\
         <div class=\"related\"><a href=\"/x\">More stories</a></div></body></html>"
    );

    let first = parse(&html).expect("article");
    let second = parse(&html).expect("article");
    assert_eq!(first.content, second.content);
    assert_eq!(first.length, second.length);
}

#[test]
fn custom_serializer_used() {
    let body = lorem(600);
    let html = format!("<html><body><article><p>{body}</p></article></body></html>");
    let opts = Options {
        serializer: Some(|node| format!("serialized:{}", node.text().len())),
        ..Options::default()
    };

    let article = parse_with_options(&html, &opts).expect("article");
    assert!(article.content.unwrap().starts_with("serialized:"));
}

#[test]
fn h1_in_content_demoted() {
    let body = lorem(600);
    let html = format!(
        "<html><head><title>Page</title></head><body><article>\
         <h1>Some Inner Section Heading</h1><p>{body}</p></article></body></html>"
    );

    let article = parse(&html).expect("article");
    let content = article.content.unwrap();
    assert!(!content.contains("<h1"));
}

#[test]
fn parse_bytes_decodes_declared_charset() {
    let mut html: Vec<u8> = Vec::new();
    html.extend_from_slice(b"<html><head><meta charset=\"ISO-8859-1\"></head><body><article><p>");
    html.extend_from_slice(lorem(600).as_bytes());
    html.extend_from_slice(b" Caf\xE9.</p></article></body></html>");

    let article = rs_readerview::parse_bytes(&html).expect("article");
    assert!(article.text_content.unwrap().contains("Caf\u{E9}"));
}
