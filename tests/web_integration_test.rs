//! Integration tests for the request-handling flow.
//!
//! These tests walk a request from its URI through typed parameter access to
//! the bad-request response a handler would send, and build the links a page
//! would render.

use cgi_core::{
    KeyedObfuscator, LabelKey, ParamError, ParameterAccessor, QueryParams, DEFAULT_SLUG_EXTENSION,
};
use http::StatusCode;

fn codec() -> KeyedObfuscator {
    KeyedObfuscator::builder(b"web integration secret")
        .label("art_id", LabelKey { length: 4, key: 0x00c0_ffee, mask: 0x5a5a_5a5a })
        .label("usr_id", LabelKey { length: 4, key: 0x0000_beef, mask: 0x1357_9bdf })
        .build()
        .unwrap()
}

struct ArticlePage {
    article: i64,
    page: i64,
    print: bool,
    back: String,
}

fn handle_article(uri: &str, codec: &KeyedObfuscator) -> Result<ArticlePage, ParamError> {
    let params = QueryParams::from_uri(uri);
    let cgi = ParameterAccessor::new(&params, codec).with_request_id("req-article");

    Ok(ArticlePage {
        article: cgi.get_man_id("art", "art_id", None)?,
        page: cgi.get_man_int("page", Some(1))?,
        print: cgi.get_man_bool("print", Some(false))?,
        back: cgi.get_man_url("back", Some("/articles"), true)?,
    })
}

fn article_link(codec: &KeyedObfuscator, article: i64, title: &str, print: bool) -> String {
    let empty = QueryParams::new();
    let cgi = ParameterAccessor::new(&empty, codec);

    format!(
        "{}/article{}{}{}",
        cgi.put_leader(),
        cgi.put_id("art", Some(article), "art_id").unwrap(),
        cgi.put_bool("print", Some(print), false),
        cgi.put_slug_name(Some(title), DEFAULT_SLUG_EXTENSION),
    )
}

#[test]
fn handler_reads_typed_parameters() {
    let codec = codec();
    let link = article_link(&codec, 1001, "Rust for CGI", false);
    let code = link
        .split('/')
        .nth(3)
        .expect("obfuscated id segment")
        .to_string();

    let uri = format!("/article?art={code}&page=3&print=yes&back=%2Farticles%3Fsort%3Dnew");
    let page = handle_article(&uri, &codec).expect("valid request");

    assert_eq!(page.article, 1001);
    assert_eq!(page.page, 3);
    assert!(page.print);
    assert_eq!(page.back, "/articles?sort=new");
}

#[test]
fn handler_applies_defaults() {
    let codec = codec();
    let code = article_link(&codec, 7, "x", false)
        .split('/')
        .nth(3)
        .expect("obfuscated id segment")
        .to_string();

    let page = handle_article(&format!("/article?art={code}&page="), &codec).expect("valid request");

    assert_eq!(page.article, 7);
    assert_eq!(page.page, 1);
    assert!(!page.print);
    assert_eq!(page.back, "/articles");
}

#[test]
fn missing_id_is_a_bad_request() {
    let codec = codec();
    let err = handle_article("/article?page=2", &codec).err().expect("art is mandatory");

    assert!(err.is_missing());
    assert_eq!(err.name(), "art");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.body(), "Missing query parameter 'art'.");
}

#[test]
fn foreign_id_is_a_bad_request() {
    let codec = codec();
    let empty = QueryParams::new();
    let cgi = ParameterAccessor::new(&empty, &codec);
    let user_segment = cgi.put_id("art", Some(1001), "usr_id").unwrap();

    let err = handle_article(&format!("/article?art={}", &user_segment[5..]), &codec)
        .err()
        .expect("user id must not decode as an article id");

    assert!(err.is_malformed());
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn open_redirect_is_a_bad_request() {
    let codec = codec();
    let code = article_link(&codec, 5, "x", false)
        .split('/')
        .nth(3)
        .expect("obfuscated id segment")
        .to_string();

    let err = handle_article(&format!("/article?art={code}&back=%2F%2Fevil.example"), &codec)
        .err()
        .expect("network-path redirect must be rejected");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body(),
        "Invalid query parameter 'back': not a relative URL."
    );
    assert!(!response.body().contains("evil"));
}

#[test]
fn links_are_built_from_segments() {
    let codec = codec();
    let link = article_link(&codec, 42, "Hello, World!", true);

    assert!(link.starts_with("/article/art/"));
    assert!(link.contains("/print/1/"));
    assert!(link.ends_with("/hello-world.html"));
}
