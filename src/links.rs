/// URL building and parsing for the share page and the confirmation window
use crate::config::CONFIRM_PAGE;
use crate::tab_data::PendingArticle;
use url::Url;
use url::form_urlencoded;

/// Share page with `url` and `title` as percent-encoded query parameters
///
/// Examples:
/// - `https://curaq.app/share`, `https://example.com/a`, `Example`
///   → `https://curaq.app/share?url=https%3A%2F%2Fexample.com%2Fa&title=Example`
pub fn share_page_url(share_page: &str, url: &str, title: &str) -> Result<String, url::ParseError> {
    let mut share = Url::parse(share_page)?;
    share
        .query_pairs_mut()
        .clear()
        .append_pair("url", url)
        .append_pair("title", title);
    Ok(share.into())
}

/// Extension-relative path of the confirmation page for an article
pub fn confirm_page_path(url: &str, title: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", url)
        .append_pair("title", title)
        .finish();
    format!("{}?{}", CONFIRM_PAGE, query)
}

/// Read the article back out of the confirmation page's location.
/// A missing or empty `url` yields `None`; a missing title is empty.
pub fn article_from_query(href: &str) -> Option<PendingArticle> {
    let location = Url::parse(href).ok()?;

    let mut url = None;
    let mut title = String::new();
    for (key, value) in location.query_pairs() {
        match key.as_ref() {
            "url" => url = Some(value.into_owned()),
            "title" => title = value.into_owned(),
            _ => {}
        }
    }

    url.filter(|u| !u.is_empty())
        .map(|url| PendingArticle { url, title })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_page_url_basic() {
        assert_eq!(
            share_page_url("https://curaq.app/share", "https://example.com/a", "Example").unwrap(),
            "https://curaq.app/share?url=https%3A%2F%2Fexample.com%2Fa&title=Example"
        );
    }

    #[test]
    fn test_share_page_url_escapes_query_characters() {
        let url = share_page_url(
            "https://curaq.app/share",
            "https://example.com/search?q=rust&page=2",
            "Rust & WASM",
        )
        .unwrap();

        assert_eq!(
            url,
            "https://curaq.app/share?url=https%3A%2F%2Fexample.com%2Fsearch%3Fq%3Drust%26page%3D2&title=Rust+%26+WASM"
        );
    }

    #[test]
    fn test_share_page_url_empty_title() {
        assert_eq!(
            share_page_url("https://curaq.app/share", "https://example.com", "").unwrap(),
            "https://curaq.app/share?url=https%3A%2F%2Fexample.com&title="
        );
    }

    #[test]
    fn test_share_page_url_rejects_bad_base() {
        assert!(share_page_url("not a url", "https://example.com", "x").is_err());
    }

    #[test]
    fn test_confirm_page_path() {
        assert_eq!(
            confirm_page_path("https://example.com/a", "Example"),
            "confirm.html?url=https%3A%2F%2Fexample.com%2Fa&title=Example"
        );
    }

    #[test]
    fn test_article_from_query() {
        let href = "chrome-extension://abcdef/confirm.html?url=https%3A%2F%2Fexample.com%2Fa&title=Rust+%26+WASM";

        assert_eq!(
            article_from_query(href),
            Some(PendingArticle::new("https://example.com/a", "Rust & WASM"))
        );
    }

    #[test]
    fn test_article_from_query_percent_encoded_spaces() {
        // encodeURIComponent output uses %20 rather than +
        let href = "chrome-extension://abcdef/confirm.html?url=https%3A%2F%2Fexample.com&title=Hello%20World";

        assert_eq!(article_from_query(href).unwrap().title, "Hello World");
    }

    #[test]
    fn test_article_from_query_edge_cases() {
        assert_eq!(article_from_query("chrome-extension://abcdef/confirm.html"), None);
        assert_eq!(article_from_query("chrome-extension://abcdef/confirm.html?url=&title=x"), None);
        assert_eq!(
            article_from_query("chrome-extension://abcdef/confirm.html?url=https%3A%2F%2Fexample.com"),
            Some(PendingArticle::new("https://example.com", ""))
        );
        assert_eq!(article_from_query("not a url"), None);
    }
}
