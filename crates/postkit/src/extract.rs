//! Representative image extraction
//!
//! Tries, in order, and returns the first hit:
//! 1. The Open Graph `og:image` meta tag, resolved against the page URL
//! 2. The first `<img>` whose alt text mentions "logo", resolved
//! 3. The first `<img>` declared larger than 100x100, `src` taken as-is
//!
//! An empty string means "nothing suitable"; the caller then falls back to
//! an image search.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// Minimum declared width and height (exclusive) for the large-image rule
const MIN_IMAGE_SIDE: u32 = 100;

/// Find the best image URL in a page
pub fn find_image_url(html: &str, base_url: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    if let Some(url) = open_graph_image(&document, base.as_ref()) {
        debug!(url, "Using Open Graph image");
        return url;
    }

    if let Some(url) = logo_image(&document, base.as_ref()) {
        debug!(url, "Using logo image");
        return url;
    }

    if let Some(url) = large_image(&document) {
        debug!(url, "Using first large image");
        return url;
    }

    debug!("No suitable image found");
    String::new()
}

fn open_graph_image(document: &Html, base: Option<&Url>) -> Option<String> {
    let selector = Selector::parse(r#"meta[property="og:image"], meta[name="og:image"]"#).ok()?;
    document
        .select(&selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(|content| resolve(base, content))
}

fn logo_image(document: &Html, base: Option<&Url>) -> Option<String> {
    let selector = Selector::parse("img[alt]").ok()?;
    document
        .select(&selector)
        .filter(|img| {
            img.value()
                .attr("alt")
                .is_some_and(|alt| alt.to_lowercase().contains("logo"))
        })
        .filter_map(|img| non_empty_attr(&img, "src"))
        .next()
        .map(|src| resolve(base, src))
}

fn large_image(document: &Html) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    document
        .select(&selector)
        .filter(|img| {
            let side = |name| {
                img.value()
                    .attr(name)
                    .and_then(|v: &str| v.trim().parse::<u32>().ok())
            };
            matches!(
                (side("width"), side("height")),
                (Some(w), Some(h)) if w > MIN_IMAGE_SIDE && h > MIN_IMAGE_SIDE
            )
        })
        .filter_map(|img| non_empty_attr(&img, "src"))
        .next()
        .map(str::to_string)
}

fn non_empty_attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Resolve a possibly relative reference against the page URL
fn resolve(base: Option<&Url>, reference: &str) -> String {
    match base.and_then(|b| b.join(reference).ok()) {
        Some(url) => url.to_string(),
        None => reference.to_string(),
    }
}
