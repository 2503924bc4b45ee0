//! Structural HTML extraction
//!
//! The site markers this crate depends on (series identifier, episode
//! identifier, pagination links) are all read through two small capability
//! functions: pull a named attribute from the first element matching a CSS
//! selector, or count the elements matching one. Counting and orchestration
//! logic stays independent of any particular traversal mechanism.
//!
//! Both functions are synchronous and take the page text by reference:
//! `scraper`'s DOM values are not `Send`, so pages are fetched first and
//! parsed without holding any DOM value across an await point.

use crate::error::{Error, Result};
use scraper::{Html, Selector};

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Selector(format!("{selector}: {e}")))
}

/// Extract a named attribute from the first element matching `selector`.
///
/// Returns `Ok(None)` when no matching element carries the attribute;
/// callers decide whether that is an error for their stage.
pub fn extract_attr(html: &str, selector: &str, attribute: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let sel = parse_selector(selector)?;
    Ok(document
        .select(&sel)
        .find_map(|el| el.value().attr(attribute))
        .map(str::to_string))
}

/// Count the elements matching `selector` in a page.
pub fn count_elements(html: &str, selector: &str) -> Result<usize> {
    let document = Html::parse_document(html);
    let sel = parse_selector(selector)?;
    Ok(document.select(&sel).count())
}
