use tracing::{debug, warn};
use url::Url;

use super::{image_url, link_text};
use crate::output::ArticleRecord;
use crate::parser::dom::{Dom, Intent};
use crate::parser::rules::{AUTHOR_RULES, CARD_TITLE_ORDER, CATEGORY_RULES};

pub const MAX_ARTICLES: usize = 5;

/// Up to `MAX_ARTICLES` cards, in the order they appear on the page.
pub fn extract<D: Dom>(dom: &D, base: &Url, fallback_category: Option<&str>) -> Vec<ArticleRecord> {
    let cards = find_cards(dom);
    if cards.is_empty() {
        warn!("No article cards on listing page");
        return Vec::new();
    }
    debug!("{} article cards found", cards.len());

    cards
        .into_iter()
        .take(MAX_ARTICLES)
        .map(|card| {
            // Image-only headline anchors fall through to the next candidate
            let title = CARD_TITLE_ORDER
                .iter()
                .flat_map(|&intent| dom.find_all(card, intent))
                .map(|node| dom.text(node))
                .find(|text| !text.is_empty())
                .unwrap_or_default();
            let category = link_text(dom, card, CATEGORY_RULES);

            ArticleRecord {
                title,
                image_url: dom
                    .find_first(card, Intent::Image)
                    .map(|img| image_url(dom, img, base))
                    .unwrap_or_default(),
                category: match (category.is_empty(), fallback_category) {
                    (true, Some(fallback)) => fallback.to_string(),
                    _ => category,
                },
                author: link_text(dom, card, AUTHOR_RULES),
            }
        })
        .collect()
}

// Cards inside the main landmark; the whole document when there is none.
fn find_cards<D: Dom>(dom: &D) -> Vec<D::Node<'_>> {
    let root = dom.root();
    let in_main = dom
        .find_first(root, Intent::Main)
        .map(|main| dom.find_all(main, Intent::Article))
        .unwrap_or_default();
    if !in_main.is_empty() {
        return in_main;
    }
    dom.find_all(root, Intent::Article)
}
