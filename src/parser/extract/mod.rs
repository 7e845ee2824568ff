pub mod articles;
pub mod cartoon;

use tracing::debug;
use url::Url;

use super::dom::{Dom, Intent};
use super::normalize::normalize_image;
use super::rules::{first_match, Rule};

fn text_or_empty<'a, D: Dom>(dom: &'a D, node: Option<D::Node<'a>>) -> String {
    node.map(|n| dom.text(n)).unwrap_or_default()
}

fn image_url<'a, D: Dom>(dom: &'a D, img: D::Node<'a>, base: &Url) -> String {
    normalize_image(base, |name| dom.attribute(img, name))
}

/// Text of the first anchor under `scope`, in document order, that any of `rules` accepts.
fn link_text<'a, D: Dom>(dom: &'a D, scope: D::Node<'a>, rules: &[Rule]) -> String {
    let links = dom.find_all(scope, Intent::Anchor);
    match first_match(dom, &links, rules) {
        Some((rule, node)) => {
            debug!("link matched by {}", rule);
            dom.text(node)
        }
        None => String::new(),
    }
}

// ── Tests ──
