use tracing::{debug, warn};
use url::Url;

use super::{image_url, link_text, text_or_empty};
use crate::output::CartoonRecord;
use crate::parser::dom::{Dom, Intent};
use crate::parser::rules::{AUTHOR_RULES, CONTAINER_ORDER};

pub fn extract<D: Dom>(dom: &D, base: &Url) -> CartoonRecord {
    let root = dom.root();
    let Some((intent, container)) = CONTAINER_ORDER
        .iter()
        .find_map(|&intent| dom.find_first(root, intent).map(|node| (intent, node)))
    else {
        warn!("No content container on cartoon page");
        return CartoonRecord::default();
    };
    debug!("cartoon container: {:?}", intent);

    let title = text_or_empty(dom, dom.find_first(container, Intent::Heading { max_level: 1 }));
    let image_url = dom
        .find_first(container, Intent::Image)
        .map(|img| image_url(dom, img, base))
        .unwrap_or_default();
    let cartoonist = link_text(dom, container, AUTHOR_RULES);

    CartoonRecord {
        title,
        image_url,
        cartoonist,
    }
}
