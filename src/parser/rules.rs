use std::sync::LazyLock;

use url::Url;

use super::dom::{Dom, Intent};

static RELATIVE_BASE: LazyLock<Url> = LazyLock::new(|| Url::parse("http://localhost/").unwrap());

/// Where to look for the main content, most specific first.
pub const CONTAINER_ORDER: &[Intent] = &[Intent::Main, Intent::Article, Intent::Body];

/// Where a card keeps its headline.
pub const CARD_TITLE_ORDER: &[Intent] = &[Intent::HeadingLink { max_level: 2 }, Intent::Anchor];

/// The attributes of an anchor a rule may look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkView<'a> {
    pub href: Option<&'a str>,
    pub class: Option<&'a str>,
}

impl<'a> LinkView<'a> {
    pub fn of<D: Dom>(dom: &'a D, node: D::Node<'a>) -> Self {
        Self {
            href: dom.attribute(node, "href"),
            class: dom.attribute(node, "class"),
        }
    }
}

pub struct Rule {
    pub name: &'static str,
    pub test: fn(&LinkView) -> bool,
}

pub const AUTHOR_RULES: &[Rule] = &[Rule {
    name: "author-path",
    test: |l| href_has_segment(l, "author"),
}];

pub const CATEGORY_RULES: &[Rule] = &[
    Rule {
        name: "tag-path",
        test: |l| href_has_segment(l, "tag"),
    },
    Rule {
        name: "category-path",
        test: |l| href_has_segment(l, "category"),
    },
    Rule {
        name: "tag-class",
        test: |l| l.class.is_some_and(|c| c.contains("tag")),
    },
    Rule {
        name: "category-class",
        test: |l| l.class.is_some_and(|c| c.contains("category")),
    },
];

/// First link in document order accepted by any rule, with the rule that fired.
pub fn first_match<'a, D: Dom>(
    dom: &'a D,
    links: &[D::Node<'a>],
    rules: &[Rule],
) -> Option<(&'static str, D::Node<'a>)> {
    links.iter().find_map(|&link| {
        let view = LinkView::of(dom, link);
        rules
            .iter()
            .find(|rule| (rule.test)(&view))
            .map(|rule| (rule.name, link))
    })
}

fn href_has_segment(link: &LinkView, segment: &str) -> bool {
    link.href
        .and_then(href_path)
        .is_some_and(|path| path.split('/').any(|s| s.eq_ignore_ascii_case(segment)))
}

/// Path component of an absolute or relative href, without query or fragment.
fn href_path(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let url = Url::parse(href).or_else(|_| RELATIVE_BASE.join(href)).ok()?;
    Some(url.path().to_string())
}
