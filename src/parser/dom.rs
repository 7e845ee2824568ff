use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static MAIN_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("main").unwrap());
static ARTICLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static BODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());
static LINK_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static IMAGE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

// Index n holds the selector for h1..=h(n+1)
static HEADING_SELS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    (1..=6)
        .map(|n| Selector::parse(&heading_list(n, "")).unwrap())
        .collect()
});
static HEADING_LINK_SELS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    (1..=6)
        .map(|n| Selector::parse(&heading_list(n, " a")).unwrap())
        .collect()
});

fn heading_list(max_level: u8, suffix: &str) -> String {
    (1..=max_level)
        .map(|l| format!("h{}{}", l, suffix))
        .collect::<Vec<_>>()
        .join(", ")
}

/// What an element is for, independent of how a page styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Main,
    Article,
    Body,
    /// Any heading from h1 down to `max_level`.
    Heading { max_level: u8 },
    /// An anchor nested in a heading from h1 down to `max_level`.
    HeadingLink { max_level: u8 },
    /// An anchor carrying an href.
    Link,
    /// Any anchor, with or without an href.
    Anchor,
    Image,
}

impl Intent {
    fn selector(self) -> &'static Selector {
        let level_idx = |max_level: u8| usize::from(max_level.clamp(1, 6) - 1);
        match self {
            Intent::Main => &*MAIN_SEL,
            Intent::Article => &*ARTICLE_SEL,
            Intent::Body => &*BODY_SEL,
            Intent::Heading { max_level } => &HEADING_SELS[level_idx(max_level)],
            Intent::HeadingLink { max_level } => &HEADING_LINK_SELS[level_idx(max_level)],
            Intent::Link => &*LINK_SEL,
            Intent::Anchor => &*ANCHOR_SEL,
            Intent::Image => &*IMAGE_SEL,
        }
    }
}

/// Read-only query surface over a rendered document.
///
/// Lookups are scoped to the descendants of a node and return matches in
/// document order, so extraction logic can run against any tree that
/// implements this, real markup or a hand-built fake.
pub trait Dom {
    type Node<'a>: Copy
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;

    fn find_all<'a>(&'a self, scope: Self::Node<'a>, intent: Intent) -> Vec<Self::Node<'a>>;

    fn find_first<'a>(&'a self, scope: Self::Node<'a>, intent: Intent) -> Option<Self::Node<'a>> {
        self.find_all(scope, intent).into_iter().next()
    }

    fn attribute<'a>(&'a self, node: Self::Node<'a>, name: &str) -> Option<&'a str>;

    /// Visible text with runs of whitespace collapsed to one space.
    fn text<'a>(&'a self, node: Self::Node<'a>) -> String;
}

/// `Dom` over a parsed HTML document.
pub struct HtmlDom {
    doc: Html,
}

impl HtmlDom {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }
}

impl Dom for HtmlDom {
    type Node<'a> = ElementRef<'a>;

    fn root(&self) -> ElementRef<'_> {
        self.doc.root_element()
    }

    fn find_all<'a>(&'a self, scope: ElementRef<'a>, intent: Intent) -> Vec<ElementRef<'a>> {
        scope.select(intent.selector()).collect()
    }

    fn find_first<'a>(&'a self, scope: ElementRef<'a>, intent: Intent) -> Option<ElementRef<'a>> {
        scope.select(intent.selector()).next()
    }

    fn attribute<'a>(&'a self, node: ElementRef<'a>, name: &str) -> Option<&'a str> {
        node.value().attr(name)
    }

    fn text<'a>(&'a self, node: ElementRef<'a>) -> String {
        collapse_whitespace(&node.text().collect::<String>())
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <html><body>
          <header><h1>Site name</h1></header>
          <main>
            <h2>  Section
               heading </h2>
            <article>
              <h2><a href="/a/1">First <b>story</b></a></h2>
              <img src="/one.jpg">
            </article>
            <article>
              <h3><a href="/a/2">Second</a></h3>
            </article>
          </main>
        </body></html>"#;

    #[test]
    fn scoped_lookup_respects_landmark() {
        let dom = HtmlDom::parse(SAMPLE);
        let main = dom.find_first(dom.root(), Intent::Main).unwrap();
        let h1 = dom.find_first(main, Intent::Heading { max_level: 1 });
        assert!(h1.is_none());
        let h1_anywhere = dom.find_first(dom.root(), Intent::Heading { max_level: 1 }).unwrap();
        assert_eq!(dom.text(h1_anywhere), "Site name");
    }

    #[test]
    fn text_collapses_whitespace() {
        let dom = HtmlDom::parse(SAMPLE);
        let main = dom.find_first(dom.root(), Intent::Main).unwrap();
        let h2 = dom.find_first(main, Intent::Heading { max_level: 2 }).unwrap();
        assert_eq!(dom.text(h2), "Section heading");
    }

    #[test]
    fn heading_link_levels() {
        let dom = HtmlDom::parse(SAMPLE);
        let h2_links = dom.find_all(dom.root(), Intent::HeadingLink { max_level: 2 });
        assert_eq!(h2_links.len(), 1);
        assert_eq!(dom.text(h2_links[0]), "First story");
        let h3_links = dom.find_all(dom.root(), Intent::HeadingLink { max_level: 3 });
        assert_eq!(h3_links.len(), 2);
    }

    #[test]
    fn articles_in_document_order() {
        let dom = HtmlDom::parse(SAMPLE);
        let cards = dom.find_all(dom.root(), Intent::Article);
        assert_eq!(cards.len(), 2);
        let img = dom.find_first(cards[0], Intent::Image).unwrap();
        assert_eq!(dom.attribute(img, "src"), Some("/one.jpg"));
        assert!(dom.find_first(cards[1], Intent::Image).is_none());
    }

    #[test]
    fn fake_dom_scoping() {
        let mut dom = fake::FakeDom::new();
        let body = dom.add(0, "body", &[], "");
        let main = dom.add(body, "main", &[], "");
        let h1 = dom.add(main, "h1", &[], "Title");
        dom.add(body, "img", &[("src", "x.jpg")], "");

        assert_eq!(dom.find_first(dom.root(), Intent::Main), Some(main));
        assert_eq!(dom.find_first(main, Intent::Heading { max_level: 1 }), Some(h1));
        assert!(dom.find_first(main, Intent::Image).is_none());
        assert_eq!(dom.text(main), "Title");
    }
}
