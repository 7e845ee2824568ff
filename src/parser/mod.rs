pub mod dom;
pub mod extract;
pub mod normalize;
pub mod rules;

use anyhow::{Context, Result};
use url::Url;

use crate::output::{ArticleRecord, CartoonRecord};
use crate::session::Page;
use dom::HtmlDom;

/// Cartoon page → cartoon record.
pub fn process_cartoon(page: &Page) -> Result<CartoonRecord> {
    let base = page_base(page)?;
    let dom = HtmlDom::parse(&page.html);
    Ok(extract::cartoon::extract(&dom, &base))
}

/// Listing page → up to five article records.
pub fn process_entertainment(
    page: &Page,
    fallback_category: Option<&str>,
) -> Result<Vec<ArticleRecord>> {
    let base = page_base(page)?;
    let dom = HtmlDom::parse(&page.html);
    Ok(extract::articles::extract(&dom, &base, fallback_category))
}

fn page_base(page: &Page) -> Result<Url> {
    Url::parse(&page.url).with_context(|| format!("Invalid page URL {}", page.url))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, fixture: &str) -> Page {
        Page {
            url: url.to_string(),
            html: std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap(),
        }
    }

    #[test]
    fn resolves_against_final_page_url() {
        // Redirected to another host: relative references follow the final URL
        let p = page("https://www.ekantipur.com/news/cartoon", "no_main");
        let c = process_cartoon(&p).unwrap();
        assert_eq!(c.image_url, "https://www.ekantipur.com/uploads/cartoon.png");
    }

    #[test]
    fn rejects_unparseable_page_url() {
        let p = page("not a url", "empty");
        assert!(process_entertainment(&p, None).is_err());
    }

    #[test]
    fn schema_holds_for_empty_page() {
        let p = page("https://ekantipur.com/entertainment", "empty");
        assert!(process_entertainment(&p, None).unwrap().is_empty());
        assert_eq!(process_cartoon(&p).unwrap(), CartoonRecord::default());
    }
}
