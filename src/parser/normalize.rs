use tracing::debug;
use url::Url;

const THUMBNAIL_ENDPOINT: &str = "/thumb.php";
const THUMBNAIL_PARAM: &str = "src";

/// Where an image element may keep its reference.
#[derive(Debug, Clone, Copy)]
enum Source {
    Direct(&'static str),
    /// A responsive "URL descriptor, URL descriptor" list.
    Descriptors(&'static str),
}

const SOURCES: &[Source] = &[
    Source::Direct("src"),
    Source::Direct("data-src"),
    Source::Direct("data-original"),
    Source::Direct("data-lazy"),
    Source::Descriptors("srcset"),
    Source::Descriptors("data-srcset"),
];

/// Resolve an image element to one absolute URL, or an empty string when
/// none of its source attributes holds a usable reference.
pub fn normalize_image<'a>(base: &Url, attr: impl Fn(&str) -> Option<&'a str>) -> String {
    for source in SOURCES {
        let (name, raw) = match *source {
            Source::Direct(name) => (name, attr(name)),
            Source::Descriptors(name) => (name, attr(name).and_then(first_descriptor_url)),
        };
        let Some(raw) = raw.map(str::trim).filter(|r| is_usable(r)) else {
            continue;
        };
        if let Some(absolute) = resolve_reference(base, raw) {
            debug!("image reference from {}: {}", name, raw);
            return unwrap_thumbnail(&absolute);
        }
    }
    String::new()
}

/// URL of the first entry in a descriptor list. Later entries never win.
pub fn first_descriptor_url(list: &str) -> Option<&str> {
    list.split(',').next()?.split_whitespace().next()
}

/// Absolute form of `raw`. Already-absolute input comes back verbatim.
pub fn resolve_reference(base: &Url, raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if Url::parse(raw).is_ok() {
        return Some(raw.to_string());
    }
    base.join(raw).ok().map(String::from)
}

/// The embedded target of a thumbnail-proxy URL, else `url` unchanged.
/// Only one level of wrapping is removed.
pub fn unwrap_thumbnail(url: &str) -> String {
    let Ok(wrapper) = Url::parse(url) else {
        return url.to_string();
    };
    if !wrapper.path().ends_with(THUMBNAIL_ENDPOINT) {
        return url.to_string();
    }
    let target = wrapper
        .query_pairs()
        .find(|(k, _)| k == THUMBNAIL_PARAM)
        .map(|(_, v)| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let Some(target) = target else {
        return url.to_string();
    };
    if Url::parse(&target).is_ok() {
        return target;
    }
    // Some proxies encode the parameter twice
    let target = urlencoding::decode(&target)
        .map(|d| d.trim().to_string())
        .unwrap_or(target);
    if Url::parse(&target).is_ok() {
        return target;
    }
    wrapper
        .join(&target)
        .map(String::from)
        .unwrap_or_else(|_| url.to_string())
}

// Lazy-load placeholders are inline data URIs, not references.
fn is_usable(raw: &str) -> bool {
    !raw.is_empty() && !raw.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:"))
}
