use std::sync::LazyLock;

use url::Url;

/// Base used for relative hrefs until [`Link::document_url`] names the page.
const PLACEHOLDER_DOCUMENT: &str = "https://document.invalid/";

static PLACEHOLDER_BASE: LazyLock<Option<Url>> =
    LazyLock::new(|| Url::parse(PLACEHOLDER_DOCUMENT).ok());

/// A resolved link URL.
///
/// Resolution follows the URL Standard through [`url::Url`]: dot segments are
/// removed, `\` counts as `/` in `http(s)` URLs, default ports are dropped
/// and scheme and host are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Href {
    url: Url,
}

impl Href {
    /// Parse an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns the [`url::ParseError`] for relative or malformed input.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        Self::resolve(None, href)
    }

    /// Resolve `href` against `base`, the way the host resolves an anchor's
    /// `href` attribute.
    ///
    /// # Errors
    ///
    /// Returns the [`url::ParseError`] when `href` cannot be resolved.
    pub fn resolve(base: Option<&Url>, href: &str) -> Result<Self, url::ParseError> {
        Url::options()
            .base_url(base)
            .parse(href)
            .map(|url| Self { url })
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// True for `http` and `https` URLs, the only ones that can be fetched
    /// speculatively.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// `scheme://host[:port]` with the default port omitted. `null` for
    /// opaque origins such as `mailto:`.
    #[must_use]
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    #[must_use]
    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Query string without the leading `?`.
    #[must_use]
    pub fn search(&self) -> &str {
        self.url.query().unwrap_or("")
    }

    /// Fragment without the leading `#`.
    #[must_use]
    pub fn hash(&self) -> &str {
        self.url.fragment().unwrap_or("")
    }
}

/// An element in the page: a tag name and its attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value. Names are
    /// case-insensitive.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a class to the `class` attribute.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        let joined = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_owned(),
        };
        self.set_attr("class", &joined);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value.to_owned(),
            None => self.attributes.push((name, value.to_owned())),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or("").split_ascii_whitespace()
    }
}

/// A candidate link: the URL it points to, the anchor element carrying it and
/// the anchor's ancestors, nearest first.
///
/// The href is resolved against the URL of the page containing the link. A
/// placeholder page is assumed until [`document_url`](Self::document_url)
/// sets the real one, so relative hrefs are same-origin by default.
///
/// # Example
///
/// ```
/// use specrules::{Element, Link};
///
/// let link = Link::new("/goals/./list/../")
///     .attr("data-no-prefetch", "")
///     .ancestor(Element::new("nav").class("primary"));
/// assert_eq!(link.href().map(|h| h.pathname()), Some("/goals/"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    raw: String,
    document: Option<Url>,
    href: Option<Href>,
    element: Element,
    ancestors: Vec<Element>,
}

impl Link {
    /// A link carried by an `<a href=...>` element with no other attributes.
    #[must_use]
    pub fn new(href: &str) -> Self {
        let document = PLACEHOLDER_BASE.clone();
        Self {
            raw: href.to_owned(),
            href: Href::resolve(document.as_ref(), href).ok(),
            document,
            element: Element::new("a").attr("href", href),
            ancestors: Vec::new(),
        }
    }

    /// Use `element` as the anchor. Its `href` attribute is left as given.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    /// Set an attribute on the anchor element.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.set_attr(name, value);
        self
    }

    /// Add a class to the anchor element.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.element = self.element.class(class);
        self
    }

    /// Push the next ancestor outward from the anchor.
    #[must_use]
    pub fn ancestor(mut self, element: Element) -> Self {
        self.ancestors.push(element);
        self
    }

    /// URL of the page containing the link, e.g. `https://app.example/goals`.
    /// The href is resolved again against it. An unparseable document URL
    /// leaves relative hrefs unresolved and no link same-origin.
    #[must_use]
    pub fn document_url(mut self, url: &str) -> Self {
        self.document = Url::parse(url).ok();
        self.href = Href::resolve(self.document.as_ref(), &self.raw).ok();
        self
    }

    /// The resolved href. `None` when it could not be resolved.
    #[must_use]
    pub fn href(&self) -> Option<&Href> {
        self.href.as_ref()
    }

    #[must_use]
    pub fn element(&self) -> &Element {
        &self.element
    }

    #[must_use]
    pub fn ancestors(&self) -> &[Element] {
        &self.ancestors
    }

    /// True when the resolved href is `http(s)` and shares the document's
    /// origin.
    #[must_use]
    pub fn is_same_origin(&self) -> bool {
        match (&self.href, &self.document) {
            (Some(href), Some(document)) => {
                href.is_http() && href.as_url().origin() == document.origin()
            }
            _ => false,
        }
    }
}
