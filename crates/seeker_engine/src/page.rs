use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::decode::{decode_html, DecodeError};
use crate::text::visible_text;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("invalid page url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// One element of a page snapshot.
pub trait PageElement: Sized {
    fn tag_name(&self) -> String;
    fn attribute(&self, name: &str) -> Option<String>;
    /// Visible text, trimmed, with block boundaries as newlines.
    fn text(&self) -> String;
    fn parent(&self) -> Option<Self>;
    /// Descendants matching `selector`, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self>, PageError>;
}

/// An immutable, queryable view of a loaded page.
pub trait PageSnapshot {
    type Element<'a>: PageElement
    where
        Self: 'a;

    /// URL the page was loaded from; its origin roots relative links.
    fn page_url(&self) -> &Url;
    /// Elements matching `selector`, in document order.
    fn query(&self, selector: &str) -> Result<Vec<Self::Element<'_>>, PageError>;
    /// Raw text of every embedded JSON script tag.
    fn script_payloads(&self) -> Vec<String>;
}

/// First element matching `selector`, if any.
pub fn first<'a, P: PageSnapshot>(
    page: &'a P,
    selector: &str,
) -> Result<Option<P::Element<'a>>, PageError> {
    Ok(page.query(selector)?.into_iter().next())
}

/// Visible text of the document body, empty when the page has none.
pub fn body_text<P: PageSnapshot>(page: &P) -> Result<String, PageError> {
    Ok(first(page, "body")?.map(|body| body.text()).unwrap_or_default())
}

/// `content` attribute of `<meta name="{name}">`, empty when absent.
pub fn meta_content<P: PageSnapshot>(page: &P, name: &str) -> Result<String, PageError> {
    let selector = format!("meta[name=\"{name}\"]");
    Ok(first(page, &selector)?
        .and_then(|meta| meta.attribute("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default())
}

/// Text of the document `<title>`, empty when absent.
pub fn document_title<P: PageSnapshot>(page: &P) -> Result<String, PageError> {
    Ok(first(page, "title")?.map(|title| title.text()).unwrap_or_default())
}

fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|err| PageError::InvalidSelector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

/// Page snapshot backed by a parsed HTML document.
pub struct HtmlPage {
    document: Html,
    url: Url,
}

impl HtmlPage {
    pub fn parse(html: &str, page_url: &str) -> Result<Self, PageError> {
        let url = Url::parse(page_url).map_err(|err| PageError::InvalidUrl {
            url: page_url.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            document: Html::parse_document(html),
            url,
        })
    }

    pub fn from_bytes(
        bytes: &[u8],
        content_type: Option<&str>,
        page_url: &str,
    ) -> Result<Self, PageError> {
        let decoded = decode_html(bytes, content_type)?;
        Self::parse(&decoded.html, page_url)
    }
}

impl PageSnapshot for HtmlPage {
    type Element<'a> = HtmlElement<'a>;

    fn page_url(&self) -> &Url {
        &self.url
    }

    fn query(&self, selector: &str) -> Result<Vec<HtmlElement<'_>>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(self.document.select(&selector).map(HtmlElement).collect())
    }

    fn script_payloads(&self) -> Vec<String> {
        let Ok(scripts) = self.query("script") else {
            return Vec::new();
        };
        scripts
            .into_iter()
            .filter(|script| {
                script
                    .attribute("type")
                    .is_some_and(|kind| kind.to_ascii_lowercase().contains("json"))
            })
            .map(|script| script.0.text().collect::<String>())
            .filter(|payload| !payload.trim().is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HtmlElement<'a>(ElementRef<'a>);

impl PageElement for HtmlElement<'_> {
    fn tag_name(&self) -> String {
        self.0.value().name().to_ascii_lowercase()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.value().attr(name).map(ToOwned::to_owned)
    }

    fn text(&self) -> String {
        visible_text(self.0)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().and_then(ElementRef::wrap).map(HtmlElement)
    }

    fn query(&self, selector: &str) -> Result<Vec<Self>, PageError> {
        let selector = parse_selector(selector)?;
        Ok(self.0.select(&selector).map(HtmlElement).collect())
    }
}
