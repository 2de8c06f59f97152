//! Semantic addresses.
//!
//! An [`Address`] names where the application should go: a routable
//! `identifier` plus a flat [`Parameters`] bag. Addresses come from two URL
//! families that resolve to the same shape:
//!
//! | Family | Example | Identifier |
//! |--------|---------|------------|
//! | [`DeepLink`](AddressFamily::DeepLink) | `myapp://settings?tab=privacy` | host (`settings`) |
//! | [`UniversalLink`](AddressFamily::UniversalLink) | `https://example.com/settings?tab=privacy` | path without leading `/` |
//!
//! Addresses can also be built directly for synthetic intents that never
//! existed as a URL, such as [`Address::alert`] or [`Address::split_detail_at`].
//!
//! # Example
//!
//! ```
//! use surface_navigator::Address;
//!
//! let address = Address::parse("myapp://settings?tab=privacy", Some("myapp")).unwrap();
//! assert_eq!(address.identifier(), "settings");
//! assert_eq!(address.parameters().get_str("tab"), Some("privacy"));
//!
//! // Same scheme, but the parser is not told about it: not a web link either.
//! assert!(Address::parse("myapp://settings/privacy", Some("other")).is_none());
//! ```

use crate::params::{Parameters, Payload};
use crate::{debug_log, trace_log};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// Escaped when an identifier becomes a universal-link path. `/` stays literal.
const PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escaped when an identifier becomes a deep-link host.
const HOST_ESCAPES: &AsciiSet = &PATH_ESCAPES
    .add(b'/')
    .add(b':')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Identifier of the framework-level alert route.
///
/// The alert or action-sheet descriptor travels as a [`Payload`] under
/// [`ALERT_PARAMETER`].
pub const APP_ALERT: &str = "appAlert";

/// Parameter key holding the alert descriptor of an [`APP_ALERT`] address.
pub const ALERT_PARAMETER: &str = "alert";

/// Identifier of the structural "show detail pane at index" route.
///
/// Recognised by routers whose surface is a split pane, independent of any
/// resolver. The index travels under [`INDEX_PARAMETER`].
pub const SPLIT_DETAILS_AT_INDEX: &str = "split.details.at.index";

/// Parameter key holding the detail index of a [`SPLIT_DETAILS_AT_INDEX`] address.
pub const INDEX_PARAMETER: &str = "index";

/// The URL family an address was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    /// Custom application scheme; the host is the identifier.
    DeepLink,
    /// `http`/`https` link; the path is the identifier.
    UniversalLink,
}

/// A routable in-process address.
///
/// Equality and hashing only consider the identifier: two addresses with
/// the same identifier and different parameters are the same route.
#[derive(Debug, Clone)]
pub struct Address {
    identifier: String,
    parameters: Parameters,
}

impl Address {
    /// Build an address directly, bypassing URL parsing.
    pub fn new(identifier: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            identifier: identifier.into(),
            parameters,
        }
    }

    /// Build an address without parameters.
    pub fn named(identifier: impl Into<String>) -> Self {
        Self::new(identifier, Parameters::new())
    }

    /// Build an [`APP_ALERT`] address carrying `descriptor` as its payload.
    pub fn alert<T: 'static>(descriptor: T) -> Self {
        Self::new(
            APP_ALERT,
            Parameters::new().with(ALERT_PARAMETER, Payload::new(descriptor)),
        )
    }

    /// Build a [`SPLIT_DETAILS_AT_INDEX`] address for `index`.
    pub fn split_detail_at(index: usize) -> Self {
        Self::new(
            SPLIT_DETAILS_AT_INDEX,
            Parameters::new().with(INDEX_PARAMETER, index),
        )
    }

    /// Parse a URL string, treating `app_scheme` as the deep-link scheme.
    ///
    /// Shorthand for [`AddressParser`] with query transformation enabled.
    pub fn parse(raw: &str, app_scheme: Option<&str>) -> Option<Self> {
        let mut parser = AddressParser::new();
        if let Some(scheme) = app_scheme {
            parser = parser.app_scheme(scheme);
        }
        parser.parse(raw)
    }

    /// The routable key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The parameter bag.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Return `true` for the framework-level identifiers
    /// ([`APP_ALERT`], [`SPLIT_DETAILS_AT_INDEX`]).
    pub fn is_reserved(&self) -> bool {
        self.identifier == APP_ALERT || self.identifier == SPLIT_DETAILS_AT_INDEX
    }

    /// Format as a deep link, e.g. `myapp://settings?tab=privacy`.
    pub fn to_deep_link(&self, scheme: &str) -> String {
        with_query(
            format!(
                "{}://{}",
                scheme,
                utf8_percent_encode(&self.identifier, HOST_ESCAPES)
            ),
            &self.parameters,
        )
    }

    /// Format as a universal link below `origin`, e.g.
    /// `https://example.com/settings?tab=privacy`.
    pub fn to_universal_link(&self, origin: &str) -> String {
        with_query(
            format!(
                "{}/{}",
                origin.trim_end_matches('/'),
                utf8_percent_encode(&self.identifier, PATH_ESCAPES)
            ),
            &self.parameters,
        )
    }
}

fn with_query(mut base: String, parameters: &Parameters) -> String {
    let query = parameters.to_query_string();
    if !query.is_empty() {
        base.push('?');
        base.push_str(&query);
    }
    base
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Configurable URL → [`Address`] parser.
///
/// # Example
///
/// ```
/// use surface_navigator::{AddressFamily, AddressParser};
///
/// let parser = AddressParser::new().app_scheme("myapp").transform_query_items(false);
///
/// let (address, family) = parser.parse_with_family("https://example.com/inbox?id=4").unwrap();
/// assert_eq!(family, AddressFamily::UniversalLink);
/// assert_eq!(address.identifier(), "inbox");
/// assert!(address.parameters().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AddressParser {
    app_scheme: Option<String>,
    transform_query_items: bool,
}

impl AddressParser {
    /// Parser without an app scheme; only universal links resolve.
    pub fn new() -> Self {
        Self {
            app_scheme: None,
            transform_query_items: true,
        }
    }

    /// Set the custom scheme that marks deep links.
    pub fn app_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.app_scheme = Some(scheme.into());
        self
    }

    /// When `false`, parsed addresses always have empty parameters.
    pub fn transform_query_items(mut self, transform: bool) -> Self {
        self.transform_query_items = transform;
        self
    }

    /// Parse `raw`, returning `None` when it cannot be resolved.
    pub fn parse(&self, raw: &str) -> Option<Address> {
        self.parse_with_family(raw).map(|(address, _)| address)
    }

    /// Parse `raw` and report which family resolved it.
    pub fn parse_with_family(&self, raw: &str) -> Option<(Address, AddressFamily)> {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                debug_log!("Rejecting malformed address '{}': {}", raw, err);
                return None;
            }
        };
        self.resolve(&url)
    }

    /// Resolve an already parsed URL.
    pub fn resolve(&self, url: &Url) -> Option<(Address, AddressFamily)> {
        let is_deep_link = self
            .app_scheme
            .as_deref()
            .is_some_and(|scheme| url.scheme().eq_ignore_ascii_case(scheme));

        let (encoded, family) = if is_deep_link {
            (url.host_str().unwrap_or_default(), AddressFamily::DeepLink)
        } else {
            if !matches!(url.scheme(), "http" | "https") {
                trace_log!("'{}' is neither a deep link nor a web link", url);
                return None;
            }
            let path = url.path();
            (path.strip_prefix('/').unwrap_or(path), AddressFamily::UniversalLink)
        };

        if encoded.is_empty() {
            trace_log!("'{}' has no identifier for {:?} resolution", url, family);
            return None;
        }

        let identifier = match percent_decode_str(encoded).decode_utf8() {
            Ok(identifier) => identifier.into_owned(),
            Err(err) => {
                debug_log!("Rejecting '{}': identifier is not UTF-8 ({})", url, err);
                return None;
            }
        };

        let parameters = match url.query() {
            Some(query) if self.transform_query_items => Parameters::from_query(query),
            _ => Parameters::new(),
        };

        Some((Address::new(identifier, parameters), family))
    }
}

impl Default for AddressParser {
    fn default() -> Self {
        Self::new()
    }
}
