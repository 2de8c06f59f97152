//! Resolvers: per-node navigation behaviour.
//!
//! A [`Resolver`] answers three questions for the router node that owns it:
//! which addresses it claims, what [`NavigationAction`] each claimed address
//! maps to, and what content the node's surface starts with.
//!
//! A resolver must return a satisfiable action for every address it claims.
//! Returning [`NavigationAction::None`] for a claimed address is a resolver
//! defect and is reported as a contract violation by the router.
//!
//! For simple nodes, [`RouteTable`] maps identifiers to action closures:
//!
//! ```
//! use surface_navigator::{Address, NavigationAction, Resolver, RouteTable};
//!
//! let table = RouteTable::new("inbox")
//!     .route("message", |address| {
//!         match address.parameters().get_str("id") {
//!             Some("draft") => NavigationAction::present("composer"),
//!             _ => NavigationAction::push("message"),
//!         }
//!     })
//!     .route("inbox", |_| NavigationAction::PopToRoot { animated: true });
//!
//! assert!(table.can_handle(&Address::named("message")));
//! assert!(!table.can_handle(&Address::named("settings")));
//! assert_eq!(table.initial_content(), "inbox");
//! ```

use crate::action::NavigationAction;
use crate::address::Address;
use crate::router::Routing;
use crate::surface::Content;
use crate::trace_log;

/// Leaf behaviour attached to a router node.
pub trait Resolver<C: Content> {
    /// Check whether this resolver claims `address`.
    fn can_handle(&self, address: &Address) -> bool;

    /// The action to perform for a claimed `address`.
    fn navigation(&self, address: &Address) -> NavigationAction<C>;

    /// Content the owning surface is seeded with at construction.
    fn initial_content(&self) -> C;

    /// Check whether this resolver can build content for `address` without
    /// navigating, e.g. for embedding or previews.
    fn can_provide_content(&self, address: &Address) -> bool {
        let _ = address;
        false
    }

    /// Build content for `address`. `router` is the node owning this resolver.
    fn content_for(&self, address: &Address, router: &dyn Routing<C>) -> Option<C> {
        let _ = (address, router);
        None
    }
}

/// Function producing an action for an address.
pub type ActionFn<C> = Box<dyn Fn(&Address) -> NavigationAction<C>>;

/// Function producing content for an address.
pub type ContentFn<C> = Box<dyn Fn(&Address) -> Option<C>>;

/// Resolver built from identifier → closure entries.
///
/// Entries are matched by exact identifier in registration order; the first
/// matching entry wins.
pub struct RouteTable<C> {
    initial: C,
    routes: Vec<(String, ActionFn<C>)>,
    providers: Vec<(String, ContentFn<C>)>,
}

impl<C: Content> RouteTable<C> {
    /// Create an empty table whose surface starts with `initial`.
    pub fn new(initial: C) -> Self {
        Self {
            initial,
            routes: Vec::new(),
            providers: Vec::new(),
        }
    }

    /// Claim `identifier`, mapping it to the action built by `action`.
    pub fn route<F>(mut self, identifier: impl Into<String>, action: F) -> Self
    where
        F: Fn(&Address) -> NavigationAction<C> + 'static,
    {
        self.routes.push((identifier.into(), Box::new(action)));
        self
    }

    /// Provide content for `identifier` through [`Resolver::content_for`].
    pub fn provide<F>(mut self, identifier: impl Into<String>, provider: F) -> Self
    where
        F: Fn(&Address) -> Option<C> + 'static,
    {
        self.providers.push((identifier.into(), Box::new(provider)));
        self
    }

    /// Number of claimed identifiers.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table claims nothing.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn action_for(&self, address: &Address) -> Option<&ActionFn<C>> {
        self.routes
            .iter()
            .find(|(identifier, _)| identifier == address.identifier())
            .map(|(_, action)| action)
    }

    fn provider_for(&self, address: &Address) -> Option<&ContentFn<C>> {
        self.providers
            .iter()
            .find(|(identifier, _)| identifier == address.identifier())
            .map(|(_, provider)| provider)
    }
}

impl<C: Content> Resolver<C> for RouteTable<C> {
    fn can_handle(&self, address: &Address) -> bool {
        self.action_for(address).is_some()
    }

    fn navigation(&self, address: &Address) -> NavigationAction<C> {
        match self.action_for(address) {
            Some(action) => action(address),
            None => {
                trace_log!("Route table has no entry for '{}'", address);
                NavigationAction::None
            }
        }
    }

    fn initial_content(&self) -> C {
        self.initial.clone()
    }

    fn can_provide_content(&self, address: &Address) -> bool {
        self.provider_for(address).is_some()
    }

    fn content_for(&self, address: &Address, _router: &dyn Routing<C>) -> Option<C> {
        self.provider_for(address).and_then(|provider| provider(address))
    }
}

impl<C: Content> std::fmt::Debug for RouteTable<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("initial", &self.initial)
            .field(
                "routes",
                &self.routes.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
