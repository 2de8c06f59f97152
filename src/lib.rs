//! # surface-navigator
//!
//! A composable router tree that turns semantic addresses (deep links,
//! universal links, in-app requests) into navigation on abstract UI
//! surfaces: single-slot windows, tab sets, stacks and split panes.
//!
//! ## Pieces
//!
//! - [`Address`] / [`AddressParser`]: a navigation target: an identifier plus
//!   [`Parameters`], parsed from `scheme://identifier?query` or
//!   `https://host/identifier?query`.
//! - [`NavigationSurface`]: the host toolkit's view of one UI region,
//!   tagged with a [`SurfaceKind`].
//! - [`Resolver`]: per-node leaf behaviour mapping addresses to a
//!   [`NavigationAction`]. [`RouteTable`] covers the common case.
//! - [`Router`]: a tree node owning one surface, an optional resolver and
//!   child nodes, exactly zero or one of them active.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::rc::Rc;
//! use surface_navigator::*;
//!
//! let mut root: Router<ScreenId> = Router::builder(Rc::new(tab_bar)).build();
//! root.add(
//!     Router::builder(Rc::new(inbox_stack))
//!         .resolver(
//!             RouteTable::new(ScreenId::Inbox)
//!                 .route("message", |a| NavigationAction::push(ScreenId::message(a)))
//!         )
//!         .build(),
//! );
//!
//! let parser = AddressParser::new().app_scheme("mail");
//! if let Some(address) = parser.parse("mail://message?id=42") {
//!     root.handle(&address, None);
//! }
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the `log` crate by default, or `tracing` with the
//! `tracing` feature. See [`logging`].

pub mod action;
pub mod address;
pub mod error;
pub mod logging;
pub mod options;
pub mod params;
pub mod resolver;
pub mod router;
pub mod surface;

pub use action::NavigationAction;
pub use address::{
    Address, AddressFamily, AddressParser, ALERT_PARAMETER, APP_ALERT, INDEX_PARAMETER,
    SPLIT_DETAILS_AT_INDEX,
};
pub use error::{HandleResult, NavigationError};
pub use options::{BusyPolicy, RouterOptions};
pub use params::{ParamValue, Parameters, Payload};
pub use resolver::{ActionFn, ContentFn, Resolver, RouteTable};
pub use router::{Router, RouterBuilder, RouterId, Routing};
pub use surface::{
    complete, Completion, Content, NavigationSurface, SlotTransition, SurfaceKind,
    SurfaceObserver,
};
