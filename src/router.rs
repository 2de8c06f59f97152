//! The router tree.
//!
//! A [`Router`] owns one [`NavigationSurface`], an optional [`Resolver`],
//! and an ordered list of child nodes, at most one of which is *active*.
//! The chain of active children from the root down is the app's current
//! focus path.
//!
//! # Dispatch
//!
//! [`Router::can_handle`] asks, in order: the split-pane detail route (for
//! split-pane nodes), the node's own resolver, the active child, then every
//! child in insertion order.
//!
//! [`Router::handle`] routes an address:
//!
//! 1. If the active child claims it, delegate.
//! 2. Otherwise take the first child that claims it. A passive child handles
//!    it without becoming active. Any other child becomes active and the
//!    address is dispatched once more, now reaching step 1.
//! 3. Otherwise, if the node's resolver claims it, perform the resolver's
//!    [`NavigationAction`] on the surface.
//! 4. Otherwise nothing happens ([`HandleResult::Unhandled`]).
//!
//! # Active transitions
//!
//! Changing the active child to a different node runs one fixed sequence:
//! the new child's [`did_become_active_after_invalidation`](Routing::did_become_active_after_invalidation)
//! hook, then surface reconciliation according to [`SurfaceKind`]:
//!
//! | Surface | Reconciliation |
//! |---------|----------------|
//! | single slot | show the child's root content |
//! | tab set | select the child's tab index |
//! | split pane | show the detail registered at the child's index |
//! | stack / content | nothing |
//!
//! Re-selecting the current active child does nothing.

use crate::action::NavigationAction;
use crate::address::{Address, INDEX_PARAMETER, SPLIT_DETAILS_AT_INDEX};
use crate::error::{HandleResult, NavigationError};
use crate::options::{BusyPolicy, RouterOptions};
use crate::resolver::Resolver;
use crate::surface::{complete, Completion, Content, NavigationSurface, SurfaceKind, SurfaceObserver};
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ROUTER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a router node.
///
/// Only used to tell nodes apart; never used for addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouterId(u64);

impl RouterId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_ROUTER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RouterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Contract shared by every node of a router tree.
///
/// [`Router`] is the standard implementation. Custom nodes, such as an
/// overlay that answers alert addresses passively, implement this trait
/// directly and are added with [`Router::add`].
pub trait Routing<C: Content> {
    /// Stable identity of this node.
    fn id(&self) -> RouterId;

    /// A passive node handles addresses without ever becoming its parent's
    /// active child.
    fn is_passive(&self) -> bool {
        false
    }

    /// Whether this node's surface is the one currently visible.
    /// Re-evaluated on every call.
    fn is_active(&self) -> bool;

    /// Handle representing this node's surface inside its parent's surface.
    fn root_content(&self) -> Option<C>;

    /// Check whether this node or any descendant claims `address`.
    /// Must be free of side effects.
    fn can_handle(&self, address: &Address) -> bool;

    /// Route `address`. `completion` fires when the resulting navigation has
    /// completed; it is dropped without being called if nothing handles the
    /// address.
    fn handle(&mut self, address: &Address, completion: Option<Completion>) -> HandleResult;

    /// Called on a node right after its parent made it the active child.
    fn did_become_active_after_invalidation(&mut self);

    /// Re-derive this node's active child from its children's `is_active`.
    fn invalidate(&mut self) {}

    /// Content for `address` built by a resolver in this subtree.
    fn content_for(&self, address: &Address) -> Option<C> {
        let _ = address;
        None
    }
}

/// Whether a dispatch is the first one for a request or the single
/// re-dispatch after activating a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    First,
    Redispatch,
}

/// Composite router node.
///
/// # Example
///
/// ```ignore
/// use std::rc::Rc;
/// use surface_navigator::{Address, NavigationAction, RouteTable, Router};
///
/// let mut root = Router::builder(Rc::new(tabs)).build();
/// root.add(
///     Router::builder(Rc::new(home_stack))
///         .resolver(RouteTable::new(home).route("home", |_| NavigationAction::PopToRoot { animated: true }))
///         .build(),
/// );
/// root.add(
///     Router::builder(Rc::new(settings_stack))
///         .resolver(RouteTable::new(settings).route("settings", |_| NavigationAction::PopToRoot { animated: true }))
///         .build(),
/// );
///
/// root.handle(&Address::named("settings"), None); // selects the second tab
/// ```
pub struct Router<C: Content> {
    id: RouterId,
    passive: bool,
    is_active: Box<dyn Fn() -> bool>,
    resolver: Option<Box<dyn Resolver<C>>>,
    surface: Rc<dyn NavigationSurface<C>>,
    children: Vec<Box<dyn Routing<C>>>,
    active: Option<usize>,
    observers: Vec<Box<dyn SurfaceObserver<C>>>,
    options: RouterOptions,
    busy: Rc<Cell<bool>>,
}

/// Builder for [`Router`].
pub struct RouterBuilder<C: Content> {
    surface: Rc<dyn NavigationSurface<C>>,
    resolver: Option<Box<dyn Resolver<C>>>,
    is_active: Box<dyn Fn() -> bool>,
    passive: bool,
    options: RouterOptions,
}

impl<C: Content> RouterBuilder<C> {
    /// Attach leaf behaviour.
    pub fn resolver<R: Resolver<C> + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Predicate answering "is my surface the visible one". Defaults to never.
    pub fn active_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        self.is_active = Box::new(predicate);
        self
    }

    /// Make the node passive.
    pub fn passive(mut self) -> Self {
        self.passive = true;
        self
    }

    /// Replace the default options.
    pub fn options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the node, seeding a stack or tab-set surface with the
    /// resolver's initial content.
    pub fn build(self) -> Router<C> {
        let router = Router {
            id: RouterId::next(),
            passive: self.passive,
            is_active: self.is_active,
            resolver: self.resolver,
            surface: self.surface,
            children: Vec::new(),
            active: None,
            observers: Vec::new(),
            options: self.options,
            busy: Rc::new(Cell::new(false)),
        };

        if let Some(resolver) = &router.resolver {
            match router.surface.kind() {
                SurfaceKind::Stack | SurfaceKind::TabSet => {
                    router.surface.set_initial_content(resolver.initial_content());
                }
                SurfaceKind::SingleSlot | SurfaceKind::SplitPane | SurfaceKind::Content => {}
            }
        }

        debug_log!(
            "Created router {} on {} surface (passive: {}, resolver: {})",
            router.id,
            router.surface.kind(),
            router.passive,
            router.resolver.is_some()
        );
        router
    }
}

impl<C: Content> Router<C> {
    /// Start building a router that owns `surface`.
    pub fn builder<S>(surface: Rc<S>) -> RouterBuilder<C>
    where
        S: NavigationSurface<C> + 'static,
    {
        RouterBuilder {
            surface,
            resolver: None,
            is_active: Box::new(|| false),
            passive: false,
            options: RouterOptions::default(),
        }
    }

    /// Router with no resolver, never reporting itself active.
    pub fn new<S>(surface: Rc<S>) -> Self
    where
        S: NavigationSurface<C> + 'static,
    {
        Self::builder(surface).build()
    }

    /// This node's identity.
    pub fn id(&self) -> RouterId {
        self.id
    }

    /// Check if this node is passive.
    pub fn is_passive(&self) -> bool {
        self.passive
    }

    /// Evaluate the node's active predicate.
    pub fn is_active(&self) -> bool {
        (self.is_active)()
    }

    /// The surface this node drives.
    pub fn surface(&self) -> &Rc<dyn NavigationSurface<C>> {
        &self.surface
    }

    /// Child nodes in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &dyn Routing<C>> {
        self.children.iter().map(|child| child.as_ref())
    }

    /// Number of child nodes.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// The active child, if any.
    pub fn active_child(&self) -> Option<&dyn Routing<C>> {
        self.active.map(|index| self.children[index].as_ref())
    }

    /// Position of the active child among the children.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Check whether a resolver action of this node is still completing.
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Register an observer for tab-set selection events.
    pub fn add_observer<O: SurfaceObserver<C> + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Check whether this node or any descendant claims `address`.
    pub fn can_handle(&self, address: &Address) -> bool {
        if self.detail_route(address).is_some() {
            return true;
        }
        if self
            .resolver
            .as_ref()
            .is_some_and(|resolver| resolver.can_handle(address))
        {
            return true;
        }
        if self
            .active_child()
            .is_some_and(|child| child.can_handle(address))
        {
            return true;
        }
        let claimed = self.children.iter().any(|child| child.can_handle(address));
        if !claimed {
            trace_log!("Router {} does not claim '{}'", self.id, address);
        }
        claimed
    }

    /// Route `address` through this subtree.
    ///
    /// Returns [`HandleResult::Unhandled`] without touching any surface or
    /// active child when no node claims the address.
    pub fn handle(&mut self, address: &Address, completion: Option<Completion>) -> HandleResult {
        self.dispatch(address, completion, Pass::First)
    }

    fn dispatch(&mut self, address: &Address, completion: Option<Completion>, pass: Pass) -> HandleResult {
        if let Some((index, content)) = self.detail_route(address) {
            return self.show_detail(index, content, completion);
        }

        if let Some(index) = self.active {
            if self.children[index].can_handle(address) {
                debug_log!(
                    "Router {} delegating '{}' to active child {}",
                    self.id,
                    address,
                    self.children[index].id()
                );
                return self.children[index].handle(address, completion);
            }
        }

        if let Some(index) = self.children.iter().position(|child| child.can_handle(address)) {
            if self.children[index].is_passive() {
                debug_log!(
                    "Router {} handing '{}' to passive child {}",
                    self.id,
                    address,
                    self.children[index].id()
                );
                return self.children[index].handle(address, completion);
            }
            if pass == Pass::Redispatch {
                return self.violation(NavigationError::RedispatchRefused {
                    identifier: address.identifier().to_string(),
                });
            }
            let activated = self.transition_to(Some(index));
            if activated.is_rejected() {
                return activated;
            }
            return self.dispatch(address, completion, Pass::Redispatch);
        }

        let action = match &self.resolver {
            Some(resolver) if resolver.can_handle(address) => resolver.navigation(address),
            _ => {
                trace_log!("Router {} dropping unclaimed '{}'", self.id, address);
                return HandleResult::Unhandled;
            }
        };
        self.perform(address, action, completion)
    }

    fn perform(
        &mut self,
        address: &Address,
        action: NavigationAction<C>,
        completion: Option<Completion>,
    ) -> HandleResult {
        if action.is_none() {
            return self.violation(NavigationError::InvalidAction {
                identifier: address.identifier().to_string(),
            });
        }
        if self.busy.get() && self.options.busy_policy == BusyPolicy::Drop {
            warn_log!(
                "Router {} dropping '{}': previous action still in flight",
                self.id,
                address
            );
            return HandleResult::Busy;
        }

        info_log!(
            "Router {} performing {} for '{}'",
            self.id,
            action.name(),
            address
        );
        self.busy.set(true);
        let busy = Rc::clone(&self.busy);
        let finished: Completion = Box::new(move || {
            busy.set(false);
            complete(completion);
        });
        action.perform(&self.surface, Some(finished));
        HandleResult::Handled
    }

    // ========================================================================
    // Tree maintenance
    // ========================================================================

    /// Append a child node.
    ///
    /// - single slot: re-derive the active child
    /// - tab set: append the child's root content as a tab
    /// - split pane: register the child's root content as the next detail,
    ///   and make the child active if nothing is
    ///
    /// Tab and detail positions must match child positions, so a child
    /// without root content is refused by a tab set or split pane with
    /// [`NavigationError::MissingRootContent`].
    pub fn add<R: Routing<C> + 'static>(&mut self, router: R) -> HandleResult {
        self.add_boxed(Box::new(router))
    }

    /// [`add`](Self::add) for an already boxed node.
    pub fn add_boxed(&mut self, router: Box<dyn Routing<C>>) -> HandleResult {
        let index = self.children.len();
        let kind = self.surface.kind();
        let root = router.root_content();
        if root.is_none() && matches!(kind, SurfaceKind::TabSet | SurfaceKind::SplitPane) {
            return self.violation(NavigationError::MissingRootContent { index });
        }

        debug_log!("Router {} adding child {} at {}", self.id, router.id(), index);
        self.children.push(router);

        match kind {
            SurfaceKind::SingleSlot => self.invalidate(),
            SurfaceKind::TabSet => {
                if let Some(content) = root {
                    self.surface.append_tab(content);
                }
                HandleResult::Handled
            }
            SurfaceKind::SplitPane => {
                if let Some(content) = root {
                    self.surface.register_detail(content);
                }
                if self.active.is_none() {
                    return self.transition_to(Some(index));
                }
                HandleResult::Handled
            }
            SurfaceKind::Stack | SurfaceKind::Content => {
                trace_log!(
                    "{} surface of router {} does not select among children",
                    kind,
                    self.id
                );
                HandleResult::Handled
            }
        }
    }

    /// Make the first child reporting `is_active` the active child, or none.
    pub fn invalidate(&mut self) -> HandleResult {
        let next = self.children.iter().position(|child| child.is_active());
        self.transition_to(next)
    }

    /// Reset hook run when this node becomes its parent's active child.
    ///
    /// A stack dismisses presented content and pops to its root, without
    /// animation. A tab set or split pane re-derives its own active child.
    pub fn did_become_active_after_invalidation(&mut self) {
        match self.surface.kind() {
            SurfaceKind::Stack => {
                debug_log!("Router {} resetting stack to root", self.id);
                NavigationAction::PopOrDismissToRoot { animated: false }.perform(&self.surface, None);
            }
            SurfaceKind::TabSet | SurfaceKind::SplitPane => {
                let _ = self.invalidate();
            }
            SurfaceKind::SingleSlot | SurfaceKind::Content => {}
        }
    }

    /// The child whose root content equals `content`.
    pub fn router_for(&self, content: &C) -> Option<&dyn Routing<C>> {
        self.position_of(content)
            .map(|index| self.children[index].as_ref())
    }

    /// Content for `address`, searched in the same order as [`can_handle`](Self::can_handle).
    pub fn content_for(&self, address: &Address) -> Option<C> {
        if let Some(resolver) = &self.resolver {
            if resolver.can_provide_content(address) {
                return resolver.content_for(address, self);
            }
        }
        if let Some(content) = self.active_child().and_then(|child| child.content_for(address)) {
            return Some(content);
        }
        self.children.iter().find_map(|child| child.content_for(address))
    }

    // ========================================================================
    // Surface selection callbacks
    // ========================================================================

    /// Whether the user may select `content` on this node's tab set.
    ///
    /// Observers are asked first; the first definite answer wins. Without
    /// one, selection is allowed when the owning child reports active.
    pub fn should_select(&self, content: &C) -> bool {
        if let Some(answer) = self
            .observers
            .iter()
            .find_map(|observer| observer.should_select(content))
        {
            return answer;
        }
        self.router_for(content)
            .is_some_and(|child| child.is_active())
    }

    /// The user selected `content` on this node's surface: make its owner
    /// active, then notify observers.
    pub fn did_select(&mut self, content: &C) -> HandleResult {
        let Some(index) = self.position_of(content) else {
            return self.violation(NavigationError::UnknownContent {
                content: format!("{:?}", content),
            });
        };
        let selected = self.transition_to(Some(index));
        if selected.is_rejected() {
            return selected;
        }
        for observer in &self.observers {
            observer.did_select(content);
        }
        HandleResult::Handled
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn position_of(&self, content: &C) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.root_content().as_ref() == Some(content))
    }

    fn active_id(&self) -> Option<RouterId> {
        self.active.map(|index| self.children[index].id())
    }

    /// Index and registered detail content for a split-pane detail address.
    fn detail_route(&self, address: &Address) -> Option<(usize, C)> {
        if self.surface.kind() != SurfaceKind::SplitPane
            || address.identifier() != SPLIT_DETAILS_AT_INDEX
        {
            return None;
        }
        let index = address.parameters().get_as::<usize>(INDEX_PARAMETER)?;
        let content = self.surface.detail_at(index)?;
        Some((index, content))
    }

    fn show_detail(&mut self, index: usize, content: C, completion: Option<Completion>) -> HandleResult {
        if index >= self.children.len() {
            return self.violation(NavigationError::MissingChild { index });
        }
        if self.active_id() == Some(self.children[index].id()) {
            self.surface.update_detail_content(content, false, completion);
            return HandleResult::Handled;
        }
        self.activate(index, completion)
    }

    /// Change the active child.
    fn transition_to(&mut self, next: Option<usize>) -> HandleResult {
        match next {
            Some(index) => self.activate(index, None),
            None => {
                if self.active.take().is_some() {
                    debug_log!("Router {} has no active child", self.id);
                }
                HandleResult::Handled
            }
        }
    }

    /// Run the active-transition sequence for `index`. The surface is checked
    /// before anything changes, so a rejected transition leaves the previous
    /// active child in place.
    fn activate(&mut self, index: usize, completion: Option<Completion>) -> HandleResult {
        let next = self.children[index].id();
        if self.active_id() == Some(next) {
            complete(completion);
            return HandleResult::Handled;
        }

        let detail = match self.surface.kind() {
            SurfaceKind::SplitPane => match self.surface.detail_at(index) {
                Some(content) => Some(content),
                None => return self.violation(NavigationError::MissingDetail { index }),
            },
            _ => None,
        };

        debug_log!(
            "Router {} active child {:?} -> {} (index {})",
            self.id,
            self.active_id(),
            next,
            index
        );
        self.active = Some(index);
        self.children[index].did_become_active_after_invalidation();
        self.reconcile_surface(index, detail, completion);
        HandleResult::Handled
    }

    fn reconcile_surface(&self, index: usize, detail: Option<C>, completion: Option<Completion>) {
        match self.surface.kind() {
            SurfaceKind::SingleSlot => {
                match self.children[index].root_content() {
                    Some(content) => self.surface.show_content(content, self.options.slot_transition),
                    None => {
                        warn_log!("Active child {} of slot {} has no root content", index, self.id);
                    }
                }
                complete(completion);
            }
            SurfaceKind::TabSet => {
                self.surface.select_index(index);
                complete(completion);
            }
            SurfaceKind::SplitPane => match detail {
                Some(content) => self.surface.update_detail_content(content, false, completion),
                None => complete(completion),
            },
            SurfaceKind::Stack | SurfaceKind::Content => complete(completion),
        }
    }

    fn violation(&self, error: NavigationError) -> HandleResult {
        error_log!("Router {}: {}", self.id, error);
        if self.options.strict_contracts {
            panic!("router contract violation: {}", error);
        }
        HandleResult::Rejected(error)
    }
}

impl<C: Content> Routing<C> for Router<C> {
    fn id(&self) -> RouterId {
        self.id
    }

    fn is_passive(&self) -> bool {
        self.passive
    }

    fn is_active(&self) -> bool {
        Router::is_active(self)
    }

    fn root_content(&self) -> Option<C> {
        self.surface.root_content()
    }

    fn can_handle(&self, address: &Address) -> bool {
        Router::can_handle(self, address)
    }

    fn handle(&mut self, address: &Address, completion: Option<Completion>) -> HandleResult {
        Router::handle(self, address, completion)
    }

    fn did_become_active_after_invalidation(&mut self) {
        Router::did_become_active_after_invalidation(self);
    }

    fn invalidate(&mut self) {
        let _ = Router::invalidate(self);
    }

    fn content_for(&self, address: &Address) -> Option<C> {
        Router::content_for(self, address)
    }
}

impl<C: Content> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("id", &self.id)
            .field("kind", &self.surface.kind())
            .field("passive", &self.passive)
            .field("children", &self.children.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
