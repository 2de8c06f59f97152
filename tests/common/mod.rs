//! Test utilities for router tree tests
//!
//! Provides a journaling surface, a scripted stub node, and helpers for building
//! small trees.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use surface_navigator::*;

/// Content handles in tests are plain labels.
pub type Label = &'static str;

/// Router over label content.
pub type TestRouter = Router<Label>;

/// Shared, ordered log of surface calls across a whole tree.
pub type Journal = Rc<RefCell<Vec<String>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Snapshot of a journal.
pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

// ============================================================================
// RecordingSurface
// ============================================================================

/// Surface that keeps just enough state to answer the router's queries and
/// journals every call as `"<root>.<operation>(<argument>)"`.
///
/// Completions run synchronously unless the surface is deferred, in which
/// case they queue up until [`finish_next`](Self::finish_next) is called.
pub struct RecordingSurface {
    kind: SurfaceKind,
    root: Label,
    journal: Journal,
    deferred: Cell<bool>,
    pending: RefCell<VecDeque<Completion>>,
    stack: RefCell<Vec<Label>>,
    presented: RefCell<Vec<Label>>,
    tabs: RefCell<Vec<Label>>,
    selected: Cell<Option<usize>>,
    details: RefCell<Vec<Label>>,
    detail: Cell<Option<Label>>,
    shown: Cell<Option<Label>>,
}

impl RecordingSurface {
    pub fn new(kind: SurfaceKind, root: Label, journal: &Journal) -> Rc<Self> {
        Rc::new(Self {
            kind,
            root,
            journal: Rc::clone(journal),
            deferred: Cell::new(false),
            pending: RefCell::new(VecDeque::new()),
            stack: RefCell::new(Vec::new()),
            presented: RefCell::new(Vec::new()),
            tabs: RefCell::new(Vec::new()),
            selected: Cell::new(None),
            details: RefCell::new(Vec::new()),
            detail: Cell::new(None),
            shown: Cell::new(None),
        })
    }

    pub fn stack(root: Label, journal: &Journal) -> Rc<Self> {
        Self::new(SurfaceKind::Stack, root, journal)
    }

    pub fn tabs(root: Label, journal: &Journal) -> Rc<Self> {
        Self::new(SurfaceKind::TabSet, root, journal)
    }

    pub fn split(root: Label, journal: &Journal) -> Rc<Self> {
        Self::new(SurfaceKind::SplitPane, root, journal)
    }

    pub fn slot(root: Label, journal: &Journal) -> Rc<Self> {
        Self::new(SurfaceKind::SingleSlot, root, journal)
    }

    pub fn content(root: Label, journal: &Journal) -> Rc<Self> {
        Self::new(SurfaceKind::Content, root, journal)
    }

    /// Hold completions until released with `finish_next`.
    pub fn defer_completions(&self) {
        self.deferred.set(true);
    }

    /// Run the oldest held completion. Returns `false` if none was pending.
    pub fn finish_next(&self) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(completion) => {
                completion();
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected.get()
    }

    pub fn detail(&self) -> Option<Label> {
        self.detail.get()
    }

    pub fn shown(&self) -> Option<Label> {
        self.shown.get()
    }

    pub fn stack_entries(&self) -> Vec<Label> {
        self.stack.borrow().clone()
    }

    pub fn tab_entries(&self) -> Vec<Label> {
        self.tabs.borrow().clone()
    }

    /// Drop every registered detail, as a host that rebuilt its split view would.
    pub fn forget_details(&self) {
        self.details.borrow_mut().clear();
    }

    fn record(&self, operation: &str, argument: impl std::fmt::Display) {
        self.journal
            .borrow_mut()
            .push(format!("{}.{}({})", self.root, operation, argument));
    }

    fn finish(&self, completion: Option<Completion>) {
        match completion {
            Some(completion) if self.deferred.get() => {
                self.pending.borrow_mut().push_back(completion);
            }
            other => complete(other),
        }
    }
}

impl NavigationSurface<Label> for RecordingSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn root_content(&self) -> Option<Label> {
        Some(self.root)
    }

    fn presented_content(&self) -> Option<Label> {
        self.presented.borrow().last().copied()
    }

    fn stack_depth(&self) -> usize {
        self.stack.borrow().len()
    }

    fn set_initial_content(&self, content: Label) {
        *self.stack.borrow_mut() = vec![content];
        self.record("initial", content);
    }

    fn show_content(&self, content: Label, _transition: SlotTransition) {
        self.shown.set(Some(content));
        self.record("show", content);
    }

    fn append_tab(&self, content: Label) {
        self.tabs.borrow_mut().push(content);
        self.record("append_tab", content);
    }

    fn select_index(&self, index: usize) {
        self.selected.set(Some(index));
        self.record("select", index);
    }

    fn register_detail(&self, content: Label) {
        self.details.borrow_mut().push(content);
        self.record("register_detail", content);
    }

    fn detail_at(&self, index: usize) -> Option<Label> {
        self.details.borrow().get(index).copied()
    }

    fn push(&self, content: Label, _animated: bool, completion: Option<Completion>) {
        self.stack.borrow_mut().push(content);
        self.record("push", content);
        self.finish(completion);
    }

    fn push_from_topmost(&self, content: Label, _animated: bool, completion: Option<Completion>) {
        self.record("push_from_topmost", content);
        self.finish(completion);
    }

    fn pop(&self, _animated: bool, completion: Option<Completion>) {
        {
            let mut stack = self.stack.borrow_mut();
            if stack.len() > 1 {
                stack.pop();
            }
        }
        self.record("pop", "");
        self.finish(completion);
    }

    fn pop_to_root(&self, _animated: bool, completion: Option<Completion>) {
        self.stack.borrow_mut().truncate(1);
        self.record("pop_to_root", "");
        self.finish(completion);
    }

    fn present(&self, content: Label, _animated: bool, completion: Option<Completion>) {
        self.presented.borrow_mut().push(content);
        self.record("present", content);
        self.finish(completion);
    }

    fn present_from_topmost(&self, content: Label, _animated: bool, completion: Option<Completion>) {
        self.presented.borrow_mut().push(content);
        self.record("present_from_topmost", content);
        self.finish(completion);
    }

    fn dismiss(&self, _animated: bool, completion: Option<Completion>) {
        self.presented.borrow_mut().clear();
        self.record("dismiss", "");
        self.finish(completion);
    }

    fn dismiss_topmost(&self, _animated: bool, completion: Option<Completion>) {
        self.presented.borrow_mut().pop();
        self.record("dismiss_topmost", "");
        self.finish(completion);
    }

    fn update_detail_content(&self, content: Label, _animated: bool, completion: Option<Completion>) {
        self.detail.set(Some(content));
        self.record("detail", content);
        self.finish(completion);
    }

    fn update_root_content(&self, content: Label, _animated: bool, completion: Option<Completion>) {
        self.record("root", content);
        self.finish(completion);
    }
}

// ============================================================================
// StubRouter
// ============================================================================

/// Shared view into a [`StubRouter`] after it has been moved into a tree.
#[derive(Clone)]
pub struct StubState {
    pub id: RouterId,
    pub active: Rc<Cell<bool>>,
    pub hooks: Rc<Cell<usize>>,
    pub handled: Rc<RefCell<Vec<String>>>,
}

impl StubState {
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.get()
    }

    pub fn handled(&self) -> Vec<String> {
        self.handled.borrow().clone()
    }
}

/// Hand-written node claiming a fixed set of identifiers.
pub struct StubRouter {
    root: Option<Label>,
    claims: Vec<Label>,
    passive: bool,
    fickle: bool,
    state: StubState,
}

impl StubRouter {
    pub fn new(root: Label, claims: &[Label]) -> Self {
        Self {
            root: Some(root),
            claims: claims.to_vec(),
            passive: false,
            fickle: false,
            state: StubState {
                id: RouterId::next(),
                active: Rc::new(Cell::new(false)),
                hooks: Rc::new(Cell::new(0)),
                handled: Rc::new(RefCell::new(Vec::new())),
            },
        }
    }

    pub fn passive(mut self) -> Self {
        self.passive = true;
        self
    }

    /// Report no root content.
    pub fn without_root(mut self) -> Self {
        self.root = None;
        self
    }

    /// Stop claiming anything once activated.
    pub fn fickle(mut self) -> Self {
        self.fickle = true;
        self
    }

    pub fn state(&self) -> StubState {
        self.state.clone()
    }
}

impl Routing<Label> for StubRouter {
    fn id(&self) -> RouterId {
        self.state.id
    }

    fn is_passive(&self) -> bool {
        self.passive
    }

    fn is_active(&self) -> bool {
        self.state.active.get()
    }

    fn root_content(&self) -> Option<Label> {
        self.root
    }

    fn can_handle(&self, address: &Address) -> bool {
        if self.fickle && self.state.hooks.get() > 0 {
            return false;
        }
        self.claims.iter().any(|claim| *claim == address.identifier())
    }

    fn handle(&mut self, address: &Address, completion: Option<Completion>) -> HandleResult {
        self.state
            .handled
            .borrow_mut()
            .push(address.identifier().to_string());
        complete(completion);
        HandleResult::Handled
    }

    fn did_become_active_after_invalidation(&mut self) {
        self.state.hooks.set(self.state.hooks.get() + 1);
    }
}

// ============================================================================
// Tree helpers
// ============================================================================

/// Options that report contract violations instead of panicking.
pub fn lenient() -> RouterOptions {
    RouterOptions::new().strict_contracts(false)
}

/// Stack router named `name` that claims `name` and pops to root for it.
pub fn stack_router(name: Label, journal: &Journal) -> (TestRouter, Rc<RecordingSurface>) {
    let surface = RecordingSurface::stack(name, journal);
    let router = Router::builder(Rc::clone(&surface))
        .resolver(RouteTable::new(name).route(name, |_| NavigationAction::PopToRoot { animated: true }))
        .build();
    (router, surface)
}

/// Router over a bare content surface with no resolver.
pub fn content_router(name: Label, journal: &Journal) -> TestRouter {
    Router::new(RecordingSurface::content(name, journal))
}

/// Install `env_logger` once so `RUST_LOG` works while debugging tests.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
