//! Navigation surfaces.
//!
//! A [`NavigationSurface`] is the UI region a router drives: a single-slot
//! window, a tab set, a stack, a split pane, or a bare piece of content.
//! The router never inspects concrete widget types; it branches on the
//! closed [`SurfaceKind`] tag the surface reports, which must not change
//! over the surface's lifetime.
//!
//! Surfaces are implemented by the host toolkit. Every navigation operation
//! takes an optional [`Completion`] that the surface must invoke exactly
//! once, when the operation has actually finished (end of animation, or
//! immediately when nothing animates). The router relies on this to
//! sequence chained actions such as dismiss-then-present.
//!
//! Structural operations that only make sense for some kinds have default
//! implementations that log a warning and do nothing, so a stack surface
//! does not need to implement tab selection.

use crate::{trace_log, warn_log};
use std::fmt;

/// Callback invoked once an operation has finished.
pub type Completion = Box<dyn FnOnce() + 'static>;

/// Invoke an optional completion.
pub fn complete(completion: Option<Completion>) {
    if let Some(completion) = completion {
        completion();
    }
}

/// Types usable as content handles.
///
/// Handles are compared with `==`, so either identity-like handles (ids,
/// `Rc` wrappers with pointer equality) or plain values work.
pub trait Content: Clone + PartialEq + fmt::Debug + 'static {}

impl<T> Content for T where T: Clone + PartialEq + fmt::Debug + 'static {}

/// Capability tag of a surface, decided once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// A window-like slot showing exactly one child's content at a time.
    SingleSlot,
    /// A tab set; children map to tabs by position.
    TabSet,
    /// A push/pop stack with modal presentation.
    Stack,
    /// A split pane with a primary column and a detail pane.
    SplitPane,
    /// A bare content handle with no navigation structure of its own.
    Content,
}

impl SurfaceKind {
    /// Return `true` for kinds whose router selects among child routers.
    pub fn selects_children(self) -> bool {
        matches!(self, Self::SingleSlot | Self::TabSet | Self::SplitPane)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SingleSlot => "single-slot",
            Self::TabSet => "tab-set",
            Self::Stack => "stack",
            Self::SplitPane => "split-pane",
            Self::Content => "content",
        };
        f.write_str(name)
    }
}

/// How a single-slot surface swaps in new root content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotTransition {
    /// Replace instantly.
    None,
    /// Cross-fade between old and new content.
    CrossFade {
        /// Duration in milliseconds
        duration_ms: u64,
    },
}

impl SlotTransition {
    /// Create a cross-fade transition.
    pub fn cross_fade(duration_ms: u64) -> Self {
        Self::CrossFade { duration_ms }
    }

    /// Duration of the transition; zero for [`None`](Self::None).
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::CrossFade { duration_ms } => *duration_ms,
        }
    }

    /// Return `true` if content should be swapped without animation.
    pub fn is_instant(&self) -> bool {
        self.duration_ms() == 0
    }
}

impl Default for SlotTransition {
    fn default() -> Self {
        Self::cross_fade(300)
    }
}

/// A UI region a router drives.
///
/// Only [`kind`](Self::kind), [`root_content`](Self::root_content) and
/// [`presented_content`](Self::presented_content) are required. Operations
/// a kind does not support fall back to a logged no-op that still fires
/// its completion.
pub trait NavigationSurface<C: Content> {
    /// The capability tag. Must be constant for the surface's lifetime.
    fn kind(&self) -> SurfaceKind;

    /// The handle representing this surface as a whole, used as a tab item,
    /// a slot's content, or a detail-pane registration by the parent router.
    fn root_content(&self) -> Option<C>;

    /// Content currently presented modally on this surface, if any.
    fn presented_content(&self) -> Option<C>;

    /// Number of entries on the stack. Non-stack surfaces report zero.
    fn stack_depth(&self) -> usize {
        0
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Seed the surface with its first content (stack root or first tab).
    fn set_initial_content(&self, content: C) {
        unsupported(self.kind(), "set_initial_content", &content);
    }

    /// Replace the content shown by a single-slot surface.
    fn show_content(&self, content: C, transition: SlotTransition) {
        let _ = transition;
        unsupported(self.kind(), "show_content", &content);
    }

    /// Append a tab showing `content`.
    fn append_tab(&self, content: C) {
        unsupported(self.kind(), "append_tab", &content);
    }

    /// Select the tab at `index`.
    fn select_index(&self, index: usize) {
        unsupported(self.kind(), "select_index", &index);
    }

    /// Register `content` as the detail for the next free index.
    fn register_detail(&self, content: C) {
        unsupported(self.kind(), "register_detail", &content);
    }

    /// Detail content registered at `index`.
    fn detail_at(&self, index: usize) -> Option<C> {
        let _ = index;
        None
    }

    // ------------------------------------------------------------------
    // Navigation operations
    // ------------------------------------------------------------------

    /// Push `content` onto the stack.
    fn push(&self, content: C, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "push", &content);
        complete(completion);
    }

    /// Push `content` onto the stack owned by the topmost presented content.
    fn push_from_topmost(&self, content: C, animated: bool, completion: Option<Completion>) {
        self.push(content, animated, completion);
    }

    /// Pop the top entry off the stack.
    fn pop(&self, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "pop", &"");
        complete(completion);
    }

    /// Pop back to the stack's root entry.
    fn pop_to_root(&self, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "pop_to_root", &"");
        complete(completion);
    }

    /// Present `content` modally on this surface.
    fn present(&self, content: C, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "present", &content);
        complete(completion);
    }

    /// Walk the presented-content chain to its top and present there.
    fn present_from_topmost(&self, content: C, animated: bool, completion: Option<Completion>) {
        self.present(content, animated, completion);
    }

    /// Dismiss the content presented on this surface.
    fn dismiss(&self, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "dismiss", &"");
        complete(completion);
    }

    /// Dismiss only the topmost presented content.
    fn dismiss_topmost(&self, animated: bool, completion: Option<Completion>) {
        self.dismiss(animated, completion);
    }

    /// Show `content` in the split pane's detail pane.
    fn update_detail_content(&self, content: C, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "update_detail_content", &content);
        complete(completion);
    }

    /// Show `content` in the split pane's primary column.
    fn update_root_content(&self, content: C, animated: bool, completion: Option<Completion>) {
        let _ = animated;
        unsupported(self.kind(), "update_root_content", &content);
        complete(completion);
    }
}

fn unsupported(kind: SurfaceKind, operation: &str, argument: &dyn fmt::Debug) {
    warn_log!("{} surface does not support {}({:?})", kind, operation, argument);
}

/// Observer notified of user-driven selection on a tab-set surface.
///
/// Observers are consulted in registration order, ahead of the router's own
/// answer. The host registers its existing tab delegate logic here.
pub trait SurfaceObserver<C: Content> {
    /// Veto or allow selecting `content`. `None` defers to later observers
    /// and finally to the router.
    fn should_select(&self, content: &C) -> Option<bool> {
        let _ = content;
        None
    }

    /// Called after the router has made the selected content's owner active.
    fn did_select(&self, content: &C) {
        trace_log!("Observer ignoring selection of {:?}", content);
    }
}
