//! Navigation actions.
//!
//! A [`NavigationAction`] describes one UI transition a resolver wants for an
//! address. The router executes it against its surface with
//! [`NavigationAction::perform`], which owns the ordering rules:
//!
//! | Action | Surface calls |
//! |--------|---------------|
//! | `Push` | `push` |
//! | `Present` | `present`, skipped when the content is already presented |
//! | `PresentFromTopmost` | `present_from_topmost` |
//! | `PopToRoot` | `pop_to_root` when the stack is deeper than one |
//! | `PopOrDismissToRoot` | dismiss, then pop to root |
//! | `Dismiss` / `DismissTopmost` | dismiss when something is presented |
//! | `DismissAndPresent` / `DismissAndPush` | dismiss, then present / push |
//! | `PopAndPresent` / `PopAndPush` | `pop`, then present / push |
//! | `PushFromTopmost` | `push_from_topmost` |
//! | `SetDetailContent` / `SetSplitRootContent` | `update_detail_content` / `update_root_content` |
//!
//! A chained second step is always issued from the first step's completion,
//! never before it, even when the first step completes synchronously.
//! Skipped steps complete immediately.

use crate::surface::{complete, Completion, Content, NavigationSurface};
use crate::{debug_log, error_log};
use std::rc::Rc;

/// One UI transition request produced by a resolver.
///
/// # Example
///
/// ```
/// use surface_navigator::NavigationAction;
///
/// let action = NavigationAction::DismissAndPresent { content: "compose", animated: true };
/// assert_eq!(action.content(), Some(&"compose"));
/// assert_eq!(action.name(), "dismiss-and-present");
/// assert!(NavigationAction::<&str>::None.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationAction<C> {
    /// No action. A resolver returning this for an address it claimed is defective.
    None,
    /// Push onto the stack.
    Push { content: C, animated: bool },
    /// Present modally.
    Present { content: C, animated: bool },
    /// Present on top of the topmost presented content.
    PresentFromTopmost { content: C, animated: bool },
    /// Dismiss whatever is presented, then present.
    DismissAndPresent { content: C, animated: bool },
    /// Dismiss whatever is presented, then push.
    DismissAndPush { content: C, animated: bool },
    /// Pop the top entry, then present.
    PopAndPresent { content: C, animated: bool },
    /// Pop the top entry, then push.
    PopAndPush { content: C, animated: bool },
    /// Push onto the stack owned by the topmost presented content.
    PushFromTopmost { content: C, animated: bool },
    /// Replace the split pane's detail content.
    SetDetailContent { content: C, animated: bool },
    /// Replace the split pane's primary column.
    SetSplitRootContent { content: C, animated: bool },
    /// Pop to the stack root.
    PopToRoot { animated: bool },
    /// Dismiss presented content, then pop to the stack root.
    PopOrDismissToRoot { animated: bool },
    /// Dismiss presented content.
    Dismiss { animated: bool },
    /// Dismiss the topmost presented content.
    DismissTopmost { animated: bool },
}

impl<C> NavigationAction<C> {
    /// Animated push.
    pub fn push(content: C) -> Self {
        Self::Push {
            content,
            animated: true,
        }
    }

    /// Animated modal presentation.
    pub fn present(content: C) -> Self {
        Self::Present {
            content,
            animated: true,
        }
    }

    /// Check if this is the [`None`](Self::None) sentinel.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The content handle carried by content-bearing variants.
    pub fn content(&self) -> Option<&C> {
        match self {
            Self::Push { content, .. }
            | Self::Present { content, .. }
            | Self::PresentFromTopmost { content, .. }
            | Self::DismissAndPresent { content, .. }
            | Self::DismissAndPush { content, .. }
            | Self::PopAndPresent { content, .. }
            | Self::PopAndPush { content, .. }
            | Self::PushFromTopmost { content, .. }
            | Self::SetDetailContent { content, .. }
            | Self::SetSplitRootContent { content, .. } => Some(content),
            Self::None
            | Self::PopToRoot { .. }
            | Self::PopOrDismissToRoot { .. }
            | Self::Dismiss { .. }
            | Self::DismissTopmost { .. } => None,
        }
    }

    /// The animation flag; `false` for [`None`](Self::None).
    pub fn is_animated(&self) -> bool {
        match self {
            Self::None => false,
            Self::Push { animated, .. }
            | Self::Present { animated, .. }
            | Self::PresentFromTopmost { animated, .. }
            | Self::DismissAndPresent { animated, .. }
            | Self::DismissAndPush { animated, .. }
            | Self::PopAndPresent { animated, .. }
            | Self::PopAndPush { animated, .. }
            | Self::PushFromTopmost { animated, .. }
            | Self::SetDetailContent { animated, .. }
            | Self::SetSplitRootContent { animated, .. }
            | Self::PopToRoot { animated }
            | Self::PopOrDismissToRoot { animated }
            | Self::Dismiss { animated }
            | Self::DismissTopmost { animated } => *animated,
        }
    }

    /// Short kebab-case name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Push { .. } => "push",
            Self::Present { .. } => "present",
            Self::PresentFromTopmost { .. } => "present-from-topmost",
            Self::DismissAndPresent { .. } => "dismiss-and-present",
            Self::DismissAndPush { .. } => "dismiss-and-push",
            Self::PopAndPresent { .. } => "pop-and-present",
            Self::PopAndPush { .. } => "pop-and-push",
            Self::PushFromTopmost { .. } => "push-from-topmost",
            Self::SetDetailContent { .. } => "set-detail-content",
            Self::SetSplitRootContent { .. } => "set-split-root-content",
            Self::PopToRoot { .. } => "pop-to-root",
            Self::PopOrDismissToRoot { .. } => "pop-or-dismiss-to-root",
            Self::Dismiss { .. } => "dismiss",
            Self::DismissTopmost { .. } => "dismiss-topmost",
        }
    }
}

impl<C: Content> NavigationAction<C> {
    /// Execute the action against `surface`.
    ///
    /// `completion` fires once the last surface operation of the action has
    /// completed. [`None`](Self::None) performs nothing and never completes;
    /// routers reject it before getting here.
    pub fn perform(self, surface: &Rc<dyn NavigationSurface<C>>, completion: Option<Completion>) {
        match self {
            Self::None => {
                error_log!("Refusing to perform the 'none' navigation action");
            }
            Self::Push { content, animated } => surface.push(content, animated, completion),
            Self::Present { content, animated } => {
                present_unless_shown(surface.as_ref(), content, animated, completion);
            }
            Self::PresentFromTopmost { content, animated } => {
                surface.present_from_topmost(content, animated, completion);
            }
            Self::PopToRoot { animated } => pop_to_root_if_deep(surface.as_ref(), animated, completion),
            Self::PopOrDismissToRoot { animated } => {
                let next = then(surface, move |s| pop_to_root_if_deep(s, animated, completion));
                dismiss_if_presented(surface.as_ref(), animated, Some(next));
            }
            Self::Dismiss { animated } => dismiss_if_presented(surface.as_ref(), animated, completion),
            Self::DismissTopmost { animated } => {
                if surface.presented_content().is_some() {
                    surface.dismiss_topmost(animated, completion);
                } else {
                    complete(completion);
                }
            }
            Self::DismissAndPresent { content, animated } => {
                let next = then(surface, move |s| {
                    present_unless_shown(s, content, animated, completion);
                });
                dismiss_if_presented(surface.as_ref(), animated, Some(next));
            }
            Self::DismissAndPush { content, animated } => {
                let next = then(surface, move |s| s.push(content, animated, completion));
                dismiss_if_presented(surface.as_ref(), animated, Some(next));
            }
            Self::PopAndPresent { content, animated } => {
                let next = then(surface, move |s| {
                    present_unless_shown(s, content, animated, completion);
                });
                surface.pop(animated, Some(next));
            }
            Self::PopAndPush { content, animated } => {
                let next = then(surface, move |s| s.push(content, animated, completion));
                surface.pop(animated, Some(next));
            }
            Self::PushFromTopmost { content, animated } => {
                surface.push_from_topmost(content, animated, completion);
            }
            Self::SetDetailContent { content, animated } => {
                surface.update_detail_content(content, animated, completion);
            }
            Self::SetSplitRootContent { content, animated } => {
                surface.update_root_content(content, animated, completion);
            }
        }
    }
}

/// Build a completion that runs `step` on the surface, if it still exists.
fn then<C, F>(surface: &Rc<dyn NavigationSurface<C>>, step: F) -> Completion
where
    C: Content,
    F: FnOnce(&dyn NavigationSurface<C>) + 'static,
{
    let surface = Rc::downgrade(surface);
    Box::new(move || match surface.upgrade() {
        Some(surface) => step(surface.as_ref()),
        None => {
            debug_log!("Surface dropped before the chained step could run");
        }
    })
}

fn present_unless_shown<C: Content>(
    surface: &dyn NavigationSurface<C>,
    content: C,
    animated: bool,
    completion: Option<Completion>,
) {
    if surface.presented_content().as_ref() == Some(&content) {
        debug_log!("{:?} is already presented", content);
        complete(completion);
    } else {
        surface.present(content, animated, completion);
    }
}

fn dismiss_if_presented<C: Content>(
    surface: &dyn NavigationSurface<C>,
    animated: bool,
    completion: Option<Completion>,
) {
    if surface.presented_content().is_some() {
        surface.dismiss(animated, completion);
    } else {
        complete(completion);
    }
}

fn pop_to_root_if_deep<C: Content>(
    surface: &dyn NavigationSurface<C>,
    animated: bool,
    completion: Option<Completion>,
) {
    if surface.stack_depth() > 1 {
        surface.pop_to_root(animated, completion);
    } else {
        complete(completion);
    }
}
