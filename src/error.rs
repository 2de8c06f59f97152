//! Dispatch outcomes and contract violations.
//!
//! - [`HandleResult`]: what happened to one [`Router::handle`](crate::Router::handle)
//!   call (`Handled`, `Unhandled`, `Busy`, `Rejected`).
//! - [`NavigationError`]: a broken contract: a resolver that claimed an
//!   address but produced no action, or a tree whose structure disagrees
//!   with its surface.
//!
//! An address nobody claims is not an error. It is reported as
//! [`HandleResult::Unhandled`] and otherwise dropped silently.
//!
//! # Examples
//!
//! ```
//! use surface_navigator::{HandleResult, NavigationError};
//!
//! let result = HandleResult::Rejected(NavigationError::MissingDetail { index: 4 });
//! assert!(result.is_rejected());
//! assert_eq!(
//!     result.error().map(|e| e.to_string()),
//!     Some("No detail content registered at index 4".to_string())
//! );
//! ```

use std::fmt;

/// Outcome of dispatching an address through a router tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleResult {
    /// Some node performed a navigation for the address.
    Handled,
    /// No node claimed the address; nothing happened.
    Unhandled,
    /// The owning node was still finishing a previous action and dropped
    /// this one (see [`BusyPolicy`](crate::BusyPolicy)).
    Busy,
    /// A contract violation stopped the request.
    Rejected(NavigationError),
}

impl HandleResult {
    /// Check if the address was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, HandleResult::Handled)
    }

    /// Check if no router claimed the address.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, HandleResult::Unhandled)
    }

    /// Check if the request was dropped because a previous action was in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, HandleResult::Busy)
    }

    /// Check if a contract violation stopped the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, HandleResult::Rejected(_))
    }

    /// The violation, if any.
    pub fn error(&self) -> Option<&NavigationError> {
        match self {
            HandleResult::Rejected(error) => Some(error),
            _ => None,
        }
    }
}

/// Programmer errors detected while routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A resolver claimed the address but returned [`NavigationAction::None`](crate::NavigationAction::None).
    InvalidAction { identifier: String },

    /// A split pane has no detail content registered at the index.
    MissingDetail { index: usize },

    /// A split pane has detail content at the index but no child router there.
    MissingChild { index: usize },

    /// A child added to a tab set or split pane has no root content to show.
    MissingRootContent { index: usize },

    /// A surface reported a selection for content no child router owns.
    UnknownContent { content: String },

    /// A freshly activated child stopped claiming the address it was activated for.
    RedispatchRefused { identifier: String },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidAction { identifier } => {
                write!(f, "Resolver claimed '{}' but returned no action", identifier)
            }
            NavigationError::MissingDetail { index } => {
                write!(f, "No detail content registered at index {}", index)
            }
            NavigationError::MissingChild { index } => {
                write!(f, "No child router at detail index {}", index)
            }
            NavigationError::MissingRootContent { index } => {
                write!(f, "Child router {} has no root content", index)
            }
            NavigationError::UnknownContent { content } => {
                write!(f, "No child router owns content {}", content)
            }
            NavigationError::RedispatchRefused { identifier } => {
                write!(f, "Activated child no longer handles '{}'", identifier)
            }
        }
    }
}

impl std::error::Error for NavigationError {}
