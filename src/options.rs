//! Router configuration.

use crate::surface::SlotTransition;

/// What a router does when asked to perform a resolver action while its
/// previous action has not completed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BusyPolicy {
    /// Drop the new request with a warning and report
    /// [`HandleResult::Busy`](crate::HandleResult::Busy).
    #[default]
    Drop,
    /// Issue the new action immediately, interleaving with the old one.
    Proceed,
}

/// Per-router options.
///
/// # Example
///
/// ```
/// use surface_navigator::{BusyPolicy, RouterOptions, SlotTransition};
///
/// let options = RouterOptions::new()
///     .slot_transition(SlotTransition::None)
///     .busy_policy(BusyPolicy::Proceed)
///     .strict_contracts(false);
/// assert_eq!(options.busy_policy, BusyPolicy::Proceed);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouterOptions {
    /// Transition used when a single-slot surface swaps to a new active child.
    pub slot_transition: SlotTransition,
    /// Behaviour for requests arriving while an action is in flight.
    pub busy_policy: BusyPolicy,
    /// Panic on contract violations instead of logging and ignoring them.
    /// Defaults to `true` in debug builds.
    pub strict_contracts: bool,
}

impl RouterOptions {
    /// Default options.
    pub fn new() -> Self {
        Self {
            slot_transition: SlotTransition::default(),
            busy_policy: BusyPolicy::default(),
            strict_contracts: cfg!(debug_assertions),
        }
    }

    /// Set the single-slot transition.
    pub fn slot_transition(mut self, transition: SlotTransition) -> Self {
        self.slot_transition = transition;
        self
    }

    /// Set the busy policy.
    pub fn busy_policy(mut self, policy: BusyPolicy) -> Self {
        self.busy_policy = policy;
        self
    }

    /// Enable or disable panicking on contract violations.
    pub fn strict_contracts(mut self, strict: bool) -> Self {
        self.strict_contracts = strict;
        self
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self::new()
    }
}
