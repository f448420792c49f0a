//! Turning a [`PartialPolicy`] into a concrete decision for one end

use super::config::{LocationEditPolicy, PartialPolicy};
use super::ends::{has_good_start, has_good_stop, is_3_at_end, is_5_at_end};
use crate::feature::{Feature, Frame};
use crate::reference::SequenceProvider;

/// Outcome of interpreting a partial policy at one end of a feature
///
/// At most one of `should_set` and `should_clear` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialDecision {
    pub should_set: bool,
    pub should_clear: bool,
}

impl PartialDecision {
    const KEEP: Self = Self {
        should_set: false,
        should_clear: false,
    };

    fn set(yes: bool) -> Self {
        Self {
            should_set: yes,
            should_clear: false,
        }
    }

    fn clear(yes: bool) -> Self {
        Self {
            should_set: false,
            should_clear: yes,
        }
    }

    /// Whether the decision asks for any edit
    pub fn changed(&self) -> bool {
        self.should_set || self.should_clear
    }
}

/// Decide what to do with the partial flag at the biological start
///
/// Checks that need sequence context answer "no change" when the provider
/// cannot resolve the sequence.
pub fn interpret_5_policy<P: SequenceProvider + ?Sized>(
    feature: &Feature,
    provider: &P,
    policy: &LocationEditPolicy,
) -> PartialDecision {
    let partial = feature.location.is_partial_start();
    let at_end = || is_5_at_end(&feature.location, provider);

    match policy.partial5_policy {
        PartialPolicy::NoChange => PartialDecision::KEEP,
        PartialPolicy::Set => {
            PartialDecision::set(!partial || (policy.extend5 && at_end() == Some(false)))
        }
        PartialPolicy::SetAtEnd => PartialDecision::set(!partial && at_end() == Some(true)),
        PartialPolicy::SetForBadEnd => PartialDecision::set(
            !partial && has_good_start(feature, provider, false) == Some(false),
        ),
        PartialPolicy::SetForFrame => PartialDecision::set(
            !partial && matches!(feature.frame(), Some(Frame::Two | Frame::Three)),
        ),
        PartialPolicy::Clear => PartialDecision::clear(partial),
        PartialPolicy::ClearForGoodEnd => PartialDecision::clear(
            partial && has_good_start(feature, provider, true) == Some(true),
        ),
        PartialPolicy::ClearNotAtEnd => PartialDecision::clear(partial && at_end() == Some(false)),
    }
}

/// Decide what to do with the partial flag at the biological stop
///
/// `SetForFrame` has no meaning at the 3' end and never changes anything.
pub fn interpret_3_policy<P: SequenceProvider + ?Sized>(
    feature: &Feature,
    provider: &P,
    policy: &LocationEditPolicy,
) -> PartialDecision {
    let partial = feature.location.is_partial_stop();
    let at_end = || is_3_at_end(&feature.location, provider);

    match policy.partial3_policy {
        PartialPolicy::NoChange | PartialPolicy::SetForFrame => PartialDecision::KEEP,
        PartialPolicy::Set => {
            PartialDecision::set(!partial || (policy.extend3 && at_end() == Some(false)))
        }
        PartialPolicy::SetAtEnd => PartialDecision::set(!partial && at_end() == Some(true)),
        PartialPolicy::SetForBadEnd => {
            PartialDecision::set(!partial && has_good_stop(feature, provider) == Some(false))
        }
        PartialPolicy::Clear => PartialDecision::clear(partial),
        PartialPolicy::ClearForGoodEnd => {
            PartialDecision::clear(partial && has_good_stop(feature, provider) == Some(true))
        }
        PartialPolicy::ClearNotAtEnd => PartialDecision::clear(partial && at_end() == Some(false)),
    }
}
