//! Match sinks: the encoders the parser feeds.
//!
//! The parser never builds a result itself; it reports each recognized action
//! (or the wildcard) to a `MatchSink`, and the sink decides the encoding.
//!
//! - `SetSink`: collects a `BTreeSet` of actions.
//! - `MaskSink<u32>` / `MaskSink<u64>`: sets bit `ordinal` in a mask word.
//!
//! `matched_all` means "as if every action had been matched in ordinal order",
//! independent of what was matched before.

use super::mask::MaskWord;
use super::registry::ActionInfo;
use crate::api::OverflowPolicy;
use crate::{ActionSet, ActionType};

/// Receiver of parser matches.
pub(crate) trait MatchSink<A: ActionType> {
    fn matched(&mut self, action: A);
    fn matched_all(&mut self, info: &ActionInfo<A>);
}

#[derive(Debug)]
pub(crate) struct SetSink<A: ActionType> {
    set: ActionSet<A>,
}

impl<A: ActionType> SetSink<A> {
    pub(crate) fn new() -> Self {
        SetSink { set: ActionSet::new() }
    }

    pub(crate) fn into_set(self) -> ActionSet<A> {
        self.set
    }
}

impl<A: ActionType> MatchSink<A> for SetSink<A> {
    fn matched(&mut self, action: A) {
        self.set.insert(action);
    }

    fn matched_all(&mut self, info: &ActionInfo<A>) {
        self.set = info.actions().iter().copied().collect();
    }
}

/// Mask accumulator for either word width.
///
/// Under `OverflowPolicy::Wrap` an ordinal past the word width lands on bit
/// `ordinal % W::BITS`. Under `Reject` the caller has already verified the
/// action count fits (see `fits`), so every ordinal is in range.
#[derive(Debug)]
pub(crate) struct MaskSink<W: MaskWord> {
    mask: W,
}

impl<W: MaskWord> MaskSink<W> {
    pub(crate) fn new() -> Self {
        MaskSink { mask: W::ZERO }
    }

    pub(crate) fn into_mask(self) -> W {
        self.mask
    }
}

impl<W: MaskWord, A: ActionType> MatchSink<A> for MaskSink<W> {
    fn matched(&mut self, action: A) {
        let ordinal = action.ordinal() % W::BITS as usize;
        self.mask |= W::bit(ordinal as u32);
    }

    fn matched_all(&mut self, info: &ActionInfo<A>) {
        self.mask |= W::low_bits(info.len());
    }
}

/// Whether a `W`-wide mask may be used for `info` under `policy`.
pub(crate) fn fits<W: MaskWord, A: ActionType>(info: &ActionInfo<A>, policy: OverflowPolicy) -> bool {
    policy == OverflowPolicy::Wrap || info.len() <= W::BITS as usize
}
