use crate::engine::{self, ActionInfo, MaskSink, MaskWord, MatchKind, Parser, SetSink};
use crate::{ActionError, ActionSet, ActionType, Result};
use bitflags::Flags;
use std::ops::Range;
use std::time::Duration;

/// What to do when a mask is narrower than the number of declared actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Refuse to encode: parsing fails with [`ActionError::CapacityExceeded`]
    /// before the input is scanned.
    #[default]
    Reject,
    /// Encode anyway. Ordinal `o` lands on bit `o % width`, and `*` sets every
    /// bit of the word. Distinct actions may then share a bit.
    Wrap,
}

/// Options that affect mask encoding.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub overflow: OverflowPolicy,
}

/// One matched action (or the wildcard) in [`ParseDetails`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    /// Byte range of the match in the input.
    pub span: Range<usize>,
    /// The matched text.
    pub body: String,
    /// Canonical name of the action, or `"*"` for the wildcard.
    pub action: &'static str,
    /// Ordinal of the action; `None` for the wildcard.
    pub ordinal: Option<usize>,
}

/// Result of [`parse_verbose`]: the parsed set plus a trace of the scan.
#[derive(Debug, Clone)]
pub struct ParseDetails<A: ActionType> {
    pub text: String,
    pub set: ActionSet<A>,
    pub canonical: String,
    pub matches: Vec<MatchSummary>,
    pub wildcard: bool,
    pub empty_segments: usize,
    pub elapsed: Duration,
}

/// Parse `actions` into a set of `A`.
///
/// # Example
/// ```
/// actionset::actions! {
///     enum FileAction { Read => "read", Write => "write", Execute => "execute" }
/// }
///
/// let set = actionset::parse_to_set::<FileAction>("execute, read").unwrap();
/// assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![FileAction::Read, FileAction::Execute]);
/// ```
pub fn parse_to_set<A: ActionType>(actions: &str) -> Result<ActionSet<A>> {
    let info = ActionInfo::<A>::get();
    let mut sink = SetSink::new();
    Parser::new(actions, &info).run(&mut sink)?;
    Ok(sink.into_set())
}

/// Parse `actions` into a 32-bit mask. `A` must declare at most 32 actions.
pub fn parse_to_u32<A: ActionType>(actions: &str) -> Result<u32> {
    parse_to_u32_with::<A>(actions, &Options::default())
}

/// Parse `actions` into a 32-bit mask using the provided `options`.
pub fn parse_to_u32_with<A: ActionType>(actions: &str, options: &Options) -> Result<u32> {
    parse_to_mask::<A, u32>(actions, options)
}

/// Parse `actions` into a 64-bit mask. `A` must declare at most 64 actions.
pub fn parse_to_u64<A: ActionType>(actions: &str) -> Result<u64> {
    parse_to_u64_with::<A>(actions, &Options::default())
}

/// Parse `actions` into a 64-bit mask using the provided `options`.
pub fn parse_to_u64_with<A: ActionType>(actions: &str, options: &Options) -> Result<u64> {
    parse_to_mask::<A, u64>(actions, options)
}

/// Parse `actions` into a `bitflags` type whose bit `i` is the ordinal-`i`
/// action.
///
/// ```
/// actionset::actions! {
///     enum FileAction { Read => "read", Write => "write", Execute => "execute" }
/// }
///
/// bitflags::bitflags! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     struct FileFlags: u32 {
///         const READ = 1 << 0;
///         const WRITE = 1 << 1;
///         const EXECUTE = 1 << 2;
///     }
/// }
///
/// let flags: FileFlags = actionset::parse_to_flags::<FileAction, _>("write,read").unwrap();
/// assert_eq!(flags, FileFlags::READ | FileFlags::WRITE);
/// ```
pub fn parse_to_flags<A, F>(actions: &str) -> Result<F>
where
    A: ActionType,
    F: Flags,
    F::Bits: MaskWord,
{
    parse_to_mask::<A, F::Bits>(actions, &Options::default()).map(F::from_bits_retain)
}

fn parse_to_mask<A: ActionType, W: MaskWord>(actions: &str, options: &Options) -> Result<W> {
    let info = ActionInfo::<A>::get();
    if !engine::fits::<W, A>(&info, options.overflow) {
        let err =
            ActionError::CapacityExceeded { type_name: std::any::type_name::<A>(), count: info.len(), width: W::BITS };
        tracing::debug!(%err, "mask encoding refused");
        return Err(err);
    }
    let mut sink = MaskSink::<W>::new();
    Parser::new(actions, &info).run(&mut sink)?;
    Ok(sink.into_mask())
}

/// Parse `actions` into a set and return a trace of every match.
///
/// This is meant for diagnostics; [`parse_to_set`] does not allocate the trace.
pub fn parse_verbose<A: ActionType>(actions: &str) -> Result<ParseDetails<A>> {
    let info = ActionInfo::<A>::get();
    let mut sink = SetSink::new();
    let metrics = Parser::new(actions, &info).run_with_metrics(&mut sink)?;
    let set = sink.into_set();

    let wildcard = metrics.wildcard();
    let matches = metrics
        .matches
        .into_iter()
        .map(|m| {
            let (action, ordinal) = match m.kind {
                MatchKind::Action(a) => (a.name(), Some(a.ordinal())),
                MatchKind::All => ("*", None),
            };
            MatchSummary { body: actions[m.span.clone()].to_string(), span: m.span, action, ordinal }
        })
        .collect();

    Ok(ParseDetails {
        text: actions.to_string(),
        canonical: canonical_from_set(&set),
        set,
        matches,
        wildcard,
        empty_segments: metrics.empty_segments,
        elapsed: metrics.total,
    })
}

/// Canonical string of `set`, in the set's (ordinal) order.
pub fn canonical_from_set<A: ActionType>(set: &ActionSet<A>) -> String {
    let mut out = String::new();
    append_canonical_set(set, &mut out);
    out
}

/// Append the canonical string of `set` to `out`.
pub fn append_canonical_set<A: ActionType>(set: &ActionSet<A>, out: &mut String) {
    engine::append_actions(set.iter().copied(), out);
}

/// Canonical string of a 32-bit mask of `A` actions.
///
/// # Example
/// ```
/// actionset::actions! {
///     enum FileAction { Read => "read", Write => "write", Execute => "execute" }
/// }
///
/// assert_eq!(actionset::canonical_from_u32::<FileAction>(0b101).unwrap(), "read,execute");
/// ```
pub fn canonical_from_u32<A: ActionType>(mask: u32) -> Result<String> {
    let mut out = String::new();
    append_canonical_u32::<A>(mask, &mut out)?;
    Ok(out)
}

/// Append the canonical string of a 32-bit mask to `out`.
pub fn append_canonical_u32<A: ActionType>(mask: u32, out: &mut String) -> Result<()> {
    engine::append_mask(&ActionInfo::<A>::get(), mask, out)
}

/// Canonical string of a 64-bit mask of `A` actions.
pub fn canonical_from_u64<A: ActionType>(mask: u64) -> Result<String> {
    let mut out = String::new();
    append_canonical_u64::<A>(mask, &mut out)?;
    Ok(out)
}

/// Append the canonical string of a 64-bit mask to `out`.
pub fn append_canonical_u64<A: ActionType>(mask: u64, out: &mut String) -> Result<()> {
    engine::append_mask(&ActionInfo::<A>::get(), mask, out)
}

/// Canonical string of a `bitflags` value (see [`parse_to_flags`]).
pub fn canonical_from_flags<A, F>(flags: &F) -> Result<String>
where
    A: ActionType,
    F: Flags,
    F::Bits: MaskWord,
{
    let mut out = String::new();
    engine::append_mask(&ActionInfo::<A>::get(), flags.bits(), &mut out)?;
    Ok(out)
}
