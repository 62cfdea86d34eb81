//! Canonical action strings.
//!
//! The canonical form of an action set is the names of its actions joined by
//! `,`, in ordinal order, with no whitespace. The empty set is `""`.
//!
//! Masks are walked lowest bit first, so the output is ordinal-ascending no
//! matter how the mask was assembled. A set is written in its own iteration
//! order; `ActionSet` (a `BTreeSet`) iterates in ordinal order because action
//! types order by ordinal.
//!
//! Re-parsing a canonical string with the same encoding yields the value it
//! was produced from.

use super::mask::MaskWord;
use super::registry::ActionInfo;
use crate::{ActionError, ActionType, Result};

/// Append the canonical form of `actions` to `out`, in iteration order.
///
/// No separator is written before the first name, even if `out` is not empty.
pub(crate) fn append_actions<A, I>(actions: I, out: &mut String)
where
    A: ActionType,
    I: IntoIterator<Item = A>,
{
    for (i, action) in actions.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(action.name());
    }
}

/// Append the canonical form of `mask` to `out`.
///
/// Fails with `UnknownBit` if a set bit has no action of that ordinal. In that
/// case `out` is left untouched.
pub(crate) fn append_mask<A: ActionType, W: MaskWord>(info: &ActionInfo<A>, mask: W, out: &mut String) -> Result<()> {
    let mut names = Vec::new();
    let mut rest = mask;
    while !rest.is_zero() {
        let bit = rest.trailing_zeros();
        let action = info.action(bit as usize).ok_or_else(|| {
            let err = ActionError::UnknownBit { type_name: std::any::type_name::<A>(), bit };
            tracing::debug!(%err, ?mask, "mask not canonicalized");
            err
        })?;
        names.push(action);
        rest = rest.clear_lowest();
    }
    append_actions(names, out);
    Ok(())
}
