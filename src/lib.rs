//! Parse and canonicalize permission action strings.
//!
//! An action string is a comma-separated list of named actions, such as
//! `"read, write"`, or the wildcard `"*"`. This crate turns such strings into a
//! set of actions or a 32/64-bit mask, and turns those back into a
//! deterministic canonical string (`"read,write"`).
//!
//! Action types are closed enums declared with [`actions!`]:
//!
//! ```
//! actionset::actions! {
//!     pub enum FileAction {
//!         Read => "read",
//!         Write => "write",
//!         Execute => "execute",
//!     }
//! }
//!
//! let mask = actionset::parse_to_u32::<FileAction>("write, read").unwrap();
//! assert_eq!(mask, 0b011);
//! assert_eq!(actionset::canonical_from_u32::<FileAction>(mask).unwrap(), "read,write");
//! assert_eq!(actionset::parse_to_u32::<FileAction>("*").unwrap(), 0b111);
//! ```

extern crate self as actionset;

use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;


pub use api::{
    MatchSummary, Options, OverflowPolicy, ParseDetails, append_canonical_set, append_canonical_u32,
    append_canonical_u64, canonical_from_flags, canonical_from_set, canonical_from_u32, canonical_from_u64,
    parse_to_flags, parse_to_set, parse_to_u32, parse_to_u32_with, parse_to_u64, parse_to_u64_with, parse_verbose,
};
pub use engine::{ActionInfo, MaskWord};
pub use error::{ActionError, Result};

/// A closed, ordered list of named actions.
///
/// Implement this with [`actions!`]. Hand-written implementations must uphold:
///
/// - `ALL` lists every action exactly once, in declaration order.
/// - `ordinal` is the action's index into `ALL`.
/// - `Ord` sorts by ordinal.
pub trait ActionType: Copy + Ord + Hash + Debug + Send + Sync + 'static {
    /// Every action, in ordinal order.
    const ALL: &'static [Self];

    /// Canonical string form of the action.
    fn name(self) -> &'static str;

    /// Zero-based position of the action in [`ActionType::ALL`].
    fn ordinal(self) -> usize;
}

/// A discrete set of actions. Iterates in ordinal order.
pub type ActionSet<A> = BTreeSet<A>;
