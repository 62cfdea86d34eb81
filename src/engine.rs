//! Action-string engine.
//!
//! The engine turns action strings into encoded action sets and back. It is
//! split into focused submodules under `src/engine/`:
//!
//! ```text
//!                      ActionType::ALL
//!                            │
//!                 ActionInfo::get (registry.rs)
//!                   - build trie once per type (trie.rs)
//!                   - publish into process-wide cache
//!                            │
//! input ──────────▶ Parser::run (parser.rs)
//!                   - separator skip / wildcard / token scan
//!                            │ matched / matched_all
//!                            ▼
//!                   MatchSink (sink.rs)
//!                   - SetSink | MaskSink<u32> | MaskSink<u64>
//!                            │
//!                            ▼
//!                   ActionSet<A> | u32 | u64
//!                            │
//!                 append_mask / append_actions (canonical.rs)
//!                            │
//!                            ▼
//!                   "read,write"
//! ```
//!
//! ## Responsibilities by module
//!
//! - `trie.rs`: sorted-vector prefix tree with copy-free range lookup.
//! - `registry.rs`: `ActionInfo`, the cached `(trie, ordered actions)` per type.
//! - `parser.rs`: the scanning state machine and its error reporting.
//! - `sink.rs`: set and mask accumulators behind `MatchSink`.
//! - `mask.rs`: `MaskWord`, the bit operations shared by both mask widths.
//! - `canonical.rs`: set/mask to canonical string.
//! - `metrics.rs`: optional record of what a run matched.
//!
//! ## Debugging
//!
//! All modules log through `tracing`: registry builds at `debug`, individual
//! matches at `trace`, rejected inputs at `debug`.

#[path = "engine/canonical.rs"]
mod canonical;
#[path = "engine/mask.rs"]
mod mask;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/registry.rs"]
mod registry;
#[path = "engine/sink.rs"]
mod sink;
#[path = "engine/trie.rs"]
mod trie;

pub(crate) use canonical::{append_actions, append_mask};
pub use mask::MaskWord;
pub use metrics::MatchKind;
pub use parser::Parser;
pub use registry::ActionInfo;
pub(crate) use sink::{MaskSink, SetSink, fits};
