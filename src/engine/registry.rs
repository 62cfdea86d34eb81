//! Per-action-type registry.
//!
//! Every `ActionType` gets exactly one published `ActionInfo`: the trie over
//! its action names plus the actions in ordinal order. Entries are built
//! lazily on first use and live for the rest of the process.
//!
//! ```text
//! ActionInfo::<A>::get()
//!   ├─ read lock ── hit ──────────────────────────────▶ Arc<ActionInfo<A>>
//!   └─ miss ── build (no lock held) ── write lock
//!                                     └─ vacant: insert ours / occupied: adopt (first writer wins)
//! ```
//!
//! ## Concurrency
//!
//! Building an entry is a pure function of `A::ALL`, so two threads racing on
//! the first access may both build one; only the first to publish is kept and
//! the loser adopts it. No lock is held while building. Once published an
//! entry is immutable, so readers need nothing beyond the read lock on the map.

use super::trie::TrieNode;
use crate::ActionType;
use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::collections::{HashMap, hash_map};
use std::ops::Range;
use std::sync::{Arc, PoisonError, RwLock};

type Entry = Arc<dyn Any + Send + Sync>;

static REGISTRY: Lazy<RwLock<HashMap<TypeId, Entry>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// The cached `(trie, ordered actions)` pair for one action type.
#[derive(Debug)]
pub struct ActionInfo<A: ActionType> {
    root: TrieNode<A>,
    actions: &'static [A],
}

impl<A: ActionType> ActionInfo<A> {
    /// Fetch the registry entry for `A`, building and publishing it on first use.
    pub fn get() -> Arc<Self> {
        let key = TypeId::of::<A>();

        if let Some(entry) = REGISTRY.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            if let Ok(info) = Arc::clone(entry).downcast::<Self>() {
                return info;
            }
        }

        let built = Arc::new(Self::build());
        let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
        match registry.entry(key) {
            hash_map::Entry::Occupied(mut slot) => match Arc::clone(slot.get()).downcast::<Self>() {
                Ok(info) => info,
                Err(_) => {
                    // Keys are `TypeId::of::<A>()`, so a mismatch means the map was corrupted.
                    tracing::error!(
                        action_type = std::any::type_name::<A>(),
                        "registry entry has the wrong type; replacing it"
                    );
                    slot.insert(Arc::clone(&built) as Entry);
                    built
                }
            },
            hash_map::Entry::Vacant(slot) => {
                tracing::debug!(action_type = std::any::type_name::<A>(), "published action registry entry");
                slot.insert(Arc::clone(&built) as Entry);
                built
            }
        }
    }

    /// Build a fresh entry without touching the registry.
    pub(crate) fn build() -> Self {
        let mut root = TrieNode::new();
        for &action in A::ALL {
            root.insert(action.name(), action);
        }
        tracing::trace!(
            action_type = std::any::type_name::<A>(),
            actions = A::ALL.len(),
            nodes = root.node_count(),
            "built action trie"
        );
        ActionInfo { root, actions: A::ALL }
    }

    /// Every action of the type, in ordinal order.
    pub fn actions(&self) -> &'static [A] {
        self.actions
    }

    /// Number of declared actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The action with the given ordinal.
    pub fn action(&self, ordinal: usize) -> Option<A> {
        self.actions.get(ordinal).copied()
    }

    /// Find the action whose canonical name is exactly `name`.
    pub fn find(&self, name: &str) -> Option<A> {
        self.root.get(name)
    }

    /// Find the action named by `source[range]`, without copying the substring.
    pub(crate) fn lookup(&self, source: &str, range: Range<usize>) -> Option<A> {
        self.root.lookup(source, range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    crate::actions! {
        enum Fruit {
            Apple => "apple",
            Apricot => "apricot",
            Banana => "banana",
        }
    }

    crate::actions! {
        enum Color {
            Red => "red",
            Green => "green",
        }
    }

    #[test]
    fn entry_holds_actions_in_ordinal_order() {
        let info = ActionInfo::<Fruit>::get();
        assert_eq!(info.actions(), &[Fruit::Apple, Fruit::Apricot, Fruit::Banana]);
        assert_eq!(info.len(), 3);
        assert_eq!(info.action(1), Some(Fruit::Apricot));
        assert_eq!(info.action(3), None);
    }

    #[test]
    fn entry_finds_names() {
        let info = ActionInfo::<Fruit>::get();
        assert_eq!(info.find("apricot"), Some(Fruit::Apricot));
        assert_eq!(info.find("ap"), None);
        assert_eq!(info.lookup("x,banana", 2..8), Some(Fruit::Banana));
    }

    #[test]
    fn repeated_access_returns_the_published_entry() {
        let first = ActionInfo::<Fruit>::get();
        let second = ActionInfo::<Fruit>::get();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn distinct_types_get_distinct_entries() {
        let colors = ActionInfo::<Color>::get();
        assert_eq!(colors.find("green"), Some(Color::Green));
        assert_eq!(colors.find("apple"), None);
    }

    #[test]
    fn mistyped_entry_is_replaced_and_published() {
        crate::actions! {
            enum Stale {
                Only => "only",
            }
        }

        let wrong: Entry = Arc::new("not an ActionInfo");
        REGISTRY.write().unwrap_or_else(PoisonError::into_inner).insert(TypeId::of::<Stale>(), wrong);

        let first = ActionInfo::<Stale>::get();
        assert_eq!(first.find("only"), Some(Stale::Only));
        let second = ActionInfo::<Stale>::get();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn concurrent_first_access_agrees_on_one_entry() {
        crate::actions! {
            enum Raced {
                One => "one",
                Two => "two",
            }
        }

        let handles: Vec<_> = (0..8).map(|_| thread::spawn(ActionInfo::<Raced>::get)).collect();
        let entries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for entry in &entries {
            assert!(Arc::ptr_eq(entry, &entries[0]));
            assert_eq!(entry.find("two"), Some(Raced::Two));
        }
    }
}
