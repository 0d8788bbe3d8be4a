use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for element IDs — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for canvas elements.
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a new string as an ElementId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

// ─── Issue / result ID generation ────────────────────────────────────────

/// Capability for minting fresh issue and result IDs.
///
/// Injected into the engine instead of calling a global counter, so tests
/// can assert on stable, sequential IDs.
pub trait IdGen {
    /// Mint a fresh, unique ID with the given prefix (e.g. `issue_3`).
    fn next_id(&self, prefix: &str) -> String;
}

/// Default generator: per-instance atomic counter, IDs are `{prefix}_{n}`.
///
/// A fresh instance always starts at 0, so a single analysis run produces
/// the same ID sequence every time.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGen for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}_{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ElementId::intern("hero_banner");
        let b = ElementId::intern("hero_banner");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hero_banner");
    }

    #[test]
    fn sequential_ids_are_stable() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id("issue"), "issue_0");
        assert_eq!(ids.next_id("issue"), "issue_1");
        assert_eq!(ids.next_id("critique"), "critique_2");
    }

    #[test]
    fn fresh_generator_restarts() {
        let a = SequentialIds::new();
        let b = SequentialIds::new();
        assert_eq!(a.next_id("issue"), b.next_id("issue"));
    }
}
