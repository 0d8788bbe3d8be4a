//! Best-effort critique history persistence.
//!
//! The engine stays pure; callers that want history explicitly hand the
//! result to a store afterwards. The `CritiqueStore` trait abstracts the
//! backend — file I/O is one implementation, not a requirement — so hosts
//! without a filesystem (WASM, tests) plug in their own.
//!
//! Persistence is never on the result path: `save_best_effort` logs
//! failures and returns, and `load_history_or_empty` degrades to an empty
//! history. No retry, no timeout.

mod store;

pub use store::{
    CritiqueRecord, CritiqueStore, HISTORY_CAP, JsonFileStore, MemoryStore, load_history_or_empty,
    save_best_effort,
};
