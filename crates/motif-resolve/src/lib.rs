//! # Motif Resolve - Entity/Macro Resolution Repository
//!
//! `motif-resolve` answers "which entities or macros does this query refer
//! to" over the entity graph defined in `motif-model`. It provides:
//!
//! - [`SiteStore`], [`CategoryStore`], [`EntityStore`]: async backing-store
//!   contracts, with in-memory implementations that tolerate contents
//!   changing between calls.
//! - [`GlobalRepository`]: the resolution front door - query classification,
//!   entity expansion, site-inheritance-aware visibility and first-match
//!   macro lookup.
//! - [`AspectCache`]: the one piece of core-owned mutable shared state, a
//!   keyed cache of [`EntityAspect`](motif_model::EntityAspect) instances
//!   with an explicit enable/disable toggle and eviction entry points.
//!
//! ## Failure Semantics
//!
//! Not-found is data, not an error: every lookup returns `Option`/an empty
//! list and logs at `debug!` level. Callers branch on the result normally;
//! nothing in this crate raises for a missing site, category, entity or
//! macro.
//!
//! ## Concurrency
//!
//! Lookups may run concurrently over one shared repository. The stores are
//! read-mostly; the aspect cache guards its read-then-insert sequence so two
//! concurrent lookups for the same new key converge on a single instance.

mod cache;
mod query;
mod repository;
mod store;

pub use cache::AspectCache;
pub use query::{QueryMatch, SiteQuery};
pub use repository::GlobalRepository;
pub use store::{
    CategoryStore, EntityStore, MemoryCategoryStore, MemoryEntityStore, MemorySiteStore, SiteStore,
};
