//! # PageCraft Editor
//!
//! Document editing engine for the visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: content model + element trees     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: store + mutations + session         │
//! │  - Draft/live document store with history   │
//! │  - Field-path updates on structured content │
//! │  - Id-addressed element-tree mutations      │
//! │  - Selection / device / unsaved-changes     │
//! │    state machine with permission gating     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: document → VNode → HTML           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The document is a value**: every mutation clones, edits the clone
//!    and swaps it in. Snapshots held by history are never aliased.
//! 2. **Ids, not positions**: records and tree nodes are located by stable
//!    id; a missing id is a logged no-op, never a crash.
//! 3. **Drafts are cheap, publishes are durable**: only an explicit publish
//!    touches the live slot and appends a history entry.
//! 4. **Capabilities are injected**: persistence, image sourcing and the
//!    caller's role come in through traits, not ambient globals.

pub mod capabilities;
pub mod collections;
pub mod errors;
pub mod mutations;
pub mod path;
pub mod sanitize;
pub mod session;
pub mod store;

pub use capabilities::{
    FilePersistence, FixedRole, ImageConstraints, ImageSource, MemoryPersistence, Persistence,
    PersistenceError, RoleProvider, Slot,
};
pub use collections::CollectionKey;
pub use errors::EditorError;
pub use mutations::{ElementSeed, MoveDirection, Mutation, MutationError};
pub use path::{get_field, parse_path, set_field, PathError, PathSegment};
pub use sanitize::sanitize_media;
pub use session::{DeviceMode, EditorSession, Intent, PendingAction};
pub use store::{DocumentStore, HistoryEntry, UpdateReport, HISTORY_CAP};

// Re-export the document types callers most often need alongside the editor.
pub use pagecraft_document::{AdminRole, BuilderElement, ElementType, SiteDocument};
