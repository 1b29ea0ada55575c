//! # PageCraft Document Model
//!
//! The serializable content document behind the site and its visual builder.
//!
//! Two layers live here:
//!
//! - **Structured content** ([`SiteDocument`]): branding, navigation,
//!   typography, per-section headers/styles and the ordered item collections
//!   (services, portfolio entries, testimonials, ...). Leaf fields are
//!   addressed by dot/bracket paths; records inside collections are addressed
//!   by stable id, never by array position.
//! - **Element trees** ([`BuilderElement`]): free-form custom sections built
//!   from a closed set of node types. Child order is the sole layout order.
//!
//! The whole document round-trips through JSON with no information loss; the
//! draft/live persistence slots and history snapshots all use that encoding.

pub mod content;
pub mod defaults;
pub mod element;
pub mod style;

pub use content::*;
pub use element::*;
pub use style::*;
