//! # PageCraft Renderer
//!
//! Pure functions from a [`SiteDocument`](pagecraft_document::SiteDocument)
//! to a serializable virtual DOM, and from the virtual DOM to HTML text.
//!
//! Rendering is read-only and total: unknown section keys, disabled
//! sections and malformed props render nothing rather than failing. Edit
//! mode adds inert affordance markers (selection rings, control clusters,
//! placeholders) as data attributes; the host UI wires behavior to them.

pub mod builder;
pub mod html;
pub mod sections;
pub mod vdom;

pub use builder::{render_element, RenderContext};
pub use html::{render_html, render_page, HtmlOptions};
pub use sections::{compose_page, render_section};
pub use vdom::VNode;
