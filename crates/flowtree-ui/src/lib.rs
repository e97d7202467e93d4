//! Rendering for flowtree display trees.
//!
//! Two front ends share this crate: an indented terminal outline with
//! Ayu-themed colors and pager support, and an SVG diagram built from a
//! horizontal [`layout`] plus a per-diagram [`session`] holding zoom, tooltip
//! and search state.

pub mod layout;
pub mod outline;
pub mod pager;
pub mod session;
pub mod styles;
pub mod svg;
pub mod terminal;
pub mod wrap;

pub use layout::{Layout, LayoutOptions, LaidOutNode, Link, NodeId, layout_tree};
pub use outline::{OutlineOptions, render_outline};
pub use session::{RenderSession, Tooltip, ZoomLimits, ZoomState};
pub use styles::Styles;
pub use svg::{SvgOptions, render_svg};
pub use wrap::wrap_words;
