//! Ayu color theme and styling for terminal output.
//!
//! Uses the Ayu Dark palette. Only structural markers get color: conditions,
//! actions and terminal nodes; flow and step names stay in standard text.
//! Color source: <https://github.com/ayu-theme/ayu-colors>

use flowtree_core::NodeKind;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue
const PURPLE: (u8, u8, u8) = (0xd2, 0xa6, 0xff); // #d2a6ff

// ---------------------------------------------------------------------------
// Tree characters for hierarchical display
// ---------------------------------------------------------------------------

pub const TREE_BRANCH: &str = "\u{251C}\u{2500}\u{2500} "; // ├──
pub const TREE_LAST: &str = "\u{2514}\u{2500}\u{2500} "; // └──
pub const TREE_PIPE: &str = "\u{2502}   "; // │
pub const TREE_INDENT: &str = "    ";

/// Marker in front of search hits when color is off.
pub const MATCH_MARKER: &str = "* ";

/// Styling switch for one render.
///
/// Resolved once from the environment (or forced) and passed down, so a
/// render never mixes colored and plain lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styles {
    color: bool,
}

impl Styles {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Color if the terminal and environment allow it.
    pub fn detect() -> Self {
        Self::new(supports_color())
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    fn color_str(&self, s: &str, rgb: (u8, u8, u8)) -> String {
        if self.color {
            s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
        } else {
            s.to_string()
        }
    }

    fn color_bold_str(&self, s: &str, rgb: (u8, u8, u8)) -> String {
        if self.color {
            s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
        } else {
            s.to_string()
        }
    }

    /// Renders a node label colored by its kind.
    pub fn label(&self, kind: NodeKind, text: &str) -> String {
        match kind {
            NodeKind::Root => self.bold(text),
            NodeKind::Named => text.to_string(),
            NodeKind::Condition => self.color_str(text, WARN),
            NodeKind::Else => self.color_str(text, WARN),
            NodeKind::Action => self.color_str(text, PURPLE),
            NodeKind::End => self.color_str(text, PASS),
            NodeKind::Cycle => self.color_str(text, FAIL),
            NodeKind::Truncated => self.muted(text),
        }
    }

    /// Renders a search hit: accent and bold, or a leading marker without color.
    pub fn highlight(&self, text: &str) -> String {
        if self.color {
            self.color_bold_str(text, ACCENT)
        } else {
            format!("{MATCH_MARKER}{text}")
        }
    }

    /// Renders text with muted (gray) styling.
    pub fn muted(&self, s: &str) -> String {
        self.color_str(s, MUTED)
    }

    /// Renders text in bold.
    pub fn bold(&self, s: &str) -> String {
        if self.color {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }
}
