//! Interaction state for one rendered diagram.
//!
//! A [`RenderSession`] holds the zoom transform, the visible tooltip and the
//! active search for a single diagram. Several sessions can coexist; nothing
//! here is global.

use std::collections::HashSet;

use tracing::trace;

use crate::layout::{Layout, NodeId};

/// Radius of a node's anchor dot.
pub const DOT_RADIUS: f64 = 5.0;

/// Screen transform: `screen = translate + scale * canvas`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl ZoomState {
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.translate_x + self.scale * x,
            self.translate_y + self.scale * y,
        )
    }

    pub fn to_canvas(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.translate_x) / self.scale,
            (screen_y - self.translate_y) / self.scale,
        )
    }
}

/// Bounds and step of the zoom controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min_scale: f64,
    pub max_scale: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 8.0,
            step: 1.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub node: NodeId,
    pub text: String,
    /// Screen position of the node's dot.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub query: String,
    pub matches: HashSet<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderSession {
    pub zoom: ZoomState,
    pub tooltip: Option<Tooltip>,
    pub search: Option<Search>,
    limits: ZoomLimits,
}

impl RenderSession {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Scale by one step, keeping the canvas origin fixed. Returns the new scale.
    pub fn zoom_in(&mut self) -> f64 {
        self.zoom_at(self.limits.step, 0.0, 0.0)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom_at(1.0 / self.limits.step, 0.0, 0.0)
    }

    /// Multiply the scale by `factor`, clamped to the limits, keeping the
    /// screen point `(screen_x, screen_y)` over the same canvas point.
    pub fn zoom_at(&mut self, factor: f64, screen_x: f64, screen_y: f64) -> f64 {
        let old = self.zoom.scale;
        let new = (old * factor).clamp(self.limits.min_scale, self.limits.max_scale);
        let ratio = new / old;
        self.zoom.translate_x = screen_x - (screen_x - self.zoom.translate_x) * ratio;
        self.zoom.translate_y = screen_y - (screen_y - self.zoom.translate_y) * ratio;
        self.zoom.scale = new;
        trace!(scale = new, "zoom");
        new
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomState::default();
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.zoom.translate_x += dx;
        self.zoom.translate_y += dy;
    }

    /// Highlight nodes whose name or description contains `query`
    /// (case-insensitive). An empty query clears the search. Returns the
    /// number of matches.
    pub fn set_search(&mut self, query: &str, layout: &Layout) -> usize {
        let query = query.trim();
        if query.is_empty() {
            self.search = None;
            return 0;
        }
        let matches: HashSet<NodeId> = layout
            .nodes
            .iter()
            .filter(|n| n.matches(query))
            .map(|n| n.id)
            .collect();
        let count = matches.len();
        self.search = Some(Search {
            query: query.to_string(),
            matches,
        });
        count
    }

    pub fn clear_search(&mut self) {
        self.search = None;
    }

    /// Whether `node` is faded out by the active search.
    pub fn is_dimmed(&self, node: NodeId) -> bool {
        self.search
            .as_ref()
            .is_some_and(|search| !search.matches.contains(&node))
    }

    pub fn is_match(&self, node: NodeId) -> bool {
        self.search
            .as_ref()
            .is_some_and(|search| search.matches.contains(&node))
    }

    /// Node under the screen point, through the inverse zoom transform.
    ///
    /// A node is hit on its background box or its dot; where boxes overlap,
    /// the one drawn last wins.
    pub fn hit_test(&self, layout: &Layout, screen_x: f64, screen_y: f64) -> Option<NodeId> {
        let (cx, cy) = self.zoom.to_canvas(screen_x, screen_y);
        let x = cx - layout.options.margin_left;
        let y = cy - layout.options.margin_top;
        let width = layout.options.node_width;
        let half_height = layout.options.node_height / 2.0;

        layout
            .nodes
            .iter()
            .rev()
            .find(|node| {
                let dx = x - node.x;
                let dy = y - node.y;
                let left = node.box_x(width);
                let in_box = dx >= left && dx <= left + width && dy.abs() <= half_height;
                let in_dot = dx * dx + dy * dy <= DOT_RADIUS * DOT_RADIUS;
                in_box || in_dot
            })
            .map(|node| node.id)
    }

    /// Show the tooltip for `node`. Returns `None` for an unknown id.
    pub fn show_tooltip(&mut self, layout: &Layout, node: NodeId) -> Option<&Tooltip> {
        let laid = layout.node(node)?;
        let (x, y) = self.zoom.to_screen(
            laid.x + layout.options.margin_left,
            laid.y + layout.options.margin_top,
        );
        self.tooltip = Some(Tooltip {
            node,
            text: laid.tooltip_text(),
            x,
            y,
        });
        self.tooltip.as_ref()
    }

    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutOptions, layout_tree};
    use flowtree_core::DisplayNode;
    use pretty_assertions::assert_eq;

    fn layout() -> Layout {
        let tree = DisplayNode::root()
            .with_child(DisplayNode::new("Order").with_description("Places an order"))
            .with_child(DisplayNode::new("Refund"));
        layout_tree(&tree, &LayoutOptions::default())
    }

    #[test]
    fn zoom_is_clamped() {
        let mut session = RenderSession::new(ZoomLimits {
            min_scale: 0.5,
            max_scale: 2.0,
            step: 1.5,
        });
        assert_eq!(session.zoom_in(), 1.5);
        assert_eq!(session.zoom_in(), 2.0);
        assert_eq!(session.zoom_in(), 2.0);
        session.reset_zoom();
        assert_eq!(session.zoom_out(), 1.0 / 1.5);
        assert_eq!(session.zoom_out(), 0.5);
    }

    #[test]
    fn zoom_at_keeps_point_fixed() {
        let mut session = RenderSession::default();
        session.pan_by(30.0, -10.0);
        let before = session.zoom.to_canvas(200.0, 100.0);
        session.zoom_at(2.0, 200.0, 100.0);
        let after = session.zoom.to_canvas(200.0, 100.0);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn search_counts_and_dims() {
        let layout = layout();
        let mut session = RenderSession::default();
        assert!(!session.is_dimmed(0));

        assert_eq!(session.set_search("ORDER", &layout), 1);
        assert!(session.is_match(1));
        assert!(!session.is_dimmed(1));
        assert!(session.is_dimmed(2));

        assert_eq!(session.set_search("places", &layout), 1);
        assert_eq!(session.set_search("", &layout), 0);
        assert!(session.search.is_none());
        assert!(!session.is_dimmed(2));
    }

    #[test]
    fn hit_test_inverts_transform() {
        let layout = layout();
        let mut session = RenderSession::default();
        let order = layout.node(1).unwrap().clone();
        let screen = |s: &RenderSession| {
            s.zoom.to_screen(
                order.x + layout.options.margin_left + 20.0,
                order.y + layout.options.margin_top,
            )
        };

        let (sx, sy) = screen(&session);
        assert_eq!(session.hit_test(&layout, sx, sy), Some(1));

        session.zoom_in();
        session.pan_by(40.0, 25.0);
        let (sx, sy) = screen(&session);
        assert_eq!(session.hit_test(&layout, sx, sy), Some(1));

        assert_eq!(session.hit_test(&layout, -5000.0, -5000.0), None);
    }

    #[test]
    fn tooltip_shows_name_and_description() {
        let layout = layout();
        let mut session = RenderSession::default();
        let tip = session.show_tooltip(&layout, 1).unwrap();
        assert_eq!(tip.text, "Order\nPlaces an order");
        assert_eq!(tip.node, 1);
        assert!(session.show_tooltip(&layout, 99).is_none());
        session.hide_tooltip();
        assert!(session.tooltip.is_none());
    }
}
