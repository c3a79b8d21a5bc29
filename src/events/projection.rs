use egui::{Painter, Pos2, Rect, Vec2, Visuals};

use crate::node::{DropPosition, NodeId, Placement};

use super::EventManager;
use super::store::NodeStore;

/// Laid-out geometry of one node element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeGeometry {
    /// Border box.
    pub outer: Rect,

    /// Content box (inside padding).
    pub inner: Rect,

    /// The element flows horizontally with its siblings (inline / floated).
    pub inline: bool,
}

impl NodeGeometry {
    pub fn new(rect: Rect) -> Self {
        Self {
            outer: rect,
            inner: rect,
            inline: false,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.inner = self.outer.shrink(padding);
        self
    }

    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

/// Reads element geometry for nodes (the host's layout or DOM).
pub trait GeometrySource {
    fn node_geometry(&self, id: &NodeId) -> Option<NodeGeometry>;
}

/// Where to draw the insertion indicator for `placement`.
///
/// - Over a sibling: a bar on its leading (`Before`) or trailing (`After`) edge, vertical if
///   the sibling flows inline.
/// - Otherwise: a bar along the top of the parent's content box.
pub fn project_placeholder(
    placement: &Placement,
    parent: NodeGeometry,
    current: Option<NodeGeometry>,
    thickness: f32,
) -> Rect {
    let half = thickness.max(0.0) * 0.5;

    let Some(current) = current else {
        let inner = parent.inner;
        return Rect::from_min_size(inner.min, Vec2::new(inner.width(), half * 2.0));
    };

    let r = current.outer;
    if current.inline {
        let x = match placement.position {
            DropPosition::Before => r.left(),
            DropPosition::After => r.right(),
        };
        Rect::from_min_max(Pos2::new(x - half, r.top()), Pos2::new(x + half, r.bottom()))
    } else {
        let y = match placement.position {
            DropPosition::Before => r.top(),
            DropPosition::After => r.bottom(),
        };
        Rect::from_min_max(Pos2::new(r.left(), y - half), Pos2::new(r.right(), y + half))
    }
}

/// Everything a renderer needs to draw the current placeholder.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceholderView {
    pub placeholder: Placement,
    pub suggested_rect: Rect,
    /// How long a renderer should ease the indicator towards a new rect.
    pub transition_secs: f32,
}

/// Draws the placeholder indicator.
pub trait PlaceholderRenderer {
    fn paint(&mut self, painter: &Painter, visuals: &Visuals, view: &PlaceholderView);
}

/// Selection-colored bar for valid drops, error-colored bar for rejected ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPlaceholderRenderer;

impl PlaceholderRenderer for DefaultPlaceholderRenderer {
    fn paint(&mut self, painter: &Painter, visuals: &Visuals, view: &PlaceholderView) {
        let color = if view.placeholder.is_valid() {
            visuals.selection.bg_fill
        } else {
            visuals.error_fg_color
        };
        painter.rect_filled(view.suggested_rect, 1.0, color);
    }
}

impl<Props> EventManager<Props> {
    /// The standing placeholder, projected onto element geometry.
    ///
    /// `None` if there is no placeholder or the parent element has no geometry yet.
    pub fn placeholder_view<S: NodeStore + ?Sized>(
        &self,
        store: &S,
        geometry: &dyn GeometrySource,
    ) -> Option<PlaceholderView> {
        let placeholder = store.events().placeholder.as_ref()?;
        let parent = geometry.node_geometry(&placeholder.parent)?;
        let current = placeholder
            .current_node
            .as_ref()
            .and_then(|id| geometry.node_geometry(id));

        Some(PlaceholderView {
            suggested_rect: project_placeholder(
                placeholder,
                parent,
                current,
                self.options.placeholder_thickness,
            ),
            placeholder: placeholder.clone(),
            transition_secs: self.options.placeholder_transition_secs,
        })
    }

    /// Paint the standing placeholder (if any) with `renderer`.
    pub fn paint_placeholder<S: NodeStore + ?Sized>(
        &self,
        store: &S,
        geometry: &dyn GeometrySource,
        painter: &Painter,
        renderer: &mut dyn PlaceholderRenderer,
    ) {
        if let Some(view) = self.placeholder_view(store, geometry) {
            renderer.paint(painter, &painter.ctx().style().visuals, &view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(Pos2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn bar_on_bottom_edge_after_block_sibling() {
        let placement = Placement::new("p", 0, DropPosition::After).with_current_node("c");
        let parent = NodeGeometry::new(rect(0.0, 0.0, 200.0, 200.0));
        let current = NodeGeometry::new(rect(10.0, 20.0, 100.0, 30.0));
        let bar = project_placeholder(&placement, parent, Some(current), 2.0);
        assert_eq!(bar, Rect::from_min_max(Pos2::new(10.0, 49.0), Pos2::new(110.0, 51.0)));
    }

    #[test]
    fn vertical_bar_before_inline_sibling() {
        let placement = Placement::new("p", 1, DropPosition::Before).with_current_node("c");
        let parent = NodeGeometry::new(rect(0.0, 0.0, 200.0, 200.0));
        let current = NodeGeometry::new(rect(40.0, 0.0, 20.0, 10.0)).inline();
        let bar = project_placeholder(&placement, parent, Some(current), 4.0);
        assert_eq!(bar, Rect::from_min_max(Pos2::new(38.0, 0.0), Pos2::new(42.0, 10.0)));
    }

    #[test]
    fn empty_parent_gets_bar_inside_padding() {
        let placement = Placement::new("p", 0, DropPosition::Before);
        let parent = NodeGeometry::new(rect(0.0, 0.0, 100.0, 50.0)).with_padding(8.0);
        let bar = project_placeholder(&placement, parent, None, 2.0);
        assert_eq!(bar, rect(8.0, 8.0, 84.0, 2.0));
    }
}
