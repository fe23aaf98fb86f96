//! Renderer-neutral description of a truss drawing.
//!
//! A [`Scene`] lists everything a drawing surface needs: a padded bounding
//! rectangle, background grid lines, one marker per node and one segment per
//! link. Coordinates are model coordinates with Y pointing up; flipping and
//! styling are left to the [`SceneSink`].

use std::convert::Infallible;
use std::io::Write;

use serde::Serialize;

use crate::config::SceneConfig;
use crate::geometry::Vector2D;
use crate::model::TrussModel;

/// Axis-aligned rectangle in model coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    /// Smallest X coordinate.
    pub left: f64,
    /// Largest X coordinate.
    pub right: f64,
    /// Smallest Y coordinate.
    pub bottom: f64,
    /// Largest Y coordinate.
    pub top: f64,
}

impl Rect {
    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector2D>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let start = Self {
            left: first.x,
            right: first.x,
            bottom: first.y,
            top: first.y,
        };
        Some(points.fold(start, |rect, p| Self {
            left: rect.left.min(p.x),
            right: rect.right.max(p.x),
            bottom: rect.bottom.min(p.y),
            top: rect.top.max(p.y),
        }))
    }

    /// Grow the rectangle by `margin` on every side.
    #[must_use]
    pub fn padded(self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            right: self.right + margin,
            bottom: self.bottom - margin,
            top: self.top + margin,
        }
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vector2D {
        Vector2D::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
            0.0,
        )
    }
}

/// Straight line between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    /// First end point.
    pub start: Vector2D,
    /// Second end point.
    pub end: Vector2D,
}

/// Circular marker and label for one node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeMarker {
    /// Node name, used as the label text.
    pub name: String,
    /// Marker centre.
    pub center: Vector2D,
    /// Marker radius.
    pub radius: f64,
    /// Where the label is anchored.
    pub label_anchor: Vector2D,
}

/// Line drawn for one link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LinkSegment {
    /// Link name.
    pub name: String,
    /// Name of the node at `segment.start`.
    pub node1: String,
    /// Name of the node at `segment.end`.
    pub node2: String,
    /// Line between the two node positions.
    pub segment: Segment,
}

/// Everything needed to draw a truss.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    /// Padded bounding rectangle, absent when the model has no nodes.
    pub bounds: Option<Rect>,
    /// Background grid lines covering `bounds`.
    pub grid: Vec<Segment>,
    /// One marker per node, in model order.
    pub nodes: Vec<NodeMarker>,
    /// One segment per link whose endpoints resolve, in model order.
    pub links: Vec<LinkSegment>,
}

impl Scene {
    /// Lay out `model` according to `config`.
    ///
    /// # Examples
    /// ```
    /// use trussview::{point, Node, Scene, SceneConfig, TrussModel};
    ///
    /// let mut model = TrussModel::new();
    /// model.add_node(Node::new("A", point(0.0, 0.0))).expect("node accepted");
    /// let scene = Scene::build(&model, &SceneConfig::default());
    /// assert_eq!(scene.nodes.len(), 1);
    /// assert_eq!(scene.bounds.map(|b| b.width()), Some(100.0));
    /// ```
    #[must_use]
    pub fn build(model: &TrussModel, config: &SceneConfig) -> Self {
        let bounds = Rect::enclosing(model.nodes().iter().map(|node| node.position))
            .map(|rect| rect.padded(config.margin));
        let grid = bounds.map_or_else(Vec::new, |rect| grid_lines(rect, config.grid_spacing));

        let [label_dx, label_dy] = config.label_offset;
        let nodes = model
            .nodes()
            .iter()
            .map(|node| NodeMarker {
                name: node.name.clone(),
                center: node.position,
                radius: config.node_radius,
                label_anchor: node.position + Vector2D::new(label_dx, label_dy, 0.0),
            })
            .collect();

        let links = model
            .links()
            .iter()
            .filter_map(|link| {
                let start = model.node(&link.node1)?.position;
                let end = model.node(&link.node2)?.position;
                Some(LinkSegment {
                    name: link.name.clone(),
                    node1: link.node1.clone(),
                    node2: link.node2.clone(),
                    segment: Segment { start, end },
                })
            })
            .collect();

        Self {
            bounds,
            grid,
            nodes,
            links,
        }
    }
}

/// Upper bound on grid divisions along either axis.
const MAX_GRID_DIVISIONS: f64 = 200.0;

/// Vertical then horizontal grid lines spaced `spacing` apart, starting at
/// the left and bottom edges of `rect`.
///
/// The spacing is widened when the rectangle would need more than
/// [`MAX_GRID_DIVISIONS`] cells along an axis. Rectangles with a non-finite
/// extent get no grid.
fn grid_lines(rect: Rect, spacing: f64) -> Vec<Segment> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }
    if !rect.width().is_finite() || !rect.height().is_finite() {
        return Vec::new();
    }
    let spacing = spacing
        .max(rect.width() / MAX_GRID_DIVISIONS)
        .max(rect.height() / MAX_GRID_DIVISIONS);
    // Only lines inside the rectangle are drawn.
    let columns = (rect.width() / spacing).floor() as usize;
    let rows = (rect.height() / spacing).floor() as usize;

    let vertical = (0..=columns).map(|i| {
        let x = rect.left + spacing * i as f64;
        Segment {
            start: Vector2D::new(x, rect.bottom, 0.0),
            end: Vector2D::new(x, rect.top, 0.0),
        }
    });
    let horizontal = (0..=rows).map(|i| {
        let y = rect.bottom + spacing * i as f64;
        Segment {
            start: Vector2D::new(rect.left, y, 0.0),
            end: Vector2D::new(rect.right, y, 0.0),
        }
    });
    vertical.chain(horizontal).collect()
}

/// Drawing surface that consumes finished scenes.
pub trait SceneSink {
    /// Error produced when the scene cannot be drawn.
    type Error: std::error::Error;

    /// Draw `scene`.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when drawing fails.
    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error>;
}

/// Collects every scene it is handed.
impl SceneSink for Vec<Scene> {
    type Error = Infallible;

    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        self.push(scene.clone());
        Ok(())
    }
}

/// Writes each scene as pretty-printed JSON.
#[derive(Debug)]
pub struct JsonSceneSink<W: Write> {
    /// Destination for the JSON text.
    writer: W,
}

impl<W: Write> JsonSceneSink<W> {
    /// Write scenes to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SceneSink for JsonSceneSink<W> {
    type Error = serde_json::Error;

    fn draw(&mut self, scene: &Scene) -> Result<(), Self::Error> {
        serde_json::to_writer_pretty(&mut self.writer, scene)?;
        self.writer.write_all(b"\n").map_err(serde_json::Error::io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;
    use crate::model::{Link, Node};

    fn two_node_model() -> TrussModel {
        let mut model = TrussModel::new();
        model.add_node(Node::new("A", point(0.0, 0.0))).expect("A");
        model.add_node(Node::new("B", point(30.0, 40.0))).expect("B");
        model.add_link(Link::new("L1", "A", "B")).expect("L1");
        model
    }

    #[test]
    fn bounds_are_padded_by_margin() {
        let scene = Scene::build(&two_node_model(), &SceneConfig::default());
        let bounds = scene.bounds.expect("nodes present");
        assert_eq!(
            bounds,
            Rect {
                left: -50.0,
                right: 80.0,
                bottom: -50.0,
                top: 90.0
            }
        );
        assert_eq!(bounds.center(), point(15.0, 20.0));
    }

    #[test]
    fn grid_covers_bounds() {
        let scene = Scene::build(&two_node_model(), &SceneConfig::default());
        // 130 wide and 140 tall at spacing 10.
        assert_eq!(scene.grid.len(), 14 + 15);
        assert_eq!(scene.grid[0].start, point(-50.0, -50.0));
        assert_eq!(scene.grid[13].start.x, 80.0);
        assert_eq!(scene.grid[14].end, point(80.0, -50.0));
    }

    #[test]
    fn markers_and_links_follow_model() {
        let scene = Scene::build(&two_node_model(), &SceneConfig::default());
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[1].name, "B");
        assert_eq!(scene.nodes[1].radius, 7.0);
        assert_eq!(scene.nodes[1].label_anchor, point(15.0, 55.0));
        assert_eq!(scene.links.len(), 1);
        assert_eq!(
            scene.links[0].segment,
            Segment {
                start: point(0.0, 0.0),
                end: point(30.0, 40.0)
            }
        );
    }

    #[test]
    fn non_finite_bounds_get_no_grid() {
        let mut model = TrussModel::new();
        model.add_node(Node::new("A", point(f64::INFINITY, 0.0))).expect("A");
        model.add_node(Node::new("B", point(0.0, 0.0))).expect("B");
        let scene = Scene::build(&model, &SceneConfig::default());
        assert!(scene.grid.is_empty());
        assert_eq!(scene.nodes.len(), 2);
    }

    #[test]
    fn wide_spread_widens_grid_spacing() {
        let mut model = TrussModel::new();
        model.add_node(Node::new("A", point(0.0, 0.0))).expect("A");
        model.add_node(Node::new("B", point(2.0e6, 2.0e6))).expect("B");
        let scene = Scene::build(&model, &SceneConfig::default());
        assert!(!scene.grid.is_empty());
        assert!(scene.grid.len() <= 2 * (MAX_GRID_DIVISIONS as usize + 1));
        let bounds = scene.bounds.expect("nodes present");
        assert_eq!(scene.grid[0].start, point(bounds.left, bounds.bottom));
    }

    #[test]
    fn empty_model_has_no_bounds_or_grid() {
        let scene = Scene::build(&TrussModel::new(), &SceneConfig::default());
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn json_sink_writes_scene() {
        let scene = Scene::build(&two_node_model(), &SceneConfig::default());
        let mut sink = JsonSceneSink::new(Vec::new());
        sink.draw(&scene).expect("writing to memory succeeds");
        let json: serde_json::Value =
            serde_json::from_slice(&sink.into_inner()).expect("valid JSON");
        assert_eq!(json["links"][0]["name"], "L1");
        assert_eq!(json["nodes"][0]["center"]["x"], 0.0);
        assert_eq!(json["bounds"]["left"], -50.0);
    }
}
