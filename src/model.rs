//! Core data structures describing an imported truss.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::derive::link_geometry;
use crate::errors::ModelEditError;
use crate::geometry::Vector2D;

/// A named joint of the truss.
///
/// Two nodes are equal when both their names and positions match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    /// Unique name of the node within its model.
    pub name: String,
    /// Absolute position of the node.
    pub position: Vector2D,
}

impl Node {
    /// Create a node at `position`.
    pub fn new(name: impl Into<String>, position: Vector2D) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// A straight member connecting two nodes, referenced by name.
///
/// `length` and `angle_rad` are derived from the endpoint positions and stay
/// `None` until [`derive_link_geometry`](crate::derive_link_geometry) resolves
/// both endpoints.
///
/// Equality compares endpoint names and derived geometry only. Two links with
/// different names but identical endpoints and geometry compare equal.
#[derive(Clone, Debug, Serialize)]
pub struct Link {
    /// Name of the link.
    pub name: String,
    /// Name of the first endpoint.
    pub node1: String,
    /// Name of the second endpoint.
    pub node2: String,
    /// Distance between the endpoints.
    pub length: Option<f64>,
    /// Orientation of `node2 - node1` in the X-Y plane, in radians.
    pub angle_rad: Option<f64>,
}

impl Link {
    /// Create a link with no derived geometry.
    pub fn new(name: impl Into<String>, node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node1: node1.into(),
            node2: node2.into(),
            length: None,
            angle_rad: None,
        }
    }

    /// Orientation of the link in degrees, when derived.
    #[must_use]
    pub fn angle_deg(&self) -> Option<f64> {
        self.angle_rad.map(f64::to_degrees)
    }

    /// Whether the link touches the node called `name`.
    #[must_use]
    pub fn connects(&self, name: &str) -> bool {
        self.node1 == name || self.node2 == name
    }
}

impl PartialEq for Link {
    fn eq(&self, other: &Self) -> bool {
        self.node1 == other.node1
            && self.node2 == other.node2
            && self.length == other.length
            && self.angle_rad == other.angle_rad
    }
}

/// Material strength data attached to the truss.
///
/// The values are stored for reporting only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Material {
    /// Ultimate tensile strength.
    pub uts: Option<f64>,
    /// Yield strength.
    pub ys: Option<f64>,
    /// Elastic modulus.
    pub modulus: Option<f64>,
    /// Static factor of safety.
    pub static_factor: Option<f64>,
}

/// Container for an imported truss: title, material, nodes and links.
///
/// Nodes and links keep their insertion order. Links refer to nodes by name
/// and are resolved through the model's name index on demand.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TrussModel {
    /// Free-form title.
    title: Option<String>,
    /// Nodes in insertion order.
    nodes: Vec<Node>,
    /// Links in insertion order.
    links: Vec<Link>,
    /// Material properties.
    material: Material,
    /// Node name to position in `nodes`.
    #[serde(skip)]
    node_index: HashMap<String, usize>,
    /// Link name to position in `links`.
    #[serde(skip)]
    link_index: HashMap<String, usize>,
}

impl TrussModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use trussview::TrussModel;
    ///
    /// let model = TrussModel::new();
    /// assert_eq!(model.node_count(), 0);
    /// assert!(model.title().is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every node and link and reset the title and material.
    pub fn clear(&mut self) {
        self.title = None;
        self.nodes.clear();
        self.links.clear();
        self.material = Material::default();
        self.node_index.clear();
        self.link_index.clear();
    }

    /// Title of the truss, if one was set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Material properties of the truss.
    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Mutable access to the material properties.
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Nodes in insertion order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Links in insertion order.
    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Mutable access to the links, used when writing derived geometry.
    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    /// Return the number of nodes in the truss.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of links in the truss.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Look up a node by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_index.get(name).map(|&idx| &self.nodes[idx])
    }

    /// Whether a node called `name` exists.
    #[must_use]
    pub fn has_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Look up a link by name.
    #[must_use]
    pub fn link(&self, name: &str) -> Option<&Link> {
        self.link_index.get(name).map(|&idx| &self.links[idx])
    }

    /// Whether a link called `name` exists.
    #[must_use]
    pub fn has_link(&self, name: &str) -> bool {
        self.link_index.contains_key(name)
    }

    /// Append a node to the truss.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::DuplicateNode`] when a node with the same name
    /// already exists. The existing node is left untouched.
    pub fn add_node(&mut self, node: Node) -> Result<usize, ModelEditError> {
        if self.has_node(&node.name) {
            return Err(ModelEditError::DuplicateNode(node.name));
        }
        let idx = self.nodes.len();
        self.node_index.insert(node.name.clone(), idx);
        self.nodes.push(node);
        Ok(idx)
    }

    /// Append a link between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::DuplicateLink`] when the link name is taken
    /// and [`ModelEditError::UnknownNode`] when either endpoint is missing.
    ///
    /// # Examples
    /// ```
    /// use trussview::{point, Link, ModelEditError, Node, TrussModel};
    ///
    /// let mut model = TrussModel::new();
    /// model.add_node(Node::new("A", point(0.0, 0.0))).expect("node accepted");
    /// let error = model
    ///     .add_link(Link::new("L1", "A", "B"))
    ///     .expect_err("dangling link rejected");
    /// assert_eq!(error, ModelEditError::UnknownNode("B".to_owned()));
    /// ```
    pub fn add_link(&mut self, link: Link) -> Result<usize, ModelEditError> {
        if self.has_link(&link.name) {
            return Err(ModelEditError::DuplicateLink(link.name));
        }
        for endpoint in [&link.node1, &link.node2] {
            if !self.has_node(endpoint) {
                return Err(ModelEditError::UnknownNode(endpoint.clone()));
            }
        }
        let idx = self.links.len();
        self.link_index.insert(link.name.clone(), idx);
        self.links.push(link);
        Ok(idx)
    }

    /// Move a node and refresh the geometry of every link attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`ModelEditError::UnknownNode`] when `name` is not part of this truss.
    pub fn move_node(&mut self, name: &str, position: Vector2D) -> Result<(), ModelEditError> {
        let Some(&idx) = self.node_index.get(name) else {
            return Err(ModelEditError::UnknownNode(name.to_owned()));
        };
        self.nodes[idx].position = position;

        let snapshot: &Self = self;
        let updates: Vec<(usize, Option<(f64, f64)>)> = snapshot
            .links
            .iter()
            .enumerate()
            .filter(|(_, link)| link.connects(name))
            .map(|(link_idx, link)| (link_idx, link_geometry(snapshot, &link.node1, &link.node2)))
            .collect();
        for (link_idx, geometry) in updates {
            let link = &mut self.links[link_idx];
            link.length = geometry.map(|(length, _)| length);
            link.angle_rad = geometry.map(|(_, angle)| angle);
        }
        Ok(())
    }

    /// Build an undirected graph view with one vertex per node and one edge
    /// per resolvable link. Vertex indices follow node insertion order.
    #[must_use]
    pub fn connectivity(&self) -> UnGraph<&str, &str> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.links.len());
        for node in &self.nodes {
            graph.add_node(node.name.as_str());
        }
        for link in &self.links {
            if let (Some(&a), Some(&b)) = (
                self.node_index.get(&link.node1),
                self.node_index.get(&link.node2),
            ) {
                graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), link.name.as_str());
            }
        }
        graph
    }

    /// Number of disconnected pieces in the truss. An empty model has none.
    #[must_use]
    pub fn connected_groups(&self) -> usize {
        petgraph::algo::connected_components(&self.connectivity())
    }
}
