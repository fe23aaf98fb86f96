//! Derivation of link length and orientation from node positions.

use serde::Serialize;
use tracing::debug;

use crate::model::TrussModel;

/// Outcome of a geometry derivation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DerivationSummary {
    /// Number of links whose length and angle were computed.
    pub derived: usize,
    /// Names of links with at least one endpoint that could not be resolved.
    pub unresolved: Vec<String>,
}

/// Length and angle of the displacement from `node1` to `node2`, when both
/// names resolve in `model`.
pub(crate) fn link_geometry(model: &TrussModel, node1: &str, node2: &str) -> Option<(f64, f64)> {
    let start = model.node(node1)?;
    let end = model.node(node2)?;
    let displacement = end.position - start.position;
    Some((displacement.magnitude(), displacement.angle_rad()))
}

/// Compute the length and angle of every link in `model`.
///
/// Links whose endpoints cannot be resolved keep (or are reset to) an unset
/// length and angle.
///
/// # Examples
/// ```
/// use trussview::{derive_link_geometry, point, Link, Node, TrussModel};
///
/// let mut model = TrussModel::new();
/// model.add_node(Node::new("A", point(0.0, 0.0))).expect("node A");
/// model.add_node(Node::new("B", point(3.0, 4.0))).expect("node B");
/// model.add_link(Link::new("L1", "A", "B")).expect("link L1");
///
/// let summary = derive_link_geometry(&mut model);
/// assert_eq!(summary.derived, 1);
/// assert_eq!(model.link("L1").and_then(|link| link.length), Some(5.0));
/// ```
pub fn derive_link_geometry(model: &mut TrussModel) -> DerivationSummary {
    let snapshot: &TrussModel = model;
    let geometry: Vec<Option<(f64, f64)>> = snapshot
        .links()
        .iter()
        .map(|link| link_geometry(snapshot, &link.node1, &link.node2))
        .collect();

    let mut summary = DerivationSummary::default();
    for (link, derived) in model.links_mut().iter_mut().zip(geometry) {
        match derived {
            Some((length, angle)) => {
                link.length = Some(length);
                link.angle_rad = Some(angle);
                summary.derived += 1;
            }
            None => {
                debug!(link = %link.name, "link endpoints unresolved; geometry left unset");
                link.length = None;
                link.angle_rad = None;
                summary.unresolved.push(link.name.clone());
            }
        }
    }
    summary
}
