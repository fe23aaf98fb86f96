//! Plain-text design report for an imported truss.

use std::fmt;

use serde::Serialize;

use crate::model::{Link, TrussModel};

/// Placeholder printed for values that were never set or derived.
const UNSET: &str = "n/a";

/// The link with the greatest derived length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LongestLink {
    /// Name of the link.
    pub name: String,
    /// Derived length of the link.
    pub length: f64,
    /// Name of the first endpoint.
    pub node1: String,
    /// Name of the second endpoint.
    pub node2: String,
}

impl fmt::Display for LongestLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (length {:.2}, {} -> {})",
            self.name, self.length, self.node1, self.node2
        )
    }
}

/// Rendered report together with the longest-link record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrussReport {
    /// Multi-line report text.
    pub text: String,
    /// Longest link, or `None` when no link has a derived length.
    pub longest: Option<LongestLink>,
}

/// Formats a [`TrussModel`] as a fixed-layout report.
///
/// Numbers are printed with two decimals. Angles are in radians.
#[derive(Clone, Copy, Debug)]
pub struct ReportFormatter<'a> {
    /// Model being reported on.
    model: &'a TrussModel,
}

impl<'a> ReportFormatter<'a> {
    /// Wrap `model` for formatting.
    #[must_use]
    pub fn new(model: &'a TrussModel) -> Self {
        Self { model }
    }

    /// Find the longest link.
    ///
    /// Links without a derived length do not compete. Ties go to the link
    /// that appears first.
    #[must_use]
    pub fn longest_link(&self) -> Option<LongestLink> {
        let mut longest: Option<(&Link, f64)> = None;
        for link in self.model.links() {
            let Some(length) = link.length else {
                continue;
            };
            if longest.map_or(true, |(_, best)| length > best) {
                longest = Some((link, length));
            }
        }
        longest.map(|(link, length)| LongestLink {
            name: link.name.clone(),
            length,
            node1: link.node1.clone(),
            node2: link.node2.clone(),
        })
    }

    /// Render the report text and pick out the longest link.
    #[must_use]
    pub fn render(&self) -> TrussReport {
        TrussReport {
            text: self.to_string(),
            longest: self.longest_link(),
        }
    }
}

/// Two-decimal number, or the unset placeholder.
fn fixed(value: Option<f64>) -> String {
    value.map_or_else(|| UNSET.to_owned(), |value| format!("{value:.2}"))
}

impl fmt::Display for ReportFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let material = self.model.material();
        writeln!(f, "\tTruss Design Report")?;
        writeln!(f, "Title:  {}", self.model.title().unwrap_or(UNSET))?;
        writeln!(f, "Static Factor of Safety:  {}", fixed(material.static_factor))?;
        writeln!(f, "Ultimate Strength:  {}", fixed(material.uts))?;
        writeln!(f, "Yield Strength:  {}", fixed(material.ys))?;
        writeln!(f, "Modulus of Elasticity:  {}", fixed(material.modulus))?;
        writeln!(f, "_____________Link Summary________________")?;
        writeln!(f, "Link\t(1)\t(2)\tLength\tAngle")?;
        if self.model.links().is_empty() {
            writeln!(f, "(no links)")?;
        }
        for link in self.model.links() {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}",
                link.name,
                link.node1,
                link.node2,
                fixed(link.length),
                fixed(link.angle_rad)
            )?;
        }
        Ok(())
    }
}

/// Render the design report for `model`.
///
/// # Examples
/// ```
/// use trussview::{render_report, TrussModel};
///
/// let report = render_report(&TrussModel::new());
/// assert!(report.text.contains("Truss Design Report"));
/// assert!(report.longest.is_none());
/// ```
#[must_use]
pub fn render_report(model: &TrussModel) -> TrussReport {
    ReportFormatter::new(model).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_link_geometry;
    use crate::geometry::point;
    use crate::model::Node;

    /// Three links of lengths 5, 10 and 7 hanging off the origin.
    fn fan() -> TrussModel {
        let mut model = TrussModel::new();
        model.add_node(Node::new("O", point(0.0, 0.0))).expect("O");
        model.add_node(Node::new("P", point(3.0, 4.0))).expect("P");
        model.add_node(Node::new("Q", point(6.0, 8.0))).expect("Q");
        model.add_node(Node::new("R", point(0.0, 7.0))).expect("R");
        model.add_link(Link::new("L5", "O", "P")).expect("L5");
        model.add_link(Link::new("L10", "O", "Q")).expect("L10");
        model.add_link(Link::new("L7", "O", "R")).expect("L7");
        derive_link_geometry(&mut model);
        model
    }

    #[test]
    fn identifies_longest_link() {
        let report = render_report(&fan());
        let longest = report.longest.expect("links present");
        assert_eq!(longest.name, "L10");
        assert_eq!(longest.length, 10.0);
        assert_eq!((longest.node1.as_str(), longest.node2.as_str()), ("O", "Q"));
    }

    #[test]
    fn first_link_wins_ties() {
        let mut model = TrussModel::new();
        model.add_node(Node::new("A", point(0.0, 0.0))).expect("A");
        model.add_node(Node::new("B", point(1.0, 0.0))).expect("B");
        model.add_node(Node::new("C", point(0.0, 1.0))).expect("C");
        model.add_link(Link::new("AB", "A", "B")).expect("AB");
        model.add_link(Link::new("AC", "A", "C")).expect("AC");
        derive_link_geometry(&mut model);
        let longest = ReportFormatter::new(&model).longest_link().expect("links present");
        assert_eq!(longest.name, "AB");
    }

    #[test]
    fn underived_links_do_not_compete() {
        let mut model = TrussModel::new();
        model.add_node(Node::new("A", point(0.0, 0.0))).expect("A");
        model.add_node(Node::new("B", point(1.0, 0.0))).expect("B");
        model.add_link(Link::new("AB", "A", "B")).expect("AB");
        let report = render_report(&model);
        assert!(report.longest.is_none());
        assert!(report.text.contains("AB\tA\tB\tn/a\tn/a"));
    }

    #[test]
    fn formats_material_and_link_rows() {
        let mut model = fan();
        model.set_title("Fan Test Truss");
        let material = model.material_mut();
        material.uts = Some(400.0);
        material.ys = Some(250.5);
        material.modulus = Some(200_000.0);
        material.static_factor = Some(2.0);

        let text = render_report(&model).text;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "\tTruss Design Report");
        assert_eq!(lines[1], "Title:  Fan Test Truss");
        assert_eq!(lines[2], "Static Factor of Safety:  2.00");
        assert_eq!(lines[3], "Ultimate Strength:  400.00");
        assert_eq!(lines[4], "Yield Strength:  250.50");
        assert_eq!(lines[5], "Modulus of Elasticity:  200000.00");
        assert_eq!(lines[7], "Link\t(1)\t(2)\tLength\tAngle");
        assert_eq!(lines[8], "L5\tO\tP\t5.00\t0.93");
        assert_eq!(lines[9], "L10\tO\tQ\t10.00\t0.93");
        assert_eq!(lines[10], "L7\tO\tR\t7.00\t1.57");
    }

    #[test]
    fn empty_model_reports_placeholders() {
        let report = render_report(&TrussModel::new());
        assert!(report.longest.is_none());
        assert!(report.text.contains("Title:  n/a"));
        assert!(report.text.contains("Ultimate Strength:  n/a"));
        assert!(report.text.ends_with("(no links)\n"));
    }
}
