//! Line-oriented parser that populates a [`TrussModel`] from a truss
//! description file.
//!
//! Each line is classified by the first keyword it contains, in this order:
//! comment (`#` at the start), `title`, `link`, `node`, `material`,
//! `static_factor`. Keyword matching is case-insensitive and may hit anywhere
//! in the line; stored values keep their original case.
//!
//! ```text
//! title 'Simple Bridge Truss'
//! material 400, 250, 200000
//! static_factor 2.0
//! node, A, 0, 0
//! node, B, 3, 4
//! link L1, A, B
//! ```
//!
//! Links may only refer to nodes defined on earlier lines. A link that names
//! an unknown node is discarded and is not retried once the node appears.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::{ModelEditError, ParseError};
use crate::geometry::{parse_number, Vector2D};
use crate::model::{Link, Node, TrussModel};

/// Kind of an input line, decided by the first matching keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LineKind {
    /// Line starting with `#`.
    Comment,
    /// Line carrying the truss title.
    Title,
    /// Line defining a link between two nodes.
    Link,
    /// Line defining a node.
    Node,
    /// Line carrying material strengths.
    Material,
    /// Line carrying the static factor of safety.
    StaticFactor,
    /// Line with no recognised keyword.
    Ignored,
}

impl LineKind {
    /// Classify a raw input line.
    ///
    /// # Examples
    /// ```
    /// use trussview::LineKind;
    ///
    /// assert_eq!(LineKind::classify("  NODE, A, 0, 0"), LineKind::Node);
    /// assert_eq!(LineKind::classify("# node, A, 0, 0"), LineKind::Comment);
    /// assert_eq!(LineKind::classify("blank"), LineKind::Ignored);
    /// ```
    #[must_use]
    pub fn classify(line: &str) -> Self {
        let folded = line.trim().to_lowercase();
        if folded.starts_with('#') {
            Self::Comment
        } else if folded.contains("title") {
            Self::Title
        } else if folded.contains("link") {
            Self::Link
        } else if folded.contains("node") {
            Self::Node
        } else if folded.contains("material") {
            Self::Material
        } else if folded.contains("static_factor") {
            Self::StaticFactor
        } else {
            Self::Ignored
        }
    }
}

/// A line that was skipped because it could not be parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct LineDiagnostic {
    /// One-based line number within the input.
    pub line: usize,
    /// How the line was classified.
    pub kind: LineKind,
    /// Why the line was rejected.
    pub error: ParseError,
}

/// Bookkeeping for a single import pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportOutcome {
    /// Total number of lines scanned.
    pub lines_read: usize,
    /// Number of nodes added to the model.
    pub nodes_added: usize,
    /// Number of links added to the model.
    pub links_added: usize,
    /// Names of node definitions skipped because the name was already taken.
    pub duplicate_nodes: Vec<String>,
    /// Names of link definitions skipped because the name was already taken.
    pub duplicate_links: Vec<String>,
    /// Names of links discarded because an endpoint was not yet defined.
    pub dangling_links: Vec<String>,
    /// Number of comment lines.
    pub comments: usize,
    /// Number of lines without a recognised keyword.
    pub ignored: usize,
    /// Lines that were recognised but malformed.
    pub malformed: Vec<LineDiagnostic>,
}

impl ImportOutcome {
    /// Whether every recognised line was parsed successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Builds a [`TrussModel`] from the lines of a truss description.
#[derive(Clone, Copy, Debug, Default)]
pub struct Importer;

impl Importer {
    /// Create an importer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Clear `model` and repopulate it from `lines`.
    ///
    /// Malformed lines are logged and recorded in the returned outcome; they
    /// never abort the import. Geometry is not derived here.
    ///
    /// # Examples
    /// ```
    /// use trussview::{Importer, TrussModel};
    ///
    /// let mut model = TrussModel::new();
    /// let outcome = Importer::new().import(
    ///     ["node, A, 0, 0", "node, B, 3, 4", "link L1, A, B"],
    ///     &mut model,
    /// );
    /// assert_eq!(outcome.nodes_added, 2);
    /// assert_eq!(model.link_count(), 1);
    /// ```
    pub fn import<I, S>(&self, lines: I, model: &mut TrussModel) -> ImportOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        model.clear();
        let mut outcome = ImportOutcome::default();

        for (idx, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref();
            let number = idx + 1;
            outcome.lines_read += 1;

            let kind = LineKind::classify(line);
            let result = match kind {
                LineKind::Comment => {
                    outcome.comments += 1;
                    Ok(())
                }
                LineKind::Ignored => {
                    outcome.ignored += 1;
                    Ok(())
                }
                LineKind::Title => parse_title(line).map(|title| model.set_title(title)),
                LineKind::Material => parse_material(line).map(|(uts, ys, modulus)| {
                    let material = model.material_mut();
                    material.uts = Some(uts);
                    material.ys = Some(ys);
                    material.modulus = Some(modulus);
                }),
                LineKind::StaticFactor => parse_static_factor(line).map(|factor| {
                    model.material_mut().static_factor = Some(factor);
                }),
                LineKind::Node => {
                    parse_node(line).map(|node| Self::insert_node(model, node, &mut outcome))
                }
                LineKind::Link => {
                    parse_link(line).map(|link| Self::insert_link(model, link, &mut outcome))
                }
            };

            if let Err(error) = result {
                warn!(line = number, ?kind, %error, "skipping malformed line");
                outcome.malformed.push(LineDiagnostic {
                    line: number,
                    kind,
                    error,
                });
            }
        }

        info!(
            lines = outcome.lines_read,
            nodes = outcome.nodes_added,
            links = outcome.links_added,
            malformed = outcome.malformed.len(),
            "truss import finished"
        );
        outcome
    }

    /// Add a node, keeping the first definition of any repeated name.
    fn insert_node(model: &mut TrussModel, node: Node, outcome: &mut ImportOutcome) {
        match model.add_node(node) {
            Ok(_) => outcome.nodes_added += 1,
            Err(ModelEditError::DuplicateNode(name)) => {
                debug!(node = %name, "duplicate node ignored");
                outcome.duplicate_nodes.push(name);
            }
            Err(other) => debug!(error = %other, "node rejected"),
        }
    }

    /// Add a link if its name is new and both endpoints already exist.
    fn insert_link(model: &mut TrussModel, link: Link, outcome: &mut ImportOutcome) {
        let name = link.name.clone();
        match model.add_link(link) {
            Ok(_) => outcome.links_added += 1,
            Err(ModelEditError::DuplicateLink(_)) => {
                debug!(link = %name, "duplicate link ignored");
                outcome.duplicate_links.push(name);
            }
            Err(ModelEditError::UnknownNode(node)) => {
                debug!(link = %name, node = %node, "link refers to unknown node; discarded");
                outcome.dangling_links.push(name);
            }
            Err(other) => debug!(link = %name, error = %other, "link rejected"),
        }
    }
}

/// Split on whitespace and require at least `expected` tokens.
fn tokens(line: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < expected {
        return Err(ParseError::MissingFields {
            expected,
            found: parts.len(),
        });
    }
    Ok(parts)
}

/// Strip separating commas from a whitespace-delimited token.
fn bare(token: &str) -> &str {
    token.trim_matches(',')
}

/// `title <w1> <w2> <w3>`; the three words are joined and unquoted.
fn parse_title(line: &str) -> Result<String, ParseError> {
    let parts = tokens(line, 4)?;
    Ok(parts[1..4].join(" ").trim_matches('\'').to_owned())
}

/// `material <uts>, <ys>, <modulus>`
fn parse_material(line: &str) -> Result<(f64, f64, f64), ParseError> {
    let parts = tokens(line, 4)?;
    Ok((
        parse_number("uts", bare(parts[1]))?,
        parse_number("ys", bare(parts[2]))?,
        parse_number("modulus", bare(parts[3]))?,
    ))
}

/// `static_factor <value>`
fn parse_static_factor(line: &str) -> Result<f64, ParseError> {
    let parts = tokens(line, 2)?;
    parse_number("static_factor", bare(parts[1]))
}

/// `node, <name>, <x>, <y>`; comma separated, extra fields are ignored.
fn parse_node(line: &str) -> Result<Node, ParseError> {
    let parts: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    if parts.len() < 4 {
        return Err(ParseError::MissingFields {
            expected: 4,
            found: parts.len(),
        });
    }
    let x = parse_number("x", parts[2])?;
    let y = parse_number("y", parts[3])?;
    Ok(Node::new(parts[1], Vector2D::new(x, y, 0.0)))
}

/// `link <name>, <node1>, <node2>`
fn parse_link(line: &str) -> Result<Link, ParseError> {
    let parts = tokens(line, 4)?;
    Ok(Link::new(bare(parts[1]), bare(parts[2]), bare(parts[3])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    fn import(lines: &[&str]) -> (TrussModel, ImportOutcome) {
        let mut model = TrussModel::new();
        let outcome = Importer::new().import(lines.iter(), &mut model);
        (model, outcome)
    }

    #[test]
    fn classification_follows_keyword_priority() {
        assert_eq!(LineKind::classify("# title comment"), LineKind::Comment);
        assert_eq!(LineKind::classify("Title 'node link'"), LineKind::Title);
        assert_eq!(LineKind::classify("link L1, node1, node2"), LineKind::Link);
        assert_eq!(LineKind::classify("Node, A, 1, 2"), LineKind::Node);
        assert_eq!(LineKind::classify("MATERIAL 1, 2, 3"), LineKind::Material);
        assert_eq!(LineKind::classify("static_factor 1.5"), LineKind::StaticFactor);
        assert_eq!(LineKind::classify(""), LineKind::Ignored);
        assert_eq!(LineKind::classify("x = 1 # node"), LineKind::Node);
    }

    #[test]
    fn parses_header_lines() {
        let (model, outcome) = import(&[
            "title 'Simple Bridge Truss'",
            "material 400, 250, 200000",
            "static_factor 2.5,",
        ]);
        assert!(outcome.is_clean());
        assert_eq!(model.title(), Some("Simple Bridge Truss"));
        let material = model.material();
        assert_eq!(material.uts, Some(400.0));
        assert_eq!(material.ys, Some(250.0));
        assert_eq!(material.modulus, Some(200_000.0));
        assert_eq!(material.static_factor, Some(2.5));
    }

    #[test]
    fn title_keeps_case_and_only_three_words() {
        let (model, _) = import(&["TITLE My Big Truss Design"]);
        assert_eq!(model.title(), Some("My Big Truss"));
    }

    #[test]
    fn short_title_is_reported_not_fatal() {
        let (model, outcome) = import(&["title Short", "node, A, 0, 0"]);
        assert!(model.title().is_none());
        assert_eq!(model.node_count(), 1);
        assert_eq!(
            outcome.malformed,
            vec![LineDiagnostic {
                line: 1,
                kind: LineKind::Title,
                error: ParseError::MissingFields {
                    expected: 4,
                    found: 2
                },
            }]
        );
    }

    #[test]
    fn node_with_too_few_fields_is_skipped() {
        let (model, outcome) = import(&["node, A, 1", "node, B, 2, 3"]);
        assert_eq!(model.node_count(), 1);
        assert!(model.has_node("B"));
        assert_eq!(outcome.malformed.len(), 1);
        assert_eq!(outcome.malformed[0].line, 1);
        assert_eq!(outcome.malformed[0].kind, LineKind::Node);
    }

    #[test]
    fn unparsable_numbers_are_reported() {
        let (model, outcome) = import(&["node, A, one, 2", "material 400, abc, 1"]);
        assert_eq!(model.node_count(), 0);
        assert_eq!(model.material().uts, None);
        assert_eq!(
            outcome.malformed[0].error,
            ParseError::InvalidNumber {
                field: "x",
                value: "one".to_owned()
            }
        );
        assert_eq!(
            outcome.malformed[1].error,
            ParseError::InvalidNumber {
                field: "ys",
                value: "abc".to_owned()
            }
        );
    }

    #[test]
    fn non_finite_numbers_are_malformed() {
        let (model, outcome) = import(&[
            "node, A, inf, 0",
            "node, B, NaN, 0",
            "material nan, 1, 2",
            "node, C, 1, 1",
        ]);
        assert_eq!(model.node_count(), 1);
        assert!(model.has_node("C"));
        assert_eq!(model.material().uts, None);
        let lines: Vec<usize> = outcome.malformed.iter().map(|d| d.line).collect();
        assert_eq!(lines, [1, 2, 3]);
        assert_eq!(
            outcome.malformed[2].error,
            ParseError::InvalidNumber {
                field: "uts",
                value: "nan".to_owned()
            }
        );
    }

    #[test]
    fn first_node_definition_wins() {
        let (model, outcome) = import(&["node, A, 1, 1", "node, A, 5, 5"]);
        assert_eq!(model.node_count(), 1);
        assert_eq!(model.node("A").map(|n| n.position), Some(point(1.0, 1.0)));
        assert_eq!(outcome.duplicate_nodes, vec!["A".to_owned()]);
    }

    #[test]
    fn node_names_keep_case() {
        let (model, _) = import(&["NODE, Apex, 1.5, -2"]);
        assert_eq!(model.node("Apex").map(|n| n.position), Some(point(1.5, -2.0)));
        assert!(!model.has_node("apex"));
    }

    #[test]
    fn duplicate_and_dangling_links_are_dropped() {
        let (model, outcome) = import(&[
            "node, A, 0, 0",
            "link L0, A, B",
            "node, B, 3, 4",
            "link L1, A, B",
            "link L1, B, A",
        ]);
        assert_eq!(model.link_count(), 1);
        assert!(!model.has_link("L0"));
        assert_eq!(model.link("L1").map(|l| l.node1.as_str()), Some("A"));
        assert_eq!(outcome.dangling_links, vec!["L0".to_owned()]);
        assert_eq!(outcome.duplicate_links, vec!["L1".to_owned()]);
    }

    #[test]
    fn link_tokens_tolerate_leading_keyword_comma() {
        let (model, _) = import(&["node, A, 0, 0", "node, B, 1, 0", "link, L1, A, B"]);
        let link = model.link("L1").expect("link parsed");
        assert_eq!((link.node1.as_str(), link.node2.as_str()), ("A", "B"));
    }

    #[test]
    fn comments_and_unknown_lines_are_counted() {
        let (model, outcome) = import(&["# node, A, 0, 0", "", "something else"]);
        assert_eq!(model.node_count(), 0);
        assert_eq!(outcome.comments, 1);
        assert_eq!(outcome.ignored, 2);
        assert_eq!(outcome.lines_read, 3);
    }

    #[test]
    fn import_does_not_derive_geometry() {
        let (model, _) = import(&["node, A, 0, 0", "node, B, 3, 4", "link L1, A, B"]);
        assert_eq!(model.link("L1").and_then(|l| l.length), None);
    }
}
