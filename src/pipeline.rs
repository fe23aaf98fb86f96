//! End-to-end processing of a truss description.

use tracing::info;

use crate::config::SceneConfig;
use crate::derive::{derive_link_geometry, DerivationSummary};
use crate::import::{ImportOutcome, Importer};
use crate::model::TrussModel;
use crate::report::{render_report, TrussReport};
use crate::scene::{Scene, SceneSink};

/// Results of one pass through [`process_lines`].
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutput {
    /// What the importer accepted and rejected.
    pub import: ImportOutcome,
    /// Which links received derived geometry.
    pub derivation: DerivationSummary,
    /// Rendered report and longest-link record.
    pub report: TrussReport,
}

/// Import `lines` into `model`, derive link geometry, render the report and
/// hand the finished scene to `sink`.
///
/// `model` is cleared first, so repeated calls never mix data from different
/// inputs. Data problems in the input are reported in the output rather than
/// as errors.
///
/// # Errors
///
/// Returns the sink's error when the scene cannot be drawn.
///
/// # Examples
/// ```
/// use trussview::{process_lines, Scene, SceneConfig, TrussModel};
///
/// let mut model = TrussModel::new();
/// let mut scenes: Vec<Scene> = Vec::new();
/// let output = process_lines(
///     ["node, A, 0, 0", "node, B, 3, 4", "link L1, A, B"],
///     &mut model,
///     &SceneConfig::default(),
///     &mut scenes,
/// )
/// .expect("collecting scenes cannot fail");
/// assert_eq!(output.report.longest.map(|l| l.length), Some(5.0));
/// assert_eq!(scenes[0].links.len(), 1);
/// ```
pub fn process_lines<I, S, K>(
    lines: I,
    model: &mut TrussModel,
    config: &SceneConfig,
    sink: &mut K,
) -> Result<PipelineOutput, K::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    K: SceneSink + ?Sized,
{
    let import = Importer::new().import(lines, model);
    let derivation = derive_link_geometry(model);
    let report = render_report(model);
    sink.draw(&Scene::build(model, config))?;

    info!(
        nodes = model.node_count(),
        links = model.link_count(),
        derived = derivation.derived,
        "truss processed"
    );
    Ok(PipelineOutput {
        import,
        derivation,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_every_stage() {
        let mut model = TrussModel::new();
        let mut scenes: Vec<Scene> = Vec::new();
        let output = process_lines(
            [
                "title 'Two Bar Truss'",
                "node, A, 0, 0",
                "node, B, 3, 4",
                "node, C, 6, 0",
                "link AB, A, B",
                "link BC, B, C",
            ],
            &mut model,
            &SceneConfig::default(),
            &mut scenes,
        )
        .expect("collecting scenes cannot fail");

        assert_eq!(output.import.links_added, 2);
        assert_eq!(output.derivation.derived, 2);
        assert!(output.report.text.contains("Title:  Two Bar Truss"));
        assert_eq!(output.report.longest.map(|l| l.name), Some("AB".to_owned()));
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].nodes.len(), 3);
    }

    #[test]
    fn empty_input_still_draws() {
        let mut model = TrussModel::new();
        let mut scenes: Vec<Scene> = Vec::new();
        let output = process_lines(
            Vec::<String>::new(),
            &mut model,
            &SceneConfig::default(),
            &mut scenes,
        )
        .expect("collecting scenes cannot fail");
        assert!(output.report.longest.is_none());
        assert_eq!(scenes, vec![Scene::default()]);
    }
}
