use crate::config::Config;
use crate::error::Result;
use crate::figure::{compose, export};
use crate::prepare::prepare_bundle;
use crate::types::SeriesBundle;
use log::info;
use std::path::PathBuf;

/// Prepares one bundle per configured experiment, in configuration order.
///
/// The reference experiment is prepared first with raw scores; its scores are
/// then used as denominators for every other experiment.
pub fn prepare_all(config: &Config) -> Result<Vec<SeriesBundle>> {
    config.validate()?;

    let reference = config.reference()?;
    let mut control = prepare_bundle(&reference.label, &reference.dir, None)?;
    control.is_reference = true;
    let scores = control.reference_scores();
    info!(
        "reference {}: ellipticity + {:.4}, - {:.4}",
        control.label, scores.positive, scores.negative
    );

    let mut control = Some(control);
    config
        .experiments
        .iter()
        .map(|experiment| {
            if experiment.reference {
                if let Some(bundle) = control.take() {
                    return Ok(bundle);
                }
            }
            prepare_bundle(&experiment.label, &experiment.dir, Some(scores))
        })
        .collect()
}

/// Runs the whole figure pipeline and returns the path written
pub fn run(config: &Config) -> Result<PathBuf> {
    let bundles = prepare_all(config)?;
    let figure = compose(&bundles)?;
    export(&figure, &config.output, config.write_passes)?;
    Ok(config.output.clone())
}
