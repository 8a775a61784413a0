use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One experiment row of the figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub label: String,
    pub dir: PathBuf,
    /// Marks the experiment the others are scored against
    #[serde(default)]
    pub reference: bool,
}

impl Experiment {
    pub fn new(label: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Experiment {
            label: label.into(),
            dir: dir.into(),
            reference: false,
        }
    }

    pub fn reference(label: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Experiment {
            reference: true,
            ..Experiment::new(label, dir)
        }
    }
}

fn default_write_passes() -> u32 {
    2
}

/// Everything the pipeline needs: experiments in row order and the output file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub experiments: Vec<Experiment>,
    pub output: PathBuf,
    #[serde(default = "default_write_passes")]
    pub write_passes: u32,
}

impl Default for Config {
    /// No-pinning control against the strong and mid pinning sequences
    fn default() -> Self {
        Config {
            experiments: vec![
                Experiment::reference("Control339", "/mnt/k/Work/Controls/np339_implicit_v2"),
                Experiment::new("2bp (GG)", "/mnt/h/Work/np2bpGG/"),
                Experiment::new("2bp (TT)", "/mnt/h/Work/np2bpTT/"),
                Experiment::new("3bp (CTG)", "/mnt/h/Work/np3bp/"),
            ],
            output: PathBuf::from("np_multibp.pdf"),
            write_passes: default_write_passes(),
        }
    }
}

impl Config {
    /// Parses a configuration from JSON, then validates it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| PlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The single experiment marked as reference.
    ///
    /// # Errors
    /// * `PlotError::Config` if none or more than one experiment is marked
    pub fn reference(&self) -> Result<&Experiment> {
        let mut marked = self.experiments.iter().filter(|e| e.reference);
        match (marked.next(), marked.next()) {
            (Some(reference), None) => Ok(reference),
            (None, _) => Err(PlotError::Config("no reference experiment".into())),
            (Some(_), Some(_)) => Err(PlotError::Config(
                "more than one reference experiment".into(),
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.experiments.is_empty() {
            return Err(PlotError::Config("no experiments configured".into()));
        }
        if self.write_passes == 0 {
            return Err(PlotError::invalid_parameter(
                "write_passes",
                self.write_passes,
                "at least one write is required",
            ));
        }
        self.reference().map(|_| ())
    }
}
