use crate::core::analysis::selection::{SelectionError, SelectionRule};
use crate::core::io::score_file::ScoreFile;
use crate::core::report::plot::DEFAULT_SCORE_LABEL;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_WINDOW_SIZE: usize = 200;
pub const DEFAULT_HARVEST_PATTERN: &str = "MODELLER OBJECTIVE FUNCTION";
pub const DEFAULT_HARVEST_COLUMN: usize = 5;
pub const DEFAULT_ROSETTA_SCORE_APP: &str = "score.static.linuxgccrelease";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl From<SelectionError> for ConfigError {
    fn from(e: SelectionError) -> Self {
        ConfigError::InvalidParameter {
            name: "selection",
            reason: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceConfig {
    pub score_file: PathBuf,
    pub rms_output: PathBuf,
    pub figure_output: PathBuf,
    pub sorted_output: Option<PathBuf>,
    pub window_size: usize,
    pub score_column: usize,
    pub score_label: String,
    pub overwrite: bool,
}

#[derive(Default)]
pub struct ConvergenceConfigBuilder {
    score_file: Option<PathBuf>,
    rms_output: Option<PathBuf>,
    figure_output: Option<PathBuf>,
    sorted_output: Option<PathBuf>,
    window_size: Option<usize>,
    score_column: Option<usize>,
    score_label: Option<String>,
    overwrite: bool,
}

impl ConvergenceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_file(mut self, path: PathBuf) -> Self {
        self.score_file = Some(path);
        self
    }
    pub fn rms_output(mut self, path: PathBuf) -> Self {
        self.rms_output = Some(path);
        self
    }
    pub fn figure_output(mut self, path: PathBuf) -> Self {
        self.figure_output = Some(path);
        self
    }
    pub fn sorted_output(mut self, path: Option<PathBuf>) -> Self {
        self.sorted_output = path;
        self
    }
    pub fn window_size(mut self, size: usize) -> Self {
        self.window_size = Some(size);
        self
    }
    pub fn score_column(mut self, column: usize) -> Self {
        self.score_column = Some(column);
        self
    }
    pub fn score_label(mut self, label: String) -> Self {
        self.score_label = Some(label);
        self
    }
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn build(self) -> Result<ConvergenceConfig, ConfigError> {
        let window_size = self.window_size.unwrap_or(DEFAULT_WINDOW_SIZE);
        if window_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "window_size",
                reason: "must be a positive integer".into(),
            });
        }

        let rms_output = self
            .rms_output
            .ok_or(ConfigError::MissingParameter("rms_output"))?;
        let figure_output = self
            .figure_output
            .ok_or(ConfigError::MissingParameter("figure_output"))?;
        let sorted = self.sorted_output.as_ref();
        if rms_output == figure_output
            || sorted == Some(&rms_output)
            || sorted == Some(&figure_output)
        {
            return Err(ConfigError::InvalidParameter {
                name: "outputs",
                reason: "output paths must be distinct".into(),
            });
        }

        Ok(ConvergenceConfig {
            score_file: self
                .score_file
                .ok_or(ConfigError::MissingParameter("score_file"))?,
            rms_output,
            figure_output,
            sorted_output: self.sorted_output,
            window_size,
            score_column: self
                .score_column
                .unwrap_or(ScoreFile::DEFAULT_SCORE_COLUMN),
            score_label: self
                .score_label
                .unwrap_or_else(|| DEFAULT_SCORE_LABEL.to_string()),
            overwrite: self.overwrite,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarvestConfig {
    pub pdb_dir: PathBuf,
    pub rootname: String,
    pub output: PathBuf,
    pub pattern: String,
    pub column: usize,
    pub overwrite: bool,
}

#[derive(Default)]
pub struct HarvestConfigBuilder {
    pdb_dir: Option<PathBuf>,
    rootname: Option<String>,
    output: Option<PathBuf>,
    pattern: Option<String>,
    column: Option<usize>,
    overwrite: bool,
}

impl HarvestConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pdb_dir(mut self, dir: PathBuf) -> Self {
        self.pdb_dir = Some(dir);
        self
    }
    pub fn rootname(mut self, rootname: String) -> Self {
        self.rootname = Some(rootname);
        self
    }
    pub fn output(mut self, path: PathBuf) -> Self {
        self.output = Some(path);
        self
    }
    pub fn pattern(mut self, pattern: String) -> Self {
        self.pattern = Some(pattern);
        self
    }
    pub fn column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn build(self) -> Result<HarvestConfig, ConfigError> {
        let pattern = self
            .pattern
            .unwrap_or_else(|| DEFAULT_HARVEST_PATTERN.to_string());
        if pattern.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "pattern",
                reason: "must not be empty".into(),
            });
        }
        Ok(HarvestConfig {
            pdb_dir: self
                .pdb_dir
                .ok_or(ConfigError::MissingParameter("pdb_dir"))?,
            rootname: self
                .rootname
                .ok_or(ConfigError::MissingParameter("rootname"))?,
            output: self.output.ok_or(ConfigError::MissingParameter("output"))?,
            pattern,
            column: self.column.unwrap_or(DEFAULT_HARVEST_COLUMN),
            overwrite: self.overwrite,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub score_file: PathBuf,
    pub output_dir: PathBuf,
    pub rule: SelectionRule,
}

impl ExtractConfig {
    pub fn new(
        score_file: PathBuf,
        output_dir: PathBuf,
        rule: SelectionRule,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            score_file,
            output_dir,
            rule: rule.validate()?,
        })
    }
}

/// Locations of the third-party programs driven by the ProQM workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct ProqmTools {
    pub rosetta_score_app: PathBuf,
    pub rosetta_db: PathBuf,
    pub proq_scripts: PathBuf,
    pub perl: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProqmConfig {
    pub template_dir: PathBuf,
    pub alignment: PathBuf,
    pub fasta_model: Option<PathBuf>,
    pub fasta_template: Option<PathBuf>,
    pub work_dir: PathBuf,
    pub tools: ProqmTools,
}

#[derive(Default)]
pub struct ProqmConfigBuilder {
    template_dir: Option<PathBuf>,
    alignment: Option<PathBuf>,
    fasta_model: Option<PathBuf>,
    fasta_template: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    rosetta_score_app: Option<PathBuf>,
    rosetta_db: Option<PathBuf>,
    proq_scripts: Option<PathBuf>,
    perl: Option<PathBuf>,
}

impl ProqmConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template_dir(mut self, dir: PathBuf) -> Self {
        self.template_dir = Some(dir);
        self
    }
    pub fn alignment(mut self, path: PathBuf) -> Self {
        self.alignment = Some(path);
        self
    }
    pub fn fasta_model(mut self, path: Option<PathBuf>) -> Self {
        self.fasta_model = path;
        self
    }
    pub fn fasta_template(mut self, path: Option<PathBuf>) -> Self {
        self.fasta_template = path;
        self
    }
    pub fn work_dir(mut self, dir: PathBuf) -> Self {
        self.work_dir = Some(dir);
        self
    }
    pub fn rosetta_score_app(mut self, path: PathBuf) -> Self {
        self.rosetta_score_app = Some(path);
        self
    }
    pub fn rosetta_db(mut self, path: PathBuf) -> Self {
        self.rosetta_db = Some(path);
        self
    }
    pub fn proq_scripts(mut self, path: PathBuf) -> Self {
        self.proq_scripts = Some(path);
        self
    }
    pub fn perl(mut self, path: PathBuf) -> Self {
        self.perl = Some(path);
        self
    }

    pub fn build(self) -> Result<ProqmConfig, ConfigError> {
        let tools = ProqmTools {
            rosetta_score_app: self
                .rosetta_score_app
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROSETTA_SCORE_APP)),
            rosetta_db: self
                .rosetta_db
                .ok_or(ConfigError::MissingParameter("rosetta_db"))?,
            proq_scripts: self
                .proq_scripts
                .ok_or(ConfigError::MissingParameter("proq_scripts"))?,
            perl: self.perl.unwrap_or_else(|| PathBuf::from("perl")),
        };
        Ok(ProqmConfig {
            template_dir: self
                .template_dir
                .ok_or(ConfigError::MissingParameter("template_dir"))?,
            alignment: self
                .alignment
                .ok_or(ConfigError::MissingParameter("alignment"))?,
            fasta_model: self.fasta_model,
            fasta_template: self.fasta_template,
            work_dir: self
                .work_dir
                .ok_or(ConfigError::MissingParameter("work_dir"))?,
            tools,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convergence() -> ConvergenceConfigBuilder {
        ConvergenceConfigBuilder::new()
            .score_file("scores.txt".into())
            .rms_output("rms.txt".into())
            .figure_output("conv.svg".into())
    }

    #[test]
    fn convergence_defaults_are_applied() {
        let config = convergence().build().unwrap();
        assert_eq!(config.window_size, 200);
        assert_eq!(config.score_column, 1);
        assert_eq!(config.score_label, "MOLPDF score (a.u.)");
        assert!(!config.overwrite);
        assert_eq!(config.sorted_output, None);
    }

    #[test]
    fn convergence_rejects_zero_window() {
        assert!(matches!(
            convergence().window_size(0).build(),
            Err(ConfigError::InvalidParameter {
                name: "window_size",
                ..
            })
        ));
    }

    #[test]
    fn convergence_requires_outputs() {
        let result = ConvergenceConfigBuilder::new()
            .score_file("scores.txt".into())
            .figure_output("conv.svg".into())
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("rms_output")));
    }

    #[test]
    fn convergence_rejects_clashing_outputs() {
        let result = convergence().figure_output("rms.txt".into()).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "outputs", .. })
        ));
    }

    #[test]
    fn harvest_defaults_match_modeller_remarks() {
        let config = HarvestConfigBuilder::new()
            .pdb_dir("models".into())
            .rootname("glyt1.B9".into())
            .output("molpdf.txt".into())
            .build()
            .unwrap();
        assert_eq!(config.pattern, "MODELLER OBJECTIVE FUNCTION");
        assert_eq!(config.column, 5);
    }

    #[test]
    fn extract_config_validates_rule() {
        let result = ExtractConfig::new(
            "scores.txt".into(),
            "best".into(),
            SelectionRule::Percent(0.0),
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "selection",
                ..
            })
        ));
    }

    #[test]
    fn proqm_requires_tool_locations() {
        let builder = ProqmConfigBuilder::new()
            .template_dir("templates".into())
            .alignment("aln.pir".into())
            .work_dir(".".into());
        assert_eq!(
            builder.build(),
            Err(ConfigError::MissingParameter("rosetta_db"))
        );
    }

    #[test]
    fn proqm_fills_default_binaries() {
        let config = ProqmConfigBuilder::new()
            .template_dir("templates".into())
            .alignment("aln.pir".into())
            .work_dir(".".into())
            .rosetta_db("/opt/rosetta/database".into())
            .proq_scripts("/opt/proq/bin".into())
            .build()
            .unwrap();
        assert_eq!(
            config.tools.rosetta_score_app,
            PathBuf::from("score.static.linuxgccrelease")
        );
        assert_eq!(config.tools.perl, PathBuf::from("perl"));
    }
}
