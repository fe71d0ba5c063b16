use crate::cli::{ConvArgs, HarvestArgs, ProqmArgs};
use crate::error::{CliError, Result};
use hmat::engine::config as core_config;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialConvergenceSection {
    #[serde(rename = "window-size")]
    window_size: Option<usize>,
    #[serde(rename = "score-column")]
    score_column: Option<usize>,
    #[serde(rename = "score-label")]
    score_label: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialHarvestSection {
    pattern: Option<String>,
    column: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialProqmSection {
    #[serde(rename = "rosetta-score-app")]
    rosetta_score_app: Option<PathBuf>,
    #[serde(rename = "proq-scripts")]
    proq_scripts: Option<PathBuf>,
    #[serde(rename = "rosetta-db")]
    rosetta_db: Option<PathBuf>,
    perl: Option<PathBuf>,
}

/// Settings read from the optional TOML file, before command-line values
/// are layered on top. Precedence is CLI argument, then `--set`, then file,
/// then built-in default.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    convergence: Option<PartialConvergenceSection>,
    harvest: Option<PartialHarvestSection>,
    proqm: Option<PartialProqmSection>,
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file when one was given and applies `--set` overrides.
    pub fn load(path: Option<&Path>, set_values: &[String]) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_set_values(set_values)?;
        Ok(config)
    }

    pub fn merge_conv(self, args: &ConvArgs) -> Result<core_config::ConvergenceConfig> {
        let file = self.convergence.unwrap_or_default();

        let mut builder = core_config::ConvergenceConfigBuilder::new()
            .score_file(args.scorefile.clone())
            .rms_output(args.out_rms.clone())
            .figure_output(args.out_fig.clone())
            .sorted_output(args.out_sorted.clone())
            .overwrite(args.overwrite);

        let window = match args.win {
            Some(win) => Some(usize::try_from(win).map_err(|_| {
                CliError::Argument(format!("Window size {} is too large", win))
            })?),
            None => file.window_size,
        };
        if let Some(window) = window {
            builder = builder.window_size(window);
        }
        if let Some(column) = args.score_col.or(file.score_column) {
            builder = builder.score_column(column);
        }
        if let Some(label) = args.score_label.clone().or(file.score_label) {
            builder = builder.score_label(label);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_harvest(self, args: &HarvestArgs) -> Result<core_config::HarvestConfig> {
        let file = self.harvest.unwrap_or_default();

        let mut builder = core_config::HarvestConfigBuilder::new()
            .pdb_dir(args.pdbdir.clone())
            .rootname(args.rootname.clone())
            .output(args.output.clone())
            .overwrite(args.overwrite);
        if let Some(pattern) = args.pattern.clone().or(file.pattern) {
            builder = builder.pattern(pattern);
        }
        if let Some(column) = args.col.or(file.column) {
            builder = builder.column(column);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn merge_proqm(self, args: &ProqmArgs) -> Result<core_config::ProqmConfig> {
        let file = self.proqm.unwrap_or_default();

        let required = |cli: Option<&PathBuf>, file: Option<PathBuf>, kind: &str| {
            cli.cloned().or(file).ok_or_else(|| {
                CliError::Config(format!(
                    "A value for '{}' is required either in the config file or via CLI argument.",
                    kind
                ))
            })
        };
        let proq_scripts = required(args.proq_scripts.as_ref(), file.proq_scripts, "proq-scripts")?;
        let rosetta_db = required(args.rosetta_db.as_ref(), file.rosetta_db, "rosetta-db")?;

        let work_dir = match &args.work_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        let mut builder = core_config::ProqmConfigBuilder::new()
            .template_dir(args.template_dir.clone())
            .alignment(args.alignment_pir.clone())
            .fasta_model(args.fasta_model.clone())
            .fasta_template(args.fasta_template.clone())
            .work_dir(work_dir)
            .proq_scripts(proq_scripts)
            .rosetta_db(rosetta_db);
        if let Some(app) = args.rosetta_score_app.clone().or(file.rosetta_score_app) {
            builder = builder.rosetta_score_app(app);
        }
        if let Some(perl) = file.perl {
            builder = builder.perl(perl);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "convergence.window-size" => {
                    self.convergence
                        .get_or_insert_with(Default::default)
                        .window_size = Some(parse_value(key, value_str)?);
                }
                "convergence.score-column" => {
                    self.convergence
                        .get_or_insert_with(Default::default)
                        .score_column = Some(parse_value(key, value_str)?);
                }
                "convergence.score-label" => {
                    self.convergence
                        .get_or_insert_with(Default::default)
                        .score_label = Some(value_str.to_string());
                }
                "harvest.pattern" => {
                    self.harvest.get_or_insert_with(Default::default).pattern =
                        Some(value_str.to_string());
                }
                "harvest.column" => {
                    self.harvest.get_or_insert_with(Default::default).column =
                        Some(parse_value(key, value_str)?);
                }
                "proqm.rosetta-score-app" => {
                    self.proqm
                        .get_or_insert_with(Default::default)
                        .rosetta_score_app = Some(value_str.into());
                }
                "proqm.proq-scripts" => {
                    self.proqm.get_or_insert_with(Default::default).proq_scripts =
                        Some(value_str.into());
                }
                "proqm.rosetta-db" => {
                    self.proqm.get_or_insert_with(Default::default).rosetta_db =
                        Some(value_str.into());
                }
                "proqm.perl" => {
                    self.proqm.get_or_insert_with(Default::default).perl = Some(value_str.into());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value))
    })
}
