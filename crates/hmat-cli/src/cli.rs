use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hmat - post-processing tools for homology-modeling runs: score harvesting, convergence checks, model selection and ProQM scoring.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Optional TOML file with defaults for every command.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S convergence.window-size=100
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plot MOLPDF scores and their windowed RMSD to judge convergence of a modeling run.
    Conv(ConvArgs),
    /// Collect the MODELLER objective-function score of every model PDB in a directory.
    Harvest(HarvestArgs),
    /// Copy the best-scored models (below a threshold or a lowest percentage) to a new directory.
    Extract(ExtractArgs),
    /// Compute ProQM scores for a template and its models with ProQ and Rosetta.
    Proqm(ProqmArgs),
}

/// Arguments for the `conv` subcommand.
#[derive(Args, Debug)]
pub struct ConvArgs {
    /// Score file, one `<model> <score>` record per line.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scorefile: PathBuf,

    /// Output file for the windowed RMSD series.
    #[arg(short = 'r', long, required = true, value_name = "PATH")]
    pub out_rms: PathBuf,

    /// Output file for the convergence figure (SVG).
    #[arg(short = 'f', long, required = true, value_name = "PATH")]
    pub out_fig: PathBuf,

    /// Also write the descending-sorted scores to this file.
    #[arg(long, value_name = "PATH")]
    pub out_sorted: Option<PathBuf>,

    /// Window size for the score RMSD [default: 200]
    #[arg(short, long, value_name = "INT", value_parser = clap::value_parser!(u64).range(1..))]
    pub win: Option<u64>,

    /// Zero-based score column in the score file [default: 1]
    #[arg(long, value_name = "INT")]
    pub score_col: Option<usize>,

    /// Y-axis label of the score panels.
    #[arg(long, value_name = "TEXT")]
    pub score_label: Option<String>,

    /// Replace existing output files.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `harvest` subcommand.
#[derive(Args, Debug)]
pub struct HarvestArgs {
    /// Directory holding the model PDB files.
    #[arg(short = 'd', long, required = true, value_name = "DIR")]
    pub pdbdir: PathBuf,

    /// Rootname of the model files (e.g. glyt1.B9).
    #[arg(short = 'n', long, required = true, value_name = "NAME")]
    pub rootname: String,

    /// Output score file.
    #[arg(short, long, value_name = "PATH", default_value = "molpdf.txt")]
    pub output: PathBuf,

    /// Text identifying the score line [default: MODELLER OBJECTIVE FUNCTION]
    #[arg(long, value_name = "TEXT")]
    pub pattern: Option<String>,

    /// Zero-based field of the score within the matched line [default: 5]
    #[arg(long, value_name = "INT")]
    pub col: Option<usize>,

    /// Replace an existing score file.
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Score file, one `<model path> <score>` record per line.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub scorefile: PathBuf,

    /// Directory to create for the extracted models.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub outdir: PathBuf,

    #[command(flatten)]
    pub rule: SelectionArgs,
}

/// Exactly one selection rule.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct SelectionArgs {
    /// Percentage of lowest-scored models to extract.
    #[arg(short, long, value_name = "PERCENT")]
    pub percent: Option<f64>,

    /// Extract models scoring below this value.
    #[arg(short, long, value_name = "SCORE", allow_negative_numbers = true)]
    pub threshold: Option<f64>,
}

/// Arguments for the `proqm` subcommand.
#[derive(Args, Debug)]
pub struct ProqmArgs {
    /// Directory containing the template PDB file.
    #[arg(long, required = true, value_name = "DIR")]
    pub template_dir: PathBuf,

    /// MODELLER PIR alignment between target and template; the template name
    /// and the model rootname are read from it.
    #[arg(long = "alignment", required = true, value_name = "PATH")]
    pub alignment_pir: PathBuf,

    /// Full-length model sequence in FASTA format.
    #[arg(long, value_name = "PATH")]
    pub fasta_model: Option<PathBuf>,

    /// Full-length template sequence in FASTA format.
    #[arg(long, value_name = "PATH")]
    pub fasta_template: Option<PathBuf>,

    /// Rosetta score application.
    #[arg(long, value_name = "PATH")]
    pub rosetta_score_app: Option<PathBuf>,

    /// ProQ master scripts directory.
    #[arg(long, value_name = "DIR")]
    pub proq_scripts: Option<PathBuf>,

    /// Rosetta database directory.
    #[arg(long, value_name = "DIR")]
    pub rosetta_db: Option<PathBuf>,

    /// Directory holding the models; results are written here [default: current directory]
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hmat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn conv_required_arguments_only() {
        let cli = parse(&[
            "conv",
            "-s",
            "analysis/molpdf-score.txt",
            "-r",
            "analysis/rmsd-molpdf-score.txt",
            "-f",
            "analysis/score-conv.svg",
        ]);
        let Commands::Conv(args) = cli.command else {
            panic!("expected conv");
        };
        assert_eq!(args.scorefile, PathBuf::from("analysis/molpdf-score.txt"));
        assert_eq!(args.out_rms, PathBuf::from("analysis/rmsd-molpdf-score.txt"));
        assert_eq!(args.out_fig, PathBuf::from("analysis/score-conv.svg"));
        assert_eq!(args.win, None);
        assert_eq!(args.score_col, None);
        assert!(!args.overwrite);
    }

    #[test]
    fn conv_all_options() {
        let cli = parse(&[
            "-vv",
            "conv",
            "--scorefile",
            "s.txt",
            "--out-rms",
            "r.txt",
            "--out-fig",
            "f.svg",
            "--out-sorted",
            "sorted.txt",
            "-w",
            "200",
            "--score-col",
            "1",
            "--overwrite",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Conv(args) = cli.command else {
            panic!("expected conv");
        };
        assert_eq!(args.win, Some(200));
        assert_eq!(args.score_col, Some(1));
        assert_eq!(args.out_sorted, Some(PathBuf::from("sorted.txt")));
        assert!(args.overwrite);
    }

    #[test]
    fn conv_rejects_zero_window() {
        let result = Cli::try_parse_from([
            "hmat", "conv", "-s", "s", "-r", "r", "-f", "f", "-w", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn conv_requires_outputs() {
        assert!(Cli::try_parse_from(["hmat", "conv", "-s", "s"]).is_err());
    }

    #[test]
    fn harvest_defaults() {
        let cli = parse(&["harvest", "-d", "test-case/glyt1", "-n", "glyt1.B9"]);
        let Commands::Harvest(args) = cli.command else {
            panic!("expected harvest");
        };
        assert_eq!(args.pdbdir, PathBuf::from("test-case/glyt1"));
        assert_eq!(args.rootname, "glyt1.B9");
        assert_eq!(args.output, PathBuf::from("molpdf.txt"));
        assert_eq!(args.pattern, None);
        assert_eq!(args.col, None);
    }

    #[test]
    fn extract_rules_are_mutually_exclusive_and_required() {
        assert!(Cli::try_parse_from(["hmat", "extract", "-s", "s", "-o", "o"]).is_err());
        assert!(
            Cli::try_parse_from([
                "hmat", "extract", "-s", "s", "-o", "o", "-p", "10", "-t", "2000"
            ])
            .is_err()
        );
        let cli = parse(&["extract", "-s", "s", "-o", "o", "-t", "-150.5"]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.rule.threshold, Some(-150.5));
        assert_eq!(args.rule.percent, None);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&[
            "harvest", "-d", "d", "-n", "n", "-q", "-c", "hmat.toml", "-S", "harvest.column=4",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("hmat.toml")));
        assert_eq!(cli.set_values, vec!["harvest.column=4".to_string()]);
    }

    #[test]
    fn proqm_arguments() {
        let cli = parse(&[
            "proqm",
            "--template-dir",
            "templates",
            "--alignment",
            "aln.pir",
            "--rosetta-db",
            "/opt/rosetta/database",
        ]);
        let Commands::Proqm(args) = cli.command else {
            panic!("expected proqm");
        };
        assert_eq!(args.alignment_pir, PathBuf::from("aln.pir"));
        assert_eq!(args.rosetta_db, Some(PathBuf::from("/opt/rosetta/database")));
        assert_eq!(args.proq_scripts, None);
    }
}
