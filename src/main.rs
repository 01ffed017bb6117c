use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use update_qualifier::cli;
use update_qualifier::config::{self, GitBackend, Settings};
use update_qualifier::logging;
use update_qualifier::ui;

#[derive(clap::Parser)]
#[command(
    name = "update-qualifier",
    version,
    about = "Stamp the version qualifier of a build file based on the current git branch and tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "String to be used for tagging a dev build [default: .dev]")]
    dev_qualifier: Option<String>,

    #[arg(long, help = "String to be used for tagging a rc build [default: rc]")]
    rc_qualifier: Option<String>,

    #[arg(
        long,
        help = "Query git for branch and tag, overriding use_git = false in the settings file"
    )]
    use_git: bool,

    #[arg(
        long,
        conflicts_with = "use_git",
        help = "Use --branch-name/--tag-name instead of querying git"
    )]
    no_use_git: bool,

    #[arg(long, help = "Branch name to use when git is not queried")]
    branch_name: Option<String>,

    #[arg(long, help = "Tag name to use when git is not queried")]
    tag_name: Option<String>,

    #[arg(long, help = "The branch which is used for classifying rc [default: master]")]
    rc_branch: Option<String>,

    #[arg(
        long,
        help = "Expression in the qualifier file to replace [default: __QUALIFIER__ = \"\"]"
    )]
    qualifier_expression: Option<String>,

    #[arg(
        long,
        help = "Template rendered with the qualifier in place of {} [default: __QUALIFIER__ = \"{}\"]"
    )]
    qualifier_template: Option<String>,

    #[arg(long, help = "File where the qualifier expression is defined [default: setup.py]")]
    qualifier_file_name: Option<PathBuf>,

    #[arg(long, value_enum, help = "How git is queried [default: libgit2]")]
    git_backend: Option<GitBackend>,

    #[arg(long, help = "Directory used to discover the git repository [default: .]")]
    repo: Option<PathBuf>,

    #[arg(long, help = "Compute the qualifier without modifying the file")]
    dry_run: bool,

    #[arg(long, default_value = "info", help = "Log level (error, warn, info, debug, trace)")]
    log_level: String,
}

impl Args {
    fn use_git_override(&self) -> Option<bool> {
        match (self.use_git, self.no_use_git) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Settings given on the command line; unset flags leave lower layers in effect
    fn settings(&self) -> Settings {
        Settings {
            dev_qualifier: self.dev_qualifier.clone(),
            rc_qualifier: self.rc_qualifier.clone(),
            use_git: self.use_git_override(),
            branch_name: self.branch_name.clone(),
            tag_name: self.tag_name.clone(),
            rc_branch: self.rc_branch.clone(),
            qualifier_expression: self.qualifier_expression.clone(),
            qualifier_template: self.qualifier_template.clone(),
            qualifier_file_name: self.qualifier_file_name.clone(),
            git_backend: self.git_backend,
            repo: self.repo.clone(),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = match logging::init_logging(&args.log_level) {
        Ok(handle) => handle,
        Err(e) => {
            ui::display_error(&format!("Invalid log level '{}': {}", args.log_level, e));
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let file_settings =
        config::load_settings(args.config.as_deref()).context("Error loading config")?;
    let config = file_settings.merge(args.settings()).into_config()?;

    let outcome = cli::run(&config, args.dry_run)?;

    ui::display_outcome(&outcome, &config.qualifier_file.display().to_string());
    Ok(())
}
