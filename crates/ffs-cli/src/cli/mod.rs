pub mod args;

use std::path::{Path, PathBuf};

use ffs_core::candidate::Candidate;
use ffs_core::config::Config;
use ffs_core::lister::DirectoryLister;
use ffs_core::root;
use ffs_core::session::Session;

use self::args::{Cli, Command};

pub fn run(cli: Cli) -> color_eyre::Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&cli, &mut config);
    let root = project_root(cli.root.as_deref(), &config)?;
    tracing::debug!(root = %root.display(), ignore_case = config.ignore_case, "resolved search root");

    match cli.command {
        None => cmd_picker(&config, &root)?,
        Some(Command::List { json }) => cmd_list(&config, &root, json)?,
        Some(Command::Query { query, limit, json }) => {
            cmd_query(&config, &root, &query, limit, json)?
        }
        Some(Command::Root) => println!("{}", root.display()),
    }

    Ok(())
}

/// Fold command-line flags into the loaded config.
fn apply_overrides(cli: &Cli, config: &mut Config) {
    if cli.ignore_case {
        config.ignore_case = true;
    } else if cli.case_sensitive {
        config.ignore_case = false;
    }
    config.ignore_list.extend(cli.ignore.iter().cloned());
}

fn project_root(explicit: Option<&Path>, config: &Config) -> color_eyre::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(root::resolve_root(&cwd, &config.root_marker))
        }
    }
}

fn cmd_list(config: &Config, root: &Path, json: bool) -> color_eyre::Result<()> {
    let listing = DirectoryLister::from_config(root, config)?.listing()?;
    if listing.candidates.is_empty() {
        eprintln!("No files found under {}", listing.root.display());
        return Ok(());
    }
    print_candidates(&listing.candidates, json)
}

fn cmd_query(
    config: &Config,
    root: &Path,
    query: &str,
    limit: Option<usize>,
    json: bool,
) -> color_eyre::Result<()> {
    let lister = DirectoryLister::from_config(root, config)?;
    let mut session = Session::new(lister, config.match_options())?;
    let matches = session.on_query_changed(query);
    let shown = &matches[..limit.unwrap_or(matches.len()).min(matches.len())];

    if shown.is_empty() && !json {
        eprintln!("No matches for `{query}`");
        return Ok(());
    }
    print_candidates(shown, json)
}

fn cmd_picker(config: &Config, root: &Path) -> color_eyre::Result<()> {
    let lister = DirectoryLister::from_config(root, config)?;
    let mut session = Session::new(lister, config.match_options())?;
    if session.full_set().is_empty() {
        eprintln!("No files found under {}", session.source().root().display());
        return Ok(());
    }
    if let Some(path) = crate::tui::run_picker(&mut session)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn print_candidates(candidates: &[Candidate], json: bool) -> color_eyre::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
    } else {
        for c in candidates {
            println!("{}", c.full_path().display());
        }
    }
    Ok(())
}
