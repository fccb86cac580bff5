use clap::{Args, Parser, Subcommand};
use repo_toolbar::commands::*;
use repo_toolbar::core::{dispatcher::Command, error::Result, print_error};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repo-toolbar")]
#[command(about = "Find the git repositories inside a project and open them in a VCS GUI")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DispatchArgs {
    /// Entry to use instead of the current selection (1-based)
    #[arg(long)]
    index: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the numbered repository list
    List,
    /// Find repositories, reusing the cached list unless forced
    Scan {
        /// Walk the project even if a list is cached
        #[arg(long)]
        force: bool,
    },
    /// Make an entry current; the last entry rescans the project
    Select {
        /// Entry number as shown by `list`
        index: usize,
    },
    /// Open the log for the selected repository
    Log(DispatchArgs),
    /// Open the commit dialog for the selected repository
    Commit(DispatchArgs),
    /// Fetch the selected repository
    Fetch(DispatchArgs),
    /// Push the selected repository
    Push(DispatchArgs),
    /// Show the toolbar
    Enable,
    /// Hide the toolbar
    Disable,
    /// Show or hide the toolbar
    Toggle,
    /// Show or update the configuration
    Config {
        /// Executable every command is handed to
        #[arg(long, value_name = "PATH")]
        executable: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let project = cli.project;
    let result = match cli.command {
        Commands::List => execute_list(project),
        Commands::Scan { force } => execute_scan(project, force),
        Commands::Select { index } => execute_select(project, index),
        Commands::Log(args) => execute_dispatch(project, Command::Log, args.index),
        Commands::Commit(args) => execute_dispatch(project, Command::Commit, args.index),
        Commands::Fetch(args) => execute_dispatch(project, Command::Fetch, args.index),
        Commands::Push(args) => execute_dispatch(project, Command::Push, args.index),
        Commands::Enable => execute_visibility(VisibilityChange::Enable),
        Commands::Disable => execute_visibility(VisibilityChange::Disable),
        Commands::Toggle => execute_visibility(VisibilityChange::Toggle),
        Commands::Config { executable } => execute_config(executable),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
