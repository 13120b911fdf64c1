use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use sprig::areas::repository::Repository;
use sprig::artifacts::core::{CommandError, PagerWriter};
use std::io::Write;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "sprig",
    version = "0.1.0",
    about = "A small content-addressed version control system",
    long_about = "sprig keeps full snapshots of tracked files in a content-addressed \
    object store under .sprig, together with an immutable commit history, \
    mutable branch pointers and a staging area.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository in the current directory"
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage a file for the next commit",
        long_about = "This command reads the working copy of the given file, stores its \
        content as a blob and stages the file for the next commit. Passing '.' stages \
        every regular file in the top level of the working directory."
    )]
    Add {
        #[arg(index = 1, help = "The file to stage, or '.' for all top-level files")]
        path: String,
    },
    #[command(
        name = "commit",
        about = "Record the staged changes as a new commit"
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage a tracked file for removal"
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        path: String,
    },
    #[command(
        name = "log",
        about = "Show the history of the current branch, newest first"
    )]
    Log,
    #[command(
        name = "global-log",
        about = "Show every commit ever recorded, in creation order"
    )]
    GlobalLog,
    #[command(
        name = "find",
        about = "Print the ids of all commits with the given message"
    )]
    Find {
        #[arg(index = 1, help = "The exact commit message to search for")]
        message: String,
    },
    #[command(
        name = "status",
        about = "Show branches and the current staging area contents"
    )]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore working tree files",
        long_about = "This command has three forms: 'checkout <branch>' switches to the \
        given branch, 'checkout -- <file>' restores a file from the current commit, and \
        'checkout <commit> -- <file>' restores a file from the given commit. Commit ids \
        may be abbreviated to a unique prefix."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name or a commit id")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        paths: Vec<String>,
    },
    #[command(
        name = "branch",
        about = "Create a new branch pointing at the current commit"
    )]
    Branch {
        #[arg(index = 1, help = "The name of the new branch")]
        name: String,
    },
    #[command(
        name = "rm-branch",
        about = "Delete a branch without touching its commits"
    )]
    RmBranch {
        #[arg(index = 1, help = "The name of the branch to delete")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to the given commit and restore its snapshot"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id to reset to")]
        commit_id: String,
    },
    #[command(
        name = "merge",
        about = "Merge the given branch into the current branch"
    )]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            match err.downcast_ref::<CommandError>() {
                Some(command_err) => ExitCode::from(command_err.exit_code()),
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(command: &Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;

    // The two history commands page their output when attached to a terminal.
    let pager = match command {
        Commands::Log | Commands::GlobalLog if std::io::stdout().is_terminal() => {
            Some(Pager::new())
        }
        _ => None,
    };
    let writer: Box<dyn Write> = match &pager {
        Some(pager) => Box::new(PagerWriter::new(pager.clone())),
        None => Box::new(std::io::stdout()),
    };

    let repository = Repository::new(&pwd, writer)?;

    if !matches!(command, Commands::Init) {
        repository.require_initialized()?;
    }

    match command {
        Commands::Init => repository.init()?,
        Commands::Add { path } => repository.add(path)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Rm { path } => repository.rm(path)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Checkout { target, paths } => match (target, paths.as_slice()) {
            (Some(branch), []) => repository.checkout_branch(branch)?,
            (None, [path]) => repository.checkout_file_from_head(path)?,
            (Some(commit_id), [path]) => repository.checkout_file_from_commit(commit_id, path)?,
            _ => anyhow::bail!(CommandError::usage("Incorrect operands.")),
        },
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Reset { commit_id } => repository.reset(commit_id)?,
        Commands::Merge { branch } => repository.merge(branch)?,
    }

    if let Some(pager) = pager {
        minus::page_all(pager)?;
    }

    Ok(())
}
