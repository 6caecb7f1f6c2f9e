use clap::Parser;
use passvault::cli::commands::edit::EditArgs;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays usable in scripts.  Set
    // RUST_LOG=passvault=debug for unlock/persist tracing; secrets are
    // never logged at any level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passvault=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref username,
            ref url,
            ref notes,
        } => passvault::cli::commands::add::execute(
            &cli,
            title,
            username,
            url.as_deref(),
            notes.as_deref(),
        ),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Show { ref entry, reveal } => {
            passvault::cli::commands::show::execute(&cli, entry, reveal)
        }
        Commands::Edit {
            ref entry,
            ref title,
            ref username,
            ref url,
            ref notes,
            secret,
        } => passvault::cli::commands::edit::execute(
            &cli,
            entry,
            &EditArgs {
                title: title.as_deref(),
                username: username.as_deref(),
                url: url.as_deref(),
                notes: notes.as_deref(),
                secret,
            },
        ),
        Commands::Delete { ref entry, force } => {
            passvault::cli::commands::delete::execute(&cli, entry, force)
        }
        Commands::Passwd => passvault::cli::commands::passwd::execute(&cli),
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
