use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "tomatodo-cli", version, about = "Tomatodo CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive pomodoro session
    Run {
        /// Disable the terminal bell on interval completion
        #[arg(long)]
        no_bell: bool,
        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },
    /// Print the repetition-to-phase table
    Phases,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { no_bell, no_color } => commands::run::run(no_bell, no_color),
        Commands::Phases => commands::phases::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
