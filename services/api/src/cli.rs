use crate::commands::{
    run_classify, run_compare, run_generate, run_take_home, ClassifyArgs, CompareArgs,
    GenerateArgs, TakeHomeArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wage_levels::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wage Levels",
    about = "Estimate prevailing wage levels and compare take-home pay across locations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build occupations.json and wages.json from the raw CSV exports
    Generate(GenerateArgs),
    /// Estimate the wage level of a salary in a county
    Classify(ClassifyArgs),
    /// Print the tax breakdown for a salary in a state
    TakeHome(TakeHomeArgs),
    /// Compare purchasing power of one salary in two locations
    Compare(CompareArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Generate(args) => run_generate(args),
        Command::Classify(args) => run_classify(args),
        Command::TakeHome(args) => run_take_home(args),
        Command::Compare(args) => run_compare(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["wage-levels"]).expect("no arguments parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn generate_takes_an_output_directory() {
        let cli = Cli::try_parse_from(["wage-levels", "generate", "--out-dir", "build/data"])
            .expect("generate arguments parse");
        match cli.command {
            Some(Command::Generate(args)) => {
                assert_eq!(args.out_dir, Some(std::path::PathBuf::from("build/data")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["wage-levels", "generate", "--output", "x"]).is_err());
    }

    #[test]
    fn compare_parses_formatted_salary() {
        let cli = Cli::try_parse_from([
            "wage-levels",
            "compare",
            "--salary",
            "$108,000",
            "--from-area",
            "19100",
            "--from-state",
            "TX",
            "--to-area",
            "41860",
            "--to-state",
            "CA",
        ])
        .expect("compare arguments parse");
        match cli.command {
            Some(Command::Compare(args)) => assert_eq!(args.salary, 108_000),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
