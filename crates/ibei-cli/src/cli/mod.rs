mod commands;
mod helpers;

use clap::Parser;
use ibei_core::domain::IbeiError;

pub fn run_from_env() -> i32 {
    let args = std::iter::once("ibei".to_string())
        .chain(std::env::args().skip(1))
        .collect::<Vec<_>>();

    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            let diagnostic = error.as_ibei_error();
            eprintln!("{}", diagnostic.diagnostic_line());
            diagnostic.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.verbose);
            let format = if cli.json {
                helpers::OutputFormat::Json
            } else {
                helpers::OutputFormat::Human
            };
            dispatch_parsed(cli.command, format)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "ibei",
    version,
    about = "Bose-Einstein integrals and detailed-balance solar cells"
)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Raise log verbosity (-v info, -vv debug); IBEI_LOG or RUST_LOG take precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Evaluate the upper, lower and full Bose-Einstein integral
    Bei(commands::BeiArgs),
    /// Evaluate a Shockley-Queisser solar cell
    Sq(commands::SqArgs),
    /// Evaluate a DeVos solar cell under full concentration
    Devos(commands::DevosArgs),
    /// Evaluate a JSON scenario file and check its expected values
    Run(commands::RunArgs),
}

fn dispatch_parsed(command: CliCommand, format: helpers::OutputFormat) -> Result<i32, CliError> {
    match command {
        CliCommand::Bei(args) => commands::run_bei_command(args, format),
        CliCommand::Sq(args) => commands::run_sq_command(args, format),
        CliCommand::Devos(args) => commands::run_devos_command(args, format),
        CliCommand::Run(args) => commands::run_scenario_command(args, format),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(IbeiError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_ibei_error(&self) -> IbeiError {
        match self {
            Self::Usage(message) => {
                IbeiError::input_validation("INPUT.CLI_USAGE", first_line(message))
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => IbeiError::internal("INTERNAL.CLI", format!("{error:#}")),
        }
    }
}

fn compute_error(error: impl Into<IbeiError>) -> CliError {
    CliError::Compute(error.into())
}

fn first_line(message: &str) -> String {
    message.lines().next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use ibei_core::domain::IbeiErrorCategory;

    #[test]
    fn usage_errors_keep_only_the_first_line() {
        let error = CliError::Usage("error: unexpected argument\n\nUsage: ibei".to_string());
        let diagnostic = error.as_ibei_error();

        assert_eq!(diagnostic.code(), "INPUT.CLI_USAGE");
        assert_eq!(diagnostic.message(), "error: unexpected argument");
        assert_eq!(diagnostic.exit_code(), 2);
    }

    #[test]
    fn unclassified_failures_are_internal() {
        let error = CliError::from(anyhow::anyhow!("failed to serialize command output"));
        let diagnostic = error.as_ibei_error();

        assert_eq!(diagnostic.category(), IbeiErrorCategory::InternalError);
        assert_eq!(diagnostic.code(), "INTERNAL.CLI");
        assert_eq!(diagnostic.exit_code(), 5);
    }
}
