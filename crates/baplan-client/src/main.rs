mod prompt;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use baplan_client::api::{ApiClient, DEFAULT_API_URL};
use baplan_client::viewer::ViewState;
use baplan_client::wizard::Wizard;

#[derive(Debug, Parser)]
#[command(name = "baplan", version, about = "Behavioral Activation plan survey")]
struct Cli {
    /// Base URL of the survey service.
    #[arg(long, env = "BAPLAN_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the survey and generate a plan.
    Survey,
    /// Show the plan stored for a survey.
    Show { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url);

    let state = match cli.command {
        Command::Survey => {
            let mut wizard = Wizard::new();
            let Some(survey) = prompt::run(&mut wizard)? else {
                println!("Survey cancelled.");
                return Ok(());
            };
            println!("{}", ViewState::Loading.render()?);
            ViewState::from_fetch(client.submit(&survey).await)
        }
        Command::Show { id } => {
            println!("{}", ViewState::Loading.render()?);
            ViewState::from_fetch(client.fetch(id).await)
        }
    };

    if let Some(reason) = state.failure() {
        eyre::bail!("could not load plan: {reason}");
    }
    println!("{}", state.render()?);
    Ok(())
}
