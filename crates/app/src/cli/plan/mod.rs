use clap::{Args, Subcommand};

mod show;

#[derive(Debug, Args)]
pub(crate) struct PlanCommand {
    #[command(subcommand)]
    command: PlanSubcommand,
}

#[derive(Debug, Subcommand)]
enum PlanSubcommand {
    /// Resolve a user's plan, limits and usage
    Show(show::ShowPlanArgs),
}

pub(crate) async fn run(command: PlanCommand) -> Result<(), String> {
    match command.command {
        PlanSubcommand::Show(args) => show::run(args).await,
    }
}
