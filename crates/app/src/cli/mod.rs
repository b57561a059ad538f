use clap::{Parser, Subcommand};

mod plan;
mod promotion;

#[derive(Debug, Parser)]
#[command(name = "mixdesk-app", about = "Mixdesk operator CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Plan(plan::PlanCommand),
    Promotion(promotion::PromotionCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Plan(command) => plan::run(command).await,
            Commands::Promotion(command) => promotion::run(command).await,
        }
    }
}
