use clap::Args;
use mixdesk_app::domain::promotions::PromotionsService;

use super::PromotionArgs;

#[derive(Debug, Args)]
pub(crate) struct ClearPromotionArgs {
    #[command(flatten)]
    connection: PromotionArgs,
}

pub(crate) async fn run(args: ClearPromotionArgs) -> Result<(), String> {
    let removed = args
        .connection
        .service()
        .await?
        .invalidate()
        .await
        .map_err(|error| format!("failed to clear promotion cache: {error}"))?;

    if removed {
        println!("cleared cached promotion");
    } else {
        println!("no cached promotion");
    }

    Ok(())
}
