use clap::Args;
use mixdesk_app::domain::promotions::PromotionsService;

use super::PromotionArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowPromotionArgs {
    #[command(flatten)]
    connection: PromotionArgs,
}

pub(crate) async fn run(args: ShowPromotionArgs) -> Result<(), String> {
    let payload = args.connection.service().await?.active_promotion().await;

    println!("origin: {}", payload.origin.as_str());
    println!("{}", payload.body);

    Ok(())
}
