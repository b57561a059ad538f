use clap::Args;
use mixdesk_app::{
    database,
    domain::plans::{
        PgPlansService, PlansService,
        tiers::{PriceTierTable, parse_price_tiers},
    },
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct ShowPlanArgs {
    /// User UUID to resolve
    #[arg(long)]
    user: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Extra price mappings, e.g. `price_123=pro,price_456=starter`
    #[arg(long, env = "PRICE_TIERS", default_value = "")]
    price_tiers: String,
}

pub(crate) async fn run(args: ShowPlanArgs) -> Result<(), String> {
    let overrides = parse_price_tiers(&args.price_tiers)
        .map_err(|error| format!("invalid price tiers: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgPlansService::new(pool, PriceTierTable::with_overrides(overrides));

    let info = service.get_user_plan_info(args.user.into()).await;

    let rendered = serde_json::to_string_pretty(&info)
        .map_err(|error| format!("failed to render plan: {error}"))?;

    println!("{rendered}");

    Ok(())
}
