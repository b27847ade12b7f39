use clap::Args;
use jiff::Timestamp;
use shopform_app::domain::shops::ShopDomain;

use crate::cli::AuthArgs;

#[derive(Debug, Args)]
pub(crate) struct ListSessionsArgs {
    #[command(flatten)]
    auth: AuthArgs,

    /// Shop domain whose sessions should be listed
    #[arg(long)]
    shop: String,
}

pub(crate) async fn run(args: ListSessionsArgs) -> Result<(), String> {
    let shop = ShopDomain::parse(&args.shop).map_err(|error| format!("invalid shop: {error}"))?;

    let service = args.auth.connect().await?;

    let sessions = service
        .list_sessions(&shop)
        .await
        .map_err(|error| format!("failed to list sessions: {error}"))?;

    if sessions.is_empty() {
        println!("no sessions found for shop {shop}");
        return Ok(());
    }

    let now = Timestamp::now();

    for session in sessions {
        println!("session_uuid: {}", session.uuid);
        println!("shop: {}", session.shop);
        println!("session_version: {}", session.version.as_i16());
        println!("scope: {}", session.scope);
        println!("created_at: {}", session.created_at);
        println!(
            "last_used_at: {}",
            session
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "expires_at: {}",
            session
                .expires_at
                .map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        println!(
            "status: {}",
            if session.is_active_at(now) {
                "active"
            } else {
                "inactive"
            }
        );
        println!();
    }

    Ok(())
}
