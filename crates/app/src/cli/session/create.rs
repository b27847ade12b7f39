use clap::Args;
use jiff::Timestamp;
use shopform_app::domain::shops::ShopDomain;

use crate::cli::AuthArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateSessionArgs {
    #[command(flatten)]
    auth: AuthArgs,

    /// Shop domain that should own the session
    #[arg(long)]
    shop: String,

    /// Free-form scope recorded with the session
    #[arg(long, default_value = "")]
    scope: String,

    /// Optional session expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<String>,
}

pub(crate) async fn run(args: CreateSessionArgs) -> Result<(), String> {
    let shop = ShopDomain::parse(&args.shop).map_err(|error| format!("invalid shop: {error}"))?;
    let expires_at = parse_expires_at(args.expires_at.as_deref())?;

    if let Some(expires_at) = expires_at.as_ref()
        && *expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let service = args.auth.connect().await?;

    let issued = service
        .issue_session(&shop, &args.scope, expires_at)
        .await
        .map_err(|error| format!("failed to create session: {error}"))?;

    println!("session_uuid: {}", issued.metadata.uuid);
    println!("shop: {}", issued.metadata.shop);
    println!("session_version: {}", issued.metadata.version.as_i16());
    println!("session_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("session_expires_at: {expires_at}");
    }
    println!("session_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

fn parse_expires_at(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid expires-at timestamp: {error}"))
    })
    .transpose()
}
