use clap::Args;
use uuid::Uuid;

use crate::cli::AuthArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeSessionArgs {
    #[command(flatten)]
    auth: AuthArgs,

    /// Session UUID to revoke
    #[arg(long)]
    session_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeSessionArgs) -> Result<(), String> {
    let service = args.auth.connect().await?;

    let revoked = service
        .revoke_session(args.session_uuid)
        .await
        .map_err(|error| format!("failed to revoke session: {error}"))?;

    if revoked {
        println!("revoked session {}", args.session_uuid);
    } else {
        println!("session {} was not active", args.session_uuid);
    }

    Ok(())
}
