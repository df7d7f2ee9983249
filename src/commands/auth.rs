use anyhow::Result;

use crate::github::auth::check_auth;
use crate::github::types::AuthResponse;

pub async fn run(token: Option<&str>, api_url: Option<&str>) -> Result<()> {
    let status = check_auth(token, api_url).await;

    let response = AuthResponse {
        authenticated: status.is_authenticated(),
        status: status.to_string(),
    };
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
