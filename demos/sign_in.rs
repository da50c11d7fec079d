use picket_client::{
    AuthArgs, AuthorizationRequirements, AuthzArgs, DefaultPicketClient, NonceArgs, PicketClient, TokenOwnershipArgs,
    ValidateArgs,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into())))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Use your project's secret key, see https://picketapi.com/dashboard
    let client = DefaultPicketClient::new("YOUR_SECRET_API_KEY")?;
    let chain = "ethereum".to_string();
    let wallet_address = "0x1234567890".to_string();

    let nonce = client
        .nonce(NonceArgs { chain: chain.clone(), wallet_address: wallet_address.clone(), locale: None })
        .await?;
    info!("Nonce: format={}, statement={:?}, nonce={}", nonce.format, nonce.statement, nonce.nonce);

    // The wallet signs the nonce message in the user's browser, this is a placeholder.
    let signature = "0xSIGNATURE".to_string();
    let auth = client
        .auth(AuthArgs {
            chain: chain.clone(),
            wallet_address: wallet_address.clone(),
            signature,
            requirements: None,
            context: None,
        })
        .await?;
    info!("Signed in: user={}", auth.user.display_address);

    let requirements = AuthorizationRequirements {
        contract_address: Some("0xContract".into()),
        min_token_balance: Some("1".into()),
        ..Default::default()
    };
    let authz = client
        .authz(AuthzArgs { access_token: auth.access_token, requirements: requirements.clone(), revalidate: false })
        .await?;

    let user = client.validate(ValidateArgs { access_token: authz.access_token, requirements: None }).await?;
    info!("Validated: user={}, balances={:?}", user.display_address, user.token_balances);

    let ownership = client.token_ownership(TokenOwnershipArgs { chain, wallet_address, requirements }).await?;
    info!("Token ownership: allowed={}, balances={:?}", ownership.allowed, ownership.token_balances);
    Ok(())
}
