//! A Rust client for the [Picket API](https://picketapi.com), a wallet-based
//! authentication and token-gating service.
//!
//! # Getting Started
//!
//! The primary entry point is the [`PicketClient`] trait and its default
//! implementation, [`DefaultPicketClient`].
//!
//! ## Example: Signing In and Gating on a Token
//!
//! ```no_run
//! use picket_client::{
//!     AuthArgs, AuthorizationRequirements, AuthzArgs, DefaultPicketClient, NonceArgs, PicketClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DefaultPicketClient::new("YOUR_SECRET_API_KEY")?;
//!
//!     // 1. Get a nonce for the user's wallet to sign
//!     let nonce = client
//!         .nonce(NonceArgs { chain: "ethereum".into(), wallet_address: "0x1234567890".into(), locale: None })
//!         .await?;
//!     println!("Sign this: {} ({})", nonce.statement, nonce.nonce);
//!
//!     // 2. Exchange the signature for an access token
//!     let signature = String::from("signature-produced-by-the-wallet");
//!     let auth = client
//!         .auth(AuthArgs {
//!             chain: "ethereum".into(),
//!             wallet_address: "0x1234567890".into(),
//!             signature,
//!             requirements: None,
//!             context: None,
//!         })
//!         .await?;
//!
//!     // 3. Later, check the same user holds at least 100 tokens
//!     let requirements = AuthorizationRequirements {
//!         contract_address: Some("0xContract".into()),
//!         min_token_balance: Some("100".into()),
//!         ..Default::default()
//!     };
//!     let authz = client.authz(AuthzArgs { access_token: auth.access_token, requirements, revalidate: false }).await;
//!     match authz {
//!         Ok(authz) => println!("Authorized {}", authz.user.display_address),
//!         Err(e) if e.code().is_some() => println!("Denied: {e}"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;

pub use client::{DefaultPicketClient, Endpoint, PicketClient, PicketClientArgs, DEFAULT_BASE_URL};
pub use error::{ErrorResponse, PicketError};
pub use models::{
    AuthArgs, AuthResponse, AuthorizationRequirements, AuthorizedUser, AuthzArgs, NonceArgs, NonceResponse,
    SigningMessageContext, SigningMessageFormat, TokenBalances, TokenOwnershipArgs, TokenOwnershipResponse,
    ValidateArgs,
};
