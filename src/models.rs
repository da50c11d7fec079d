use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fmt::{self, Display},
};

/// Token balances keyed by address.
pub type TokenBalances = HashMap<String, String>;

/// The format of the message a wallet is asked to sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningMessageFormat {
    /// A plain text message.
    Simple,

    /// A Sign-In With Ethereum (EIP-4361) message.
    Siwe,
}

impl Display for SigningMessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Siwe => write!(f, "siwe"),
        }
    }
}

/// The arguments to a request for a sign-in nonce.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonceArgs {
    /// The chain the wallet lives on, e.g. `ethereum` or `solana`.
    pub chain: String,

    /// The wallet requesting to sign in.
    ///
    /// Sent as `walletAddress`; the legacy `wallet_address` name is still accepted when reading.
    #[serde(alias = "wallet_address")]
    pub wallet_address: String,

    /// The locale used to render the statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// A nonce to be embedded in the message the wallet signs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,

    /// The human readable statement shown to the user.
    pub statement: String,

    pub format: SigningMessageFormat,
}

/// Token gating criteria. Unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequirements {
    /// The token or NFT contract address.
    #[serde(alias = "contract_address", skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,

    /// The minimum balance the wallet must hold.
    #[serde(alias = "min_token_balance", skip_serializing_if = "Option::is_none")]
    pub min_token_balance: Option<String>,

    /// The collection the token must belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,

    /// The creator of the token.
    #[serde(alias = "creator_address", skip_serializing_if = "Option::is_none")]
    pub creator_address: Option<String>,

    /// Specific token ids, any of which satisfies the requirement.
    #[serde(alias = "token_ids", skip_serializing_if = "Option::is_none")]
    pub token_ids: Option<Vec<String>>,

    /// Wallets that are allowed regardless of balance.
    #[serde(alias = "allowed_wallets", skip_serializing_if = "Option::is_none")]
    pub allowed_wallets: Option<Vec<String>>,
}

/// The context the signed message was generated in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningMessageContext {
    /// The domain requesting the signature.
    pub domain: String,

    /// The uri of the resource being signed into.
    pub uri: String,

    /// When the message was issued.
    pub issued_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}

/// The arguments to exchange a signed message for an access token.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthArgs {
    pub chain: String,

    #[serde(alias = "wallet_address")]
    pub wallet_address: String,

    /// The wallet's signature over the nonce message.
    pub signature: String,

    /// Requirements the wallet must meet to be issued a token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<AuthorizationRequirements>,

    /// The context the signed message was generated in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<SigningMessageContext>,
}

/// A user as decoded from an access token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizedUser {
    pub chain: String,

    #[serde(alias = "wallet_address")]
    pub wallet_address: String,

    /// The address to display, e.g. a resolved ENS name.
    #[serde(alias = "display_address")]
    pub display_address: String,

    /// The balances checked when the token was issued.
    #[serde(default, alias = "token_balances", skip_serializing_if = "HashMap::is_empty")]
    pub token_balances: TokenBalances,
}

/// A successful authentication or authorization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: AuthorizedUser,

    /// The access token for the rest of the user's session.
    #[serde(alias = "access_token")]
    pub access_token: String,
}

/// The arguments to authorize an existing access token against new requirements.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthzArgs {
    #[serde(alias = "access_token")]
    pub access_token: String,

    pub requirements: AuthorizationRequirements,

    /// Re-check balances even if the token already satisfies the requirements.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub revalidate: bool,
}

/// The arguments to validate an access token.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateArgs {
    #[serde(alias = "access_token")]
    pub access_token: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<AuthorizationRequirements>,
}

/// The arguments to check a wallet's token ownership.
///
/// The chain and wallet are sent as path segments, only the requirements go in
/// the body. Each segment is escaped, but a chain or wallet of exactly `.` or
/// `..` is dropped from the path by the url encoder and must not be used.
#[derive(Clone, Debug)]
pub struct TokenOwnershipArgs {
    pub chain: String,
    pub wallet_address: String,
    pub requirements: AuthorizationRequirements,
}

/// The result of a token ownership check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenOwnershipResponse {
    /// Whether the wallet meets the requirements.
    pub allowed: bool,

    #[serde(default, alias = "token_balances")]
    pub token_balances: TokenBalances,
}
