use serde::Deserialize;

use crate::exchange::{ExchangeError, TokenExchange, TokenGrant};

/// Query parameters carried by the provider redirect. Exactly one of the
/// two fields is expected; both absent is its own failure case.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Terminal outcome of the single expected callback request.
///
/// Each variant maps deterministically to a browser page, a console
/// report, and a process exit code. The listener never terminates the
/// process itself.
#[derive(Debug)]
pub enum CallbackOutcome {
    /// The provider reported an authorization error (consent denied,
    /// redirect URI mismatch).
    Denied { error: String },
    /// The redirect carried neither `code` nor `error`.
    MissingCode,
    /// The code exchange succeeded.
    Issued { grant: TokenGrant },
    /// The token endpoint refused the exchange.
    ExchangeFailed { error: ExchangeError },
}

impl CallbackOutcome {
    /// Resolve the callback query against the token exchange collaborator.
    /// The exchanger is only consulted on the code-present path.
    pub async fn resolve(params: CallbackParams, exchanger: &dyn TokenExchange) -> Self {
        if let Some(error) = params.error {
            return Self::Denied { error };
        }

        let Some(code) = params.code else {
            return Self::MissingCode;
        };

        match exchanger.exchange_code(&code).await {
            Ok(grant) => Self::Issued { grant },
            Err(error) => Self::ExchangeFailed { error },
        }
    }

    /// Process exit code for this outcome: 0 only when tokens were issued.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Issued { .. } => 0,
            _ => 1,
        }
    }

    /// Write the operator-facing report to the terminal. The token block
    /// goes to stdout; everything else goes to stderr with the rest of the
    /// tool's progress output.
    pub fn report(&self, redirect_uri: &str) {
        match self {
            Self::Denied { error } => {
                eprintln!("Authorization failed: {error}");
                eprintln!();
                eprintln!("Common causes:");
                eprintln!("  - \"Cancel\" was clicked on the authorization page");
                eprintln!("  - The redirect URI registered with your app does not match {redirect_uri}");
            }
            Self::MissingCode => {
                eprintln!("No authorization code received");
                eprintln!();
                eprintln!("Troubleshooting:");
                eprintln!("  1. Open https://developer.spotify.com/dashboard");
                eprintln!("  2. Select your app > Edit Settings > Redirect URIs");
                eprintln!("  3. Add or update the entry to exactly: {redirect_uri}");
                eprintln!("  4. Save and run this tool again");
            }
            Self::Issued { grant } => {
                eprintln!("Authorization code exchanged successfully");
                println!();
                println!("Access token:  {}", grant.access_token);
                println!("Refresh token: {}", grant.refresh_token);
                println!("Expires in:    {} seconds", grant.expires_in);
                println!();
                println!("Add the refresh token to your .env file:");
                println!("  SPOTIFY_REFRESH_TOKEN={}", grant.refresh_token);
            }
            Self::ExchangeFailed { error } => {
                eprintln!("Failed to exchange authorization code: {error}");
                eprintln!("{}", error.hint());
            }
        }
    }
}
