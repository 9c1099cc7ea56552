//! HTML pages served to the operator's browser. Presentation only; every
//! decision about the flow itself lives in [`crate::outcome`].

use crate::exchange::{ExchangeError, TokenGrant};
use crate::outcome::CallbackOutcome;

const STYLE: &str = "\
    body { font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; } \
    h1.ok { color: #1DB954; } \
    h1.err { color: #e22134; } \
    code { background: #f4f4f4; padding: 2px 6px; border-radius: 3px; } \
    .token { background: #f4f4f4; padding: 15px; border-radius: 5px; \
             word-break: break-all; font-family: monospace; margin: 10px 0; } \
    a.button { display: inline-block; padding: 10px 20px; background: #1DB954; \
               color: white; text-decoration: none; border-radius: 5px; margin: 10px 0; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>{title}</title><style>{STYLE}</style></head>\n\
         <body>\n{body}\n</body>\n\
         </html>\n"
    )
}

/// Diagnostic page served at the root route. Not part of the OAuth flow;
/// it confirms the listener is reachable and repeats the authorization
/// link so the operator can restart from the browser.
pub fn status(auth_url: &str, redirect_uri: &str) -> String {
    page(
        "Spotify Refresh Token Helper",
        &format!(
            "<h1 class=\"ok\">Spotify Refresh Token Helper</h1>\n\
             <p>The callback listener is running.</p>\n\
             <h2>Next steps:</h2>\n\
             <ol>\n\
             <li>Make sure your Spotify app redirect URI is set to: <code>{redirect_uri}</code></li>\n\
             <li>Authorize the app using the link below</li>\n\
             <li>You will be redirected back here with a code</li>\n\
             </ol>\n\
             <a class=\"button\" href=\"{auth_url}\">Authorize with Spotify</a>\n\
             <h3>Or copy this URL:</h3>\n\
             <p class=\"token\">{auth_url}</p>"
        ),
    )
}

/// Success page embedding the refresh token the operator came for.
pub fn success(grant: &TokenGrant) -> String {
    page(
        "Success",
        &format!(
            "<h1 class=\"ok\">Success!</h1>\n\
             <h2>Your Spotify refresh token:</h2>\n\
             <div class=\"token\">{refresh}</div>\n\
             <h3>Next steps:</h3>\n\
             <ol>\n\
             <li>Copy the refresh token above</li>\n\
             <li>Add it to your <code>.env</code> file as: \
                 <code>SPOTIFY_REFRESH_TOKEN={refresh}</code></li>\n\
             </ol>\n\
             <p><strong>You can close this window now.</strong> \
                The helper shuts down on its own.</p>",
            refresh = grant.refresh_token
        ),
    )
}

/// Failure page for a provider-reported authorization error.
pub fn denied(error: &str, redirect_uri: &str) -> String {
    page(
        "Authorization Failed",
        &format!(
            "<h1 class=\"err\">Authorization Failed</h1>\n\
             <p>Error: <code>{error}</code></p>\n\
             <h3>Common solutions:</h3>\n\
             <ul>\n\
             <li>Make sure you clicked \"Agree\" on the authorization page</li>\n\
             <li>Check that the redirect URI in your Spotify app matches exactly: \
                 <code>{redirect_uri}</code></li>\n\
             <li>Run the helper again</li>\n\
             </ul>\n\
             <p>You can close this window.</p>"
        ),
    )
}

/// Troubleshooting page for a redirect that carried no code at all; the
/// usual cause is a redirect URI registration mismatch.
pub fn missing_code(redirect_uri: &str) -> String {
    page(
        "No Authorization Code",
        &format!(
            "<h1 class=\"err\">No Authorization Code</h1>\n\
             <p>The authorization process did not complete properly.</p>\n\
             <h3>Please check your Spotify app settings:</h3>\n\
             <ol>\n\
             <li>Go to <a href=\"https://developer.spotify.com/dashboard\">the Spotify \
                 Developer Dashboard</a></li>\n\
             <li>Select your app and open \"Edit Settings\"</li>\n\
             <li>Under \"Redirect URIs\", make sure you have exactly: \
                 <code>{redirect_uri}</code></li>\n\
             <li>Save the settings and run the helper again</li>\n\
             </ol>"
        ),
    )
}

/// Failure page for a refused token exchange, with the hint matching the
/// classified error kind.
pub fn exchange_failed(error: &ExchangeError) -> String {
    page(
        "Token Exchange Failed",
        &format!(
            "<h1 class=\"err\">Token Exchange Failed</h1>\n\
             <p>Failed to exchange authorization code: {error}</p>\n\
             <p>{hint}</p>\n\
             <p>You can close this window and try again.</p>",
            hint = error.hint()
        ),
    )
}

/// Page for a terminal callback outcome.
pub fn for_outcome(outcome: &CallbackOutcome, redirect_uri: &str) -> String {
    match outcome {
        CallbackOutcome::Denied { error } => denied(error, redirect_uri),
        CallbackOutcome::MissingCode => missing_code(redirect_uri),
        CallbackOutcome::Issued { grant } => success(grant),
        CallbackOutcome::ExchangeFailed { error } => exchange_failed(error),
    }
}
