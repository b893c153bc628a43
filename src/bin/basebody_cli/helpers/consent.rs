// ABOUTME: Terminal consent prompt for the Google identity flow
// ABOUTME: Prints the consent URL and reads the pasted redirect URL or authorization code
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use basebody::errors::AuthFailure;
use basebody::providers::{ConsentHandler, ConsentResponse};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::warn;

/// Consent handler that talks to the user over stdin/stderr
pub struct ConsoleConsent;

#[async_trait]
impl ConsentHandler for ConsoleConsent {
    async fn authorize(&self, authorization_url: &str) -> Result<ConsentResponse, AuthFailure> {
        eprintln!("\nOpen this URL in your browser to connect Google Fit:\n");
        eprintln!("  {authorization_url}\n");
        eprintln!("After approving, paste the URL you were redirected to (or just the code):");

        let mut lines = BufReader::new(stdin()).lines();
        match lines.next_line().await {
            Ok(Some(line)) => ConsentResponse::parse(&line),
            Ok(None) => Err(AuthFailure::ConsentDenied),
            Err(e) => {
                warn!(error = %e, "Could not read the authorization response");
                Err(AuthFailure::ConsentBlocked)
            }
        }
    }
}
