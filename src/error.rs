//! Fatal conditions that abort a login event.
//!
//! A login over a non-GitHub connection is not an error; the rule reports it
//! as [`RuleOutcome::Passthrough`](crate::RuleOutcome::Passthrough). Every
//! variant here aborts the whole event: there is no partial success and no
//! local recovery, the hosting pipeline surfaces the failure to the user.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    /// The event arrived over the GitHub connection but the user record has
    /// no linked GitHub identity.
    #[error("user has no identity for connection '{connection}'")]
    MissingIdentity { connection: String },

    /// The linked GitHub identity carries no upstream access token.
    #[error("identity for connection '{connection}' has no access token")]
    MissingAccessToken { connection: String },

    /// The teams endpoint answered with a non-success status.
    #[error("error retrieving teams from github ({status}): {body}")]
    TeamLookup { status: StatusCode, body: String },

    /// The team lookup never produced a response.
    #[error("team lookup transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected team shape.
    #[error("malformed team list from github: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_lookup_display_includes_status_and_body() {
        let err = RuleError::TeamLookup {
            status: StatusCode::UNAUTHORIZED,
            body: "{\"message\":\"Bad credentials\"}".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("401"));
        assert!(display.contains("Bad credentials"));
    }

    #[test]
    fn test_missing_identity_display_names_connection() {
        let err = RuleError::MissingIdentity {
            connection: "github".to_string(),
        };
        assert!(err.to_string().contains("'github'"));
    }
}
