//! Minimal GitHub REST client for team-membership lookups.

use serde::Deserialize;

use crate::error::RuleError;

/// A team membership as returned by `GET /user/teams`.
///
/// GitHub returns many more fields per team; only the slug and the owning
/// organization matter here, the rest are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub slug: String,
    pub organization: TeamOrganization,
}

/// Organization owning a team.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamOrganization {
    pub login: String,
}

/// Client for the "list teams for the authenticated user" endpoint.
#[derive(Debug, Clone)]
pub struct GithubTeamsClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl GithubTeamsClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, user_agent)
    }

    /// Use an existing HTTP client instead of constructing a fresh one.
    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Fetch the authenticated user's team memberships.
    ///
    /// Issues exactly one request. Any status other than 200 is fatal and
    /// carries the response body for diagnosis; a body that doesn't
    /// deserialize into the team shape is equally fatal.
    pub async fn list_user_teams(&self, access_token: &str) -> Result<Vec<Team>, RuleError> {
        let url = format!("{}/user/teams", self.base_url.trim_end_matches('/'));
        tracing::debug!(url = %url, "Fetching user teams from github");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Team lookup returned error status");
            return Err(RuleError::TeamLookup { status, body });
        }

        let body = response.text().await?;
        let teams: Vec<Team> = serde_json::from_str(&body)?;

        tracing::debug!(teams = teams.len(), "Fetched user teams");
        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // Request/response behavior is covered end-to-end in src/tests; these
    // only pin the wire shape.

    #[test]
    fn test_team_deserializes_ignoring_extra_fields() {
        let body = json!({
            "id": 1,
            "name": "Web Ops",
            "slug": "webops",
            "permission": "pull",
            "organization": {
                "id": 2,
                "login": "example-org",
                "url": "https://api.github.com/orgs/example-org"
            }
        });

        let team: Team = serde_json::from_value(body).unwrap();
        assert_eq!(team.slug, "webops");
        assert_eq!(team.organization.login, "example-org");
    }

    #[test]
    fn test_team_missing_slug_is_an_error() {
        let body = json!([{ "organization": { "login": "example-org" } }]);
        assert!(serde_json::from_value::<Vec<Team>>(body).is_err());
    }
}
