//! The login rule: gate on the connection, fetch teams, map to roles,
//! inject SAML attributes.

use crate::config::FederationConfig;
use crate::error::RuleError;
use crate::event::{AttributeValue, LoginContext, ROLE_ATTRIBUTE, ROLE_SESSION_NAME_ATTRIBUTE, User};
use crate::github::GithubTeamsClient;
use crate::mapping;

/// How a login event left the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The event did not arrive over the GitHub connection; user and
    /// context were left untouched.
    Passthrough,

    /// Role and session-name attributes were written into the context.
    Augmented,
}

/// Login-time transform mapping GitHub team memberships to AWS SAML role
/// attributes.
///
/// One instance is built at startup and shared across login events; it
/// holds only read-only configuration and an HTTP client.
#[derive(Debug, Clone)]
pub struct GithubAwsRule {
    config: FederationConfig,
    client: GithubTeamsClient,
}

impl GithubAwsRule {
    pub fn new(config: FederationConfig) -> Self {
        let client = GithubTeamsClient::new(&config.github_api_base, &config.user_agent);
        Self { config, client }
    }

    /// Use an existing HTTP client (hosts typically share one).
    pub fn with_client(config: FederationConfig, http: reqwest::Client) -> Self {
        let client =
            GithubTeamsClient::with_client(http, &config.github_api_base, &config.user_agent);
        Self { config, client }
    }

    /// Run the transform for one login event.
    ///
    /// Events over any connection other than the configured one pass
    /// through untouched, without contacting GitHub. On the GitHub
    /// connection the rule fetches the user's teams, maps the ones in the
    /// configured organization to role ARNs, and writes the role list and
    /// session name into the context's SAML mappings. Writing is
    /// idempotent for identical inputs.
    ///
    /// Any error aborts the whole login event.
    pub async fn execute(
        &self,
        user: &User,
        context: &mut LoginContext,
    ) -> Result<RuleOutcome, RuleError> {
        if context.connection != self.config.connection {
            tracing::debug!(
                connection = %context.connection,
                "Connection not subject to federation, passing through"
            );
            return Ok(RuleOutcome::Passthrough);
        }

        let identity =
            user.identity(&self.config.connection)
                .ok_or_else(|| RuleError::MissingIdentity {
                    connection: self.config.connection.clone(),
                })?;
        let access_token =
            identity
                .access_token
                .as_deref()
                .ok_or_else(|| RuleError::MissingAccessToken {
                    connection: self.config.connection.clone(),
                })?;

        let teams = self.client.list_user_teams(access_token).await?;
        let roles = mapping::map_teams_to_roles(&self.config, &teams);

        tracing::info!(
            teams = teams.len(),
            roles = roles.len(),
            organization = %self.config.github_organization,
            "Mapped github teams to assumable roles"
        );

        context
            .saml_mappings
            .insert(ROLE_ATTRIBUTE.to_string(), AttributeValue::List(roles));
        context.saml_mappings.insert(
            ROLE_SESSION_NAME_ATTRIBUTE.to_string(),
            AttributeValue::Single(user.nickname.clone()),
        );

        Ok(RuleOutcome::Augmented)
    }
}

// End-to-end coverage, including the no-outbound-call guarantee on
// passthrough, lives in src/tests/rule_e2e.rs.
