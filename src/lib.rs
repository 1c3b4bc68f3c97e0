//! Login-time federation of GitHub team memberships into AWS SAML role
//! attributes.
//!
//! When a user signs in through the GitHub connection, the hosting login
//! pipeline hands the event to [`GithubAwsRule::execute`]. The rule fetches
//! the user's GitHub teams, keeps the ones belonging to the configured
//! organization, and writes one assumable IAM role ARN per team (plus a
//! session name) into the context's SAML attribute mappings. AWS then offers
//! the user one role per team at sign-in. Logins over any other connection
//! pass through untouched.
//!
//! # Example
//!
//! ```no_run
//! use legate::{FederationConfig, GithubAwsRule, LoginContext, RuleError, User};
//!
//! # async fn login(user: User, mut context: LoginContext) -> Result<(), RuleError> {
//! let config = FederationConfig::from_file("federation.toml").expect("valid config");
//! let rule = GithubAwsRule::new(config);
//!
//! // Inside the login pipeline, once per event:
//! let outcome = rule.execute(&user, &mut context).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod event;
mod github;
mod mapping;
mod rule;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, FederationConfig};
pub use error::RuleError;
pub use event::{
    AttributeValue, LoginContext, ROLE_ATTRIBUTE, ROLE_SESSION_NAME_ATTRIBUTE, User, UserIdentity,
};
pub use github::{GithubTeamsClient, Team, TeamOrganization};
pub use rule::{GithubAwsRule, RuleOutcome};
