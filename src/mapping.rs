//! Team-to-role mapping.

use crate::config::FederationConfig;
use crate::github::Team;

const IAM_ARN_BASE: &str = "arn:aws:iam::";

/// ARN of the IAM SAML provider that has a trust relationship with the
/// identity provider. AWS requires it alongside each role ARN.
pub(crate) fn idp_arn(config: &FederationConfig) -> String {
    format!(
        "{IAM_ARN_BASE}{}:saml-provider/{}",
        config.aws_account_id, config.saml_provider_name
    )
}

/// Role ARN for one team slug.
fn role_arn(config: &FederationConfig, slug: &str) -> String {
    format!(
        "{IAM_ARN_BASE}{}:role/{}{}",
        config.aws_account_id, config.role_name_prefix, slug
    )
}

/// Render the user's team memberships into assumable-role identifiers, one
/// per team in the configured organization.
///
/// Teams in any other organization are excluded entirely. Output order
/// follows input order, so identical team lists yield byte-identical role
/// lists.
///
/// The SAML spec requires the IdP identifier alongside each role
/// identifier, separated with a comma.
pub(crate) fn map_teams_to_roles(config: &FederationConfig, teams: &[Team]) -> Vec<String> {
    let idp = idp_arn(config);

    teams
        .iter()
        .filter(|team| team.organization.login == config.github_organization)
        .map(|team| format!("{},{}", role_arn(config, &team.slug), idp))
        .collect()
}
