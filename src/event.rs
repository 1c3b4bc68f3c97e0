//! Login event types exchanged with the hosting pipeline.
//!
//! The hosting pipeline owns these values for the duration of one login
//! event and discards them when the event resumes; nothing here survives
//! past that.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// SAML attribute carrying the list of assumable role ARNs.
pub const ROLE_ATTRIBUTE: &str = "https://aws.amazon.com/SAML/Attributes/Role";

/// SAML attribute carrying the session name.
///
/// The AWS console displays the logged-in account as
/// `role_name/session_name`, e.g. `github_webops/kerin`.
pub const ROLE_SESSION_NAME_ATTRIBUTE: &str =
    "https://aws.amazon.com/SAML/Attributes/RoleSessionName";

/// Snapshot of the user record for one login event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Provider-visible handle, used verbatim as the SAML session name.
    pub nickname: String,

    /// One entry per linked external identity.
    #[serde(default)]
    pub identities: Vec<UserIdentity>,
}

impl User {
    /// The identity linked through `connection`, if any.
    pub fn identity(&self, connection: &str) -> Option<&UserIdentity> {
        self.identities.iter().find(|i| i.connection == connection)
    }
}

/// One linked external identity on the user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Connection this identity came through.
    pub connection: String,

    /// Upstream access token, present only for connections that store one.
    ///
    /// Never shared with end users or logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Per-event login context.
///
/// Mutated in place by the rule; the hosting pipeline passes the result on
/// to SAML assertion issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginContext {
    /// Connection the user authenticated through.
    pub connection: String,

    /// Attribute mappings consumed by assertion issuance.
    #[serde(default)]
    pub saml_mappings: BTreeMap<String, AttributeValue>,
}

/// Value cell of the SAML attribute-mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Single string attribute, e.g. the session name.
    Single(String),

    /// Ordered multi-valued attribute, e.g. the role list.
    List(Vec<String>),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_user_identity_lookup() {
        let user = User {
            nickname: "kerin".to_string(),
            identities: vec![
                UserIdentity {
                    connection: "google-oauth2".to_string(),
                    access_token: None,
                },
                UserIdentity {
                    connection: "github".to_string(),
                    access_token: Some("gho_abc123".to_string()),
                },
            ],
        };

        let identity = user.identity("github").unwrap();
        assert_eq!(identity.access_token.as_deref(), Some("gho_abc123"));
        assert!(user.identity("saml").is_none());
    }

    #[test]
    fn test_context_deserializes_from_engine_payload() {
        let payload = json!({
            "connection": "github",
            "saml_mappings": {
                "https://aws.amazon.com/SAML/Attributes/Role": ["arn:aws:iam::123:role/x,arn:aws:iam::123:saml-provider/P"],
                "https://aws.amazon.com/SAML/Attributes/RoleSessionName": "kerin"
            }
        });

        let context: LoginContext = serde_json::from_value(payload).unwrap();
        assert_eq!(context.connection, "github");
        assert_eq!(
            context.saml_mappings.get(ROLE_SESSION_NAME_ATTRIBUTE),
            Some(&AttributeValue::Single("kerin".to_string()))
        );
        assert!(matches!(
            context.saml_mappings.get(ROLE_ATTRIBUTE),
            Some(AttributeValue::List(roles)) if roles.len() == 1
        ));
    }

    #[test]
    fn test_context_without_mappings_deserializes_empty() {
        let context: LoginContext =
            serde_json::from_value(json!({ "connection": "github" })).unwrap();
        assert!(context.saml_mappings.is_empty());
    }

    #[test]
    fn test_attribute_value_serializes_untagged() {
        let single = serde_json::to_value(AttributeValue::Single("kerin".into())).unwrap();
        assert_eq!(single, json!("kerin"));

        let list = serde_json::to_value(AttributeValue::List(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(list, json!(["a", "b"]));
    }
}
