//! Allow-list gate applied to identities returned by the OAuth provider.

use std::collections::HashSet;

/// Split a comma separated identifier list, trimming entries and dropping
/// empty ones.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInDecision {
    Granted { is_admin: bool },
    Denied,
}

/// Built once from configuration at startup and never mutated.
///
/// The admin list is independent: an identifier on the admin list but not on
/// the allow list still cannot sign in.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    allowed: HashSet<String>,
    admins: HashSet<String>,
}

impl AccessPolicy {
    pub fn new(
        allowed: impl IntoIterator<Item = String>,
        admins: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            admins: admins.into_iter().collect(),
        }
    }

    pub fn evaluate(&self, provider_id: &str) -> SignInDecision {
        if !self.allowed.contains(provider_id) {
            return SignInDecision::Denied;
        }
        SignInDecision::Granted {
            is_admin: self.admins.contains(provider_id),
        }
    }

    pub fn allowed_count(&self) -> usize {
        self.allowed.len()
    }

    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(parse_id_list("100, 200"), parse_id_list("200,300"))
    }

    #[test]
    fn unknown_identifier_is_denied() {
        assert_eq!(policy().evaluate("999"), SignInDecision::Denied);
        assert_eq!(policy().evaluate(""), SignInDecision::Denied);
    }

    #[test]
    fn admin_flag_comes_from_second_list() {
        assert_eq!(
            policy().evaluate("100"),
            SignInDecision::Granted { is_admin: false }
        );
        assert_eq!(
            policy().evaluate("200"),
            SignInDecision::Granted { is_admin: true }
        );
    }

    #[test]
    fn admin_without_allow_entry_is_denied() {
        assert_eq!(policy().evaluate("300"), SignInDecision::Denied);
    }

    #[test]
    fn empty_policy_denies_everyone() {
        let empty = AccessPolicy::default();
        assert_eq!(empty.evaluate("100"), SignInDecision::Denied);
        assert_eq!(empty.allowed_count(), 0);
    }
}
