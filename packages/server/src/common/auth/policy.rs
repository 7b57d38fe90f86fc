//! Static access policy: which root fields are public and which need a super admin.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lazy_static::lazy_static;

use super::{Operation, OperationKind};

/// Role claim value that unlocks admin-only fields
pub const SUPER_ADMIN_ROLE: &str = "SUPER_ADMIN";

/// What an operation demands from the caller.
///
/// Both facets start false and are only ever raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    pub needs_authentication: bool,
    pub needs_super_admin: bool,
}

impl AccessRequirement {
    pub const PUBLIC: AccessRequirement = AccessRequirement {
        needs_authentication: false,
        needs_super_admin: false,
    };

    pub fn is_public(&self) -> bool {
        !self.needs_authentication && !self.needs_super_admin
    }
}

/// Whitelisted and admin-only root fields, keyed by operation kind.
///
/// Built once at startup and never mutated afterwards; share it behind an
/// `Arc` (see [`AccessPolicy::standard`]).
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    whitelisted: HashMap<OperationKind, HashSet<String>>,
    admin_only: HashMap<OperationKind, HashSet<String>>,
}

lazy_static! {
    static ref STANDARD_POLICY: Arc<AccessPolicy> = Arc::new(
        AccessPolicy::default()
            .whitelist(
                OperationKind::Query,
                ["__schema", "introspectionquery", "userNotification"],
            )
            .whitelist(
                OperationKind::Mutation,
                ["login", "authorLogin", "createAuthor"],
            )
            .whitelist(OperationKind::Subscription, ["userNotification"])
            .admin_only(OperationKind::Query, ["users"])
    );
}

impl AccessPolicy {
    /// The policy the server runs with
    pub fn standard() -> Arc<AccessPolicy> {
        STANDARD_POLICY.clone()
    }

    /// Mark fields of `kind` as callable without a token
    pub fn whitelist<I, S>(mut self, kind: OperationKind, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelisted
            .entry(kind)
            .or_default()
            .extend(fields.into_iter().map(Into::into));
        self
    }

    /// Mark fields of `kind` as requiring the super admin role
    pub fn admin_only<I, S>(mut self, kind: OperationKind, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.admin_only
            .entry(kind)
            .or_default()
            .extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn is_whitelisted(&self, kind: OperationKind, field: &str) -> bool {
        self.whitelisted
            .get(&kind)
            .is_some_and(|fields| fields.contains(field))
    }

    pub fn is_admin_only(&self, kind: OperationKind, field: &str) -> bool {
        self.admin_only
            .get(&kind)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Work out what `operation` requires from its caller.
    ///
    /// Every top-level field is inspected: one non-whitelisted field makes the
    /// whole operation authenticated, one admin-only field makes it admin-only,
    /// even when that field is also whitelisted.
    pub fn classify(&self, operation: &Operation) -> AccessRequirement {
        let kind = operation.kind();

        operation
            .field_names()
            .iter()
            .fold(AccessRequirement::PUBLIC, |mut req, field| {
                if !self.is_whitelisted(kind, field) {
                    req.needs_authentication = true;
                }
                if self.is_admin_only(kind, field) {
                    req.needs_super_admin = true;
                }
                req
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(kind: OperationKind, fields: &[&str]) -> Operation {
        Operation::new(None, kind, fields.iter().copied())
    }

    #[test]
    fn test_whitelisted_fields_are_public() {
        let policy = AccessPolicy::standard();

        for (kind, fields) in [
            (OperationKind::Mutation, vec!["login"]),
            (OperationKind::Mutation, vec!["login", "authorLogin", "createAuthor"]),
            (OperationKind::Query, vec!["__schema"]),
            (OperationKind::Subscription, vec!["userNotification"]),
        ] {
            assert_eq!(
                policy.classify(&op(kind, &fields)),
                AccessRequirement::PUBLIC,
                "{kind} {fields:?}"
            );
        }
    }

    #[test]
    fn test_empty_selection_is_public() {
        let policy = AccessPolicy::standard();
        assert!(policy.classify(&op(OperationKind::Query, &[])).is_public());
    }

    #[test]
    fn test_one_private_field_forces_authentication() {
        let policy = AccessPolicy::standard();

        let req = policy.classify(&op(OperationKind::Query, &["__schema", "posts"]));
        assert!(req.needs_authentication);
        assert!(!req.needs_super_admin);

        let req = policy.classify(&op(OperationKind::Mutation, &["createPost", "login"]));
        assert!(req.needs_authentication);
    }

    #[test]
    fn test_whitelist_is_per_kind() {
        let policy = AccessPolicy::standard();
        // login is only public as a mutation
        let req = policy.classify(&op(OperationKind::Query, &["login"]));
        assert!(req.needs_authentication);
    }

    #[test]
    fn test_admin_field_anywhere_forces_admin() {
        let policy = AccessPolicy::standard();

        let req = policy.classify(&op(OperationKind::Query, &["__schema", "me", "users"]));
        assert_eq!(
            req,
            AccessRequirement {
                needs_authentication: true,
                needs_super_admin: true,
            }
        );
    }

    #[test]
    fn test_admin_only_wins_over_whitelist() {
        let policy = AccessPolicy::default()
            .whitelist(OperationKind::Query, ["stats"])
            .admin_only(OperationKind::Query, ["stats"]);

        let req = policy.classify(&op(OperationKind::Query, &["stats"]));
        assert!(!req.needs_authentication);
        assert!(req.needs_super_admin);
        assert!(!req.is_public());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let policy = AccessPolicy::standard();
        let operation = op(OperationKind::Query, &["users", "__schema", "posts"]);
        assert_eq!(policy.classify(&operation), policy.classify(&operation));
    }

    #[test]
    fn test_standard_policy_is_shared() {
        assert!(Arc::ptr_eq(&AccessPolicy::standard(), &AccessPolicy::standard()));
    }
}
