use std::collections::HashMap;

use super::{Operation, Role};
use crate::error::{DomainError, Result};

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Explicit operation -> permitted roles table
///
/// Evaluation is a pure lookup. An operation with no entry permits nobody.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPolicy {
    rules: HashMap<Operation, Vec<Role>>,
}

impl AccessPolicy {
    /// Policy with no rules; every check is denied
    pub fn deny_all() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Replace the roles permitted for `operation`
    pub fn with_rule(mut self, operation: Operation, roles: impl IntoIterator<Item = Role>) -> Self {
        let mut roles: Vec<Role> = roles.into_iter().collect();
        roles.sort();
        roles.dedup();
        self.rules.insert(operation, roles);
        self
    }

    /// Apply overrides on top of this policy, keeping rules the overrides don't mention
    pub fn with_overrides(self, overrides: &HashMap<Operation, Vec<Role>>) -> Self {
        overrides
            .iter()
            .fold(self, |policy, (op, roles)| policy.with_rule(*op, roles.iter().copied()))
    }

    pub fn allowed_roles(&self, operation: Operation) -> &[Role] {
        self.rules
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn authorize(&self, role: Role, operation: Operation) -> Access {
        if self.allowed_roles(operation).contains(&role) {
            Access::Allowed
        } else {
            Access::Denied
        }
    }

    /// Same as [`authorize`](Self::authorize), as a `Forbidden` error on denial
    pub fn require(&self, role: Role, operation: Operation) -> Result<()> {
        match self.authorize(role, operation) {
            Access::Allowed => Ok(()),
            Access::Denied => Err(DomainError::Forbidden { role, operation }),
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::deny_all()
            .with_rule(Operation::Create, [Role::Owner, Role::Admin])
            .with_rule(Operation::ListAll, [Role::Admin])
            .with_rule(Operation::ReadOne, [Role::Owner, Role::Admin])
            .with_rule(Operation::Update, [Role::Owner, Role::Admin])
            .with_rule(Operation::Delete, [Role::Owner, Role::Admin])
    }
}
