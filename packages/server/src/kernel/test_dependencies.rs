// Test doubles for the authorization gate's collaborators
//
// Each mock records the emails it was asked for so tests can assert that a
// denied request never reached storage.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::common::auth::{
    AuthError, AuthorLookup, AuthorRecord, Claims, TokenVerifier, UserLookup, UserRecord,
};
use crate::common::{AuthorId, UserId};

// =============================================================================
// Mock User Lookup
// =============================================================================

#[derive(Default)]
pub struct MockUserLookup {
    users: HashMap<String, UserRecord>,
    delay: Option<Duration>,
    failing: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockUserLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, email: &str, id: UserId, role: &str) -> Self {
        self.users.insert(
            email.to_string(),
            UserRecord {
                id,
                role: role.to_string(),
            },
        );
        self
    }

    /// Make every lookup take `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every lookup fail as if storage were down
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserLookup for MockUserLookup {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        self.calls.lock().unwrap().push(email.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing {
            anyhow::bail!("mock user store unavailable");
        }

        Ok(self.users.get(email).cloned())
    }
}

// =============================================================================
// Mock Author Lookup
// =============================================================================

#[derive(Default)]
pub struct MockAuthorLookup {
    authors: HashMap<String, AuthorRecord>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockAuthorLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, email: &str, id: AuthorId) -> Self {
        self.authors.insert(email.to_string(), AuthorRecord { id });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthorLookup for MockAuthorLookup {
    async fn find_author_by_email(&self, email: &str) -> Result<Option<AuthorRecord>> {
        self.calls.lock().unwrap().push(email.to_string());
        Ok(self.authors.get(email).cloned())
    }
}

// =============================================================================
// Mock Token Verifier
// =============================================================================

/// Accepts only the tokens registered with [`with_token`](Self::with_token)
#[derive(Default)]
pub struct MockTokenVerifier {
    tokens: HashMap<String, Claims>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, claims: Claims) -> Self {
        self.tokens.insert(token.to_string(), claims);
        self
    }
}

impl TokenVerifier for MockTokenVerifier {
    fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}
