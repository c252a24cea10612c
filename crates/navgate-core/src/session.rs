// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Session state and the key-value stores that hold it.
//!
//! The session lives in a string-valued key-value store shared with the rest
//! of the application: the `user` key holds a JSON user record, the `token`
//! key holds the opaque session token. Login and logout write these keys from
//! outside this crate; the access layer only reads them and clears both when
//! it detects an expired token.
//!
//! # Components
//!
//! - [`SessionStore`]: the storage seam
//! - [`MemorySessionStore`]: in-process store, `parking_lot::RwLock` guarded
//! - [`FileSessionStore`]: JSON object on disk
//! - [`SessionProvider`]: store plus configured keys, yields [`Session`] snapshots

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::config::GuardConfig;
use crate::error::{NavgateError, NavgateResult};

// =============================================================================
// UserRecord
// =============================================================================

/// Role reference carried by a user record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// Role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The user record stored under the `user` key.
///
/// Unknown fields are ignored. The record is replaced wholesale on login and
/// never mutated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRef>,

    /// Permission identifiers granted to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorities: Option<Vec<String>>,
}

impl UserRecord {
    /// Creates a user record with the given role and authorities.
    pub fn new(role: impl Into<String>, authorities: Vec<String>) -> Self {
        Self {
            role: Some(RoleRef {
                name: Some(role.into()),
            }),
            authorities: Some(authorities),
        }
    }

    /// Returns the role name, if any.
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref()?.name.as_deref()
    }

    /// Returns `true` if the authority list contains `permission`.
    pub fn has_authority(&self, permission: &str) -> bool {
        self.authorities
            .as_deref()
            .is_some_and(|list| list.iter().any(|a| a == permission))
    }

    /// Parses a stored user record.
    ///
    /// A JSON `null` yields `Ok(None)`.
    pub fn parse(raw: &str) -> NavgateResult<Option<Self>> {
        serde_json::from_str::<Option<Self>>(raw)
            .map_err(|e| NavgateError::malformed_user(e.to_string()))
    }

    /// Serializes the record for storage.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}

// =============================================================================
// Session
// =============================================================================

/// A point-in-time view of the shared session keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Raw JSON stored under the user key.
    pub user: Option<String>,
    /// Raw token stored under the token key.
    pub token: Option<String>,
}

impl Session {
    /// Creates a session snapshot.
    pub fn new(user: Option<String>, token: Option<String>) -> Self {
        Self { user, token }
    }

    /// Creates an empty (logged out) session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns `true` if both a user and a token are present.
    ///
    /// This is a presence check only; the token may be expired.
    pub fn is_logged_in(&self) -> bool {
        self.has_user() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Returns `true` if a non-empty user entry is present.
    pub fn has_user(&self) -> bool {
        self.user.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Parses the stored user record.
    pub fn user_record(&self) -> NavgateResult<Option<UserRecord>> {
        match self.user.as_deref() {
            Some(raw) if !raw.is_empty() => UserRecord::parse(raw),
            _ => Ok(None),
        }
    }
}

// =============================================================================
// SessionStore
// =============================================================================

/// String-valued key-value storage holding the session.
pub trait SessionStore: Send + Sync + Debug {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value.
    fn set(&self, key: &str, value: &str) -> NavgateResult<()>;

    /// Removes a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> NavgateResult<()>;

    /// Removes several keys as one operation.
    ///
    /// Implementations with internal locking override this so that no reader
    /// observes a half-cleared session.
    fn clear_session(&self, keys: &[&str]) -> NavgateResult<()> {
        for key in keys {
            self.remove(key)?;
        }
        Ok(())
    }

    /// Returns the store name for logging.
    fn name(&self) -> &str {
        "session-store"
    }
}

// =============================================================================
// MemorySessionStore
// =============================================================================

/// In-process session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> NavgateResult<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> NavgateResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear_session(&self, keys: &[&str]) -> NavgateResult<()> {
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

// =============================================================================
// FileSessionStore
// =============================================================================

/// Session store persisted as a flat JSON object on disk.
///
/// A missing file reads as an empty store. Writes rewrite the whole file while
/// holding the store's mutex.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry.
    ///
    /// Non-string JSON values are stored back as their JSON text, mirroring a
    /// string-only key-value store.
    pub fn load(&self) -> NavgateResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| NavgateError::store(&self.path, e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| NavgateError::store(&self.path, e.to_string()))?;

        Ok(raw
            .into_iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect())
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> NavgateResult<()> {
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| NavgateError::store(&self.path, e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| NavgateError::store(&self.path, e.to_string()))
    }

    fn modify(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) -> NavgateResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock();
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                tracing::warn!(error = %e, key, "Failed to read session file");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> NavgateResult<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> NavgateResult<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }

    fn clear_session(&self, keys: &[&str]) -> NavgateResult<()> {
        self.modify(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }

    fn name(&self) -> &str {
        "file"
    }
}

// =============================================================================
// SessionProvider
// =============================================================================

/// Injected access to the shared session.
///
/// Bundles a store with the key names it uses, so the guard and the oracle
/// never touch a global.
#[derive(Debug, Clone)]
pub struct SessionProvider {
    store: Arc<dyn SessionStore>,
    user_key: String,
    token_key: String,
}

impl SessionProvider {
    /// Creates a provider with the default `user` / `token` keys.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_keys(store, GuardConfig::DEFAULT_USER_KEY, GuardConfig::DEFAULT_TOKEN_KEY)
    }

    /// Creates a provider using the keys named in `config`.
    pub fn from_config(store: Arc<dyn SessionStore>, config: &GuardConfig) -> Self {
        Self::with_keys(store, &config.user_key, &config.token_key)
    }

    /// Creates a provider with explicit keys.
    pub fn with_keys(
        store: Arc<dyn SessionStore>,
        user_key: impl Into<String>,
        token_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            user_key: user_key.into(),
            token_key: token_key.into(),
        }
    }

    /// Reads the current session.
    pub fn snapshot(&self) -> Session {
        Session {
            user: self.store.get(&self.user_key),
            token: self.store.get(&self.token_key),
        }
    }

    /// Reads only the user entry.
    pub fn user(&self) -> Option<String> {
        self.store.get(&self.user_key)
    }

    /// Removes both the user and the token.
    pub fn clear(&self) -> NavgateResult<()> {
        self.store
            .clear_session(&[self.user_key.as_str(), self.token_key.as_str()])
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }
}

// =============================================================================
// Tests
// =============================================================================
