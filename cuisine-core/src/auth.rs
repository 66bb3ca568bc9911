//! Session token storage.
//!
//! The token obtained at login is never read from ambient state. Whatever
//! needs it is handed an [`AuthContext`], which wraps a [`TokenStore`].

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::error::AuthError;

/// Name the token is stored under.
pub const TOKEN_STORAGE_KEY: &str = "jwtToken";

pub trait TokenStore: Send + Sync {
    fn get(&self) -> Result<Option<String>, AuthError>;
    fn set(&self, token: &str) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// Token kept in memory for the life of the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, AuthError> {
        self.token
            .read()
            .map(|t| t.clone())
            .map_err(|_| AuthError::Store("token lock poisoned".to_string()))
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| AuthError::Store("token lock poisoned".to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| AuthError::Store("token lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Token persisted as a plain file named [`TOKEN_STORAGE_KEY`] inside a directory.
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKEN_STORAGE_KEY)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>, AuthError> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| AuthError::Store(format!("{}: {}", path.display(), e)))?;
        let token = content.trim();
        Ok(if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        })
    }

    fn set(&self, token: &str) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AuthError::Store(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.path();
        fs::write(&path, token).map_err(|e| AuthError::Store(format!("{}: {}", path.display(), e)))
    }

    fn clear(&self) -> Result<(), AuthError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Store(format!("{}: {}", path.display(), e))),
        }
    }
}

/// Handle to the session token, cheap to clone.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn TokenStore>,
}

impl AuthContext {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Context backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub fn get_token(&self) -> Result<Option<String>, AuthError> {
        self.store.get()
    }

    pub fn set_token(&self, token: &str) -> Result<(), AuthError> {
        self.store.set(token)
    }

    pub fn clear_token(&self) -> Result<(), AuthError> {
        self.store.clear()
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.store.get(), Ok(Some(_)))
    }

    /// The token to send as a bearer credential.
    pub fn bearer(&self) -> Result<String, AuthError> {
        self.store.get()?.ok_or(AuthError::MissingToken)
    }
}
