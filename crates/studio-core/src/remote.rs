//! Remote service boundary.

use async_trait::async_trait;
use serde_json::Value;
use strum::{AsRefStr, Display, EnumIter};

use crate::error::Result;

/// Collections fetched from the remote service during a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    Students,
    Instructors,
    Rooms,
    Equipments,
    Transactions,
    Agenda,
    Settings,
}

impl Endpoint {
    /// Request path relative to the API base URL.
    pub fn path(&self) -> String {
        format!("/{}", self.as_ref())
    }
}

/// JSON request/response transport to the REST backend.
///
/// Implementations must report HTTP 401 as `StudioError::SessionExpired`
/// (after clearing the stored token) and every other non-2xx status as
/// `StudioError::Remote`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value>;

    async fn put(&self, path: &str, body: &Value) -> Result<Value>;

    async fn delete(&self, path: &str) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_endpoint_paths() {
        let paths: Vec<String> = Endpoint::iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            vec![
                "/students",
                "/instructors",
                "/rooms",
                "/equipments",
                "/transactions",
                "/agenda",
                "/settings"
            ]
        );
    }
}
