use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Static username/password pairs, read from a JSON object
/// `{"user": "password", ...}`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Credentials {
    pairs: HashMap<String, String>,
}

impl Credentials {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials at {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse credentials at {}", path.display()))
    }

    pub fn from_pairs<I, U, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (U, P)>,
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(user, password)| (user.into(), password.into()))
                .collect(),
        }
    }

    pub fn verify(&self, user: &str, password: &str) -> bool {
        self.pairs
            .get(user)
            .is_some_and(|expected| expected == password)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
