// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};

use crate::domain::models::Features;

/// Can be loaded from the host application's settings. Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactManagerConfig {
    /// Asks the backend to keep the fetched handles referenced for the lifetime of the connection.
    pub hold_handles: bool,
    /// Features that are added to every contact request.
    pub default_features: Features,
}

impl Default for ContactManagerConfig {
    fn default() -> Self {
        Self {
            hold_handles: true,
            default_features: Features::new(),
        }
    }
}
