// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::connection::DynConnection;

use super::{ContactManager, ContactManagerConfig, ContactManagerDelegate, FeatureRegistry};

pub struct UndefinedConnection;

pub struct ContactManagerBuilder<C> {
    config: ContactManagerConfig,
    connection: C,
    delegate: Option<Box<dyn ContactManagerDelegate>>,
    feature_registry: FeatureRegistry,
}

impl ContactManagerBuilder<UndefinedConnection> {
    pub(crate) fn new() -> Self {
        ContactManagerBuilder {
            config: Default::default(),
            connection: UndefinedConnection,
            delegate: None,
            feature_registry: Default::default(),
        }
    }

    pub fn set_connection(self, connection: DynConnection) -> ContactManagerBuilder<DynConnection> {
        ContactManagerBuilder {
            config: self.config,
            connection,
            delegate: self.delegate,
            feature_registry: self.feature_registry,
        }
    }
}

impl<C> ContactManagerBuilder<C> {
    pub fn set_delegate(mut self, delegate: Option<Box<dyn ContactManagerDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn set_config(mut self, config: ContactManagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_feature_registry(mut self, feature_registry: FeatureRegistry) -> Self {
        self.feature_registry = feature_registry;
        self
    }
}

impl ContactManagerBuilder<DynConnection> {
    pub fn build(self) -> ContactManager {
        ContactManager::new(
            self.connection,
            self.config,
            self.feature_registry,
            self.delegate,
        )
    }
}
