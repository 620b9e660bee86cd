// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeSet;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::connection::{ns, Connection, ConnectionSignal};
use crate::domain::models::{Feature, Features, InterfaceId};

#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum FeatureError {
    #[error("No interface or change signal is registered for feature {0}.")]
    UnknownFeature(Feature),
}

/// Describes what a `Feature` needs from the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    pub feature: Feature,
    /// The interface whose contact attributes populate the feature.
    pub interface: InterfaceId,
    /// The signal that reports changes to the feature.
    pub signal: ConnectionSignal,
}

impl FeatureSpec {
    pub fn new(feature: Feature, interface: impl Into<InterfaceId>, signal: ConnectionSignal) -> Self {
        Self {
            feature,
            interface: interface.into(),
            signal,
        }
    }
}

/// The table of features a `ContactManager` knows how to fetch and track.
#[derive(Debug, Clone)]
pub struct FeatureRegistry {
    specs: Vec<FeatureSpec>,
}

impl FeatureRegistry {
    pub fn new(specs: impl IntoIterator<Item = FeatureSpec>) -> Self {
        let mut registry = Self { specs: vec![] };
        for spec in specs {
            registry.register(spec);
        }
        registry
    }

    /// Adds `spec`, replacing a previous spec for the same feature.
    pub fn register(&mut self, spec: FeatureSpec) {
        self.specs.retain(|existing| existing.feature != spec.feature);
        self.specs.push(spec);
    }

    pub fn features(&self) -> Features {
        self.specs.iter().map(|spec| spec.feature).collect()
    }

    pub fn interface_for(&self, feature: Feature) -> Result<&InterfaceId, FeatureError> {
        self.spec(feature).map(|spec| &spec.interface)
    }

    pub fn signal_for(&self, feature: Feature) -> Result<ConnectionSignal, FeatureError> {
        self.spec(feature).map(|spec| spec.signal)
    }

    fn spec(&self, feature: Feature) -> Result<&FeatureSpec, FeatureError> {
        self.specs
            .iter()
            .find(|spec| spec.feature == feature)
            .ok_or(FeatureError::UnknownFeature(feature))
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::new([
            FeatureSpec::new(Feature::Alias, ns::ALIASING, ConnectionSignal::AliasesChanged),
            FeatureSpec::new(Feature::AvatarToken, ns::AVATARS, ConnectionSignal::AvatarUpdated),
            FeatureSpec::new(
                Feature::SimplePresence,
                ns::SIMPLE_PRESENCE,
                ConnectionSignal::PresencesChanged,
            ),
            FeatureSpec::new(
                Feature::Capabilities,
                ns::CONTACT_CAPABILITIES,
                ConnectionSignal::CapabilitiesChanged,
            ),
            FeatureSpec::new(Feature::Location, ns::LOCATION, ConnectionSignal::LocationUpdated),
            FeatureSpec::new(Feature::Info, ns::CONTACT_INFO, ConnectionSignal::ContactInfoChanged),
            FeatureSpec::new(Feature::AvatarData, ns::AVATARS, ConnectionSignal::AvatarRetrieved),
        ])
    }
}

/// Remembers which features are tracked and which ones the connection supports.
pub(crate) struct FeatureTracker {
    registry: FeatureRegistry,
    state: Mutex<TrackerState>,
}

#[derive(Default)]
struct TrackerState {
    tracked: Features,
    connected_signals: BTreeSet<ConnectionSignal>,
    supported: Option<Features>,
}

impl FeatureTracker {
    pub fn new(registry: FeatureRegistry) -> Self {
        Self {
            registry,
            state: Default::default(),
        }
    }

    pub fn registry(&self) -> &FeatureRegistry {
        &self.registry
    }

    /// Marks `feature` as tracked. Returns the signal the caller needs to connect to if nobody
    /// connected to it before.
    pub fn begin_tracking(&self, feature: Feature) -> Option<ConnectionSignal> {
        let signal = match self.registry.signal_for(feature) {
            Ok(signal) => signal,
            Err(err) => {
                warn!("Cannot track changes of feature {}. {}", feature, err);
                return None;
            }
        };

        let mut state = self.state.lock();
        if !state.tracked.insert(feature) {
            return None;
        }
        state.connected_signals.insert(signal).then_some(signal)
    }

    #[cfg(test)]
    fn is_tracking(&self, feature: Feature) -> bool {
        self.state.lock().tracked.contains(&feature)
    }

    /// The features whose interface the connection reports contact attributes for. Returns an
    /// empty set if the connection cannot be asked yet.
    pub fn supported_features(&self, connection: &dyn Connection) -> Features {
        if let Some(supported) = self.state.lock().supported.clone() {
            return supported;
        }

        if !is_supported(connection) {
            warn!("Supported contact features requested before the connection supports contacts. Returning an empty set.");
            return Features::new();
        }

        let interfaces = connection.contact_attribute_interfaces();
        let supported = self
            .registry
            .specs
            .iter()
            .filter(|spec| interfaces.contains(&spec.interface))
            .map(|spec| spec.feature)
            .collect::<Features>();

        debug!("{} contact features supported.", supported.len());
        self.state.lock().supported = Some(supported.clone());
        supported
    }
}

pub(crate) fn is_supported(connection: &dyn Connection) -> bool {
    connection.is_ready() && connection.interfaces().contains(ns::CONTACTS)
}
