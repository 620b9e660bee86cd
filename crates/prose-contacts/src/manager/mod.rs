// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use builder::{ContactManagerBuilder, UndefinedConnection};
pub use contact_manager::ContactManager;
pub(crate) use contact_manager::ContactManagerInner;
pub use contact_manager_config::ContactManagerConfig;
pub use event_dispatcher::{ContactManagerDelegate, ContactManagerEvent};
pub use feature_registry::{FeatureError, FeatureRegistry, FeatureSpec};
pub use presence_lists::{ContactListChannels, ContactListRole};
pub use resolved_contacts::ResolvedContacts;

#[cfg(any(test, feature = "test"))]
pub use event_dispatcher::MockContactManagerDelegate;

mod builder;
mod contact_manager;
mod contact_manager_config;
mod event_dispatcher;
mod feature_registry;
mod fetch_pipeline;
mod identity_cache;
mod presence_lists;
mod resolved_contacts;
mod signal_dispatch;
