// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

pub use crate::connection::mocks::{MockConnection, MockGroupChannel};
pub use crate::manager::MockContactManagerDelegate;
pub use contact_attributes::{contact_attributes, ContactAttributes};
pub use recording_delegate::{RecordedEvent, RecordingDelegate};
pub use test_connection::{AttributeRequest, TestConnection};
pub use test_group_channel::{MembershipRequest, TestGroupChannel};

use crate::ContactManager;

mod recording_delegate;

/// Builds a `ContactManager` on top of `connection` that reports to `delegate`.
pub fn contact_manager(connection: &TestConnection, delegate: &RecordingDelegate) -> ContactManager {
    ContactManager::builder()
        .set_connection(Arc::new(connection.clone()))
        .set_delegate(Some(Box::new(delegate.clone())))
        .build()
}
