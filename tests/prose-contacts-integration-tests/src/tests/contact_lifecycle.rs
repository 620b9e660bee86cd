// prose-core-client/prose-contacts-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use itertools::Itertools;
use pretty_assertions::assert_eq;

use prose_contacts::test::{
    contact_attributes, contact_manager, RecordedEvent, RecordingDelegate, TestConnection,
};
use prose_contacts::{
    join_all, ns, ConnectionEvent, ConnectionSignal, ContactCapabilities, ContactChange,
    ContactInfoField, Feature, Features, Handle, HandleType, InfoFields, RequestableChannelClass,
};

const TEXT_CHANNEL: &str = "org.freedesktop.Telepathy.Channel.Type.Text";

fn text_capabilities() -> ContactCapabilities {
    ContactCapabilities::new(vec![RequestableChannelClass {
        channel_type: TEXT_CHANNEL.to_string(),
        target_handle_type: HandleType::Contact,
        allowed_properties: vec![],
    }])
}

#[tokio::test]
async fn test_contact_grows_features_across_requests() -> Result<()> {
    let connection = TestConnection::new();
    connection.add_contact(
        7,
        contact_attributes("dave@prose.org")
            .alias("Dave")
            .capabilities(text_capabilities())
            .info(InfoFields::new(vec![ContactInfoField {
                field_name: "fn".to_string(),
                parameters: vec![],
                field_value: vec!["Dave Doe".to_string()],
            }])),
    );

    let delegate = RecordingDelegate::new();
    let manager = contact_manager(&connection, &delegate);
    let handles = [Handle::new(7)];

    let requests = join_all([
        manager.contacts_for_handles(&handles, &Features::from([Feature::Alias])),
        manager.contacts_for_handles(&handles, &Features::from([Feature::Capabilities])),
        manager.contacts_for_handles(&handles, &Features::from([Feature::Info])),
    ])
    .await?;

    let contact = requests[0].contacts[0].clone();
    assert!(requests
        .iter()
        .all(|resolved| Arc::ptr_eq(&resolved.contacts[0], &contact)));

    assert_eq!(contact.alias(), "Dave");
    assert!(contact.capabilities().supports_text_chats());
    assert_eq!(
        contact.info_fields().fields("fn")[0].field_value,
        vec!["Dave Doe".to_string()]
    );
    assert_eq!(
        contact.actual_features(),
        Features::from([Feature::Alias, Feature::Capabilities, Feature::Info])
    );

    let interfaces = connection
        .attribute_requests()
        .into_iter()
        .flat_map(|request| request.interfaces)
        .map(|interface| interface.into_inner())
        .sorted()
        .collect::<Vec<_>>();
    assert_eq!(
        interfaces,
        vec![
            ns::ALIASING.to_string(),
            ns::CONTACT_CAPABILITIES.to_string(),
            ns::CONTACT_INFO.to_string(),
        ]
    );

    // The contact created by the first request is augmented by the others.
    assert_eq!(
        delegate.contact_changes(Handle::new(7)),
        vec![
            ContactChange::Capabilities(text_capabilities()),
            ContactChange::InfoFields(contact.info_fields()),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_every_signal_updates_contacts_exactly_once() -> Result<()> {
    let connection = TestConnection::new();
    for handle in 1..=3 {
        connection.add_contact(
            handle,
            contact_attributes(&format!("user{}@prose.org", handle)).alias("User"),
        );
    }

    let delegate = RecordingDelegate::new();
    let manager = contact_manager(&connection, &delegate);
    let features = Features::from([Feature::Alias, Feature::Capabilities]);

    let mut contacts = vec![];
    for handle in 1..=3 {
        contacts.extend(
            manager
                .contacts_for_handles(&[Handle::new(handle)], &features)
                .await?
                .contacts,
        );
    }

    let connected = connection.connected_signals().into_iter().counts();
    assert_eq!(connected.get(&ConnectionSignal::AliasesChanged), Some(&1));
    assert_eq!(
        connected.get(&ConnectionSignal::CapabilitiesChanged),
        Some(&1)
    );
    assert_eq!(connected.len(), 2);

    connection.emit(ConnectionEvent::AliasesChanged {
        aliases: (1..=3)
            .map(|handle| (Handle::new(handle), format!("Renamed {}", handle)))
            .collect(),
    });
    connection.emit(ConnectionEvent::CapabilitiesChanged {
        capabilities: BTreeMap::from([(Handle::new(2), text_capabilities())]),
    });

    let changes_per_contact = delegate
        .events()
        .into_iter()
        .filter_map(|event| match event {
            RecordedEvent::ContactChanged { handle, .. } => Some(handle),
            _ => None,
        })
        .counts();

    assert_eq!(changes_per_contact.get(&Handle::new(1)), Some(&1));
    assert_eq!(changes_per_contact.get(&Handle::new(2)), Some(&2));
    assert_eq!(changes_per_contact.get(&Handle::new(3)), Some(&1));
    assert_eq!(contacts[2].alias(), "Renamed 3");
    assert_eq!(
        delegate.contact_changes(Handle::new(2)),
        vec![
            ContactChange::Alias("Renamed 2".to_string()),
            ContactChange::Capabilities(text_capabilities()),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_released_contacts_are_reclaimed() -> Result<()> {
    let connection = TestConnection::new();
    connection.add_contact(1, contact_attributes("erin@prose.org").alias("Erin"));

    let delegate = RecordingDelegate::new();
    let manager = contact_manager(&connection, &delegate);
    let features = Features::from([Feature::Alias]);

    let first = manager
        .contacts_for_identifiers(["erin@prose.org"], &features)
        .await?
        .contacts
        .remove(0);
    let first_identity = Arc::downgrade(&first);
    drop(first);

    // Changes for a contact nobody holds on to are dropped.
    connection.emit(ConnectionEvent::AliasesChanged {
        aliases: vec![(Handle::new(1), "Erin E.".to_string())],
    });
    assert!(delegate.events().is_empty());

    connection.add_contact(1, contact_attributes("erin@prose.org").alias("Erin E."));
    let second = manager
        .contacts_for_identifiers(["erin@prose.org"], &features)
        .await?
        .contacts
        .remove(0);

    assert!(first_identity.upgrade().is_none());
    assert_eq!(second.alias(), "Erin E.");
    assert_eq!(connection.attribute_requests().len(), 2);

    Ok(())
}
