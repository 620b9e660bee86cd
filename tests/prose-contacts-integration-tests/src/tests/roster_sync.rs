// prose-core-client/prose-contacts-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tracing::{info, warn};

use prose_contacts::test::{contact_attributes, MembershipRequest, TestConnection, TestGroupChannel};
use prose_contacts::{
    ConnectionEvent, ContactChange, ContactListChannels, ContactListRole, ContactManager,
    ContactManagerDelegate, ContactManagerEvent, DynGroupChannel, Feature, Features,
    GroupMemberChangeDetails, GroupMembersChanged, Handle, PresenceState, PresenceType,
    SimplePresence,
};

/// Accepts every presence publication request right away.
#[derive(Clone, Default)]
struct AutoAuthorizingDelegate {
    log: Arc<Mutex<Vec<String>>>,
}

impl AutoAuthorizingDelegate {
    fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

impl ContactManagerDelegate for AutoAuthorizingDelegate {
    fn handle_event(&self, manager: ContactManager, event: ContactManagerEvent) {
        match event {
            ContactManagerEvent::ContactChanged { contact, change } => {
                info!("{} changed: {:?}", contact.id(), change);
                self.log.lock().push(format!("{} {:?}", contact.id(), change));
            }
            ContactManagerEvent::PresencePublicationRequested { contacts, details } => {
                for contact in contacts.iter() {
                    self.log.lock().push(format!(
                        "{} requested publication: {}",
                        contact.id(),
                        details.message.clone().unwrap_or_default()
                    ));
                }
                manager
                    .authorize_presence_publication(&contacts, "Welcome")
                    .on_finished(|result| {
                        if let Err(err) = result {
                            warn!("Failed to authorize presence publication. {}", err)
                        }
                    });
            }
        }
    }
}

fn roster_connection() -> TestConnection {
    let connection = TestConnection::new();
    connection.add_contact(
        1,
        contact_attributes("alice@prose.org")
            .alias("Alice")
            .presence(SimplePresence::available("At work")),
    );
    connection.add_contact(
        2,
        contact_attributes("bob@prose.org")
            .alias("Bob")
            .presence(SimplePresence::offline()),
    );
    connection.add_contact(3, contact_attributes("carol@prose.org").alias("Carol"));
    connection
}

#[tokio::test]
async fn test_syncs_roster_and_authorizes_requests() -> Result<()> {
    let connection = roster_connection();
    let delegate = AutoAuthorizingDelegate::default();
    let manager = ContactManager::builder()
        .set_connection(Arc::new(connection.clone()))
        .set_delegate(Some(Box::new(delegate.clone())))
        .build();

    let features = Features::from([Feature::Alias, Feature::SimplePresence]);
    let roster = manager
        .contacts_for_identifiers(["alice@prose.org", "bob@prose.org"], &features)
        .await?;
    let (alice, bob) = (roster.contacts[0].clone(), roster.contacts[1].clone());

    assert_eq!(alice.alias(), "Alice");
    assert_eq!(alice.presence_type(), PresenceType::Available);
    assert_eq!(bob.presence_type(), PresenceType::Offline);

    let subscribe = TestGroupChannel::new();
    subscribe.set_members([alice.clone()], [bob.clone()], []);
    let publish = TestGroupChannel::new();
    publish.set_members([alice.clone()], [], []);

    let channels: ContactListChannels = [
        (ContactListRole::Subscribe, Arc::new(subscribe.clone()) as DynGroupChannel),
        (ContactListRole::Publish, Arc::new(publish.clone()) as DynGroupChannel),
    ]
    .into_iter()
    .collect();
    manager.set_contact_list_channels(channels);

    assert_eq!(alice.subscription_state(), PresenceState::Yes);
    assert_eq!(alice.publish_state(), PresenceState::Yes);
    assert_eq!(bob.subscription_state(), PresenceState::Ask);
    assert_eq!(bob.publish_state(), PresenceState::No);

    let carol = manager
        .contacts_for_handles(&[Handle::new(3)], &features)
        .await?
        .contacts
        .remove(0);

    publish.change_members(GroupMembersChanged {
        remote_pending_added: [carol.clone()].into_iter().collect(),
        details: GroupMemberChangeDetails {
            actor: Some(carol.clone()),
            message: Some("Hi, it's Carol".to_string()),
            ..Default::default()
        },
        ..Default::default()
    });

    assert_eq!(carol.publish_state(), PresenceState::Ask);
    assert_eq!(
        publish.requests(),
        vec![MembershipRequest::Add {
            handles: vec![Handle::new(3)],
            message: "Welcome".to_string(),
        }]
    );

    publish.change_members(GroupMembersChanged {
        added: [carol.clone()].into_iter().collect(),
        ..Default::default()
    });
    assert_eq!(carol.publish_state(), PresenceState::Yes);

    connection.emit(ConnectionEvent::PresencesChanged {
        presences: BTreeMap::from([
            (Handle::new(1), SimplePresence::available("In a meeting")),
            (Handle::new(2), SimplePresence::offline()),
        ]),
    });

    assert_eq!(alice.presence_message(), "In a meeting");

    assert_eq!(
        delegate.log(),
        vec![
            "alice@prose.org SubscriptionState(Yes)".to_string(),
            "alice@prose.org PublishState(Yes)".to_string(),
            "bob@prose.org SubscriptionState(Ask)".to_string(),
            "carol@prose.org PublishState(Ask)".to_string(),
            "carol@prose.org requested publication: Hi, it's Carol".to_string(),
            "carol@prose.org PublishState(Yes)".to_string(),
            format!(
                "alice@prose.org {:?}",
                ContactChange::SimplePresence(SimplePresence::available("In a meeting"))
            ),
        ]
    );

    Ok(())
}
