// prose-core-client/prose-contacts-integration-tests
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

mod contact_lifecycle;
mod roster_sync;
