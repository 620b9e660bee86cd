// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use join_all::join_all;
pub use operation_error::OperationError;
pub use pending_operation::PendingOperation;

mod join_all;
mod operation_error;
mod pending_operation;
