//! Users

use crate::uuids::TypedUuid;

/// Portal user, keyed by the identity provider's user id.
#[derive(Debug)]
pub struct UserRecord;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;
