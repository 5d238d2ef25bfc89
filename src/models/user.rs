//! User identity.

use uuid::Uuid;

/// Primary key of the `users` table. Clients may name a user by this id or
/// by their unique email.
pub type UserId = Uuid;
