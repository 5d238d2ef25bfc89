// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolve a caller-supplied user identifier to a concrete user.
//!
//! Clients send either an email address or a user id. Resolution tries an
//! ordered list of lookup strategies; the [`Resolution`] mode decides which
//! strategies are allowed and what happens when none of them match.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::UserId;
use uuid::Uuid;

/// A single way of finding a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exact match on `users.email`
    Email,
    /// The identifier parsed as a user id
    Id,
    /// Earliest-created user in the store, ignoring the identifier
    FirstUser,
}

/// How strictly an identifier must resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Browsing: an absent or unknown identifier falls back to the first
    /// user so the catalog and demo schedule stay viewable.
    Lenient,
    /// Writes and per-user lookups: the identifier is required and must
    /// name an existing user.
    Strict,
}

impl Resolution {
    /// Strategies to try, in order.
    pub fn strategies(self, has_identifier: bool) -> &'static [Strategy] {
        match (self, has_identifier) {
            (Resolution::Lenient, true) => &[Strategy::Email, Strategy::Id, Strategy::FirstUser],
            (Resolution::Lenient, false) => &[Strategy::FirstUser],
            (Resolution::Strict, _) => &[Strategy::Email, Strategy::Id],
        }
    }
}

/// Trimmed identifier, or `None` when absent or blank.
pub fn normalize(identifier: Option<&str>) -> Option<&str> {
    identifier.map(str::trim).filter(|s| !s.is_empty())
}

/// Resolve `identifier` under `mode`.
///
/// - `Lenient` never fails on a miss; it returns `None` only when the
///   store holds no users at all.
/// - `Strict` fails with [`AppError::MissingIdentifier`] when the
///   identifier is absent and [`AppError::UserNotFound`] when nothing
///   matches.
pub async fn resolve(
    db: &Database,
    identifier: Option<&str>,
    mode: Resolution,
) -> Result<Option<UserId>> {
    let identifier = normalize(identifier);
    if identifier.is_none() && mode == Resolution::Strict {
        return Err(AppError::MissingIdentifier);
    }

    for &strategy in mode.strategies(identifier.is_some()) {
        if let Some(user_id) = lookup(db, strategy, identifier).await? {
            tracing::debug!(?strategy, %user_id, "Resolved user");
            return Ok(Some(user_id));
        }
    }

    match mode {
        Resolution::Strict => Err(AppError::UserNotFound),
        Resolution::Lenient => Ok(None),
    }
}

/// Read-path resolution with first-user fallback.
pub async fn resolve_reader(db: &Database, identifier: Option<&str>) -> Result<Option<UserId>> {
    resolve(db, identifier, Resolution::Lenient).await
}

/// Write-path resolution; the identifier must name a user.
pub async fn resolve_writer(db: &Database, identifier: Option<&str>) -> Result<UserId> {
    resolve(db, identifier, Resolution::Strict)
        .await?
        .ok_or(AppError::UserNotFound)
}

async fn lookup(
    db: &Database,
    strategy: Strategy,
    identifier: Option<&str>,
) -> Result<Option<UserId>> {
    match (strategy, identifier) {
        (Strategy::Email, Some(email)) => db.find_user_id_by_email(email).await,
        (Strategy::Id, Some(raw)) => match Uuid::parse_str(raw) {
            Ok(id) => db.find_user_id(id).await,
            // Not an id, so it cannot match one.
            Err(_) => Ok(None),
        },
        (Strategy::FirstUser, _) => db.first_user_id().await,
        (Strategy::Email | Strategy::Id, None) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    #[test]
    fn test_lenient_falls_back_to_first_user_last() {
        assert_eq!(
            Resolution::Lenient.strategies(true),
            &[Strategy::Email, Strategy::Id, Strategy::FirstUser]
        );
        assert_eq!(Resolution::Lenient.strategies(false), &[Strategy::FirstUser]);
    }

    #[test]
    fn test_strict_never_guesses() {
        for has_identifier in [true, false] {
            assert!(!Resolution::Strict
                .strategies(has_identifier)
                .contains(&Strategy::FirstUser));
        }
    }

    #[test]
    fn test_normalize_treats_blank_as_absent() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(Some(" user@example.com ")), Some("user@example.com"));
    }

    #[tokio::test]
    async fn test_strict_without_identifier_fails_before_querying() {
        // Lazy pool pointed at nothing: any query would error out.
        let db = Database::connect_lazy(&DatabaseConfig {
            port: 1,
            ..DatabaseConfig::default()
        });

        let err = resolve_writer(&db, Some("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::MissingIdentifier));

        let err = resolve_writer(&db, None).await.unwrap_err();
        assert!(matches!(err, AppError::MissingIdentifier));
    }
}
