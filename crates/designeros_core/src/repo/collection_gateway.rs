//! Persistence gateway for one named entity collection.
//!
//! # Responsibility
//! - Serialize a whole collection into a versioned envelope and write it under
//!   the entity's storage key.
//! - Load and validate a stored collection, falling back to the entity's seed
//!   collection when nothing usable is stored.
//!
//! # Invariants
//! - Writes always use the current envelope (`schemaVersion` + `items`).
//! - Reads accept the current envelope and the legacy bare array (version 0).
//! - Envelopes newer than `COLLECTION_SCHEMA_VERSION` are never decoded.
//! - Loaded items pass `StoredEntity::validate` and have unique ids.

use crate::model::entity::StoredEntity;
use crate::repo::kv_repo::{KeyValueStore, KvError};
use log::{info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

/// Envelope version written by this binary.
pub const COLLECTION_SCHEMA_VERSION: u32 = 1;

const LEGACY_SCHEMA_VERSION: u32 = 0;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure while reading or writing a persisted collection.
#[derive(Debug)]
pub enum GatewayError {
    /// The durable store could not be read or written.
    StorageUnavailable(KvError),
    /// The stored value does not have the expected collection shape.
    Malformed(String),
    /// The stored envelope was written by a newer schema.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// The in-memory collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "{err}"),
            Self::Malformed(details) => write!(f, "malformed persisted collection: {details}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "collection schema version {found} is newer than supported {supported}"
            ),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Malformed(_) | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<KvError> for GatewayError {
    fn from(value: KvError) -> Self {
        Self::StorageUnavailable(value)
    }
}

/// Why a collection was initialized from its seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedReason {
    Absent,
    Malformed,
    UnsupportedSchemaVersion,
    StorageUnavailable,
}

impl SeedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Malformed => "malformed",
            Self::UnsupportedSchemaVersion => "unsupported_schema_version",
            Self::StorageUnavailable => "storage_unavailable",
        }
    }

    fn from_error(err: &GatewayError) -> Self {
        match err {
            GatewayError::StorageUnavailable(_) => Self::StorageUnavailable,
            GatewayError::UnsupportedSchemaVersion { .. } => Self::UnsupportedSchemaVersion,
            GatewayError::Malformed(_) | GatewayError::Encode(_) => Self::Malformed,
        }
    }
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionOrigin {
    Stored,
    Seeded(SeedReason),
}

impl CollectionOrigin {
    pub fn is_seeded(self) -> bool {
        matches!(self, Self::Seeded(_))
    }
}

/// Result of `CollectionGateway::load_or_seed`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCollection<E> {
    pub items: Vec<E>,
    pub origin: CollectionOrigin,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, E> {
    schema_version: u32,
    items: &'a [E],
}

/// Scoped read/write access to the collection of one entity type.
pub struct CollectionGateway<E, S> {
    store: S,
    key: &'static str,
    _entity: PhantomData<fn() -> E>,
}

impl<E: StoredEntity, S: KeyValueStore> CollectionGateway<E, S> {
    /// Gateway bound to `E::STORAGE_KEY`.
    pub fn new(store: S) -> Self {
        Self::with_key(store, E::STORAGE_KEY)
    }

    /// Gateway bound to an explicit key.
    pub fn with_key(store: S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _entity: PhantomData,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Reads and validates the stored collection.
    ///
    /// Returns `Ok(None)` when the key holds no value.
    pub fn read(&self) -> GatewayResult<Option<Vec<E>>> {
        let Some(raw) = self.store.read(self.key)? else {
            return Ok(None);
        };
        let (schema_version, items) = decode_collection::<E>(&raw)?;
        validate_collection(&items)?;
        if schema_version == LEGACY_SCHEMA_VERSION {
            info!(
                "event=collection_load module=repo status=legacy key={} count={}",
                self.key,
                items.len()
            );
        }
        Ok(Some(items))
    }

    /// Writes the whole collection under this gateway's key.
    pub fn write(&self, items: &[E]) -> GatewayResult<()> {
        let encoded = serde_json::to_string(&EnvelopeRef {
            schema_version: COLLECTION_SCHEMA_VERSION,
            items,
        })
        .map_err(GatewayError::Encode)?;
        self.store.write(self.key, &encoded)?;
        Ok(())
    }

    /// Loads the stored collection, or the entity seed when nothing valid is
    /// stored. Never fails; the seed is not written here.
    pub fn load_or_seed(&self) -> LoadedCollection<E> {
        match self.read() {
            Ok(Some(items)) => {
                info!(
                    "event=collection_load module=repo status=ok key={} count={}",
                    self.key,
                    items.len()
                );
                LoadedCollection {
                    items,
                    origin: CollectionOrigin::Stored,
                }
            }
            Ok(None) => {
                info!(
                    "event=collection_load module=repo status=seeded key={} reason=absent",
                    self.key
                );
                LoadedCollection {
                    items: E::seed_collection(),
                    origin: CollectionOrigin::Seeded(SeedReason::Absent),
                }
            }
            Err(err) => {
                let reason = SeedReason::from_error(&err);
                warn!(
                    "event=collection_load module=repo status=seeded key={} reason={} error={}",
                    self.key,
                    reason.as_str(),
                    err
                );
                LoadedCollection {
                    items: E::seed_collection(),
                    origin: CollectionOrigin::Seeded(reason),
                }
            }
        }
    }
}

fn decode_collection<E: StoredEntity>(raw: &str) -> GatewayResult<(u32, Vec<E>)> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|err| GatewayError::Malformed(format!("invalid json: {err}")))?;

    match value {
        Value::Array(items) => Ok((LEGACY_SCHEMA_VERSION, decode_items(Value::Array(items))?)),
        Value::Object(mut envelope) => {
            let schema_version = envelope
                .get("schemaVersion")
                .and_then(Value::as_u64)
                .ok_or_else(|| {
                    GatewayError::Malformed("envelope without numeric schemaVersion".to_string())
                })?;
            let schema_version = u32::try_from(schema_version).unwrap_or(u32::MAX);
            if schema_version > COLLECTION_SCHEMA_VERSION {
                return Err(GatewayError::UnsupportedSchemaVersion {
                    found: schema_version,
                    supported: COLLECTION_SCHEMA_VERSION,
                });
            }
            let items = envelope
                .remove("items")
                .ok_or_else(|| GatewayError::Malformed("envelope without items".to_string()))?;
            Ok((schema_version, decode_items(items)?))
        }
        other => Err(GatewayError::Malformed(format!(
            "expected array or envelope, found {}",
            json_kind(&other)
        ))),
    }
}

fn decode_items<E: StoredEntity>(value: Value) -> GatewayResult<Vec<E>> {
    if !value.is_array() {
        return Err(GatewayError::Malformed(format!(
            "expected items array, found {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|err| GatewayError::Malformed(format!("invalid {} entry: {err}", E::KIND)))
}

fn validate_collection<E: StoredEntity>(items: &[E]) -> GatewayResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate().map_err(GatewayError::Malformed)?;
        if !seen.insert(item.id()) {
            return Err(GatewayError::Malformed(format!(
                "duplicate {} id `{}`",
                E::KIND,
                item.id()
            )));
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
