//! Flat-file JSON document store.
//!
//! # Responsibility
//! - Persist one model type as a single JSON array file, rewritten in full on
//!   every mutation.
//! - Mirror the full array to a dated backup file when configured.
//!
//! # Invariants
//! - Rows are kept as raw JSON objects in storage; fields unknown to the
//!   model type survive every rewrite.
//! - Typed reads use strict decoding; a row that does not decode into the
//!   model type is an error, not a partial instance.
//! - No locking: concurrent stores on one path are last-writer-wins.

use crate::identity;
use crate::store::file;
use crate::store::{DocumentStore, StoreError, StoreOptions, StoreResult};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::type_name;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Document store backed by one JSON array file per model type.
///
/// The model type must be registered with
/// [`bind_identifier`](crate::identity::bind_identifier) before a store for
/// it can be opened.
#[derive(Debug)]
pub struct JsonDocumentStore<T> {
    path: PathBuf,
    options: StoreOptions,
    identifier_field: &'static str,
    model: &'static str,
    _marker: PhantomData<T>,
}

impl<T> JsonDocumentStore<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Opens a store for `T` at `path`.
    ///
    /// Fails with [`StoreError::IdentifierNotBound`] when `T` has no
    /// registered identifier field. When the file is absent and
    /// `auto_create_file` is set, writes an empty array (and an empty dated
    /// backup when a backup prefix is configured).
    pub fn open(path: impl Into<PathBuf>, options: StoreOptions) -> StoreResult<Self> {
        let identifier_field =
            identity::identifier_field::<T>().ok_or(StoreError::IdentifierNotBound {
                model: type_name::<T>(),
            })?;

        let store = Self {
            path: path.into(),
            options,
            identifier_field,
            model: type_name::<T>(),
            _marker: PhantomData,
        };

        if !file::exists(&store.path) && store.options.auto_create_file {
            file::write_text(&store.path, file::EMPTY_ARRAY)?;
            if let Some(prefix) = &store.options.backup_path_prefix {
                file::write_text(&file::dated_backup_path(prefix), file::EMPTY_ARRAY)?;
            }
        }

        if store.options.logging {
            info!(
                "event=store_open module=store model={} path={} status=ok",
                store.model,
                store.path.display()
            );
        }

        Ok(store)
    }

    /// Returns the document file path this store owns.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the identifier field name resolved at construction.
    pub fn identifier_field(&self) -> &'static str {
        self.identifier_field
    }

    fn warns(&self) -> bool {
        self.options.warn_on_unsafe_ops || self.options.logging
    }

    fn load_rows(&self) -> StoreResult<Vec<Value>> {
        let text = file::read_text(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Rewrites the document file with the full row sequence, mirroring the
    /// same content to the dated backup when configured.
    fn write_rows(&self, rows: &[Value]) -> StoreResult<()> {
        let text = serde_json::to_string(rows)?;
        file::write_text(&self.path, &text)?;
        if let Some(prefix) = &self.options.backup_path_prefix {
            file::write_text(&file::dated_backup_path(prefix), &text)?;
        }
        Ok(())
    }

    fn encode(&self, model: &T) -> StoreResult<Value> {
        Ok(serde_json::to_value(model)?)
    }

    fn decode(&self, row: Value) -> StoreResult<T> {
        Ok(serde_json::from_value(row)?)
    }

    fn row_identifier<'a>(&self, row: &'a Value) -> Option<&'a Value> {
        row.get(self.identifier_field)
    }
}

impl<T> DocumentStore<T> for JsonDocumentStore<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    fn save(&self, model: &T) -> StoreResult<()> {
        let file_present = file::exists(&self.path);
        let mut rows = if file_present {
            self.load_rows()?
        } else {
            Vec::new()
        };

        let encoded = self.encode(model)?;
        let id = self
            .row_identifier(&encoded)
            .cloned()
            .unwrap_or(Value::Null);

        if self.options.enforce_unique {
            if rows
                .iter()
                .any(|row| self.row_identifier(row) == Some(&id))
            {
                return Err(StoreError::DuplicateIdentifier(id));
            }
        } else if self.warns() {
            warn!(
                "event=store_save module=store model={} status=unsafe detail=\"uniqueness disabled, duplicate identifiers possible\"",
                self.model
            );
        }

        if file_present || self.options.auto_create_file {
            rows.push(encoded);
            self.write_rows(&rows)?;
            if self.options.logging {
                info!(
                    "event=store_save module=store model={} id={} status=ok",
                    self.model, id
                );
            }
        } else if self.warns() {
            warn!(
                "event=store_save module=store model={} id={} status=skipped detail=\"file missing and auto-create disabled\"",
                self.model, id
            );
        }

        Ok(())
    }

    fn save_or_update(&self, model: &T) -> StoreResult<()> {
        let encoded = self.encode(model)?;
        let id = self
            .row_identifier(&encoded)
            .cloned()
            .unwrap_or(Value::Null);

        let existing = self.find_by_id(&id)?;
        if self.options.enforce_unique && existing.is_some() {
            self.update(model)?;
        } else {
            self.save(model)?;
        }

        if !self.options.enforce_unique && self.warns() {
            warn!(
                "event=store_save_or_update module=store model={} status=unsafe detail=\"updates are unreliable without unique identifiers\"",
                self.model
            );
        }

        Ok(())
    }

    fn find_by_id(&self, id: &Value) -> StoreResult<Option<T>> {
        if !self.options.enforce_unique {
            if self.warns() {
                warn!(
                    "event=store_find module=store model={} status=skipped detail=\"uniqueness disabled\"",
                    self.model
                );
            }
            return Ok(None);
        }

        for row in self.load_rows()? {
            if self.row_identifier(&row) == Some(id) {
                return Ok(Some(self.decode(row)?));
            }
        }
        Ok(None)
    }

    fn find_all(&self) -> StoreResult<Vec<T>> {
        self.load_rows()?
            .into_iter()
            .map(|row| self.decode(row))
            .collect()
    }

    fn update(&self, model: &T) -> StoreResult<()> {
        if !self.options.enforce_unique {
            if self.warns() {
                warn!(
                    "event=store_update module=store model={} status=skipped detail=\"uniqueness disabled\"",
                    self.model
                );
            }
            return Ok(());
        }

        let incoming = self.encode(model)?;
        let id = self
            .row_identifier(&incoming)
            .cloned()
            .unwrap_or(Value::Null);

        let rows = self.load_rows()?;
        let existing = rows
            .iter()
            .find(|row| self.row_identifier(row) == Some(&id))
            .cloned();

        match existing {
            Some(current) => {
                let merged = merge_shallow(&current, &incoming);
                let mut kept: Vec<Value> = rows
                    .into_iter()
                    .filter(|row| self.row_identifier(row) != Some(&id))
                    .collect();
                kept.push(merged);
                self.write_rows(&kept)?;
                if self.options.logging {
                    info!(
                        "event=store_update module=store model={} id={} status=ok",
                        self.model, id
                    );
                }
            }
            None => {
                if self.warns() {
                    warn!(
                        "event=store_update module=store model={} id={} status=not_found",
                        self.model, id
                    );
                }
            }
        }

        Ok(())
    }

    fn delete(&self, id: &Value) -> StoreResult<()> {
        if !self.options.enforce_unique {
            if self.warns() {
                warn!(
                    "event=store_delete module=store model={} status=skipped detail=\"uniqueness disabled\"",
                    self.model
                );
            }
            return Ok(());
        }

        let kept: Vec<Value> = self
            .load_rows()?
            .into_iter()
            .filter(|row| row.get(self.identifier_field) != Some(id))
            .collect();

        // Rewritten even when nothing matched; delete is an idempotent no-op
        // write for unknown identifiers.
        self.write_rows(&kept)?;

        if self.options.logging {
            info!(
                "event=store_delete module=store model={} id={} status=ok",
                self.model, id
            );
        }
        Ok(())
    }

    fn unregister_model(&self) -> StoreResult<()> {
        if file::exists(&self.path) {
            file::remove(&self.path)?;
        }
        if self.options.logging {
            info!(
                "event=store_unregister module=store model={} path={} status=ok",
                self.model,
                self.path.display()
            );
        }
        Ok(())
    }
}

/// Shallow field overlay: `incoming` fields take precedence, fields only
/// present in `existing` are preserved. Non-object rows are replaced whole.
fn merge_shallow(existing: &Value, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Value::Object(base), Value::Object(patch)) => {
            let mut merged: Map<String, Value> = base.clone();
            for (key, value) in patch {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => incoming.clone(),
    }
}
