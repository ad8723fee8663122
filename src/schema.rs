use log::debug;
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use crate::{
    column_mapping::ColumnMapping,
    errors::{PattiError, Result},
    record::{Record, Slot},
    value::ValueType,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub slot: String,
    pub mapping: ColumnMapping,
    pub value_type: ValueType,
}

/// The ordered slot -> column table of one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    /// Slot `n` reads column `n`, or the header named like the slot.
    pub fn positional(slots: &[Slot]) -> Self {
        Self {
            entries: slots
                .iter()
                .enumerate()
                .map(|(i, s)| SchemaEntry {
                    slot: s.name.to_string(),
                    mapping: ColumnMapping::new(s.name, Some(i)),
                    value_type: s.value_type.clone(),
                })
                .collect(),
        }
    }

    /// Fails with `SlotNotFound` when a mapping names a slot the record doesn't have.
    pub fn explicit(
        slots: &[Slot],
        mappings: Vec<(String, ColumnMapping)>,
        record_type: &'static str,
    ) -> Result<Self> {
        let entries = mappings
            .into_iter()
            .map(|(slot, mapping)| -> Result<SchemaEntry> {
                let value_type = slots
                    .iter()
                    .find(|s| s.name == slot)
                    .map(|s| s.value_type.clone())
                    .ok_or_else(|| PattiError::SlotNotFound {
                        slot: slot.clone(),
                        record_type,
                    })?;
                Ok(SchemaEntry {
                    slot,
                    mapping,
                    value_type,
                })
            })
            .collect::<Result<Vec<SchemaEntry>>>()?;
        Ok(Self { entries })
    }

    pub fn for_record<T: Record>() -> Result<Self> {
        let slots = T::slots();
        match T::column_mappings() {
            Some(mappings) => Schema::explicit(&slots, mappings, type_name::<T>()),
            None => Ok(Schema::positional(&slots)),
        }
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static SCHEMA_CACHE: LazyLock<RwLock<HashMap<TypeId, Arc<Schema>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Returns the schema of `T`, building it on first use. Once published, a schema is never
/// replaced. Two threads racing on the first use both build it, the first insert wins.
/// Failed builds are not cached.
pub fn schema_for<T: Record>() -> Result<Arc<Schema>> {
    let key = TypeId::of::<T>();
    {
        let cache = SCHEMA_CACHE.read().unwrap_or_else(|e| e.into_inner());
        if let Some(schema) = cache.get(&key) {
            return Ok(Arc::clone(schema));
        }
    }

    let built = Arc::new(Schema::for_record::<T>()?);
    let mut cache = SCHEMA_CACHE.write().unwrap_or_else(|e| e.into_inner());
    let schema = cache.entry(key).or_insert_with(|| {
        debug!(
            "caching schema for {} with {} entries",
            type_name::<T>(),
            built.len()
        );
        Arc::clone(&built)
    });
    Ok(Arc::clone(schema))
}
