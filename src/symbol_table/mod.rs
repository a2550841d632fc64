use std::collections::HashMap;

use crate::type_info::{RawTypeInfo, TypeInfo, TypeInfoError};

/// Binding of one name to one [`TypeInfo`]. Never changes once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolTableEntry {
    name: String,
    type_info: TypeInfo,
}

impl SymbolTableEntry {
    pub fn new(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            type_info,
        }
    }

    /// Builds an entry from the numeric record fields, rejecting inconsistent
    /// combinations (e.g. a parameter count on an `int`).
    pub fn from_raw(
        name: &str,
        ty: i32,
        num_params: i32,
        return_type: i32,
        string_value: &str,
        int_value: i64,
    ) -> Result<Self, TypeInfoError> {
        if name.is_empty() {
            return Err(TypeInfoError::EmptyName);
        }

        let type_info = TypeInfo::try_from(RawTypeInfo {
            ty,
            num_params,
            return_type,
            int_val: int_value,
            string_val: string_value.to_owned(),
        })?;

        Ok(Self::new(name, type_info))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_info(&self) -> TypeInfo {
        self.type_info.clone()
    }
}

/// Flat name to entry mapping. One declaration per name; the first one wins.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolTableEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts `entry` unless its name is already taken. Returns `false` and
    /// leaves the existing entry untouched on a duplicate.
    pub fn add_entry(&mut self, entry: SymbolTableEntry) -> bool {
        if self.entries.contains_key(entry.name()) {
            tracing::debug!(name = entry.name(), "rejected duplicate entry");
            return false;
        }

        tracing::trace!(name = entry.name(), ty = %entry.type_info.ty, "added entry");
        self.entries.insert(entry.name.clone(), entry);
        true
    }

    pub fn find_entry(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolTableEntry> {
        self.entries.get(name)
    }

    pub fn type_info(&self, name: &str) -> Option<TypeInfo> {
        let info = self.get(name).map(SymbolTableEntry::type_info);
        if info.is_none() {
            tracing::trace!(name, "lookup miss");
        }
        info
    }

    /// Lookup in the numeric form. An absent name yields
    /// [`RawTypeInfo::not_found`], which is indistinguishable from a symbol
    /// declared `undefined`; use [`SymbolTable::find_entry`] to tell them apart.
    pub fn raw_type_info(&self, name: &str) -> RawTypeInfo {
        self.get(name)
            .map(|entry| RawTypeInfo::from(&entry.type_info))
            .unwrap_or_else(RawTypeInfo::not_found)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
