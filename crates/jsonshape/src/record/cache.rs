//! TypeId -> field table cache

use std::{
    any::TypeId,
    borrow::Cow,
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use log::debug;
use parking_lot::RwLock;

use crate::shape::{Def, FieldDef, Shape};

static TABLES: LazyLock<RwLock<HashMap<TypeId, Arc<FieldTable>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Where a member of a record's JSON object is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field indices from the record down through embedded records.
    pub path: Vec<usize>,
    /// `false` for skipped fields: the member is recognized and ignored.
    pub included: bool,
}

/// Normalized member name -> field, for one record type.
#[derive(Debug, Default)]
pub struct FieldTable {
    by_name: HashMap<String, FieldSpec>,
}

impl FieldTable {
    /// Builds the table breadth-first over `fields` and the fields of
    /// embedded records, so shallower fields shadow deeper ones. Within one
    /// level the first declared field wins.
    #[must_use]
    pub fn build(fields: &'static [FieldDef]) -> Self {
        let mut by_name = HashMap::new();
        let mut level = vec![(Vec::new(), fields)];

        while !level.is_empty() {
            let mut next = Vec::new();
            for (prefix, fields) in level {
                for (index, field) in fields.iter().enumerate() {
                    let mut path: Vec<usize> = prefix.clone();
                    path.push(index);

                    if field.embed && field.rename.is_none() && !field.skip {
                        if let Def::Record(inner) = field.shape().def {
                            next.push((path, inner));
                            continue;
                        }
                    }

                    by_name
                        .entry(normalize(field.external_name()).into_owned())
                        .or_insert(FieldSpec {
                            path,
                            included: !field.skip,
                        });
                }
            }
            level = next;
        }

        Self { by_name }
    }

    /// Looks up an already normalized member name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.by_name.get(name)
    }

    /// Number of distinct member names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if the record has no decodable members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Case-folds a member name. Borrows when there is nothing to fold.
///
/// Titlecase letters such as `ǅ` fold too, so `"ǅx"`, `"Ǆx"` and `"ǆx"`
/// all match each other.
#[must_use]
pub fn normalize(name: &str) -> Cow<'_, str> {
    if name.chars().any(|c| c.to_lowercase().ne(core::iter::once(c))) {
        Cow::Owned(name.to_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Returns the field table of a record shape, building it on first use.
///
/// Tables are keyed by [`TypeId`] and never evicted. Concurrent first uses
/// may build the same table twice; the first one inserted is kept and
/// returned to everyone.
#[must_use]
pub fn field_table(shape: &'static Shape) -> Arc<FieldTable> {
    let id = shape.id();
    if let Some(table) = TABLES.read().get(&id) {
        return Arc::clone(table);
    }

    let fields: &'static [FieldDef] = match shape.def {
        Def::Record(fields) => fields,
        _ => &[],
    };
    let built = Arc::new(FieldTable::build(fields));
    debug!("built field table for {shape} with {} names", built.len());

    Arc::clone(TABLES.write().entry(id).or_insert(built))
}
