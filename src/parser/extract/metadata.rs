use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use serde::Serialize;

use crate::parser::cells::{clean_cell, direct_cells};

static TBODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());

/// Insertion-ordered label → values multimap. A listing carries under a
/// dozen labels, so lookup is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub label: String,
    pub values: Vec<String>,
}

impl Metadata {
    pub fn append(&mut self, label: &str, value: String) {
        match self.fields.iter_mut().find(|f| f.label == label) {
            Some(field) => field.values.push(value),
            None => self.fields.push(Field {
                label: label.to_string(),
                values: vec![value],
            }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.values.as_slice())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Fold the listing's two-cell rows into labeled values.
///
/// The listing's first tbody is the row container. Only rows with exactly
/// two direct cells carry metadata; section banners and inspection rows
/// have other cell counts and are skipped without touching the label
/// state. A row with an empty label cell continues the previous label
/// (addresses span several value rows under one "Address" label).
pub fn extract(listing: ElementRef<'_>) -> Metadata {
    let mut meta = Metadata::default();
    let Some(tbody) = listing.select(&TBODY).next() else {
        return meta;
    };

    let rows = tbody
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr");

    let mut current_label = String::new();
    for row in rows {
        let cells = direct_cells(&row);
        if cells.len() != 2 {
            continue;
        }
        let label = clean_cell(cells.first().copied());
        if !label.is_empty() {
            current_label = label;
        }
        meta.append(&current_label, clean_cell(cells.get(1).copied()));
    }
    meta
}
