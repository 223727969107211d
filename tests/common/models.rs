//! Test models covering plain records, writer-converted types and records
//! without `Default`.

use codefixture::{impl_model, FixtureBuilder};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub group_id: i64,
}

/// Unsaved material; its writer turns it into a [`Material`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DraftMaterial {
    pub name: String,
}

/// Saved material with a generated id
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Stock {
    pub material_id: i64,
    pub quantity: u32,
}

/// Graph node used by ordering and permutation tests
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Node {
    pub label: usize,
    pub total: u64,
}

impl_model!(Group, Person, DraftMaterial, Material, Stock, Node);

/// Simulated primary-key sequence shared by writers
#[derive(Debug, Clone, Default)]
pub struct IdSequence(Rc<Cell<i64>>);

impl IdSequence {
    pub fn next_id(&self) -> i64 {
        let id = self.0.get() + 1;
        self.0.set(id);
        id
    }

    pub fn issued(&self) -> i64 {
        self.0.get()
    }
}

/// Builder whose writers "persist" every test model, assigning ids from a
/// shared sequence the way a database insert would
pub fn persisting_builder() -> (FixtureBuilder, IdSequence) {
    let ids = IdSequence::default();
    let mut builder = FixtureBuilder::new();

    let group_ids = ids.clone();
    builder.register_writer(move |mut group: Group| {
        group.id = group_ids.next_id();
        Ok(group)
    });

    let material_ids = ids.clone();
    builder.register_writer(move |draft: DraftMaterial| {
        Ok(Material {
            id: material_ids.next_id(),
            name: draft.name,
        })
    });

    builder.register_writer(|person: Person| Ok(person));
    builder.register_writer(|stock: Stock| Ok(stock));

    (builder, ids)
}
