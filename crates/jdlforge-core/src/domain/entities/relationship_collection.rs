use std::fmt;

use indexmap::IndexMap;

use crate::domain::{
    entities::relationship::Relationship, error::DomainError, value_objects::RelationshipType,
};

/// Relationships indexed by cardinality, then by identity key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipCollection {
    by_type: [IndexMap<String, Relationship>; 4],
}

const fn slot(relationship_type: RelationshipType) -> usize {
    match relationship_type {
        RelationshipType::OneToOne => 0,
        RelationshipType::OneToMany => 1,
        RelationshipType::ManyToOne => 2,
        RelationshipType::ManyToMany => 3,
    }
}

impl RelationshipCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a relationship.
    ///
    /// Returns `Ok(false)` when one with the same identity key is already
    /// present; the existing one is kept.
    pub fn add(&mut self, relationship: Relationship) -> Result<bool, DomainError> {
        let errors = relationship.issues();
        if !errors.is_empty() {
            return Err(DomainError::invalid("relationship", errors));
        }
        let map = &mut self.by_type[slot(relationship.relationship_type())];
        let id = relationship.id();
        if map.contains_key(&id) {
            return Ok(false);
        }
        map.insert(id, relationship);
        Ok(true)
    }

    pub fn get(&self, relationship_type: RelationshipType, id: &str) -> Option<&Relationship> {
        self.by_type[slot(relationship_type)].get(id)
    }

    pub fn contains(&self, relationship: &Relationship) -> bool {
        self.get(relationship.relationship_type(), &relationship.id())
            .is_some()
    }

    pub fn of_type(&self, relationship_type: RelationshipType) -> impl Iterator<Item = &Relationship> {
        self.by_type[slot(relationship_type)].values()
    }

    pub fn count_of(&self, relationship_type: RelationshipType) -> usize {
        self.by_type[slot(relationship_type)].len()
    }

    /// Every relationship, grouped by cardinality in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.by_type.iter().flat_map(IndexMap::values)
    }

    pub fn len(&self) -> usize {
        self.by_type.iter().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> IntoIterator for &'a RelationshipCollection {
    type Item = &'a Relationship;
    type IntoIter = Box<dyn Iterator<Item = &'a Relationship> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Display for RelationshipCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first_block = true;
        for relationship_type in RelationshipType::ALL {
            let group = &self.by_type[slot(relationship_type)];
            if group.is_empty() {
                continue;
            }
            if !first_block {
                f.write_str("\n")?;
            }
            first_block = false;

            writeln!(f, "relationship {relationship_type} {{")?;
            for (i, relationship) in group.values().enumerate() {
                if i > 0 {
                    f.write_str(",\n")?;
                }
                relationship.write_body(f, "  ")?;
            }
            f.write_str("\n}")?;
        }
        Ok(())
    }
}
