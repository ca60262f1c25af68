use indexmap::IndexSet;

/// Enum names already declared during one generation run.
///
/// Passed explicitly to every call that may create an enum-typed field, so two
/// entities never declare the same enum twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumRegistry {
    names: IndexSet<String>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Register `name`. Returns `false` if it was already known.
    pub fn register_enum(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for EnumRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
