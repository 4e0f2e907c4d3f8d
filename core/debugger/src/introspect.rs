//! Internal property introspection.

use crate::{DebugHost, Debugger};

/// A value slot that script cannot reach through normal property access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalProperty<V> {
    /// The slot name, e.g. `"[[PromiseState]]"`.
    pub name: String,
    /// The slot value.
    pub value: V,
}

/// The internal properties of a value, in the order the engine reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalProperties<V> {
    properties: Vec<InternalProperty<V>>,
}

impl<V> InternalProperties<V> {
    /// Gets the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Checks whether the value has no internal properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over the properties.
    pub fn iter(&self) -> std::slice::Iter<'_, InternalProperty<V>> {
        self.properties.iter()
    }

    /// Looks up a property by name.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.value)
    }

    /// Flattens the properties into `[name, value, name, value, ...]`,
    /// turning each name into a value with `make_name`.
    pub fn into_flat<F>(self, mut make_name: F) -> Vec<V>
    where
        F: FnMut(String) -> V,
    {
        let mut flat = Vec::with_capacity(self.properties.len() * 2);
        for InternalProperty { name, value } in self.properties {
            flat.push(make_name(name));
            flat.push(value);
        }
        flat
    }
}

impl<V> Default for InternalProperties<V> {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
        }
    }
}

impl<V> From<Vec<(String, V)>> for InternalProperties<V> {
    fn from(pairs: Vec<(String, V)>) -> Self {
        Self {
            properties: pairs
                .into_iter()
                .map(|(name, value)| InternalProperty { name, value })
                .collect(),
        }
    }
}

impl<V> IntoIterator for InternalProperties<V> {
    type Item = InternalProperty<V>;
    type IntoIter = std::vec::IntoIter<InternalProperty<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a InternalProperties<V> {
    type Item = &'a InternalProperty<V>;
    type IntoIter = std::slice::Iter<'a, InternalProperty<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl<H: DebugHost> Debugger<H> {
    /// Lists the internal properties of `value`.
    ///
    /// The result is allocated in the currently active context: the debug
    /// context while inside a debug scope, otherwise the engine's current
    /// context. Values without internal slots yield an empty list.
    pub fn internal_properties(
        &self,
        host: &mut H,
        value: &H::Value,
    ) -> InternalProperties<H::Value> {
        let context = self
            .contexts
            .entered()
            .unwrap_or_else(|| host.current_context());
        let properties = InternalProperties::from(host.internal_properties(&context, value));
        log::trace!(
            "{} internal properties of {value:?} allocated in {context:?}",
            properties.len()
        );
        properties
    }
}
