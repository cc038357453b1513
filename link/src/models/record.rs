use super::value::CrateValue;

/// Ordered column-name → value mapping used by `insert` and `update`.
///
/// Iteration order is insertion order, which is the column order of the
/// generated statement. Setting an existing column replaces its value in
/// place.
///
/// # Examples
///
/// ```rust
/// use cratedb_link::Record;
///
/// let record = Record::new().set("name", "Ada").set("age", 30);
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.columns().collect::<Vec<_>>(), vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, CrateValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn set(mut self, column: impl Into<String>, value: impl Into<CrateValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CrateValue>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&CrateValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CrateValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Build a record from a JSON object, keeping its key order.
    ///
    /// Returns `None` when `value` is not an object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(
            object
                .iter()
                .map(|(k, v)| (k.clone(), CrateValue::from(v.clone())))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<CrateValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}
