use crate::core::error::Id3Error;
use crate::core::record::Record;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An ordered collection of records plus the name of the label attribute.
///
/// Every record is guaranteed to carry a value for the label attribute.
#[derive(Clone)]
pub struct Dataset {
    records: Vec<Record>,
    label_attribute: String,
}

impl Dataset {
    pub fn new(records: Vec<Record>, label_attribute: impl Into<String>) -> Result<Self, Id3Error> {
        let label_attribute = label_attribute.into();
        if records.iter().any(|r| !r.contains(&label_attribute)) {
            return Err(Id3Error::missing_attribute(&label_attribute));
        }
        Ok(Self {
            records,
            label_attribute,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn label_attribute(&self) -> &str {
        &self.label_attribute
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn label_of<'a>(&self, record: &'a Record) -> Result<&'a str, Id3Error> {
        record.value(&self.label_attribute)
    }

    /// Attribute names of the first record, minus the label, sorted.
    pub fn candidate_attributes(&self) -> Vec<String> {
        match self.records.first() {
            Some(first) => first
                .attribute_names()
                .filter(|name| *name != self.label_attribute)
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn label_values(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.get(&self.label_attribute))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every attribute (label excluded) mapped to the sorted set of values it
    /// takes anywhere in the dataset.
    pub fn attribute_domains(&self) -> BTreeMap<String, Vec<String>> {
        let mut domains: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in &self.records {
            for name in record.attribute_names() {
                if name == self.label_attribute {
                    continue;
                }
                if let Some(value) = record.get(name) {
                    domains
                        .entry(name.to_string())
                        .or_default()
                        .insert(value.to_string());
                }
            }
        }
        domains
            .into_iter()
            .map(|(k, v)| (k, v.into_iter().collect()))
            .collect()
    }

    /// New dataset holding the records at `indices`, in that order.
    pub fn subset(&self, indices: &[usize]) -> Result<Dataset, Id3Error> {
        let mut records = Vec::with_capacity(indices.len());
        for &i in indices {
            let record = self.records.get(i).ok_or_else(|| {
                Id3Error::InvalidInput(format!(
                    "record index {i} out of bounds for dataset of {} records",
                    self.records.len()
                ))
            })?;
            records.push(record.clone());
        }
        Ok(Dataset {
            records,
            label_attribute: self.label_attribute.clone(),
        })
    }

    pub fn record_refs(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }
}

/// Groups `records` by their value of `attribute`, values in sorted order.
pub fn partition_by<'a>(
    records: &[&'a Record],
    attribute: &str,
) -> Result<BTreeMap<&'a str, Vec<&'a Record>>, Id3Error> {
    let mut groups: BTreeMap<&'a str, Vec<&'a Record>> = BTreeMap::new();
    for &record in records {
        groups.entry(record.value(attribute)?).or_default().push(record);
    }
    Ok(groups)
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("label_attribute", &self.label_attribute)
            .field("n_records", &self.records.len())
            .finish()
    }
}
