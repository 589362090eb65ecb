use crate::store::error::StoreError;
use crate::store::ObservationStore;
use crate::types::hour_window::HourWindow;
use crate::types::observation::{Observation, StationAggregate};
use log::{debug, info};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

/// An in-memory `data` collection. Iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<Observation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_documents(documents: Vec<Observation>) -> Self {
        Self { documents }
    }

    /// Loads a collection dump with one JSON document per line. Blank lines are skipped.
    pub fn from_json_lines(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Read(path.to_path_buf(), e))?;

        let mut documents = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let document =
                serde_json::from_str::<Observation>(line).map_err(|e| StoreError::Parse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    source: e,
                })?;
            documents.push(document);
        }

        info!(
            "Loaded {} observations from {}",
            documents.len(),
            path.display()
        );
        Ok(Self { documents })
    }

    pub fn insert(&mut self, document: Observation) {
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Observation] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl MemoryStore {
    /// First valid reading per station in `window`, plus the number of documents the
    /// `$match` stage let through.
    fn group_first(&self, window: &HourWindow) -> (Vec<StationAggregate>, usize) {
        let mut groups: Vec<StationAggregate> = Vec::new();
        let mut index_by_station: HashMap<&str, usize> = HashMap::new();

        let matching = self
            .documents
            .iter()
            .filter(|doc| window.contains(doc.ts) && doc.has_valid_temperature());

        let mut matched = 0;
        for doc in matching {
            matched += 1;
            if let Entry::Vacant(entry) = index_by_station.entry(doc.st.as_str()) {
                entry.insert(groups.len());
                groups.push(StationAggregate {
                    id: doc.st.clone(),
                    position: doc.position.clone(),
                    air_temperature: doc.air_temperature.clone(),
                });
            }
        }
        (groups, matched)
    }
}

impl ObservationStore for MemoryStore {
    fn aggregate_hour(&self, window: &HourWindow) -> Result<Vec<StationAggregate>, StoreError> {
        let (groups, matched) = self.group_first(window);
        debug!(
            "Aggregated {} stations from {} matching documents for {}",
            groups.len(),
            matched,
            window
        );
        Ok(groups)
    }
}
