// libs/provider-cell/src/services/directory.rs
use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{DirectoryRole, IngestReport, Provider, RawProviderRecord, SourceError};
use crate::services::source::ProviderSource;

/// In-memory provider directory. Read-only for callers; contents are replaced
/// wholesale by `load_from` (the external source owns population and the
/// rating/review writeback).
pub struct ProviderDirectory {
    providers: RwLock<HashMap<Uuid, Provider>>,
}

impl ProviderDirectory {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, provider_id: Uuid) -> Option<Provider> {
        let providers = self.providers.read().expect("directory lock poisoned");
        providers.get(&provider_id).cloned()
    }

    /// All providers whose category equals the given tag. Empty input or no
    /// match yields an empty vec, never an error.
    pub fn find_by_category(&self, category: &str) -> Vec<Provider> {
        if category.is_empty() {
            return Vec::new();
        }

        let providers = self.providers.read().expect("directory lock poisoned");
        providers
            .values()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match over name, category and specialties.
    /// An empty query returns the full directory.
    pub fn search(&self, text: &str) -> Vec<Provider> {
        let providers = self.providers.read().expect("directory lock poisoned");

        if text.is_empty() {
            return providers.values().cloned().collect();
        }

        let needle = text.to_lowercase();
        providers
            .values()
            .filter(|p| {
                p.display_name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.specialties
                        .iter()
                        .any(|s| s.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    /// Category sections over the given records. Only records with role
    /// `provider` are included; consumers and staff are a domain exclusion,
    /// not a display concern.
    pub fn group_by_category(providers: &[Provider]) -> HashMap<String, Vec<Provider>> {
        let mut grouped: HashMap<String, Vec<Provider>> = HashMap::new();
        for provider in providers {
            if provider.role != DirectoryRole::Provider {
                continue;
            }
            grouped
                .entry(provider.category.clone())
                .or_default()
                .push(provider.clone());
        }
        grouped
    }

    /// Convenience grouping over the current directory contents.
    pub fn grouped(&self) -> HashMap<String, Vec<Provider>> {
        let providers = self.providers.read().expect("directory lock poisoned");
        let all: Vec<Provider> = providers.values().cloned().collect();
        Self::group_by_category(&all)
    }

    pub fn len(&self) -> usize {
        self.providers.read().expect("directory lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the directory contents wholesale.
    pub fn replace_all(&self, records: Vec<Provider>) {
        let mut providers = self.providers.write().expect("directory lock poisoned");
        providers.clear();
        for provider in records {
            providers.insert(provider.id, provider);
        }
        info!("Directory replaced with {} providers", providers.len());
    }

    /// Fetch the full record set from the source, validate each record, and
    /// replace the directory. Malformed records are quarantined with a warning
    /// rather than failing the batch.
    pub async fn load_from(&self, source: &dyn ProviderSource) -> Result<IngestReport, SourceError> {
        let raw = source.fetch_all().await?;

        let mut valid = Vec::new();
        let mut quarantined = 0usize;
        for record in raw {
            match validate_record(record) {
                Ok(provider) => valid.push(provider),
                Err(reason) => {
                    warn!("Quarantined directory record: {}", reason);
                    quarantined += 1;
                }
            }
        }

        let report = IngestReport {
            loaded: valid.len(),
            quarantined,
        };
        self.replace_all(valid);

        debug!(
            "Directory load complete: {} loaded, {} quarantined",
            report.loaded, report.quarantined
        );
        Ok(report)
    }
}

impl Default for ProviderDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate one raw source record into a strict `Provider`. Required fields
/// must be present and well-formed; absent optional fields stay `None` and
/// are never defaulted here.
pub fn validate_record(value: Value) -> Result<Provider, String> {
    let raw: RawProviderRecord = serde_json::from_value(value)
        .map_err(|e| format!("unparseable record: {}", e))?;

    let id = raw.id.ok_or("missing id")?;
    let display_name = raw.display_name.ok_or("missing display_name")?;
    if display_name.trim().is_empty() {
        return Err(format!("empty display_name for {}", id));
    }

    let category = raw.category.ok_or_else(|| format!("missing category for {}", id))?;
    if category.trim().is_empty() {
        return Err(format!("empty category for {}", id));
    }

    let role = match raw.role.as_deref() {
        Some("provider") => DirectoryRole::Provider,
        Some("consumer") => DirectoryRole::Consumer,
        Some("staff") => DirectoryRole::Staff,
        Some(other) => return Err(format!("unknown role '{}' for {}", other, id)),
        None => return Err(format!("missing role for {}", id)),
    };

    if let Some(fee) = raw.fee {
        if fee < 0.0 {
            return Err(format!("negative fee for {}", id));
        }
    }
    if let Some(rating) = raw.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(format!("rating out of range for {}", id));
        }
    }

    Ok(Provider {
        id,
        display_name,
        category,
        role,
        specialties: raw.specialties,
        fee: raw.fee,
        rating: raw.rating,
        review_count: raw.review_count,
        location: raw.location,
        years_experience: raw.years_experience,
    })
}
