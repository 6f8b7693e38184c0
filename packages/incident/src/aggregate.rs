//! Groups incidents by category label.

use crime_overlay_incident_models::{CategoryGroups, IncidentRecord};

use crate::OffenseNames;

/// Buckets `records` by their category label.
///
/// Records without a category are dropped. Every other record lands in its
/// category's group, even when its coordinates are missing or unparseable
/// (the point is stored as `None`). The label is the expanded offense name,
/// falling back to the raw offense code, then to the category itself when
/// the record carries no code at all.
#[must_use]
pub fn aggregate(records: &[IncidentRecord], names: &OffenseNames) -> CategoryGroups {
    let mut groups = CategoryGroups::new();
    let mut skipped = 0_usize;

    for record in records {
        let Some(category) = record.category.as_deref() else {
            skipped += 1;
            continue;
        };

        let label = record
            .offense_code
            .as_deref()
            .map_or(category, |code| names.label_for(code));

        groups.push(category, record.coordinate(), label.to_string());
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} incidents without a category");
    }
    log::debug!(
        "Aggregated {} incidents into {} categories",
        groups.incident_count(),
        groups.len()
    );

    groups
}
