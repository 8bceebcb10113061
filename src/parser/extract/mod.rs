pub mod metadata;
pub mod scores;

use scraper::ElementRef;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub use metadata::Metadata;
pub use scores::ScoreSummary;

/// One restaurant's extracted output: labeled metadata plus the score
/// rollup. Serializes flat, scores keyed alongside the metadata labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub metadata: Metadata,
    pub scores: ScoreSummary,
}

/// Run both extractors over one listing.
pub fn extract_all(listing: ElementRef<'_>) -> Record {
    Record {
        metadata: metadata::extract(listing),
        scores: scores::summarize(listing),
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metadata.len() + 3))?;
        for field in self.metadata.fields() {
            map.serialize_entry(&field.label, &field.values)?;
        }
        map.serialize_entry("Average Score", &self.scores.average_score)?;
        map.serialize_entry("High Score", &self.scores.high_score)?;
        map.serialize_entry("Total Inspections", &self.scores.total_inspections)?;
        map.end()
    }
}

// ── Tests ──
