use std::collections::BTreeMap;

use crate::DecodeFailure;
use crate::protocols::eddystone::EddystoneError;

/// At most this many example contexts are kept per failure id.
const MAX_EXAMPLES: usize = 3;

#[derive(Default)]
pub(crate) struct FailureStats {
    by_id: BTreeMap<&'static str, FailureEntry>,
}

#[derive(Default)]
struct FailureEntry {
    count: u64,
    examples: Vec<String>,
}

impl FailureStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, record: u64, error: &EddystoneError) {
        let entry = self.by_id.entry(failure_id(error)).or_default();
        entry.count += 1;
        if entry.examples.len() < MAX_EXAMPLES {
            entry.examples.push(format!("record {record}: {error}"));
        }
    }

    /// Failure summaries in stable id order.
    pub(crate) fn into_summaries(self) -> Vec<DecodeFailure> {
        self.by_id
            .into_iter()
            .map(|(id, entry)| DecodeFailure {
                id: id.to_string(),
                count: entry.count,
                examples: entry.examples,
            })
            .collect()
    }
}

fn failure_id(error: &EddystoneError) -> &'static str {
    match error {
        EddystoneError::Truncated { .. } => "BL-ADV-TRUNCATED",
        EddystoneError::NotFound => "BL-ADV-NOT-FOUND",
        EddystoneError::UnrecognizedService { .. } => "BL-SVC-UNRECOGNIZED",
        EddystoneError::UnrecognizedFrame { .. } => "BL-FRAME-UNRECOGNIZED",
        EddystoneError::InvalidLength { .. } => "BL-FRAME-INVALID-LENGTH",
        EddystoneError::InvalidIndex { .. } => "BL-URL-INVALID-INDEX",
    }
}

#[cfg(test)]
mod tests {
    use super::FailureStats;
    use crate::protocols::eddystone::EddystoneError;

    #[test]
    fn failures_sorted_by_id_with_capped_examples() {
        let mut stats = FailureStats::new();
        for record in 1..=5 {
            stats.add(record, &EddystoneError::NotFound);
        }
        stats.add(
            6,
            &EddystoneError::Truncated {
                needed: 4,
                actual: 2,
            },
        );
        let summaries = stats.into_summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "BL-ADV-NOT-FOUND");
        assert_eq!(summaries[0].count, 5);
        assert_eq!(summaries[0].examples.len(), 3);
        assert_eq!(
            summaries[0].examples[0],
            "record 1: no Eddystone service data found"
        );
        assert_eq!(summaries[1].id, "BL-ADV-TRUNCATED");
        assert_eq!(
            summaries[1].examples[0],
            "record 6: advertisement truncated: need 4 bytes, got 2"
        );
    }
}
