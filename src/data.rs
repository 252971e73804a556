use serde::{Deserialize, Serialize};

use crate::constants::sampler::DISTANCE_DECIMALS;

pub use crate::types::{Category, DocumentId};

/// One document of the corpus with its category labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Stable document identifier (unique within a collection).
    pub id: DocumentId,
    /// Category labels in the order the archive lists them.
    pub categories: Vec<Category>,
}

impl DocumentRecord {
    /// Build a record from an id and any iterable of category labels.
    pub fn new<I, C>(id: impl Into<DocumentId>, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        Self {
            id: id.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a record from a whitespace-separated category string (`"math.AG math.CO"`).
    pub fn from_category_line(id: impl Into<DocumentId>, line: &str) -> Self {
        Self::new(id, line.split_whitespace())
    }
}

/// Selected (target, context, negative) grouping.
///
/// Field order is the serialized field order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triplet {
    pub target: DocumentId,
    pub context: DocumentId,
    pub negative: DocumentId,
    /// Target-to-context distance rounded to one decimal.
    pub dist_to_context: f64,
    /// Target-to-negative distance rounded to one decimal.
    pub dist_to_negative: f64,
}

impl Triplet {
    /// Build a triplet, rounding both distances for output.
    pub fn new(
        target: &DocumentRecord,
        context: &DocumentRecord,
        negative: &DocumentRecord,
        dist_to_context: f64,
        dist_to_negative: f64,
    ) -> Self {
        Self {
            target: target.id.clone(),
            context: context.id.clone(),
            negative: negative.id.clone(),
            dist_to_context: round_distance(dist_to_context),
            dist_to_negative: round_distance(dist_to_negative),
        }
    }
}

/// Round a distance to the output precision (one decimal).
pub fn round_distance(value: f64) -> f64 {
    let scale = 10_f64.powi(DISTANCE_DECIMALS);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_line_splits_on_whitespace() {
        let record = DocumentRecord::from_category_line("0704.0001", "  hep-ph\tmath.AG  q-bio ");
        assert_eq!(record.id, "0704.0001");
        assert_eq!(record.categories, vec!["hep-ph", "math.AG", "q-bio"]);
    }

    #[test]
    fn round_distance_keeps_one_decimal() {
        assert_eq!(round_distance(2.0), 2.0);
        assert_eq!(round_distance(2.6666666), 2.7);
        assert_eq!(round_distance(1.04), 1.0);
        assert_eq!(round_distance(0.0), 0.0);
    }

    #[test]
    fn triplet_serializes_fields_in_declared_order() {
        let target = DocumentRecord::new("t", ["math.AG"]);
        let context = DocumentRecord::new("c", ["math.AT"]);
        let negative = DocumentRecord::new("n", ["q-bio"]);
        let triplet = Triplet::new(&target, &context, &negative, 2.0, 10.0 / 3.0);
        let json = serde_json::to_string(&triplet).unwrap();
        assert_eq!(
            json,
            r#"{"target":"t","context":"c","negative":"n","dist_to_context":2.0,"dist_to_negative":3.3}"#
        );
    }
}
