//! Category taxonomy distance.
//!
//! Category labels are hierarchical (`main[.sub]`). Two labels are compared by
//! their main component and their depth (number of `.`-separated segments):
//!
//! | relation                                   | distance                    |
//! |--------------------------------------------|-----------------------------|
//! | identical label                            | `0`                         |
//! | same main                                  | `depth(a) + depth(b) - 2`   |
//! | different mains, both physics-related      | `depth(a) + depth(b)`       |
//! | different mains otherwise                  | `depth(a) + depth(b) + 1`   |

use crate::constants::metric::{CATEGORY_SEPARATOR, PHYSICS_MAINS, UNRELATED_MAIN_PENALTY};
use crate::data::DocumentRecord;
use crate::errors::TripletError;

/// Borrowed view over a category label split into its hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryLabel<'a> {
    raw: &'a str,
    main: &'a str,
    depth: usize,
}

impl<'a> CategoryLabel<'a> {
    /// Parse a raw label such as `q-bio.PE`.
    pub fn parse(raw: &'a str) -> Self {
        let main = raw.split(CATEGORY_SEPARATOR).next().unwrap_or(raw);
        let depth = raw.split(CATEGORY_SEPARATOR).count();
        Self { raw, main, depth }
    }

    /// Full label as given.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Top-level main component.
    pub fn main(&self) -> &'a str {
        self.main
    }

    /// Number of `.`-separated segments.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True if the main component belongs to the physics family.
    pub fn is_physics(&self) -> bool {
        PHYSICS_MAINS.contains(&self.main)
    }
}

/// Dissimilarity between two category labels.
pub fn category_distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let left = CategoryLabel::parse(a);
    let right = CategoryLabel::parse(b);
    let depth_sum = left.depth() + right.depth();
    if left.main() == right.main() {
        return depth_sum - 2;
    }
    if left.is_physics() && right.is_physics() {
        return depth_sum;
    }
    depth_sum + UNRELATED_MAIN_PENALTY
}

/// Distance from `query` to `other` over their category sets.
///
/// Each of the query's categories contributes its mean distance to every category
/// of `other`; the result is the mean of those contributions. Samplers always pass
/// the target document as `query`.
pub fn document_distance(
    query: &DocumentRecord,
    other: &DocumentRecord,
) -> Result<f64, TripletError> {
    ensure_categories(query)?;
    ensure_categories(other)?;
    let other_len = other.categories.len() as f64;
    let total: f64 = query
        .categories
        .iter()
        .map(|left| {
            let sum: usize = other
                .categories
                .iter()
                .map(|right| category_distance(left, right))
                .sum();
            sum as f64 / other_len
        })
        .sum();
    Ok(total / query.categories.len() as f64)
}

/// Reject documents whose category set is empty.
pub fn ensure_categories(record: &DocumentRecord) -> Result<(), TripletError> {
    if record.categories.is_empty() {
        return Err(TripletError::DegenerateInput {
            document_id: record.id.clone(),
        });
    }
    Ok(())
}
