/// Unique document identifier (stable across runs).
/// Examples: `0704.0001`, `math/0601001`
pub type DocumentId = String;
/// Hierarchical category label in `main[.subcategory]` form.
/// Examples: `math.AG`, `hep-th`, `q-bio.PE`
pub type Category = String;
/// Filename of a persisted triplet set.
/// Examples: `triplets.jsonl`, `triplets_range(0-2_3-5).jsonl`
pub type OutputFileName = String;
