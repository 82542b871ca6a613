//! # Customer Matching
//!
//! Typeahead search over the cached customer list while scanning.
//!
//! ## Ranking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  query "acme"                                                           │
//! │     │                                                                   │
//! │     ├──► 1. name starts with       "Acme", "Acme Corp"                 │
//! │     ├──► 2. name contains (not 1)  "Big Acme Supply"                   │
//! │     └──► 3. barcode                 exact / A-a variant / substring     │
//! │                                                                         │
//! │  [1..] ++ [2..] ++ [3..]  ──► dedupe by id, keep first  ──► results    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each bucket keeps the input order. A customer that matches by name and
//! by barcode shows up once, at its name position.
//!
//! ## Trailing `A` Rule
//! Cylinder labels are printed with a trailing `A` that scanners and
//! keyboards report as either case. A query ending in `A`/`a` matches a
//! barcode equal to the query with either suffix case, and nothing looser.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CustomerRecord;

/// Why a customer matched a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MatchBucket {
    /// Name starts with the query (case-insensitive).
    StartsWith,
    /// Name contains the query elsewhere (case-insensitive).
    Contains,
    /// Barcode equals the query exactly (case-sensitive).
    BarcodeExact,
    /// Barcode equals the query with the trailing `A`/`a` in either case.
    BarcodeCaseVariant,
    /// Barcode contains the query (case-insensitive).
    BarcodePartial,
}

/// A matched customer and the rule that matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate<'a> {
    pub customer: &'a CustomerRecord,
    pub bucket: MatchBucket,
}

/// Ranks customers against a query.
///
/// A blank query returns every customer in input order, tagged
/// [`MatchBucket::StartsWith`] (everything starts with the empty string).
pub fn rank_customers<'a>(query: &str, customers: &'a [CustomerRecord]) -> Vec<MatchCandidate<'a>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return customers
            .iter()
            .map(|customer| MatchCandidate {
                customer,
                bucket: MatchBucket::StartsWith,
            })
            .collect();
    }

    // Name buckets use the query as typed; barcode matching uses it trimmed.
    let lower = query.to_lowercase();
    let barcode_query = BarcodeQuery::new(trimmed);

    let mut starts_with = Vec::new();
    let mut contains = Vec::new();
    let mut barcodes = Vec::new();

    for customer in customers {
        let name = customer.name.to_lowercase();
        if name.starts_with(&lower) {
            starts_with.push(MatchCandidate {
                customer,
                bucket: MatchBucket::StartsWith,
            });
        } else if name.contains(&lower) {
            contains.push(MatchCandidate {
                customer,
                bucket: MatchBucket::Contains,
            });
        }

        if let Some(bucket) = customer.trimmed_barcode().and_then(|b| barcode_query.matches(b)) {
            barcodes.push(MatchCandidate { customer, bucket });
        }
    }

    let mut seen = HashSet::new();
    starts_with
        .into_iter()
        .chain(contains)
        .chain(barcodes)
        .filter(|candidate| seen.insert(candidate.customer.id.as_str()))
        .collect()
}

/// Finds customers matching a query, best matches first.
///
/// ## Example
/// ```rust
/// use gastrack_core::{find_customers, CustomerRecord};
///
/// let customers = vec![
///     CustomerRecord::new("4", "Harbor Welding", Some("12345a")),
/// ];
/// let hits = find_customers("12345A", &customers);
/// assert_eq!(hits[0].id, "4");
/// ```
pub fn find_customers<'a>(query: &str, customers: &'a [CustomerRecord]) -> Vec<&'a CustomerRecord> {
    rank_customers(query, customers)
        .into_iter()
        .map(|candidate| candidate.customer)
        .collect()
}

/// A trimmed query prepared for barcode comparison.
struct BarcodeQuery<'q> {
    raw: &'q str,
    lower: String,
    /// Query without its trailing `A`/`a`, when it has one.
    suffix_base: Option<&'q str>,
}

impl<'q> BarcodeQuery<'q> {
    fn new(trimmed: &'q str) -> Self {
        BarcodeQuery {
            raw: trimmed,
            lower: trimmed.to_lowercase(),
            suffix_base: trimmed
                .strip_suffix('A')
                .or_else(|| trimmed.strip_suffix('a')),
        }
    }

    /// `barcode` is already trimmed and non-blank.
    fn matches(&self, barcode: &str) -> Option<MatchBucket> {
        if barcode == self.raw {
            return Some(MatchBucket::BarcodeExact);
        }

        if let Some(base) = self.suffix_base {
            let is_variant = barcode
                .strip_prefix(base)
                .is_some_and(|suffix| suffix == "A" || suffix == "a");
            return is_variant.then_some(MatchBucket::BarcodeCaseVariant);
        }

        barcode
            .to_lowercase()
            .contains(&self.lower)
            .then_some(MatchBucket::BarcodePartial)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
