//! Per-path and batch extraction.
//!
//! Each path record is processed independently: look up its transect, walk
//! the geometry to the recorded completeness, and either emit a line feature
//! or skip with a reason. Every skip condition is local — one bad record
//! never fails the batch.

use std::collections::HashMap;

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::completeness::walk_to_completeness;
use crate::error::{ExtractError, Result};
use crate::store::TransectStore;
use crate::{PathAttributes, PathFeature, SurveyPath};

/// Why a path produced no feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The referenced transect is not in the store
    TransectNotFound,
    /// The transect has no usable geometry (no parts, or a part too short
    /// to walk)
    MissingGeometry,
    /// The transect geometry has more than one disjoint part
    MultiPartGeometry { parts: usize },
    /// The transect's total length is zero or otherwise unusable
    ZeroLength,
    /// The path was recorded without a completeness value
    MissingCompleteness,
    /// The cumulative walk never reached the completeness target
    NotComplete,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::TransectNotFound => "transect-not-found",
            SkipReason::MissingGeometry => "missing-geometry",
            SkipReason::MultiPartGeometry { .. } => "multi-part-geometry",
            SkipReason::ZeroLength => "zero-length",
            SkipReason::MissingCompleteness => "missing-completeness",
            SkipReason::NotComplete => "not-complete",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of extracting a single path: a feature, or a reasoned skip.
#[derive(Debug)]
pub enum ExtractOutcome {
    Feature(PathFeature),
    Skipped(SkipReason),
}

/// A path skipped during batch extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPath {
    pub path_id: String,
    pub reason: SkipReason,
}

/// A path rejected during batch extraction because its input was corrupt
/// (e.g. completeness > 100), as opposed to merely absent.
#[derive(Debug)]
pub struct RejectedPath {
    pub path_id: String,
    pub error: ExtractError,
}

/// Result of a batch extraction run. The batch always completes: every input
/// path lands in exactly one of the three buckets.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Extracted features, in input path order
    pub features: Vec<PathFeature>,
    pub skipped: Vec<SkippedPath>,
    pub rejected: Vec<RejectedPath>,
}

impl BatchResult {
    /// Skip counts keyed by [`SkipReason::as_str`].
    pub fn skip_counts(&self) -> HashMap<&'static str, usize> {
        let mut counts = HashMap::new();
        for skip in &self.skipped {
            *counts.entry(skip.reason.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Extract the walked sub-path feature for one path record.
///
/// Absent or degenerate data (missing transect, missing completeness, bad
/// geometry, zero length, walk falling short of the target) is returned as
/// [`ExtractOutcome::Skipped`] and logged. Corrupt input — a completeness
/// percentage outside 1..=100 — is an error, never clamped.
pub fn extract_path(store: &TransectStore, path: &SurveyPath) -> Result<ExtractOutcome> {
    let Some(completeness) = path.completeness else {
        info!("path {}: no completeness recorded, skipping", path.id);
        return Ok(ExtractOutcome::Skipped(SkipReason::MissingCompleteness));
    };

    let Some(transect) = store.get(&path.transect_id) else {
        info!(
            "path {}: transect {} not found, skipping",
            path.id, path.transect_id
        );
        return Ok(ExtractOutcome::Skipped(SkipReason::TransectNotFound));
    };

    if transect.parts.is_empty() {
        info!(
            "path {}: transect {} has no geometry, skipping",
            path.id, transect.id
        );
        return Ok(ExtractOutcome::Skipped(SkipReason::MissingGeometry));
    }

    let Some(part) = transect.single_part() else {
        warn!(
            "path {}: transect {} has {} geometry parts, unsupported",
            path.id,
            transect.id,
            transect.parts.len()
        );
        return Ok(ExtractOutcome::Skipped(SkipReason::MultiPartGeometry {
            parts: transect.parts.len(),
        }));
    };

    match walk_to_completeness(part, transect.total_length, completeness) {
        Ok(walk) if walk.reached => {
            let attributes = PathAttributes::from_records(transect, path, completeness);
            Ok(ExtractOutcome::Feature(PathFeature {
                points: walk.points,
                walked_length: walk.walked_length,
                attributes,
            }))
        }
        Ok(walk) => {
            warn!(
                "path {}: walk not complete ({:.0} m of {:.0} m, target {}%)",
                path.id, walk.walked_length, transect.total_length, completeness
            );
            Ok(ExtractOutcome::Skipped(SkipReason::NotComplete))
        }
        Err(ExtractError::NonPositiveLength { .. }) => {
            info!(
                "path {}: transect {} has zero length, skipping",
                path.id, transect.id
            );
            Ok(ExtractOutcome::Skipped(SkipReason::ZeroLength))
        }
        Err(ExtractError::InsufficientPoints { .. }) => {
            info!(
                "path {}: transect {} geometry too short to walk, skipping",
                path.id, transect.id
            );
            Ok(ExtractOutcome::Skipped(SkipReason::MissingGeometry))
        }
        Err(err) => Err(err),
    }
}

/// Extract features for a batch of paths, skip-and-continue.
pub fn extract_all(store: &TransectStore, paths: &[SurveyPath]) -> BatchResult {
    let mut result = BatchResult::default();
    for path in paths {
        collect_outcome(&mut result, &path.id, extract_path(store, path));
    }
    log_batch(&result, paths.len());
    result
}

/// Parallel batch extraction, one rayon task per path.
///
/// Each path only reads its own transect's immutable polyline, so the fan-out
/// needs no synchronization. Features come back in input path order, same as
/// [`extract_all`].
#[cfg(feature = "parallel")]
pub fn extract_all_parallel(store: &TransectStore, paths: &[SurveyPath]) -> BatchResult {
    let outcomes: Vec<(String, Result<ExtractOutcome>)> = paths
        .par_iter()
        .map(|path| (path.id.clone(), extract_path(store, path)))
        .collect();

    let mut result = BatchResult::default();
    for (path_id, outcome) in outcomes {
        collect_outcome(&mut result, &path_id, outcome);
    }
    log_batch(&result, paths.len());
    result
}

fn collect_outcome(result: &mut BatchResult, path_id: &str, outcome: Result<ExtractOutcome>) {
    match outcome {
        Ok(ExtractOutcome::Feature(feature)) => result.features.push(feature),
        Ok(ExtractOutcome::Skipped(reason)) => result.skipped.push(SkippedPath {
            path_id: path_id.to_string(),
            reason,
        }),
        Err(error) => result.rejected.push(RejectedPath {
            path_id: path_id.to_string(),
            error,
        }),
    }
}

fn log_batch(result: &BatchResult, total: usize) {
    info!(
        "extracted {} features from {} paths ({} skipped, {} rejected)",
        result.features.len(),
        total,
        result.skipped.len(),
        result.rejected.len()
    );
}
