// src/build/outcome.rs

use crate::compile::Variant;

/// What happened to one variant of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantStatus {
    /// Source sub-tree or entry point missing; a deliberate omission, not a
    /// failure.
    Skipped,

    /// Compiler succeeded and the artifact was produced.
    Built,

    /// Compiler reported an error or the artifact was absent afterwards.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantResult {
    pub variant: Variant,
    pub status: VariantStatus,
}

/// Terminal state of one unit after a run.
///
/// Transitions (per unit): the unit is either skipped because its
/// fingerprint matches the stored checksum, or built; a build ends in
/// `Succeeded` only if *all attempted* variants succeeded (skipped variants
/// don't count against success). The checksum is written on the `Succeeded`
/// transition and only there; `Failed` leaves the unit's directory exactly
/// as it was before the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Fingerprint matched the stored checksum; nothing was touched.
    SkippedUpToDate,

    /// Every attempted variant built; artifacts promoted, checksum written.
    Succeeded {
        variants: Vec<VariantResult>,
        /// Whether any artifact was newly written in this run.
        changed: bool,
    },

    /// At least one attempted variant failed; all outputs of this attempt
    /// were discarded and no checksum was written.
    Failed { variants: Vec<VariantResult> },
}

impl UnitOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, UnitOutcome::Failed { .. })
    }

    pub fn changed(&self) -> bool {
        matches!(self, UnitOutcome::Succeeded { changed: true, .. })
    }
}
