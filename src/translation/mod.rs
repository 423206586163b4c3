/*!
 * Translation of key/value batches.
 *
 * This module is split into several submodules:
 *
 * - `unit`: Translation units, batches and the output document
 * - `retry`: Bounded retry with a fixed backoff
 * - `core`: Per-text translation with skip and cleaning rules
 * - `batch`: Ordered processing of a whole batch
 */

// Re-export main types for easier usage
pub use self::batch::{BatchOutcome, BatchTranslator, FailedUnit, RunReport};
pub use self::core::{TranslationOutcome, TranslationService};
pub use self::retry::RetryPolicy;
pub use self::unit::{Batch, OutputDocument, TranslationUnit, UnitStatus};

// Submodules
pub mod batch;
pub mod core;
pub mod retry;
pub mod unit;
