/*!
 * # section1983 - Civil rights complaint drafting engine
 *
 * A Rust library that turns a plain-language account of a police encounter
 * into the sections of a federal civil rights complaint under 42 U.S.C. § 1983.
 *
 * ## Features
 *
 * - Keyword classification of the violation and the First Amendment forum
 * - Pre-written legal templates keyed by classification and section
 * - Placeholder rendering from the plaintiff's profile and the incident
 * - Optional AI rewriting of selected sections, gated by a per-user budget
 * - Federal district court lookup by city, county and state
 * - Discount and referral codes for plan checkout
 * - Statement of Facts generation from reviewed video evidence
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `analysis`: Violation and forum classification
 * - `templates`: Template catalog, rendering context and renderer
 * - `sections`: Section persistence and ordering
 * - `orchestrator`: The full document pipeline
 * - `enhancement`: Budget-gated AI enhancement of sections
 * - `court`: Federal district and division lookup
 * - `billing`: Plans, discount codes and referral codes
 * - `evidence`: Video evidence to numbered facts
 * - `transcript`: Whisper transcripts of YouTube segments
 * - `providers`: OpenAI chat and transcription clients, plus a mock
 * - `database`: SQLite storage
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analysis;
pub mod app_config;
pub mod app_controller;
pub mod billing;
pub mod court;
pub mod database;
pub mod enhancement;
pub mod errors;
pub mod evidence;
pub mod jurisdiction;
pub mod orchestrator;
pub mod providers;
pub mod sections;
pub mod templates;
pub mod transcript;

// Re-export main types for easier usage
pub use analysis::{classify_location, classify_violation, ForumType, ViolationType};
pub use app_config::Config;
pub use app_controller::Controller;
pub use court::{lookup_court_by_location, CourtMatch};
pub use errors::{AppError, CourtLookupError, DiscountError, ProviderError, ReferralCodeError, TranscriptError};
pub use orchestrator::DocumentOrchestrator;
