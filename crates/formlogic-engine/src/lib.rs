//! Conditional visibility and validation engine
//!
//! Given a form schema and the answers collected so far, decides which
//! fields are shown and whether the answers can be submitted.
//!
//! # Pipeline
//!
//! ```text
//!  schema + answers
//!        │
//!        ▼
//!  ┌────────────┐  visibility  ┌──────────────┐  per visible field  ┌───────────┐
//!  │  resolver  │─────────────►│ orchestrator │────────────────────►│ validator │
//!  └────────────┘              └──────────────┘                     └───────────┘
//!        │ rules                      │ whole answer set
//!        ▼                            ▼
//!  ┌────────────┐              ┌──────────────┐
//!  │ evaluator  │              │ cross-field  │
//!  └────────────┘              └──────────────┘
//! ```
//!
//! Every stage is a plain function over borrowed input. [`FormEngine`] ties
//! them together with configuration, a compiled-pattern cache and counters.

#![warn(clippy::all)]

pub mod cache;
pub mod cross_field;
pub mod engine;
pub mod evaluator;
pub mod graph;
pub mod messages;
pub mod orchestrator;
pub mod patterns;
pub mod resolver;
pub mod schema_check;
pub mod summary;
pub mod validator;

pub use cache::PatternCache;
pub use cross_field::{AtLeastOneOf, FieldsMatch};
pub use engine::{EngineConfig, EngineStats, Evaluation, FormEngine};
pub use evaluator::{evaluate, evaluate_with, EvaluationPolicy};
pub use messages::Locale;
pub use orchestrator::{validate_form, validate_form_with, validate_responses, CrossFieldValidator};
pub use resolver::{purge_hidden, resolve_visibility, ResolutionMode, Resolver, ResolverOptions};
pub use schema_check::{check_schema, ensure_valid_schema, SchemaReport};
pub use summary::{dependent_fields, field_dependencies, validation_summary, FieldSummary};
pub use validator::{validate_field, validate_field_with, FieldOutcome, ValidatorContext};
