//! Multi-dimensional grading of free-text answers.
//!
//! - `evaluation`: rule-based content scoring (similarity, keywords, regex,
//!   length, verb presence) with per-rule reasons
//! - `rubric`: weighted blend of content, organization, lexis, grammar and
//!   mechanics into one overall grade
//! - `services`: LanguageTool and OpenAI adapters that degrade to neutral
//!   defaults when unavailable

pub mod config;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod language;
pub mod logic;
pub mod metrics;
pub mod protocol;
pub mod routes;
pub mod rubric;
pub mod seeds;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod text;

pub use domain::{ContentEvalResult, EvaluationConfig, Reason, Rubric, RubricResult};
pub use evaluation::{evaluate_answer, ContentEngine};
pub use rubric::{score_rubric, RubricAggregator, RubricSignals};
