//! # Report Enricher
//!
//! Turns a daily analytical report (JSON) into the derivative artifacts the
//! dashboard reads: an English translation of the report and a bilingual set
//! of strategic insights, both produced with a chat-completion model.
//!
//! ## Core Concepts
//!
//! - **Report Document**: loosely-typed JSON with levels, events, shifts, signals
//!   and categories. Every field is optional.
//! - **Batch translation**: several short fields are sent in one request as
//!   `[index] text` lines and matched back by index. Anything the model drops
//!   stays untranslated.
//! - **Walker**: translates the known textual fields of a report and copies
//!   everything else, so the output has the input's shape.
//! - **Insight Collection**: seven insight objects plus period and timestamp,
//!   generated in Russian and then translated as a whole.
//!
//! ## Example
//!
//! ```rust,ignore
//! use report_enricher::*;
//!
//! let config = EnricherConfig::from_env()?;
//! let client = OpenAiClient::from_config(&config);
//!
//! let report = load_report(Path::new("latest-report.json"))?;
//! let walker = ReportWalker::new(&client, config.profiles);
//! let english = walker.translate_report(&report).await?;
//! write_json(Path::new("latest-report.en.json"), &english)?;
//! ```

pub mod config;
pub mod error;
pub mod insights;
pub mod llm;
pub mod schema;
pub mod translator;
pub mod utils;
pub mod walker;

pub use config::{EnricherConfig, RequestProfiles};
pub use error::{EnricherError, Result};
pub use insights::{shape_warnings, InsightSynthesizer, ReportDigest};
pub use llm::{ChatMessage, GenerationRequest, GenerationSettings, MockGenerator, TextGenerator};
#[cfg(feature = "openai")]
pub use llm::OpenAiClient;
pub use schema::*;
pub use translator::Translator;
pub use utils::*;
pub use walker::ReportWalker;
