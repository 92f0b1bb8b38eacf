//! Atlas Common - query classification, arithmetic and remote lookups.
//!
//! Everything the daemon and the CLI share: the keyword classifier, the
//! extractors, the arithmetic evaluator, the remote data handlers and the
//! dispatcher that ties them together.

pub mod api;
pub mod arithmetic;
pub mod config;
pub mod dispatcher;
pub mod expression;
pub mod fetch;
pub mod intent;
pub mod location;
pub mod random;
pub mod remote;

pub use api::*;
pub use arithmetic::{ArithmeticError, MathProblem};
pub use config::AtlasConfig;
pub use dispatcher::{DispatchResult, Dispatcher};
pub use expression::{extract_expressions, Expression, Operator};
pub use fetch::{FakeJsonFetcher, FetchError, FetchRequest, HttpJsonFetcher, JsonFetcher};
pub use intent::{classify, Intent};
pub use location::{extract_location, DEFAULT_LOCATION};
pub use random::{RandomSource, ScriptedRandom, SharedRandom};
