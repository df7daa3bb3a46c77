#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod output;
pub mod rewrite;
pub mod rules;

pub use config::Config;
pub use output::{OutputFormat, OutputFormatter};
pub use rewrite::{rewrite_tree, RewriteOptions, RewriteReport};
pub use rules::{Rule, RuleSet};
