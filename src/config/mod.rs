mod evaluation_config;
mod overrides;

pub use evaluation_config::EvaluationConfig;
pub use overrides::{KeyValue, apply_overrides, parse_key_value};
