pub mod json_override_source;
