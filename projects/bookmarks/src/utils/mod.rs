pub mod sanitize;
pub mod web_uri;
