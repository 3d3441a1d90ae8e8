pub mod config;
pub mod entity;
pub mod error;
pub mod pipeline;
pub mod polarity;
pub mod progress;
pub mod stopwords;
pub mod table;
