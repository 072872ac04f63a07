pub mod extraction;
pub mod lexicon;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod uploads;
