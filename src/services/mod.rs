//! Business services
//!
//! Derived-field logic shared by the controllers: document numbering,
//! invoice aggregation, amounts in words and avatar storage.

pub mod avatar_storage;
pub mod invoice_aggregator;
pub mod job_number;
pub mod number_to_words;

pub use invoice_aggregator::{aggregate, CurrencyTotals, LineItemDraft, ServiceLine};
pub use job_number::NumberSeries;
pub use number_to_words::number_to_words;
