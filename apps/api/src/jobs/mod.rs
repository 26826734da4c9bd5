// Job descriptions: ingestion from text or URL, storage, listing.

pub mod fetch;
pub mod handlers;
pub mod ingest;
pub mod store;
