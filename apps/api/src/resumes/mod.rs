// Resume uploads: multipart intake, on-disk storage, listing, download.

pub mod handlers;
pub mod storage;
pub mod store;
