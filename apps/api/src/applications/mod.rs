// Application tracking: which resume went to which job, and where it stands.

pub mod handlers;
pub mod status;
pub mod store;
