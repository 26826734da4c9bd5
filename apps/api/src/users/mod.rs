// User registration. Credentials live with the upstream identity provider;
// this service only records the account and its email.

pub mod handlers;
