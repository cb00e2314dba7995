pub(crate) mod dashboard;
pub(crate) mod income;
pub(crate) mod sign_in;
pub(crate) mod settings;
pub(crate) mod tracking;
pub(crate) mod transactions;
