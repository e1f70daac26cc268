//! Resource store integration tests, driven through a scripted backend.


mod domains;
mod properties;
mod races;
mod reconcile;
