//! Route handlers, one module per area of the site.
//!
//! Each handler performs its data access under the shared connection lock
//! and answers with a view, a redirect, or an `ApiError`.

pub mod accounts;
pub mod doctors;
pub mod health;
pub mod measurements;
pub mod pages;
pub mod patients;
pub mod suggestions;
