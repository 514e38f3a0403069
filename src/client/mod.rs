//! Data layer of the directory single-page app: the HTTP client the forms
//! submit through, the stored login session, and the search/filtering the
//! listing pages run entirely client-side.

pub mod api;
pub mod catalog;
pub mod directory;
pub mod session;
