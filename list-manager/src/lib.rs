#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! The list views of the campaigns dashboard.
//!
//! Rows are loaded a page at a time by the [`Manager`] and shown through the
//! [`ListState`]: searched, filtered & sorted, with user selected visible columns.

pub use self::{
    detail::{DetailView, DisplayMode},
    manager::{Error, LoadOutcome, Manager, Options},
    page::PageInfo,
    preferences::{FileStore, MemoryStore, PreferenceStore, Preferences},
    search_context::SearchContext,
    state::ListState,
    view::{ViewKind, ViewSpec},
};
pub use url::Url;

pub mod columns;
pub mod detail;
pub mod extract;
pub mod filter;
pub mod manager;
pub mod page;
pub mod preferences;
pub mod resize;
pub mod search;
pub mod search_context;
pub mod sort;
pub mod state;
pub mod view;
