#![deny(rust_2018_idioms)]
#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Domain types shared by the dashboard crates.
//!
//! Rows coming from the backend have no fixed schema, so a [`Row`] is an ordered
//! map of field keys to dynamic [`FieldValue`]s. Everything else here describes
//! the state that a list view holds over those rows: [`Filter`]s, [`SortState`]
//! and the [`StatusCategory`] / [`StatusTone`] classifications.

pub use self::{
    config::Config,
    date::parse_date,
    filter::{DateRange, Filter},
    platform::Platform,
    row::Row,
    sort::{SortDirection, SortField, SortState},
    status::{StatusCategory, StatusTone},
    value::FieldValue,
};

pub mod config;
pub mod date;
pub mod filter;
pub mod platform;
pub mod row;
pub mod sort;
pub mod status;
pub mod util;
pub mod value;

#[cfg(feature = "test-util")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub mod test_util;

/// The name of a field in a [`Row`].
pub type FieldKey = String;
