//! Filter construction and result metadata for list screens.
//!
//! A screen declares a [`FieldSchema`], keeps the user's choices in a
//! [`FilterState`], turns them into a backend query string with
//! [`query::serialize`] and reads the truncation signals of the response into
//! [`QueryMetadata`]. Nothing in this crate performs I/O.

pub mod error;
pub mod field_type;
pub mod filter_state;
pub mod metadata;
pub mod option_set;
pub mod query;
pub mod schema;
pub mod screens;

pub use error::{FilterError, OptionPayloadError, SchemaError};
pub use field_type::{FieldType, Operator};
pub use filter_state::{FilterEntry, FilterState, FilterValue, DATE_FORMAT};
pub use metadata::{
    QueryMetadata, TruncationNotice, HAS_MORE_RECORDS_HEADER, TOTAL_COUNT_HEADER,
};
pub use option_set::{map_option_payload, DropdownOptionSet};
pub use schema::{
    DropdownConfig, DropdownOption, FieldSchema, FilterFieldSpec, OptionId, RemoteOptions,
    SchemaFormat, Section, StaticOptions,
};
pub use screens::ScreenDefinition;
