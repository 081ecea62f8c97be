pub mod dto;
pub mod filter_key;
pub mod status_defaults;
pub mod widget_config;

pub use dto::*;
pub use filter_key::{
    reset_query, write_filters, FilterKey, FilterSelection, FilterSet, UrlFilterState, END_PARAM,
    START_PARAM,
};
pub use status_defaults::{is_default_status, resolve_default_statuses, STATUS_BLACKLIST};
pub use widget_config::{MultiSelectConfig, SelectOption};
