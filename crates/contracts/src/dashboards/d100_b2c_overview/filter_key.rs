use serde::{Deserialize, Serialize};

use super::widget_config::MultiSelectConfig;
use crate::shared::query_params::QueryParams;

/// Query parameter holding the first day of the period (YYYY-MM-DD)
pub const START_PARAM: &str = "start";
/// Query parameter holding the last day of the period (YYYY-MM-DD)
pub const END_PARAM: &str = "end";

/// One of the four filterable dimensions of the B2C overview.
///
/// Each key maps to one multi-select widget and one repeated URL parameter of
/// the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    Brands,
    Platforms,
    Shops,
    Statuses,
}

impl FilterKey {
    pub const ALL: [FilterKey; 4] = [
        FilterKey::Brands,
        FilterKey::Platforms,
        FilterKey::Shops,
        FilterKey::Statuses,
    ];

    /// URL parameter name
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Brands => "brands",
            FilterKey::Platforms => "platforms",
            FilterKey::Shops => "shops",
            FilterKey::Statuses => "statuses",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "brands" => Some(FilterKey::Brands),
            "platforms" => Some(FilterKey::Platforms),
            "shops" => Some(FilterKey::Shops),
            "statuses" => Some(FilterKey::Statuses),
            _ => None,
        }
    }

    /// DOM id of the widget bound to this key
    pub fn element_id(&self) -> &'static str {
        match self {
            FilterKey::Brands => "brand-select",
            FilterKey::Platforms => "platform-select",
            FilterKey::Shops => "shop-select",
            FilterKey::Statuses => "status-select",
        }
    }

    pub fn widget_config(&self) -> MultiSelectConfig {
        match self {
            FilterKey::Brands => MultiSelectConfig::searchable("Chọn Brand", "Brand"),
            FilterKey::Platforms => MultiSelectConfig::searchable("Chọn Nền tảng", "Nền tảng"),
            FilterKey::Shops => MultiSelectConfig::searchable("Chọn Shop", "Shop"),
            FilterKey::Statuses => MultiSelectConfig::searchable("Chọn Trạng thái", "Trạng thái"),
        }
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, duplicate-free list of selected values for one filter key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(Vec<String>);

impl FilterSelection {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self(unique)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Selections for all four filter keys, one named field per key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSet {
    #[serde(default)]
    pub brands: FilterSelection,
    #[serde(default)]
    pub platforms: FilterSelection,
    #[serde(default)]
    pub shops: FilterSelection,
    #[serde(default)]
    pub statuses: FilterSelection,
}

impl FilterSet {
    pub fn get(&self, key: FilterKey) -> &FilterSelection {
        match key {
            FilterKey::Brands => &self.brands,
            FilterKey::Platforms => &self.platforms,
            FilterKey::Shops => &self.shops,
            FilterKey::Statuses => &self.statuses,
        }
    }

    pub fn set(&mut self, key: FilterKey, selection: FilterSelection) {
        match key {
            FilterKey::Brands => self.brands = selection,
            FilterKey::Platforms => self.platforms = selection,
            FilterKey::Shops => self.shops = selection,
            FilterKey::Statuses => self.statuses = selection,
        }
    }

    /// Number of keys with a non-empty selection
    pub fn active_count(&self) -> usize {
        FilterKey::ALL
            .iter()
            .filter(|key| !self.get(**key).is_empty())
            .count()
    }
}

/// The part of the page URL this dashboard reads and writes:
/// `start`, `end` and the four repeated filter keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFilterState {
    pub start: Option<String>,
    pub end: Option<String>,
    pub filters: FilterSet,
}

impl UrlFilterState {
    pub fn from_query(params: &QueryParams) -> Self {
        let mut filters = FilterSet::default();
        for key in FilterKey::ALL {
            filters.set(key, FilterSelection::new(params.get_all(key.as_str())));
        }
        Self {
            start: params.get(START_PARAM).map(str::to_string),
            end: params.get(END_PARAM).map(str::to_string),
            filters,
        }
    }

    pub fn parse(search: &str) -> Self {
        Self::from_query(&QueryParams::parse(search))
    }

    /// Whether the URL carries at least one entry for `key`
    pub fn has(&self, key: FilterKey) -> bool {
        !self.filters.get(key).is_empty()
    }

    /// True when any of the four filter keys is present
    pub fn has_any_filter(&self) -> bool {
        FilterKey::ALL.iter().any(|key| self.has(*key))
    }
}

/// Replace the four filter keys in `params` with `filters`.
///
/// Every existing entry for the filter keys is dropped, then one entry per
/// selected value is appended. Keys with an empty selection contribute
/// nothing; `start`, `end` and unrelated parameters are left untouched.
pub fn write_filters(params: &mut QueryParams, filters: &FilterSet) {
    for key in FilterKey::ALL {
        params.delete(key.as_str());
    }
    for key in FilterKey::ALL {
        for value in filters.get(key).values() {
            params.append(key.as_str(), value);
        }
    }
}

/// Query that keeps only `start` and `end` from `params`
pub fn reset_query(params: &QueryParams) -> QueryParams {
    let mut reset = QueryParams::new();
    for key in [START_PARAM, END_PARAM] {
        if let Some(value) = params.get(key) {
            reset.append(key, value);
        }
    }
    reset
}
