use serde::{Deserialize, Serialize};

/// Number of options visible in an open dropdown before it scrolls
pub const DEFAULT_OPTION_COUNT: u32 = 6;

/// Configuration passed to the multi-select widget library on init.
///
/// Field names serialize to the option names VirtualSelect expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiSelectConfig {
    #[serde(rename = "search")]
    pub searchable: bool,
    #[serde(rename = "showValueAsTags")]
    pub show_selected_as_tags: bool,
    pub placeholder: String,
    #[serde(rename = "allOptionsSelectedText")]
    pub all_selected_label: String,
    #[serde(rename = "optionsCount")]
    pub option_count: u32,
}

impl MultiSelectConfig {
    /// Searchable widget that shows a count instead of tags
    pub fn searchable(placeholder: &str, all_selected_label: &str) -> Self {
        Self {
            searchable: true,
            show_selected_as_tags: false,
            placeholder: placeholder.to_string(),
            all_selected_label: all_selected_label.to_string(),
            option_count: DEFAULT_OPTION_COUNT,
        }
    }
}

/// One selectable entry of a multi-select widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_library_option_names() {
        let config = MultiSelectConfig::searchable("Chọn Shop", "Shop");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["search"], true);
        assert_eq!(json["showValueAsTags"], false);
        assert_eq!(json["allOptionsSelectedText"], "Shop");
        assert_eq!(json["optionsCount"], DEFAULT_OPTION_COUNT);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{
            "search": true,
            "showValueAsTags": false,
            "placeholder": "x",
            "allOptionsSelectedText": "y",
            "optionsCount": 5,
            "multiple": true
        }"#;
        assert!(serde_json::from_str::<MultiSelectConfig>(json).is_err());
    }
}
