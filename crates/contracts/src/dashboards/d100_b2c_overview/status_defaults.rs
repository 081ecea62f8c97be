//! Default status selection
//!
//! When the URL carries no `statuses` filter the dashboard selects every
//! status except terminal and cancelled ones.

/// Normalized (trimmed, lower-cased) status labels excluded from the default
/// selection
pub const STATUS_BLACKLIST: &[&str] = &[
    "hoàn thành công",
    "huỷ bởi đối tác",
    "hủy bởi đối tác",
    "đã huỷ",
    "đã hủy",
    "giao hàng thất bại",
    "trả hàng",
    "đã trả hàng",
    "hoàn hàng",
    "đã hoàn hàng",
];

/// Both diacritic spellings of "cancel"
const CANCEL_MARKERS: [&str; 2] = ["huỷ", "hủy"];

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Whether a status belongs to the default selection
pub fn is_default_status(value: &str) -> bool {
    let normalized = normalize(value);
    if STATUS_BLACKLIST.contains(&normalized.as_str()) {
        return false;
    }
    !CANCEL_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

/// Option values that make up the default status selection, in input order
///
/// # Example
/// ```
/// use contracts::dashboards::d100_b2c_overview::resolve_default_statuses;
/// let options = ["Đang xử lý", "Hoàn thành công", "Huỷ bởi đối tác", "Đang giao"];
/// assert_eq!(resolve_default_statuses(&options), vec!["Đang xử lý", "Đang giao"]);
/// ```
pub fn resolve_default_statuses<S: AsRef<str>>(options: &[S]) -> Vec<String> {
    options
        .iter()
        .map(AsRef::as_ref)
        .filter(|value| is_default_status(value))
        .map(str::to_string)
        .collect()
}
