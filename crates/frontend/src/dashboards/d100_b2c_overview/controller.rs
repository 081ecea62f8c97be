//! Filter state controller
//!
//! Keeps the four multi-select filter widgets, the Apply/Reset controls and
//! the page URL consistent. The URL is the only source of truth: every state
//! change is a full navigation, and a load without `statuses` is redirected
//! once to a URL carrying the default status selection.

use contracts::dashboards::d100_b2c_overview::{
    reset_query, resolve_default_statuses, write_filters, FilterKey, FilterSelection, FilterSet,
    SelectOption, UrlFilterState,
};
use contracts::shared::query_params::QueryParams;

/// Value reported by a multi-select widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetValue {
    Empty,
    Single(String),
    Multiple(Vec<String>),
}

impl WidgetValue {
    pub fn into_selection(self) -> FilterSelection {
        match self {
            WidgetValue::Empty => FilterSelection::default(),
            WidgetValue::Single(value) if value.is_empty() => FilterSelection::default(),
            WidgetValue::Single(value) => FilterSelection::new([value]),
            WidgetValue::Multiple(values) => FilterSelection::new(values),
        }
    }
}

/// Selection-capable widget, treated as opaque apart from get/set
pub trait MultiSelectWidget {
    fn value(&self) -> WidgetValue;
    fn set_value(&self, values: &[String]);
    fn options(&self) -> Vec<SelectOption>;
}

/// Access to the page location
pub trait Navigator {
    /// Current query string, with or without the leading `?`
    fn current_search(&self) -> String;
    /// Full-page navigation to the same path with a new query string
    fn navigate(&self, search: &str);
}

/// Widget handles, one named slot per filter key. A `None` slot is a widget
/// missing from the page.
pub struct FilterWidgets<W> {
    pub brands: Option<W>,
    pub platforms: Option<W>,
    pub shops: Option<W>,
    pub statuses: Option<W>,
}

impl<W> FilterWidgets<W> {
    pub fn get(&self, key: FilterKey) -> Option<&W> {
        match key {
            FilterKey::Brands => self.brands.as_ref(),
            FilterKey::Platforms => self.platforms.as_ref(),
            FilterKey::Shops => self.shops.as_ref(),
            FilterKey::Statuses => self.statuses.as_ref(),
        }
    }

    /// Build the slots by looking each key up independently
    pub fn lookup(mut find: impl FnMut(FilterKey) -> Option<W>) -> Self {
        Self {
            brands: find(FilterKey::Brands),
            platforms: find(FilterKey::Platforms),
            shops: find(FilterKey::Shops),
            statuses: find(FilterKey::Statuses),
        }
    }
}

impl<W> Default for FilterWidgets<W> {
    fn default() -> Self {
        Self {
            brands: None,
            platforms: None,
            shops: None,
            statuses: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Unloaded,
    Initializing,
    AwaitingUserAction,
    /// Navigation to the default status selection has been triggered
    AutoRedirecting,
    /// Apply or Reset has triggered a navigation
    Navigated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOutcome {
    pub phase: ControllerPhase,
    pub reset_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    NotInitialized,
    AlreadyNavigated,
    ResetDisabled,
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::NotInitialized => write!(f, "filters are not initialized yet"),
            ControllerError::AlreadyNavigated => write!(f, "navigation already in progress"),
            ControllerError::ResetDisabled => write!(f, "no filter to reset"),
        }
    }
}

pub struct FilterStateController<W, N> {
    widgets: FilterWidgets<W>,
    navigator: N,
    phase: ControllerPhase,
    reset_enabled: bool,
}

impl<W: MultiSelectWidget, N: Navigator> FilterStateController<W, N> {
    pub fn new(widgets: FilterWidgets<W>, navigator: N) -> Self {
        Self {
            widgets,
            navigator,
            phase: ControllerPhase::Unloaded,
            reset_enabled: false,
        }
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    /// Sync widgets from the URL. Runs once per page load.
    pub fn initialize(&mut self) -> InitOutcome {
        if self.phase != ControllerPhase::Unloaded {
            log::warn!("Filter controller already initialized ({:?})", self.phase);
            return self.outcome();
        }
        self.phase = ControllerPhase::Initializing;

        let state = UrlFilterState::parse(&self.navigator.current_search());

        for key in [FilterKey::Brands, FilterKey::Platforms, FilterKey::Shops] {
            if state.has(key) {
                self.set_widget(key, state.filters.get(key).values());
            }
        }

        self.reset_enabled = state.has_any_filter();

        if state.has(FilterKey::Statuses) {
            self.set_widget(FilterKey::Statuses, state.filters.statuses.values());
            self.phase = ControllerPhase::AwaitingUserAction;
            return self.outcome();
        }

        let defaults = self.default_statuses();
        if defaults.is_empty() {
            log::warn!("No default statuses resolved, staying on the current URL");
            self.phase = ControllerPhase::AwaitingUserAction;
            return self.outcome();
        }

        self.set_widget(FilterKey::Statuses, &defaults);
        let mut filters = self.read_widgets();
        filters.statuses = FilterSelection::new(defaults);

        log::info!(
            "Applying default statuses: {} selected",
            filters.statuses.len()
        );
        self.commit(&filters, ControllerPhase::AutoRedirecting);
        self.outcome()
    }

    /// Default status selection computed from the status widget's options
    pub fn default_statuses(&self) -> Vec<String> {
        match self.widget(FilterKey::Statuses) {
            Some(widget) => {
                let values: Vec<String> = widget.options().into_iter().map(|o| o.value).collect();
                resolve_default_statuses(values.as_slice())
            }
            None => Vec::new(),
        }
    }

    /// Write the widgets' current selections to the URL and navigate
    pub fn apply_filters(&mut self) -> Result<(), ControllerError> {
        self.ensure_actionable()?;
        let filters = self.read_widgets();
        log::info!("Applying filters: {} active", filters.active_count());
        self.commit(&filters, ControllerPhase::Navigated);
        Ok(())
    }

    /// Drop every filter key, keeping only `start`/`end`, and navigate
    pub fn reset_filters(&mut self) -> Result<(), ControllerError> {
        self.ensure_actionable()?;
        if !self.reset_enabled {
            return Err(ControllerError::ResetDisabled);
        }
        let params = QueryParams::parse(&self.navigator.current_search());
        let reset = reset_query(&params);
        log::info!("Resetting filters");
        self.phase = ControllerPhase::Navigated;
        self.navigator.navigate(&reset.to_query_string());
        Ok(())
    }

    fn outcome(&self) -> InitOutcome {
        InitOutcome {
            phase: self.phase,
            reset_enabled: self.reset_enabled,
        }
    }

    fn ensure_actionable(&self) -> Result<(), ControllerError> {
        match self.phase {
            ControllerPhase::AwaitingUserAction => Ok(()),
            ControllerPhase::Unloaded | ControllerPhase::Initializing => {
                Err(ControllerError::NotInitialized)
            }
            ControllerPhase::AutoRedirecting | ControllerPhase::Navigated => {
                Err(ControllerError::AlreadyNavigated)
            }
        }
    }

    fn widget(&self, key: FilterKey) -> Option<&W> {
        let widget = self.widgets.get(key);
        if widget.is_none() {
            log::warn!("Filter widget #{} not found", key.element_id());
        }
        widget
    }

    fn set_widget(&self, key: FilterKey, values: &[String]) {
        if let Some(widget) = self.widget(key) {
            widget.set_value(values);
        }
    }

    fn read_widgets(&self) -> FilterSet {
        let mut filters = FilterSet::default();
        for key in FilterKey::ALL {
            if let Some(widget) = self.widget(key) {
                filters.set(key, widget.value().into_selection());
            }
        }
        filters
    }

    /// Rebuild the query in memory, then navigate once
    fn commit(&mut self, filters: &FilterSet, next: ControllerPhase) {
        let mut params = QueryParams::parse(&self.navigator.current_search());
        write_filters(&mut params, filters);
        self.phase = next;
        self.navigator.navigate(&params.to_query_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct MockWidget {
        options: Vec<SelectOption>,
        value: RefCell<WidgetValue>,
        set_calls: RefCell<Vec<Vec<String>>>,
    }

    impl MockWidget {
        fn with_options(options: &[&str]) -> Self {
            Self {
                options: options.iter().map(|o| SelectOption::new(*o)).collect(),
                value: RefCell::new(WidgetValue::Empty),
                set_calls: RefCell::new(Vec::new()),
            }
        }

        fn with_value(value: WidgetValue) -> Self {
            let widget = Self::with_options(&[]);
            *widget.value.borrow_mut() = value;
            widget
        }
    }

    impl MultiSelectWidget for MockWidget {
        fn value(&self) -> WidgetValue {
            self.value.borrow().clone()
        }

        fn set_value(&self, values: &[String]) {
            self.set_calls.borrow_mut().push(values.to_vec());
            *self.value.borrow_mut() = WidgetValue::Multiple(values.to_vec());
        }

        fn options(&self) -> Vec<SelectOption> {
            self.options.clone()
        }
    }

    #[derive(Clone)]
    struct RecordingNavigator {
        search: String,
        navigations: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingNavigator {
        fn at(search: &str) -> Self {
            Self {
                search: search.to_string(),
                navigations: Rc::new(RefCell::new(Vec::new())),
            }
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_search(&self) -> String {
            self.search.clone()
        }

        fn navigate(&self, search: &str) {
            self.navigations.borrow_mut().push(search.to_string());
        }
    }

    const STATUS_OPTIONS: [&str; 4] = [
        "Đang xử lý",
        "Hoàn thành công",
        "Huỷ bởi đối tác",
        "Đang giao",
    ];

    fn all_widgets() -> FilterWidgets<MockWidget> {
        FilterWidgets {
            brands: Some(MockWidget::with_options(&["A", "B"])),
            platforms: Some(MockWidget::with_options(&["Shopee", "Tiktok"])),
            shops: Some(MockWidget::with_options(&["C"])),
            statuses: Some(MockWidget::with_options(&STATUS_OPTIONS)),
        }
    }

    fn widget_set_calls(
        controller: &FilterStateController<MockWidget, RecordingNavigator>,
        key: FilterKey,
    ) -> Vec<Vec<String>> {
        controller.widgets.get(key).unwrap().set_calls.borrow().clone()
    }

    #[test]
    fn test_explicit_statuses_are_applied_without_redirect() {
        let navigator = RecordingNavigator::at("?statuses=A&statuses=B");
        let mut controller = FilterStateController::new(all_widgets(), navigator.clone());

        let outcome = controller.initialize();

        assert_eq!(outcome.phase, ControllerPhase::AwaitingUserAction);
        assert_eq!(
            widget_set_calls(&controller, FilterKey::Statuses),
            vec![vec!["A".to_string(), "B".to_string()]]
        );
        assert!(navigator.navigations.borrow().is_empty());
    }

    #[test]
    fn test_url_values_set_on_each_widget_only_when_present() {
        let navigator = RecordingNavigator::at("?brands=A&shops=C&statuses=X");
        let mut controller = FilterStateController::new(all_widgets(), navigator);
        controller.initialize();

        assert_eq!(
            widget_set_calls(&controller, FilterKey::Brands),
            vec![vec!["A".to_string()]]
        );
        assert_eq!(
            widget_set_calls(&controller, FilterKey::Shops),
            vec![vec!["C".to_string()]]
        );
        assert!(widget_set_calls(&controller, FilterKey::Platforms).is_empty());
    }

    #[test]
    fn test_missing_statuses_redirects_once_with_defaults() {
        let navigator = RecordingNavigator::at("?start=2024-01-01&end=2024-01-31&brands=A");
        let mut controller = FilterStateController::new(all_widgets(), navigator.clone());

        let outcome = controller.initialize();

        assert_eq!(outcome.phase, ControllerPhase::AutoRedirecting);
        let navigations = navigator.navigations.borrow();
        assert_eq!(navigations.len(), 1);

        let target = QueryParams::parse(&navigations[0]);
        assert_eq!(target.get("start"), Some("2024-01-01"));
        assert_eq!(target.get("end"), Some("2024-01-31"));
        assert_eq!(target.get_all("brands"), vec!["A"]);
        assert_eq!(target.get_all("statuses"), vec!["Đang xử lý", "Đang giao"]);
        assert!(!target.has("platforms"));
        assert_eq!(
            widget_set_calls(&controller, FilterKey::Statuses),
            vec![vec!["Đang xử lý".to_string(), "Đang giao".to_string()]]
        );
    }

    #[test]
    fn test_no_redirect_after_redirect() {
        let navigator = RecordingNavigator::at("");
        let mut controller = FilterStateController::new(all_widgets(), navigator.clone());
        controller.initialize();

        assert_eq!(
            controller.apply_filters(),
            Err(ControllerError::AlreadyNavigated)
        );
        assert_eq!(controller.initialize().phase, ControllerPhase::AutoRedirecting);
        assert_eq!(navigator.navigations.borrow().len(), 1);
    }

    #[test]
    fn test_empty_default_does_not_redirect() {
        let navigator = RecordingNavigator::at("?start=2024-01-01");
        let mut widgets = all_widgets();
        widgets.statuses = Some(MockWidget::with_options(&["Đã hủy", "Hoàn thành công"]));
        let mut controller = FilterStateController::new(widgets, navigator.clone());

        let outcome = controller.initialize();

        assert_eq!(outcome.phase, ControllerPhase::AwaitingUserAction);
        assert!(!outcome.reset_enabled);
        assert!(navigator.navigations.borrow().is_empty());
    }

    #[test]
    fn test_missing_widgets_are_skipped_independently() {
        let navigator = RecordingNavigator::at("?brands=A&platforms=P&statuses=S");
        let widgets = FilterWidgets {
            brands: None,
            platforms: Some(MockWidget::with_options(&["P"])),
            shops: None,
            statuses: None,
        };
        let mut controller = FilterStateController::new(widgets, navigator);

        let outcome = controller.initialize();

        assert_eq!(outcome.phase, ControllerPhase::AwaitingUserAction);
        assert_eq!(
            widget_set_calls(&controller, FilterKey::Platforms),
            vec![vec!["P".to_string()]]
        );
    }

    #[test]
    fn test_apply_reflects_exact_widget_state() {
        let navigator = RecordingNavigator::at("?start=2024-01-01&statuses=Old&tab=1");
        let widgets = FilterWidgets {
            brands: Some(MockWidget::with_value(WidgetValue::Multiple(vec![
                "A".to_string(),
                "B".to_string(),
            ]))),
            platforms: Some(MockWidget::with_value(WidgetValue::Multiple(vec![]))),
            shops: Some(MockWidget::with_value(WidgetValue::Single("C".to_string()))),
            statuses: Some(MockWidget::with_options(&[])),
        };
        let mut controller = FilterStateController::new(widgets, navigator.clone());
        controller.initialize();
        *controller.widgets.statuses.as_ref().unwrap().value.borrow_mut() =
            WidgetValue::Multiple(vec!["D".to_string()]);

        controller.apply_filters().unwrap();

        let navigations = navigator.navigations.borrow();
        assert_eq!(navigations.len(), 1);
        assert_eq!(
            navigations[0],
            "start=2024-01-01&tab=1&brands=A&brands=B&shops=C&statuses=D"
        );
        assert_eq!(controller.phase(), ControllerPhase::Navigated);
    }

    #[test]
    fn test_apply_before_initialize_is_rejected() {
        let navigator = RecordingNavigator::at("?statuses=A");
        let mut controller = FilterStateController::new(all_widgets(), navigator.clone());
        assert_eq!(
            controller.apply_filters(),
            Err(ControllerError::NotInitialized)
        );
        assert!(navigator.navigations.borrow().is_empty());
    }

    #[test]
    fn test_reset_keeps_only_dates() {
        let navigator =
            RecordingNavigator::at("?start=2024-01-01&end=2024-01-31&brands=Nike&statuses=Done");
        let mut controller = FilterStateController::new(all_widgets(), navigator.clone());
        assert!(controller.initialize().reset_enabled);

        controller.reset_filters().unwrap();

        let navigations = navigator.navigations.borrow();
        assert_eq!(navigations.as_slice(), &["start=2024-01-01&end=2024-01-31"]);
        drop(navigations);
        assert_eq!(
            controller.reset_filters(),
            Err(ControllerError::AlreadyNavigated)
        );
    }

    #[test]
    fn test_reset_enablement_follows_url() {
        let mut enabled = FilterStateController::new(
            all_widgets(),
            RecordingNavigator::at("?platforms=Shopee&statuses=A"),
        );
        assert!(enabled.initialize().reset_enabled);

        let navigator = RecordingNavigator::at("?start=2024-01-01&end=2024-01-02");
        let mut disabled = FilterStateController::new(
            FilterWidgets::<MockWidget>::default(),
            navigator.clone(),
        );
        let outcome = disabled.initialize();
        assert!(!outcome.reset_enabled);
        assert_eq!(disabled.reset_filters(), Err(ControllerError::ResetDisabled));
        assert!(navigator.navigations.borrow().is_empty());
    }

    #[test]
    fn test_single_empty_widget_value_is_no_selection() {
        assert!(WidgetValue::Single(String::new()).into_selection().is_empty());
        assert_eq!(
            WidgetValue::Multiple(vec!["A".into(), "A".into()])
                .into_selection()
                .values(),
            &["A"]
        );
    }

    #[test]
    fn test_apply_drops_keys_of_missing_widgets() {
        let navigator =
            RecordingNavigator::at("?start=2024-01-01&brands=Old&platforms=Shopee&statuses=S");
        let widgets = FilterWidgets {
            brands: None,
            platforms: None,
            shops: Some(MockWidget::with_options(&["C"])),
            statuses: Some(MockWidget::with_options(&["S"])),
        };
        let mut controller = FilterStateController::new(widgets, navigator.clone());
        controller.initialize();
        *controller.widgets.shops.as_ref().unwrap().value.borrow_mut() =
            WidgetValue::Single("C".to_string());

        controller.apply_filters().unwrap();

        let navigations = navigator.navigations.borrow();
        assert_eq!(navigations.as_slice(), &["start=2024-01-01&shops=C&statuses=S"]);
    }

    #[test]
    fn test_redirect_with_missing_brand_widget() {
        let navigator = RecordingNavigator::at("?brands=A&shops=C");
        let mut widgets = all_widgets();
        widgets.brands = None;
        let mut controller = FilterStateController::new(widgets, navigator.clone());

        let outcome = controller.initialize();

        assert_eq!(outcome.phase, ControllerPhase::AutoRedirecting);
        let navigations = navigator.navigations.borrow();
        assert_eq!(navigations.len(), 1);
        let target = QueryParams::parse(&navigations[0]);
        assert!(!target.has("brands"));
        assert_eq!(target.get_all("shops"), vec!["C"]);
        assert_eq!(target.get_all("statuses"), vec!["Đang xử lý", "Đang giao"]);
    }

    #[test]
    fn test_duplicate_url_values_are_set_once() {
        let navigator = RecordingNavigator::at("?brands=A&brands=A&brands=B&statuses=S");
        let mut controller = FilterStateController::new(all_widgets(), navigator);
        controller.initialize();

        assert_eq!(
            widget_set_calls(&controller, FilterKey::Brands),
            vec![vec!["A".to_string(), "B".to_string()]]
        );
    }
}
