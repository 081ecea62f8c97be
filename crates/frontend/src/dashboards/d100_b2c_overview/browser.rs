//! Browser bindings for the filter controller: VirtualSelect widgets and
//! `window.location`.

use contracts::dashboards::d100_b2c_overview::{FilterKey, SelectOption};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Element};

use super::controller::{MultiSelectWidget, Navigator, WidgetValue};

/// Handle to a VirtualSelect instance mounted on a page element
pub struct VirtualSelectWidget {
    element: Element,
}

impl VirtualSelectWidget {
    /// Initialize the widget for `key` on its element and load `options`.
    ///
    /// Returns None (after logging) when the element or the library is
    /// missing, so one broken widget does not block the others.
    pub fn mount(key: FilterKey, options: &[String]) -> Option<Self> {
        let element = match find_element(key.element_id()) {
            Some(element) => element,
            None => {
                log::warn!("Filter element #{} not found", key.element_id());
                return None;
            }
        };

        if let Err(err) = init_virtual_select(&element, key, options) {
            log::warn!("Failed to init widget #{}: {:?}", key.element_id(), err);
            return None;
        }
        Some(Self { element })
    }

    fn call_method(&self, name: &str, arg: &JsValue) -> Result<JsValue, JsValue> {
        let method: Function = Reflect::get(&self.element, &JsValue::from_str(name))?.dyn_into()?;
        method.call1(&self.element, arg)
    }
}

impl MultiSelectWidget for VirtualSelectWidget {
    fn value(&self) -> WidgetValue {
        let value = match Reflect::get(&self.element, &JsValue::from_str("value")) {
            Ok(value) => value,
            Err(_) => return WidgetValue::Empty,
        };
        if Array::is_array(&value) {
            let values = Array::from(&value)
                .iter()
                .filter_map(|v| v.as_string())
                .collect();
            WidgetValue::Multiple(values)
        } else if let Some(single) = value.as_string() {
            WidgetValue::Single(single)
        } else {
            WidgetValue::Empty
        }
    }

    fn set_value(&self, values: &[String]) {
        let array: Array = values.iter().map(|v| JsValue::from_str(v)).collect();
        if let Err(err) = self.call_method("setValue", &array) {
            log::warn!("setValue failed on #{}: {:?}", self.element.id(), err);
        }
    }

    fn options(&self) -> Vec<SelectOption> {
        let instance = match Reflect::get(&self.element, &JsValue::from_str("virtualSelect")) {
            Ok(instance) if instance.is_object() => instance,
            _ => return Vec::new(),
        };
        let options = match Reflect::get(&instance, &JsValue::from_str("options")) {
            Ok(options) if Array::is_array(&options) => Array::from(&options),
            _ => return Vec::new(),
        };

        options
            .iter()
            .filter_map(|item| {
                let value = Reflect::get(&item, &JsValue::from_str("value"))
                    .ok()?
                    .as_string()?;
                let label = Reflect::get(&item, &JsValue::from_str("label"))
                    .ok()
                    .and_then(|l| l.as_string())
                    .unwrap_or_else(|| value.clone());
                Some(SelectOption { value, label })
            })
            .collect()
    }
}

fn find_element(id: &str) -> Option<Element> {
    window()?.document()?.get_element_by_id(id)
}

fn init_virtual_select(element: &Element, key: FilterKey, options: &[String]) -> Result<(), JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let library = Reflect::get(&window, &JsValue::from_str("VirtualSelect"))?;
    if !library.is_object() {
        return Err(JsValue::from_str("VirtualSelect is not loaded"));
    }
    let init: Function = Reflect::get(&library, &JsValue::from_str("init"))?.dyn_into()?;

    let config = key
        .widget_config()
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let config: Object = config.dyn_into()?;
    Reflect::set(&config, &JsValue::from_str("ele"), element)?;
    Reflect::set(&config, &JsValue::from_str("multiple"), &JsValue::TRUE)?;

    let option_list: Array = options
        .iter()
        .map(|value| {
            SelectOption::new(value.as_str())
                .serialize(&Serializer::json_compatible())
                .unwrap_or(JsValue::NULL)
        })
        .collect();
    Reflect::set(&config, &JsValue::from_str("options"), &option_list)?;

    init.call1(&library, &config)?;
    Ok(())
}

/// Navigator over `window.location`
#[derive(Clone, Copy, Default)]
pub struct LocationNavigator;

impl Navigator for LocationNavigator {
    fn current_search(&self) -> String {
        window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn navigate(&self, search: &str) {
        let Some(window) = window() else {
            log::error!("window not available, cannot navigate");
            return;
        };
        // Assigning `search` reloads the page even when the value is empty
        if let Err(err) = window.location().set_search(search) {
            log::error!("Navigation failed: {:?}", err);
        }
    }
}
