use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiFormat {
    /// Whole đồng with thousand separators
    Money,
    Integer,
}

fn format_value(val: f64, fmt: KpiFormat) -> String {
    match fmt {
        KpiFormat::Money => format_money(val),
        KpiFormat::Integer => format_thousands(val.round() as i64),
    }
}

/// Rounded amount in đồng: 1234.6 -> "1.235 đ"
pub fn format_money(val: f64) -> String {
    format!("{} đ", format_thousands(val.round() as i64))
}

/// Groups digits with dots: 1234567 -> "1.234.567"
pub fn format_thousands(n: i64) -> String {
    let s = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

pub fn growth_class(pct: f64) -> (&'static str, &'static str) {
    if pct > 0.5 {
        ("\u{2191}", "kpi-card__change kpi-card__change--up")
    } else if pct < -0.5 {
        ("\u{2193}", "kpi-card__change kpi-card__change--down")
    } else {
        ("", "kpi-card__change kpi-card__change--flat")
    }
}

#[component]
pub fn KpiCard(
    /// Label displayed above the value
    label: &'static str,
    /// Value (None while loading)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: KpiFormat,
    /// Change % relative to the previous period
    #[prop(into)]
    change_percent: Signal<Option<f64>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_value(v, format),
        None => "—".to_string(),
    };

    let change_view = move || {
        change_percent.get().map(|pct| {
            let (arrow, cls) = growth_class(pct);
            let text = format!("{}{:.1}%", arrow, pct.abs());
            view! { <span class=cls>{text}</span> }
        })
    };

    view! {
        <div class="kpi-card">
            <div class="kpi-card__label">{label}</div>
            <div class="kpi-card__value">
                {formatted}
                {change_view}
            </div>
        </div>
    }
}
