use rig_core::{Part, PartSelection};
use serde_json::Value;

/// Derive the `build` pseudo-category from the chosen parts when the
/// caller did not supply one: `totalPrice` sums part prices, `totalDraw`
/// sums each part's `draw` attribute. Threshold rules compare against
/// these aggregates (`build.totalDraw`, `build.totalPrice`).
pub fn ensure_build_totals(selection: &mut PartSelection) {
    if selection.contains("build") || selection.is_empty() {
        return;
    }

    let mut total_price = 0.0;
    let mut total_draw = 0.0;
    for (_, part) in selection.parts() {
        total_price += part.price;
        total_draw += part.attr("draw").and_then(|v| v.as_f64()).unwrap_or(0.0);
    }

    let mut build = Part {
        name: "build".to_string(),
        brand: None,
        price: total_price,
        attributes: Default::default(),
    };
    build.attributes.insert("totalPrice".to_string(), json_number(total_price));
    build.attributes.insert("totalDraw".to_string(), json_number(total_draw));
    selection.insert("build", build);
}

fn json_number(n: f64) -> Value {
    serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}
