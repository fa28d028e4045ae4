use sarthi_orders::Order;

use crate::line_items::title_case;

/// One-line human description of an order, e.g.
/// `"Custom Suit in Wool (Navy Blue Color) - Quantity: 2"`.
pub fn describe_order(order: &Order) -> String {
    let mut parts = vec![format!("Custom {}", title_case(&order.order_type))];

    if let Some(fabric) = order.fabric.as_deref().filter(|f| !f.is_empty()) {
        parts.push(format!("in {}", title_case(fabric)));
    }
    if let Some(color) = order.color.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("({} Color)", title_case(color)));
    }
    if order.quantity > 1 {
        parts.push(format!("- Quantity: {}", order.quantity));
    }
    if has_measurements(order.measurements.as_deref()) {
        parts.push("- Custom fitted with provided measurements".to_string());
    }

    parts.join(" ")
}

/// True when the raw text is JSON holding at least one value; malformed JSON
/// counts as no measurements.
fn has_measurements(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => !map.is_empty(),
        Ok(serde_json::Value::Array(values)) => !values.is_empty(),
        Ok(serde_json::Value::String(s)) => !s.is_empty(),
        Ok(serde_json::Value::Null) | Ok(serde_json::Value::Bool(false)) => false,
        Ok(_) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sarthi_core::CustomerId;

    #[test]
    fn full_description() {
        let order = Order::new(CustomerId::new(), "A", "suit", 2, 8500.0)
            .with_fabric("wool")
            .with_color("navy blue")
            .with_measurements(r#"{"chest": "42", "waist": "36"}"#);
        assert_eq!(
            describe_order(&order),
            "Custom Suit in Wool (Navy Blue Color) - Quantity: 2 - Custom fitted with provided measurements"
        );
    }

    #[test]
    fn minimal_description() {
        let order = Order::new(CustomerId::new(), "A", "kurta", 1, 900.0);
        assert_eq!(describe_order(&order), "Custom Kurta");
    }

    #[test]
    fn empty_or_broken_measurements_are_ignored() {
        for raw in ["{}", "[]", "null", "not json"] {
            let order = Order::new(CustomerId::new(), "A", "shirt", 1, 900.0).with_measurements(raw);
            assert_eq!(describe_order(&order), "Custom Shirt", "{raw}");
        }
    }
}
