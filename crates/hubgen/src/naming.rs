// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identifier conventions of the generated module.

/// Drop the generic arity suffix: ``Page`1`` becomes `Page`.
pub fn strip_arity(name: &str) -> &str {
    name.find('`').map_or(name, |i| &name[..i])
}

/// Artifact name of a hub interface: `IOrderHub` becomes `OrderHub`.
///
/// The prefix is only dropped when an upper-case letter follows, so
/// `Inventory` stays `Inventory`.
pub fn artifact_name(interface_name: &str) -> String {
    let name = strip_arity(interface_name);
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some('I'), Some(next)) if next.is_uppercase() => name[1..].to_string(),
        _ => name.to_string(),
    }
}

pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Dispatcher field of a callback: `orderConfirmed` becomes `onOrderConfirmed`.
pub fn dispatcher_field(callback: &str) -> String {
    format!("on{}", upper_first(callback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("IOrderHub"), "OrderHub");
        assert_eq!(artifact_name("IOrderClient"), "OrderClient");
        assert_eq!(artifact_name("Inventory"), "Inventory");
        assert_eq!(artifact_name("OrderHub"), "OrderHub");
        assert_eq!(artifact_name("I"), "I");
        assert_eq!(artifact_name("IFeed`1"), "Feed");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(upper_first("orderConfirmed"), "OrderConfirmed");
        assert_eq!(lower_first("PlaceOrder"), "placeOrder");
        assert_eq!(lower_first(""), "");
        assert_eq!(dispatcher_field("orderConfirmed"), "onOrderConfirmed");
        assert_eq!(strip_arity("Page`1"), "Page");
        assert_eq!(strip_arity("Order"), "Order");
    }
}
