/// Attributes that exist on every element and have no property reflection
/// usable for type checking, so bindings to them set the attribute.
const GLOBAL_ATTRIBUTES: &[&str] = &[
    "class", "style", "id", "slot", "part", "role", "title", "tabindex",
];

fn tag_attributes(tag_name: &str) -> &'static [&'static str] {
    match tag_name {
        "a" => &["href", "target", "rel", "download"],
        "img" => &["src", "srcset", "alt"],
        "iframe" => &["src", "allow", "sandbox"],
        "input" => &["type"],
        "label" => &["for"],
        "td" | "th" => &["colspan", "rowspan"],
        _ => &[],
    }
}

/// Whether a bound attribute should be lowered to `setAttribute` instead
/// of an element property assignment.
pub fn is_html_attribute(tag_name: &str, attribute: &str) -> bool {
    attribute.starts_with("aria-")
        || attribute.starts_with("data-")
        || GLOBAL_ATTRIBUTES.contains(&attribute)
        || tag_attributes(tag_name).contains(&attribute)
}
