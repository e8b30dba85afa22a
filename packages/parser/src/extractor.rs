use serde::{Deserialize, Serialize};

/// How a binding propagates: `[[...]]` reads only, `{{...}}` also writes
/// back to the bound path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingType {
    OneWay,
    TwoWay,
}

/// One span of an attribute value or text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BindingPart {
    Literal {
        text: String,
    },
    Binding {
        binding_type: BindingType,
        text: String,
    },
}

impl BindingPart {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into() }
    }

    pub fn binding(binding_type: BindingType, text: impl Into<String>) -> Self {
        Self::Binding {
            binding_type,
            text: text.into(),
        }
    }
}

/// Classification of a whole attribute value or text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    /// No bindings at all.
    TextOnly,
    /// Exactly one binding and nothing else, not even whitespace.
    SingleBinding,
    /// Bindings mixed with literals, or more than one binding.
    MultiBinding,
}

/// A raw value split into literal and binding spans, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedValue {
    pub parts: Vec<BindingPart>,
}

impl ExtractedValue {
    pub fn kind(&self) -> ValueKind {
        let binding_count = self.bindings().count();
        if binding_count == 0 {
            ValueKind::TextOnly
        } else if binding_count == 1 && self.parts.len() == 1 {
            ValueKind::SingleBinding
        } else {
            ValueKind::MultiBinding
        }
    }

    /// The lone binding, when the value is nothing but that binding.
    pub fn single_binding(&self) -> Option<(BindingType, &str)> {
        match self.parts.as_slice() {
            [BindingPart::Binding { binding_type, text }] => Some((*binding_type, text)),
            _ => None,
        }
    }

    /// All binding spans in source order.
    pub fn bindings(&self) -> impl Iterator<Item = (BindingType, &str)> {
        self.parts.iter().filter_map(|part| match part {
            BindingPart::Binding { binding_type, text } => Some((*binding_type, text.as_str())),
            BindingPart::Literal { .. } => None,
        })
    }

    pub fn is_whitespace_only(&self) -> bool {
        self.parts
            .iter()
            .all(|part| matches!(part, BindingPart::Literal { text } if text.trim().is_empty()))
    }
}

/// Split a raw value into literal and binding parts.
///
/// A binding opens at the earliest `[[` or `{{` that has a matching close
/// and runs to the first close after it. An opener with no close is
/// literal text.
pub fn extract_binding_parts(raw: &str) -> ExtractedValue {
    let mut parts = Vec::new();
    let mut rest = raw;
    loop {
        match next_binding(rest) {
            Some((start, close, binding_type)) => {
                if start > 0 {
                    parts.push(BindingPart::literal(&rest[..start]));
                }
                parts.push(BindingPart::binding(binding_type, &rest[start + 2..close]));
                rest = &rest[close + 2..];
            }
            None => {
                if !rest.is_empty() || parts.is_empty() {
                    parts.push(BindingPart::literal(rest));
                }
                return ExtractedValue { parts };
            }
        }
    }
}

fn next_binding(text: &str) -> Option<(usize, usize, BindingType)> {
    let one_way = delimited_span(text, "[[", "]]", BindingType::OneWay);
    let two_way = delimited_span(text, "{{", "}}", BindingType::TwoWay);
    match (one_way, two_way) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (span, None) | (None, span) => span,
    }
}

fn delimited_span(
    text: &str,
    open: &str,
    close: &str,
    binding_type: BindingType,
) -> Option<(usize, usize, BindingType)> {
    let start = text.find(open)?;
    let end = text[start + 2..].find(close)?;
    Some((start, start + 2 + end, binding_type))
}
