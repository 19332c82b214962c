use crate::value::{Shape, Value};

/// Renders a value of unknown type as text.
///
/// Scalars are rendered with `Display`, absent values as the empty string, and anything else
/// with `Debug`.
pub fn string(value: &dyn Value) -> String {
    match Shape::of(value) {
        Shape::Int(v) => v.to_string(),
        Shape::Signed(v) => v.to_string(),
        Shape::Unsigned(v) => v.to_string(),
        Shape::F32(v) => v.to_string(),
        Shape::F64(v) => v.to_string(),
        Shape::Str(v, _) => v.to_string(),
        Shape::Number(v) => v.to_string(),
        Shape::Bool(v) => v.to_string(),
        Shape::Nil => String::new(),
        Shape::Other(v) => format!("{v:?}"),
    }
}
