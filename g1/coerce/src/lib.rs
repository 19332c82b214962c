//! Coerces values of unknown type into signed integers.
//!
//! This is mostly used for configuration values and user inputs, where an integer may arrive as
//! an integer of another width, a float, a string (`"42"`, `"0x2a"`), a boolean, or nothing.

pub mod de;

mod error;
mod holder;
mod int;
mod string;
mod value;

pub use crate::error::Error;
pub use crate::holder::IntHolder;
pub use crate::int::{Signed, int, parse};
pub use crate::string::string;
pub use crate::value::Value;

//
// Implementer's Notes:
//
// * Conversion dispatches on the concrete type behind `&dyn Value`, in this order (the first match
//   wins):
//
//   | Concrete type                                  | Result                         |
//   |------------------------------------------------|--------------------------------|
//   | (nested) Box/Rc/Arc/&'static/Option wrappers   | the wrapped value, or nil      |
//   | isize, chrono::Weekday, chrono::Month          | cast (fast path)               |
//   | i8..i128, u8..u128, usize, f32, f64            | cast                           |
//   | String, &str, Box<str>, Cow<str>               | parsed as i64, then cast       |
//   | serde_json::Number                             | parsed from its string form    |
//   | serde_json::Value                              | by variant                     |
//   | bool                                           | 1 or 0                         |
//   | (), None                                       | 0                              |
//   | anything else                                  | error                          |
//
// * Casts follow `as` semantics; we do not range check.
//
