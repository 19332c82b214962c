use std::any::{self, Any};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{Month, Weekday};
use serde_json::Number;

/// A value of unknown concrete type.
///
/// It is implemented for every `'static` type that implements `Debug`, and so callers can pass
/// almost anything as `&dyn Value`.  `Debug` is required because error messages render the
/// offending value.
pub trait Value: Any + fmt::Debug {
    fn as_any(&self) -> &dyn Any;

    fn type_name(&self) -> &'static str;
}

impl<T> Value for T
where
    T: Any + fmt::Debug,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// The concrete representation of a value, as far as integer conversion is concerned.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Shape<'a> {
    /// A plain machine integer (or a calendar ordinal), which takes the fast path.
    Int(isize),
    Signed(i128),
    Unsigned(u128),
    F32(f32),
    F64(f64),
    Str(&'a str, &'static str),
    Number(&'a Number),
    Bool(bool),
    Nil,
    Other(&'a dyn Value),
}

impl<'a> Shape<'a> {
    pub(crate) fn of(value: &'a dyn Value) -> Self {
        let Some(value) = indirect(value) else {
            return Self::Nil;
        };
        let any = value.as_any();

        macro_rules! match_type {
            ($type:ty, |$v:ident| $shape:expr $(,)?) => {
                match downcast::<$type>(any) {
                    Some(Some($v)) => return $shape,
                    Some(None) => return Self::Nil,
                    None => {}
                }
            };
        }

        // Check the plain integer types first, since they are the common case.
        match_type!(isize, |v| Self::Int(*v));
        match_type!(Weekday, |v| Self::Int(v.num_days_from_sunday() as isize));
        match_type!(Month, |v| Self::Int(v.number_from_month() as isize));

        match_type!(i8, |v| Self::Signed(*v as i128));
        match_type!(i16, |v| Self::Signed(*v as i128));
        match_type!(i32, |v| Self::Signed(*v as i128));
        match_type!(i64, |v| Self::Signed(*v as i128));
        match_type!(i128, |v| Self::Signed(*v));
        match_type!(u8, |v| Self::Unsigned(*v as u128));
        match_type!(u16, |v| Self::Unsigned(*v as u128));
        match_type!(u32, |v| Self::Unsigned(*v as u128));
        match_type!(u64, |v| Self::Unsigned(*v as u128));
        match_type!(u128, |v| Self::Unsigned(*v));
        match_type!(usize, |v| Self::Unsigned(*v as u128));
        match_type!(f32, |v| Self::F32(*v));
        match_type!(f64, |v| Self::F64(*v));

        match_type!(String, |v| Self::Str(v, any::type_name::<String>()));
        match_type!(&'static str, |v| Self::Str(v, any::type_name::<&str>()));
        match_type!(Box<str>, |v| Self::Str(v, any::type_name::<Box<str>>()));
        match_type!(Cow<'static, str>, |v| {
            Self::Str(v, any::type_name::<Cow<str>>())
        });

        match_type!(Number, |v| Self::Number(v));
        match_type!(serde_json::Value, |v| match v {
            serde_json::Value::Null => Self::Nil,
            serde_json::Value::Bool(v) => Self::Bool(*v),
            serde_json::Value::Number(v) => Self::Number(v),
            serde_json::Value::String(v) => Self::Str(v, any::type_name::<serde_json::Value>()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Self::Other(value),
        });

        match_type!(bool, |v| Self::Bool(*v));
        match_type!((), |_v| Self::Nil);

        Self::Other(value)
    }
}

/// Strips away the pointer types that wrap a `dyn Value`.
///
/// It returns `None` when it reaches an absent value.
fn indirect(mut value: &dyn Value) -> Option<&dyn Value> {
    loop {
        let any = value.as_any();
        value = if let Some(v) = downcast::<Box<dyn Value>>(any) {
            &**v?
        } else if let Some(v) = downcast::<Rc<dyn Value>>(any) {
            &**v?
        } else if let Some(v) = downcast::<Arc<dyn Value>>(any) {
            &**v?
        } else if let Some(v) = downcast::<&'static dyn Value>(any) {
            *v?
        } else {
            return Some(value);
        };
    }
}

/// Downcasts to `T`, seeing through up to `MAX_LAYERS` pointer types (`Box`, `Rc`, `Arc`,
/// `&'static`, and `Option`) that wrap a `T`.
///
/// It returns `Some(None)` when one of the layers is a `None`.
fn downcast<T: Any>(any: &dyn Any) -> Option<Option<&T>> {
    MAX_LAYERS.downcast(any)
}

// `dyn Value` pointers are unwrapped by `indirect` without limit, and so this only bounds runs of
// concrete pointer types, as in `Box<Option<Rc<T>>>`.
const MAX_LAYERS: Wrapped<Wrapped<Wrapped<Bare>>> = Wrapped(Wrapped(Wrapped(Bare)));

//
// Rust cannot name "any number of layers", and so we count layers at the type level.  Each layer
// multiplies the number of candidate types by the number of pointer types.
//

trait Layers: Copy {
    fn downcast<T: Any>(self, any: &dyn Any) -> Option<Option<&T>>;
}

#[derive(Clone, Copy)]
struct Bare;

#[derive(Clone, Copy)]
struct Wrapped<L>(L);

impl Layers for Bare {
    fn downcast<T: Any>(self, any: &dyn Any) -> Option<Option<&T>> {
        any.downcast_ref::<T>().map(Some)
    }
}

impl<L> Layers for Wrapped<L>
where
    L: Layers,
{
    fn downcast<T: Any>(self, any: &dyn Any) -> Option<Option<&T>> {
        let Self(inner) = self;
        if let Some(v) = any.downcast_ref::<T>() {
            Some(Some(v))
        } else if let Some(v) = inner.downcast::<Box<T>>(any) {
            Some(v.map(|v| &**v))
        } else if let Some(v) = inner.downcast::<Rc<T>>(any) {
            Some(v.map(|v| &**v))
        } else if let Some(v) = inner.downcast::<Arc<T>>(any) {
            Some(v.map(|v| &**v))
        } else if let Some(v) = inner.downcast::<&'static T>(any) {
            Some(v.copied())
        } else {
            inner
                .downcast::<Option<T>>(any)
                .map(|v| v.and_then(Option::as_ref))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name() {
        assert_eq!(1i32.type_name(), "i32");
        assert_eq!("x".type_name(), "&str");
        assert_eq!(String::new().type_name(), "alloc::string::String");

        let boxed: Box<dyn Value> = Box::new(1u8);
        assert_eq!((*boxed).type_name(), "u8");
    }

    #[test]
    fn shape() {
        assert!(matches!(Shape::of(&1isize), Shape::Int(1)));
        assert!(matches!(Shape::of(&Weekday::Sun), Shape::Int(0)));
        assert!(matches!(Shape::of(&Weekday::Sat), Shape::Int(6)));
        assert!(matches!(Shape::of(&Month::January), Shape::Int(1)));
        assert!(matches!(Shape::of(&Month::December), Shape::Int(12)));

        assert!(matches!(Shape::of(&-1i8), Shape::Signed(-1)));
        assert!(matches!(Shape::of(&-1i64), Shape::Signed(-1)));
        assert!(matches!(Shape::of(&1u16), Shape::Unsigned(1)));
        assert!(matches!(Shape::of(&1usize), Shape::Unsigned(1)));
        assert!(matches!(Shape::of(&1.5f32), Shape::F32(v) if v == 1.5));
        assert!(matches!(Shape::of(&1.5f64), Shape::F64(v) if v == 1.5));

        assert!(matches!(Shape::of(&"x"), Shape::Str("x", "&str")));
        assert!(matches!(
            Shape::of(&"x".to_string()),
            Shape::Str("x", "alloc::string::String"),
        ));
        assert!(matches!(Shape::of(&Cow::Borrowed("x")), Shape::Str("x", _)));
        assert!(matches!(
            Shape::of(&Box::<str>::from("x")),
            Shape::Str("x", _),
        ));

        assert!(matches!(Shape::of(&true), Shape::Bool(true)));
        assert!(matches!(Shape::of(&()), Shape::Nil));
        assert!(matches!(Shape::of(&None::<i32>), Shape::Nil));

        assert!(matches!(Shape::of(&vec![1u8]), Shape::Other(_)));
        assert!(matches!(Shape::of(&'c'), Shape::Other(_)));
    }

    #[test]
    fn shape_json() {
        let number = Number::from(42);
        assert!(matches!(Shape::of(&number), Shape::Number(n) if n == &number));

        assert!(matches!(Shape::of(&serde_json::json!(null)), Shape::Nil));
        assert!(matches!(
            Shape::of(&serde_json::json!(true)),
            Shape::Bool(true),
        ));
        assert!(matches!(
            Shape::of(&serde_json::json!(42)),
            Shape::Number(n) if n == &number,
        ));
        assert!(matches!(
            Shape::of(&serde_json::json!("x")),
            Shape::Str("x", _),
        ));
        assert!(matches!(
            Shape::of(&serde_json::json!([1])),
            Shape::Other(v) if v.type_name() == "serde_json::value::Value",
        ));
    }

    #[test]
    fn shape_indirect() {
        assert!(matches!(Shape::of(&Box::new(1i32)), Shape::Signed(1)));
        assert!(matches!(Shape::of(&Rc::new(1i32)), Shape::Signed(1)));
        assert!(matches!(Shape::of(&Arc::new(1i32)), Shape::Signed(1)));
        assert!(matches!(Shape::of(&Some(1i32)), Shape::Signed(1)));
        static ONE: i32 = 1;
        assert!(matches!(Shape::of(&&ONE), Shape::Signed(1)));

        let boxed: Box<dyn Value> = Box::new(1isize);
        assert!(matches!(Shape::of(&boxed), Shape::Int(1)));
        let nested: Box<dyn Value> = Box::new(Arc::new(boxed) as Arc<dyn Value>);
        assert!(matches!(Shape::of(&nested), Shape::Int(1)));
        let rc: Rc<dyn Value> = Rc::new("x");
        assert!(matches!(Shape::of(&rc), Shape::Str("x", _)));

        assert!(matches!(Shape::of(&None::<Box<dyn Value>>), Shape::Nil));
        assert!(matches!(
            Shape::of(&Some(Box::new(true) as Box<dyn Value>)),
            Shape::Bool(true),
        ));
    }

    #[test]
    fn shape_indirect_nested() {
        assert!(matches!(
            Shape::of(&Box::new(Box::new(7i32))),
            Shape::Signed(7),
        ));
        assert!(matches!(Shape::of(&Some(Box::new(7i32))), Shape::Signed(7)));
        assert!(matches!(Shape::of(&Rc::new(Some(7i32))), Shape::Signed(7)));
        assert!(matches!(Shape::of(&Rc::new(None::<i32>)), Shape::Nil));
        assert!(matches!(
            Shape::of(&Box::new(Some(Arc::new("x")))),
            Shape::Str("x", "&str"),
        ));
        assert!(matches!(
            Shape::of(&Box::new(Box::new(Box::new(7u8)))),
            Shape::Unsigned(7),
        ));
        // Runs of concrete pointer types longer than `MAX_LAYERS` are not unwrapped.
        assert!(matches!(
            Shape::of(&Box::new(Box::new(Box::new(Box::new(7u8))))),
            Shape::Other(_),
        ));

        assert!(matches!(
            Shape::of(&Some(Rc::new(7i32) as Rc<dyn Value>)),
            Shape::Signed(7),
        ));
        assert!(matches!(
            Shape::of(&Some(Arc::new(7i32) as Arc<dyn Value>)),
            Shape::Signed(7),
        ));
        static SEVEN: i32 = 7;
        assert!(matches!(
            Shape::of(&Some(&SEVEN as &'static dyn Value)),
            Shape::Signed(7),
        ));
        assert!(matches!(Shape::of(&None::<Rc<dyn Value>>), Shape::Nil));

        let boxed: Box<Box<dyn Value>> = Box::new(Box::new(7i32));
        assert!(matches!(Shape::of(&boxed), Shape::Signed(7)));

        // Chains through `dyn Value` pointers are unwrapped without limit.
        let mut value: Box<dyn Value> = Box::new(Box::new(7i32));
        for _ in 0..10 {
            value = Box::new(Some(Rc::new(value)));
        }
        assert!(matches!(Shape::of(&value), Shape::Signed(7)));
    }
}
