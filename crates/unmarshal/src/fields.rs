//! Field bindings: the selector and setter for each field of a destination type.
use crate::error::UnmarshalError;
use crate::value::{FromValue, type_name};
use serde_json::Value;

type Assign<T> = Box<dyn Fn(&mut T, &[&Value]) -> Result<(), UnmarshalError> + Send + Sync>;

/// One field of a destination type: where its value comes from and how to store it.
pub struct FieldBinding<T> {
    name: &'static str,
    selector: &'static str,
    assign: Assign<T>,
}

impl<T> FieldBinding<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn selector(&self) -> &'static str {
        self.selector
    }

    /// Stores `results` into `dest`, checking every value before it is written.
    pub fn assign(&self, dest: &mut T, results: &[&Value]) -> Result<(), UnmarshalError> {
        (self.assign)(dest, results)
    }
}

/// The ordered field bindings of a destination type.
///
/// ```
/// use jsonsel_unmarshal::{Fields, Unmarshal};
///
/// #[derive(Default)]
/// struct Bike {
///     color: String,
///     prices: Vec<f64>,
/// }
///
/// impl Unmarshal for Bike {
///     fn fields() -> Fields<Self> {
///         Fields::<Self>::new()
///             .scalar("color", "$.store.bicycle.color", |b, v| b.color = v)
///             .sequence("prices", "$..price", |b, v| b.prices = v)
///     }
/// }
/// ```
pub struct Fields<T> {
    bindings: Vec<FieldBinding<T>>,
}

impl<T: 'static> Fields<T> {
    /// Setter closures cannot name `T` themselves, so spell it out:
    /// `Fields::<Self>::new()`.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Binds a field to the first result of `selector`. No result is an error.
    pub fn scalar<V: FromValue + 'static>(
        self,
        name: &'static str,
        selector: &'static str,
        setter: fn(&mut T, V),
    ) -> Self {
        let assign: Assign<T> = Box::new(move |dest, results| {
            let first = results.first().ok_or_else(|| UnmarshalError::NotFound {
                field: name.to_string(),
                selector: selector.to_string(),
            })?;
            setter(dest, convert(name, first)?);
            Ok(())
        });
        self.bind(name, selector, assign)
    }

    /// Like [`Fields::scalar`], but leaves the field untouched when nothing matches.
    pub fn scalar_opt<V: FromValue + 'static>(
        self,
        name: &'static str,
        selector: &'static str,
        setter: fn(&mut T, V),
    ) -> Self {
        let assign: Assign<T> = Box::new(move |dest, results| {
            if let Some(first) = results.first() {
                setter(dest, convert(name, first)?);
            }
            Ok(())
        });
        self.bind(name, selector, assign)
    }

    /// Binds a field to every result of `selector`, converted element by element.
    pub fn sequence<V: FromValue + 'static>(
        self,
        name: &'static str,
        selector: &'static str,
        setter: fn(&mut T, Vec<V>),
    ) -> Self {
        let assign: Assign<T> = Box::new(move |dest, results| {
            let values = results
                .iter()
                .enumerate()
                .map(|(i, value)| convert(&format!("{}[{}]", name, i), value))
                .collect::<Result<Vec<V>, _>>()?;
            setter(dest, values);
            Ok(())
        });
        self.bind(name, selector, assign)
    }

    fn bind(mut self, name: &'static str, selector: &'static str, assign: Assign<T>) -> Self {
        self.bindings.push(FieldBinding {
            name,
            selector,
            assign,
        });
        self
    }
}

impl<T> Fields<T> {
    pub fn iter(&self) -> impl Iterator<Item = &FieldBinding<T>> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<T: 'static> Default for Fields<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn convert<V: FromValue>(field: &str, value: &Value) -> Result<V, UnmarshalError> {
    V::from_value(value).ok_or_else(|| UnmarshalError::TypeMismatch {
        field: field.to_string(),
        found: type_name(value),
        expected: V::EXPECTED,
    })
}

/// A type whose fields are filled by running selectors against a document.
pub trait Unmarshal: Sized + 'static {
    fn fields() -> Fields<Self>;
}
