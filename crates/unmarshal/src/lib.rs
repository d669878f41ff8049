//! Populates typed records by running path selectors against a JSON document.
//!
//! A destination type implements [`Unmarshal`] to declare, once, which
//! selector feeds each field. Scalar fields take the first result and
//! sequence fields take every result; each value is type-checked before it is
//! written. For records whose shape is only known at runtime, see
//! [`RecordSchema`].

pub mod error;
pub mod fields;
pub mod schema;
pub mod value;

pub use error::UnmarshalError;
pub use fields::{FieldBinding, Fields, Unmarshal};
pub use schema::{FieldType, RecordSchema, SchemaField};
pub use value::{FromValue, type_name};

use jsonsel_jpath::Document;
use log::debug;

/// Fills `dest` from `doc`, field by field in declaration order.
///
/// Stops at the first error, in which case the contents of `dest` are
/// unspecified.
pub fn unmarshal<T: Unmarshal>(doc: &Document, dest: &mut T) -> Result<(), UnmarshalError> {
    for binding in T::fields().iter() {
        let results = doc.try_query(binding.selector())?;
        debug!(
            "Field '{}' ({}) matched {} value(s)",
            binding.name(),
            binding.selector(),
            results.len()
        );
        binding.assign(dest, &results)?;
    }
    Ok(())
}

/// Decodes `data` and fills `dest` from it.
pub fn unmarshal_slice<T: Unmarshal>(data: &[u8], dest: &mut T) -> Result<(), UnmarshalError> {
    let doc = Document::from_slice(data)?;
    unmarshal(&doc, dest)
}

/// Builds a new `T` from its default value and `doc`.
pub fn from_document<T: Unmarshal + Default>(doc: &Document) -> Result<T, UnmarshalError> {
    let mut dest = T::default();
    unmarshal(doc, &mut dest)?;
    Ok(dest)
}
