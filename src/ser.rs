//! Request argument serializer
//!
//! Operation arguments are plain `#[derive(Serialize)]` structs. This module
//! flattens such a struct into named string [`Slots`] that a request template
//! substitutes by field name.
//!
//! ## Type mapping
//! - `&str`, `String`, `char`: the text itself
//! - `Option<T>`: `None` becomes the empty string, `Some` the inner value
//! - newtype structs: the inner value
//! - everything else: [`Error::Unsupported`]

use crate::error::{Error, Result};
use serde::ser::{self, Impossible, Serialize};

// ── Public entry points ────────────────────────────────────────────────────

/// Flatten an argument struct into named slots, in field declaration order.
///
/// ```rust
/// use serde::Serialize;
/// use lynx_rpc::ser::to_slots;
///
/// #[derive(Serialize)]
/// struct Lookup<'a> {
///     file_identifier: &'a str,
///     note: Option<String>,
/// }
///
/// let slots = to_slots(&Lookup { file_identifier: "$xOpT", note: None }).unwrap();
/// assert_eq!(slots.get("file_identifier"), Some("$xOpT"));
/// assert_eq!(slots.get("note"), Some(""));
/// ```
pub fn to_slots<T: Serialize + ?Sized>(value: &T) -> Result<Slots> {
    let mut ser = Serializer::default();
    value.serialize(&mut ser)?;
    Ok(ser.slots)
}

/// Named argument values collected from one struct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    entries: Vec<(&'static str, String)>,
}

impl Slots {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

// ── Struct-level serializer ────────────────────────────────────────────────

/// Accepts exactly one struct (or a unit struct for argument-less calls).
#[derive(Default)]
pub struct Serializer {
    slots: Slots,
}

macro_rules! reject {
    ($($method:ident($ty:ty) => $name:literal),* $(,)?) => {
        $(
            fn $method(self, _v: $ty) -> Result<Self::Ok> {
                Err(Error::Unsupported($name))
            }
        )*
    };
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    reject! {
        serialize_bool(bool) => "bool",
        serialize_i8(i8) => "i8",
        serialize_i16(i16) => "i16",
        serialize_i32(i32) => "i32",
        serialize_i64(i64) => "i64",
        serialize_u8(u8) => "u8",
        serialize_u16(u16) => "u16",
        serialize_u32(u32) => "u32",
        serialize_u64(u64) => "u64",
        serialize_f32(f32) => "f32",
        serialize_f64(f64) => "f64",
        serialize_char(char) => "bare char (expected an argument struct)",
        serialize_str(&str) => "bare string (expected an argument struct)",
        serialize_bytes(&[u8]) => "bytes",
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::Unsupported("top-level option"))
    }

    fn serialize_some<T: Serialize + ?Sized>(self, _value: &T) -> Result<()> {
        Err(Error::Unsupported("top-level option"))
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Error::Unsupported("enum"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()> {
        Err(Error::Unsupported("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::Unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::Unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::Unsupported("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::Unsupported("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::Unsupported("map"))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.slots.entries.reserve(len);
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::Unsupported("enum"))
    }
}

impl<'a> ser::SerializeStruct for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        let text = value.serialize(FieldSerializer)?;
        self.slots.entries.push((key, text));
        Ok(())
    }

    fn skip_field(&mut self, key: &'static str) -> Result<()> {
        self.slots.entries.push((key, String::new()));
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

// ── Field-level serializer ─────────────────────────────────────────────────

/// Renders one field value to the text substituted into the template.
struct FieldSerializer;

impl ser::Serializer for FieldSerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    reject! {
        serialize_bool(bool) => "bool",
        serialize_i8(i8) => "i8",
        serialize_i16(i16) => "i16",
        serialize_i32(i32) => "i32",
        serialize_i64(i64) => "i64",
        serialize_u8(u8) => "u8",
        serialize_u16(u16) => "u16",
        serialize_u32(u32) => "u32",
        serialize_u64(u64) => "u64",
        serialize_f32(f32) => "f32",
        serialize_f64(f64) => "f64",
        serialize_bytes(&[u8]) => "bytes",
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    /// Absent optional argument: the backend expects an empty slot
    fn serialize_none(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Ok(String::new())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<String> {
        Err(Error::Unsupported("enum"))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        Err(Error::Unsupported("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::Unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::Unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::Unsupported("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::Unsupported("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::Unsupported("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::Unsupported("nested struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::Unsupported("enum"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Save<'a> {
        content: &'a str,
        attachment_url: Option<&'a str>,
    }

    #[derive(Serialize)]
    struct Counted {
        count: u32,
    }

    #[test]
    fn test_fields_in_declaration_order() {
        let slots = to_slots(&Save {
            content: "<p>hi</p>",
            attachment_url: Some("/documents/a.pdf"),
        })
        .unwrap();
        assert_eq!(
            slots.entries,
            [
                ("content", "<p>hi</p>".to_string()),
                ("attachment_url", "/documents/a.pdf".to_string()),
            ]
        );
        assert_eq!(slots.get("attachment_url"), Some("/documents/a.pdf"));
        assert_eq!(slots.get("missing"), None);
    }

    #[test]
    fn test_non_string_field_rejected() {
        assert_eq!(to_slots(&Counted { count: 3 }), Err(Error::Unsupported("u32")));
    }

    #[test]
    fn test_bare_value_rejected() {
        assert!(matches!(to_slots("loose"), Err(Error::Unsupported(_))));
    }
}
