//! A serializer that only walks a value looking for NaN and infinities.
//!
//! `serde_json` silently writes non-finite floats as `null`, which would turn a
//! malformed payload into a different, valid one. Running the guard first lets the
//! encoder refuse such values instead.

use serde::ser::{
    Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};

use crate::error::EncodingError;

pub(crate) fn check<T>(value: &T) -> Result<(), EncodingError>
where
    T: Serialize + ?Sized,
{
    value.serialize(FloatGuard)
}

#[derive(Clone, Copy)]
struct FloatGuard;

fn finite(value: f64) -> Result<(), EncodingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(EncodingError::NonFiniteNumber(value))
    }
}

impl Serializer for FloatGuard {
    type Ok = ();
    type Error = EncodingError;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), EncodingError> {
        finite(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), EncodingError> {
        finite(v)
    }

    fn serialize_char(self, _v: char) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), EncodingError> {
        Ok(())
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, EncodingError> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, EncodingError> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, EncodingError> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, EncodingError> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, EncodingError> {
        Ok(self)
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, EncodingError> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, EncodingError> {
        Ok(self)
    }
}

impl SerializeSeq for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl SerializeTuple for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl SerializeTupleStruct for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl SerializeTupleVariant for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl SerializeMap for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        key.serialize(*self)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl SerializeStruct for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

impl SerializeStructVariant for FloatGuard {
    type Ok = ();
    type Error = EncodingError;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), EncodingError>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), EncodingError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn finite_values_pass() {
        let mut map = BTreeMap::new();
        map.insert("temp", vec![21.5_f64, -3.0]);
        assert!(check(&map).is_ok());
        assert!(check(&Some(1.0_f32)).is_ok());
    }

    #[test]
    fn nested_nan_is_rejected() {
        let value = vec![(1, "a", Some(vec![f64::NAN]))];
        let err = check(&value).unwrap_err();
        assert!(matches!(err, EncodingError::NonFiniteNumber(v) if v.is_nan()));
    }

    #[test]
    fn infinity_in_f32_is_rejected() {
        let err = check(&f32::INFINITY).unwrap_err();
        assert!(matches!(err, EncodingError::NonFiniteNumber(v) if v == f64::INFINITY));
    }
}
