//! Declarative fixed-offset buffer layouts.
//!
//! A [`Layout`] is an ordered list of named fields. Every field has a fixed
//! width, so the byte offset of each field and the total span are properties
//! of the schema alone. Records are encoded with a [`LayoutWriter`] and read
//! back with a [`LayoutReader`]; both walk the schema in declaration order and
//! refuse any access that does not match the next declared field.
//!
//! ```text
//! field kind     width   encoding
//! U8             1       raw byte
//! U32            4       little-endian
//! Blob(n)        n       raw bytes, caller supplies exactly n
//! PublicKey      32      raw address bytes
//! Padding(n)     n       always zero on write, skipped on read
//! ```

use crate::error::SolError;

/// Semantic kind (and thereby width) of a layout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U32,
    Blob(usize),
    PublicKey,
    Padding(usize),
}

impl FieldKind {
    pub const fn width(&self) -> usize {
        match self {
            FieldKind::U8 => 1,
            FieldKind::U32 => 4,
            FieldKind::Blob(n) | FieldKind::Padding(n) => *n,
            FieldKind::PublicKey => 32,
        }
    }

    const fn is_padding(&self) -> bool {
        matches!(self, FieldKind::Padding(_))
    }
}

/// A named field of a [`Layout`].
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// An ordered, fixed-width record schema.
#[derive(Debug)]
pub struct Layout {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Layout {
    /// Total encoded length in bytes.
    pub const fn span(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].kind.width();
            i += 1;
        }
        total
    }

    /// Byte offset of the named field, if it exists.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for field in self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.kind.width();
        }
        None
    }

    pub fn writer(&'static self) -> LayoutWriter {
        LayoutWriter {
            layout: self,
            buf: Vec::with_capacity(self.span()),
            next: 0,
        }
    }

    /// Start reading `data`. The buffer must cover the whole span; trailing
    /// bytes beyond the span are ignored.
    pub fn reader<'a>(&'static self, data: &'a [u8]) -> Result<LayoutReader<'a>, SolError> {
        if data.len() < self.span() {
            return Err(SolError::Layout(format!(
                "{}: expected at least {} bytes, got {}",
                self.name,
                self.span(),
                data.len()
            )));
        }
        Ok(LayoutReader {
            layout: self,
            data,
            offset: 0,
            next: 0,
        })
    }
}

/// Sequential encoder bound to a [`Layout`].
pub struct LayoutWriter {
    layout: &'static Layout,
    buf: Vec<u8>,
    next: usize,
}

impl LayoutWriter {
    /// Advance to the next non-padding field, zero-filling padding on the
    /// way, and check that it has the expected name and kind.
    fn advance(&mut self, name: &str, kind: FieldKind) -> Result<(), SolError> {
        self.fill_padding();
        let field = self.layout.fields.get(self.next).ok_or_else(|| {
            SolError::Layout(format!("{}: no field left for `{name}`", self.layout.name))
        })?;
        if field.name != name || field.kind != kind {
            return Err(SolError::Layout(format!(
                "{}: expected field `{}` ({:?}), got `{name}` ({kind:?})",
                self.layout.name, field.name, field.kind
            )));
        }
        self.next += 1;
        Ok(())
    }

    fn fill_padding(&mut self) {
        while let Some(field) = self.layout.fields.get(self.next) {
            if !field.kind.is_padding() {
                break;
            }
            self.buf.resize(self.buf.len() + field.kind.width(), 0);
            self.next += 1;
        }
    }

    pub fn u8(mut self, name: &str, value: u8) -> Result<Self, SolError> {
        self.advance(name, FieldKind::U8)?;
        self.buf.push(value);
        Ok(self)
    }

    pub fn u32(mut self, name: &str, value: u32) -> Result<Self, SolError> {
        self.advance(name, FieldKind::U32)?;
        self.buf.extend_from_slice(&value.to_le_bytes());
        Ok(self)
    }

    pub fn blob(mut self, name: &str, value: &[u8]) -> Result<Self, SolError> {
        self.advance(name, FieldKind::Blob(value.len()))?;
        self.buf.extend_from_slice(value);
        Ok(self)
    }

    pub fn public_key(mut self, name: &str, value: &[u8; 32]) -> Result<Self, SolError> {
        self.advance(name, FieldKind::PublicKey)?;
        self.buf.extend_from_slice(value);
        Ok(self)
    }

    /// Finish the record. Trailing padding is written; any other unwritten
    /// field is an error.
    pub fn finish(mut self) -> Result<Vec<u8>, SolError> {
        self.fill_padding();
        if let Some(field) = self.layout.fields.get(self.next) {
            return Err(SolError::Layout(format!(
                "{}: field `{}` was never written",
                self.layout.name, field.name
            )));
        }
        debug_assert_eq!(self.buf.len(), self.layout.span());
        Ok(self.buf)
    }
}

/// Sequential decoder bound to a [`Layout`].
pub struct LayoutReader<'a> {
    layout: &'static Layout,
    data: &'a [u8],
    offset: usize,
    next: usize,
}

impl<'a> LayoutReader<'a> {
    fn take(&mut self, name: &str, kind: FieldKind) -> Result<&'a [u8], SolError> {
        while let Some(field) = self.layout.fields.get(self.next) {
            if !field.kind.is_padding() {
                break;
            }
            self.offset += field.kind.width();
            self.next += 1;
        }
        let field = self.layout.fields.get(self.next).ok_or_else(|| {
            SolError::Layout(format!("{}: no field left for `{name}`", self.layout.name))
        })?;
        if field.name != name || field.kind != kind {
            return Err(SolError::Layout(format!(
                "{}: expected field `{}` ({:?}), got `{name}` ({kind:?})",
                self.layout.name, field.name, field.kind
            )));
        }
        let width = kind.width();
        let bytes = &self.data[self.offset..self.offset + width];
        self.offset += width;
        self.next += 1;
        Ok(bytes)
    }

    pub fn u8(&mut self, name: &str) -> Result<u8, SolError> {
        Ok(self.take(name, FieldKind::U8)?[0])
    }

    pub fn u32(&mut self, name: &str) -> Result<u32, SolError> {
        let bytes = self.take(name, FieldKind::U32)?;
        let mut le = [0u8; 4];
        le.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(le))
    }

    pub fn blob<const N: usize>(&mut self, name: &str) -> Result<[u8; N], SolError> {
        let bytes = self.take(name, FieldKind::Blob(N))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read a variable-width blob whose width comes from the schema.
    pub fn blob_vec(&mut self, name: &str, width: usize) -> Result<Vec<u8>, SolError> {
        Ok(self.take(name, FieldKind::Blob(width))?.to_vec())
    }

    pub fn public_key(&mut self, name: &str) -> Result<[u8; 32], SolError> {
        let bytes = self.take(name, FieldKind::PublicKey)?;
        let mut out = [0u8; 32];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}
