//! Binary FBX reader.
//!
//! An FBX binary file is a 27-byte header followed by a tree of node
//! records. Each record carries a name, a list of typed properties and an
//! optional list of child records terminated by a zeroed sentinel record.
//! Record offsets are 32-bit up to version 7400 and 64-bit from 7500.
//! Array properties may be zlib-deflated.

use thiserror::Error;

const MAGIC: &[u8; 21] = b"Kaydara FBX Binary  \0";
const HEADER_LEN: usize = 27;
const MIN_VERSION: u32 = 7100;
const MAX_VERSION: u32 = 7700;

#[derive(Debug, Error, PartialEq)]
pub enum FbxError {
    #[error("not a binary FBX file (ASCII FBX is not supported)")]
    NotBinary,
    #[error("unsupported FBX version {0}")]
    UnsupportedVersion(u32),
    #[error("unexpected end of data at offset {0}")]
    UnexpectedEof(usize),
    #[error("unknown property type {code:#04x} at offset {offset}")]
    UnknownProperty { code: u8, offset: usize },
    #[error("unknown array encoding {encoding} at offset {offset}")]
    UnknownEncoding { encoding: u32, offset: usize },
    #[error("array at offset {offset} decodes to {got} bytes, expected {expected}")]
    ArrayLength {
        offset: usize,
        expected: usize,
        got: usize,
    },
    #[error("node end offset {end} is out of bounds at offset {offset}")]
    BadOffset { end: u64, offset: usize },
    #[error("zlib: {0}")]
    Decompress(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    String(String),
    Raw(Vec<u8>),
    BoolArray(Vec<bool>),
    I32Array(Vec<i32>),
    I64Array(Vec<i64>),
    F32Array(Vec<f32>),
    F64Array(Vec<f64>),
}

impl Property {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Property::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Property::I16(v) => Some(v as i64),
            Property::I32(v) => Some(v as i64),
            Property::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Property::F32(v) => Some(v as f64),
            Property::F64(v) => Some(v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Numeric array as `f64`, widening single-precision data.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            Property::F64Array(v) => Some(v.clone()),
            Property::F32Array(v) => Some(v.iter().map(|&x| x as f64).collect()),
            _ => None,
        }
    }

    pub fn to_i32_vec(&self) -> Option<Vec<i32>> {
        match self {
            Property::I32Array(v) => Some(v.clone()),
            Property::I64Array(v) => Some(v.iter().map(|&x| x as i32).collect()),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub properties: Vec<Property>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn prop(&self, index: usize) -> Option<&Property> {
        self.properties.get(index)
    }

    /// First property of the named child, the usual shape of FBX fields.
    pub fn field(&self, name: &str) -> Option<&Property> {
        self.child(name).and_then(|c| c.prop(0))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub version: u32,
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn parse(data: &[u8]) -> Result<Self, FbxError> {
        if data.len() < HEADER_LEN || data[..MAGIC.len()] != MAGIC[..] {
            return Err(FbxError::NotBinary);
        }
        let mut r = Reader {
            data,
            pos: 23,
            wide: false,
        };
        let version = r.u32()?;
        if !(MIN_VERSION..=MAX_VERSION).contains(&version) {
            return Err(FbxError::UnsupportedVersion(version));
        }
        r.wide = version >= 7500;
        let mut nodes = Vec::new();
        // the top-level list ends with a sentinel record followed by a footer
        while r.remaining() >= r.sentinel_len() {
            match r.node()? {
                Some(n) => nodes.push(n),
                None => break,
            }
        }
        Ok(Self { version, nodes })
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Split an FBX object name (`"Name\0\x01Class"`) into its display part.
pub fn object_name(raw: &str) -> &str {
    raw.split("\u{0}\u{1}").next().unwrap_or(raw)
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    wide: bool,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn sentinel_len(&self) -> usize {
        if self.wide {
            25
        } else {
            13
        }
    }

    fn bytes(&mut self, n: usize) -> Result<&'a [u8], FbxError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&e| e <= self.data.len())
            .ok_or(FbxError::UnexpectedEof(self.pos))?;
        let out = &self.data[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], FbxError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, FbxError> {
        Ok(self.bytes(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, FbxError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    fn offset(&mut self) -> Result<u64, FbxError> {
        if self.wide {
            Ok(u64::from_le_bytes(self.array()?))
        } else {
            Ok(self.u32()? as u64)
        }
    }

    /// Read one node record; `None` for the sentinel closing a list.
    fn node(&mut self) -> Result<Option<Node>, FbxError> {
        let start = self.pos;
        let end = self.offset()?;
        let num_props = self.offset()?;
        let _props_len = self.offset()?;
        let name_len = self.u8()? as usize;
        if end == 0 {
            return Ok(None);
        }
        let end_usize = usize::try_from(end)
            .ok()
            .filter(|&e| e > start && e <= self.data.len())
            .ok_or(FbxError::BadOffset { end, offset: start })?;
        let name = String::from_utf8_lossy(self.bytes(name_len)?).into_owned();
        let mut properties = Vec::with_capacity(num_props.min(64) as usize);
        for _ in 0..num_props {
            properties.push(self.property()?);
        }
        let mut children = Vec::new();
        while self.pos < end_usize {
            match self.node()? {
                Some(child) => children.push(child),
                None => break,
            }
        }
        if self.pos != end_usize {
            return Err(FbxError::BadOffset { end, offset: start });
        }
        Ok(Some(Node {
            name,
            properties,
            children,
        }))
    }

    fn property(&mut self) -> Result<Property, FbxError> {
        let offset = self.pos;
        let code = self.u8()?;
        let p = match code {
            b'C' => Property::Bool(self.u8()? != 0),
            b'Y' => Property::I16(i16::from_le_bytes(self.array()?)),
            b'I' => Property::I32(i32::from_le_bytes(self.array()?)),
            b'L' => Property::I64(i64::from_le_bytes(self.array()?)),
            b'F' => Property::F32(f32::from_le_bytes(self.array()?)),
            b'D' => Property::F64(f64::from_le_bytes(self.array()?)),
            b'S' => {
                let len = self.u32()? as usize;
                Property::String(String::from_utf8_lossy(self.bytes(len)?).into_owned())
            }
            b'R' => {
                let len = self.u32()? as usize;
                Property::Raw(self.bytes(len)?.to_vec())
            }
            b'b' => Property::BoolArray(self.array_prop(1, |c| c[0] != 0)?),
            b'i' => Property::I32Array(self.array_prop(4, |c| {
                i32::from_le_bytes([c[0], c[1], c[2], c[3]])
            })?),
            b'l' => Property::I64Array(self.array_prop(8, |c| {
                i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]])
            })?),
            b'f' => Property::F32Array(self.array_prop(4, |c| {
                f32::from_le_bytes([c[0], c[1], c[2], c[3]])
            })?),
            b'd' => Property::F64Array(self.array_prop(8, |c| {
                f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]])
            })?),
            _ => return Err(FbxError::UnknownProperty { code, offset }),
        };
        Ok(p)
    }

    fn array_prop<T>(&mut self, elem_size: usize, decode: impl Fn(&[u8]) -> T) -> Result<Vec<T>, FbxError> {
        let offset = self.pos;
        let count = self.u32()? as usize;
        let encoding = self.u32()?;
        let stored_len = self.u32()? as usize;
        let stored = self.bytes(stored_len)?;
        let expected = count
            .checked_mul(elem_size)
            .ok_or(FbxError::UnexpectedEof(offset))?;
        let raw: std::borrow::Cow<'_, [u8]> = match encoding {
            0 => stored.into(),
            1 => miniz_oxide::inflate::decompress_to_vec_zlib(stored)
                .map_err(|e| FbxError::Decompress(format!("{e:?}")))?
                .into(),
            _ => return Err(FbxError::UnknownEncoding { encoding, offset }),
        };
        if raw.len() != expected {
            return Err(FbxError::ArrayLength {
                offset,
                expected,
                got: raw.len(),
            });
        }
        Ok(raw.chunks_exact(elem_size).map(decode).collect())
    }
}
