//! Minimal class-file header reader.
//!
//! Reads the version, the constant pool and the access/this/super triple that
//! follows it. Fields, methods and attributes are never looked at.

const MAGIC: u32 = 0xCAFE_BABE;

pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

/// What the scanner needs to know about one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub major_version: u16,
    pub access_flags: u16,
    /// Internal (slash separated) name.
    pub this_class: String,
    /// `None` only for `java/lang/Object` and module descriptors.
    pub super_class: Option<String>,
}

impl ClassHeader {
    /// Neither abstract nor an interface.
    pub fn is_concrete(&self) -> bool {
        self.access_flags & (ACC_ABSTRACT | ACC_INTERFACE) == 0
    }
}

enum Constant {
    Utf8(String),
    Class(u16),
    Other,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], String> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| format!("truncated at offset {}", self.pos))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, String> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, String> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, String> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parse the header of a class file.
pub fn parse_class_header(bytes: &[u8]) -> Result<ClassHeader, String> {
    let mut reader = Reader { bytes, pos: 0 };
    if reader.u32()? != MAGIC {
        return Err("bad magic number".to_string());
    }
    let _minor = reader.u16()?;
    let major_version = reader.u16()?;

    let count = reader.u16()? as usize;
    let mut pool: Vec<Constant> = Vec::with_capacity(count);
    // Index 0 is unused.
    pool.push(Constant::Other);
    while pool.len() < count {
        let tag = reader.u8()?;
        let constant = match tag {
            1 => {
                let len = reader.u16()? as usize;
                Constant::Utf8(String::from_utf8_lossy(reader.take(len)?).into_owned())
            }
            7 => Constant::Class(reader.u16()?),
            3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                reader.take(4)?;
                Constant::Other
            }
            5 | 6 => {
                reader.take(8)?;
                // Long and Double take two slots.
                pool.push(Constant::Other);
                Constant::Other
            }
            8 | 16 | 19 | 20 => {
                reader.take(2)?;
                Constant::Other
            }
            15 => {
                reader.take(3)?;
                Constant::Other
            }
            other => return Err(format!("unknown constant pool tag {}", other)),
        };
        pool.push(constant);
    }

    let access_flags = reader.u16()?;
    let this_index = reader.u16()?;
    let super_index = reader.u16()?;

    let this_class = class_name(&pool, this_index)?;
    let super_class = if super_index == 0 {
        None
    } else {
        Some(class_name(&pool, super_index)?)
    };

    Ok(ClassHeader {
        major_version,
        access_flags,
        this_class,
        super_class,
    })
}

fn class_name(pool: &[Constant], index: u16) -> Result<String, String> {
    match pool.get(index as usize) {
        Some(Constant::Class(name_index)) => match pool.get(*name_index as usize) {
            Some(Constant::Utf8(name)) => Ok(name.clone()),
            _ => Err(format!("constant #{} is not a UTF-8 entry", name_index)),
        },
        _ => Err(format!("constant #{} is not a class entry", index)),
    }
}
