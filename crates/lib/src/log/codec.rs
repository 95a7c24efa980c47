//! On-disk encoding of log artifacts.
//!
//! An artifact file is a bzip2 stream wrapping UTF-8 JSON. The JSON text is
//! laid out the way Python's `json.dump` lays it out with default arguments:
//!
//! ```text
//! {"pkg": "installed", "name": "caf\u00e9"}
//! ```
//!
//! Files written by Python's `json` module read back as long as they stay
//! inside what strict JSON and serde_json accept:
//!
//! - `NaN`, `Infinity` and `-Infinity` are not JSON and fail to parse.
//! - Integers outside the `i64`/`u64` range become the nearest `f64`.
//! - Nesting deeper than 128 levels fails to parse. [`check_readable`] keeps
//!   such documents from being written here in the first place.

use std::io::{self, Read, Write};

use bzip2::Compression;
use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use serde::Serialize;
use serde::de::IgnoredAny;
use serde_json::ser::{Formatter, Serializer};

/// JSON formatter matching Python's `json.dumps` defaults.
///
/// Uses `", "` and `": "` separators and escapes everything outside printable
/// ASCII as `\uXXXX` (UTF-16 code units, so astral characters become
/// surrogate pairs).
#[derive(Debug, Default, Clone, Copy)]
pub struct PythonFormatter;

impl Formatter for PythonFormatter {
  fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
  where
    W: ?Sized + Write,
  {
    if first { Ok(()) } else { writer.write_all(b", ") }
  }

  fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
  where
    W: ?Sized + Write,
  {
    if first { Ok(()) } else { writer.write_all(b", ") }
  }

  fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
  where
    W: ?Sized + Write,
  {
    writer.write_all(b": ")
  }

  fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
  where
    W: ?Sized + Write,
  {
    let mut start = 0;
    for (i, c) in fragment.char_indices() {
      if c.is_ascii() && c != '\x7f' {
        continue;
      }
      writer.write_all(fragment[start..i].as_bytes())?;
      let mut units = [0u16; 2];
      for unit in c.encode_utf16(&mut units).iter() {
        write!(writer, "\\u{:04x}", unit)?;
      }
      start = i + c.len_utf8();
    }
    writer.write_all(fragment[start..].as_bytes())
  }
}

/// Serialize `value` to JSON text in the stored layout.
pub fn to_json<T>(value: &T) -> serde_json::Result<Vec<u8>>
where
  T: Serialize + ?Sized,
{
  let mut out = Vec::new();
  let mut serializer = Serializer::with_formatter(&mut out, PythonFormatter);
  value.serialize(&mut serializer)?;
  Ok(out)
}

/// Check that stored JSON text parses back.
///
/// Serializing accepts nesting of any depth, parsing stops at 128 levels.
pub fn check_readable(json: &[u8]) -> serde_json::Result<()> {
  serde_json::from_slice::<IgnoredAny>(json).map(|_| ())
}

/// Compress `data` into `writer` and return the writer once the stream is finished.
///
/// Level 9 matches the default of Python's `bz2.BZ2File`.
pub fn compress<W: Write>(writer: W, data: &[u8]) -> io::Result<W> {
  let mut encoder = BzEncoder::new(writer, Compression::best());
  encoder.write_all(data)?;
  encoder.finish()
}

/// Decompress a whole bzip2 stream (concatenated streams included).
pub fn decompress<R: Read>(reader: R) -> io::Result<Vec<u8>> {
  let mut decoder = MultiBzDecoder::new(reader);
  let mut out = Vec::new();
  decoder.read_to_end(&mut out)?;
  Ok(out)
}
