//! Save / restore of terrain cost configuration.
//!
//! [`CostEncoder`] and [`CostDecoder`] move a [`NodeCostTable`] to and from a
//! byte stream so it can ride along with the host's save files.
//!
//! ## Wire format
//!
//! ```text
//! [count: u32 LE]
//! for each entry, ascending terrain id:
//!   [terrain_id: i32 LE] [cost_spec: i32 LE]
//! ```
//!
//! `cost_spec` is a literal cost when positive and a negated variable slot
//! when negative (see [`CostSpec::encode`]). Transition costs are not part of
//! the format.

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use crate::cost::{CostSpec, NodeCostTable};

/// Bytes per serialized entry: terrain_id(4) + cost_spec(4)
const ENTRY_SIZE: usize = 8;

// ---------------------------------------------------------------------------
// CostEncoder
// ---------------------------------------------------------------------------

/// Writes terrain cost tables to a byte-oriented writer.
pub struct CostEncoder<W: Write> {
    writer: W,
}

impl<W: Write> CostEncoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write every entry of `table`.
    pub fn encode(&mut self, table: &NodeCostTable) -> io::Result<()> {
        let count = u32::try_from(table.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many cost entries"))?;
        self.writer.write_all(&count.to_le_bytes())?;
        for (terrain, spec) in table.iter() {
            self.writer.write_all(&terrain.to_le_bytes())?;
            self.writer.write_all(&spec.encode().to_le_bytes())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ---------------------------------------------------------------------------
// CostDecoder
// ---------------------------------------------------------------------------

/// Reads terrain cost tables from a byte-oriented reader.
pub struct CostDecoder<R: Read> {
    reader: R,
}

impl<R: Read> CostDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Replace the contents of `table` with the next encoded table.
    ///
    /// On error `table` is left unchanged.
    pub fn decode_into(&mut self, table: &mut NodeCostTable) -> io::Result<()> {
        let mut count_buf = [0u8; 4];
        self.reader.read_exact(&mut count_buf)?;
        let count = u32::from_le_bytes(count_buf) as usize;

        // Each terrain id appears at most once, so a larger count is garbage.
        if count > table.max_terrain_id() as usize {
            return Err(invalid(format!(
                "{count} cost entries exceed the {} terrain ids",
                table.max_terrain_id()
            )));
        }

        let mut data = vec![0u8; count * ENTRY_SIZE];
        self.reader.read_exact(&mut data)?;

        let mut entries = BTreeMap::new();
        for chunk in data.chunks_exact(ENTRY_SIZE) {
            let terrain = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let raw = i32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);

            if !table.accepts_terrain(terrain) {
                return Err(invalid(format!("terrain id {terrain} out of range")));
            }
            let Some(spec) = CostSpec::decode(raw) else {
                return Err(invalid(format!("terrain {terrain} has cost spec 0")));
            };
            if entries.insert(terrain, spec).is_some() {
                return Err(invalid(format!("terrain {terrain} appears twice")));
            }
        }

        table.replace_entries(entries);
        Ok(())
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Write `table` to `writer` and flush.
pub fn write_terrain_costs<W: Write>(table: &NodeCostTable, writer: W) -> io::Result<()> {
    let mut enc = CostEncoder::new(writer);
    enc.encode(table)?;
    enc.flush()
}

/// Replace the contents of `table` with a table read from `reader`.
pub fn read_terrain_costs<R: Read>(table: &mut NodeCostTable, reader: R) -> io::Result<()> {
    CostDecoder::new(reader).decode_into(table)
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}
