/*!
 * Output Writer
 * Write the merged array as space-terminated decimal integers
 */

use crate::core::types::Value;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write every value followed by a single space
pub fn write_values<W: Write>(mut sink: W, values: &[Value]) -> io::Result<()> {
    for value in values {
        write!(sink, "{} ", value)?;
    }
    sink.flush()
}

/// Create (or truncate) `path` and write `values` into it
pub fn write_output(path: &Path, values: &[Value]) -> io::Result<()> {
    let file = File::create(path)?;
    write_values(BufWriter::new(file), values)
}
