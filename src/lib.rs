//! Generates an RSF project specification from the header of a CTR executable (CXI).
//!
//! ```no_run
//! use std::fs::File;
//!
//! let buf = std::fs::read("title.cxi").unwrap();
//! let rsf = File::create("title.rsf").unwrap();
//! cxi2rsf::convert(&buf, rsf).unwrap();
//! ```

pub use cxi_header::{CXI_HEADER_SIZE, CxiHeader};
pub use err::{CxiError, DeserializationError, Result, SerializationError};
pub use model::RsfDescriptor;
pub use rsf_output::RsfOutput;
pub use settings::ConverterSettings;
pub use utils::{REGION_SIZE, Region};

use std::io::Write;

pub mod cxi_header;
pub mod err;
pub mod exheader;
pub mod model;
pub mod ncch_header;
pub mod rsf_output;
pub mod settings;
pub mod tables;

mod utils;

/// Decodes the first `CXI_HEADER_SIZE` bytes of `buf` and writes the RSF to `writer`.
pub fn convert<W: Write>(buf: &[u8], writer: W) -> Result<W> {
    convert_with_settings(buf, writer, &ConverterSettings::default())
}

pub fn convert_with_settings<W: Write>(
    buf: &[u8],
    writer: W,
    settings: &ConverterSettings,
) -> Result<W> {
    let descriptor = CxiHeader::from_buffer(buf)?.decode(settings);

    let mut output = RsfOutput::with_writer(writer, settings);
    output.write_descriptor(&descriptor)?;

    Ok(output.into_writer())
}
