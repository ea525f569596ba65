use crate::ConverterSettings;
use crate::err::DeserializationResult;
use crate::exheader;
use crate::model::RsfDescriptor;
use crate::ncch_header;
use crate::utils::Region;
use crate::utils::bytes;

use log::debug;
use std::io::Read;

/// NCCH header followed by the extended header's system control and access control info.
pub const CXI_HEADER_SIZE: usize = 0x600;

pub const NCCH_HEADER_OFFSET: usize = 0x000;
pub const SYSTEM_CONTROL_INFO_OFFSET: usize = 0x200;
pub const ACCESS_CONTROL_INFO_OFFSET: usize = 0x400;

/// The three fixed-size regions of a CXI that the project specification is derived from.
#[derive(Debug, Clone, Copy)]
pub struct CxiHeader<'a> {
    pub ncch: &'a Region,
    pub sci: &'a Region,
    pub aci: &'a Region,
}

impl<'a> CxiHeader<'a> {
    /// Borrows the header regions out of `buf`. Anything past `CXI_HEADER_SIZE` is ignored;
    /// a shorter buffer is rejected before any field is looked at.
    pub fn from_buffer(buf: &'a [u8]) -> DeserializationResult<Self> {
        let _ = bytes::slice_r(buf, 0, CXI_HEADER_SIZE, "CXI header")?;

        Ok(CxiHeader {
            ncch: bytes::region_r(buf, NCCH_HEADER_OFFSET, "NCCH header")?,
            sci: bytes::region_r(buf, SYSTEM_CONTROL_INFO_OFFSET, "system control info")?,
            aci: bytes::region_r(buf, ACCESS_CONTROL_INFO_OFFSET, "access control info")?,
        })
    }

    /// Reads exactly `CXI_HEADER_SIZE` bytes from `reader`.
    pub fn read_from<R: Read>(reader: R) -> DeserializationResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(CXI_HEADER_SIZE);
        reader
            .take(CXI_HEADER_SIZE as u64)
            .read_to_end(&mut buf)?;

        debug!("Read {} bytes of CXI header", buf.len());
        let _ = bytes::slice_r(&buf, 0, CXI_HEADER_SIZE, "CXI header")?;

        Ok(buf)
    }

    pub fn decode(&self, settings: &ConverterSettings) -> RsfDescriptor {
        let mut descriptor = RsfDescriptor::default();

        exheader::decode_system_control_info(self.sci, &mut descriptor);
        exheader::decode_access_control_info(self.aci, settings, &mut descriptor);
        ncch_header::decode_ncch_header(self.ncch, &mut descriptor);

        descriptor
    }
}
