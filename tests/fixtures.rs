#![allow(dead_code)]
use std::path::PathBuf;

use std::sync::Once;

use cxi2rsf::CXI_HEADER_SIZE;

static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}

pub fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .canonicalize()
        .unwrap()
}

pub fn application_rsf() -> PathBuf {
    samples_dir().join("application.rsf")
}

pub const GSP_MODULE: u64 = 0x0004_0130_0000_1C02;
pub const HID_MODULE: u64 = 0x0004_0130_0000_1D02;

/// Builds a CXI header byte by byte. Offsets are absolute within the 0x600 byte header.
pub struct CxiBuilder {
    buf: Vec<u8>,
}

impl Default for CxiBuilder {
    fn default() -> Self {
        CxiBuilder {
            buf: vec![0; CXI_HEADER_SIZE],
        }
    }
}

impl CxiBuilder {
    pub fn new() -> Self {
        CxiBuilder::default()
    }

    pub fn put(mut self, offset: usize, bytes: &[u8]) -> Self {
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    // NCCH header
    pub fn company_code(self, code: &str) -> Self {
        self.put(0x110, code.as_bytes())
    }

    pub fn product_code(self, code: &str) -> Self {
        self.put(0x150, code.as_bytes())
    }

    pub fn platform(self, platform: u8) -> Self {
        self.put(0x18C, &[platform])
    }

    pub fn content_type(self, content_type: u8) -> Self {
        self.put(0x18D, &[content_type << 2])
    }

    pub fn key_config(self, flags: u8) -> Self {
        self.put(0x18F, &[flags])
    }

    pub fn logo_size(self, size: u32) -> Self {
        self.put(0x19C, &size.to_le_bytes())
    }

    // System control info
    pub fn title(self, title: &str) -> Self {
        self.put(0x200, title.as_bytes())
    }

    pub fn sci_flags(self, flags: u8) -> Self {
        self.put(0x20D, &[flags])
    }

    pub fn remaster_version(self, version: u16) -> Self {
        self.put(0x20E, &version.to_le_bytes())
    }

    pub fn stack_size(self, size: u32) -> Self {
        self.put(0x21C, &size.to_le_bytes())
    }

    pub fn dependencies(mut self, title_ids: &[u64]) -> Self {
        for (i, title_id) in title_ids.iter().enumerate() {
            self = self.put(0x240 + i * 8, &title_id.to_le_bytes());
        }
        self
    }

    pub fn save_data_size(self, size: u64) -> Self {
        self.put(0x3C0, &size.to_le_bytes())
    }

    pub fn jump_id(self, jump_id: u64) -> Self {
        self.put(0x3C8, &jump_id.to_le_bytes())
    }

    // Access control info
    pub fn program_id(self, program_id: u64) -> Self {
        self.put(0x400, &program_id.to_le_bytes())
    }

    pub fn core_version(self, version: u16) -> Self {
        self.put(0x408, &version.to_le_bytes())
    }

    pub fn arm11_flags(self, flag1: u8, flag0: u8, priority: u8) -> Self {
        self.put(0x40C, &[flag1]).put(0x40E, &[flag0, priority])
    }

    pub fn max_cpu(self, max_cpu: u8) -> Self {
        self.put(0x410, &[max_cpu])
    }

    pub fn extdata_id(self, id: u64) -> Self {
        self.put(0x430, &id.to_le_bytes())
    }

    pub fn system_save_data_ids(self, id1: u32, id2: u32) -> Self {
        self.put(0x438, &id1.to_le_bytes())
            .put(0x43C, &id2.to_le_bytes())
    }

    pub fn storage_unique_ids(self, ids: u64) -> Self {
        self.put(0x440, &ids.to_le_bytes())
    }

    pub fn file_system_access(self, access: u32) -> Self {
        self.put(0x448, &access.to_le_bytes())
    }

    pub fn other_attributes(self, attributes: u8) -> Self {
        self.put(0x44F, &[attributes])
    }

    pub fn services(mut self, services: &[&str]) -> Self {
        for (i, service) in services.iter().enumerate() {
            self = self.put(0x450 + i * 8, service.as_bytes());
        }
        self
    }

    pub fn resource_limit_category(self, category: u8) -> Self {
        self.put(0x56F, &[category])
    }

    /// Fills the whole descriptor array, padding with unused (all ones) descriptors.
    pub fn kernel_capabilities(mut self, descriptors: &[u32]) -> Self {
        for i in 0..28 {
            let descriptor = descriptors.get(i).copied().unwrap_or(u32::MAX);
            self = self.put(0x570 + i * 4, &descriptor.to_le_bytes());
        }
        self
    }

    pub fn arm9_access(self, access: u32) -> Self {
        self.put(0x5F0, &access.to_le_bytes())
    }

    pub fn desc_version(self, version: u8) -> Self {
        self.put(0x5FF, &[version])
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// A retail-like application: RomFS, legacy extdata, two modules and a handful of services.
pub fn application_header() -> Vec<u8> {
    CxiBuilder::new()
        .company_code("01")
        .product_code("CTR-P-ABCE")
        .platform(1)
        .content_type(0)
        .logo_size(0x2000)
        .title("CtrApp")
        .stack_size(0x4000)
        .dependencies(&[GSP_MODULE, HID_MODULE])
        .save_data_size(512)
        .jump_id(0x0004_0000_0012_3400)
        .program_id(0x0004_0000_0012_3400)
        .core_version(2)
        .arm11_flags(0, 0b0000_0100, 48)
        .max_cpu(0x9E)
        .extdata_id(0x1234)
        .services(&["APT:U", "fs:USER", "gsp::Gpu", "hid:USER"])
        .resource_limit_category(0)
        .kernel_capabilities(&[
            0xFC00_0234, // kernel 2.52
            0xFE00_0200, // handle table size
            0xFF00_0140, // application memory, shared device memory
            0xF000_0002, // ControlMemory
            0xF100_0001, // SignalEvent
            0xE000_000F, // interrupt 0x0f
            0xFF81_EC00, // io 0x1ec00000..
            0xFF81_EC01,
            0xFF91_F000, // static, read only 0x1f000000..
            0xFF91_F600,
        ])
        .desc_version(2)
        .build()
}

pub fn zeroed_header() -> Vec<u8> {
    vec![0; CXI_HEADER_SIZE]
}
