//! In-memory form of an RSF project specification.
//!
//! An `RsfDescriptor` is built once per conversion: the header decoders fill it through
//! `&mut` access, then `RsfOutput` only reads it.
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RsfDescriptor {
    pub basic_info: BasicInfo,
    pub rom_fs: RomFs,
    pub title_info: TitleInfo,
    pub option: Options,
    pub access_control_info: AccessControlInfo,
    pub system_control_info: SystemControlInfo,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicInfo {
    pub title: String,
    pub company_code: String,
    pub product_code: String,
    pub content_type: Option<ContentType>,
    pub logo: Logo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Application,
    SystemUpdate,
    Manual,
    Child,
    Trial,
    ExtendedSystemUpdate,
}

impl ContentType {
    /// Resolve the 6-bit content category of the NCCH content type byte.
    pub fn from_code(code: u8) -> Option<ContentType> {
        match code {
            0 => Some(ContentType::Application),
            1 => Some(ContentType::SystemUpdate),
            2 => Some(ContentType::Manual),
            3 => Some(ContentType::Child),
            4 => Some(ContentType::Trial),
            5 => Some(ContentType::ExtendedSystemUpdate),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Application => "Application",
            ContentType::SystemUpdate => "SystemUpdate",
            ContentType::Manual => "Manual",
            ContentType::Child => "Child",
            ContentType::Trial => "Trial",
            ContentType::ExtendedSystemUpdate => "ExtendedSystemUpdate",
        }
    }
}

/// Coarse logo classification. Any logo data at all is assumed to be a custom one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Logo {
    Homebrew,
    #[default]
    Empty,
}

impl Logo {
    pub fn as_str(self) -> &'static str {
        match self {
            Logo::Homebrew => "Homebrew",
            Logo::Empty => "None",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RomFs {
    /// `None` when the container declares that it has no RomFS.
    pub root_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleInfo {
    pub platform: Option<Platform>,
    pub category: &'static str,
    pub unique_id: u32,
    pub version: u8,
    pub contents_index: u8,
    pub variation: u8,
    pub child_index: u8,
    pub demo_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ctr,
    Snake,
}

impl Platform {
    pub fn from_code(code: u8) -> Option<Platform> {
        match code {
            1 => Some(Platform::Ctr),
            2 => Some(Platform::Snake),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Ctr => "CTR",
            Platform::Snake => "snake",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub enable_crypt: bool,
    pub enable_compress: bool,
    pub free_product_code: bool,
    pub use_on_sd: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CpuSpeed {
    #[default]
    Mhz268,
    Mhz804,
}

impl CpuSpeed {
    pub fn as_str(self) -> &'static str {
        match self {
            CpuSpeed::Mhz268 => "268MHz",
            CpuSpeed::Mhz804 => "804MHz",
        }
    }
}

/// An inclusive address range taken from a pair of mapping descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRange {
    pub start: u32,
    pub end: u32,
    pub read_only: bool,
}

impl fmt::Display for MemoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}-{:x}", self.start, self.end)?;
        if self.read_only {
            f.write_str(":r")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessControlInfo {
    pub disable_debug: bool,
    pub enable_force_debug: bool,
    pub can_write_shared_page: bool,
    pub can_use_privileged_priority: bool,
    pub can_use_non_alphabet_and_number: bool,
    pub permit_main_function_argument: bool,
    pub can_share_device_memory: bool,
    pub use_other_variation_save_data: bool,
    pub runnable_on_sleep: bool,
    pub special_memory_arrange: bool,
    pub can_access_core2: bool,
    pub use_ext_save_data: bool,
    pub enable_l2_cache: bool,

    pub ideal_processor: u8,
    pub affinity_mask: u8,
    /// Rebased by -32 for application processes, so it may be negative.
    pub priority: i32,
    pub max_cpu: u8,
    pub memory_type: &'static str,
    pub system_mode: &'static str,
    pub system_mode_ext: &'static str,
    pub cpu_speed: CpuSpeed,
    pub resource_limit_category: &'static str,

    pub core_version: u16,
    pub desc_version: u8,
    pub release_kernel_major: u8,
    pub release_kernel_minor: u8,
    pub handle_table_size: u32,

    pub system_save_data_id1: u32,
    pub system_save_data_id2: u32,
    /// Filled front to back in the order non-zero ids are found; zero means unused.
    pub other_user_save_data_ids: [u32; 3],
    pub ext_save_data_id: u32,
    pub accessible_save_data_ids: Vec<u32>,

    /// Raw FS:USER permission word; every bit is kept so inactive ones can be listed too.
    pub file_system_access: u32,
    pub io_access_control: Vec<&'static str>,
    pub interrupt_numbers: Vec<u8>,
    pub system_call_access: Vec<u32>,
    pub service_access_control: Vec<String>,
    pub memory_mapping: Vec<MemoryRange>,
    pub io_register_mapping: Vec<MemoryRange>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppType {
    Application,
    #[default]
    System,
}

impl AppType {
    pub fn as_str(self) -> &'static str {
        match self {
            AppType::Application => "application",
            AppType::System => "system",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemControlInfo {
    pub app_type: AppType,
    pub stack_size: u32,
    pub remaster_version: u16,
    pub jump_id: u64,
    pub save_data_size: u64,
    pub dependency: Vec<u64>,
}
