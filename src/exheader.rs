//! Decoding of the extended header: the system control info (SCI) and access control info
//! (ACI) regions that follow the NCCH header.

mod arm9_access;
mod kernel_caps;
mod storage_info;

pub use self::arm9_access::Arm9Access;
pub use self::kernel_caps::{DescriptorKind, KernelFlags, descriptor_tag};

use log::debug;

use crate::ConverterSettings;
use crate::model::{AppType, CpuSpeed, RsfDescriptor, TitleInfo};
use crate::tables;
use crate::utils::Region;
use crate::utils::bytes;

// System control info
const SCI_TITLE_OFFSET: usize = 0x0;
const SCI_TITLE_SIZE: usize = 8;
const SCI_FLAG_OFFSET: usize = 0xD;
const SCI_REMASTER_VERSION_OFFSET: usize = 0xE;
const SCI_STACK_SIZE_OFFSET: usize = 0x1C;
const SCI_DEPENDENCY_LIST_OFFSET: usize = 0x40;
pub const MAX_DEPENDENCIES: usize = 48;
const SCI_SAVEDATA_SIZE_OFFSET: usize = 0x1C0;
const SCI_JUMP_ID_OFFSET: usize = 0x1C8;

const SCI_FLAG_COMPRESS_CODE: u8 = 1 << 0;
const SCI_FLAG_SD_APPLICATION: u8 = 1 << 1;

// Access control info (ARM11 local capabilities)
const ACI_PROGRAM_ID_OFFSET: usize = 0x0;
const ACI_CORE_VERSION_OFFSET: usize = 0x8;
const ACI_FLAG1_OFFSET: usize = 0xC;
const ACI_FLAG0_OFFSET: usize = 0xE;
const ACI_PRIORITY_OFFSET: usize = 0xF;
const ACI_MAX_CPU_OFFSET: usize = 0x10;
const ACI_FILESYSTEM_ACCESS_OFFSET: usize = 0x48;
const ACI_SERVICE_ACCESS_OFFSET: usize = 0x50;
const SERVICE_NAME_SIZE: usize = 8;
pub const MAX_SERVICES: usize = 34;
const ACI_RESOURCE_LIMIT_CATEGORY_OFFSET: usize = 0x16F;

const FLAG1_ENABLE_L2_CACHE: u8 = 1 << 0;
const FLAG1_HIGH_CPU_SPEED: u8 = 1 << 1;

/// Other attributes: the title has no RomFS.
const NOT_USE_ROMFS: u8 = 1 << 0;

/// Application processes run with priorities relative to this base.
const APPLICATION_PRIORITY_BASE: i32 = 32;

pub fn decode_system_control_info(sci: &Region, descriptor: &mut RsfDescriptor) {
    let flag = bytes::u8_at(sci, SCI_FLAG_OFFSET);

    descriptor.basic_info.title = bytes::nul_terminated_str_at(sci, SCI_TITLE_OFFSET, SCI_TITLE_SIZE);
    descriptor.option.enable_compress = flag & SCI_FLAG_COMPRESS_CODE != 0;
    descriptor.option.use_on_sd = flag & SCI_FLAG_SD_APPLICATION != 0;

    let info = &mut descriptor.system_control_info;
    info.remaster_version = bytes::u16_at(sci, SCI_REMASTER_VERSION_OFFSET);
    info.stack_size = bytes::u32_at(sci, SCI_STACK_SIZE_OFFSET);

    info.dependency = (0..MAX_DEPENDENCIES)
        .map(|i| bytes::u64_at(sci, SCI_DEPENDENCY_LIST_OFFSET + i * 8))
        .take_while(|&title_id| title_id != 0)
        .collect();

    info.save_data_size = bytes::u64_at(sci, SCI_SAVEDATA_SIZE_OFFSET);
    info.jump_id = bytes::u64_at(sci, SCI_JUMP_ID_OFFSET);

    debug!(
        "System control info: title {:?}, stack size 0x{:x}, {} dependencies",
        descriptor.basic_info.title,
        info.stack_size,
        info.dependency.len()
    );
}

pub fn decode_access_control_info(
    aci: &Region,
    settings: &ConverterSettings,
    descriptor: &mut RsfDescriptor,
) {
    decode_program_id(
        bytes::u64_at(aci, ACI_PROGRAM_ID_OFFSET),
        &mut descriptor.title_info,
    );

    let info = &mut descriptor.access_control_info;
    info.core_version = bytes::u16_at(aci, ACI_CORE_VERSION_OFFSET);

    let flag1 = bytes::u8_at(aci, ACI_FLAG1_OFFSET);
    info.cpu_speed = if flag1 & FLAG1_HIGH_CPU_SPEED != 0 {
        CpuSpeed::Mhz804
    } else {
        CpuSpeed::Mhz268
    };
    info.system_mode_ext = tables::system_mode_ext_name(flag1 & 0xF);
    info.enable_l2_cache = flag1 & FLAG1_ENABLE_L2_CACHE != 0;

    let flag0 = bytes::u8_at(aci, ACI_FLAG0_OFFSET);
    info.affinity_mask = (flag0 >> 2) & 0b11;
    info.ideal_processor = flag0 & 0b11;
    info.system_mode = tables::system_mode_name((flag0 >> 4) & 0xF);

    info.max_cpu = bytes::u8_at(aci, ACI_MAX_CPU_OFFSET);

    descriptor.rom_fs.root_path =
        if bytes::u8_at(aci, storage_info::OTHER_ATTRIBUTES_OFFSET) & NOT_USE_ROMFS == 0 {
            Some(settings.get_romfs_root_path().to_owned())
        } else {
            None
        };

    storage_info::decode_storage_info(aci, info);

    info.file_system_access = bytes::u32_at(aci, ACI_FILESYSTEM_ACCESS_OFFSET);

    info.service_access_control = (0..MAX_SERVICES)
        .map(|i| {
            bytes::nul_terminated_str_at(
                aci,
                ACI_SERVICE_ACCESS_OFFSET + i * SERVICE_NAME_SIZE,
                SERVICE_NAME_SIZE,
            )
        })
        .take_while(|name| !name.is_empty())
        .collect();

    let raw_priority = i32::from(bytes::u8_at(aci, ACI_PRIORITY_OFFSET));
    info.resource_limit_category =
        tables::resource_limit_category_name(bytes::u8_at(aci, ACI_RESOURCE_LIMIT_CATEGORY_OFFSET));

    if info.resource_limit_category == tables::RESOURCE_LIMIT_APPLICATION {
        info.priority = raw_priority - APPLICATION_PRIORITY_BASE;
        descriptor.system_control_info.app_type = AppType::Application;
    } else {
        info.priority = raw_priority;
        descriptor.system_control_info.app_type = AppType::System;
    }

    kernel_caps::decode_kernel_capabilities(aci, info);

    debug!(
        "Access control info: {} services, {} system calls, {} interrupts, {} memory mappings, {} io mappings",
        info.service_access_control.len(),
        info.system_call_access.len(),
        info.interrupt_numbers.len(),
        info.memory_mapping.len(),
        info.io_register_mapping.len()
    );

    arm9_access::decode_arm9_access_control(aci, descriptor);
}

/// Split a program id into unique id, category and the per-category low byte.
pub fn decode_program_id(program_id: u64, title_info: &mut TitleInfo) {
    let low = program_id as u8;

    title_info.unique_id = ((program_id >> 8) & 0xFF_FFFF) as u32;
    title_info.category = tables::category_name((program_id >> 32) as u16);

    match title_info.category {
        "Demo" => title_info.demo_index = low,
        "DlpChild" => title_info.child_index = low,
        "AddOnContents" => title_info.variation = low,
        "Contents" => title_info.contents_index = low,
        _ => title_info.version = low,
    }

    debug!(
        "Program id `0x{:016x}`: unique id 0x{:06x}, category {:?}",
        program_id, title_info.unique_id, title_info.category
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::REGION_SIZE;
    use pretty_assertions::assert_eq;

    fn region() -> Region {
        [0_u8; REGION_SIZE]
    }

    fn put(region: &mut Region, offset: usize, value: &[u8]) {
        region[offset..offset + value.len()].copy_from_slice(value);
    }

    #[test]
    fn test_program_id_version_for_plain_category() {
        let mut title_info = TitleInfo::default();
        decode_program_id(0x0004_0000_0012_3405, &mut title_info);

        assert_eq!(title_info.category, "Application");
        assert_eq!(title_info.unique_id, 0x1234);
        assert_eq!(title_info.version, 0x05);
        assert_eq!(title_info.demo_index, 0);
    }

    #[test]
    fn test_program_id_category_specific_index() {
        let mut demo = TitleInfo::default();
        decode_program_id(0x0004_0002_00AB_CD07, &mut demo);
        assert_eq!(demo.category, "Demo");
        assert_eq!(demo.demo_index, 0x07);
        assert_eq!(demo.version, 0);

        let mut child = TitleInfo::default();
        decode_program_id(0x0004_0001_0000_0102, &mut child);
        assert_eq!(child.child_index, 0x02);

        let mut add_on = TitleInfo::default();
        decode_program_id(0x0004_008C_0000_0103, &mut add_on);
        assert_eq!(add_on.variation, 0x03);

        let mut contents = TitleInfo::default();
        decode_program_id(0x0004_0003_0000_0104, &mut contents);
        assert_eq!(contents.contents_index, 0x04);
        assert_eq!(contents.version, 0);
    }

    #[test]
    fn test_dependencies_stop_at_first_zero() {
        let mut sci = region();
        for (i, title_id) in [0xA_u64, 0xB, 0x0, 0xC].iter().enumerate() {
            put(&mut sci, SCI_DEPENDENCY_LIST_OFFSET + i * 8, &title_id.to_le_bytes());
        }

        let mut descriptor = RsfDescriptor::default();
        decode_system_control_info(&sci, &mut descriptor);

        assert_eq!(descriptor.system_control_info.dependency, vec![0xA, 0xB]);
    }

    #[test]
    fn test_full_dependency_list() {
        let mut sci = region();
        for i in 0..MAX_DEPENDENCIES {
            put(
                &mut sci,
                SCI_DEPENDENCY_LIST_OFFSET + i * 8,
                &(i as u64 + 1).to_le_bytes(),
            );
        }

        let mut descriptor = RsfDescriptor::default();
        decode_system_control_info(&sci, &mut descriptor);

        assert_eq!(descriptor.system_control_info.dependency.len(), MAX_DEPENDENCIES);
        assert_eq!(descriptor.system_control_info.dependency[47], 48);
    }

    #[test]
    fn test_system_control_info_fields() {
        let mut sci = region();
        put(&mut sci, SCI_TITLE_OFFSET, b"AB\0\0CD\0\0");
        put(&mut sci, SCI_FLAG_OFFSET, &[SCI_FLAG_COMPRESS_CODE]);
        put(&mut sci, SCI_REMASTER_VERSION_OFFSET, &0x0102_u16.to_le_bytes());
        put(&mut sci, SCI_STACK_SIZE_OFFSET, &0x4000_u32.to_le_bytes());
        put(&mut sci, SCI_SAVEDATA_SIZE_OFFSET, &0x80000_u64.to_le_bytes());
        put(&mut sci, SCI_JUMP_ID_OFFSET, &0x0004_0000_0012_3400_u64.to_le_bytes());

        let mut descriptor = RsfDescriptor::default();
        decode_system_control_info(&sci, &mut descriptor);

        assert_eq!(descriptor.basic_info.title, "AB");
        assert!(descriptor.option.enable_compress);
        assert!(!descriptor.option.use_on_sd);

        let info = &descriptor.system_control_info;
        assert_eq!(info.remaster_version, 0x0102);
        assert_eq!(info.stack_size, 0x4000);
        assert_eq!(info.save_data_size, 0x80000);
        assert_eq!(info.jump_id, 0x0004_0000_0012_3400);
        assert!(info.dependency.is_empty());
    }

    #[test]
    fn test_application_priority_is_rebased() {
        let mut aci = region();
        put(&mut aci, ACI_PRIORITY_OFFSET, &[40]);
        put(&mut aci, ACI_RESOURCE_LIMIT_CATEGORY_OFFSET, &[0]);

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &ConverterSettings::new(), &mut descriptor);

        assert_eq!(descriptor.access_control_info.priority, 8);
        assert_eq!(descriptor.access_control_info.resource_limit_category, "application");
        assert_eq!(descriptor.system_control_info.app_type, AppType::Application);
    }

    #[test]
    fn test_application_priority_below_base_is_negative() {
        let mut aci = region();
        put(&mut aci, ACI_PRIORITY_OFFSET, &[16]);

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &ConverterSettings::new(), &mut descriptor);

        assert_eq!(descriptor.access_control_info.priority, -16);
    }

    #[test]
    fn test_system_priority_is_kept() {
        let mut aci = region();
        put(&mut aci, ACI_PRIORITY_OFFSET, &[40]);
        put(&mut aci, ACI_RESOURCE_LIMIT_CATEGORY_OFFSET, &[1]);

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &ConverterSettings::new(), &mut descriptor);

        assert_eq!(descriptor.access_control_info.priority, 40);
        assert_eq!(descriptor.access_control_info.resource_limit_category, "sysapplet");
        assert_eq!(descriptor.system_control_info.app_type, AppType::System);
    }

    #[test]
    fn test_process_flags() {
        let mut aci = region();
        put(&mut aci, ACI_CORE_VERSION_OFFSET, &2_u16.to_le_bytes());
        put(&mut aci, ACI_FLAG1_OFFSET, &[0b0000_0011]);
        // system mode 3 (80MB), affinity mask 1, ideal processor 2
        put(&mut aci, ACI_FLAG0_OFFSET, &[(3 << 4) | (1 << 2) | 2]);
        put(&mut aci, ACI_MAX_CPU_OFFSET, &[0x9E]);

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &ConverterSettings::new(), &mut descriptor);

        let info = &descriptor.access_control_info;
        assert_eq!(info.core_version, 2);
        assert_eq!(info.cpu_speed, CpuSpeed::Mhz804);
        assert_eq!(info.system_mode_ext, "124MB");
        assert!(info.enable_l2_cache);
        assert_eq!(info.system_mode, "80MB");
        assert_eq!(info.affinity_mask, 1);
        assert_eq!(info.ideal_processor, 2);
        assert_eq!(info.max_cpu, 0x9E);
    }

    #[test]
    fn test_romfs_presence() {
        let settings = ConverterSettings::new().romfs_root_path("data/romfs");

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&region(), &settings, &mut descriptor);
        assert_eq!(descriptor.rom_fs.root_path.as_deref(), Some("data/romfs"));

        let mut aci = region();
        put(&mut aci, storage_info::OTHER_ATTRIBUTES_OFFSET, &[NOT_USE_ROMFS]);
        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &settings, &mut descriptor);
        assert_eq!(descriptor.rom_fs.root_path, None);
    }

    #[test]
    fn test_service_list_stops_at_empty_slot() {
        let mut aci = region();
        put(&mut aci, ACI_SERVICE_ACCESS_OFFSET, b"APT:U\0\0\0");
        put(&mut aci, ACI_SERVICE_ACCESS_OFFSET + 8, b"fs:USER\0");
        put(&mut aci, ACI_SERVICE_ACCESS_OFFSET + 24, b"hid:USER");

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &ConverterSettings::new(), &mut descriptor);

        assert_eq!(
            descriptor.access_control_info.service_access_control,
            vec!["APT:U".to_string(), "fs:USER".to_string()]
        );
    }

    #[test]
    fn test_full_service_list() {
        let mut aci = region();
        for i in 0..MAX_SERVICES {
            put(&mut aci, ACI_SERVICE_ACCESS_OFFSET + i * 8, format!("svc{:02}", i).as_bytes());
        }

        let mut descriptor = RsfDescriptor::default();
        decode_access_control_info(&aci, &ConverterSettings::new(), &mut descriptor);

        let services = &descriptor.access_control_info.service_access_control;
        assert_eq!(services.len(), MAX_SERVICES);
        assert_eq!(services[33], "svc33");
    }
}
