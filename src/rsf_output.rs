//! Renders an `RsfDescriptor` as an RSF project specification.
//!
//! The output is a complete template: every field is written, and fields that are unset,
//! zero or disabled are written behind a `#` so they can be re-enabled by hand.
//! Group names, keys and the guidance comments are read by name by `makerom`.
use crate::ConverterSettings;
use crate::err::SerializationResult;
use crate::model::{AccessControlInfo, RsfDescriptor, SystemControlInfo};
use crate::tables;

use log::trace;
use std::fmt::Display;
use std::io::Write;

const COMMENT: &str = "#";

pub struct RsfOutput<W: Write> {
    writer: W,
    indent: String,
}

impl<W: Write> RsfOutput<W> {
    pub fn with_writer(target: W, settings: &ConverterSettings) -> Self {
        RsfOutput {
            writer: target,
            indent: settings.get_indent().to_owned(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn write_descriptor(&mut self, descriptor: &RsfDescriptor) -> SerializationResult<()> {
        self.write_basic_info(descriptor)?;
        self.write_blank_line()?;
        self.write_rom_fs(descriptor)?;
        self.write_blank_line()?;
        self.write_title_info(descriptor)?;
        self.write_blank_line()?;
        self.write_option(descriptor)?;
        self.write_blank_line()?;
        self.write_access_control_info(&descriptor.access_control_info)?;
        self.write_blank_line()?;
        self.write_system_control_info(&descriptor.system_control_info)?;
        self.writer.flush()?;

        Ok(())
    }

    fn write_basic_info(&mut self, descriptor: &RsfDescriptor) -> SerializationResult<()> {
        let basic_info = &descriptor.basic_info;

        self.write_title("BasicInfo", 0)?;
        self.write_info("Title", quoted(&basic_info.title), 1)?;
        self.write_info("CompanyCode", quoted(&basic_info.company_code), 1)?;
        self.write_info("ProductCode", quoted(&basic_info.product_code), 1)?;
        match basic_info.content_type {
            Some(content_type) => {
                self.write_info("ContentType", quoted(content_type.as_str()), 1)?
            }
            None => self.write_inactive_info("ContentType", quoted(""), 1)?,
        }
        self.write_info(
            "Logo",
            format_args!(
                "{} # Nintendo / Licensed / Distributed / iQue / iQueForSystem",
                basic_info.logo.as_str()
            ),
            1,
        )
    }

    fn write_rom_fs(&mut self, descriptor: &RsfDescriptor) -> SerializationResult<()> {
        self.write_title("RomFs", 0)?;
        match &descriptor.rom_fs.root_path {
            Some(path) => self.write_info("RootPath", path, 1),
            None => self.write_inactive_info("RootPath", "", 1),
        }
    }

    fn write_title_info(&mut self, descriptor: &RsfDescriptor) -> SerializationResult<()> {
        let title_info = &descriptor.title_info;

        self.write_title("TitleInfo", 0)?;
        match title_info.platform {
            Some(platform) => self.write_info("Platform", platform.as_str(), 1)?,
            None => self.write_inactive_info("Platform", "", 1)?,
        }
        self.write_field(
            !title_info.category.is_empty(),
            "Category",
            title_info.category,
            1,
        )?;
        self.write_info("UniqueId", format_args!("0x{:06x}", title_info.unique_id), 1)?;

        // Only one index applies to a title; version is the fallback.
        let (key, value) = [
            ("ContentsIndex", title_info.contents_index),
            ("Variation", title_info.variation),
            ("ChildIndex", title_info.child_index),
            ("DemoIndex", title_info.demo_index),
        ]
        .into_iter()
        .find(|(_, value)| *value != 0)
        .unwrap_or(("Version", title_info.version));

        self.write_info(key, format_args!("0x{:02x}", value), 1)
    }

    fn write_option(&mut self, descriptor: &RsfDescriptor) -> SerializationResult<()> {
        let option = &descriptor.option;

        self.write_title("Option", 0)?;
        self.write_info("EnableCrypt", option.enable_crypt, 1)?;
        self.write_info("EnableCompress", option.enable_compress, 1)?;
        self.write_info("FreeProductCode", option.free_product_code, 1)?;
        self.write_info("UseOnSD", option.use_on_sd, 1)
    }

    fn write_access_control_info(&mut self, info: &AccessControlInfo) -> SerializationResult<()> {
        self.write_title("AccessControlInfo", 0)?;
        self.write_info("CoreVersion", info.core_version, 1)?;
        self.write_blank_line()?;

        self.write_comment("Exheader Format Version", 1)?;
        self.write_info("DescVersion", info.desc_version, 1)?;
        self.write_blank_line()?;

        self.write_comment("Minimum Required Kernel Version", 1)?;
        self.write_info("ReleaseKernelMajor", quoted(info.release_kernel_major), 1)?;
        self.write_info("ReleaseKernelMinor", quoted(info.release_kernel_minor), 1)?;
        self.write_blank_line()?;

        self.write_save_data(info)?;
        self.write_blank_line()?;

        self.write_file_system_access(info)?;
        self.write_blank_line()?;

        self.write_list(
            "IoAccessControl",
            info.io_access_control.iter(),
            !info.io_access_control.is_empty(),
        )?;
        self.write_blank_line()?;

        self.write_process_settings(info)?;
        self.write_blank_line()?;

        self.write_title("IORegisterMapping", 1)?;
        for range in &info.io_register_mapping {
            self.write_item(range, 2)?;
        }
        self.write_title("MemoryMapping", 1)?;
        for range in &info.memory_mapping {
            self.write_item(range, 2)?;
        }
        self.write_blank_line()?;

        self.write_comment("Accessible SVCs, <Name>:<ID>", 1)?;
        self.write_title("SystemCallAccess", 1)?;
        for &id in &info.system_call_access {
            match tables::svc_name(id) {
                tables::UNKNOWN => trace!("Skipping unnamed system call {:#x}", id),
                name => self.write_mapping(name, id, 2)?,
            }
        }
        self.write_blank_line()?;

        self.write_list(
            "InterruptNumbers",
            info.interrupt_numbers
                .iter()
                .map(|interrupt| format!("0x{:02x}", interrupt)),
            !info.interrupt_numbers.is_empty(),
        )?;
        self.write_blank_line()?;

        self.write_comment("Service List", 1)?;
        self.write_comment("Maximum 34 services (32 if firmware is prior to 9.6.0)", 1)?;
        self.write_title("ServiceAccessControl", 1)?;
        for service in &info.service_access_control {
            self.write_item(service, 2)?;
        }

        Ok(())
    }

    fn write_save_data(&mut self, info: &AccessControlInfo) -> SerializationResult<()> {
        self.write_comment("ExtData", 1)?;
        self.write_info("UseExtSaveData", info.use_ext_save_data, 1)?;
        self.write_field(
            info.use_ext_save_data,
            "ExtSaveDataId",
            format_args!("{:#x}", info.ext_save_data_id),
            1,
        )?;
        self.write_blank_line()?;

        let ids = [
            ("SystemSaveDataId1", info.system_save_data_id1),
            ("SystemSaveDataId2", info.system_save_data_id2),
            ("OtherUserSaveDataId1", info.other_user_save_data_ids[0]),
            ("OtherUserSaveDataId2", info.other_user_save_data_ids[1]),
            ("OtherUserSaveDataId3", info.other_user_save_data_ids[2]),
        ];
        for (key, id) in ids {
            self.write_field(id != 0, key, format_args!("{:#x}", id), 1)?;
        }

        self.write_list(
            "AccessibleSaveDataIds",
            info.accessible_save_data_ids
                .iter()
                .map(|id| format!("{:#x}", id)),
            !info.accessible_save_data_ids.is_empty(),
        )
    }

    fn write_file_system_access(&mut self, info: &AccessControlInfo) -> SerializationResult<()> {
        self.write_comment("FS:USER Archive Access Permissions", 1)?;
        self.write_comment("Uncomment as required", 1)?;
        self.write_title("FileSystemAccess", 1)?;

        for bit in 0..tables::FILESYSTEM_ACCESS_BITS {
            let name = tables::filesystem_access_name(bit);
            if info.file_system_access & (1 << bit) != 0 {
                self.write_item(name, 2)?;
            } else {
                self.write_inactive_item(name, 2)?;
            }
        }

        Ok(())
    }

    fn write_process_settings(&mut self, info: &AccessControlInfo) -> SerializationResult<()> {
        self.write_comment("Process Settings", 1)?;
        self.write_field(
            !info.memory_type.is_empty(),
            "MemoryType",
            format_args!("{} # Application/System/Base", info.memory_type),
            1,
        )?;
        self.write_field(
            !info.resource_limit_category.is_empty(),
            "ResourceLimitCategory",
            format_args!(
                "{} # Application/Sysapplet/Libapplet/Other",
                info.resource_limit_category
            ),
            1,
        )?;
        self.write_field(
            !info.system_mode.is_empty(),
            "SystemMode",
            format_args!("{} # 64MB(Default)/96MB/80MB/72MB/32MB", info.system_mode),
            1,
        )?;
        self.write_info("IdealProcessor", info.ideal_processor, 1)?;
        self.write_info("AffinityMask", info.affinity_mask, 1)?;
        self.write_info("Priority", info.priority, 1)?;
        self.write_info("MaxCpu", format_args!("{:#x}", info.max_cpu), 1)?;
        self.write_info(
            "HandleTableSize",
            format_args!("{:#x}", info.handle_table_size),
            1,
        )?;

        let flags = [
            ("DisableDebug", info.disable_debug),
            ("EnableForceDebug", info.enable_force_debug),
            ("CanWriteSharedPage", info.can_write_shared_page),
            ("CanUsePrivilegedPriority", info.can_use_privileged_priority),
            ("CanUseNonAlphabetAndNumber", info.can_use_non_alphabet_and_number),
            ("PermitMainFunctionArgument", info.permit_main_function_argument),
            ("CanShareDeviceMemory", info.can_share_device_memory),
            ("UseOtherVariationSaveData", info.use_other_variation_save_data),
            ("RunnableOnSleep", info.runnable_on_sleep),
            ("SpecialMemoryArrange", info.special_memory_arrange),
        ];
        for (key, value) in flags {
            self.write_info(key, value, 1)?;
        }
        self.write_blank_line()?;

        self.write_field(
            !info.system_mode_ext.is_empty(),
            "SystemModeExt",
            format_args!(
                "{} # Legacy(Default)/124MB/178MB  Legacy:Use Old3DS SystemMode",
                info.system_mode_ext
            ),
            1,
        )?;
        self.write_info(
            "CpuSpeed",
            format_args!("{} # 256MHz(Default)/804MHz", info.cpu_speed.as_str()),
            1,
        )?;
        self.write_info(
            "EnableL2Cache",
            format_args!("{} # false(default)/true", info.enable_l2_cache),
            1,
        )?;
        self.write_info("CanAccessCore2", info.can_access_core2, 1)
    }

    fn write_system_control_info(&mut self, info: &SystemControlInfo) -> SerializationResult<()> {
        self.write_title("SystemControlInfo", 0)?;
        self.write_info("AppType", info.app_type.as_str(), 1)?;
        self.write_info("StackSize", format_args!("{:#x}", info.stack_size), 1)?;
        self.write_info(
            "RemasterVersion",
            format_args!("{:#x}", info.remaster_version),
            1,
        )?;
        self.write_info("JumpId", format_args!("0x{:06x}", info.jump_id), 1)?;
        self.write_info("SaveDataSize", format_args!("{}KB", info.save_data_size), 1)?;
        self.write_blank_line()?;

        self.write_comment(
            "Modules that run services listed above should be included below",
            1,
        )?;
        self.write_comment("Maximum 48 dependencies", 1)?;
        self.write_comment("<module name>:<module titleid>", 1)?;
        self.write_title("Dependency", 1)?;
        for &title_id in &info.dependency {
            self.write_mapping(
                tables::dependency_module_name(title_id),
                format_args!("{:#x}", title_id),
                2,
            )?;
        }

        Ok(())
    }

    /// A list whose header is commented out when there is nothing to list.
    fn write_list<I>(&mut self, title: &str, items: I, active: bool) -> SerializationResult<()>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        if active {
            self.write_title(title, 1)?;
        } else {
            self.write_indent(1)?;
            writeln!(self.writer, "{}{}:", COMMENT, title)?;
        }

        for item in items {
            self.write_item(item, 2)?;
        }

        Ok(())
    }

    fn write_field(
        &mut self,
        active: bool,
        key: &str,
        value: impl Display,
        level: usize,
    ) -> SerializationResult<()> {
        if active {
            self.write_info(key, value, level)
        } else {
            self.write_inactive_info(key, value, level)
        }
    }

    fn write_indent(&mut self, level: usize) -> SerializationResult<()> {
        for _ in 0..level {
            self.writer.write_all(self.indent.as_bytes())?;
        }
        Ok(())
    }

    fn write_title(&mut self, title: &str, level: usize) -> SerializationResult<()> {
        self.write_indent(level)?;
        writeln!(self.writer, "{}:", title)?;
        Ok(())
    }

    fn write_info(&mut self, key: &str, value: impl Display, level: usize) -> SerializationResult<()> {
        self.write_indent(level)?;
        writeln!(self.writer, "{} : {}", key, value)?;
        Ok(())
    }

    fn write_inactive_info(
        &mut self,
        key: &str,
        value: impl Display,
        level: usize,
    ) -> SerializationResult<()> {
        self.write_indent(level)?;
        writeln!(self.writer, "{}{} : {}", COMMENT, key, value)?;
        Ok(())
    }

    fn write_item(&mut self, value: impl Display, level: usize) -> SerializationResult<()> {
        self.write_indent(level)?;
        writeln!(self.writer, " - {}", value)?;
        Ok(())
    }

    /// The comment marker goes in front of the indent so the item lines up when uncommented.
    fn write_inactive_item(&mut self, value: impl Display, level: usize) -> SerializationResult<()> {
        self.writer.write_all(COMMENT.as_bytes())?;
        self.write_item(value, level)
    }

    /// `name: value` entries of the SVC and dependency maps.
    fn write_mapping(
        &mut self,
        name: &str,
        value: impl Display,
        level: usize,
    ) -> SerializationResult<()> {
        self.write_indent(level)?;
        writeln!(self.writer, "{}: {}", name, value)?;
        Ok(())
    }

    fn write_comment(&mut self, text: &str, level: usize) -> SerializationResult<()> {
        self.write_indent(level)?;
        writeln!(self.writer, "{} {}", COMMENT, text)?;
        Ok(())
    }

    fn write_blank_line(&mut self) -> SerializationResult<()> {
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

fn quoted(value: impl Display) -> String {
    format!("\"{}\"", value)
}
