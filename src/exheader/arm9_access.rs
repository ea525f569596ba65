use bitflags::bitflags;

use crate::model::RsfDescriptor;
use crate::utils::Region;
use crate::utils::bytes;

pub const ARM9_ACCESS_CONTROL_OFFSET: usize = 0x1F0;
pub const DESCRIPTOR_VERSION_OFFSET: usize = 0x1FF;

bitflags! {
    /// First word of the ARM9 (filesystem process) access control descriptors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Arm9Access: u32 {
        const FS_MOUNT_NAND = 1 << 0;
        const FS_MOUNT_NAND_RO_WRITE = 1 << 1;
        const FS_MOUNT_TWLN = 1 << 2;
        const FS_MOUNT_WNAND = 1 << 3;
        const FS_MOUNT_CARD_SPI = 1 << 4;
        const USE_SDIF3 = 1 << 5;
        const CREATE_SEED = 1 << 6;
        const USE_CARD_SPI = 1 << 7;
        const SD_APPLICATION = 1 << 8;
    }
}

/// RSF names of the `IoAccessControl` entries, in output order.
const IO_ACCESS_CONTROL_NAMES: [(Arm9Access, &str); 8] = [
    (Arm9Access::FS_MOUNT_NAND, "FsMountNand"),
    (Arm9Access::FS_MOUNT_NAND_RO_WRITE, "FsMountNandRoWrite"),
    (Arm9Access::FS_MOUNT_TWLN, "FsMountTwln"),
    (Arm9Access::FS_MOUNT_WNAND, "FsMountWnand"),
    (Arm9Access::FS_MOUNT_CARD_SPI, "FsMountCardSpi"),
    (Arm9Access::USE_SDIF3, "UseSdif3"),
    (Arm9Access::CREATE_SEED, "CreateSeed"),
    (Arm9Access::USE_CARD_SPI, "UseCardSpi"),
];

pub(crate) fn decode_arm9_access_control(aci: &Region, descriptor: &mut RsfDescriptor) {
    let access =
        Arm9Access::from_bits_truncate(bytes::u32_at(aci, ARM9_ACCESS_CONTROL_OFFSET));
    let info = &mut descriptor.access_control_info;

    info.io_access_control.extend(
        IO_ACCESS_CONTROL_NAMES
            .iter()
            .filter(|(flag, _)| access.contains(*flag))
            .map(|(_, name)| *name),
    );

    if access.contains(Arm9Access::SD_APPLICATION) {
        descriptor.option.use_on_sd = true;
    }

    info.desc_version = bytes::u8_at(aci, DESCRIPTOR_VERSION_OFFSET);
}
