//! ARM11 kernel capability descriptors.
//!
//! Each descriptor is a 32-bit word whose run of leading one bits is its type tag. The bits
//! below the first zero are the payload.

use bitflags::bitflags;
use log::trace;

use crate::model::{AccessControlInfo, MemoryRange};
use crate::tables;
use crate::utils::Region;
use crate::utils::bytes;

pub const KERNEL_CAPS_OFFSET: usize = 0x170;
pub const KERNEL_CAPS_COUNT: usize = 28;

const INTERRUPT_TAG: u32 = 0xE000_0000;
const SYSTEM_CALL_TAG: u32 = 0xF000_0000;
const KERNEL_VERSION_TAG: u32 = 0xFC00_0000;
const HANDLE_TABLE_SIZE_TAG: u32 = 0xFE00_0000;
const OTHER_CAPABILITIES_TAG: u32 = 0xFF00_0000;
const MAPPING_TAG: u32 = 0xFF80_0000;
const RESERVED_TAG: u32 = 0xFFC0_0000;

const SYSTEM_CALLS_PER_BUCKET: u32 = 24;
const MAPPING_PAGE_MASK: u32 = 0xF_FFFF;
const MAPPING_FLAG: u32 = 1 << 20;

/// Keep the leading run of one bits of `descriptor` and clear everything from the first zero
/// bit down. A descriptor without a leading one bit has an empty tag.
pub fn descriptor_tag(descriptor: u32) -> u32 {
    u32::MAX
        .checked_shl(32 - descriptor.leading_ones())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    InterruptNumbers,
    SystemCallAccess,
    KernelVersion,
    HandleTableSize,
    OtherCapabilities,
    /// Start of a two-word range descriptor; the next word holds the end of the range.
    MemoryMapping,
    Reserved,
    Unknown(u32),
}

impl DescriptorKind {
    pub fn from_descriptor(descriptor: u32) -> DescriptorKind {
        match descriptor_tag(descriptor) {
            INTERRUPT_TAG => DescriptorKind::InterruptNumbers,
            SYSTEM_CALL_TAG => DescriptorKind::SystemCallAccess,
            KERNEL_VERSION_TAG => DescriptorKind::KernelVersion,
            HANDLE_TABLE_SIZE_TAG => DescriptorKind::HandleTableSize,
            OTHER_CAPABILITIES_TAG => DescriptorKind::OtherCapabilities,
            MAPPING_TAG => DescriptorKind::MemoryMapping,
            RESERVED_TAG => DescriptorKind::Reserved,
            other => DescriptorKind::Unknown(other),
        }
    }
}

bitflags! {
    /// Payload of the "other capabilities" descriptor, apart from the memory type nibble.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KernelFlags: u32 {
        const PERMIT_DEBUG = 1 << 0;
        const FORCE_DEBUG = 1 << 1;
        const CAN_USE_NON_ALPHABET_AND_NUMBER = 1 << 2;
        const CAN_WRITE_SHARED_PAGE = 1 << 3;
        const CAN_USE_PRIVILEGED_PRIORITY = 1 << 4;
        const PERMIT_MAIN_FUNCTION_ARGUMENT = 1 << 5;
        const CAN_SHARE_DEVICE_MEMORY = 1 << 6;
        const RUNNABLE_ON_SLEEP = 1 << 7;
        const SPECIAL_MEMORY_ARRANGE = 1 << 12;
        const CAN_ACCESS_CORE2 = 1 << 13;
    }
}

#[inline]
fn descriptor_at(aci: &Region, index: usize) -> u32 {
    bytes::u32_at(aci, KERNEL_CAPS_OFFSET + index * 4)
}

pub(crate) fn decode_kernel_capabilities(aci: &Region, info: &mut AccessControlInfo) {
    let mut index = 0;

    while index < KERNEL_CAPS_COUNT {
        let descriptor = descriptor_at(aci, index);
        let kind = DescriptorKind::from_descriptor(descriptor);

        trace!(
            "Kernel descriptor {:2}: `0x{:08x}` -> {:?}",
            index, descriptor, kind
        );

        match kind {
            DescriptorKind::InterruptNumbers => {
                decode_interrupt_numbers(descriptor, &mut info.interrupt_numbers)
            }
            DescriptorKind::SystemCallAccess => {
                decode_system_calls(descriptor, &mut info.system_call_access)
            }
            DescriptorKind::KernelVersion => {
                info.release_kernel_major = ((descriptor >> 8) & 0xFF) as u8;
                info.release_kernel_minor = (descriptor & 0xFF) as u8;
            }
            DescriptorKind::HandleTableSize => {
                info.handle_table_size = descriptor & 0x7_FFFF;
            }
            DescriptorKind::OtherCapabilities => decode_other_capabilities(descriptor, info),
            DescriptorKind::MemoryMapping => {
                // The end word is consumed here. For a start word in the last slot it is read
                // from the reserved bytes that follow the descriptor array.
                index += 1;
                let end = descriptor_at(aci, index);
                let (range, is_static) = decode_mapping(descriptor, end);

                if is_static {
                    info.memory_mapping.push(range);
                } else {
                    info.io_register_mapping.push(range);
                }
            }
            DescriptorKind::Reserved | DescriptorKind::Unknown(_) => {}
        }

        index += 1;
    }
}

/// Four 7-bit interrupt numbers, most significant group first. Zero groups are unused slots.
fn decode_interrupt_numbers(descriptor: u32, out: &mut Vec<u8>) {
    for group in (0..4).rev() {
        let interrupt = ((descriptor >> (group * 7)) & 0x7F) as u8;
        if interrupt != 0 {
            out.push(interrupt);
        }
    }
}

fn decode_system_calls(descriptor: u32, out: &mut Vec<u32>) {
    let bucket = (descriptor >> 24) & 0b111;

    for bit in 0..SYSTEM_CALLS_PER_BUCKET {
        if (descriptor >> bit) & 1 != 0 {
            out.push(bit + SYSTEM_CALLS_PER_BUCKET * bucket);
        }
    }
}

fn decode_other_capabilities(descriptor: u32, info: &mut AccessControlInfo) {
    let flags = KernelFlags::from_bits_truncate(descriptor);

    info.disable_debug = !flags.contains(KernelFlags::PERMIT_DEBUG);
    info.enable_force_debug = flags.contains(KernelFlags::FORCE_DEBUG);
    info.can_use_non_alphabet_and_number =
        flags.contains(KernelFlags::CAN_USE_NON_ALPHABET_AND_NUMBER);
    info.can_write_shared_page = flags.contains(KernelFlags::CAN_WRITE_SHARED_PAGE);
    info.can_use_privileged_priority = flags.contains(KernelFlags::CAN_USE_PRIVILEGED_PRIORITY);
    info.permit_main_function_argument =
        flags.contains(KernelFlags::PERMIT_MAIN_FUNCTION_ARGUMENT);
    info.can_share_device_memory = flags.contains(KernelFlags::CAN_SHARE_DEVICE_MEMORY);
    info.runnable_on_sleep = flags.contains(KernelFlags::RUNNABLE_ON_SLEEP);
    info.memory_type = tables::memory_type_name(((descriptor >> 8) & 0xF) as u8);
    info.special_memory_arrange = flags.contains(KernelFlags::SPECIAL_MEMORY_ARRANGE);
    info.can_access_core2 = flags.contains(KernelFlags::CAN_ACCESS_CORE2);
}

/// Returns the inclusive range described by a start/end descriptor pair, and whether it is a
/// static memory mapping (as opposed to an IO register mapping).
fn decode_mapping(start: u32, end: u32) -> (MemoryRange, bool) {
    let is_static = end & MAPPING_FLAG != 0;

    let range = MemoryRange {
        start: (start & MAPPING_PAGE_MASK) << 12,
        end: ((end & MAPPING_PAGE_MASK) << 12).wrapping_sub(1),
        read_only: is_static && start & MAPPING_FLAG != 0,
    };

    (range, is_static)
}
