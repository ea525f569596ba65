use log::debug;

use crate::model::AccessControlInfo;
use crate::utils::Region;
use crate::utils::bytes;

pub const EXTDATA_ID_OFFSET: usize = 0x30;
pub const SYSTEM_SAVEDATA_ID1_OFFSET: usize = 0x38;
pub const SYSTEM_SAVEDATA_ID2_OFFSET: usize = 0x3C;
pub const STORAGE_ACCESSIBLE_UNIQUE_IDS_OFFSET: usize = 0x40;
pub const OTHER_ATTRIBUTES_OFFSET: usize = 0x4F;

/// Other attributes: the unique id words hold extended savedata access ids.
pub const USE_EXTENDED_SAVEDATA_ACCESS: u8 = 1 << 1;

const USE_OTHER_VARIATION_SAVEDATA_BIT: u32 = 60;
const UNIQUE_ID_BITS: u32 = 20;
const UNIQUE_ID_MASK: u64 = 0xF_FFFF;

/// Split a storage word into its three 20-bit ids, highest field first.
fn unique_ids(word: u64) -> impl Iterator<Item = u32> {
    (0..3)
        .rev()
        .map(move |i| ((word >> (UNIQUE_ID_BITS * i)) & UNIQUE_ID_MASK) as u32)
}

pub(crate) fn decode_storage_info(aci: &Region, info: &mut AccessControlInfo) {
    let extdata_word = bytes::u64_at(aci, EXTDATA_ID_OFFSET);
    let unique_ids_word = bytes::u64_at(aci, STORAGE_ACCESSIBLE_UNIQUE_IDS_OFFSET);

    info.use_other_variation_save_data =
        (unique_ids_word >> USE_OTHER_VARIATION_SAVEDATA_BIT) & 1 != 0;

    if bytes::u8_at(aci, OTHER_ATTRIBUTES_OFFSET) & USE_EXTENDED_SAVEDATA_ACCESS != 0 {
        // Each word is a zero-terminated list; the second word continues the first.
        for word in [unique_ids_word, extdata_word] {
            info.accessible_save_data_ids
                .extend(unique_ids(word).take_while(|&id| id != 0));
        }

        debug!(
            "Extended savedata access: {:x?}",
            info.accessible_save_data_ids
        );
    } else {
        if extdata_word != 0 {
            info.use_ext_save_data = true;
            info.ext_save_data_id = extdata_word as u32;
        }

        // Ids go to the first free slot, in the order they are found, regardless of which
        // field they came from.
        for id in unique_ids(unique_ids_word).filter(|&id| id != 0) {
            if let Some(slot) = info
                .other_user_save_data_ids
                .iter_mut()
                .find(|slot| **slot == 0)
            {
                *slot = id;
            }
        }

        debug!(
            "Legacy savedata access: ext savedata {:?}, other user ids {:x?}",
            info.use_ext_save_data.then_some(info.ext_save_data_id),
            info.other_user_save_data_ids
        );
    }

    info.system_save_data_id1 = bytes::u32_at(aci, SYSTEM_SAVEDATA_ID1_OFFSET);
    info.system_save_data_id2 = bytes::u32_at(aci, SYSTEM_SAVEDATA_ID2_OFFSET);
}
