use crate::model::{ContentType, Logo, Platform, RsfDescriptor};
use crate::utils::Region;
use crate::utils::bytes;

use log::debug;

const COMPANY_CODE_OFFSET: usize = 0x110;
const PRODUCT_CODE_OFFSET: usize = 0x150;
const PRODUCT_CODE_SIZE: usize = 0x10;
const PLATFORM_OFFSET: usize = 0x18C;
const CONTENT_TYPE_OFFSET: usize = 0x18D;
const KEY_CONFIG_OFFSET: usize = 0x18F;
const LOGO_SIZE_OFFSET: usize = 0x19C;

/// Set in the key config flags when the content is stored unencrypted.
const NO_CRYPTO: u8 = 1 << 2;

const PRODUCT_CODE_PLATFORMS: [&[u8]; 2] = [b"CTR", b"KTR"];

/// Decodes the NCCH header fields that end up in the project specification.
pub fn decode_ncch_header(ncch: &Region, descriptor: &mut RsfDescriptor) {
    let basic_info = &mut descriptor.basic_info;
    let option = &mut descriptor.option;

    option.enable_crypt = bytes::u8_at(ncch, KEY_CONFIG_OFFSET) & NO_CRYPTO == 0;

    let product_code = &ncch[PRODUCT_CODE_OFFSET..PRODUCT_CODE_OFFSET + PRODUCT_CODE_SIZE];
    basic_info.product_code =
        bytes::nul_terminated_str_at(ncch, PRODUCT_CODE_OFFSET, PRODUCT_CODE_SIZE);
    option.free_product_code = !is_conforming_product_code(product_code);

    basic_info.company_code = bytes::nul_terminated_str_at(ncch, COMPANY_CODE_OFFSET, 2);

    descriptor.title_info.platform = Platform::from_code(bytes::u8_at(ncch, PLATFORM_OFFSET));
    basic_info.content_type = ContentType::from_code(bytes::u8_at(ncch, CONTENT_TYPE_OFFSET) >> 2);

    // Only the presence of a logo region is checked, its hash is not compared against the
    // known retail logos.
    basic_info.logo = if bytes::u32_at(ncch, LOGO_SIZE_OFFSET) != 0 {
        Logo::Homebrew
    } else {
        Logo::Empty
    };

    debug!(
        "NCCH header: product code {:?}, free product code: {}, platform: {:?}, content type: {:?}",
        basic_info.product_code,
        option.free_product_code,
        descriptor.title_info.platform,
        basic_info.content_type
    );
}

/// A conforming product code looks like `CTR-P-XXXX`: a platform tag, hyphens at 3 and 5, and
/// alphanumerics everywhere else up to index 9.
///
/// The raw field is checked, so a code shorter than ten characters fails on its NUL padding.
pub fn is_conforming_product_code(product_code: &[u8]) -> bool {
    if product_code.len() < 10 {
        return false;
    }

    if !PRODUCT_CODE_PLATFORMS.contains(&&product_code[0..3]) {
        return false;
    }

    product_code[3..10]
        .iter()
        .enumerate()
        .all(|(i, &c)| match i + 3 {
            3 | 5 => c == b'-',
            _ => c.is_ascii_alphanumeric(),
        })
}
