//! Shielded address classification and Sapling activation

use serde::Serialize;
use std::fmt;

/// Sapling activates on mainnet above this height
pub const SAPLING_ACTIVATION_MAINNET: u32 = 419_200;
/// Sapling activates on testnet above this height
pub const SAPLING_ACTIVATION_TESTNET: u32 = 280_000;

const SAPLING_PREFIX_MAINNET: &str = "zs";
const SAPLING_PREFIX_TESTNET: &str = "ztestsapling";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Transparent,
    Sprout,
    Sapling,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AddressKind::Transparent => write!(f, "transparent"),
            AddressKind::Sprout => write!(f, "sprout"),
            AddressKind::Sapling => write!(f, "sapling"),
        }
    }
}

/// Any shielded address starts with `z`
pub fn is_z_address(addr: &str) -> bool {
    addr.starts_with('z')
}

/// Sapling prefixes differ per network, so a testnet Sapling address is not
/// a Sapling address on mainnet and vice versa.
pub fn is_sapling_address(addr: &str, testnet: bool) -> bool {
    if testnet {
        addr.starts_with(SAPLING_PREFIX_TESTNET)
    } else {
        addr.starts_with(SAPLING_PREFIX_MAINNET)
    }
}

pub fn is_sprout_address(addr: &str, testnet: bool) -> bool {
    is_z_address(addr) && !is_sapling_address(addr, testnet)
}

/// Only checks prefixes; the address is not otherwise validated.
pub fn classify(addr: &str, testnet: bool) -> AddressKind {
    if is_sapling_address(addr, testnet) {
        AddressKind::Sapling
    } else if is_z_address(addr) {
        AddressKind::Sprout
    } else {
        AddressKind::Transparent
    }
}

pub fn is_sapling_active(block_number: u32, testnet: bool) -> bool {
    if testnet {
        block_number > SAPLING_ACTIVATION_TESTNET
    } else {
        block_number > SAPLING_ACTIVATION_MAINNET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN_SAPLING: &str = "zs1z7rejlpsa98s2rrrfkwmaxu53e4ue0ulcrw0h4x5g8jl04tak0d3mm47vdtahatqrlkngh9sly";
    const TEST_SAPLING: &str = "ztestsapling1ys3ct9fucyh0wpnx0vjxxy8lg4vjz9z9kdzy2tk2wapt2hxwvgqqx0yx2ydvt2dlc4tdqfq3l6";
    const SPROUT: &str = "zcU1Cd6zYyZCd2VJF8yKgmzjxdiiU1rgTTjEwoN1CGUWCziPkUTXUjXmX7TMqdMNsTfuiGN1jQoVN4kGxUR4sAPN4XZ7pxb";
    const TRANSPARENT: &str = "t1Hsc1LR8yKnbbe3twRp88p6vFfC5t7DLbs";

    #[test]
    fn test_z_address() {
        assert!(is_z_address(MAIN_SAPLING));
        assert!(is_z_address(SPROUT));
        assert!(!is_z_address(TRANSPARENT));
        assert!(!is_z_address(""));
    }

    #[test]
    fn test_sapling_depends_on_network() {
        assert!(is_sapling_address(MAIN_SAPLING, false));
        assert!(!is_sapling_address(MAIN_SAPLING, true));
        assert!(is_sapling_address(TEST_SAPLING, true));
        assert!(!is_sapling_address(TEST_SAPLING, false));
    }

    #[test]
    fn test_sprout() {
        assert!(is_sprout_address(SPROUT, false));
        assert!(is_sprout_address(SPROUT, true));
        assert!(!is_sprout_address(MAIN_SAPLING, false));
        assert!(!is_sprout_address(TRANSPARENT, false));
        // a mainnet sapling address seen on testnet falls through to sprout
        assert!(is_sprout_address(MAIN_SAPLING, true));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(MAIN_SAPLING, false), AddressKind::Sapling);
        assert_eq!(classify(TEST_SAPLING, true), AddressKind::Sapling);
        assert_eq!(classify(SPROUT, false), AddressKind::Sprout);
        assert_eq!(classify(TRANSPARENT, false), AddressKind::Transparent);
        assert_eq!(AddressKind::Sapling.to_string(), "sapling");
    }

    #[test]
    fn test_sapling_activation_is_strictly_after_height() {
        assert!(!is_sapling_active(419_200, false));
        assert!(is_sapling_active(419_201, false));
        assert!(!is_sapling_active(280_000, true));
        assert!(is_sapling_active(280_001, true));
        assert!(is_sapling_active(300_000, true));
        assert!(!is_sapling_active(300_000, false));
    }
}
