//! IPv4 network and subnet mask utilities.
//!
//! Provides [`Ipv4`] for representing a network in CIDR notation, along with
//! the mask conversions needed to normalise the two address styles found in
//! device configurations (`address mask` and `address/prefix`).

use serde::{Serialize, Serializer};
use std::error::Error;
use std::net::Ipv4Addr;

/// Maximum length for an IPv4 subnet mask (32 bits).
const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use config_topology::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Convert a CIDR prefix length to a dotted subnet mask.
pub fn prefix_to_mask(len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Convert a dotted subnet mask to its prefix length.
///
/// Rejects non-contiguous masks such as `255.0.255.0`.
fn mask_to_prefix(mask: Ipv4Addr) -> Result<u8, Box<dyn Error>> {
    let bits = u32::from(mask);
    let len = bits.leading_ones() as u8;
    if get_cidr_mask(len)? != bits {
        return Err(format!("Non-contiguous subnet mask {mask}").into());
    }
    Ok(len)
}

/// Get the network address for a given IP and prefix length.
fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let bits = u32::from(addr) as u64;
        let new_bits = (bits >> right_len) << right_len;

        Ok(Ipv4Addr::from(new_bits as u32))
    }
}

/// IPv4 network in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    /// The IPv4 address.
    pub addr: Ipv4Addr,
    /// The subnet mask length (0-32).
    pub mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    #[cfg(test)]
    pub(crate) fn new(addr_cidr: &str) -> Result<Ipv4, Box<dyn Error>> {
        let addr_cidr = addr_cidr.trim();
        let parts: Vec<&str> = addr_cidr.split('/').collect();
        if parts.len() != 2 {
            return Err("Invalid address/mask".into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: u8 = parts[1].parse()?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ok(Ipv4 { addr, mask })
    }

    /// Canonical network of an interface address and dotted mask.
    ///
    /// Host bits are dropped rather than rejected, so `10.0.0.1 255.255.255.0`
    /// yields `10.0.0.0/24`.
    pub fn network_of(addr: Ipv4Addr, mask: Ipv4Addr) -> Result<Ipv4, Box<dyn Error>> {
        let len = mask_to_prefix(mask)?;
        Ok(Ipv4 {
            addr: cut_addr(addr, len)?,
            mask: len,
        })
    }
}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}
