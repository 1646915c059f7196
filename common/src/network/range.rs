//! # Scan Range Model
//!
//! An inclusive, contiguous IPv4 interval and the derivation used to build
//! one around the host's own address: keep the two leading octets, widen the
//! third octet by two blocks in each direction (clamped to [0, 255]), and
//! span the full last octet.

use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Builds the scan range surrounding `local`: for A.B.C.D the range is
    /// A.B.max(C-2,0).0 through A.B.min(C+2,255).255.
    pub fn around(local: Ipv4Addr) -> Self {
        let [a, b, c, _] = local.octets();
        let start_block = c.saturating_sub(2);
        let end_block = c.saturating_add(2);

        Self {
            start_addr: Ipv4Addr::new(a, b, start_block, 0),
            end_addr: Ipv4Addr::new(a, b, end_block, 255),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    /// Number of addresses in the inclusive interval.
    pub fn len(&self) -> usize {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (end - start) as usize + 1
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.start_addr <= addr && addr <= self.end_addr
    }
}
