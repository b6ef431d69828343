use std::net::Ipv4Addr;

use crate::error::{AllocationError, Result};

/// Pick the address for a new peer
///
/// The new address keeps the first three octets of the interface address. Its
/// last octet is one past the highest last octet seen on the interface itself
/// or on any allocated peer whose first *two* octets match the interface.
///
/// Only two octets are compared even though the peer range is meant to be a
/// /24. This mirrors how existing deployments were provisioned; a peer in
/// `10.0.1.0/24` still raises the next address handed out in `10.0.0.0/24`.
pub fn allocate(interface: Ipv4Addr, allocated: &[Ipv4Addr]) -> Result<Ipv4Addr> {
    let base = interface.octets();

    let highest = allocated
        .iter()
        .map(Ipv4Addr::octets)
        .filter(|peer| peer[..2] == base[..2])
        .map(|peer| peer[3])
        .fold(base[3], u8::max);

    let next = highest
        .checked_add(1)
        .ok_or(AllocationError::SubnetExhausted { interface })?;

    let addr = Ipv4Addr::new(base[0], base[1], base[2], next);
    tracing::debug!(
        "Allocated {} (highest in use: .{}, {} peer address(es) considered)",
        addr,
        highest,
        allocated.len()
    );

    Ok(addr)
}
