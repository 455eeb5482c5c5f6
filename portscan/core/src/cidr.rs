use ipnet::Ipv4Net;
use std::net::Ipv4Addr;

/// Every address covered by `net`, in ascending order, network and broadcast
/// addresses included.
pub fn addresses(net: Ipv4Net) -> impl Iterator<Item = Ipv4Addr> {
    let first = u32::from(net.network());
    let last = u32::from(net.broadcast());
    (first..=last).map(Ipv4Addr::from)
}
