//! Parse and format network addresses.
//!
//! Textual addresses move between configuration, logs, and wire metadata in
//! three URI-style forms: `inet4://a.b.c.d:port`, `inet6://[addr%scope]:port`,
//! and `link://aa-bb-cc-dd-ee-ff`. This crate converts between those forms,
//! typed `std::net` addresses, and raw link-layer bytes. It never opens a
//! socket or resolves a host name.
//!
//! # Status
//!
//! `groundwork-net` is **ALPHA** software and is not yet recommended for
//! production use. Developers should expect breaking changes and occasional
//! instability.

use groundwork_memory::Buffer;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use thiserror::Error;

/// Error type for address parsing.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported scheme in '{0}'")]
    BadScheme(String),
    #[error("malformed address '{0}'")]
    BadAddress(String),
    #[error("malformed authority '{0}'")]
    BadAuthority(String),
}

/// Number of bytes in a MAC-48 link-layer address.
pub const MAC48_LEN: usize = 6;

/// Build an IPv4 socket address from a textual IP and a port.
pub fn socket_addr_v4(address: &str, port: u16) -> Result<SocketAddrV4, Error> {
    let ip: Ipv4Addr = address
        .parse()
        .map_err(|_| Error::BadAddress(address.to_string()))?;
    Ok(SocketAddrV4::new(ip, port))
}

/// Build an IPv6 socket address from a textual IP, a port, and the flow and
/// scope identifiers.
pub fn socket_addr_v6(
    address: &str,
    port: u16,
    flowinfo: u32,
    scope_id: u32,
) -> Result<SocketAddrV6, Error> {
    let ip: Ipv6Addr = address
        .parse()
        .map_err(|_| Error::BadAddress(address.to_string()))?;
    Ok(SocketAddrV6::new(ip, port, flowinfo, scope_id))
}

/// Returns the IPv4 wildcard address with the given port.
pub fn any_v4(port: u16) -> SocketAddrV4 {
    SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, port)
}

/// Render an IPv4 socket address as an `inet4://` URI.
pub fn format_inet4(address: &SocketAddrV4) -> String {
    format!("inet4://{}:{}", address.ip(), address.port())
}

/// Render an IPv6 socket address as an `inet6://` URI, including the scope
/// identifier.
pub fn format_inet6(address: &SocketAddrV6) -> String {
    format!(
        "inet6://[{}%{}]:{}",
        address.ip(),
        address.scope_id(),
        address.port()
    )
}

/// Render a link-layer address as a `link://` URI of dash-separated
/// lowercase hex octets.
pub fn format_link(address: &[u8]) -> String {
    let mut out = String::from("link://");
    for (i, byte) in address.iter().enumerate() {
        if i > 0 {
            out.push('-');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Parse an `inet4://host:port` URI into an IPv4 socket address.
pub fn parse_inet4(uri: &str) -> Result<SocketAddrV4, Error> {
    let authority = uri
        .strip_prefix("inet4://")
        .ok_or_else(|| Error::BadScheme(uri.to_string()))?;
    let (host, port) = authority
        .rsplit_once(':')
        .ok_or_else(|| Error::BadAuthority(authority.to_string()))?;
    let port: u16 = port
        .parse()
        .map_err(|_| Error::BadAuthority(authority.to_string()))?;
    socket_addr_v4(host, port)
}

/// Parse a MAC-48 address into `buffer`, advancing its position by 6 bytes.
///
/// Accepted groupings: `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff`, and
/// `aabb.ccdd.eeff`. On failure the buffer's position is restored, so no
/// partial write is observable.
///
/// # Panics
///
/// Panics if fewer than [`MAC48_LEN`] bytes remain in `buffer`.
pub fn parse_mac48(address: &str, buffer: &mut Buffer) -> Result<(), Error> {
    let original = buffer.position();
    let parsed = if address.contains(':') || address.contains('-') {
        parse_mac48_octets(address, buffer)
    } else if address.contains('.') {
        parse_mac48_words(address, buffer)
    } else {
        Err(())
    };
    parsed.map_err(|()| {
        buffer.set_position(original);
        Error::BadAddress(address.to_string())
    })
}

/// Six hex octets separated by `:` or `-`.
fn parse_mac48_octets(address: &str, buffer: &mut Buffer) -> Result<(), ()> {
    let groups: Vec<&str> = address.split([':', '-']).collect();
    if groups.len() != 6 {
        return Err(());
    }
    for group in groups {
        let value = u8::from_str_radix(group, 16).map_err(|_| ())?;
        buffer.put_u8(value);
    }
    Ok(())
}

/// Three 16-bit hex words separated by `.`.
fn parse_mac48_words(address: &str, buffer: &mut Buffer) -> Result<(), ()> {
    let groups: Vec<&str> = address.split('.').collect();
    if groups.len() != 3 {
        return Err(());
    }
    for group in groups {
        let value = u16::from_str_radix(group, 16).map_err(|_| ())?;
        buffer.put_u16(value);
    }
    Ok(())
}

/// Parse a `link://` URI into a buffer holding the six address bytes,
/// flipped and ready to read.
pub fn parse_link(uri: &str) -> Result<Buffer, Error> {
    let address = uri
        .strip_prefix("link://")
        .ok_or_else(|| Error::BadScheme(uri.to_string()))?;
    let mut buffer = Buffer::allocate(MAC48_LEN);
    parse_mac48(address, &mut buffer)?;
    buffer.flip();
    Ok(buffer)
}

/// Returns true if the address is local to this host: a loopback IPv4
/// (127.0.0.0/8) or the IPv6 loopback (`::1`).
pub fn is_local(address: &SocketAddr) -> bool {
    match address {
        SocketAddr::V4(v4) => v4.ip().is_loopback(),
        SocketAddr::V6(v6) => v6.ip().is_loopback(),
    }
}
