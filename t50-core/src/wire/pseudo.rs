//! The transport pseudo-header: summed into UDP/TCP/DCCP
//! checksums but never transmitted. Builders append it after the real
//! header+payload, checksum the whole span, then let the IP `tot_len`
//! field silently exclude it from what actually goes on the wire.

use crate::wire::cursor::Cursor;

pub const LEN: usize = 12;

pub fn write(buf: &mut [u8], offset: usize, saddr: u32, daddr: u32, protocol: u8, transport_len: u16) {
    Cursor::at(buf, offset)
        .put_u32(saddr)
        .put_u32(daddr)
        .put_u8(0)
        .put_u8(protocol)
        .put_u16(transport_len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_rfc768() {
        let mut buf = [0u8; LEN];
        write(&mut buf, 0, 0x0A000001, 0x0A000002, 17, 8);
        assert_eq!(&buf[0..4], &[10, 0, 0, 1]);
        assert_eq!(&buf[4..8], &[10, 0, 0, 2]);
        assert_eq!(buf[8], 0);
        assert_eq!(buf[9], 17);
        assert_eq!(&buf[10..12], &[0, 8]);
    }
}
