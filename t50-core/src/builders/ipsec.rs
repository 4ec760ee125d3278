//! IPSec AH (RFC 4302) and ESP (RFC 4303) builders. Neither protocol has a
//! plaintext checksum field — integrity comes from the ICV, which this
//! injector can only forge, not compute for real (no security association
//! exists). The ICV is filled with fresh random bytes and no checksum pass
//! runs; only the GRE checksum fill (if enabled) applies.

use crate::buffer::PacketBuffer;
use crate::builders::support;
use crate::config::{Config, ProtocolId};
use crate::rng::Prng;
use crate::wire::cursor::Cursor;

const AH_FIXED_LEN: usize = 12;
const AH_ICV_LEN: usize = 12; // HMAC-96 truncated length, the common case
const AH_HEADER_LEN: usize = AH_FIXED_LEN + AH_ICV_LEN;

const ESP_HEADER_LEN: usize = 8;
const ESP_TRAILER_LEN: usize = 2; // pad length + next header
const ESP_ICV_LEN: usize = 12;
const ESP_TOTAL_LEN: usize = ESP_HEADER_LEN + ESP_TRAILER_LEN + ESP_ICV_LEN;

const NO_NEXT_HEADER: u8 = 59;

pub fn build_ah(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Ah, AH_HEADER_LEN);
    let ah = &cfg.protocols.ah;

    let payload_len_words = (AH_HEADER_LEN / 4) as u8 - 2; // RFC 4302: length in 32-bit words, minus 2

    let mut cursor = Cursor::at(buf.as_mut(layout.transport_offset + AH_HEADER_LEN), layout.transport_offset);
    cursor
        .put_u8(NO_NEXT_HEADER)
        .put_u8(payload_len_words)
        .put_u16(0) // reserved
        .put_u32(ah.spi.resolve(rng))
        .put_u32(ah.sequence.resolve(rng))
        .put_random(AH_ICV_LEN, rng);

    let total_len = layout.transport_offset + AH_HEADER_LEN;
    support::finish_gre(buf, cfg, layout.gre_offset, total_len);
    total_len
}

pub fn build_esp(cfg: &Config, buf: &mut PacketBuffer, rng: &mut Prng) -> usize {
    let layout = support::layout(cfg, buf, rng, ProtocolId::Esp, ESP_TOTAL_LEN);
    let esp = &cfg.protocols.esp;

    Cursor::at(buf.as_mut(layout.transport_offset + ESP_TOTAL_LEN), layout.transport_offset)
        .put_u32(esp.spi.resolve(rng))
        .put_u32(esp.sequence.resolve(rng))
        .put_u8(0) // pad length: no payload, no padding
        .put_u8(NO_NEXT_HEADER)
        .put_random(ESP_ICV_LEN, rng);

    let total_len = layout.transport_offset + ESP_TOTAL_LEN;
    support::finish_gre(buf, cfg, layout.gre_offset, total_len);
    total_len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::default_config;
    use crate::wire::ipv4;

    #[test]
    fn ah_writes_fixed_length_header_and_icv() {
        let cfg = default_config();
        let mut rng = Prng::seeded(31);
        let mut buf = PacketBuffer::new();
        let len = build_ah(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + AH_HEADER_LEN);
        assert_eq!(buf.as_slice(len)[ipv4::BASE_LEN], NO_NEXT_HEADER);
    }

    #[test]
    fn esp_writes_spi_and_trailer() {
        let cfg = default_config();
        let mut rng = Prng::seeded(31);
        let mut buf = PacketBuffer::new();
        let len = build_esp(&cfg, &mut buf, &mut rng);
        assert_eq!(len, ipv4::BASE_LEN + ESP_TOTAL_LEN);
        assert_eq!(buf.as_slice(len)[ipv4::BASE_LEN + 9], NO_NEXT_HEADER);
    }
}
