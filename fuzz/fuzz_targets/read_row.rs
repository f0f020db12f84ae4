#![no_main]

use libfuzzer_sys::fuzz_target;
use zendib::{
    ChannelMasks, ChannelOrder, Compression, DecodeRequest, FormatDescriptor, Limits, PixelBuffer,
};

fn word(data: &[u8], at: usize) -> u32 {
    let mut bytes = [0u8; 4];
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = data.get(at + i).copied().unwrap_or(0);
    }
    u32::from_le_bytes(bytes)
}

// Header: width i8, height i8, depth selector, compression, stride u8,
// then four little-endian masks. The rest is pixel data.
fuzz_target!(|data: &[u8]| {
    if data.len() < 21 {
        return;
    }
    let depth = [16, 24, 32, 8][usize::from(data[2] & 3)];
    let desc = FormatDescriptor::new(
        i32::from(data[0] as i8),
        i32::from(data[1] as i8),
        depth,
        Compression::from_u32(u32::from(data[3] & 7)),
    );
    let masks = ChannelMasks::new(word(data, 5), word(data, 9), word(data, 13), word(data, 17));
    let pixels = &data[21..];
    let stride = usize::from(data[4]);

    let Ok(decoder) = DecodeRequest::new(desc, PixelBuffer::new(pixels, stride))
        .with_masks(masks)
        .with_limits(Limits::default().with_max_pixels(1 << 16))
        .start()
    else {
        return;
    };

    let mut row = vec![0u8; decoder.row_bytes()];
    for y in 0..decoder.rows() {
        decoder.read_row(y, ChannelOrder::Bgra, &mut row).unwrap();
        for px in row.chunks_exact(4) {
            let opaque = px[..3] != [0, 0, 0];
            assert_eq!(px[3], if opaque { 0xFF } else { 0 });
        }
    }
});
