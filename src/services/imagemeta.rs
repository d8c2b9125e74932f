use std::path::Path;

/// Minimum pixel sizes the templates assume for the images they reference.
pub const SOCIAL_IMAGE_MIN: (u32, u32) = (1200, 630);
pub const TOUCH_ICON_MIN: u32 = 180;
pub const MANIFEST_ICON_SIZES: &[u32] = &[192, 512];

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Pixel dimensions of a PNG or JPEG file, read from the raw header.
///
/// Deliberately dependency-free: only the few bytes the formats pin down
/// are inspected, nothing is decoded. Any other format, truncation or
/// parse failure yields `None`.
pub fn image_dimensions(path: &Path) -> Option<(u32, u32)> {
    let data = std::fs::read(path).ok()?;
    png_dimensions(&data).or_else(|| jpeg_dimensions(&data))
}

/// Width/height from the IHDR chunk, which PNG fixes as the first chunk
/// after the 8-byte signature.
pub fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 24 || data[..8] != PNG_SIGNATURE {
        return None;
    }
    if &data[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(data[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(data[20..24].try_into().ok()?);
    Some((width, height))
}

fn is_sof_marker(marker: u8) -> bool {
    // SOF0..SOF15 minus DHT (C4), JPG (C8) and DAC (CC).
    matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC)
}

/// Height/width from the first start-of-frame segment, skipping any number
/// of preceding APP/COM segments by their declared big-endian lengths.
pub fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < 4 || data[0] != 0xFF || data[1] != 0xD8 {
        return None;
    }
    let mut pos = 2usize;
    loop {
        if *data.get(pos)? != 0xFF {
            return None;
        }
        // Fill bytes before a marker are legal padding.
        let mut marker = *data.get(pos + 1)?;
        while marker == 0xFF {
            pos += 1;
            marker = *data.get(pos + 1)?;
        }
        pos += 2;

        match marker {
            m if is_sof_marker(m) => {
                // length(2) precision(1) height(2) width(2)
                let height = u16::from_be_bytes([*data.get(pos + 3)?, *data.get(pos + 4)?]);
                let width = u16::from_be_bytes([*data.get(pos + 5)?, *data.get(pos + 6)?]);
                return Some((u32::from(width), u32::from(height)));
            }
            // Standalone markers carry no length field.
            0xD0..=0xD9 | 0x01 => {}
            0xDA => return None, // start of scan before any SOF: give up
            _ => {
                let len = u16::from_be_bytes([*data.get(pos)?, *data.get(pos + 1)?]) as usize;
                if len < 2 {
                    return None;
                }
                pos += len;
            }
        }
    }
}

#[cfg(test)]
pub mod test_bytes {
    /// Minimal PNG: signature + IHDR with the given dimensions. The CRC is
    /// garbage; the prober never checks it.
    pub fn png(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[8, 6, 0, 0, 0]);
        data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        data
    }

    /// Minimal JPEG: SOI, an APP0 and a COM segment to skip, then SOF0.
    pub fn jpeg(width: u16, height: u16) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&[0; 9]);
        data.extend_from_slice(&[0xFF, 0xFE, 0x00, 0x08]);
        data.extend_from_slice(b"sample");
        data.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&[3, 1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        data
    }
}
