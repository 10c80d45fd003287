use crate::consts;

/// The scheme a folder's data blocks are compressed with, as recorded in the
/// folder table.  Decoding the tag never fails; the data itself is not
/// decompressed by this crate.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum CompressionType {
    /// No compression.
    None,
    /// MSZIP compression.  MSZIP is described further in
    /// [MS-MCI](https://msdn.microsoft.com/en-us/library/cc483131.aspx).
    MsZip,
    /// Quantum compression with the given level and memory, exactly as
    /// stored in the folder's compression bits (not range-checked).
    Quantum(u16, u16),
    /// LZX compression with the given window size exponent (the window is
    /// `1 << bits` bytes).  The LZX compression scheme is described further
    /// in [MS-PATCH](https://msdn.microsoft.com/en-us/library/cc483133.aspx).
    Lzx(u16),
    /// A method id this crate does not know.
    Unknown(u8),
}

impl CompressionType {
    /// Combines a folder's method id with its method-specific bit field.
    pub(crate) fn from_fields(method: u8, bits: u16) -> CompressionType {
        match method {
            consts::CTYPE_NONE => CompressionType::None,
            consts::CTYPE_MSZIP => CompressionType::MsZip,
            consts::CTYPE_QUANTUM => {
                let level = (bits & 0x00f0) >> 4;
                let memory = (bits & 0x1f00) >> 8;
                CompressionType::Quantum(level, memory)
            }
            consts::CTYPE_LZX => CompressionType::Lzx((bits & 0x1f00) >> 8),
            _ => CompressionType::Unknown(method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CompressionType;

    #[test]
    fn compression_type_from_fields() {
        assert_eq!(CompressionType::from_fields(0, 0), CompressionType::None);
        assert_eq!(CompressionType::from_fields(1, 0), CompressionType::MsZip);
        assert_eq!(
            CompressionType::from_fields(2, 0x1470),
            CompressionType::Quantum(7, 20)
        );
        assert_eq!(
            CompressionType::from_fields(3, 0x1500),
            CompressionType::Lzx(21)
        );
    }

    #[test]
    fn method_id_decides_over_bits() {
        // Bits that look like LZX parameters do not matter for MSZIP.
        assert_eq!(
            CompressionType::from_fields(1, 0x1503),
            CompressionType::MsZip
        );
        assert_eq!(
            CompressionType::from_fields(0x0f, 0x1200),
            CompressionType::Unknown(0x0f)
        );
    }
}
