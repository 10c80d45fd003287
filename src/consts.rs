pub const FILE_SIGNATURE: u32 = 0x4643534d; // "MSCF" stored little-endian

// Header flags:
pub const FLAG_PREV_CABINET: u16 = 0x1;
pub const FLAG_NEXT_CABINET: u16 = 0x2;
pub const FLAG_RESERVE_PRESENT: u16 = 0x4;

// File attributes:
pub const ATTR_READ_ONLY: u16 = 0x01;
pub const ATTR_HIDDEN: u16 = 0x02;
pub const ATTR_SYSTEM: u16 = 0x04;
pub const ATTR_ARCH: u16 = 0x20;
pub const ATTR_EXEC: u16 = 0x40;
pub const ATTR_NAME_IS_UTF: u16 = 0x80;

// Compression method ids (a folder record's one-byte type field):
pub const CTYPE_NONE: u8 = 0;
pub const CTYPE_MSZIP: u8 = 1;
pub const CTYPE_QUANTUM: u8 = 2;
pub const CTYPE_LZX: u8 = 3;
