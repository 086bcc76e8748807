//! SSD1306 command set
//!
//! Every bus transaction starts with a control byte: [`CONTROL_COMMAND`]
//! marks the rest as controller commands, [`CONTROL_DATA`] as display RAM.

/// Control byte: following bytes are a command and its operands
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: following bytes are pixel data
pub const CONTROL_DATA: u8 = 0x40;

/// Memory addressing modes (operand of `SET_MEMORY_ADDRESSING_MODE`)
pub mod addressing {
    pub const HORIZONTAL: u8 = 0x00;
    pub const VERTICAL: u8 = 0x01;
    pub const PAGE: u8 = 0x02;
}

pub const SET_COLUMN_START_LOW_MASK: u8 = 0x00;
pub const SET_COLUMN_START_HIGH_MASK: u8 = 0x10;
pub const SET_MEMORY_ADDRESSING_MODE: u8 = 0x20;
pub const SET_COLUMN_ADDRESS: u8 = 0x21;
pub const SET_PAGE_ADDRESS: u8 = 0x22;
pub const SET_DISPLAY_START_LINE_MASK: u8 = 0x40;
pub const SET_CONTRAST: u8 = 0x81;
pub const CHARGE_PUMP: u8 = 0x8D;
pub const SET_SEGMENT_REMAP_127: u8 = 0xA1;
pub const ENTIRE_DISPLAY_ON_RESUME: u8 = 0xA4;
pub const SET_NORMAL_DISPLAY: u8 = 0xA6;
pub const SET_INVERSE_DISPLAY: u8 = 0xA7;
pub const SET_DISPLAY_OFF: u8 = 0xAE;
pub const SET_DISPLAY_ON: u8 = 0xAF;
pub const SET_PAGE_START_ADDRESS_MASK: u8 = 0xB0;
pub const SET_COM_SCAN_DIRECTION_REMAP: u8 = 0xC8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_OSC_FREQUENCY: u8 = 0xD5;
pub const SET_PRECHARGE_PERIOD: u8 = 0xD9;
pub const SET_COM_PINS_CONFIGURATION: u8 = 0xDA;
pub const SET_VCOMH_DESELECT_LEVEL: u8 = 0xDB;

/// Default contrast written during initialization
pub const DEFAULT_CONTRAST: u8 = 0x7F;

/// Power-up sequence, one command (with operands) per transaction
///
/// Order matters: later commands rely on state set by earlier ones.
pub const INIT_SEQUENCE: &[&[u8]] = &[
    // Enable charge pump regulator
    &[CHARGE_PUMP, 0x14],
    &[SET_MEMORY_ADDRESSING_MODE, addressing::PAGE],
    &[SET_OSC_FREQUENCY, 0x80],
    &[SET_DISPLAY_OFFSET, 0x00],
    &[SET_DISPLAY_START_LINE_MASK | 0x00],
    &[SET_SEGMENT_REMAP_127],
    &[SET_COM_SCAN_DIRECTION_REMAP],
    &[SET_COM_PINS_CONFIGURATION, 0x12],
    &[SET_PRECHARGE_PERIOD, 0xF1],
    &[SET_VCOMH_DESELECT_LEVEL, 0x40],
    &[ENTIRE_DISPLAY_ON_RESUME],
    &[SET_NORMAL_DISPLAY],
    &[SET_COLUMN_ADDRESS, 0x00, 0x7F],
    &[SET_PAGE_ADDRESS, 0x00, 0x07],
    &[SET_CONTRAST, DEFAULT_CONTRAST],
    &[SET_DISPLAY_ON],
];

/// Page-addressing commands positioning the write pointer at `(page, column)`
pub const fn page_column(page: u8, column: u8) -> [u8; 3] {
    [
        SET_PAGE_START_ADDRESS_MASK | (page & 0x07),
        SET_COLUMN_START_LOW_MASK | (column & 0x0F),
        SET_COLUMN_START_HIGH_MASK | ((column >> 4) & 0x0F),
    ]
}
