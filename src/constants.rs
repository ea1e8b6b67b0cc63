//! EM410-RDL Protocol Constants
//!
//! Channel identifiers, downlink opcodes and sentinel values used by the
//! EM410-RDL uplink and downlink payload formats.

// ===== UPLINK CHANNELS =====

/// Channel id shared by all device attribute records
pub const CHANNEL_ATTRIBUTE: u8 = 0xFF;

/// Device status (attribute channel)
pub const TYPE_DEVICE_STATUS: u8 = 0x0B;

/// IPSO protocol version (attribute channel)
pub const TYPE_IPSO_VERSION: u8 = 0x01;

/// Serial number (attribute channel)
pub const TYPE_SERIAL_NUMBER: u8 = 0x16;

/// Hardware version (attribute channel)
pub const TYPE_HARDWARE_VERSION: u8 = 0x09;

/// Firmware version (attribute channel)
pub const TYPE_FIRMWARE_VERSION: u8 = 0x0A;

/// LoRaWAN class (attribute channel)
pub const TYPE_LORAWAN_CLASS: u8 = 0x0F;

/// TSL version (attribute channel)
pub const TYPE_TSL_VERSION: u8 = 0xFF;

pub const CHANNEL_BATTERY: u8 = 0x01;
pub const TYPE_BATTERY: u8 = 0x75;

pub const CHANNEL_TEMPERATURE: u8 = 0x03;
pub const TYPE_TEMPERATURE: u8 = 0x67;

pub const CHANNEL_DISTANCE: u8 = 0x04;
pub const TYPE_DISTANCE: u8 = 0x82;

pub const CHANNEL_POSITION: u8 = 0x05;
pub const TYPE_POSITION: u8 = 0x00;

/// Threshold alarm event (distance channel with alarm bit)
pub const CHANNEL_DISTANCE_ALARM: u8 = 0x84;

/// Mutation alarm event
pub const CHANNEL_DISTANCE_MUTATION: u8 = 0x94;

/// Blind spot / exception event
pub const CHANNEL_DISTANCE_EXCEPTION: u8 = 0xB4;

pub const CHANNEL_HISTORY: u8 = 0x20;
pub const TYPE_HISTORY: u8 = 0xCE;

// ===== HISTORY SENTINELS =====

/// Raw distance meaning the radar saw no target
pub const DISTANCE_NO_TARGET: u16 = 0xFFFD;

/// Raw distance meaning the distance channel is disabled
pub const DISTANCE_DISABLED: u16 = 0xFFFE;

/// Raw distance meaning the radar reported an exception
pub const DISTANCE_SENSOR_EXCEPTION: u16 = 0xFFFF;

/// Raw temperature meaning the temperature channel is disabled
pub const TEMPERATURE_DISABLED: u16 = 0xFFFE;

/// Raw temperature meaning the temperature sensor reported an exception
pub const TEMPERATURE_SENSOR_EXCEPTION: u16 = 0xFFFF;

// ===== DOWNLINK OPCODE PREFIXES =====

/// Prefix of the generic configuration commands
pub const PREFIX_CONFIG: u8 = 0xFF;

/// Prefix of the radar specific commands
pub const PREFIX_RADAR: u8 = 0xF9;

/// Prefix of the history retrieval commands
pub const PREFIX_HISTORY: u8 = 0xFD;

// ===== DOWNLINK OPCODES =====

pub const OP_REBOOT: u8 = 0x10;
pub const OP_REPORT_STATUS: u8 = 0x28;
pub const OP_REPORT_INTERVAL: u8 = 0x8E;
pub const OP_COLLECTION_INTERVAL: u8 = 0x02;
pub const OP_SYNC_TIME: u8 = 0x4A;
pub const OP_TIMEZONE: u8 = 0xBD;
pub const OP_DISTANCE_RANGE: u8 = 0x1B;
pub const OP_ALARM_COUNTS: u8 = 0xF2;
/// Shared by temperature and blind calibration
pub const OP_RADAR_CALIBRATION: u8 = 0x2A;
pub const OP_DISTANCE_CALIBRATION: u8 = 0xAB;
pub const OP_RECOLLECTION: u8 = 0x1C;
pub const OP_STOP_TRANSMIT: u8 = 0x6D;
pub const OP_HISTORY_ENABLE: u8 = 0x68;
pub const OP_CLEAR_HISTORY: u8 = 0x27;

pub const OP_DISTANCE_MODE: u8 = 0x12;
pub const OP_BLIND_DETECTION: u8 = 0x13;
pub const OP_SIGNAL_QUALITY: u8 = 0x14;
pub const OP_THRESHOLD_SENSITIVE: u8 = 0x15;
pub const OP_PEAK_SORT: u8 = 0x16;
pub const OP_RETRANSMIT_CONFIG: u8 = 0x0D;
pub const OP_RESEND_INTERVAL: u8 = 0x0E;

pub const OP_FETCH_HISTORY_FROM: u8 = 0x6B;
pub const OP_FETCH_HISTORY_RANGE: u8 = 0x6C;

/// Trailing byte of the one-shot trigger commands (reboot, sync time, stop transmit)
pub const TRIGGER_MAGIC: u8 = 0xFF;
