//! Message-content flags, decoded from the numeric content masks into plain
//! booleans so every inclusion rule reads one named switch.

use serde::{Deserialize, Serialize};

/// Network-message content selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkMessageContentFlags {
    pub network_message_header: bool,
    pub data_set_message_header: bool,
    pub single_data_set_message: bool,
    pub publisher_id: bool,
    pub data_set_class_id: bool,
    /// Kept so masks round-trip. The network message carries no reply-to
    /// field, so this switch leaves the schema unchanged.
    pub reply_to: bool,
    /// One message per monitored item (dataset field) instead of per dataset.
    pub monitored_item_message: bool,
    /// Wrap the whole message in a root-level array.
    pub use_array_envelope: bool,
    /// Emit the shapes of earlier publisher versions.
    pub use_compatibility_mode: bool,
}

impl NetworkMessageContentFlags {
    pub const NETWORK_MESSAGE_HEADER: u32 = 0x1;
    pub const DATA_SET_MESSAGE_HEADER: u32 = 0x2;
    pub const SINGLE_DATA_SET_MESSAGE: u32 = 0x4;
    pub const PUBLISHER_ID: u32 = 0x8;
    pub const DATA_SET_CLASS_ID: u32 = 0x10;
    pub const REPLY_TO: u32 = 0x20;
    pub const MONITORED_ITEM_MESSAGE: u32 = 0x1000;
    pub const USE_ARRAY_ENVELOPE: u32 = 0x2000;
    pub const USE_COMPATIBILITY_MODE: u32 = 0x4000;

    pub fn from_mask(mask: u32) -> Self {
        Self {
            network_message_header: mask & Self::NETWORK_MESSAGE_HEADER != 0,
            data_set_message_header: mask & Self::DATA_SET_MESSAGE_HEADER != 0,
            single_data_set_message: mask & Self::SINGLE_DATA_SET_MESSAGE != 0,
            publisher_id: mask & Self::PUBLISHER_ID != 0,
            data_set_class_id: mask & Self::DATA_SET_CLASS_ID != 0,
            reply_to: mask & Self::REPLY_TO != 0,
            monitored_item_message: mask & Self::MONITORED_ITEM_MESSAGE != 0,
            use_array_envelope: mask & Self::USE_ARRAY_ENVELOPE != 0,
            use_compatibility_mode: mask & Self::USE_COMPATIBILITY_MODE != 0,
        }
    }

    pub fn mask(&self) -> u32 {
        [
            (self.network_message_header, Self::NETWORK_MESSAGE_HEADER),
            (self.data_set_message_header, Self::DATA_SET_MESSAGE_HEADER),
            (self.single_data_set_message, Self::SINGLE_DATA_SET_MESSAGE),
            (self.publisher_id, Self::PUBLISHER_ID),
            (self.data_set_class_id, Self::DATA_SET_CLASS_ID),
            (self.reply_to, Self::REPLY_TO),
            (self.monitored_item_message, Self::MONITORED_ITEM_MESSAGE),
            (self.use_array_envelope, Self::USE_ARRAY_ENVELOPE),
            (self.use_compatibility_mode, Self::USE_COMPATIBILITY_MODE),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |mask, (_, bit)| mask | bit)
    }
}

/// Dataset-message header selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSetMessageContentFlags {
    pub data_set_writer_id: bool,
    pub meta_data_version: bool,
    pub sequence_number: bool,
    pub timestamp: bool,
    pub status: bool,
    pub message_type: bool,
    pub data_set_writer_name: bool,
}

impl DataSetMessageContentFlags {
    pub const DATA_SET_WRITER_ID: u32 = 0x1;
    pub const META_DATA_VERSION: u32 = 0x2;
    pub const SEQUENCE_NUMBER: u32 = 0x4;
    pub const TIMESTAMP: u32 = 0x8;
    pub const STATUS: u32 = 0x10;
    pub const MESSAGE_TYPE: u32 = 0x20;
    pub const DATA_SET_WRITER_NAME: u32 = 0x40;

    pub fn from_mask(mask: u32) -> Self {
        Self {
            data_set_writer_id: mask & Self::DATA_SET_WRITER_ID != 0,
            meta_data_version: mask & Self::META_DATA_VERSION != 0,
            sequence_number: mask & Self::SEQUENCE_NUMBER != 0,
            timestamp: mask & Self::TIMESTAMP != 0,
            status: mask & Self::STATUS != 0,
            message_type: mask & Self::MESSAGE_TYPE != 0,
            data_set_writer_name: mask & Self::DATA_SET_WRITER_NAME != 0,
        }
    }

    pub fn mask(&self) -> u32 {
        [
            (self.data_set_writer_id, Self::DATA_SET_WRITER_ID),
            (self.meta_data_version, Self::META_DATA_VERSION),
            (self.sequence_number, Self::SEQUENCE_NUMBER),
            (self.timestamp, Self::TIMESTAMP),
            (self.status, Self::STATUS),
            (self.message_type, Self::MESSAGE_TYPE),
            (self.data_set_writer_name, Self::DATA_SET_WRITER_NAME),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |mask, (_, bit)| mask | bit)
    }
}

/// Per-field content selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataSetFieldContentFlags {
    pub status_code: bool,
    pub source_timestamp: bool,
    pub server_timestamp: bool,
    pub source_picoseconds: bool,
    pub server_picoseconds: bool,
    pub raw_data: bool,
    pub node_id: bool,
    pub display_name: bool,
    pub endpoint_url: bool,
    pub application_uri: bool,
    pub extension_fields: bool,
}

impl DataSetFieldContentFlags {
    pub const STATUS_CODE: u32 = 0x1;
    pub const SOURCE_TIMESTAMP: u32 = 0x2;
    pub const SERVER_TIMESTAMP: u32 = 0x4;
    pub const SOURCE_PICOSECONDS: u32 = 0x8;
    pub const SERVER_PICOSECONDS: u32 = 0x10;
    pub const RAW_DATA: u32 = 0x20;
    pub const NODE_ID: u32 = 0x100;
    pub const DISPLAY_NAME: u32 = 0x200;
    pub const ENDPOINT_URL: u32 = 0x400;
    pub const APPLICATION_URI: u32 = 0x800;
    pub const EXTENSION_FIELDS: u32 = 0x1000;

    pub fn from_mask(mask: u32) -> Self {
        Self {
            status_code: mask & Self::STATUS_CODE != 0,
            source_timestamp: mask & Self::SOURCE_TIMESTAMP != 0,
            server_timestamp: mask & Self::SERVER_TIMESTAMP != 0,
            source_picoseconds: mask & Self::SOURCE_PICOSECONDS != 0,
            server_picoseconds: mask & Self::SERVER_PICOSECONDS != 0,
            raw_data: mask & Self::RAW_DATA != 0,
            node_id: mask & Self::NODE_ID != 0,
            display_name: mask & Self::DISPLAY_NAME != 0,
            endpoint_url: mask & Self::ENDPOINT_URL != 0,
            application_uri: mask & Self::APPLICATION_URI != 0,
            extension_fields: mask & Self::EXTENSION_FIELDS != 0,
        }
    }

    pub fn mask(&self) -> u32 {
        [
            (self.status_code, Self::STATUS_CODE),
            (self.source_timestamp, Self::SOURCE_TIMESTAMP),
            (self.server_timestamp, Self::SERVER_TIMESTAMP),
            (self.source_picoseconds, Self::SOURCE_PICOSECONDS),
            (self.server_picoseconds, Self::SERVER_PICOSECONDS),
            (self.raw_data, Self::RAW_DATA),
            (self.node_id, Self::NODE_ID),
            (self.display_name, Self::DISPLAY_NAME),
            (self.endpoint_url, Self::ENDPOINT_URL),
            (self.application_uri, Self::APPLICATION_URI),
            (self.extension_fields, Self::EXTENSION_FIELDS),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |mask, (_, bit)| mask | bit)
    }

    /// Field values are DataValue-wrapped: raw data is off and at least one
    /// DataValue attribute is requested.
    pub fn is_data_value(&self) -> bool {
        !self.raw_data
            && (self.status_code
                || self.source_timestamp
                || self.server_timestamp
                || self.source_picoseconds
                || self.server_picoseconds)
    }
}
