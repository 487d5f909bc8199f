//! Dataset-message envelopes.

use uaschema_builtin::SchemaSession;
use uaschema_core::{RecordSchema, SchemaField, SchemaId, escape_name};
use uaschema_model::{
    BuiltInTypeId, DataSetMetaData, DataSetWriter, NetworkMessageContentFlags, SchemaRank,
};

use crate::data_set::{build_data_set_schema, field_schemas};

/// Build the message schema of one dataset writer.
///
/// Without a dataset-message header the dataset payload is returned as is.
/// Otherwise the payload is wrapped in a `<hint>DataSetMessageType` record
/// whose header fields follow the writer's message content flags. In
/// monitored-item mode every dataset field becomes its own message type and
/// the result is the union of those types. The union collapses like any
/// other: a single resolved field yields its bare message record.
pub fn build_data_set_message_schema(
    session: &mut SchemaSession,
    writer: &DataSetWriter,
    metadata: &DataSetMetaData,
    network_flags: &NetworkMessageContentFlags,
    type_name_hint: Option<&str>,
) -> SchemaId {
    let hint = type_name_hint.unwrap_or_default();
    if network_flags.monitored_item_message {
        return build_monitored_item_messages(session, writer, metadata, hint);
    }

    let payload = build_data_set_schema(session, metadata, &writer.field_content, None);
    if !network_flags.data_set_message_header {
        return payload;
    }

    let legacy = session.mode().is_legacy();
    let content = &writer.message_content;
    let name = session.unique_name(&escape_name(&format!("{hint}DataSetMessageType")));
    let mut record = RecordSchema::new(session.type_name(name));

    if content.data_set_writer_id {
        let id = if legacy {
            BuiltInTypeId::String
        } else {
            BuiltInTypeId::UInt16
        };
        push(&mut record, "DataSetWriterId", scalar(session, id));
    }
    if content.sequence_number {
        push(&mut record, "SequenceNumber", scalar(session, BuiltInTypeId::UInt32));
    }
    if content.meta_data_version {
        push(&mut record, "MetaDataVersion", session.configuration_version());
    }
    if content.timestamp {
        push(&mut record, "Timestamp", scalar(session, BuiltInTypeId::DateTime));
    }
    if content.status {
        let status = scalar(session, BuiltInTypeId::StatusCode);
        push(&mut record, "Status", session.nullable(status));
    }
    if content.message_type {
        push(&mut record, "MessageType", scalar(session, BuiltInTypeId::String));
    }
    if content.data_set_writer_name && !legacy {
        push(&mut record, "DataSetWriterName", scalar(session, BuiltInTypeId::String));
    }
    push(&mut record, "Payload", payload);

    session.arena_mut().record(record)
}

fn build_monitored_item_messages(
    session: &mut SchemaSession,
    writer: &DataSetWriter,
    metadata: &DataSetMetaData,
    hint: &str,
) -> SchemaId {
    let field_content = &writer.field_content;
    let content = &writer.message_content;

    let mut messages = Vec::new();
    for resolved in field_schemas(session, metadata, field_content) {
        let name = format!("{hint}{}MonitoredItemMessageType", resolved.field.name);
        let name = session.unique_name(&escape_name(&name));
        let mut record = RecordSchema::new(session.type_name(name));

        let text = scalar(session, BuiltInTypeId::String);
        let text = session.nullable(text);
        if field_content.node_id {
            push(&mut record, "NodeId", text);
        }
        if field_content.endpoint_url {
            push(&mut record, "EndpointUrl", text);
        }
        if field_content.application_uri {
            push(&mut record, "ApplicationUri", text);
        }
        if field_content.display_name {
            push(&mut record, "DisplayName", text);
        }
        if content.timestamp {
            push(&mut record, "Timestamp", scalar(session, BuiltInTypeId::DateTime));
        }
        if content.status {
            let status = scalar(session, BuiltInTypeId::StatusCode);
            push(&mut record, "Status", session.nullable(status));
        }
        push(&mut record, "Value", resolved.schema);
        if content.sequence_number {
            push(&mut record, "SequenceNumber", scalar(session, BuiltInTypeId::UInt32));
        }
        if field_content.extension_fields {
            let variant = scalar(session, BuiltInTypeId::Variant);
            let arena = session.arena_mut();
            let map = arena.map(variant);
            push(&mut record, "ExtensionFields", arena.nullable(map));
        }

        messages.push(session.arena_mut().record(record));
    }
    session.arena_mut().union(messages)
}

fn scalar(session: &mut SchemaSession, ty: BuiltInTypeId) -> SchemaId {
    session.built_in(ty, SchemaRank::Scalar)
}

fn push(record: &mut RecordSchema, name: &str, schema: SchemaId) {
    record.push(SchemaField::new(name, schema));
}
