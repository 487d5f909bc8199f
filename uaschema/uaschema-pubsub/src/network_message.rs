//! Network-message envelopes and the compiled message schema.

use tracing::{debug, warn};
use uaschema_builtin::SchemaSession;
use uaschema_core::{CompiledSchema, RecordSchema, SchemaError, SchemaField, SchemaId, escape_name};
use uaschema_model::{BuiltInTypeId, NetworkMessage, SchemaOptions, SchemaRank};

use crate::data_set_message::build_data_set_message_schema;

/// Compile the wire schema of a network message.
///
/// Every writer contributes one dataset-message schema. Writers without
/// metadata hold a placeholder slot that never reaches the result. The
/// envelope follows the network message content flags, and the returned
/// schema carries the fingerprint of its canonical form as id.
pub fn build_network_message_schema(
    message: &NetworkMessage,
    options: &SchemaOptions,
) -> Result<CompiledSchema, SchemaError> {
    let mut flags = message.message_content;
    let options = SchemaOptions {
        legacy_compatibility: options.legacy_compatibility || flags.use_compatibility_mode,
        use_array_envelope: options.use_array_envelope || flags.use_array_envelope,
        ..options.clone()
    };
    let mut session = SchemaSession::new(&options);
    let group = message.writer_group_name.as_deref().unwrap_or_default();

    let mut slots = Vec::with_capacity(message.writers.len());
    for writer in &message.writers {
        let slot = match &writer.metadata {
            Some(metadata) => build_data_set_message_schema(
                &mut session,
                writer,
                metadata,
                &flags,
                writer.name.as_deref(),
            ),
            None => {
                warn!(writer = writer.id, "data set writer has no metadata, skipping");
                let name = session.type_name(format!("DataSetWriter{}", writer.id));
                session.arena_mut().reserve(name)
            }
        };
        slots.push(slot);
    }
    let messages: Vec<SchemaId> = slots
        .into_iter()
        .filter(|&slot| !session.arena().is_placeholder(slot))
        .collect();

    let payload = if flags.monitored_item_message {
        // Monitored items carry their own header fields.
        flags.network_message_header = false;
        session.arena_mut().union(messages)
    } else if let [single] = messages.as_slice() {
        *single
    } else {
        session.arena_mut().union(messages)
    };

    let mut root = if flags.network_message_header {
        let messages = if flags.single_data_set_message {
            payload
        } else {
            session.arena_mut().array(payload)
        };
        let name = session.unique_name(&escape_name(&format!("{group}NetworkMessage")));
        let mut record = RecordSchema::new(session.type_name(name));
        let text = session.built_in(BuiltInTypeId::String, SchemaRank::Scalar);
        record.push(SchemaField::new("MessageId", text));
        record.push(SchemaField::new("MessageType", text));
        if flags.publisher_id {
            record.push(SchemaField::new("PublisherId", text));
        }
        if flags.data_set_class_id {
            let guid = session.built_in(BuiltInTypeId::Guid, SchemaRank::Scalar);
            record.push(SchemaField::new("DataSetClassId", guid));
        }
        record.push(SchemaField::new("DataSetWriterGroup", text));
        record.push(SchemaField::new("Messages", messages));
        session.arena_mut().record(record)
    } else {
        payload
    };

    if options.use_array_envelope {
        root = session.arena_mut().array(root);
    }

    let name = match session.arena().view(root).named() {
        Some(name) => name.full_name(),
        None => session
            .type_name(escape_name(&format!("{group}NetworkMessage")))
            .full_name(),
    };
    let compiled = session.finish(root, name, message.version.clone())?;
    debug!(name = compiled.name(), id = %compiled.id(), "compiled network message schema");
    Ok(compiled)
}
