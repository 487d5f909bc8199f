use uaschema_builtin::SchemaSession;
use uaschema_core::SchemaId;
use uaschema_model::{
    BuiltInTypeId, DataSetFieldContentFlags, DataSetMessageContentFlags, DataSetMetaData,
    DataSetWriter, EncodingMode, FieldMetaData, NetworkMessageContentFlags, SchemaOptions,
};
use uaschema_pubsub::build_data_set_message_schema;

fn writer(fields: &[(&str, BuiltInTypeId)], content: DataSetMessageContentFlags) -> DataSetWriter {
    let metadata = DataSetMetaData::new(
        "Line",
        fields
            .iter()
            .map(|&(name, ty)| FieldMetaData::new(name, ty))
            .collect(),
    );
    DataSetWriter::new(1, metadata).with_message_content(content)
}

fn header() -> NetworkMessageContentFlags {
    NetworkMessageContentFlags {
        data_set_message_header: true,
        ..Default::default()
    }
}

fn build(
    session: &mut SchemaSession,
    writer: &DataSetWriter,
    flags: &NetworkMessageContentFlags,
) -> SchemaId {
    let Some(metadata) = &writer.metadata else {
        panic!("writer without metadata");
    };
    build_data_set_message_schema(session, writer, metadata, flags, None)
}

const TWO_FIELDS: &[(&str, BuiltInTypeId)] =
    &[("Speed", BuiltInTypeId::Double), ("Count", BuiltInTypeId::UInt32)];

#[test]
fn no_header_returns_the_payload() {
    let mut session = SchemaSession::new(&SchemaOptions::default());
    let writer = writer(TWO_FIELDS, DataSetMessageContentFlags::from_mask(0x7f));
    let id = build(&mut session, &writer, &NetworkMessageContentFlags::default());
    let view = session.arena().view(id);
    assert_eq!(view.name(), Some("Line"));
    assert_eq!(view.field_names(), ["Speed", "Count"]);
}

#[test]
fn header_fields_follow_fixed_order() {
    let mut session = SchemaSession::new(&SchemaOptions::new(EncodingMode::JsonReversible));
    let writer = writer(TWO_FIELDS, DataSetMessageContentFlags::from_mask(0x7f));
    let id = build(&mut session, &writer, &header());
    let view = session.arena().view(id);

    assert_eq!(view.name(), Some("DataSetMessageType"));
    assert_eq!(
        view.field_names(),
        [
            "DataSetWriterId",
            "SequenceNumber",
            "MetaDataVersion",
            "Timestamp",
            "Status",
            "MessageType",
            "DataSetWriterName",
            "Payload"
        ]
    );
    let writer_id = view.field("DataSetWriterId").map(|f| f.schema.type_name());
    assert_eq!(writer_id, Some("int"));
    let version = view.field("MetaDataVersion").map(|f| f.schema.field_names());
    assert_eq!(version, Some(vec!["MajorVersion", "MinorVersion"]));
    assert_eq!(view.field("Status").map(|f| f.schema.is_nullable()), Some(true));
    let payload = view.field("Payload").and_then(|f| f.schema.name());
    assert_eq!(payload, Some("Line"));
}

#[test]
fn only_flagged_header_fields_are_present() {
    let mut session = SchemaSession::new(&SchemaOptions::new(EncodingMode::Binary));
    let content = DataSetMessageContentFlags {
        sequence_number: true,
        status: true,
        ..Default::default()
    };
    let writer = writer(TWO_FIELDS, content);
    let id = build(&mut session, &writer, &header());
    assert_eq!(
        session.arena().view(id).field_names(),
        ["SequenceNumber", "Status", "Payload"]
    );
}

#[test]
fn legacy_header_uses_string_writer_id_and_no_writer_name() {
    let options = SchemaOptions {
        legacy_compatibility: true,
        ..SchemaOptions::new(EncodingMode::JsonReversible)
    };
    let mut session = SchemaSession::new(&options);
    let writer = writer(TWO_FIELDS, DataSetMessageContentFlags::from_mask(0x7f));
    let id = build(&mut session, &writer, &header());
    let view = session.arena().view(id);

    assert!(!view.field_names().contains(&"DataSetWriterName"));
    let writer_id = view.field("DataSetWriterId").map(|f| f.schema.type_name());
    assert_eq!(writer_id, Some("string"));
    let status = view.field("Status").and_then(|f| f.schema.non_null().name());
    assert_eq!(status, Some("StatusCode"));
}

#[test]
fn monitored_items_yield_one_message_type_per_field() {
    let mut session = SchemaSession::new(&SchemaOptions::new(EncodingMode::JsonReversible));
    let fields = &[
        ("Speed", BuiltInTypeId::Double),
        ("Count", BuiltInTypeId::UInt32),
        ("Label", BuiltInTypeId::String),
    ];
    let content = DataSetMessageContentFlags {
        timestamp: true,
        ..Default::default()
    };
    let writer = writer(fields, content).with_field_content(DataSetFieldContentFlags {
        node_id: true,
        extension_fields: true,
        ..Default::default()
    });
    let flags = NetworkMessageContentFlags {
        monitored_item_message: true,
        ..Default::default()
    };
    let id = build(&mut session, &writer, &flags);
    let members = session.arena().view(id).members();

    assert_eq!(members.len(), 3);
    let names: Vec<_> = members.iter().filter_map(|m| m.name()).collect();
    assert_eq!(
        names,
        [
            "SpeedMonitoredItemMessageType",
            "CountMonitoredItemMessageType",
            "LabelMonitoredItemMessageType"
        ]
    );
    assert_eq!(
        members[0].field_names(),
        ["NodeId", "Timestamp", "Value", "ExtensionFields"]
    );
    let extension = members[0].field("ExtensionFields").map(|f| f.schema.non_null().type_name());
    assert_eq!(extension, Some("map"));
}

#[test]
fn single_monitored_item_is_a_bare_record() {
    let mut session = SchemaSession::new(&SchemaOptions::new(EncodingMode::JsonReversible));
    let flags = NetworkMessageContentFlags {
        monitored_item_message: true,
        ..Default::default()
    };
    let content = DataSetMessageContentFlags::default();

    let single = writer(&[("Speed", BuiltInTypeId::Double)], content);
    let id = build(&mut session, &single, &flags);
    let view = session.arena().view(id);
    assert!(view.members().is_empty());
    assert_eq!(view.name(), Some("SpeedMonitoredItemMessageType"));
    assert_eq!(view.field_names(), ["Value"]);

    let pair = writer(TWO_FIELDS, content);
    let id = build(&mut session, &pair, &flags);
    assert_eq!(session.arena().view(id).members().len(), TWO_FIELDS.len());
}
