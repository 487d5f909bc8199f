use test_case::test_case;
use uaschema_core::SchemaError;
use uaschema_model::{
    BuiltInTypeId, DataSetFieldContentFlags, DataSetMessageContentFlags, DataSetMetaData,
    EncodingMode, FieldMetaData, ModelError, NamespaceTable, NetworkMessage,
    NetworkMessageContentFlags, NodeId, OPC_UA_NAMESPACE_URI, QualifiedName, SchemaOptions,
    SchemaRank, StructureDescription, StructureField, TypeDescriptionProvider, TypeDictionary,
    value_rank,
};

#[test]
fn built_in_ids_cover_zero_to_twenty_nine() -> Result<(), SchemaError> {
    for (index, ty) in BuiltInTypeId::ALL.iter().enumerate() {
        assert_eq!(ty.id() as usize, index);
        assert_eq!(BuiltInTypeId::try_from(index as u32)?, *ty);
    }
    assert_eq!(BuiltInTypeId::try_from(13)?.as_str(), "DateTime");
    Ok(())
}

#[test]
fn unknown_built_in_id_is_an_error() {
    assert!(matches!(
        BuiltInTypeId::try_from(30),
        Err(SchemaError::UnknownBuiltInType(30))
    ));
}

#[test]
fn built_in_from_data_type_only_accepts_namespace_zero() {
    assert_eq!(
        BuiltInTypeId::from_data_type(&NodeId::numeric(0, 6)),
        Some(BuiltInTypeId::Int32)
    );
    assert_eq!(BuiltInTypeId::from_data_type(&NodeId::numeric(0, 0)), None);
    assert_eq!(BuiltInTypeId::from_data_type(&NodeId::numeric(0, 3001)), None);
    assert_eq!(BuiltInTypeId::from_data_type(&NodeId::numeric(1, 6)), None);
}

#[test_case(value_rank::SCALAR, &[] => SchemaRank::Scalar; "scalar")]
#[test_case(value_rank::ANY, &[] => SchemaRank::Scalar; "any")]
#[test_case(value_rank::SCALAR_OR_ONE_DIMENSION, &[] => SchemaRank::Scalar; "scalar or one dimension")]
#[test_case(value_rank::ONE_OR_MORE_DIMENSIONS, &[] => SchemaRank::Collection; "one or more dimensions")]
#[test_case(value_rank::ONE_DIMENSION, &[4] => SchemaRank::Collection; "one dimension")]
#[test_case(2, &[] => SchemaRank::Matrix; "two dimensions")]
#[test_case(value_rank::ONE_OR_MORE_DIMENSIONS, &[2, 3] => SchemaRank::Matrix; "dimensions force matrix")]
fn rank_from_value_rank(rank: i32, dims: &[u32]) -> SchemaRank {
    SchemaRank::from_value_rank(rank, dims)
}

#[test]
fn network_flags_round_trip_through_mask() {
    let mask = NetworkMessageContentFlags::NETWORK_MESSAGE_HEADER
        | NetworkMessageContentFlags::PUBLISHER_ID
        | NetworkMessageContentFlags::MONITORED_ITEM_MESSAGE;
    let flags = NetworkMessageContentFlags::from_mask(mask);
    assert!(flags.network_message_header);
    assert!(flags.publisher_id);
    assert!(flags.monitored_item_message);
    assert!(!flags.single_data_set_message);
    assert_eq!(flags.mask(), mask);
}

#[test]
fn data_set_message_flags_decode_each_bit() {
    let flags = DataSetMessageContentFlags::from_mask(0x7f);
    assert!(flags.data_set_writer_id && flags.data_set_writer_name && flags.status);
    assert_eq!(flags.mask(), 0x7f);
    assert_eq!(DataSetMessageContentFlags::from_mask(0), DataSetMessageContentFlags::default());
}

#[test_case(0 => false; "no flags")]
#[test_case(DataSetFieldContentFlags::STATUS_CODE => true; "status code")]
#[test_case(DataSetFieldContentFlags::SERVER_PICOSECONDS => true; "server picoseconds")]
#[test_case(DataSetFieldContentFlags::STATUS_CODE | DataSetFieldContentFlags::RAW_DATA => false; "raw data wins")]
#[test_case(DataSetFieldContentFlags::NODE_ID => false; "monitored item extras only")]
fn field_flags_select_data_value(mask: u32) -> bool {
    DataSetFieldContentFlags::from_mask(mask).is_data_value()
}

#[test]
fn options_deserialize_with_defaults() -> Result<(), serde_json::Error> {
    let options: SchemaOptions = serde_json::from_str(r#"{ "namespace": "org.example" }"#)?;
    assert_eq!(options.namespace.as_deref(), Some("org.example"));
    assert_eq!(options.encoding, EncodingMode::JsonReversible);
    assert!(!options.use_array_envelope);

    let options: SchemaOptions =
        serde_json::from_str(r#"{ "encoding": "jsonNonReversible", "legacyCompatibility": true }"#)?;
    assert_eq!(options.effective_encoding(), EncodingMode::JsonLegacyCompatibility);
    Ok(())
}

#[test]
fn legacy_toggle_does_not_affect_binary() {
    let options = SchemaOptions {
        legacy_compatibility: true,
        ..SchemaOptions::new(EncodingMode::Binary)
    };
    assert_eq!(options.effective_encoding(), EncodingMode::Binary);
}

#[test]
fn encoding_mode_parses_from_text() {
    assert_eq!("binary".parse(), Ok(EncodingMode::Binary));
    assert_eq!("json".parse(), Ok(EncodingMode::JsonReversible));
    assert!("xml".parse::<EncodingMode>().is_err());
}

#[test]
fn namespace_table_deduplicates_uris() -> Result<(), ModelError> {
    let mut table = NamespaceTable::new();
    assert_eq!(table.get(0), Some(OPC_UA_NAMESPACE_URI));
    assert_eq!(table.push("urn:example:plant")?, 1);
    assert_eq!(table.push("urn:example:plant")?, 1);
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(2), None);
    Ok(())
}

#[test]
fn namespace_table_rejects_index_overflow() -> Result<(), Box<dyn std::error::Error>> {
    let uris: Vec<String> = (0..=u32::from(u16::MAX))
        .map(|n| format!("urn:example:{n}"))
        .collect();
    let mut table: NamespaceTable = serde_json::from_value(serde_json::json!(uris))?;
    assert_eq!(table.len(), usize::from(u16::MAX) + 1);
    assert_eq!(table.index_of("urn:example:65535"), Some(u16::MAX));

    let result = table.push("urn:example:overflow");
    assert!(matches!(
        result,
        Err(ModelError::NamespaceTableFull { ref uri }) if uri == "urn:example:overflow"
    ));
    assert_eq!(table.len(), usize::from(u16::MAX) + 1);
    // Known URIs still resolve on a full table.
    assert_eq!(table.push("urn:example:1")?, 1);
    Ok(())
}

#[test]
fn dictionary_resolves_structures_by_data_type_id() -> Result<(), ModelError> {
    let mut namespaces = NamespaceTable::new();
    let ns = namespaces.push("http://example.com/Plant/")?;
    let point = StructureDescription::new(
        NodeId::numeric(ns, 3001),
        QualifiedName::new(ns, "Point"),
        vec![StructureField::new("X", BuiltInTypeId::Double.data_type_id())],
    );
    let dictionary = TypeDictionary::new(namespaces).with_structure(point.clone());

    assert_eq!(dictionary.structure(&NodeId::numeric(ns, 3001)), Some(&point));
    assert_eq!(dictionary.structure(&NodeId::numeric(ns, 3002)), None);
    assert_eq!(dictionary.namespace_uri(ns), Some("http://example.com/Plant/"));
    Ok(())
}

#[test]
fn metadata_deserializes_from_camel_case_json() -> Result<(), serde_json::Error> {
    let json = r#"{
        "name": "Boiler",
        "fields": [
            { "name": "Temperature", "builtInType": 11 },
            { "name": "Samples", "builtInType": 6, "valueRank": 1 },
            { "name": "Setpoint", "dataType": "ns=1;i=3001" }
        ]
    }"#;
    let metadata: DataSetMetaData = serde_json::from_str(json)?;
    assert_eq!(metadata.name.as_deref(), Some("Boiler"));
    assert_eq!(metadata.fields[0].built_in_type, BuiltInTypeId::Double);
    assert_eq!(metadata.fields[1].rank(), SchemaRank::Collection);
    assert_eq!(metadata.fields[2].built_in_type, BuiltInTypeId::Null);
    assert_eq!(metadata.fields[2].data_type, Some(NodeId::numeric(1, 3001)));
    assert_eq!(metadata.namespaces.get(0), Some(OPC_UA_NAMESPACE_URI));
    Ok(())
}

#[test]
fn field_builder_sets_rank() {
    let field = FieldMetaData::new("Matrix", BuiltInTypeId::Float).with_value_rank(2, vec![3, 3]);
    assert_eq!(field.rank(), SchemaRank::Matrix);
}

#[test]
fn network_message_deserializes_flags_as_objects() -> Result<(), serde_json::Error> {
    let json = r#"{
        "writerGroupName": "Group",
        "messageContent": { "networkMessageHeader": true, "singleDataSetMessage": true },
        "writers": [ { "id": 7, "messageContent": { "dataSetWriterId": true } } ]
    }"#;
    let message: NetworkMessage = serde_json::from_str(json)?;
    assert!(message.message_content.network_message_header);
    assert_eq!(message.writers[0].id, 7);
    assert!(message.writers[0].metadata.is_none());
    Ok(())
}
