use test_case::test_case;
use uaschema_builtin::{BuiltInTypeCatalog, SchemaSession};
use uaschema_core::{SchemaArena, SchemaError, SchemaNode, SchemaView, TextForm, to_json_value};
use uaschema_model::{BuiltInTypeId, EncodingMode, SchemaOptions, SchemaRank};

fn session(mode: EncodingMode) -> SchemaSession {
    SchemaSession::new(&SchemaOptions::new(mode))
}

fn describe(view: SchemaView<'_>) -> String {
    match view.node() {
        SchemaNode::Primitive(p) => match p.logical {
            Some(logical) => format!("{}:{}", p.kind.as_str(), logical.as_str()),
            None => p.kind.as_str().to_string(),
        },
        SchemaNode::Record(r) => format!("record:{}", r.name.name),
        other => other.type_name().to_string(),
    }
}

#[test]
fn repeated_lookups_return_the_same_node() -> Result<(), SchemaError> {
    let mut session = session(EncodingMode::Binary);
    let first = session.built_in(BuiltInTypeId::Int32, SchemaRank::Scalar);
    let second = session.built_in(BuiltInTypeId::Int32, SchemaRank::Scalar);
    let by_id = session.built_in_id(6, SchemaRank::Scalar)?;
    assert_eq!(first, second);
    assert_eq!(first, by_id);

    let nodes = session.arena().len();
    session.built_in(BuiltInTypeId::Variant, SchemaRank::Scalar);
    let grown = session.arena().len();
    session.built_in(BuiltInTypeId::Variant, SchemaRank::Scalar);
    assert!(grown > nodes);
    assert_eq!(session.arena().len(), grown);
    Ok(())
}

#[test]
fn unknown_numeric_id_fails() {
    let mut session = session(EncodingMode::Binary);
    assert!(matches!(
        session.built_in_id(42, SchemaRank::Scalar),
        Err(SchemaError::UnknownBuiltInType(42))
    ));
}

#[test]
fn byte_collection_is_byte_string() {
    let mut session = session(EncodingMode::Binary);
    let bytes = session.built_in(BuiltInTypeId::Byte, SchemaRank::Collection);
    let byte_string = session.built_in(BuiltInTypeId::ByteString, SchemaRank::Scalar);
    assert_eq!(bytes, byte_string);
    assert_eq!(session.arena().view(bytes).type_name(), "bytes");
}

#[test]
fn abstract_types_alias_concrete_ones() {
    let mut session = session(EncodingMode::JsonReversible);
    let number = session.built_in(BuiltInTypeId::Number, SchemaRank::Collection);
    let double = session.built_in(BuiltInTypeId::Double, SchemaRank::Collection);
    assert_eq!(number, double);
    let integer = session.built_in(BuiltInTypeId::Integer, SchemaRank::Scalar);
    let int64 = session.built_in(BuiltInTypeId::Int64, SchemaRank::Scalar);
    assert_eq!(integer, int64);
}

#[test_case(EncodingMode::Binary, BuiltInTypeId::Boolean => "boolean"; "binary boolean")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::UInt32 => "long"; "binary uint32")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::Int64 => "long"; "binary int64")]
#[test_case(EncodingMode::JsonReversible, BuiltInTypeId::Int64 => "string"; "json int64")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::UInt64 => "union"; "binary uint64")]
#[test_case(EncodingMode::JsonNonReversible, BuiltInTypeId::UInt64 => "string"; "json uint64")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::DateTime => "long:timestamp-micros"; "binary datetime")]
#[test_case(EncodingMode::JsonReversible, BuiltInTypeId::DateTime => "string:date-time"; "json datetime")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::ByteString => "bytes"; "binary bytestring")]
#[test_case(EncodingMode::JsonReversible, BuiltInTypeId::ByteString => "string:base64"; "json bytestring")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::Guid => "string:uuid"; "binary guid")]
#[test_case(EncodingMode::JsonNonReversible, BuiltInTypeId::Guid => "string:uuid"; "json guid")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::StatusCode => "long"; "binary status")]
#[test_case(EncodingMode::JsonReversible, BuiltInTypeId::StatusCode => "long"; "reversible status")]
#[test_case(EncodingMode::JsonNonReversible, BuiltInTypeId::StatusCode => "record:StatusCode"; "non-reversible status")]
#[test_case(EncodingMode::JsonLegacyCompatibility, BuiltInTypeId::StatusCode => "record:StatusCode"; "legacy status")]
#[test_case(EncodingMode::JsonReversible, BuiltInTypeId::LocalizedText => "record:LocalizedText"; "reversible text")]
#[test_case(EncodingMode::JsonNonReversible, BuiltInTypeId::LocalizedText => "string"; "non-reversible text")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::Enumeration => "int"; "binary enumeration")]
#[test_case(EncodingMode::JsonNonReversible, BuiltInTypeId::Enumeration => "string"; "non-reversible enumeration")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::Null => "null"; "null")]
#[test_case(EncodingMode::Binary, BuiltInTypeId::Variant => "union"; "variant")]
fn scalar_schema_per_mode(mode: EncodingMode, ty: BuiltInTypeId) -> String {
    let mut session = session(mode);
    let id = session.built_in(ty, SchemaRank::Scalar);
    describe(session.arena().view(id))
}

#[test]
fn fixed_guid_is_a_sixteen_byte_block() {
    let mut arena = SchemaArena::new();
    let mut catalog = BuiltInTypeCatalog::new(EncodingMode::Binary).with_fixed_guid(true);
    let guid = catalog.schema_for_built_in_type(&mut arena, BuiltInTypeId::Guid, SchemaRank::Scalar);
    match arena.node(guid) {
        SchemaNode::Fixed(fixed) => {
            assert_eq!(fixed.size, 16);
            assert_eq!(fixed.name.full_name(), "org.opcfoundation.UA.Guid");
        }
        other => panic!("expected fixed, got {other:?}"),
    }
}

#[test]
fn binary_uint64_is_int_or_eight_byte_block() {
    let mut session = session(EncodingMode::Binary);
    let id = session.built_in(BuiltInTypeId::UInt64, SchemaRank::Scalar);
    let members = session.arena().view(id).members();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].type_name(), "int");
    assert_eq!(members[1].type_name(), "fixed");
    assert_eq!(members[1].name(), Some("UInt64"));
}

#[test]
fn variant_lists_every_carried_type_and_rank() -> Result<(), SchemaError> {
    let mut session = session(EncodingMode::JsonReversible);
    let variant = session.built_in(BuiltInTypeId::Variant, SchemaRank::Scalar);
    let view = session.arena().view(variant);
    let members = view.members();

    // 24 carried types at 3 ranks, minus ByteCollection and scalar Variant,
    // plus null.
    assert_eq!(members.len(), 71);
    assert!(members[0].is_null());
    assert!(view.is_nullable());

    let names: Vec<_> = members.iter().filter_map(|m| m.named()).map(|n| n.full_name()).collect();
    assert!(names.contains(&"org.opcfoundation.UA.Variant.Int32".to_string()));
    assert!(names.contains(&"org.opcfoundation.UA.Variant.ByteMatrix".to_string()));
    assert!(names.contains(&"org.opcfoundation.UA.Variant.VariantCollection".to_string()));
    assert!(!names.iter().any(|n| n.ends_with(".Variant.ByteCollection")));
    assert!(!names.iter().any(|n| n.ends_with(".Variant.Variant")));
    assert!(!names.iter().any(|n| n.contains("DiagnosticInfo")));
    assert!(!names.iter().any(|n| n.contains("Enumeration")));

    session.arena().verify(variant)?;
    to_json_value(session.arena(), variant, TextForm::Canonical)?;
    Ok(())
}

#[test]
fn variant_collection_refers_back_to_variant() {
    let mut session = session(EncodingMode::Binary);
    let variant = session.built_in(BuiltInTypeId::Variant, SchemaRank::Scalar);
    let collection = session.built_in(BuiltInTypeId::Variant, SchemaRank::Collection);
    let items = session.arena().view(collection).items().map(|v| v.id());
    assert_eq!(items, Some(variant));
}

#[test]
fn diagnostic_info_nests_itself_optionally() -> Result<(), SchemaError> {
    let mut session = session(EncodingMode::Binary);
    let info = session.built_in(BuiltInTypeId::DiagnosticInfo, SchemaRank::Scalar);
    let view = session.arena().view(info);
    assert_eq!(
        view.field_names(),
        [
            "SymbolicId",
            "NamespaceUri",
            "Locale",
            "LocalizedText",
            "AdditionalInfo",
            "InnerStatusCode",
            "InnerDiagnosticInfo"
        ]
    );
    assert!(view.fields().iter().all(|f| f.schema.is_nullable()));
    let inner = view.field("InnerDiagnosticInfo").map(|f| f.schema.non_null().id());
    assert_eq!(inner, Some(info));
    session.arena().verify(info)?;
    Ok(())
}

#[test]
fn data_value_wraps_variant() -> Result<(), SchemaError> {
    let mut session = session(EncodingMode::JsonReversible);
    let data_value = session.built_in(BuiltInTypeId::DataValue, SchemaRank::Scalar);
    let variant = session.built_in(BuiltInTypeId::Variant, SchemaRank::Scalar);
    let view = session.arena().view(data_value);
    assert_eq!(
        view.field_names(),
        [
            "Value",
            "Status",
            "SourceTimestamp",
            "SourcePicoseconds",
            "ServerTimestamp",
            "ServerPicoseconds"
        ]
    );
    assert_eq!(view.field("Value").map(|f| f.schema.id()), Some(variant));
    session.arena().verify(data_value)?;
    Ok(())
}

#[test]
fn node_id_shape_follows_mode() {
    let mut binary = session(EncodingMode::Binary);
    let id = binary.built_in(BuiltInTypeId::NodeId, SchemaRank::Scalar);
    let view = binary.arena().view(id);
    assert_eq!(view.field_names(), ["IdType", "Id", "Namespace"]);
    assert_eq!(view.field("Id").map(|f| f.schema.members().len()), Some(3));
    assert_eq!(view.field("Namespace").map(|f| f.schema.type_name()), Some("int"));

    let mut json = session(EncodingMode::JsonNonReversible);
    let id = json.built_in(BuiltInTypeId::ExpandedNodeId, SchemaRank::Scalar);
    let view = json.arena().view(id);
    assert_eq!(view.field_names(), ["IdType", "Id", "Namespace", "ServerUri"]);
    assert_eq!(view.field("Id").map(|f| f.schema.members().len()), Some(2));
    assert_eq!(view.field("Namespace").map(|f| f.schema.type_name()), Some("string"));
}

#[test]
fn extension_object_body_is_optional_encoded_bytes() {
    let mut session = session(EncodingMode::Binary);
    let id = session.built_in(BuiltInTypeId::ExtensionObject, SchemaRank::Scalar);
    let view = session.arena().view(id);
    let body = view.field("Body").map(|f| f.schema);
    assert_eq!(body.map(|b| b.is_nullable()), Some(true));
    let encoded = body.map(|b| b.non_null());
    assert_eq!(encoded.and_then(|e| e.name()), Some("EncodedBody"));
    let encoding = encoded.and_then(|e| e.field("Encoding")).and_then(|f| f.schema.symbols());
    assert_eq!(encoding, Some(&["Binary".to_string(), "Xml".into(), "Json".into()][..]));
}

#[test]
fn matrix_carries_dimensions_and_flat_body() {
    let mut session = session(EncodingMode::Binary);
    let id = session.built_in(BuiltInTypeId::Float, SchemaRank::Matrix);
    let view = session.arena().view(id);
    assert_eq!(view.name(), Some("FloatMatrix"));
    assert_eq!(view.field_names(), ["Dimensions", "Body"]);
    let body = view.field("Body").and_then(|f| f.schema.items());
    assert_eq!(body.map(|b| b.type_name()), Some("float"));
}

#[test]
fn data_set_field_wraps_only_on_request() {
    let mut session = session(EncodingMode::JsonReversible);
    let int = session.built_in(BuiltInTypeId::Int32, SchemaRank::Scalar);

    let raw = session.data_set_field(false, int, BuiltInTypeId::Int32);
    assert_eq!(session.arena().view(raw).non_null().id(), int);
    assert!(session.arena().view(raw).is_nullable());

    let wrapped = session.data_set_field(true, int, BuiltInTypeId::Int32);
    let again = session.data_set_field(true, int, BuiltInTypeId::Int32);
    assert_eq!(wrapped, again);
    let record = session.arena().view(wrapped).non_null();
    assert_eq!(record.name(), Some("Int32DataValue"));
    assert_eq!(record.fields().len(), 6);

    let variant = session.built_in(BuiltInTypeId::Variant, SchemaRank::Scalar);
    let data_value = session.built_in(BuiltInTypeId::DataValue, SchemaRank::Scalar);
    let wrapped = session.data_set_field(true, variant, BuiltInTypeId::Variant);
    assert_eq!(session.arena().view(wrapped).non_null().id(), data_value);
}
