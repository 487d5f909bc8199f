use tracing::warn;
use uaschema_builtin::SchemaSession;
use uaschema_core::{RecordSchema, SchemaField, SchemaId, escape_name};
use uaschema_model::{DataSetFieldContentFlags, DataSetMetaData, FieldMetaData};

/// Resolved schema of one dataset field.
pub(crate) struct FieldSchema<'a> {
    pub field: &'a FieldMetaData,
    pub schema: SchemaId,
}

/// Resolve every field of `metadata` to its nullable, optionally
/// DataValue-wrapped, value schema. Unresolvable fields are dropped.
pub(crate) fn field_schemas<'a>(
    session: &mut SchemaSession,
    metadata: &'a DataSetMetaData,
    flags: &DataSetFieldContentFlags,
) -> Vec<FieldSchema<'a>> {
    let as_data_value = flags.is_data_value();
    let mut resolved = Vec::with_capacity(metadata.fields.len());
    for field in &metadata.fields {
        let Some(value) = session.schema_for_data_set_value(metadata, field, flags.raw_data)
        else {
            warn!(
                data_set = ?metadata.name,
                field = %field.name,
                "field type cannot be resolved, skipping"
            );
            continue;
        };
        let schema = session.data_set_field(as_data_value, value, field.built_in_type);
        resolved.push(FieldSchema { field, schema });
    }
    resolved
}

/// Build the payload schema of one dataset.
///
/// A dataset with exactly one field is published without field names, so
/// the payload is that field's nullable value schema. Otherwise the payload
/// is a record named after `type_name` (or the dataset) with one field per
/// dataset field in dataset order.
pub fn build_data_set_schema(
    session: &mut SchemaSession,
    metadata: &DataSetMetaData,
    flags: &DataSetFieldContentFlags,
    type_name: Option<&str>,
) -> SchemaId {
    let fields = field_schemas(session, metadata, flags);

    if let [single] = fields.as_slice() {
        return session.nullable(single.schema);
    }

    let base = type_name
        .or(metadata.name.as_deref())
        .filter(|name| !name.is_empty())
        .unwrap_or("DataSet");
    let name = session.unique_name(&escape_name(base));
    let mut record = RecordSchema::new(session.type_name(name));
    record.doc = metadata.description.clone().filter(|d| !d.is_empty());
    for FieldSchema { field, schema } in fields {
        record.push(
            SchemaField::new(escape_name(&field.name), schema)
                .with_doc(field.description.clone()),
        );
    }
    session.arena_mut().record(record)
}
