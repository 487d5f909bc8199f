//! Compilation of user-defined structures and enumerations.

use serde_json::json;
use tracing::{trace, warn};
use uaschema_core::{
    EnumSchema, RecordSchema, SchemaField, SchemaId, SchemaNode, TypeName, escape_name,
    namespace_from_uri,
};
use uaschema_model::{
    BuiltInTypeId, EnumDescription, FieldMetaData, Identifier, NodeId, SchemaRank,
    StructureDescription, StructureKind, TypeDescriptionProvider,
};

use crate::session::SchemaSession;

impl SchemaSession {
    /// Compile a structure into a named record at `rank`.
    ///
    /// Fields of the base type come first, then the structure's own fields;
    /// positions run 0..n across both. Optional fields, and every field of a
    /// union structure, are nullable. Fields whose data type cannot be
    /// resolved are left out.
    pub fn compile_structure(
        &mut self,
        provider: &dyn TypeDescriptionProvider,
        description: &StructureDescription,
        rank: SchemaRank,
    ) -> SchemaId {
        let name =
            self.described_name(provider, &description.data_type_id, &description.name.name);
        if rank != SchemaRank::Scalar {
            let scalar = self.compile_structure(provider, description, SchemaRank::Scalar);
            return self.with_rank(&name, scalar, rank);
        }

        let key = self.structure_key(provider, &description.data_type_id, rank);
        if let Some(&id) = self.structures.get(&key) {
            return id;
        }
        let slot = self.arena.reserve(name.clone());
        self.structures.insert(key, slot);
        trace!(name = %name, data_type = %description.data_type_id, %slot, "compiling structure");

        let mut record = RecordSchema::new(name)
            .with_property("dataTypeId", json!(description.data_type_id.to_string()));

        for field in self.base_fields(provider, description) {
            record.push(field);
        }

        let nullable_fields = description.kind == StructureKind::Union;
        for field in &description.fields {
            let Some(data_type) = &field.data_type else {
                warn!(
                    structure = %description.name,
                    field = %field.name,
                    "field has no data type, skipping"
                );
                continue;
            };
            let field_rank = SchemaRank::from_value_rank(field.value_rank, &field.array_dimensions);
            let Some(schema) =
                self.schema_for_field(provider, Some(data_type), BuiltInTypeId::Null, field_rank)
            else {
                warn!(
                    structure = %description.name,
                    field = %field.name,
                    %data_type,
                    "field data type cannot be resolved, skipping"
                );
                continue;
            };
            let schema = if field.is_optional || nullable_fields {
                self.arena.nullable(schema)
            } else {
                schema
            };
            record.push(
                SchemaField::new(escape_name(&field.name), schema)
                    .with_doc(field.description.clone()),
            );
        }

        self.arena.fill(slot, SchemaNode::Record(record));
        slot
    }

    /// Compile an enumeration into a named enum at `rank`.
    ///
    /// Symbols are the member names in declaration order, or `Name_Value`
    /// under non-reversible JSON. The first symbol is the default.
    pub fn compile_enum(
        &mut self,
        provider: &dyn TypeDescriptionProvider,
        description: &EnumDescription,
        rank: SchemaRank,
    ) -> SchemaId {
        let name =
            self.described_name(provider, &description.data_type_id, &description.name.name);
        if rank != SchemaRank::Scalar {
            let scalar = self.compile_enum(provider, description, SchemaRank::Scalar);
            return self.with_rank(&name, scalar, rank);
        }

        let key = self.structure_key(provider, &description.data_type_id, rank);
        if let Some(&id) = self.structures.get(&key) {
            return id;
        }
        let non_reversible = self.mode().is_non_reversible();
        let symbols = description
            .fields
            .iter()
            .map(|f| {
                if non_reversible {
                    escape_name(&format!("{}_{}", f.name, f.value))
                } else {
                    escape_name(&f.name)
                }
            })
            .collect();
        let id = self.arena.enumeration(EnumSchema {
            name,
            doc: None,
            symbols,
        });
        self.structures.insert(key, id);
        id
    }

    /// Resolve a field's data type: namespace-0 built-in types through the
    /// catalog, other ids through `provider`. When the id is missing or
    /// unknown the `built_in` tag is used unless it is `Null`.
    pub fn schema_for_field(
        &mut self,
        provider: &dyn TypeDescriptionProvider,
        data_type: Option<&NodeId>,
        built_in: BuiltInTypeId,
        rank: SchemaRank,
    ) -> Option<SchemaId> {
        if let Some(data_type) = data_type {
            if let Some(ty) = BuiltInTypeId::from_data_type(data_type) {
                return Some(self.built_in(ty, rank));
            }
            if let Some(structure) = provider.structure(data_type) {
                return Some(self.compile_structure(provider, structure, rank));
            }
            if let Some(enumeration) = provider.enumeration(data_type) {
                return Some(self.compile_enum(provider, enumeration, rank));
            }
        }
        match built_in {
            BuiltInTypeId::Null => None,
            ty => Some(self.built_in(ty, rank)),
        }
    }

    /// Value schema of a dataset field before DataValue wrapping.
    ///
    /// Structure values are wrapped as extension objects unless `raw` is set
    /// or the session encodes non-reversible JSON.
    pub fn schema_for_data_set_value(
        &mut self,
        provider: &dyn TypeDescriptionProvider,
        field: &FieldMetaData,
        raw: bool,
    ) -> Option<SchemaId> {
        let rank = field.rank();
        let structure = field.data_type.as_ref().and_then(|dt| provider.structure(dt));
        match structure {
            Some(structure) if !raw && !self.mode().is_non_reversible() => {
                let body = self.compile_structure(provider, structure, SchemaRank::Scalar);
                let wrapper = match self.catalog.extendable(body) {
                    Some(wrapper) => wrapper,
                    None => {
                        let body_name = self.arena.view(body).named().cloned()?;
                        let name = self.claim(TypeName::new(
                            format!("{}ExtensionObject", body_name.name),
                            body_name.namespace.as_deref(),
                        ));
                        self.catalog.schema_for_extendable_type(
                            &mut self.arena,
                            &name.name,
                            name.namespace.as_deref(),
                            &structure.data_type_id,
                            body,
                        )
                    }
                };
                let name = self.arena.view(wrapper).named().cloned()?;
                Some(self.with_rank(&name, wrapper, rank))
            }
            _ => self.schema_for_field(
                provider,
                field.data_type.as_ref(),
                field.built_in_type,
                rank,
            ),
        }
    }

    /// Schema name of a described type, claimed once per data-type id.
    ///
    /// Types whose namespace URI is unknown land in the session namespace,
    /// so equal names from different namespaces get numeric suffixes.
    fn described_name(
        &mut self,
        provider: &dyn TypeDescriptionProvider,
        data_type_id: &NodeId,
        name: &str,
    ) -> TypeName {
        let key = type_key(provider, data_type_id);
        if let Some(name) = self.described.get(&key) {
            return name.clone();
        }
        let namespace = match provider.namespace_uri(data_type_id.namespace) {
            Some(uri) => Some(namespace_from_uri(uri)),
            None => self.namespace().map(str::to_string),
        };
        let name = self.claim(TypeName::new(escape_name(name), namespace.as_deref()));
        self.described.insert(key, name.clone());
        name
    }

    fn structure_key(
        &self,
        provider: &dyn TypeDescriptionProvider,
        data_type_id: &NodeId,
        rank: SchemaRank,
    ) -> (String, Identifier, SchemaRank) {
        let (namespace, identifier) = type_key(provider, data_type_id);
        (namespace, identifier, rank)
    }

    /// Fields inherited from the base structure, in base order.
    fn base_fields(
        &mut self,
        provider: &dyn TypeDescriptionProvider,
        description: &StructureDescription,
    ) -> Vec<SchemaField> {
        let Some(base) = description
            .base_data_type
            .as_ref()
            .and_then(|id| provider.structure(id))
        else {
            return Vec::new();
        };
        let base_id = self.compile_structure(provider, base, SchemaRank::Scalar);
        match self.arena.view(base_id).as_record() {
            Some(record) => record.fields.clone(),
            None => {
                warn!(
                    structure = %description.name,
                    base = %base.name,
                    "cyclic base type, skipping inherited fields"
                );
                Vec::new()
            }
        }
    }
}

/// Identity of a described type: its namespace URI, or the raw namespace
/// index when the provider cannot resolve it, plus the identifier.
fn type_key(provider: &dyn TypeDescriptionProvider, data_type_id: &NodeId) -> (String, Identifier) {
    let namespace = provider
        .namespace_uri(data_type_id.namespace)
        .map(str::to_string)
        .unwrap_or_else(|| format!("ns={}", data_type_id.namespace));
    (namespace, data_type_id.identifier.clone())
}
