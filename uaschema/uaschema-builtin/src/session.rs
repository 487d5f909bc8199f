use std::collections::HashMap;

use tracing::debug;
use uaschema_core::{
    CompiledSchema, SchemaArena, SchemaError, SchemaId, TypeName, UniqueNameRegistry,
};
use uaschema_model::{BuiltInTypeId, EncodingMode, Identifier, SchemaOptions, SchemaRank};

use crate::catalog::BuiltInTypeCatalog;

/// State of one compile invocation.
///
/// Owns the node arena, the built-in catalog, the structure and enum caches
/// and the registry of generated type names. A session is created per compile
/// and dropped afterwards so names and caches never leak between unrelated
/// messages. All methods take `&mut self`; compile in parallel by creating one
/// session per thread.
#[derive(Debug)]
pub struct SchemaSession {
    pub(crate) arena: SchemaArena,
    pub(crate) catalog: BuiltInTypeCatalog,
    pub(crate) structures: HashMap<(String, Identifier, SchemaRank), SchemaId>,
    pub(crate) ranked: HashMap<(SchemaId, SchemaRank), SchemaId>,
    /// Names given to described structures and enums, per type key.
    pub(crate) described: HashMap<(String, Identifier), TypeName>,
    /// Every full name generated outside the built-in catalog.
    names: UniqueNameRegistry,
    namespace: Option<String>,
}

impl SchemaSession {
    pub fn new(options: &SchemaOptions) -> Self {
        let mode = options.effective_encoding();
        debug!(%mode, namespace = ?options.namespace, "creating schema session");
        Self {
            arena: SchemaArena::new(),
            catalog: BuiltInTypeCatalog::new(mode).with_fixed_guid(options.fixed_guid),
            structures: HashMap::new(),
            ranked: HashMap::new(),
            described: HashMap::new(),
            names: UniqueNameRegistry::new(),
            namespace: options.namespace.clone().filter(|ns| !ns.is_empty()),
        }
    }

    pub fn mode(&self) -> EncodingMode {
        self.catalog.mode()
    }

    /// Namespace of generated message-level types.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn arena(&self) -> &SchemaArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut SchemaArena {
        &mut self.arena
    }

    pub fn catalog(&self) -> &BuiltInTypeCatalog {
        &self.catalog
    }

    /// Claim a unique message-level type name derived from `base`.
    pub fn unique_name(&mut self, base: &str) -> String {
        let name = self.type_name(base);
        self.claim(name).name
    }

    /// Claim `name`, or `name` with the first free numeric suffix when its
    /// full name is already taken in this session.
    pub fn claim(&mut self, name: TypeName) -> TypeName {
        self.names.unique_type_name(name)
    }

    /// A [`TypeName`] in the session namespace.
    pub fn type_name(&self, name: impl Into<String>) -> TypeName {
        TypeName::new(name, self.namespace())
    }

    pub fn built_in(&mut self, ty: BuiltInTypeId, rank: SchemaRank) -> SchemaId {
        self.catalog.schema_for_built_in_type(&mut self.arena, ty, rank)
    }

    pub fn built_in_id(&mut self, id: u32, rank: SchemaRank) -> Result<SchemaId, SchemaError> {
        self.catalog.schema_for_built_in_id(&mut self.arena, id, rank)
    }

    pub fn nullable(&mut self, id: SchemaId) -> SchemaId {
        self.arena.nullable(id)
    }

    /// Field value schema, DataValue-wrapped when requested, always nullable.
    pub fn data_set_field(
        &mut self,
        as_data_value: bool,
        value: SchemaId,
        built_in: BuiltInTypeId,
    ) -> SchemaId {
        let namespace = self.namespace.clone();
        self.catalog.schema_for_data_set_field(
            &mut self.arena,
            &mut self.names,
            namespace.as_deref(),
            as_data_value,
            value,
            built_in,
        )
    }

    pub fn configuration_version(&mut self) -> SchemaId {
        self.catalog.configuration_version(&mut self.arena)
    }

    /// Lift a scalar schema to `rank`: an array for collections, a
    /// `<name>Matrix` record for matrices. Memoized per scalar.
    pub fn with_rank(&mut self, name: &TypeName, scalar: SchemaId, rank: SchemaRank) -> SchemaId {
        if rank == SchemaRank::Scalar {
            return scalar;
        }
        if let Some(&id) = self.ranked.get(&(scalar, rank)) {
            return id;
        }
        let id = match rank {
            SchemaRank::Collection => self.arena.array(scalar),
            _ => {
                let matrix = self.claim(TypeName::new(
                    format!("{}{}", name.name, rank.suffix()),
                    name.namespace.as_deref(),
                ));
                self.catalog.matrix(&mut self.arena, matrix, scalar)
            }
        };
        self.ranked.insert((scalar, rank), id);
        id
    }

    /// Freeze the session arena at `root`.
    pub fn finish(
        self,
        root: SchemaId,
        name: impl Into<String>,
        version: Option<String>,
    ) -> Result<CompiledSchema, SchemaError> {
        CompiledSchema::new(self.arena, root, name, version)
    }
}
