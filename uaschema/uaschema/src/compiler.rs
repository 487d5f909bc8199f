use tracing::debug;
use uaschema_builtin::SchemaSession;
use uaschema_core::{CompiledSchema, SchemaId, escape_name};
use uaschema_model::{
    BuiltInTypeId, DataSetFieldContentFlags, DataSetMetaData, DataSetWriter, EncodingMode,
    NetworkMessage, NetworkMessageContentFlags, SchemaOptions, SchemaRank,
};
use uaschema_pubsub::{
    build_data_set_message_schema, build_data_set_schema, build_network_message_schema,
};

use crate::error::CompileError;

/// Compiles PubSub message descriptions into wire schemas.
///
/// Every call runs in a fresh session, so one compiler can be reused for
/// any number of unrelated messages.
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    options: SchemaOptions,
}

/// Builder for configuring [`SchemaCompiler`].
#[derive(Debug, Clone, Default)]
pub struct SchemaCompilerBuilder {
    options: SchemaOptions,
}

impl SchemaCompiler {
    /// Create a builder for [`SchemaCompiler`].
    pub fn builder() -> SchemaCompilerBuilder {
        SchemaCompilerBuilder::default()
    }

    pub fn new(options: SchemaOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Compile the schema of a whole network message.
    pub fn compile_network_message(
        &self,
        message: &NetworkMessage,
    ) -> Result<CompiledSchema, CompileError> {
        Ok(build_network_message_schema(message, &self.options)?)
    }

    /// Compile the message schema of one writer as it appears inside a
    /// network message with `network_flags`.
    pub fn compile_data_set_message(
        &self,
        writer: &DataSetWriter,
        network_flags: &NetworkMessageContentFlags,
    ) -> Result<CompiledSchema, CompileError> {
        let metadata = writer
            .metadata
            .as_ref()
            .ok_or(CompileError::MissingMetaData { writer: writer.id })?;
        let mut session = SchemaSession::new(&self.options);
        let root = build_data_set_message_schema(
            &mut session,
            writer,
            metadata,
            network_flags,
            writer.name.as_deref(),
        );
        let name = root_name(&session, root, "DataSetMessageType");
        let compiled = session.finish(root, name, None)?;
        debug!(writer = writer.id, id = %compiled.id(), "compiled data set message schema");
        Ok(compiled)
    }

    /// Compile the payload schema of a single dataset.
    pub fn compile_data_set(
        &self,
        metadata: &DataSetMetaData,
        flags: &DataSetFieldContentFlags,
    ) -> Result<CompiledSchema, CompileError> {
        let mut session = SchemaSession::new(&self.options);
        let root = build_data_set_schema(&mut session, metadata, flags, None);
        let fallback = metadata.name.as_deref().unwrap_or("DataSet");
        let name = root_name(&session, root, fallback);
        let version = metadata.configuration_version;
        let version = format!("{}.{}", version.major_version, version.minor_version);
        let compiled = session.finish(root, name, Some(version))?;
        debug!(name = compiled.name(), id = %compiled.id(), "compiled data set schema");
        Ok(compiled)
    }

    /// Compile the schema of a built-in type given by its numeric id.
    pub fn compile_built_in(
        &self,
        id: u32,
        rank: SchemaRank,
    ) -> Result<CompiledSchema, CompileError> {
        let ty = BuiltInTypeId::try_from(id)?;
        let mut session = SchemaSession::new(&self.options);
        let root = session.built_in(ty, rank);
        let name = match session.arena().view(root).non_null().named() {
            Some(name) => name.full_name(),
            None => format!("{}.{ty}{}", session.catalog().namespace(), rank.suffix()),
        };
        Ok(session.finish(root, name, None)?)
    }
}

impl SchemaCompilerBuilder {
    pub fn encoding(mut self, encoding: EncodingMode) -> Self {
        self.options.encoding = encoding;
        self
    }

    /// Namespace of generated message-level types.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.options.namespace = Some(namespace.into());
        self
    }

    pub fn legacy_compatibility(mut self, enabled: bool) -> Self {
        self.options.legacy_compatibility = enabled;
        self
    }

    pub fn array_envelope(mut self, enabled: bool) -> Self {
        self.options.use_array_envelope = enabled;
        self
    }

    pub fn fixed_guid(mut self, enabled: bool) -> Self {
        self.options.fixed_guid = enabled;
        self
    }

    pub fn build(self) -> SchemaCompiler {
        SchemaCompiler::new(self.options)
    }
}

/// Full name of a named root, otherwise `fallback` in the session namespace.
fn root_name(session: &SchemaSession, root: SchemaId, fallback: &str) -> String {
    match session.arena().view(root).non_null().named() {
        Some(name) => name.full_name(),
        None => session.type_name(escape_name(fallback)).full_name(),
    }
}
