//! Entity Service - field wiring for the interactive entity flow.
//!
//! Each enum-typed field declares its enum in the same step. The caller owns
//! the [`EnumRegistry`] for the run and passes it to every call.

use tracing::{debug, info, instrument};

use crate::{
    application::dto::{EnumParams, FieldParams},
    domain::{DomainError, Entity, EnumRegistry, Enumeration, Field, JdlObject},
    error::JdlResult,
};

/// Adds fields and enum-typed fields to entities.
#[derive(Debug, Default)]
pub struct EntityService;

impl EntityService {
    pub fn new() -> Self {
        Self
    }

    /// Add a field to `entity`, replacing any field with the same name.
    #[instrument(skip_all, fields(entity = entity.name(), field = %params.name))]
    pub fn add_field(&self, entity: &mut Entity, params: FieldParams) -> JdlResult<()> {
        let field = Field::try_from(params)?;
        entity.add_field(field)?;
        debug!("Field added");
        Ok(())
    }

    /// Declare `enum_params` and add a field of that enum type to `entity_name`.
    ///
    /// Nothing is changed unless every step succeeds: the enum name must be new
    /// to `registry`, the enum must be valid, and the entity must exist.
    #[instrument(skip_all, fields(entity = entity_name, enumeration = %enum_params.name))]
    pub fn add_enum_field(
        &self,
        jdl: &mut JdlObject,
        entity_name: &str,
        mut field_params: FieldParams,
        enum_params: EnumParams,
        registry: &mut EnumRegistry,
    ) -> JdlResult<()> {
        if registry.has_enum(&enum_params.name) {
            return Err(DomainError::EnumAlreadyDefined {
                name: enum_params.name,
            }
            .into());
        }

        let enumeration = Enumeration::try_from(enum_params)?;
        if !enumeration.is_valid() {
            return Err(DomainError::invalid("enum", enumeration.issues()).into());
        }

        field_params.field_type = enumeration.name().to_string();
        let field = Field::try_from(field_params)?;

        let entity = jdl
            .entity_mut(entity_name)
            .ok_or_else(|| DomainError::UnknownValue {
                kind: "entity",
                value: entity_name.to_string(),
            })?;
        entity.add_field(field)?;

        let name = enumeration.name().to_string();
        jdl.add_enum(enumeration)?;
        registry.register_enum(name);
        info!(enums = registry.len(), "Enum field added");
        Ok(())
    }
}
