use crate::graph::{TypeDefinitionId, TypeDefinitionRef};
use crate::ids::StringId;
use crate::Schema;

use super::{BuildError, GraphBuilder};

impl GraphBuilder {
    pub(super) fn finalize(mut self) -> Result<Schema, BuildError> {
        self.resolve_named_references()?;

        // Every reserved slot must have been filled back. A slot left in
        // progress means the transformation returned early without its error
        // propagating, which cannot happen; treat it as fatal.
        assert!(
            self.scalars.all_done()
                && self.enums.all_done()
                && self.objects.all_done()
                && self.interfaces.all_done()
                && self.unions.all_done()
                && self.input_objects.all_done()
                && self.directives.all_done(),
            "schema transformation left a definition half-built",
        );

        let mut graph = self.graph;
        graph.strings = self.strings.into();

        let mut definitions: Vec<TypeDefinitionId> = Vec::with_capacity(
            graph.scalar_definitions.len()
                + graph.object_definitions.len()
                + graph.interface_definitions.len()
                + graph.union_definitions.len()
                + graph.enum_definitions.len()
                + graph.input_object_definitions.len(),
        );
        definitions.extend((0..graph.scalar_definitions.len()).map(|i| {
            TypeDefinitionId::Scalar(i.into())
        }));
        definitions.extend((0..graph.object_definitions.len()).map(|i| {
            TypeDefinitionId::Object(i.into())
        }));
        definitions.extend((0..graph.interface_definitions.len()).map(|i| {
            TypeDefinitionId::Interface(i.into())
        }));
        definitions.extend((0..graph.union_definitions.len()).map(|i| {
            TypeDefinitionId::Union(i.into())
        }));
        definitions.extend((0..graph.enum_definitions.len()).map(|i| {
            TypeDefinitionId::Enum(i.into())
        }));
        definitions.extend((0..graph.input_object_definitions.len()).map(|i| {
            TypeDefinitionId::InputObject(i.into())
        }));
        definitions.sort_unstable_by(|a, b| graph.definition_name(*a).cmp(graph.definition_name(*b)));
        graph.definitions = definitions;

        tracing::debug!(
            definitions = graph.definitions.len(),
            fields = graph.field_definitions.len(),
            resolvers = self.registry.len(),
            "schema built"
        );

        Ok(Schema {
            graph,
            registry: self.registry,
            snapshot: self.snapshot,
        })
    }

    /// Rewrites by-name forward references to ids, now that every definition
    /// is registered. A name used in output position must resolve to an
    /// output-capable definition, and symmetrically for inputs.
    fn resolve_named_references(&mut self) -> Result<(), BuildError> {
        for index in 0..self.graph.field_definitions.len() {
            if let TypeDefinitionRef::Named(name_id) = self.graph.field_definitions[index]
                .ty_record
                .definition
            {
                let id = self.lookup_definition(name_id)?;
                if !id.is_output() {
                    return Err(BuildError::ExpectedOutputType {
                        name: self.definition_name(name_id),
                    });
                }
                self.graph.field_definitions[index].ty_record.definition =
                    TypeDefinitionRef::Id(id);
            }
        }
        for index in 0..self.graph.input_value_definitions.len() {
            if let TypeDefinitionRef::Named(name_id) = self.graph.input_value_definitions[index]
                .ty_record
                .definition
            {
                let id = self.lookup_definition(name_id)?;
                if !id.is_input() {
                    return Err(BuildError::ExpectedInputType {
                        name: self.definition_name(name_id),
                    });
                }
                self.graph.input_value_definitions[index].ty_record.definition =
                    TypeDefinitionRef::Id(id);
            }
        }
        Ok(())
    }

    fn lookup_definition(&self, name_id: StringId) -> Result<TypeDefinitionId, BuildError> {
        self.definitions_by_name
            .get(&name_id)
            .copied()
            .ok_or_else(|| BuildError::UnresolvedTypeReference {
                name: self.definition_name(name_id),
            })
    }

    fn definition_name(&self, name_id: StringId) -> String {
        self.strings
            .get_by_id(name_id)
            .cloned()
            .unwrap_or_default()
    }
}
