//! Statically declared GraphQL schema extensions.
//!
//! The host engine owns execution; this module only describes which object
//! types to add, which fields to graft onto existing content types, and how
//! each grafted field is resolved. Everything is checked once in
//! [`SchemaExtensionsBuilder::build`], so a bad reference fails at startup
//! rather than on the first query that touches it.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{LookupError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    List(Box<FieldType>),
    /// An object type declared in the same extension set.
    Reference(String),
}

impl FieldType {
    pub fn list_of(inner: FieldType) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    fn referenced_type(&self) -> Option<&str> {
        match self {
            Self::String => None,
            Self::List(inner) => inner.referenced_type(),
            Self::Reference(name) => Some(name),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("String"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Reference(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectTypeDef {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl ObjectTypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            field_type,
        });
        self
    }
}

/// A host content type, e.g. `Person` in application `com.example.myproject`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    application: String,
    name: String,
}

impl ContentType {
    pub fn new(application: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let application = application.into();
        let name = name.into();
        if application.trim().is_empty() || name.trim().is_empty() {
            return Err(LookupError::Schema {
                reason: format!(
                    "content type needs an application and a name, got '{application}:{name}'"
                ),
            });
        }
        if name.contains(['.', ':']) {
            return Err(LookupError::Schema {
                reason: format!("content type name '{name}' must not contain '.' or ':'"),
            });
        }
        Ok(Self { application, name })
    }

    /// Name of the generated type holding this content type's data,
    /// `com_example_myproject_Person_Data` for `com.example.myproject:Person`.
    pub fn data_type_name(&self) -> String {
        format!("{}_{}_Data", self.application.replace('.', "_"), self.name)
    }
}

/// Resolves one grafted field from the JSON of its parent node.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, source: &Value) -> Result<Value>;
}

#[derive(Clone)]
pub struct FieldExtension {
    pub type_name: String,
    pub field_name: String,
    pub field_type: FieldType,
    resolver: Arc<dyn FieldResolver>,
}

impl FieldExtension {
    pub fn new(
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        field_type: FieldType,
        resolver: Arc<dyn FieldResolver>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            field_name: field_name.into(),
            field_type,
            resolver,
        }
    }
}

impl fmt::Debug for FieldExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldExtension")
            .field("type_name", &self.type_name)
            .field("field_name", &self.field_name)
            .field("field_type", &self.field_type)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct SchemaExtensionsBuilder {
    types: Vec<ObjectTypeDef>,
    fields: Vec<FieldExtension>,
}

impl SchemaExtensionsBuilder {
    #[must_use]
    pub fn object_type(mut self, def: ObjectTypeDef) -> Self {
        self.types.push(def);
        self
    }

    #[must_use]
    pub fn field(mut self, extension: FieldExtension) -> Self {
        self.fields.push(extension);
        self
    }

    pub fn build(self) -> Result<SchemaExtensions> {
        let mut declared = HashSet::new();
        for def in &self.types {
            if def.name.is_empty() {
                return Err(schema_error("object type with an empty name"));
            }
            if !declared.insert(def.name.as_str()) {
                return Err(schema_error(format!("object type '{}' declared twice", def.name)));
            }
            if def.fields.is_empty() {
                return Err(schema_error(format!("object type '{}' has no fields", def.name)));
            }
            let mut names = HashSet::new();
            for field in &def.fields {
                if field.name.is_empty() || !names.insert(field.name.as_str()) {
                    return Err(schema_error(format!(
                        "object type '{}' has an empty or duplicate field '{}'",
                        def.name, field.name
                    )));
                }
            }
        }

        let check_reference = |owner: &str, field: &str, field_type: &FieldType| match field_type
            .referenced_type()
        {
            Some(target) if !declared.contains(target) => Err(schema_error(format!(
                "{owner}.{field} references undeclared type '{target}'"
            ))),
            _ => Ok(()),
        };

        for def in &self.types {
            for field in &def.fields {
                check_reference(&def.name, &field.name, &field.field_type)?;
            }
        }

        let mut index = HashMap::new();
        for (position, ext) in self.fields.iter().enumerate() {
            if ext.type_name.is_empty() || ext.field_name.is_empty() {
                return Err(schema_error("field extension with an empty type or field name"));
            }
            check_reference(&ext.type_name, &ext.field_name, &ext.field_type)?;
            let key = (ext.type_name.clone(), ext.field_name.clone());
            if index.insert(key, position).is_some() {
                return Err(schema_error(format!(
                    "field '{}.{}' registered twice",
                    ext.type_name, ext.field_name
                )));
            }
        }

        Ok(SchemaExtensions {
            types: self.types,
            fields: self.fields,
            index,
        })
    }
}

fn schema_error(reason: impl Into<String>) -> LookupError {
    LookupError::Schema {
        reason: reason.into(),
    }
}

/// A validated set of extra types and grafted fields.
pub struct SchemaExtensions {
    types: Vec<ObjectTypeDef>,
    fields: Vec<FieldExtension>,
    index: HashMap<(String, String), usize>,
}

impl fmt::Debug for SchemaExtensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaExtensions")
            .field("types", &self.types)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl SchemaExtensions {
    pub fn builder() -> SchemaExtensionsBuilder {
        SchemaExtensionsBuilder::default()
    }

    pub fn types(&self) -> &[ObjectTypeDef] {
        &self.types
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldExtension> {
        self.index
            .get(&(type_name.to_string(), field_name.to_string()))
            .map(|&i| &self.fields[i])
    }

    pub async fn resolve(
        &self,
        type_name: &str,
        field_name: &str,
        source: &Value,
    ) -> Result<Value> {
        let ext = self.field(type_name, field_name).ok_or_else(|| {
            schema_error(format!("no resolver registered for '{type_name}.{field_name}'"))
        })?;
        ext.resolver.resolve(source).await
    }

    /// SDL for the host engine: new object types, then one `extend type`
    /// block per extended type in registration order.
    pub fn to_sdl(&self) -> String {
        let mut sdl = String::new();
        for def in &self.types {
            if let Some(description) = &def.description {
                sdl.push_str(&format!("\"\"\"{description}\"\"\"\n"));
            }
            sdl.push_str(&format!("type {} {{\n", def.name));
            for field in &def.fields {
                sdl.push_str(&format!("  {}: {}\n", field.name, field.field_type));
            }
            sdl.push_str("}\n\n");
        }

        let mut extended: Vec<&str> = Vec::new();
        for ext in &self.fields {
            if !extended.contains(&ext.type_name.as_str()) {
                extended.push(&ext.type_name);
            }
        }
        for type_name in extended {
            sdl.push_str(&format!("extend type {type_name} {{\n"));
            for ext in self.fields.iter().filter(|e| e.type_name == type_name) {
                sdl.push_str(&format!("  {}: {}\n", ext.field_name, ext.field_type));
            }
            sdl.push_str("}\n\n");
        }

        sdl.truncate(sdl.trim_end().len());
        sdl.push('\n');
        sdl
    }
}
