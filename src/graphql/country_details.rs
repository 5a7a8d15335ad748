use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::service::LookupService;

use super::schema::{
    ContentType, FieldExtension, FieldResolver, FieldType, ObjectTypeDef, SchemaExtensions,
};

pub const COUNTRY_DETAILS_TYPE: &str = "CountryDetails";
pub const COUNTRY_DETAILS_FIELD: &str = "countryDetails";

/// Resolves `countryDetails` from the parent node's `country` property.
/// A missing, non-string or blank country resolves to `null`.
pub struct CountryDetailsResolver {
    lookup: Arc<LookupService>,
}

impl CountryDetailsResolver {
    pub fn new(lookup: Arc<LookupService>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl FieldResolver for CountryDetailsResolver {
    async fn resolve(&self, source: &Value) -> Result<Value> {
        let country = source
            .get("country")
            .and_then(Value::as_str)
            .unwrap_or_default();

        match self.lookup.country_details(country).await? {
            Some(details) => Ok(serde_json::to_value(details)?),
            None => Ok(Value::Null),
        }
    }
}

/// The `CountryDetails` type plus the `countryDetails` field on the given
/// content type's data type.
pub fn country_details_extensions(
    content_type: &ContentType,
    lookup: Arc<LookupService>,
) -> Result<SchemaExtensions> {
    SchemaExtensions::builder()
        .object_type(
            ObjectTypeDef::new(COUNTRY_DETAILS_TYPE)
                .description(COUNTRY_DETAILS_TYPE)
                .field("country", FieldType::String)
                .field("cities", FieldType::list_of(FieldType::String)),
        )
        .field(FieldExtension::new(
            content_type.data_type_name(),
            COUNTRY_DETAILS_FIELD,
            FieldType::reference(COUNTRY_DETAILS_TYPE),
            Arc::new(CountryDetailsResolver::new(lookup)),
        ))
        .build()
}
