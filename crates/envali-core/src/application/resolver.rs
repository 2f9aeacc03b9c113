//! Per-field content lookup.
//!
//! A field's content row is fetched at most once per validation pass, on the
//! first directive that needs it, and shared by the field's later directives.

use tracing::{debug, warn};

use crate::application::ApplicationError;
use crate::application::ports::{ContentAttribute, ContentLoader, ContentQuery, ContentRow, ResourceId};
use crate::domain::EntityType;
use crate::error::EnvaliResult;

pub struct ParameterResolver<'a> {
    loader: &'a dyn ContentLoader,
    entity: EntityType,
    mapping: Option<&'a str>,
    field: &'a str,
    row: Option<ContentRow>,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(
        loader: &'a dyn ContentLoader,
        entity: EntityType,
        mapping: Option<&'a str>,
        field: &'a str,
    ) -> Self {
        Self {
            loader,
            entity,
            mapping,
            field,
            row: None,
        }
    }

    /// `true` when the entity takes its parameters from content.
    pub fn has_mapping(&self) -> bool {
        self.mapping.is_some()
    }

    /// Value of `attribute` in this field's content row.
    ///
    /// Only call this when [`Self::has_mapping`] is `true`.
    pub fn content(&mut self, attribute: ContentAttribute) -> EnvaliResult<&str> {
        let field = self.field;
        let resource = match self.mapping {
            Some(mapping) => ResourceId::for_mapping(mapping),
            None => {
                return Err(ApplicationError::ContentNotFound {
                    resource: format!("<no content mapping on {}>", self.entity),
                }
                .into());
            }
        };

        if self.row.is_none() {
            self.row = Some(self.fetch(&resource)?);
        }

        self.row
            .as_ref()
            .and_then(|row| row.attribute(attribute))
            .ok_or_else(|| {
                ApplicationError::ContentAttributeMissing {
                    resource: resource.to_string(),
                    field: field.to_owned(),
                    attribute: attribute.key(),
                }
                .into()
            })
    }

    fn fetch(&self, resource: &ResourceId) -> EnvaliResult<ContentRow> {
        let query = ContentQuery::for_field(resource.clone(), self.field);
        let mut rows = self.loader.load(&query)?.into_iter();

        let Some(row) = rows.next() else {
            return Err(ApplicationError::ContentRowMissing {
                resource: resource.to_string(),
                field: self.field.to_owned(),
            }
            .into());
        };

        let extra = rows.count();
        if extra > 0 {
            warn!(
                resource = %resource,
                field = self.field,
                extra,
                "Several content rows match; using the first"
            );
        }
        debug!(resource = %resource, field = self.field, "Content row loaded");
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockContentLoader;
    use crate::error::EnvaliError;

    struct Order;

    fn row() -> ContentRow {
        ContentRow::new()
            .with("variableName", "quantity")
            .with("rangeFrom", "1")
            .with("rangeTo", "99")
    }

    #[test]
    fn row_is_loaded_once_per_field() {
        let mut loader = MockContentLoader::new();
        loader
            .expect_load()
            .withf(|query| {
                query.resource().as_str() == "content/envali/order.json"
                    && query.conditions()[0].1 == "quantity"
            })
            .times(1)
            .returning(|_| Ok(vec![row()]));

        let mut resolver =
            ParameterResolver::new(&loader, EntityType::of::<Order>(), Some("order"), "quantity");
        assert_eq!(resolver.content(ContentAttribute::RangeFrom).unwrap(), "1");
        assert_eq!(resolver.content(ContentAttribute::RangeTo).unwrap(), "99");
    }

    #[test]
    fn missing_row_is_an_error() {
        let mut loader = MockContentLoader::new();
        loader.expect_load().returning(|_| Ok(Vec::new()));

        let mut resolver =
            ParameterResolver::new(&loader, EntityType::of::<Order>(), Some("order"), "quantity");
        let err = resolver.content(ContentAttribute::RangeFrom).unwrap_err();
        assert!(matches!(
            err,
            EnvaliError::Application(ApplicationError::ContentRowMissing { .. })
        ));
    }

    #[test]
    fn missing_attribute_is_an_error() {
        let mut loader = MockContentLoader::new();
        loader.expect_load().returning(|_| Ok(vec![row()]));

        let mut resolver =
            ParameterResolver::new(&loader, EntityType::of::<Order>(), Some("order"), "quantity");
        let err = resolver.content(ContentAttribute::Regex).unwrap_err();
        assert_eq!(
            err,
            EnvaliError::Application(ApplicationError::ContentAttributeMissing {
                resource: "content/envali/order.json".into(),
                field: "quantity".into(),
                attribute: "regex",
            })
        );
    }

    #[test]
    fn first_of_several_rows_wins() {
        let mut loader = MockContentLoader::new();
        loader.expect_load().returning(|_| {
            Ok(vec![
                row(),
                ContentRow::new()
                    .with("variableName", "quantity")
                    .with("rangeFrom", "50"),
            ])
        });

        let mut resolver =
            ParameterResolver::new(&loader, EntityType::of::<Order>(), Some("order"), "quantity");
        assert_eq!(resolver.content(ContentAttribute::RangeFrom).unwrap(), "1");
    }

    #[test]
    fn loader_errors_propagate() {
        let mut loader = MockContentLoader::new();
        loader.expect_load().returning(|query| {
            Err(ApplicationError::ContentNotFound {
                resource: query.resource().to_string(),
            }
            .into())
        });

        let mut resolver =
            ParameterResolver::new(&loader, EntityType::of::<Order>(), Some("order"), "quantity");
        assert!(resolver.content(ContentAttribute::RangeTo).is_err());
    }
}
