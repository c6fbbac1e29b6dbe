//! Lowering of raw filters onto the schema.
//!
//! A raw [`Filter`] carries attribute descriptions as uninterpreted
//! text; core processing wants them parsed against the schema.
//! Lowering produces the schema-validated
//! [`SearchFilter`](ds_schema::SearchFilter), simplifying AND and OR
//! filters with a single subordinate to that subordinate.

use ds_schema::{AttributeDescription, Schema, SearchFilter};

use crate::error::{FilterError, FilterResult};
use crate::filter::Filter;

impl Filter {
    /// Converts this raw filter into a schema-validated search filter.
    ///
    /// AND and OR filters with exactly one subordinate are replaced by
    /// that subordinate's lowering.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidAttributeDescription`] when an
    /// attribute description does not parse, and
    /// [`FilterError::UnknownMatchingRule`] (mapping onto the
    /// inappropriateMatching result code) when an extensible match
    /// without an attribute description names a matching rule the
    /// schema does not know.
    pub fn to_search_filter(&self, schema: &Schema) -> FilterResult<SearchFilter> {
        match self {
            Self::And(components) => {
                if let [component] = components.as_slice() {
                    return component.to_search_filter(schema);
                }
                Ok(SearchFilter::And(lower_components(components, schema)?))
            }
            Self::Or(components) => {
                if let [component] = components.as_slice() {
                    return component.to_search_filter(schema);
                }
                Ok(SearchFilter::Or(lower_components(components, schema)?))
            }
            Self::Not(component) => Ok(SearchFilter::Not(Box::new(
                component.to_search_filter(schema)?,
            ))),
            Self::Equality { attribute, value } => Ok(SearchFilter::Equality {
                attribute: AttributeDescription::parse(attribute)?,
                value: value.clone(),
            }),
            Self::GreaterOrEqual { attribute, value } => Ok(SearchFilter::GreaterOrEqual {
                attribute: AttributeDescription::parse(attribute)?,
                value: value.clone(),
            }),
            Self::LessOrEqual { attribute, value } => Ok(SearchFilter::LessOrEqual {
                attribute: AttributeDescription::parse(attribute)?,
                value: value.clone(),
            }),
            Self::ApproximateMatch { attribute, value } => Ok(SearchFilter::ApproximateMatch {
                attribute: AttributeDescription::parse(attribute)?,
                value: value.clone(),
            }),
            Self::Substring {
                attribute,
                sub_initial,
                sub_any,
                sub_final,
            } => Ok(SearchFilter::Substring {
                attribute: AttributeDescription::parse(attribute)?,
                sub_initial: sub_initial.clone(),
                sub_any: sub_any.clone(),
                sub_final: sub_final.clone(),
            }),
            Self::Present { attribute } => Ok(SearchFilter::Present {
                attribute: AttributeDescription::parse(attribute)?,
            }),
            Self::ExtensibleMatch {
                attribute,
                matching_rule_id,
                dn_attributes,
                value,
            } => {
                let attribute = attribute
                    .as_deref()
                    .map(AttributeDescription::parse)
                    .transpose()?;

                // An assertion value with no attribute description
                // must name a matching rule known to the schema. With
                // an attribute present the identifier passes through
                // unresolved.
                if attribute.is_none() {
                    match matching_rule_id {
                        None => return Err(FilterError::ValueWithNoAttributeOrMatchingRule),
                        Some(id) => {
                            schema.matching_rule(id)?;
                        }
                    }
                }

                Ok(SearchFilter::ExtensibleMatch {
                    attribute,
                    matching_rule_id: matching_rule_id.clone(),
                    dn_attributes: *dn_attributes,
                    value: value.clone(),
                })
            }
        }
    }
}

fn lower_components(components: &[Filter], schema: &Schema) -> FilterResult<Vec<SearchFilter>> {
    components
        .iter()
        .map(|component| component.to_search_filter(schema))
        .collect()
}
