//! Salesforce org access
//!
//! This module provides:
//! - SOAP `login` (username + password + security token)
//! - REST describe calls for the object list and per-object fields
//! - Turning describe results into diagram objects and relationships

mod client;
mod error;
pub mod soap;

use std::future::Future;

use rand::Rng;
use rand::seq::SliceRandom;

pub use client::HttpSalesforce;
pub use error::SalesforceError;

use crate::core::erd::{ErdObject, Field, Relationship};

/// Credentials for REST calls against one org
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SalesforceSession {
    /// `https://{instance host}`
    pub instance_url: String,
    pub session_id: String,
}

/// Operations the backend needs from a Salesforce org
pub trait SalesforceApi: Clone + Send + Sync + 'static {
    /// Authenticate and open a session
    fn login(
        &self,
        instance_url: &str,
        username: &str,
        password: &str,
        security_token: &str,
    ) -> impl Future<Output = Result<SalesforceSession, SalesforceError>> + Send;

    /// Names of every sObject visible to the user
    fn list_objects(
        &self,
        session: &SalesforceSession,
    ) -> impl Future<Output = Result<Vec<String>, SalesforceError>> + Send;

    /// Field metadata of one sObject
    fn describe_fields(
        &self,
        session: &SalesforceSession,
        object: &str,
    ) -> impl Future<Output = Result<Vec<Field>, SalesforceError>> + Send;
}

/// Reduce one object's fields to what goes on the diagram.
///
/// Every reference field is kept; up to `field_limit` of the remaining
/// fields are picked at random. Each (reference field, target) pair becomes
/// one relationship.
pub fn diagram_object<R: Rng + ?Sized>(
    name: &str,
    fields: Vec<Field>,
    field_limit: usize,
    rng: &mut R,
) -> (ErdObject, Vec<Relationship>) {
    let (references, others): (Vec<Field>, Vec<Field>) =
        fields.into_iter().partition(Field::is_reference);

    let relationships = references
        .iter()
        .flat_map(|field| {
            field
                .reference_to
                .iter()
                .map(move |target| Relationship::new(name, target.clone(), field.name.clone()))
        })
        .collect();

    let amount = others.len().min(field_limit);
    let sampled = others.choose_multiple(rng, amount).cloned();

    let mut object = ErdObject::new(name);
    object.fields = references.into_iter().chain(sampled).collect();

    (object, relationships)
}

/// Describe every requested object, in request order
pub async fn generate_diagram<S, R>(
    api: &S,
    session: &SalesforceSession,
    objects: &[String],
    field_limit: usize,
    rng: &mut R,
) -> Result<(Vec<ErdObject>, Vec<Relationship>), SalesforceError>
where
    S: SalesforceApi,
    R: Rng + ?Sized,
{
    let mut diagram_objects = Vec::with_capacity(objects.len());
    let mut relationships = Vec::new();

    for name in objects {
        let fields = api.describe_fields(session, name).await?;
        tracing::debug!("Described {}: {} fields", name, fields.len());

        let (object, rels) = diagram_object(name, fields, field_limit, rng);
        diagram_objects.push(object);
        relationships.extend(rels);
    }

    Ok((diagram_objects, relationships))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn account_fields() -> Vec<Field> {
        vec![
            Field::new("Id", "id"),
            Field::new("Name", "string"),
            Field::reference("OwnerId", vec!["User".into()]),
            Field::new("Phone", "phone"),
            Field::new("Industry", "picklist"),
            Field::reference("ParentId", vec!["Account".into()]),
            Field::new("AnnualRevenue", "currency"),
        ]
    }

    #[test]
    fn test_all_fields_kept_under_limit() {
        let mut rng = StdRng::seed_from_u64(7);
        let (object, relationships) = diagram_object("Account", account_fields(), 999, &mut rng);

        assert_eq!(object.name, "Account");
        assert!(!object.is_custom);
        assert_eq!(object.fields.len(), 7);
        assert_eq!(relationships.len(), 2);
    }

    #[test]
    fn test_references_first_then_sample_within_limit() {
        let mut rng = StdRng::seed_from_u64(42);
        let (object, _) = diagram_object("Account", account_fields(), 2, &mut rng);

        assert_eq!(object.fields.len(), 4);
        assert_eq!(object.fields[0].name, "OwnerId");
        assert_eq!(object.fields[1].name, "ParentId");
        assert!(object.fields[2..].iter().all(|f| !f.is_reference()));
        assert_ne!(object.fields[2].name, object.fields[3].name);
    }

    #[test]
    fn test_zero_limit_keeps_only_references() {
        let mut rng = StdRng::seed_from_u64(1);
        let (object, _) = diagram_object("Account", account_fields(), 0, &mut rng);
        assert!(object.fields.iter().all(Field::is_reference));
    }

    #[test]
    fn test_polymorphic_reference_yields_one_relationship_per_target() {
        let mut rng = StdRng::seed_from_u64(1);
        let fields = vec![Field::reference(
            "WhoId",
            vec!["Contact".into(), "Lead".into()],
        )];
        let (_, relationships) = diagram_object("Task", fields, 5, &mut rng);

        assert_eq!(
            relationships,
            vec![
                Relationship::new("Task", "Contact", "WhoId"),
                Relationship::new("Task", "Lead", "WhoId"),
            ]
        );
    }
}
