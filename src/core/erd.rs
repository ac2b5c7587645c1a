use serde::{Deserialize, Serialize};

/// Field type of a custom field added from the editor.
///
/// Wire values match the Salesforce describe `type` strings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Reference,
    Number,
    Currency,
    Autonumber,
    Checkbox,
    Date,
    Datetime,
    Email,
    Geolocation,
    Percent,
    Phone,
    Time,
    Url,
    Formula,
    Picklist,
    Multipicklist,
}

impl FieldType {
    /// Every type offered in the "add field" select, in display order.
    pub const ALL: [FieldType; 17] = [
        FieldType::String,
        FieldType::Reference,
        FieldType::Number,
        FieldType::Currency,
        FieldType::Autonumber,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Email,
        FieldType::Geolocation,
        FieldType::Percent,
        FieldType::Phone,
        FieldType::Time,
        FieldType::Url,
        FieldType::Formula,
        FieldType::Picklist,
        FieldType::Multipicklist,
    ];

    /// Value stored in `Field::field_type` and sent over the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Reference => "reference",
            FieldType::Number => "number",
            FieldType::Currency => "currency",
            FieldType::Autonumber => "autonumber",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Email => "email",
            FieldType::Geolocation => "geolocation",
            FieldType::Percent => "percent",
            FieldType::Phone => "phone",
            FieldType::Time => "time",
            FieldType::Url => "url",
            FieldType::Formula => "formula",
            FieldType::Picklist => "picklist",
            FieldType::Multipicklist => "multipicklist",
        }
    }

    /// Label shown in the field type select
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "Text",
            FieldType::Reference => "Lookup",
            FieldType::Number => "Number",
            FieldType::Currency => "Currency",
            FieldType::Autonumber => "Auto Number",
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
            FieldType::Datetime => "Date/Time",
            FieldType::Email => "Email",
            FieldType::Geolocation => "Geolocation",
            FieldType::Percent => "Percent",
            FieldType::Phone => "Phone",
            FieldType::Time => "Time",
            FieldType::Url => "URL",
            FieldType::Formula => "Formula",
            FieldType::Picklist => "Picklist",
            FieldType::Multipicklist => "Picklist (Multi-Select)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Reference)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Salesforce describe type for lookup/master-detail fields
pub const REFERENCE_TYPE: &str = "reference";

/// A field of an object on the diagram
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Target objects, only populated for reference fields
    #[serde(rename = "referenceTo", default)]
    pub reference_to: Vec<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            reference_to: Vec::new(),
        }
    }

    pub fn reference(name: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            name: name.into(),
            field_type: REFERENCE_TYPE.to_string(),
            reference_to: targets,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.field_type == REFERENCE_TYPE
    }
}

/// An object (sObject or user-created) on the diagram
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErdObject {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(rename = "isCustom", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
}

impl ErdObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            is_custom: false,
        }
    }

    /// Object created by hand in the editor, not fetched from the org
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            is_custom: true,
            ..Self::new(name)
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

/// Edge between two objects, named after the reference field that created it.
///
/// Endpoints are object names; whether they exist on the diagram is not checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub field_name: String,
}

impl Relationship {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            field_name: field_name.into(),
        }
    }
}

/// Free-text note attached to the diagram
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
}

impl Annotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Complete diagram state. Replaced wholesale on every edit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErdState {
    #[serde(default)]
    pub objects: Vec<ErdObject>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl ErdState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty() && self.relationships.is_empty() && self.annotations.is_empty()
    }

    /// State after appending a user-created object.
    ///
    /// Returns `None` when the trimmed name is empty.
    pub fn with_custom_object(&self, name: &str) -> Option<ErdState> {
        if name.trim().is_empty() {
            return None;
        }

        let mut next = self.clone();
        next.objects.push(ErdObject::custom(name));
        Some(next)
    }

    /// State after adding a field to `object`.
    ///
    /// Reference fields point at `relation`; when `relation` is non-empty one
    /// relationship `object -> relation` is appended as well. Returns `None`
    /// when the field name or target object is empty.
    pub fn with_custom_field(
        &self,
        object: &str,
        name: &str,
        field_type: FieldType,
        relation: &str,
    ) -> Option<ErdState> {
        if name.trim().is_empty() || object.is_empty() {
            return None;
        }

        let field = if field_type.is_reference() {
            Field::reference(name, vec![relation.to_string()])
        } else {
            Field::new(name, field_type.as_str())
        };

        let mut next = self.clone();
        for obj in next.objects.iter_mut().filter(|o| o.name == object) {
            obj.fields.push(field.clone());
        }

        if field_type.is_reference() && !relation.is_empty() {
            next.relationships.push(Relationship::new(object, relation, name));
        }

        Some(next)
    }

    /// State after appending an annotation. `None` for blank text.
    pub fn with_annotation(&self, text: &str) -> Option<ErdState> {
        if text.trim().is_empty() {
            return None;
        }

        let mut next = self.clone();
        next.annotations.push(Annotation::new(text));
        Some(next)
    }

    /// Combine a freshly generated org diagram with locally created objects.
    ///
    /// Relationships come from the org only; annotations are the ones the
    /// client already holds.
    pub fn merge_generated(
        objects: Vec<ErdObject>,
        relationships: Vec<Relationship>,
        custom_objects: &[ErdObject],
        annotations: Vec<Annotation>,
    ) -> ErdState {
        let mut merged = objects;
        merged.extend(custom_objects.iter().cloned());
        ErdState {
            objects: merged,
            relationships,
            annotations,
        }
    }
}
