//! Dataset schemas
//!
//! A `DatasetSchema` is the fixed, ordered column contract for one dataset
//! (housing, hotels, activities). The column names and their order are the
//! only bit-exact persistence contract: exports write them verbatim and
//! imports are validated against them before any record is accepted.

/// Semantic type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Free text, may be empty
    Text,
    /// Floating point number, may be unset
    Number,
    /// Boolean, defaults to false
    Bool,
}

/// Specification of a single field in a dataset schema
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Column name as persisted in the CSV header
    pub name: String,

    pub field_type: FieldType,

    /// Required fields must be non-empty (text) or parseable (number)
    /// when a record is added through the form
    pub required: bool,

    /// Unit suffix appended in hover text and metrics, e.g. " km"
    pub unit: &'static str,

    /// Field feeds the generated map-link derivation
    pub is_address: bool,

    /// Field holds a URL and is rendered as a hyperlink
    pub is_link: bool,
}

impl FieldSpec {
    pub fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Text,
            required: false,
            unit: "",
            is_address: false,
            is_link: false,
        }
    }

    pub fn number(name: &str, unit: &'static str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Number,
            required: false,
            unit,
            is_address: false,
            is_link: false,
        }
    }

    pub fn boolean(name: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: FieldType::Bool,
            required: false,
            unit: "",
            is_address: false,
            is_link: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn address(mut self) -> Self {
        self.is_address = true;
        self
    }

    pub fn link(mut self) -> Self {
        self.is_link = true;
        self
    }
}

/// A derived per-record quotient of two numeric fields, e.g. rent per
/// square meter. Shown in hover text and as a mean metric, never stored.
#[derive(Debug, Clone)]
pub struct RatioSpec {
    /// Display label, e.g. "Rent/Size"
    pub label: String,
    pub numerator: String,
    pub denominator: String,
    pub unit: &'static str,
}

impl RatioSpec {
    pub fn new(label: &str, numerator: &str, denominator: &str, unit: &'static str) -> Self {
        Self {
            label: label.to_string(),
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
            unit,
        }
    }
}

/// Fixed, ordered column contract for one dataset
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    /// Display title, e.g. "Housing Options"
    pub title: String,

    /// Ordered field specs; this order is the CSV column order
    pub fields: Vec<FieldSpec>,

    /// Optional derived quotient metric
    pub ratio: Option<RatioSpec>,
}

impl DatasetSchema {
    pub fn new(title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            title: title.to_string(),
            fields,
            ratio: None,
        }
    }

    pub fn with_ratio(mut self, ratio: RatioSpec) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Column names in persistence order
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Names of fields that must be present on add
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Index of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The address field, if this schema has one
    pub fn address_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.is_address)
    }

    /// Numeric fields, offered for the X and Y axes and for marker size
    pub fn numeric_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.field_type == FieldType::Number)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Fields offered for the color encoding: numeric and boolean
    pub fn color_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| matches!(f.field_type, FieldType::Number | FieldType::Bool))
            .map(|f| f.name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DatasetSchema {
        DatasetSchema::new(
            "Sample",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::number("Rent", " €").required(),
                FieldSpec::boolean("Furnished"),
                FieldSpec::text("Address").address(),
            ],
        )
    }

    #[test]
    fn test_column_order_is_field_order() {
        let schema = sample();
        assert_eq!(
            schema.column_names(),
            vec!["Name", "Rent", "Furnished", "Address"]
        );
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(sample().required_fields(), vec!["Name", "Rent"]);
    }

    #[test]
    fn test_encoding_options() {
        let schema = sample();
        assert_eq!(schema.numeric_fields(), vec!["Rent"]);
        assert_eq!(schema.color_fields(), vec!["Rent", "Furnished"]);
    }

    #[test]
    fn test_ratio_is_opt_in() {
        assert!(sample().ratio.is_none());
        let schema = sample().with_ratio(RatioSpec::new("Rent/Size", "Rent", "Size", " €/m²"));
        let ratio = schema.ratio.as_ref().unwrap();
        assert_eq!(ratio.numerator, "Rent");
        assert_eq!(ratio.denominator, "Size");
    }
}
