//! Built-in dataset configurations
//!
//! Which fields a dataset carries, which are required on add, and which
//! are offered as encodings is configuration, not core algorithm. The
//! three datasets here cover the relocation use case: housing listings,
//! hotels for the transition period, and recurring activities.

use crate::schema::{DatasetSchema, FieldSpec, RatioSpec};

/// Housing listings: the most complete variant, with address-derived
/// map links, a price-per-area metric and full CRUD.
pub fn housing() -> DatasetSchema {
    DatasetSchema::new(
        "Housing Options",
        vec![
            FieldSpec::text("Name").required(),
            FieldSpec::text("Link").link(),
            FieldSpec::text("Address").address(),
            FieldSpec::number("Rent", " €").required(),
            FieldSpec::number("Distance", " km").required(),
            FieldSpec::number("Rooms", "").required(),
            FieldSpec::number("Size", " m²").required(),
            FieldSpec::boolean("Kitchen"),
            FieldSpec::boolean("Furnished"),
            FieldSpec::text("Rental Period"),
            FieldSpec::boolean("Parking"),
            FieldSpec::text("Custom"),
        ],
    )
    .with_ratio(RatioSpec::new("Rent/Size", "Rent", "Size", " €/m²"))
}

/// Hotels for the weeks before a permanent place is found.
pub fn hotels() -> DatasetSchema {
    DatasetSchema::new(
        "Hotels",
        vec![
            FieldSpec::text("Name").required(),
            FieldSpec::text("Link").link(),
            FieldSpec::text("Address").address(),
            FieldSpec::number("Price per Night", " €").required(),
            FieldSpec::number("Distance", " km").required(),
            FieldSpec::number("Rating", ""),
            FieldSpec::boolean("Breakfast"),
            FieldSpec::number("Wifi Speed", " Mbit/s"),
            FieldSpec::boolean("Parking"),
            FieldSpec::text("Period"),
            FieldSpec::text("Custom"),
        ],
    )
}

/// Sports clubs, courses and other recurring activities.
pub fn activities() -> DatasetSchema {
    DatasetSchema::new(
        "Activities",
        vec![
            FieldSpec::text("Name").required(),
            FieldSpec::text("Link").link(),
            FieldSpec::text("Address").address(),
            FieldSpec::number("Price per Month", " €").required(),
            FieldSpec::number("Distance", " km").required(),
            FieldSpec::number("Duration per Week", " h"),
            FieldSpec::number("Group Size", ""),
            FieldSpec::boolean("Trainer"),
            FieldSpec::boolean("Equipment Provided"),
            FieldSpec::boolean("Food & Drinks"),
            FieldSpec::text("Period"),
            FieldSpec::text("Custom"),
        ],
    )
}

/// All built-in datasets in page order
pub fn all() -> Vec<DatasetSchema> {
    vec![housing(), hotels(), activities()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dataset_has_required_name() {
        for schema in all() {
            assert!(schema.required_fields().contains(&"Name"), "{}", schema.title);
        }
    }

    #[test]
    fn test_every_dataset_has_an_address_field() {
        for schema in all() {
            assert!(schema.address_field().is_some(), "{}", schema.title);
        }
    }

    #[test]
    fn test_housing_ratio_fields_exist_in_schema() {
        let schema = housing();
        let ratio = schema.ratio.as_ref().unwrap();
        assert!(schema.index_of(&ratio.numerator).is_some());
        assert!(schema.index_of(&ratio.denominator).is_some());
    }

    #[test]
    fn test_encoding_options_are_nonempty() {
        for schema in all() {
            assert!(schema.numeric_fields().len() >= 2, "{}", schema.title);
            assert!(!schema.color_fields().is_empty(), "{}", schema.title);
        }
    }
}
