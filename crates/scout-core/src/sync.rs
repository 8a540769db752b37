//! Sync engine: rebuilds both visual projections from the record store
//!
//! `sync` is the only path by which the plot and the list update. It is
//! always a total rebuild, never an incremental patch, so the two
//! projections cannot drift apart from each other or from the store.
//! O(n) per mutation is fine at personal-dataset scale.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::derive::{color_values, hover_text, maps_place_url, marker_sizes};
use crate::record::{FieldValue, Record, RecordId};
use crate::schema::DatasetSchema;
use crate::session::Texts;
use crate::store::RecordStore;

/// Which fields drive the scatter plot axes, color and marker size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    pub x: String,
    pub y: String,
    pub color: String,
    pub size: String,
}

impl Encoding {
    /// Sensible defaults for a schema: first two numeric fields as axes,
    /// first color-capable field as color, last numeric field as size
    pub fn default_for(schema: &DatasetSchema) -> Self {
        let numeric = schema.numeric_fields();
        let color = schema.color_fields();
        let first = numeric.first().copied().unwrap_or("").to_string();
        Self {
            x: first.clone(),
            y: numeric.get(1).copied().map(str::to_string).unwrap_or(first),
            color: color.first().copied().unwrap_or("").to_string(),
            size: numeric.last().copied().unwrap_or("").to_string(),
        }
    }
}

/// Parallel arrays feeding the scatter plot, all of record-set length
/// and in record-set order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotProjection {
    /// `None` marks a missing value; the view skips drawing the marker
    pub xs: Vec<Option<f64>>,
    pub ys: Vec<Option<f64>>,
    pub hover: Vec<String>,
    pub sizes: Vec<f64>,
    pub colors: Vec<f64>,
    /// Per-point identifier: the record id, for click routing
    pub ids: Vec<RecordId>,
}

impl PlotProjection {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Observed color range, for normalizing the color scale
    pub fn color_range(&self) -> Option<(f64, f64)> {
        let min = self.colors.iter().copied().reduce(f64::min)?;
        let max = self.colors.iter().copied().reduce(f64::max)?;
        Some((min, max))
    }
}

/// One display row of the list view, annotated with derived fields
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub id: RecordId,
    /// Typed values in schema order
    pub values: Vec<FieldValue>,
    /// Generated map link derived from the address field; empty when
    /// there is no usable address
    pub maps_url: String,
}

/// Ordered record sequence shaped for the table view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListProjection {
    pub rows: Vec<ListRow>,
}

/// Both projections, rebuilt together so they always agree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projections {
    pub plot: PlotProjection,
    pub list: ListProjection,
}

/// Rebuild both projections from the store.
///
/// Call exactly once after every mutation. Idempotent: with no
/// intervening mutation a second call produces identical projections.
///
/// Records in `hidden` are left out of the plot projection only; the
/// list always shows the full record set. Size and color scales are
/// normalized over the shown records, matching what is on screen.
pub fn sync(
    store: &RecordStore,
    encoding: &Encoding,
    hidden: &BTreeSet<RecordId>,
    texts: &Texts,
) -> Projections {
    let schema = store.schema();
    let records = store.all();
    let shown: Vec<Record> = records
        .iter()
        .filter(|r| !hidden.contains(&r.id))
        .cloned()
        .collect();

    let plot = PlotProjection {
        xs: shown.iter().map(|r| r.number(schema, &encoding.x)).collect(),
        ys: shown.iter().map(|r| r.number(schema, &encoding.y)).collect(),
        hover: shown
            .iter()
            .map(|r| hover_text(schema, r, texts))
            .collect(),
        sizes: marker_sizes(schema, &shown, &encoding.size),
        colors: color_values(schema, &shown, &encoding.color),
        ids: shown.iter().map(|r| r.id).collect(),
    };

    let address_index = schema.address_field().and_then(|f| schema.index_of(&f.name));
    let list = ListProjection {
        rows: records
            .iter()
            .map(|r| ListRow {
                id: r.id,
                values: r.values.clone(),
                maps_url: address_index
                    .and_then(|idx| r.values[idx].as_text())
                    .map(maps_place_url)
                    .unwrap_or_default(),
            })
            .collect(),
    };

    debug!(
        dataset = %schema.title,
        points = plot.len(),
        "projections rebuilt"
    );
    Projections { plot, list }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRow;
    use crate::schema::FieldSpec;
    use crate::session::{texts, Language};

    fn store_with(rows: &[&[(&str, &str)]]) -> RecordStore {
        let schema = DatasetSchema::new(
            "Test",
            vec![
                FieldSpec::text("Name").required(),
                FieldSpec::text("Address").address(),
                FieldSpec::number("Rent", " €").required(),
                FieldSpec::number("Distance", " km").required(),
                FieldSpec::number("Size", " m²"),
                FieldSpec::boolean("Furnished"),
            ],
        );
        let mut store = RecordStore::new(schema);
        for row in rows {
            let raw: RawRow = row
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            store.add(&raw).unwrap();
        }
        store
    }

    fn encoding() -> Encoding {
        Encoding {
            x: "Distance".to_string(),
            y: "Rent".to_string(),
            color: "Furnished".to_string(),
            size: "Size".to_string(),
        }
    }

    fn sample_store() -> RecordStore {
        store_with(&[
            &[
                ("Name", "A"),
                ("Address", "Main St 1"),
                ("Rent", "500"),
                ("Distance", "2"),
                ("Size", "20"),
                ("Furnished", "true"),
            ],
            &[("Name", "B"), ("Rent", "700"), ("Distance", "5"), ("Size", "60")],
        ])
    }

    #[test]
    fn test_projection_lengths_match_record_count() {
        let store = sample_store();
        let p = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        assert_eq!(p.plot.xs.len(), store.len());
        assert_eq!(p.plot.ys.len(), store.len());
        assert_eq!(p.plot.hover.len(), store.len());
        assert_eq!(p.plot.sizes.len(), store.len());
        assert_eq!(p.plot.colors.len(), store.len());
        assert_eq!(p.plot.ids.len(), store.len());
        assert_eq!(p.list.rows.len(), store.len());
    }

    #[test]
    fn test_sync_is_idempotent() {
        let store = sample_store();
        let first = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        let second = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        assert_eq!(first, second);
    }

    #[test]
    fn test_point_ids_follow_store_order() {
        let mut store = sample_store();
        store.delete(0).unwrap();
        let p = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        assert_eq!(p.plot.ids, vec![1]);
        assert_eq!(p.list.rows[0].id, 1);
    }

    #[test]
    fn test_bool_color_encoding_is_binary() {
        let store = sample_store();
        let p = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        assert_eq!(p.plot.colors, vec![1.0, 0.0]);
    }

    #[test]
    fn test_list_rows_carry_derived_maps_url() {
        let store = sample_store();
        let p = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        assert_eq!(
            p.list.rows[0].maps_url,
            "https://www.google.com/maps/place/Main+St+1"
        );
        // no address, no link
        assert_eq!(p.list.rows[1].maps_url, "");
    }

    #[test]
    fn test_missing_axis_value_stays_in_parallel_arrays() {
        let store = store_with(&[&[("Name", "A"), ("Rent", "500"), ("Distance", "2")]]);
        let p = sync(&store, &encoding(), &BTreeSet::new(), texts(Language::En));
        assert_eq!(p.plot.xs, vec![Some(2.0)]);
        assert_eq!(p.plot.len(), 1);
    }

    #[test]
    fn test_hidden_records_leave_the_plot_but_not_the_list() {
        let store = sample_store();
        let hidden: BTreeSet<RecordId> = [0].into_iter().collect();
        let p = sync(&store, &encoding(), &hidden, texts(Language::En));
        assert_eq!(p.plot.ids, vec![1]);
        assert_eq!(p.plot.xs, vec![Some(5.0)]);
        assert_eq!(p.list.rows.len(), 2);
    }

    #[test]
    fn test_hiding_everything_yields_an_empty_plot() {
        let store = sample_store();
        let hidden: BTreeSet<RecordId> = [0, 1].into_iter().collect();
        let p = sync(&store, &encoding(), &hidden, texts(Language::En));
        assert!(p.plot.is_empty());
        assert_eq!(p.list.rows.len(), 2);
    }

    #[test]
    fn test_size_scale_normalizes_over_shown_records_only() {
        let store = store_with(&[
            &[("Name", "A"), ("Rent", "500"), ("Distance", "2"), ("Size", "20")],
            &[("Name", "B"), ("Rent", "600"), ("Distance", "3"), ("Size", "40")],
            &[("Name", "C"), ("Rent", "700"), ("Distance", "5"), ("Size", "60")],
        ]);
        let hidden: BTreeSet<RecordId> = [2].into_iter().collect();
        let p = sync(&store, &encoding(), &hidden, texts(Language::En));
        // 20 and 40 span the full radius range once C is hidden
        assert_eq!(p.plot.sizes, vec![14.0, 42.0]);
    }

    #[test]
    fn test_default_encoding_picks_schema_fields() {
        let store = sample_store();
        let enc = Encoding::default_for(store.schema());
        assert_eq!(enc.x, "Rent");
        assert_eq!(enc.y, "Distance");
        assert_eq!(enc.color, "Rent");
        assert_eq!(enc.size, "Size");
    }
}
