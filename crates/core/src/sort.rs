//! Ordering of patient records by a numeric field.

use crate::error::RecordError;
use crate::model::{PatientView, RecordCollection};
use std::str::FromStr;

/// Field a sort can key on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl FromStr for SortField {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(RecordError::InvalidSortField(other.to_string())),
        }
    }
}

/// Sort direction. Ascending when unspecified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(RecordError::InvalidSortOrder(other.to_string())),
        }
    }
}

/// Returns every record as a view, ordered by `field`.
///
/// Sorting by bmi uses the freshly derived value, never a stored one. The
/// sort is stable, so ties keep the collection's id order.
pub fn sort_records(
    collection: &RecordCollection,
    field: SortField,
    order: SortOrder,
) -> Vec<PatientView> {
    let mut views: Vec<PatientView> = collection.values().map(PatientView::of).collect();

    views.sort_by(|a, b| {
        let (x, y) = (sort_key(a, field), sort_key(b, field));
        match order {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        }
    });

    views
}

fn sort_key(view: &PatientView, field: SortField) -> f64 {
    match field {
        SortField::Height => view.height,
        SortField::Weight => view.weight,
        SortField::Bmi => view.bmi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatientRecord;
    use pmr_types::PatientId;

    fn collection(entries: &[(&str, f64, f64)]) -> RecordCollection {
        entries
            .iter()
            .map(|(id, height, weight)| {
                (
                    PatientId::new(id).unwrap(),
                    PatientRecord::new("Pat", "Town", 40, "other", *height, *weight).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn sorts_by_bmi_descending() {
        // Height 1.0 makes bmi numerically equal to weight.
        let collection = collection(&[("P001", 1.0, 18.0), ("P002", 1.0, 30.2), ("P003", 1.0, 22.1)]);

        let views = sort_records(&collection, SortField::Bmi, SortOrder::Descending);
        let bmis: Vec<f64> = views.iter().map(|v| v.bmi).collect();

        assert_eq!(bmis, vec![30.2, 22.1, 18.0]);
    }

    #[test]
    fn sorts_by_height_ascending() {
        let collection = collection(&[("P001", 1.9, 80.0), ("P002", 1.5, 80.0), ("P003", 1.7, 80.0)]);

        let views = sort_records(&collection, SortField::Height, SortOrder::Ascending);
        let heights: Vec<f64> = views.iter().map(|v| v.height).collect();

        assert_eq!(heights, vec![1.5, 1.7, 1.9]);
    }

    #[test]
    fn ties_keep_id_order() {
        let mut collection = RecordCollection::new();
        for (id, name) in [("P003", "Cleo"), ("P001", "Abel"), ("P002", "Bess")] {
            collection.insert(
                PatientId::new(id).unwrap(),
                PatientRecord::new(name, "Town", 40, "other", 1.7, 70.0).unwrap(),
            );
        }

        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let views = sort_records(&collection, SortField::Weight, order);
            let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
            // All weights equal, so the map's key order (P001, P002, P003) survives.
            assert_eq!(names, vec!["Abel", "Bess", "Cleo"]);
        }
    }

    #[test]
    fn rejects_unknown_field_and_order() {
        assert!(matches!(
            "name".parse::<SortField>(),
            Err(RecordError::InvalidSortField(_))
        ));
        assert!(matches!(
            "sideways".parse::<SortOrder>(),
            Err(RecordError::InvalidSortOrder(_))
        ));
    }

    #[test]
    fn order_tokens_parse() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Ascending);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Descending);
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
    }
}
