//! Inventory query engine
//!
//! Pure, synchronous operations over a borrowed inventory snapshot:
//! filter → stable sort → paginate, facet aggregation, text search and the
//! placeholder recommendation list. No I/O happens here; the caller loads
//! the snapshot and enriches the results.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{InventoryMetadata, Vehicle, UNKNOWN_FACET};
use crate::services::vehicle_filter::VehiclePredicate;

/// Sentinel limit meaning "every match, unpaginated"
pub const LIMIT_ALL: i64 = -1;

/// Engine limits, fixed at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub default_limit: usize,
    pub search_limit: usize,
    pub recommendation_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            search_limit: 5,
            recommendation_limit: 3,
        }
    }
}

/// Sortable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    ModelYear,
    Make,
    Odometer,
    Price,
}

impl SortKey {
    /// Unrecognized keys fall back to `ModelYear`
    pub fn parse_lenient(key: &str) -> Self {
        match key {
            "ModelYear" => SortKey::ModelYear,
            "Make" => SortKey::Make,
            "Odometer" => SortKey::Odometer,
            "Price" => SortKey::Price,
            _ => SortKey::ModelYear,
        }
    }

    /// String form compared by the sort; unknown values compare as ""
    ///
    /// Numbers and prices are compared as text on purpose: "500" sorts
    /// after "1000".
    pub fn value_of(&self, vehicle: &Vehicle) -> String {
        match self {
            SortKey::ModelYear => vehicle.model_year.map(|y| y.to_string()),
            SortKey::Make => vehicle.make.clone(),
            SortKey::Odometer => vehicle.odometer.map(|o| o.to_string()),
            SortKey::Price => vehicle.price.map(|p| p.to_string()),
        }
        .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything but "desc" is ascending
    pub fn parse_lenient(order: &str) -> Self {
        if order.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortArgs {
    pub key: SortKey,
    pub order: SortOrder,
}

/// Raw pagination input; clamped by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paginate {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Paginate {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    pub fn all() -> Self {
        Self {
            limit: Some(LIMIT_ALL),
            offset: Some(0),
        }
    }
}

/// One page of matches plus totals
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResult<'a> {
    pub data: Vec<&'a Vehicle>,
    pub count: usize,
    pub pages: usize,
}

/// Stateless engine; cheap to copy
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryQueryEngine {
    config: EngineConfig,
}

impl InventoryQueryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Filter, sort and paginate the collection
    ///
    /// Returns `None` only when the collection itself is empty. Zero matches
    /// after filtering is a normal result with `count == 0`.
    pub fn query<'a>(
        &self,
        collection: &'a [Vehicle],
        sort: Option<SortArgs>,
        filter: Option<&dyn VehiclePredicate>,
        paginate: Option<Paginate>,
    ) -> Option<SearchResult<'a>> {
        if collection.is_empty() {
            return None;
        }

        let sort = sort.unwrap_or_default();
        let paginate = paginate.unwrap_or_default();

        let mut matches: Vec<&'a Vehicle> = collection
            .iter()
            .filter(|v| filter.map_or(true, |f| f.matches(v)))
            .collect();

        // Stable: equal keys keep their filtered order
        matches.sort_by_cached_key(|v| sort.key.value_of(v));
        if sort.order == SortOrder::Desc {
            matches.reverse();
        }

        let count = matches.len();
        let offset = paginate.offset.unwrap_or(0).max(0) as usize;

        let (limit, pages) = match self.effective_limit(paginate.limit) {
            None => (count, 1),
            Some(limit) => (limit, count.div_ceil(limit)),
        };

        let data = matches
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect();

        Some(SearchResult { data, count, pages })
    }

    /// `None` means unpaginated; invalid limits fall back to the default
    fn effective_limit(&self, limit: Option<i64>) -> Option<usize> {
        match limit {
            Some(LIMIT_ALL) => None,
            Some(n) if n > 0 => Some(n as usize),
            _ => Some(self.config.default_limit.max(1)),
        }
    }

    /// Make and model-year facet counts over the whole collection
    ///
    /// Records without the attribute are counted under `UNKNOWN_FACET` so
    /// both maps always sum to the collection size.
    pub fn compute_metadata(&self, collection: &[Vehicle]) -> InventoryMetadata {
        let mut makes: BTreeMap<String, u64> = BTreeMap::new();
        let mut model_years: BTreeMap<String, u64> = BTreeMap::new();

        for vehicle in collection {
            let make = vehicle
                .make
                .clone()
                .unwrap_or_else(|| UNKNOWN_FACET.to_string());
            *makes.entry(make).or_insert(0) += 1;

            let year = vehicle
                .model_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN_FACET.to_string());
            *model_years.entry(year).or_insert(0) += 1;
        }

        InventoryMetadata { makes, model_years }
    }

    /// First `limit` vehicles matching the text, in collection order
    ///
    /// Make, Model and StockNum match case-insensitively; ModelYear matches
    /// as a digit substring. Records missing any of those four fields are
    /// never candidates. No ranking.
    pub fn search<'a>(
        &self,
        collection: &'a [Vehicle],
        query: &str,
        limit: Option<usize>,
    ) -> Vec<&'a Vehicle> {
        let limit = limit.unwrap_or(self.config.search_limit);
        let needle = query.to_lowercase();

        collection
            .iter()
            .filter(|v| matches_text(v, query, &needle))
            .take(limit)
            .collect()
    }

    /// Placeholder recommendations
    ///
    /// Up to `limit` vehicles from the default-sorted inventory. The stock
    /// number is accepted for the call contract but not used.
    pub fn recommend<'a>(
        &self,
        collection: &'a [Vehicle],
        _stock_num: &str,
        limit: Option<usize>,
    ) -> Vec<&'a Vehicle> {
        let limit = limit.unwrap_or(self.config.recommendation_limit);
        if limit == 0 {
            return Vec::new();
        }

        self.query(collection, None, None, Some(Paginate::new(limit as i64, 0)))
            .map(|result| result.data)
            .unwrap_or_default()
    }
}

fn matches_text(vehicle: &Vehicle, query: &str, needle: &str) -> bool {
    let (Some(year), Some(make), Some(model), Some(stock_num)) = (
        vehicle.model_year,
        vehicle.make.as_deref(),
        vehicle.model.as_deref(),
        vehicle.stock_num.as_deref(),
    ) else {
        return false;
    };

    if year == 0 || make.is_empty() || model.is_empty() || stock_num.is_empty() {
        return false;
    }

    year.to_string().contains(query)
        || make.to_lowercase().contains(needle)
        || model.to_lowercase().contains(needle)
        || stock_num.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::vehicle_filter::VehicleFilter;

    fn vehicle(stock: &str, year: i32, make: &str, model: &str) -> Vehicle {
        let mut v = Vehicle::with_stock_num(stock);
        v.model_year = Some(year);
        v.make = Some(make.to_string());
        v.model = Some(model.to_string());
        v
    }

    fn priced(stock: &str, price: &str) -> Vehicle {
        let mut v = vehicle(stock, 2020, "Toyota", "Camry");
        v.price = Some(price.parse().unwrap());
        v
    }

    fn stock_nums(result: &[&Vehicle]) -> Vec<String> {
        result
            .iter()
            .map(|v| v.stock_num().unwrap_or_default().to_string())
            .collect()
    }

    fn fleet(n: usize) -> Vec<Vehicle> {
        (0..n)
            .map(|i| vehicle(&format!("S{:02}", i), 2015 + (i % 7) as i32, "Ford", "Focus"))
            .collect()
    }

    #[test]
    fn test_empty_collection_is_absent() {
        let engine = InventoryQueryEngine::default();
        assert!(engine.query(&[], None, None, None).is_none());
    }

    #[test]
    fn test_zero_matches_is_a_result() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(4);
        let nothing = |_: &Vehicle| false;

        let result = engine.query(&inventory, None, Some(&nothing), None).unwrap();
        assert_eq!(result.count, 0);
        assert_eq!(result.pages, 0);
        assert!(result.data.is_empty());
    }

    #[test]
    fn test_default_limit_and_page_count() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(23);

        let result = engine.query(&inventory, None, None, None).unwrap();
        assert_eq!(result.data.len(), 10);
        assert_eq!(result.count, 23);
        assert_eq!(result.pages, 3);
    }

    #[test]
    fn test_page_never_exceeds_limit() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(17);

        for limit in 1..20 {
            let result = engine
                .query(&inventory, None, None, Some(Paginate::new(limit, 0)))
                .unwrap();
            assert!(result.data.len() <= limit as usize);
            assert_eq!(result.pages, 17usize.div_ceil(limit as usize));
        }
    }

    #[test]
    fn test_limit_all_returns_everything_on_one_page() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(37);

        let result = engine
            .query(&inventory, None, None, Some(Paginate::all()))
            .unwrap();
        assert_eq!(result.pages, 1);
        assert_eq!(result.data.len(), result.count);
        assert_eq!(result.count, 37);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(5);

        let result = engine
            .query(&inventory, None, None, Some(Paginate::new(10, 50)))
            .unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.count, 5);
    }

    #[test]
    fn test_invalid_pagination_is_clamped() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(12);

        let zero = engine
            .query(&inventory, None, None, Some(Paginate::new(0, -4)))
            .unwrap();
        assert_eq!(zero.data.len(), 10);
        assert_eq!(zero.pages, 2);

        let negative = engine
            .query(&inventory, None, None, Some(Paginate::new(-7, 0)))
            .unwrap();
        assert_eq!(negative.data.len(), 10);
    }

    #[test]
    fn test_count_ignores_pagination() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(30);
        let recent = |v: &Vehicle| v.model_year.map_or(false, |y| y >= 2019);
        let expected = inventory.iter().filter(|v| recent(v)).count();

        for paginate in [Paginate::new(3, 0), Paginate::new(5, 10), Paginate::all()] {
            let result = engine
                .query(&inventory, None, Some(&recent), Some(paginate))
                .unwrap();
            assert_eq!(result.count, expected);
        }
    }

    #[test]
    fn test_filter_struct_is_a_predicate() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            vehicle("A", 2020, "Toyota", "Camry"),
            vehicle("B", 2019, "Honda", "Civic"),
            vehicle("C", 2020, "Honda", "Accord"),
        ];
        let filter = VehicleFilter::new()
            .with_makes(["Honda"])
            .with_model_years([2020]);

        let result = engine
            .query(&inventory, None, Some(&filter), None)
            .unwrap();
        assert_eq!(stock_nums(&result.data), vec!["C"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            vehicle("A", 2020, "Toyota", "Camry"),
            vehicle("B", 2019, "Honda", "Civic"),
            vehicle("C", 2020, "Ford", "Focus"),
            vehicle("D", 2019, "Mazda", "3"),
            vehicle("E", 2020, "Kia", "Rio"),
        ];

        let result = engine
            .query(&inventory, None, None, Some(Paginate::all()))
            .unwrap();
        assert_eq!(stock_nums(&result.data), vec!["B", "D", "A", "C", "E"]);
    }

    #[test]
    fn test_desc_is_reverse_of_asc() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            priced("A", "25000"),
            priced("B", "18000"),
            priced("C", "31000"),
            priced("D", "9500"),
        ];
        let asc = SortArgs {
            key: SortKey::Price,
            order: SortOrder::Asc,
        };
        let desc = SortArgs {
            key: SortKey::Price,
            order: SortOrder::Desc,
        };

        let up = engine
            .query(&inventory, Some(asc), None, Some(Paginate::all()))
            .unwrap();
        let mut down = stock_nums(
            &engine
                .query(&inventory, Some(desc), None, Some(Paginate::all()))
                .unwrap()
                .data,
        );
        down.reverse();
        assert_eq!(stock_nums(&up.data), down);
    }

    #[test]
    fn test_price_sort_is_lexicographic() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![priced("cheap", "1000"), priced("big", "9999"), priced("five", "500")];
        let sort = SortArgs {
            key: SortKey::Price,
            order: SortOrder::Desc,
        };

        let result = engine
            .query(&inventory, Some(sort), None, Some(Paginate::all()))
            .unwrap();
        // "9999" > "500" > "1000" as text
        assert_eq!(stock_nums(&result.data), vec!["big", "five", "cheap"]);
    }

    #[test]
    fn test_odometer_sort_is_lexicographic() {
        let engine = InventoryQueryEngine::default();
        let mut low = vehicle("low", 2020, "Kia", "Rio");
        low.odometer = Some(500);
        let mut high = vehicle("high", 2020, "Kia", "Rio");
        high.odometer = Some(10000);
        let inventory = vec![low, high];
        let sort = SortArgs {
            key: SortKey::parse_lenient("Odometer"),
            order: SortOrder::Asc,
        };

        let result = engine.query(&inventory, Some(sort), None, None).unwrap();
        assert_eq!(stock_nums(&result.data), vec!["high", "low"]);
    }

    #[test]
    fn test_unknown_sort_key_defaults_to_model_year() {
        assert_eq!(SortKey::parse_lenient("Color"), SortKey::ModelYear);
        assert_eq!(SortKey::parse_lenient(""), SortKey::ModelYear);
        assert_eq!(SortOrder::parse_lenient("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse_lenient("sideways"), SortOrder::Asc);
    }

    #[test]
    fn test_metadata_counts() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            vehicle("A", 2020, "Toyota", "Camry"),
            vehicle("B", 2019, "Toyota", "Corolla"),
            vehicle("C", 2020, "Honda", "Civic"),
        ];

        let metadata = engine.compute_metadata(&inventory);
        assert_eq!(metadata.model_years.len(), 2);
        assert_eq!(metadata.model_years.get("2020"), Some(&2));
        assert_eq!(metadata.model_years.get("2019"), Some(&1));
        assert_eq!(metadata.makes.get("Toyota"), Some(&2));
        assert_eq!(metadata.makes.get("Honda"), Some(&1));
    }

    #[test]
    fn test_metadata_sums_match_collection() {
        let engine = InventoryQueryEngine::default();
        let mut inventory = fleet(19);
        inventory.push(Vehicle::with_stock_num("bare"));

        let metadata = engine.compute_metadata(&inventory);
        assert_eq!(metadata.make_total(), 20);
        assert_eq!(metadata.model_year_total(), 20);
        assert_eq!(metadata.makes.get(UNKNOWN_FACET), Some(&1));
        assert_eq!(metadata, engine.compute_metadata(&inventory));
    }

    #[test]
    fn test_search_matches_partial_make() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            vehicle("A1", 2018, "Honda", "Civic"),
            vehicle("A2", 2020, "Toyota", "Camry"),
        ];

        let found = engine.search(&inventory, "toy", Some(5));
        assert_eq!(stock_nums(&found), vec!["A2"]);
    }

    #[test]
    fn test_search_fields() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            vehicle("ZX-900", 2018, "Honda", "Civic"),
            vehicle("A2", 2020, "Toyota", "Camry"),
            vehicle("A3", 2021, "Ford", "Mustang"),
        ];

        assert_eq!(stock_nums(&engine.search(&inventory, "zx", None)), vec!["ZX-900"]);
        assert_eq!(stock_nums(&engine.search(&inventory, "MUST", None)), vec!["A3"]);
        assert_eq!(stock_nums(&engine.search(&inventory, "202", None)), vec!["A2", "A3"]);
    }

    #[test]
    fn test_search_skips_incomplete_records() {
        let engine = InventoryQueryEngine::default();
        let mut no_model = vehicle("A1", 2020, "Toyota", "");
        no_model.model = None;
        let inventory = vec![no_model, vehicle("A2", 2020, "Toyota", "")];

        assert!(engine.search(&inventory, "toyota", None).is_empty());
    }

    #[test]
    fn test_search_truncates_in_collection_order() {
        let engine = InventoryQueryEngine::default();
        let inventory = fleet(12);

        let found = engine.search(&inventory, "ford", None);
        assert_eq!(stock_nums(&found), vec!["S00", "S01", "S02", "S03", "S04"]);
        assert_eq!(engine.search(&inventory, "ford", Some(2)).len(), 2);
    }

    #[test]
    fn test_recommend_is_first_default_sorted_items() {
        let engine = InventoryQueryEngine::default();
        let inventory = vec![
            vehicle("A", 2022, "Toyota", "Camry"),
            vehicle("B", 2017, "Honda", "Civic"),
            vehicle("C", 2019, "Ford", "Focus"),
            vehicle("D", 2018, "Kia", "Rio"),
        ];

        let picks = engine.recommend(&inventory, "A", None);
        assert_eq!(stock_nums(&picks), vec!["B", "D", "C"]);
        assert!(engine.recommend(&inventory, "A", Some(0)).is_empty());
        assert!(engine.recommend(&[], "A", None).is_empty());
    }
}
