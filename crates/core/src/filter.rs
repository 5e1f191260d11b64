//! In-memory filtering and ordering of loaded collections.
//!
//! A [`FilterSet`] holds the ambient filter and sort state a view mutates
//! over its lifetime; [`FilterSet::filter_data`] derives the visible,
//! ordered subset of a collection from that state on every call. Nothing is
//! cached; collections are clinic-scale and recomputing keeps the state
//! trivially consistent.

use clinident_types::Fields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Comparison operator applied when testing a field against a filter term.
///
/// All comparisons are case-insensitive over the field's string form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    #[default]
    Contains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
}

impl MatchMode {
    /// Wire form used in filter snapshots.
    fn to_wire(self) -> &'static str {
        match self {
            MatchMode::Contains => "contains",
            MatchMode::StartsWith => "starts_with",
            MatchMode::EndsWith => "ends_with",
            MatchMode::Equals => "equals",
            MatchMode::NotEquals => "not_equals",
        }
    }

    /// Parse from wire form. Unknown values fall back to `Contains`, the
    /// same degraded semantics an unrecognised mode gets at match time.
    fn from_wire(s: &str) -> Self {
        match s {
            "starts_with" => MatchMode::StartsWith,
            "ends_with" => MatchMode::EndsWith,
            "equals" => MatchMode::Equals,
            "not_equals" => MatchMode::NotEquals,
            _ => MatchMode::Contains,
        }
    }

    /// Test a lowercased field value against a lowercased term.
    fn matches(self, value: &str, term: &str) -> bool {
        match self {
            MatchMode::Contains => value.contains(term),
            MatchMode::StartsWith => value.starts_with(term),
            MatchMode::EndsWith => value.ends_with(term),
            MatchMode::Equals => value == term,
            MatchMode::NotEquals => value != term,
        }
    }
}

impl Serialize for MatchMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_wire())
    }
}

impl<'de> Deserialize<'de> for MatchMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(MatchMode::from_wire(&s))
    }
}

/// Sort direction of the single active sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// One filter entry: an optional term plus the operator to apply it with.
///
/// Clearing a filter resets `value` to `None` but keeps the entry and its
/// `match_mode`, so a view's configured operators survive a reset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub value: Option<String>,
    pub match_mode: MatchMode,
}

impl FieldFilter {
    fn is_active(&self) -> bool {
        matches!(&self.value, Some(v) if !v.is_empty())
    }
}

/// Serializable snapshot of a [`FilterSet`], for saving and restoring a
/// view's filter state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub global: FieldFilter,
    pub fields: BTreeMap<String, FieldFilter>,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
}

/// Mutable filter and sort state for one loaded collection.
///
/// The global entry is always present; per-field entries come and go as the
/// view configures them. Field iteration is in key order, which is
/// irrelevant to the outcome since the filters AND together.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    global: FieldFilter,
    fields: BTreeMap<String, FieldFilter>,
    sort_field: Option<String>,
    sort_direction: SortDirection,
}

impl FilterSet {
    /// An empty filter set: global entry present, no term, no sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of a per-field entry with its operator,
    /// mirroring how a view declares its filterable columns up front.
    pub fn with_field(mut self, field: impl Into<String>, match_mode: MatchMode) -> Self {
        self.fields.insert(
            field.into(),
            FieldFilter {
                value: None,
                match_mode,
            },
        );
        self
    }

    /// Set the global search term.
    pub fn set_global_filter(&mut self, value: impl Into<String>) {
        self.global.value = Some(value.into());
    }

    /// Clear the global search term.
    pub fn clear_global_filter(&mut self) {
        self.global.value = None;
    }

    /// The current global search term, empty if none is set.
    pub fn search_term(&self) -> &str {
        self.global.value.as_deref().unwrap_or("")
    }

    /// Set (or add) a per-field filter.
    pub fn set_filter(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
        match_mode: MatchMode,
    ) {
        self.fields.insert(
            field.into(),
            FieldFilter {
                value: Some(value.into()),
                match_mode,
            },
        );
    }

    /// Clear a per-field filter's term, keeping the entry and its operator.
    pub fn clear_filter(&mut self, field: &str) {
        if let Some(filter) = self.fields.get_mut(field) {
            filter.value = None;
        }
    }

    /// Drop a per-field entry entirely.
    pub fn remove_filter(&mut self, field: &str) {
        self.fields.remove(field);
    }

    /// Reset every entry's term to `None`, preserving match modes and the
    /// key set (global included).
    pub fn clear_all_filters(&mut self) {
        self.global.value = None;
        for filter in self.fields.values_mut() {
            filter.value = None;
        }
    }

    /// Whether any entry currently carries a non-empty term.
    pub fn has_active_filters(&self) -> bool {
        self.global.is_active() || self.fields.values().any(FieldFilter::is_active)
    }

    /// Toggle sorting on `field`: the currently sorted field flips
    /// direction, a new field starts ascending.
    pub fn toggle_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        if self.sort_field.as_deref() == Some(field.as_str()) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = Some(field);
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Set the sort key and direction explicitly.
    pub fn set_sort(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.sort_field = Some(field.into());
        self.sort_direction = direction;
    }

    /// Remove the sort key, resetting direction to ascending.
    pub fn clear_sort(&mut self) {
        self.sort_field = None;
        self.sort_direction = SortDirection::Asc;
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Capture the current state for later [`restore`](Self::restore).
    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            global: self.global.clone(),
            fields: self.fields.clone(),
            sort_field: self.sort_field.clone(),
            sort_direction: self.sort_direction,
        }
    }

    /// Restore a previously captured state wholesale.
    pub fn restore(&mut self, snapshot: FilterSnapshot) {
        self.global = snapshot.global;
        self.fields = snapshot.fields;
        self.sort_field = snapshot.sort_field;
        self.sort_direction = snapshot.sort_direction;
    }

    /// Derive the filtered, ordered view of `data`.
    ///
    /// `search_fields` names the fields eligible for the global term. The
    /// global filter keeps records where any searchable field contains the
    /// term (case-insensitive); each active per-field filter then narrows
    /// further with its own operator; finally the sort key, if set, orders
    /// the survivors by byte-wise `cmp` of the field's lowercased string
    /// form: case-insensitive, not locale-aware. The sort is stable:
    /// records with equal keys keep their pre-sort relative order.
    ///
    /// Absent, null and empty fields never match a filter; they sort as the
    /// empty string. A pure function of `(data, state, search_fields)`.
    pub fn filter_data<T>(&self, data: &[T], search_fields: &[&str]) -> Vec<T>
    where
        T: Fields + Clone,
    {
        let mut filtered: Vec<T> = data.to_vec();

        let term = self.search_term().to_lowercase();
        if !term.is_empty() {
            filtered.retain(|item| {
                search_fields.iter().any(|field| match item.field(field) {
                    Some(value) if !value.is_empty() => {
                        value.to_text().to_lowercase().contains(&term)
                    }
                    _ => false,
                })
            });
        }

        for (field, filter) in &self.fields {
            let Some(value) = &filter.value else { continue };
            if value.is_empty() {
                continue;
            }
            let term = value.to_lowercase();
            filtered.retain(|item| match item.field(field) {
                Some(value) if !value.is_empty() => filter
                    .match_mode
                    .matches(&value.to_text().to_lowercase(), &term),
                _ => false,
            });
        }

        if let Some(field) = &self.sort_field {
            filtered.sort_by(|a, b| {
                let ka = a.field_text(field).to_lowercase();
                let kb = b.field_text(field).to_lowercase();
                match self.sort_direction {
                    SortDirection::Asc => ka.cmp(&kb),
                    SortDirection::Desc => kb.cmp(&ka),
                }
            });
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinident_types::FieldValue;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        name: &'static str,
        city: Option<&'static str>,
        seq: i64,
    }

    impl Fields for Row {
        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "name" => Some(self.name.into()),
                "city" => Some(self.city.map(str::to_owned).into()),
                "seq" => Some(self.seq.into()),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Ana Vela", city: Some("Quito"), seq: 1 },
            Row { name: "Bruno Paz", city: Some("Guayaquil"), seq: 2 },
            Row { name: "carla vela", city: None, seq: 3 },
            Row { name: "Diego Soto", city: Some("quito"), seq: 4 },
        ]
    }

    #[test]
    fn global_filter_is_case_insensitive_substring_over_search_fields() {
        let mut filters = FilterSet::new();
        filters.set_global_filter("VELA");
        let out = filters.filter_data(&rows(), &["name", "city"]);
        let names: Vec<_> = out.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Ana Vela", "carla vela"]);
    }

    #[test]
    fn missing_fields_never_match() {
        let mut filters = FilterSet::new();
        filters.set_filter("city", "quito", MatchMode::Equals);
        let out = filters.filter_data(&rows(), &[]);
        // carla has no city at all; she must be excluded, not error.
        let names: Vec<_> = out.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Ana Vela", "Diego Soto"]);
    }

    #[test]
    fn field_filters_and_together() {
        let mut filters = FilterSet::new();
        filters.set_filter("name", "vela", MatchMode::EndsWith);
        filters.set_filter("city", "qu", MatchMode::StartsWith);
        let out = filters.filter_data(&rows(), &[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Ana Vela");
    }

    #[test]
    fn not_equals_excludes_exact_matches_only() {
        let mut filters = FilterSet::new();
        filters.set_filter("city", "quito", MatchMode::NotEquals);
        let out = filters.filter_data(&rows(), &[]);
        // carla (no city) is still excluded: absent fields never match.
        let names: Vec<_> = out.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Bruno Paz"]);
    }

    #[test]
    fn unknown_match_mode_decodes_as_contains() {
        let mode: MatchMode = serde_json::from_str("\"fuzzy\"").expect("decode mode");
        assert_eq!(mode, MatchMode::Contains);
        let mode: MatchMode = serde_json::from_str("\"starts_with\"").expect("decode mode");
        assert_eq!(mode, MatchMode::StartsWith);
    }

    #[test]
    fn sort_is_stable_and_coerces_missing_to_empty() {
        let data = vec![
            Row { name: "b", city: Some("X"), seq: 1 },
            Row { name: "a", city: None, seq: 2 },
            Row { name: "c", city: Some("X"), seq: 3 },
            Row { name: "d", city: None, seq: 4 },
        ];
        let mut filters = FilterSet::new();
        filters.set_sort("city", SortDirection::Asc);
        let out = filters.filter_data(&data, &[]);
        // Missing cities sort first (empty string); ties keep input order.
        let seqs: Vec<_> = out.iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![2, 4, 1, 3]);
    }

    #[test]
    fn sorted_output_is_a_permutation_and_idempotent() {
        let mut filters = FilterSet::new();
        filters.set_sort("name", SortDirection::Desc);
        let once = filters.filter_data(&rows(), &[]);
        let twice = filters.filter_data(&once, &[]);
        assert_eq!(once.len(), rows().len());
        assert_eq!(once, twice);
        let names: Vec<_> = once.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Diego Soto", "carla vela", "Bruno Paz", "Ana Vela"]);
    }

    #[test]
    fn toggle_sort_flips_direction_then_resets_on_new_field() {
        let mut filters = FilterSet::new();
        filters.toggle_sort("name");
        assert_eq!(filters.sort_field(), Some("name"));
        assert_eq!(filters.sort_direction(), SortDirection::Asc);
        filters.toggle_sort("name");
        assert_eq!(filters.sort_direction(), SortDirection::Desc);
        filters.toggle_sort("city");
        assert_eq!(filters.sort_field(), Some("city"));
        assert_eq!(filters.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn clear_all_preserves_entries_and_match_modes() {
        let mut filters = FilterSet::new().with_field("name", MatchMode::StartsWith);
        filters.set_global_filter("x");
        filters.set_filter("city", "quito", MatchMode::Equals);
        filters.clear_all_filters();

        assert!(!filters.has_active_filters());
        let snapshot = filters.snapshot();
        assert_eq!(snapshot.fields["name"].match_mode, MatchMode::StartsWith);
        assert_eq!(snapshot.fields["city"].match_mode, MatchMode::Equals);
        assert_eq!(snapshot.fields["city"].value, None);

        // With everything cleared, the input comes back unchanged in order.
        let out = filters.filter_data(&rows(), &["name"]);
        assert_eq!(out, rows());
    }

    #[test]
    fn snapshot_restores_wholesale() {
        let mut filters = FilterSet::new();
        filters.set_global_filter("vela");
        filters.set_sort("name", SortDirection::Desc);
        let saved = filters.snapshot();

        filters.clear_all_filters();
        filters.clear_sort();
        filters.restore(saved);

        assert_eq!(filters.search_term(), "vela");
        assert_eq!(filters.sort_field(), Some("name"));
        assert_eq!(filters.sort_direction(), SortDirection::Desc);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let mut filters = FilterSet::new();
        filters.set_global_filter("anything");
        let out = filters.filter_data(&Vec::<Row>::new(), &["name"]);
        assert!(out.is_empty());
    }
}
