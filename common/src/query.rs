//! Query-string encoding of active filters.
//!
//! `{field}_{operator}={value}` for single-operand operators and
//! `{field}_from={value}&{field}_to={valueTo}` for ranges. Output order is the
//! order of the input, which the filter state keeps in schema order.

use crate::filter_state::FilterValue;

/// Parameter key/value pairs, unencoded.
pub fn query_pairs(filters: &[FilterValue]) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(filters.len());
    for filter in filters {
        match (filter.operator.is_range(), &filter.value_to) {
            (true, Some(value_to)) => {
                pairs.push((format!("{}_from", filter.field), filter.value.clone()));
                pairs.push((format!("{}_to", filter.field), value_to.clone()));
            }
            // a range without its upper bound is not an active filter
            (true, None) => {}
            (false, _) => pairs.push((
                format!("{}_{}", filter.field, filter.operator.as_str()),
                filter.value.clone(),
            )),
        }
    }
    pairs
}

/// Joined, percent-encoded query string without a leading `?`. No filters
/// yields an empty string, which requests the unfiltered list.
pub fn serialize(filters: &[FilterValue]) -> String {
    query_pairs(filters)
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
