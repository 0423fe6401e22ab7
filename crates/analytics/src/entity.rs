use crate::report::TimeframeAggregate;
use core_types::EntityKind;

/// Decides whether a selected label names a stock or a sector.
///
/// A label is a sector only when some timeframe lists it as a sector and no
/// timeframe lists it as a stock. Only sectors the records carry count, so
/// the placeholder for a missing sector resolves as a stock.
pub fn resolve_entity_kind(
    label: &str,
    monthly: &TimeframeAggregate,
    quarterly: &TimeframeAggregate,
    yearly: &TimeframeAggregate,
) -> EntityKind {
    let aggregates = [monthly, quarterly, yearly];
    if aggregates.iter().any(|agg| agg.has_stock(label)) {
        return EntityKind::Stock;
    }
    if aggregates.iter().any(|agg| agg.has_sector(label)) {
        EntityKind::Sector
    } else {
        EntityKind::Stock
    }
}
