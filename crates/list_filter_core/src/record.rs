/// One extracted list entry.
///
/// `element` is a non-owning handle into the external tree; it is only valid for the
/// extraction pass that produced the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<H> {
    pub element: H,
    pub name: String,
    pub category_price: String,
    pub note: String,
    /// Lower-cased, whitespace-collapsed, diacritic-folded text of the whole entry.
    pub aggregated_text: String,
}
