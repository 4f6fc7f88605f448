//! Messages processed by an entity page.

use crate::api::ApiError;
use crate::listing::criteria::FilterCriteria;
use crate::listing::dispatch::Mutation;
use crate::listing::fetch::Fetched;
use crate::listing::page::PageSize;
use crate::receipt::Receipt;

pub enum ListMsg<E> {
    // Controller operations
    Load,
    Refresh,
    ApplyFilters(FilterCriteria),
    ResetFilters,
    ChangePage(usize),
    ChangePageSize(PageSize),
    SortBy(&'static str),
    Loaded {
        seq: u64,
        result: Result<Fetched<E>, ApiError>,
    },

    // Row actions
    RequestDelete(E),
    RequestToggle(E),
    Confirmed,
    Cancelled,
    Submit {
        existing: Option<E>,
        value: String,
    },
    Mutated {
        mutation: Mutation,
        result: Result<(), ApiError>,
    },

    // Receipts
    CopyReceipt(Receipt),
    SaveReceipt(Receipt),
}
